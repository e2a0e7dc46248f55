//! JSON boundary for other processes and languages.
//!
//! A request is one JSON object:
//!
//! ```json
//! {"score": {"Alice": 5, "Bob": 3}, "magic": [0, 1, 2, 255]}
//! ```
//!
//! `magic` is optional; absent or `null` means no extra entropy. A
//! response is either a JSON array of names in tie-break order or an
//! error object `{"error": {"kind": "invalid_input", "message": "..."}}`.
//!
//! [`serve_lines`] answers newline-delimited requests, one response line
//! per request line, so a driver in another language can stream test
//! cases through a single process.

mod request;
mod server;

pub use request::{
    parse_request, respond, respond_bytes, ErrorBody, ErrorResponse, PermuteRequest,
    PermuteResponse,
};
pub use server::{serve_lines, ServeStats};
