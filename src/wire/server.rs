//! Newline-delimited request loop.

use super::request::{respond_bytes, PermuteResponse};
use std::io::{self, BufRead, Write};

/// Counters reported when the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Requests answered with an order.
    pub answered: usize,
    /// Requests answered with an error object.
    pub failed: usize,
}

/// Answers one JSON request per input line until EOF.
///
/// Blank lines are skipped. Every other line gets exactly one response
/// line, so callers can pair requests and responses by position. Bad
/// requests (including lines that are not UTF-8) are answered in-band
/// and never stop the loop; only I/O failures do.
///
/// # Examples
///
/// ```
/// use star_tie::wire::serve_lines;
///
/// let input = b"{\"score\": {\"solo\": 1}}\n\n{\"score\": 5}\n";
/// let mut output = Vec::new();
/// let stats = serve_lines(&input[..], &mut output)?;
/// assert_eq!((stats.answered, stats.failed), (1, 1));
/// assert!(String::from_utf8(output).unwrap().starts_with("[\"solo\"]\n{\"error\""));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn serve_lines<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> io::Result<ServeStats> {
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = trim_line_ending(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = respond_bytes(line);

        match &response {
            PermuteResponse::Order(order) => {
                stats.answered += 1;
                tracing::trace!(line = line_no, candidates = order.len(), "answered request");
            }
            PermuteResponse::Error(body) => {
                stats.failed += 1;
                tracing::warn!(
                    line = line_no,
                    kind = ?body.error.kind,
                    message = %body.error.message,
                    "rejected request"
                );
            }
        }

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    tracing::debug!(
        answered = stats.answered,
        failed = stats.failed,
        "input exhausted"
    );
    Ok(stats)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
