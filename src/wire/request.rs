//! Request parsing and response shapes.

use crate::error::{ErrorKind, TieError};
use crate::permute::{CandidateSet, PermuteConfig, Permuter};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A validated permutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermuteRequest {
    /// Candidates and their scores.
    pub candidates: CandidateSet,
    /// Magic bytes; empty when the request carried none.
    pub magic: Vec<u8>,
}

impl PermuteRequest {
    /// Configuration equivalent to this request.
    pub fn config(&self) -> PermuteConfig {
        PermuteConfig::default().with_magic(self.magic.clone())
    }

    /// Computes the tie-break order.
    pub fn run(&self) -> Result<Vec<String>, TieError> {
        Ok(Permuter::run(&self.candidates, &self.config())?.into_names())
    }
}

/// Body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl From<&TieError> for ErrorResponse {
    fn from(err: &TieError) -> Self {
        Self {
            error: ErrorBody {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

/// One response line: the order, or an error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermuteResponse {
    Order(Vec<String>),
    Error(ErrorResponse),
}

impl PermuteResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, PermuteResponse::Error(_))
    }
}

impl From<Result<Vec<String>, TieError>> for PermuteResponse {
    fn from(result: Result<Vec<String>, TieError>) -> Self {
        match result {
            Ok(order) => PermuteResponse::Order(order),
            Err(err) => PermuteResponse::Error(ErrorResponse::from(&err)),
        }
    }
}

/// Parses and validates one JSON request.
///
/// # Errors
///
/// - [`TieError::InvalidInput`]: malformed JSON (including unpaired
///   surrogate escapes in names), missing or repeated `score`, scores
///   that are not integer literals.
/// - [`TieError::InvalidScore`]: negative scores, or scores above
///   `u128::MAX`.
/// - [`TieError::DuplicateName`]: a name appears twice in `score`.
/// - [`TieError::TypeMismatch`]: `score` is not an object, a score is not
///   a number, or `magic` is not an array of integers in `0..=255`.
///
/// # Examples
///
/// ```
/// use star_tie::wire::parse_request;
///
/// let request = parse_request(r#"{"score": {"A": 0, "B": 1}, "magic": [7]}"#)?;
/// assert_eq!(request.candidates.len(), 2);
/// assert_eq!(request.magic, [7]);
/// # Ok::<(), star_tie::TieError>(())
/// ```
pub fn parse_request(text: &str) -> Result<PermuteRequest, TieError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| TieError::InvalidInput(format!("malformed request: {err}")))?;
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(TieError::TypeMismatch(format!(
                "request must be an object, got {}",
                json_kind(&other)
            )))
        }
    };

    match fields.get("score") {
        Some(Value::Object(_)) => {}
        Some(other) => {
            return Err(TieError::TypeMismatch(format!(
                "\"score\" must be an object mapping names to integers, got {}",
                json_kind(other)
            )))
        }
        None => return Err(TieError::InvalidInput("request has no \"score\" field".into())),
    }

    // `Value` keeps only the last of repeated keys, so the names are read
    // again from the text with every entry intact.
    let ScoreField { score } = serde_json::from_str(text)
        .map_err(|err| TieError::InvalidInput(format!("malformed request: {err}")))?;
    let candidates = parse_scores(score.0)?;
    let magic = parse_magic(fields.remove("magic").unwrap_or(Value::Null))?;

    Ok(PermuteRequest { candidates, magic })
}

/// Parses, runs, and wraps the outcome of one request.
pub fn respond(text: &str) -> PermuteResponse {
    PermuteResponse::from(parse_request(text).and_then(|request| request.run()))
}

/// Like [`respond`] for raw input; bytes that are not UTF-8 are answered
/// with an `invalid_input` error.
pub fn respond_bytes(bytes: &[u8]) -> PermuteResponse {
    match std::str::from_utf8(bytes) {
        Ok(text) => respond(text),
        Err(err) => PermuteResponse::from(Err(TieError::InvalidInput(format!(
            "request is not valid UTF-8: {err}"
        )))),
    }
}

#[derive(Deserialize)]
struct ScoreField {
    score: ScoreEntries,
}

/// Every `name: score` pair of the `score` object in text order,
/// repeated names included.
struct ScoreEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for ScoreEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ScoreEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(ScoreEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn parse_scores(entries: Vec<(String, Value)>) -> Result<CandidateSet, TieError> {
    let mut set = CandidateSet::new();
    for (name, value) in entries {
        let score = match value {
            Value::Number(number) => score_from_number(&name, &number)?,
            other => {
                return Err(TieError::TypeMismatch(format!(
                    "score for {name:?} must be a number, got {}",
                    json_kind(&other)
                )))
            }
        };
        set.insert(name, score)?;
    }
    Ok(set)
}

/// Reads a score from the number's literal text, which `serde_json`
/// keeps verbatim (`arbitrary_precision`), so every `u128` is exact.
fn score_from_number(name: &str, number: &Number) -> Result<u128, TieError> {
    let literal = number.to_string();
    if let Ok(score) = literal.parse::<u128>() {
        return Ok(score);
    }
    let digits = literal.strip_prefix('-').unwrap_or(&literal);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        // Negative, or wider than u128.
        return Err(TieError::InvalidScore { name: name.into() });
    }
    Err(TieError::InvalidInput(format!(
        "score for {name:?} must be an integer, got {literal}"
    )))
}

fn parse_magic(value: Value) -> Result<Vec<u8>, TieError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| {
                        TieError::TypeMismatch(format!(
                            "magic[{i}] must be an integer in 0..=255, got {item}"
                        ))
                    })
            })
            .collect(),
        other => Err(TieError::TypeMismatch(format!(
            "magic must be an array of bytes, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
