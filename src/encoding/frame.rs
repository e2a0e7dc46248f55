//! Length-prefixed frame writers.

use crate::error::TieError;

/// Width of the little-endian length prefix in front of every field.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Largest field (in bytes) a length prefix can describe.
pub const MAX_FRAME_LEN: usize = u32::MAX as usize;

/// Appends `u32 LE length || bytes` to `out`.
fn push_frame(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<(), TieError> {
    let len = u32::try_from(bytes.len()).map_err(|_| TieError::FrameTooLong {
        field,
        len: bytes.len(),
    })?;
    out.reserve(LENGTH_PREFIX_BYTES + bytes.len());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

/// Returns the minimal little-endian magnitude of `score`.
///
/// Zero maps to the empty byte string and no encoding carries a trailing
/// zero byte, so distinct scores always have distinct magnitudes. The
/// result is at most 16 bytes.
///
/// # Examples
///
/// ```
/// use star_tie::encoding::score_magnitude;
///
/// assert!(score_magnitude(0).is_empty());
/// assert_eq!(score_magnitude(255), vec![0xff]);
/// assert_eq!(score_magnitude(256), vec![0x00, 0x01]);
/// assert_eq!(score_magnitude(1 << 64).len(), 9);
/// ```
pub fn score_magnitude(score: u128) -> Vec<u8> {
    let width = 16 - (score.leading_zeros() / 8) as usize;
    score.to_le_bytes()[..width].to_vec()
}

/// Frames a candidate name as `u32 LE length || UTF-8 bytes`.
pub fn encode_name(name: &str) -> Result<Vec<u8>, TieError> {
    let mut out = Vec::new();
    push_frame(&mut out, "name", name.as_bytes())?;
    Ok(out)
}

/// Frames a score as `u32 LE length || minimal LE magnitude`.
///
/// Infallible: a magnitude is at most sixteen bytes.
pub fn encode_score(score: u128) -> Vec<u8> {
    let magnitude = score_magnitude(score);
    let mut out = Vec::with_capacity(LENGTH_PREFIX_BYTES + magnitude.len());
    out.extend_from_slice(&(magnitude.len() as u32).to_le_bytes());
    out.extend_from_slice(&magnitude);
    out
}

/// Frames one candidate: name frame immediately followed by score frame.
///
/// # Examples
///
/// ```
/// use star_tie::encoding::encode_candidate;
///
/// let frame = encode_candidate("A", 0).unwrap();
/// assert_eq!(frame, [1, 0, 0, 0, b'A', 0, 0, 0, 0]);
/// ```
pub fn encode_candidate(name: &str, score: u128) -> Result<Vec<u8>, TieError> {
    let mut out = encode_name(name)?;
    out.extend_from_slice(&encode_score(score));
    Ok(out)
}
