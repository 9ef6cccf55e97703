//! Clipboard paste parsing.
//!
//! Hex-pane pastes are hex pair text: whitespace is stripped anywhere, then
//! the remainder must be an even count of hex digits or the whole paste is
//! dropped (`None`); partial application of a malformed paste would corrupt
//! silently. Decoded-pane pastes map each char to its code point clamped to
//! a byte.

/// Parse whitespace-stripped hex pair text. `None` means the paste must be
/// dropped entirely: residual non-hex characters, an odd digit count, or no
/// digits at all.
pub fn parse_hex_pairs(text: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;
    if digits.is_empty() || digits.len() % 2 != 0 {
        return None;
    }
    Some(
        digits
            .chunks_exact(2)
            .map(|pair| (pair[0] << 4) | pair[1])
            .collect(),
    )
}

/// One byte per decoded character, code points clamped to `0..=255`.
pub fn ascii_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| (c as u32).min(255) as u8).collect()
}
