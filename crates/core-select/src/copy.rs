//! Clipboard text serialization for a selected byte range.
//!
//! The selection machine knows indices, not bytes; callers fetch the raw
//! bytes between `start` and `end` from their provider (host callback or the
//! local byte store) and hand them here. Hex-mode output is space-separated
//! two-digit pairs in the configured casing; ascii-mode output decodes each
//! byte with the same glyph rules the grid uses.

use core_grid::{HexCase, PaneColumn, decode_glyph, write_hex};

/// Rendering preferences applied during serialization. Mirrors the subset of
/// grid preferences that affect textual output.
pub struct CopyOptions<'a> {
    pub case: HexCase,
    pub fallback_char: char,
    pub is_printable: Option<&'a dyn Fn(u8) -> bool>,
    pub render_glyph: Option<&'a dyn Fn(u8) -> String>,
}

impl Default for CopyOptions<'_> {
    fn default() -> Self {
        Self {
            case: HexCase::Lower,
            fallback_char: '.',
            is_printable: None,
            render_glyph: None,
        }
    }
}

/// Serialize `bytes` for the clipboard according to the selection's mode.
pub fn clipboard_text(mode: PaneColumn, bytes: &[u8], opts: &CopyOptions<'_>) -> String {
    match mode {
        PaneColumn::Hex => {
            let mut out = String::with_capacity(bytes.len() * 3);
            for (i, &b) in bytes.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_hex(&mut out, b, opts.case);
            }
            out
        }
        PaneColumn::Ascii => bytes
            .iter()
            .map(|&b| decode_glyph(b, opts.fallback_char, opts.is_printable, opts.render_glyph))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_mode_space_separated_pairs() {
        let opts = CopyOptions::default();
        assert_eq!(
            clipboard_text(PaneColumn::Hex, &[0x41, 0x42, 0x43], &opts),
            "41 42 43"
        );
        assert_eq!(clipboard_text(PaneColumn::Hex, &[], &opts), "");
        assert_eq!(clipboard_text(PaneColumn::Hex, &[0x0a], &opts), "0a");
    }

    #[test]
    fn hex_mode_respects_casing() {
        let opts = CopyOptions {
            case: HexCase::Upper,
            ..Default::default()
        };
        assert_eq!(
            clipboard_text(PaneColumn::Hex, &[0xde, 0xad], &opts),
            "DE AD"
        );
    }

    #[test]
    fn ascii_mode_decodes_with_fallback() {
        let opts = CopyOptions::default();
        assert_eq!(
            clipboard_text(PaneColumn::Ascii, &[b'H', b'i', 0x00, b'!'], &opts),
            "Hi.!"
        );
    }

    #[test]
    fn ascii_mode_uses_custom_glyphs() {
        let glyphs = |b: u8| if b == 0x20 { "\u{2423}".to_string() } else { (b as char).to_string() };
        let opts = CopyOptions {
            render_glyph: Some(&glyphs),
            ..Default::default()
        };
        assert_eq!(
            clipboard_text(PaneColumn::Ascii, &[b'a', 0x20, b'b'], &opts),
            "a\u{2423}b"
        );
    }
}
