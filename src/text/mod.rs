//! # Text Handling
//!
//! Everything that touches characters before they reach a content stream:
//! folding typography down to a safe subset, escaping PDF literal strings,
//! and encoding the result as single WinAnsi bytes.
//!
//! We only ship the two standard Helvetica faces, so there are no glyph
//! metrics and no font embedding. The alphabet is whatever WinAnsiEncoding
//! can express; anything else is approximated on the way in.

pub mod wrap;

use log::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a line of input text.
///
/// Curly quotes, dashes and bullets become ASCII, accents are folded by
/// decomposing and dropping the combining marks, and runs of whitespace
/// collapse to a single space with both ends trimmed. A leading `* ` is
/// rewritten to `- ` so it is picked up as a bullet.
///
/// `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());

    for ch in text.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{00AB}'
            | '\u{00BB}' => folded.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => folded.push('-'),
            '\u{2022}' | '\u{25E6}' | '\u{25AA}' | '\u{2023}' => folded.push('-'),
            '\u{2026}' => folded.push_str("..."),
            // Zero-width characters vanish entirely.
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' => {}
            c if c.is_control() => folded.push(' '),
            c => folded.push(c),
        }
    }

    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.strip_prefix("* ") {
        Some(rest) => format!("- {}", rest),
        None => collapsed,
    }
}

/// Escape special characters in a PDF literal string.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Encode operator text as WinAnsi bytes, one byte per character.
///
/// Characters with no WinAnsi code point are replaced by `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut replaced = 0usize;

    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(b) => out.push(b),
            None => {
                out.push(b'?');
                replaced += 1;
            }
        }
    }

    if replaced > 0 {
        warn!("{} character(s) have no WinAnsi encoding and were replaced by '?'", replaced);
    }
    out
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x00..=0x7F | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape("Hello (World)"), "Hello \\(World\\)");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn folds_typography() {
        assert_eq!(normalize("l\u{2019}offre \u{201C}cl\u{00E9}\u{201D}"), "l'offre \"cle\"");
        assert_eq!(normalize("2020\u{2013}2024 \u{2014} fin"), "2020-2024 - fin");
        assert_eq!(normalize("Attendez\u{2026}"), "Attendez...");
    }

    #[test]
    fn strips_combining_accents() {
        // Precomposed and decomposed forms fold the same way.
        assert_eq!(normalize("\u{00E9}t\u{00E9}"), "ete");
        assert_eq!(normalize("e\u{0301}te\u{0301}"), "ete");
        assert_eq!(normalize("Fran\u{00E7}ais"), "Francais");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  a \t b\u{00A0}\u{00A0}c\n"), "a b c");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("zero\u{200B}width"), "zerowidth");
    }

    #[test]
    fn bullets_become_dashes() {
        assert_eq!(normalize("\u{2022} item"), "- item");
        assert_eq!(normalize("* item"), "- item");
        assert_eq!(normalize("- item"), "- item");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Objet du service",
            "  \u{201C}Qualit\u{00E9}\u{201D} \u{2014} d\u{00E9}lai\u{2026}  ",
            "* \u{2022} double",
            "tab\tand\u{00A0}nbsp",
            "",
            "\u{2018}\u{2019}",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn encodes_single_bytes() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("\u{00F8}"), vec![0xF8]);
        assert_eq!(encode_win_ansi("\u{20AC}5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("\u{4E2D}"), b"?".to_vec());
    }
}
