//! Greedy word wrapping against a character budget.
//!
//! There are no glyph metrics, so width is approximated as a number of
//! characters: the usable width divided by an average glyph width for the
//! font. Headings are bold and wider per glyph, so they get fewer characters
//! per line than body text at the same size.

use log::warn;

use crate::model::{Emphasis, PageConfig, StyledLine};
use crate::text::normalize;

/// Smallest budget ever handed to the wrapper.
const MIN_CHARS: usize = 8;

/// A wrapped line ready to be placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalLine {
    /// Normalized, unescaped text. Empty for a spacer line.
    pub text: String,
    pub font: Emphasis,
    pub size: f64,
    /// Horizontal offset from the left margin (hanging indent for bullets).
    pub x_offset: f64,
    /// First physical line of its logical line.
    pub is_first: bool,
    /// Last physical line of its logical line.
    pub is_last: bool,
}

impl PhysicalLine {
    pub fn is_spacer(&self) -> bool {
        self.text.is_empty()
    }
}

/// Font sizes are written with one decimal; round once so the `Tf`
/// operand and the leading agree.
pub fn round_size(size: f64) -> f64 {
    (size * 10.0).round() / 10.0
}

/// Character budget for a line of the given font and size.
pub fn max_chars(font: Emphasis, size: f64, config: &PageConfig) -> usize {
    let glyph = size.max(1.0) * config.char_width(font).max(0.01);
    let budget = (config.content_width() / glyph).floor() as usize;
    budget.max(MIN_CHARS)
}

/// Pack words greedily into lines of at most `max_width` characters.
///
/// A word longer than `max_width` is emitted on its own line, unsplit.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut words = text.split_whitespace();

    let mut current = match words.next() {
        Some(first) => first.to_string(),
        None => return lines,
    };
    let mut current_len = current.chars().count();

    for word in words {
        let word_len = word.chars().count();
        if current_len + 1 + word_len <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    lines.push(current);
    lines
}

/// Normalize and wrap one styled line into physical lines.
///
/// Lines starting with `"- "` are bullets: the marker stays on the first
/// physical line at offset 0 and continuation lines hang at
/// [`PageConfig::hanging_indent`]. An empty line yields a single spacer.
pub fn wrap_line(line: &StyledLine, config: &PageConfig) -> Vec<PhysicalLine> {
    let text = normalize(&line.text);
    let size = round_size(line.size);
    let max = max_chars(line.font, size, config);
    let indent = config.hanging_indent();

    let physical = |text: String, x_offset: f64| PhysicalLine {
        text,
        font: line.font,
        size,
        x_offset,
        is_first: false,
        is_last: false,
    };

    let mut out: Vec<PhysicalLine> = match text.strip_prefix("- ") {
        Some(rest) => {
            let budget = max.saturating_sub(2).max(1);
            let pieces = wrap(rest, budget);
            warn_overlong(&pieces, budget);
            pieces
                .into_iter()
                .enumerate()
                .map(|(i, piece)| {
                    if i == 0 {
                        physical(format!("- {}", piece), 0.0)
                    } else {
                        physical(piece, indent)
                    }
                })
                .collect()
        }
        None => {
            let pieces = wrap(&text, max);
            warn_overlong(&pieces, max);
            pieces.into_iter().map(|piece| physical(piece, 0.0)).collect()
        }
    };

    if out.is_empty() {
        out.push(physical(String::new(), 0.0));
    }
    if let Some(first) = out.first_mut() {
        first.is_first = true;
    }
    if let Some(last) = out.last_mut() {
        last.is_last = true;
    }
    out
}

/// Wrap every line of a document body, in order.
pub fn wrap_all(lines: &[StyledLine], config: &PageConfig) -> Vec<PhysicalLine> {
    lines.iter().flat_map(|line| wrap_line(line, config)).collect()
}

fn warn_overlong(pieces: &[String], budget: usize) {
    for piece in pieces {
        let len = piece.chars().count();
        if len > budget {
            warn!("word of {} chars exceeds wrap budget of {}, left unsplit", len, budget);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_packing() {
        let lines = wrap("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn exact_fit_stays_on_line() {
        assert_eq!(wrap("ab cd", 5), vec!["ab cd"]);
        assert_eq!(wrap("ab cd", 4), vec!["ab", "cd"]);
    }

    #[test]
    fn long_word_is_never_split() {
        let lines = wrap("a supercalifragilistic b", 6);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_text_wraps_to_nothing() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn heading_budget_is_narrower() {
        let config = PageConfig::default();
        let body = max_chars(Emphasis::Body, 12.0, &config);
        let heading = max_chars(Emphasis::Heading, 12.0, &config);
        assert!(heading < body);
        assert_eq!(max_chars(Emphasis::Body, 11.0, &config), 93);
    }

    #[test]
    fn wrap_respects_budget() {
        let config = PageConfig::default();
        let text = "Le prestataire assure la maintenance corrective et evolutive \
                    de la plateforme pendant toute la duree du contrat, y compris \
                    les mises a jour de securite et le support de niveau deux.";
        let line = StyledLine::body(text.repeat(3));
        let max = max_chars(line.font, line.size, &config);
        let physical = wrap_line(&line, &config);
        assert!(physical.len() > 1);
        for p in &physical {
            assert!(p.text.chars().count() <= max, "{:?} over {}", p.text, max);
        }
    }

    #[test]
    fn bullet_continuations_hang() {
        let config = PageConfig::default();
        let line = StyledLine::body(format!("- {}", "item text ".repeat(30)));
        let physical = wrap_line(&line, &config);
        assert!(physical.len() >= 3);
        assert!(physical[0].text.starts_with("- "));
        assert_eq!(physical[0].x_offset, 0.0);
        for p in &physical[1..] {
            assert_eq!(p.x_offset, config.bullet_indent);
            assert!(!p.text.starts_with("- "));
        }
    }

    #[test]
    fn zero_bullet_indent_still_hangs() {
        let config = PageConfig {
            bullet_indent: 0.0,
            ..Default::default()
        };
        let line = StyledLine::body(format!("- {}", "item text ".repeat(30)));
        let physical = wrap_line(&line, &config);
        assert!(physical.len() > 1);
        for p in &physical[1..] {
            assert!(p.x_offset > 0.0);
        }
    }

    #[test]
    fn size_is_rounded_to_one_decimal() {
        let config = PageConfig::default();
        let physical = wrap_line(&StyledLine::new("a", Emphasis::Body, 10.25), &config);
        assert_eq!(physical[0].size, 10.3);
        assert_eq!(round_size(11.0), 11.0);
    }

    #[test]
    fn flags_first_and_last() {
        let config = PageConfig::default();
        let physical = wrap_line(&StyledLine::body("word ".repeat(60)), &config);
        assert!(physical[0].is_first && !physical[0].is_last);
        assert!(physical.last().unwrap().is_last);
        assert!(physical[1..].iter().all(|p| !p.is_first));
    }

    #[test]
    fn empty_line_is_a_spacer() {
        let config = PageConfig::default();
        let physical = wrap_line(&StyledLine::body("  "), &config);
        assert_eq!(physical.len(), 1);
        assert!(physical[0].is_spacer());
        assert!(physical[0].is_first && physical[0].is_last);
    }
}
