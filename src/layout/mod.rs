//! # Page Layout Engine
//!
//! Places wrapped lines onto pages, top to bottom, in a single forward pass.
//!
//! The pass is a fold: a cursor carrying the finished pages, the page being
//! filled and the current baseline `y` is threaded through every physical
//! line. Each step asks [`page_break::decide_break`] whether the line still
//! belongs on this page, places it, and moves `y` down by the line's leading.
//! Nothing is ever revisited, so a break decision is final.
//!
//! Decoration runs afterwards, once the page count is known, because every
//! footer prints "Page N/M".
//!
//! Coordinates are PDF user space: origin bottom-left, `y` grows upwards, so
//! the cursor starts at `body_top` and decreases.

pub mod decorate;
pub mod page_break;

use log::debug;
use serde::Serialize;

use crate::model::{Document, Emphasis, Metadata, PageConfig};
use crate::text::escape;
use crate::text::wrap::{wrap_all, PhysicalLine};
use decorate::decorate;
use page_break::{decide_break, BreakDecision};

/// A finished page: its drawing operators in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub operators: Vec<String>,
    /// Body lines placed on this page (spacers and decoration excluded).
    pub body_lines: usize,
    /// Baseline of the last body line placed.
    pub last_baseline: Option<f64>,
}

/// A `BT ... ET` block drawing one string at an absolute position.
pub fn show_text(font: Emphasis, size: f64, x: f64, y: f64, text: &str) -> String {
    format!(
        "BT /{} {:.1} Tf {:.2} {:.2} Td ({}) Tj ET",
        font.resource_name(),
        size,
        x,
        y,
        escape(text)
    )
}

/// A thin horizontal rule from `x1` to `x2` at height `y`.
pub fn rule(x1: f64, x2: f64, y: f64) -> String {
    format!("0.50 w {:.2} {:.2} m {:.2} {:.2} l S", x1, y, x2, y)
}

pub struct LayoutEngine<'a> {
    config: &'a PageConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a PageConfig) -> Self {
        Self { config }
    }

    /// Wrap, paginate and decorate a whole document.
    pub fn layout(&self, document: &Document) -> Vec<Page> {
        let physical = wrap_all(&document.lines, self.config);
        let pages = self.paginate(&physical);
        decorate_pages(pages, &document.metadata, self.config)
    }

    /// Distribute physical lines over pages. Always yields at least one page.
    pub fn paginate(&self, lines: &[PhysicalLine]) -> Vec<Page> {
        lines
            .iter()
            .fold(Cursor::open(self.config), |cursor, line| {
                cursor.place(line, self.config)
            })
            .finish()
    }
}

/// Wrap each page's body in its header and footer.
pub fn decorate_pages(pages: Vec<Page>, metadata: &Metadata, config: &PageConfig) -> Vec<Page> {
    let total = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(index, page)| {
            let decoration = decorate(index, total, metadata, config);
            let mut operators = decoration.header;
            operators.extend(page.operators);
            operators.extend(decoration.footer);
            Page { operators, ..page }
        })
        .collect()
}

/// Fold state for [`LayoutEngine::paginate`].
struct Cursor {
    done: Vec<Page>,
    current: Page,
    y: f64,
}

impl Cursor {
    fn open(config: &PageConfig) -> Self {
        Self {
            done: Vec::new(),
            current: Page::default(),
            y: config.body_top,
        }
    }

    fn place(mut self, line: &PhysicalLine, config: &PageConfig) -> Self {
        if let BreakDecision::NewPage(reason) = decide_break(self.y, line, config) {
            if self.current.body_lines == 0 {
                // Nothing drawn yet: start over at the top of the same page.
                debug!("page {} rewound at y={:.2} ({:?})", self.done.len() + 1, self.y, reason);
            } else {
                debug!(
                    "page {} closed at y={:.2} ({:?})",
                    self.done.len() + 1,
                    self.y,
                    reason
                );
                self.done.push(std::mem::take(&mut self.current));
            }
            self.y = config.body_top;
        }

        let leading = config.leading(line.size);

        if line.is_spacer() {
            self.y -= leading;
            return self;
        }

        let x = config.margin_left + line.x_offset;
        self.current
            .operators
            .push(show_text(line.font, line.size, x, self.y, &line.text));
        self.current.body_lines += 1;
        self.current.last_baseline = Some(self.y);

        self.y -= leading;
        if line.font == Emphasis::Heading && line.is_last {
            self.y -= config.heading_gap;
        }
        self
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }
}

/// Serializable per-page summary, for tooling and debugging.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub pages: Vec<PageInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub number: usize,
    pub body_lines: usize,
    pub last_baseline: Option<f64>,
    pub operators: usize,
}

impl LayoutInfo {
    pub fn from_pages(pages: &[Page]) -> Self {
        Self {
            pages: pages
                .iter()
                .enumerate()
                .map(|(i, page)| PageInfo {
                    number: i + 1,
                    body_lines: page.body_lines,
                    last_baseline: page.last_baseline,
                    operators: page.operators.len(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyledLine;
    use crate::text::wrap::wrap_line;

    fn paginate(lines: &[StyledLine]) -> Vec<Page> {
        let config = PageConfig::default();
        let physical = wrap_all(lines, &config);
        LayoutEngine::new(&config).paginate(&physical)
    }

    #[test]
    fn empty_input_yields_one_page() {
        let pages = paginate(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].operators.is_empty());
    }

    #[test]
    fn lines_advance_by_rounded_leading() {
        let pages = paginate(&[StyledLine::body("one"), StyledLine::body("two")]);
        assert_eq!(pages[0].operators.len(), 2);
        assert!(pages[0].operators[0].contains("50.00 700.00 Td (one) Tj"));
        assert!(pages[0].operators[1].contains("50.00 686.00 Td (two) Tj"));
    }

    #[test]
    fn heading_adds_gap() {
        let pages = paginate(&[StyledLine::heading("Titre"), StyledLine::body("corps")]);
        // 700 - round(12 * 1.25) - 6
        assert!(pages[0].operators[1].contains("50.00 679.00 Td (corps) Tj"));
        assert!(pages[0].operators[0].starts_with("BT /F2 12.0 Tf"));
        assert!(pages[0].operators[1].starts_with("BT /F1 11.0 Tf"));
    }

    #[test]
    fn spacer_moves_cursor_without_drawing() {
        let pages = paginate(&[
            StyledLine::body("avant"),
            StyledLine::body(""),
            StyledLine::body("apres"),
        ]);
        assert_eq!(pages[0].operators.len(), 2);
        assert!(pages[0].operators[1].contains("50.00 672.00 Td"));
    }

    #[test]
    fn overflow_fills_page_before_breaking() {
        let lines: Vec<StyledLine> = (0..100).map(|i| StyledLine::body(format!("ligne {}", i))).collect();
        let pages = paginate(&lines);
        // (700 - 70) / 14 = 45 steps, so 46 baselines fit: 700, 686, ..., 70.
        assert_eq!(pages[0].body_lines, 46);
        assert_eq!(pages[0].last_baseline, Some(70.0));
        assert_eq!(pages.len(), 3);
        let total: usize = pages.iter().map(|p| p.body_lines).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn heading_is_kept_with_next() {
        // 44 body lines leave the cursor at 700 - 44 * 14 = 84, inside the keep-with-next zone.
        let mut lines: Vec<StyledLine> = (0..44).map(|i| StyledLine::body(format!("l{}", i))).collect();
        lines.push(StyledLine::heading("Section suivante"));
        lines.push(StyledLine::body("contenu"));
        let pages = paginate(&lines);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].body_lines, 44);
        assert!(pages[1].operators[0].contains("700.00 Td (Section suivante) Tj"));
    }

    #[test]
    fn blank_line_at_page_bottom_opens_next_page() {
        let mut lines: Vec<StyledLine> = (0..46).map(|i| StyledLine::body(format!("l{}", i))).collect();
        lines.push(StyledLine::body(""));
        lines.push(StyledLine::body("l46"));
        let pages = paginate(&lines);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].body_lines, 46);
        // The spacer is placed first on page 2, pushing l46 down one leading.
        assert!(pages[1].operators[0].contains("50.00 686.00 Td (l46) Tj"));
    }

    #[test]
    fn leading_blank_lines_never_emit_an_empty_page() {
        let mut lines: Vec<StyledLine> = (0..50).map(|_| StyledLine::body("")).collect();
        lines.push(StyledLine::body("x"));
        let pages = paginate(&lines);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].body_lines, 1);
        assert!(pages.iter().all(|p| p.body_lines > 0));
    }

    #[test]
    fn heading_at_threshold_stays_on_page() {
        // 40 body lines leave the cursor at 700 - 40 * 14 = 140, above the 130 threshold.
        let mut lines: Vec<StyledLine> = (0..40).map(|i| StyledLine::body(format!("l{}", i))).collect();
        lines.push(StyledLine::heading("Reste"));
        let pages = paginate(&lines);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].operators[40].contains("140.00 Td (Reste) Tj"));
    }

    #[test]
    fn size_is_rounded_once_for_operator_and_leading() {
        let line = StyledLine::new("a", Emphasis::Body, 10.25);
        let pages = paginate(&[line.clone(), line]);
        assert!(pages[0].operators[0].starts_with("BT /F1 10.3 Tf"));
        // round(10.3 * 1.25) = 13
        assert!(pages[0].operators[1].contains("50.00 687.00 Td"));
    }

    #[test]
    fn bullet_continuation_is_indented() {
        let config = PageConfig::default();
        let physical = wrap_line(&StyledLine::body(format!("- {}", "mot ".repeat(40))), &config);
        let pages = LayoutEngine::new(&config).paginate(&physical);
        assert!(pages[0].operators[0].contains("50.00 700.00 Td (- mot"));
        assert!(pages[0].operators[1].contains("60.00 686.00 Td (mot"));
    }

    #[test]
    fn decoration_wraps_every_page() {
        let config = PageConfig::default();
        let lines: Vec<StyledLine> = (0..60).map(|i| StyledLine::body(format!("l{}", i))).collect();
        let doc = Document {
            lines,
            ..Default::default()
        };
        let pages = LayoutEngine::new(&config).layout(&doc);
        assert_eq!(pages.len(), 2);
        for (i, page) in pages.iter().enumerate() {
            assert!(page.operators[0].contains("(Service Description) Tj"));
            let label = format!("(Page {}/2) Tj", i + 1);
            assert!(page.operators.last().unwrap().contains(&label));
        }
    }

    #[test]
    fn layout_info_serializes() {
        let pages = paginate(&[StyledLine::body("x")]);
        let json = serde_json::to_string(&LayoutInfo::from_pages(&pages)).unwrap();
        assert!(json.contains("\"bodyLines\":1"));
        assert!(json.contains("\"lastBaseline\":700.0"));
    }
}
