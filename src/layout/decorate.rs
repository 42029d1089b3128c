//! # Page Decoration
//!
//! Header and footer blocks drawn at fixed positions on every page. They are
//! produced after layout because the footer needs the total page count.

use crate::layout::{rule, show_text};
use crate::model::{Emphasis, Metadata, PageConfig, PAGE_WIDTH};
use crate::text::normalize;

const TITLE_Y: f64 = 760.0;
const SUBTITLE_Y: f64 = 746.0;
const VERSION_Y: f64 = 734.0;
const HEADER_RULE_Y: f64 = 724.0;
const FOOTER_RULE_Y: f64 = 52.0;
const FOOTER_TEXT_Y: f64 = 38.0;
const FOOTER_SIZE: f64 = 8.0;

/// Operators drawn before and after a page's body.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub header: Vec<String>,
    pub footer: Vec<String>,
}

/// Build the header and footer for page `page_index` (0-based) of `total_pages`.
pub fn decorate(
    page_index: usize,
    total_pages: usize,
    metadata: &Metadata,
    config: &PageConfig,
) -> Decoration {
    let left = config.margin_left;
    let right = PAGE_WIDTH - config.margin_right;

    let header = vec![
        show_text(Emphasis::Heading, 14.0, left, TITLE_Y, &normalize(&metadata.title)),
        show_text(Emphasis::Body, 10.0, left, SUBTITLE_Y, &normalize(&metadata.subtitle)),
        show_text(Emphasis::Body, 8.0, left, VERSION_Y, &normalize(&metadata.version)),
        rule(left, right, HEADER_RULE_Y),
    ];

    let page_label = format!("Page {}/{}", page_index + 1, total_pages);
    let label_width = page_label.chars().count() as f64 * FOOTER_SIZE * config.body_char_width;
    let footer = vec![
        rule(left, right, FOOTER_RULE_Y),
        show_text(
            Emphasis::Body,
            FOOTER_SIZE,
            left,
            FOOTER_TEXT_Y,
            &normalize(&metadata.document_name),
        ),
        show_text(
            Emphasis::Body,
            FOOTER_SIZE,
            (right - label_width).max(left),
            FOOTER_TEXT_Y,
            &page_label,
        ),
    ];

    Decoration { header, footer }
}
