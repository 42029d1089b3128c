//! # Document Model
//!
//! The input representation for the serializer. A document is a flat,
//! ordered list of styled lines plus the text used to decorate every page
//! and the page geometry. There is no tree: the content provider has already
//! decided what each line says and how loud it should be.
//!
//! Everything here deserializes from camelCase JSON with every field
//! defaulted, so `{"lines": [...]}` is a complete document.

use serde::{Deserialize, Serialize};

/// Fixed page width in points (US Letter).
pub const PAGE_WIDTH: f64 = 612.0;
/// Fixed page height in points (US Letter).
pub const PAGE_HEIGHT: f64 = 792.0;
/// Bullet continuation lines never sit at the base column.
pub const MIN_BULLET_INDENT: f64 = 2.0;

/// A complete document ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The document body, in reading order.
    #[serde(default)]
    pub lines: Vec<StyledLine>,

    /// Header and footer text repeated on every page.
    #[serde(default)]
    pub metadata: Metadata,

    /// Margins, leading and wrap budgets.
    #[serde(default)]
    pub page: PageConfig,
}

impl Document {
    /// A document with default decoration and geometry.
    pub fn from_lines(lines: Vec<StyledLine>) -> Self {
        Self {
            lines,
            ..Default::default()
        }
    }
}

/// Which of the two font resources a line is drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    #[default]
    Body,
    Heading,
}

impl Emphasis {
    /// The resource name used in `Tf` operators.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Emphasis::Body => "F1",
            Emphasis::Heading => "F2",
        }
    }
}

/// One logical line of input. Wrapping may turn it into several physical lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledLine {
    pub text: String,
    #[serde(default, alias = "emphasis")]
    pub font: Emphasis,
    #[serde(default = "default_size")]
    pub size: f64,
}

fn default_size() -> f64 {
    11.0
}

impl StyledLine {
    pub fn new(text: impl Into<String>, font: Emphasis, size: f64) -> Self {
        Self {
            text: text.into(),
            font,
            size,
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Body, 11.0)
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Heading, 12.0)
    }
}

/// Text drawn in the header and footer of every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub title: String,
    pub subtitle: String,
    pub version: String,
    /// Shown bottom-left in the footer.
    pub document_name: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "Service Description".to_string(),
            subtitle: "Technical specification".to_string(),
            version: "Version 1.0".to_string(),
            document_name: "service-description.pdf".to_string(),
        }
    }
}

/// Page geometry and layout tuning, in points.
///
/// The MediaBox itself is fixed at [`PAGE_WIDTH`] x [`PAGE_HEIGHT`]; only the
/// body area inside it is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub margin_left: f64,
    pub margin_right: f64,
    /// Baseline of the first body line on every page.
    pub body_top: f64,
    /// A line whose baseline would fall below this starts a new page.
    pub body_bottom: f64,
    /// Headings whose baseline is within this distance of `body_bottom`
    /// move to the next page.
    pub keep_with_next: f64,
    /// Extra space after the last physical line of a heading.
    pub heading_gap: f64,
    /// Leading multiplier: each line advances `round(size * line_spacing)`.
    pub line_spacing: f64,
    /// Hanging indent for bullet continuation lines. Values below
    /// [`MIN_BULLET_INDENT`] are raised to it, see [`PageConfig::hanging_indent`].
    pub bullet_indent: f64,
    /// Average glyph width of the body font, as a fraction of font size.
    pub body_char_width: f64,
    /// Average glyph width of the heading font, as a fraction of font size.
    pub heading_char_width: f64,
    /// Deflate content streams.
    pub compress: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margin_left: 50.0,
            margin_right: 50.0,
            body_top: 700.0,
            body_bottom: 70.0,
            keep_with_next: 60.0,
            heading_gap: 6.0,
            line_spacing: 1.25,
            bullet_indent: 10.0,
            body_char_width: 0.5,
            heading_char_width: 0.56,
            compress: false,
        }
    }
}

impl PageConfig {
    /// Horizontal space between the margins.
    pub fn content_width(&self) -> f64 {
        (PAGE_WIDTH - self.margin_left - self.margin_right).max(0.0)
    }

    /// Effective x-offset of bullet continuation lines; always positive.
    pub fn hanging_indent(&self) -> f64 {
        if self.bullet_indent.is_finite() {
            self.bullet_indent.max(MIN_BULLET_INDENT)
        } else {
            MIN_BULLET_INDENT
        }
    }

    /// Vertical advance for a line of the given size.
    pub fn leading(&self, size: f64) -> f64 {
        (size * self.line_spacing).round()
    }

    pub fn char_width(&self, font: Emphasis) -> f64 {
        match font {
            Emphasis::Body => self.body_char_width,
            Emphasis::Heading => self.heading_char_width,
        }
    }
}
