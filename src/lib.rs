//! # Folio
//!
//! A self-contained PDF serializer. A flat list of styled text lines goes
//! in, a complete multi-page PDF 1.4 file comes out, byte for byte, with no
//! PDF library in between.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Styled lines, header/footer text, page geometry
//!       ↓
//!   [text]     — Normalize, greedy word-wrap, bullets
//!       ↓
//!   [layout]   — Forward-only pagination, then header/footer decoration
//!       ↓
//!   [pdf]      — Object graph, xref, trailer, bytes
//! ```
//!
//! Every call builds and discards its own pages and objects. Identical input
//! always yields identical bytes: there are no timestamps or ids derived
//! from anything but the content.

pub mod error;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod text;

pub use error::FolioError;

use log::info;

use layout::{LayoutEngine, LayoutInfo};
use model::{Document, StyledLine};
use pdf::PdfWriter;

/// Render a document to PDF bytes.
///
/// This is the primary entry point. Content never causes an error; the only
/// failures are internal byte-accounting checks on the finished file.
pub fn render(document: &Document) -> Result<Vec<u8>, FolioError> {
    let engine = LayoutEngine::new(&document.page);
    let pages = engine.layout(document);
    let writer = PdfWriter::new();
    let bytes = writer.write(&pages, &document.page)?;
    info!(
        "rendered {} line(s) into {} page(s), {} bytes",
        document.lines.len(),
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render bare lines with the default header, footer and geometry.
pub fn render_lines(lines: &[StyledLine]) -> Result<Vec<u8>, FolioError> {
    render(&Document::from_lines(lines.to_vec()))
}

/// Render a document described as JSON to PDF bytes.
///
/// Accepts either a full document object or a bare array of lines.
pub fn render_json(json: &str) -> Result<Vec<u8>, FolioError> {
    render(&parse_document(json)?)
}

/// Parse a JSON document, or a bare JSON array of lines.
pub fn parse_document(json: &str) -> Result<Document, FolioError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let document = if value.is_array() {
        Document::from_lines(serde_json::from_value(value)?)
    } else {
        serde_json::from_value(value)?
    };
    Ok(document)
}

/// Lay out a document and summarize the result without writing a PDF.
pub fn layout_info(document: &Document) -> LayoutInfo {
    let pages = LayoutEngine::new(&document.page).layout(document);
    LayoutInfo::from_pages(&pages)
}
