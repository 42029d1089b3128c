//! # PDF Serializer
//!
//! Takes the decorated pages from the layout engine and writes a valid PDF
//! file.
//!
//! This is a from-scratch PDF 1.4 writer. The subset we need is small: a
//! catalog, a flat page tree, one shared resource dictionary naming the two
//! standard Helvetica faces, and a page + content stream pair per page.
//!
//! ## PDF Structure
//!
//! ```text
//! %PDF-1.4            <- header
//! 1 0 obj ... endobj  <- Catalog
//! 2 0 obj ... endobj  <- Pages (page tree root)
//! 3 0 obj ... endobj  <- Resources (F1 Helvetica, F2 Helvetica-Bold)
//! 4 0 obj ... endobj  <- Page 1
//! 5 0 obj ... endobj  <- Content stream for page 1
//! ...                 <- one Page / Content pair per page
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Numbering is decided up front by [`ObjectIds`], so every reference can be
//! written before the object it points to exists.

pub mod xref;

use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::FolioError;
use crate::layout::Page;
use crate::model::{Emphasis, PageConfig, PAGE_HEIGHT, PAGE_WIDTH};
use crate::text::encode_win_ansi;
use xref::{cross_reference, verify_offsets, verify_stream_lengths, OffsetTracker};

/// The fixed file header. Offsets are counted from the first byte of it.
pub const HEADER: &[u8] = b"%PDF-1.4\n";

/// Object numbers for a document of a known page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectIds {
    page_count: usize,
}

impl ObjectIds {
    pub const CATALOG: usize = 1;
    pub const PAGES: usize = 2;
    pub const RESOURCES: usize = 3;
    const FIRST_PAGE: usize = 4;

    pub fn assign(page_count: usize) -> Self {
        Self { page_count }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Object id of the Page dictionary for page `index` (0-based).
    pub fn page(&self, index: usize) -> usize {
        Self::FIRST_PAGE + 2 * index
    }

    /// Object id of the content stream for page `index` (0-based).
    pub fn content(&self, index: usize) -> usize {
        Self::FIRST_PAGE + 2 * index + 1
    }

    /// Total number of indirect objects.
    pub fn count(&self) -> usize {
        Self::RESOURCES + 2 * self.page_count
    }
}

/// Standard 14 font backing each emphasis. Never embedded.
fn base_font(font: Emphasis) -> &'static str {
    match font {
        Emphasis::Body => "Helvetica",
        Emphasis::Heading => "Helvetica-Bold",
    }
}

struct PdfObject {
    id: usize,
    data: Vec<u8>,
}

impl PdfObject {
    /// `"<id> 0 obj\n" + data + "\nendobj\n"`.
    fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 24);
        let _ = write!(out, "{} 0 obj\n", self.id);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(b"\nendobj\n");
        out
    }
}

pub struct PdfWriter;

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    ///
    /// The finished file is read back before it is returned; a stream length
    /// or xref offset that disagrees with the bytes is an error.
    pub fn write(&self, pages: &[Page], config: &PageConfig) -> Result<Vec<u8>, FolioError> {
        let ids = ObjectIds::assign(pages.len());
        let objects = self.build_objects(pages, &ids, config);
        let bytes = self.serialize(&objects);

        verify_offsets(&bytes)?;
        verify_stream_lengths(&bytes)?;
        Ok(bytes)
    }

    /// Build every object body, in object-number order.
    fn build_objects(&self, pages: &[Page], ids: &ObjectIds, config: &PageConfig) -> Vec<PdfObject> {
        let mut objects = Vec::with_capacity(ids.count());

        objects.push(PdfObject {
            id: ObjectIds::CATALOG,
            data: format!("<< /Type /Catalog /Pages {} 0 R >>", ObjectIds::PAGES).into_bytes(),
        });

        let kids: String = (0..ids.page_count())
            .map(|i| format!("{} 0 R", ids.page(i)))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(PdfObject {
            id: ObjectIds::PAGES,
            data: format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, ids.page_count())
                .into_bytes(),
        });

        objects.push(PdfObject {
            id: ObjectIds::RESOURCES,
            data: self.build_resources().into_bytes(),
        });

        for (i, page) in pages.iter().enumerate() {
            let page_dict = format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] \
                 /Resources {} 0 R /Contents {} 0 R >>",
                ObjectIds::PAGES,
                PAGE_WIDTH,
                PAGE_HEIGHT,
                ObjectIds::RESOURCES,
                ids.content(i)
            );
            objects.push(PdfObject {
                id: ids.page(i),
                data: page_dict.into_bytes(),
            });
            objects.push(PdfObject {
                id: ids.content(i),
                data: self.build_content_stream(page, config.compress),
            });
        }

        debug_assert!(objects.iter().enumerate().all(|(i, o)| o.id == i + 1));
        objects
    }

    fn build_resources(&self) -> String {
        let fonts: String = [Emphasis::Body, Emphasis::Heading]
            .iter()
            .map(|&font| {
                format!(
                    "/{} << /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.resource_name(),
                    base_font(font)
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("<< /Font << {} >> >>", fonts)
    }

    /// Build the stream object for a single page. `/Length` is the exact
    /// byte count of whatever sits between `stream\n` and `\nendstream`.
    fn build_content_stream(&self, page: &Page, compress: bool) -> Vec<u8> {
        let mut text = page.operators.join("\n");
        text.push('\n');
        let encoded = encode_win_ansi(&text);

        let (body, filter) = if compress {
            (compress_to_vec_zlib(&encoded, 6), " /Filter /FlateDecode")
        } else {
            (encoded, "")
        };

        let mut data: Vec<u8> = Vec::with_capacity(body.len() + 48);
        let _ = write!(data, "<< /Length {}{} >>\nstream\n", body.len(), filter);
        data.extend_from_slice(&body);
        data.extend_from_slice(b"\nendstream");
        data
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, objects: &[PdfObject]) -> Vec<u8> {
        let mut output: Vec<u8> = HEADER.to_vec();
        let mut tracker = OffsetTracker::new(HEADER.len());

        for obj in objects {
            let chunk = obj.serialize();
            tracker.record(chunk.len());
            output.extend_from_slice(&chunk);
        }

        output.extend_from_slice(cross_reference(&tracker, ObjectIds::CATALOG).as_bytes());
        output
    }
}
