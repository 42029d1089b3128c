//! Structured error types for the Folio serializer.
//!
//! Content never fails: odd characters, empty lines and empty documents are
//! all laid out on a best-effort basis. What does fail is byte accounting.
//! If a stream length or an xref offset disagrees with the bytes actually
//! written, the file is corrupt and we refuse to hand it out.

use thiserror::Error;

/// The unified error type returned by all public Folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// JSON input failed to parse as a valid Folio document.
    #[error("Failed to parse document: {source}{}", render_hint(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A content stream declared a `/Length` that differs from its body.
    #[error("Content stream {object} declares /Length {declared} but holds {actual} bytes")]
    StreamLength {
        object: usize,
        declared: usize,
        actual: usize,
    },

    /// An xref entry does not point at `"<id> 0 obj"`.
    #[error("xref entry for object {object} points at byte {offset}, which is not its header")]
    OffsetMismatch { object: usize, offset: usize },

    /// The xref section or trailer could not be read back.
    #[error("Malformed cross-reference data: {0}")]
    MalformedXref(String),
}

fn render_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the document schema. Each line needs \"text\", \"font\" (Body or Heading) and \"size\".".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::ParseError { source: e, hint }
    }
}
