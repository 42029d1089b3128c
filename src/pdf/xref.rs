//! # Cross-Reference Table
//!
//! Byte-offset bookkeeping for the serialized objects, the `xref` section
//! and trailer that publish those offsets, and readers that check the
//! finished file against its own xref.
//!
//! The output buffer is treated as an arena: [`OffsetTracker`] records where
//! each object chunk starts before the chunk is appended, so object `n`'s
//! offset is simply entry `n - 1`.

use std::fmt::Write as FmtWrite;

use crate::error::FolioError;

/// Running byte cursor over the assembled file.
#[derive(Debug, Clone)]
pub struct OffsetTracker {
    cursor: usize,
    offsets: Vec<usize>,
}

impl OffsetTracker {
    /// Start counting after a header of `start` bytes.
    pub fn new(start: usize) -> Self {
        Self {
            cursor: start,
            offsets: Vec::new(),
        }
    }

    /// Record the next object chunk and return its starting offset.
    pub fn record(&mut self, len: usize) -> usize {
        let offset = self.cursor;
        self.offsets.push(offset);
        self.cursor += len;
        offset
    }

    /// Offsets in object order; index 0 is object 1.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Byte position just past the last recorded chunk.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

/// Emit `xref`, `trailer`, `startxref` and `%%EOF`.
///
/// The xref keyword is assumed to start at `tracker.position()`.
pub fn cross_reference(tracker: &OffsetTracker, root: usize) -> String {
    let size = tracker.offsets().len() + 1;
    let mut out = String::with_capacity(64 + 20 * size);

    let _ = write!(out, "xref\n0 {}\n", size);
    out.push_str("0000000000 65535 f \n");
    for offset in tracker.offsets() {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }

    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        size,
        root,
        tracker.position()
    );
    out
}

/// Read the xref table back and return the in-use offsets, object 1 first.
pub fn read_xref(bytes: &[u8]) -> Result<Vec<usize>, FolioError> {
    let marker = rfind(bytes, b"startxref\n")
        .ok_or_else(|| FolioError::MalformedXref("missing startxref".to_string()))?;
    let xref_start = parse_number(&bytes[marker + b"startxref\n".len()..])
        .ok_or_else(|| FolioError::MalformedXref("unreadable startxref offset".to_string()))?;

    let section = bytes
        .get(xref_start..)
        .filter(|rest| rest.starts_with(b"xref\n0 "))
        .ok_or_else(|| {
            FolioError::MalformedXref(format!("startxref {} does not point at xref", xref_start))
        })?;
    let header_len = b"xref\n0 ".len();
    let count = parse_number(&section[header_len..])
        .ok_or_else(|| FolioError::MalformedXref("unreadable xref entry count".to_string()))?;
    let entries_start = find(section, b"\n0000000000 65535 f \n")
        .ok_or_else(|| FolioError::MalformedXref("missing free-list head".to_string()))?
        + 1;

    let mut offsets = Vec::with_capacity(count.saturating_sub(1));
    for i in 1..count {
        let at = entries_start + i * 20;
        let entry = section
            .get(at..at + 20)
            .ok_or_else(|| FolioError::MalformedXref(format!("xref entry {} truncated", i)))?;
        if &entry[10..] != b" 00000 n \n" {
            return Err(FolioError::MalformedXref(format!("xref entry {} is not in use", i)));
        }
        let offset = parse_number(&entry[..10])
            .ok_or_else(|| FolioError::MalformedXref(format!("xref entry {} unreadable", i)))?;
        offsets.push(offset);
    }
    Ok(offsets)
}

/// Check that every xref entry lands on `"<id> 0 obj"`.
pub fn verify_offsets(bytes: &[u8]) -> Result<(), FolioError> {
    for (i, &offset) in read_xref(bytes)?.iter().enumerate() {
        let object = i + 1;
        let expected = format!("{} 0 obj", object);
        let lands = bytes
            .get(offset..)
            .is_some_and(|rest| rest.starts_with(expected.as_bytes()));
        if !lands {
            return Err(FolioError::OffsetMismatch { object, offset });
        }
    }
    Ok(())
}

/// Check every stream's declared `/Length` against the bytes between
/// `stream\n` and `\nendstream`.
pub fn verify_stream_lengths(bytes: &[u8]) -> Result<(), FolioError> {
    let offsets = read_xref(bytes)?;
    let xref_start = rfind(bytes, b"xref\n0 ").unwrap_or(bytes.len());

    for (i, &start) in offsets.iter().enumerate() {
        let end = offsets.get(i + 1).copied().unwrap_or(xref_start);
        let Some(object) = bytes.get(start..end) else {
            return Err(FolioError::OffsetMismatch { object: i + 1, offset: start });
        };
        let Some(stream_kw) = find(object, b"stream\n") else {
            continue;
        };
        let dict = &object[..stream_kw];
        let declared = find(dict, b"/Length ")
            .and_then(|at| parse_number(&dict[at + b"/Length ".len()..]))
            .ok_or_else(|| {
                FolioError::MalformedXref(format!("stream object {} has no /Length", i + 1))
            })?;
        let body_start = stream_kw + b"stream\n".len();
        let body_end = rfind(object, b"\nendstream").ok_or_else(|| {
            FolioError::MalformedXref(format!("stream object {} has no endstream", i + 1))
        })?;
        let actual = body_end.saturating_sub(body_start);
        if declared != actual {
            return Err(FolioError::StreamLength {
                object: i + 1,
                declared,
                actual,
            });
        }
    }
    Ok(())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn parse_number(bytes: &[u8]) -> Option<usize> {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    std::str::from_utf8(&bytes[..digits]).ok()?.parse().ok()
}
