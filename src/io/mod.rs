//! Format writers.
//!
//! Each writer streams one document to a `std::io::Write`. Triangle and
//! polygon writers consume an [`IndexedMesh`](crate::indexed::IndexedMesh);
//! the drawing writers consume an [`OutlineSet`](crate::outline::OutlineSet).
//! Choosing the writer and preparing its input is the job of
//! [`export`](crate::export).

pub mod amf;
pub mod dxf;
pub mod obj;
pub mod off;
pub mod stl;
pub mod svg;

use crate::errors::ExportResult;
use crate::export::ExportStats;
use tracing::warn;

/// Escape text for use inside XML character data or attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Run an export into memory and return the document as text.
pub(crate) fn render<F>(export: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> ExportResult<ExportStats>,
{
    let mut out = Vec::new();
    if let Err(err) = export(&mut out) {
        warn!(error = %err, "in-memory export failed");
    }
    String::from_utf8_lossy(&out).into_owned()
}
