//! Merge assembly: fragment concatenation and archive repacking.

use super::{body, sanitize, splice, SanitizeOptions};
use crate::container::{Container, DOCUMENT_ENTRY};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Separator inserted before each merged fragment so every part starts
/// on its own paragraph instead of running into the previous part's
/// final run.
pub const PARAGRAPH_SEPARATOR: &str = "<w:p/>";

/// Options for a merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Sanitization applied to every auxiliary fragment.
    pub sanitize: SanitizeOptions,
}

/// An auxiliary part excluded from the merge, with the reason.
#[derive(Debug)]
pub struct SkippedPart {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a successful merge: the output archive bytes plus a record
/// of what went in and what was skipped.
#[derive(Debug)]
pub struct Merged {
    /// The complete output archive, ready to be written to disk.
    pub bytes: Vec<u8>,
    /// Number of auxiliary parts merged into the master.
    pub merged_parts: usize,
    /// Auxiliary parts that failed to load and were excluded.
    pub skipped: Vec<SkippedPart>,
}

/// Insert fragments into the master XML at the planned offset.
///
/// Each fragment is prefixed with [`PARAGRAPH_SEPARATOR`]; everything
/// outside the single insertion point is preserved verbatim, so the
/// master's trailing section properties still govern the merged flow.
pub fn assemble(master_xml: &str, offset: usize, fragments: &[String]) -> String {
    let inserted: usize = fragments
        .iter()
        .map(|f| PARAGRAPH_SEPARATOR.len() + f.len())
        .sum();
    let mut out = String::with_capacity(master_xml.len() + inserted);
    out.push_str(&master_xml[..offset]);
    for fragment in fragments {
        out.push_str(PARAGRAPH_SEPARATOR);
        out.push_str(fragment);
    }
    out.push_str(&master_xml[offset..]);
    out
}

/// Merge ordered auxiliary parts into a master document.
///
/// The master is loaded and its splice offset computed first; a failure
/// there aborts the whole merge with no output produced. Each auxiliary
/// part is then loaded, reduced to its body content and sanitized;
/// per-part failures only exclude that part. The ordering of `parts` is
/// trusted and becomes the reading order of the merged document.
///
/// Only the `word/document.xml` entry of the master is rewritten; every
/// other entry of the returned archive is byte-identical to the master's.
pub fn merge_parts(
    master: impl AsRef<Path>,
    parts: &[PathBuf],
    options: &MergeOptions,
) -> Result<Merged> {
    let container = Container::open(master)?;
    let master_xml = container.read_entry_text(DOCUMENT_ENTRY)?;
    let offset = splice::insertion_offset(&master_xml)?;

    let mut fragments = Vec::with_capacity(parts.len());
    let mut skipped = Vec::new();
    for part in parts {
        match load_fragment(part, &options.sanitize) {
            Ok(fragment) => fragments.push(fragment),
            Err(err) => skipped.push(SkippedPart {
                path: part.clone(),
                reason: err.to_string(),
            }),
        }
    }

    let merged_xml = assemble(&master_xml, offset, &fragments);
    let bytes = container.repack_with_entry(DOCUMENT_ENTRY, merged_xml.as_bytes())?;

    Ok(Merged {
        bytes,
        merged_parts: fragments.len(),
        skipped,
    })
}

/// Load one auxiliary part and reduce it to a sanitized body fragment.
fn load_fragment(path: &Path, options: &SanitizeOptions) -> Result<String> {
    let container = Container::open(path)?;
    let xml = container.read_entry_text(DOCUMENT_ENTRY)?;
    let span = body::content_span(&xml)?;
    sanitize::sanitize_fragment(span.content(&xml), options)
}
