//! Word-processing document merge engine.
//!
//! Operates on the `word/document.xml` part of a .docx container: extracts
//! body content from auxiliary parts, sanitizes it for relocation, and
//! splices it into a master document ahead of the master's trailing
//! section properties.

mod body;
mod merge;
mod sanitize;
mod splice;

pub use body::{content_span, BodySpan};
pub use merge::{assemble, merge_parts, MergeOptions, Merged, SkippedPart, PARAGRAPH_SEPARATOR};
pub use sanitize::{sanitize_fragment, SanitizeOptions};
pub use splice::insertion_offset;

/// Qualified tag name of a section-properties element.
pub(crate) const SECT_PR_TAG: &[u8] = b"w:sectPr";
