//! Splice planning: where foreign content enters the master body.
//!
//! Merged content must land after all of the master's own content but
//! before the trailing section properties that govern the final page
//! layout, so the merged flow inherits the master's page setup. The
//! trailing `w:sectPr` is identified structurally among the body's
//! direct children rather than by a bounded backward pattern search.

use super::{body, SECT_PR_TAG};
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Compute the insertion offset for merged content in a master document.
///
/// If the last element child of the body is a `w:sectPr` (for a chain of
/// trailing section properties, the last one is the splice boundary),
/// the offset is the start of that element; otherwise it is the start of
/// `</w:body>`. Fails with [`Error::MalformedDocument`] when the body
/// has no closing tag.
pub fn insertion_offset(xml: &str) -> Result<usize> {
    let span = body::content_span(xml)?;
    if span.self_closing {
        return Err(Error::MalformedDocument(
            "no </w:body> closing tag".to_string(),
        ));
    }

    let content = span.content(xml);
    let mut reader = Reader::from_str(content);
    let mut depth: usize = 0;
    // Start offset of the last direct element child, and whether it is a
    // section-properties element.
    let mut last_child: Option<(usize, bool)> = None;

    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                if depth == 0 {
                    last_child = Some((pos, e.name().as_ref() == SECT_PR_TAG));
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    last_child = Some((pos, e.name().as_ref() == SECT_PR_TAG));
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    match last_child {
        Some((offset, true)) => Ok(span.content_start + offset),
        _ => Ok(span.content_end),
    }
}
