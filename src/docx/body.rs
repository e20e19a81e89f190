//! Body extraction: locating the content span inside `<w:body>`.

use crate::error::{Error, Result};

const BODY_OPEN: &str = "<w:body";
const BODY_CLOSE: &str = "</w:body>";

/// The character span of a document body's direct content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySpan {
    /// Offset immediately after the opening tag's `>`.
    pub content_start: usize,
    /// Offset of the start of `</w:body>`.
    pub content_end: usize,
    /// The body was a self-closing `<w:body/>`; the span is empty and no
    /// closing tag exists.
    pub self_closing: bool,
}

impl BodySpan {
    /// The body content as a slice of the original document.
    pub fn content<'a>(&self, xml: &'a str) -> &'a str {
        &xml[self.content_start..self.content_end]
    }
}

/// Locate the body content span of a document.
///
/// Tolerates attributes on the opening tag by scanning for the tag's own
/// `>` rather than assuming a fixed-length marker. Fails with
/// [`Error::MalformedDocument`] when either body marker is absent.
pub fn content_span(xml: &str) -> Result<BodySpan> {
    let open = find_body_open(xml)
        .ok_or_else(|| Error::MalformedDocument("no <w:body> opening tag".to_string()))?;
    let tag_end = xml[open..]
        .find('>')
        .map(|i| open + i)
        .ok_or_else(|| Error::MalformedDocument("unterminated <w:body> tag".to_string()))?;

    if xml[..tag_end].ends_with('/') {
        // Empty-element body: nothing to extract, nothing to splice into.
        let after = tag_end + 1;
        return Ok(BodySpan {
            content_start: after,
            content_end: after,
            self_closing: true,
        });
    }

    let content_start = tag_end + 1;
    let content_end = xml
        .rfind(BODY_CLOSE)
        .filter(|&end| end >= content_start)
        .ok_or_else(|| Error::MalformedDocument("no </w:body> closing tag".to_string()))?;

    Ok(BodySpan {
        content_start,
        content_end,
        self_closing: false,
    })
}

/// Find the offset of the `<w:body` tag, rejecting longer names that
/// merely share the prefix (e.g. `<w:bodyDiv`).
fn find_body_open(xml: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(i) = xml[from..].find(BODY_OPEN) {
        let at = from + i;
        match xml[at + BODY_OPEN.len()..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(at),
            _ => from = at + BODY_OPEN.len(),
        }
    }
    None
}
