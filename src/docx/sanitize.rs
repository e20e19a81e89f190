//! Content sanitization for relocated body fragments.
//!
//! A fragment lifted out of one document cannot be dropped into another
//! as-is: its `w:sectPr` blocks would force a section break carrying the
//! wrong page setup, and its tracking identifiers are required to be
//! unique per document. One structural pass removes section-properties
//! subtrees by tag identity and strip-ruleset attributes by qualified
//! name; everything else is emitted unchanged.

use super::SECT_PR_TAG;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Attribute names that never survive relocation: paragraph/text tracking
/// ids and the revision-session id family.
const STRIP_ATTRS: &[&str] = &[
    "w14:paraId",
    "w14:textId",
    "w:rsidR",
    "w:rsidRDefault",
    "w:rsidRPr",
    "w:rsidP",
    "w:rsidDel",
    "w:rsidTr",
    "w:rsidSect",
];

/// Generic element-identifier attributes, stripped only on request.
const GENERIC_ID_ATTRS: &[&str] = &["w:id"];

/// Options controlling fragment sanitization.
#[derive(Debug, Clone, Default)]
pub struct SanitizeOptions {
    /// Also strip generic id attributes (`w:id`).
    ///
    /// Off by default: stripping them has been observed to break style
    /// and numbering resolution in merged output, so only the tracking
    /// and revision ids are removed unless explicitly asked.
    pub strip_generic_ids: bool,
}

/// Sanitize a body-content fragment for insertion into another document.
///
/// Removes every `w:sectPr` element with its whole subtree (long and
/// self-closing forms) and every strip-ruleset attribute regardless of
/// quote style. Idempotent; a rule matching zero times is not an error.
/// The master's own content must never pass through here.
pub fn sanitize_fragment(fragment: &str, options: &SanitizeOptions) -> Result<String> {
    let mut reader = Reader::from_str(fragment);
    let mut writer = Writer::new(Vec::with_capacity(fragment.len()));

    // Depth inside a w:sectPr subtree; everything is dropped while > 0.
    let mut skip_depth: usize = 0;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else if e.name().as_ref() == SECT_PR_TAG {
                    skip_depth = 1;
                } else {
                    match rewrite_attributes(&e, options)? {
                        Some(stripped) => writer.write_event(Event::Start(stripped))?,
                        None => writer.write_event(Event::Start(e))?,
                    }
                }
            }
            Event::Empty(e) => {
                if skip_depth > 0 || e.name().as_ref() == SECT_PR_TAG {
                    continue;
                }
                match rewrite_attributes(&e, options)? {
                    Some(stripped) => writer.write_event(Event::Empty(stripped))?,
                    None => writer.write_event(Event::Empty(e))?,
                }
            }
            Event::End(e) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else {
                    writer.write_event(Event::End(e))?;
                }
            }
            event => {
                if skip_depth == 0 {
                    writer.write_event(event)?;
                }
            }
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::XmlParse(e.to_string()))
}

/// Rebuild a tag without its stripped attributes.
///
/// Returns `None` when no attribute matches, so an untouched tag is
/// re-emitted from its original bytes rather than reconstructed.
fn rewrite_attributes(
    tag: &BytesStart<'_>,
    options: &SanitizeOptions,
) -> Result<Option<BytesStart<'static>>> {
    let mut any_stripped = false;
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| Error::XmlParse(e.to_string()))?;
        if is_stripped_attr(attr.key.as_ref(), options) {
            any_stripped = true;
            break;
        }
    }
    if !any_stripped {
        return Ok(None);
    }

    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let mut rebuilt = BytesStart::new(name);
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| Error::XmlParse(e.to_string()))?;
        if !is_stripped_attr(attr.key.as_ref(), options) {
            rebuilt.push_attribute(attr);
        }
    }
    Ok(Some(rebuilt))
}

fn is_stripped_attr(key: &[u8], options: &SanitizeOptions) -> bool {
    STRIP_ATTRS.iter().any(|name| name.as_bytes() == key)
        || (options.strip_generic_ids
            && GENERIC_ID_ATTRS.iter().any(|name| name.as_bytes() == key))
}
