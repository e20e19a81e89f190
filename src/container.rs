//! ZIP container abstraction for OOXML documents.
//!
//! A merge touches exactly one entry of the master archive
//! (`word/document.xml`); everything else is carried over with its
//! compressed bytes untouched, so styles, media and relationship entries
//! round-trip byte-identically.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;

/// Archive entry holding the main document part.
pub const DOCUMENT_ENTRY: &str = "word/document.xml";

/// A ZIP container opened from disk or from memory.
pub struct Container {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Container {
    /// Open a container from a file path.
    ///
    /// The whole file is buffered into memory; archives in this pipeline
    /// are small and the buffer doubles as the raw-copy source when the
    /// master is repacked.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
            .map_err(|_| Error::ArchiveOpen(path.display().to_string()))
    }

    /// Open a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an entry and decode it as text.
    ///
    /// OOXML parts are normally UTF-8, but UTF-16 documents exist in the
    /// wild; both BOM variants are handled. An entry that decodes as
    /// neither is an [`Error::ArchiveRead`].
    pub fn read_entry_text(&self, name: &str) -> Result<String> {
        let bytes = self.read_entry_bytes(name)?;
        decode_entry_text(&bytes).ok_or_else(|| Error::ArchiveRead(name.to_string()))
    }

    /// Read an entry's raw bytes.
    pub fn read_entry_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::EntryMissing(name.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|_| Error::ArchiveRead(name.to_string()))?;
        Ok(data)
    }

    /// Check whether an entry exists in the archive.
    pub fn has_entry(&self, name: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == name)
    }

    /// List all entry names in the archive.
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.borrow().file_names().map(String::from).collect()
    }

    /// Produce new archive bytes with `name` replaced by `content`.
    ///
    /// Every other entry is raw-copied, preserving its compressed data and
    /// metadata exactly. The replaced entry is written deflated. If the
    /// entry did not exist it is appended.
    pub fn repack_with_entry(&self, name: &str, content: &[u8]) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|e| Error::ArchiveRead(e.to_string()))?;
            if entry.name() == name {
                continue;
            }
            writer
                .raw_copy_file(entry)
                .map_err(|e| Error::ArchiveWrite(e.to_string()))?;
        }

        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        writer
            .start_file(name, options)
            .map_err(|e| Error::ArchiveWrite(e.to_string()))?;
        writer
            .write_all(content)
            .map_err(|e| Error::ArchiveWrite(e.to_string()))?;

        let cursor = writer
            .finish()
            .map_err(|e| Error::ArchiveWrite(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("entries", &self.archive.borrow().len())
            .finish()
    }
}

/// Decode entry bytes as text, handling UTF-8 and UTF-16 (LE/BE) BOMs.
///
/// Returns `None` when the bytes are not valid text in any handled
/// encoding. UTF-16 input is converted to UTF-8 and its XML encoding
/// declaration rewritten to match, since the decoded string will be
/// re-parsed and re-emitted as UTF-8.
fn decode_entry_text(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec()).ok();
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes).map(|s| fix_encoding_declaration(&s));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes).map(|s| fix_encoding_declaration(&s));
    }
    String::from_utf8(bytes.to_vec()).ok()
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> Option<String> {
    // Truncate a dangling odd byte rather than failing the whole entry.
    let len = bytes.len() & !1;
    let units = (0..len).step_by(2).map(|i| combine([bytes[i], bytes[i + 1]]));
    char::decode_utf16(units).collect::<std::result::Result<String, _>>().ok()
}

/// Rewrite `encoding="UTF-16"` to UTF-8 in the XML declaration after a
/// UTF-16 entry has been decoded to a Rust string.
fn fix_encoding_declaration(content: &str) -> String {
    if let Some(end) = content.find("?>").filter(|_| content.starts_with("<?xml")) {
        let (decl, rest) = content.split_at(end + 2);
        let fixed = decl
            .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
            .replace("encoding='UTF-16'", "encoding='UTF-8'")
            .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
            .replace("encoding='utf-16'", "encoding='UTF-8'");
        return format!("{}{}", fixed, rest);
    }
    content.to_string()
}
