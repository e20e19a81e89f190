//! Working-directory observation for the control surface.
//!
//! Pure inspection of the same layout the batch builder reads; nothing
//! here mutates the filesystem.

use crate::error::Result;
use crate::rename::split_prefix;
use std::fs;
use std::path::Path;

/// Observed state of one batch folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderStatus {
    pub name: String,
    /// No `.docx` part files at all.
    pub is_empty: bool,
    /// At least one file carries a delimited numeric prefix.
    pub is_renamed: bool,
    /// The folder's output document already exists next to it.
    pub is_built: bool,
}

/// Report the status of every batch folder in a working directory,
/// sorted by name.
pub fn folder_statuses(in_dir: impl AsRef<Path>) -> Result<Vec<FolderStatus>> {
    let in_dir = in_dir.as_ref();
    let mut statuses = Vec::new();

    for entry in fs::read_dir(in_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();

        let mut has_docx = false;
        let mut has_prefixed = false;
        for file in fs::read_dir(entry.path())? {
            let file = file?;
            let Some(file_name) = file.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if file_name.ends_with(".docx") && !file_name.starts_with('~') {
                has_docx = true;
                if split_prefix(&file_name).is_some() {
                    has_prefixed = true;
                }
            }
        }

        statuses.push(FolderStatus {
            is_built: in_dir.join(format!("{name}.docx")).is_file(),
            is_empty: !has_docx,
            is_renamed: has_prefixed,
            name,
        });
    }

    statuses.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("empty")).unwrap();

        fs::create_dir(root.join("raw")).unwrap();
        fs::write(root.join("raw/draft.docx"), b"x").unwrap();

        fs::create_dir(root.join("ready")).unwrap();
        fs::write(root.join("ready/1_Cover.docx"), b"x").unwrap();
        fs::write(root.join("ready.docx"), b"built").unwrap();

        let statuses = folder_statuses(root).unwrap();
        assert_eq!(statuses.len(), 3);

        let by_name = |n: &str| statuses.iter().find(|s| s.name == n).unwrap();
        assert!(by_name("empty").is_empty);
        assert!(!by_name("raw").is_empty);
        assert!(!by_name("raw").is_renamed);
        assert!(by_name("ready").is_renamed);
        assert!(by_name("ready").is_built);
        assert!(!by_name("raw").is_built);
    }
}
