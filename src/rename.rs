//! Filename labeling: numeric prefixes mapped to display labels.
//!
//! Part files arrive as `<prefix>_<anything>.docx`. A JSON lookup table
//! keyed by the exact prefix (`"1"`, `"2.5"`, …) supplies a human label,
//! and the enclosing folder can contribute a context suffix via bracket
//! syntax in its name: `Contract (Lease)` labels every renamed file with
//! `(Lease)`. The merge engine itself only cares about sort order.

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Prefix-to-label lookup table, loaded from JSON
/// (`{"1": "Cover", "2": "Terms", …}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RenameTable {
    map: BTreeMap<String, String>,
}

impl RenameTable {
    /// Load the table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Look up the label for an exact prefix.
    pub fn label(&self, prefix: &str) -> Option<&str> {
        self.map.get(prefix).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// What happened to the files of one folder.
#[derive(Debug, Default)]
pub struct RenameReport {
    pub folder: String,
    /// (old name, new name) pairs applied.
    pub renamed: Vec<(String, String)>,
    /// Target names that already existed, left untouched.
    pub conflicts: Vec<String>,
}

/// Extract the context label from a folder name's bracket group: the
/// text between the first `(` and the last `)`.
pub fn folder_context(folder_name: &str) -> Option<&str> {
    let open = folder_name.find('(')?;
    let close = folder_name.rfind(')')?;
    (close > open).then(|| &folder_name[open + 1..close])
}

/// Split the numeric prefix off a part filename.
///
/// Stricter than discovery eligibility: the prefix (digits and dots)
/// must be followed by an underscore delimiter.
pub fn split_prefix(file_name: &str) -> Option<&str> {
    let end = file_name
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(file_name.len());
    (end > 0 && file_name[end..].starts_with('_')).then(|| &file_name[..end])
}

/// Rename the part files of one folder according to the table.
///
/// Files without a delimited prefix or without a table entry are left
/// alone. A file already carrying its target name is not touched; a
/// different file already occupying the target name is reported as a
/// conflict and the source is kept.
pub fn rename_folder(folder: impl AsRef<Path>, table: &RenameTable) -> Result<RenameReport> {
    let folder = folder.as_ref();
    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let context = folder_context(&folder_name).map(str::to_owned);

    let mut report = RenameReport {
        folder: folder_name,
        ..Default::default()
    };

    let mut files: Vec<String> = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".docx") && !name.starts_with('~') {
                files.push(name.to_string());
            }
        }
    }
    files.sort();

    for name in files {
        let Some(prefix) = split_prefix(&name) else { continue };
        let Some(label) = table.label(prefix) else { continue };

        let new_name = match &context {
            Some(ctx) => format!("{prefix}_{label} ({ctx}).docx"),
            None => format!("{prefix}_{label}.docx"),
        };
        if new_name == name {
            continue;
        }

        let target = folder.join(&new_name);
        if target.exists() {
            report.conflicts.push(new_name);
            continue;
        }
        fs::rename(folder.join(&name), &target)?;
        report.renamed.push((name, new_name));
    }

    Ok(report)
}

/// Rename across every subfolder of a working directory.
pub fn rename_all(in_dir: impl AsRef<Path>, table: &RenameTable) -> Result<Vec<RenameReport>> {
    let mut reports = Vec::new();
    let mut folders = Vec::new();
    for entry in fs::read_dir(in_dir.as_ref())? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            folders.push(entry.path());
        }
    }
    folders.sort();
    for folder in folders {
        reports.push(rename_folder(&folder, table)?);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> RenameTable {
        let json = serde_json::to_string(
            &entries
                .iter()
                .cloned()
                .collect::<BTreeMap<&str, &str>>(),
        )
        .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_folder_context() {
        assert_eq!(folder_context("Contract (Lease)"), Some("Lease"));
        assert_eq!(folder_context("A (B) C (D)"), Some("B) C (D"));
        assert_eq!(folder_context("No brackets"), None);
        assert_eq!(folder_context(")("), None);
    }

    #[test]
    fn test_split_prefix() {
        assert_eq!(split_prefix("1_intro.docx"), Some("1"));
        assert_eq!(split_prefix("2.5_annex.docx"), Some("2.5"));
        assert_eq!(split_prefix("intro.docx"), None);
        assert_eq!(split_prefix("1-intro.docx"), None);
        assert_eq!(split_prefix("_x.docx"), None);
    }

    #[test]
    fn test_rename_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Contract (Lease)");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("1_old.docx"), b"x").unwrap();
        fs::write(folder.join("9_unmapped.docx"), b"y").unwrap();

        let report = rename_folder(&folder, &table(&[("1", "Cover")])).unwrap();
        assert_eq!(
            report.renamed,
            [("1_old.docx".to_string(), "1_Cover (Lease).docx".to_string())]
        );
        assert!(folder.join("1_Cover (Lease).docx").exists());
        assert!(folder.join("9_unmapped.docx").exists());
    }

    #[test]
    fn test_rename_conflict_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Plain");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("1_old.docx"), b"x").unwrap();
        fs::write(folder.join("1_Cover.docx"), b"taken").unwrap();

        let report = rename_folder(&folder, &table(&[("1", "Cover")])).unwrap();
        assert!(report.renamed.is_empty());
        assert_eq!(report.conflicts, ["1_Cover.docx"]);
        assert!(folder.join("1_old.docx").exists());
    }

    #[test]
    fn test_rename_already_named_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Plain");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("1_Cover.docx"), b"x").unwrap();

        let report = rename_folder(&folder, &table(&[("1", "Cover")])).unwrap();
        assert!(report.renamed.is_empty());
        assert!(report.conflicts.is_empty());
    }
}
