//! Batch processing: one folder of ordered parts per output document.
//!
//! A batch folder holds digit-prefixed `.docx` parts; the lowest-keyed
//! file is the master and supplies the page layout, the rest merge into
//! it in ascending key order. The output lands next to the folder as
//! `<folder>.docx`. Batches are fully independent of each other.

use crate::docx::{merge_parts, MergeOptions, Merged};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One ordered input part: its path and the numeric sort key derived
/// from the filename prefix.
#[derive(Debug, Clone)]
pub struct PartDescriptor {
    pub path: PathBuf,
    pub sort_key: f64,
}

/// Result of building one batch folder.
#[derive(Debug)]
pub enum BatchOutcome {
    /// No eligible part files; nothing was written.
    Skipped,
    /// Output written.
    Built {
        output: PathBuf,
        merged: Merged,
    },
}

/// Report for one batch within a multi-folder run.
#[derive(Debug)]
pub struct BatchReport {
    /// Folder name, as shown in summary output.
    pub folder: String,
    pub result: Result<BatchOutcome>,
}

/// List the eligible part files of a folder in ascending key order.
///
/// Eligible means: `.docx` extension, not an Office lock file
/// (`~`-prefixed), and a filename starting with an ASCII digit. The sort
/// key is the leading numeric prefix (`1`, `2.5`, …); ties break on the
/// filename so the order is deterministic.
pub fn discover_parts(folder: impl AsRef<Path>) -> Result<Vec<PartDescriptor>> {
    let mut parts = Vec::new();
    for entry in fs::read_dir(folder.as_ref())? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_part_file(name) {
            parts.push(PartDescriptor {
                path: entry.path(),
                sort_key: leading_number(name),
            });
        }
    }
    parts.sort_by(|a, b| {
        a.sort_key
            .total_cmp(&b.sort_key)
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(parts)
}

/// Whether a filename is an eligible part file.
pub fn is_part_file(name: &str) -> bool {
    !name.starts_with('~')
        && name.starts_with(|c: char| c.is_ascii_digit())
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

/// Parse the leading numeric prefix of a filename as a sort key.
///
/// Accepts digits with at most one decimal point, so `2.5_notes.docx`
/// sorts between `2_…` and `3_…`.
fn leading_number(name: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in name.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
            }
            _ => break,
        }
    }
    name[..end].parse().unwrap_or(f64::INFINITY)
}

/// The output path for a batch folder: `<parent>/<folder>.docx`.
pub fn output_path(folder: &Path) -> Result<PathBuf> {
    let name = folder
        .file_name()
        .ok_or_else(|| Error::Config(format!("not a folder path: {}", folder.display())))?;
    let parent = folder.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(format!("{}.docx", name.to_string_lossy())))
}

/// Build one batch folder into its output document.
///
/// The first part by sort order is the master. A master failure aborts
/// the batch before anything is written; auxiliary failures are recorded
/// in the outcome and the batch continues. An existing output file is
/// overwritten.
pub fn build_folder(folder: impl AsRef<Path>, options: &MergeOptions) -> Result<BatchOutcome> {
    let folder = folder.as_ref();
    let parts = discover_parts(folder)?;
    let Some((master, rest)) = parts.split_first() else {
        return Ok(BatchOutcome::Skipped);
    };

    let aux_paths: Vec<PathBuf> = rest.iter().map(|p| p.path.clone()).collect();
    let merged = merge_parts(&master.path, &aux_paths, options)?;

    // Assembly succeeded in full; only now touch the output path.
    let output = output_path(folder)?;
    fs::write(&output, &merged.bytes)?;

    Ok(BatchOutcome::Built { output, merged })
}

/// Build every subfolder of a working directory, one report per batch.
///
/// Folders are processed in name order for stable output; a failing
/// batch never affects the others.
pub fn build_all(in_dir: impl AsRef<Path>, options: &MergeOptions) -> Result<Vec<BatchReport>> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(in_dir.as_ref())? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            folders.push(entry.path());
        }
    }
    folders.sort();

    Ok(folders
        .into_iter()
        .map(|folder| BatchReport {
            folder: folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            result: build_folder(&folder, options),
        })
        .collect())
}
