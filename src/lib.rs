//! # docfuse
//!
//! Merge ordered Office Open XML word-processing parts into one
//! composite document.
//!
//! A .docx file is a ZIP container with an XML document tree inside;
//! concatenating containers produces corrupt output. docfuse merges at
//! the document-body level instead: the first part by sort order (the
//! master) supplies the page layout, every later part is reduced to its
//! body content, sanitized for relocation, and spliced into the master
//! ahead of its trailing section properties. Every archive entry other
//! than `word/document.xml` passes through byte-identical.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfuse::{build_folder, BatchOutcome, MergeOptions};
//!
//! // One folder of digit-prefixed parts -> one merged document.
//! match build_folder("IN/Contract (Lease)", &MergeOptions::default())? {
//!     BatchOutcome::Built { output, merged } => {
//!         println!("built {} from {} parts", output.display(), merged.merged_parts + 1);
//!     }
//!     BatchOutcome::Skipped => println!("no eligible parts"),
//! }
//! # Ok::<(), docfuse::Error>(())
//! ```
//!
//! ## Lower-level API
//!
//! ```no_run
//! use docfuse::docx::{merge_parts, MergeOptions};
//! use std::path::PathBuf;
//!
//! // Explicit master + ordered auxiliary parts; the caller owns the
//! // ordering and decides where the bytes go.
//! let parts = vec![PathBuf::from("2_terms.docx"), PathBuf::from("3_annex.docx")];
//! let merged = merge_parts("1_cover.docx", &parts, &MergeOptions::default())?;
//! std::fs::write("contract.docx", &merged.bytes)?;
//! # Ok::<(), docfuse::Error>(())
//! ```

pub mod batch;
pub mod container;
pub mod docx;
pub mod error;
pub mod rename;
pub mod status;

// Re-exports
pub use batch::{build_all, build_folder, discover_parts, BatchOutcome, BatchReport, PartDescriptor};
pub use container::{Container, DOCUMENT_ENTRY};
pub use docx::{merge_parts, MergeOptions, Merged, SanitizeOptions, SkippedPart};
pub use error::{Error, Result};
pub use rename::{rename_all, rename_folder, RenameReport, RenameTable};
pub use status::{folder_statuses, FolderStatus};
