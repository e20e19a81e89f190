//! docfuse CLI - Office Open XML document assembly tool
//!
//! Builds composite .docx documents from folders of ordered parts,
//! applies label renaming, and reports working-directory status.

mod settings;

use clap::{Parser, Subcommand};
use colored::*;
use docfuse::{BatchOutcome, BatchReport, MergeOptions, RenameTable, SanitizeOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Merge ordered Office Open XML document parts into composite documents
#[derive(Parser)]
#[command(
    name = "docfuse",
    version,
    about = "Assemble .docx documents from ordered parts",
    long_about = "docfuse - Office Open XML document assembly.\n\n\
                  Each folder of digit-prefixed .docx parts becomes one merged\n\
                  document that keeps the first part's page layout."
)]
struct Cli {
    /// Working directory holding the batch folders (overrides settings.json)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build merged documents from batch folders
    Build {
        /// Build only this folder (default: every folder)
        folder: Option<String>,

        /// Also strip generic id attributes from merged content
        #[arg(long)]
        strip_generic_ids: bool,
    },

    /// Rename part files using a prefix-to-label table
    Rename {
        /// JSON table mapping numeric prefixes to labels
        #[arg(short, long, default_value = "renamer_config.json")]
        config: PathBuf,
    },

    /// Show the status of every batch folder
    Status,

    /// Persist the working directory into settings.json
    SetDir {
        /// Directory to use for future runs
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let in_dir = settings::working_dir(cli.dir);

    match cli.command {
        Commands::Build {
            folder,
            strip_generic_ids,
        } => {
            let options = MergeOptions {
                sanitize: SanitizeOptions { strip_generic_ids },
            };

            let pb = create_spinner("Building...");
            let reports = match folder {
                Some(name) => {
                    let path = in_dir.join(&name);
                    if !path.is_dir() {
                        pb.finish_and_clear();
                        return Err(format!(
                            "folder \"{}\" not found in {}",
                            name,
                            in_dir.display()
                        )
                        .into());
                    }
                    vec![BatchReport {
                        folder: name,
                        result: docfuse::build_folder(&path, &options),
                    }]
                }
                None => docfuse::build_all(&in_dir, &options)?,
            };
            pb.finish_and_clear();

            let mut failures = 0;
            for report in &reports {
                print_batch_report(report);
                if report.result.is_err() {
                    failures += 1;
                }
            }
            if reports.is_empty() {
                println!("{} no batch folders in {}", "!".yellow().bold(), in_dir.display());
            }
            if failures > 0 {
                return Err(format!("{failures} batch(es) failed").into());
            }
        }

        Commands::Rename { config } => {
            let table = RenameTable::load(&config)
                .map_err(|e| format!("cannot load {}: {e}", config.display()))?;
            if table.is_empty() {
                println!("{} rename table is empty", "!".yellow().bold());
                return Ok(());
            }

            let reports = docfuse::rename_all(&in_dir, &table)?;
            let mut total = 0;
            for report in &reports {
                for (old, new) in &report.renamed {
                    println!("{} {}: {} -> {}", "✓".green().bold(), report.folder, old, new);
                    total += 1;
                }
                for conflict in &report.conflicts {
                    println!(
                        "{} {}: {} already exists, skipped",
                        "!".yellow().bold(),
                        report.folder,
                        conflict
                    );
                }
            }
            println!("Renamed {total} file(s)");
        }

        Commands::Status => {
            let statuses = docfuse::folder_statuses(&in_dir)?;
            if statuses.is_empty() {
                println!("No batch folders in {}", in_dir.display());
                return Ok(());
            }
            println!("{}", format!("Folders in {}", in_dir.display()).cyan().bold());
            println!("{}", "─".repeat(40));
            for status in statuses {
                let state = if status.is_built {
                    "built".green()
                } else if status.is_empty {
                    "empty".yellow()
                } else if status.is_renamed {
                    "ready".cyan()
                } else {
                    "raw".normal()
                };
                println!("{:<8} {}", state, status.name);
            }
        }

        Commands::SetDir { path } => {
            let cleaned = path.trim().trim_matches('"').to_string();
            std::fs::create_dir_all(&cleaned)?;
            let settings = settings::Settings {
                in_dir: Some(cleaned.clone()),
            };
            settings.save(settings::SETTINGS_FILE)?;
            println!("{} working directory set to {}", "✓".green().bold(), cleaned);
        }
    }

    Ok(())
}

/// One summary line per batch, plus a warning line per skipped part.
fn print_batch_report(report: &BatchReport) {
    match &report.result {
        Ok(BatchOutcome::Built { output, merged }) => {
            println!(
                "{} {} — built {} ({} part(s))",
                "✓".green().bold(),
                report.folder,
                output.display(),
                merged.merged_parts + 1
            );
            for skipped in &merged.skipped {
                println!(
                    "  {} skipped {}: {}",
                    "!".yellow().bold(),
                    skipped.path.display(),
                    skipped.reason
                );
            }
        }
        Ok(BatchOutcome::Skipped) => {
            println!("{} {} — skipped (no part files)", "!".yellow().bold(), report.folder);
        }
        Err(e) => {
            println!("{} {} — {}", "✗".red().bold(), report.folder, e);
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
