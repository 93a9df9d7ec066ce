//! `notecluster folders` - list snapshot folders, deepest first

use std::path::Path;
use std::time::Instant;

use notecluster_core::error::Result;
use notecluster_core::folders::{folder_depth, get_folders_by_depth};
use notecluster_core::Snapshot;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};

pub fn execute(cli: &Cli, snapshot_path: &Path, start: Instant) -> Result<()> {
    let snapshot = Snapshot::load(snapshot_path)?;
    let folders = get_folders_by_depth(&snapshot.files);
    debug!(elapsed = ?start.elapsed(), folders = folders.len(), "folders_by_depth");

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = folders
                .iter()
                .map(|folder| {
                    serde_json::json!({
                        "path": folder,
                        "depth": folder_depth(folder),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if folders.is_empty() {
                if !cli.quiet {
                    println!("No folders found");
                }
                return Ok(());
            }
            for folder in &folders {
                println!("{}", folder);
            }
        }
    }

    Ok(())
}
