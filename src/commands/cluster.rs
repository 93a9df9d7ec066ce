//! `notecluster cluster` - run the full pipeline on a snapshot

use std::time::Instant;

use notecluster_core::error::Result;
use notecluster_core::{run_clustering_pipeline, ClusteringConfig, PipelineResult, Snapshot};
use tracing::debug;

use crate::cli::{Cli, ClusterArgs, OutputFormat};

pub fn execute(cli: &Cli, args: &ClusterArgs, start: Instant) -> Result<()> {
    let config = resolve_config(args)?;
    debug!(
        min = config.min_cluster_size,
        max = config.max_cluster_size,
        "resolved_config"
    );

    let snapshot = Snapshot::load(&args.snapshot)?;
    debug!(elapsed = ?start.elapsed(), files = snapshot.files.len(), "load_snapshot");

    let result = run_clustering_pipeline(&snapshot, &config)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Human => output_human(cli, &result),
    }

    debug!(elapsed = ?start.elapsed(), "cluster_command");
    Ok(())
}

/// Config file (or defaults), then command-line overrides
fn resolve_config(args: &ClusterArgs) -> Result<ClusteringConfig> {
    let mut config = match &args.config {
        Some(path) => ClusteringConfig::load(path)?,
        None => ClusteringConfig::default(),
    };
    if let Some(min) = args.min_size {
        config = config.with_min_cluster_size(min);
    }
    if let Some(max) = args.max_size {
        config = config.with_max_cluster_size(max);
    }
    if args.merge_nested {
        config.merge_nested_folders = true;
    }
    Ok(config)
}

fn output_human(cli: &Cli, result: &PipelineResult) {
    if result.clusters.is_empty() {
        if !cli.quiet {
            println!("No notes found");
        }
        return;
    }

    for cluster in &result.clusters {
        let mut annotations = String::new();
        if !cluster.dominant_tags.is_empty() {
            let tags: Vec<&str> = cluster.dominant_tags.iter().map(String::as_str).collect();
            annotations.push_str(&format!(" tags={}", tags.join(",")));
        }
        if cluster.internal_link_density > 0.0 {
            annotations.push_str(&format!(" density={:.2}", cluster.internal_link_density));
        }

        println!(
            "{} [{}] {}{}",
            cluster.id,
            cluster.size(),
            cluster.display_name(),
            annotations
        );
        if cli.verbose {
            for note in &cluster.note_ids {
                println!("  {}", note);
            }
        }
    }

    if !cli.quiet {
        let stats = &result.stats;
        println!();
        println!(
            "{} clusters, {} notes (avg {:.1}, {} undersized, {} split, {} merged)",
            stats.total_clusters,
            stats.total_notes,
            stats.average_cluster_size,
            stats.undersized_clusters,
            stats.split_clusters,
            stats.merged_clusters
        );
    }
}
