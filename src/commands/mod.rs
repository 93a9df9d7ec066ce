//! Command dispatch for notecluster

mod cluster;
mod folders;

use std::time::Instant;

use notecluster_core::error::{ClusterError, Result};

use crate::cli::{Cli, Commands};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => Err(ClusterError::UsageError(
            "no command given; try `notecluster --help`".to_string(),
        )),
        Some(Commands::Cluster(args)) => cluster::execute(cli, args, start),
        Some(Commands::Folders { snapshot }) => folders::execute(cli, snapshot, start),
    }
}
