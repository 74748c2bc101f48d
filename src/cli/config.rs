//! Shared configuration types for CLI commands

use clap::Args;
use serde::{Deserialize, Serialize};

/// Common configuration shared across commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Whether to show progress bars
    pub progress: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            progress: true,
        }
    }
}

/// Flags accepted by every command that plays games
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,
}

impl From<&CommonArgs> for CommonConfig {
    fn from(args: &CommonArgs) -> Self {
        Self {
            seed: args.seed,
            progress: !args.no_progress,
        }
    }
}
