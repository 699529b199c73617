//! CLI definitions for waves-deploy
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  # Deploy to development environment
  waves-deploy --env=dev --validate

  # Dry run for production
  waves-deploy --env=production --dry-run --validate

  # Force deploy to production
  waves-deploy --env=production --force --profile=waves-prod";

#[derive(Parser, Debug)]
#[command(
    name = "waves-deploy",
    version,
    about = "Waves marketing site deployment",
    long_about = "Validates the marketing site and syncs it to S3, fixing content types\nand invalidating CloudFront when a distribution is configured.",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Deployment environment
    #[arg(long, value_enum, default_value = "dev")]
    pub env: Environment,

    /// AWS region
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// AWS profile
    #[arg(long, default_value = "default")]
    pub profile: String,

    /// Force deployment to production
    #[arg(long)]
    pub force: bool,

    /// Run extra validation checks before deployment
    #[arg(long)]
    pub validate: bool,

    /// Validate and stage but don't deploy
    #[arg(long)]
    pub dry_run: bool,

    /// Directory containing the built site
    #[arg(long, default_value = ".")]
    pub site_dir: PathBuf,

    /// Deployment config file (defaults to <site-dir>/deploy.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print structured JSON deployment events
    #[arg(long, env = "WAVES_EMIT_EVENTS")]
    pub emit_events: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Target environment of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Dev,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
