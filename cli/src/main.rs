use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod infrastructure;
mod observability;
mod tools;
mod ui;

use cli::Cli;
use commands::deploy::{DeployOptions, Deployer};
use infrastructure::SystemRunner;
use observability::{DeployTracker, EventMetadata};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .init();

    let site_config = match config::load(&cli.site_dir, cli.config.as_deref()) {
        Ok(site_config) => site_config,
        Err(e) => {
            ui::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let options = DeployOptions {
        environment: cli.env,
        region: cli.region.clone(),
        profile: cli.profile.clone(),
        force: cli.force,
        validate: cli.validate,
        dry_run: cli.dry_run,
        site_dir: cli.site_dir.clone(),
        config_file: cli.config.clone(),
    };

    let metadata = EventMetadata::new(
        cli.env.as_str(),
        site_config.bucket.clone(),
        cli.region.clone(),
        cli.profile.clone(),
    );
    let mut tracker = DeployTracker::new(metadata, cli.emit_events);

    let mut deployer = Deployer::new(SystemRunner, site_config, options);
    deployer.print_banner();
    tracker.emit_started(cli.dry_run, cli.validate);

    match deployer.run(&mut tracker).await {
        Ok(report) => {
            tracker.emit_completed(report.dry_run, report.warnings.len());
            Ok(())
        }
        Err(e) => {
            tracker.emit_failed(&format!("{:#}", e));
            eprintln!();
            ui::print_error(&format!("Deployment failed: {:#}", e));
            eprintln!("🔧 Check logs above for troubleshooting information");
            std::process::exit(1);
        }
    }
}
