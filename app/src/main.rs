//! Site entry point
//!
//! Runs the startup sequence and freezes the configuration the host
//! pipeline initializes from. `--check` prints the boot report as JSON and
//! exits; deployment pipelines run it against a staging slot before
//! swapping traffic over.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use plinth::{Config, GlobalConfig, MediaConfig, TemplatesConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site", about = "Plinth-hosted site")]
struct Cli {
    /// Project root holding the settings and .env files
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Resolve configuration, print the boot report as JSON, and exit
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let report = match Config::init(&cli.root) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(error = %err, "startup configuration failed");
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!(error = %err, "could not serialize boot report");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    tracing::info!(
        environment = %report.environment,
        overrides = report.overrides_applied,
        "startup configuration frozen"
    );
    if let Some(global) = Config::get::<GlobalConfig>() {
        tracing::info!(
            public_base_url = global
                .public_base_url
                .as_ref()
                .map(|url| url.as_str())
                .unwrap_or("<unset>"),
            force_https = global.force_https,
            "global settings"
        );
    }
    if let Some(media) = Config::get::<MediaConfig>() {
        tracing::info!(physical_root_path = ?media.physical_root_path, "media settings");
    }
    if let Some(templates) = Config::get::<TemplatesConfig>() {
        tracing::info!(codegen_mode = %templates.codegen_mode, "template settings");
    }

    tracing::info!("startup complete, handing off to the site host");
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
