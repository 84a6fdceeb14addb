//! `sampler` - seedable random-variate sampling from the command line.

use std::fs::File;
use std::io::{self, BufWriter};

use clap::Parser;
use sampler_cli::cli::Cli;
use sampler_cli::config::build_config;
use sampler_cli::{commands, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_level: &str) {
    // Results go to stdout; logs stay on stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());

    info!(
        seed = ?config.seed,
        remainder_policy = %config.remainder_policy,
        format = %config.format,
        bins = ?config.bins,
        "Configuration loaded"
    );

    match &cli.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            commands::run(&cli.command, &config, &mut writer)?;
            info!(path = %path.display(), "Output written");
        }
        None => {
            let mut writer = io::stdout().lock();
            commands::run(&cli.command, &config, &mut writer)?;
        }
    }

    Ok(())
}
