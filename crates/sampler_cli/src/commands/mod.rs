//! CLI command implementations
//!
//! Each distribution subcommand turns its arguments into one
//! [`SamplingRequest`]; `batch` reads many from a file. All of them run on a
//! single sampling session and render through [`report`](crate::report).

pub mod batch;
pub mod bernoulli;
pub mod binomial;
pub mod exponential;
pub mod multinomial;

use std::io::Write;

use clap::Subcommand;
use sampler_engine::{Sampler, SamplingRequest};
use tracing::info;

use crate::config::CliConfig;
use crate::report::{self, Report};
use crate::Result;

/// Subcommands of the `sampler` binary
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count successes and failures over n Bernoulli trials
    Bernoulli(bernoulli::BernoulliArgs),

    /// Draw k Binomial(n, theta) success counts
    Binomial(binomial::BinomialArgs),

    /// Count n draws over equally-likely categories, k times
    MultinomialFixed(multinomial::MultinomialFixedArgs),

    /// Count n draws over weighted categories, k times
    MultinomialDynamic(multinomial::MultinomialDynamicArgs),

    /// Draw n Exponential(lambda) variates
    Exponential(exponential::ExponentialArgs),

    /// Run the requests listed in a TOML file on one session
    Batch(batch::BatchArgs),
}

impl Command {
    /// The request a distribution subcommand describes; `None` for `batch`.
    pub fn request(&self) -> Option<SamplingRequest> {
        match self {
            Command::Bernoulli(args) => Some(args.request()),
            Command::Binomial(args) => Some(args.request()),
            Command::MultinomialFixed(args) => Some(args.request()),
            Command::MultinomialDynamic(args) => Some(args.request()),
            Command::Exponential(args) => Some(args.request()),
            Command::Batch(_) => None,
        }
    }

    /// Every request this command runs, in order.
    pub fn requests(&self) -> Result<Vec<SamplingRequest>> {
        match self {
            Command::Batch(args) => batch::load(&args.file),
            other => Ok(other.request().into_iter().collect()),
        }
    }
}

/// Executes `requests` in order on one session configured by `config`.
pub fn execute(requests: &[SamplingRequest], config: &CliConfig) -> Result<Vec<Report>> {
    let mut sampler = Sampler::new(config.sampler_config()?);
    let seed = sampler.seed();
    info!(seed, requests = requests.len(), "Sampling session started");

    requests
        .iter()
        .map(|request| {
            info!(%request, "Executing request");
            let output = sampler.execute(request)?;
            Ok(Report::new(request.clone(), seed, output))
        })
        .collect()
}

/// Runs `command` and renders its reports to `writer`.
pub fn run<W: Write>(command: &Command, config: &CliConfig, writer: &mut W) -> Result<()> {
    let requests = command.requests()?;
    let reports = execute(&requests, config)?;
    report::render(writer, &reports, config.format, config.bins)?;
    info!(reports = reports.len(), format = %config.format, "Output rendered");
    Ok(())
}
