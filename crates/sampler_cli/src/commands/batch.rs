//! `batch` subcommand
//!
//! Reads a TOML file of `[[request]]` tables, each tagged with its
//! `distribution`:
//!
//! ```toml
//! [[request]]
//! distribution = "binomial"
//! theta = 0.5
//! n = 100000
//! k = 1000
//!
//! [[request]]
//! distribution = "multinomial-dynamic"
//! thetas = [0.1, 0.1, 0.5, 0.1, 0.2]
//! n = 1000
//! k = 20
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use sampler_engine::SamplingRequest;
use serde::Deserialize;
use tracing::debug;

use crate::{CliError, Result};

/// Arguments of `sampler batch`
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// TOML file listing `[[request]]` tables
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchFile {
    #[serde(default)]
    request: Vec<SamplingRequest>,
}

/// Reads and validates the requests in `path`.
pub fn load(path: &Path) -> Result<Vec<SamplingRequest>> {
    debug!(path = %path.display(), "Loading batch file");
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Parses and validates batch file content.
///
/// Every request is validated up front so a bad entry late in the file
/// fails the batch before anything is sampled.
pub fn parse(content: &str) -> Result<Vec<SamplingRequest>> {
    let batch: BatchFile = toml::from_str(content)?;
    if batch.request.is_empty() {
        return Err(CliError::InvalidArgument(
            "batch file contains no [[request]] tables".to_string(),
        ));
    }

    for (index, request) in batch.request.iter().enumerate() {
        request.validate().map_err(|err| {
            CliError::InvalidArgument(format!("request {} ({}): {}", index + 1, request, err))
        })?;
    }
    Ok(batch.request)
}
