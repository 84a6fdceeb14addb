//! # sampler_cli: Command-Line Front End for sampler_engine
//!
//! Runs sampling requests from the command line or a batch file and renders
//! the results for a human (text table with histogram or bar chart) or for a
//! plotting collaborator (JSON, CSV).
//!
//! # Commands
//!
//! - `sampler bernoulli` - success/failure counts
//! - `sampler binomial` - per-replicate success counts
//! - `sampler multinomial-fixed` - counts over equally-likely categories
//! - `sampler multinomial-dynamic` - counts over weighted categories
//! - `sampler exponential` - exponential variates
//! - `sampler batch --file <requests.toml>` - many requests, one session
//!
//! Defaults reproduce the reference runs (θ = 0.5, n = 100 000, k = 1000 for
//! the binomial; six slices, n = 1000, k = 20 for the multinomials; λ = 2).
//!
//! # Configuration
//!
//! Priority (highest to lowest): command-line flags, `SAMPLER_*` environment
//! variables, the TOML file given by `--config`, built-in defaults.

pub mod cli;
pub mod commands;
pub mod config;
pub mod report;

mod error;

pub use error::{CliError, Result};
