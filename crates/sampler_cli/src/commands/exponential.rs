//! `exponential` subcommand

use clap::Args;
use sampler_engine::SamplingRequest;

/// Arguments of `sampler exponential`
#[derive(Args, Debug, Clone)]
pub struct ExponentialArgs {
    /// Rate parameter
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub lambda: f64,

    /// Number of variates
    #[arg(short = 'n', long, default_value_t = 100_000, allow_negative_numbers = true)]
    pub trials: i32,
}

impl ExponentialArgs {
    /// Request described by these arguments
    pub fn request(&self) -> SamplingRequest {
        SamplingRequest::Exponential {
            lambda: self.lambda,
            n: self.trials,
        }
    }
}
