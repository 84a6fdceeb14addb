//! `binomial` subcommand

use clap::Args;
use sampler_engine::SamplingRequest;

/// Arguments of `sampler binomial`
#[derive(Args, Debug, Clone)]
pub struct BinomialArgs {
    /// Success probability per trial
    #[arg(long, default_value_t = 0.5)]
    pub theta: f64,

    /// Trials per replicate
    #[arg(short = 'n', long, default_value_t = 100_000, allow_negative_numbers = true)]
    pub trials: i32,

    /// Number of replicates
    #[arg(short = 'k', long, default_value_t = 1000, allow_negative_numbers = true)]
    pub replicates: i32,
}

impl BinomialArgs {
    /// Request described by these arguments
    pub fn request(&self) -> SamplingRequest {
        SamplingRequest::Binomial {
            theta: self.theta,
            n: self.trials,
            k: self.replicates,
        }
    }
}
