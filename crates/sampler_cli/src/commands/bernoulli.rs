//! `bernoulli` subcommand

use clap::Args;
use sampler_engine::SamplingRequest;

/// Arguments of `sampler bernoulli`
#[derive(Args, Debug, Clone)]
pub struct BernoulliArgs {
    /// Success probability
    #[arg(long, default_value_t = 0.5)]
    pub theta: f64,

    /// Number of trials
    #[arg(short = 'n', long, default_value_t = 100_000, allow_negative_numbers = true)]
    pub trials: i32,
}

impl BernoulliArgs {
    /// Request described by these arguments
    pub fn request(&self) -> SamplingRequest {
        SamplingRequest::Bernoulli {
            theta: self.theta,
            n: self.trials,
        }
    }
}
