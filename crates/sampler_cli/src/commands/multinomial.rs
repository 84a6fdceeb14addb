//! `multinomial-fixed` and `multinomial-dynamic` subcommands

use clap::Args;
use sampler_engine::SamplingRequest;

/// Arguments of `sampler multinomial-fixed`
#[derive(Args, Debug, Clone)]
pub struct MultinomialFixedArgs {
    /// Number of equally-likely categories
    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    pub slices: i32,

    /// Draws per replicate
    #[arg(short = 'n', long, default_value_t = 1000, allow_negative_numbers = true)]
    pub trials: i32,

    /// Number of replicates
    #[arg(short = 'k', long, default_value_t = 20, allow_negative_numbers = true)]
    pub replicates: i32,
}

impl MultinomialFixedArgs {
    /// Request described by these arguments
    pub fn request(&self) -> SamplingRequest {
        SamplingRequest::MultinomialFixed {
            slices: self.slices,
            n: self.trials,
            k: self.replicates,
        }
    }
}

/// Arguments of `sampler multinomial-dynamic`
#[derive(Args, Debug, Clone)]
pub struct MultinomialDynamicArgs {
    /// Comma-separated category probabilities
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [0.1, 0.1, 0.5, 0.1, 0.2],
        allow_negative_numbers = true
    )]
    pub thetas: Vec<f64>,

    /// Draws per replicate
    #[arg(short = 'n', long, default_value_t = 1000, allow_negative_numbers = true)]
    pub trials: i32,

    /// Number of replicates
    #[arg(short = 'k', long, default_value_t = 20, allow_negative_numbers = true)]
    pub replicates: i32,
}

impl MultinomialDynamicArgs {
    /// Request described by these arguments
    pub fn request(&self) -> SamplingRequest {
        SamplingRequest::MultinomialDynamic {
            thetas: self.thetas.clone(),
            n: self.trials,
            k: self.replicates,
        }
    }
}
