//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Command;
use crate::config::CliArgs;

/// Seedable random-variate sampler
#[derive(Parser, Debug)]
#[command(name = "sampler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "SAMPLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session seed; drawn from OS entropy and reported when omitted
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Treatment of weighted categories that do not sum to one
    /// (reject, normalize, discard)
    #[arg(long, global = true)]
    pub remainder_policy: Option<String>,

    /// Fixed histogram bin count for table output
    #[arg(long, global = true)]
    pub bins: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Overrides for the configuration layer
    pub fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            seed: self.seed,
            log_level: self.log_level.clone(),
            remainder_policy: self.remainder_policy.clone(),
            format: self.format.clone(),
            bins: self.bins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampler_engine::SamplingRequest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sampler").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_reference_defaults() {
        let cli = parse(&["binomial"]);
        assert_eq!(
            cli.command.request(),
            Some(SamplingRequest::Binomial {
                theta: 0.5,
                n: 100_000,
                k: 1000
            })
        );

        let cli = parse(&["multinomial-dynamic"]);
        assert_eq!(
            cli.command.request(),
            Some(SamplingRequest::MultinomialDynamic {
                thetas: vec![0.1, 0.1, 0.5, 0.1, 0.2],
                n: 1000,
                k: 20
            })
        );
    }

    #[test]
    fn test_subcommand_arguments() {
        let cli = parse(&["exponential", "--lambda", "0.5", "--trials", "10"]);
        assert_eq!(
            cli.command.request(),
            Some(SamplingRequest::Exponential { lambda: 0.5, n: 10 })
        );

        let cli = parse(&["multinomial-fixed", "--slices", "3", "--trials", "9", "--replicates", "2"]);
        assert_eq!(
            cli.command.request(),
            Some(SamplingRequest::MultinomialFixed { slices: 3, n: 9, k: 2 })
        );

        let cli = parse(&["multinomial-dynamic", "--thetas", "0.25,0.75"]);
        assert!(matches!(
            cli.command.request(),
            Some(SamplingRequest::MultinomialDynamic { thetas, .. }) if thetas == vec![0.25, 0.75]
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["bernoulli", "--seed", "42", "--format", "json", "--bins", "8"]);
        let args = cli.config_args();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.format.as_deref(), Some("json"));
        assert_eq!(args.bins, Some(8));
    }

    #[test]
    fn test_batch_has_no_single_request() {
        let cli = parse(&["batch", "--file", "requests.toml"]);
        assert_eq!(cli.command.request(), None);
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["sampler", "poisson"]).is_err());
    }
}
