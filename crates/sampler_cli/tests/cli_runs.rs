//! End-to-end runs of the CLI pipeline: argument parsing, configuration
//! layering, sampling and rendering into an in-memory writer.

use std::io::Write;

use clap::Parser;
use sampler_cli::cli::Cli;
use sampler_cli::commands;
use sampler_cli::config::build_config_with;
use sampler_cli::CliError;
use tempfile::NamedTempFile;

fn no_env(_: &str) -> Option<String> {
    None
}

fn run(args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("sampler").chain(args.iter().copied()))
        .map_err(|err| CliError::InvalidArgument(err.to_string()))?;
    let config = build_config_with(&cli.config_args(), no_env)?;

    let mut out = Vec::new();
    commands::run(&cli.command, &config, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_binomial_json_reference_run() {
    let text = run(&["binomial", "--seed", "42", "--format", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["seed"], 42);
    assert_eq!(value["request"]["distribution"], "binomial");
    assert_eq!(value["output"]["data"].as_array().map(Vec::len), Some(1000));

    let mean = value["summary"]["mean"].as_f64().unwrap();
    assert!((mean - 50_000.0).abs() < 50.0, "mean = {}", mean);
}

#[test]
fn test_same_seed_same_output() {
    let args = ["multinomial-dynamic", "--seed", "7", "--format", "csv", "-n", "200"];
    assert_eq!(run(&args).unwrap(), run(&args).unwrap());
}

#[test]
fn test_multinomial_fixed_csv_rows() {
    let text = run(&[
        "multinomial-fixed",
        "--seed",
        "1",
        "--format",
        "csv",
        "--slices",
        "4",
        "--replicates",
        "3",
    ])
    .unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "distribution,replicate,category_0,category_1,category_2,category_3"
    );
    for line in &lines[1..] {
        let total: u64 = line
            .split(',')
            .skip(2)
            .map(|field| field.parse::<u64>().unwrap())
            .sum();
        assert_eq!(total, 1000);
    }
}

#[test]
fn test_uncovered_mass_reports_discarded_draws() {
    let text = run(&[
        "multinomial-dynamic",
        "--thetas",
        "0.25,0.25",
        "-n",
        "1000",
        "-k",
        "4",
        "--seed",
        "1",
        "--format",
        "json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let discarded = value["summary"]["discarded"].as_u64().unwrap();
    assert_eq!(value["output"]["data"]["discarded"].as_u64(), Some(discarded));
    let counted: u64 = value["output"]["data"]["counts"]["counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|count| count.as_u64().unwrap())
        .sum();
    assert!(discarded > 0);
    assert_eq!(counted + discarded, 4000);

    let text = run(&["multinomial-dynamic", "--thetas", "0.25,0.25", "--seed", "1"]).unwrap();
    assert!(text.contains("discarded:"), "{}", text);
}

#[test]
fn test_exponential_table_output() {
    let text = run(&["exponential", "--seed", "3", "--trials", "5000", "--bins", "10"]).unwrap();
    assert!(text.starts_with("exponential(lambda=2, n=5000) (seed 3)"));
    assert!(text.contains("histogram (10 bins):"));
}

#[test]
fn test_config_file_and_flags() {
    let config = temp_file("seed = 11\nformat = \"csv\"\nremainder_policy = \"reject\"\n");
    let path = config.path().to_str().unwrap();

    // Reject policy from the file refuses probabilities that do not sum to one.
    let err = run(&["--config", path, "multinomial-dynamic", "--thetas", "0.2,0.2"]).unwrap_err();
    assert!(matches!(err, CliError::Sampling(_)));

    // The flag overrides the file.
    let text = run(&[
        "--config",
        path,
        "multinomial-dynamic",
        "--thetas",
        "0.2,0.2",
        "--remainder-policy",
        "normalize",
    ])
    .unwrap();
    assert!(text.starts_with("distribution,replicate,category_0,category_1"));
}

#[test]
fn test_batch_runs_on_one_session() {
    let batch = temp_file(
        r#"
        [[request]]
        distribution = "bernoulli"
        theta = 0.5
        n = 1000

        [[request]]
        distribution = "exponential"
        lambda = 2.0
        n = 100
        "#,
    );
    let path = batch.path().to_str().unwrap();

    let text = run(&["batch", "--file", path, "--seed", "5", "--format", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["output"]["kind"], "bernoulli");
    assert_eq!(reports[1]["output"]["kind"], "exponential");
    assert!(reports.iter().all(|r| r["seed"] == 5));
}

#[test]
fn test_invalid_parameters_surface_as_sampling_errors() {
    let err = run(&["binomial", "--theta", "1.5"]).unwrap_err();
    assert!(err.to_string().contains("theta"), "{}", err);

    let err = run(&["bernoulli", "--trials", "-1"]).unwrap_err();
    assert!(matches!(err, CliError::Sampling(_)));
}

#[test]
fn test_invalid_format_is_a_config_error() {
    let err = run(&["bernoulli", "--format", "xml"]).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}
