//! Result rendering: text tables, JSON documents and CSV rows.
//!
//! Every writer targets an `impl Write`, so the binary can point it at stdout
//! or a file and tests can point it at a `Vec<u8>`.

use std::io::Write;

use sampler_engine::stats::{Histogram, SampleSummary};
use sampler_engine::{ResultBuffer, SamplingRequest};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Width of the longest bar in table output.
const BAR_WIDTH: usize = 50;

/// Descriptive numbers attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    /// Bernoulli counters.
    Proportion {
        /// Trials that succeeded.
        successes: u64,
        /// Trials that failed.
        failures: u64,
        /// `successes / trials`; zero for zero trials.
        proportion: f64,
    },
    /// Moments of per-replicate counts or of variates.
    Sample(SampleSummary),
    /// Mean count per category across replicates.
    Categories {
        /// One mean per category.
        column_means: Vec<f64>,
        /// Draws across all replicates that no category counted.
        discarded: u64,
    },
}

impl Summary {
    /// Summarises a filled buffer; `None` when there is nothing to summarise.
    pub fn of(output: &ResultBuffer) -> Option<Self> {
        match output {
            ResultBuffer::Bernoulli(counts) => {
                let trials = counts.trials();
                let proportion = if trials == 0 {
                    0.0
                } else {
                    counts.successes as f64 / trials as f64
                };
                Some(Summary::Proportion {
                    successes: counts.successes,
                    failures: counts.failures,
                    proportion,
                })
            }
            ResultBuffer::Binomial(values) => SampleSummary::from_counts(values).map(Summary::Sample),
            ResultBuffer::Exponential(values) => {
                SampleSummary::from_values(values).map(Summary::Sample)
            }
            ResultBuffer::Multinomial { counts, discarded } => Some(Summary::Categories {
                column_means: counts.column_means(),
                discarded: *discarded,
            }),
        }
    }
}

/// One executed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// What was sampled.
    pub request: SamplingRequest,
    /// Seed of the session that produced `output`.
    pub seed: u64,
    /// The filled buffer.
    pub output: ResultBuffer,
    /// Descriptive numbers for `output`.
    pub summary: Option<Summary>,
}

impl Report {
    /// Bundles a request with its output and computes the summary.
    pub fn new(request: SamplingRequest, seed: u64, output: ResultBuffer) -> Self {
        let summary = Summary::of(&output);
        Self {
            request,
            seed,
            output,
            summary,
        }
    }
}

/// Writes `reports` in `format`.
///
/// `bins` fixes the histogram bin count for table output; `None` chooses it
/// automatically.
pub fn render<W: Write>(
    writer: &mut W,
    reports: &[Report],
    format: OutputFormat,
    bins: Option<usize>,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for (index, report) in reports.iter().enumerate() {
                if index > 0 {
                    writeln!(writer)?;
                }
                write_table(writer, report, bins)?;
            }
        }
        OutputFormat::Json => write_json(writer, reports)?,
        OutputFormat::Csv => write_csv(writer, reports)?,
    }
    writer.flush()?;
    Ok(())
}

/// Writes a summary and a text chart for one report.
pub fn write_table<W: Write>(writer: &mut W, report: &Report, bins: Option<usize>) -> Result<()> {
    writeln!(writer, "{} (seed {})", report.request, report.seed)?;

    match &report.summary {
        Some(Summary::Proportion {
            successes,
            failures,
            proportion,
        }) => {
            writeln!(writer, "  successes:  {}", successes)?;
            writeln!(writer, "  failures:   {}", failures)?;
            writeln!(writer, "  proportion: {:.6}", proportion)?;
        }
        Some(Summary::Sample(summary)) => {
            writeln!(writer, "  count:    {}", summary.count)?;
            writeln!(writer, "  mean:     {:.6}", summary.mean)?;
            writeln!(writer, "  variance: {:.6}", summary.variance)?;
            writeln!(writer, "  std dev:  {:.6}", summary.std_dev)?;
            writeln!(writer, "  min:      {}", summary.min)?;
            writeln!(writer, "  max:      {}", summary.max)?;
        }
        Some(Summary::Categories { discarded, .. }) => {
            if *discarded > 0 {
                writeln!(
                    writer,
                    "  discarded:  {} draws outside the declared categories",
                    discarded
                )?;
            }
        }
        None => {}
    }

    match &report.output {
        ResultBuffer::Bernoulli(counts) => {
            let labels = ["success".to_string(), "failure".to_string()];
            let values = [counts.successes as f64, counts.failures as f64];
            write_bars(writer, &labels, &values)?;
        }
        ResultBuffer::Multinomial { counts, .. } => {
            let means = counts.column_means();
            let labels: Vec<String> = (0..means.len()).map(|c| format!("category {}", c)).collect();
            writeln!(writer, "  mean count per category over {} replicates:", counts.rows())?;
            write_bars(writer, &labels, &means)?;
        }
        output @ (ResultBuffer::Binomial(_) | ResultBuffer::Exponential(_)) => {
            let data = output.to_f64_vec();
            if data.is_empty() {
                writeln!(writer, "  (no values)")?;
                return Ok(());
            }
            let histogram = match bins {
                Some(bins) => Histogram::with_bins(&data, bins)?,
                None => Histogram::auto(&data),
            };
            write_histogram(writer, &histogram)?;
        }
    }
    Ok(())
}

fn write_histogram<W: Write>(writer: &mut W, histogram: &Histogram) -> Result<()> {
    let labels: Vec<String> = histogram
        .edges
        .windows(2)
        .map(|edge| format!("[{:.4}, {:.4})", edge[0], edge[1]))
        .collect();
    let values: Vec<f64> = histogram.counts.iter().map(|&c| c as f64).collect();
    writeln!(writer, "  histogram ({} bins):", histogram.bins())?;
    write_bars(writer, &labels, &values)
}

fn write_bars<W: Write>(writer: &mut W, labels: &[String], values: &[f64]) -> Result<()> {
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let peak = values.iter().copied().fold(0.0, f64::max);

    for (label, &value) in labels.iter().zip(values) {
        let length = if peak > 0.0 {
            ((value / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            writer,
            "  {:>width$} | {:<bar$} {}",
            label,
            "#".repeat(length),
            value,
            width = label_width,
            bar = BAR_WIDTH
        )?;
    }
    Ok(())
}

/// Writes one pretty-printed JSON document for a single report, or an array
/// for several.
pub fn write_json<W: Write>(writer: &mut W, reports: &[Report]) -> Result<()> {
    match reports {
        [single] => serde_json::to_writer_pretty(&mut *writer, single)?,
        many => serde_json::to_writer_pretty(&mut *writer, many)?,
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes one header row per report followed by one row per value or
/// replicate.
pub fn write_csv<W: Write>(writer: &mut W, reports: &[Report]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for report in reports {
        let distribution = report.request.kind().as_str();
        match &report.output {
            ResultBuffer::Bernoulli(counts) => {
                csv.write_record(["distribution", "outcome", "count"])?;
                let successes = counts.successes.to_string();
                let failures = counts.failures.to_string();
                csv.write_record([distribution, "success", successes.as_str()])?;
                csv.write_record([distribution, "failure", failures.as_str()])?;
            }
            ResultBuffer::Binomial(values) => {
                csv.write_record(["distribution", "replicate", "successes"])?;
                for (replicate, value) in values.iter().enumerate() {
                    let (replicate, value) = (replicate.to_string(), value.to_string());
                    csv.write_record([distribution, replicate.as_str(), value.as_str()])?;
                }
            }
            ResultBuffer::Multinomial { counts, .. } => {
                let mut header = vec!["distribution".to_string(), "replicate".to_string()];
                header.extend((0..counts.cols()).map(|c| format!("category_{}", c)));
                csv.write_record(&header)?;
                for (replicate, row) in counts.iter_rows().enumerate() {
                    let mut record = vec![distribution.to_string(), replicate.to_string()];
                    record.extend(row.iter().map(u64::to_string));
                    csv.write_record(&record)?;
                }
            }
            ResultBuffer::Exponential(values) => {
                csv.write_record(["distribution", "index", "value"])?;
                for (index, value) in values.iter().enumerate() {
                    let (index, value) = (index.to_string(), value.to_string());
                    csv.write_record([distribution, index.as_str(), value.as_str()])?;
                }
            }
        }
    }
    csv.flush()?;
    Ok(())
}
