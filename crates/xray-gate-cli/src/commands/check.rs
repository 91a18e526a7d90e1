//! Check command - validate that images look like chest radiographs.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use xray_gate_adapters::FsImageSource;
use xray_gate_core::checks::{GrayscaleConfig, IntensityConfig, SizeConfig};
use xray_gate_core::{
    ImageSource, ProgressEvent, ProgressSink, Rejection, ResultOutput, ValidationResult,
    ValidatorConfig, Verdict, XrayValidator,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse and validate a normalized threshold (0.0-1.0).
fn parse_unit(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Shared arguments for image validation.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Files or directories to validate
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Minimum width and height in pixels
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub min_dimension: Option<u32>,

    /// Largest tolerated difference between color channels (0-255)
    #[arg(long, value_name = "N")]
    pub max_channel_diff: Option<u8>,

    /// Lowest accepted mean intensity (0.0-1.0)
    #[arg(long, value_parser = parse_unit)]
    pub min_mean: Option<f64>,

    /// Highest accepted mean intensity (0.0-1.0)
    #[arg(long, value_parser = parse_unit)]
    pub max_mean: Option<f64>,

    /// Lowest accepted intensity standard deviation (0.0-1.0)
    #[arg(long, value_parser = parse_unit)]
    pub min_std_dev: Option<f64>,

    /// Highest accepted intensity standard deviation (0.0-1.0)
    #[arg(long, value_parser = parse_unit)]
    pub max_std_dev: Option<f64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Built-in defaults (see [`CheckArgs::validator_config`])
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        let v = &config.validator;
        args.min_dimension = args.min_dimension.or(v.min_dimension);
        args.max_channel_diff = args.max_channel_diff.or(v.max_channel_diff);
        args.min_mean = args.min_mean.or(v.min_mean);
        args.max_mean = args.max_mean.or(v.max_mean);
        args.min_std_dev = args.min_std_dev.or(v.min_std_dev);
        args.max_std_dev = args.max_std_dev.or(v.max_std_dev);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Thresholds with unset values taken from the built-in defaults.
    pub fn validator_config(&self) -> ValidatorConfig {
        let size = SizeConfig::default();
        let grayscale = GrayscaleConfig::default();
        let intensity = IntensityConfig::default();

        ValidatorConfig {
            size: SizeConfig {
                min_dimension: self.min_dimension.unwrap_or(size.min_dimension),
            },
            grayscale: GrayscaleConfig {
                max_channel_diff: self.max_channel_diff.unwrap_or(grayscale.max_channel_diff),
            },
            intensity: IntensityConfig {
                min_mean: self.min_mean.unwrap_or(intensity.min_mean),
                max_mean: self.max_mean.unwrap_or(intensity.max_mean),
                min_std_dev: self.min_std_dev.unwrap_or(intensity.min_std_dev),
                max_std_dev: self.max_std_dev.unwrap_or(intensity.max_std_dev),
            },
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Counts exposed for programmatic use
pub struct CheckResult {
    /// Number of images accepted.
    pub accepted: usize,
    /// Number of images rejected, including unreadable ones.
    pub rejected: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let config = args.validator_config();
    config.validate().context("Invalid validator thresholds")?;
    let validator = XrayValidator::new(config);
    debug!("Checks: {}", validator.check_names().join(", "));

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    process_images(
        &source,
        &validator,
        &output,
        &progress_bar,
        args.format(),
        args.pretty,
    )
}

/// Validate every image of `source`, writing one result per file.
fn process_images(
    source: &dyn ImageSource,
    validator: &XrayValidator,
    output: &JsonOutput,
    progress: &dyn ProgressSink,
    format: OutputFormat,
    pretty: bool,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut accepted = 0usize;
    let mut rejected = 0usize;
    let mut all_results: Vec<ValidationResult> = Vec::new();

    for (index, item) in source.images().enumerate() {
        progress.on_event(ProgressEvent::Started {
            path: item.path.clone(),
            index,
            total,
        });

        let result = match item.image {
            Ok(image) => ValidationResult::new(
                item.path,
                iso_timestamp(),
                Some(image.dimensions()),
                validator.validate(&image.image),
            ),
            Err(e) => {
                debug!("Failed to load {}: {e:#}", item.path);
                ValidationResult::new(
                    item.path,
                    iso_timestamp(),
                    None,
                    Verdict::Rejected(Rejection::decode(&e)),
                )
            }
        };

        if result.is_accepted() {
            accepted += 1;
        } else {
            rejected += 1;
        }

        progress.on_event(ProgressEvent::Completed {
            result: result.clone(),
        });

        match format {
            OutputFormat::Jsonl => output.write(&result)?,
            OutputFormat::Json => all_results.push(result),
        }
    }

    if format == OutputFormat::Json {
        output.write_array(&all_results, pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { accepted, rejected });
    info!("{accepted} accepted, {rejected} rejected");

    let exit_code = if rejected > 0 {
        ExitCode::Rejected
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        accepted,
        rejected,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use xray_gate_test_support::{MockImageSource, MockProgressSink, SyntheticImageBuilder};

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn parse(argv: &[&str]) -> CheckArgs {
        let mut full = vec!["xray-gate"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    #[test]
    fn test_defaults_match_validator_defaults() {
        let config = parse(&["a.png"]).validator_config();
        assert_eq!(config.size.min_dimension, 200);
        assert_eq!(config.grayscale.max_channel_diff, 30);
        assert!((config.intensity.min_mean - 0.2).abs() < f64::EPSILON);
        assert!((config.intensity.max_std_dev - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_beats_config() {
        let mut file = AppConfig::default();
        file.validator.min_dimension = Some(512);
        file.validator.min_mean = Some(0.3);
        file.general.recursive = Some(true);

        let args = CheckArgs::with_config(parse(&["--min-dimension", "64", "a.png"]), &file);
        let config = args.validator_config();

        assert_eq!(config.size.min_dimension, 64);
        assert!((config.intensity.min_mean - 0.3).abs() < f64::EPSILON);
        assert!(args.recursive);
    }

    #[test]
    fn test_config_output_format() {
        let mut file = AppConfig::default();
        file.output.format = Some("json".into());

        let args = CheckArgs::with_config(parse(&["a.png"]), &file);
        assert_eq!(args.format(), OutputFormat::Json);

        let args = CheckArgs::with_config(parse(&["--format", "jsonl", "a.png"]), &file);
        assert_eq!(args.format(), OutputFormat::Jsonl);
    }

    #[test]
    fn test_parse_unit() {
        assert!(parse_unit("0.0").is_ok());
        assert!(parse_unit("1").is_ok());
        assert!(parse_unit("1.01").is_err());
        assert!(parse_unit("bright").is_err());
    }

    #[test]
    fn test_process_images_counts_and_events() {
        let source = MockImageSource::new(vec![
            SyntheticImageBuilder::radiograph_like(256, 256),
            SyntheticImageBuilder::thumbnail(),
        ])
        .with_failure("broken.png", "truncated file");
        let progress = MockProgressSink::new();
        let output = JsonOutput::new(Box::new(std::io::sink()));

        let result = process_images(
            &source,
            &XrayValidator::default(),
            &output,
            &progress,
            OutputFormat::Jsonl,
            false,
        )
        .unwrap_or_else(|e| panic!("{e:#}"));

        assert_eq!(result.accepted, 1);
        assert_eq!(result.rejected, 2);
        assert_eq!(result.exit_code, ExitCode::Rejected);
        assert_eq!(progress.started_count(), 3);
        assert_eq!(progress.completed_count(), 3);
        assert_eq!(progress.finished_counts(), Some((1, 2)));
    }

    #[test]
    fn test_process_images_all_accepted() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::rgb_radiograph_like(300, 300)]);
        let output = JsonOutput::new(Box::new(std::io::sink()));

        let result = process_images(
            &source,
            &XrayValidator::default(),
            &output,
            &MockProgressSink::new(),
            OutputFormat::Json,
            true,
        )
        .unwrap_or_else(|e| panic!("{e:#}"));

        assert_eq!(result.exit_code, ExitCode::Success);
    }
}
