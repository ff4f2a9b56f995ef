mod output;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use output::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Validate a Pod manifest
#[derive(Parser, Debug)]
#[command(name = "validate-pod")]
#[command(version)]
#[command(about = "Check a Pod manifest and report every schema violation", long_about = None)]
struct Args {
    /// Path to the manifest to validate
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Diagnostic output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level for messages on stderr (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // usage errors exit 1, not clap's default 2
            let _ = e.print();
            process::exit(1);
        }
    };

    init_tracing(args.log_level.as_deref());

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!(
            "validate_pod={level},pod_validation={level},pod_yaml={level}"
        )),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "validate_pod=warn,pod_validation=warn".into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Validate one manifest and return the process exit code.
fn run(args: &Args) -> Result<i32> {
    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read file {}", args.input.display()))?;

    let filename = display_name(&args.input);
    tracing::debug!(path = %args.input.display(), bytes = content.len(), "read manifest");

    let report = pod_validation::validate_str(&content, &filename)
        .with_context(|| format!("cannot parse file {}", args.input.display()))?;

    output::print_report(&report, args.format)?;
    Ok(report.exit_code())
}

/// Diagnostics are prefixed with the file's base name only.
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_base_name() {
        assert_eq!(display_name(Path::new("/srv/manifests/pod.yaml")), "pod.yaml");
        assert_eq!(display_name(Path::new("pod.yaml")), "pod.yaml");
    }

    #[test]
    fn test_args_require_exactly_one_file() {
        assert!(Args::try_parse_from(["validate-pod"]).is_err());
        assert!(Args::try_parse_from(["validate-pod", "a.yaml", "b.yaml"]).is_err());

        let args = Args::try_parse_from(["validate-pod", "a.yaml"]).unwrap();
        assert_eq!(args.input, PathBuf::from("a.yaml"));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_format_flag() {
        let args = Args::try_parse_from(["validate-pod", "--format", "json", "a.yaml"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }
}
