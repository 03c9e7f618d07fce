//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a TOML configuration from a string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a TOML configuration (CLI takes precedence)
///
/// Flags left at their clap defaults do not override file values, except for
/// the record count and layout, which the CLI always pins (their defaults are
/// meaningful run parameters).
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Workload overrides
    config.workload.layout = cli_convert::convert_layout(cli.layout);
    if cli.passes != 3 {
        config.workload.passes = cli.passes;
    }

    // Dataset overrides
    if cli.records != "1m" {
        config.dataset.records = cli_convert::parse_count(&cli.records)?;
    }

    // Worker overrides
    if let Some(threads) = cli.threads {
        config.workers.threads = threads;
    }

    // Output overrides
    if cli.json_output.is_some() {
        config.output.json_output = cli.json_output.clone();
    }
    if cli.csv_output.is_some() {
        config.output.csv_output = cli.csv_output.clone();
    }
    if cli.show_latency {
        config.output.show_latency = true;
    }
    if cli.show_percentiles {
        config.output.show_percentiles = true;
    }
    if cli.per_worker {
        config.output.per_worker_output = true;
    }
    if cli.verbose > 0 {
        config.output.verbosity = cli.verbose;
    }

    // Runtime overrides
    if cli.verify {
        config.runtime.verify = true;
    }
    if cli.seed.is_some() {
        config.runtime.seed = cli.seed;
    }
    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const SAMPLE: &str = r#"
        [workload]
        layout = "columns"
        passes = 5

        [dataset]
        records = 250000

        [workers]
        threads = 8

        [output]
        show_latency = true

        [runtime]
        seed = 99
    "#;

    #[test]
    fn test_parse_toml_string() {
        let config = parse_toml_string(SAMPLE).unwrap();
        assert_eq!(config.workload.layout, LayoutMode::Columns);
        assert_eq!(config.workload.passes, 5);
        assert_eq!(config.dataset.records, 250_000);
        assert_eq!(config.workers.threads, 8);
        assert!(config.output.show_latency);
        assert_eq!(config.runtime.seed, Some(99));
    }

    #[test]
    fn test_parse_toml_defaults_optional_sections() {
        let config = parse_toml_string(
            r#"
            [workload]
            [dataset]
            records = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.workload.layout, LayoutMode::Both);
        assert_eq!(config.workload.passes, 3);
        assert!(!config.runtime.verify);
    }

    #[test]
    fn test_parse_toml_rejects_garbage() {
        assert!(parse_toml_string("not valid toml [").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = parse_toml_string(SAMPLE).unwrap();
        let cli = Cli::parse_from([
            "layoutpulse",
            "--records",
            "10k",
            "--layout",
            "records",
            "--threads",
            "2",
            "--verify",
        ]);
        let merged = merge_cli_with_config(&cli, config).unwrap();

        assert_eq!(merged.dataset.records, 10_000);
        assert_eq!(merged.workload.layout, LayoutMode::Records);
        assert_eq!(merged.workers.threads, 2);
        assert!(merged.runtime.verify);
        // File value survives where the CLI stayed at its default
        assert_eq!(merged.workload.passes, 5);
        assert_eq!(merged.runtime.seed, Some(99));
    }

    #[test]
    fn test_parse_toml_file_missing() {
        assert!(parse_toml_file(Path::new("/nonexistent/layoutpulse.toml")).is_err());
    }

    #[test]
    fn test_parse_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = parse_toml_file(&path).unwrap();
        assert_eq!(config.dataset.records, 250_000);
    }
}
