//! LayoutPulse CLI entry point

use anyhow::{Context, Result};
use layoutpulse::config::{
    cli::Cli, cli_convert, toml as config_toml, validator, Config, DatasetConfig, OutputConfig,
    RuntimeConfig, WorkerConfig, WorkloadConfig,
};
use layoutpulse::coordinator::Coordinator;
use layoutpulse::output;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("LayoutPulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Memory-layout profiling tool");
    println!();

    // Parse CLI arguments
    let cli = Cli::parse_args();
    cli.validate()?;

    // Build configuration: file first (if given), CLI flags take precedence
    let config = if let Some(ref path) = cli.config {
        let file_config = config_toml::parse_toml_file(path)?;
        config_toml::merge_cli_with_config(&cli, file_config)?
    } else {
        build_config_from_cli(&cli)?
    };

    // Validate configuration (includes cross-field checks)
    validator::validate_config(&config).context("Configuration validation failed")?;

    // Display configuration
    print!("{}", config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    println!("Starting benchmark...");
    println!();

    let config = Arc::new(config);
    let results = Coordinator::new(config.clone())
        .run()
        .context("Benchmark run failed")?;

    output::text::print_results(&results, &config);

    if let Some(ref path) = config.output.json_output {
        let report = output::json::build_report(&results, &config);
        output::json::write_report(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    if let Some(ref path) = config.output.csv_output {
        output::csv::write_report(path, &results, &config)?;
        println!("CSV report written to {}", path.display());
    }

    Ok(())
}

/// Build configuration from CLI arguments alone
fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let records = cli_convert::parse_count(&cli.records).context("Invalid record count")?;

    Ok(Config {
        workload: WorkloadConfig {
            layout: cli_convert::convert_layout(cli.layout),
            passes: cli.passes,
        },
        dataset: DatasetConfig { records },
        workers: WorkerConfig {
            threads: cli.threads.unwrap_or_else(num_cpus::get),
        },
        output: OutputConfig {
            json_output: cli.json_output.clone(),
            csv_output: cli.csv_output.clone(),
            show_latency: cli.show_latency,
            show_percentiles: cli.show_percentiles,
            per_worker_output: cli.per_worker,
            verbosity: cli.verbose,
        },
        runtime: RuntimeConfig {
            verify: cli.verify,
            seed: cli.seed,
            dry_run: cli.dry_run,
            debug: cli.debug,
        },
    })
}
