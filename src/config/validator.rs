//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
///
/// Runs the per-section checks, then the cross-field checks no single
/// section can see.
pub fn validate_config(config: &Config) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // More threads than records leaves trailing workers with empty chunks.
    // Legal, but almost certainly a misconfigured benchmark.
    if config.workers.threads > config.dataset.records {
        anyhow::bail!(
            "more worker threads ({}) than records ({}); trailing workers would receive empty chunks",
            config.workers.threads,
            config.dataset.records
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            workload: WorkloadConfig {
                layout: LayoutMode::Both,
                passes: 1,
            },
            dataset: DatasetConfig { records: 100 },
            workers: WorkerConfig { threads: 4 },
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }

    #[test]
    fn test_accepts_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_rejects_more_threads_than_records() {
        let mut config = base_config();
        config.dataset.records = 2;
        config.workers.threads = 4;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_section_errors() {
        let mut config = base_config();
        config.workload.passes = 0;
        assert!(validate_config(&config).is_err());
    }
}
