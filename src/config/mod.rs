mod file_config;

pub use file_config::{FileConfig, ReportConfig};

use crate::catalog::{CatalogSource, FetchOptions};
use crate::report::DEFAULT_REPORT_TITLE;
use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Relative paths are taken from the current working directory, both on the
/// command line and in the config file.
pub fn resolve_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub source: Option<String>,
    pub output_dir: PathBuf,
    pub open_reports: bool,
    pub report_title: Option<String>,
    pub fetch_timeout_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            source: None,
            output_dir: PathBuf::from("."),
            open_reports: true,
            report_title: None,
            fetch_timeout_sec: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: CatalogSource,
    pub output_dir: PathBuf,
    pub open_reports: bool,
    pub report_title: String,
    /// Zero disables the timeout.
    pub fetch_timeout_sec: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let source = file
            .source
            .or_else(|| cli.source.clone())
            .ok_or_else(|| {
                anyhow!("the catalog source must be given as argument or in the config file")
            })?;
        if source.trim().is_empty() {
            bail!("the catalog source is empty");
        }

        let output_dir = match file.output_dir.as_deref() {
            Some(dir) => resolve_path(dir)?,
            None => cli.output_dir.clone(),
        };
        if output_dir.is_file() {
            bail!("output_dir is a file: {:?}", output_dir);
        }

        let open_reports = file.open_reports.unwrap_or(cli.open_reports);
        let fetch_timeout_sec = file.fetch_timeout_sec.unwrap_or(cli.fetch_timeout_sec);

        let report_title = file
            .report
            .and_then(|report| report.title)
            .or_else(|| cli.report_title.clone())
            .unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string());

        Ok(Self {
            source: CatalogSource::parse(&source),
            output_dir,
            open_reports,
            report_title,
            fetch_timeout_sec,
        })
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: match self.fetch_timeout_sec {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}
