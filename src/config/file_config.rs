use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub source: Option<String>,
    pub output_dir: Option<String>,
    pub open_reports: Option<bool>,
    pub fetch_timeout_sec: Option<u64>,

    pub report: Option<ReportConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub title: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            source = "https://example.com/peliculas.json"
            output_dir = "/tmp/reports"
            open_reports = true
            fetch_timeout_sec = 5

            [report]
            title = "Movies"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.source.as_deref(),
            Some("https://example.com/peliculas.json")
        );
        assert_eq!(config.output_dir.as_deref(), Some("/tmp/reports"));
        assert_eq!(config.open_reports, Some(true));
        assert_eq!(config.fetch_timeout_sec, Some(5));
        assert_eq!(config.report.unwrap().title.as_deref(), Some("Movies"));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.source.is_none());
        assert!(config.report.is_none());
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "open_reports = \"maybe\"").unwrap();
        assert!(FileConfig::load(file.path()).is_err());
    }
}
