//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every field has a default so the server can boot without a config
//! file during local development.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

/// Report presentation settings shared by both output formats.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    /// Heading printed at the top of every report.
    pub title: String,
    /// Currency symbol prefixed to formatted amounts.
    pub currency_symbol: String,
    /// Which view the PDF endpoint renders.
    pub pdf_view: ReportView,
    /// Which view the Word endpoint renders.
    pub word_view: ReportView,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "MASTER LEAGUE - Betting Report".to_string(),
            currency_symbol: "€".to_string(),
            // Defaults keep both of the original report variants in use:
            // the PDF ships the flat table, the Word document the
            // per-player breakdown.
            pdf_view: ReportView::Flat,
            word_view: ReportView::Grouped,
        }
    }
}

/// The two views a renderer can emit over one report model.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportView {
    /// One table with every bet.
    Flat,
    /// Per-player sections with stake/exposure totals.
    Grouped,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.report.pdf_view, ReportView::Flat);
        assert_eq!(cfg.report.word_view, ReportView::Grouped);
        assert!(!cfg.report.title.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [report]
            pdf_view = "grouped"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.report.pdf_view, ReportView::Grouped);
        // Unspecified fields keep their defaults.
        assert_eq!(cfg.report.word_view, ReportView::Grouped);
        assert_eq!(cfg.report.currency_symbol, "€");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let cfg = AppConfig::load("/tmp/betpool_no_such_config.toml").unwrap();
        assert_eq!(cfg.server.port, 5000);
    }
}
