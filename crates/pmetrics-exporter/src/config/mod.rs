//! Exporter config loader (strict YAML file plus environment overrides).
//!
//! The YAML file is optional and only needed for tuning; a plain deployment
//! sets `DATABASE_URL` and, optionally, `PORT`.

pub mod schema;

use std::fs;

use pmetrics_core::error::{ExporterError, Result};

pub use schema::{ExporterConfig, ExporterSection, QueryLabelSection};

/// Path of the optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "PMETRICS_EXPORTER_CONFIG";
/// Postgres connection string (required).
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Listen port; replaces the port of `exporter.listen`.
pub const PORT_ENV: &str = "PORT";

pub fn load_from_env() -> Result<ExporterConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Resolve config through an arbitrary variable lookup.
pub fn load_from_lookup<F>(lookup: F) -> Result<ExporterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        Some(path) => parse_str(&read_file(&path)?)?,
        None => ExporterConfig::default(),
    };

    if let Some(url) = lookup(DATABASE_URL_ENV).filter(|u| !u.is_empty()) {
        cfg.exporter.database_url = Some(url);
    }

    if let Some(port) = lookup(PORT_ENV).filter(|p| !p.is_empty()) {
        let port: u16 = port
            .parse()
            .map_err(|e| ExporterError::Configuration(format!("invalid {PORT_ENV} ({port}): {e}")))?;
        let mut addr = cfg.exporter.listen_addr()?;
        addr.set_port(port);
        cfg.exporter.listen = addr.to_string();
    }

    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ExporterError::Configuration(format!("read config failed ({path}): {e}")))
}

fn parse_str(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| ExporterError::Configuration(format!("invalid yaml: {e}")))
}
