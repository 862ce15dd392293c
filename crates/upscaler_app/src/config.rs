//! Layered configuration: built-in defaults, then an optional RON file, then CLI/env.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use upscaler_core::Quality;
use upscaler_engine::UpscaleSettings;

use crate::cli::Cli;

const DEFAULT_OUTPUT_DIR: &str = "./upscaled";

/// Contents of the optional configuration file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub host: Option<String>,
    pub quality: Option<String>,
    pub quality_field: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub settings: UpscaleSettings,
    pub quality: Quality,
    pub output_dir: PathBuf,
    pub save: bool,
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    ron::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn resolve(cli: &Cli) -> Result<RunConfig> {
    let file = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    merge(cli, file)
}

fn merge(cli: &Cli, file: AppConfig) -> Result<RunConfig> {
    let api_key = match cli.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => bail!("No API key: pass --api-key or set AI_IMAGE_UPSCALER_API_KEY"),
    };

    let mut settings = UpscaleSettings {
        api_key,
        ..UpscaleSettings::default()
    };
    if let Some(endpoint) = file.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(host) = file.host {
        settings.host = host;
    }
    if let Some(secs) = file.connect_timeout_secs {
        settings.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(secs);
    }
    if let Some(max) = file.max_response_bytes {
        settings.max_response_bytes = max;
    }
    settings.quality_field = file.quality_field;

    let file_quality = file
        .quality
        .as_deref()
        .map(str::parse::<Quality>)
        .transpose()
        .map_err(anyhow::Error::msg)
        .context("Invalid quality in config file")?;
    let quality = cli.quality.or(file_quality).unwrap_or_default();

    let output_dir = cli
        .output
        .clone()
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Ok(RunConfig {
        settings,
        quality,
        output_dir,
        save: !cli.no_save,
    })
}
