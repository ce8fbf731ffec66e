use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const SETTINGS_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub api_url: String,
    pub log_filter: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

/// Defaults, then `console.toml` in the working directory, then environment.
pub fn load_settings() -> ConsoleSettings {
    let mut settings = ConsoleSettings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings
}

/// Like [`load_settings`] but with an explicit file that must exist.
pub fn load_settings_from(path: &Path) -> anyhow::Result<ConsoleSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read console settings '{}'", path.display()))?;
    let mut settings = ConsoleSettings::default();
    if !apply_file_overrides(&mut settings, &raw) {
        bail!(
            "console settings '{}' must be a flat table of string values",
            path.display()
        );
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_file_overrides(settings: &mut ConsoleSettings, raw: &str) -> bool {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return false;
    };
    if let Some(v) = file_cfg.get("api_url") {
        settings.api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    true
}

fn apply_env_overrides(
    settings: &mut ConsoleSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("POLARIS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("POLARIS_LOG") {
        settings.log_filter = v;
    }
}

/// Trims whitespace and trailing slashes. Blank input falls back to the
/// default base URL.
pub fn normalize_api_url(raw_api_url: &str) -> anyhow::Result<String> {
    let raw_api_url = raw_api_url.trim();
    if raw_api_url.is_empty() {
        return Ok(DEFAULT_API_URL.to_string());
    }

    let parsed =
        Url::parse(raw_api_url).with_context(|| format!("invalid api url '{raw_api_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api url '{raw_api_url}' must use http or https");
    }

    Ok(raw_api_url.trim_end_matches('/').to_string())
}
