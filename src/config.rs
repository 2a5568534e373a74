use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::filter::{FilterEngine, DEFAULT_RECOMMENDED_LIMIT};

const DEFAULT_CONFIG_FILE: &str = "portal.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog_path: Option<PathBuf>,
    pub recommended_limit: usize,
    pub listen_timeout_secs: u64,
    pub apply_skills_filter: bool,
    pub voice_input: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            recommended_limit: DEFAULT_RECOMMENDED_LIMIT,
            listen_timeout_secs: 8,
            apply_skills_filter: true,
            voice_input: true,
        }
    }
}

impl Settings {
    pub fn filter_engine(&self) -> FilterEngine {
        FilterEngine::new(self.recommended_limit, self.apply_skills_filter)
    }

    pub fn listen_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.listen_timeout_secs.max(1))
    }
}

/// File settings from `PORTAL_CONFIG` (or `./portal.toml` when present),
/// then `PORTAL_*` environment overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    let lookup = |key: &str| std::env::var(key).ok();
    let explicit = lookup("PORTAL_CONFIG").map(PathBuf::from);
    let path = explicit.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });
    load_settings_from(path.as_deref(), lookup)
}

pub fn load_settings_from(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str::<Settings>(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Settings::default(),
    };

    if let Some(v) = lookup("PORTAL_CATALOG") {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("PORTAL_RECOMMENDED_LIMIT") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.recommended_limit = parsed;
        }
    }
    if let Some(v) = lookup("PORTAL_LISTEN_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.listen_timeout_secs = parsed;
        }
    }
    if let Some(v) = lookup("PORTAL_APPLY_SKILLS_FILTER") {
        if let Some(parsed) = parse_flag(&v) {
            settings.apply_skills_filter = parsed;
        }
    }
    if let Some(v) = lookup("PORTAL_VOICE_INPUT") {
        if let Some(parsed) = parse_flag(&v) {
            settings.voice_input = parsed;
        }
    }

    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
