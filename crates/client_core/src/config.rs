use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{anyhow, Context};
use shared::domain::DEFAULT_LOCATION;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const APP_DIR: &str = "recipe_recommender";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub session_file: PathBuf,
    pub default_location: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            session_file: default_session_file(),
            default_location: DEFAULT_LOCATION.into(),
        }
    }
}

pub fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(SESSION_FILE_NAME)
}

/// Defaults, then the optional TOML file, then the process environment.
pub fn load_settings(config_path: Option<&str>) -> anyhow::Result<ClientSettings> {
    let file_contents = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read client config '{path}'"))?,
        ),
        None => None,
    };
    load_settings_from(file_contents.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file_contents {
        let file_cfg = toml::from_str::<HashMap<String, String>>(raw)
            .context("client config must be a flat table of string values")?;
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
        if let Some(v) = file_cfg.get("session_file") {
            settings.session_file = PathBuf::from(v);
        }
        if let Some(v) = file_cfg.get("default_location") {
            settings.default_location = v.clone();
        }
    }

    if let Some(v) = env("RECIPE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("RECIPE_SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }
    if let Some(v) = env("APP__SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }

    if let Some(v) = env("APP__DEFAULT_LOCATION") {
        settings.default_location = v;
    }

    settings.server_url = normalize_server_url(&settings.server_url)?;
    Ok(settings)
}

pub fn normalize_server_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_SERVER_URL.to_string());
    }

    let parsed = Url::parse(raw).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "server url '{raw}' must use http or https, not '{}'",
            parsed.scheme()
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
