use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "webhook_studio.toml";
const APP_DIR: &str = "webhook_studio";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub default_webhook_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            default_webhook_url: None,
        }
    }
}

fn default_database_url() -> String {
    match dirs::data_local_dir() {
        Some(dir) => {
            let path = dir.join(APP_DIR).join("presets.db");
            format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
        }
        None => "sqlite://./data/presets.db".into(),
    }
}

/// Defaults, then `webhook_studio.toml` in the working directory, then the environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
            if let Some(v) = file_cfg.get("default_webhook_url") {
                settings.default_webhook_url = Some(v.clone());
            }
        }
    }

    if let Some(v) = env("WEBHOOK_STUDIO_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("WEBHOOK_STUDIO_DEFAULT_WEBHOOK") {
        settings.default_webhook_url = Some(v);
    }

    settings.default_webhook_url = settings
        .default_webhook_url
        .filter(|url| !url.trim().is_empty());
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings_from(&dir.path().join(CONFIG_FILE), no_env);
        assert_eq!(settings, Settings::default());
        assert!(settings.database_url.starts_with("sqlite://"));
        assert!(settings.database_url.ends_with("presets.db"));
    }

    #[test]
    fn file_values_then_environment_override() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "database_url = \"sqlite://./file.db\"\ndefault_webhook_url = \"https://example.com/hook\"\n",
        )
        .expect("write config");

        let from_file = load_settings_from(&path, no_env);
        assert_eq!(from_file.database_url, "sqlite://./file.db");
        assert_eq!(
            from_file.default_webhook_url.as_deref(),
            Some("https://example.com/hook")
        );

        let overridden = load_settings_from(&path, |key| match key {
            "APP__DATABASE_URL" => Some("sqlite::memory:".into()),
            "WEBHOOK_STUDIO_DEFAULT_WEBHOOK" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(overridden.database_url, "sqlite::memory:");
        assert_eq!(overridden.default_webhook_url, None);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "database_url = [not a string").expect("write config");
        assert_eq!(load_settings_from(&path, no_env), Settings::default());
    }
}
