use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional startup config. Only used to prefill the login form; the
/// session is still authenticated interactively and nothing is written
/// back.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub jira: Option<JiraConfig>,
}

#[derive(Debug, Deserialize)]
pub struct JiraConfig {
    pub url: String,
    pub email: String,
    #[serde(default)]
    pub api_token: String,
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jiradash")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_from(&config_path())
}

fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.jira.is_none());
    }

    #[test]
    fn parses_jira_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[jira]\nurl = \"https://acme.atlassian.net\"\nemail = \"me@acme.io\"\napi_token = \"tok\"\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        let jira = config.jira.unwrap();
        assert_eq!(jira.url, "https://acme.atlassian.net");
        assert_eq!(jira.email, "me@acme.io");
        assert_eq!(jira.api_token, "tok");
    }

    #[test]
    fn token_is_optional_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[jira]\nurl = \"https://acme.atlassian.net\"\nemail = \"me@acme.io\"\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.jira.unwrap().api_token, "");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[jira\nurl = ").unwrap();
        assert!(load_from(&path).is_err());
    }
}
