use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "config.json";
pub const SECRET_FILE: &str = "secret";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    user: String,
    domain: String,
    #[serde(default)]
    base_url: Option<String>,
}

/// Everything needed to talk to the issue tracker. Read once at startup and handed to whoever
/// needs it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user: String,
    pub domain: String,
    pub base_url: String,
    pub token: String,
}

impl AppConfig {
    pub fn new(user: impl Into<String>, domain: impl Into<String>, token: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            user: user.into(),
            base_url: default_base_url(&domain),
            domain,
            token: token.into(),
        }
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..self
        }
    }

    /// Link to the issue page in the tracker's web ui.
    pub fn browse_url(&self, issue_id: &str) -> String {
        format!("{}/browse/{issue_id}", self.base_url)
    }
}

fn default_base_url(domain: &str) -> String {
    format!("https://{domain}.atlassian.net")
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

pub fn secret_path(dir: &Path) -> PathBuf {
    dir.join(SECRET_FILE)
}

pub fn load_config(dir: &Path) -> Result<AppConfig> {
    let path = config_path(dir);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let file: ConfigFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let path = secret_path(dir);
    let token = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read api token from {}", path.display()))?;
    let token = token.trim();
    if token.is_empty() {
        bail!("Api token in {} is empty", path.display());
    }

    let config = AppConfig::new(file.user, file.domain, token);
    Ok(match file.base_url {
        Some(base_url) => config.with_base_url(base_url),
        None => config,
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{config_path, load_config, secret_path};

    #[test]
    fn test_load_config() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(
            config_path(dir.path()),
            r#"{ "user": "me@example.com", "domain": "acme" }"#,
        )?;
        std::fs::write(secret_path(dir.path()), "  token-value \n")?;

        let config = load_config(dir.path())?;
        assert_eq!(config.user, "me@example.com");
        assert_eq!(config.domain, "acme");
        assert_eq!(config.token, "token-value");
        assert_eq!(config.base_url, "https://acme.atlassian.net");
        assert_eq!(
            config.browse_url("abc-1"),
            "https://acme.atlassian.net/browse/abc-1"
        );
        Ok(())
    }

    #[test]
    fn test_base_url_override() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(
            config_path(dir.path()),
            r#"{ "user": "me", "domain": "acme", "baseUrl": "http://localhost:8080/" }"#,
        )?;
        std::fs::write(secret_path(dir.path()), "t")?;

        let config = load_config(dir.path())?;
        assert_eq!(config.base_url, "http://localhost:8080");
        Ok(())
    }

    #[test]
    fn test_missing_secret() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(config_path(dir.path()), r#"{ "user": "me", "domain": "acme" }"#)?;
        assert!(load_config(dir.path()).is_err());

        std::fs::write(secret_path(dir.path()), " \n")?;
        assert!(load_config(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_broken_config() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(config_path(dir.path()), r#"{ "user": "me" }"#)?;
        std::fs::write(secret_path(dir.path()), "t")?;
        let error = load_config(dir.path()).unwrap_err();
        assert!(error.to_string().contains("Failed to parse"));
        Ok(())
    }
}
