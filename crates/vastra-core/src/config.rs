//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Signing key used when `SECRET_KEY` is not set. Fine for local runs only.
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-change-in-production";

/// Browser origins allowed by default (Vite and CRA dev servers).
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
    "http://localhost",
    "http://127.0.0.1",
];

/// Paths to all VastraVaani data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// User accounts database (`data/vastravaani.db`).
    pub users_db: PathBuf,
    /// Saved bookmarks (`data/bookmarks.json`).
    pub bookmarks_file: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
    /// Generated reports (`data/exports/`).
    pub exports: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            users_db: root.join("vastravaani.db"),
            bookmarks_file: root.join("bookmarks.json"),
            llm_config_file: root.join("llm-config.json"),
            exports: root.join("exports"),
            root,
        };
        std::fs::create_dir_all(&paths.root)?;
        std::fs::create_dir_all(&paths.exports)?;
        Ok(paths)
    }
}

/// Token signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub secret_key: String,
    /// Access token lifetime in minutes.
    pub access_token_expire_minutes: i64,
}

/// Keys for the third-party services the feature routes call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    pub serpapi: Option<String>,
    pub apify: Option<String>,
    pub huggingface: Option<String>,
}

/// Top-level VastraVaani configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VastraConfig {
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    pub auth: AuthConfig,
    #[serde(skip_serializing)]
    pub api_keys: ApiKeys,
    pub cors_origins: Vec<String>,
    /// Accounts allowed to change server-wide settings (lowercased).
    pub admin_emails: Vec<String>,
    /// Per-request timeout for outbound HTTP calls.
    pub http_timeout_secs: u64,
}

impl VastraConfig {
    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|a| *a == email)
    }

    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, same as a blank line in .env
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000);
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let secret_key = var("SECRET_KEY").unwrap_or_else(|| {
            warn!("SECRET_KEY not set, using the development default");
            DEFAULT_SECRET_KEY.into()
        });
        let access_token_expire_minutes = var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .and_then(|m| m.parse().ok())
            .unwrap_or(1440);

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

        let admin_emails = var("ADMIN_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let http_timeout_secs = var("HTTP_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);

        let api_keys = ApiKeys {
            serpapi: var("SERPAPI_API_KEY"),
            apify: var("APIFY_API_KEY"),
            huggingface: var("HUGGINGFACE_API_KEY"),
        };

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            host,
            port,
            data_paths,
            auth: AuthConfig {
                secret_key,
                access_token_expire_minutes,
            },
            api_keys,
            cors_origins,
            admin_emails,
            http_timeout_secs,
        })
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)], dir: &Path) -> VastraConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        VastraConfig::from_lookup(dir, |k| map.get(k).cloned()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(&[], dir.path());

        assert_eq!(config.port, 8000);
        assert_eq!(config.auth.secret_key, DEFAULT_SECRET_KEY);
        assert_eq!(config.auth.access_token_expire_minutes, 1440);
        assert_eq!(config.cors_origins.len(), 6);
        assert!(config.api_keys.serpapi.is_none());
        assert!(config.data_paths.exports.is_dir());
        assert!(config.data_paths.bookmarks_file.ends_with("bookmarks.json"));
        assert!(config.admin_emails.is_empty());
        assert!(!config.is_admin("anyone@example.com"));
    }

    #[test]
    fn test_admin_emails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(&[("ADMIN_EMAILS", " Ops@Vastra.app, ,owner@vastra.app")], dir.path());

        assert_eq!(config.admin_emails, vec!["ops@vastra.app", "owner@vastra.app"]);
        assert!(config.is_admin("OPS@vastra.app"));
        assert!(!config.is_admin("stranger@example.com"));
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(
            &[
                ("PORT", "9100"),
                ("SECRET_KEY", "s3cret"),
                ("ACCESS_TOKEN_EXPIRE_MINUTES", "60"),
                ("SERPAPI_API_KEY", "serp"),
                ("APIFY_API_KEY", "  "),
                ("CORS_ORIGINS", "https://vastra.app/, http://localhost:5173"),
            ],
            dir.path(),
        );

        assert_eq!(config.port, 9100);
        assert_eq!(config.auth.secret_key, "s3cret");
        assert_eq!(config.auth.access_token_expire_minutes, 60);
        assert_eq!(config.api_keys.serpapi.as_deref(), Some("serp"));
        assert!(config.api_keys.apify.is_none());
        assert_eq!(
            config.cors_origins,
            vec!["https://vastra.app", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_bad_port_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(&[("PORT", "not-a-port")], dir.path());
        assert_eq!(config.port, 8000);
    }
}
