//! Application configuration
//!
//! Precedence (lowest to highest): built-in defaults, profile config
//! file (~/.tourney/tourney.json), local/CLI-specified config file,
//! environment variables and CLI flags (merged by clap).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::scoring::ScoringRule;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_DRAW_POINTS, DEFAULT_HOST, DEFAULT_LOSS_POINTS,
    DEFAULT_PORT, DEFAULT_WIN_POINTS,
};
use super::storage::expand_path;

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub scoring: ScoringRule,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Admin authentication settings
///
/// The server only needs an "authenticated identity" capability for
/// write endpoints; a single admin bearer token provides it. Password
/// hashing and session issuance are out of scope.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    /// Configured token; when `None` and auth is enabled, a token is
    /// generated at startup and printed in the banner.
    pub token: Option<String>,
}

// =============================================================================
// Config file shape (all fields optional, merged over defaults)
// =============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    #[serde(default)]
    server: Option<ServerFileConfig>,
    #[serde(default)]
    auth: Option<AuthFileConfig>,
    #[serde(default)]
    scoring: Option<ScoringFileConfig>,

    #[serde(flatten)]
    extra: serde_json::Value,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ServerFileConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct AuthFileConfig {
    enabled: Option<bool>,
    token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ScoringFileConfig {
    win_points: Option<i64>,
    draw_points: Option<i64>,
    loss_points: Option<i64>,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                current.host = server.host;
            }
            if server.port.is_some() {
                current.port = server.port;
            }
        }

        if let Some(auth) = other.auth {
            let current = self.auth.get_or_insert_with(AuthFileConfig::default);
            if auth.enabled.is_some() {
                current.enabled = auth.enabled;
            }
            if auth.token.is_some() {
                current.token = auth.token;
            }
        }

        if let Some(scoring) = other.scoring {
            let current = self.scoring.get_or_insert_with(ScoringFileConfig::default);
            if scoring.win_points.is_some() {
                current.win_points = scoring.win_points;
            }
            if scoring.draw_points.is_some() {
                current.draw_points = scoring.draw_points;
            }
            if scoring.loss_points.is_some() {
                current.loss_points = scoring.loss_points;
            }
        }
    }
}

fn get_profile_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

impl AppConfig {
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let mut file_config = FileConfig::default();

        // 1. Profile dir config (~/.tourney/tourney.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
        }

        // 2. CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay = FileConfig::load_from_file(&path)?;
            overlay.warn_unknown_fields();
            file_config.merge(overlay);
        }

        // 3. CLI flags / env vars win over file values
        let server_file = file_config.server.unwrap_or_default();
        let auth_file = file_config.auth.unwrap_or_default();
        let scoring_file = file_config.scoring.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(server_file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(server_file.port).unwrap_or(DEFAULT_PORT),
        };

        let auth = AuthConfig {
            enabled: !cli.no_auth && auth_file.enabled.unwrap_or(true),
            token: cli.admin_token.clone().or(auth_file.token),
        };

        let scoring = ScoringRule {
            win: cli
                .win_points
                .or(scoring_file.win_points)
                .unwrap_or(DEFAULT_WIN_POINTS),
            draw: cli
                .draw_points
                .or(scoring_file.draw_points)
                .unwrap_or(DEFAULT_DRAW_POINTS),
            loss: cli
                .loss_points
                .or(scoring_file.loss_points)
                .unwrap_or(DEFAULT_LOSS_POINTS),
        };

        if scoring.win < scoring.draw || scoring.draw < scoring.loss {
            anyhow::bail!(
                "Invalid scoring rule: expected win >= draw >= loss, got {}/{}/{}",
                scoring.win,
                scoring.draw,
                scoring.loss
            );
        }

        tracing::debug!(?server, scoring = ?scoring, auth_enabled = auth.enabled, "Configuration resolved");

        Ok(Self {
            server,
            auth,
            scoring,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_cli() {
        let config = AppConfig::load(&CliConfig::default()).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.auth.enabled);
        assert!(config.auth.token.is_none());
        assert_eq!(config.scoring.win, DEFAULT_WIN_POINTS);
        assert_eq!(config.scoring.draw, DEFAULT_DRAW_POINTS);
        assert_eq!(config.scoring.loss, DEFAULT_LOSS_POINTS);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            no_auth: true,
            win_points: Some(3),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(!config.auth.enabled);
        assert_eq!(config.scoring.win, 3);
    }

    #[test]
    fn test_rejects_inverted_scoring_rule() {
        let cli = CliConfig {
            win_points: Some(0),
            draw_points: Some(1),
            ..Default::default()
        };
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = FileConfig::default();
        let overlay: FileConfig = serde_json::from_str(
            r#"{"server": {"port": 8123}, "scoring": {"win_points": 3}}"#,
        )
        .unwrap();
        base.merge(overlay);
        assert_eq!(base.server.unwrap().port, Some(8123));
        assert_eq!(base.scoring.unwrap().win_points, Some(3));
    }
}
