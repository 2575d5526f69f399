use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FoldProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MfapiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub fold: Option<FoldProviderConfig>,
    pub mfapi: Option<MfapiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            fold: Some(FoldProviderConfig {
                base_url: "https://api.fold.money/v1".to_string(),
            }),
            mfapi: Some(MfapiProviderConfig {
                base_url: "https://api.mfapi.in".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Address the API server binds to.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Flat JSON list of mutual fund holdings.
    #[serde(default = "default_holdings_path")]
    pub holdings_path: PathBuf,
    /// Fold session credentials; also read by the sync tool.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    /// SQLite database the sync tool materializes.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// The unfold executable.
    #[serde(default = "default_sync_binary")]
    pub sync_binary: PathBuf,
    /// Optional frontend directory served at the router fallback.
    pub static_dir: Option<PathBuf>,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_holdings_path() -> PathBuf {
    PathBuf::from("./holdings.json")
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./unfold_config.yaml")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./unfold/db.sqlite")
}

fn default_sync_binary() -> PathBuf {
    PathBuf::from("./unfold/unfold")
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            listen: default_listen(),
            holdings_path: default_holdings_path(),
            session_path: default_session_path(),
            db_path: default_db_path(),
            sync_binary: default_sync_binary(),
            static_dir: None,
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file exists there.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fundfold")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Replaces the port component of the listen address.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .listen
            .rsplit_once(':')
            .map_or("0.0.0.0", |(host, _)| host);
        self.listen = format!("{host}:{port}");
    }
}
