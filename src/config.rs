use crate::error::{ImStegError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 元のサーバーの待受ポート
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8888";
/// `server_url` を上書きする環境変数
pub const SERVER_ENV: &str = "IMSTEG_SERVER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub public_key: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            public_key: None,
            private_key: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ImStegError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("imsteg").join("config.json"))
    }

    /// 送信先のURL（環境変数を優先）
    pub fn server_url(&self) -> String {
        // 環境変数を優先
        if let Ok(url) = std::env::var(SERVER_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.server_url.clone()
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ImStegError::Config(format!(
                "server URL must start with http:// or https://: {}",
                url
            )));
        }
        self.server_url = url;
        Ok(())
    }
}
