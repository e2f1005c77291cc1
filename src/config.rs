use crate::error::{ImgQcError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 既定の分類エンドポイント
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/checkImageQuality";

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "IMGQC_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    /// リクエストのタイムアウト（秒）。未設定なら無制限
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ImgQcError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("imgqc").join("config.json"))
    }

    /// 実際に使うエンドポイント（環境変数を優先）
    pub fn endpoint(&self) -> String {
        match std::env::var(ENDPOINT_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.endpoint.clone(),
        }
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ImgQcError::Config(format!(
                "エンドポイントは http:// または https:// で始まる必要があります: {}",
                endpoint
            )));
        }
        self.endpoint = endpoint;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        self.timeout_seconds = (seconds > 0).then_some(seconds);
        self.save()
    }
}
