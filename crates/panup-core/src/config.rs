use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pcs::Credentials;
use crate::Result;

/// Panup 設定
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub pcs: Option<PcsConfig>,
}

/// BaiduPCS-Go 設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcsConfig {
    /// BDUSS トークン（オプション、環境変数優先）
    pub bduss: Option<String>,
    /// STOKEN トークン（オプション、環境変数優先）
    pub stoken: Option<String>,
    /// デフォルトのリモートディレクトリ
    pub remote_dir: Option<String>,
}

impl Config {
    /// 設定ファイルのパスを取得
    pub fn config_path() -> Result<PathBuf> {
        let home = env::var("HOME")
            .map_err(|_| crate::Error::Config("HOME environment variable not set".into()))?;
        Ok(PathBuf::from(home).join(".panup").join("config.toml"))
    }

    /// 設定を読み込み
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// 設定を保存
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| crate::Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// 認証情報を解決（項目ごとに フラグ > 環境変数 > 設定ファイル）
    pub fn resolve_credentials(
        &self,
        bduss: Option<String>,
        stoken: Option<String>,
    ) -> Result<Credentials> {
        let bduss = bduss
            .or_else(|| env::var("PANUP_BDUSS").ok())
            .or_else(|| self.pcs.as_ref().and_then(|pcs| pcs.bduss.clone()))
            .ok_or_else(|| {
                crate::Error::Config(
                    "BDUSS not found in flags, environment (PANUP_BDUSS), or config".into(),
                )
            })?;

        let stoken = stoken
            .or_else(|| env::var("PANUP_STOKEN").ok())
            .or_else(|| self.pcs.as_ref().and_then(|pcs| pcs.stoken.clone()))
            .ok_or_else(|| {
                crate::Error::Config(
                    "STOKEN not found in flags, environment (PANUP_STOKEN), or config".into(),
                )
            })?;

        Ok(Credentials { bduss, stoken })
    }

    /// デフォルトのリモートディレクトリを取得
    pub fn get_remote_dir(&self) -> Option<String> {
        self.pcs.as_ref().and_then(|pcs| pcs.remote_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            pcs: Some(PcsConfig {
                bduss: Some("bduss-value".to_string()),
                stoken: Some("stoken-value".to_string()),
                remote_dir: Some("/backup".to_string()),
            }),
        };

        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("bduss-value"));
        assert!(toml.contains("/backup"));

        let parsed: Config = toml::from_str(&toml).unwrap();
        let pcs = parsed.pcs.unwrap();
        assert_eq!(pcs.bduss.unwrap(), "bduss-value");
        assert_eq!(pcs.remote_dir.unwrap(), "/backup");
    }

    #[test]
    fn test_empty_config_parses() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.pcs.is_none());
        assert!(parsed.get_remote_dir().is_none());
    }

    fn config_with_credentials() -> Config {
        Config {
            pcs: Some(PcsConfig {
                bduss: Some("config-bduss".to_string()),
                stoken: Some("config-stoken".to_string()),
                remote_dir: None,
            }),
        }
    }

    #[test]
    fn test_resolve_credentials_from_config() -> crate::Result<()> {
        let credentials = config_with_credentials().resolve_credentials(None, None)?;
        assert_eq!(credentials.bduss, "config-bduss");
        assert_eq!(credentials.stoken, "config-stoken");
        Ok(())
    }

    #[test]
    fn test_flags_override_config() -> crate::Result<()> {
        let credentials = config_with_credentials()
            .resolve_credentials(Some("flag-bduss".to_string()), Some("flag-stoken".to_string()))?;
        assert_eq!(credentials.bduss, "flag-bduss");
        assert_eq!(credentials.stoken, "flag-stoken");
        Ok(())
    }

    #[test]
    fn test_lone_flag_is_honored() -> crate::Result<()> {
        // 片方だけフラグで与えても項目ごとに解決される
        let credentials = config_with_credentials()
            .resolve_credentials(Some("flag-bduss".to_string()), None)?;
        assert_eq!(credentials.bduss, "flag-bduss");
        assert_eq!(credentials.stoken, "config-stoken");

        let credentials = config_with_credentials()
            .resolve_credentials(None, Some("flag-stoken".to_string()))?;
        assert_eq!(credentials.bduss, "config-bduss");
        assert_eq!(credentials.stoken, "flag-stoken");
        Ok(())
    }

    #[test]
    fn test_missing_credentials_is_config_error() {
        let config = Config::default();
        let result = config.resolve_credentials(Some("flag-bduss".to_string()), None);
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_get_remote_dir() {
        let config = Config {
            pcs: Some(PcsConfig {
                bduss: None,
                stoken: None,
                remote_dir: Some("/ci-artifacts".to_string()),
            }),
        };

        assert_eq!(config.get_remote_dir().unwrap(), "/ci-artifacts");
    }
}
