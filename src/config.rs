use crate::error::{ImportError, Result};
use bowling_import_common::{ParseOptions, DEFAULT_GAME_COUNT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 選手登録ファイルの環境変数（設定ファイルより優先）
pub const REGISTRY_ENV: &str = "BOWLING_IMPORT_REGISTRY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 大会カタログにゲーム数が無い場合の既定値
    pub default_game_count: u32,
    /// プレビューで一致した選手のみ表示
    pub matches_only: bool,
    pub registry_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    /// 解析パラメータ
    pub parse: ParseOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_game_count: DEFAULT_GAME_COUNT,
            matches_only: false,
            registry_path: None,
            catalog_path: None,
            parse: ParseOptions::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルが無ければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
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
            .ok_or_else(|| ImportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("bowling-import").join("config.json"))
    }

    /// 選手登録ファイルのパス（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_registry(&self, arg: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(REGISTRY_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        self.registry_path.clone().ok_or_else(|| {
            ImportError::Config(
                "選手登録ファイルが未設定です。`--registry` または `config --set-registry` で指定してください".into(),
            )
        })
    }

    /// 大会カタログのパス（引数 > 設定ファイル、無くてもよい）
    pub fn resolve_catalog(&self, arg: Option<&Path>) -> Option<PathBuf> {
        arg.map(Path::to_path_buf).or_else(|| self.catalog_path.clone())
    }

    pub fn set_default_game_count(&mut self, count: u32) -> Result<()> {
        check_game_count(count)?;
        self.default_game_count = count;
        Ok(())
    }

    /// 読み込んだ設定値の検証
    pub fn validate(&self) -> Result<()> {
        check_game_count(self.default_game_count)?;
        self.parse.validate()?;
        Ok(())
    }
}

fn check_game_count(count: u32) -> Result<()> {
    if count == 0 {
        return Err(ImportError::Config("ゲーム数は1以上を指定してください".into()));
    }
    Ok(())
}
