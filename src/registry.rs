//! 外部データ（選手登録・大会カタログ）の読み込み
//!
//! どちらもJSON配列。選手は `givenName/familyName` と
//! 連盟サイト由来の `nome/cognome` の両方のキーを受け付ける。

use crate::error::{ImportError, Result};
use bowling_import_common::{CompetitorRef, TournamentCatalog};
use std::path::Path;

/// 選手登録ファイルを読み込む
pub fn load_registry(path: &Path) -> Result<Vec<CompetitorRef>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let registry: Vec<CompetitorRef> = serde_json::from_str(&content)
        .map_err(|e| ImportError::InvalidRegistry(format!("{}: {}", path.display(), e)))?;
    log::debug!("registry: {} competitors from {}", registry.len(), path.display());
    Ok(registry)
}

/// 大会カタログを読み込む（パス未指定なら空のカタログ）
pub fn load_catalog(path: Option<&Path>) -> Result<TournamentCatalog> {
    let Some(path) = path else {
        return Ok(TournamentCatalog::default());
    };
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let catalog: TournamentCatalog = serde_json::from_str(&content)
        .map_err(|e| ImportError::InvalidCatalog(format!("{}: {}", path.display(), e)))?;
    Ok(catalog)
}
