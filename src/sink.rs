//! 取り込み結果の保存先
//!
//! 最終レコードはまとめて1回で渡す。途中で失敗した場合は何も残さない。

use crate::error::Result;
use bowling_import_common::FinalRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 保存先
pub trait ResultSink {
    /// レコードを保存し、保存件数を返す
    fn persist(&mut self, records: &[FinalRecord]) -> Result<usize>;
}

/// JSONファイルの中身
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFile {
    /// 取り込み日時（RFC 3339）
    pub imported_at: String,
    pub records: Vec<FinalRecord>,
}

/// JSONファイルへ保存する
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みファイルを読み込む
    pub fn read(path: &Path) -> Result<ImportFile> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&mut self, records: &[FinalRecord]) -> Result<usize> {
        let file = ImportFile {
            imported_at: chrono::Local::now().to_rfc3339(),
            records: records.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // 一時ファイルに書いてから置き換える
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            std::fs::remove_file(&tmp_path).ok();
            return Err(e.into());
        }

        log::info!("persisted {} records to {}", records.len(), self.path.display());
        Ok(records.len())
    }
}

/// メモリ上に保持する（テスト・プレビュー用）
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<FinalRecord>,
}

impl ResultSink for MemorySink {
    fn persist(&mut self, records: &[FinalRecord]) -> Result<usize> {
        self.records.extend_from_slice(records);
        Ok(records.len())
    }
}
