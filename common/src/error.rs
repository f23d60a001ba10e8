//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 貼り付け内容から行を1つも抽出できなかった
    #[error("Empty input: no table rows could be extracted")]
    EmptyInput,

    /// 行は解析できたが、登録選手と一致するものがなかった
    #[error("No matches: none of the {extracted} parsed rows matched a registered competitor")]
    NoMatches { extracted: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
