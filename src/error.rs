use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("選手登録ファイルが不正: {0}")]
    InvalidRegistry(String),

    #[error("大会カタログが不正: {0}")]
    InvalidCatalog(String),

    #[error("大会が見つかりません: {0}")]
    TournamentNotFound(String),

    #[error("取り込み先の大会が未選択です。`bowling-import import --tournament ID` で指定してください")]
    MissingTournament,

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] bowling_import_common::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
