//! Bowling Import Common Library
//!
//! FISBの成績表（HTML/テキスト）を解析し、登録選手と照合して
//! 大会結果レコードを作るパイプライン。CLIなどのフロントエンドから共有される。

pub mod types;
pub mod error;
pub mod options;
pub mod normalizer;
pub mod extractor;
pub mod classifier;
pub mod section;
pub mod interpreter;
pub mod matcher;
pub mod assembler;
pub mod parser;

pub use types::{
    CompetitorRef, FinalRecord, MatchedResult, RawResult, RawRow, RecordId, Section,
    TournamentCatalog, TournamentRef, DEFAULT_GAME_COUNT,
};
pub use error::{Error, Result};
pub use options::ParseOptions;
pub use normalizer::normalize;
pub use extractor::{extract_rows, ExtractionPath};
pub use classifier::{classify, ColumnMap, ColumnRole};
pub use interpreter::{interpret_row, RankCarry};
pub use matcher::{match_result, NameMatcher};
pub use assembler::assemble;
pub use parser::{parse, parse_with_options, ParseReport};
