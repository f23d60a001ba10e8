use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bowling-import")]
#[command(about = "ボウリング大会成績表の取り込みツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 成績表を解析して照合結果をプレビュー
    Parse {
        /// 成績表ファイル（HTMLまたはテキスト、`-` で標準入力）
        #[arg(required = true)]
        input: String,

        /// 選手登録JSONファイル
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// 解析結果のJSON出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 一致した選手のみ表示
        #[arg(long)]
        matches_only: bool,
    },

    /// 成績表を解析し、一致した選手の結果を大会に取り込む
    Import {
        /// 成績表ファイル（HTMLまたはテキスト、`-` で標準入力）
        #[arg(required = true)]
        input: String,

        /// 選手登録JSONファイル
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// 大会カタログJSONファイル
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 取り込み先の大会ID（省略時はカタログから選択）
        #[arg(short, long)]
        tournament: Option<String>,

        /// 取り込み結果の出力JSON（デフォルト: import.json）
        #[arg(short, long, default_value = "import.json")]
        output: PathBuf,

        /// カタログにゲーム数が無い場合のゲーム数
        #[arg(short, long)]
        games: Option<u32>,
    },

    /// 設定を表示・変更
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,

        /// 既定のゲーム数を設定
        #[arg(long)]
        set_default_game_count: Option<u32>,

        /// 選手登録ファイルを設定
        #[arg(long)]
        set_registry: Option<PathBuf>,

        /// 大会カタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,
    },
}
