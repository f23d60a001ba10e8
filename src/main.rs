use bowling_import_common::{parse_with_options, ParseReport};
use bowling_import_rust::{cli, config, error, import, preview, registry, sink, tournament};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{ImportError, Result};
use std::io::Read;
use std::path::Path;

/// 入力を読み込む（`-` は標準入力）
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    let path = Path::new(input);
    if !path.exists() {
        return Err(ImportError::FileNotFound(input.to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn print_report(report: &ParseReport, matches_only: bool) {
    for line in preview::render_preview(report, matches_only) {
        println!("  {}", line);
    }
    println!("✔ {}\n", preview::summary_line(report));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Parse { input, registry, output, matches_only } => {
            println!("🎳 bowling-import - 成績表解析\n");

            println!("[1/2] 選手登録を読み込み中...");
            let registry_path = config.resolve_registry(registry.as_deref())?;
            let competitors = registry::load_registry(&registry_path)?;
            println!("✔ {}名の選手を読み込み\n", competitors.len());

            println!("[2/2] 成績表を解析中...");
            let content = read_input(&input)?;
            let report = parse_with_options(&content, &competitors, &config.parse)?;
            print_report(&report, matches_only || config.matches_only);

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&report.results)?;
                std::fs::write(&output, json)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 解析完了");
        }

        Commands::Import { input, registry, catalog, tournament, output, games } => {
            println!("🎳 bowling-import - 大会結果の取り込み\n");

            println!("[1/4] 選手登録を読み込み中...");
            let registry_path = config.resolve_registry(registry.as_deref())?;
            let competitors = registry::load_registry(&registry_path)?;
            println!("✔ {}名の選手を読み込み\n", competitors.len());

            println!("[2/4] 大会を確認中...");
            let catalog_path = config.resolve_catalog(catalog.as_deref());
            let catalog = registry::load_catalog(catalog_path.as_deref())?;
            let selected = tournament::select_tournament(&catalog, tournament.as_deref())?;
            let default_game_count =
                games.filter(|&n| n > 0).unwrap_or(config.default_game_count);
            println!(
                "✔ {} ({}ゲーム)\n",
                selected.name,
                import::game_count_for(&selected, default_game_count)
            );

            println!("[3/4] 成績表を解析・保存中...");
            let content = read_input(&input)?;
            let mut file_sink = sink::JsonFileSink::new(&output);
            let summary = import::run_import(
                &content,
                &competitors,
                &selected,
                default_game_count,
                &config.parse,
                &mut file_sink,
            )?;
            println!("✔ {}件を保存: {}\n", summary.persisted, file_sink.path().display());

            println!("[4/4] 取り込み結果");
            print_report(&summary.report, config.matches_only);

            if !summary.unmatched_names.is_empty() {
                println!("未登録の選手 ({}名):", summary.unmatched_names.len());
                for name in &summary.unmatched_names {
                    println!("  - {}", name);
                }
            }

            println!("\n✅ 取り込み完了");
        }

        Commands::Config { show, set_default_game_count, set_registry, set_catalog } => {
            let mut config = config;
            let mut changed = false;

            if let Some(count) = set_default_game_count {
                config.set_default_game_count(count)?;
                println!("✔ 既定のゲーム数を設定しました: {}", count);
                changed = true;
            }

            if let Some(path) = set_registry {
                println!("✔ 選手登録ファイルを設定しました: {}", path.display());
                config.registry_path = Some(path);
                changed = true;
            }

            if let Some(path) = set_catalog {
                println!("✔ 大会カタログを設定しました: {}", path.display());
                config.catalog_path = Some(path);
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show {
                let display = |p: &Option<std::path::PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                };
                println!("設定:");
                println!("  既定ゲーム数: {}", config.default_game_count);
                println!("  一致のみ表示: {}", config.matches_only);
                println!("  選手登録: {}", display(&config.registry_path));
                println!("  大会カタログ: {}", display(&config.catalog_path));
                println!("  照合最小文字数: {}", config.parse.min_match_length);
                println!(
                    "  スコア範囲: {}-{}",
                    config.parse.min_game_score, config.parse.max_game_score
                );
            }
        }
    }

    Ok(())
}
