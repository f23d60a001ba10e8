//! 取り込み処理の統合テスト

use bowling_import_common::{CompetitorRef, ParseOptions, RecordId, TournamentRef};
use bowling_import_rust::config::Config;
use bowling_import_rust::error::ImportError;
use bowling_import_rust::import::run_import;
use bowling_import_rust::registry::{load_catalog, load_registry};
use bowling_import_rust::sink::{JsonFileSink, MemorySink};
use bowling_import_rust::tournament::select_tournament;
use tempfile::tempdir;

const STANDINGS: &str = r#"
<table>
  <tr><td colspan="6">CLASSIFICA FINALE</td></tr>
  <tr><th>Pos</th><th>Atleta</th><th>G1</th><th>G2</th><th>G3</th><th>Totale</th></tr>
  <tr><td colspan="2">ECCELLENZA</td></tr>
  <tr><td>1</td><td>ROSSI MARIO</td><td>220</td><td>210</td><td>200</td><td>630</td></tr>
  <tr><td>2</td><td>BIANCHI LUCA</td><td>190</td><td>200</td><td>180</td><td>570</td></tr>
  <tr><td colspan="2">FEMMINILE</td></tr>
  <tr><td>1</td><td>VERDI ANNA</td><td>180</td><td>170</td><td>175</td><td>525</td></tr>
</table>
"#;

fn registry() -> Vec<CompetitorRef> {
    vec![
        CompetitorRef::new(1, "Mario", "Rossi"),
        CompetitorRef::new("uuid-2", "Anna", "Verdi"),
    ]
}

fn tournament(game_count: Option<u32>) -> TournamentRef {
    TournamentRef {
        id: RecordId::Number(10),
        name: "Coppa Italia".to_string(),
        game_count,
    }
}

// =============================================
// 保存先
// =============================================

#[test]
fn test_import_into_memory() {
    let mut sink = MemorySink::default();
    let summary = run_import(
        STANDINGS,
        &registry(),
        &tournament(None),
        6,
        &ParseOptions::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(summary.results, 3);
    assert_eq!(summary.matched, 2);
    assert_eq!(summary.persisted, 2);
    assert_eq!(summary.unmatched_names, vec!["BIANCHI LUCA".to_string()]);
    assert_eq!(summary.report.results.len(), summary.results);
    assert_eq!(summary.report.sections, 2);

    let rossi = &sink.records[0];
    assert_eq!(rossi.competitor_id, RecordId::Number(1));
    assert_eq!(rossi.tournament_id, RecordId::Number(10));
    assert_eq!(rossi.score, 630);
    assert_eq!(rossi.per_game_scores, vec![220, 210, 200]);
    assert_eq!(rossi.section.as_deref(), Some("ECCELLENZA"));

    let verdi = &sink.records[1];
    assert_eq!(verdi.competitor_id, RecordId::Text("uuid-2".to_string()));
    assert_eq!(verdi.rank, 1);
    assert_eq!(verdi.section.as_deref(), Some("FEMMINILE"));
}

#[test]
fn test_import_into_json_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out").join("import.json");
    let mut sink = JsonFileSink::new(&output);

    let summary = run_import(
        STANDINGS,
        &registry(),
        &tournament(Some(3)),
        6,
        &ParseOptions::default(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(summary.persisted, 2);
    assert!(output.exists());
    assert!(!output.with_extension("json.tmp").exists());

    let file = JsonFileSink::read(&output).unwrap();
    assert!(!file.imported_at.is_empty());
    assert_eq!(file.records.len(), 2);
    assert_eq!(file.records[0].game_count, 3);

    let json = std::fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"importedAt\""));
    assert!(json.contains("\"competitorId\""));
    assert!(json.contains("\"perGameScores\""));
}

#[test]
fn test_catalog_game_count_used_when_no_scores() {
    // 合計のみの成績表
    let html = "<tr><th>Pos</th><th>Atleta</th><th>Totale</th></tr>\
                <tr><td>1</td><td>ROSSI MARIO</td><td>1200</td></tr>";
    let mut sink = MemorySink::default();
    run_import(
        html,
        &registry(),
        &tournament(Some(8)),
        6,
        &ParseOptions::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.records.len(), 1);
    assert_eq!(sink.records[0].score, 1200);
    assert!(sink.records[0].per_game_scores.is_empty());
    assert_eq!(sink.records[0].game_count, 8);
}

// =============================================
// 外部ファイル
// =============================================

#[test]
fn test_registry_and_catalog_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let registry_path = dir.path().join("players.json");
    let catalog_path = dir.path().join("tournaments.json");
    std::fs::write(
        &registry_path,
        r#"[{"id": 1, "nome": "Mario", "cognome": "Rossi"}]"#,
    )
    .unwrap();
    std::fs::write(
        &catalog_path,
        r#"[{"id": 10, "nome": "Coppa Italia", "numero_partite": 3}]"#,
    )
    .unwrap();

    let registry = load_registry(&registry_path).unwrap();
    let catalog = load_catalog(Some(&catalog_path)).unwrap();
    let tournament = select_tournament(&catalog, Some("10")).unwrap();
    assert_eq!(tournament.game_count, Some(3));

    let mut sink = MemorySink::default();
    let summary = run_import(
        STANDINGS,
        &registry,
        &tournament,
        6,
        &ParseOptions::default(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(summary.matched, 1);
    assert_eq!(sink.records[0].game_count, 3);
}

// =============================================
// 設定
// =============================================

#[test]
fn test_config_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_default_game_count(8).unwrap();
    config.registry_path = Some(dir.path().join("players.json"));
    config.parse.min_match_length = 4;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_missing_file_is_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_config_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"default_game_count": 4, "parse": {"minMatchLength": 5}}"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.default_game_count, 4);
    assert_eq!(loaded.parse.min_match_length, 5);
    assert_eq!(loaded.parse.max_game_score, 300);
}

#[test]
fn test_config_file_with_zero_game_count_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"default_game_count": 0}"#).unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ImportError::Config(_))));
}

#[test]
fn test_config_rejects_zero_game_count() {
    let mut config = Config::default();
    assert!(config.set_default_game_count(0).is_err());
    assert_eq!(config.default_game_count, 6);
}
