//! 取り込み先大会の選択

use crate::error::{ImportError, Result};
use bowling_import_common::{RecordId, TournamentCatalog, TournamentRef};
use dialoguer::Select;

/// 指定IDの大会を探す。カタログが空ならIDだけの大会として扱う
pub fn find_tournament(catalog: &TournamentCatalog, requested: &str) -> Result<TournamentRef> {
    let id: RecordId = requested
        .parse()
        .map_err(|_| ImportError::TournamentNotFound(requested.to_string()))?;

    if catalog.is_empty() {
        return Ok(TournamentRef {
            name: id.to_string(),
            id,
            game_count: None,
        });
    }

    catalog
        .find(&id)
        .cloned()
        .ok_or_else(|| ImportError::TournamentNotFound(requested.to_string()))
}

/// 選択肢の表示名
pub fn tournament_label(tournament: &TournamentRef) -> String {
    match tournament.game_count {
        Some(n) => format!("{} ({}ゲーム)", tournament.name, n),
        None => tournament.name.clone(),
    }
}

/// 大会を決める（指定が無ければカタログから対話式で選択）
pub fn select_tournament(
    catalog: &TournamentCatalog,
    requested: Option<&str>,
) -> Result<TournamentRef> {
    if let Some(requested) = requested {
        return find_tournament(catalog, requested);
    }
    if catalog.is_empty() {
        return Err(ImportError::MissingTournament);
    }

    let labels: Vec<String> = catalog.tournaments.iter().map(tournament_label).collect();
    let selection = Select::new()
        .with_prompt("取り込み先の大会を選択")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(|e| ImportError::Prompt(e.to_string()))?;

    match selection {
        Some(idx) => Ok(catalog.tournaments[idx].clone()),
        None => Err(ImportError::MissingTournament),
    }
}
