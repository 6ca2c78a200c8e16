use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::log;

use crate::aggregation_service::{AggregationService, PlayerRow, TeamTotals};
use crate::models::AwardKind;
use crate::roster_store::RosterStore;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TotalsRow {
    pub label: String,
    pub value: i32,
}

/// The two-sheet export: one row per player plus a transposed totals sheet.
/// Both tables are passed through to the serializer unmodified.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SheetExport {
    pub team: String,
    pub date: String,
    pub players: Vec<PlayerRow>,
    pub totals: Vec<TotalsRow>,
    pub best_player: Option<String>,
    pub defensive_player: Option<String>,
}

pub struct SheetService;

impl SheetService {
    pub fn assemble(team: &str, store: &RosterStore) -> SheetExport {
        let players = AggregationService::rows(store.players());
        let totals = SheetService::transpose(&AggregationService::aggregate(store.players()));
        SheetExport {
            team: team.to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            players,
            totals,
            best_player: store.award(AwardKind::Best).map(|e| e.name.clone()),
            defensive_player: store.award(AwardKind::Defensive).map(|e| e.name.clone()),
        }
    }

    // integer counters only, percentages are not additive
    fn transpose(totals: &TeamTotals) -> Vec<TotalsRow> {
        let rows = [
            ("FT made", totals.free_throws_made),
            ("FT attempted", totals.free_throws_attempted),
            ("2PTM", totals.two_made),
            ("2PTA", totals.two_attempted),
            ("3PTM", totals.three_made),
            ("3PTA", totals.three_attempted),
            ("REB", totals.rebounds),
            ("STL", totals.steals),
            ("BLK", totals.blocks),
            ("Assist", totals.assists),
            ("TO", totals.turnovers),
            ("FOULS", totals.fouls),
            ("Points", totals.points),
        ];
        rows.into_iter()
            .map(|(label, value)| TotalsRow { label: label.to_string(), value })
            .collect()
    }

    pub fn write(export: &SheetExport, dir: &str) -> anyhow::Result<String> {
        let before = Instant::now();
        let json = serde_json::to_string(export)
            .with_context(|| format!("Failed to serialize sheet for {}", export.team))?;
        let path = std::path::PathBuf::from(format!("{}/{}_{}.json", dir, export.team, export.date));
        std::fs::create_dir_all(path.parent().unwrap())
            .with_context(|| format!("Failed to create export dir {dir}"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write sheet {}", path.display()))?;
        log::info!("[SHEET] Wrote {} {:.0?}", path.display(), before.elapsed());
        Ok(path.to_string_lossy().to_string())
    }
}
