use std::io::Write;

use scoresheet_server_rs::aggregation_service::AggregationService;
use scoresheet_server_rs::import_service::ImportService;
use scoresheet_server_rs::models::{AwardKind, StatField, StoreError};
use scoresheet_server_rs::roster_store::RosterStore;
use scoresheet_server_rs::sheet_service::{SheetExport, SheetService};
use tempdir::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("file to be created");
    file.write_all(content.as_bytes()).expect("file to be written");
    path.to_str().unwrap().to_string()
}

#[test]
fn full_scoring_session() -> Result<(), Box<dyn std::error::Error>> {
    // Given - a roster snapshot from the previous game's sheet
    let temp_dir = TempDir::new("integration_test").expect("dir to be created");
    let roster_csv = write_file(&temp_dir, "roster.csv", "\
# Player Name,Team Name,FT made,2PTM,3PTM,Assist,TO,FOULS
Svensson,SL,1,2,,3,0,2
Larsson,SL,,,1,1,2,1
Nilsson,SL,,,,,,
");
    let mut store = RosterStore::from_players(ImportService::read_roster(&roster_csv)?);
    assert_eq!(store.len(), 3);

    // When - the operator grows the roster and scores the game
    store.resize(4);
    assert_eq!(store.players()[3].name, "Player 4");

    store.apply_delta(0, StatField::TwoMade, 1)?;
    store.apply_delta(0, StatField::ThreeMade, 1)?;
    store.apply_delta(0, StatField::ThreeAttempted, 1)?;
    store.apply_delta(3, StatField::Rebounds, 1)?;
    store.rename(3, "Bergström".to_string())?;
    store.select_award(AwardKind::Best, 0)?;
    store.select_award(AwardKind::Defensive, 3)?;

    // Then - derived fields and totals reflect the whole session
    let rows = AggregationService::rows(store.players());
    assert_eq!(rows[0].player.two_points.made, 3);
    assert_eq!(rows[0].player.two_points.attempted, 3);
    assert_eq!(rows[0].player.three_points.made, 1);
    assert_eq!(rows[0].player.three_points.attempted, 2);
    assert_eq!(rows[0].derived.points, 1 + 6 + 3);
    assert_eq!(rows[0].derived.three_perc, "50.0%");
    assert_eq!(rows[2].derived.fg_perc, "0%");

    let totals = AggregationService::aggregate(store.players());
    assert_eq!(totals.two_made, 3);
    assert_eq!(totals.three_made, 2);
    assert_eq!(totals.free_throws_made, 1);
    assert_eq!(totals.rebounds, 1);
    assert_eq!(totals.fouls, 3);

    // When - the sheet is exported
    let sheet = SheetService::assemble("SL", &store);
    let path = SheetService::write(&sheet, temp_dir.path().join("export").to_str().unwrap())?;

    // Then - both tables pass through unmodified
    let written: SheetExport = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    assert_eq!(written.players.len(), 4);
    assert_eq!(written.players[3].player.name, "Bergström");
    assert_eq!(written.totals.iter().find(|e| e.label == "2PTM").unwrap().value, totals.two_made);
    assert_eq!(written.best_player, Some("Svensson".to_string()));
    assert_eq!(written.defensive_player, Some("Bergström".to_string()));
    Ok(())
}

#[test]
fn failed_requests_leave_the_roster_unchanged() {
    let mut store = RosterStore::new(2);
    store.apply_delta(0, StatField::Assists, 1).unwrap();
    let snapshot = store.players().to_vec();

    assert_eq!(
        store.apply_delta(5, StatField::Assists, 1).unwrap_err(),
        StoreError::IndexOutOfRange { index: 5, len: 2 }
    );
    assert_eq!(
        store.rename(2, "Svensson".to_string()).unwrap_err(),
        StoreError::IndexOutOfRange { index: 2, len: 2 }
    );
    assert_eq!(
        store.select_award(AwardKind::Best, 2).unwrap_err(),
        StoreError::IndexOutOfRange { index: 2, len: 2 }
    );
    assert_eq!(store.players(), &snapshot[..]);
    assert!(store.award(AwardKind::Best).is_none());
}

#[test]
fn grow_then_shrink_restores_the_original_roster() {
    let mut store = RosterStore::new(3);
    store.rename(1, "Svensson".to_string()).unwrap();
    store.apply_delta(2, StatField::Steals, 1).unwrap();
    let original = store.players().to_vec();

    store.resize(8);
    store.apply_delta(7, StatField::Blocks, 1).unwrap();
    store.resize(3);

    assert_eq!(store.players(), &original[..]);
}
