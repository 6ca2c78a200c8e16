use std::time::Instant;

use anyhow::{bail, Context};
use tracing::log;

use crate::models::StatField;
use crate::roster_store::PlayerStat;

/// One-shot roster snapshot read at session start. All-or-nothing: any
/// malformed row aborts the whole import.
pub struct ImportService;

// the name column must match one of these exactly (case-insensitive),
// substring matching is deliberately not used
const NAME_HEADERS: [&str; 3] = ["player", "player name", "# player name"];

struct HeaderMap {
    name: usize,
    fields: Vec<(StatField, usize)>,
}

impl HeaderMap {
    fn detect(headers: &csv::StringRecord) -> anyhow::Result<HeaderMap> {
        let mut name = None;
        let mut fields = Vec::new();
        for (col, raw) in headers.iter().enumerate() {
            let header = raw.trim().to_lowercase();
            if NAME_HEADERS.contains(&header.as_str()) {
                name = Some(col);
            } else if let Ok(field) = header.parse::<StatField>() {
                fields.push((field, col));
            }
            // anything else (team name, award columns) is not roster data
        }
        match name {
            Some(name) => Ok(HeaderMap { name, fields }),
            None => bail!("no player name column, expected one of {:?}", NAME_HEADERS),
        }
    }
}

impl ImportService {
    pub fn read_roster(path: &str) -> anyhow::Result<Vec<PlayerStat>> {
        let before = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open roster file {path}"))?;
        let headers = reader.headers()
            .with_context(|| format!("Failed to read headers from {path}"))?
            .clone();
        let header_map = HeaderMap::detect(&headers)
            .with_context(|| format!("Unusable headers in {path}"))?;

        let mut players: Vec<PlayerStat> = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read row {row} of {path}"))?;
            if record.iter().all(|e| e.trim().is_empty()) {
                continue;
            }
            let name = record.get(header_map.name).map(|e| e.trim()).unwrap_or("");
            if name.is_empty() {
                // names merged across rows carry forward, the row extends the
                // previous player's tallies
                if players.is_empty() {
                    continue;
                }
            } else {
                players.push(PlayerStat::new(name.to_string()));
            }
            let player = players.last_mut().unwrap();
            for (field, col) in &header_map.fields {
                let value = ImportService::parse_cell(&record, *col)
                    .with_context(|| format!("Bad {} value on row {row} of {path}", field))?;
                player.add(*field, value);
            }
        }

        for player in players.iter_mut() {
            player.settle_pairs();
        }

        log::info!("[IMPORT] Read {} players from {} {:.0?}", players.len(), path, before.elapsed());
        Ok(players)
    }

    // blank cells count as zero, spreadsheet exports write integers as "3.0"
    fn parse_cell(record: &csv::StringRecord, col: usize) -> anyhow::Result<i32> {
        let raw = record.get(col).map(|e| e.trim()).unwrap_or("");
        if raw.is_empty() {
            return Ok(0);
        }
        if let Ok(n) = raw.parse::<i32>() {
            return Ok(n);
        }
        match raw.parse::<f64>() {
            Ok(n) if n.fract() == 0.0 => Ok(n as i32),
            _ => bail!("'{raw}' is not a whole number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempdir::TempDir;

    use crate::import_service::ImportService;

    fn write_csv(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("roster.csv");
        let mut file = std::fs::File::create(&path).expect("file to be created");
        file.write_all(content.as_bytes()).expect("file to be written");
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn reads_players_with_caption_headers() {
        let dir = TempDir::new("import_test").expect("dir to be created");
        let path = write_csv(&dir, "\
# Player Name,Team Name,FT made,2PTM,3PTM,Assist,TO,FOULS
Svensson,SL,1,2,1,3,0,2
Larsson,SL,0,4,0,1,2,1
");
        let players = ImportService::read_roster(&path).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Svensson");
        assert_eq!(players[0].free_throws.made, 1);
        assert_eq!(players[0].two_points.made, 2);
        assert_eq!(players[0].three_points.made, 1);
        assert_eq!(players[1].assists, 1);
        assert_eq!(players[1].turnovers, 2);
        assert_eq!(players[1].fouls, 1);
    }

    #[test]
    fn name_carries_forward_over_split_rows() {
        let dir = TempDir::new("import_test").expect("dir to be created");
        let path = write_csv(&dir, "\
Player,2PTM,FOULS
Svensson,2,1
,3,0
Larsson,1,0
");
        let players = ImportService::read_roster(&path).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].two_points.made, 5);
        assert_eq!(players[0].fouls, 1);
        assert_eq!(players[1].two_points.made, 1);
    }

    #[test]
    fn attempts_settle_to_makes_after_load() {
        let dir = TempDir::new("import_test").expect("dir to be created");
        let path = write_csv(&dir, "\
Player,2PTM
Svensson,4
");
        let players = ImportService::read_roster(&path).unwrap();
        assert_eq!(players[0].two_points.attempted, 4);
    }

    #[test]
    fn empty_rows_and_spreadsheet_floats_are_tolerated() {
        let dir = TempDir::new("import_test").expect("dir to be created");
        let path = write_csv(&dir, "\
Player,3PTM,REB
,,
Svensson,2.0,
");
        let players = ImportService::read_roster(&path).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].three_points.made, 2);
        assert_eq!(players[0].rebounds, 0);
    }

    #[test]
    fn missing_name_column_is_a_hard_error() {
        let dir = TempDir::new("import_test").expect("dir to be created");
        let path = write_csv(&dir, "\
Participant,2PTM
Svensson,2
");
        let err = ImportService::read_roster(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("name column"));
    }

    #[test]
    fn non_numeric_cell_aborts_the_import() {
        let dir = TempDir::new("import_test").expect("dir to be created");
        let path = write_csv(&dir, "\
Player,2PTM
Svensson,lots
");
        assert!(ImportService::read_roster(&path).is_err());
    }
}
