use serde::{Deserialize, Serialize};

use crate::models::ShotClass;
use crate::roster_store::{PairedCounter, PlayerStat};

/// Fields computed from the stored counters on every read, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DerivedStat {
    pub field_goals_made: i32,
    pub field_goals_attempted: i32,
    pub points: i32,
    pub ft_perc: String,
    pub two_perc: String,
    pub three_perc: String,
    pub fg_perc: String,
}

/// One row of the derived roster table, row order = roster order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub player: PlayerStat,
    pub derived: DerivedStat,
}

/// Elementwise sums of the integer counters. Percentages are not additive
/// and are deliberately absent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamTotals {
    pub free_throws_made: i32,
    pub free_throws_attempted: i32,
    pub two_made: i32,
    pub two_attempted: i32,
    pub three_made: i32,
    pub three_attempted: i32,
    pub rebounds: i32,
    pub steals: i32,
    pub blocks: i32,
    pub assists: i32,
    pub turnovers: i32,
    pub fouls: i32,
    pub points: i32,
}

pub struct AggregationService;

impl AggregationService {
    pub fn derive(player: &PlayerStat) -> DerivedStat {
        let field_goals = PairedCounter {
            made: player.two_points.made + player.three_points.made,
            attempted: player.two_points.attempted + player.three_points.attempted,
        };
        DerivedStat {
            field_goals_made: field_goals.made,
            field_goals_attempted: field_goals.attempted,
            points: player.free_throws.made + 2 * player.two_points.made + 3 * player.three_points.made,
            ft_perc: AggregationService::percentage(player.pair(ShotClass::FreeThrow)),
            two_perc: AggregationService::percentage(player.pair(ShotClass::TwoPoint)),
            three_perc: AggregationService::percentage(player.pair(ShotClass::ThreePoint)),
            fg_perc: AggregationService::percentage(&field_goals),
        }
    }

    pub fn rows(players: &[PlayerStat]) -> Vec<PlayerRow> {
        players.iter()
            .map(|e| PlayerRow { player: e.clone(), derived: AggregationService::derive(e) })
            .collect()
    }

    /// Order-independent, an empty roster sums to all zeros.
    pub fn aggregate(players: &[PlayerStat]) -> TeamTotals {
        players.iter().fold(TeamTotals::default(), |mut a, b| {
            a.free_throws_made += b.free_throws.made;
            a.free_throws_attempted += b.free_throws.attempted;
            a.two_made += b.two_points.made;
            a.two_attempted += b.two_points.attempted;
            a.three_made += b.three_points.made;
            a.three_attempted += b.three_points.attempted;
            a.rebounds += b.rebounds;
            a.steals += b.steals;
            a.blocks += b.blocks;
            a.assists += b.assists;
            a.turnovers += b.turnovers;
            a.fouls += b.fouls;
            a.points += b.free_throws.made + 2 * b.two_points.made + 3 * b.three_points.made;
            a
        })
    }

    // "0%" is the sentinel for no attempts, distinct from a true "0.0%"
    fn percentage(pair: &PairedCounter) -> String {
        if pair.attempted == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", pair.made as f64 * 100.0 / pair.attempted as f64)
        }
    }
}
