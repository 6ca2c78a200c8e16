use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::log;

use crate::models::{AwardKind, ShotClass, StatField, StoreError};

/// A (made, attempted) pair. Attempts track makes: a sheet that only tallies
/// makes still reads as a consistent pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairedCounter {
    pub made: i32,
    pub attempted: i32,
}

impl PairedCounter {
    fn settle(&mut self) {
        self.attempted = self.attempted.max(self.made);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerStat {
    pub name: String,
    pub free_throws: PairedCounter,
    pub two_points: PairedCounter,
    pub three_points: PairedCounter,
    pub rebounds: i32,
    pub steals: i32,
    pub blocks: i32,
    pub assists: i32,
    pub turnovers: i32,
    pub fouls: i32,
}

impl PlayerStat {
    pub fn new(name: String) -> PlayerStat {
        PlayerStat {
            name,
            free_throws: PairedCounter::default(),
            two_points: PairedCounter::default(),
            three_points: PairedCounter::default(),
            rebounds: 0,
            steals: 0,
            blocks: 0,
            assists: 0,
            turnovers: 0,
            fouls: 0,
        }
    }

    /// Default record for roster slot `slot` (0-based), named with the
    /// 1-based number printed on the sheet.
    pub fn for_slot(slot: usize) -> PlayerStat {
        PlayerStat::new(format!("Player {}", slot + 1))
    }

    pub fn pair(&self, class: ShotClass) -> &PairedCounter {
        match class {
            ShotClass::FreeThrow => &self.free_throws,
            ShotClass::TwoPoint => &self.two_points,
            ShotClass::ThreePoint => &self.three_points,
        }
    }

    fn pair_mut(&mut self, class: ShotClass) -> &mut PairedCounter {
        match class {
            ShotClass::FreeThrow => &mut self.free_throws,
            ShotClass::TwoPoint => &mut self.two_points,
            ShotClass::ThreePoint => &mut self.three_points,
        }
    }

    // no floor at zero, a decrement on an empty counter goes negative
    fn apply(&mut self, field: StatField, delta: i32) {
        self.add(field, delta);
        if let Some(class) = field.shot_class() {
            self.pair_mut(class).settle();
        }
    }

    /// Raw accumulation without the paired-counter settle. Batch loaders use
    /// this and call [`PlayerStat::settle_pairs`] once at the end.
    pub fn add(&mut self, field: StatField, amount: i32) {
        match field {
            StatField::FreeThrowsMade => self.free_throws.made += amount,
            StatField::FreeThrowsAttempted => self.free_throws.attempted += amount,
            StatField::TwoMade => self.two_points.made += amount,
            StatField::TwoAttempted => self.two_points.attempted += amount,
            StatField::ThreeMade => self.three_points.made += amount,
            StatField::ThreeAttempted => self.three_points.attempted += amount,
            StatField::Rebounds => self.rebounds += amount,
            StatField::Steals => self.steals += amount,
            StatField::Blocks => self.blocks += amount,
            StatField::Assists => self.assists += amount,
            StatField::Turnovers => self.turnovers += amount,
            StatField::Fouls => self.fouls += amount,
        }
    }

    /// Re-assert attempted >= made on all three pairs. Used after batch loads
    /// that fill made and attempted independently.
    pub fn settle_pairs(&mut self) {
        self.free_throws.settle();
        self.two_points.settle();
        self.three_points.settle();
    }
}

/// Per-team roster for one scoring session. Owned by the session, handed to
/// each request handler, torn down when the session ends.
pub struct RosterStore {
    players: Vec<PlayerStat>,
    best: Option<usize>,
    defensive: Option<usize>,
}

pub type SafeRosterStore = Arc<RwLock<RosterStore>>;

impl RosterStore {
    pub fn new(initial_len: usize) -> RosterStore {
        let mut store = RosterStore { players: Vec::new(), best: None, defensive: None };
        store.resize(initial_len);
        store
    }

    pub fn from_players(players: Vec<PlayerStat>) -> RosterStore {
        RosterStore { players, best: None, defensive: None }
    }

    pub fn into_safe(self) -> SafeRosterStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerStat] {
        &self.players
    }

    /// Grow by appending default records with sheet numbering continuing from
    /// the current length, shrink by truncating from the tail. Survivors are
    /// never reordered or reinitialized.
    pub fn resize(&mut self, target_len: usize) {
        let len = self.players.len();
        match target_len.cmp(&len) {
            std::cmp::Ordering::Greater => {
                for slot in len..target_len {
                    self.players.push(PlayerStat::for_slot(slot));
                }
                log::info!("[ROSTER] Grew {} -> {}", len, target_len);
            }
            std::cmp::Ordering::Less => {
                self.players.truncate(target_len);
                if self.best.map(|e| e >= target_len).unwrap_or(false) {
                    self.best = None;
                }
                if self.defensive.map(|e| e >= target_len).unwrap_or(false) {
                    self.defensive = None;
                }
                log::info!("[ROSTER] Shrunk {} -> {}", len, target_len);
            }
            std::cmp::Ordering::Equal => {}
        }
    }

    pub fn apply_delta(&mut self, index: usize, field: StatField, delta: i32) -> Result<(), StoreError> {
        let len = self.players.len();
        let player = self.players.get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        player.apply(field, delta);
        log::debug!("[ROSTER] {} {} {:+}", player.name, field, delta);
        Ok(())
    }

    pub fn rename(&mut self, index: usize, new_name: String) -> Result<(), StoreError> {
        let len = self.players.len();
        let player = self.players.get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        player.name = new_name;
        Ok(())
    }

    /// Record an operator-chosen award. No ranking logic, both roles may
    /// point at the same player.
    pub fn select_award(&mut self, award: AwardKind, index: usize) -> Result<(), StoreError> {
        let len = self.players.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        match award {
            AwardKind::Best => self.best = Some(index),
            AwardKind::Defensive => self.defensive = Some(index),
        }
        log::info!("[ROSTER] {} player: {}", award, self.players[index].name);
        Ok(())
    }

    pub fn award(&self, award: AwardKind) -> Option<&PlayerStat> {
        let index = match award {
            AwardKind::Best => self.best,
            AwardKind::Defensive => self.defensive,
        };
        index.and_then(|e| self.players.get(e))
    }
}
