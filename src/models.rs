use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSide {
    Home,
    Away,
}
impl TeamSide {
    pub fn get_all() -> Vec<TeamSide> {
        vec![TeamSide::Home, TeamSide::Away]
    }
}
impl FromStr for TeamSide {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(TeamSide::Home),
            "Home" => Ok(TeamSide::Home),
            "away" => Ok(TeamSide::Away),
            "Away" => Ok(TeamSide::Away),
            _ => Err(ParseStringError)
        }
    }
}
impl Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwardKind {
    Best,
    Defensive,
}
impl AwardKind {
    pub fn get_all() -> Vec<AwardKind> {
        vec![AwardKind::Best, AwardKind::Defensive]
    }
}
impl FromStr for AwardKind {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" => Ok(AwardKind::Best),
            "Best" => Ok(AwardKind::Best),
            "defensive" => Ok(AwardKind::Defensive),
            "Defensive" => Ok(AwardKind::Defensive),
            _ => Err(ParseStringError)
        }
    }
}
impl Display for AwardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The three shot types that carry a (made, attempted) pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotClass {
    FreeThrow,
    TwoPoint,
    ThreePoint,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    FreeThrowsMade,
    FreeThrowsAttempted,
    TwoMade,
    TwoAttempted,
    ThreeMade,
    ThreeAttempted,
    Rebounds,
    Steals,
    Blocks,
    Assists,
    Turnovers,
    Fouls,
}

impl StatField {
    pub fn get_all() -> Vec<StatField> {
        vec![
            StatField::FreeThrowsMade, StatField::FreeThrowsAttempted,
            StatField::TwoMade, StatField::TwoAttempted,
            StatField::ThreeMade, StatField::ThreeAttempted,
            StatField::Rebounds, StatField::Steals, StatField::Blocks,
            StatField::Assists, StatField::Turnovers, StatField::Fouls,
        ]
    }

    /// Shot class this field belongs to, if it is half of a paired counter.
    pub fn shot_class(&self) -> Option<ShotClass> {
        match self {
            StatField::FreeThrowsMade | StatField::FreeThrowsAttempted => Some(ShotClass::FreeThrow),
            StatField::TwoMade | StatField::TwoAttempted => Some(ShotClass::TwoPoint),
            StatField::ThreeMade | StatField::ThreeAttempted => Some(ShotClass::ThreePoint),
            _ => None,
        }
    }
}

impl FromStr for StatField {
    type Err = ParseStringError;

    // accepts both the wire names and the scoresheet captions
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free_throws_made" | "ft made" | "ftm" => Ok(StatField::FreeThrowsMade),
            "free_throws_attempted" | "ft attempted" | "fta" => Ok(StatField::FreeThrowsAttempted),
            "two_made" | "2ptm" => Ok(StatField::TwoMade),
            "two_attempted" | "2pta" => Ok(StatField::TwoAttempted),
            "three_made" | "3ptm" => Ok(StatField::ThreeMade),
            "three_attempted" | "3pta" => Ok(StatField::ThreeAttempted),
            "rebounds" | "reb" => Ok(StatField::Rebounds),
            "steals" | "stl" => Ok(StatField::Steals),
            "blocks" | "blk" => Ok(StatField::Blocks),
            "assists" | "assist" => Ok(StatField::Assists),
            "turnovers" | "to" => Ok(StatField::Turnovers),
            "fouls" => Ok(StatField::Fouls),
            _ => Err(ParseStringError)
        }
    }
}
impl Display for StatField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseStringError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfRange { index: usize, len: usize },
    InvalidFieldName(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IndexOutOfRange { index, len } => write!(f, "player index {index} out of range, roster has {len} players"),
            StoreError::InvalidFieldName(name) => write!(f, "unknown stat field '{name}'"),
        }
    }
}
impl std::error::Error for StoreError {}
