use serde::{Deserialize, Serialize};
use std::fs;

use crate::models::TeamSide;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub port: u16,

    pub home_team: String,
    pub away_team: String,

    #[serde(default="default_roster_size")]
    pub default_roster_size: usize,

    #[serde(default="default_max_roster_size")]
    pub max_roster_size: usize,

    // optional session-start roster snapshots, one CSV per side
    #[serde(default)]
    pub home_import_path: Option<String>,
    #[serde(default)]
    pub away_import_path: Option<String>,

    #[serde(default="default_export_path")]
    pub export_path: String,
}

fn default_roster_size() -> usize {
    5
}

fn default_max_roster_size() -> usize {
    20
}

fn default_export_path() -> String {
    "./export".to_string()
}

impl Config {
    pub fn get_team_name(&self, side: &TeamSide) -> &str {
        match side {
            TeamSide::Home => self.home_team.as_str(),
            TeamSide::Away => self.away_team.as_str(),
        }
    }

    pub fn get_import_path(&self, side: &TeamSide) -> Option<&str> {
        match side {
            TeamSide::Home => self.home_import_path.as_deref(),
            TeamSide::Away => self.away_import_path.as_deref(),
        }
    }
}

pub fn get_config() -> Config {
    let path = std::env::var("CONFIG_PATH").ok()
        .unwrap_or_else(|| "./deployment/config.json".to_string());
    let data = fs::read_to_string(path.clone())
        .expect("Unable to read file");
    let mut result: Config = serde_json::from_str(&data)
        .unwrap_or_else(|_| panic!("{}", &format!("Could not parse JSON at {path}!")));
    if let Ok(export_path) = std::env::var("EXPORT_PATH") {
        result.export_path = export_path;
        println!("[CONFIG] EXPORT_PATH {}", result.export_path);
    }
    println!("[CONFIG] {:?}", result);
    result
}
