use lazy_static::lazy_static;
use tracing::log;

use scoresheet_server_rs::api::{Api, ApiState};
use scoresheet_server_rs::config_handler::{self, Config};
use scoresheet_server_rs::import_service::ImportService;
use scoresheet_server_rs::models::TeamSide;
use scoresheet_server_rs::roster_store::RosterStore;

lazy_static! {
    pub static ref CONFIG: Config = config_handler::get_config();
}

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        // Set the RUST_LOG, if it hasn't been explicitly defined
        std::env::set_var("RUST_LOG", "debug,hyper=debug")
    }

    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_max_level(tracing::Level::INFO)
        .init();

    let state = ApiState {
        home: build_store(&TeamSide::Home).into_safe(),
        away: build_store(&TeamSide::Away).into_safe(),
        home_team: CONFIG.get_team_name(&TeamSide::Home).to_string(),
        away_team: CONFIG.get_team_name(&TeamSide::Away).to_string(),
        max_roster_size: CONFIG.max_roster_size,
        export_path: CONFIG.export_path.clone(),
    };

    Api::serve(CONFIG.port, state).await;
}

// session-start import is all-or-nothing, a failed read falls back to the
// configured default roster
fn build_store(side: &TeamSide) -> RosterStore {
    match CONFIG.get_import_path(side) {
        Some(path) => match ImportService::read_roster(path) {
            Ok(players) if !players.is_empty() => RosterStore::from_players(players),
            Ok(_) => {
                log::warn!("[IMPORT] {} roster file {} has no players, using defaults", side, path);
                RosterStore::new(CONFIG.default_roster_size)
            }
            Err(e) => {
                log::error!("[IMPORT] {} roster import failed: {:#}, using defaults", side, e);
                RosterStore::new(CONFIG.default_roster_size)
            }
        },
        None => RosterStore::new(CONFIG.default_roster_size),
    }
}
