use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Router, extract::{Path, State}, Json};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tracing::log;

use crate::aggregation_service::{AggregationService, PlayerRow, TeamTotals};
use crate::models::{AwardKind, StatField, StoreError, TeamSide};
use crate::roster_store::SafeRosterStore;
use crate::sheet_service::{SheetExport, SheetService};

#[derive(Clone)]
pub struct ApiState {
    pub home: SafeRosterStore,
    pub away: SafeRosterStore,
    pub home_team: String,
    pub away_team: String,
    pub max_roster_size: usize,
    pub export_path: String,
}

impl ApiState {
    fn store(&self, team: &str) -> Result<&SafeRosterStore, (StatusCode, String)> {
        match team.parse() {
            Ok(TeamSide::Home) => Ok(&self.home),
            Ok(TeamSide::Away) => Ok(&self.away),
            Err(_) => Err((StatusCode::NOT_FOUND, "404".to_string())),
        }
    }

    fn team_name(&self, team: &str) -> Result<&str, (StatusCode, String)> {
        match team.parse() {
            Ok(TeamSide::Home) => Ok(self.home_team.as_str()),
            Ok(TeamSide::Away) => Ok(self.away_team.as_str()),
            Err(_) => Err((StatusCode::NOT_FOUND, "404".to_string())),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct ResizeBody {
    pub players: usize,
}

#[derive(Deserialize, Serialize)]
pub struct DeltaBody {
    pub player_index: usize,
    pub field: String,
    pub delta: i32,
}

#[derive(Deserialize, Serialize)]
pub struct NameBody {
    pub player_index: usize,
    pub name: String,
}

#[derive(Deserialize, Serialize)]
pub struct AwardBody {
    pub award: String,
    pub player_index: usize,
}

pub struct Api;
impl Api {
    pub async fn serve(port: u16, state: ApiState) {
        let app = Api::router(state);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        log::info!("[API] Listening on {}", addr);
        _ = axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await;
    }

    pub fn router(state: ApiState) -> Router {
        Router::new()
            .route("/roster/:team", axum::routing::get(Api::get_roster))
            .route("/roster/:team/resize", axum::routing::post(Api::resize))
            .route("/roster/:team/delta", axum::routing::post(Api::delta))
            .route("/roster/:team/name", axum::routing::post(Api::rename))
            .route("/roster/:team/award", axum::routing::post(Api::award))
            .route("/totals/:team", axum::routing::get(Api::get_totals))
            .route("/sheet/:team", axum::routing::get(Api::get_sheet))
            .route("/sheet/:team/export", axum::routing::post(Api::export_sheet))

            .route("/", axum::routing::get(Api::root))
            .with_state(state)
            .layer(ServiceBuilder::new()
                .layer(CompressionLayer::new())
            )
    }

    async fn root() -> &'static str {
        "Tip-off"
    }

    async fn get_roster(Path(team): Path<String>, State(state): State<ApiState>) -> Result<Json<Vec<PlayerRow>>, (StatusCode, String)> {
        let store = state.store(&team)?.read().await;
        Ok(Json(AggregationService::rows(store.players())))
    }

    // resize is an explicit command, a request for the current length is a no-op
    async fn resize(Path(team): Path<String>, State(state): State<ApiState>, Json(body): Json<ResizeBody>) -> Result<Json<ResizeBody>, (StatusCode, String)> {
        if body.players < 1 || body.players > state.max_roster_size {
            return Err((StatusCode::BAD_REQUEST, format!("player count must be within [1, {}]", state.max_roster_size)));
        }
        let mut store = state.store(&team)?.write().await;
        if body.players != store.len() {
            store.resize(body.players);
        }
        Ok(Json(ResizeBody { players: store.len() }))
    }

    async fn delta(Path(team): Path<String>, State(state): State<ApiState>, Json(body): Json<DeltaBody>) -> Result<Json<PlayerRow>, (StatusCode, String)> {
        let field: StatField = body.field.parse()
            .map_err(|_| to_rsp(StoreError::InvalidFieldName(body.field.clone())))?;
        if body.delta != 1 && body.delta != -1 {
            return Err((StatusCode::BAD_REQUEST, "delta must be +1 or -1".to_string()));
        }
        let mut store = state.store(&team)?.write().await;
        store.apply_delta(body.player_index, field, body.delta).map_err(to_rsp)?;
        let player = &store.players()[body.player_index];
        Ok(Json(PlayerRow { player: player.clone(), derived: AggregationService::derive(player) }))
    }

    async fn rename(Path(team): Path<String>, State(state): State<ApiState>, Json(body): Json<NameBody>) -> Result<StatusCode, (StatusCode, String)> {
        let mut store = state.store(&team)?.write().await;
        store.rename(body.player_index, body.name).map_err(to_rsp)?;
        Ok(StatusCode::OK)
    }

    async fn award(Path(team): Path<String>, State(state): State<ApiState>, Json(body): Json<AwardBody>) -> Result<StatusCode, (StatusCode, String)> {
        let award: AwardKind = body.award.parse()
            .map_err(|_| (StatusCode::BAD_REQUEST, format!("unknown award '{}'", body.award)))?;
        let mut store = state.store(&team)?.write().await;
        store.select_award(award, body.player_index).map_err(to_rsp)?;
        Ok(StatusCode::OK)
    }

    async fn get_totals(Path(team): Path<String>, State(state): State<ApiState>) -> Result<Json<TeamTotals>, (StatusCode, String)> {
        let store = state.store(&team)?.read().await;
        Ok(Json(AggregationService::aggregate(store.players())))
    }

    async fn get_sheet(Path(team): Path<String>, State(state): State<ApiState>) -> Result<Json<SheetExport>, (StatusCode, String)> {
        let name = state.team_name(&team)?.to_string();
        let store = state.store(&team)?.read().await;
        Ok(Json(SheetService::assemble(&name, &store)))
    }

    async fn export_sheet(Path(team): Path<String>, State(state): State<ApiState>) -> Result<String, (StatusCode, String)> {
        let name = state.team_name(&team)?.to_string();
        let sheet = {
            let store = state.store(&team)?.read().await;
            SheetService::assemble(&name, &store)
        };
        SheetService::write(&sheet, &state.export_path)
            .map_err(|e| {
                log::error!("[API] Export failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
            })
    }
}

fn to_rsp(e: StoreError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}
