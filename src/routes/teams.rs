use axum::{extract::State, response::Json};

use crate::db::{Order, SelectQuery};
use crate::error::ApiError;
use crate::models::{TEAM_COLUMNS, TEAMS_TABLE, Team, TeamsResponse};
use crate::state::AppState;

use super::decode_rows;

// GET /api/teams - List all teams ordered by name
pub async fn get_teams(State(state): State<AppState>) -> Result<Json<TeamsResponse>, ApiError> {
    let query = SelectQuery::from(TEAMS_TABLE)
        .columns(TEAM_COLUMNS)
        .order_by("name", Order::Asc);

    let rows = state.db.select(&query).await.map_err(|e| {
        tracing::error!("Failed to get teams: {}", e);
        ApiError::from(e)
    })?;

    let teams: Vec<Team> = decode_rows(rows).inspect_err(|e| {
        tracing::error!("Failed to decode teams: {}", e);
    })?;

    Ok(Json(TeamsResponse { teams }))
}
