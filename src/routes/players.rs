use axum::{extract::State, response::Json};

use crate::db::{Order, SelectQuery};
use crate::error::ApiError;
use crate::models::{PLAYER_COLUMNS, PLAYERS_TABLE, Player, PlayersResponse};
use crate::state::AppState;

use super::decode_rows;

// GET /api/players - List all players ordered by name
pub async fn get_players(
    State(state): State<AppState>,
) -> Result<Json<PlayersResponse>, ApiError> {
    let query = SelectQuery::from(PLAYERS_TABLE)
        .columns(PLAYER_COLUMNS)
        .order_by("name", Order::Asc);

    let rows = state.db.select(&query).await.map_err(|e| {
        tracing::error!("Failed to get players: {}", e);
        ApiError::from(e)
    })?;

    let players: Vec<Player> = decode_rows(rows).inspect_err(|e| {
        tracing::error!("Failed to decode players: {}", e);
    })?;

    Ok(Json(PlayersResponse { players }))
}
