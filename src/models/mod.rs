use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLAYERS_TABLE: &str = "players";
pub const TEAMS_TABLE: &str = "teams";

/// Columns projected by `GET /api/players`
pub const PLAYER_COLUMNS: &[&str] = &[
    "player_id",
    "name",
    "face_image_id",
    "face_image_url",
    "role",
    "team_id",
];

/// Columns projected by `GET /api/teams`
pub const TEAM_COLUMNS: &[&str] = &["team_id", "name", "short_name", "image_id", "image_url"];

// The tables are owned by the hosted database, so identifier columns are
// forwarded in whatever JSON form the store returns (number, text or null).

/// Player row as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub player_id: Value,
    pub name: Option<String>,
    #[serde(default)]
    pub face_image_id: Value,
    pub face_image_url: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub team_id: Value,
}

/// Team row as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub team_id: Value,
    pub name: Option<String>,
    pub short_name: Option<String>,
    #[serde(default)]
    pub image_id: Value,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
