//! Client for the third-party cricket match-info API, used by the `probe` tool.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.cricapi.com/v1";

#[derive(Debug, Error)]
enum MatchInfoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned failure: {0}")]
    Failure(String),

    #[error("response had no match data")]
    MissingData,
}

/// One side of a match as reported by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchTeam {
    #[serde(default, alias = "teamName")]
    pub name: Option<String>,
    #[serde(default, alias = "teamSName", alias = "shortname")]
    pub short_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    pub team1: MatchTeam,
    pub team2: MatchTeam,
    /// Everything else the API reports (venue, status, toss, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: Option<String>,
    reason: Option<String>,
    data: Option<MatchInfo>,
}

pub struct MatchInfoClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl MatchInfoClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    /// Look up a match. Any failure is logged and reported as `None`; there
    /// are no retries.
    pub async fn match_info(&self, match_id: u64) -> Option<MatchInfo> {
        match self.fetch(match_id).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Match info lookup for {} failed: {}", match_id, e);
                None
            }
        }
    }

    async fn fetch(&self, match_id: u64) -> Result<MatchInfo, MatchInfoError> {
        let url = format!("{}/match_info", self.base_url);
        debug!("GET {} id={}", url, match_id);

        let envelope = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(&[("id", match_id)])
            .send()
            .await?
            .error_for_status()?
            .json::<Envelope>()
            .await?;

        match envelope.status.as_deref() {
            Some("success") | None => {}
            Some(status) => {
                return Err(MatchInfoError::Failure(
                    envelope.reason.clone().unwrap_or_else(|| status.to_string()),
                ));
            }
        }

        envelope.data.ok_or(MatchInfoError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, routing::get};
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    const KEY: &str = "match-key";

    async fn fake_match_info(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        if params.get("apikey").map(String::as_str) != Some(KEY) {
            return Json(json!({ "status": "failure", "reason": "Invalid API key" }));
        }

        match params.get("id").map(String::as_str) {
            Some("35612") => Json(json!({
                "status": "success",
                "data": {
                    "team1": { "teamName": "India", "teamSName": "IND" },
                    "team2": { "teamName": "Australia", "teamSName": "AUS" },
                    "venue": "Wankhede"
                }
            })),
            _ => Json(json!({ "status": "success" })),
        }
    }

    /// Serve a fake match API on a random port and return its base URL.
    async fn start_fake_api() -> String {
        let router = Router::new().route("/match_info", get(fake_match_info));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn sends_key_and_id_and_returns_teams() {
        let base_url = start_fake_api().await;
        let client = MatchInfoClient::new(&base_url, KEY);

        let info = client.match_info(35612).await.expect("match info");
        assert_eq!(info.team1.name.as_deref(), Some("India"));
        assert_eq!(info.team2.short_name.as_deref(), Some("AUS"));
        assert_eq!(info.extra["venue"], Value::from("Wankhede"));
    }

    #[tokio::test]
    async fn failure_status_yields_none() {
        let base_url = start_fake_api().await;
        let client = MatchInfoClient::new(&base_url, "wrong-key");

        assert!(client.match_info(35612).await.is_none());
    }

    #[tokio::test]
    async fn success_without_data_yields_none() {
        let base_url = start_fake_api().await;
        let client = MatchInfoClient::new(&base_url, KEY);

        assert!(client.match_info(1).await.is_none());
    }

    #[test]
    fn parses_teams_and_keeps_extra_keys() {
        let json = r#"{
            "team1": {"teamName": "India", "teamSName": "IND", "teamId": 2},
            "team2": {"name": "Australia", "shortname": "AUS"},
            "venue": "Wankhede",
            "matchId": 35612
        }"#;

        let info: MatchInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.team1.name.as_deref(), Some("India"));
        assert_eq!(info.team1.short_name.as_deref(), Some("IND"));
        assert_eq!(info.team1.extra["teamId"], Value::from(2));
        assert_eq!(info.team2.short_name.as_deref(), Some("AUS"));
        assert_eq!(info.extra["venue"], Value::from("Wankhede"));
    }

    #[test]
    fn envelope_without_data_is_allowed() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"status":"failure","reason":"Invalid API key"}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.reason.as_deref(), Some("Invalid API key"));
    }

    #[tokio::test]
    async fn unreachable_api_yields_none() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let client = MatchInfoClient::new("http://127.0.0.1:9", "key");
        assert!(client.match_info(1).await.is_none());
    }
}
