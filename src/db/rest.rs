//! Client for the hosted database's PostgREST-style HTTP facade.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use tracing::debug;

use super::{DatabaseClient, DbError, Row, SelectQuery};

/// Error body returned by the REST facade on a failed query
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
    code: Option<String>,
}

pub struct RestClient {
    base_url: String,
    service_role_key: String,
    client: Client,
}

impl RestClient {
    pub fn new(base_url: &str, service_role_key: &str) -> Result<Self, DbError> {
        let client = Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Query-string pairs in the facade's dialect:
    /// `select=a,b`, `order=name.asc`, `team_id=eq.3`.
    pub fn query_params(query: &SelectQuery) -> Vec<(String, String)> {
        let mut params = Vec::new();

        let select = if query.columns.is_empty() {
            "*".to_string()
        } else {
            query.columns.join(",")
        };
        params.push(("select".to_string(), select));

        if let Some((column, order)) = &query.order {
            params.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }

        for filter in &query.filters {
            params.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }

        params
    }
}

#[async_trait]
impl DatabaseClient for RestClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, DbError> {
        query.validate()?;

        let url = self.table_url(&query.table);
        debug!("GET {} ({} filters)", url, query.filters.len());

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(query))
            .header("apikey", &self.service_role_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        let rows = response.json::<Vec<Row>>().await?;
        Ok(rows)
    }
}

fn error_from_body(status: StatusCode, body: &str) -> DbError {
    match serde_json::from_str::<RestErrorBody>(body) {
        Ok(RestErrorBody {
            message: Some(message),
            code,
            ..
        }) => DbError::Query { message, code },
        _ if !body.trim().is_empty() => DbError::query(body.trim()),
        _ => DbError::query(format!("request failed with status {}", status)),
    }
}
