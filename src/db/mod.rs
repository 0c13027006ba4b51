use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::Config;

mod error;
pub mod rest;
pub mod sqlite;

pub use error::DbError;
pub use rest::RestClient;
pub use sqlite::SqliteClient;

/// A single result row keyed by column name.
pub type Row = Map<String, Value>;

/// Read access to the tables this service exposes.
///
/// Implementations must return rows in the order the query asks for; handlers
/// forward them as-is.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, DbError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

/// A `SELECT <columns> FROM <table> [WHERE col = v ...] [ORDER BY col dir]`,
/// described independently of the backend that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub order: Option<(String, Order)>,
    pub filters: Vec<Filter>,
}

impl SelectQuery {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            order: None,
            filters: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Reject identifiers that are not plain `[A-Za-z0-9_]+` names.
    pub fn validate(&self) -> Result<(), DbError> {
        let identifiers = std::iter::once(&self.table)
            .chain(self.columns.iter())
            .chain(self.order.iter().map(|(column, _)| column))
            .chain(self.filters.iter().map(|f| &f.column));

        for ident in identifiers {
            let valid = !ident.is_empty()
                && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(DbError::InvalidIdentifier(ident.clone()));
            }
        }

        Ok(())
    }
}

/// Build the client the config asks for: the local SQLite mirror when
/// `LOCAL_DATABASE_URL` is set, the hosted REST facade otherwise.
pub async fn connect(config: &Config) -> Result<Arc<dyn DatabaseClient>, DbError> {
    match &config.local_database_url {
        Some(url) => {
            tracing::info!("Using local SQLite mirror at {}", url);
            let client = SqliteClient::connect(url).await?;
            client.init_schema().await?;
            Ok(Arc::new(client))
        }
        None => {
            tracing::info!("Using hosted database at {}", config.supabase_url);
            let client = RestClient::new(&config.supabase_url, &config.service_role_key)?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_parts() {
        let query = SelectQuery::from("players")
            .columns(&["player_id", "name"])
            .order_by("name", Order::Asc)
            .eq("team_id", 7);

        assert_eq!(query.table, "players");
        assert_eq!(query.columns, vec!["player_id", "name"]);
        assert_eq!(query.order, Some(("name".to_string(), Order::Asc)));
        assert_eq!(
            query.filters,
            vec![Filter {
                column: "team_id".to_string(),
                value: "7".to_string()
            }]
        );
        assert!(query.validate().is_ok());
    }

    #[test]
    fn validate_rejects_injection() {
        let query = SelectQuery::from("players").columns(&["name; DROP TABLE players"]);
        assert!(matches!(
            query.validate(),
            Err(DbError::InvalidIdentifier(ident)) if ident.starts_with("name;")
        ));

        let query = SelectQuery::from("players").order_by("", Order::Desc);
        assert!(query.validate().is_err());
    }
}
