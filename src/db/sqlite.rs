//! Local SQLite mirror of the hosted tables, for development and tests.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use super::{DatabaseClient, DbError, Row, SelectQuery};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    team_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    short_name TEXT,
    image_id INTEGER,
    image_url TEXT
);

CREATE TABLE IF NOT EXISTS players (
    player_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    face_image_id INTEGER,
    face_image_url TEXT,
    role TEXT,
    team_id INTEGER REFERENCES teams(team_id)
);
"#;

#[derive(Clone)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let options = if url.contains(":memory:") {
            // An in-memory database only lives as long as its one connection
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options.connect(url).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `teams` and `players` tables if they are missing.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub fn to_sql(query: &SelectQuery) -> String {
        let columns = if query.columns.is_empty() {
            "*".to_string()
        } else {
            query
                .columns
                .iter()
                .map(|c| format!("\"{}\"", c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {} FROM \"{}\"", columns, query.table);

        if !query.filters.is_empty() {
            let conditions = query
                .filters
                .iter()
                .map(|f| format!("\"{}\" = ?", f.column))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }

        if let Some((column, order)) = &query.order {
            sql.push_str(&format!(
                " ORDER BY \"{}\" {}",
                column,
                order.as_str().to_uppercase()
            ));
        }

        sql
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, DbError> {
        query.validate()?;

        let sql = Self::to_sql(query);
        tracing::debug!("{}", sql);

        let mut statement = sqlx::query(&sql);
        for filter in &query.filters {
            statement = statement.bind(filter.value.as_str());
        }

        let rows = statement.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_json).collect()
    }
}

fn row_to_json(row: &SqliteRow) -> Result<Row, DbError> {
    let mut object = Row::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
                "TEXT" => Value::from(row.try_get::<String, _>(idx)?),
                other => {
                    return Err(DbError::Decode(format!(
                        "column {} has unsupported type {}",
                        column.name(),
                        other
                    )));
                }
            }
        };

        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}
