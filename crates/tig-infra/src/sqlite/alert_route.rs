//! SQLite alert route store.
//!
//! Implements `AlertRouteStore` from `tig-core`. Rows are insert-only; the
//! channel column carries no uniqueness constraint.

use chrono::{DateTime, Utc};
use sqlx::Row;
use tig_core::repository::alert_route::AlertRouteStore;
use tig_types::error::RepositoryError;
use tig_types::id::{ChannelId, UserId};
use tig_types::route::{AlertRoute, AlertRouteId};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `AlertRouteStore`.
#[derive(Clone)]
pub struct SqliteAlertRouteStore {
    pool: DatabasePool,
}

impl SqliteAlertRouteStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// All routes for `channel`, oldest first.
    pub async fn list_by_channel(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<AlertRoute>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, channel, user_to_alert, created_at FROM alert_routes \
             WHERE channel = ? ORDER BY created_at, id",
        )
        .bind(channel.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                AlertRouteRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_route()
            })
            .collect()
    }
}

/// Internal row type for mapping SQLite rows to domain AlertRoute.
struct AlertRouteRow {
    id: String,
    channel: String,
    user_to_alert: Option<String>,
    created_at: String,
}

impl AlertRouteRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            channel: row.try_get("channel")?,
            user_to_alert: row.try_get("user_to_alert")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_route(self) -> Result<AlertRoute, RepositoryError> {
        let id = self
            .id
            .parse::<AlertRouteId>()
            .map_err(|e| RepositoryError::Query(format!("invalid route id: {e}")))?;

        Ok(AlertRoute {
            id,
            channel: ChannelId::new(self.channel),
            user_to_alert: self.user_to_alert.map(UserId::new),
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

impl AlertRouteStore for SqliteAlertRouteStore {
    async fn put(&self, route: &AlertRoute) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO alert_routes (id, channel, user_to_alert, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(route.id.to_string())
        .bind(route.channel.as_str())
        .bind(route.user_to_alert.as_ref().map(|u| u.as_str()))
        .bind(route.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("alert route '{}' already exists", route.id)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }
}
