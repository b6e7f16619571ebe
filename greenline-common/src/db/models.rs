//! Database models and queries

use crate::emissions::EmissionResult;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// One recorded calculation result
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmissionRecord {
    pub guid: String,
    pub user_id: Option<i64>,
    pub scope1: f64,
    pub scope2: f64,
    pub recorded_at: DateTime<Utc>,
}

impl EmissionRecord {
    /// Build a record for a freshly computed result
    pub fn new(user_id: Option<i64>, result: &EmissionResult) -> Self {
        Self {
            guid: Uuid::new_v4().to_string(),
            user_id,
            scope1: result.scope1,
            scope2: result.scope2,
            recorded_at: Utc::now(),
        }
    }
}

/// Insert one emission record
pub async fn insert_emission_record(pool: &SqlitePool, record: &EmissionRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO emissions (guid, user_id, scope1, scope2, recorded_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.guid)
    .bind(record.user_id)
    .bind(record.scope1)
    .bind(record.scope2)
    .bind(record.recorded_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the most recent emission records, newest first
pub async fn recent_emission_records(pool: &SqlitePool, limit: i64) -> Result<Vec<EmissionRecord>> {
    let records = sqlx::query_as::<_, EmissionRecord>(
        r#"
        SELECT guid, user_id, scope1, scope2, recorded_at
        FROM emissions
        ORDER BY recorded_at DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}
