use sqlx::PgPool;

use crate::db::plants::plant_exists;
use crate::error::{AppError, Result};
use crate::models::{NewSnapshot, Snapshot};

/// Snapshots of one plant, oldest first
pub async fn fetch_snapshots(pool: &PgPool, plant_id: i32) -> Result<Vec<Snapshot>> {
    if !plant_exists(pool, plant_id).await? {
        return Err(AppError::PlantNotFound);
    }

    let snapshots = sqlx::query_as::<_, Snapshot>(
        r#"
        SELECT snapshot_id, plant_id, plant_uri, height, created_at
        FROM snapshots
        WHERE plant_id = $1
        ORDER BY created_at, snapshot_id
        "#,
    )
    .bind(plant_id)
    .fetch_all(pool)
    .await?;

    Ok(snapshots)
}

/// Record a snapshot. A missing parent plant surfaces as `PlantNotFound`.
pub async fn insert_snapshot(
    pool: &PgPool,
    plant_id: i32,
    snapshot: &NewSnapshot,
) -> Result<Snapshot> {
    sqlx::query_as::<_, Snapshot>(
        r#"
        INSERT INTO snapshots (plant_id, plant_uri, height)
        VALUES ($1, $2, $3)
        RETURNING snapshot_id, plant_id, plant_uri, height, created_at
        "#,
    )
    .bind(plant_id)
    .bind(&snapshot.plant_uri)
    .bind(snapshot.height)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => AppError::PlantNotFound,
        other => AppError::Database(other),
    })
}
