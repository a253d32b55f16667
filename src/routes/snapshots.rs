use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::db::snapshots;
use crate::error::Result;
use crate::models::{NewSnapshotRequest, Snapshot};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SnapshotsResponse {
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub snapshot: Snapshot,
}

/// List a plant's snapshots, oldest first
pub async fn list_snapshots(
    State(state): State<AppState>,
    plant_id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<SnapshotsResponse>> {
    let Path(plant_id) = plant_id?;
    let snapshots = snapshots::fetch_snapshots(&state.pool, plant_id).await?;
    Ok(Json(SnapshotsResponse { snapshots }))
}

/// Record a new snapshot for a plant
pub async fn create_snapshot(
    State(state): State<AppState>,
    plant_id: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<NewSnapshotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SnapshotResponse>)> {
    let Path(plant_id) = plant_id?;
    let Json(payload) = payload?;
    let new_snapshot = payload.validate()?;

    let snapshot = snapshots::insert_snapshot(&state.pool, plant_id, &new_snapshot).await?;

    tracing::info!(
        "Snapshot {} recorded for plant {}: height {}",
        snapshot.snapshot_id,
        plant_id,
        snapshot.height
    );

    Ok((StatusCode::CREATED, Json(SnapshotResponse { snapshot })))
}
