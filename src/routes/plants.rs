use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::{plants, users};
use crate::db::plants::PlantListing;
use crate::error::Result;
use crate::models::{NewPlantRequest, Plant, PlantSummary};
use crate::AppState;

/// Raw listing parameters, resolved by [`PlantListing::resolve`]
#[derive(Debug, Default, Deserialize)]
pub struct ListPlantsParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub plant_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlantsResponse {
    pub plants: Vec<PlantSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlantResponse<P> {
    pub plant: P,
}

/// List a user's plants
///
/// Query parameters:
/// - `sort_by`: `created_at` (default) or `snapshot_count`
/// - `order`: `desc` (default) or `asc`
/// - `plant_type`: exact match filter
///
/// Any other `sort_by`/`order` value is a bad request.
pub async fn list_plants(
    State(state): State<AppState>,
    owner_id: std::result::Result<Path<i32>, PathRejection>,
    params: std::result::Result<Query<ListPlantsParams>, QueryRejection>,
) -> Result<Json<PlantsResponse>> {
    let Path(owner_id) = owner_id?;
    let Query(params) = params?;

    let listing = PlantListing::resolve(
        owner_id,
        params.sort_by.as_deref(),
        params.order.as_deref(),
        params.plant_type,
    )?;

    let plants = plants::fetch_plants(&state.pool, &listing).await?;
    Ok(Json(PlantsResponse { plants }))
}

/// Create a plant owned by the user in the path
pub async fn create_plant(
    State(state): State<AppState>,
    owner_id: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<NewPlantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlantResponse<Plant>>)> {
    let Path(owner_id) = owner_id?;
    let Json(payload) = payload?;
    let new_plant = payload.validate()?;

    let owner = users::fetch_user_by_id(&state.pool, owner_id).await?;
    let plant = plants::insert_plant(&state.pool, owner.user_id, &new_plant).await?;

    tracing::info!(
        "Plant {} ({}) created for user {}",
        plant.plant_id,
        plant.plant_name,
        owner.username
    );

    Ok((StatusCode::CREATED, Json(PlantResponse { plant })))
}

/// Fetch one plant with its snapshot count
pub async fn get_plant(
    State(state): State<AppState>,
    plant_id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<PlantResponse<PlantSummary>>> {
    let Path(plant_id) = plant_id?;
    let plant = plants::fetch_plant(&state.pool, plant_id).await?;
    Ok(Json(PlantResponse { plant }))
}

/// Delete a plant and, through the cascade, its snapshots
pub async fn delete_plant(
    State(state): State<AppState>,
    plant_id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<StatusCode> {
    let Path(plant_id) = plant_id?;
    plants::delete_plant(&state.pool, plant_id).await?;

    tracing::info!("Plant {} deleted", plant_id);

    Ok(StatusCode::NO_CONTENT)
}
