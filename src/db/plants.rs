//! Plant queries, including the owner listing with its snapshot count.
//!
//! Listing requests arrive with free-text `sort_by` / `order` parameters.
//! They are resolved against closed enums before any SQL is assembled, so
//! the only text spliced into the statement comes from this module's own
//! constants. Filter values are always bound.

use std::fmt;
use std::str::FromStr;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{AppError, Result};
use crate::models::{NewPlant, Plant, PlantSummary};

/// Plant columns plus the per-plant snapshot count.
///
/// Counts come from one grouped subquery over `snapshots`, left-joined so
/// plants without snapshots still appear with `0`. The count is cast to
/// text for the wire format; sorting uses the numeric expression instead.
const SELECT_PLANT_SUMMARIES: &str = r#"SELECT plants.plant_id, plants.plant_name, plants.user_id, plants.plant_type, plants.soil, plants."directSunlight", plants.inside, plants."wateringFreq", plants.created_at, COALESCE(counts.snapshot_count, 0)::text AS snapshot_count FROM plants LEFT JOIN (SELECT plant_id, COUNT(*) AS snapshot_count FROM snapshots GROUP BY plant_id) AS counts ON counts.plant_id = plants.plant_id"#;

const PLANT_COLUMNS: &str = r#"plant_id, plant_name, user_id, plant_type, soil, "directSunlight", inside, "wateringFreq", created_at"#;

/// Column a plant listing can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    CreatedAt,
    SnapshotCount,
}

impl SortBy {
    fn sql(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "plants.created_at",
            SortBy::SnapshotCount => "COALESCE(counts.snapshot_count, 0)",
        }
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created_at" => Ok(SortBy::CreatedAt),
            "snapshot_count" => Ok(SortBy::SnapshotCount),
            other => Err(AppError::validation(format!("invalid sort_by: {other:?}"))),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::CreatedAt => "created_at",
            SortBy::SnapshotCount => "snapshot_count",
        })
    }
}

/// Direction of a plant listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::validation(format!("invalid order: {other:?}"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// A fully resolved request for one owner's plants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantListing {
    pub owner_id: i32,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub plant_type: Option<String>,
}

impl PlantListing {
    /// Resolve raw query parameters. Absent values take the defaults
    /// (`created_at`, `desc`); anything outside the whitelist is rejected.
    pub fn resolve(
        owner_id: i32,
        sort_by: Option<&str>,
        order: Option<&str>,
        plant_type: Option<String>,
    ) -> Result<Self> {
        Ok(PlantListing {
            owner_id,
            sort_by: sort_by.map(str::parse::<SortBy>).transpose()?.unwrap_or_default(),
            order: order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default(),
            plant_type,
        })
    }

    /// Build the single aggregating statement for this listing.
    ///
    /// Ties on the sort key are broken by `plant_id` in the same direction,
    /// so `asc` is the exact reverse of `desc`.
    pub fn build_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(SELECT_PLANT_SUMMARIES);

        query.push(" WHERE plants.user_id = ").push_bind(self.owner_id);

        if let Some(plant_type) = &self.plant_type {
            query
                .push(" AND plants.plant_type = ")
                .push_bind(plant_type.clone());
        }

        let direction = self.order.sql();
        query.push(format!(
            " ORDER BY {} {direction}, plants.plant_id {direction}",
            self.sort_by.sql()
        ));

        query
    }
}

/// List an owner's plants with snapshot counts.
///
/// An owner with no plants, or an owner that does not exist, yields an
/// empty list.
pub async fn fetch_plants(pool: &PgPool, listing: &PlantListing) -> Result<Vec<PlantSummary>> {
    let plants = listing
        .build_query()
        .build_query_as::<PlantSummary>()
        .fetch_all(pool)
        .await?;

    tracing::debug!(
        "Listed {} plants for user {} (sort_by={}, order={})",
        plants.len(),
        listing.owner_id,
        listing.sort_by,
        listing.order
    );

    Ok(plants)
}

/// One plant with its snapshot count
pub async fn fetch_plant(pool: &PgPool, plant_id: i32) -> Result<PlantSummary> {
    let mut query = QueryBuilder::<Postgres>::new(SELECT_PLANT_SUMMARIES);
    query.push(" WHERE plants.plant_id = ").push_bind(plant_id);

    query
        .build_query_as::<PlantSummary>()
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::PlantNotFound)
}

/// Whether a plant with this id exists
pub async fn plant_exists(pool: &PgPool, plant_id: i32) -> Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM plants WHERE plant_id = $1)")
            .bind(plant_id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Insert a plant owned by `owner_id`. `created_at` is set by the store.
pub async fn insert_plant(pool: &PgPool, owner_id: i32, plant: &NewPlant) -> Result<Plant> {
    let sql = format!(
        r#"
        INSERT INTO plants (plant_name, user_id, plant_type, soil, "directSunlight", inside, "wateringFreq")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PLANT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Plant>(&sql)
        .bind(&plant.plant_name)
        .bind(owner_id)
        .bind(&plant.plant_type)
        .bind(&plant.soil)
        .bind(plant.direct_sunlight)
        .bind(plant.inside)
        .bind(plant.watering_freq)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            // Owner removed between the existence check and the insert
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::UserNotFound
            }
            other => AppError::Database(other),
        })
}

/// Delete a plant. Its snapshots go with it via the cascading foreign key.
pub async fn delete_plant(pool: &PgPool, plant_id: i32) -> Result<()> {
    let result = sqlx::query("DELETE FROM plants WHERE plant_id = $1")
        .bind(plant_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::PlantNotFound);
    }

    Ok(())
}
