use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{MAX_SNAPSHOT_HEIGHT, SNAPSHOT_HEIGHT_SCALE};
use crate::error::{AppError, Result};
use crate::models::user::required_text;

/// A progress photo and height record for one plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Snapshot {
    pub snapshot_id: i32,
    pub plant_id: i32,
    /// Reference to the externally stored image
    pub plant_uri: String,
    /// NUMERIC(8, 1), serialized as a decimal string
    pub height: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/plants/:plant_id/snapshots`
#[derive(Debug, Default, Deserialize)]
pub struct NewSnapshotRequest {
    pub plant_uri: Option<String>,
    pub height: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnapshot {
    pub plant_uri: String,
    pub height: Decimal,
}

impl NewSnapshotRequest {
    pub fn validate(self) -> Result<NewSnapshot> {
        let plant_uri = required_text("plant_uri", self.plant_uri)?;
        let height = parse_height(self.height)?;
        Ok(NewSnapshot { plant_uri, height })
    }
}

fn parse_height(value: Option<Value>) -> Result<Decimal> {
    let raw = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(AppError::validation("height must be a number")),
        None => return Err(AppError::validation("missing required field: height")),
    };

    let height = Decimal::from_str(&raw)
        .map_err(|_| AppError::validation(format!("height is not a decimal: {raw}")))?
        .round_dp(SNAPSHOT_HEIGHT_SCALE);

    if height.is_sign_negative() || height >= Decimal::from(MAX_SNAPSHOT_HEIGHT) {
        return Err(AppError::validation(format!("height out of range: {height}")));
    }

    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> NewSnapshotRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate_number_height() {
        let snapshot = request(json!({ "plant_uri": "https://img/1.jpg", "height": 12.5 }))
            .validate()
            .unwrap();
        assert_eq!(snapshot.plant_uri, "https://img/1.jpg");
        assert_eq!(snapshot.height, Decimal::new(125, 1));
    }

    #[test]
    fn test_height_is_rounded_to_one_decimal() {
        let snapshot = request(json!({ "plant_uri": "u", "height": "7.26" }))
            .validate()
            .unwrap();
        assert_eq!(snapshot.height, Decimal::new(73, 1));
    }

    #[test]
    fn test_height_out_of_range() {
        assert!(request(json!({ "plant_uri": "u", "height": -0.5 }))
            .validate()
            .is_err());
        assert!(request(json!({ "plant_uri": "u", "height": 10_000_000 }))
            .validate()
            .is_err());
        assert!(request(json!({ "plant_uri": "u", "height": "9999999.9" }))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_missing_or_malformed_fields() {
        assert!(request(json!({ "height": 3 })).validate().is_err());
        assert!(request(json!({ "plant_uri": "u" })).validate().is_err());
        assert!(request(json!({ "plant_uri": "u", "height": "tall" }))
            .validate()
            .is_err());
        assert!(request(json!({ "plant_uri": "u", "height": true }))
            .validate()
            .is_err());
    }
}
