use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::user::required_text;

/// Plant row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Plant {
    pub plant_id: i32,
    pub plant_name: String,
    /// Owner
    pub user_id: i32,
    pub plant_type: String,
    pub soil: Option<String>,
    #[serde(rename = "directSunlight")]
    #[sqlx(rename = "directSunlight")]
    pub direct_sunlight: bool,
    pub inside: bool,
    /// Watering interval in days
    #[serde(rename = "wateringFreq")]
    #[sqlx(rename = "wateringFreq")]
    pub watering_freq: i32,
    /// Assigned by the store on insert
    pub created_at: DateTime<Utc>,
}

/// Plant plus its derived snapshot count, as returned by listings.
///
/// `snapshot_count` is a string on the wire. Existing clients parse it that
/// way, so it must not become a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlantSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub plant: Plant,
    pub snapshot_count: String,
}

/// Body of `POST /api/users/:user/plants`.
///
/// Booleans and the watering interval are kept as raw JSON so loosely typed
/// clients (`"true"`, `"2"`) are coerced instead of rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct NewPlantRequest {
    pub plant_name: Option<String>,
    pub plant_type: Option<String>,
    pub soil: Option<String>,
    #[serde(rename = "directSunlight")]
    pub direct_sunlight: Option<Value>,
    pub inside: Option<Value>,
    #[serde(rename = "wateringFreq")]
    pub watering_freq: Option<Value>,
}

/// A validated plant payload. The owner comes from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlant {
    pub plant_name: String,
    pub plant_type: String,
    pub soil: String,
    pub direct_sunlight: bool,
    pub inside: bool,
    pub watering_freq: i32,
}

impl NewPlantRequest {
    /// Check that every required field is present and coercible
    pub fn validate(self) -> Result<NewPlant> {
        Ok(NewPlant {
            plant_name: required_text("plant_name", self.plant_name)?,
            plant_type: required_text("plant_type", self.plant_type)?,
            soil: required_text("soil", self.soil)?,
            direct_sunlight: coerce_bool("directSunlight", self.direct_sunlight)?,
            inside: coerce_bool("inside", self.inside)?,
            watering_freq: coerce_days("wateringFreq", self.watering_freq)?,
        })
    }
}

fn coerce_bool(field: &str, value: Option<Value>) -> Result<bool> {
    match value {
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(AppError::validation(format!("{field} must be a boolean"))),
        },
        Some(_) => Err(AppError::validation(format!("{field} must be a boolean"))),
        None => Err(AppError::validation(format!("missing required field: {field}"))),
    }
}

fn coerce_days(field: &str, value: Option<Value>) -> Result<i32> {
    let days = match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
        None => return Err(AppError::validation(format!("missing required field: {field}"))),
    };

    match days {
        Some(d) if d >= 0 => Ok(d),
        _ => Err(AppError::validation(format!(
            "{field} must be a non-negative whole number of days"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> NewPlantRequest {
        serde_json::from_value(body).unwrap()
    }

    fn complete_body() -> Value {
        json!({
            "plant_name": "plant-name-test",
            "plant_type": "indoor",
            "soil": "soil-test",
            "directSunlight": true,
            "inside": false,
            "wateringFreq": 2
        })
    }

    #[test]
    fn test_validate_complete_payload() {
        let plant = request(complete_body()).validate().unwrap();
        assert_eq!(
            plant,
            NewPlant {
                plant_name: "plant-name-test".to_string(),
                plant_type: "indoor".to_string(),
                soil: "soil-test".to_string(),
                direct_sunlight: true,
                inside: false,
                watering_freq: 2,
            }
        );
    }

    #[test]
    fn test_validate_rejects_each_missing_field() {
        for field in [
            "plant_name",
            "plant_type",
            "soil",
            "directSunlight",
            "inside",
            "wateringFreq",
        ] {
            let mut body = complete_body();
            body.as_object_mut().unwrap().remove(field);
            assert!(
                matches!(request(body).validate(), Err(AppError::Validation(_))),
                "missing {} should be rejected",
                field
            );
        }
    }

    #[test]
    fn test_loose_types_are_coerced() {
        let mut body = complete_body();
        body["directSunlight"] = json!("false");
        body["inside"] = json!("true");
        body["wateringFreq"] = json!("14");

        let plant = request(body).validate().unwrap();
        assert!(!plant.direct_sunlight);
        assert!(plant.inside);
        assert_eq!(plant.watering_freq, 14);
    }

    #[test]
    fn test_invalid_types_are_rejected() {
        let mut body = complete_body();
        body["inside"] = json!("sometimes");
        assert!(request(body).validate().is_err());

        let mut body = complete_body();
        body["wateringFreq"] = json!(2.5);
        assert!(request(body).validate().is_err());

        let mut body = complete_body();
        body["wateringFreq"] = json!(-1);
        assert!(request(body).validate().is_err());

        let mut body = complete_body();
        body["wateringFreq"] = json!(i64::from(i32::MAX) + 1);
        assert!(request(body).validate().is_err());
    }

    #[test]
    fn test_summary_serializes_flat_with_string_count() {
        let summary = PlantSummary {
            plant: Plant {
                plant_id: 2,
                plant_name: "Tomato".to_string(),
                user_id: 1,
                plant_type: "outdoor".to_string(),
                soil: Some("loam".to_string()),
                direct_sunlight: true,
                inside: false,
                watering_freq: 2,
                created_at: DateTime::from_timestamp(1_591_779_600, 0).unwrap(),
            },
            snapshot_count: "2".to_string(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "plant_id",
            "plant_name",
            "user_id",
            "plant_type",
            "soil",
            "directSunlight",
            "inside",
            "wateringFreq",
            "created_at",
            "snapshot_count",
        ] {
            assert!(keys.contains(&key), "missing key {}", key);
        }
        assert_eq!(keys.len(), 10);
        assert_eq!(value["snapshot_count"], json!("2"));
    }
}
