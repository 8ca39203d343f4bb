use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WateringHours;

/// Store-assigned plant identifier. Ids start at 1 and are never reused.
pub type PlantId = u64;

/// A houseplant and its care schedule.
///
/// Plants are plain values. The store only ever replaces a plant wholesale,
/// so an edit means building a new `Plant` (usually via struct update syntax
/// or [`Plant::watered_on`]) and passing it to
/// [`PlantStore::update_plant`](crate::store::PlantStore::update_plant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    /// Category from the [`Catalog`](super::Catalog), or `"Other"`.
    #[serde(rename = "type")]
    pub plant_type: String,
    pub last_watered: NaiveDate,
    /// Consecutive successful waterings.
    pub watering_streak: u32,
    /// Opaque reference to a user-selected image.
    pub image_uri: Option<String>,
    pub watering_hours: WateringHours,
    /// A catalog sunlight option, or empty.
    pub sunlight: String,
    pub notes: String,
}

impl Plant {
    /// A copy of this plant recording one more successful watering on `date`.
    pub fn watered_on(&self, date: NaiveDate) -> Self {
        Self {
            last_watered: date,
            watering_streak: self.watering_streak.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Input for creating a new plant.
///
/// `name` and `plant_type` are required; everything else falls back to a
/// default when the store builds the [`Plant`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    /// Defaults to today.
    #[serde(default)]
    pub last_watered: Option<NaiveDate>,
    /// Defaults to 0.
    #[serde(default)]
    pub watering_streak: Option<u32>,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub watering_hours: WateringHours,
    #[serde(default)]
    pub sunlight: String,
    #[serde(default)]
    pub notes: String,
}

impl PlantDraft {
    pub fn new(name: impl Into<String>, plant_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plant_type: plant_type.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watered_on_increments_streak() {
        let plant = Plant {
            id: 3,
            name: "Fern".to_string(),
            plant_type: "Fern".to_string(),
            last_watered: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            watering_streak: 4,
            image_uri: None,
            watering_hours: WateringHours::new(),
            sunlight: String::new(),
            notes: String::new(),
        };
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date");

        let watered = plant.watered_on(today);

        assert_eq!(watered.watering_streak, 5);
        assert_eq!(watered.last_watered, today);
        assert_eq!(watered.id, plant.id);
        assert_eq!(plant.watering_streak, 4);
    }

    #[test]
    fn test_draft_deserializes_with_defaults() {
        let draft: PlantDraft =
            serde_json::from_str(r#"{"name":"Aloe Vera","type":"Succulent"}"#).expect("valid");
        assert_eq!(draft, PlantDraft::new("Aloe Vera", "Succulent"));
    }
}
