//! Screen-local form state for adding or editing a plant.
//!
//! A [`PlantForm`] belongs to one screen. It is opened empty (add) or from an
//! existing plant (edit), collects edits locally, and touches the store only
//! when [`PlantForm::save`] is called.

use crate::error::{Result, StoreError};
use crate::models::{Plant, PlantDraft, WateringHours, WateringTime};
use crate::store::PlantStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantForm {
    pub name: String,
    pub plant_type: String,
    pub sunlight: String,
    pub notes: String,
    pub image_uri: Option<String>,
    watering_hours: WateringHours,
    origin: Option<Plant>,
}

impl PlantForm {
    /// An empty form for a new plant.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled from `plant`; saving replaces that plant.
    pub fn edit(plant: &Plant) -> Self {
        Self {
            name: plant.name.clone(),
            plant_type: plant.plant_type.clone(),
            sunlight: plant.sunlight.clone(),
            notes: plant.notes.clone(),
            image_uri: plant.image_uri.clone(),
            watering_hours: plant.watering_hours.clone(),
            origin: Some(plant.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.origin.is_some()
    }

    pub fn watering_hours(&self) -> &WateringHours {
        &self.watering_hours
    }

    /// Returns `false` if the time was already listed.
    pub fn add_watering_time(&mut self, time: WateringTime) -> bool {
        self.watering_hours.insert(time)
    }

    pub fn remove_watering_time(&mut self, time: WateringTime) -> bool {
        self.watering_hours.remove(time)
    }

    /// Discard local edits and return to the values the form was opened with.
    pub fn reset(&mut self) {
        *self = match self.origin.take() {
            Some(plant) => Self::edit(&plant),
            None => Self::new(),
        };
    }

    /// Commit the form: add a new plant, or replace the one being edited.
    ///
    /// Returns the plant as the store now holds it. On error the form is
    /// untouched so the screen can re-prompt.
    pub fn save(&self, store: &PlantStore) -> Result<Plant> {
        match &self.origin {
            Some(origin) => {
                // The store keeps updates verbatim, so tidy input the same
                // way it does for new plants.
                let catalog = store.catalog();
                let updated = Plant {
                    name: self.name.trim().to_string(),
                    plant_type: catalog
                        .resolve_category(&self.plant_type)
                        .unwrap_or_else(|| self.plant_type.clone()),
                    sunlight: catalog
                        .resolve_sunlight(&self.sunlight)
                        .unwrap_or_else(|| self.sunlight.clone()),
                    notes: self.notes.clone(),
                    image_uri: self.image_uri.clone(),
                    watering_hours: self.watering_hours.clone(),
                    ..origin.clone()
                };
                store.update_plant(updated)?;
                store.get(origin.id).ok_or(StoreError::NotFound(origin.id))
            }
            None => store.add_plant(self.to_draft()),
        }
    }

    fn to_draft(&self) -> PlantDraft {
        PlantDraft {
            name: self.name.clone(),
            plant_type: self.plant_type.clone(),
            image_uri: self.image_uri.clone(),
            watering_hours: self.watering_hours.clone(),
            sunlight: self.sunlight.clone(),
            notes: self.notes.clone(),
            ..PlantDraft::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> WateringTime {
        s.parse().expect("valid time")
    }

    #[test]
    fn test_save_new_plant() {
        let store = PlantStore::new();
        let mut form = PlantForm::new();
        form.name = "Basil".to_string();
        form.plant_type = "herb".to_string();
        form.add_watering_time(t("08:00"));
        form.add_watering_time(t("08:00"));

        let plant = form.save(&store).expect("saves");

        assert_eq!(plant.id, 1);
        assert_eq!(plant.plant_type, "Herb");
        assert_eq!(plant.watering_hours.to_strings(), vec!["08:00"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_blank_name_is_rejected_and_store_untouched() {
        let store = PlantStore::new();
        let mut form = PlantForm::new();
        form.plant_type = "Cactus".to_string();

        let err = form.save(&store).unwrap_err();

        assert!(err.is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_replaces_existing_plant() {
        let store = PlantStore::new();
        let original = store
            .add_plant(PlantDraft::new("Fern", "Fern"))
            .expect("adds");

        let mut form = PlantForm::edit(&original);
        assert!(form.is_editing());
        form.name = " Boston Fern ".to_string();
        form.plant_type = "fern".to_string();
        form.notes = "Keep soil moist".to_string();
        form.add_watering_time(WateringTime::from_hm(19, 0).expect("valid time"));
        assert!(!form.add_watering_time(t("19:00")));
        let saved = form.save(&store).expect("saves");

        assert_eq!(saved.id, original.id);
        assert_eq!(saved.name, "Boston Fern");
        assert_eq!(saved.plant_type, "Fern");
        assert_eq!(saved.notes, "Keep soil moist");
        assert_eq!(saved.watering_hours.to_strings(), vec!["19:00"]);
        assert_eq!(saved.last_watered, original.last_watered);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_restores_opening_values() {
        let store = PlantStore::new();
        let original = store
            .add_plant(PlantDraft::new("Fern", "Fern"))
            .expect("adds");

        let mut form = PlantForm::edit(&original);
        form.name = "Renamed".to_string();
        form.add_watering_time(t("06:30"));
        form.reset();

        assert_eq!(form, PlantForm::edit(&original));

        let mut blank = PlantForm::new();
        blank.name = "Typed".to_string();
        blank.reset();
        assert_eq!(blank, PlantForm::new());
    }
}
