use std::time::Duration;

use pocket_plant::models::*;
use pocket_plant::PlantStore;

fn add(store: &PlantStore, name: &str, plant_type: &str) -> Plant {
    store
        .add_plant(PlantDraft::new(name, plant_type))
        .expect("Failed to add plant")
}

mod list_view {
    use super::*;

    #[tokio::test]
    async fn wakes_with_the_new_list_after_a_change() {
        let store = PlantStore::new();
        let mut view = store.list();
        assert!(!view.has_changed());

        let writer = store.clone();
        let task = tokio::spawn(async move {
            add(&writer, "Aloe Vera", "Succulent");
        });

        let plants = view.changed().await.expect("store is alive");
        task.await.expect("writer task");

        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].name, "Aloe Vera");
    }

    #[tokio::test]
    async fn returns_none_once_the_store_is_dropped() {
        let store = PlantStore::new();
        let mut view = store.list();
        drop(store);

        assert!(view.changed().await.is_none());
    }

    #[tokio::test]
    async fn current_is_a_copy_not_the_backing_list() {
        let store = PlantStore::new();
        let view = store.list();
        add(&store, "A", "Other");
        let before = view.current();

        add(&store, "B", "Other");

        assert_eq!(before.len(), 1);
        assert_eq!(view.current().len(), 2);
    }
}

mod plant_view {
    use super::*;

    #[tokio::test]
    async fn skips_changes_to_other_plants() {
        let store = PlantStore::new();
        add(&store, "Aloe Vera", "Succulent");
        add(&store, "Boston Fern", "Fern");
        let mut view = store.get_by_id(1);

        store.water_plant(2).expect("Failed to water");
        store.water_plant(1).expect("Failed to water");

        let next = tokio::time::timeout(Duration::from_secs(1), view.changed())
            .await
            .expect("view woke up")
            .expect("store is alive")
            .expect("plant 1 exists");
        assert_eq!(next.watering_streak, 1);
        assert_eq!(next.name, "Aloe Vera");
    }

    #[tokio::test]
    async fn reports_appearance_and_removal() {
        let store = PlantStore::new();
        let mut view = store.get_by_id(1);
        assert_eq!(view.id(), 1);

        add(&store, "Aloe Vera", "Succulent");
        let appeared = view.changed().await.expect("store is alive");
        assert_eq!(appeared.map(|p| p.name), Some("Aloe Vera".to_string()));

        store.remove_plant(1).expect("Failed to remove");
        let removed = view.changed().await.expect("store is alive");
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn unchanged_update_does_not_wake_the_view() {
        let store = PlantStore::new();
        let plant = add(&store, "Aloe Vera", "Succulent");
        let mut view = store.get_by_id(plant.id);

        store.update_plant(plant).expect("Failed to update");

        let woke = tokio::time::timeout(Duration::from_millis(50), view.changed()).await;
        assert!(woke.is_err());
    }
}
