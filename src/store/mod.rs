//! The plant store: single source of truth for the plants of one session.
//!
//! [`PlantStore`] holds one authoritative list. Every successful mutation
//! builds a new list, publishes it to the live views handed out by
//! [`PlantStore::list`] and [`PlantStore::get_by_id`], and calls each
//! subscribed observer, all before the mutating call returns.
//!
//! Mutations are serialized by a writer lock held from commit until every
//! observer has been called, so observers see lists in commit order and the
//! last list an observer receives is the store's current one.

mod view;

pub use view::{PlantListView, PlantView};

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use tokio::sync::watch;

use crate::error::{Result, StoreError};
use crate::models::*;

/// An immutable copy of the plant list at one point in time.
pub type Snapshot = Arc<Vec<Plant>>;

/// Handle returned by [`PlantStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&[Plant]) + Send + Sync>;

struct State {
    plants: Snapshot,
    next_id: PlantId,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

struct Inner {
    /// Taken before `state` by every mutation and held through delivery.
    writer: Mutex<()>,
    state: Mutex<State>,
    snapshots: watch::Sender<Snapshot>,
    catalog: Catalog,
    clock: Arc<dyn Clock + Send + Sync>,
}

/// In-memory plant store shared by the presentation layer.
///
/// Cloning the store clones a handle; all clones see the same plants.
#[derive(Clone)]
pub struct PlantStore {
    inner: Arc<Inner>,
}

/// Observers to call once the state lock is released.
#[must_use]
struct Notification {
    snapshot: Snapshot,
    observers: Vec<Observer>,
}

impl Notification {
    fn deliver(self) {
        for observer in &self.observers {
            observer(&self.snapshot);
        }
    }
}

impl Default for PlantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlantStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlantStore")
            .field("plants", &self.len())
            .field("catalog", &self.inner.catalog)
            .finish()
    }
}

impl PlantStore {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::default())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::with_clock(catalog, Arc::new(DefaultClock))
    }

    /// Build a store whose notion of "today" comes from `clock`.
    pub fn with_clock(catalog: Catalog, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let empty: Snapshot = Arc::new(Vec::new());
        let (snapshots, _) = watch::channel(Arc::clone(&empty));
        Self {
            inner: Arc::new(Inner {
                writer: Mutex::new(()),
                state: Mutex::new(State {
                    plants: empty,
                    next_id: 1,
                    observers: Vec::new(),
                    next_subscription: 1,
                }),
                snapshots,
                catalog,
                clock,
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.inner.clock.local().date_naive()
    }

    // ============================================================
    // Mutations
    // ============================================================

    /// Create a plant from `draft`, assigning it a fresh id.
    ///
    /// Fails with [`StoreError::Validation`] when the name or type is blank,
    /// or the type or sunlight is not in the catalog.
    pub fn add_plant(&self, draft: PlantDraft) -> Result<Plant> {
        let fields = self
            .validate(&draft.name, &draft.plant_type, &draft.sunlight)
            .inspect_err(|e| tracing::warn!("Rejected new plant: {}", e))?;
        let last_watered = draft.last_watered.unwrap_or_else(|| self.today());

        let _writer = self.lock_writer();
        let (plant, notification) = {
            let mut state = self.lock();
            let plant = Plant {
                id: state.next_id,
                name: fields.name,
                plant_type: fields.plant_type,
                last_watered,
                watering_streak: draft.watering_streak.unwrap_or(0),
                image_uri: draft.image_uri,
                watering_hours: draft.watering_hours,
                sunlight: fields.sunlight,
                notes: draft.notes,
            };
            state.next_id += 1;

            let mut plants = Vec::clone(&state.plants);
            plants.push(plant.clone());
            (plant, self.commit(&mut state, plants))
        };

        tracing::debug!("Added plant {} ({})", plant.id, plant.name);
        notification.deliver();
        Ok(plant)
    }

    /// Replace the plant with `updated.id` by `updated`, exactly as given.
    ///
    /// Other plants keep their positions. Fails with [`StoreError::NotFound`]
    /// when no plant has that id, and with [`StoreError::Validation`] on the
    /// same field rules as [`add_plant`](Self::add_plant). Unlike
    /// `add_plant`, nothing is trimmed or respelled: a lowercase but known
    /// type is accepted and stored as written.
    pub fn update_plant(&self, updated: Plant) -> Result<()> {
        self.validate(&updated.name, &updated.plant_type, &updated.sunlight)
            .inspect_err(|e| tracing::warn!("Rejected update of plant {}: {}", updated.id, e))?;
        let id = updated.id;
        self.replace(id, |_| updated)?;
        tracing::debug!("Updated plant {}", id);
        Ok(())
    }

    /// Record a successful watering today: streak + 1, `last_watered` = today.
    pub fn water_plant(&self, id: PlantId) -> Result<Plant> {
        let today = self.today();
        let watered = self.replace(id, |plant| plant.watered_on(today))?;
        tracing::debug!(
            "Watered plant {}, streak now {}",
            id,
            watered.watering_streak
        );
        Ok(watered)
    }

    /// Remove the plant with `id` and return it. Its id is never reassigned.
    pub fn remove_plant(&self, id: PlantId) -> Result<Plant> {
        let _writer = self.lock_writer();
        let (removed, notification) = {
            let mut state = self.lock();
            let Some(pos) = position(&state.plants, id) else {
                tracing::warn!("Cannot remove plant {}: not found", id);
                return Err(StoreError::NotFound(id));
            };
            let mut plants = Vec::clone(&state.plants);
            let removed = plants.remove(pos);
            (removed, self.commit(&mut state, plants))
        };

        tracing::debug!("Removed plant {} ({})", removed.id, removed.name);
        notification.deliver();
        Ok(removed)
    }

    fn replace(&self, id: PlantId, f: impl FnOnce(&Plant) -> Plant) -> Result<Plant> {
        let _writer = self.lock_writer();
        let (replacement, notification) = {
            let mut state = self.lock();
            let Some(pos) = position(&state.plants, id) else {
                tracing::warn!("Cannot replace plant {}: not found", id);
                return Err(StoreError::NotFound(id));
            };
            let mut plants = Vec::clone(&state.plants);
            let replacement = f(&plants[pos]);
            plants[pos] = replacement.clone();
            (replacement, self.commit(&mut state, plants))
        };

        notification.deliver();
        Ok(replacement)
    }

    /// Install `plants` as the authoritative list and publish it to views.
    fn commit(&self, state: &mut State, plants: Vec<Plant>) -> Notification {
        let snapshot: Snapshot = Arc::new(plants);
        state.plants = Arc::clone(&snapshot);
        self.inner.snapshots.send_replace(Arc::clone(&snapshot));
        Notification {
            snapshot,
            observers: state.observers.iter().map(|(_, o)| Arc::clone(o)).collect(),
        }
    }

    // ============================================================
    // Queries
    // ============================================================

    /// Live view of the plant with `id`. Absence is a normal state.
    pub fn get_by_id(&self, id: PlantId) -> PlantView {
        PlantView::new(id, self.inner.snapshots.subscribe())
    }

    /// Live view of every plant in insertion order.
    pub fn list(&self) -> PlantListView {
        PlantListView::new(self.inner.snapshots.subscribe())
    }

    /// One-shot copy of the current list.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.lock().plants)
    }

    /// One-shot lookup of the plant with `id`.
    pub fn get(&self, id: PlantId) -> Option<Plant> {
        let state = self.lock();
        position(&state.plants, id).map(|pos| state.plants[pos].clone())
    }

    pub fn len(&self) -> usize {
        self.lock().plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ============================================================
    // Observers
    // ============================================================

    /// Register `observer` to receive the full list after every change.
    ///
    /// Observers run synchronously on the mutating thread, one mutation at a
    /// time in commit order. They may read from the store; mutating it from
    /// inside an observer deadlocks.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&[Plant]) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.observers.push((id, Arc::new(observer)));
        id
    }

    /// Returns whether the subscription was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.observers.len();
        state.observers.retain(|(sub, _)| *sub != id);
        state.observers.len() != before
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.inner.writer.lock().expect("plant store writer lock poisoned")
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().expect("plant store lock poisoned")
    }

    fn validate(&self, name: &str, plant_type: &str, sunlight: &str) -> Result<ValidFields> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("name", "must not be blank"));
        }
        let plant_type = plant_type.trim();
        if plant_type.is_empty() {
            return Err(StoreError::validation("type", "must not be blank"));
        }
        let plant_type = self.inner.catalog.resolve_category(plant_type).ok_or_else(|| {
            StoreError::validation("type", format!("'{}' is not a known plant type", plant_type))
        })?;
        let sunlight = self.inner.catalog.resolve_sunlight(sunlight).ok_or_else(|| {
            StoreError::validation(
                "sunlight",
                format!("'{}' is not a known sunlight option", sunlight.trim()),
            )
        })?;

        Ok(ValidFields {
            name: name.to_string(),
            plant_type,
            sunlight,
        })
    }
}

struct ValidFields {
    name: String,
    plant_type: String,
    sunlight: String,
}

fn position(plants: &[Plant], id: PlantId) -> Option<usize> {
    plants.iter().position(|plant| plant.id == id)
}
