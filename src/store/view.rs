use tokio::sync::watch;

use super::Snapshot;
use crate::models::{Plant, PlantId};

/// Live, read-only view of every plant in insertion order.
///
/// [`current`](Self::current) always returns the store's latest list; there is
/// nothing to refresh or re-subscribe.
#[derive(Debug, Clone)]
pub struct PlantListView {
    rx: watch::Receiver<Snapshot>,
}

impl PlantListView {
    pub(super) fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> Snapshot {
        Snapshot::clone(&self.rx.borrow())
    }

    /// Whether the list changed since this view last waited on [`changed`](Self::changed).
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next committed change and return the new list.
    ///
    /// Returns `None` once every handle to the store has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(Snapshot::clone(&self.rx.borrow_and_update()))
    }
}

/// Live view of a single plant by id.
///
/// The plant is looked up in the store's latest list on every read, so the
/// view tracks updates, and reports `None` while no plant has the id.
#[derive(Debug, Clone)]
pub struct PlantView {
    id: PlantId,
    rx: watch::Receiver<Snapshot>,
    last: Option<Plant>,
}

impl PlantView {
    pub(super) fn new(id: PlantId, rx: watch::Receiver<Snapshot>) -> Self {
        let last = find(&rx.borrow(), id);
        Self { id, rx, last }
    }

    pub fn id(&self) -> PlantId {
        self.id
    }

    pub fn current(&self) -> Option<Plant> {
        find(&self.rx.borrow(), self.id)
    }

    /// Wait until this plant differs from what the view last reported,
    /// skipping list changes that leave it untouched.
    ///
    /// The outer `None` means the store is gone; the inner value is the plant,
    /// or `None` if it was removed.
    pub async fn changed(&mut self) -> Option<Option<Plant>> {
        loop {
            self.rx.changed().await.ok()?;
            let next = find(&self.rx.borrow_and_update(), self.id);
            if next != self.last {
                self.last = next.clone();
                return Some(next);
            }
        }
    }
}

fn find(plants: &[Plant], id: PlantId) -> Option<Plant> {
    plants.iter().find(|plant| plant.id == id).cloned()
}
