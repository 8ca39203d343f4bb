//! PocketPlant: an in-memory plant care tracker.
//!
//! The [`store::PlantStore`] is the single source of truth for one session's
//! plants. Presentation code (the [`session`] module here, or any other UI)
//! builds plants through a [`form::PlantForm`], commits them to the store, and
//! follows changes through live views or subscriptions.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod session;
pub mod store;

pub use error::{Result, StoreError};
pub use store::PlantStore;
