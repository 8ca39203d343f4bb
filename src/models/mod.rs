//! Domain models for PocketPlant.
//!
//! - [`Plant`]: one tracked houseplant and its care schedule. Plants are values;
//!   an edit produces a new `Plant` with the same id that replaces the old one.
//! - [`PlantDraft`]: input for creating a plant, before id assignment and defaulting.
//! - [`WateringHours`]: the ordered, duplicate-free set of daily watering times.
//! - [`Catalog`]: the recognized plant categories and sunlight options.

mod catalog;
mod plant;
mod watering;

pub use catalog::*;
pub use plant::*;
pub use watering::*;
