//! Shared types for the kitchen-sheet back office
//!
//! Wire models, the reservation draft with its validator and normalizer,
//! catalogue filtering and identifier helpers. Used by `fiche-client` and
//! `fiche-cli`; nothing here performs I/O.

pub mod draft;
pub mod ids;
pub mod menu;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use draft::{check, normalize, validate, DraftOutcome, ReservationDraft, ValidationReport};
pub use ids::EditTarget;
pub use models::{CourseType, MenuItem, Reservation, ReservationCreate};
