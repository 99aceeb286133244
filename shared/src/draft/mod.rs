//! Reservation draft
//!
//! A [`ReservationDraft`] is the in-progress kitchen sheet held by an edit
//! session. It is looser than the wire model: the date may be missing, the
//! arrival time is raw form text and item rows may be half filled.
//!
//! - [`validate`] reports every problem of a draft at once
//! - [`normalize`] turns a draft into the canonical [`ReservationCreate`]
//! - [`check`] does both in one pass and returns a tagged [`DraftOutcome`]
//!
//! Placeholder rows (one empty row per course) are a form affordance: they
//! are seeded here, explicitly, and dropped again by normalization.

mod normalization;
mod validation;

pub use normalization::{normalize, normalize_arrival_time, DEFAULT_CLIENT_NAME, MIDNIGHT};
pub use validation::{
    check, validate, CourseOverflow, DraftField, DraftOutcome, FieldError, ItemsError,
    ValidationKind, ValidationReport,
};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::{
    CourseType, DishSuggestion, DrinkFormula, Reservation, ReservationCreate, ReservationStatus,
};

/// Covers proposed for a fresh sheet
pub const DEFAULT_PAX: i32 = 2;

// ============================================================================
// Draft Types
// ============================================================================

/// Dish row being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftItem {
    /// Backend id of the row this was loaded from (editing only, never submitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub course: CourseType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i32,
}

impl DraftItem {
    pub fn new(course: CourseType, name: impl Into<String>, quantity: i32) -> Self {
        Self {
            id: None,
            course,
            name: name.into(),
            quantity,
        }
    }

    /// Empty row shown for a course before anything is typed
    pub fn placeholder(course: CourseType) -> Self {
        Self::new(course, "", 0)
    }

    /// Whether this row would survive normalization
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity > 0
    }
}

/// Partial update of a dish row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub course: Option<CourseType>,
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

/// In-progress reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub service_date: Option<NaiveDate>,
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default = "default_pax")]
    pub pax: i32,
    #[serde(default)]
    pub drink_formula: DrinkFormula,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub items: Vec<DraftItem>,
}

fn default_pax() -> i32 {
    DEFAULT_PAX
}

/// Date inputs submit `""` when cleared
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Seeding
// ============================================================================

/// One empty row per course, in service order
pub fn placeholder_items() -> Vec<DraftItem> {
    CourseType::ALL.into_iter().map(DraftItem::placeholder).collect()
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationDraft {
    /// Fresh sheet, seeded with placeholder rows
    pub fn new() -> Self {
        Self {
            client_name: String::new(),
            service_date: None,
            arrival_time: String::new(),
            pax: DEFAULT_PAX,
            drink_formula: DrinkFormula::default(),
            notes: String::new(),
            status: ReservationStatus::Draft,
            items: placeholder_items(),
        }
    }

    /// Fresh sheet for a given service day
    pub fn for_service_date(date: NaiveDate) -> Self {
        Self {
            service_date: Some(date),
            ..Self::new()
        }
    }

    /// Draft replacing whatever was being edited with a stored reservation
    pub fn from_reservation(reservation: &Reservation) -> Self {
        let items = reservation
            .items
            .iter()
            .map(|item| DraftItem {
                id: item.id,
                course: item.course,
                name: item.name.clone(),
                quantity: item.quantity,
            })
            .collect();

        let mut draft = Self {
            client_name: reservation.client_name.clone(),
            service_date: Some(reservation.service_date),
            arrival_time: reservation.arrival_time.clone(),
            pax: reservation.pax,
            drink_formula: reservation.drink_formula.clone(),
            notes: reservation.notes.clone().unwrap_or_default(),
            status: reservation.status,
            items,
        };
        draft.ensure_placeholders();
        draft
    }

    /// Re-seed placeholder rows when the item list is empty
    pub fn ensure_placeholders(&mut self) {
        if self.items.is_empty() {
            self.items = placeholder_items();
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Append a new `plat` row and return its index
    pub fn add_item(&mut self) -> usize {
        self.items.push(DraftItem::new(CourseType::Plat, "", 1));
        self.items.len() - 1
    }

    /// Apply a patch to row `index`; out-of-range indexes are ignored
    pub fn update_item(&mut self, index: usize, patch: ItemPatch) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        if let Some(course) = patch.course {
            item.course = course;
        }
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        true
    }

    /// Picking an autocomplete entry sets both the name and the course
    pub fn apply_suggestion(&mut self, index: usize, suggestion: &DishSuggestion) -> bool {
        self.update_item(
            index,
            ItemPatch {
                course: Some(suggestion.course),
                name: Some(suggestion.name.clone()),
                quantity: None,
            },
        )
    }

    pub fn remove_item(&mut self, index: usize) -> Option<DraftItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Sum of quantities per course, over every row
    pub fn course_totals(&self) -> BTreeMap<CourseType, i64> {
        let mut totals = BTreeMap::new();
        for item in &self.items {
            *totals.entry(item.course).or_insert(0) += i64::from(item.quantity);
        }
        totals
    }
}

impl From<&ReservationCreate> for ReservationDraft {
    fn from(payload: &ReservationCreate) -> Self {
        Self {
            client_name: payload.client_name.clone(),
            service_date: Some(payload.service_date),
            arrival_time: payload.arrival_time.clone(),
            pax: payload.pax,
            drink_formula: payload.drink_formula.clone(),
            notes: payload.notes.clone(),
            status: payload.status,
            items: payload
                .items
                .iter()
                .map(|item| DraftItem::new(item.course, item.name.clone(), item.quantity))
                .collect(),
        }
    }
}
