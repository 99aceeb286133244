//! Reservation Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::CourseType;

// ============================================================================
// Status / Drink Formula
// ============================================================================

/// Kitchen sheet lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Brouillon
    #[default]
    Draft,
    /// Confirmée
    Confirmed,
    /// Imprimée
    Printed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Printed => "printed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drink formula offered with the menu
///
/// The backend stores a free string; anything outside the fixed list is kept
/// verbatim in `Other` so a round trip never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DrinkFormula {
    #[default]
    SansAlcool,
    VinAuVerre,
    AccordsMetsVins,
    SoftCafe,
    EauCafe,
    Other(String),
}

impl DrinkFormula {
    /// The formulas proposed in the sheet form, in display order
    pub const CHOICES: [DrinkFormula; 5] = [
        DrinkFormula::SansAlcool,
        DrinkFormula::VinAuVerre,
        DrinkFormula::AccordsMetsVins,
        DrinkFormula::SoftCafe,
        DrinkFormula::EauCafe,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::SansAlcool => "Sans alcool",
            Self::VinAuVerre => "Vin au verre",
            Self::AccordsMetsVins => "Accords mets & vins",
            Self::SoftCafe => "Soft + Café",
            Self::EauCafe => "Eau + Café",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for DrinkFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DrinkFormula {
    fn from(value: String) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.as_str() == value)
            .unwrap_or(Self::Other(value))
    }
}

impl From<&str> for DrinkFormula {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DrinkFormula> for String {
    fn from(value: DrinkFormula) -> Self {
        match value {
            DrinkFormula::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

// ============================================================================
// Read Model
// ============================================================================

/// Dish line of a stored reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub course: CourseType,
    pub name: String,
    pub quantity: i32,
}

/// Reservation entity (kitchen sheet) as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: Uuid,
    pub client_name: String,
    pub pax: i32,
    pub service_date: NaiveDate,
    /// `HH:MM:SS` (older rows may carry `HH:MM`)
    pub arrival_time: String,
    pub drink_formula: DrinkFormula,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub items: Vec<ReservationItem>,
}

impl Reservation {
    /// Total covers ordered for one course
    pub fn course_total(&self, course: CourseType) -> i32 {
        self.items
            .iter()
            .filter(|item| item.course == course)
            .map(|item| item.quantity)
            .sum()
    }
}

// ============================================================================
// Write Model
// ============================================================================

/// Dish line sent to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationItemCreate {
    #[serde(rename = "type")]
    pub course: CourseType,
    pub name: String,
    pub quantity: i32,
}

/// Canonical create/update payload, produced by draft normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationCreate {
    pub client_name: String,
    /// `YYYY-MM-DD`
    pub service_date: NaiveDate,
    /// Always `HH:MM:SS`
    pub arrival_time: String,
    pub pax: i32,
    pub drink_formula: DrinkFormula,
    pub notes: String,
    pub status: ReservationStatus,
    pub items: Vec<ReservationItemCreate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drink_formula_roundtrip_keeps_unknown_labels() {
        let known: DrinkFormula = serde_json::from_str("\"Soft + Café\"").unwrap();
        assert_eq!(known, DrinkFormula::SoftCafe);

        let custom: DrinkFormula = serde_json::from_str("\"Champagne\"").unwrap();
        assert_eq!(custom, DrinkFormula::Other("Champagne".into()));
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"Champagne\"");
    }

    #[test]
    fn test_reservation_from_backend_json() {
        let json = r#"{
            "id": "7d3c2a2e-6a53-4a47-9c37-3f1b1e8f0a11",
            "client_name": "Dupont",
            "pax": 12,
            "service_date": "2024-06-01",
            "arrival_time": "19:30:00",
            "drink_formula": "Vin au verre",
            "notes": null,
            "status": "confirmed",
            "created_at": "2024-05-20T10:11:12.123456",
            "updated_at": "2024-05-20T10:11:12.123456",
            "items": [
                {"id": "0b6d3c58-1f3e-4f9b-9b5a-2b8e3c1d7e01", "type": "entrée", "name": "Soupe", "quantity": 12},
                {"type": "plat", "name": "Steak", "quantity": 7},
                {"type": "plat", "name": "Poisson", "quantity": 5}
            ]
        }"#;

        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.drink_formula, DrinkFormula::VinAuVerre);
        assert_eq!(reservation.items.len(), 3);
        assert_eq!(reservation.course_total(CourseType::Plat), 12);
        assert_eq!(reservation.course_total(CourseType::Dessert), 0);
    }

    #[test]
    fn test_create_payload_shape() {
        let payload = ReservationCreate {
            client_name: "Dupont".into(),
            service_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            arrival_time: "19:30:00".into(),
            pax: 2,
            drink_formula: DrinkFormula::default(),
            notes: String::new(),
            status: ReservationStatus::Draft,
            items: vec![ReservationItemCreate {
                course: CourseType::Entree,
                name: "Soupe".into(),
                quantity: 2,
            }],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["service_date"], "2024-01-01");
        assert_eq!(value["drink_formula"], "Sans alcool");
        assert_eq!(value["status"], "draft");
        assert_eq!(value["items"][0]["type"], "entrée");
        assert!(value["items"][0].get("id").is_none());
    }
}
