//! Menu Item Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CourseType;

/// Dish of the catalogue (base de plats)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub course: CourseType,
    pub active: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub course: CourseType,
    pub active: bool,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl MenuItemUpdate {
    /// Payload flipping the active flag of `item`
    pub fn toggle_active(item: &MenuItem) -> Self {
        Self {
            active: Some(!item.active),
            ..Default::default()
        }
    }
}

/// Autocomplete entry returned by `/menu-items/search`
///
/// The endpoint returns whole menu rows; only name and type are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DishSuggestion {
    pub name: String,
    #[serde(rename = "type")]
    pub course: CourseType,
}
