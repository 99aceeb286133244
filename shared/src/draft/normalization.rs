//! Draft normalization
//!
//! Produces the exact body the backend create/update endpoints expect.
//! Runs after a successful validation but does not rely on it: every field
//! gets a usable default on its own.

use chrono::NaiveDate;

use super::ReservationDraft;
use crate::models::{ReservationCreate, ReservationItemCreate};

/// Name used when the client name is blank
pub const DEFAULT_CLIENT_NAME: &str = "Client";

/// Arrival time used when none (or a truncated one) was typed
pub const MIDNIGHT: &str = "00:00:00";

/// Bring an arrival time to `HH:MM:SS`
///
/// Inputs shorter than 4 characters fall back to midnight; an exact `HH:MM`
/// gets `:00` appended; anything else is passed through.
pub fn normalize_arrival_time(raw: &str) -> String {
    let time = raw.trim();
    if time.chars().count() < 4 {
        return MIDNIGHT.to_string();
    }
    if is_hh_mm(time) {
        return format!("{time}:00");
    }
    time.to_string()
}

fn is_hh_mm(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit)
}

/// Canonical payload for a draft
///
/// `today` fills a missing service date.
pub fn normalize(draft: &ReservationDraft, today: NaiveDate) -> ReservationCreate {
    let client_name = match draft.client_name.trim() {
        "" => DEFAULT_CLIENT_NAME.to_string(),
        name => name.to_string(),
    };

    let items = draft
        .items
        .iter()
        .filter(|item| item.is_submittable())
        .map(|item| ReservationItemCreate {
            course: item.course,
            name: item.name.trim().to_string(),
            quantity: item.quantity,
        })
        .collect();

    ReservationCreate {
        client_name,
        service_date: draft.service_date.unwrap_or(today),
        arrival_time: normalize_arrival_time(&draft.arrival_time),
        pax: draft.pax.max(1),
        drink_formula: draft.drink_formula.clone(),
        notes: draft.notes.clone(),
        status: draft.status,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{validate, DraftItem};
    use crate::models::CourseType;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_arrival_time_defaults() {
        assert_eq!(normalize_arrival_time(""), MIDNIGHT);
        assert_eq!(normalize_arrival_time("19:"), MIDNIGHT);
        assert_eq!(normalize_arrival_time("19:30"), "19:30:00");
        assert_eq!(normalize_arrival_time("19:30:15"), "19:30:15");
        assert_eq!(normalize_arrival_time(" 08:05 "), "08:05:00");
    }

    #[test]
    fn test_scenario_c_fills_date_and_seconds() {
        let draft = ReservationDraft {
            client_name: "Dupont".into(),
            service_date: None,
            pax: 2,
            arrival_time: "19:30".into(),
            items: vec![DraftItem::new(CourseType::Entree, "Soupe", 2)],
            ..ReservationDraft::new()
        };

        let payload = normalize(&draft, today());
        assert_eq!(payload.service_date, today());
        assert_eq!(payload.arrival_time, "19:30:00");
        assert_eq!(
            payload.items,
            vec![ReservationItemCreate {
                course: CourseType::Entree,
                name: "Soupe".into(),
                quantity: 2,
            }]
        );
    }

    #[test]
    fn test_scenario_d_placeholders_are_dropped() {
        let draft = ReservationDraft {
            items: vec![
                DraftItem::placeholder(CourseType::Entree),
                DraftItem::placeholder(CourseType::Plat),
            ],
            ..ReservationDraft::new()
        };
        assert!(normalize(&draft, today()).items.is_empty());
        assert!(normalize(&ReservationDraft::new(), today()).items.is_empty());
    }

    #[test]
    fn test_defensive_defaults() {
        let draft = ReservationDraft {
            client_name: "  ".into(),
            pax: -3,
            items: vec![
                DraftItem::new(CourseType::Plat, "  ", 4),
                DraftItem::new(CourseType::Plat, "Steak", -1),
                DraftItem::new(CourseType::Plat, " Steak ", 1),
            ],
            ..ReservationDraft::new()
        };
        let payload = normalize(&draft, today());
        assert_eq!(payload.client_name, DEFAULT_CLIENT_NAME);
        assert_eq!(payload.pax, 1);
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].name, "Steak");
    }

    #[test]
    fn test_item_ids_are_not_submitted() {
        let mut item = DraftItem::new(CourseType::Dessert, "Tarte", 2);
        item.id = Some(uuid::Uuid::new_v4());
        let draft = ReservationDraft {
            items: vec![item],
            ..ReservationDraft::new()
        };
        let value = serde_json::to_value(normalize(&draft, today())).unwrap();
        assert!(value["items"][0].get("id").is_none());
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn arb_course() -> impl Strategy<Value = CourseType> {
        prop_oneof![
            Just(CourseType::Entree),
            Just(CourseType::Plat),
            Just(CourseType::Dessert),
        ]
    }

    fn arb_item() -> impl Strategy<Value = DraftItem> {
        (arb_course(), prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-zA-Z ]{1,12}"], -2i32..6)
            .prop_map(|(course, name, quantity)| DraftItem::new(course, name, quantity))
    }

    fn arb_time() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[0-2][0-9]:[0-5][0-9]",
            "[0-2][0-9]:[0-5][0-9]:[0-5][0-9]",
            "[0-9h:]{1,6}",
        ]
    }

    fn arb_draft() -> impl Strategy<Value = ReservationDraft> {
        (
            prop_oneof![Just(String::new()), Just(" ".to_string()), "[A-Za-z]{1,10}"],
            proptest::option::of(0u32..365),
            arb_time(),
            -1i32..8,
            proptest::collection::vec(arb_item(), 0..8),
        )
            .prop_map(|(client_name, day, arrival_time, pax, items)| ReservationDraft {
                client_name,
                service_date: day.map(|d| NaiveDate::from_yo_opt(2025, d + 1).unwrap()),
                arrival_time,
                pax,
                items,
                ..ReservationDraft::new()
            })
    }

    /// Drafts that pass validation: pax is raised to the largest course total
    fn arb_valid_draft() -> impl Strategy<Value = ReservationDraft> {
        (
            "[A-Za-z]{1,10}",
            0u32..365,
            prop_oneof![Just(String::new()), Just("19:30".to_string()), Just("12:00:00".to_string())],
            1i32..8,
            proptest::collection::vec(arb_item(), 0..8),
        )
            .prop_map(|(client_name, day, arrival_time, pax, items)| {
                let mut draft = ReservationDraft {
                    client_name,
                    service_date: NaiveDate::from_yo_opt(2025, day + 1),
                    arrival_time,
                    pax,
                    items,
                    ..ReservationDraft::new()
                };
                let widest = draft.course_totals().values().copied().max().unwrap_or(0);
                draft.pax = draft.pax.max(widest as i32);
                draft
            })
    }

    proptest! {
        #[test]
        fn prop_invalid_iff_some_rule_fails(draft in arb_draft()) {
            let time = draft.arrival_time.trim();
            let pax = i64::from(draft.pax);
            let expected_invalid = draft.client_name.trim().is_empty()
                || draft.service_date.is_none()
                || draft.pax < 1
                || (!time.is_empty() && !crate::draft::validation::is_time_of_day(time))
                || draft.course_totals().values().any(|total| *total > pax);
            prop_assert_eq!(!validate(&draft).is_valid(), expected_invalid);
        }

        #[test]
        fn prop_normalized_items_are_filled(draft in arb_draft()) {
            let payload = normalize(&draft, today());
            for item in &payload.items {
                prop_assert!(!item.name.trim().is_empty());
                prop_assert!(item.quantity > 0);
            }
        }

        #[test]
        fn prop_normalize_is_idempotent(draft in arb_valid_draft()) {
            prop_assert!(validate(&draft).is_valid());
            let once = normalize(&draft, today());
            let twice = normalize(&ReservationDraft::from(&once), today());
            prop_assert_eq!(once, twice);
        }
    }
}
