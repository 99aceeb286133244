//! Reservation identifiers on edit entry points
//!
//! An edit route carries either `new` or a reservation id. Anything that is
//! not a well-formed UUID opens a fresh sheet instead of failing.

use chrono::NaiveDate;
use uuid::Uuid;

/// What an edit entry point should open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Fresh sheet, optionally prefilled with a service date
    New { service_date: Option<NaiveDate> },
    /// Load and edit a stored reservation
    Existing(Uuid),
}

/// Shape check on a raw identifier
pub fn parse_reservation_id(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("new") {
        return None;
    }
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(id = %raw, error = %e, "Malformed reservation id, opening a new sheet");
            None
        }
    }
}

impl EditTarget {
    /// Resolve a route id plus the optional `date` prefill
    ///
    /// The date is only honoured for new sheets and ignored when malformed.
    pub fn resolve(raw_id: Option<&str>, date: Option<&str>) -> Self {
        match raw_id.and_then(parse_reservation_id) {
            Some(id) => Self::Existing(id),
            None => Self::New {
                service_date: date
                    .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reservation_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_reservation_id(&id.to_string()), Some(id));
        assert_eq!(parse_reservation_id("new"), None);
        assert_eq!(parse_reservation_id(""), None);
        assert_eq!(parse_reservation_id("42"), None);
        assert_eq!(parse_reservation_id("not-a-uuid-at-all"), None);
    }

    #[test]
    fn test_resolve() {
        let id = Uuid::new_v4();
        assert_eq!(EditTarget::resolve(Some(&id.to_string()), Some("2024-01-01")), EditTarget::Existing(id));
        assert_eq!(
            EditTarget::resolve(Some("new"), Some("2024-01-01")),
            EditTarget::New { service_date: NaiveDate::from_ymd_opt(2024, 1, 1) }
        );
        assert_eq!(EditTarget::resolve(Some("garbage"), Some("tomorrow")), EditTarget::New { service_date: None });
        assert_eq!(EditTarget::resolve(None, None), EditTarget::New { service_date: None });
    }
}
