//! Zenchef Synchronization Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking platform credentials stored by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZenchefSettings {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<String>,
}

impl ZenchefSettings {
    /// Both credentials present and non-blank (sync is refused otherwise)
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.api_token) && filled(&self.restaurant_id)
    }
}

/// Sync window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZenchefSyncRequest {
    #[serde(rename = "fromDate")]
    pub from_date: NaiveDate,
    #[serde(rename = "toDate")]
    pub to_date: NaiveDate,
}

impl ZenchefSyncRequest {
    /// Window covering a single service day
    pub fn day(date: NaiveDate) -> Self {
        Self {
            from_date: date,
            to_date: date,
        }
    }
}

/// Sheet created by a sync run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncedReservation {
    pub id: Uuid,
    pub client_name: String,
    pub service_date: String,
    pub arrival_time: String,
    pub pax: i32,
}

/// Sync outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZenchefSyncResult {
    pub count: usize,
    #[serde(default)]
    pub created: Vec<SyncedReservation>,
    #[serde(rename = "fromDate", default)]
    pub from_date: Option<String>,
    #[serde(rename = "toDate", default)]
    pub to_date: Option<String>,
    /// Set when the backend already processed the idempotency key
    #[serde(default)]
    pub idempotent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_completeness() {
        let mut settings = ZenchefSettings::default();
        assert!(!settings.is_complete());
        settings.api_token = Some("tok".into());
        settings.restaurant_id = Some("  ".into());
        assert!(!settings.is_complete());
        settings.restaurant_id = Some("42".into());
        assert!(settings.is_complete());
    }

    #[test]
    fn test_sync_request_uses_camel_case_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let value = serde_json::to_value(ZenchefSyncRequest::day(date)).unwrap();
        assert_eq!(value, serde_json::json!({ "fromDate": "2025-10-15", "toDate": "2025-10-15" }));
    }

    #[test]
    fn test_sync_result_idempotent_replay() {
        let json = r#"{"created": [], "count": 0, "fromDate": "2025-10-15", "toDate": null, "idempotent": true}"#;
        let result: ZenchefSyncResult = serde_json::from_str(json).unwrap();
        assert!(result.idempotent);
        assert_eq!(result.count, 0);
        assert!(result.to_date.is_none());
    }
}
