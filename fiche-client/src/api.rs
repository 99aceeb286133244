//! Typed back-office API
//!
//! One method per backend endpoint. Bodies are the `shared` models; the
//! transport is any [`HttpClient`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{
    CourseType, DishSuggestion, MenuItem, MenuItemCreate, MenuItemUpdate, Reservation,
    ReservationCreate, ZenchefSettings, ZenchefSyncRequest, ZenchefSyncResult,
};

use crate::export::PdfDocument;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};

/// Acknowledgement returned by delete / settings endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    #[serde(default)]
    pub ok: bool,
}

/// Filters of `GET /reservations`
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReservationQuery {
    /// Case-insensitive client name fragment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
}

impl ReservationQuery {
    pub fn new(q: Option<&str>, service_date: Option<NaiveDate>) -> Self {
        Self {
            q: non_blank(q),
            service_date,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    course: Option<CourseType>,
}

#[derive(Debug, Serialize)]
struct TextQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Back-office API client
#[derive(Debug, Clone)]
pub struct FicheApi<H = NetworkHttpClient> {
    http: H,
}

impl FicheApi<NetworkHttpClient> {
    /// Client over the network transport
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_transport(NetworkHttpClient::new(config)?))
    }
}

impl<H: HttpClient> FicheApi<H> {
    pub fn with_transport(http: H) -> Self {
        Self { http }
    }

    pub fn transport(&self) -> &H {
        &self.http
    }

    // ========== Menu Items ==========

    pub async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.http.get("/menu-items").await
    }

    pub async fn get_menu_item(&self, id: Uuid) -> ClientResult<MenuItem> {
        self.http.get(&format!("/menu-items/{id}")).await
    }

    pub async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem> {
        let created: MenuItem = self.http.post("/menu-items", item).await?;
        tracing::info!(id = %created.id, name = %created.name, "Menu item created");
        Ok(created)
    }

    pub async fn update_menu_item(&self, id: Uuid, update: &MenuItemUpdate) -> ClientResult<MenuItem> {
        self.http.put(&format!("/menu-items/{id}"), update).await
    }

    pub async fn delete_menu_item(&self, id: Uuid) -> ClientResult<OkResponse> {
        let ack = self.http.delete(&format!("/menu-items/{id}")).await?;
        tracing::info!(%id, "Menu item deleted");
        Ok(ack)
    }

    /// Autocomplete over active dishes; a blank query lists the course defaults
    pub async fn search_dishes(
        &self,
        query: Option<&str>,
        course: Option<CourseType>,
    ) -> ClientResult<Vec<DishSuggestion>> {
        let params = SearchParams {
            q: query.map(str::trim).filter(|q| !q.is_empty()),
            course,
        };
        self.http.get_with_query("/menu-items/search", &params).await
    }

    // ========== Reservations ==========

    pub async fn list_reservations(&self, query: &ReservationQuery) -> ClientResult<Vec<Reservation>> {
        self.http.get_with_query("/reservations", query).await
    }

    pub async fn upcoming_reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.http.get("/reservations/upcoming").await
    }

    pub async fn past_reservations(&self, q: Option<&str>) -> ClientResult<Vec<Reservation>> {
        let params = TextQuery { q: non_blank(q) };
        self.http.get_with_query("/reservations/past", &params).await
    }

    pub async fn get_reservation(&self, id: Uuid) -> ClientResult<Reservation> {
        self.http.get(&format!("/reservations/{id}")).await
    }

    pub async fn create_reservation(&self, payload: &ReservationCreate) -> ClientResult<Reservation> {
        let created: Reservation = self.http.post("/reservations", payload).await?;
        tracing::info!(id = %created.id, client = %created.client_name, "Reservation created");
        Ok(created)
    }

    pub async fn update_reservation(
        &self,
        id: Uuid,
        payload: &ReservationCreate,
    ) -> ClientResult<Reservation> {
        let updated = self.http.put(&format!("/reservations/{id}"), payload).await?;
        tracing::info!(%id, "Reservation updated");
        Ok(updated)
    }

    pub async fn delete_reservation(&self, id: Uuid) -> ClientResult<OkResponse> {
        let ack = self.http.delete(&format!("/reservations/{id}")).await?;
        tracing::info!(%id, "Reservation deleted");
        Ok(ack)
    }

    pub async fn duplicate_reservation(&self, id: Uuid) -> ClientResult<Reservation> {
        let copy: Reservation = self.http.post_empty(&format!("/reservations/{id}/duplicate")).await?;
        tracing::info!(source = %id, id = %copy.id, "Reservation duplicated");
        Ok(copy)
    }

    // ========== PDF ==========

    pub async fn reservation_pdf(&self, id: Uuid) -> ClientResult<PdfDocument> {
        let bytes = self.http.get_bytes(&format!("/reservations/{id}/pdf")).await?;
        Ok(PdfDocument::new(format!("fiche-{id}.pdf"), bytes))
    }

    pub async fn day_pdf(&self, date: NaiveDate) -> ClientResult<PdfDocument> {
        let day = date.format("%Y-%m-%d");
        let bytes = self.http.get_bytes(&format!("/reservations/day/{day}/pdf")).await?;
        Ok(PdfDocument::new(format!("service-{day}.pdf"), bytes))
    }

    // ========== Zenchef ==========

    pub async fn zenchef_settings(&self) -> ClientResult<ZenchefSettings> {
        self.http.get("/zenchef/settings").await
    }

    pub async fn update_zenchef_settings(&self, settings: &ZenchefSettings) -> ClientResult<OkResponse> {
        self.http.put("/zenchef/settings", settings).await
    }

    /// Run a sync with a fresh idempotency key
    pub async fn sync_zenchef(&self, window: &ZenchefSyncRequest) -> ClientResult<ZenchefSyncResult> {
        self.sync_zenchef_with_key(window, &Uuid::new_v4().to_string()).await
    }

    /// Run a sync with a caller-held key; replaying the key is a no-op server side
    pub async fn sync_zenchef_with_key(
        &self,
        window: &ZenchefSyncRequest,
        key: &str,
    ) -> ClientResult<ZenchefSyncResult> {
        let result: ZenchefSyncResult = self.http.post_idempotent("/zenchef/sync", window, key).await?;
        tracing::info!(
            count = result.count,
            idempotent = result.idempotent,
            from = %window.from_date,
            to = %window.to_date,
            "Zenchef sync finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_query_skips_blank_fields() {
        let query = ReservationQuery::new(Some("  "), None);
        assert_eq!(serde_json::to_value(&query).unwrap(), serde_json::json!({}));

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let query = ReservationQuery::new(Some(" dup "), Some(date));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "q": "dup", "service_date": "2024-06-01" })
        );
    }

    #[test]
    fn test_search_params_use_type_key() {
        let params = SearchParams {
            q: None,
            course: Some(CourseType::Entree),
        };
        assert_eq!(serde_json::to_value(&params).unwrap(), serde_json::json!({ "type": "entrée" }));
    }
}
