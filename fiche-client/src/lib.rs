//! Fiche Client - HTTP client for the kitchen-sheet back office
//!
//! Typed calls to the REST API, the edit-session state machine that drives
//! a reservation form, debounced dish autocomplete and PDF export.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod search;
pub mod session;

pub use api::{FicheApi, OkResponse, ReservationQuery};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, GENERIC_ERROR_MESSAGE};
pub use export::PdfDocument;
pub use http::{HttpClient, NetworkHttpClient};
pub use search::{DishSearchHandle, DishSearchWorker, DishSource, SearchInput, SearchResults};
pub use session::{EditSession, Navigation, SessionHost, SessionPhase, SubmitAttempt};

// Re-export shared types for convenience
pub use shared::models::{CourseType, DishSuggestion, MenuItem, Reservation, ReservationCreate};
