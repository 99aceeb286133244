//! Edit sessions
//!
//! An [`EditSession`] owns one draft and walks it through
//! `new | editing → saving → saved`, falling back to the editable state with
//! an error message when the backend refuses the submission.
//!
//! State changes are synchronous; backend calls happen in between as
//! requests ([`LoadRequest`], [`SubmitRequest`], [`DuplicateRequest`]) whose
//! responses come back [`Tagged`] with the token of the session that issued
//! them. [`SessionHost`] only applies a response when its token matches the
//! active session, so replies for a sheet the operator already left are
//! dropped.

use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

use shared::draft::{check, DraftOutcome, ReservationDraft, ValidationReport};
use shared::ids::EditTarget;
use shared::models::{Reservation, ReservationCreate};

use crate::api::FicheApi;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

// ============================================================================
// Tokens and Tagged Responses
// ============================================================================

/// Random identity of one edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Backend response labelled with the session that asked for it
#[derive(Debug)]
pub struct Tagged<T> {
    pub token: SessionToken,
    pub value: T,
}

// ============================================================================
// Session State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// No backend id yet
    New,
    /// Existing reservation
    Editing(Uuid),
}

/// Where the operator goes once a save succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Open the given sheet (after a create or a duplicate)
    OpenReservation(Uuid),
    /// Back to the read-only list (after an update)
    BackToList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the reservation being edited
    Loading,
    /// Load failed; nothing can be submitted until a reload succeeds
    LoadFailed,
    /// Draft editable
    Ready,
    /// Submission in flight
    Saving,
    Saved(Navigation),
}

/// Why a submit did not produce a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Another submission is in flight, the sheet is not loaded yet, or it is already saved
    Ignored(SessionPhase),
    /// Validation failed; the report is also kept on the session
    Invalid(ValidationReport),
    Ready(SubmitRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(Uuid),
}

/// Normalized payload waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub token: SessionToken,
    pub target: SubmitTarget,
    pub payload: ReservationCreate,
}

impl SubmitRequest {
    /// Label a result obtained for this request
    pub fn tag<T>(&self, value: T) -> Tagged<T> {
        Tagged {
            token: self.token,
            value,
        }
    }

    pub async fn send<H: HttpClient>(self, api: &FicheApi<H>) -> Tagged<ClientResult<Reservation>> {
        let value = match self.target {
            SubmitTarget::Create => api.create_reservation(&self.payload).await,
            SubmitTarget::Update(id) => api.update_reservation(id, &self.payload).await,
        };
        self.tag(value)
    }
}

/// Fetch of the reservation an editing session was opened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: SessionToken,
    pub id: Uuid,
}

impl LoadRequest {
    pub fn tag<T>(&self, value: T) -> Tagged<T> {
        Tagged {
            token: self.token,
            value,
        }
    }

    pub async fn send<H: HttpClient>(self, api: &FicheApi<H>) -> Tagged<ClientResult<Reservation>> {
        self.tag(api.get_reservation(self.id).await)
    }
}

/// Server-side copy of the sheet being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRequest {
    pub token: SessionToken,
    pub id: Uuid,
}

impl DuplicateRequest {
    pub fn tag<T>(&self, value: T) -> Tagged<T> {
        Tagged {
            token: self.token,
            value,
        }
    }

    pub async fn send<H: HttpClient>(self, api: &FicheApi<H>) -> Tagged<ClientResult<Reservation>> {
        self.tag(api.duplicate_reservation(self.id).await)
    }
}

// ============================================================================
// Edit Session
// ============================================================================

/// One kitchen sheet being created or edited
#[derive(Debug, Clone)]
pub struct EditSession {
    token: SessionToken,
    mode: SessionMode,
    phase: SessionPhase,
    draft: ReservationDraft,
    report: Option<ValidationReport>,
    error: Option<String>,
}

impl EditSession {
    /// Fresh sheet, optionally for a given day
    pub fn new(service_date: Option<NaiveDate>) -> Self {
        let draft = match service_date {
            Some(date) => ReservationDraft::for_service_date(date),
            None => ReservationDraft::new(),
        };
        Self {
            token: SessionToken::generate(),
            mode: SessionMode::New,
            phase: SessionPhase::Ready,
            draft,
            report: None,
            error: None,
        }
    }

    /// Sheet for a stored reservation; returns the load to perform
    pub fn editing(id: Uuid) -> (Self, LoadRequest) {
        let session = Self {
            token: SessionToken::generate(),
            mode: SessionMode::Editing(id),
            phase: SessionPhase::Loading,
            draft: ReservationDraft::new(),
            report: None,
            error: None,
        };
        let load = LoadRequest {
            token: session.token,
            id,
        };
        (session, load)
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn reservation_id(&self) -> Option<Uuid> {
        match self.mode {
            SessionMode::Editing(id) => Some(id),
            SessionMode::New => None,
        }
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReservationDraft {
        &mut self.draft
    }

    /// Report of the last rejected submit
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Message of the last failed backend call
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn owns<T>(&self, response: &Tagged<T>) -> bool {
        if response.token == self.token {
            return true;
        }
        tracing::debug!(
            session = %self.token,
            response = %response.token,
            "Discarding response for a superseded session"
        );
        false
    }

    /// Apply the loaded reservation: the draft is replaced wholesale
    ///
    /// A 404 turns the session into a new sheet; any other error leaves the
    /// session in `LoadFailed`. Returns `false` when the response belongs to
    /// another session or no load is outstanding.
    pub fn apply_loaded(&mut self, response: Tagged<ClientResult<Reservation>>) -> bool {
        if !self.owns(&response) {
            return false;
        }
        if self.phase != SessionPhase::Loading {
            tracing::debug!(phase = ?self.phase, "Discarding load response outside of loading");
            return false;
        }
        self.report = None;
        match response.value {
            Ok(reservation) => {
                self.mode = SessionMode::Editing(reservation.id);
                self.draft = ReservationDraft::from_reservation(&reservation);
                self.error = None;
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("Reservation not found, opening a new sheet instead");
                self.mode = SessionMode::New;
                self.draft = ReservationDraft::new();
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load reservation");
                self.error = Some(e.user_message());
                self.phase = SessionPhase::LoadFailed;
                return true;
            }
        }
        self.phase = SessionPhase::Ready;
        true
    }

    /// Retry a failed load, or refresh a loaded sheet
    ///
    /// Refused while a load or a submission is already in flight.
    pub fn reload(&mut self) -> Option<LoadRequest> {
        let SessionMode::Editing(id) = self.mode else {
            return None;
        };
        if !matches!(self.phase, SessionPhase::Ready | SessionPhase::LoadFailed) {
            tracing::debug!(phase = ?self.phase, "Reload refused");
            return None;
        }
        self.phase = SessionPhase::Loading;
        Some(LoadRequest {
            token: self.token,
            id,
        })
    }

    /// Validate and normalize the draft, entering `Saving` on success
    pub fn begin_submit(&mut self, today: NaiveDate) -> SubmitAttempt {
        if self.phase != SessionPhase::Ready {
            tracing::debug!(phase = ?self.phase, "Submit ignored");
            return SubmitAttempt::Ignored(self.phase);
        }
        match check(&self.draft, today) {
            DraftOutcome::Invalid(report) => {
                self.report = Some(report.clone());
                SubmitAttempt::Invalid(report)
            }
            DraftOutcome::Valid(payload) => {
                self.report = None;
                self.error = None;
                self.phase = SessionPhase::Saving;
                let target = match self.mode {
                    SessionMode::New => SubmitTarget::Create,
                    SessionMode::Editing(id) => SubmitTarget::Update(id),
                };
                SubmitAttempt::Ready(SubmitRequest {
                    token: self.token,
                    target,
                    payload,
                })
            }
        }
    }

    /// Apply the submission result
    ///
    /// Success yields the navigation to perform; failure keeps the draft,
    /// records the message and re-opens the form for a retry.
    pub fn finish_submit(&mut self, response: Tagged<ClientResult<Reservation>>) -> Option<Navigation> {
        if !self.owns(&response) || self.phase != SessionPhase::Saving {
            return None;
        }
        match response.value {
            Ok(saved) => {
                let navigation = match self.mode {
                    SessionMode::New => Navigation::OpenReservation(saved.id),
                    SessionMode::Editing(_) => Navigation::BackToList,
                };
                self.phase = SessionPhase::Saved(navigation);
                Some(navigation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reservation submission failed");
                self.error = Some(e.user_message());
                self.phase = SessionPhase::Ready;
                None
            }
        }
    }

    /// Duplicate the stored sheet (editing sessions only)
    pub fn duplicate_request(&self) -> ClientResult<DuplicateRequest> {
        match self.mode {
            SessionMode::Editing(id)
                if !matches!(self.phase, SessionPhase::Loading | SessionPhase::LoadFailed) =>
            {
                Ok(DuplicateRequest {
                    token: self.token,
                    id,
                })
            }
            _ => Err(ClientError::InvalidState(
                "only a loaded reservation can be duplicated".into(),
            )),
        }
    }

    /// Apply the duplicate result: success opens the copy
    pub fn finish_duplicate(&mut self, response: Tagged<ClientResult<Reservation>>) -> Option<Navigation> {
        if !self.owns(&response) {
            return None;
        }
        match response.value {
            Ok(copy) => Some(Navigation::OpenReservation(copy.id)),
            Err(e) => {
                tracing::warn!(error = %e, "Duplicate failed");
                self.error = Some(e.user_message());
                None
            }
        }
    }
}

// ============================================================================
// Session Host
// ============================================================================

/// Holder of the single active session
#[derive(Debug, Default)]
pub struct SessionHost {
    active: Option<EditSession>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an entry point, replacing the active session
    pub fn open(&mut self, target: EditTarget) -> Option<LoadRequest> {
        match target {
            EditTarget::New { service_date } => {
                self.active = Some(EditSession::new(service_date));
                None
            }
            EditTarget::Existing(id) => {
                let (session, load) = EditSession::editing(id);
                self.active = Some(session);
                Some(load)
            }
        }
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&EditSession> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut EditSession> {
        self.active.as_mut()
    }

    /// Submit the active draft; without a session nothing happens
    pub fn submit(&mut self, today: NaiveDate) -> Option<SubmitAttempt> {
        self.active.as_mut().map(|session| session.begin_submit(today))
    }

    pub fn accept_loaded(&mut self, response: Tagged<ClientResult<Reservation>>) -> bool {
        match self.active.as_mut() {
            Some(session) => session.apply_loaded(response),
            None => false,
        }
    }

    pub fn accept_submitted(&mut self, response: Tagged<ClientResult<Reservation>>) -> Option<Navigation> {
        self.active.as_mut()?.finish_submit(response)
    }

    pub fn accept_duplicated(&mut self, response: Tagged<ClientResult<Reservation>>) -> Option<Navigation> {
        self.active.as_mut()?.finish_duplicate(response)
    }
}
