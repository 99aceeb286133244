//! Draft validation
//!
//! Every check runs on every call; nothing returns early. The caller gets
//! one [`ValidationReport`] holding all field errors plus the aggregate
//! items error, ready to render next to the form.

use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use super::{normalize, ReservationDraft};
use crate::models::{CourseType, ReservationCreate};

/// `HH:MM` or `HH:MM:SS`, 24h clock
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").expect("static time pattern")
});

/// Whether `value` is a well-formed arrival time
pub(crate) fn is_time_of_day(value: &str) -> bool {
    TIME_PATTERN.is_match(value)
}

// ============================================================================
// Error Types
// ============================================================================

/// Form field a field-level error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    ClientName,
    ServiceDate,
    Pax,
    ArrivalTime,
}

impl DraftField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientName => "client_name",
            Self::ServiceDate => "service_date",
            Self::Pax => "pax",
            Self::ArrivalTime => "arrival_time",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    MissingRequiredField,
    FormatMismatch,
    QuantityExceeded,
}

/// Field-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("name required")]
    NameRequired,
    #[error("date required")]
    DateRequired,
    #[error("minimum 1")]
    PaxBelowMinimum,
    #[error("format HH:MM")]
    TimeFormat,
}

impl FieldError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            // pax below 1 counts as a missing value
            Self::NameRequired | Self::DateRequired | Self::PaxBelowMinimum => {
                ValidationKind::MissingRequiredField
            }
            Self::TimeFormat => ValidationKind::FormatMismatch,
        }
    }
}

/// One course ordered beyond the covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseOverflow {
    pub course: CourseType,
    pub total: i64,
}

impl fmt::Display for CourseOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.course, self.total)
    }
}

/// Aggregate error over the item rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("quantities exceed pax {pax}: {}", join_overflows(.overflows))]
pub struct ItemsError {
    pub pax: i32,
    /// Offending courses, in service order
    pub overflows: Vec<CourseOverflow>,
}

impl ItemsError {
    pub fn kind(&self) -> ValidationKind {
        ValidationKind::QuantityExceeded
    }
}

fn join_overflows(overflows: &[CourseOverflow]) -> String {
    overflows
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Report
// ============================================================================

/// Outcome of [`validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub field_errors: BTreeMap<DraftField, FieldError>,
    pub items_error: Option<ItemsError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.items_error.is_none()
    }

    pub fn field_error(&self, field: DraftField) -> Option<FieldError> {
        self.field_errors.get(&field).copied()
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len() + usize::from(self.items_error.is_some())
    }

    /// `field: message` lines followed by the items line, for plain rendering
    pub fn messages(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .field_errors
            .iter()
            .map(|(field, err)| format!("{field}: {err}"))
            .collect();
        if let Some(items) = &self.items_error {
            lines.push(format!("items: {items}"));
        }
        lines
    }
}

/// Tagged result of [`check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    Valid(ReservationCreate),
    Invalid(ValidationReport),
}

// ============================================================================
// Operations
// ============================================================================

/// Validate a draft, collecting every violation
pub fn validate(draft: &ReservationDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.client_name.trim().is_empty() {
        report.field_errors.insert(DraftField::ClientName, FieldError::NameRequired);
    }
    if draft.service_date.is_none() {
        report.field_errors.insert(DraftField::ServiceDate, FieldError::DateRequired);
    }
    if draft.pax < 1 {
        report.field_errors.insert(DraftField::Pax, FieldError::PaxBelowMinimum);
    }
    let time = draft.arrival_time.trim();
    if !time.is_empty() && !is_time_of_day(time) {
        report.field_errors.insert(DraftField::ArrivalTime, FieldError::TimeFormat);
    }

    let pax = i64::from(draft.pax);
    let overflows: Vec<CourseOverflow> = draft
        .course_totals()
        .into_iter()
        .filter(|(_, total)| *total > pax)
        .map(|(course, total)| CourseOverflow { course, total })
        .collect();
    if !overflows.is_empty() {
        report.items_error = Some(ItemsError {
            pax: draft.pax,
            overflows,
        });
    }

    if !report.is_valid() {
        tracing::debug!(errors = report.error_count(), "Reservation draft rejected");
    }
    report
}

/// Validate then normalize in one pass
pub fn check(draft: &ReservationDraft, today: NaiveDate) -> DraftOutcome {
    let report = validate(draft);
    if report.is_valid() {
        DraftOutcome::Valid(normalize(draft, today))
    } else {
        DraftOutcome::Invalid(report)
    }
}
