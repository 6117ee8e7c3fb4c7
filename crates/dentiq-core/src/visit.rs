use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Pipeline state of a patient visit.
///
/// The set is closed and ordered-but-not-strictly-linear: which predecessor/
/// successor pairs are legal is decided by the clinic's workflow template, not
/// by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitState {
    CheckedIn,
    ReadyForExam,
    ExamInProgress,
    TreatmentPlanned,
    ReadyForBilling,
    Billed,
    PaymentCompleted,
    VisitCompleted,
}

impl VisitState {
    /// All states in pipeline order.
    pub const ALL: [VisitState; 8] = [
        VisitState::CheckedIn,
        VisitState::ReadyForExam,
        VisitState::ExamInProgress,
        VisitState::TreatmentPlanned,
        VisitState::ReadyForBilling,
        VisitState::Billed,
        VisitState::PaymentCompleted,
        VisitState::VisitCompleted,
    ];

    /// The literal state identifier used on the wire, in transition keys and
    /// in notification messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitState::CheckedIn => "CHECKED_IN",
            VisitState::ReadyForExam => "READY_FOR_EXAM",
            VisitState::ExamInProgress => "EXAM_IN_PROGRESS",
            VisitState::TreatmentPlanned => "TREATMENT_PLANNED",
            VisitState::ReadyForBilling => "READY_FOR_BILLING",
            VisitState::Billed => "BILLED",
            VisitState::PaymentCompleted => "PAYMENT_COMPLETED",
            VisitState::VisitCompleted => "VISIT_COMPLETED",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CHECKED_IN" => Ok(VisitState::CheckedIn),
            "READY_FOR_EXAM" => Ok(VisitState::ReadyForExam),
            "EXAM_IN_PROGRESS" => Ok(VisitState::ExamInProgress),
            "TREATMENT_PLANNED" => Ok(VisitState::TreatmentPlanned),
            "READY_FOR_BILLING" => Ok(VisitState::ReadyForBilling),
            "BILLED" => Ok(VisitState::Billed),
            "PAYMENT_COMPLETED" => Ok(VisitState::PaymentCompleted),
            "VISIT_COMPLETED" => Ok(VisitState::VisitCompleted),
            other => Err(CoreError::invalid_visit_state(other)),
        }
    }
}

/// One clinical encounter for a patient, tracked through the pipeline states.
///
/// Visits are created when an appointment begins being serviced, mutated on
/// every transition and never deleted (retained for audit/history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub clinic_id: String,
    pub appointment_id: String,
    pub status: VisitState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Auxiliary booleans (e.g. consent confirmed). Keys are free-form.
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub flags: HashMap<String, bool>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Visit {
    pub fn new(
        id: impl Into<String>,
        clinic_id: impl Into<String>,
        appointment_id: impl Into<String>,
    ) -> Self {
        let now = crate::time::now_utc();
        Self {
            id: id.into(),
            clinic_id: clinic_id.into(),
            appointment_id: appointment_id.into(),
            status: VisitState::CheckedIn,
            room: None,
            flags: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: VisitState) -> Self {
        self.status = status;
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Moves the visit to `status` and bumps `updated_at`.
    pub fn transition_to(&mut self, status: VisitState) {
        self.status = status;
        self.updated_at = crate::time::now_utc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_state_wire_form() {
        let json = serde_json::to_string(&VisitState::ReadyForExam).unwrap();
        assert_eq!(json, "\"READY_FOR_EXAM\"");

        let state: VisitState = serde_json::from_str("\"PAYMENT_COMPLETED\"").unwrap();
        assert_eq!(state, VisitState::PaymentCompleted);
    }

    #[test]
    fn test_visit_state_display_matches_serde() {
        for state in VisitState::ALL {
            let display = state.to_string();
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{display}\""));
        }
    }

    #[test]
    fn test_visit_state_from_str_roundtrip() {
        for state in VisitState::ALL {
            let parsed: VisitState = state.as_str().parse().unwrap();
            assert_eq!(parsed, state);
        }
    }

    #[test]
    fn test_visit_state_from_str_invalid() {
        let err = "NOT_A_STATE".parse::<VisitState>().unwrap_err();
        assert!(err.to_string().contains("NOT_A_STATE"));
        assert!("checked_in".parse::<VisitState>().is_err());
        assert!("".parse::<VisitState>().is_err());
    }

    #[test]
    fn test_visit_new_defaults() {
        let visit = Visit::new("v1", "clinic-1", "appt-1");
        assert_eq!(visit.status, VisitState::CheckedIn);
        assert!(visit.room.is_none());
        assert!(visit.flags.is_empty());
        assert_eq!(visit.created_at, visit.updated_at);
    }

    #[test]
    fn test_visit_builders() {
        let visit = Visit::new("v1", "clinic-1", "appt-1")
            .with_status(VisitState::ExamInProgress)
            .with_room("3");
        assert_eq!(visit.status, VisitState::ExamInProgress);
        assert_eq!(visit.room.as_deref(), Some("3"));
    }

    #[test]
    fn test_visit_flags() {
        let mut visit = Visit::new("v1", "clinic-1", "appt-1");
        assert!(!visit.flag("consent_confirmed"));
        visit.set_flag("consent_confirmed", true);
        assert!(visit.flag("consent_confirmed"));
    }

    #[test]
    fn test_visit_transition_bumps_updated_at() {
        let mut visit = Visit::new("v1", "clinic-1", "appt-1");
        let before = visit.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(1));
        visit.transition_to(VisitState::ReadyForExam);
        assert_eq!(visit.status, VisitState::ReadyForExam);
        assert!(visit.updated_at > before);
    }

    #[test]
    fn test_visit_serialization_omits_empty_optionals() {
        let visit = Visit::new("v1", "clinic-1", "appt-1");
        let json = serde_json::to_value(&visit).unwrap();
        assert_eq!(json["status"], "CHECKED_IN");
        assert!(json.get("room").is_none());
        assert!(json.get("flags").is_none());
    }

    #[test]
    fn test_visit_deserialization() {
        let json = serde_json::json!({
            "id": "v9",
            "clinic_id": "clinic-2",
            "appointment_id": "appt-7",
            "status": "BILLED",
            "room": "1A",
            "flags": {"consent_confirmed": true},
            "created_at": "2026-05-01T09:00:00Z",
            "updated_at": "2026-05-01T10:30:00Z",
        });
        let visit: Visit = serde_json::from_value(json).unwrap();
        assert_eq!(visit.status, VisitState::Billed);
        assert!(visit.flag("consent_confirmed"));
        assert_eq!(visit.room.as_deref(), Some("1A"));
    }
}
