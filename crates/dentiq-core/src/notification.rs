use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Type tag of an in-app notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PatientReadyForExam,
    PatientReadyForBilling,
    VisitStatusUpdate,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PatientReadyForExam => "patient_ready_for_exam",
            NotificationKind::PatientReadyForBilling => "patient_ready_for_billing",
            NotificationKind::VisitStatusUpdate => "visit_status_update",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-app alert to one clinic user.
///
/// Created by workflow triggers and never mutated by them; marking read is a
/// plain store update driven by the HTTP surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub clinic_id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(default)]
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_form() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::PatientReadyForExam).unwrap(),
            "\"patient_ready_for_exam\""
        );
        let kind: NotificationKind = serde_json::from_str("\"visit_status_update\"").unwrap();
        assert_eq!(kind, NotificationKind::VisitStatusUpdate);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            NotificationKind::PatientReadyForBilling.to_string(),
            "patient_ready_for_billing"
        );
    }

    #[test]
    fn test_notification_read_defaults_false() {
        let json = serde_json::json!({
            "id": "n1",
            "clinic_id": "clinic-1",
            "user_id": "u1",
            "kind": "visit_status_update",
            "title": "Visit update",
            "message": "Visit BILLED: Patient.",
            "link": "/calendar?appointment=appt-1",
            "entity_type": "visit",
            "entity_id": "v1",
            "created_at": "2026-05-01T09:00:00Z",
        });
        let n: Notification = serde_json::from_value(json).unwrap();
        assert!(!n.read);
    }
}
