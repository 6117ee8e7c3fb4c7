use serde::{Deserialize, Serialize};
use std::fmt;

/// A named side-effecting action tied to a transition.
///
/// The vocabulary is a closed enum dispatched through an exhaustive match, so
/// an unknown trigger name is a deserialization error at the configuration
/// edge rather than a silently ignored string at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Notify the appointment's assigned dentist (legacy-path name).
    NotifyAssignedDentist,
    /// Preset-path alias of [`Trigger::NotifyAssignedDentist`]; identical
    /// behavior, kept because the preset vocabulary names it differently.
    NotifyDentist,
    /// Notify every receptionist and accountant of the clinic.
    NotifyFrontDesk,
    /// Notify every clinic admin and super admin of the clinic.
    NotifyAdmin,
    /// Synthesize an invoice for the appointment if none is active yet.
    CreateInvoice,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::NotifyAssignedDentist => "notify_assigned_dentist",
            Trigger::NotifyDentist => "notify_dentist",
            Trigger::NotifyFrontDesk => "notify_front_desk",
            Trigger::NotifyAdmin => "notify_admin",
            Trigger::CreateInvoice => "create_invoice",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
