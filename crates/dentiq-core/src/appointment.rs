use serde::{Deserialize, Serialize};

/// Snapshot of the appointment being serviced, carried in the trigger context.
///
/// This is not the scheduling record itself; only the fields the workflow
/// triggers read are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSnapshot {
    pub id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub treatment_type: String,
}

impl AppointmentSnapshot {
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        treatment_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            dentist_id: None,
            room: None,
            treatment_type: treatment_type.into(),
        }
    }

    pub fn with_dentist(mut self, dentist_id: impl Into<String>) -> Self {
        self.dentist_id = Some(dentist_id.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }
}

/// Optional patient snapshot for message composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
}

impl PatientSnapshot {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            insurance: None,
        }
    }

    /// Name to use in notification messages. Falls back to `"Patient"` when
    /// the snapshot is absent or anonymous.
    pub fn display_name(snapshot: Option<&PatientSnapshot>) -> &str {
        snapshot
            .and_then(|p| p.name.as_deref())
            .unwrap_or("Patient")
    }
}
