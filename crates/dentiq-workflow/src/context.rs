use dentiq_core::{AppointmentSnapshot, PatientSnapshot, Visit};

/// Request-scoped bundle handed to trigger dispatch.
///
/// Constructed by the caller per transition and discarded afterwards; it has
/// no lifecycle of its own.
#[derive(Debug, Clone)]
pub struct TriggerContext {
    pub clinic_id: String,
    pub appointment: AppointmentSnapshot,
    pub visit: Visit,
    pub patient: Option<PatientSnapshot>,
    /// Raw template string as stored on the clinic. Recognition happens at
    /// dispatch time.
    pub workflow_template: Option<String>,
}

impl TriggerContext {
    pub fn new(
        clinic_id: impl Into<String>,
        appointment: AppointmentSnapshot,
        visit: Visit,
    ) -> Self {
        Self {
            clinic_id: clinic_id.into(),
            appointment,
            visit,
            patient: None,
            workflow_template: None,
        }
    }

    pub fn with_patient(mut self, patient: PatientSnapshot) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn with_workflow_template(mut self, template: impl Into<String>) -> Self {
        self.workflow_template = Some(template.into());
        self
    }

    /// Name used in notification messages, with the `"Patient"` fallback.
    pub fn patient_name(&self) -> &str {
        PatientSnapshot::display_name(self.patient.as_ref())
    }

    /// Calendar view filtered by this appointment; link target of dentist
    /// notifications.
    pub fn calendar_link(&self) -> String {
        format!("/calendar?appointment={}", self.appointment.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> TriggerContext {
        TriggerContext::new(
            "clinic-1",
            AppointmentSnapshot::new("appt-1", "pat-1", "Cleaning"),
            Visit::new("v1", "clinic-1", "appt-1"),
        )
    }

    #[test]
    fn test_patient_name_fallback() {
        assert_eq!(context().patient_name(), "Patient");
        let ctx = context().with_patient(PatientSnapshot::named("Jane Roe"));
        assert_eq!(ctx.patient_name(), "Jane Roe");
    }

    #[test]
    fn test_calendar_link() {
        assert_eq!(context().calendar_link(), "/calendar?appointment=appt-1");
    }

    #[test]
    fn test_template_defaults_to_none() {
        assert!(context().workflow_template.is_none());
        let ctx = context().with_workflow_template("full_clinic_workflow");
        assert_eq!(ctx.workflow_template.as_deref(), Some("full_clinic_workflow"));
    }
}
