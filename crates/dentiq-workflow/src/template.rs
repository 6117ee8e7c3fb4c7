use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized built-in workflow preset.
///
/// Clinics either run one of these presets or a legacy/custom template; the
/// latter never reaches the preset trigger tables and is served by the hardcoded
/// fallback switch instead. The two paths are kept separate on purpose: their
/// trigger sets differ and collapsing them would change behavior for clinics
/// that never adopted the preset system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowTemplate {
    DefaultClinic,
    FullClinic,
}

impl WorkflowTemplate {
    pub const DEFAULT_CLINIC: &'static str = "default_clinic_workflow";
    pub const FULL_CLINIC: &'static str = "full_clinic_workflow";

    /// Resolves a raw template string to a recognized preset.
    ///
    /// `None` (template absent, or any string outside the two presets) selects
    /// the legacy fallback path.
    pub fn recognize(raw: Option<&str>) -> Option<WorkflowTemplate> {
        match raw {
            Some(Self::DEFAULT_CLINIC) => Some(WorkflowTemplate::DefaultClinic),
            Some(Self::FULL_CLINIC) => Some(WorkflowTemplate::FullClinic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowTemplate::DefaultClinic => Self::DEFAULT_CLINIC,
            WorkflowTemplate::FullClinic => Self::FULL_CLINIC,
        }
    }
}

impl fmt::Display for WorkflowTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
