use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a clinic staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Dentist,
    Receptionist,
    Accountant,
    ClinicAdmin,
    SuperAdmin,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Dentist => "dentist",
            StaffRole::Receptionist => "receptionist",
            StaffRole::Accountant => "accountant",
            StaffRole::ClinicAdmin => "clinic_admin",
            StaffRole::SuperAdmin => "super_admin",
        }
    }

    /// Roles that handle billing paperwork at the front desk.
    pub const FRONT_DESK: [StaffRole; 2] = [StaffRole::Receptionist, StaffRole::Accountant];

    /// Roles with clinic administration privileges.
    pub const ADMINS: [StaffRole; 2] = [StaffRole::ClinicAdmin, StaffRole::SuperAdmin];
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dentist" => Ok(StaffRole::Dentist),
            "receptionist" => Ok(StaffRole::Receptionist),
            "accountant" => Ok(StaffRole::Accountant),
            "clinic_admin" => Ok(StaffRole::ClinicAdmin),
            "super_admin" => Ok(StaffRole::SuperAdmin),
            other => Err(CoreError::invalid_staff_role(other)),
        }
    }
}

/// A clinic user as returned by the staff directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: String,
    pub clinic_id: String,
    pub role: StaffRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl StaffUser {
    pub fn new(
        id: impl Into<String>,
        clinic_id: impl Into<String>,
        role: StaffRole,
    ) -> Self {
        Self {
            id: id.into(),
            clinic_id: clinic_id.into(),
            role,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
