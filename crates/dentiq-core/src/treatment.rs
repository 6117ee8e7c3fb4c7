use serde::{Deserialize, Serialize};

/// A clinic-scoped treatment catalog entry.
///
/// Prices are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: String,
    pub clinic_id: String,
    pub name: String,
    pub price: i64,
}

impl Treatment {
    pub fn new(
        id: impl Into<String>,
        clinic_id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            id: id.into(),
            clinic_id: clinic_id.into(),
            name: name.into(),
            price,
        }
    }

    /// Case-insensitive catalog match against an appointment's treatment-type
    /// string: the treatment name must contain the queried string.
    pub fn matches(&self, treatment_type: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&treatment_type.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive_contains() {
        let t = Treatment::new("t1", "clinic-1", "Basic Cleaning", 7500);
        assert!(t.matches("cleaning"));
        assert!(t.matches("Cleaning"));
        assert!(t.matches("BASIC"));
        assert!(!t.matches("whitening"));
    }

    #[test]
    fn test_matches_empty_query_matches_everything() {
        let t = Treatment::new("t1", "clinic-1", "Root Canal", 40000);
        assert!(t.matches(""));
    }
}
