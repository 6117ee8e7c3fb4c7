use dentiq_core::VisitState;
use std::fmt;

/// An observed `(from, to)` state pair.
///
/// Renders as `"<FROM> -> <TO>"`, the exact key form used by the legacy
/// switch and carried in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    pub from: VisitState,
    pub to: VisitState,
}

impl TransitionKey {
    pub fn new(from: VisitState, to: VisitState) -> Self {
        Self { from, to }
    }

    /// The billing transition, on which invoice synthesis always runs
    /// regardless of the template path.
    pub fn is_billing(&self) -> bool {
        self.from == VisitState::ReadyForBilling && self.to == VisitState::Billed
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_string_form() {
        let key = TransitionKey::new(VisitState::CheckedIn, VisitState::ReadyForExam);
        assert_eq!(key.to_string(), "CHECKED_IN -> READY_FOR_EXAM");
    }

    #[test]
    fn test_is_billing() {
        assert!(TransitionKey::new(VisitState::ReadyForBilling, VisitState::Billed).is_billing());
        assert!(!TransitionKey::new(VisitState::Billed, VisitState::ReadyForBilling).is_billing());
        assert!(
            !TransitionKey::new(VisitState::Billed, VisitState::PaymentCompleted).is_billing()
        );
    }
}
