//! Transition trigger tables.
//!
//! Pure configuration data: ordered `(from, to) -> [trigger, ...]` rows per
//! preset, plus the hardcoded legacy switch for clinics without a recognized
//! template. A missing row means "no triggers", never an error.

use crate::template::WorkflowTemplate;
use crate::trigger::Trigger;
use dentiq_core::VisitState;

use Trigger::*;
use VisitState::*;

type Row = (VisitState, VisitState, &'static [Trigger]);

const DEFAULT_CLINIC_ROWS: &[Row] = &[
    (CheckedIn, ReadyForExam, &[NotifyDentist]),
    (TreatmentPlanned, ReadyForBilling, &[NotifyFrontDesk]),
    (ReadyForBilling, Billed, &[CreateInvoice]),
    (Billed, PaymentCompleted, &[NotifyAdmin]),
];

const FULL_CLINIC_ROWS: &[Row] = &[
    (CheckedIn, ReadyForExam, &[NotifyDentist]),
    (ReadyForExam, ExamInProgress, &[]),
    (ExamInProgress, TreatmentPlanned, &[]),
    (TreatmentPlanned, ReadyForBilling, &[NotifyFrontDesk]),
    // Invoice creation on this transition is guaranteed by the dispatcher's
    // unconditional billing hook, so the row only carries the notification.
    (ReadyForBilling, Billed, &[NotifyFrontDesk]),
    (Billed, PaymentCompleted, &[NotifyAdmin]),
    (PaymentCompleted, VisitCompleted, &[NotifyAdmin]),
];

/// Ordered trigger list for a transition under a recognized preset.
///
/// Empty when the preset defines no row for the pair. Repeats in a row are
/// preserved; callers must tolerate them.
pub fn preset_triggers(
    template: WorkflowTemplate,
    from: VisitState,
    to: VisitState,
) -> &'static [Trigger] {
    let rows = match template {
        WorkflowTemplate::DefaultClinic => DEFAULT_CLINIC_ROWS,
        WorkflowTemplate::FullClinic => FULL_CLINIC_ROWS,
    };
    rows.iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, triggers)| *triggers)
        .unwrap_or(&[])
}

/// The legacy fallback switch: exactly five transition keys, applied when the
/// clinic has no recognized preset. Any other pair is a no-op.
pub fn legacy_triggers(from: VisitState, to: VisitState) -> &'static [Trigger] {
    match (from, to) {
        (CheckedIn, ReadyForExam) => &[NotifyAssignedDentist],
        (TreatmentPlanned, ReadyForBilling) => &[NotifyFrontDesk],
        (ReadyForBilling, Billed) => &[CreateInvoice],
        (Billed, PaymentCompleted) => &[NotifyAdmin],
        (PaymentCompleted, VisitCompleted) => &[NotifyAdmin],
        _ => &[],
    }
}
