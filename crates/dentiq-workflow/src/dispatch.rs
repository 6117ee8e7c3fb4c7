use std::sync::Arc;

use rand::Rng;

use dentiq_core::{InvoiceStatus, NotificationKind, StaffRole, VisitState, today_utc};
use dentiq_storage::{
    InvoiceStore, NewInvoice, NewInvoiceItem, NewNotification, NotificationStore, StaffDirectory,
    StorageError, TreatmentStore,
};

use crate::context::TriggerContext;
use crate::spec::{legacy_triggers, preset_triggers};
use crate::template::WorkflowTemplate;
use crate::transition::TransitionKey;
use crate::trigger::Trigger;

/// Executes workflow triggers for observed visit transitions.
///
/// Holds the store handles the triggers need; constructed once at startup and
/// shared. Triggers run sequentially within one dispatch, each behind a
/// log-and-continue boundary, so a failing store never affects the transition
/// that caused the dispatch.
pub struct TriggerDispatcher {
    notifications: Arc<dyn NotificationStore>,
    staff: Arc<dyn StaffDirectory>,
    treatments: Arc<dyn TreatmentStore>,
    invoices: Arc<dyn InvoiceStore>,
}

impl TriggerDispatcher {
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        staff: Arc<dyn StaffDirectory>,
        treatments: Arc<dyn TreatmentStore>,
        invoices: Arc<dyn InvoiceStore>,
    ) -> Self {
        Self {
            notifications,
            staff,
            treatments,
            invoices,
        }
    }

    /// Entry point: dispatch triggers for the transition `from -> to`.
    ///
    /// Recognized presets resolve their trigger list from the preset tables;
    /// everything else falls back to the legacy switch. Invoice synthesis on
    /// the billing transition runs unconditionally on the preset path, even
    /// when the preset row omits it. There is no transition-validity check
    /// here; the caller owns what transitions are reachable.
    pub async fn run_visit_triggers(
        &self,
        from: VisitState,
        to: VisitState,
        ctx: &TriggerContext,
    ) {
        let key = TransitionKey::new(from, to);

        match WorkflowTemplate::recognize(ctx.workflow_template.as_deref()) {
            Some(template) => {
                tracing::debug!(transition = %key, template = %template, "dispatching preset triggers");
                for trigger in preset_triggers(template, from, to) {
                    self.run_trigger(*trigger, &key, ctx).await;
                }
                // The invoice must exist after every billing transition, even
                // if a preset forgets to list the trigger. The existence check
                // inside makes a repeat run a no-op.
                if key.is_billing() {
                    self.run_trigger(Trigger::CreateInvoice, &key, ctx).await;
                }
            }
            None => {
                tracing::debug!(transition = %key, "dispatching legacy triggers");
                for trigger in legacy_triggers(from, to) {
                    self.run_trigger(*trigger, &key, ctx).await;
                }
            }
        }
    }

    /// Runs one trigger behind the containment boundary: failures are logged
    /// with the transition key and swallowed.
    async fn run_trigger(&self, trigger: Trigger, key: &TransitionKey, ctx: &TriggerContext) {
        let result = match trigger {
            Trigger::NotifyAssignedDentist | Trigger::NotifyDentist => {
                self.notify_assigned_dentist(ctx).await
            }
            Trigger::NotifyFrontDesk => self.notify_front_desk(ctx).await,
            Trigger::NotifyAdmin => self.notify_admin(key.to, ctx).await,
            Trigger::CreateInvoice => self.create_invoice(ctx).await,
        };

        if let Err(e) = result {
            tracing::warn!(
                transition = %key,
                trigger = %trigger,
                error = %e,
                "visit trigger failed"
            );
        }
    }

    /// No-op without an assigned dentist; otherwise one notification to the
    /// dentist, linked to the calendar view filtered by the appointment.
    async fn notify_assigned_dentist(&self, ctx: &TriggerContext) -> Result<(), StorageError> {
        let Some(dentist_id) = ctx.appointment.dentist_id.as_deref() else {
            return Ok(());
        };

        let room = ctx.appointment.room.as_deref().unwrap_or("—");
        let message = format!("{} is ready for exam in room {room}.", ctx.patient_name());

        self.notifications
            .insert(NewNotification {
                clinic_id: ctx.clinic_id.clone(),
                user_id: dentist_id.to_string(),
                kind: NotificationKind::PatientReadyForExam,
                title: "Patient ready for exam".to_string(),
                message,
                link: ctx.calendar_link(),
                entity_type: "visit".to_string(),
                entity_id: ctx.visit.id.clone(),
            })
            .await?;
        Ok(())
    }

    /// One notification per receptionist/accountant of the clinic.
    async fn notify_front_desk(&self, ctx: &TriggerContext) -> Result<(), StorageError> {
        let users = self
            .staff
            .users_in_roles(&ctx.clinic_id, &StaffRole::FRONT_DESK)
            .await?;

        let message = format!(
            "{} — treatment planned, ready for billing.",
            ctx.patient_name()
        );

        for user in users {
            self.notifications
                .insert(NewNotification {
                    clinic_id: ctx.clinic_id.clone(),
                    user_id: user.id,
                    kind: NotificationKind::PatientReadyForBilling,
                    title: "Ready for billing".to_string(),
                    message: message.clone(),
                    link: ctx.calendar_link(),
                    entity_type: "visit".to_string(),
                    entity_id: ctx.visit.id.clone(),
                })
                .await?;
        }
        Ok(())
    }

    /// One notification per clinic-admin/super-admin, carrying the literal
    /// destination-state identifier.
    async fn notify_admin(
        &self,
        to: VisitState,
        ctx: &TriggerContext,
    ) -> Result<(), StorageError> {
        let users = self
            .staff
            .users_in_roles(&ctx.clinic_id, &StaffRole::ADMINS)
            .await?;

        let message = format!("Visit {to}: {}.", ctx.patient_name());

        for user in users {
            self.notifications
                .insert(NewNotification {
                    clinic_id: ctx.clinic_id.clone(),
                    user_id: user.id,
                    kind: NotificationKind::VisitStatusUpdate,
                    title: "Visit update".to_string(),
                    message: message.clone(),
                    link: ctx.calendar_link(),
                    entity_type: "visit".to_string(),
                    entity_id: ctx.visit.id.clone(),
                })
                .await?;
        }
        Ok(())
    }

    /// Synthesizes the appointment's invoice if none is active yet.
    ///
    /// Unit price comes from the first catalog entry whose name contains the
    /// appointment's treatment type (case-insensitive), 0 when nothing
    /// matches. The invoice number is `INV-` plus a random 6-digit suffix;
    /// uniqueness is not checked at this layer.
    async fn create_invoice(&self, ctx: &TriggerContext) -> Result<(), StorageError> {
        if self
            .invoices
            .find_active_by_appointment(&ctx.clinic_id, &ctx.appointment.id)
            .await?
            .is_some()
        {
            tracing::debug!(
                appointment = %ctx.appointment.id,
                "invoice already exists, skipping"
            );
            return Ok(());
        }

        let treatments = self.treatments.list(&ctx.clinic_id).await?;
        let unit_price = treatments
            .iter()
            .find(|t| t.matches(&ctx.appointment.treatment_type))
            .map(|t| t.price)
            .unwrap_or(0);

        let number = format!("INV-{}", rand::thread_rng().gen_range(100_000..=999_999));

        let invoice = self
            .invoices
            .insert(
                NewInvoice {
                    clinic_id: ctx.clinic_id.clone(),
                    appointment_id: ctx.appointment.id.clone(),
                    number,
                    status: InvoiceStatus::Pending,
                    total_amount: unit_price,
                    due_date: today_utc(),
                },
                vec![NewInvoiceItem {
                    description: ctx.appointment.treatment_type.clone(),
                    quantity: 1,
                    unit_price,
                }],
            )
            .await?;

        tracing::info!(
            invoice = %invoice.id,
            number = %invoice.number,
            amount = invoice.total_amount,
            "invoice created"
        );
        Ok(())
    }
}
