use std::sync::Arc;

use dentiq_db_memory::InMemoryStorage;
use dentiq_storage::{InvoiceStore, NotificationStore, StaffDirectory, TreatmentStore, VisitStore};
use dentiq_workflow::TriggerDispatcher;

use crate::config::BootstrapConfig;
use dentiq_core::{StaffUser, Treatment};

/// Shared handles for the route handlers.
///
/// Stores are trait objects so a database-backed set can replace the
/// in-memory one without touching the handlers.
#[derive(Clone)]
pub struct AppState {
    pub visits: Arc<dyn VisitStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub dispatcher: Arc<TriggerDispatcher>,
}

impl AppState {
    /// Builds application state over one in-memory backend, applying the
    /// bootstrap seed data.
    pub fn in_memory(bootstrap: &BootstrapConfig) -> Self {
        let storage = Arc::new(InMemoryStorage::new());

        for seed in &bootstrap.staff {
            let mut user = StaffUser::new(&seed.id, &seed.clinic_id, seed.role);
            if let Some(name) = &seed.display_name {
                user = user.with_display_name(name);
            }
            storage.add_staff_user(user);
        }
        for seed in &bootstrap.treatments {
            storage.add_treatment(Treatment::new(
                &seed.id,
                &seed.clinic_id,
                &seed.name,
                seed.price,
            ));
        }

        if !bootstrap.staff.is_empty() || !bootstrap.treatments.is_empty() {
            tracing::info!(
                staff = bootstrap.staff.len(),
                treatments = bootstrap.treatments.len(),
                "bootstrap data applied"
            );
        }

        let staff: Arc<dyn StaffDirectory> = storage.clone();
        let treatments: Arc<dyn TreatmentStore> = storage.clone();
        let dispatcher = Arc::new(TriggerDispatcher::new(
            storage.clone(),
            staff,
            treatments,
            storage.clone(),
        ));

        Self {
            visits: storage.clone(),
            notifications: storage.clone(),
            invoices: storage,
            dispatcher,
        }
    }
}
