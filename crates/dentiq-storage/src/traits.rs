//! Repository traits all storage backends must implement.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{NewInvoice, NewInvoiceItem, NewNotification};
use dentiq_core::{Invoice, InvoiceItem, Notification, StaffRole, StaffUser, Treatment, Visit,
    VisitState};

/// Store for patient visits.
///
/// Implementations must be thread-safe (`Send + Sync`). Visits are clinic
/// scoped: every read takes the clinic id, and a visit belonging to another
/// clinic is indistinguishable from a missing one.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Creates a new visit row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a visit with the same id exists.
    async fn create(&self, visit: Visit) -> Result<Visit, StorageError>;

    /// Reads a visit by clinic and id. `None` if it does not exist.
    async fn get(&self, clinic_id: &str, id: &str) -> Result<Option<Visit>, StorageError>;

    /// Moves a visit to `status` and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the visit does not exist.
    async fn update_status(
        &self,
        clinic_id: &str,
        id: &str,
        status: VisitState,
    ) -> Result<Visit, StorageError>;

    /// Lists all visits of a clinic.
    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Visit>, StorageError>;
}

/// Role-filtered staff lookup.
///
/// Role resolution happens per trigger call against the backing store; there
/// is deliberately no caching layer in front of this trait.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Returns every user of the clinic whose role is in `roles`.
    async fn users_in_roles(
        &self,
        clinic_id: &str,
        roles: &[StaffRole],
    ) -> Result<Vec<StaffUser>, StorageError>;
}

/// Read access to the clinic treatment catalog.
#[async_trait]
pub trait TreatmentStore: Send + Sync {
    /// Lists the catalog of a clinic. Price matching happens in the caller.
    async fn list(&self, clinic_id: &str) -> Result<Vec<Treatment>, StorageError>;
}

/// Store for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Inserts one notification row and returns it with id and timestamp.
    async fn insert(&self, row: NewNotification) -> Result<Notification, StorageError>;

    /// Lists notifications addressed to one user, newest first.
    async fn list_for_user(
        &self,
        clinic_id: &str,
        user_id: &str,
    ) -> Result<Vec<Notification>, StorageError>;

    /// Marks a notification read and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the notification does not exist.
    async fn mark_read(&self, clinic_id: &str, id: &str) -> Result<Notification, StorageError>;
}

/// Store for invoices and their line items.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Finds a non-cancelled invoice tied to the appointment, if any.
    ///
    /// This existence check backs the only idempotence guarantee of invoice
    /// synthesis: at most one active invoice per appointment.
    async fn find_active_by_appointment(
        &self,
        clinic_id: &str,
        appointment_id: &str,
    ) -> Result<Option<Invoice>, StorageError>;

    /// Inserts one invoice row together with its line items.
    async fn insert(
        &self,
        invoice: NewInvoice,
        items: Vec<NewInvoiceItem>,
    ) -> Result<Invoice, StorageError>;

    /// Reads an invoice by clinic and id. `None` if it does not exist.
    async fn get(&self, clinic_id: &str, id: &str) -> Result<Option<Invoice>, StorageError>;

    /// Lists the line items of an invoice.
    async fn items(&self, invoice_id: &str) -> Result<Vec<InvoiceItem>, StorageError>;

    /// Lists all invoices of a clinic.
    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Invoice>, StorageError>;
}
