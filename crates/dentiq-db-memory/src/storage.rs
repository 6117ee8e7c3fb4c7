use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use std::sync::Arc;

use dentiq_core::{
    Invoice, InvoiceItem, Notification, StaffRole, StaffUser, Treatment, Visit, VisitState,
    generate_id, now_utc,
};
use dentiq_storage::{
    InvoiceStore, NewInvoice, NewInvoiceItem, NewNotification, NotificationStore, StaffDirectory,
    StorageError, TreatmentStore, VisitStore,
};

pub type StorageKey = String; // Format: "clinic_id/id"

pub(crate) fn make_storage_key(clinic_id: &str, id: &str) -> StorageKey {
    format!("{clinic_id}/{id}")
}

/// In-memory backend for every Dentiq store trait.
///
/// All maps are papaya lock-free hash maps; rows are cloned on read. Clinic
/// scoping is part of the key, so cross-clinic reads miss by construction.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    visits: Arc<PapayaHashMap<StorageKey, Visit>>,
    staff: Arc<PapayaHashMap<StorageKey, StaffUser>>,
    treatments: Arc<PapayaHashMap<StorageKey, Treatment>>,
    notifications: Arc<PapayaHashMap<StorageKey, Notification>>,
    invoices: Arc<PapayaHashMap<StorageKey, Invoice>>,
    /// Keyed by invoice id; items are written once at invoice insert.
    invoice_items: Arc<PapayaHashMap<String, Vec<InvoiceItem>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a staff user. Intended for bootstrap and tests.
    pub fn add_staff_user(&self, user: StaffUser) {
        let key = make_storage_key(&user.clinic_id, &user.id);
        let guard = self.staff.pin();
        guard.insert(key, user);
    }

    /// Seeds a treatment catalog entry. Intended for bootstrap and tests.
    pub fn add_treatment(&self, treatment: Treatment) {
        let key = make_storage_key(&treatment.clinic_id, &treatment.id);
        let guard = self.treatments.pin();
        guard.insert(key, treatment);
    }

    /// Number of stored notifications across all clinics. Test helper.
    pub fn notification_count(&self) -> usize {
        self.notifications.pin().len()
    }

    /// Number of stored invoices across all clinics. Test helper.
    pub fn invoice_count(&self) -> usize {
        self.invoices.pin().len()
    }
}

#[async_trait]
impl VisitStore for InMemoryStorage {
    async fn create(&self, visit: Visit) -> Result<Visit, StorageError> {
        let key = make_storage_key(&visit.clinic_id, &visit.id);
        let guard = self.visits.pin();

        if guard.get(&key).is_some() {
            return Err(StorageError::already_exists("Visit", &visit.id));
        }

        guard.insert(key, visit.clone());
        Ok(visit)
    }

    async fn get(&self, clinic_id: &str, id: &str) -> Result<Option<Visit>, StorageError> {
        let key = make_storage_key(clinic_id, id);
        let guard = self.visits.pin();
        Ok(guard.get(&key).cloned())
    }

    async fn update_status(
        &self,
        clinic_id: &str,
        id: &str,
        status: VisitState,
    ) -> Result<Visit, StorageError> {
        let key = make_storage_key(clinic_id, id);
        let guard = self.visits.pin();

        let mut visit = guard
            .get(&key)
            .ok_or_else(|| StorageError::not_found("Visit", id))?
            .clone();

        visit.transition_to(status);
        guard.insert(key, visit.clone());
        Ok(visit)
    }

    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Visit>, StorageError> {
        let prefix = format!("{clinic_id}/");
        let guard = self.visits.pin();
        let mut visits: Vec<Visit> = guard
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v.clone())
            .collect();
        visits.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(visits)
    }
}

#[async_trait]
impl StaffDirectory for InMemoryStorage {
    async fn users_in_roles(
        &self,
        clinic_id: &str,
        roles: &[StaffRole],
    ) -> Result<Vec<StaffUser>, StorageError> {
        let prefix = format!("{clinic_id}/");
        let guard = self.staff.pin();
        let mut users: Vec<StaffUser> = guard
            .iter()
            .filter(|(k, u)| k.starts_with(&prefix) && roles.contains(&u.role))
            .map(|(_, u)| u.clone())
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }
}

#[async_trait]
impl TreatmentStore for InMemoryStorage {
    async fn list(&self, clinic_id: &str) -> Result<Vec<Treatment>, StorageError> {
        let prefix = format!("{clinic_id}/");
        let guard = self.treatments.pin();
        let mut treatments: Vec<Treatment> = guard
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, t)| t.clone())
            .collect();
        treatments.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(treatments)
    }
}

#[async_trait]
impl NotificationStore for InMemoryStorage {
    async fn insert(&self, row: NewNotification) -> Result<Notification, StorageError> {
        let notification = Notification {
            id: generate_id(),
            clinic_id: row.clinic_id,
            user_id: row.user_id,
            kind: row.kind,
            title: row.title,
            message: row.message,
            link: row.link,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            read: false,
            created_at: now_utc(),
        };

        let key = make_storage_key(&notification.clinic_id, &notification.id);
        let guard = self.notifications.pin();
        guard.insert(key, notification.clone());
        Ok(notification)
    }

    async fn list_for_user(
        &self,
        clinic_id: &str,
        user_id: &str,
    ) -> Result<Vec<Notification>, StorageError> {
        let prefix = format!("{clinic_id}/");
        let guard = self.notifications.pin();
        let mut rows: Vec<Notification> = guard
            .iter()
            .filter(|(k, n)| k.starts_with(&prefix) && n.user_id == user_id)
            .map(|(_, n)| n.clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn mark_read(&self, clinic_id: &str, id: &str) -> Result<Notification, StorageError> {
        let key = make_storage_key(clinic_id, id);
        let guard = self.notifications.pin();

        let mut notification = guard
            .get(&key)
            .ok_or_else(|| StorageError::not_found("Notification", id))?
            .clone();

        notification.read = true;
        guard.insert(key, notification.clone());
        Ok(notification)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStorage {
    async fn find_active_by_appointment(
        &self,
        clinic_id: &str,
        appointment_id: &str,
    ) -> Result<Option<Invoice>, StorageError> {
        let prefix = format!("{clinic_id}/");
        let guard = self.invoices.pin();
        Ok(guard
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, i)| i)
            .find(|i| i.appointment_id == appointment_id && i.is_active())
            .cloned())
    }

    async fn insert(
        &self,
        invoice: NewInvoice,
        items: Vec<NewInvoiceItem>,
    ) -> Result<Invoice, StorageError> {
        let stored = Invoice {
            id: generate_id(),
            clinic_id: invoice.clinic_id,
            appointment_id: invoice.appointment_id,
            number: invoice.number,
            status: invoice.status,
            total_amount: invoice.total_amount,
            due_date: invoice.due_date,
            created_at: now_utc(),
        };

        let stored_items: Vec<InvoiceItem> = items
            .into_iter()
            .map(|item| InvoiceItem {
                id: generate_id(),
                invoice_id: stored.id.clone(),
                description: item.description,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        let key = make_storage_key(&stored.clinic_id, &stored.id);
        self.invoices.pin().insert(key, stored.clone());
        self.invoice_items
            .pin()
            .insert(stored.id.clone(), stored_items);
        Ok(stored)
    }

    async fn get(&self, clinic_id: &str, id: &str) -> Result<Option<Invoice>, StorageError> {
        let key = make_storage_key(clinic_id, id);
        let guard = self.invoices.pin();
        Ok(guard.get(&key).cloned())
    }

    async fn items(&self, invoice_id: &str) -> Result<Vec<InvoiceItem>, StorageError> {
        let guard = self.invoice_items.pin();
        Ok(guard.get(invoice_id).cloned().unwrap_or_default())
    }

    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Invoice>, StorageError> {
        let prefix = format!("{clinic_id}/");
        let guard = self.invoices.pin();
        let mut invoices: Vec<Invoice> = guard
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, i)| i.clone())
            .collect();
        invoices.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentiq_core::{InvoiceStatus, NotificationKind};
    use dentiq_storage::NewNotification;
    use time::macros::date;

    fn new_notification(clinic: &str, user: &str) -> NewNotification {
        NewNotification {
            clinic_id: clinic.into(),
            user_id: user.into(),
            kind: NotificationKind::VisitStatusUpdate,
            title: "Visit update".into(),
            message: "Visit BILLED: Patient.".into(),
            link: "/calendar?appointment=appt-1".into(),
            entity_type: "visit".into(),
            entity_id: "v1".into(),
        }
    }

    fn new_invoice(clinic: &str, appointment: &str) -> NewInvoice {
        NewInvoice {
            clinic_id: clinic.into(),
            appointment_id: appointment.into(),
            number: "INV-123456".into(),
            status: InvoiceStatus::Pending,
            total_amount: 7500,
            due_date: date!(2026 - 05 - 01),
        }
    }

    #[tokio::test]
    async fn test_visit_create_and_get() {
        let storage = InMemoryStorage::new();
        let visit = Visit::new("v1", "clinic-1", "appt-1");

        storage.create(visit.clone()).await.unwrap();
        let fetched = VisitStore::get(&storage, "clinic-1", "v1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, "v1");

        // Same id under another clinic misses
        assert!(
            VisitStore::get(&storage, "clinic-2", "v1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_visit_create_conflict() {
        let storage = InMemoryStorage::new();
        let visit = Visit::new("v1", "clinic-1", "appt-1");
        storage.create(visit.clone()).await.unwrap();

        let err = storage.create(visit).await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_visit_update_status() {
        let storage = InMemoryStorage::new();
        storage
            .create(Visit::new("v1", "clinic-1", "appt-1"))
            .await
            .unwrap();

        let updated = storage
            .update_status("clinic-1", "v1", VisitState::ReadyForExam)
            .await
            .unwrap();
        assert_eq!(updated.status, VisitState::ReadyForExam);

        let err = storage
            .update_status("clinic-1", "missing", VisitState::Billed)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_staff_role_filter() {
        let storage = InMemoryStorage::new();
        storage.add_staff_user(StaffUser::new("u1", "clinic-1", StaffRole::Receptionist));
        storage.add_staff_user(StaffUser::new("u2", "clinic-1", StaffRole::Accountant));
        storage.add_staff_user(StaffUser::new("u3", "clinic-1", StaffRole::Dentist));
        storage.add_staff_user(StaffUser::new("u4", "clinic-2", StaffRole::Receptionist));

        let front_desk = storage
            .users_in_roles("clinic-1", &StaffRole::FRONT_DESK)
            .await
            .unwrap();
        let ids: Vec<&str> = front_desk.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["u1", "u2"]);

        let admins = storage
            .users_in_roles("clinic-1", &StaffRole::ADMINS)
            .await
            .unwrap();
        assert!(admins.is_empty());
    }

    #[tokio::test]
    async fn test_notification_insert_and_list() {
        let storage = InMemoryStorage::new();
        NotificationStore::insert(&storage, new_notification("clinic-1", "u1"))
            .await
            .unwrap();
        NotificationStore::insert(&storage, new_notification("clinic-1", "u2"))
            .await
            .unwrap();

        let rows = storage.list_for_user("clinic-1", "u1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].read);
        assert_eq!(storage.notification_count(), 2);
    }

    #[tokio::test]
    async fn test_notification_mark_read() {
        let storage = InMemoryStorage::new();
        let n = NotificationStore::insert(&storage, new_notification("clinic-1", "u1"))
            .await
            .unwrap();

        let updated = storage.mark_read("clinic-1", &n.id).await.unwrap();
        assert!(updated.read);

        let err = storage.mark_read("clinic-1", "missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invoice_insert_with_items() {
        let storage = InMemoryStorage::new();
        let invoice = InvoiceStore::insert(
            &storage,
            new_invoice("clinic-1", "appt-1"),
            vec![NewInvoiceItem {
                description: "Cleaning".into(),
                quantity: 1,
                unit_price: 7500,
            }],
        )
        .await
        .unwrap();

        let items = storage.items(&invoice.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Cleaning");
        assert_eq!(items[0].invoice_id, invoice.id);
    }

    #[tokio::test]
    async fn test_find_active_by_appointment_skips_cancelled() {
        let storage = InMemoryStorage::new();
        let mut cancelled = new_invoice("clinic-1", "appt-1");
        cancelled.status = InvoiceStatus::Cancelled;
        InvoiceStore::insert(&storage, cancelled, Vec::new())
            .await
            .unwrap();

        assert!(
            storage
                .find_active_by_appointment("clinic-1", "appt-1")
                .await
                .unwrap()
                .is_none()
        );

        InvoiceStore::insert(&storage, new_invoice("clinic-1", "appt-1"), Vec::new())
            .await
            .unwrap();
        let found = storage
            .find_active_by_appointment("clinic-1", "appt-1")
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().status, InvoiceStatus::Pending);
    }

    #[tokio::test]
    async fn test_invoice_list_scoped_by_clinic() {
        let storage = InMemoryStorage::new();
        InvoiceStore::insert(&storage, new_invoice("clinic-1", "appt-1"), Vec::new())
            .await
            .unwrap();
        InvoiceStore::insert(&storage, new_invoice("clinic-2", "appt-2"), Vec::new())
            .await
            .unwrap();

        let rows = InvoiceStore::list_by_clinic(&storage, "clinic-1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].appointment_id, "appt-1");
    }
}
