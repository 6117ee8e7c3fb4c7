//! Insert-row types accepted by the stores.

use dentiq_core::{InvoiceStatus, NotificationKind};
use serde::{Deserialize, Serialize};
use time::Date;

/// Row to insert into the notifications store.
///
/// Field set mirrors the notification-creation collaborator interface:
/// `(clinic, user, kind, title, message, link, entity_type, entity_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub clinic_id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: String,
    pub entity_type: String,
    pub entity_id: String,
}

/// Row to insert into the invoices store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub clinic_id: String,
    pub appointment_id: String,
    pub number: String,
    pub status: InvoiceStatus,
    pub total_amount: i64,
    pub due_date: Date,
}

/// Line row inserted together with its invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
}
