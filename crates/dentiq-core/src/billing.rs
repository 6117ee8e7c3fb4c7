use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(CoreError::invalid_invoice_status(other)),
        }
    }
}

/// An invoice tied to one appointment.
///
/// Invoice numbers are display identifiers, not enforced unique at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub clinic_id: String,
    pub appointment_id: String,
    pub number: String,
    pub status: InvoiceStatus,
    pub total_amount: i64,
    pub due_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Invoice {
    /// True for invoices that still count against the one-active-invoice-per-
    /// appointment check.
    pub fn is_active(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Cancelled)
    }
}

/// A single line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
}

impl InvoiceItem {
    pub fn total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample_invoice(status: InvoiceStatus) -> Invoice {
        Invoice {
            id: "inv-1".into(),
            clinic_id: "clinic-1".into(),
            appointment_id: "appt-1".into(),
            number: "INV-123456".into(),
            status,
            total_amount: 7500,
            due_date: date!(2026 - 05 - 01),
            created_at: datetime!(2026-05-01 09:00:00 UTC),
        }
    }

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: InvoiceStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, InvoiceStatus::Cancelled);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert!("PAID".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_is_active() {
        assert!(sample_invoice(InvoiceStatus::Pending).is_active());
        assert!(sample_invoice(InvoiceStatus::Paid).is_active());
        assert!(!sample_invoice(InvoiceStatus::Cancelled).is_active());
    }

    #[test]
    fn test_item_total() {
        let item = InvoiceItem {
            id: "it-1".into(),
            invoice_id: "inv-1".into(),
            description: "Cleaning".into(),
            quantity: 2,
            unit_price: 7500,
        };
        assert_eq!(item.total(), 15000);
    }

    #[test]
    fn test_invoice_roundtrip() {
        let original = sample_invoice(InvoiceStatus::Pending);
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(json["status"], "pending");
        let back: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, original);
    }
}
