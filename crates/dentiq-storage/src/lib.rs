//! Storage abstraction for the Dentiq clinic server.
//!
//! One trait per aggregate so the workflow dispatcher can take exactly the
//! stores it needs (role resolution is a scoped query per trigger call, never
//! cached module state).

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::{InvoiceStore, NotificationStore, StaffDirectory, TreatmentStore, VisitStore};
pub use types::{NewInvoice, NewInvoiceItem, NewNotification};
