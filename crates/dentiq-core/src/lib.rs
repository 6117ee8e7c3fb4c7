pub mod appointment;
pub mod billing;
pub mod error;
pub mod id;
pub mod notification;
pub mod staff;
pub mod time;
pub mod treatment;
pub mod visit;

pub use appointment::{AppointmentSnapshot, PatientSnapshot};
pub use billing::{Invoice, InvoiceItem, InvoiceStatus};
pub use error::{CoreError, Result};
pub use id::generate_id;
pub use notification::{Notification, NotificationKind};
pub use staff::{StaffRole, StaffUser};
pub use time::{now_utc, today_utc};
pub use treatment::Treatment;
pub use visit::{Visit, VisitState};
