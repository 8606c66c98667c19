//! Core domain entities.
//!
//! These are the records persisted in the store's collections. Field names on disk are
//! camelCase so that previously exported data keeps loading.

use uuid::Uuid;

mod credit;
mod internship;
mod logbook;
mod mentor;
mod notification;
mod student;

pub use credit::{CreditGrant, CreditRecord, GrantError};
pub use internship::{Company, Internship};
pub use logbook::{LogStatus, LogbookEntry, NewLogbookEntry};
pub use mentor::Mentor;
pub use notification::{Notification, NotificationKind};
pub use student::{MentorshipStatus, Student};

/// Generate a fresh id of the form `<prefix>-<hex>`.
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
