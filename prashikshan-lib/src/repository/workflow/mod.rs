//! Operations that move records through the faculty workflows.
//!
//! Each operation reads what it needs from the [`Store`](crate::repository::store::Store),
//! applies its change and persists immediately. Side effects such as progress bumps and
//! notifications happen within the same call.

pub(crate) mod credits;
pub(crate) mod dashboard;
pub(crate) mod logbook;
pub(crate) mod mentorship;
pub(crate) mod notifications;
