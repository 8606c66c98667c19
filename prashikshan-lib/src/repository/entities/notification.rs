use chrono::{DateTime, Utc};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::repository::{
    entities::new_id,
    store::{Collection, Record},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Logbook,
    Approval,
    Rejection,
    Mentorship,
    Credits,
    #[serde(other)]
    Other,
}

/// A system generated notice shown in the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[getset(get = "pub")]
    pub(crate) id: String,
    #[serde(rename = "type")]
    #[getset(get_copy = "pub")]
    pub(crate) kind: NotificationKind,
    #[getset(get = "pub")]
    pub(crate) message: String,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) read: bool,
    #[getset(get_copy = "pub")]
    pub(crate) created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: new_id("noti"),
            kind,
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }
}

impl Record for Notification {
    const COLLECTION: Collection = Collection::Notifications;

    fn id(&self) -> &str {
        &self.id
    }
}
