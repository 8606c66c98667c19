use serde::{Serialize, de::DeserializeOwned};
use strum::{AsRefStr, Display};

/// The fixed keys under which each collection is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum Collection {
    #[strum(serialize = "prashikshan_students")]
    Students,
    #[strum(serialize = "prashikshan_mentors")]
    Mentors,
    #[strum(serialize = "prashikshan_internships")]
    Internships,
    #[strum(serialize = "prashikshan_companies")]
    Companies,
    #[strum(serialize = "prashikshan_logbook")]
    Logbook,
    #[strum(serialize = "prashikshan_credits")]
    Credits,
    #[strum(serialize = "prashikshan_notifications")]
    Notifications,
}

impl Collection {
    pub fn file_name(self) -> String {
        format!("{}.json", self.as_ref())
    }

    pub(crate) fn backup_file_name(self) -> String {
        format!("{}.json.bak", self.as_ref())
    }
}

/// A record that lives in one of the [`Collection`]s.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}
