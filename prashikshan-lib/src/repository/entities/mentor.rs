use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::repository::store::{Collection, Record};

/// A faculty member who can take on a limited number of students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    #[getset(get = "pub")]
    pub(crate) id: String,
    #[getset(get = "pub")]
    pub(crate) name: String,
    #[getset(get = "pub")]
    pub(crate) department: String,
    /// Remaining assignment slots
    #[getset(get_copy = "pub")]
    pub(crate) capacity_left: u32,
}

impl Mentor {
    pub fn new(id: &str, name: &str, department: &str, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            capacity_left: capacity,
        }
    }

    /// Consume one slot. Returns `false` and leaves the mentor untouched if none are left.
    pub(crate) fn take_slot(&mut self) -> bool {
        match self.capacity_left.checked_sub(1) {
            Some(left) => {
                self.capacity_left = left;
                true
            }
            None => false,
        }
    }
}

impl Record for Mentor {
    const COLLECTION: Collection = Collection::Mentors;

    fn id(&self) -> &str {
        &self.id
    }
}
