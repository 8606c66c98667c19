use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::repository::store::{Collection, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    #[getset(get = "pub")]
    pub(crate) id: String,
    #[getset(get = "pub")]
    pub(crate) title: String,
    #[getset(get = "pub")]
    pub(crate) company_id: String,
    #[getset(get_copy = "pub")]
    pub(crate) start_date: NaiveDate,
    #[getset(get_copy = "pub")]
    pub(crate) end_date: NaiveDate,
}

impl Internship {
    pub fn new(
        id: &str,
        title: &str,
        company_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company_id: company_id.into(),
            start_date,
            end_date,
        }
    }

    /// Length in whole days, at least one.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(1)
    }
}

impl Record for Internship {
    const COLLECTION: Collection = Collection::Internships;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Company {
    pub(crate) id: String,
    pub(crate) name: String,
}

impl Company {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Record for Company {
    const COLLECTION: Collection = Collection::Companies;

    fn id(&self) -> &str {
        &self.id
    }
}
