use chrono::{DateTime, NaiveDate, Utc};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::repository::{
    entities::new_id,
    store::{Collection, Record},
};

/// Review state of a logbook entry. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A daily work record submitted by a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct LogbookEntry {
    #[getset(get = "pub")]
    pub(crate) id: String,
    #[getset(get = "pub")]
    pub(crate) student_id: String,
    #[getset(get = "pub")]
    pub(crate) student_name: String,
    #[getset(get_copy = "pub")]
    pub(crate) date: NaiveDate,
    #[getset(get = "pub")]
    pub(crate) company: String,
    #[serde(rename = "hours", alias = "hoursWorked")]
    #[getset(get_copy = "pub")]
    pub(crate) hours_worked: f64,
    #[getset(get = "pub")]
    pub(crate) description: String,
    #[serde(default)]
    #[getset(get = "pub")]
    pub(crate) skills: Vec<String>,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) status: LogStatus,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) created_at: Option<DateTime<Utc>>,
}

impl LogbookEntry {
    pub fn is_pending(&self) -> bool {
        self.status == LogStatus::Pending
    }
}

impl From<NewLogbookEntry> for LogbookEntry {
    fn from(new: NewLogbookEntry) -> Self {
        let mut skills: Vec<String> = Vec::with_capacity(new.skills.len());
        for skill in new.skills {
            let skill = skill.trim().to_string();
            if !skill.is_empty() && !skills.contains(&skill) {
                skills.push(skill);
            }
        }

        Self {
            id: new_id("log"),
            student_id: new.student_id,
            student_name: new.student_name,
            date: new.date,
            company: new.company,
            hours_worked: new.hours_worked,
            description: new.description,
            skills,
            status: LogStatus::Pending,
            created_at: Some(Utc::now()),
        }
    }
}

impl Record for LogbookEntry {
    const COLLECTION: Collection = Collection::Logbook;

    fn id(&self) -> &str {
        &self.id
    }
}

/// What a student fills in when submitting a logbook entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogbookEntry {
    pub student_id: String,
    pub student_name: String,
    pub date: NaiveDate,
    pub company: String,
    pub hours_worked: f64,
    pub description: String,
    pub skills: Vec<String>,
}
