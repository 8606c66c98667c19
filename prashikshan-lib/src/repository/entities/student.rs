use chrono::NaiveDate;
use clap::ValueEnum;
use getset::{CopyGetters, Getters};
use heck::ToTrainCase;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::repository::store::{Collection, Record};

/// Where a student is in the mentorship lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ValueEnum,
)]
#[serde(try_from = "String")]
pub enum MentorshipStatus {
    #[default]
    Unassigned,
    Assigned,
    #[serde(rename = "In-Progress")]
    #[strum(serialize = "In-Progress")]
    InProgress,
    Completed,
}

impl MentorshipStatus {
    /// Parse a status label leniently, e.g. `in-progress`, `In Progress` or `IN_PROGRESS`.
    pub fn parse_label(label: &str) -> Option<Self> {
        label.to_train_case().parse().ok()
    }

    /// Whether a mentor is actively working with the student
    pub fn is_ongoing(self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress)
    }
}

impl TryFrom<String> for MentorshipStatus {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::parse_label(&label).ok_or_else(|| format!("unknown mentorship status '{label}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[getset(get = "pub")]
    pub(crate) id: String,
    #[getset(get = "pub")]
    pub(crate) name: String,
    #[getset(get = "pub")]
    pub(crate) batch: String,
    #[getset(get = "pub")]
    pub(crate) department: String,
    #[serde(default)]
    pub(crate) internship_id: Option<String>,
    #[serde(default)]
    pub(crate) mentor_id: Option<String>,
    /// Percentage, never above 100
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) progress: u8,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) last_log_date: Option<NaiveDate>,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pub(crate) mentorship_status: MentorshipStatus,
}

impl Student {
    pub fn new(id: &str, name: &str, batch: &str, department: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            batch: batch.into(),
            department: department.into(),
            internship_id: None,
            mentor_id: None,
            progress: 0,
            last_log_date: None,
            mentorship_status: MentorshipStatus::Unassigned,
        }
    }

    pub fn with_internship(mut self, internship_id: &str) -> Self {
        self.internship_id = Some(internship_id.into());
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    pub fn internship_id(&self) -> Option<&str> {
        self.internship_id.as_deref()
    }

    pub fn mentor_id(&self) -> Option<&str> {
        self.mentor_id.as_deref()
    }

    /// Advance progress by `step`, capped at 100.
    pub(crate) fn advance(&mut self, step: u8) {
        self.progress = self.progress.saturating_add(step).min(100);
    }

    /// Record a logbook date if it is newer than the last one seen.
    pub(crate) fn record_log_date(&mut self, date: NaiveDate) {
        if self.last_log_date.is_none_or(|last| last < date) {
            self.last_log_date = Some(date);
        }
    }
}

impl Record for Student {
    const COLLECTION: Collection = Collection::Students;

    fn id(&self) -> &str {
        &self.id
    }
}
