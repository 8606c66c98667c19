use chrono::{SecondsFormat, Utc};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::{
    entities::new_id,
    store::{Collection, Record},
};

/// A credit grant for a (student, internship) pair. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecord {
    #[getset(get = "pub")]
    pub(crate) id: String,
    #[getset(get = "pub")]
    pub(crate) student_id: String,
    #[getset(get = "pub")]
    pub(crate) internship_id: String,
    #[getset(get_copy = "pub")]
    pub(crate) credits: f64,
    #[getset(get = "pub")]
    pub(crate) approved_by: String,
    /// Either a plain date or an RFC 3339 timestamp, kept verbatim for export
    #[getset(get = "pub")]
    pub(crate) date: String,
}

impl From<CreditGrant> for CreditRecord {
    fn from(grant: CreditGrant) -> Self {
        Self {
            id: new_id("cred"),
            student_id: grant.student_id,
            internship_id: grant.internship_id,
            credits: grant.credits,
            approved_by: grant.approved_by,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl Record for CreditRecord {
    const COLLECTION: Collection = Collection::Credits;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GrantError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("credits must be a positive number, got {0}")]
    InvalidCredits(f64),
}

/// A manually entered credit grant, not yet recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditGrant {
    pub student_id: String,
    pub internship_id: String,
    pub credits: f64,
    pub approved_by: String,
}

impl CreditGrant {
    /// Every field is required and credits must be positive.
    pub fn validate(&self) -> Result<(), GrantError> {
        if self.student_id.trim().is_empty() {
            return Err(GrantError::MissingField("studentId"));
        }
        if self.internship_id.trim().is_empty() {
            return Err(GrantError::MissingField("internshipId"));
        }
        if self.approved_by.trim().is_empty() {
            return Err(GrantError::MissingField("approvedBy"));
        }
        if !self.credits.is_finite() || self.credits <= 0.0 {
            return Err(GrantError::InvalidCredits(self.credits));
        }

        Ok(())
    }
}
