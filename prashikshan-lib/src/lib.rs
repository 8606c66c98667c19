//! Workflow and assignment store for the Prashikshan internship platform.
//!
//! The crate keeps students, mentors, internships, logbook entries, credit
//! grants and notifications in named JSON collections, and implements the
//! faculty workflows that mutate them: logbook review, mentor assignment and
//! credit mapping. Everything goes through a [`Repository`].

use std::path::PathBuf;

use thiserror::Error;

pub mod fs;
pub mod repository;

pub use repository::Repository;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] repository::store::Error),
    #[error(transparent)]
    Config(#[from] repository::config::Error),
    #[error("No logbook entry with id '{0}'")]
    UnknownLogbookEntry(String),
    #[error("No student with id '{0}'")]
    UnknownStudent(String),
    #[error("No internship with id '{0}'")]
    UnknownInternship(String),
    #[error("Invalid credit grant: {0}")]
    InvalidGrant(#[from] repository::GrantError),
    #[error("Failed to write export to {path}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
