use std::path::{Path, PathBuf};

use crate::{
    Error, Result,
    repository::{
        config::{Cfg, CoreConfig},
        store::{Record, Store},
        workflow::{credits, logbook, mentorship, notifications},
    },
};

mod seed;
mod workflow;

pub mod config;
pub mod entities;
pub mod store;

pub use entities::{
    Company, CreditGrant, CreditRecord, GrantError, Internship, LogStatus, LogbookEntry, Mentor,
    MentorshipStatus, NewLogbookEntry, Notification, NotificationKind, Student,
};
pub use workflow::{
    credits::{CreditPolicy, EXPORT_FILE_NAME, export_csv, suggest_credits},
    dashboard::{Stats, StudentFilter},
    mentorship::Assignment,
};

/// Central access point for all persistent data.
///
/// The [`Repository`] owns the [`Store`] and a handle to the [`CoreConfig`], and exposes every
/// workflow operation as a plain method call. Each call runs to completion and persists before
/// returning. It is not meant to be shared between concurrent writers.
#[derive(Debug)]
pub struct Repository {
    store: Store,
    cfg: Cfg,
}

impl Repository {
    /// Open the repository described by the user's configuration file.
    pub fn new() -> Result<Self> {
        let cfg = CoreConfig::load()?;
        let dir = cfg.data_dir().map_err(config::Error::from)?;
        let store = Store::open(dir)?;

        Ok(Self::with_store(store, cfg.into_handle()))
    }

    pub fn with_store(store: Store, cfg: Cfg) -> Self {
        Self { store, cfg }
    }

    pub fn config(&self) -> Cfg {
        self.cfg.clone()
    }

    /// Populate missing collections with demo data. Returns how many were seeded.
    pub fn seed(&mut self) -> Result<usize> {
        Ok(seed::seed(&mut self.store)?)
    }

    // Collections

    pub fn students(&self) -> Vec<Student> {
        self.store.collection()
    }

    pub fn student(&self, id: &str) -> Option<Student> {
        self.store.find(id)
    }

    pub fn mentors(&self) -> Vec<Mentor> {
        self.store.collection()
    }

    pub fn mentor(&self, id: &str) -> Option<Mentor> {
        self.store.find(id)
    }

    pub fn internships(&self) -> Vec<Internship> {
        self.store.collection()
    }

    pub fn internship(&self, id: &str) -> Option<Internship> {
        self.store.find(id)
    }

    pub fn companies(&self) -> Vec<Company> {
        self.store.collection()
    }

    pub fn logbook_entries(&self) -> Vec<LogbookEntry> {
        self.store.collection()
    }

    pub fn logbook_entry(&self, id: &str) -> Option<LogbookEntry> {
        self.store.find(id)
    }

    pub fn credits(&self) -> Vec<CreditRecord> {
        self.store.collection()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.store.collection()
    }

    pub fn add_student(&mut self, student: Student) -> Result<Student> {
        self.insert(student)
    }

    pub fn add_mentor(&mut self, mentor: Mentor) -> Result<Mentor> {
        self.insert(mentor)
    }

    pub fn add_internship(&mut self, internship: Internship) -> Result<Internship> {
        self.insert(internship)
    }

    pub fn add_company(&mut self, company: Company) -> Result<Company> {
        self.insert(company)
    }

    // Logbook

    pub fn submit_logbook_entry(&mut self, entry: NewLogbookEntry) -> Result<LogbookEntry> {
        logbook::submit(&mut self.store, entry)
    }

    pub fn logbook_entries_by_student(&self, student_id: &str) -> Vec<LogbookEntry> {
        logbook::entries_by_student(&self.store, student_id)
    }

    pub fn pending_logbook_entries(&self) -> Vec<LogbookEntry> {
        logbook::pending(&self.store)
    }

    pub fn approve_logbook(&mut self, id: &str) -> Result<LogbookEntry> {
        let cfg = self.cfg.read().clone();
        logbook::approve(&mut self.store, &cfg, id)
    }

    pub fn reject_logbook(&mut self, id: &str, feedback: &str) -> Result<LogbookEntry> {
        logbook::reject(&mut self.store, id, feedback)
    }

    pub fn bulk_approve_logbook<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<LogbookEntry>> {
        let cfg = self.cfg.read().clone();
        logbook::bulk_approve(&mut self.store, &cfg, ids)
    }

    // Mentorship

    /// Assign a mentor to a student. Returns the updated mentor, or `None` if the mentor has no
    /// capacity left.
    pub fn assign_mentor(&mut self, student_id: &str, mentor_id: &str) -> Result<Option<Mentor>> {
        Ok(mentorship::assign(&mut self.store, student_id, mentor_id)?.map(|a| a.mentor))
    }

    /// Assign the first student without a mentor to the given mentor.
    pub fn assign_next_student(&mut self, mentor_id: &str) -> Result<Option<Assignment>> {
        mentorship::assign_next(&mut self.store, mentor_id)
    }

    pub fn set_mentorship_status(
        &mut self,
        student_id: &str,
        status: MentorshipStatus,
    ) -> Result<Student> {
        mentorship::set_status(&mut self.store, student_id, status)
    }

    pub fn mentor_slots_available(&self) -> u32 {
        mentorship::slots_available(&self.mentors())
    }

    // Credits

    pub fn add_credit(&mut self, grant: CreditGrant) -> Result<CreditRecord> {
        credits::add(&mut self.store, grant)
    }

    /// Grant credits on behalf of the configured approver. Without an explicit amount the
    /// suggestion for the internship's duration is used.
    pub fn grant_credits(
        &mut self,
        student_id: &str,
        internship_id: &str,
        credits: Option<f64>,
    ) -> Result<CreditRecord> {
        let credits = match credits {
            Some(credits) => credits,
            None => f64::from(self.suggest_credits(internship_id)?),
        };
        let approved_by = self.cfg.read().approver.clone();

        self.add_credit(CreditGrant {
            student_id: student_id.into(),
            internship_id: internship_id.into(),
            credits,
            approved_by,
        })
    }

    pub fn suggest_credits(&self, internship_id: &str) -> Result<u32> {
        let internship = self
            .internship(internship_id)
            .ok_or_else(|| Error::UnknownInternship(internship_id.to_string()))?;
        let policy = self.cfg.read().credit_policy;

        Ok(suggest_credits(&internship, &policy))
    }

    /// The whole credit history as CSV.
    pub fn export_credits_csv(&self) -> String {
        export_csv(&self.credits(), &self.students(), &self.internships())
    }

    /// Write the credit history to `dir/credit-history.csv`.
    pub fn write_credits_csv(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        credits::write_csv(&path, &self.export_credits_csv())?;

        Ok(path)
    }

    // Notifications

    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        message: &str,
    ) -> Result<Notification> {
        Ok(notifications::add(&mut self.store, kind, message)?)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<Option<Notification>> {
        Ok(notifications::mark_read(&mut self.store, id)?)
    }

    pub fn unread_notifications(&self) -> usize {
        notifications::unread_count(&self.store)
    }

    // Dashboard

    pub fn stats(&self) -> Stats {
        Stats::compute(
            &self.students(),
            &self.mentors(),
            &self.logbook_entries(),
            &self.credits(),
        )
    }

    pub fn filter_students(&self, filter: &StudentFilter) -> Vec<Student> {
        filter.apply(&self.students(), &self.internships())
    }

    fn insert<T: Record>(&mut self, record: T) -> Result<T> {
        Ok(self.store.append(record)?)
    }

    #[cfg(test)]
    /// Return a mock version of a [`Repository`] with an in-memory store and default
    /// configuration.
    pub(crate) fn mock() -> Self {
        Self::with_store(Store::in_memory(), CoreConfig::mock().into_handle())
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_add_placement() {
        let mut repo = Repository::mock();
        let company = repo
            .add_company(Company::new("comp-9", "GreenGrid Energy"))
            .unwrap();
        repo.add_internship(Internship::new(
            "int-9",
            "Solar Analytics Internship",
            company.id(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        ))
        .unwrap();
        let student = Student::new("stu-9", "Kavya Menon", "2023", "EEE").with_internship("int-9");
        repo.add_student(student).unwrap();

        assert_eq!(repo.companies().len(), 1);
        assert_eq!(repo.student("stu-9").unwrap().internship_id(), Some("int-9"));
        assert_eq!(
            repo.filter_students(&StudentFilter::default().search("solar")).len(),
            1
        );
        // 30 days at 15 per credit
        assert_eq!(repo.suggest_credits("int-9").unwrap(), 2);
        assert_eq!(repo.stats().active_internships, 1);
    }

    #[test]
    fn test_grant_credits_uses_suggestion() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        // int-1 runs 2024-01-10 to 2024-04-10, 91 days
        let record = repo.grant_credits("stu-1", "int-1", None).unwrap();

        assert_eq!(record.credits(), 6.0);
        assert_eq!(record.approved_by(), "Faculty");
    }

    #[test]
    fn test_grant_credits_explicit_amount() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        let record = repo.grant_credits("stu-3", "int-3", Some(3.5)).unwrap();

        assert_eq!(record.credits(), 3.5);
    }

    #[test]
    fn test_suggest_unknown_internship() {
        let repo = Repository::mock();

        assert!(matches!(
            repo.suggest_credits("int-404"),
            Err(Error::UnknownInternship(_))
        ));
    }

    #[test]
    fn test_configured_progress_step() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();
        repo.config().write().progress_step = 20;

        repo.approve_logbook("1").unwrap();

        assert_eq!(repo.student("stu-1").unwrap().progress(), 85);
    }

    #[test]
    fn test_export_seeded_credits() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        assert_eq!(
            repo.export_credits_csv(),
            "\"Student\",\"Internship\",\"Credits\",\"Approved By\",\"Date\"\n\
             \"Rahul Patel\",\"Data Science Internship\",\"6\",\"Prof. Iyer\",\"2024-01-14\"\n"
        );
    }

    #[test]
    fn test_write_credits_csv() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        let path = repo.write_credits_csv(dir.path()).unwrap();

        assert!(path.ends_with(EXPORT_FILE_NAME));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            repo.export_credits_csv()
        );
    }

    #[test]
    fn test_file_backed_repository() {
        let dir = tempdir().unwrap();

        {
            let store = Store::open(dir.path()).unwrap();
            let mut repo = Repository::with_store(store, CoreConfig::mock().into_handle());
            repo.seed().unwrap();
            repo.assign_mentor("stu-3", "men-3").unwrap();
        }

        let store = Store::open(dir.path()).unwrap();
        let repo = Repository::with_store(store, CoreConfig::mock().into_handle());

        assert_eq!(repo.mentor("men-3").unwrap().capacity_left(), 2);
        assert_eq!(repo.student("stu-3").unwrap().mentor_id(), Some("men-3"));
    }
}
