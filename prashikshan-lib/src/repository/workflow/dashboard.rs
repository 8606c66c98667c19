use std::collections::HashSet;

use crate::repository::{
    entities::{CreditRecord, Internship, LogbookEntry, Mentor, MentorshipStatus, Student},
    workflow::mentorship::slots_available,
};

/// Headline numbers for the faculty dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub pending_approvals: usize,
    pub active_internships: usize,
    pub students_needing_mentor: usize,
    pub ongoing_mentorships: usize,
    pub completed_reports: usize,
    pub mentor_slots_available: u32,
}

impl Stats {
    pub(crate) fn compute(
        students: &[Student],
        mentors: &[Mentor],
        logbook: &[LogbookEntry],
        credits: &[CreditRecord],
    ) -> Self {
        let active_internships: HashSet<&str> =
            students.iter().filter_map(Student::internship_id).collect();

        Self {
            pending_approvals: logbook.iter().filter(|e| e.is_pending()).count(),
            active_internships: active_internships.len(),
            students_needing_mentor: students
                .iter()
                .filter(|s| s.mentorship_status == MentorshipStatus::Unassigned)
                .count(),
            ongoing_mentorships: students
                .iter()
                .filter(|s| s.mentorship_status.is_ongoing())
                .count(),
            completed_reports: credits.len(),
            mentor_slots_available: slots_available(mentors),
        }
    }
}

/// Narrow down the student list. Unset criteria match every student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Case-insensitive match on the student's name or internship title
    pub search: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub mentor_id: Option<String>,
    pub status: Option<MentorshipStatus>,
}

impl StudentFilter {
    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn batch(mut self, batch: &str) -> Self {
        self.batch = Some(batch.into());
        self
    }

    pub fn department(mut self, department: &str) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn mentor(mut self, mentor_id: &str) -> Self {
        self.mentor_id = Some(mentor_id.into());
        self
    }

    pub fn status(mut self, status: MentorshipStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn apply(&self, students: &[Student], internships: &[Internship]) -> Vec<Student> {
        students
            .iter()
            .filter(|s| self.matches(s, internships))
            .cloned()
            .collect()
    }

    fn matches(&self, student: &Student, internships: &[Internship]) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let matches_search = search.is_none_or(|q| {
            let title = student
                .internship_id()
                .and_then(|id| internships.iter().find(|i| i.id == id))
                .map(|i| i.title.to_lowercase())
                .unwrap_or_default();
            student.name.to_lowercase().contains(&q) || title.contains(&q)
        });

        matches_search
            && self.batch.as_ref().is_none_or(|b| *b == student.batch)
            && self
                .department
                .as_ref()
                .is_none_or(|d| *d == student.department)
            && self
                .mentor_id
                .as_deref()
                .is_none_or(|m| student.mentor_id() == Some(m))
            && self
                .status
                .is_none_or(|status| status == student.mentorship_status)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        Repository,
        repository::{StudentFilter, entities::MentorshipStatus},
    };

    #[test]
    fn test_stats_on_seed() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        let stats = repo.stats();

        assert_eq!(stats.pending_approvals, 1);
        assert_eq!(stats.active_internships, 3);
        assert_eq!(stats.students_needing_mentor, 2);
        assert_eq!(stats.ongoing_mentorships, 3);
        assert_eq!(stats.completed_reports, 1);
        assert_eq!(stats.mentor_slots_available, 6);
    }

    #[test]
    fn test_filter_by_search() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        let by_name = repo.filter_students(&StudentFilter::default().search("PRIYA"));
        assert_eq!(by_name.len(), 1);

        let by_title = repo.filter_students(&StudentFilter::default().search("marketing"));
        let names: Vec<&str> = by_title.iter().map(|s| s.name().as_str()).collect();
        assert_eq!(names, ["Sneha Kumar", "Aman Verma"]);

        let blank = repo.filter_students(&StudentFilter::default().search("   "));
        assert_eq!(blank.len(), 5);
    }

    #[test]
    fn test_filter_combined() {
        let mut repo = Repository::mock();
        repo.seed().unwrap();

        let filter = StudentFilter::default()
            .department("CSE")
            .mentor("men-1")
            .status(MentorshipStatus::Assigned);
        let students = repo.filter_students(&filter);

        assert_eq!(students.len(), 1);
        assert_eq!(students.first().unwrap().name(), "Neha Singh");

        let none = repo.filter_students(&StudentFilter::default().batch("1999"));
        assert!(none.is_empty());
    }
}
