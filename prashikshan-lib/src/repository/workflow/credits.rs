use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    repository::{
        entities::{CreditGrant, CreditRecord, Internship, NotificationKind, Student},
        store::Store,
        workflow::notifications,
    },
};

/// File name used when exporting the credit history.
pub const EXPORT_FILE_NAME: &str = "credit-history.csv";

const CSV_HEADER: [&str; 5] = ["Student", "Internship", "Credits", "Approved By", "Date"];

/// Heuristic mapping internship length to a credit suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditPolicy {
    pub days_per_credit: u32,
    pub min_credits: u32,
    pub max_credits: u32,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            days_per_credit: 15,
            min_credits: 2,
            max_credits: 20,
        }
    }
}

/// Suggest credits for an internship: one per `days_per_credit` days, rounded half up and
/// clamped to the policy's bounds. Only a suggestion, callers may grant any positive amount.
pub fn suggest_credits(internship: &Internship, policy: &CreditPolicy) -> u32 {
    let days = internship.duration_days();
    let per_credit = i64::from(policy.days_per_credit.max(1));

    let rounded = (2 * days + per_credit).div_euclid(2 * per_credit);
    let clamped = rounded
        .max(i64::from(policy.min_credits))
        .min(i64::from(policy.max_credits));

    u32::try_from(clamped).unwrap_or(policy.max_credits)
}

pub(crate) fn add(store: &mut Store, grant: CreditGrant) -> Result<CreditRecord> {
    grant.validate()?;

    let record = store.append(CreditRecord::from(grant))?;

    let student_name = store
        .find::<Student>(&record.student_id)
        .map_or_else(|| record.student_id.clone(), |s| s.name);
    notifications::add(
        store,
        NotificationKind::Credits,
        format!("Credits assigned for {student_name}"),
    )?;

    debug!(
        "Granted {} credits to {} for {}",
        record.credits, record.student_id, record.internship_id
    );

    Ok(record)
}

/// Render the credit history as CSV.
///
/// Every field is quoted with inner quotes doubled, and every row ends with `\n`. Students or
/// internships that can't be resolved render as empty fields.
pub fn export_csv(
    records: &[CreditRecord],
    students: &[Student],
    internships: &[Internship],
) -> String {
    let mut csv = String::new();
    push_row(&mut csv, &CSV_HEADER);

    for record in records {
        let student = students
            .iter()
            .find(|s| s.id == record.student_id)
            .map_or("", |s| s.name.as_str());
        let internship = internships
            .iter()
            .find(|i| i.id == record.internship_id)
            .map_or("", |i| i.title.as_str());
        let credits = record.credits.to_string();

        push_row(
            &mut csv,
            &[
                student,
                internship,
                &credits,
                &record.approved_by,
                &record.date,
            ],
        );
    }

    csv
}

pub(crate) fn write_csv(path: &Path, csv: &str) -> Result<()> {
    fs::write(path, csv).map_err(|source| Error::Export {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Exported credit history to {}", path.display());

    Ok(())
}

fn push_row(csv: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields
        .iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect();
    csv.push_str(&row.join(","));
    csv.push('\n');
}

#[cfg(test)]
mod test {
    use chrono::{Duration, NaiveDate};
    use tempfile::tempdir;

    use super::*;
    use crate::{Repository, repository::entities::GrantError};

    fn internship_of(days: i64) -> Internship {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Internship::new(
            "int-1",
            "Full Stack Development Internship",
            "comp-1",
            start,
            start + Duration::days(days),
        )
    }

    fn record(student_id: &str, internship_id: &str, approved_by: &str) -> CreditRecord {
        CreditRecord {
            id: "cred-1".into(),
            student_id: student_id.into(),
            internship_id: internship_id.into(),
            credits: 6.0,
            approved_by: approved_by.into(),
            date: "2024-01-14".into(),
        }
    }

    #[test]
    fn test_suggest_credits() {
        let policy = CreditPolicy::default();

        assert_eq!(suggest_credits(&internship_of(90), &policy), 6);
        assert_eq!(suggest_credits(&internship_of(10), &policy), 2);
        assert_eq!(suggest_credits(&internship_of(400), &policy), 20);
        // 97 / 15 = 6.47, 98 / 15 = 6.53
        assert_eq!(suggest_credits(&internship_of(97), &policy), 6);
        assert_eq!(suggest_credits(&internship_of(98), &policy), 7);
    }

    #[test]
    fn test_suggest_credits_reversed_dates() {
        let policy = CreditPolicy::default();

        assert_eq!(suggest_credits(&internship_of(-30), &policy), 2);
    }

    #[test]
    fn test_suggest_credits_inverted_bounds() {
        let policy = CreditPolicy {
            days_per_credit: 0,
            min_credits: 10,
            max_credits: 5,
        };

        assert_eq!(suggest_credits(&internship_of(90), &policy), 5);
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(
            export_csv(&[], &[], &[]),
            "\"Student\",\"Internship\",\"Credits\",\"Approved By\",\"Date\"\n"
        );
    }

    #[test]
    fn test_export_rows() {
        let students = [Student::new("stu-2", "Rahul Patel", "2022", "IT")];
        let internships = [Internship::new(
            "int-2",
            "Data Science Internship",
            "comp-2",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
        )];

        let csv = export_csv(
            &[record("stu-2", "int-2", "Prof. Iyer")],
            &students,
            &internships,
        );

        assert_eq!(
            csv.lines().nth(1),
            Some("\"Rahul Patel\",\"Data Science Internship\",\"6\",\"Prof. Iyer\",\"2024-01-14\"")
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_export_escapes_quotes_and_commas() {
        let csv = export_csv(
            &[record("stu-404", "int-404", "Rao, \"Prof\"")],
            &[],
            &[],
        );

        assert_eq!(
            csv.lines().nth(1),
            Some("\"\",\"\",\"6\",\"Rao, \"\"Prof\"\"\",\"2024-01-14\"")
        );
    }

    #[test]
    fn test_add_credit() {
        let mut repo = Repository::mock();
        repo.add_student(Student::new("stu-1", "Priya Sharma", "2023", "CSE"))
            .unwrap();

        let grant = CreditGrant {
            student_id: "stu-1".into(),
            internship_id: "int-1".into(),
            credits: 4.0,
            approved_by: "Faculty".into(),
        };
        let first = repo.add_credit(grant.clone()).unwrap();
        let second = repo.add_credit(grant).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(repo.credits().len(), 2);
        assert_eq!(
            repo.notifications().first().unwrap().message(),
            "Credits assigned for Priya Sharma"
        );
    }

    #[test]
    fn test_add_invalid_credit() {
        let mut repo = Repository::mock();

        let result = repo.add_credit(CreditGrant {
            student_id: "stu-1".into(),
            internship_id: String::new(),
            credits: 4.0,
            approved_by: "Faculty".into(),
        });

        assert!(matches!(
            result,
            Err(Error::InvalidGrant(GrantError::MissingField("internshipId")))
        ));
        assert!(repo.credits().is_empty());
        assert!(repo.notifications().is_empty());
    }

    #[test]
    fn test_write_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        write_csv(&path, &export_csv(&[], &[], &[])).unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "\"Student\",\"Internship\",\"Credits\",\"Approved By\",\"Date\"\n"
        );
    }
}
