use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use prashikshan_lib::{
    Error, Repository, Result,
    repository::{MentorshipStatus, Student, StudentFilter},
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List students, optionally filtered
    List {
        /// Match against the student's name or internship title
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        batch: Option<String>,
        #[arg(long)]
        department: Option<String>,
        /// Only students mentored by this mentor id
        #[arg(long)]
        mentor: Option<String>,
        #[arg(long, value_enum)]
        status: Option<MentorshipStatus>,
    },
    /// Show a student and their logbook
    Show { id: String },
    /// Set a student's mentorship status
    Status {
        id: String,
        #[arg(value_enum)]
        status: MentorshipStatus,
    },
    /// Students grouped by mentorship status
    Board,
}

pub fn handle(repo: &mut Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List {
            search,
            batch,
            department,
            mentor,
            status,
        } => {
            let filter = StudentFilter {
                search: search.clone(),
                batch: batch.clone(),
                department: department.clone(),
                mentor_id: mentor.clone(),
                status: *status,
            };
            for student in repo.filter_students(&filter) {
                print_student(repo, &student);
            }
        }
        Command::Show { id } => {
            let student = repo
                .student(id)
                .ok_or_else(|| Error::UnknownStudent(id.clone()))?;
            print_student(repo, &student);
            if let Some(date) = student.last_log_date() {
                println!("  last log: {date}");
            }
            for entry in repo.logbook_entries_by_student(id) {
                println!(
                    "  {} {} {}h [{}]",
                    entry.id().dimmed(),
                    entry.date(),
                    entry.hours_worked(),
                    entry.status()
                );
            }
        }
        Command::Status { id, status } => {
            let student = repo.set_mentorship_status(id, *status)?;
            println!("{} is now {}", student.name(), student.mentorship_status());
        }
        Command::Board => {
            let students = repo.students();
            for status in MentorshipStatus::value_variants() {
                println!("{}", status.to_string().bold());
                students
                    .iter()
                    .filter(|s| s.mentorship_status() == *status)
                    .for_each(|s| println!("  {} ({}%)", s.name(), s.progress()));
            }
        }
    }

    Ok(())
}

fn print_student(repo: &Repository, student: &Student) {
    let internship = student
        .internship_id()
        .and_then(|id| repo.internship(id))
        .map(|i| i.title().clone())
        .unwrap_or_default();
    let mentor = student
        .mentor_id()
        .and_then(|id| repo.mentor(id))
        .map_or_else(|| "-".to_string(), |m| m.name().clone());

    println!(
        "{} {} [{} {}] {}% {} | mentor: {} | {}",
        student.id().dimmed(),
        student.name().bold(),
        student.batch(),
        student.department(),
        student.progress(),
        internship,
        mentor,
        student.mentorship_status()
    );
}
