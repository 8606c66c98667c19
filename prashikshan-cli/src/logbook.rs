use chrono::{Local, NaiveDate};
use clap::Subcommand;
use colored::Colorize;
use prashikshan_lib::{
    Error, Repository, Result,
    repository::{LogStatus, LogbookEntry, NewLogbookEntry},
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every logbook entry
    List,
    /// List entries waiting for review
    Pending,
    /// Submit a logbook entry on behalf of a student
    Submit {
        student_id: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        company: String,
        #[arg(long)]
        hours: f64,
        #[arg(long)]
        description: String,
        /// May be given more than once
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    /// Approve a pending entry
    Approve { id: String },
    /// Reject a pending entry and ask for changes
    Reject {
        id: String,
        #[arg(short, long, default_value = "")]
        feedback: String,
    },
    /// Approve several entries, or every pending entry if none are given
    BulkApprove { ids: Vec<String> },
}

pub fn handle(repo: &mut Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => repo.logbook_entries().iter().for_each(print_entry),
        Command::Pending => repo.pending_logbook_entries().iter().for_each(print_entry),
        Command::Submit {
            student_id,
            date,
            company,
            hours,
            description,
            skills,
        } => {
            let student = repo
                .student(student_id)
                .ok_or_else(|| Error::UnknownStudent(student_id.clone()))?;
            let entry = repo.submit_logbook_entry(NewLogbookEntry {
                student_id: student.id().clone(),
                student_name: student.name().clone(),
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                company: company.clone(),
                hours_worked: *hours,
                description: description.clone(),
                skills: skills.clone(),
            })?;
            println!("Submitted {}", entry.id());
        }
        Command::Approve { id } => print_entry(&repo.approve_logbook(id)?),
        Command::Reject { id, feedback } => print_entry(&repo.reject_logbook(id, feedback)?),
        Command::BulkApprove { ids } => {
            let ids = if ids.is_empty() {
                repo.pending_logbook_entries()
                    .iter()
                    .map(|e| e.id().clone())
                    .collect()
            } else {
                ids.clone()
            };
            let approved = repo.bulk_approve_logbook(&ids)?;
            println!("Approved {} entries", approved.len());
        }
    }

    Ok(())
}

fn print_entry(entry: &LogbookEntry) {
    let status = match entry.status() {
        LogStatus::Pending => entry.status().to_string().yellow(),
        LogStatus::Approved => entry.status().to_string().green(),
        LogStatus::Rejected => entry.status().to_string().red(),
    };

    println!(
        "{} {} {} @ {} {}h [{}]",
        entry.id().dimmed(),
        entry.date(),
        entry.student_name().bold(),
        entry.company(),
        entry.hours_worked(),
        status
    );
    if !entry.skills().is_empty() {
        println!("  skills: {}", entry.skills().join(", "));
    }
}
