use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;
use prashikshan_lib::{Repository, Result, repository::CreditGrant};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the credit history
    List,
    /// Suggest credits for an internship based on its duration
    Suggest { internship_id: String },
    /// Grant credits for a completed internship
    Add {
        student_id: String,
        internship_id: String,
        /// Defaults to the suggestion for the internship
        #[arg(short, long)]
        credits: Option<f64>,
        /// Defaults to the configured approver
        #[arg(long)]
        approved_by: Option<String>,
    },
    /// Export the credit history as credit-history.csv
    Export {
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

pub fn handle(repo: &mut Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            let students = repo.students();
            let internships = repo.internships();
            for record in repo.credits() {
                let student = students
                    .iter()
                    .find(|s| s.id() == record.student_id())
                    .map_or(record.student_id(), |s| s.name());
                let internship = internships
                    .iter()
                    .find(|i| i.id() == record.internship_id())
                    .map_or(record.internship_id(), |i| i.title());
                println!(
                    "{} {} | {} | {} credits | {} | {}",
                    record.id().dimmed(),
                    student.bold(),
                    internship,
                    record.credits(),
                    record.approved_by(),
                    record.date()
                );
            }
        }
        Command::Suggest { internship_id } => {
            println!("{}", repo.suggest_credits(internship_id)?);
        }
        Command::Add {
            student_id,
            internship_id,
            credits,
            approved_by,
        } => {
            let record = match approved_by {
                Some(approved_by) => {
                    let credits = match credits {
                        Some(credits) => *credits,
                        None => f64::from(repo.suggest_credits(internship_id)?),
                    };
                    repo.add_credit(CreditGrant {
                        student_id: student_id.clone(),
                        internship_id: internship_id.clone(),
                        credits,
                        approved_by: approved_by.clone(),
                    })?
                }
                None => repo.grant_credits(student_id, internship_id, *credits)?,
            };
            println!(
                "Saved {} credits for {}",
                record.credits(),
                repo.student(student_id)
                    .map_or_else(|| "student".to_string(), |s| s.name().clone())
            );
        }
        Command::Export { out, stdout } => {
            if *stdout {
                print!("{}", repo.export_credits_csv());
            } else {
                let path = repo.write_credits_csv(out)?;
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
