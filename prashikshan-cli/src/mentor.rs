use clap::Subcommand;
use colored::Colorize;
use prashikshan_lib::{Repository, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List mentors and their remaining capacity
    List,
    /// Assign a mentor to a student
    Assign {
        student_id: String,
        mentor_id: String,
    },
    /// Assign the first student without a mentor
    AssignNext { mentor_id: String },
}

pub fn handle(repo: &mut Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for mentor in repo.mentors() {
                println!(
                    "{} {} ({}) {} slots left",
                    mentor.id().dimmed(),
                    mentor.name().bold(),
                    mentor.department(),
                    mentor.capacity_left()
                );
            }
            println!(
                "Mentor load: {} total slots available",
                repo.mentor_slots_available()
            );
        }
        Command::Assign {
            student_id,
            mentor_id,
        } => match repo.assign_mentor(student_id, mentor_id)? {
            Some(mentor) => println!(
                "Assigned {}. {} slots left",
                mentor.name(),
                mentor.capacity_left()
            ),
            None => println!("{}", "Mentor has no capacity left.".yellow()),
        },
        Command::AssignNext { mentor_id } => match repo.assign_next_student(mentor_id)? {
            Some(assignment) => println!(
                "Assigned {} to {}. {} slots left",
                assignment.mentor.name(),
                assignment.student.name(),
                assignment.mentor.capacity_left()
            ),
            None => println!(
                "{}",
                "No unassigned student, or the mentor has no capacity left.".yellow()
            ),
        },
    }

    Ok(())
}
