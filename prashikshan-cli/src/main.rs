use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use prashikshan_lib::{Error, Repository, Result};
use sysexits::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod config;
mod credit;
mod logbook;
mod mentor;
mod notification;
mod student;

#[derive(Parser, Debug)]
#[command(name = "prashikshan")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log what the store is doing
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Populate missing collections with demo data
    Seed,
    /// Show the faculty dashboard numbers
    Stats,
    /// Show or change the configuration
    Config(config::Command),
    /// Operate on students
    #[command(subcommand)]
    Student(student::Command),
    /// Review logbook entries
    #[command(subcommand)]
    Logbook(logbook::Command),
    /// Assign mentors
    #[command(subcommand)]
    Mentor(mentor::Command),
    /// Map and export credits
    #[command(subcommand)]
    Credit(credit::Command),
    /// Read the activity feed
    #[command(subcommand)]
    Notification(notification::Command),
}

fn main() -> process::ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::Ok.into(),
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            exit_code(&err).into()
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut repo = Repository::new()?;
    debug!("Running {:?}", cli.command);

    match &cli.command {
        Command::Seed => {
            let seeded = repo.seed()?;
            if seeded == 0 {
                println!("Nothing to seed, every collection already exists");
            } else {
                println!("Seeded {seeded} collections");
            }
            Ok(())
        }
        Command::Stats => {
            print_stats(&repo);
            Ok(())
        }
        Command::Config(cmd) => config::handle(&repo, cmd),
        Command::Student(cmd) => student::handle(&mut repo, cmd),
        Command::Logbook(cmd) => logbook::handle(&mut repo, cmd),
        Command::Mentor(cmd) => mentor::handle(&mut repo, cmd),
        Command::Credit(cmd) => credit::handle(&mut repo, cmd),
        Command::Notification(cmd) => notification::handle(&mut repo, cmd),
    }
}

fn print_stats(repo: &Repository) {
    let stats = repo.stats();
    let rows = [
        ("Pending approvals", stats.pending_approvals.to_string()),
        ("Active internships", stats.active_internships.to_string()),
        ("Students needing a mentor", stats.students_needing_mentor.to_string()),
        ("Ongoing mentorships", stats.ongoing_mentorships.to_string()),
        ("Completed reports", stats.completed_reports.to_string()),
        ("Mentor slots available", stats.mentor_slots_available.to_string()),
        ("Unread notifications", repo.unread_notifications().to_string()),
    ];

    for (label, value) in rows {
        println!("{:<28}{}", label, value.bold());
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::Store(_) | Error::Export { .. } => ExitCode::IoErr,
        Error::Config(_) => ExitCode::Config,
        Error::UnknownLogbookEntry(_) | Error::UnknownStudent(_) | Error::UnknownInternship(_) => {
            ExitCode::NoInput
        }
        Error::InvalidGrant(_) => ExitCode::DataErr,
    }
}
