use clap::Args;
use colored::Colorize;
use prashikshan_lib::{Repository, Result};

#[derive(Args, Debug, Clone)]
pub struct Command {
    /// Name recorded as the approver of credit grants
    #[arg(long)]
    approver: Option<String>,
    /// Progress added to a student for each approved logbook entry
    #[arg(long)]
    progress_step: Option<u8>,
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<()> {
    let cfg = repo.config();

    if cmd.approver.is_some() || cmd.progress_step.is_some() {
        let mut cfg = cfg.write();
        if let Some(approver) = &cmd.approver {
            cfg.approver = approver.clone();
        }
        if let Some(step) = cmd.progress_step {
            cfg.progress_step = step;
        }
        cfg.save()?;
    }

    let cfg = cfg.read();
    let policy = cfg.credit_policy;
    println!("{:<16}{}", "Approver", cfg.approver.bold());
    println!("{:<16}{}", "Progress step", cfg.progress_step.to_string().bold());
    println!(
        "{:<16}{} days per credit, {} to {}",
        "Credit policy", policy.days_per_credit, policy.min_credits, policy.max_credits
    );

    Ok(())
}
