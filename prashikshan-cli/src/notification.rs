use clap::Subcommand;
use colored::Colorize;
use prashikshan_lib::{Repository, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notifications, newest first
    List {
        /// Only show unread notifications
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read { id: String },
}

pub fn handle(repo: &mut Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List { unread } => {
            for notification in repo.notifications() {
                if *unread && notification.read() {
                    continue;
                }
                let marker = if notification.read() {
                    " ".normal()
                } else {
                    "*".cyan().bold()
                };
                println!(
                    "{marker} {} [{}] {} ({})",
                    notification.id().dimmed(),
                    notification.kind(),
                    notification.message(),
                    notification.created_at().format("%Y-%m-%d %H:%M")
                );
            }
        }
        Command::Read { id } => {
            if repo.mark_notification_read(id)?.is_none() {
                println!("{}", format!("No notification with id '{id}'").yellow());
            }
        }
    }

    Ok(())
}
