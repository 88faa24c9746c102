//! Maintenance notifications.
//!
//! `show` prints one board per car: urgent work, recommendations and either
//! an "all clear" or nothing. `read` stores read flags in the session.

use crate::{
    db::db::Db,
    libs::{
        config::Config,
        messages::Message,
        notification::{NotificationBoard, NotificationService},
        session::Session,
        view::View,
        worker,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct NotifyArgs {
    #[command(subcommand)]
    command: Option<NotifyCommand>,
}

#[derive(Debug, Subcommand)]
enum NotifyCommand {
    /// Show notifications (default)
    Show {
        /// Only unread notifications
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark notifications as read
    Read {
        /// Notification ids as shown by `carlog notify`
        ids: Vec<i64>,
        /// Mark every current notification as read
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
}

pub async fn cmd(args: NotifyArgs) -> Result<()> {
    let mut session = Session::read()?;
    let boards = collect(&session).await?;

    match args.command.unwrap_or(NotifyCommand::Show { unread: false }) {
        NotifyCommand::Show { unread } => {
            if boards.is_empty() {
                msg_info!(Message::NoCars);
                return Ok(());
            }
            for board in &boards {
                show_board(board, unread)?;
            }
            let unread_total: usize = boards.iter().map(NotificationBoard::unread_count).sum();
            msg_info!(Message::UnreadNotifications(unread_total), true);
            Ok(())
        }
        NotifyCommand::Read { ids, all } => {
            let known: Vec<i64> = boards.iter().flat_map(|board| board.all().map(|n| n.id)).collect();
            let targets = if all { known.clone() } else { ids };

            let mut marked = 0;
            for id in targets {
                if known.contains(&id) {
                    session.mark_notification_read(id);
                    marked += 1;
                    if !all {
                        msg_success!(Message::NotificationMarkedRead(id));
                    }
                } else {
                    msg_info!(Message::NotificationNotFound(id));
                }
            }
            session.save()?;
            if all {
                msg_success!(Message::AllNotificationsMarkedRead(marked));
            }
            Ok(())
        }
    }
}

async fn collect(session: &Session) -> Result<Vec<NotificationBoard>> {
    let service = NotificationService::from_config(&Config::read()?);
    let session = session.clone();
    let today = Local::now().date_naive();
    worker::run(move || service.collect(&Db::new()?, &session, today)).await
}

fn show_board(board: &NotificationBoard, unread_only: bool) -> Result<()> {
    msg_print!(Message::NotificationsHeader(board.car_name.clone(), board.mileage), true);

    let tiers = [
        (Message::UrgentTierHeader, &board.urgent),
        (Message::RecommendationTierHeader, &board.recommendation),
        (Message::InfoTierHeader, &board.informational),
        (Message::RemindersHeader, &board.reminders),
    ];
    for (header, notifications) in tiers {
        let shown: Vec<_> = notifications
            .iter()
            .filter(|notification| !unread_only || !notification.is_read)
            .cloned()
            .collect();
        if shown.is_empty() {
            continue;
        }
        msg_print!(header);
        View::notifications(&shown)?;
    }
    Ok(())
}
