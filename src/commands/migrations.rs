//! Schema inspection, available in debug builds only.

#[cfg(debug_assertions)]
use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{messages::Message, worker},
    msg_info, msg_print,
};
#[cfg(debug_assertions)]
use anyhow::Result;
#[cfg(debug_assertions)]
use clap::{Args, Subcommand};

#[cfg(debug_assertions)]
#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[cfg(debug_assertions)]
#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Current schema version and whether migrations are pending
    Status,
    /// Applied migrations, oldest first
    History,
    /// Apply pending migrations
    Apply,
}

#[cfg(debug_assertions)]
pub async fn cmd(args: MigrationsArgs) -> Result<()> {
    match args.command {
        MigrationsCommand::Status => {
            let (version, pending) = worker::run(|| {
                let conn = Db::new_without_migrations()?;
                Ok((get_db_version(&conn)?, needs_migration(&conn)?))
            })
            .await?;

            msg_print!(Message::DatabaseVersion(version));
            if pending {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = worker::run(|| MigrationManager::new().get_migration_history(&Db::new_without_migrations()?)).await?;

            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in history {
                println!("  v{}: {} (applied: {})", version, name, applied_at);
            }
        }
        MigrationsCommand::Apply => {
            let version = worker::run(|| {
                let db = Db::new()?;
                get_db_version(&db.conn)
            })
            .await?;
            msg_print!(Message::DatabaseVersion(version));
        }
    }

    Ok(())
}
