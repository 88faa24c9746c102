use super::cars::Cars;
use super::catalog::Catalog;
use super::maintenance::MaintenanceLog;
use super::migrations::init_with_migrations;
use super::refuelings::Refuelings;
use super::statistics::Statistics;
use super::users::Users;
use crate::libs::config::Config;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// A single connection to the record store.
///
/// Each data-access operation opens its own `Db` and drops it when done;
/// there is no pooling.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database and applies pending migrations.
    pub fn new() -> Result<Db> {
        let path = Config::read()?.database_path()?;
        Self::open(&path)
    }

    /// Opens the database at `path` and applies pending migrations.
    pub fn open(path: &Path) -> Result<Db> {
        let mut conn = Self::connect(path)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens the configured database without touching the schema.
    pub fn new_without_migrations() -> Result<Connection> {
        let path = Config::read()?.database_path()?;
        Self::connect(&path)
    }

    pub fn open_without_migrations(path: &Path) -> Result<Connection> {
        Self::connect(path)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(&self.conn)
    }

    pub fn cars(&self) -> Cars<'_> {
        Cars::new(&self.conn)
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.conn)
    }

    pub fn refuelings(&self) -> Refuelings<'_> {
        Refuelings::new(&self.conn)
    }

    pub fn maintenance(&self) -> MaintenanceLog<'_> {
        MaintenanceLog::new(&self.conn)
    }

    pub fn statistics(&self) -> Statistics<'_> {
        Statistics::new(&self.conn)
    }

    fn connect(path: &Path) -> Result<Connection> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}
