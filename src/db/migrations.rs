//! Database schema migration management and versioning.
//!
//! Every connection opened through [`Db`](super::db::Db) runs the pending
//! migrations first, so repositories can assume the full schema exists.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use carlog::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("carlog.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table with one row per applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Service categories and their service types seeded by migration 2.
///
/// An interval of 0 marks a service done "as needed"; such types never
/// produce due notifications.
const SEED_SERVICE_CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Engine",
        &[
            ("Engine oil change", 10_000),
            ("Oil filter replacement", 10_000),
            ("Air filter replacement", 20_000),
            ("Spark plugs replacement", 30_000),
            ("Coolant replacement", 60_000),
            ("Timing belt replacement", 60_000),
        ],
    ),
    ("Transmission", &[("Gearbox oil change", 60_000), ("Clutch replacement", 0)]),
    ("Brakes", &[("Brake pads replacement", 30_000), ("Brake fluid replacement", 40_000)]),
    ("Suspension", &[("Wheel alignment", 15_000), ("Shock absorbers inspection", 50_000)]),
    ("Electrics", &[("Battery replacement", 0)]),
    ("Body and interior", &[("Cabin filter replacement", 15_000), ("Seasonal tyre change", 0)]),
];

const SEED_FUELS: &[(&str, &str)] = &[
    ("Petrol", "AI-92"),
    ("Petrol", "AI-95"),
    ("Petrol", "AI-98"),
    ("Diesel", "DT"),
    ("Autogas", "LPG"),
];

/// A single versioned schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, applied in version order.
///
/// Intended for single-threaded use while a connection is being opened.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: record store tables and lookup indices
        self.add_migration(1, "create_vehicle_tables", |tx| {
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    user_id INTEGER PRIMARY KEY,
                    full_name TEXT NOT NULL,
                    username TEXT NOT NULL UNIQUE,
                    password TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                );
                CREATE TABLE IF NOT EXISTS car_brands (
                    brand_id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE
                );
                CREATE TABLE IF NOT EXISTS car_models (
                    model_id INTEGER PRIMARY KEY,
                    brand_id INTEGER NOT NULL REFERENCES car_brands(brand_id) ON DELETE CASCADE,
                    name TEXT NOT NULL,
                    UNIQUE (brand_id, name)
                );
                CREATE TABLE IF NOT EXISTS cars (
                    car_id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
                    model_id INTEGER REFERENCES car_models(model_id) ON DELETE SET NULL,
                    mileage INTEGER,
                    photo BLOB
                );
                CREATE TABLE IF NOT EXISTS fuels (
                    fuel_id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    marking TEXT
                );
                CREATE TABLE IF NOT EXISTS gas_stations (
                    station_id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    address TEXT
                );
                CREATE TABLE IF NOT EXISTS service_categories (
                    category_id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE
                );
                CREATE TABLE IF NOT EXISTS service_types (
                    service_type_id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    category_id INTEGER REFERENCES service_categories(category_id) ON DELETE SET NULL,
                    interval_km INTEGER NOT NULL DEFAULT 0
                );
                CREATE TABLE IF NOT EXISTS refuelings (
                    refueling_id INTEGER PRIMARY KEY,
                    car_id INTEGER NOT NULL REFERENCES cars(car_id),
                    fuel_id INTEGER REFERENCES fuels(fuel_id) ON DELETE SET NULL,
                    station_id INTEGER REFERENCES gas_stations(station_id) ON DELETE SET NULL,
                    date DATE NOT NULL,
                    mileage INTEGER NOT NULL,
                    volume REAL NOT NULL,
                    price_per_liter REAL NOT NULL,
                    total_amount REAL NOT NULL,
                    full_tank BOOLEAN NOT NULL DEFAULT FALSE
                );
                CREATE TABLE IF NOT EXISTS maintenance (
                    maintenance_id INTEGER PRIMARY KEY,
                    car_id INTEGER NOT NULL REFERENCES cars(car_id),
                    service_type_id INTEGER NOT NULL REFERENCES service_types(service_type_id),
                    date DATE NOT NULL,
                    mileage INTEGER NOT NULL,
                    total_amount REAL NOT NULL DEFAULT 0,
                    description TEXT,
                    next_service_mileage INTEGER,
                    next_service_date DATE
                );
                CREATE INDEX IF NOT EXISTS idx_cars_user ON cars(user_id);
                CREATE INDEX IF NOT EXISTS idx_refuelings_car_date ON refuelings(car_id, date);
                CREATE INDEX IF NOT EXISTS idx_maintenance_car_date ON maintenance(car_id, date);
                CREATE INDEX IF NOT EXISTS idx_maintenance_car_type ON maintenance(car_id, service_type_id);",
            )?;
            Ok(())
        });

        // Version 2: default service catalog and fuel list
        self.add_migration(2, "seed_service_catalog", |tx| {
            for (category, services) in SEED_SERVICE_CATALOG {
                tx.execute("INSERT OR IGNORE INTO service_categories (name) VALUES (?1)", params![category])?;
                let category_id: i64 = tx.query_row(
                    "SELECT category_id FROM service_categories WHERE name = ?1",
                    params![category],
                    |row| row.get(0),
                )?;
                for (name, interval_km) in services.iter() {
                    tx.execute(
                        "INSERT INTO service_types (name, category_id, interval_km) VALUES (?1, ?2, ?3)",
                        params![name, category_id, interval_km],
                    )?;
                }
            }
            for (name, marking) in SEED_FUELS {
                tx.execute("INSERT INTO fuels (name, marking) VALUES (?1, ?2)", params![name, marking])?;
            }
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies all pending migrations inside one transaction.
    ///
    /// A failing migration aborts the whole run; the dropped transaction
    /// rolls back every change made by this call.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied version, or 0 for a fresh database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies every pending migration to `conn`.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Current schema version of `conn`.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

/// Whether `conn` is behind the latest registered migration.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
