//! Record store for the carlog application.
//!
//! A single SQLite file holds users, the vehicle catalog, cars, refuelings and
//! maintenance records. [`db::Db`] opens a connection and brings the schema up
//! to date; the repositories borrow that connection for the duration of one
//! operation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use carlog::db::db::Db;
//!
//! let db = Db::new()?;
//! for car in db.cars().list_for_user(1)? {
//!     println!("{} at {} km", car.display_name, car.mileage);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Writes that touch the odometer
//!
//! Refueling and maintenance inserts raise the car's stored mileage in the
//! same transaction as the insert. The update only applies when the new value
//! is higher, so recording an older event never rolls the odometer back.

/// Connection setup and repository accessors.
pub mod db;

/// Versioned schema changes and the seeded catalog.
pub mod migrations;

pub mod cars;
pub mod catalog;
pub mod maintenance;
pub mod refuelings;
pub mod statistics;
pub mod users;
