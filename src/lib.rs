//! # carlog - personal vehicle log
//!
//! A command-line logbook for your cars: refuelings, maintenance, expense
//! statistics and maintenance-due notifications.
//!
//! ## Features
//!
//! - **Vehicles**: several cars per user with brand, model, mileage and photo
//! - **Refuelings**: volume, price and station, with fuel consumption figures
//! - **Maintenance**: service history against a catalog of service intervals
//! - **Notifications**: overdue, urgent and upcoming services per car
//! - **Statistics**: expense totals, shares and a monthly breakdown
//!
//! ## Usage
//!
//! ```rust,no_run
//! use carlog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
