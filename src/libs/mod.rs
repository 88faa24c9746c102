//! Core library modules for the carlog application.
//!
//! ## Features
//!
//! - **Core Infrastructure**: configuration, data storage, session, messaging
//! - **Maintenance Logic**: due evaluation, notification tiering, forecasting
//! - **Reporting**: expense statistics and table rendering
//! - **Execution**: background worker for blocking database calls
//!
//! ## Usage
//!
//! ```rust
//! use carlog::libs::due::{evaluate, DuePolicy, ServiceSchedule};
//!
//! let schedules = [ServiceSchedule::new(1, "Engine oil change", 10_000, 0)];
//! let items = evaluate(1, 9_800, &schedules, &DuePolicy::default());
//! assert_eq!(items.len(), 1);
//! ```

pub mod config;
pub mod data_storage;
pub mod due;
pub mod error;
pub mod forecast;
pub mod formatter;
pub mod messages;
pub mod notification;
pub mod password;
pub mod session;
pub mod statistics;
pub mod view;
pub mod worker;
