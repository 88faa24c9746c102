//! Macros for printing messages to the user.
//!
//! In normal mode messages go to stdout (errors to stderr). When debug mode is
//! on they are emitted as `tracing` events instead, so they interleave with
//! the library's own log output.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either variable is set:
//! - **`CARLOG_DEBUG`**: application-specific switch
//! - **`RUST_LOG`**: standard filter for `tracing-subscriber`
//!
//! The check runs once per process.
//!
//! ```text
//!   msg_info!(..) ──▶ is_debug_mode()? ──yes──▶ tracing::info!
//!                                      └─no───▶ println!
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use carlog::{msg_error, msg_info, msg_success};
//! use carlog::libs::messages::Message;
//!
//! msg_success!(Message::ConfigSaved);
//! msg_info!(Message::NoCars, true);
//! msg_error!(Message::PasswordsDoNotMatch);
//! ```

use std::sync::OnceLock;

/// Environment variable that switches message output to `tracing`.
pub const DEBUG_ENV: &str = "CARLOG_DEBUG";

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var(DEBUG_ENV).is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a message as-is. Pass `true` as the second argument to surround it
/// with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Only shown in debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}

#[cfg(test)]
mod tests {
    use crate::libs::messages::Message;

    fn confirm(matches: bool) -> anyhow::Result<()> {
        if !matches {
            crate::msg_bail_anyhow!(Message::PasswordsDoNotMatch);
        }
        Ok(())
    }

    #[test]
    fn bail_carries_the_message_text() {
        assert!(confirm(true).is_ok());
        let err = confirm(false).unwrap_err();
        assert_eq!(err.to_string(), Message::PasswordsDoNotMatch.to_string());
    }
}
