//! Persistent session state.
//!
//! The session replaces process-wide preferences: it is read once per command,
//! passed explicitly to the operations that need it and written back when it
//! changes. It records the logged-in user, the selected car and the
//! notifications the user has marked as read.
//!
//! ```rust,no_run
//! use carlog::libs::session::Session;
//!
//! let mut session = Session::read()?;
//! let user_id = session.require_user()?;
//! session.mark_notification_read(4999);
//! session.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::error::CarlogError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

pub const SESSION_FILE_NAME: &str = "session.json";

const READ_KEY_PREFIX: &str = "notification_";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub current_car_id: Option<i64>,
    #[serde(default)]
    pub current_car_name: Option<String>,
    /// Read flags keyed `notification_<id>`.
    #[serde(default)]
    pub read: BTreeMap<String, bool>,
}

impl Session {
    pub fn read() -> Result<Session> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        Self::read_from(&path)
    }

    /// A missing file is an empty, logged-out session.
    pub fn read_from(path: &Path) -> Result<Session> {
        if !path.exists() {
            return Ok(Session::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, self)?;
        Ok(())
    }

    /// Removes the session file. Logging out forgets read flags as well.
    pub fn clear() -> Result<()> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        Self::clear_at(&path)
    }

    pub fn clear_at(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Replaces the session with a freshly logged-in user.
    pub fn login(user_id: i64, user_name: &str, username: &str) -> Self {
        Session {
            user_id: Some(user_id),
            user_name: Some(user_name.to_string()),
            username: Some(username.to_string()),
            logged_in: true,
            ..Default::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in && self.user_id.is_some()
    }

    pub fn require_user(&self) -> Result<i64> {
        match self.user_id {
            Some(user_id) if self.logged_in => Ok(user_id),
            _ => Err(CarlogError::NotLoggedIn.into()),
        }
    }

    pub fn require_car(&self) -> Result<i64> {
        self.current_car_id.ok_or_else(|| CarlogError::NoCarSelected.into())
    }

    pub fn select_car(&mut self, car_id: i64, car_name: &str) {
        self.current_car_id = Some(car_id);
        self.current_car_name = Some(car_name.to_string());
    }

    pub fn unselect_car(&mut self) {
        self.current_car_id = None;
        self.current_car_name = None;
    }

    pub fn mark_notification_read(&mut self, id: i64) {
        self.read.insert(format!("{}{}", READ_KEY_PREFIX, id), true);
    }

    pub fn is_notification_read(&self, id: i64) -> bool {
        self.read.get(&format!("{}{}", READ_KEY_PREFIX, id)).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_session_rejects_user_operations() {
        let session = Session::default();
        let err = session.require_user().unwrap_err();
        assert_eq!(err.downcast_ref::<CarlogError>(), Some(&CarlogError::NotLoggedIn));
    }

    #[test]
    fn login_resets_selection_and_flags() {
        let mut session = Session::login(1, "Ivan Petrov", "ivan");
        session.select_car(3, "Lada Vesta");
        session.mark_notification_read(3999);

        let fresh = Session::login(2, "Anna", "anna");
        assert_eq!(fresh.require_user().unwrap(), 2);
        assert!(fresh.current_car_id.is_none());
        assert!(!fresh.is_notification_read(3999));
        assert!(session.is_notification_read(3999));
    }

    #[test]
    fn read_flags_use_prefixed_keys() {
        let mut session = Session::default();
        session.mark_notification_read(42);
        assert_eq!(session.read.get("notification_42"), Some(&true));
    }
}
