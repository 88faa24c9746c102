//! User accounts.

use crate::libs::error::CarlogError;
use crate::libs::password::{check_password, hash_password};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SELECT_USER_BY_USERNAME: &str = "SELECT user_id, full_name, username, password FROM users WHERE username = ?1";

const INSERT_USER: &str = "INSERT INTO users (full_name, username, password) VALUES (?1, ?2, ?3)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
}

pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Users { conn }
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(SELECT_USER_BY_USERNAME, params![username], |row| {
                Ok(User {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    username: row.get(2)?,
                    password_hash: row.get(3)?,
                })
            })
            .optional()?;
        Ok(user)
    }

    /// Creates an account. Usernames are unique.
    pub fn register(&self, full_name: &str, username: &str, password: &str) -> Result<User> {
        let (full_name, username) = (full_name.trim(), username.trim());
        if full_name.is_empty() || username.is_empty() || password.is_empty() {
            return Err(CarlogError::InvalidInput("name, username and password are required".to_string()).into());
        }
        if self.find_by_username(username)?.is_some() {
            return Err(CarlogError::UsernameTaken(username.to_string()).into());
        }

        let password_hash = hash_password(password);
        self.conn.execute(INSERT_USER, params![full_name, username, password_hash])?;
        let id = self.conn.last_insert_rowid();
        debug!(user_id = id, "user registered");

        Ok(User {
            id,
            full_name: full_name.to_string(),
            username: username.to_string(),
            password_hash,
        })
    }

    /// Checks the credentials. Unknown users and wrong passwords fail alike.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        match self.find_by_username(username.trim())? {
            Some(user) if check_password(password, &user.password_hash) => Ok(user),
            _ => Err(CarlogError::InvalidCredentials.into()),
        }
    }
}
