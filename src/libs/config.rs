//! Configuration management for the carlog application.
//!
//! Settings live in a JSON file in the platform data directory. Every section
//! is optional: a missing file or a missing section falls back to defaults, so
//! the application works without any setup.
//!
//! ## Configuration Structure
//!
//! - **Database**: location of the SQLite record store
//! - **Notifications**: due-distance thresholds and optional reminders
//! - **Forecast**: average yearly mileage used for next-service estimates
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use carlog::libs::config::Config;
//!
//! let config = Config::read()?;
//! let policy = config.due_policy();
//! println!("Urgent within {} km", policy.urgent_within_km);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::due::DuePolicy;
use super::error::CarlogError;
use super::forecast::DEFAULT_AVG_YEARLY_MILEAGE;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default database file name inside the data directory.
pub const DB_FILE_NAME: &str = "carlog.db";

/// Represents a configurable module shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Location of the record store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DatabaseConfig {
    /// Path of the SQLite file. Relative paths are resolved against the
    /// working directory; `None` means `<data dir>/carlog.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Notification settings.
///
/// The two distances bound the urgent and recommendation tiers. A service is
/// urgent while its remaining distance is at most `urgent_within_km` and a
/// recommendation while it is at most `recommend_within_km`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NotificationConfig {
    pub urgent_within_km: i64,
    pub recommend_within_km: i64,
    /// Adds the regular-check and seasonal reminders to the notification board.
    #[serde(default)]
    pub reminders: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        let policy = DuePolicy::default();
        NotificationConfig {
            urgent_within_km: policy.urgent_within_km,
            recommend_within_km: policy.recommend_within_km,
            reminders: false,
        }
    }
}

impl NotificationConfig {
    /// Thresholds must satisfy `0 <= urgent_within_km <= recommend_within_km`.
    pub fn validate(&self) -> Result<()> {
        if self.urgent_within_km < 0 {
            return Err(CarlogError::InvalidInput(format!(
                "notifications.urgent_within_km must not be negative, got {}",
                self.urgent_within_km
            ))
            .into());
        }
        if self.recommend_within_km < self.urgent_within_km {
            return Err(CarlogError::InvalidInput(format!(
                "notifications.recommend_within_km ({}) is below urgent_within_km ({})",
                self.recommend_within_km, self.urgent_within_km
            ))
            .into());
        }
        Ok(())
    }

    pub fn policy(&self) -> DuePolicy {
        DuePolicy {
            urgent_within_km: self.urgent_within_km,
            recommend_within_km: self.recommend_within_km,
        }
    }
}

/// Next-service estimation settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ForecastConfig {
    /// Average distance driven per year, in km.
    pub avg_yearly_mileage: i64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            avg_yearly_mileage: DEFAULT_AVG_YEARLY_MILEAGE,
        }
    }
}

/// Root configuration object.
///
/// Unconfigured sections are omitted from the JSON output to keep the file
/// short and readable.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastConfig>,
}

impl Config {
    /// Reads the configuration from the default data directory.
    ///
    /// A missing file is not an error: the default configuration is returned.
    /// A file that exists but cannot be parsed is reported as an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from an explicit file.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to the default data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    /// Saves the configuration as pretty-printed JSON to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file from the default data directory.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Rejects settings the notification tiers cannot work with.
    pub fn validate(&self) -> Result<()> {
        match &self.notifications {
            Some(notifications) => notifications.validate(),
            None => Ok(()),
        }
    }

    /// Resolves the database file, honouring `database.path`.
    pub fn database_path(&self) -> Result<PathBuf> {
        match self.database.as_ref().and_then(|db| db.path.as_ref()) {
            Some(path) => Ok(PathBuf::from(path)),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    pub fn due_policy(&self) -> DuePolicy {
        self.notifications.clone().unwrap_or_default().policy()
    }

    pub fn reminders_enabled(&self) -> bool {
        self.notifications.as_ref().map(|n| n.reminders).unwrap_or(false)
    }

    pub fn avg_yearly_mileage(&self) -> i64 {
        self.forecast.clone().unwrap_or_default().avg_yearly_mileage
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Starts from the current configuration, lets the user pick the modules
    /// to edit and pre-fills every prompt with the existing value.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ConfigModule {
                key: "notifications".to_string(),
                name: "Notifications".to_string(),
            },
            ConfigModule {
                key: "forecast".to_string(),
                name: "Forecast".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "database" => {
                    let default = config.database.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleDatabase);
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(default.path.unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.database = Some(DatabaseConfig {
                        path: if path.trim().is_empty() { None } else { Some(path.trim().to_string()) },
                    });
                }
                "notifications" => {
                    let default = config.notifications.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleNotifications);
                    config.notifications = Some(NotificationConfig {
                        urgent_within_km: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUrgentWithin.to_string())
                            .default(default.urgent_within_km)
                            .interact_text()?,
                        recommend_within_km: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRecommendWithin.to_string())
                            .default(default.recommend_within_km)
                            .interact_text()?,
                        reminders: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptEnableReminders.to_string())
                            .default(default.reminders)
                            .interact()?,
                    });
                }
                "forecast" => {
                    let default = config.forecast.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleForecast);
                    config.forecast = Some(ForecastConfig {
                        avg_yearly_mileage: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptAvgYearlyMileage.to_string())
                            .default(default.avg_yearly_mileage)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        config.validate()?;
        Ok(config)
    }
}
