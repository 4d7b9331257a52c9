//! # Settings Database
//!
//! sqlite-backed key/value settings and the API credential stored in them.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{Context, Result};
use log::{debug, info};
use sqlite::{Connection, State};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Settings key holding the chat-completions credential
pub const CREDENTIAL_KEY: &str = "ai_group_chat_api_key";

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the settings database at `path`. `":memory:"` is accepted.
    pub async fn new(path: &str) -> Result<Self> {
        let connection =
            sqlite::open(path).with_context(|| format!("Failed to open settings database at {path}"))?;

        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS settings (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
            )
            .context("Failed to create settings table")?;

        info!("Settings database ready at {path}");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let connection = self.lock();
        let mut statement = connection.prepare("SELECT value FROM settings WHERE key = ?")?;
        statement.bind((1, key))?;

        if let State::Row = statement.next()? {
            let value = statement.read::<String, _>(0)?;
            return Ok(Some(value));
        }
        Ok(None)
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        let connection = self.lock();
        let mut statement = connection.prepare(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        statement.bind((1, key))?;
        statement.bind((2, value))?;
        statement.bind((3, updated_at.as_str()))?;
        while statement.next()? != State::Done {}

        debug!("Stored setting '{key}'");
        Ok(())
    }

    pub async fn delete_setting(&self, key: &str) -> Result<()> {
        let connection = self.lock();
        let mut statement = connection.prepare("DELETE FROM settings WHERE key = ?")?;
        statement.bind((1, key))?;
        while statement.next()? != State::Done {}

        debug!("Removed setting '{key}'");
        Ok(())
    }
}

/// Persists the optional API credential. Absence means offline mode.
#[derive(Clone)]
pub struct CredentialStore {
    database: Database,
}

impl CredentialStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn load(&self) -> Result<Option<String>> {
        let value = self.database.get_setting(CREDENTIAL_KEY).await?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    /// Store the trimmed value, or remove the entry when it is blank.
    /// Returns the credential now in effect.
    pub async fn save(&self, value: &str) -> Result<Option<String>> {
        let value = value.trim();
        if value.is_empty() {
            self.database.delete_setting(CREDENTIAL_KEY).await?;
            info!("🔑 API credential cleared, offline mode active");
            Ok(None)
        } else {
            self.database.set_setting(CREDENTIAL_KEY, value).await?;
            info!("🔑 API credential saved");
            Ok(Some(value.to_string()))
        }
    }
}
