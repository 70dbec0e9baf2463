use std::path::PathBuf;

use thiserror::Error;

/// A statement against the backing store failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Password hashing error: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

impl From<argon2::password_hash::Error> for StoreError {
    fn from(err: argon2::password_hash::Error) -> Self {
        StoreError::PasswordHash(err)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("could not read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fatal conditions before the menus come up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not start the database runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("could not connect to the database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("could not apply database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// The only ways a prompt can fail; invalid input is always re-prompted.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input stream closed")]
    InputClosed,
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Operator-facing text for a failed store call.
pub fn store_error_message(err: &StoreError) -> String {
    match err {
        StoreError::Database(sqlx::Error::Database(db_err)) => {
            if db_err.is_unique_violation() {
                "a record with the same key already exists".to_string()
            } else if db_err.is_foreign_key_violation() {
                "the record is still referenced by other records".to_string()
            } else if db_err.is_check_violation() {
                "a value is outside the allowed range".to_string()
            } else {
                db_err.message().to_string()
            }
        }
        StoreError::Database(sqlx::Error::Io(_)) | StoreError::Database(sqlx::Error::PoolClosed) => {
            "the database connection was lost".to_string()
        }
        StoreError::Database(other) => format!("database error: {}", other),
        StoreError::PasswordHash(_) => "password processing failed".to_string(),
    }
}
