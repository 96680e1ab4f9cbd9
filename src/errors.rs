use thiserror::Error;

/// Failure talking to the chat platform.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// Failure reading or writing recorded items.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),

    #[error("Messaging failure: {0}")]
    Messaging(#[from] MessagingError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
