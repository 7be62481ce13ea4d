//! Error types for the SQL sandbox.
//!
//! Defines the main error enum used throughout the crate and the single place
//! where driver errors are mapped onto it.

use thiserror::Error;

/// Main error type for sandbox operations.
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Caller supplied unusable input (empty SQL, missing required fields).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The database rejected the statement (syntax errors, constraint
    /// violations, type mismatches).
    #[error("Execution error: {0}")]
    Execution(String),

    /// Could not obtain a connection, or lost it mid-operation.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration errors (invalid config file, bad paths, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal or filesystem I/O failures outside the database.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SandboxError {
    /// Creates an invalid-input error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid Input",
            Self::Execution(_) => "Execution Error",
            Self::Connection(_) => "Connection Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the bare message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m)
            | Self::Execution(m)
            | Self::Connection(m)
            | Self::Config(m)
            | Self::Io(m)
            | Self::Internal(m) => m,
        }
    }
}

impl From<sqlx::Error> for SandboxError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(db_error) => Self::Execution(db_error.message().to_string()),
            sqlx::Error::ColumnDecode { index, source } => {
                Self::Execution(format!("failed to decode column {index}: {source}"))
            }
            sqlx::Error::ColumnNotFound(name) => {
                Self::Execution(format!("column not found: {name}"))
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => Self::Execution(format!(
                "column index {index} out of bounds (row has {len} columns)"
            )),
            sqlx::Error::Decode(source) => Self::Execution(format!("decode error: {source}")),
            sqlx::Error::TypeNotFound { type_name } => {
                Self::Execution(format!("type not found: {type_name}"))
            }
            sqlx::Error::RowNotFound => Self::Execution("no rows returned".to_string()),
            sqlx::Error::Configuration(source) => Self::Config(source.to_string()),
            other => Self::Connection(other.to_string()),
        }
    }
}

impl From<std::io::Error> for SandboxError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

/// Result type alias using SandboxError.
pub type Result<T> = std::result::Result<T, SandboxError>;
