//! Application error types and error handling utilities
//!
//! This module defines the error system for the leaderboard engine. Every
//! fallible operation in the crate returns [`AppResult`]. [`AppError::severity`]
//! decides what an error costs a read: import problems fall back to
//! referral-count mode, segment problems drop one segment, anything critical
//! fails the whole read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application error type that encompasses all possible errors
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// The imported payload could not be read or parsed
    #[error("Import error: {message}")]
    Import {
        /// Human readable description
        message: String,
        /// Location of the payload, if it came from a file
        path: Option<String>,
    },

    /// The participant registry could not be read
    #[error("Registry error: {message}")]
    Registry {
        /// Human readable description
        message: String,
    },

    /// One per-dex segment could not be computed
    #[error("Segment error: {segment} - {message}")]
    Segment {
        /// Segment (venue) name
        segment: String,
        /// Human readable description
        message: String,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
    },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal {
        /// Human readable description
        message: String,
    },
}

/// How much of a leaderboard read an error costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Noted; the read is unaffected
    Low,
    /// The read succeeds with reduced detail or through a degraded path
    Medium,
    /// The read fails
    Critical,
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new import error
    pub fn import<S: Into<String>>(message: S) -> Self {
        Self::Import {
            message: message.into(),
            path: None,
        }
    }

    /// Create a new registry error
    pub fn registry<S: Into<String>>(message: S) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a new segment error
    pub fn segment<S: Into<String>, M: Into<String>>(segment: S, message: M) -> Self {
        Self::Segment {
            segment: segment.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Attach the file path an import error refers to
    #[must_use]
    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        if let Self::Import { path: p, .. } = &mut self {
            *p = Some(path.into());
        }
        self
    }

    /// Get the error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation { .. } => ErrorSeverity::Low,
            Self::Import { .. } | Self::Segment { .. } => ErrorSeverity::Medium,
            Self::Config { .. } | Self::Registry { .. } | Self::Internal { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether the leaderboard read can continue after this error
    pub fn is_recoverable(&self) -> bool {
        self.severity() != ErrorSeverity::Critical
    }

    /// Emit this error at the level its severity calls for
    pub fn log(&self, context: &str) {
        match self.severity() {
            ErrorSeverity::Low => tracing::debug!("{}: {}", context, self),
            ErrorSeverity::Medium => tracing::warn!("⚠️  {}: {}", context, self),
            ErrorSeverity::Critical => tracing::error!("❌ {}: {}", context, self),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("JSON serialization error: {err}"))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {err}"))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(format!("IO error: {err}"))
    }
}

/// Result type alias for the application
pub type AppResult<T> = std::result::Result<T, AppError>;
