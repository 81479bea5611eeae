//! Result type definitions and utilities for the application
//!
//! This module provides the crate-wide result alias and an extension trait for
//! mapping foreign errors into [`AppError`] variants with context.

use crate::core::error::AppError;

/// Application result type alias
///
/// # Examples
///
/// ```rust
/// use ardra_leaderboard::core::result::AppResult;
/// use ardra_leaderboard::core::error::AppError;
///
/// fn example_function() -> AppResult<String> {
///     Ok("Success".to_string())
/// }
///
/// fn failing_function() -> AppResult<()> {
///     Err(AppError::validation("Invalid input"))
/// }
/// ```
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Extension trait for `Result` to provide additional utility methods
pub trait ResultExt<T> {
    /// Map an error to an import error, keeping the source path
    fn map_import_err<F>(self, path: Option<&str>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Map an error to a registry error
    fn map_registry_err<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn map_import_err<F>(self, path: Option<&str>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let error = AppError::import(format!("{}: {}", f(), e));
            match path {
                Some(p) => error.with_path(p),
                None => error,
            }
        })
    }

    fn map_registry_err<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::registry(format!("{}: {}", f(), e)))
    }
}
