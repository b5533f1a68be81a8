//! Result type alias for Meridian
//!
//! This module provides a convenient Result type alias that uses
//! MeridianError as the error type.

use super::errors::MeridianError;

/// Result type alias for Meridian operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use meridian::domain::result::Result;
/// use meridian::domain::errors::{DomainError, MeridianError};
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DomainError::Validation("reason is required".to_string()).into())
/// }
/// ```
pub type Result<T> = std::result::Result<T, MeridianError>;
