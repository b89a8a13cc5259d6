//! # Input Validation Module
//!
//! This module stands between caller-supplied strings and the shell-interpreted
//! command lines built by the handlers.
//!
//! ## Validation Functions
//!
//! - **Target Validation**: rejects empty targets and shell metacharacters
//! - **URL Normalization**: prepends the default scheme to web targets
//!
//! ## Known Weakness
//!
//! The check is a denylist of `; & | ` $ ( ) < >`. It does not cover
//! whitespace-based argument splitting, glob characters, quotes, newlines or
//! encoding tricks. It is kept as the compatibility minimum; passing an
//! argument vector straight to the process spawner would be the hardened
//! alternative.
//!
//! ## Example
//!
//! ```rust
//! use security_mcp::validation::{validate_target, ValidationError};
//!
//! assert_eq!(validate_target(" example.com"), Ok(" example.com"));
//! assert_eq!(validate_target("   "), Err(ValidationError::EmptyTarget));
//! assert_eq!(
//!     validate_target("a|b;c"),
//!     Err(ValidationError::UnsafeCharacter('|'))
//! );
//! ```

use crate::constants;

/// Why a caller-supplied value was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Target cannot be empty")]
    EmptyTarget,

    #[error("Invalid character '{0}' in target")]
    UnsafeCharacter(char),
}

/// Left-most denylisted character in `value`, if any
pub fn find_unsafe_character(value: &str) -> Option<char> {
    value
        .chars()
        .find(|c| constants::validation::UNSAFE_CHARACTERS.contains(c))
}

/// Validates a scan target, returning it untrimmed on success
pub fn validate_target(target: &str) -> Result<&str, ValidationError> {
    if target.trim().is_empty() {
        return Err(ValidationError::EmptyTarget);
    }

    if let Some(c) = find_unsafe_character(target) {
        return Err(ValidationError::UnsafeCharacter(c));
    }

    Ok(target)
}

/// Prepends `http://` unless the target already names http or https
pub fn normalize_url(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("{}{}", constants::DEFAULT_URL_SCHEME, target)
    }
}

/// Trimmed value, or `None` when nothing is left
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
