//! # Notices
//!
//! Transient one-line messages written to stderr, so table output on
//! stdout stays clean for piping.

use std::fmt;

use storefront_client::RequestError;
use storefront_core::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Info,
            message: message.into(),
        }
    }

    /// A failed request, with the slice message and a retry hint.
    pub fn request_failed(err: &RequestError) -> Self {
        Notice::error(format!("{}. Please try again.", err.message().trim_end_matches('.')))
    }

    pub fn invalid(err: &ValidationError) -> Self {
        Notice::error(err.to_string())
    }

    pub fn emit(&self) {
        eprintln!("{self}");
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            Level::Success => "ok",
            Level::Error => "error",
            Level::Info => "info",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_adds_retry_hint() {
        let err = RequestError::Status {
            status: 500,
            message: "Failed to fetch cart".to_string(),
        };
        let notice = Notice::request_failed(&err);
        assert_eq!(notice.level, Level::Error);
        assert_eq!(notice.to_string(), "[error] Failed to fetch cart. Please try again.");
    }

    #[test]
    fn test_validation_notice() {
        let err = ValidationError::Required {
            field: "size".to_string(),
        };
        assert_eq!(Notice::invalid(&err).to_string(), "[error] size is required");
    }

    #[test]
    fn test_success_display() {
        assert_eq!(Notice::success("Added to cart").to_string(), "[ok] Added to cart");
    }
}
