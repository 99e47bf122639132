//! Error types for the configuration surface.
//!
//! The simulation step itself is infallible: every input reaching it is an
//! in-process value that the input layer has already validated.  The only
//! fallible path is turning `assets/game.toml` into a [`GameConfig`], which is
//! reported through [`SimError`].
//!
//! [`GameConfig`]: crate::config::GameConfig

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The tuning file exists but is not valid TOML for [`GameConfig`].
    ///
    /// [`GameConfig`]: crate::config::GameConfig
    ConfigParse {
        /// Path of the file that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A tuning value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A `(min, max)` pair has `min > max`.
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::InvalidRange { name, min, max } => {
                write!(f, "range '{}' is inverted: min {} > max {}", name, min, max)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> SimResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `[0, 1]`.
pub fn require_unit_interval(name: &'static str, value: f64) -> SimResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0, 1]",
        })
    }
}

/// Returns an error if `min > max`.
pub fn require_ordered(name: &'static str, min: f64, max: f64) -> SimResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(SimError::InvalidRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", -3.0).is_err());
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(require_unit_interval("p", 0.0).is_ok());
        assert!(require_unit_interval("p", 1.0).is_ok());
        assert!(require_unit_interval("p", 1.01).is_err());
    }

    #[test]
    fn inverted_range_reports_both_ends() {
        let err = require_ordered("spawn", 10.0, 5.0).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidRange {
                name: "spawn",
                min: 10.0,
                max: 5.0
            }
        );
        assert!(err.to_string().contains("spawn"));
    }
}
