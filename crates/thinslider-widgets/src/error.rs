//! Error types for slider construction.

use thiserror::Error;

/// Invalid range configuration, reported when a slider is built.
///
/// Runtime value writes never fail; they clamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max` is below `min`.
    #[error("invalid range: max {max} is less than min {min}")]
    InvertedRange {
        /// Requested minimum
        min: i64,
        /// Requested maximum
        max: i64,
    },

    /// `min == max`, leaving nothing to select.
    #[error("invalid range: min and max are both {value}")]
    EmptyRange {
        /// The shared bound
        value: i64,
    },

    /// `max - min` does not leave room for the step count in an `i64`.
    #[error("invalid range: {min}..={max} is too wide")]
    RangeTooWide {
        /// Requested minimum
        min: i64,
        /// Requested maximum
        max: i64,
    },

    /// Step must be at least 1.
    #[error("invalid step: {step} (must be >= 1)")]
    InvalidStep {
        /// Requested step
        step: i64,
    },
}
