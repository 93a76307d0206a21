//! Integer range with step arithmetic.

use crate::error::ConfigError;
use serde::Serialize;

/// A validated `[min, max]` range stepped in increments of `step`.
///
/// Besides clamping, the model converts between integer values and the
/// continuous "virtual" position a drag moves along. One virtual unit is a
/// hundredth of the step count, so `value_from_virtual(virtual_from_value(v))`
/// returns `v` for every value on the step grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeModel {
    min: i64,
    max: i64,
    step: i64,
}

impl RangeModel {
    /// Create a range. Rejects `max < min`, `max == min`, `step < 1`, and
    /// spans too wide for `total_steps` to fit an `i64`.
    pub const fn new(min: i64, max: i64, step: i64) -> Result<Self, ConfigError> {
        if max < min {
            return Err(ConfigError::InvertedRange { min, max });
        }
        if max == min {
            return Err(ConfigError::EmptyRange { value: min });
        }
        match max.checked_sub(min) {
            Some(span) if span < i64::MAX => {}
            _ => return Err(ConfigError::RangeTooWide { min, max }),
        }
        if step < 1 {
            return Err(ConfigError::InvalidStep { step });
        }
        Ok(Self { min, max, step })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Step increment.
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// `max - min`, always positive.
    #[must_use]
    pub const fn span(&self) -> i64 {
        self.max - self.min
    }

    /// Clamp a value into `[min, max]`. Off-grid values stay off-grid.
    #[must_use]
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    /// Number of selectable positions: `(max - min) / step + 1`.
    #[must_use]
    pub const fn total_steps(&self) -> i64 {
        self.span() / self.step + 1
    }

    /// Percentage of the range covered by `value`, clamped to `[0, 100]`.
    #[must_use]
    pub fn percent(&self, value: i64) -> f64 {
        let pct = self.offset(value) / self.span() as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    /// `value - min` for any `value`, including ones far outside the range.
    fn offset(&self, value: i64) -> f64 {
        (i128::from(value) - i128::from(self.min)) as f64
    }

    /// Virtual position that corresponds to `value`.
    #[must_use]
    pub fn virtual_from_value(&self, value: i64) -> f64 {
        (self.offset(value) / (self.total_steps() as f64 / 100.0)) / self.step as f64
    }

    /// Largest virtual position a drag may reach.
    #[must_use]
    pub fn max_virtual(&self) -> f64 {
        self.virtual_from_value(self.max)
    }

    /// Quantize a virtual position back to a clamped value on the step grid.
    ///
    /// Rounds half to even.
    #[must_use]
    pub fn value_from_virtual(&self, position: f64) -> i64 {
        let steps = (position * (self.total_steps() as f64 / 100.0)).round_ties_even() as i64;
        self.clamp(self.step.saturating_mul(steps).saturating_add(self.min))
    }
}
