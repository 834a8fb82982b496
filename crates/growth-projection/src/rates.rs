//! Growth rates and the ranges they are sampled from.

use rand::Rng;
use serde::{Serialize, Serializer};

use crate::error::ProjectionError;

/// Half-open range `[low, high)` that growth rates are drawn from.
///
/// Bounds must be finite, ordered, and greater than `-1` so that every growth
/// factor `1 + rate` stays positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    low: f64,
    high: f64,
}

impl RateRange {
    /// Inclusive lower bound used by the dashboards.
    pub const DEFAULT_LOW: f64 = 0.01;

    /// Exclusive upper bound used by the dashboards.
    pub const DEFAULT_HIGH: f64 = 0.05;

    /// Creates a validated rate range.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidConfiguration`] if either bound is
    /// not finite, if `low` is at or below `-1`, or if the range is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use growth_projection::RateRange;
    ///
    /// let range = RateRange::new(0.01, 0.05).expect("valid range");
    /// assert!(range.contains(0.02));
    /// assert!(RateRange::new(0.05, 0.01).is_err());
    /// ```
    pub fn new(low: f64, high: f64) -> Result<Self, ProjectionError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ProjectionError::invalid(format!(
                "rate range bounds must be finite, got [{low}, {high})"
            )));
        }
        if low <= -1.0 {
            return Err(ProjectionError::invalid(format!(
                "rate range lower bound must exceed -1, got {low}"
            )));
        }
        if low >= high {
            return Err(ProjectionError::invalid(format!(
                "rate range [{low}, {high}) is empty"
            )));
        }
        Ok(Self { low, high })
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn low(&self) -> f64 {
        self.low
    }

    /// Returns the exclusive upper bound.
    #[must_use]
    pub const fn high(&self) -> f64 {
        self.high
    }

    /// Returns `true` if `rate` lies within the range.
    #[must_use]
    pub fn contains(&self, rate: f64) -> bool {
        (self.low..self.high).contains(&rate)
    }

    /// Draws one rate uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GrowthRate {
        GrowthRate(rng.random_range(self.low..self.high))
    }
}

impl Default for RateRange {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Per-period growth rate applied to one entity.
///
/// A rate of `0.02` means two percent growth per period.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GrowthRate(f64);

impl GrowthRate {
    /// Wraps an explicit rate.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidConfiguration`] if the rate is not
    /// finite or is at or below `-1`.
    ///
    /// # Example
    ///
    /// ```
    /// use growth_projection::GrowthRate;
    ///
    /// let rate = GrowthRate::new(0.02).expect("valid rate");
    /// assert_eq!(rate.value(), 0.02);
    /// ```
    pub fn new(value: f64) -> Result<Self, ProjectionError> {
        if !value.is_finite() || value <= -1.0 {
            return Err(ProjectionError::invalid(format!(
                "growth rate must be finite and exceed -1, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw rate.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the per-period growth factor `1 + rate`.
    #[must_use]
    pub fn factor(self) -> f64 {
        1.0 + self.0
    }
}

impl Serialize for GrowthRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// Draws `count` independent rates from `range`, consuming `count` values
/// from the random source.
pub fn sample_rates<R: Rng + ?Sized>(
    rng: &mut R,
    range: &RateRange,
    count: usize,
) -> Vec<GrowthRate> {
    (0..count).map(|_| range.sample(rng)).collect()
}
