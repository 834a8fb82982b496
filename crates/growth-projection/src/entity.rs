//! Entity records and the range their initial counts are drawn from.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// A named row of the dataset paired with its starting account count.
///
/// # Example
///
/// ```
/// use growth_projection::Entity;
///
/// let entity = Entity::new("Colima", 120_000);
///
/// assert_eq!(entity.name, "Colima");
/// assert_eq!(entity.initial_count, 120_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// State name from the fixed catalogue.
    pub name: String,
    /// Account count before the first projected period.
    pub initial_count: u32,
}

impl Entity {
    /// Builds an entity from a name and initial count.
    #[must_use]
    pub fn new(name: impl Into<String>, initial_count: u32) -> Self {
        Self {
            name: name.into(),
            initial_count,
        }
    }
}

/// Half-open range `[low, high)` that initial counts are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialCountRange {
    low: u32,
    high: u32,
}

impl InitialCountRange {
    /// Inclusive lower bound used by the dashboards.
    pub const DEFAULT_LOW: u32 = 50_000;

    /// Exclusive upper bound used by the dashboards.
    pub const DEFAULT_HIGH: u32 = 500_000;

    /// Creates a range, rejecting empty ones.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidConfiguration`] when `low >= high`.
    ///
    /// # Example
    ///
    /// ```
    /// use growth_projection::InitialCountRange;
    ///
    /// assert!(InitialCountRange::new(10, 20).is_ok());
    /// assert!(InitialCountRange::new(20, 20).is_err());
    /// ```
    pub fn new(low: u32, high: u32) -> Result<Self, ProjectionError> {
        if low >= high {
            return Err(ProjectionError::invalid(format!(
                "initial count range [{low}, {high}) is empty"
            )));
        }
        Ok(Self { low, high })
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn low(&self) -> u32 {
        self.low
    }

    /// Returns the exclusive upper bound.
    #[must_use]
    pub const fn high(&self) -> u32 {
        self.high
    }

    /// Returns `true` if `count` lies within the range.
    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        count >= self.low && count < self.high
    }

    /// Draws one count uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.low..self.high)
    }
}

impl Default for InitialCountRange {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_range_matches_dashboard_bounds() {
        let range = InitialCountRange::default();
        assert_eq!(range.low(), 50_000);
        assert_eq!(range.high(), 500_000);
    }

    #[rstest]
    #[case(10, 10)]
    #[case(11, 10)]
    fn rejects_empty_ranges(#[case] low: u32, #[case] high: u32) {
        let result = InitialCountRange::new(low, high);
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidConfiguration { .. })
        ));
    }

    #[rstest]
    #[case(50_000, true)]
    #[case(499_999, true)]
    #[case(500_000, false)]
    #[case(49_999, false)]
    fn contains_is_half_open(#[case] count: u32, #[case] expected: bool) {
        assert_eq!(InitialCountRange::default().contains(count), expected);
    }

    #[test]
    fn samples_stay_within_range() {
        let range = InitialCountRange::new(3, 5).expect("valid range");
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let count = range.sample(&mut rng);
            assert!(range.contains(count), "sample {count} out of range");
        }
    }

    #[test]
    fn entity_serializes_to_camel_case() {
        let json = serde_json::to_string(&Entity::new("Sonora", 75_000)).expect("serialize");
        assert_eq!(json, r#"{"name":"Sonora","initialCount":75000}"#);
    }
}
