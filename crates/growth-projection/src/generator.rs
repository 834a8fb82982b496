//! Initial dataset generation.
//!
//! Each call pairs every catalogue state with a freshly sampled initial
//! count. The random source is supplied by the caller, so seeding it with the
//! same value always produces identical output.

use rand::Rng;
use tracing::debug;

use crate::catalogue::STATE_NAMES;
use crate::entity::{Entity, InitialCountRange};

/// Generates the initial dataset using the default count range.
///
/// Produces one [`Entity`] per catalogue state, in catalogue order, with
/// `initial_count` drawn uniformly from `[50000, 500000)`. Consumes one value
/// per state from `rng`.
///
/// # Example
///
/// ```
/// use growth_projection::{STATE_COUNT, generate_initial_data};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(2024);
/// let entities = generate_initial_data(&mut rng);
///
/// assert_eq!(entities.len(), STATE_COUNT);
/// assert_eq!(entities.first().map(|e| e.name.as_str()), Some("Aguascalientes"));
/// ```
pub fn generate_initial_data<R: Rng + ?Sized>(rng: &mut R) -> Vec<Entity> {
    generate_with_range(rng, &InitialCountRange::default())
}

/// Generates the initial dataset with counts drawn from `range`.
pub fn generate_with_range<R: Rng + ?Sized>(
    rng: &mut R,
    range: &InitialCountRange,
) -> Vec<Entity> {
    let entities: Vec<Entity> = STATE_NAMES
        .iter()
        .map(|name| Entity::new(*name, range.sample(rng)))
        .collect();

    debug!(
        entity_count = entities.len(),
        low = range.low(),
        high = range.high(),
        "generated initial data"
    );
    entities
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::catalogue::STATE_COUNT;

    #[fixture]
    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[rstest]
    fn generates_one_entity_per_state(mut rng: ChaCha8Rng) {
        let entities = generate_initial_data(&mut rng);

        assert_eq!(entities.len(), STATE_COUNT);
        let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, STATE_NAMES.to_vec());
    }

    #[rstest]
    fn initial_counts_respect_default_bounds(mut rng: ChaCha8Rng) {
        for _ in 0..20 {
            for entity in generate_initial_data(&mut rng) {
                assert!(
                    (50_000..500_000).contains(&entity.initial_count),
                    "count out of bounds: {entity:?}"
                );
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let mut first_rng = ChaCha8Rng::seed_from_u64(2026);
        let mut second_rng = ChaCha8Rng::seed_from_u64(2026);

        assert_eq!(
            generate_initial_data(&mut first_rng),
            generate_initial_data(&mut second_rng)
        );
    }

    #[test]
    fn different_seeds_produce_different_counts() {
        let mut first_rng = ChaCha8Rng::seed_from_u64(1);
        let mut second_rng = ChaCha8Rng::seed_from_u64(2);

        assert_ne!(
            generate_initial_data(&mut first_rng),
            generate_initial_data(&mut second_rng)
        );
    }

    #[rstest]
    fn custom_range_is_honoured(mut rng: ChaCha8Rng) {
        let range = InitialCountRange::new(10, 12).expect("valid range");

        for entity in generate_with_range(&mut rng, &range) {
            assert!(range.contains(entity.initial_count));
        }
    }

    #[rstest]
    fn consecutive_calls_continue_the_stream(mut rng: ChaCha8Rng) {
        let first = generate_initial_data(&mut rng);
        let second = generate_initial_data(&mut rng);

        assert_ne!(first, second);
    }
}
