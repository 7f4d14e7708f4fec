//! Random number generation helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a seeded RNG, or an entropy-seeded one when `seed` is `None`.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Bernoulli trial with probability `rate`.
///
/// Unlike `Rng::random_bool` this never panics: rates outside `[0, 1]`
/// saturate and NaN never fires.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> bool {
    rng.random::<f64>() < rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = create_rng(1);
        for _ in 0..100 {
            assert!(!chance(&mut rng, 0.0));
            assert!(chance(&mut rng, 1.0));
            assert!(!chance(&mut rng, f64::NAN));
        }
    }
}
