//! Optimization direction.
//!
//! Every runner and every direction-aware operator receives a
//! [`Direction`] and resolves "best" through [`best_index`], so there is a
//! single definition of argmin/argmax for the whole crate.

use std::cmp::Ordering;

/// Whether lower or higher fitness values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower fitness is better (e.g. tour length).
    #[default]
    Minimize,
    /// Higher fitness is better (e.g. knapsack profit).
    Maximize,
}

impl Direction {
    /// Returns `true` if `a` is strictly better than `b`.
    ///
    /// NaN is never better than anything.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// The worst possible fitness in this direction.
    ///
    /// Used to seed best-so-far trackers.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Minimize => f64::INFINITY,
            Direction::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Orders `a` before `b` when `a` is better.
    ///
    /// Incomparable values (NaN) compare as equal.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }
}

/// Index of the best fitness value, or `None` for an empty slice.
///
/// Ties resolve to the lowest index, matching `argmin`/`argmax`.
pub fn best_index(fitness: &[f64], direction: Direction) -> Option<usize> {
    let mut iter = fitness.iter().enumerate();
    let (mut best, mut best_value) = match iter.next() {
        Some((i, &v)) => (i, v),
        None => return None,
    };
    for (i, &v) in iter {
        if direction.is_better(v, best_value) || (best_value.is_nan() && !v.is_nan()) {
            best = i;
            best_value = v;
        }
    }
    Some(best)
}
