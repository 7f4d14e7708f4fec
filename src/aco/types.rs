//! Problem definition and distance model for ACO.

use crate::error::{OptimError, Result};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A closed tour: a permutation of city indices, returning to the first
/// city after the last.
pub type Tour = Vec<usize>;

/// Square matrix of non-negative, finite edge costs.
///
/// Stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from rows.
    ///
    /// # Errors
    ///
    /// - [`OptimError::ShapeMismatch`] if the rows do not form a square
    ///   matrix.
    /// - [`OptimError::InvalidConfig`] if any entry is negative or not
    ///   finite, or the matrix is empty.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(OptimError::InvalidConfig(
                "distance matrix must have at least one city".into(),
            ));
        }
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(OptimError::shape("distance matrix row", n, row.len()));
            }
            data.extend(row);
        }
        if let Some(bad) = data.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "distances must be finite and non-negative, got {bad}"
            )));
        }
        Ok(Self { n, data })
    }

    /// Builds a symmetric matrix of Euclidean distances between points.
    pub fn euclidean(points: &[(f64, f64)]) -> Result<Self> {
        let rows = points
            .iter()
            .map(|&(xa, ya)| {
                points
                    .iter()
                    .map(|&(xb, yb)| ((xa - xb).powi(2) + (ya - yb).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// Replaces every zero entry (diagonal included) with `floor`.
    ///
    /// Transition weights use `1 / d`, so coincident cities need a
    /// positive stand-in cost.
    pub fn with_zero_floor(mut self, floor: f64) -> Result<Self> {
        if !(floor.is_finite() && floor > 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "zero floor must be finite and positive, got {floor}"
            )));
        }
        for d in self.data.iter_mut().filter(|d| **d == 0.0) {
            *d = floor;
        }
        Ok(self)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of the edge `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Costs of all edges leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    /// Cost of the closed tour, including the edge from the last city back
    /// to the first.
    ///
    /// Returns [`OptimError::InvalidGene`] if the tour mentions a city
    /// outside the matrix.
    pub fn tour_length(&self, tour: &[usize]) -> Result<f64> {
        if let Some(&bad) = tour.iter().find(|&&c| c >= self.n) {
            return Err(OptimError::InvalidGene(format!(
                "tour visits city {bad}, but only {} cities exist",
                self.n
            )));
        }
        let len = tour.len();
        Ok((0..len)
            .map(|k| self.get(tour[(k + len - 1) % len], tour[k]))
            .sum())
    }

    /// Costs of many tours.
    ///
    /// With the `parallel` feature, tours are measured concurrently; the
    /// result is identical either way.
    pub fn tour_lengths(&self, tours: &[Tour]) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            tours.par_iter().map(|t| self.tour_length(t)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            tours.iter().map(|t| self.tour_length(t)).collect()
        }
    }
}

/// Defines an ACO optimization problem over a fixed set of cities.
///
/// # Examples
///
/// ```ignore
/// struct Tsp { distances: DistanceMatrix }
///
/// impl AcoProblem for Tsp {
///     fn distances(&self) -> &DistanceMatrix {
///         &self.distances
///     }
/// }
/// ```
pub trait AcoProblem {
    /// The edge costs ants use as their heuristic.
    fn distances(&self) -> &DistanceMatrix;

    /// Cost of each tour, positionally aligned with `tours`. Lower is
    /// better.
    ///
    /// Defaults to the closed-tour length under [`distances`](Self::distances).
    fn fitness(&self, tours: &[Tour]) -> Result<Vec<f64>> {
        self.distances().tour_lengths(tours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0.0, 1.0, 2.0, 1.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 2.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_tour_length_closes_loop() {
        let d = square();
        assert!((d.tour_length(&[0, 1, 2, 3]).unwrap() - 4.0).abs() < 1e-12);
        assert!((d.tour_length(&[0, 2, 1, 3]).unwrap() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_tour_length_rejects_unknown_city() {
        let err = square().tour_length(&[0, 1, 9]).unwrap_err();
        assert!(matches!(err, OptimError::InvalidGene(_)));
    }

    #[test]
    fn test_tour_lengths_aligned() {
        let d = square();
        let lengths = d
            .tour_lengths(&[vec![0, 1, 2, 3], vec![0, 2, 1, 3]])
            .unwrap();
        assert_eq!(lengths, vec![4.0, 6.0]);
    }

    #[test]
    fn test_non_square_rejected() {
        let err = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, OptimError::shape("distance matrix row", 2, 1));
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(DistanceMatrix::new(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).is_err());
        assert!(DistanceMatrix::new(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]).is_err());
        assert!(DistanceMatrix::new(Vec::new()).is_err());
    }

    #[test]
    fn test_zero_floor() {
        let d = DistanceMatrix::new(vec![vec![0.0, 0.0], vec![3.0, 0.0]])
            .unwrap()
            .with_zero_floor(1.0)
            .unwrap();
        assert_eq!(d.row(0), &[1.0, 1.0]);
        assert_eq!(d.row(1), &[3.0, 1.0]);
        assert!(square().with_zero_floor(0.0).is_err());
    }

    #[test]
    fn test_euclidean() {
        let d = DistanceMatrix::euclidean(&[(0.0, 0.0), (3.0, 4.0)]).unwrap();
        assert!((d.get(0, 1) - 5.0).abs() < 1e-12);
        assert!((d.get(1, 0) - 5.0).abs() < 1e-12);
        assert_eq!(d.get(0, 0), 0.0);
    }
}
