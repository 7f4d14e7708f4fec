//! Pheromone model and update policies.
//!
//! Every policy first evaporates the whole matrix, `τ ← (1 − ρ)·τ`, then
//! deposits on the edges of selected closed tours. Deposits are always
//! `Q / f`, where `f` is the fitness of the ant laying the trail.
//!
//! | Policy | Depositing ants | Extra reward |
//! |--------|-----------------|--------------|
//! | [`StandardUpdate`] | all | none |
//! | [`ElitistUpdate`] | all | best ant: `best_rate · Q / f` |
//! | [`RankUpdate`] | top K, weight `K − r` | best ant: `K · Q / f` |
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Bullnheimer, Hartl & Strauss (1999), "A New Rank Based Version of the
//!   Ant System"

use crate::direction::{best_index, Direction};
use crate::error::{OptimError, Result};

/// Square matrix of non-negative edge reinforcement weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix with every entry set to `value`.
    pub fn filled(n: usize, value: f64) -> Result<Self> {
        check_entry(value)?;
        Ok(Self {
            n,
            data: vec![value; n * n],
        })
    }

    /// Builds a matrix from square rows of finite, non-negative entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(OptimError::shape("pheromone matrix row", n, row.len()));
            }
            data.extend(row);
        }
        for &tau in &data {
            check_entry(tau)?;
        }
        Ok(Self { n, data })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Pheromone on the edge `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Pheromone on all edges leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for tau in &mut self.data {
            *tau *= keep;
        }
    }

    /// Adds `amount` to every edge of the closed tour.
    fn deposit(&mut self, tour: &[usize], amount: f64) {
        let len = tour.len();
        for k in 0..len {
            let from = tour[(k + len - 1) % len];
            let to = tour[k];
            self.data[from * self.n + to] += amount;
        }
    }
}

fn check_entry(tau: f64) -> Result<()> {
    if !(tau.is_finite() && tau >= 0.0) {
        return Err(OptimError::InvalidConfig(format!(
            "pheromone must be finite and non-negative, got {tau}"
        )));
    }
    Ok(())
}

/// Evaporates and reinforces a pheromone matrix after a generation.
pub trait PheromoneUpdate: Send + Sync {
    /// Returns the updated matrix.
    ///
    /// `ants` and `fitness` are positionally aligned; fitness is a cost
    /// (lower is better) and must be finite and positive.
    fn update(
        &self,
        pheromones: PheromoneMatrix,
        ants: &[Vec<usize>],
        fitness: &[f64],
    ) -> Result<PheromoneMatrix>;

    /// Human-readable policy name, used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared Q and ρ validation.
fn check_params(q: f64, evaporation: f64) -> Result<()> {
    if !(q.is_finite() && q >= 0.0) {
        return Err(OptimError::InvalidConfig(format!(
            "pheromone constant Q must be finite and non-negative, got {q}"
        )));
    }
    if !(0.0..1.0).contains(&evaporation) {
        return Err(OptimError::InvalidConfig(format!(
            "evaporation rate must be within [0, 1), got {evaporation}"
        )));
    }
    Ok(())
}

/// Checks alignment, city indices, and fitness before anything is
/// deposited.
fn check_inputs(pheromones: &PheromoneMatrix, ants: &[Vec<usize>], fitness: &[f64]) -> Result<()> {
    if ants.len() != fitness.len() {
        return Err(OptimError::shape("fitness vector", ants.len(), fitness.len()));
    }
    // Deserialized matrices skip the constructors.
    if pheromones.data.len() != pheromones.n * pheromones.n {
        return Err(OptimError::shape(
            "pheromone matrix entries",
            pheromones.n * pheromones.n,
            pheromones.data.len(),
        ));
    }
    if let Some(&bad) = pheromones.data.iter().find(|t| !t.is_finite() || **t < 0.0) {
        return Err(OptimError::NumericalHazard(format!(
            "pheromone entries must be finite and non-negative, got {bad}"
        )));
    }
    if let Some(&bad) = ants.iter().flatten().find(|&&c| c >= pheromones.n) {
        return Err(OptimError::InvalidGene(format!(
            "ant visits city {bad}, but the pheromone matrix has {} cities",
            pheromones.n
        )));
    }
    if let Some(bad) = fitness.iter().find(|f| !f.is_finite() || **f <= 0.0) {
        return Err(OptimError::NumericalHazard(format!(
            "pheromone deposit divides by fitness, which must be finite and positive, got {bad}"
        )));
    }
    Ok(())
}

/// Index of the cheapest ant (first on ties).
fn cheapest(fitness: &[f64]) -> Option<usize> {
    best_index(fitness, Direction::Minimize)
}

/// Every ant deposits `Q / f(ant)` on its tour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardUpdate {
    q: f64,
    evaporation: f64,
}

impl Default for StandardUpdate {
    fn default() -> Self {
        Self {
            q: 100.0,
            evaporation: 0.5,
        }
    }
}

impl StandardUpdate {
    /// Creates the policy. `evaporation` is ρ and must lie in `[0, 1)`.
    pub fn new(q: f64, evaporation: f64) -> Result<Self> {
        check_params(q, evaporation)?;
        Ok(Self { q, evaporation })
    }
}

impl PheromoneUpdate for StandardUpdate {
    fn update(
        &self,
        mut pheromones: PheromoneMatrix,
        ants: &[Vec<usize>],
        fitness: &[f64],
    ) -> Result<PheromoneMatrix> {
        check_inputs(&pheromones, ants, fitness)?;
        pheromones.evaporate(self.evaporation);
        for (ant, &f) in ants.iter().zip(fitness) {
            pheromones.deposit(ant, self.q / f);
        }
        Ok(pheromones)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Standard update plus an extra `best_rate · Q / f` on the cheapest
/// ant's tour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElitistUpdate {
    q: f64,
    evaporation: f64,
    best_rate: f64,
}

impl ElitistUpdate {
    pub fn new(q: f64, evaporation: f64, best_rate: f64) -> Result<Self> {
        check_params(q, evaporation)?;
        if !(best_rate.is_finite() && best_rate >= 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "best_rate must be finite and non-negative, got {best_rate}"
            )));
        }
        Ok(Self {
            q,
            evaporation,
            best_rate,
        })
    }
}

impl PheromoneUpdate for ElitistUpdate {
    fn update(
        &self,
        mut pheromones: PheromoneMatrix,
        ants: &[Vec<usize>],
        fitness: &[f64],
    ) -> Result<PheromoneMatrix> {
        check_inputs(&pheromones, ants, fitness)?;
        pheromones.evaporate(self.evaporation);
        for (ant, &f) in ants.iter().zip(fitness) {
            pheromones.deposit(ant, self.q / f);
        }
        if let Some(best) = cheapest(fitness) {
            pheromones.deposit(&ants[best], self.best_rate * self.q / fitness[best]);
        }
        Ok(pheromones)
    }

    fn name(&self) -> &'static str {
        "elitist"
    }
}

/// Only the `rank` cheapest ants deposit; the ant at rank `r` (0-based)
/// deposits `(K − r) · Q / f`, and the cheapest ant gets an extra
/// `K · Q / f`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankUpdate {
    q: f64,
    evaporation: f64,
    rank: usize,
}

impl Default for RankUpdate {
    fn default() -> Self {
        Self {
            q: 100.0,
            evaporation: 0.1,
            rank: 5,
        }
    }
}

impl RankUpdate {
    pub fn new(q: f64, evaporation: f64, rank: usize) -> Result<Self> {
        check_params(q, evaporation)?;
        if rank == 0 {
            return Err(OptimError::InvalidConfig(
                "rank-based update needs at least one depositing ant".into(),
            ));
        }
        Ok(Self {
            q,
            evaporation,
            rank,
        })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl PheromoneUpdate for RankUpdate {
    fn update(
        &self,
        mut pheromones: PheromoneMatrix,
        ants: &[Vec<usize>],
        fitness: &[f64],
    ) -> Result<PheromoneMatrix> {
        check_inputs(&pheromones, ants, fitness)?;
        pheromones.evaporate(self.evaporation);

        let mut order: Vec<usize> = (0..ants.len()).collect();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        let k = self.rank as f64;
        for (r, &ant) in order.iter().take(self.rank).enumerate() {
            let mut amount = (k - r as f64) * self.q / fitness[ant];
            if r == 0 {
                amount += k * self.q / fitness[ant];
            }
            pheromones.deposit(&ants[ant], amount);
        }
        Ok(pheromones)
    }

    fn name(&self) -> &'static str {
        "rank"
    }
}
