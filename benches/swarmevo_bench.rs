//! Criterion benchmarks for u-swarmevo optimizers.
//!
//! Uses synthetic problems (Sphere function, ring TSP) to measure pure
//! algorithm overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_swarmevo::aco::{AcoConfig, AcoProblem, AcoRunner, DistanceMatrix, StandardUpdate};
use u_swarmevo::ga::{
    BlendCrossover, GaConfig, GaProblem, GaRunner, IntervalMutation, Population,
    TournamentSelection,
};
use u_swarmevo::pso::{Position, PsoConfig, PsoProblem, PsoRunner};

// ===========================================================================
// Sphere function: minimize sum(x_i^2)
// ===========================================================================

struct Sphere {
    dim: usize,
}

impl GaProblem for Sphere {
    type Gene = f64;

    fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<f64> {
        (0..count)
            .map(|_| (0..self.dim).map(|_| rng.random_range(-5.0..5.0)).collect())
            .collect()
    }

    fn fitness(&self, population: &Population<f64>) -> Vec<f64> {
        population
            .iter()
            .map(|ind| ind.iter().map(|x| x * x).sum())
            .collect()
    }
}

impl PsoProblem for Sphere {
    fn fitness(&self, positions: &[Position]) -> Vec<f64> {
        positions
            .iter()
            .map(|p| p.iter().map(|x| x * x).sum())
            .collect()
    }
}

// ===========================================================================
// Ring TSP for ACO
// ===========================================================================

struct RingTsp {
    distances: DistanceMatrix,
}

impl RingTsp {
    fn new(n: usize) -> Self {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                (theta.cos(), theta.sin())
            })
            .collect();
        let distances = DistanceMatrix::euclidean(&points)
            .and_then(|d| d.with_zero_floor(1.0))
            .expect("ring distances are finite");
        Self { distances }
    }
}

impl AcoProblem for RingTsp {
    fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(10usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let problem = Sphere { dim };
        let runner = GaRunner::new(
            GaConfig::default()
                .with_population_size(pop)
                .with_generations(gen)
                .with_seed(42),
        )
        .with_selection(TournamentSelection)
        .with_crossover(BlendCrossover::default())
        .with_mutation(IntervalMutation::default());
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &(problem, runner),
            |b, (p, r)| {
                b.iter(|| {
                    let result = r.simulate(black_box(p));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_aco_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_ring");
    group.sample_size(10);

    for &n in &[10, 30, 60] {
        let problem = RingTsp::new(n);
        let runner = AcoRunner::new(
            AcoConfig::default()
                .with_ant_count(n)
                .with_generations(20)
                .with_seed(42),
        )
        .with_pheromone_update(StandardUpdate::default());
        group.bench_with_input(BenchmarkId::from_parameter(n), &(problem, runner), |b, (p, r)| {
            b.iter(|| {
                let result = r.simulate(black_box(p));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_pso_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("pso_sphere");
    group.sample_size(10);

    for &dim in &[10, 50, 100] {
        let problem = Sphere { dim };
        let runner = PsoRunner::new(
            PsoConfig::default()
                .with_dimensions(dim)
                .with_generations(100)
                .with_seed(42),
        );
        group.bench_with_input(BenchmarkId::from_parameter(dim), &(problem, runner), |b, (p, r)| {
            b.iter(|| {
                let result = r.simulate(black_box(p));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_sphere, bench_aco_ring, bench_pso_sphere);
criterion_main!(benches);
