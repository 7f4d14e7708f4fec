//! End-to-end GA scenarios: permutation, binary, and real-valued encodings.

use rand::seq::SliceRandom;
use rand::Rng;
use u_swarmevo::ga::{
    BinaryFlipMutation, BlendCrossover, GaConfig, GaProblem, GaRunner, GridSearch,
    IntervalMutation, OnePointCrossover, OrderCrossover, Population, RouletteSelection,
    SwapMutation, TournamentSelection,
};
use u_swarmevo::Direction;

// ============================================================================
// Scenario A: 4-city symmetric TSP
// ============================================================================

struct FourCities {
    distances: [[f64; 4]; 4],
}

impl FourCities {
    /// Three distinct closed tours exist, of lengths 10, 15, and 17.
    fn new() -> Self {
        Self {
            distances: [
                [0.0, 1.0, 5.0, 4.0],
                [1.0, 0.0, 2.0, 6.0],
                [5.0, 2.0, 0.0, 3.0],
                [4.0, 6.0, 3.0, 0.0],
            ],
        }
    }

    fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|k| self.distances[tour[k]][tour[(k + 1) % n]])
            .sum()
    }
}

impl GaProblem for FourCities {
    type Gene = usize;

    fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<usize> {
        (0..count)
            .map(|_| {
                let mut tour: Vec<usize> = (0..4).collect();
                tour.shuffle(rng);
                tour
            })
            .collect()
    }

    fn fitness(&self, population: &Population<usize>) -> Vec<f64> {
        population.iter().map(|t| self.tour_length(t)).collect()
    }
}

#[test]
fn scenario_a_tsp_reaches_optimum_in_almost_every_run() {
    const OPTIMUM: f64 = 10.0;
    let problem = FourCities::new();
    let runs = 40u64;

    let hits = (0..runs)
        .filter(|&seed| {
            let config = GaConfig::default()
                .with_population_size(20)
                .with_generations(500)
                .with_mutation_rate(0.1)
                .with_seed(seed);
            let result = GaRunner::new(config)
                .with_selection(TournamentSelection)
                .with_crossover(OrderCrossover)
                .with_mutation(SwapMutation)
                .simulate(&problem)
                .unwrap();
            (result.best_fitness - OPTIMUM).abs() < 1e-9
        })
        .count();

    assert!(
        hits as f64 >= 0.95 * runs as f64,
        "optimum reached in only {hits}/{runs} runs"
    );
}

// ============================================================================
// Scenario B: 5-item binary knapsack
// ============================================================================

struct Knapsack {
    weights: [f64; 5],
    profits: [f64; 5],
    capacity: f64,
}

impl Knapsack {
    fn new() -> Self {
        Self {
            weights: [12.0, 2.0, 1.0, 1.0, 4.0],
            profits: [4.0, 2.0, 1.0, 2.0, 10.0],
            capacity: 15.0,
        }
    }

    /// Profit, penalized proportionally to the excess weight.
    fn score(&self, items: &[u8]) -> f64 {
        let mut weight = 0.0;
        let mut profit = 0.0;
        for (i, &take) in items.iter().enumerate() {
            if take == 1 {
                weight += self.weights[i];
                profit += self.profits[i];
            }
        }
        if weight <= self.capacity {
            profit
        } else {
            profit - profit * (weight - self.capacity)
        }
    }

    fn brute_force_optimum(&self) -> f64 {
        (0u32..32)
            .map(|mask| {
                let items: Vec<u8> = (0..5).map(|i| ((mask >> i) & 1) as u8).collect();
                self.score(&items)
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl GaProblem for Knapsack {
    type Gene = u8;

    fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<u8> {
        (0..count)
            .map(|_| (0..5).map(|_| rng.random_range(0..=1)).collect())
            .collect()
    }

    fn fitness(&self, population: &Population<u8>) -> Vec<f64> {
        population.iter().map(|ind| self.score(ind)).collect()
    }
}

#[test]
fn scenario_b_knapsack_reaches_brute_force_optimum() {
    let problem = Knapsack::new();
    let optimum = problem.brute_force_optimum();
    assert_eq!(optimum, 15.0);

    for seed in 0..5 {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(500)
            .with_mutation_rate(0.1)
            .with_direction(Direction::Maximize)
            .with_seed(seed);
        let result = GaRunner::new(config)
            .with_selection(TournamentSelection)
            .with_crossover(OnePointCrossover)
            .with_mutation(BinaryFlipMutation)
            .simulate(&problem)
            .unwrap();

        assert_eq!(result.best_fitness, optimum, "seed {seed}");
        assert_eq!(problem.score(&result.best), optimum);
    }
}

// ============================================================================
// Scenario C: minimize x² on [-10, 10]
// ============================================================================

struct Square;

impl GaProblem for Square {
    type Gene = f64;

    fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<f64> {
        (0..count)
            .map(|_| vec![rng.random_range(-10.0..=10.0)])
            .collect()
    }

    fn fitness(&self, population: &Population<f64>) -> Vec<f64> {
        population.iter().map(|ind| ind[0] * ind[0]).collect()
    }
}

#[test]
fn scenario_c_square_converges_to_zero() {
    for seed in 0..5 {
        let config = GaConfig::default()
            .with_population_size(40)
            .with_generations(500)
            .with_mutation_rate(0.1)
            .with_seed(seed);
        let result = GaRunner::new(config)
            .with_selection(TournamentSelection)
            .with_crossover(BlendCrossover::default())
            .with_mutation(IntervalMutation::new(-10.0, 10.0).unwrap())
            .simulate(&Square)
            .unwrap();

        assert!(
            result.best[0].abs() < 1e-2,
            "seed {seed}: best x = {}",
            result.best[0]
        );
    }
}

// ============================================================================
// Roulette on a maximization problem, and the sweep driver
// ============================================================================

#[test]
fn roulette_solves_knapsack() {
    // Shifted so every fitness is positive, as roulette weighting requires.
    struct Shifted(Knapsack);

    impl GaProblem for Shifted {
        type Gene = u8;

        fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<u8> {
            self.0.create_individuals(count, rng)
        }

        fn fitness(&self, population: &Population<u8>) -> Vec<f64> {
            population
                .iter()
                .map(|ind| (self.0.score(ind) + 200.0).max(1.0))
                .collect()
        }
    }

    let problem = Shifted(Knapsack::new());
    let config = GaConfig::default()
        .with_population_size(30)
        .with_generations(300)
        .with_direction(Direction::Maximize)
        .with_seed(17);
    let result = GaRunner::new(config)
        .with_selection(RouletteSelection)
        .with_crossover(OnePointCrossover)
        .with_mutation(BinaryFlipMutation)
        .simulate(&problem)
        .unwrap();

    assert_eq!(result.best_fitness, 215.0);
}

#[test]
fn grid_search_over_tsp_operators() {
    let outcome = GridSearch::new(GaConfig::default().with_seed(5))
        .with_population_sizes(vec![8, 20])
        .with_generations(vec![50])
        .with_mutation_rates(vec![0.05, 0.2])
        .with_selection(TournamentSelection)
        .with_crossover(OrderCrossover)
        .with_mutation(SwapMutation)
        .with_repeats(3)
        .run(&FourCities::new())
        .unwrap();

    assert_eq!(outcome.points_evaluated, 4);
    assert!((outcome.mean_fitness - 10.0).abs() < 1e-9);
}
