//! Genetic algorithm over flat controller weight vectors.
//!
//! Each generation the population is ranked by fitness, the top fraction is
//! kept verbatim as elites, and the rest is refilled with mutated uniform
//! crossovers of two elites.

use ndarray::{Array1, Zip};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::error::SimError;
use super::params::Params;

/// One candidate weight vector and the fitness it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    /// Controller weights, laid out as described in [`super::brain`].
    pub weights: Array1<f32>,
    /// Score of the agent this genome controlled last generation.
    pub fitness: f32,
}

impl Genome {
    /// Creates a genome with weights drawn uniformly from `[-1, 1]`.
    pub fn new_random(num_weights: usize, rng: &mut impl Rng) -> Self {
        Self {
            weights: Array1::from_shape_fn(num_weights, |_| rng.random_range(-1.0..=1.0)),
            fitness: 0.0,
        }
    }

    /// Creates a zeroed genome, used as a crossover target.
    pub fn zeros(num_weights: usize) -> Self {
        Self {
            weights: Array1::zeros(num_weights),
            fitness: 0.0,
        }
    }
}

/// Elitism, crossover and mutation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionParams {
    /// Fraction of the population kept as elites.
    pub elite_rate: f32,
    /// Per-weight mutation probability.
    pub mutation_rate: f32,
    /// Scale of a mutation step.
    pub mutation_stddev: f32,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            elite_rate: 0.05,
            mutation_rate: 0.1,
            mutation_stddev: 0.2,
        }
    }
}

impl From<&Params> for EvolutionParams {
    fn from(params: &Params) -> Self {
        Self {
            elite_rate: params.elite_rate,
            mutation_rate: params.mutation_rate,
            mutation_stddev: params.mutation_stddev,
        }
    }
}

/// Owns the population. Genome `i` drives player `i` within a generation.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    /// Current generation's genomes.
    pub population: Vec<Genome>,
    num_weights: usize,
    settings: EvolutionParams,
}

impl GeneticAlgorithm {
    /// Creates `num_genomes` random genomes of `num_weights` weights each.
    pub fn new(
        num_genomes: usize,
        num_weights: usize,
        settings: EvolutionParams,
        rng: &mut impl Rng,
    ) -> Self {
        let population = (0..num_genomes)
            .map(|_| Genome::new_random(num_weights, rng))
            .collect();

        Self {
            population,
            num_weights,
            settings,
        }
    }

    /// Weight count every genome must have.
    pub fn num_weights(&self) -> usize {
        self.num_weights
    }

    /// Evolution settings in use.
    pub fn settings(&self) -> EvolutionParams {
        self.settings
    }

    /// Number of elites kept from a population of `num_genomes`.
    pub fn num_elites(&self, num_genomes: usize) -> usize {
        if num_genomes == 0 {
            return 0;
        }

        let elites = (num_genomes as f32 * self.settings.elite_rate).floor() as usize;
        elites.clamp(1, num_genomes)
    }

    /// Fills `child` with weights picked from either parent with equal odds.
    ///
    /// Fails without touching `child` when the three lengths disagree.
    pub fn crossover(
        parent_a: &Genome,
        parent_b: &Genome,
        child: &mut Genome,
        rng: &mut impl Rng,
    ) -> Result<(), SimError> {
        let expected = parent_a.weights.len();

        for other in [&parent_b.weights, &child.weights] {
            if other.len() != expected {
                return Err(SimError::GenomeLength {
                    expected,
                    actual: other.len(),
                });
            }
        }

        Zip::from(&mut child.weights)
            .and(&parent_a.weights)
            .and(&parent_b.weights)
            .for_each(|w, &a, &b| *w = if rng.random_bool(0.5) { a } else { b });

        Ok(())
    }

    /// Perturbs each weight with probability `mutation_rate` by a uniform
    /// step in `[-mutation_stddev, mutation_stddev]`.
    pub fn mutate(&self, genome: &mut Genome, rng: &mut impl Rng) {
        let EvolutionParams {
            mutation_rate,
            mutation_stddev,
            ..
        } = self.settings;

        for w in genome.weights.iter_mut() {
            if rng.random::<f32>() < mutation_rate {
                *w += rng.random_range(-1.0f32..=1.0) * mutation_stddev;
            }
        }
    }

    /// Replaces the population with the next generation.
    ///
    /// Elites are copied unchanged; every other slot is a mutated crossover
    /// of two elites drawn uniformly with replacement. On error the current
    /// population is left as it was, apart from its ordering.
    pub fn evolve(&mut self, rng: &mut impl Rng) -> Result<(), SimError> {
        self.population
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let num_genomes = self.population.len();
        let num_elites = self.num_elites(num_genomes);
        let elites = &self.population[..num_elites];

        let mut next_population = Vec::with_capacity(num_genomes);
        next_population.extend_from_slice(elites);

        while next_population.len() < num_genomes {
            let (Some(parent_a), Some(parent_b)) = (elites.choose(rng), elites.choose(rng)) else {
                break;
            };

            let mut child = Genome::zeros(self.num_weights);
            Self::crossover(parent_a, parent_b, &mut child, rng)?;
            self.mutate(&mut child, rng);
            next_population.push(child);
        }

        self.population = next_population;
        Ok(())
    }

    /// Fitness of the best genome, if any.
    pub fn best_fitness(&self) -> Option<f32> {
        self.population
            .iter()
            .map(|g| g.fitness)
            .max_by(f32::total_cmp)
    }
}
