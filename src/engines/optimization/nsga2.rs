use crate::config::optimizer::OptimizerConfig;
use crate::config::traits::ConfigSection;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::optimization::individual::Individual;
use crate::engines::optimization::operators::{
    crossover, mutate, tournament_select, ConstraintRepair,
};
use crate::engines::optimization::pareto;
use crate::engines::optimization::space::ParameterSpace;
use crate::error::{Result, StratoptError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

/// NSGA-II generation driver.
///
/// Owns the run configuration, the strategy's parameter space, the fitness
/// evaluator and the constraint-repair capability, plus a seedable RNG for
/// reproducible runs.
pub struct Nsga2 {
    config: OptimizerConfig,
    space: ParameterSpace,
    evaluator: Box<dyn FitnessEvaluator>,
    repair: Box<dyn ConstraintRepair>,
    rng: StdRng,
}

impl Nsga2 {
    pub fn new(
        config: OptimizerConfig,
        space: ParameterSpace,
        evaluator: Box<dyn FitnessEvaluator>,
        repair: Box<dyn ConstraintRepair>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            space,
            evaluator,
            repair,
            rng,
        })
    }

    /// Run the full optimization and return the final parent population,
    /// ordered by rank, then by descending crowding distance.
    pub fn run(&mut self) -> Result<Vec<Individual>> {
        let population_size = self.config.population_size;

        let mut population = self.initial_population()?;
        self.evaluate(&mut population)?;

        for generation in 0..self.config.generations {
            Self::sort_and_score(&mut population);

            let mut offspring = self.offspring_population(&population)?;
            self.evaluate(&mut offspring)?;

            // Combined pool of parents and offspring, 2P individuals.
            population.append(&mut offspring);
            let fronts = Self::sort_and_score(&mut population);
            population = Self::next_population(population, &fronts, population_size);

            log::info!(
                "Generation {}/{} complete ({} individuals on front 0)",
                generation + 1,
                self.config.generations,
                population.iter().filter(|i| i.rank == 0).count()
            );
        }

        Self::sort_and_score(&mut population);
        population.sort_by(|a, b| {
            a.rank.cmp(&b.rank).then_with(|| {
                b.crowding_distance
                    .partial_cmp(&a.crowding_distance)
                    .unwrap_or(Ordering::Equal)
            })
        });

        Ok(population)
    }

    /// Exactly P individuals, distinct by full parameter-map equality.
    /// Consecutive collisions beyond the retry cap mean the discrete space is
    /// too small for the requested population.
    fn initial_population(&mut self) -> Result<Vec<Individual>> {
        let mut population = Vec::with_capacity(self.config.population_size);
        let mut seen: HashSet<String> = HashSet::new();
        let mut rejected = 0;

        while population.len() < self.config.population_size {
            if rejected >= self.config.max_retries {
                return Err(StratoptError::SpaceExhausted { retries: rejected });
            }

            let parameters = self.space.sample(&mut self.rng);
            let individual = Individual::new(parameters);
            if seen.insert(individual.signature()) {
                population.push(individual);
                rejected = 0;
            } else {
                rejected += 1;
            }
        }

        Ok(population)
    }

    /// Evaluate every individual in parallel; a zero-profit result is
    /// remapped to `(-inf, +inf)` so it is dominated by anything profitable.
    fn evaluate(&self, population: &mut [Individual]) -> Result<()> {
        let evaluator = self.evaluator.as_ref();
        let objectives = population
            .par_iter()
            .map(|individual| evaluator.evaluate(&individual.parameters))
            .collect::<Result<Vec<_>>>()?;

        for (individual, objective) in population.iter_mut().zip(objectives) {
            if objective.profit == 0.0 {
                individual.profit = f64::NEG_INFINITY;
                individual.drawdown = f64::INFINITY;
            } else {
                individual.profit = objective.profit;
                individual.drawdown = objective.drawdown;
            }
        }

        Ok(())
    }

    /// Reset bookkeeping, run the non-dominated sort, and score every front.
    fn sort_and_score(pool: &mut [Individual]) -> Vec<Vec<usize>> {
        for individual in pool.iter_mut() {
            individual.reset_scores();
        }
        let fronts = pareto::fast_non_dominated_sort(pool);
        for front in &fronts {
            pareto::crowding_distance(pool, front);
        }
        fronts
    }

    /// Breed P offspring from ranked, scored parents. Each candidate goes
    /// through crossover, mutation and repair; its parameter map must be new
    /// to this generation's working pool (parents plus offspring accepted so
    /// far). Uniqueness is not tracked across generations.
    fn offspring_population(&mut self, parents: &[Individual]) -> Result<Vec<Individual>> {
        let mut seen: HashSet<String> = parents.iter().map(|p| p.signature()).collect();
        let mut offspring = Vec::with_capacity(self.config.population_size);
        let mut rejected = 0;

        while offspring.len() < self.config.population_size {
            if rejected >= self.config.max_retries {
                return Err(StratoptError::SpaceExhausted { retries: rejected });
            }

            let parent1 = tournament_select(parents, &mut self.rng);
            let parent2 = tournament_select(parents, &mut self.rng);

            let mut parameters = crossover(parent1, parent2, &self.space, &mut self.rng);
            mutate(&mut parameters, &self.space, &mut self.rng);
            self.repair.repair(&mut parameters);

            let individual = Individual::new(parameters);
            if seen.insert(individual.signature()) {
                offspring.push(individual);
                rejected = 0;
            } else {
                rejected += 1;
            }
        }

        Ok(offspring)
    }

    /// Build the next parent population: whole fronts in rank order while
    /// they fit, then the highest-crowding-distance members of the first
    /// front that would overflow.
    fn next_population(
        pool: Vec<Individual>,
        fronts: &[Vec<usize>],
        population_size: usize,
    ) -> Vec<Individual> {
        let mut selected: Vec<usize> = Vec::with_capacity(population_size);

        for front in fronts {
            if selected.len() + front.len() <= population_size {
                selected.extend_from_slice(front);
            } else {
                let remaining = population_size - selected.len();
                if remaining > 0 {
                    let mut by_distance = front.clone();
                    by_distance.sort_by(|&a, &b| {
                        pool[a]
                            .crowding_distance
                            .partial_cmp(&pool[b].crowding_distance)
                            .unwrap_or(Ordering::Equal)
                    });
                    selected.extend(by_distance.iter().rev().take(remaining));
                }
            }
        }

        let mut slots: Vec<Option<Individual>> = pool.into_iter().map(Some).collect();
        selected
            .into_iter()
            .map(|i| slots[i].take().expect("front indices are disjoint"))
            .collect()
    }
}
