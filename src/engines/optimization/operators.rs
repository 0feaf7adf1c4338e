use crate::engines::optimization::individual::Individual;
use crate::engines::optimization::pareto::crowded_comparison;
use crate::engines::optimization::space::{ParameterMap, ParameterSpace};
use rand::seq::SliceRandom;
use rand::Rng;

/// Cross-parameter invariants that simple bounds cannot express, applied
/// after mutation. Strategies without such invariants use `NoRepair`.
pub trait ConstraintRepair: Send + Sync {
    fn repair(&self, parameters: &mut ParameterMap);
}

/// Pass-through repair.
pub struct NoRepair;

impl ConstraintRepair for NoRepair {
    fn repair(&self, _parameters: &mut ParameterMap) {}
}

/// Binary tournament: two distinct candidates drawn uniformly, the winner has
/// the strictly lower rank, ties broken by strictly greater crowding
/// distance.
pub fn tournament_select<'a, R: Rng>(pool: &'a [Individual], rng: &mut R) -> &'a Individual {
    if pool.len() < 2 {
        return &pool[0];
    }

    let picks = rand::seq::index::sample(rng, pool.len(), 2);
    let a = &pool[picks.index(0)];
    let b = &pool[picks.index(1)];

    if crowded_comparison(a, b) {
        a
    } else {
        b
    }
}

/// Key-level uniform crossover: the child starts as parent 1's map, then a
/// uniformly sized subset of parameter names (at least one) is overwritten
/// with parent 2's values.
pub fn crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    space: &ParameterSpace,
    rng: &mut R,
) -> ParameterMap {
    let mut child = parent1.parameters.clone();

    let names: Vec<&str> = space.names().collect();
    let count = rng.gen_range(1..=names.len());
    for &name in names.choose_multiple(rng, count) {
        if let Some(value) = parent2.parameters.get(name) {
            child.insert(name.to_string(), *value);
        }
    }

    child
}

/// Bounded multiplicative mutation: a uniformly sized subset of parameter
/// names (possibly empty) is scaled by a factor in `[-2, 2]` around 1, then
/// cast and clamped back into the descriptor's domain.
pub fn mutate<R: Rng>(parameters: &mut ParameterMap, space: &ParameterSpace, rng: &mut R) {
    let names: Vec<&str> = space.names().collect();
    let count = rng.gen_range(0..=names.len());
    for &name in names.choose_multiple(rng, count) {
        let Some(descriptor) = space.descriptor(name) else {
            continue;
        };
        let Some(old) = parameters.get(name).map(|v| v.as_f64()) else {
            continue;
        };
        let factor = rng.gen_range(-2.0..=2.0);
        parameters.insert(name.to_string(), descriptor.cast_clamp(old * (1.0 + factor)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::optimization::space::{ParamDescriptor, ParamValue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn space() -> ParameterSpace {
        ParameterSpace::new(vec![
            ParamDescriptor::integer("fast", "Fast Period", 2, 50),
            ParamDescriptor::integer("slow", "Slow Period", 10, 200),
            ParamDescriptor::real("stop", "Stop %", 1.0, 40.0, 2),
        ])
        .unwrap()
    }

    fn individual_with(fast: i64, slow: i64, stop: f64) -> Individual {
        let mut params = ParameterMap::new();
        params.insert("fast".to_string(), ParamValue::Int(fast));
        params.insert("slow".to_string(), ParamValue::Int(slow));
        params.insert("stop".to_string(), ParamValue::Float(stop));
        Individual::new(params)
    }

    #[test]
    fn tournament_prefers_lower_rank() {
        let mut a = individual_with(2, 10, 1.0);
        let mut b = individual_with(3, 11, 2.0);
        a.rank = 0;
        b.rank = 3;

        let pool = vec![a, b];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let winner = tournament_select(&pool, &mut rng);
            assert_eq!(winner.rank, 0);
        }
    }

    #[test]
    fn tournament_breaks_rank_ties_by_distance() {
        let mut a = individual_with(2, 10, 1.0);
        let mut b = individual_with(3, 11, 2.0);
        a.crowding_distance = 5.0;
        b.crowding_distance = 0.1;

        let pool = vec![a, b];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let winner = tournament_select(&pool, &mut rng);
            assert_eq!(winner.crowding_distance, 5.0);
        }
    }

    #[test]
    fn crossover_takes_every_value_from_a_parent() {
        let space = space();
        let p1 = individual_with(5, 20, 3.0);
        let p2 = individual_with(40, 150, 30.0);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let child = crossover(&p1, &p2, &space, &mut rng);
            assert_eq!(child.len(), 3);
            for (name, value) in &child {
                let from_p1 = p1.parameters[name] == *value;
                let from_p2 = p2.parameters[name] == *value;
                assert!(from_p1 || from_p2);
            }
            // At least one key crossed over from parent 2.
            assert!(child.iter().any(|(name, value)| p2.parameters[name] == *value));
        }
    }

    #[test]
    fn mutation_respects_bounds_and_kinds() {
        let space = space();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..500 {
            let mut params = space.sample(&mut rng);
            mutate(&mut params, &space, &mut rng);
            assert!(space.contains(&params));
        }
    }
}
