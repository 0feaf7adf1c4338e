//! NSGA-II style fast non-dominated sorting and crowding distance over the
//! fixed objective pair (profit maximized, drawdown minimized).

use crate::engines::optimization::individual::Individual;
use std::cmp::Ordering;

/// Check if individual A dominates individual B: no worse on both objectives
/// and strictly better on at least one. A strict partial order; two
/// individuals may be mutually non-dominating.
pub fn dominates(a: &Individual, b: &Individual) -> bool {
    a.profit >= b.profit
        && a.drawdown <= b.drawdown
        && (a.profit > b.profit || a.drawdown < b.drawdown)
}

/// Fast non-dominated sorting. Returns index fronts (front 0 best) and writes
/// each individual's rank. Domination counts and dominated lists are local
/// side tables; nothing persists on the individuals between sorts.
pub fn fast_non_dominated_sort(pool: &mut [Individual]) -> Vec<Vec<usize>> {
    let n = pool.len();

    let mut domination_count = vec![0usize; n];
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();

    let mut first_front = Vec::new();

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }

            if dominates(&pool[i], &pool[j]) {
                dominated[i].push(j);
            } else if dominates(&pool[j], &pool[i]) {
                domination_count[i] += 1;
            }
        }

        if domination_count[i] == 0 {
            pool[i].rank = 0;
            first_front.push(i);
        }
    }

    fronts.push(first_front);

    // Peel subsequent fronts: members of front i release everyone they
    // dominate; whoever reaches count zero forms front i + 1.
    let mut front_index = 0;
    while front_index < fronts.len() && !fronts[front_index].is_empty() {
        let mut next_front = Vec::new();

        for &i in &fronts[front_index] {
            for &j in &dominated[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    pool[j].rank = front_index + 1;
                    next_front.push(j);
                }
            }
        }

        if !next_front.is_empty() {
            fronts.push(next_front);
        }
        front_index += 1;
    }

    fronts
}

/// Accumulate crowding distance over the members of one front (or any index
/// set). Boundary members on each objective get infinity; interior members
/// add the normalized gap between their neighbors, summed across objectives.
/// An objective whose values are all equal contributes nothing.
pub fn crowding_distance(pool: &mut [Individual], members: &[usize]) {
    let size = members.len();

    if size <= 2 {
        // Every member sits on a boundary.
        for &idx in members {
            pool[idx].crowding_distance = f64::INFINITY;
        }
        return;
    }

    for &idx in members {
        pool[idx].crowding_distance = 0.0;
    }

    let objectives: [fn(&Individual) -> f64; 2] = [|i| i.profit, |i| i.drawdown];

    for objective in objectives {
        let mut sorted: Vec<usize> = members.to_vec();
        sorted.sort_by(|&a, &b| {
            objective(&pool[a])
                .partial_cmp(&objective(&pool[b]))
                .unwrap_or(Ordering::Equal)
        });

        pool[sorted[0]].crowding_distance = f64::INFINITY;
        pool[sorted[size - 1]].crowding_distance = f64::INFINITY;

        let min_value = objective(&pool[sorted[0]]);
        let max_value = objective(&pool[sorted[size - 1]]);
        if max_value == min_value {
            continue;
        }
        let range = max_value - min_value;

        for window in 1..(size - 1) {
            let idx = sorted[window];
            let prev_value = objective(&pool[sorted[window - 1]]);
            let next_value = objective(&pool[sorted[window + 1]]);
            pool[idx].crowding_distance += (next_value - prev_value) / range;
        }
    }
}

/// Crowded comparison operator: prefer the lower front, break ties with the
/// larger crowding distance. Returns true when A should be preferred over B.
pub fn crowded_comparison(a: &Individual, b: &Individual) -> bool {
    if a.rank != b.rank {
        return a.rank < b.rank;
    }
    a.crowding_distance > b.crowding_distance
}
