//! Max-Cut Example
//!
//! Splits the vertices of a weighted graph into two sides so that the total
//! weight of the edges between the sides is as large as possible. The cut
//! function is submodular, so every optimizer in submodmax applies.
//!
//! Usage: `max-cut [VERTICES [SEED]]`. Without arguments the 3-vertex
//! example graph is used; otherwise a random graph with the given number of
//! vertices. The optimizer is read from `optimizer.toml` when present.

use std::collections::HashSet;

use submodmax::prelude::*;
use submodmax::CONFIG_FILE;
use submodmax_test::{brute_force_max, random_graph, triangle_graph, IncrementalMaxCut};

/// Largest graph checked against the power-set enumeration.
const BRUTE_FORCE_LIMIT: usize = 20;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let graph = match args.next().and_then(|n| n.parse::<usize>().ok()) {
        Some(n) => {
            let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
            random_graph(n, 10, seed)
        }
        None => triangle_graph(),
    };

    let config = OptimizerConfig::load(CONFIG_FILE).unwrap_or_default();
    let objective = IncrementalMaxCut::new(graph, 0.0)?;
    let ground_set = objective.ground_set();
    let n = ground_set.len();

    let optimum = submodmax::optimize_incremental_with_config(
        &config,
        objective.clone(),
        ground_set.clone(),
    )?;

    println!("\nMax-cut on {} vertices ({}):", n, config.algorithm.name());
    println!("  cut side: {}", format_set(optimum.set()));
    println!("  cut value: {}", optimum.func_info().cut);
    println!("  evaluations: {}", optimum.statistics().evaluations);

    if n <= BRUTE_FORCE_LIMIT {
        let (best_set, best_value) = brute_force_max(objective.plain(), &ground_set)?;
        let ratio = if best_value > 0.0 {
            optimum.value() / best_value
        } else {
            1.0
        };
        println!(
            "  brute force: {} with value {} (ratio {:.3})",
            format_set(&best_set),
            best_value,
            ratio
        );
    }

    Ok(())
}

fn format_set(set: &HashSet<usize>) -> String {
    let mut vertices: Vec<usize> = set.iter().copied().collect();
    vertices.sort_unstable();
    format!("{:?}", vertices)
}
