//! The annealing loop.

use super::config::{TunerConfig, BOLTZMANN};
use super::types::CostEvaluator;
use crate::error::TuneError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info};

/// Result of a tuning run.
#[derive(Debug, Clone)]
pub struct TunerResult {
    /// The best coefficient vector found.
    pub best: Vec<f64>,

    /// Cost of the best vector.
    pub best_cost: f64,

    /// Evaluator invocations (memo-cache misses).
    pub evaluations: usize,

    /// Neighbor costs answered from the memo cache.
    pub cache_hits: usize,

    /// Accepted moves, improvements included.
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the run ended.
    pub final_temperature: f64,

    /// Best cost after the initial evaluation and after each cooling step.
    pub cost_history: Vec<f64>,
}

/// Executes the annealing search.
pub struct Tuner;

impl Tuner {
    /// Runs the search from `seed`, minimizing `evaluator`'s cost.
    ///
    /// The loop is strictly sequential: every inner iteration depends on
    /// the previous one's accept/reject outcome. Within one cost
    /// evaluation the evaluator may parallelize freely.
    ///
    /// Converges early once a cost of 0.0 is seen — no neighbor can beat
    /// the floor, so further cooling is pointless.
    pub fn run<E: CostEvaluator>(
        evaluator: &E,
        seed: Vec<f64>,
        config: &TunerConfig,
    ) -> Result<TunerResult, TuneError> {
        config.validate().map_err(TuneError::InvalidConfig)?;
        if seed.is_empty() {
            return Err(TuneError::InvalidConfig(
                "seed coefficient vector must not be empty".into(),
            ));
        }

        let mut rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };

        info!(
            dimensions = seed.len(),
            cooling_steps = config.cooling_steps,
            steps_per_temp = config.steps_per_temp,
            "starting tuning run"
        );

        // Memoized costs for the whole run, keyed by the vector's canonical
        // string form. Many search paths revisit the same vector and each
        // evaluation walks the full corpus.
        let mut seen: HashMap<String, f64> = HashMap::new();
        let mut evaluations = 0usize;
        let mut cache_hits = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut current = seed;
        let mut current_cost = memo_cost(
            evaluator,
            &mut seen,
            &current,
            &mut evaluations,
            &mut cache_hits,
        )?;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut cost_history = vec![best_cost];

        for _ in 0..config.cooling_steps {
            if best_cost == 0.0 {
                debug!("cost floor reached, converging early");
                break;
            }

            let start_cost = current_cost;
            for _ in 0..config.steps_per_temp {
                let neighbor = random_transition(&current, &mut rng);
                let new_cost = memo_cost(
                    evaluator,
                    &mut seen,
                    &neighbor,
                    &mut evaluations,
                    &mut cache_hits,
                )?;

                if new_cost < current_cost {
                    // Always take improvements.
                    current_cost = new_cost;
                    current = neighbor;
                    accepted_moves += 1;
                    improving_moves += 1;
                    if new_cost < best_cost {
                        best_cost = new_cost;
                        best = current.clone();
                        debug!(best_cost, "new best solution");
                    }
                } else {
                    // Sometimes take non-improvements.
                    let minus_delta = current_cost - new_cost;
                    let merit = (minus_delta / (BOLTZMANN * temperature)).exp();
                    if merit > rng.random::<f64>() {
                        current_cost = new_cost;
                        current = neighbor;
                        accepted_moves += 1;
                    }
                }

                // Exit if we're not moving at this temperature.
                if (current_cost - start_cost).abs() < f64::EPSILON {
                    break;
                }
            }
            temperature *= config.cooling_fraction;
            cost_history.push(best_cost);
        }

        info!(
            best_cost,
            evaluations, cache_hits, "tuning run complete"
        );

        Ok(TunerResult {
            best,
            best_cost,
            evaluations,
            cache_hits,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cost_history,
        })
    }
}

/// Nudge one uniformly chosen coefficient by ±1.
///
/// The step is a fixed integer, not a percentage of the current value:
/// percentage steps never revisit a vector exactly, which would starve the
/// memo cache.
fn random_transition<R: Rng>(coefficients: &[f64], rng: &mut R) -> Vec<f64> {
    let mut next = coefficients.to_vec();
    let position = rng.random_range(0..next.len());
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    next[position] += direction;
    next
}

/// Looks the vector up in the cache; evaluates and stores on a miss. One
/// tuner run is sequential, so this is the at-most-one-evaluation
/// guarantee per distinct vector.
fn memo_cost<E: CostEvaluator>(
    evaluator: &E,
    seen: &mut HashMap<String, f64>,
    coefficients: &[f64],
    evaluations: &mut usize,
    cache_hits: &mut usize,
) -> Result<f64, TuneError> {
    let key = cache_key(coefficients);
    if let Some(&cost) = seen.get(&key) {
        *cache_hits += 1;
        return Ok(cost);
    }
    let cost = evaluator.evaluate(coefficients)?;
    *evaluations += 1;
    seen.insert(key, cost);
    Ok(cost)
}

/// Canonical string form of a vector; stable across runs because the
/// coefficient order is the topology order.
fn cache_key(coefficients: &[f64]) -> String {
    let parts: Vec<String> = coefficients.iter().map(|c| c.to_string()).collect();
    parts.join(",")
}
