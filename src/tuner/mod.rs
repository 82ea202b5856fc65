//! Simulated-annealing coefficient tuner.
//!
//! Searches coefficient-vector space to minimize the corpus failure rate:
//! nudge one coefficient by ±1, evaluate the neighbor's cost (memoized),
//! always accept improvements, sometimes accept worsening moves with a
//! probability that decays as the temperature cools geometrically.
//!
//! The tuner depends only on the [`CostEvaluator`] capability. Cost
//! evaluation is expensive and many search paths revisit the same vector,
//! so results are cached by the vector's canonical string form for the
//! whole run.
//!
//! # References
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;
mod types;

pub use config::{TunerConfig, BOLTZMANN};
pub use runner::{Tuner, TunerResult};
pub use types::{CorpusEvaluator, CostEvaluator};
