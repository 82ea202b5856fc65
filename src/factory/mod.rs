//! Ruleset factory.
//!
//! Compiles a flat coefficient vector into an executable [`Ruleset`](crate::ruleset::Ruleset)
//! against a fixed, versioned rule topology, and canonicalizes named
//! coefficient maps into vector form. The topology table is the contract
//! between this factory and the tuner: any change to it invalidates every
//! previously tuned vector.

mod builder;
mod topology;

pub use builder::{CoefficientFile, RulesetFactory};
pub use topology::{topology, topology_size, TOPOLOGY_VERSION};
