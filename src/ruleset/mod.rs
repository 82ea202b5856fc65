//! Feature ruleset engine.
//!
//! Scores candidate DOM elements against weighted heuristic rules to decide
//! which element on a product page is the title, the image, and the price.
//! Evaluation is side-effect-free and deterministic for a fixed
//! (document, ruleset) pair: the engine never mutates the document, and for
//! each feature it returns candidates ranked by descending accumulated
//! score, with ties broken by document order.

mod engine;
mod rules;
mod types;

pub use engine::Ruleset;
pub use rules::{DocumentStats, RuleKind};
pub use types::{ExtractionProperty, Fact, FactSet, Feature};
