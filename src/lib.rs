//! Rule-based product feature extraction with a coefficient tuner.
//!
//! Extracts the three features that identify a product on an e-commerce
//! page — title, image, price — by scoring candidate DOM elements against
//! weighted heuristic rules, and learns those weights offline with
//! simulated annealing over a labeled page corpus.
//!
//! - **ruleset**: the feature ruleset engine. Given a parsed document,
//!   produces scored candidate facts per feature; the top-ranked fact is
//!   the engine's answer.
//! - **factory**: compiles a flat coefficient vector into an executable
//!   ruleset against a fixed, versioned rule topology, and canonicalizes
//!   named coefficient maps into vector form.
//! - **corpus**: labeled sample pages and the evaluation harness that
//!   turns a ruleset into a failure-rate cost.
//! - **tuner**: the simulated-annealing search over coefficient space,
//!   with memoized cost evaluation.
//! - **extract**: the consumer-facing API the shipped extension calls,
//!   backed by the production coefficient vector.
//!
//! # Data flow
//!
//! Tuner candidate vectors → factory-compiled rulesets → harness cost over
//! the corpus → back into the tuner's search state. The tuned vector then
//! becomes the production vector behind [`extract::extract`].
//!
//! # Example
//!
//! ```
//! use commerce_extraction::corpus::{Corpus, Sample};
//! use commerce_extraction::factory::RulesetFactory;
//! use commerce_extraction::ruleset::Feature;
//! use commerce_extraction::tuner::{CorpusEvaluator, Tuner, TunerConfig};
//!
//! let mut corpus = Corpus::default();
//! corpus.push(Sample::parse(
//!     "fixture",
//!     r#"<html><body><span class="price" data-fathom="price">$ 9.99</span></body></html>"#,
//! ));
//!
//! let seed = RulesetFactory::coefficients_in_order(
//!     &RulesetFactory::default_coefficients(),
//! )?;
//! let evaluator = CorpusEvaluator::new(&corpus, Feature::Price);
//! let config = TunerConfig::default()
//!     .with_cooling_steps(10)
//!     .with_steps_per_temp(5)
//!     .with_seed(42);
//!
//! let result = Tuner::run(&evaluator, seed, &config)?;
//! assert!(result.best_cost <= 1.0);
//! # Ok::<(), commerce_extraction::error::TuneError>(())
//! ```

pub mod corpus;
pub mod error;
pub mod extract;
pub mod factory;
pub mod ruleset;
pub mod tuner;
