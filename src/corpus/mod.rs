//! Labeled sample corpus and the evaluation harness.
//!
//! A corpus is a fixed set of parsed product pages, each carrying a
//! ground-truth marker attribute on the element the ruleset ought to pick.
//! The harness drives a ruleset over every sample and reports the failure
//! rate for one target feature — the cost the tuner minimizes.

mod harness;
mod sample;

pub use harness::score;
pub use sample::{Corpus, Sample, MARKER_ATTRIBUTE};
