//! Corpus evaluation harness.

use super::sample::{Corpus, Sample, MARKER_ATTRIBUTE};
use crate::ruleset::{Feature, Ruleset};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

/// Scores a ruleset against the corpus for one target feature.
///
/// Cost is failures / total, in `[0.0, 1.0]`; 0.0 means every sample's top
/// candidate carried the expected marker. Samples are independent and the
/// aggregate is a plain sum, so execution order never affects the result;
/// with the `parallel` feature the samples are scored on the rayon pool.
///
/// A sample the ruleset cannot evaluate (no candidates, marker missing) is
/// a counted failure, never a fatal error of the run.
pub fn score(corpus: &Corpus, ruleset: &Ruleset, feature: Feature) -> f64 {
    if corpus.is_empty() {
        debug!("scoring an empty corpus, cost defined as 0.0");
        return 0.0;
    }

    #[cfg(feature = "parallel")]
    let failures = corpus
        .samples()
        .par_iter()
        .filter(|sample| !sample_matches(sample, ruleset, feature))
        .count();

    #[cfg(not(feature = "parallel"))]
    let failures = corpus
        .samples()
        .iter()
        .filter(|sample| !sample_matches(sample, ruleset, feature))
        .count();

    failures as f64 / corpus.len() as f64
}

/// Whether the ruleset's top candidate for `feature` is the sample's
/// marked ground-truth element (string equality on the marker value).
fn sample_matches(sample: &Sample, ruleset: &Ruleset, feature: Feature) -> bool {
    let facts = ruleset.evaluate(sample.document());
    match facts.best(feature) {
        Ok(fact) => fact.element.value().attr(MARKER_ATTRIBUTE) == Some(feature.id()),
        Err(error) => {
            warn!(sample = sample.name(), %feature, %error, "sample counted as failure");
            false
        }
    }
}
