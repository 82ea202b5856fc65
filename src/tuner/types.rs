//! The cost-evaluation capability.

use crate::corpus::{self, Corpus};
use crate::error::TuneError;
use crate::factory::RulesetFactory;
use crate::ruleset::Feature;

/// Computes the cost of one candidate coefficient vector.
///
/// This is the only capability the tuner sees: how the cost comes to be —
/// a local corpus, a farm of live pages, a stub in a test — is the
/// implementer's business. Costs must be in `[0.0, 1.0]`, lower better,
/// and deterministic per vector (the tuner memoizes them for a whole run).
///
/// Only errors that make the whole run meaningless belong in the `Err`
/// branch (a mis-shaped vector, a broken configuration). A sample that
/// cannot be evaluated is part of the cost, not an error.
pub trait CostEvaluator {
    fn evaluate(&self, coefficients: &[f64]) -> Result<f64, TuneError>;
}

/// The corpus-backed evaluator: compiles the vector into a ruleset and
/// measures its failure rate over a labeled corpus for one target feature.
pub struct CorpusEvaluator<'a> {
    corpus: &'a Corpus,
    feature: Feature,
}

impl<'a> CorpusEvaluator<'a> {
    pub fn new(corpus: &'a Corpus, feature: Feature) -> Self {
        Self { corpus, feature }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }
}

impl CostEvaluator for CorpusEvaluator<'_> {
    fn evaluate(&self, coefficients: &[f64]) -> Result<f64, TuneError> {
        let ruleset = RulesetFactory::build(coefficients)?;
        Ok(corpus::score(self.corpus, &ruleset, self.feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Sample;
    use crate::error::RulesetError;
    use crate::factory::topology_size;

    #[test]
    fn test_shape_mismatch_propagates_as_fatal() {
        let corpus = Corpus::default();
        let evaluator = CorpusEvaluator::new(&corpus, Feature::Price);
        let wrong = vec![1.0; topology_size() + 1];
        assert!(matches!(
            evaluator.evaluate(&wrong),
            Err(TuneError::Ruleset(RulesetError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_cost_in_unit_interval() {
        let mut corpus = Corpus::default();
        corpus.push(Sample::parse(
            "labeled",
            r#"<html><body><span class="price" data-fathom="price">$ 3.50</span></body></html>"#,
        ));
        corpus.push(Sample::parse(
            "unlabeled",
            "<html><body><p>no prices</p></body></html>",
        ));
        let evaluator = CorpusEvaluator::new(&corpus, Feature::Price);
        let cost = evaluator.evaluate(&vec![1.0; topology_size()]).unwrap();
        assert!((0.0..=1.0).contains(&cost));
        assert!((cost - 0.5).abs() < 1e-12);
    }
}
