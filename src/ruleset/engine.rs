//! Ruleset evaluation.

use super::rules::{DocumentStats, RuleKind};
use super::types::{Fact, FactSet, Feature};
use crate::error::RulesetError;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// Which elements are even considered per feature. Everything else on the
/// page is invisible to the engine.
const TITLE_CANDIDATES: &str = "title, h1, h2";
const IMAGE_CANDIDATES: &str = "img";
const PRICE_CANDIDATES: &str = "span, div, h2, b, strong";

/// A rule bound to a concrete coefficient value.
#[derive(Debug, Clone, Copy)]
struct Binding {
    rule: RuleKind,
    coefficient: f64,
}

/// An executable ruleset: the fixed rule set bound to one coefficient
/// vector, plus precompiled candidate selectors.
///
/// Built by [`crate::factory::RulesetFactory`]; cheap to evaluate many
/// times; owns no document state.
#[derive(Debug)]
pub struct Ruleset {
    bindings: Vec<Binding>,
    title_candidates: Selector,
    image_candidates: Selector,
    price_candidates: Selector,
}

impl Ruleset {
    /// Binds `rules[i]` to `coefficients[i]`. Callers (the factory)
    /// guarantee the two slices line up; selector compilation is the only
    /// fallible step.
    pub(crate) fn bind(rules: &[RuleKind], coefficients: &[f64]) -> Result<Self, RulesetError> {
        debug_assert_eq!(rules.len(), coefficients.len());
        let bindings = rules
            .iter()
            .zip(coefficients)
            .map(|(&rule, &coefficient)| Binding { rule, coefficient })
            .collect();
        Ok(Self {
            bindings,
            title_candidates: compile(TITLE_CANDIDATES)?,
            image_candidates: compile(IMAGE_CANDIDATES)?,
            price_candidates: compile(PRICE_CANDIDATES)?,
        })
    }

    fn candidates(&self, feature: Feature) -> &Selector {
        match feature {
            Feature::Title => &self.title_candidates,
            Feature::Image => &self.image_candidates,
            Feature::Price => &self.price_candidates,
        }
    }

    /// Runs every rule over every candidate and returns the ranked facts
    /// per feature.
    ///
    /// Scores accumulate additively across rules for the same element;
    /// candidates whose every rule stayed silent (total 0.0) emit no fact.
    /// Sorting is stable over traversal order, so equal scores rank in
    /// document order.
    pub fn evaluate<'a>(&self, document: &'a Html) -> FactSet<'a> {
        let stats = DocumentStats::collect(document);
        let mut facts: HashMap<Feature, Vec<Fact<'a>>> = HashMap::new();

        for feature in Feature::ALL {
            let mut ranked: Vec<Fact<'a>> = document
                .select(self.candidates(feature))
                .filter_map(|element| {
                    let score: f64 = self
                        .bindings
                        .iter()
                        .filter(|binding| binding.rule.feature() == feature)
                        .map(|binding| binding.coefficient * binding.rule.score(element, &stats))
                        .sum();
                    (score > 0.0).then_some(Fact { element, score })
                })
                .collect();
            ranked.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            facts.insert(feature, ranked);
        }

        FactSet::new(facts)
    }
}

fn compile(selector: &str) -> Result<Selector, RulesetError> {
    Selector::parse(selector).map_err(|e| RulesetError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
