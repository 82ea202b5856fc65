//! Consumer-facing extraction API.
//!
//! What the shipped extension calls: run the production ruleset over a
//! parsed page and pull a value per feature, or absent. The production
//! coefficients are the curated defaults; a freshly tuned vector can be
//! substituted via [`extract_with`].

use crate::error::{FeatureError, RulesetError};
use crate::factory::RulesetFactory;
use crate::ruleset::{FactSet, Feature, Ruleset};
use scraper::Html;

/// The features extracted from a product page, each absent when the page
/// had no convincing candidate or the winning element's value was empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedProduct {
    pub title: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
}

impl ExtractedProduct {
    /// Whether any feature was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.image.is_none() && self.price.is_none()
    }
}

/// Extracts a product using the production coefficient vector.
///
/// The only error here is a build-time configuration problem; a page where
/// nothing is found yields an [`ExtractedProduct`] full of `None`s.
pub fn extract(document: &Html) -> Result<ExtractedProduct, RulesetError> {
    let coefficients =
        RulesetFactory::coefficients_in_order(&RulesetFactory::default_coefficients())?;
    let ruleset = RulesetFactory::build(&coefficients)?;
    Ok(extract_with(document, &ruleset))
}

/// Extracts a product using a caller-supplied ruleset. Partial extraction
/// is fine: each feature stands or falls on its own.
pub fn extract_with(document: &Html, ruleset: &Ruleset) -> ExtractedProduct {
    let facts = ruleset.evaluate(document);
    ExtractedProduct {
        title: feature_value(&facts, Feature::Title).ok(),
        image: feature_value(&facts, Feature::Image).ok(),
        price: feature_value(&facts, Feature::Price).ok(),
    }
}

/// The typed per-feature form: `NotFound` when the page has no candidates,
/// `EmptyValue` when the winning element yields a blank value. The two are
/// never conflated.
pub fn feature_value(facts: &FactSet<'_>, feature: Feature) -> Result<String, FeatureError> {
    let fact = facts.best(feature)?;
    match feature.extraction_property().value_of(fact.element) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(FeatureError::EmptyValue(feature)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = r#"<html><head><title>Shop</title></head><body>
        <h1 class="product-title">Deluxe Widget 3000</h1>
        <img class="product-image" width="600" height="400" src="widget.jpg">
        <span class="price">$ 24.99</span>
    </body></html>"#;

    #[test]
    fn test_extracts_all_three_features() {
        let doc = Html::parse_document(PRODUCT_PAGE);
        let product = extract(&doc).unwrap();

        assert_eq!(product.title.as_deref(), Some("Deluxe Widget 3000"));
        assert_eq!(product.image.as_deref(), Some("widget.jpg"));
        assert_eq!(product.price.as_deref(), Some("$ 24.99"));
        assert!(!product.is_empty());
    }

    #[test]
    fn test_partial_extraction_is_acceptable() {
        let doc = Html::parse_document(
            r#"<html><body><h1>An unpriced article heading</h1></body></html>"#,
        );
        let product = extract(&doc).unwrap();

        assert!(product.title.is_some());
        assert_eq!(product.image, None);
        assert_eq!(product.price, None);
    }

    #[test]
    fn test_empty_value_distinct_from_not_found() {
        // A winning image candidate with a blank src is EmptyValue; a page
        // with no images at all is NotFound.
        let blank = Html::parse_document(
            r#"<html><body><img class="product-image" width="600" height="400" src=""></body></html>"#,
        );
        let coefficients =
            RulesetFactory::coefficients_in_order(&RulesetFactory::default_coefficients())
                .unwrap();
        let ruleset = RulesetFactory::build(&coefficients).unwrap();

        let facts = ruleset.evaluate(&blank);
        assert_eq!(
            feature_value(&facts, Feature::Image).unwrap_err(),
            FeatureError::EmptyValue(Feature::Image)
        );

        let none = Html::parse_document("<html><body><p>text only</p></body></html>");
        let facts = ruleset.evaluate(&none);
        assert_eq!(
            feature_value(&facts, Feature::Image).unwrap_err(),
            FeatureError::NotFound(Feature::Image)
        );
    }

    #[test]
    fn test_extraction_matches_direct_topology_compile() {
        // Canonicalizing the named defaults and compiling must behave the
        // same as compiling the equivalent plain vector.
        let named = RulesetFactory::default_coefficients();
        let via_names = RulesetFactory::coefficients_in_order(&named).unwrap();
        let direct = RulesetFactory::build(&via_names).unwrap();

        let doc = Html::parse_document(PRODUCT_PAGE);
        assert_eq!(extract(&doc).unwrap(), extract_with(&doc, &direct));
    }
}
