//! Building rulesets from coefficient vectors and named maps.

use super::topology::{topology, topology_size, TOPOLOGY_VERSION};
use crate::error::RulesetError;
use crate::ruleset::{ExtractionProperty, Feature, RuleKind, Ruleset};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Stateless factory over the fixed topology.
pub struct RulesetFactory;

impl RulesetFactory {
    /// Compiles a coefficient vector into an executable ruleset.
    ///
    /// Pure: building the same vector twice yields behaviorally identical
    /// rulesets. Fails with [`RulesetError::ShapeMismatch`] unless the
    /// vector length equals the topology size.
    pub fn build(coefficients: &[f64]) -> Result<Ruleset, RulesetError> {
        if coefficients.len() != topology_size() {
            return Err(RulesetError::ShapeMismatch {
                expected: topology_size(),
                actual: coefficients.len(),
                version: TOPOLOGY_VERSION,
            });
        }
        Ruleset::bind(topology(), coefficients)
    }

    /// Canonicalizes a named coefficient map into vector form, in topology
    /// order. Used to seed the tuner's initial search point from a
    /// human-curated default.
    ///
    /// Names outside the topology are rejected rather than ignored, so a
    /// typo in a curated map surfaces instead of silently dropping a
    /// weight; rules the map omits are rejected too.
    pub fn coefficients_in_order(
        named: &BTreeMap<String, f64>,
    ) -> Result<Vec<f64>, RulesetError> {
        for name in named.keys() {
            RuleKind::from_name(name)?;
        }
        topology()
            .iter()
            .map(|rule| {
                named
                    .get(rule.name())
                    .copied()
                    .ok_or_else(|| RulesetError::MissingCoefficient(rule.name().to_string()))
            })
            .collect()
    }

    /// The curated default coefficients shipped with the extension; the
    /// tuner's usual starting point and the production extraction weights.
    pub fn default_coefficients() -> BTreeMap<String, f64> {
        let defaults = [
            (RuleKind::HasTitleElement, 3.0),
            (RuleKind::HasTitleInClassOrId, 1.0),
            (RuleKind::IsAboveTheFoldTitle, 1.0),
            (RuleKind::HasGoodTitleLength, 1.0),
            (RuleKind::IsLargerImage, 4.0),
            (RuleKind::HasImageInClassOrId, 2.0),
            (RuleKind::IsAboveTheFoldImage, 1.0),
            (RuleKind::HasPriceSymbol, 2.0),
            (RuleKind::HasPriceInClassOrId, 2.0),
            (RuleKind::IsAboveTheFoldPrice, 1.0),
            (RuleKind::HasPriceishPattern, 1.0),
        ];
        defaults
            .into_iter()
            .map(|(rule, weight)| (rule.name().to_string(), weight))
            .collect()
    }
}

/// On-disk coefficient file: a named weight map, with optional per-feature
/// extraction property overrides.
///
/// ```json
/// {
///   "coefficients": { "hasPriceSymbol": 2.0, ... },
///   "extract_using": { "price": "innerText" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CoefficientFile {
    pub coefficients: BTreeMap<String, f64>,
    #[serde(default)]
    pub extract_using: BTreeMap<String, String>,
}

impl CoefficientFile {
    /// Parses and validates a coefficient file. Unknown coefficient names,
    /// unknown features, and unknown extraction properties are all fatal
    /// here, at build time, never later.
    pub fn from_json(json: &str) -> Result<Self, RulesetError> {
        let file: CoefficientFile = serde_json::from_str(json)?;
        RulesetFactory::coefficients_in_order(&file.coefficients)?;
        file.extraction_properties()?;
        Ok(file)
    }

    /// The seed vector this file describes, in canonical order.
    pub fn seed_vector(&self) -> Result<Vec<f64>, RulesetError> {
        RulesetFactory::coefficients_in_order(&self.coefficients)
    }

    /// Per-feature extraction property overrides, parsed into the closed
    /// enum set.
    pub fn extraction_properties(
        &self,
    ) -> Result<BTreeMap<Feature, ExtractionProperty>, RulesetError> {
        let mut properties = BTreeMap::new();
        for (feature, property) in &self.extract_using {
            properties.insert(feature.parse::<Feature>()?, property.parse()?);
        }
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_rejects_wrong_shape() {
        let short = vec![1.0; topology_size() - 1];
        match RulesetFactory::build(&short) {
            Err(RulesetError::ShapeMismatch {
                expected,
                actual,
                version,
            }) => {
                assert_eq!(expected, topology_size());
                assert_eq!(actual, topology_size() - 1);
                assert_eq!(version, TOPOLOGY_VERSION);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_cover_topology_exactly() {
        let vector =
            RulesetFactory::coefficients_in_order(&RulesetFactory::default_coefficients())
                .unwrap();
        assert_eq!(vector.len(), topology_size());
        assert!(RulesetFactory::build(&vector).is_ok());
    }

    #[test]
    fn test_unknown_name_rejected() {
        let mut named = RulesetFactory::default_coefficients();
        named.insert("hasFlashingGif".to_string(), 9.0);
        assert!(matches!(
            RulesetFactory::coefficients_in_order(&named),
            Err(RulesetError::UnrecognizedCoefficient(name)) if name == "hasFlashingGif"
        ));
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut named = RulesetFactory::default_coefficients();
        named.remove("hasPriceSymbol");
        assert!(matches!(
            RulesetFactory::coefficients_in_order(&named),
            Err(RulesetError::MissingCoefficient(name)) if name == "hasPriceSymbol"
        ));
    }

    #[test]
    fn test_canonical_order_follows_topology() {
        // Tag each named weight with its rule's topology index; the
        // canonicalized vector must read back in exactly that order.
        let named: BTreeMap<String, f64> = topology()
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.name().to_string(), i as f64))
            .collect();
        let vector = RulesetFactory::coefficients_in_order(&named).unwrap();
        let expected: Vec<f64> = (0..topology_size()).map(|i| i as f64).collect();
        assert_eq!(vector, expected);
    }

    #[test]
    fn test_coefficient_file_roundtrip() {
        let json = r#"{
            "coefficients": {
                "hasTitleElement": 3.0, "hasTitleInClassOrId": 1.0,
                "isAboveTheFoldTitle": 1.0, "hasGoodTitleLength": 1.0,
                "isLargerImage": 4.0, "hasImageInClassOrId": 2.0,
                "isAboveTheFoldImage": 1.0, "hasPriceSymbol": 2.0,
                "hasPriceInClassOrId": 2.0, "isAboveTheFoldPrice": 1.0,
                "hasPriceishPattern": 1.0
            },
            "extract_using": { "price": "innerText", "image": "src" }
        }"#;
        let file = CoefficientFile::from_json(json).unwrap();
        let seed = file.seed_vector().unwrap();
        assert_eq!(seed.len(), topology_size());

        let properties = file.extraction_properties().unwrap();
        assert_eq!(properties[&Feature::Price], ExtractionProperty::InnerText);
        assert_eq!(properties[&Feature::Image], ExtractionProperty::Src);
    }

    #[test]
    fn test_coefficient_file_unknown_property_fatal() {
        let mut json = serde_json::json!({
            "coefficients": RulesetFactory::default_coefficients(),
            "extract_using": { "price": "outerHTML" }
        });
        let text = json.to_string();
        assert!(matches!(
            CoefficientFile::from_json(&text),
            Err(RulesetError::UnrecognizedProperty(p)) if p == "outerHTML"
        ));
        json["extract_using"] = serde_json::json!({ "rating": "innerText" });
        assert!(matches!(
            CoefficientFile::from_json(&json.to_string()),
            Err(RulesetError::UnrecognizedFeature(f)) if f == "rating"
        ));
    }

    proptest! {
        #[test]
        fn prop_build_succeeds_for_exact_shape(
            coefficients in prop::collection::vec(-10.0f64..10.0, topology_size())
        ) {
            prop_assert!(RulesetFactory::build(&coefficients).is_ok());
        }

        #[test]
        fn prop_build_fails_for_other_shapes(len in 0usize..32) {
            prop_assume!(len != topology_size());
            let coefficients = vec![1.0; len];
            prop_assert!(
                matches!(
                    RulesetFactory::build(&coefficients),
                    Err(RulesetError::ShapeMismatch { .. })
                ),
                "expected RulesetError::ShapeMismatch"
            );
        }
    }
}
