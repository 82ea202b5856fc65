//! Core types for ruleset evaluation.

use crate::error::{FeatureError, RulesetError};
use scraper::ElementRef;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A product feature the engine extracts from a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Title,
    Image,
    Price,
}

impl Feature {
    /// All features, in canonical order.
    pub const ALL: [Feature; 3] = [Feature::Title, Feature::Image, Feature::Price];

    /// The stable identifier used as the ground-truth marker value and in
    /// configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Feature::Title => "title",
            Feature::Image => "image",
            Feature::Price => "price",
        }
    }

    /// How a winning element's value is pulled out for this feature.
    pub fn extraction_property(self) -> ExtractionProperty {
        match self {
            Feature::Title => ExtractionProperty::InnerText,
            Feature::Image => ExtractionProperty::Src,
            Feature::Price => ExtractionProperty::InnerText,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Feature {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Feature::Title),
            "image" => Ok(Feature::Image),
            "price" => Ok(Feature::Price),
            other => Err(RulesetError::UnrecognizedFeature(other.to_string())),
        }
    }
}

/// How a value is read off a winning element.
///
/// This is a closed set: configuration naming anything else fails at
/// ruleset-build time with [`RulesetError::UnrecognizedProperty`], never at
/// extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionProperty {
    /// The `content` attribute (Open Graph style `<meta>` tags).
    Content,
    /// The element's concatenated text.
    InnerText,
    /// The `src` attribute.
    Src,
}

impl ExtractionProperty {
    pub fn name(self) -> &'static str {
        match self {
            ExtractionProperty::Content => "content",
            ExtractionProperty::InnerText => "innerText",
            ExtractionProperty::Src => "src",
        }
    }

    /// Reads this property off an element. `None` when the attribute is
    /// absent; an empty string is returned as-is so callers can tell
    /// "present but blank" apart from "not there".
    pub fn value_of(self, element: ElementRef<'_>) -> Option<String> {
        match self {
            ExtractionProperty::Content => {
                element.value().attr("content").map(str::to_string)
            }
            ExtractionProperty::InnerText => {
                Some(element.text().collect::<String>().trim().to_string())
            }
            ExtractionProperty::Src => element.value().attr("src").map(str::to_string),
        }
    }
}

impl fmt::Display for ExtractionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtractionProperty {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(ExtractionProperty::Content),
            "innerText" => Ok(ExtractionProperty::InnerText),
            "src" => Ok(ExtractionProperty::Src),
            other => Err(RulesetError::UnrecognizedProperty(other.to_string())),
        }
    }
}

/// A scored candidate: one element, one feature, the accumulated weighted
/// score every contributing rule gave it.
#[derive(Debug, Clone, Copy)]
pub struct Fact<'a> {
    pub element: ElementRef<'a>,
    pub score: f64,
}

/// The engine's output for one document: per feature, candidate facts
/// sorted by descending score. The first entry is the engine's answer.
#[derive(Debug)]
pub struct FactSet<'a> {
    facts: HashMap<Feature, Vec<Fact<'a>>>,
}

impl<'a> FactSet<'a> {
    pub(crate) fn new(facts: HashMap<Feature, Vec<Fact<'a>>>) -> Self {
        Self { facts }
    }

    /// All candidate facts for a feature, best first. Empty when the
    /// feature was not found on the page.
    pub fn facts(&self, feature: Feature) -> &[Fact<'a>] {
        self.facts.get(&feature).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The top-ranked fact for a feature, or `NotFound` when the page has
    /// no candidates for it. Absence of one feature never fails the others.
    pub fn best(&self, feature: Feature) -> Result<&Fact<'a>, FeatureError> {
        self.facts(feature)
            .first()
            .ok_or(FeatureError::NotFound(feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_feature_roundtrip() {
        for feature in Feature::ALL {
            assert_eq!(feature.id().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_unknown_feature_rejected() {
        assert!(matches!(
            "description".parse::<Feature>(),
            Err(RulesetError::UnrecognizedFeature(_))
        ));
    }

    #[test]
    fn test_property_closed_set() {
        assert_eq!(
            "innerText".parse::<ExtractionProperty>().unwrap(),
            ExtractionProperty::InnerText
        );
        assert!(matches!(
            "outerHTML".parse::<ExtractionProperty>(),
            Err(RulesetError::UnrecognizedProperty(_))
        ));
    }

    #[test]
    fn test_value_of_distinguishes_absent_from_blank() {
        let doc = Html::parse_document(
            r#"<html><body><img id="a" src=""><img id="b"></body></html>"#,
        );
        let sel = scraper::Selector::parse("img").unwrap();
        let mut imgs = doc.select(&sel);
        let with_blank = imgs.next().unwrap();
        let without = imgs.next().unwrap();

        assert_eq!(
            ExtractionProperty::Src.value_of(with_blank),
            Some(String::new())
        );
        assert_eq!(ExtractionProperty::Src.value_of(without), None);
    }

    #[test]
    fn test_inner_text_concatenates_and_trims() {
        let doc = Html::parse_document(
            "<html><body><h1> Widget <span>Deluxe</span> </h1></body></html>",
        );
        let sel = scraper::Selector::parse("h1").unwrap();
        let h1 = doc.select(&sel).next().unwrap();
        assert_eq!(
            ExtractionProperty::InnerText.value_of(h1).unwrap(),
            "Widget Deluxe"
        );
    }
}
