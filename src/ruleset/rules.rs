//! Heuristic scoring rules.
//!
//! Each rule is a pure function from a candidate element (plus per-document
//! stats) to a raw partial score in `[0, 1]`, and declares the single
//! feature it contributes to. The engine multiplies raw scores by the
//! coefficient the rule is bound to and accumulates them per element.
//!
//! The set is closed: adding, removing, or reordering a rule changes the
//! topology table and invalidates previously tuned coefficient vectors.

use super::types::Feature;
use crate::error::RulesetError;
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use std::collections::HashMap;

/// Per-document statistics the positional and size rules consult.
///
/// Collected in one traversal before scoring starts; rules never walk the
/// document themselves.
#[derive(Debug)]
pub struct DocumentStats {
    positions: HashMap<NodeId, usize>,
    total_elements: usize,
    max_image_area: f64,
}

impl DocumentStats {
    /// Walks the document once, recording each element's traversal position
    /// and the largest declared image area.
    pub fn collect(document: &Html) -> Self {
        let mut positions = HashMap::new();
        let mut max_image_area = 0.0f64;
        for (index, element) in document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .enumerate()
        {
            positions.insert(element.id(), index);
            if element.value().name() == "img" {
                max_image_area = max_image_area.max(image_area(element));
            }
        }
        let total_elements = positions.len();
        Self {
            positions,
            total_elements,
            max_image_area,
        }
    }

    /// Fold proxy: an element in the first third of the document's elements
    /// counts as above the fold. No layout engine is available, so document
    /// position stands in for vertical position.
    pub fn above_the_fold(&self, element: ElementRef<'_>) -> bool {
        match self.positions.get(&element.id()) {
            Some(&position) if self.total_elements > 0 => {
                (position as f64) < (self.total_elements as f64) / 3.0
            }
            _ => false,
        }
    }

    /// This image's declared area relative to the largest image on the
    /// page, in `[0, 1]`. Zero when no image declares dimensions.
    pub fn relative_image_area(&self, element: ElementRef<'_>) -> f64 {
        if self.max_image_area <= 0.0 {
            return 0.0;
        }
        image_area(element) / self.max_image_area
    }
}

/// The closed set of scoring rules.
///
/// Variant order here is incidental; the canonical coefficient order is the
/// topology table in [`crate::factory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    HasTitleElement,
    HasTitleInClassOrId,
    IsAboveTheFoldTitle,
    HasGoodTitleLength,
    IsLargerImage,
    HasImageInClassOrId,
    IsAboveTheFoldImage,
    HasPriceSymbol,
    HasPriceInClassOrId,
    IsAboveTheFoldPrice,
    HasPriceishPattern,
}

impl RuleKind {
    /// The rule's name as used in named coefficient maps.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::HasTitleElement => "hasTitleElement",
            RuleKind::HasTitleInClassOrId => "hasTitleInClassOrId",
            RuleKind::IsAboveTheFoldTitle => "isAboveTheFoldTitle",
            RuleKind::HasGoodTitleLength => "hasGoodTitleLength",
            RuleKind::IsLargerImage => "isLargerImage",
            RuleKind::HasImageInClassOrId => "hasImageInClassOrId",
            RuleKind::IsAboveTheFoldImage => "isAboveTheFoldImage",
            RuleKind::HasPriceSymbol => "hasPriceSymbol",
            RuleKind::HasPriceInClassOrId => "hasPriceInClassOrId",
            RuleKind::IsAboveTheFoldPrice => "isAboveTheFoldPrice",
            RuleKind::HasPriceishPattern => "hasPriceishPattern",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, RulesetError> {
        match name {
            "hasTitleElement" => Ok(RuleKind::HasTitleElement),
            "hasTitleInClassOrId" => Ok(RuleKind::HasTitleInClassOrId),
            "isAboveTheFoldTitle" => Ok(RuleKind::IsAboveTheFoldTitle),
            "hasGoodTitleLength" => Ok(RuleKind::HasGoodTitleLength),
            "isLargerImage" => Ok(RuleKind::IsLargerImage),
            "hasImageInClassOrId" => Ok(RuleKind::HasImageInClassOrId),
            "isAboveTheFoldImage" => Ok(RuleKind::IsAboveTheFoldImage),
            "hasPriceSymbol" => Ok(RuleKind::HasPriceSymbol),
            "hasPriceInClassOrId" => Ok(RuleKind::HasPriceInClassOrId),
            "isAboveTheFoldPrice" => Ok(RuleKind::IsAboveTheFoldPrice),
            "hasPriceishPattern" => Ok(RuleKind::HasPriceishPattern),
            other => Err(RulesetError::UnrecognizedCoefficient(other.to_string())),
        }
    }

    /// The feature this rule contributes to.
    pub fn feature(self) -> Feature {
        match self {
            RuleKind::HasTitleElement
            | RuleKind::HasTitleInClassOrId
            | RuleKind::IsAboveTheFoldTitle
            | RuleKind::HasGoodTitleLength => Feature::Title,
            RuleKind::IsLargerImage
            | RuleKind::HasImageInClassOrId
            | RuleKind::IsAboveTheFoldImage => Feature::Image,
            RuleKind::HasPriceSymbol
            | RuleKind::HasPriceInClassOrId
            | RuleKind::IsAboveTheFoldPrice
            | RuleKind::HasPriceishPattern => Feature::Price,
        }
    }

    /// Raw partial score in `[0, 1]` for one candidate element.
    ///
    /// Pure: never mutates the document, never looks at anything outside
    /// the element and the precomputed stats.
    pub fn score(self, element: ElementRef<'_>, stats: &DocumentStats) -> f64 {
        match self {
            RuleKind::HasTitleElement => {
                bool_score(matches!(element.value().name(), "title" | "h1"))
            }
            RuleKind::HasTitleInClassOrId => {
                bool_score(class_or_id_mentions(element, &["title", "name", "product"]))
            }
            RuleKind::IsAboveTheFoldTitle
            | RuleKind::IsAboveTheFoldImage
            | RuleKind::IsAboveTheFoldPrice => bool_score(stats.above_the_fold(element)),
            RuleKind::HasGoodTitleLength => {
                let length = element.text().collect::<String>().trim().chars().count();
                bool_score((10..=120).contains(&length))
            }
            RuleKind::IsLargerImage => stats.relative_image_area(element),
            RuleKind::HasImageInClassOrId => bool_score(class_or_id_mentions(
                element,
                &["product", "main", "hero", "primary"],
            )),
            RuleKind::HasPriceSymbol => bool_score(has_currency_symbol(element)),
            RuleKind::HasPriceInClassOrId => {
                bool_score(class_or_id_mentions(element, &["price", "cost", "amount"]))
            }
            RuleKind::HasPriceishPattern => bool_score(has_priceish_text(element)),
        }
    }
}

fn bool_score(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Area from declared `width`/`height` attributes; zero when either is
/// missing or non-numeric.
fn image_area(element: ElementRef<'_>) -> f64 {
    let dimension = |attr: &str| {
        element
            .value()
            .attr(attr)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let width = dimension("width");
    let height = dimension("height");
    if width > 0.0 && height > 0.0 {
        width * height
    } else {
        0.0
    }
}

fn class_or_id_mentions(element: ElementRef<'_>, needles: &[&str]) -> bool {
    let value = element.value();
    let mentions = |attr: &str| {
        let attr = attr.to_ascii_lowercase();
        needles.iter().any(|needle| attr.contains(needle))
    };
    value.id().is_some_and(mentions) || value.classes().any(mentions)
}

/// A currency symbol with a digit as the next non-whitespace character.
fn has_currency_symbol(element: ElementRef<'_>) -> bool {
    let text = element.text().collect::<String>();
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        matches!(c, '$' | '€' | '£' | '¥')
            && chars[i + 1..]
                .iter()
                .find(|ch| !ch.is_whitespace())
                .is_some_and(|ch| ch.is_ascii_digit())
    })
}

/// A `d.dd` or `d,dd` run somewhere in the text, e.g. 19.99 or 1.299,00.
fn has_priceish_text(element: ElementRef<'_>) -> bool {
    let chars: Vec<char> = element.text().collect::<String>().chars().collect();
    chars.windows(4).any(|w| {
        w[0].is_ascii_digit()
            && matches!(w[1], '.' | ',')
            && w[2].is_ascii_digit()
            && w[3].is_ascii_digit()
    })
}
