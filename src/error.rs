//! Error types.
//!
//! The split mirrors how failures propagate: [`RulesetError`] is fatal and
//! raised at ruleset-build time, [`FeatureError`] is recovered locally during
//! extraction, and [`TuneError`] is what a tuning run can abort with.

use crate::ruleset::Feature;
use thiserror::Error;

/// Fatal configuration errors caught when a ruleset is built.
#[derive(Debug, Error)]
pub enum RulesetError {
    /// Coefficient vector length disagrees with the ruleset topology.
    #[error("coefficient vector has {actual} entries, topology v{version} expects {expected}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        version: u32,
    },

    /// A named coefficient does not correspond to any rule in the topology.
    #[error("unrecognized coefficient name '{0}'")]
    UnrecognizedCoefficient(String),

    /// A rule in the topology has no entry in the named coefficient map.
    #[error("missing coefficient '{0}'")]
    MissingCoefficient(String),

    /// An extraction directive names a property outside the closed set.
    #[error("unrecognized extraction property or attribute '{0}'")]
    UnrecognizedProperty(String),

    /// A feature name outside title/image/price.
    #[error("unrecognized feature '{0}'")]
    UnrecognizedFeature(String),

    /// A candidate selector failed to parse.
    #[error("invalid candidate selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A coefficient file could not be deserialized.
    #[error("invalid coefficient file: {0}")]
    CoefficientFile(#[from] serde_json::Error),
}

/// Per-feature extraction outcomes that callers recover from.
///
/// `NotFound` and `EmptyValue` are deliberately distinct: a page with no
/// plausible price element is a different situation from a price element
/// whose extracted text is blank, and callers may treat them differently.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FeatureError {
    /// The ruleset produced zero candidate facts for this feature.
    #[error("no candidate facts for feature '{0}'")]
    NotFound(Feature),

    /// A top candidate exists but its extracted value is empty.
    #[error("top candidate for feature '{0}' produced an empty value")]
    EmptyValue(Feature),
}

/// Errors a tuning run can abort with.
///
/// Sample-level evaluation failures are *not* here: the harness counts them
/// into the cost instead of propagating them.
#[derive(Debug, Error)]
pub enum TuneError {
    #[error("invalid tuner configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Ruleset(#[from] RulesetError),
}
