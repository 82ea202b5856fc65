//! Labeled corpus samples.

use scraper::Html;

/// The page-embedded attribute marking ground truth. A sample succeeds for
/// a feature iff the top-ranked candidate's element carries this attribute
/// with the feature's id as its exact value.
pub const MARKER_ATTRIBUTE: &str = "data-fathom";

/// One labeled page. Immutable once loaded; lives for a full tuning run.
#[derive(Debug)]
pub struct Sample {
    name: String,
    document: Html,
}

impl Sample {
    /// Wraps an already-parsed document (the loader's output).
    pub fn new(name: impl Into<String>, document: Html) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }

    /// Convenience for fixture HTML.
    pub fn parse(name: impl Into<String>, html: &str) -> Self {
        Self::new(name, Html::parse_document(html))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

/// The fixed sample set a tuning run measures against.
#[derive(Debug, Default)]
pub struct Corpus {
    samples: Vec<Sample>,
}

impl Corpus {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<Sample> for Corpus {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
