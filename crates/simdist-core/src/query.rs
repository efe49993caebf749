//! Text queries parsed once and compared against many text rows.
//!
//! A host that stores vectors as text (`"[0.12, 0.5, ...]"`) parses the
//! query a single time and then scores each row as it streams past.

use crate::element::Element;
use crate::error::Result;
use crate::metric::{evaluate, MetricKind};
use crate::parsing::parse_vector;

/// A parsed query vector with a fixed dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery<T: Element> {
    values: Vec<T>,
}

impl<T: Element> TextQuery<T> {
    /// Parses the leading `dimensions` values of `text`.
    pub fn parse(text: &str, dimensions: usize) -> Result<Self> {
        Ok(Self {
            values: parse_vector(text, dimensions)?,
        })
    }

    /// Number of values in the query.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// The parsed values.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Parses `row` at the query's dimension and evaluates `kind` against it.
    pub fn evaluate(&self, kind: MetricKind, row: &str) -> Result<T> {
        let row = parse_vector::<T>(row, self.values.len())?;
        evaluate(kind, &self.values, &row)
    }

    /// Cosine of a unit-length query and a unit-length text row.
    ///
    /// A plain dot product, like [`crate::cosine_similarity_normalized`].
    pub fn cosine_similarity_normalized(&self, row: &str) -> Result<T> {
        self.evaluate(MetricKind::DotProduct, row)
    }
}
