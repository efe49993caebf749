//! Text-to-vector conversion.
//!
//! Accepts free-form (`1 2 3`), comma-separated (`1,2,3`) and JSON-bracketed
//! (`[1.0, 2.0, 3.0]`) decimal lists. `[`, `]`, `,` and whitespace are all
//! separators, so the forms may be mixed.

use crate::buffer::vector_to_bytes;
use crate::element::{Element, ElementWidth};
use crate::error::{Error, Result};

fn is_separator(c: char) -> bool {
    matches!(c, '[' | ']' | ',') || c.is_whitespace()
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|token| !token.is_empty())
}

fn parse_token<T: Element>(token: &str) -> Result<T> {
    token
        .parse::<T>()
        .map_err(|e| Error::Parse(format!("invalid number '{token}': {e}")))
}

/// Reads exactly `dimensions` values from `text`.
///
/// Values beyond `dimensions` are ignored. Fewer values than requested is a
/// [`Error::Parse`].
pub fn parse_vector<T: Element>(text: &str, dimensions: usize) -> Result<Vec<T>> {
    if dimensions == 0 {
        return Err(Error::InvalidDimension(
            "dimensions must be positive".to_string(),
        ));
    }

    let values = tokens(text)
        .take(dimensions)
        .map(parse_token::<T>)
        .collect::<Result<Vec<T>>>()?;

    if values.len() < dimensions {
        return Err(Error::Parse(format!(
            "expected {dimensions} values, found {}",
            values.len()
        )));
    }
    Ok(values)
}

/// Reads every value in `text`; the dimension is however many there are.
pub fn parse_vector_auto<T: Element>(text: &str) -> Result<Vec<T>> {
    let values = tokens(text)
        .map(parse_token::<T>)
        .collect::<Result<Vec<T>>>()?;
    if values.is_empty() {
        return Err(Error::Parse("no values found".to_string()));
    }
    Ok(values)
}

/// Parses `text` and encodes it as a flat buffer of `width` elements.
///
/// `dimensions == None` keeps every value in the text.
pub fn convert_text_to_bytes(
    text: &str,
    dimensions: Option<usize>,
    width: ElementWidth,
) -> Result<Vec<u8>> {
    match width {
        ElementWidth::Width32 => encode::<f32>(text, dimensions),
        ElementWidth::Width64 => encode::<f64>(text, dimensions),
    }
}

fn encode<T: Element>(text: &str, dimensions: Option<usize>) -> Result<Vec<u8>> {
    let values = match dimensions {
        Some(n) => parse_vector::<T>(text, n)?,
        None => parse_vector_auto::<T>(text)?,
    };
    Ok(vector_to_bytes(&values))
}
