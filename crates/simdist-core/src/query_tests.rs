//! Tests for text queries.

use crate::error::Error;
use crate::metric::MetricKind;
use crate::query::TextQuery;

const EPSILON: f64 = 1e-12;

#[test]
fn test_parse_keeps_requested_dimensions() {
    let query = TextQuery::<f64>::parse("[0.6, 0.8, 5.0]", 2).unwrap();
    assert_eq!(query.dimensions(), 2);
    assert_eq!(query.values(), &[0.6, 0.8]);
}

#[test]
fn test_normalized_cosine_against_text_rows() {
    let query = TextQuery::<f64>::parse("[0.6, 0.8]", 2).unwrap();
    let rows = ["[0.8, 0.6]", "0.6,0.8", "1 0", "[-0.6, -0.8]"];
    let expected = [0.96, 1.0, 0.6, -1.0];

    for (row, want) in rows.iter().zip(expected) {
        let got = query.cosine_similarity_normalized(row).unwrap();
        assert!((got - want).abs() < EPSILON, "{row}: {got} vs {want}");
    }
}

#[test]
fn test_evaluate_other_metrics_f32() {
    let query = TextQuery::<f32>::parse("0 0 0", 3).unwrap();
    assert_eq!(
        query.evaluate(MetricKind::EuclideanDistance, "[0, 3, 4]").unwrap(),
        5.0
    );
    assert_eq!(
        query.evaluate(MetricKind::CosineSimilarity, "1 2 3").unwrap(),
        0.0
    );
}

#[test]
fn test_short_row_is_a_parse_error() {
    let query = TextQuery::<f64>::parse("1 2 3", 3).unwrap();
    assert!(matches!(
        query.cosine_similarity_normalized("1 2"),
        Err(Error::Parse(_))
    ));
}

#[test]
fn test_bad_query_is_rejected() {
    assert!(matches!(
        TextQuery::<f64>::parse("1 2", 0),
        Err(Error::InvalidDimension(_))
    ));
    assert!(matches!(
        TextQuery::<f64>::parse("1 two", 2),
        Err(Error::Parse(_))
    ));
}
