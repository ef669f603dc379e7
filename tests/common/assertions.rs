//! Domain-specific assertion macros for mnxq harnesses.
//!
//! These wrap `pretty_assertions` and say which compound in a report broke
//! the expectation.

// ---------------------------------------------------------------------------
// Report assertions
// ---------------------------------------------------------------------------

/// Assert the compounds of a `SearchReport`, in order.
///
/// ```rust
/// assert_labels!(report, ["H2O", "CO2", "H2CO3"]);
/// ```
#[macro_export]
macro_rules! assert_labels {
    ($report:expr, [$($label:expr),* $(,)?]) => {{
        let report: &mnxq_core::SearchReport = &$report;
        let expected: Vec<&str> = vec![$($label),*];
        pretty_assertions::assert_eq!(
            report.labels(),
            expected,
            "compound labels differ for input {:?}",
            report.input
        );
    }};
}

/// Assert the exact-match names for one compound of a report.
///
/// ```rust
/// assert_exact!(report, "glucose", ["glucose"]);
/// ```
#[macro_export]
macro_rules! assert_exact {
    ($report:expr, $label:expr, [$($name:expr),* $(,)?]) => {{
        let report: &mnxq_core::SearchReport = &$report;
        let label: &str = $label;
        let compound = report.get(label).unwrap_or_else(|| {
            panic!("assert_exact! failed: no compound {:?} in {:?}", label, report.labels())
        });
        let bundle = match &compound.outcome {
            Ok(bundle) => bundle,
            Err(err) => panic!("assert_exact! failed: lookup for {:?} failed: {}", label, err),
        };
        let actual: Vec<&str> = bundle.exact.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "exact matches for {:?}", label);
    }};
}

/// Assert the ranked partial-match names for one compound of a report.
#[macro_export]
macro_rules! assert_partial {
    ($report:expr, $label:expr, [$($name:expr),* $(,)?]) => {{
        let report: &mnxq_core::SearchReport = &$report;
        let label: &str = $label;
        let compound = report.get(label).unwrap_or_else(|| {
            panic!("assert_partial! failed: no compound {:?} in {:?}", label, report.labels())
        });
        let bundle = match &compound.outcome {
            Ok(bundle) => bundle,
            Err(err) => panic!("assert_partial! failed: lookup for {:?} failed: {}", label, err),
        };
        let actual: Vec<&str> = bundle.partial.iter().map(|c| c.record.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "partial matches for {:?}", label);
    }};
}
