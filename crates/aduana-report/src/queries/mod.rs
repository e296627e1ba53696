//! Aggregation queries
//!
//! Each query takes a [`ReportFilter`](crate::filter::ReportFilter) bound as
//! `$1` (year) and `$2` (region); a `NULL` parameter disables that condition.

pub mod options;
pub mod raw_rows;
pub mod summary;
pub mod time_series;
pub mod top_destinations;
pub mod top_products;

pub use options::{available_regions, available_years};
pub use raw_rows::raw_rows;
pub use summary::{summary, Summary};
pub use time_series::{time_series, TimeSeriesPoint};
pub use top_destinations::{top_destinations, DestinationTotal};
pub use top_products::{top_products, ProductTotal};

use crate::error::{ReportError, ReportResult};

/// Upper bound for any row limit
pub const MAX_LIMIT: i64 = 10_000;

/// Filter predicate shared by every query
pub(crate) const FILTER_CLAUSE: &str =
    "($1::INTEGER IS NULL OR anio = $1) AND ($2::TEXT IS NULL OR nombre_region = $2)";

pub(crate) fn validate_limit(limit: i64) -> ReportResult<i64> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(ReportError::InvalidLimit(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(1).ok(), Some(1));
        assert_eq!(validate_limit(MAX_LIMIT).ok(), Some(MAX_LIMIT));
        assert!(matches!(validate_limit(0), Err(ReportError::InvalidLimit(0))));
        assert!(validate_limit(-5).is_err());
        assert!(validate_limit(MAX_LIMIT + 1).is_err());
    }
}
