//! Report filter

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReportError, ReportResult};

/// Selector values that mean "no restriction"
const ALL_SELECTORS: &[&str] = &["", "all", "todos", "todas"];

/// Optional year and region restriction shared by every report query.
///
/// `None` means all years / all regions. Also used as the cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportFilter {
    pub year: Option<i32>,
    pub region: Option<String>,
}

impl ReportFilter {
    pub fn new(year: Option<i32>, region: Option<String>) -> Self {
        Self { year, region }
    }

    /// No restriction
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from dashboard selector strings.
    ///
    /// `"Todos"`, `"Todas"`, `"all"` and the empty string select everything.
    /// Years may arrive as `"2024"` or `"2024.0"`.
    pub fn from_selection(year: &str, region: &str) -> ReportResult<Self> {
        let year = if is_all(year) {
            None
        } else {
            Some(parse_year(year)?)
        };

        let region = if is_all(region) {
            None
        } else {
            Some(region.trim().to_string())
        };

        Ok(Self { year, region })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.year.is_none() && self.region.is_none()
    }
}

impl fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.year, &self.region) {
            (None, None) => write!(f, "all years, all regions"),
            (Some(y), None) => write!(f, "{}, all regions", y),
            (None, Some(r)) => write!(f, "all years, {}", r),
            (Some(y), Some(r)) => write!(f, "{}, {}", y, r),
        }
    }
}

fn is_all(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    ALL_SELECTORS.contains(&value.as_str())
}

fn parse_year(raw: &str) -> ReportResult<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Ok(year);
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => Ok(v as i32),
        _ => Err(ReportError::InvalidFilter(format!("year '{}' is not a number", raw))),
    }
}
