//! Monthly FOB series

use aduana_common::lookup::month_name;
use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::PgPool;

use super::FILTER_CLAUSE;
use crate::error::ReportResult;
use crate::filter::ReportFilter;

#[derive(Debug, sqlx::FromRow)]
struct MonthRow {
    anio: i32,
    mes: i32,
    total_fob: BigDecimal,
}

/// FOB total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub year: i32,
    pub month: i32,
    /// Spanish month name, e.g. `"Enero"`
    pub month_name: String,
    pub total_fob: BigDecimal,
}

impl TimeSeriesPoint {
    pub fn new(year: i32, month: i32, total_fob: BigDecimal) -> Self {
        let month_name = month_name(month)
            .map(str::to_string)
            .unwrap_or_else(|| month.to_string());
        Self {
            year,
            month,
            month_name,
            total_fob,
        }
    }
}

/// FOB totals per (year, month), oldest first
#[tracing::instrument(skip(pool))]
pub async fn time_series(
    pool: &PgPool,
    filter: &ReportFilter,
) -> ReportResult<Vec<TimeSeriesPoint>> {
    let sql = format!(
        r#"
        SELECT anio, mes, SUM(valor_fob) AS total_fob
        FROM exportaciones
        WHERE {FILTER_CLAUSE}
        GROUP BY anio, mes
        ORDER BY anio, mes
        "#
    );

    let rows = sqlx::query_as::<_, MonthRow>(&sql)
        .bind(filter.year)
        .bind(filter.region.as_deref())
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| TimeSeriesPoint::new(r.anio, r.mes, r.total_fob))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_month_name() {
        let point = TimeSeriesPoint::new(2024, 3, BigDecimal::from(10));
        assert_eq!(point.month_name, "Marzo");

        let point = TimeSeriesPoint::new(2024, 12, BigDecimal::from(10));
        assert_eq!(point.month_name, "Diciembre");
    }
}
