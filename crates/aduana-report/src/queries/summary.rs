//! Headline totals

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;
use sqlx::PgPool;

use super::FILTER_CLAUSE;
use crate::error::ReportResult;
use crate::filter::ReportFilter;

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    total_fob: BigDecimal,
    product_count: i64,
    destination_count: i64,
    row_count: i64,
}

/// Headline figures for a filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of FOB values in USD
    pub total_fob: BigDecimal,
    /// `total_fob` in millions of USD, two decimals
    pub total_fob_millions: BigDecimal,
    /// Distinct product codes
    pub product_count: i64,
    /// Distinct destination countries
    pub destination_count: i64,
    pub row_count: i64,
}

impl Summary {
    pub fn new(
        total_fob: BigDecimal,
        product_count: i64,
        destination_count: i64,
        row_count: i64,
    ) -> Self {
        let total_fob_millions = to_millions(&total_fob);
        Self {
            total_fob,
            total_fob_millions,
            product_count,
            destination_count,
            row_count,
        }
    }

    pub fn empty() -> Self {
        Self::new(BigDecimal::zero(), 0, 0, 0)
    }
}

fn to_millions(value: &BigDecimal) -> BigDecimal {
    (value.clone() / BigDecimal::from(1_000_000)).round(2)
}

#[tracing::instrument(skip(pool))]
pub async fn summary(pool: &PgPool, filter: &ReportFilter) -> ReportResult<Summary> {
    let sql = format!(
        r#"
        SELECT COALESCE(SUM(valor_fob), 0)   AS total_fob,
               COUNT(DISTINCT codigo_hs)     AS product_count,
               COUNT(DISTINCT pais_destino)  AS destination_count,
               COUNT(*)                      AS row_count
        FROM exportaciones
        WHERE {FILTER_CLAUSE}
        "#
    );

    let row = sqlx::query_as::<_, SummaryRow>(&sql)
        .bind(filter.year)
        .bind(filter.region.as_deref())
        .fetch_one(pool)
        .await?;

    Ok(Summary::new(
        row.total_fob,
        row.product_count,
        row.destination_count,
        row.row_count,
    ))
}
