//! Highest-value products

use aduana_common::lookup::ProductCatalog;
use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::PgPool;

use super::{validate_limit, FILTER_CLAUSE};
use crate::error::ReportResult;
use crate::filter::ReportFilter;

/// Default number of products returned
pub const DEFAULT_TOP_PRODUCTS: i64 = 10;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    codigo_hs: String,
    total_fob: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub product_code: String,
    /// Catalog name, or `"Product <code>"` when the code is not catalogued
    pub product_name: String,
    pub total_fob: BigDecimal,
}

/// The `limit` products with the highest FOB total, largest first.
///
/// Ties are broken by product code so results are stable.
#[tracing::instrument(skip(pool, catalog))]
pub async fn top_products(
    pool: &PgPool,
    catalog: &ProductCatalog,
    filter: &ReportFilter,
    limit: i64,
) -> ReportResult<Vec<ProductTotal>> {
    let limit = validate_limit(limit)?;
    let sql = format!(
        r#"
        SELECT codigo_hs, SUM(valor_fob) AS total_fob
        FROM exportaciones
        WHERE {FILTER_CLAUSE}
        GROUP BY codigo_hs
        ORDER BY total_fob DESC, codigo_hs
        LIMIT $3
        "#
    );

    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(filter.year)
        .bind(filter.region.as_deref())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| ProductTotal {
            product_name: catalog.name(&r.codigo_hs),
            product_code: r.codigo_hs,
            total_fob: r.total_fob,
        })
        .collect())
}
