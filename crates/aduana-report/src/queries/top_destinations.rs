//! Highest-value destination countries

use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::PgPool;

use super::{validate_limit, FILTER_CLAUSE};
use crate::error::ReportResult;
use crate::filter::ReportFilter;

pub const DEFAULT_TOP_DESTINATIONS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct DestinationTotal {
    #[sqlx(rename = "pais_destino")]
    pub country: String,
    pub total_fob: BigDecimal,
}

#[tracing::instrument(skip(pool))]
pub async fn top_destinations(
    pool: &PgPool,
    filter: &ReportFilter,
    limit: i64,
) -> ReportResult<Vec<DestinationTotal>> {
    let limit = validate_limit(limit)?;
    let sql = format!(
        r#"
        SELECT pais_destino, SUM(valor_fob) AS total_fob
        FROM exportaciones
        WHERE {FILTER_CLAUSE}
        GROUP BY pais_destino
        ORDER BY total_fob DESC, pais_destino
        LIMIT $3
        "#
    );

    let rows = sqlx::query_as::<_, DestinationTotal>(&sql)
        .bind(filter.year)
        .bind(filter.region.as_deref())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
