//! Detail rows

use aduana_common::ExportRecord;
use sqlx::PgPool;

use super::{validate_limit, FILTER_CLAUSE};
use crate::error::ReportResult;
use crate::filter::ReportFilter;

pub const DEFAULT_ROW_LIMIT: i64 = 100;

/// Individual records with the highest FOB value first
#[tracing::instrument(skip(pool))]
pub async fn raw_rows(
    pool: &PgPool,
    filter: &ReportFilter,
    limit: i64,
) -> ReportResult<Vec<ExportRecord>> {
    let limit = validate_limit(limit)?;
    let sql = format!(
        r#"
        SELECT anio, mes, nombre_region, pais_destino, codigo_hs, valor_fob
        FROM exportaciones
        WHERE {FILTER_CLAUSE}
        ORDER BY valor_fob DESC
        LIMIT $3
        "#
    );

    let rows = sqlx::query_as::<_, ExportRecord>(&sql)
        .bind(filter.year)
        .bind(filter.region.as_deref())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
