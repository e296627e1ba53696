//! Filter option lists for dashboard selectors

use sqlx::PgPool;

use crate::error::ReportResult;

/// Distinct years present, ascending
#[tracing::instrument(skip(pool))]
pub async fn available_years(pool: &PgPool) -> ReportResult<Vec<i32>> {
    let years = sqlx::query_scalar::<_, i32>("SELECT DISTINCT anio FROM exportaciones ORDER BY anio")
        .fetch_all(pool)
        .await?;
    Ok(years)
}

/// Distinct region names present, alphabetical
#[tracing::instrument(skip(pool))]
pub async fn available_regions(pool: &PgPool) -> ReportResult<Vec<String>> {
    let regions = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT nombre_region FROM exportaciones ORDER BY nombre_region",
    )
    .fetch_all(pool)
    .await?;
    Ok(regions)
}
