//! Dashboard assembly with per-filter caching

use aduana_common::lookup::ProductCatalog;
use aduana_common::ExportRecord;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::cache::{CacheStats, QueryCache, DEFAULT_CACHE_TTL};
use crate::error::{ReportError, ReportResult};
use crate::filter::ReportFilter;
use crate::queries::{
    self, raw_rows::DEFAULT_ROW_LIMIT, top_destinations::DEFAULT_TOP_DESTINATIONS,
    top_products::DEFAULT_TOP_PRODUCTS, DestinationTotal, ProductTotal, Summary, TimeSeriesPoint,
};

/// Environment variable overriding the cache TTL, in seconds
pub const CACHE_TTL_VAR: &str = "ADUANA_CACHE_TTL_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub cache_ttl: Duration,
    pub top_products: i64,
    pub top_destinations: i64,
    pub row_limit: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            top_products: DEFAULT_TOP_PRODUCTS,
            top_destinations: DEFAULT_TOP_DESTINATIONS,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl ReportConfig {
    /// Defaults with the cache TTL taken from `ADUANA_CACHE_TTL_SECS` when set
    pub fn from_env() -> ReportResult<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(CACHE_TTL_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ReportError::Config(format!("{} must be a number of seconds", CACHE_TTL_VAR))
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_top_products(mut self, n: i64) -> Self {
        self.top_products = n;
        self
    }

    pub fn with_top_destinations(mut self, n: i64) -> Self {
        self.top_destinations = n;
        self
    }

    pub fn with_row_limit(mut self, n: i64) -> Self {
        self.row_limit = n;
        self
    }

    pub fn validate(&self) -> ReportResult<()> {
        queries::validate_limit(self.top_products)?;
        queries::validate_limit(self.top_destinations)?;
        queries::validate_limit(self.row_limit)?;
        Ok(())
    }
}

/// Everything the dashboard renders for one filter
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub filter: ReportFilter,
    pub summary: Summary,
    pub time_series: Vec<TimeSeriesPoint>,
    pub top_products: Vec<ProductTotal>,
    pub top_destinations: Vec<DestinationTotal>,
    pub rows: Vec<ExportRecord>,
}

/// Values for the year and region selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub regions: Vec<String>,
}

pub struct ReportService {
    pool: PgPool,
    config: ReportConfig,
    catalog: ProductCatalog,
    cache: QueryCache<ReportFilter, Arc<Dashboard>>,
}

impl ReportService {
    pub fn new(pool: PgPool, config: ReportConfig) -> Self {
        let cache = QueryCache::new(config.cache_ttl);
        Self {
            pool,
            config,
            catalog: ProductCatalog::builtin(),
            cache,
        }
    }

    pub fn with_catalog(mut self, catalog: ProductCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Dashboard for `filter`, served from cache while the entry is live
    pub async fn dashboard(&self, filter: &ReportFilter) -> ReportResult<Arc<Dashboard>> {
        self.cache
            .get_or_try_insert_with(filter.clone(), move || async move {
                self.build_dashboard(filter).await.map(Arc::new)
            })
            .await
    }

    /// Run every aggregate for `filter`, bypassing the cache
    #[tracing::instrument(skip(self))]
    pub async fn build_dashboard(&self, filter: &ReportFilter) -> ReportResult<Dashboard> {
        self.config.validate()?;

        let (summary, time_series, top_products, top_destinations, rows) = tokio::try_join!(
            queries::summary(&self.pool, filter),
            queries::time_series(&self.pool, filter),
            queries::top_products(&self.pool, &self.catalog, filter, self.config.top_products),
            queries::top_destinations(&self.pool, filter, self.config.top_destinations),
            queries::raw_rows(&self.pool, filter, self.config.row_limit),
        )?;

        info!(
            filter = %filter,
            rows = summary.row_count,
            "Dashboard computed"
        );

        Ok(Dashboard {
            filter: filter.clone(),
            summary,
            time_series,
            top_products,
            top_destinations,
            rows,
        })
    }

    pub async fn filter_options(&self) -> ReportResult<FilterOptions> {
        let (years, regions) = tokio::try_join!(
            queries::available_years(&self.pool),
            queries::available_regions(&self.pool),
        )?;
        Ok(FilterOptions { years, regions })
    }

    /// Drop the cached dashboard for `filter`
    pub fn invalidate(&self, filter: &ReportFilter) -> bool {
        self.cache.invalidate(filter)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.top_products, 10);
        assert_eq!(config.top_destinations, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_limit() {
        let config = ReportConfig::default().with_top_products(0);
        assert!(matches!(config.validate(), Err(ReportError::InvalidLimit(0))));
    }

    #[test]
    #[serial]
    fn test_cache_ttl_from_env() {
        std::env::set_var(CACHE_TTL_VAR, "120");
        let config = ReportConfig::from_env().unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(120));

        std::env::set_var(CACHE_TTL_VAR, "soon");
        assert!(ReportConfig::from_env().is_err());

        std::env::remove_var(CACHE_TTL_VAR);
        let config = ReportConfig::from_env().unwrap();
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
    }
}
