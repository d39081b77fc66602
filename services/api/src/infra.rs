use fellows::catalog::{CatalogImportError, CatalogImporter, StaticCatalog};
use fellows::config::AppConfig;
use fellows::pages::OpportunityService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type Pages = OpportunityService<StaticCatalog>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the catalog from `path`, or the bundled catalog when none is given.
pub(crate) fn load_catalog(path: Option<&PathBuf>) -> Result<StaticCatalog, CatalogImportError> {
    let catalog = match path {
        Some(path) => CatalogImporter::from_path(path)?,
        None => StaticCatalog::standard()?,
    };
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());
    info!(opportunities = catalog.len(), %source, "opportunity catalog loaded");
    Ok(catalog)
}

/// Builds the page service from config. An explicit `catalog_override`
/// wins over `APP_CATALOG_PATH`.
pub(crate) fn build_pages(
    config: &AppConfig,
    catalog_override: Option<PathBuf>,
) -> Result<Pages, CatalogImportError> {
    let path = catalog_override.or_else(|| config.catalog.path.clone());
    let catalog = load_catalog(path.as_ref())?;
    Ok(OpportunityService::new(
        Arc::new(catalog),
        config.deadline,
        config.site.clone(),
    ))
}
