use std::sync::Arc;
use std::time::Duration;

use crate::application::{GeoEnricher, IngestionUseCase, InsightUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dataset_store::DatasetStore;
use crate::infrastructure::geocoding::{Geocoder, NominatimClient};
use crate::infrastructure::llm_clients::{GeminiClient, TextGenClient};

/// Composition root: the store, the external clients, and the two
/// entry-point use cases, wired from one config.
pub struct AppState {
    pub config: AppConfig,
    pub dataset_store: Arc<DatasetStore>,
    pub ingestion_use_case: IngestionUseCase,
    pub insight_use_case: InsightUseCase,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

pub fn build_state(config: AppConfig) -> AppState {
    let dataset_store = Arc::new(DatasetStore::new());

    let geocoder: Arc<dyn Geocoder + Send + Sync> =
        Arc::new(NominatimClient::new(&config.geocoder));
    let text_gen: Arc<dyn TextGenClient + Send + Sync> =
        Arc::new(GeminiClient::new(config.text_gen.clone()));

    let enricher = GeoEnricher::with_delay(
        geocoder,
        Duration::from_millis(config.geocoder.lookup_delay_ms),
    );

    let ingestion_use_case = IngestionUseCase::new(dataset_store.clone(), enricher);
    let insight_use_case = InsightUseCase::new(dataset_store.clone(), text_gen);

    AppState {
        config,
        dataset_store,
        ingestion_use_case,
        insight_use_case,
    }
}

/// Initialize logging, load configuration and build the application state.
pub fn bootstrap() -> Result<AppState> {
    init_tracing();
    let config = AppConfig::load()?;
    Ok(build_state(config))
}
