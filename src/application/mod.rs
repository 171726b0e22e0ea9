pub mod use_cases;

pub use use_cases::geo_enricher::GeoEnricher;
pub use use_cases::ingestion::IngestionUseCase;
pub use use_cases::insight::InsightUseCase;
