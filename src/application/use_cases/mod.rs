pub mod column_classifier;
pub mod geo_enricher;
pub mod ingestion;
pub mod insight;
