use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::column_classifier::classify_columns;
use super::geo_enricher::{GeoEnricher, LATITUDE_COLUMN, LONGITUDE_COLUMN};
use crate::domain::dataset::Dataset;
use crate::domain::error::{AppError, Result};
use crate::domain::report::{IngestReport, StoredDataset};
use crate::infrastructure::dataset_store::DatasetStore;
use crate::infrastructure::tabular::{CsvParser, XlsxParser};

/// Ingestion entry point: parse a tabular file, infer column roles,
/// enrich missing coordinates from location text, and retain the result
/// as the current dataset.
pub struct IngestionUseCase {
    store: Arc<DatasetStore>,
    enricher: GeoEnricher,
}

impl IngestionUseCase {
    pub fn new(store: Arc<DatasetStore>, enricher: GeoEnricher) -> Self {
        Self { store, enricher }
    }

    pub async fn execute(&self, path: &Path) -> Result<IngestReport> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        let dataset = match extension.as_str() {
            "csv" => CsvParser::parse_file_auto_detect(path)?,
            "xls" | "xlsx" => XlsxParser::parse_file(path)?,
            other => {
                return Err(AppError::UnsupportedInput(format!(
                    "Unsupported file type: '{}'",
                    other
                )))
            }
        };

        info!(
            columns = dataset.column_count(),
            rows = dataset.row_count(),
            file = %path.display(),
            "Parsed tabular file"
        );

        self.ingest(dataset).await
    }

    /// Classify, conditionally enrich, and store an already parsed dataset.
    pub async fn ingest(&self, mut dataset: Dataset) -> Result<IngestReport> {
        let mut roles = classify_columns(&dataset.column_names());

        // Enrichment only runs when no coordinate pair was detected but a
        // location column is available.
        if !roles.has_coordinates() {
            if let Some(location_col) = roles.location.clone() {
                info!(
                    rows = dataset.row_count(),
                    location_col = %location_col,
                    "No coordinate columns detected, resolving from location text"
                );
                self.enricher.enrich(&mut dataset, &location_col).await?;
                roles.latitude = Some(LATITUDE_COLUMN.to_string());
                roles.longitude = Some(LONGITUDE_COLUMN.to_string());
            }
        }

        let report = IngestReport {
            columns: dataset.column_names(),
            roles: roles.clone(),
            row_count: dataset.row_count(),
            data: dataset.to_records(),
        };

        self.store.replace(StoredDataset::new(
            dataset,
            roles.measure,
            roles.date,
            roles.hover,
        ));

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{CellValue, Column};
    use crate::domain::error::AppError;
    use crate::domain::geo::GeoPoint;
    use crate::infrastructure::geocoding::Geocoder;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    impl CountingGeocoder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _query: &str) -> crate::domain::error::Result<Option<GeoPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(GeoPoint::new(48.137, 11.575)))
        }
    }

    fn use_case(geocoder: Arc<CountingGeocoder>) -> (IngestionUseCase, Arc<DatasetStore>) {
        let store = Arc::new(DatasetStore::new());
        let enricher = GeoEnricher::with_delay(geocoder, Duration::ZERO);
        (IngestionUseCase::new(store.clone(), enricher), store)
    }

    #[tokio::test]
    async fn test_enriches_when_only_location_is_present() {
        let geocoder = Arc::new(CountingGeocoder::new());
        let (ingestion, store) = use_case(geocoder.clone());

        let mut dataset = Dataset::new();
        dataset
            .push_column(Column::new(
                "Store Address",
                vec![
                    CellValue::Text("Munich".to_string()),
                    CellValue::Text("Berlin".to_string()),
                ],
            ))
            .unwrap();
        dataset
            .push_column(Column::new(
                "Sales Amount",
                vec![CellValue::Number(10.0), CellValue::Number(20.0)],
            ))
            .unwrap();

        let report = ingestion.ingest(dataset).await.unwrap();

        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.roles.latitude.as_deref(), Some("latitude"));
        assert_eq!(report.roles.longitude.as_deref(), Some("longitude"));
        assert!(report.columns.contains(&"latitude".to_string()));
        assert!(report.columns.contains(&"longitude".to_string()));
        assert_eq!(report.row_count, 2);

        let held = store.current().unwrap();
        assert_eq!(held.measure_col.as_deref(), Some("Sales Amount"));
        assert_eq!(held.hover_col.as_deref(), Some("Store Address"));
        assert_eq!(held.dataset.column_count(), 4);
    }

    #[tokio::test]
    async fn test_existing_coordinates_short_circuit_enrichment() {
        let geocoder = Arc::new(CountingGeocoder::new());
        let (ingestion, store) = use_case(geocoder.clone());

        let mut dataset = Dataset::new();
        dataset
            .push_column(Column::new(
                "Store Lat",
                vec![CellValue::Number(52.52)],
            ))
            .unwrap();
        dataset
            .push_column(Column::new(
                "Store Lon",
                vec![CellValue::Number(13.40)],
            ))
            .unwrap();
        dataset
            .push_column(Column::new(
                "Location",
                vec![CellValue::Text("Berlin".to_string())],
            ))
            .unwrap();

        let report = ingestion.ingest(dataset).await.unwrap();

        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.roles.latitude.as_deref(), Some("Store Lat"));
        assert_eq!(report.roles.longitude.as_deref(), Some("Store Lon"));

        let held = store.current().unwrap();
        assert_eq!(held.dataset.column_count(), 3);
        assert_eq!(
            held.dataset.column("Store Lat").unwrap().cells[0],
            CellValue::Number(52.52)
        );
    }

    #[tokio::test]
    async fn test_no_location_and_no_coordinates_stores_as_is() {
        let geocoder = Arc::new(CountingGeocoder::new());
        let (ingestion, store) = use_case(geocoder.clone());

        let mut dataset = Dataset::new();
        dataset
            .push_column(Column::new("id", vec![CellValue::Number(1.0)]))
            .unwrap();

        let report = ingestion.ingest(dataset).await.unwrap();

        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.roles.latitude, None);
        assert_eq!(report.roles.longitude, None);
        assert_eq!(report.roles.hover.as_deref(), Some("id"));
        assert_eq!(store.current().unwrap().dataset.column_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_extension_is_rejected() {
        let geocoder = Arc::new(CountingGeocoder::new());
        let (ingestion, _store) = use_case(geocoder);

        let result = ingestion.execute(Path::new("report.pdf")).await;
        assert!(matches!(result, Err(AppError::UnsupportedInput(_))));
    }
}
