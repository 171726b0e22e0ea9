use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::dataset::{CellValue, Column, Dataset};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::geocoding::Geocoder;

pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Resolves each row's location text to a coordinate pair and appends the
/// result as two new columns.
///
/// Lookups run strictly sequentially with a mandatory pause after every
/// attempt; the upstream service's usage policy forbids parallel or
/// unthrottled requests. A failed or empty lookup records nulls for that
/// row and never aborts the batch.
pub struct GeoEnricher {
    geocoder: Arc<dyn Geocoder + Send + Sync>,
    lookup_delay: Duration,
}

impl GeoEnricher {
    pub fn new(geocoder: Arc<dyn Geocoder + Send + Sync>) -> Self {
        Self {
            geocoder,
            lookup_delay: Duration::from_millis(1000),
        }
    }

    pub fn with_delay(geocoder: Arc<dyn Geocoder + Send + Sync>, delay: Duration) -> Self {
        Self {
            geocoder,
            lookup_delay: delay,
        }
    }

    /// Append `latitude`/`longitude` columns derived from `location_col`.
    ///
    /// Rows with a null location cell get nulls without a lookup or pause.
    pub async fn enrich(&self, dataset: &mut Dataset, location_col: &str) -> Result<()> {
        let cells = dataset
            .column(location_col)
            .ok_or_else(|| {
                AppError::RoleMissing(format!(
                    "Location column '{}' is not part of the dataset",
                    location_col
                ))
            })?
            .cells
            .clone();

        let mut latitudes = Vec::with_capacity(cells.len());
        let mut longitudes = Vec::with_capacity(cells.len());

        for (row, cell) in cells.iter().enumerate() {
            if cell.is_null() {
                latitudes.push(CellValue::Null);
                longitudes.push(CellValue::Null);
                continue;
            }

            let query = cell.display_key();
            match self.geocoder.geocode(&query).await {
                Ok(Some(point)) => {
                    debug!(row, query = %query, "Resolved location");
                    latitudes.push(CellValue::Number(point.latitude));
                    longitudes.push(CellValue::Number(point.longitude));
                }
                Ok(None) => {
                    debug!(row, query = %query, "Location not found");
                    latitudes.push(CellValue::Null);
                    longitudes.push(CellValue::Null);
                }
                Err(err) => {
                    warn!(row, query = %query, error = %err, "Geocode lookup failed");
                    latitudes.push(CellValue::Null);
                    longitudes.push(CellValue::Null);
                }
            }

            // One pause per lookup attempt, regardless of outcome.
            tokio::time::sleep(self.lookup_delay).await;
        }

        dataset.push_column(Column::new(LATITUDE_COLUMN, latitudes))?;
        dataset.push_column(Column::new(LONGITUDE_COLUMN, longitudes))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::GeoPoint;
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Outcome {
        Found(f64, f64),
        NotFound,
        Failure,
    }

    struct ScriptedGeocoder {
        outcomes: Vec<Outcome>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGeocoder {
        fn new(outcomes: Vec<Outcome>) -> Self {
            Self {
                outcomes,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Geocoder for ScriptedGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(query.to_string());
            match self.outcomes.get(index) {
                Some(Outcome::Found(lat, lon)) => Ok(Some(GeoPoint::new(*lat, *lon))),
                Some(Outcome::NotFound) => Ok(None),
                Some(Outcome::Failure) | None => {
                    Err(AppError::GeocodeError("service unavailable".to_string()))
                }
            }
        }
    }

    fn location_dataset(cells: Vec<CellValue>) -> Dataset {
        let mut dataset = Dataset::new();
        dataset
            .push_column(Column::new("Store Address", cells))
            .unwrap();
        dataset
    }

    fn enricher(geocoder: Arc<ScriptedGeocoder>) -> GeoEnricher {
        GeoEnricher::with_delay(geocoder, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_appends_two_columns_with_same_row_count() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![
            Outcome::Found(52.52, 13.40),
            Outcome::NotFound,
            Outcome::Failure,
        ]));
        let mut dataset = location_dataset(vec![
            CellValue::Text("Berlin".to_string()),
            CellValue::Text("Nowhere".to_string()),
            CellValue::Text("Hamburg".to_string()),
        ]);

        enricher(geocoder.clone())
            .enrich(&mut dataset, "Store Address")
            .await
            .unwrap();

        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.row_count(), 3);

        let latitudes = &dataset.column(LATITUDE_COLUMN).unwrap().cells;
        let longitudes = &dataset.column(LONGITUDE_COLUMN).unwrap().cells;
        assert_eq!(latitudes[0], CellValue::Number(52.52));
        assert_eq!(longitudes[0], CellValue::Number(13.40));
        assert_eq!(latitudes[1], CellValue::Null);
        assert_eq!(longitudes[1], CellValue::Null);
        assert_eq!(latitudes[2], CellValue::Null);
        assert_eq!(longitudes[2], CellValue::Null);
        assert_eq!(geocoder.call_count(), 3);
    }

    #[tokio::test]
    async fn test_null_locations_skip_lookups_entirely() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![]));
        let mut dataset = location_dataset(vec![CellValue::Null, CellValue::Null]);

        enricher(geocoder.clone())
            .enrich(&mut dataset, "Store Address")
            .await
            .unwrap();

        assert_eq!(geocoder.call_count(), 0);
        let latitudes = &dataset.column(LATITUDE_COLUMN).unwrap().cells;
        assert!(latitudes.iter().all(|c| c.is_null()));
        let longitudes = &dataset.column(LONGITUDE_COLUMN).unwrap().cells;
        assert!(longitudes.iter().all(|c| c.is_null()));
    }

    #[tokio::test]
    async fn test_lookups_run_in_row_order() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![
            Outcome::NotFound,
            Outcome::NotFound,
        ]));
        let mut dataset = location_dataset(vec![
            CellValue::Text("first".to_string()),
            CellValue::Null,
            CellValue::Text("second".to_string()),
        ]);

        enricher(geocoder.clone())
            .enrich(&mut dataset, "Store Address")
            .await
            .unwrap();

        let calls = geocoder.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_location_column_is_an_error() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![]));
        let mut dataset = location_dataset(vec![CellValue::Null]);

        let result = enricher(geocoder).enrich(&mut dataset, "no such column").await;
        assert!(matches!(result, Err(AppError::RoleMissing(_))));
    }
}
