use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::dataset::Dataset;
use super::roles::ColumnRoles;

/// The single entry held by the dataset store: the most recently ingested
/// dataset plus the roles the insight flow needs later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDataset {
    pub id: String,
    pub dataset: Dataset,
    pub measure_col: Option<String>,
    pub date_col: Option<String>,
    pub hover_col: Option<String>,
    pub ingested_at: DateTime<Utc>,
}

impl StoredDataset {
    pub fn new(
        dataset: Dataset,
        measure_col: Option<String>,
        date_col: Option<String>,
        hover_col: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            dataset,
            measure_col,
            date_col,
            hover_col,
            ingested_at: Utc::now(),
        }
    }
}

/// Typed result of the ingestion entry point: the column list, the
/// resolved roles, and the row data as structured records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub columns: Vec<String>,
    pub roles: ColumnRoles,
    pub row_count: usize,
    pub data: Vec<Map<String, Value>>,
}
