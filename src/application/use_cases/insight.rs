use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;
use validator::Validate;

use super::column_classifier::classify_columns;
use crate::domain::error::{AppError, Result};
use crate::domain::insight::{InsightRequest, InsightSummary};
use crate::domain::report::StoredDataset;
use crate::infrastructure::dataset_store::DatasetStore;
use crate::infrastructure::llm_clients::TextGenClient;

/// Insight entry point: reduce the current dataset to an aggregate digest,
/// render it into a prompt, and hand it to the text-generation capability.
pub struct InsightUseCase {
    store: Arc<DatasetStore>,
    text_gen: Arc<dyn TextGenClient + Send + Sync>,
}

impl InsightUseCase {
    pub fn new(store: Arc<DatasetStore>, text_gen: Arc<dyn TextGenClient + Send + Sync>) -> Self {
        Self { store, text_gen }
    }

    pub async fn execute(&self, request: InsightRequest) -> Result<String> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let entry = self.store.current().ok_or_else(|| {
            AppError::RoleMissing("No dataset has been ingested".to_string())
        })?;

        let summary = summarize(&entry)?;
        let prompt = build_insight_prompt(&summary);

        info!(
            dataset_id = %entry.id,
            groups = summary.grouped.len(),
            "Requesting insights for current dataset"
        );

        self.text_gen.generate(&request.api_key, &prompt).await
    }
}

/// Compute the aggregate digest of the entry's measure column.
///
/// Totals and means skip null and non-numeric cells. Grouped means are
/// keyed on the latitude column's raw cell rendering; rows with a null
/// latitude are excluded from the breakdown.
pub fn summarize(entry: &StoredDataset) -> Result<InsightSummary> {
    let measure_name = entry
        .measure_col
        .as_deref()
        .ok_or_else(|| AppError::RoleMissing("No measure column was detected".to_string()))?;

    let measure = entry.dataset.column(measure_name).ok_or_else(|| {
        AppError::RoleMissing(format!(
            "Measure column '{}' is not part of the dataset",
            measure_name
        ))
    })?;

    let values: Vec<f64> = measure.numeric_values().collect();
    let total: f64 = values.iter().sum();
    let average = if values.is_empty() {
        0.0
    } else {
        total / values.len() as f64
    };

    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let latitude_col = classify_columns(&entry.dataset.column_names()).latitude;
    if let Some(latitude) = latitude_col.and_then(|name| entry.dataset.column(&name)) {
        for (key_cell, measure_cell) in latitude.cells.iter().zip(&measure.cells) {
            if key_cell.is_null() {
                continue;
            }
            let Some(value) = measure_cell.as_number() else {
                continue;
            };
            let group = groups.entry(key_cell.display_key()).or_insert((0.0, 0));
            group.0 += value;
            group.1 += 1;
        }
    }

    let mut grouped: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect();

    // Numeric order when every key parses as a number, string order otherwise.
    grouped.sort_by(|a, b| match (a.0.parse::<f64>(), b.0.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.0.cmp(&b.0),
    });

    Ok(InsightSummary {
        total,
        average,
        grouped,
    })
}

pub(crate) fn build_insight_prompt(summary: &InsightSummary) -> String {
    let mut body = String::new();
    body.push_str("You are a business strategist. Analyze this dataset.\n");
    body.push_str(&format!("Total sales: {:.2}\n", summary.total));
    body.push_str(&format!("Average sales: {:.2}\n", summary.average));
    body.push_str("City summary:\n");
    for (key, value) in &summary.grouped {
        body.push_str(&format!("- {}: {:.2}\n", key, value));
    }
    body.push_str("\nProvide 3 actionable business insights in bullet points.\n");
    body
}
