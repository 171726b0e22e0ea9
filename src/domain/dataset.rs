// ============================================================
// TABULAR DATASET TYPES
// ============================================================
// Column-oriented dataset with untyped scalar cells
// No I/O, no async, no external services

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::error::{AppError, Result};

/// A single scalar cell. Columns may freely mix numbers, text and nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a cell from a raw string as read from a file.
    /// Empty values become nulls; values that parse as numbers
    /// (including "1,234.5" style thousands separators) become numbers.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }
        if let Ok(n) = trimmed.replace(',', "").parse::<f64>() {
            return CellValue::Number(n);
        }

        CellValue::Text(trimmed.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the cell for display and grouping keys.
    pub fn display_key(&self) -> String {
        match self {
            CellValue::Null => "null".to_string(),
            CellValue::Number(n) => format!("{}", n),
            CellValue::Text(s) => s.clone(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Number(n) => Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// A named column and its cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Numeric cells only; text and null cells are skipped.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(|cell| cell.as_number())
    }
}

/// An ordered set of equally sized columns.
///
/// Invariant: every column holds exactly `row_count()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column, enforcing the shared row count.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if !self.columns.is_empty() && column.cells.len() != self.row_count() {
            return Err(AppError::Internal(format!(
                "Column '{}' has {} cells, dataset has {} rows",
                column.name,
                column.cells.len(),
                self.row_count()
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Row-major view of the dataset as JSON records, one map per row.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        let mut records = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let mut record = Map::new();
            for column in &self.columns {
                record.insert(column.name.clone(), column.cells[row].to_json());
            }
            records.push(record);
        }
        records
    }
}
