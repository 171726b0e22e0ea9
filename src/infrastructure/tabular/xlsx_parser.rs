use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::domain::dataset::{CellValue, Column, Dataset};
use crate::domain::error::{AppError, Result};

/// Spreadsheet parser: first worksheet, first row as headers.
pub struct XlsxParser;

impl XlsxParser {
    pub fn parse_file(path: &Path) -> Result<Dataset> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
            .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Dataset::new());
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| {
                cell.as_string()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{}", cell))
            })
            .collect();

        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
        for row in rows {
            for (col, column_cells) in cells.iter_mut().enumerate() {
                let value = row.get(col).map(cell_value).unwrap_or(CellValue::Null);
                column_cells.push(value);
            }
        }

        let mut dataset = Dataset::new();
        for (header, column_cells) in headers.into_iter().zip(cells) {
            dataset.push_column(Column::new(header, column_cells))?;
        }

        Ok(dataset)
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from_raw(s),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Null,
    }
}
