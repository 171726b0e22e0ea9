// ============================================================
// CSV PARSER
// ============================================================
// Parse delimited-text files into a Dataset, with encoding and
// delimiter detection

use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::domain::dataset::{CellValue, Column, Dataset};
use crate::domain::error::{AppError, Result};

/// CSV parser with encoding detection
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a CSV file into a Dataset
    pub fn parse_file(&self, path: &Path) -> Result<Dataset> {
        let content = read_with_encoding_detection(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            for (col, column_cells) in cells.iter_mut().enumerate() {
                let raw = record.get(col).unwrap_or("");
                column_cells.push(CellValue::from_raw(raw));
            }
        }

        let mut dataset = Dataset::new();
        for (header, column_cells) in headers.iter().zip(cells) {
            dataset.push_column(Column::new(header, column_cells))?;
        }

        Ok(dataset)
    }

    /// Parse a CSV file with automatic delimiter detection
    pub fn parse_file_auto_detect(path: &Path) -> Result<Dataset> {
        let content = read_with_encoding_detection(path)?;
        let delimiter = Self::detect_delimiter(&content);
        Self::default().with_delimiter(delimiter).parse_content(&content)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();

            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }
}

/// Read file bytes as UTF-8, falling back to Windows-1252 for legacy exports
fn read_with_encoding_detection(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;

    if let Ok(content) = std::str::from_utf8(&bytes) {
        return Ok(content.to_string());
    }

    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
    if !had_errors {
        return Ok(decoded.into_owned());
    }

    Ok(String::from_utf8_lossy(&bytes).to_string())
}
