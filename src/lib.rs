pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use app::{bootstrap, build_state, AppState};
pub use application::{GeoEnricher, IngestionUseCase, InsightUseCase};
pub use domain::dataset::{CellValue, Column, Dataset};
pub use domain::error::{AppError, Result};
pub use domain::insight::{InsightRequest, InsightSummary};
pub use domain::report::{IngestReport, StoredDataset};
pub use domain::roles::ColumnRoles;
