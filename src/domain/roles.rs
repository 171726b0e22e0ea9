use serde::{Deserialize, Serialize};

/// Best-guess semantic role assignment for a dataset's columns.
///
/// Roles are inferred independently; the same column may be assigned to
/// more than one role. `hover` is `None` only for a zero-column dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub measure: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub hover: Option<String>,
}

impl ColumnRoles {
    /// A coordinate pair was detected and enrichment can be skipped.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
