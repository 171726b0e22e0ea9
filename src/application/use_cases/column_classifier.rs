// Heuristic column-role detection for datasets of unknown schema.
//
// Matching is case-insensitive substring containment, first match wins in
// column order. Roles are detected independently of each other, so one
// column may end up carrying several roles.

use crate::domain::roles::ColumnRoles;

pub const LATITUDE_TOKENS: &[&str] = &["lat"];
pub const LONGITUDE_TOKENS: &[&str] = &["lon"];
pub const MEASURE_TOKENS: &[&str] = &["amount", "sales"];
pub const DATE_TOKENS: &[&str] = &["date"];
pub const LOCATION_TOKENS: &[&str] = &["location", "address"];
pub const HOVER_TOKENS: &[&str] = &["store"];

fn first_matching(columns: &[String], tokens: &[&str]) -> Option<String> {
    columns
        .iter()
        .find(|name| {
            let lowered = name.to_lowercase();
            tokens.iter().any(|token| lowered.contains(token))
        })
        .cloned()
}

/// Classify the columns of a dataset by name.
///
/// Never fails: a zero-column dataset yields no roles at all, otherwise the
/// hover role always resolves (store-like column, else the location column,
/// else the first column).
pub fn classify_columns(columns: &[String]) -> ColumnRoles {
    let latitude = first_matching(columns, LATITUDE_TOKENS);
    let longitude = first_matching(columns, LONGITUDE_TOKENS);
    let measure = first_matching(columns, MEASURE_TOKENS);
    let date = first_matching(columns, DATE_TOKENS);
    let location = first_matching(columns, LOCATION_TOKENS);

    let hover = first_matching(columns, HOVER_TOKENS)
        .or_else(|| location.clone())
        .or_else(|| columns.first().cloned());

    ColumnRoles {
        latitude,
        longitude,
        measure,
        date,
        location,
        hover,
    }
}
