//! Sheets values API.

use certgen_ingest::SheetSource;
use certgen_model::ServiceError;
use serde::Deserialize;
use serde_json::Value;

use crate::client::GoogleClient;

#[derive(Debug, Deserialize)]
struct ValueRange {
    /// Absent when the range holds no data.
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn into_rows(range: ValueRange) -> Vec<Vec<String>> {
    range
        .values
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

impl SheetSource for GoogleClient {
    fn fetch_rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, ServiceError> {
        let url = Self::url(
            &self.endpoints().sheets,
            &["spreadsheets", sheet_id, "values", range],
        )?;
        let range: ValueRange = self.get_json(url)?;
        Ok(into_rows(range))
    }
}
