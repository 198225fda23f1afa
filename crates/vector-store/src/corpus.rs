use crate::error::{Result, VectorStoreError};
use crate::types::QaRow;
use serde_json::Value;
use std::path::Path;

/// Read question/answer rows from a dataset file.
///
/// A `.csv` extension selects [`parse_csv_rows`]; anything else is read as a
/// JSON array or JSON Lines. Rows are returned in file order.
pub async fn load_rows(path: impl AsRef<Path>) -> Result<Vec<QaRow>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let rows = if is_csv {
        parse_csv_rows(&raw)?
    } else {
        parse_rows(&raw)?
    };
    log::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// JSON array or JSON Lines. A missing or `null` field becomes `""`;
/// numbers and booleans are rendered to text.
pub fn parse_rows(raw: &str) -> Result<Vec<QaRow>> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed)?;
        return values
            .iter()
            .enumerate()
            .map(|(i, value)| row_from_value(value, i + 1, "element"))
            .collect();
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let value: Value = serde_json::from_str(line).map_err(|e| {
                VectorStoreError::DatasetError(format!("line {}: {e}", i + 1))
            })?;
            row_from_value(&value, i + 1, "line")
        })
        .collect()
}

/// CSV with a header row naming `question` and `answer` columns, in any
/// order. Other columns are ignored and missing cells become `""`.
pub fn parse_csv_rows(raw: &str) -> Result<Vec<QaRow>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| VectorStoreError::DatasetError(format!("CSV header: {e}")))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                VectorStoreError::DatasetError(format!("CSV header has no `{name}` column"))
            })
    };
    let question = column("question")?;
    let answer = column("answer")?;

    reader
        .records()
        .enumerate()
        .map(|(i, record)| {
            let record = record
                .map_err(|e| VectorStoreError::DatasetError(format!("record {}: {e}", i + 1)))?;
            let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            Ok(QaRow {
                question: cell(question),
                answer: cell(answer),
            })
        })
        .collect()
}

fn row_from_value(value: &Value, position: usize, unit: &str) -> Result<QaRow> {
    let object = value.as_object().ok_or_else(|| {
        VectorStoreError::DatasetError(format!("{unit} {position}: expected a JSON object"))
    })?;
    Ok(QaRow {
        question: field_text(object.get("question")),
        answer: field_text(object.get("answer")),
    })
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
