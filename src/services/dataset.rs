use anyhow::{Result, anyhow, Context};
use polars::prelude::*;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Maximum number of rows returned by the preview endpoint
pub const PREVIEW_ROW_LIMIT: usize = 10;

/// In-memory store holding the single active dataset. Uploading a new
/// file replaces the previous dataset wholesale.
#[derive(Clone, Debug)]
pub struct DatasetStore {
    slot: Arc<RwLock<Option<DataFrame>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Parse CSV bytes and swap the result in as the active dataset.
    /// Returns the parsed shape as (rows, columns).
    pub fn ingest(&self, csv_data: &[u8]) -> Result<(usize, usize)> {
        let df = parse_csv_data(csv_data)?;
        let shape = (df.height(), df.width());

        let mut slot = self.slot.write().map_err(|_| anyhow!("Failed to lock dataset slot"))?;
        *slot = Some(df);

        Ok(shape)
    }

    /// Get the column names of the active dataset, in dataset order.
    /// Returns None when nothing has been uploaded yet.
    pub fn column_names(&self) -> Result<Option<Vec<String>>> {
        let slot = self.slot.read().map_err(|_| anyhow!("Failed to lock dataset slot"))?;
        Ok(slot
            .as_ref()
            .map(|df| df.get_column_names().iter().map(|name| name.to_string()).collect()))
    }

    /// Get the first rows of the active dataset as JSON records, one object
    /// per row with keys in dataset column order.
    pub fn preview_records(&self, limit: usize) -> Result<Option<Vec<Value>>> {
        let slot = self.slot.read().map_err(|_| anyhow!("Failed to lock dataset slot"))?;
        let df = match slot.as_ref() {
            Some(df) => df,
            None => return Ok(None),
        };

        let head = df.head(Some(limit));
        let mut records = Vec::with_capacity(head.height());

        for row_idx in 0..head.height() {
            let mut record = serde_json::Map::new();
            for series in head.get_columns() {
                let value = series
                    .get(row_idx)
                    .with_context(|| format!("Failed to read row {} of column {}", row_idx, series.name()))?;
                record.insert(series.name().to_string(), any_value_to_json(value));
            }
            records.push(Value::Object(record));
        }

        Ok(Some(records))
    }
}

fn parse_csv_data(csv_data: &[u8]) -> Result<DataFrame> {
    let cursor = std::io::Cursor::new(csv_data);
    let df = CsvReader::new(cursor)
        .infer_schema(Some(100))
        .has_header(true)
        .finish()
        .context("Failed to parse CSV data")?;
    Ok(df)
}

/// Convert a single cell to its JSON representation
fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Utf8(s) => Value::String(s.to_string()),
        AnyValue::Utf8Owned(s) => Value::String(s.to_string()),
        AnyValue::UInt8(v) => Value::Number(v.into()),
        AnyValue::UInt16(v) => Value::Number(v.into()),
        AnyValue::UInt32(v) => Value::Number(v.into()),
        AnyValue::UInt64(v) => Value::Number(v.into()),
        AnyValue::Int8(v) => Value::Number(v.into()),
        AnyValue::Int16(v) => Value::Number(v.into()),
        AnyValue::Int32(v) => Value::Number(v.into()),
        AnyValue::Int64(v) => Value::Number(v.into()),
        AnyValue::Float32(v) => serde_json::Number::from_f64(f64::from(v))
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Date(days) => match chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0) {
            Some(dt) => Value::String(dt.format("%Y-%m-%d").to_string()),
            None => Value::Null,
        },
        AnyValue::Datetime(v, time_unit, _) => {
            let timestamp_ms = match time_unit {
                TimeUnit::Nanoseconds => v / 1_000_000,
                TimeUnit::Microseconds => v / 1_000,
                TimeUnit::Milliseconds => v,
            };
            match chrono::DateTime::from_timestamp_millis(timestamp_ms) {
                Some(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()),
                None => Value::Null,
            }
        }
        other => Value::String(format!("{}", other)),
    }
}
