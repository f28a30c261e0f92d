//! Two-column dataset loading and population statistics.
//!
//! The dataset is the population every sample is drawn from. It is read once
//! when the main screen is built and never changes afterwards.
//!
//! # File Formats
//!
//! Spreadsheets (`.xlsx`, `.xlsm`, `.xls`, `.ods`) are read from their first
//! sheet, column A as the label and column B as the value. Anything else is
//! read as delimited text:
//!
//! ```text
//! # label, value
//! name,value        <- optional header (non-numeric value column)
//! alice,41.5
//! bob	39            <- comma, tab or semicolon separated
//! ```
//!
//! Both formats follow the same record rules:
//!
//! - Blank lines (or rows) and text lines starting with `#` are skipped.
//! - A first record whose value does not parse is treated as a header.
//! - Labels behave like mapping keys: a repeated label overwrites the earlier
//!   value and keeps the earlier position.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::error::DatasetError;

/// Extensions read as spreadsheets rather than text.
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Ordered `label -> value` mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    labels: Vec<String>,
    values: Vec<f64>,
}

/// The value column of one record.
#[derive(Clone, Debug, PartialEq)]
enum Field {
    Number(f64),
    /// Present but not a number.
    Text(String),
    Missing,
}

impl Field {
    fn from_text(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) => Self::Number(value),
            Err(_) => Self::Text(text.trim().to_owned()),
        }
    }

    fn from_cell(cell: Option<&Data>) -> Self {
        match cell {
            None | Some(Data::Empty) => Self::Missing,
            Some(Data::Float(value)) => Self::Number(*value),
            Some(Data::Int(value)) => Self::Number(*value as f64),
            Some(Data::String(text)) => Self::from_text(text),
            Some(other) => Self::Text(other.to_string()),
        }
    }
}

/// One record before validation: 1-based line or row, label, value column.
type RawRecord = (usize, String, Field);

impl Dataset {
    /// Read a dataset file, as a spreadsheet or as text depending on its extension.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)));
        let parsed = if is_workbook {
            Self::read_workbook(path)?
        } else {
            let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::parse(&text)
        };
        let dataset = parsed.map_err(|(line, reason)| DatasetError::Parse {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        if dataset.is_empty() {
            return Err(DatasetError::Empty(path.to_path_buf()));
        }
        info!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Parse dataset text. Errors carry the 1-based line number and a reason.
    pub fn parse(text: &str) -> Result<Self, (usize, String)> {
        let records = text.lines().enumerate().filter_map(|(idx, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let mut fields = line.splitn(2, [',', '\t', ';']);
            let label = fields.next().unwrap_or_default().trim().to_owned();
            let value = fields.next().map_or(Field::Missing, Field::from_text);
            Some((idx + 1, label, value))
        });
        Self::from_raw_records(records)
    }

    /// Read columns A and B of the first sheet.
    ///
    /// The outer error is a workbook that cannot be opened; the inner one a bad row.
    fn read_workbook(path: &Path) -> Result<Result<Self, (usize, String)>, DatasetError> {
        let workbook_error = |source| DatasetError::Workbook {
            path: path.to_path_buf(),
            source,
        };
        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DatasetError::NoSheet(path.to_path_buf()))?
            .map_err(workbook_error)?;

        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let column = |row: &[Data], col: u32| -> Option<Data> {
            col.checked_sub(first_col).and_then(|i| row.get(i as usize)).cloned()
        };
        let records = range.rows().enumerate().filter_map(|(idx, row)| {
            let label = column(row, 0).unwrap_or(Data::Empty);
            let value = Field::from_cell(column(row, 1).as_ref());
            if label == Data::Empty && value == Field::Missing {
                return None;
            }
            let row_no = first_row as usize + idx + 1;
            Some((row_no, label.to_string(), value))
        });
        Ok(Self::from_raw_records(records))
    }

    /// Apply the header, validation and duplicate-label rules to raw records.
    fn from_raw_records<I>(records: I) -> Result<Self, (usize, String)>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut dataset = Self::default();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut first_record = true;

        for (line_no, label, field) in records {
            let value = match field {
                Field::Number(v) if v.is_finite() => v,
                Field::Number(v) => return Err((line_no, format!("value `{v}` is not finite"))),
                Field::Text(_) if first_record => {
                    debug!(line = line_no, "skipping header row");
                    first_record = false;
                    continue;
                }
                Field::Text(text) => return Err((line_no, format!("value `{text}` is not a number"))),
                Field::Missing => return Err((line_no, format!("expected two columns for `{label}`"))),
            };
            first_record = false;
            dataset.insert(&label, value, &mut index);
        }

        Ok(dataset)
    }

    /// Build a dataset directly from records (same overwrite semantics as parsing).
    #[cfg(test)]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut dataset = Self::default();
        let mut index = HashMap::new();
        for (label, value) in records {
            dataset.insert(label, value, &mut index);
        }
        dataset
    }

    fn insert(
        &mut self,
        label: &str,
        value: f64,
        index: &mut HashMap<String, usize>,
    ) {
        if let Some(&pos) = index.get(label) {
            self.values[pos] = value;
        } else {
            index.insert(label.to_owned(), self.values.len());
            self.labels.push(label.to_owned());
            self.values.push(value);
        }
    }

    /// Values in file order. This is the sampling pool.
    #[inline]
    pub fn values(&self) -> &[f64] { &self.values }

    /// Labels in file order.
    #[inline]
    pub fn labels(&self) -> &[String] { &self.labels }

    #[inline]
    pub fn len(&self) -> usize { self.values.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Population parameters computed once from the dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Population {
    pub mean: f64,
    /// Population variance (divides by N).
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Population {
    /// Summarize the dataset values. An empty dataset yields all zeros.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                variance: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let (mean, variance) = mean_and_variance(values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean,
            variance,
            min,
            max,
        }
    }

    #[inline]
    pub fn std_dev(&self) -> f64 { self.variance.sqrt() }
}

/// Arithmetic mean and population variance of `values`.
pub fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, variance)
}
