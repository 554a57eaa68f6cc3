//! CSV ingestion for training datasets
//!
//! All failures are `TrainingData` errors naming the file, column or line.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::constants::{EMAIL_LABEL_COLUMN, EMAIL_TEXT_COLUMN};
use crate::error::{DetectorError, DetectorResult};

use super::record::{LabeledText, NumericDataset, UrlDataset};

/// Header + records of one CSV file
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<StringRecord>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require_column(&self, name: &str) -> DetectorResult<usize> {
        self.column(name).ok_or_else(|| {
            DetectorError::training(format!(
                "missing column '{}' (found: {})",
                name,
                self.headers.join(", ")
            ))
        })
    }
}

/// Data rows start on line 2
fn line_of(index: usize) -> usize {
    index + 2
}

pub fn read_table(path: &Path) -> DetectorResult<Table> {
    if !path.is_file() {
        return Err(DetectorError::training(format!(
            "dataset not found: {}",
            path.display()
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    if records.is_empty() {
        return Err(DetectorError::training(format!(
            "dataset is empty: {}",
            path.display()
        )));
    }

    log::info!("Read {} rows from {}", records.len(), path.display());
    Ok(Table { headers, records })
}

/// Integer 0/1 label (`1`, `0`, `1.0` accepted)
pub fn parse_binary_label(value: &str, line: usize) -> DetectorResult<usize> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(v) if v == 0.0 => Ok(0),
        Ok(v) if v == 1.0 => Ok(1),
        Ok(_) => Err(DetectorError::training(format!(
            "line {}: label '{}' is not 0 or 1",
            line, value
        ))),
        Err(_) => Err(DetectorError::training(format!(
            "line {}: label '{}' is not numeric",
            line, value
        ))),
    }
}

/// `Safe Email` → 0, `Phishing Email` → 1 (case-insensitive)
pub fn parse_email_label(value: &str, line: usize) -> DetectorResult<usize> {
    match value.trim().to_ascii_lowercase().as_str() {
        "safe email" => Ok(0),
        "phishing email" => Ok(1),
        other => Err(DetectorError::training(format!(
            "line {}: unknown email type '{}'",
            line, other
        ))),
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Raw mode when `url_column` exists, numeric mode otherwise
pub fn load_url_dataset(path: &Path, url_column: &str, label_column: &str) -> DetectorResult<UrlDataset> {
    let table = read_table(path)?;
    let label_idx = table.require_column(label_column)?;

    if let Some(url_idx) = table.column(url_column) {
        let mut rows = Vec::with_capacity(table.records.len());
        for (i, record) in table.records.iter().enumerate() {
            let line = line_of(i);
            let label = parse_binary_label(record.get(label_idx).unwrap_or(""), line)?;
            let text = record.get(url_idx).unwrap_or("").to_string();
            rows.push(LabeledText { line, text, label });
        }
        log::info!("URL dataset: raw mode, {} rows", rows.len());
        return Ok(UrlDataset::Raw(rows));
    }

    // Numeric mode: keep columns whose every value is a finite number
    let candidates: Vec<usize> = (0..table.headers.len()).filter(|&c| c != label_idx).collect();
    let feature_cols: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&c| {
            table
                .records
                .iter()
                .all(|r| r.get(c).and_then(parse_number).is_some())
        })
        .collect();

    let skipped = candidates.len() - feature_cols.len();
    if skipped > 0 {
        log::warn!("URL dataset: {} non-numeric columns ignored", skipped);
    }
    if feature_cols.is_empty() {
        return Err(DetectorError::training(format!(
            "no '{}' column and no numeric feature columns",
            url_column
        )));
    }

    let mut rows = Vec::with_capacity(table.records.len());
    let mut labels = Vec::with_capacity(table.records.len());
    for (i, record) in table.records.iter().enumerate() {
        labels.push(parse_binary_label(record.get(label_idx).unwrap_or(""), line_of(i))?);
        rows.push(
            feature_cols
                .iter()
                .map(|&c| record.get(c).and_then(parse_number).unwrap_or(0.0))
                .collect(),
        );
    }

    let feature_names = feature_cols.iter().map(|&c| table.headers[c].clone()).collect();
    log::info!(
        "URL dataset: numeric mode, {} rows x {} features",
        rows.len(),
        feature_cols.len()
    );
    Ok(UrlDataset::Numeric(NumericDataset {
        feature_names,
        rows,
        labels,
    }))
}

/// `Email Text` + `Email Type`; blank bodies are skipped
pub fn load_email_dataset(path: &Path) -> DetectorResult<Vec<LabeledText>> {
    let table = read_table(path)?;
    let text_idx = table.require_column(EMAIL_TEXT_COLUMN)?;
    let label_idx = table.require_column(EMAIL_LABEL_COLUMN)?;

    let mut rows = Vec::with_capacity(table.records.len());
    let mut skipped = 0usize;
    for (i, record) in table.records.iter().enumerate() {
        let line = line_of(i);
        let text = record.get(text_idx).unwrap_or("");
        if text.trim().is_empty() {
            skipped += 1;
            continue;
        }
        let label = parse_email_label(record.get(label_idx).unwrap_or(""), line)?;
        rows.push(LabeledText {
            line,
            text: text.to_string(),
            label,
        });
    }

    if skipped > 0 {
        log::warn!("Email dataset: skipped {} rows with blank text", skipped);
    }
    if rows.is_empty() {
        return Err(DetectorError::training("email dataset has no usable rows"));
    }
    Ok(rows)
}
