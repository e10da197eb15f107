//! All-or-nothing CSV import of Ampulario stock.
//!
//! Expected header: `name, dose, unit, quantity, route, expiry_date, space_id`
//! (any order, case-insensitive, extra columns ignored). Every row is checked
//! and every problem is reported; one bad row rejects the batch.

use crate::ampulario::{MaterialInput, Space};
use crate::config::{ImportConfig, RFC3339_FORMAT};
use crate::error::{FleetError, Result};
use crate::types::Route;
use chrono::{DateTime, NaiveDate};
use csv::StringRecord;
use std::collections::HashMap;

pub const COLUMNS: [&str; 7] = [
    "name",
    "dose",
    "unit",
    "quantity",
    "route",
    "expiry_date",
    "space_id",
];

// ---------------------------------------------------------------------------
// DateParser
// ---------------------------------------------------------------------------

/// Tries every configured format. Exactly one distinct result is required:
/// a value that reads as two different dates is ambiguous and refused.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    pub fn new(formats: &[String]) -> Self {
        Self {
            formats: formats.to_vec(),
        }
    }

    pub fn parse(&self, raw: &str) -> std::result::Result<NaiveDate, String> {
        let raw = raw.trim();
        let mut found: Vec<NaiveDate> = Vec::new();

        for fmt in &self.formats {
            let parsed = if fmt == RFC3339_FORMAT {
                DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive())
            } else {
                NaiveDate::parse_from_str(raw, fmt).ok()
            };
            if let Some(date) = parsed {
                if !found.contains(&date) {
                    found.push(date);
                }
            }
        }

        match found.as_slice() {
            [date] => Ok(*date),
            [] => Err(format!(
                "invalid date '{raw}' (accepted formats: {})",
                self.formats.join(", ")
            )),
            _ => Err(format!(
                "ambiguous date '{raw}' matches {} different days",
                found.len()
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// parse_csv
// ---------------------------------------------------------------------------

/// Parse and validate a whole upload. Row numbers in error details are file
/// line numbers, so the header is line 1 and the first data row is row 2.
pub fn parse_csv(data: &[u8], cfg: &ImportConfig, spaces: &[Space]) -> Result<Vec<MaterialInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim_start_matches('\u{feff}').to_ascii_lowercase(), i))
        .collect();

    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|c| !index.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FleetError::ImportRejected {
            message: "CSV header is missing required columns".to_string(),
            details: missing
                .into_iter()
                .map(|c| format!("missing column '{c}'"))
                .collect(),
        });
    }

    let dates = DateParser::new(&cfg.date_formats);
    let mut rows = Vec::new();
    let mut details = Vec::new();
    let mut seen = 0usize;

    for (i, record) in reader.records().enumerate() {
        let fallback_line = i as u64 + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                details.push(format!("row {line}: {e}"));
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        seen += 1;
        if seen > cfg.max_rows {
            return Err(FleetError::ImportRejected {
                message: format!("CSV exceeds the {} row limit", cfg.max_rows),
                details: Vec::new(),
            });
        }

        match parse_row(&record, &index, &dates, spaces) {
            Ok(input) => rows.push(input),
            Err(problems) => {
                details.extend(problems.into_iter().map(|p| format!("row {line}: {p}")))
            }
        }
    }

    if !details.is_empty() {
        return Err(FleetError::ImportRejected {
            message: "CSV import rejected: no rows were imported".to_string(),
            details,
        });
    }
    if rows.is_empty() {
        return Err(FleetError::ImportRejected {
            message: "CSV contains no data rows".to_string(),
            details: Vec::new(),
        });
    }

    Ok(rows)
}

fn field<'r>(record: &'r StringRecord, index: &HashMap<String, usize>, name: &str) -> &'r str {
    index
        .get(name)
        .and_then(|&i| record.get(i))
        .unwrap_or("")
}

fn parse_row(
    record: &StringRecord,
    index: &HashMap<String, usize>,
    dates: &DateParser,
    spaces: &[Space],
) -> std::result::Result<MaterialInput, Vec<String>> {
    let get = |name: &str| field(record, index, name);
    let mut problems = Vec::new();

    let name = get("name");
    if name.is_empty() {
        problems.push("name is required".to_string());
    }

    let space_id = get("space_id");
    if space_id.is_empty() {
        problems.push("space_id is required".to_string());
    } else if !spaces.iter().any(|s| s.id == space_id) {
        problems.push(format!("unknown space_id '{space_id}'"));
    }

    let quantity = match get("quantity").parse::<u32>() {
        Ok(q) => Some(q),
        Err(_) => {
            problems.push(format!("invalid quantity '{}'", get("quantity")));
            None
        }
    };

    let route = match get("route").parse::<Route>() {
        Ok(r) => Some(r),
        Err(_) => {
            problems.push(format!("invalid route '{}'", get("route")));
            None
        }
    };

    let raw_expiry = get("expiry_date");
    let expiry_date = if raw_expiry.is_empty() {
        problems.push("expiry_date is required".to_string());
        None
    } else {
        match dates.parse(raw_expiry) {
            Ok(d) => Some(d),
            Err(e) => {
                problems.push(e);
                None
            }
        }
    };

    match (quantity, route, expiry_date) {
        (Some(quantity), Some(route), Some(expiry_date)) if problems.is_empty() => {
            Ok(MaterialInput {
                name: name.to_string(),
                dose: get("dose").to_string(),
                unit: get("unit").to_string(),
                quantity,
                route,
                expiry_date,
                space_id: space_id.to_string(),
            })
        }
        _ => Err(problems),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
