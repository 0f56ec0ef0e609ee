use std::collections::HashMap;

use tracing::info;

use crate::constants::{COLUMN_DOB, COLUMN_NAME, COLUMN_PRESENT};
use crate::models::{BirthdayRecord, Error};
use crate::utils::datetime::parse_dob;

/// The spreadsheet could not be fetched or understood
#[derive(Debug)]
pub enum SheetError {
    Http(reqwest::Error),
    BadStatus(reqwest::StatusCode),
    MissingColumn(&'static str),
    Empty,
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::Http(e) => write!(f, "Sheet request failed: {}", e),
            SheetError::BadStatus(status) => {
                write!(f, "Sheet request rejected with HTTP {}", status)
            }
            SheetError::MissingColumn(column) => {
                write!(f, "Sheet is missing required column '{}'", column)
            }
            SheetError::Empty => write!(f, "Sheet has no header row"),
        }
    }
}

impl std::error::Error for SheetError {}

impl From<reqwest::Error> for SheetError {
    fn from(e: reqwest::Error) -> Self {
        SheetError::Http(e)
    }
}

/// Client for the birthday spreadsheet
///
/// Reads the sheet's anonymous CSV export endpoint, which serves
/// link-visible sheets without an API credential.
pub struct SheetClient {
    client: reqwest::Client,
}

impl SheetClient {
    /// Create a new sheet client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// CSV export endpoint for a sheet URL
    fn export_url(sheet_url: &str) -> String {
        format!("{}/gviz/tq?tqx=out:csv", sheet_url.trim_end_matches('/'))
    }

    /// Fetch all birthday records from the sheet.
    ///
    /// The first row must be a header containing the `DOB`, `Who` and
    /// `Present` columns. A row with an unparseable date of birth fails the
    /// whole fetch; no partial record list is returned.
    pub async fn fetch_records(&self, sheet_url: &str) -> Result<Vec<BirthdayRecord>, Error> {
        let url = Self::export_url(sheet_url);
        let response = self.client.get(&url).send().await.map_err(SheetError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Box::new(SheetError::BadStatus(status)));
        }

        let body = response.text().await.map_err(SheetError::Http)?;
        let rows = rows_as_maps(&parse_csv(&body))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(parse_record(row)?);
        }

        info!("Fetched {} birthday record(s) from sheet", records.len());
        Ok(records)
    }

    /// Verify the sheet is reachable and well-formed, returning the record count
    pub async fn check_connectivity(&self, sheet_url: &str) -> Result<usize, Error> {
        let records = self.fetch_records(sheet_url).await?;
        Ok(records.len())
    }
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one header-mapped row into a birthday record
fn parse_record(row: &HashMap<String, String>) -> Result<BirthdayRecord, Error> {
    let dob_text = row.get(COLUMN_DOB).map(String::as_str).unwrap_or("");
    let date_of_birth = parse_dob(dob_text)?;

    Ok(BirthdayRecord {
        name: row.get(COLUMN_NAME).cloned().unwrap_or_default(),
        date_of_birth,
        present_note: row.get(COLUMN_PRESENT).cloned().unwrap_or_default(),
    })
}

/// Zip data rows with the header row into column-name maps.
///
/// Rows shorter than the header get empty strings for the missing cells.
fn rows_as_maps(rows: &[Vec<String>]) -> Result<Vec<HashMap<String, String>>, SheetError> {
    let Some((header, data_rows)) = rows.split_first() else {
        return Err(SheetError::Empty);
    };

    for column in [COLUMN_DOB, COLUMN_NAME, COLUMN_PRESENT] {
        if !header.iter().any(|h| h == column) {
            return Err(SheetError::MissingColumn(column));
        }
    }

    let maps = data_rows
        .iter()
        .map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(i, column)| (column.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect();

    Ok(maps)
}

/// Minimal CSV parser for the export format: quoted fields, doubled quotes,
/// CRLF or LF line endings.
fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Final row without a trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
