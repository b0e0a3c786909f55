use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::ApiError;

/// An uploaded CSV file held in memory as a header plus rows of cells.
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn parse(content: &[u8]) -> Result<Self, ApiError> {
        let text = std::str::from_utf8(content)
            .map_err(|e| ApiError::InvalidCsv(format!("file is not valid UTF-8 ({})", e)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ApiError::InvalidCsv(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ApiError::InvalidCsv("No columns to parse from file".into()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ApiError::InvalidCsv(e.to_string()))?;
            rows.push(pad_record(&record, headers.len())?);
        }

        Ok(CsvTable { headers, rows })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    // Fails with a message listing every required column, present or not.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), ApiError> {
        if names.iter().all(|name| self.has_column(name)) {
            return Ok(());
        }
        let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
        let message = match quoted.as_slice() {
            [one] => format!("a {} column", one),
            [init @ .., last] => format!("{} and {} columns", init.join(", "), last),
            [] => "the required columns".to_string(),
        };
        Err(ApiError::MissingColumns(message))
    }

    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.rows.iter().map(move |cells| CsvRow { table: self, cells })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct CsvRow<'a> {
    table: &'a CsvTable,
    cells: &'a [String],
}

impl<'a> CsvRow<'a> {
    /// Cell value by column name. Empty or blank cells count as missing.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        let cell = self.cells.get(idx)?.as_str();
        if cell.trim().is_empty() {
            None
        } else {
            Some(cell)
        }
    }
}

fn pad_record(record: &StringRecord, width: usize) -> Result<Vec<String>, ApiError> {
    if record.len() > width {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        return Err(ApiError::InvalidCsv(format!(
            "Expected {} fields in line {}, saw {}",
            width,
            line,
            record.len()
        )));
    }
    let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
    cells.resize(width, String::new());
    Ok(cells)
}
