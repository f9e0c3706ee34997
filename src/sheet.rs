use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One spreadsheet row. Only non-blank cells are kept, so a missing column
/// and an empty cell read the same way: `get` returns `None`.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut row = Row::default();
        for (column, value) in pairs {
            row.set(column, value);
        }
        row
    }

    /// Store a cell, dropping blank values.
    pub fn set(&mut self, column: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.cells.insert(column.to_string(), value.to_string());
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(|v| v.as_str())
    }

    /// True when every cell in the row is blank.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered sequence of rows decoded from a tabular file.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Sheet { rows }
    }

    /// Decode CSV data with a header row. Cell order follows file order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Sheet> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.context("Failed to read CSV record")?;
            let mut row = Row::default();
            for (i, header) in headers.iter().enumerate() {
                if let Some(value) = record.get(i) {
                    row.set(header, value);
                }
            }
            rows.push(row);
        }

        Ok(Sheet { rows })
    }

    pub fn from_path(path: &Path) -> Result<Sheet> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open file {:?}", path))?;
        Sheet::from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let csv = "\
name,amount,payment_type
Fee,50,1
Deposit,120.5,2
";
        let sheet = Sheet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("name"), Some("Fee"));
        assert_eq!(sheet.rows[0].get("amount"), Some("50"));
        assert_eq!(sheet.rows[1].get("payment_type"), Some("2"));
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let csv = "\
title,description
Cash,
Card,
";
        let sheet = Sheet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(sheet.rows[0].get("title"), Some("Cash"));
        assert_eq!(sheet.rows[0].get("description"), None);
        assert_eq!(sheet.rows[1].get("description"), None);
    }

    #[test]
    fn test_blank_line_is_empty_row() {
        let csv = "\
title,description
,
Cash,paper money
";
        let sheet = Sheet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert!(sheet.rows[0].is_empty());
        assert!(!sheet.rows[1].is_empty());
    }

    #[test]
    fn test_cell_values_are_trimmed() {
        let csv = "\
title
  Cash
";
        let sheet = Sheet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(sheet.rows[0].get("title"), Some("Cash"));
    }

    #[test]
    fn test_missing_column_reads_as_absent() {
        let row = Row::from_pairs(&[("title", "Cash")]);
        assert_eq!(row.get("description"), None);
    }

    #[test]
    fn test_headerless_data_still_decodes() {
        let sheet = Sheet::from_reader("".as_bytes()).unwrap();
        assert!(sheet.rows.is_empty());
    }
}
