//! Generic tabular file reader/writer (CSV).
//!
//! Point-of-sale exports start with a banner of a few rows before the real header, so
//! [`read_table`] can skip a fixed number of leading records.

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

use larder_core::DomainError;

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: unsupported file format '.{extension}' (expected .csv)", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("{}: no header row after skipping {skipped} rows", path.display())]
    MissingHeader { path: PathBuf, skipped: usize },

    #[error("{}: missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: row {line}: cannot parse '{value}' in column '{column}'", path.display())]
    InvalidCell {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },

    #[error("{}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

impl TabularError {
    pub fn invalid(path: &Path, source: DomainError) -> Self {
        Self::Invalid {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A header row plus data rows. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a required column (header match is trimmed and exact).
    pub fn column(&self, name: &str) -> Result<usize, TabularError> {
        self.optional_column(name).ok_or_else(|| TabularError::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }

    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn ensure_csv(path: &Path) -> Result<(), TabularError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if extension == "csv" {
        Ok(())
    } else {
        Err(TabularError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// Read a CSV file, skipping `skip_rows` leading records before the header.
///
/// Short rows are padded with empty cells, long rows truncated, and blank rows dropped.
pub fn read_table(path: &Path, skip_rows: usize) -> Result<Table, TabularError> {
    ensure_csv(path)?;

    let file = File::open(path).map_err(|source| TabularError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let csv_err = |source: csv::Error| TabularError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut records = reader.records().skip(skip_rows);
    let headers: Vec<String> = match records.next() {
        Some(record) => record.map_err(csv_err)?.iter().map(|h| h.trim().to_string()).collect(),
        None => {
            return Err(TabularError::MissingHeader {
                path: path.to_path_buf(),
                skipped: skip_rows,
            });
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_err)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<String> = record.iter().take(headers.len()).map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read table");

    Ok(Table {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Write a header plus rows as CSV, creating parent directories.
pub fn write_table(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<(), TabularError> {
    ensure_csv(path)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| TabularError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let csv_err = |source: csv::Error| TabularError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(headers).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TabularError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn skips_banner_rows_and_pads_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "orders.csv",
            "Restaurant report\nFrom,To\nItems,Order Type,Created\n\"Tea, Bun\",Dine In,2024-01-01 10:00:00\nCoffee\n",
        );

        let table = read_table(&path, 2).unwrap();
        assert_eq!(table.headers, vec!["Items", "Order Type", "Created"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "Tea, Bun");
        assert_eq!(table.rows[1], vec!["Coffee", "", ""]);
    }

    #[test]
    fn unsupported_extension_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "orders.xlsx", "");
        match read_table(&path, 0) {
            Err(TabularError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "xlsx"),
            other => panic!("expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv"), 0).unwrap_err();
        assert!(matches!(err, TabularError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "t.csv", "Name,Category\nTea,Drinks\n");
        let table = read_table(&path, 0).unwrap();
        assert_eq!(table.column("Category").unwrap(), 1);
        assert!(matches!(
            table.column("Stock"),
            Err(TabularError::MissingColumn { column, .. }) if column == "Stock"
        ));
    }

    #[test]
    fn written_tables_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.csv");
        let headers = vec!["Items".to_string(), "Packaging_Used".to_string()];
        let rows = vec![vec!["Veg Burger".to_string(), "BOX,BAG".to_string()]];
        write_table(&path, &headers, &rows).unwrap();

        let table = read_table(&path, 0).unwrap();
        assert_eq!(table.headers, headers);
        assert_eq!(table.rows, rows);
    }
}
