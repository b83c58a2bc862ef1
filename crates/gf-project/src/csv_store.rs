//! CSV-backed material store (`mat.csv`).
//!
//! Headerless, four columns per row: `name,density,ratio,parent`.

use std::fs;
use std::path::{Path, PathBuf};

use gf_materials::{MaterialRow, MaterialStore, StoreError, StoreResult};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CsvMaterialStore {
    path: PathBuf,
}

impl CsvMaterialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl MaterialStore for CsvMaterialStore {
    /// A missing file reads as an empty table.
    fn read_all(&self) -> StoreResult<Vec<MaterialRow>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| StoreError::Malformed {
                row: i + 1,
                message: e.to_string(),
            })?;
            if record.len() != 4 {
                return Err(StoreError::Malformed {
                    row: i + 1,
                    message: format!("expected 4 fields, found {}", record.len()),
                });
            }
            rows.push(MaterialRow::new(
                &record[0],
                &record[1],
                &record[2],
                &record[3],
            ));
        }
        debug!(path = %self.path.display(), rows = rows.len(), "read material table");
        Ok(rows)
    }

    fn write_all(&mut self, rows: &[MaterialRow]) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        for row in rows {
            writer
                .write_record([&row.name, &row.density, &row.ratio, &row.parent])
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(&self.path, bytes).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), rows = rows.len(), "wrote material table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("gf_project_csv_store");
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn missing_file_is_empty() {
        let store = CsvMaterialStore::new(temp_path("does_not_exist.csv"));
        let _ = fs::remove_file(store.path());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn write_then_read() {
        let path = temp_path("water.csv");
        let mut store = CsvMaterialStore::new(&path);
        let rows = vec![
            MaterialRow::new("H2O", "1.0", "1", ""),
            MaterialRow::new("H", "", "2", "H2O"),
        ];
        store.write_all(&rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "H2O,1.0,1,\nH,,2,H2O\n");
        assert_eq!(store.read_all().unwrap(), rows);
    }

    #[test]
    fn fields_are_trimmed() {
        let path = temp_path("spaced.csv");
        fs::write(&path, "Air , 0.0012 , 1 ,\r\nN,,0.78, Air\r\n").unwrap();
        let rows = CsvMaterialStore::new(&path).read_all().unwrap();
        assert_eq!(rows[0], MaterialRow::new("Air", "0.0012", "1", ""));
        assert_eq!(rows[1].parent, "Air");
    }

    #[test]
    fn wrong_field_count_reported_with_row() {
        let path = temp_path("short.csv");
        fs::write(&path, "H2O,1.0,1,\nH,,2\n").unwrap();
        let err = CsvMaterialStore::new(&path).read_all().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { row: 2, .. }));
    }
}
