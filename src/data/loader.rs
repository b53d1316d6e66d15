//! CSV Data Loader Module
//! Reads the incident CSV into a raw polars DataFrame.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the raw incident table. Column names are left exactly as written.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let csv_error = |source| LoaderError::CsvError {
            path: file_path.to_path_buf(),
            source,
        };

        // Lazy scan, then collect; a bad cell becomes null instead of failing the load
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .map_err(csv_error)?
            .collect()
            .map_err(csv_error)?;

        log::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let err = DataLoader::load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn test_load_keeps_raw_column_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Latitude,Longitude,Name").unwrap();
        writeln!(file, "34.1,-117.2,Valley Fire").unwrap();
        file.flush().unwrap();

        let df = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(df.height(), 1);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["Latitude", "Longitude", "Name"]);
    }
}
