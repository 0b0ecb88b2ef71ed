//! CSV Data Loader Module
//! Discovers raw season files and loads them as one text-typed DataFrame.

use crate::data::error::IngestError;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw files merged into a single table.
pub struct RawTable {
    pub df: DataFrame,
    pub files: Vec<PathBuf>,
}

/// Loads the per-season source files of a directory.
pub struct DataLoader {
    input_dir: PathBuf,
    extension: Option<String>,
}

impl DataLoader {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            extension: None,
        }
    }

    /// Only read files ending in `.{extension}` (case-insensitive).
    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension.map(|ext| ext.trim_start_matches('.').to_string());
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// List regular files in the input directory, sorted by name.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, IngestError> {
        let entries = fs::read_dir(&self.input_dir)
            .map_err(|_| IngestError::NoInputFiles(self.input_dir.clone()))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| self.matches_extension(path))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(IngestError::NoInputFiles(self.input_dir.clone()));
        }
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let Some(wanted) = &self.extension else {
            return true;
        };
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }

    /// Scan one file with every column typed as text, so fee and movement
    /// strings survive untouched until normalization.
    pub fn scan_text_csv(path: &Path) -> PolarsResult<LazyFrame> {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
    }

    /// Load every discovered file and stack them. Columns are unioned by
    /// name, rows keep file order then line order.
    pub fn load_all(&self) -> Result<RawTable, IngestError> {
        let files = self.discover_files()?;

        let mut frames: Vec<LazyFrame> = Vec::with_capacity(files.len());
        for path in &files {
            tracing::debug!(file = %path.display(), "scanning raw file");
            frames.push(Self::scan_text_csv(path)?);
        }

        let df = concat_lf_diagonal(&frames, UnionArgs::default())?.collect()?;
        tracing::info!(
            files = files.len(),
            rows = df.height(),
            columns = df.width(),
            "loaded raw transfer files"
        );

        Ok(RawTable { df, files })
    }
}
