//! Ingestion Pipeline
//! Discover → merge → normalize → write the canonical dataset.

use crate::config::IngestConfig;
use crate::data::error::IngestError;
use crate::data::loader::DataLoader;
use crate::data::processor::{PipelineOptions, TransferProcessor};
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Summary of one ingestion run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngestReport {
    pub files: Vec<PathBuf>,
    pub input_rows: usize,
    pub output_rows: usize,
    pub dropped_rows: usize,
    pub output_path: PathBuf,
}

/// One-shot batch producing the canonical file.
pub struct IngestPipeline {
    loader: DataLoader,
    options: PipelineOptions,
    output_path: PathBuf,
}

impl IngestPipeline {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            loader: DataLoader::new(input_dir),
            options,
            output_path: output_path.into(),
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        let mut pipeline = Self::new(&config.input_dir, &config.output_path, config.into());
        pipeline.loader = pipeline.loader.with_extension(config.file_extension.clone());
        pipeline
    }

    /// Run the batch. On any error the existing output file is left as is.
    pub fn run(&self) -> Result<IngestReport, IngestError> {
        tracing::info!(
            input_dir = %self.loader.input_dir().display(),
            drop_invalid_age = self.options.drop_invalid_age,
            coerce_season_to_date = self.options.coerce_season_to_date,
            "starting ingestion"
        );

        let raw = self.loader.load_all()?;
        let input_rows = raw.df.height();
        TransferProcessor::require_raw_columns(&raw.df)?;

        let mut df = TransferProcessor::normalize(raw.df, &self.options)?;
        let output_rows = df.height();

        write_csv_atomically(&mut df, &self.output_path)?;
        tracing::info!(
            output = %self.output_path.display(),
            rows = output_rows,
            "wrote canonical dataset"
        );

        Ok(IngestReport {
            files: raw.files,
            input_rows,
            output_rows,
            dropped_rows: input_rows - output_rows,
            output_path: self.output_path.clone(),
        })
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write with a header and no index column, via a sibling temp file renamed
/// over the target.
pub fn write_csv_atomically(df: &mut DataFrame, path: &Path) -> Result<(), IngestError> {
    let tmp = temp_path_for(path);

    let mut file = File::create(&tmp).map_err(|source| IngestError::Io {
        path: tmp.clone(),
        source,
    })?;
    if let Err(err) = CsvWriter::new(&mut file).include_header(true).finish(df) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    drop(file);

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        IngestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path_for(Path::new("out/dataset.csv")),
            PathBuf::from("out/dataset.csv.tmp")
        );
    }

    #[test]
    fn failed_run_leaves_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw");
        fs::create_dir(&input).unwrap();
        fs::write(
            input.join("bad.csv"),
            "club_name,player_name,age,position,club_involved_name,fee,transfer_movement,transfer_period,fee_cleaned,league_name,year,season\n\
             Ajax,Ann,21,Goalkeeper,PSV,x,in,Summer,1.0,Eredivisie,2020,bad\n",
        )
        .unwrap();
        let output = dir.path().join("dataset.csv");
        fs::write(&output, "previous").unwrap();

        let err = IngestPipeline::new(&input, &output, PipelineOptions::default())
            .run()
            .unwrap_err();

        assert!(matches!(err, IngestError::MalformedRecord { row: 0, .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
        assert!(!temp_path_for(&output).exists());
    }
}
