//! Canonical Dataset Snapshot
//! Loads `dataset.csv` once into validated, immutable transfer records.

use crate::data::error::DatasetError;
use crate::data::loader::DataLoader;
use crate::data::record::*;
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Columns the dashboard needs from the canonical file.
const REQUIRED_COLUMNS: [&str; 14] = [
    CLUB_NAME,
    PLAYER_NAME,
    AGE,
    POSITION,
    CLUB_INVOLVED_NAME,
    FEE,
    TRANSFER_MOVEMENT,
    TRANSFER_PERIOD,
    FEE_CLEANED,
    LEAGUE_NAME,
    YEAR,
    SEASON,
    SEASON_START,
    SEASON_END,
];

/// Read-only view of every transfer in the canonical dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TransferRecord>,
    source: Option<PathBuf>,
}

fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();
    value
        .parse::<i32>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i32))
}

/// Year from either a bare year or an ISO `YYYY-01-01` date.
fn parse_year(value: &str) -> Option<i32> {
    parse_int(value).or_else(|| value.trim().get(0..4)?.parse().ok())
}

fn parse_fee(value: &str) -> Option<Option<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }
    let fee: f64 = value.parse().ok()?;
    Some((!fee.is_nan()).then_some(fee))
}

struct TextColumns {
    columns: HashMap<&'static str, Vec<Option<String>>>,
}

impl TextColumns {
    fn extract(df: &DataFrame) -> Result<Self, DatasetError> {
        let mut columns = HashMap::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let column = df
                .column(name)
                .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
            let text = column.cast(&DataType::String)?;
            let values: Vec<Option<String>> = text
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect();
            columns.insert(name, values);
        }
        Ok(Self { columns })
    }

    /// Take one cell. Missing values read as empty text.
    fn text(&mut self, name: &'static str, row: usize) -> String {
        self.columns
            .get_mut(name)
            .and_then(|values| values.get_mut(row))
            .and_then(Option::take)
            .unwrap_or_default()
    }

    fn int(&mut self, name: &'static str, row: usize) -> Result<i32, DatasetError> {
        let value = self.text(name, row);
        parse_int(&value).ok_or(DatasetError::InvalidValue {
            row,
            column: name,
            value,
        })
    }

    fn year(&mut self, name: &'static str, row: usize) -> Result<i32, DatasetError> {
        let value = self.text(name, row);
        parse_year(&value).ok_or(DatasetError::InvalidValue {
            row,
            column: name,
            value,
        })
    }

    fn fee(&mut self, row: usize) -> Result<Option<f64>, DatasetError> {
        let value = self.text(FEE_CLEANED, row);
        parse_fee(&value).ok_or(DatasetError::InvalidValue {
            row,
            column: FEE_CLEANED,
            value,
        })
    }
}

impl Dataset {
    /// Load and validate the canonical file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::CanonicalFileMissing(path.to_path_buf()));
        }

        let df = DataLoader::scan_text_csv(path)?.collect()?;
        let mut dataset = Self::from_frame(&df)?;
        dataset.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            "loaded canonical dataset"
        );
        Ok(dataset)
    }

    /// Build typed records from a text-typed frame.
    pub fn from_frame(df: &DataFrame) -> Result<Self, DatasetError> {
        let mut columns = TextColumns::extract(df)?;
        let mut records = Vec::with_capacity(df.height());

        for row in 0..df.height() {
            let age = columns.int(AGE, row)?;
            let year = columns.int(YEAR, row)?;
            let season_start = columns.year(SEASON_START, row)?;
            let season_end = columns.year(SEASON_END, row)?;
            let fee_cleaned = columns.fee(row)?;

            records.push(TransferRecord {
                club_name: columns.text(CLUB_NAME, row),
                player_name: columns.text(PLAYER_NAME, row),
                age,
                position: columns.text(POSITION, row),
                club_involved_name: columns.text(CLUB_INVOLVED_NAME, row),
                fee: columns.text(FEE, row),
                transfer_movement: TransferMovement::parse(&columns.text(TRANSFER_MOVEMENT, row)),
                transfer_period: columns.text(TRANSFER_PERIOD, row),
                fee_cleaned,
                league_name: columns.text(LEAGUE_NAME, row),
                year,
                season: columns.text(SEASON, row),
                season_start,
                season_end,
            });
        }

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<TransferRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn unique_text(&self, field: impl Fn(&TransferRecord) -> &str) -> Vec<String> {
        self.records
            .iter()
            .map(field)
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn clubs(&self) -> Vec<String> {
        self.unique_text(|r| r.club_name.as_str())
    }

    pub fn leagues(&self) -> Vec<String> {
        self.unique_text(|r| r.league_name.as_str())
    }

    pub fn positions(&self) -> Vec<String> {
        self.unique_text(|r| r.position.as_str())
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_parsing() {
        assert_eq!(parse_int("-1"), Some(-1));
        assert_eq!(parse_int("2020.0"), Some(2020));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_year("2020-01-01"), Some(2020));
        assert_eq!(parse_fee(""), Some(None));
        assert_eq!(parse_fee("12.5"), Some(Some(12.5)));
        assert_eq!(parse_fee("NaN"), Some(None));
        assert_eq!(parse_fee("lots"), None);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Dataset::load(Path::new("/no/such/dataset.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::CanonicalFileMissing(_)));
    }

    fn canonical_frame(fee_cleaned: Option<&str>) -> DataFrame {
        let columns: Vec<Column> = REQUIRED_COLUMNS
            .iter()
            .map(|&name| {
                let value = match name {
                    CLUB_NAME => Some("Ajax"),
                    PLAYER_NAME => None,
                    AGE => Some("19"),
                    TRANSFER_MOVEMENT => Some("Outbound"),
                    FEE_CLEANED => fee_cleaned,
                    YEAR | SEASON_START => Some("2020"),
                    SEASON => Some("2020/2021"),
                    SEASON_END => Some("2021-01-01"),
                    _ => Some("x"),
                };
                Column::new(name.into(), &[value])
            })
            .rev()
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn frame_columns_are_read_by_name() {
        let dataset = Dataset::from_frame(&canonical_frame(Some("3.5"))).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.club_name, "Ajax");
        assert_eq!(record.player_name, "");
        assert_eq!(record.age, 19);
        assert_eq!(record.transfer_movement, TransferMovement::Outbound);
        assert_eq!(record.fee_cleaned, Some(3.5));
        assert_eq!((record.season_start, record.season_end), (2020, 2021));
        assert_eq!(record.season, "2020/2021");
    }

    #[test]
    fn invalid_fee_names_row_and_column() {
        let err = Dataset::from_frame(&canonical_frame(Some("lots"))).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidValue { row: 0, column: FEE_CLEANED, ref value } if value == "lots"
        ));
    }
}
