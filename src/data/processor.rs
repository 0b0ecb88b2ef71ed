//! Data Processor Module
//! Normalization rules applied to the merged raw table.

use crate::config::IngestConfig;
use crate::data::error::IngestError;
use crate::data::record::{
    AGE, AGE_SENTINEL, FEE, LEAGUE_NAME, RAW_COLUMNS, SEASON, SEASON_END, SEASON_START,
    TRANSFER_MOVEMENT,
};
use chrono::NaiveDate;
use polars::prelude::*;

pub const LOAN_TRANSFER: &str = "loan transfer";
pub const FREE_TRANSFER: &str = "free transfer";
pub const INBOUND: &str = "Inbound";
pub const OUTBOUND: &str = "Outbound";

const LEAGUE_ALIASES: [(&str, &str); 1] = [("1 Bundesliga", "Bundesliga")];

/// Switches selecting between the cleaning variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Drop rows whose age is <= 0 or >= 100.
    pub drop_invalid_age: bool,
    /// Write season_start/season_end as `YYYY-01-01` dates.
    pub coerce_season_to_date: bool,
}

impl From<&IngestConfig> for PipelineOptions {
    fn from(config: &IngestConfig) -> Self {
        Self {
            drop_invalid_age: config.drop_invalid_age,
            coerce_season_to_date: config.coerce_season_to_date,
        }
    }
}

/// Start and end year sliced from a `YYYY/YYYY` season.
///
/// Purely positional: characters 0..4 and 5..9 must parse as integers, the
/// separator itself is not checked.
pub fn season_years(season: &str) -> Option<(i32, i32)> {
    let start = season.get(0..4)?.parse().ok()?;
    let end = season.get(5..9)?.parse().ok()?;
    Some((start, end))
}

pub fn parse_age(raw: Option<&str>) -> Option<f64> {
    let age: f64 = raw?.trim().parse().ok()?;
    age.is_finite().then_some(age)
}

pub fn is_invalid_age(age: f64) -> bool {
    age <= 0.0 || age >= 100.0
}

/// Truncate to an integer; missing and negative ages become the sentinel.
pub fn normalize_age(age: Option<f64>) -> i32 {
    match age {
        Some(age) if age >= 0.0 => age.trunc() as i32,
        _ => AGE_SENTINEL,
    }
}

pub fn canonical_league(name: &str) -> String {
    LEAGUE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Collapse fee text. Rules run in order against the running value, so a
/// "loan" match is final ("loan transfer" holds no "free").
pub fn canonical_fee(raw: Option<&str>) -> String {
    let mut fee = raw.unwrap_or_default().to_string();
    if contains_ignore_case(&fee, "loan") {
        fee = LOAN_TRANSFER.to_string();
    }
    if contains_ignore_case(&fee, "free") {
        fee = FREE_TRANSFER.to_string();
    }
    fee
}

/// Collapse movement text. "out" is checked first and "Outbound" holds no
/// "in", so text containing both resolves to Outbound.
pub fn canonical_movement(raw: &str) -> String {
    let mut movement = raw.to_string();
    if contains_ignore_case(&movement, "out") {
        movement = OUTBOUND.to_string();
    }
    if contains_ignore_case(&movement, "in") {
        movement = INBOUND.to_string();
    }
    movement
}

/// Applies the cleaning rules column by column.
pub struct TransferProcessor;

impl TransferProcessor {
    /// Read a column as owned text values.
    fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, IngestError> {
        let column = df
            .column(name)
            .map_err(|_| IngestError::MissingColumn(name.to_string()))?;
        let text = column.cast(&DataType::String)?;
        let values = text
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }

    fn season_column(name: &str, years: &[i32], as_date: bool) -> Column {
        if !as_date {
            return Column::new(name.into(), years);
        }

        let dates: Vec<Option<String>> = years
            .iter()
            .map(|&year| {
                NaiveDate::from_ymd_opt(year, 1, 1).map(|date| date.format("%Y-%m-%d").to_string())
            })
            .collect();
        Column::new(name.into(), dates)
    }

    /// Fail when the merged table lacks any of the raw input columns.
    pub fn require_raw_columns(df: &DataFrame) -> Result<(), IngestError> {
        let present = df.get_column_names();
        match RAW_COLUMNS
            .iter()
            .find(|name| !present.iter().any(|c| c.as_str() == **name))
        {
            Some(missing) => Err(IngestError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Normalize the merged table.
    ///
    /// Derives season_start/season_end (appended as the last columns),
    /// optionally drops out-of-range ages, then rewrites age, league_name,
    /// fee and transfer_movement in place. Other columns pass through.
    pub fn normalize(mut df: DataFrame, options: &PipelineOptions) -> Result<DataFrame, IngestError> {
        let seasons = Self::text_values(&df, SEASON)?;
        let mut starts: Vec<i32> = Vec::with_capacity(seasons.len());
        let mut ends: Vec<i32> = Vec::with_capacity(seasons.len());
        for (row, season) in seasons.iter().enumerate() {
            let season = season.as_deref().unwrap_or_default();
            let (start, end) = season_years(season).ok_or_else(|| IngestError::MalformedRecord {
                row,
                value: season.to_string(),
            })?;
            starts.push(start);
            ends.push(end);
        }
        let season_start = Self::season_column(SEASON_START, &starts, options.coerce_season_to_date);
        let season_end = Self::season_column(SEASON_END, &ends, options.coerce_season_to_date);

        let raw_ages = Self::text_values(&df, AGE)?;
        let ages: Vec<Option<f64>> = raw_ages.iter().map(|v| parse_age(v.as_deref())).collect();
        let unreadable = raw_ages
            .iter()
            .zip(&ages)
            .filter(|(raw, age)| {
                age.is_none() && raw.as_deref().is_some_and(|r| !r.trim().is_empty())
            })
            .count();
        if unreadable > 0 {
            tracing::warn!(rows = unreadable, "unreadable ages replaced by sentinel");
        }
        let keep: Vec<bool> = ages
            .iter()
            .map(|age| !(options.drop_invalid_age && age.is_some_and(is_invalid_age)))
            .collect();
        let age_values: Vec<i32> = ages.iter().map(|&age| normalize_age(age)).collect();

        let leagues: Vec<Option<String>> = Self::text_values(&df, LEAGUE_NAME)?
            .into_iter()
            .map(|v| v.map(|name| canonical_league(&name)))
            .collect();

        let fees: Vec<String> = Self::text_values(&df, FEE)?
            .iter()
            .map(|v| canonical_fee(v.as_deref()))
            .collect();

        let movements: Vec<Option<String>> = Self::text_values(&df, TRANSFER_MOVEMENT)?
            .into_iter()
            .map(|v| v.map(|m| canonical_movement(&m)))
            .collect();

        df.with_column(Column::new(AGE.into(), age_values))?;
        df.with_column(Column::new(LEAGUE_NAME.into(), leagues))?;
        df.with_column(Column::new(FEE.into(), fees))?;
        df.with_column(Column::new(TRANSFER_MOVEMENT.into(), movements))?;
        df.with_column(season_start)?;
        df.with_column(season_end)?;

        if options.drop_invalid_age {
            let before = df.height();
            let mask = BooleanChunked::from_slice("keep".into(), &keep);
            df = df.filter(&mask)?;
            tracing::info!(dropped = before - df.height(), "dropped rows with invalid age");
        }

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, values: &[Option<&str>]) -> Column {
        Column::new(name.into(), values)
    }

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            text_column("player_name", &[Some("Ann"), Some("Ben"), Some("Cid"), Some("Dan")]),
            text_column(AGE, &[None, Some("23"), Some("0"), Some("104")]),
            text_column(
                FEE,
                &[Some("Loan (6 months)"), Some("free transfer"), None, Some("€12.5m")],
            ),
            text_column(
                TRANSFER_MOVEMENT,
                &[Some("transfer out"), Some("in"), Some("in"), Some("out")],
            ),
            text_column(
                LEAGUE_NAME,
                &[Some("1 Bundesliga"), Some("Serie A"), Some("Bundesliga"), Some("Ligue 1")],
            ),
            text_column(
                SEASON,
                &[Some("2020/2021"), Some("1999/2000"), Some("2005/2006"), Some("2010/2011")],
            ),
        ])
        .unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        TransferProcessor::text_values(df, name).unwrap()
    }

    fn ints(df: &DataFrame, name: &str) -> Vec<i32> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    #[test]
    fn season_years_slices_positions() {
        assert_eq!(season_years("2020/2021"), Some((2020, 2021)));
        assert_eq!(season_years("2020-2021"), Some((2020, 2021)));
        assert_eq!(season_years("20/21"), None);
        assert_eq!(season_years(""), None);
    }

    #[test]
    fn fee_rules() {
        assert_eq!(canonical_fee(Some("Loan (6 months)")), LOAN_TRANSFER);
        assert_eq!(canonical_fee(Some("FREE TRANSFER")), FREE_TRANSFER);
        assert_eq!(canonical_fee(Some("loan fee: free")), LOAN_TRANSFER);
        assert_eq!(canonical_fee(Some("€1.2m")), "€1.2m");
        assert_eq!(canonical_fee(Some("?")), "?");
        assert_eq!(canonical_fee(None), "");
    }

    #[test]
    fn movement_rules_check_out_first() {
        assert_eq!(canonical_movement("transfer out"), OUTBOUND);
        assert_eq!(canonical_movement("IN"), INBOUND);
        assert_eq!(canonical_movement("out then in"), OUTBOUND);
        assert_eq!(canonical_movement("Inbound"), INBOUND);
        assert_eq!(canonical_movement("Outbound"), OUTBOUND);
        assert_eq!(canonical_movement("swap"), "swap");
    }

    #[test]
    fn age_rules() {
        assert_eq!(normalize_age(parse_age(Some(" 27 "))), 27);
        assert_eq!(normalize_age(parse_age(Some("27.9"))), 27);
        assert_eq!(normalize_age(parse_age(Some(""))), AGE_SENTINEL);
        assert_eq!(normalize_age(parse_age(Some("n/a"))), AGE_SENTINEL);
        assert_eq!(normalize_age(parse_age(None)), AGE_SENTINEL);
        assert_eq!(normalize_age(Some(-4.0)), AGE_SENTINEL);
        assert!(is_invalid_age(0.0));
        assert!(is_invalid_age(-3.0));
        assert!(is_invalid_age(100.0));
        assert!(!is_invalid_age(1.0));
        assert!(!is_invalid_age(99.0));
        assert!(!is_invalid_age(99.9));
    }

    #[test]
    fn league_alias_is_exact() {
        assert_eq!(canonical_league("1 Bundesliga"), "Bundesliga");
        assert_eq!(canonical_league("1 bundesliga"), "1 bundesliga");
        assert_eq!(canonical_league("2 Bundesliga"), "2 Bundesliga");
    }

    #[test]
    fn normalize_rewrites_columns_in_place() {
        let out = TransferProcessor::normalize(sample_frame(), &PipelineOptions::default()).unwrap();

        assert_eq!(out.height(), 4);
        let names: Vec<String> = out.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "player_name",
                AGE,
                FEE,
                TRANSFER_MOVEMENT,
                LEAGUE_NAME,
                SEASON,
                SEASON_START,
                SEASON_END
            ]
        );

        assert_eq!(ints(&out, AGE), vec![-1, 23, 0, 104]);
        assert_eq!(ints(&out, SEASON_START), vec![2020, 1999, 2005, 2010]);
        assert_eq!(ints(&out, SEASON_END), vec![2021, 2000, 2006, 2011]);
        assert_eq!(
            strings(&out, FEE),
            vec![
                Some(LOAN_TRANSFER.to_string()),
                Some(FREE_TRANSFER.to_string()),
                Some(String::new()),
                Some("€12.5m".to_string()),
            ]
        );
        assert_eq!(
            strings(&out, TRANSFER_MOVEMENT),
            vec![
                Some(OUTBOUND.to_string()),
                Some(INBOUND.to_string()),
                Some(INBOUND.to_string()),
                Some(OUTBOUND.to_string()),
            ]
        );
        assert!(strings(&out, LEAGUE_NAME)
            .iter()
            .all(|l| l.as_deref() != Some("1 Bundesliga")));
    }

    #[test]
    fn drop_invalid_age_keeps_missing_ages() {
        let options = PipelineOptions {
            drop_invalid_age: true,
            ..Default::default()
        };
        let out = TransferProcessor::normalize(sample_frame(), &options).unwrap();

        assert_eq!(out.height(), 2);
        assert_eq!(ints(&out, AGE), vec![-1, 23]);
        assert_eq!(
            strings(&out, "player_name"),
            vec![Some("Ann".to_string()), Some("Ben".to_string())]
        );
    }

    #[test]
    fn seasons_can_be_written_as_dates() {
        let options = PipelineOptions {
            coerce_season_to_date: true,
            ..Default::default()
        };
        let out = TransferProcessor::normalize(sample_frame(), &options).unwrap();
        assert_eq!(strings(&out, SEASON_START)[0].as_deref(), Some("2020-01-01"));
        assert_eq!(strings(&out, SEASON_END)[1].as_deref(), Some("2000-01-01"));
    }

    #[test]
    fn malformed_season_fails_with_row() {
        let mut df = sample_frame();
        df.with_column(text_column(
            SEASON,
            &[Some("2020/2021"), Some("20/21"), Some("2005/2006"), Some("2010/2011")],
        ))
        .unwrap();

        let err = TransferProcessor::normalize(df, &PipelineOptions::default()).unwrap_err();
        match err {
            IngestError::MalformedRecord { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "20/21");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let df = sample_frame().drop(FEE).unwrap();
        let err = TransferProcessor::normalize(df, &PipelineOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(name) if name == FEE));
    }

    #[test]
    fn raw_column_check_names_first_missing_column() {
        let mut columns: Vec<Column> = RAW_COLUMNS
            .iter()
            .map(|name| text_column(name, &[Some("x")]))
            .collect();
        let df = DataFrame::new(columns.clone()).unwrap();
        assert!(TransferProcessor::require_raw_columns(&df).is_ok());

        columns.remove(0);
        let df = DataFrame::new(columns).unwrap();
        let err = TransferProcessor::require_raw_columns(&df).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(name) if name == "club_name"));
    }
}
