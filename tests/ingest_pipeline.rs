use std::fs;
use std::path::Path;
use tempfile::TempDir;
use transfer_history::data::{
    Dataset, IngestError, IngestPipeline, PipelineOptions, TransferMovement,
};

const HEADER: &str = "club_name,player_name,age,position,club_involved_name,fee,transfer_movement,transfer_period,fee_cleaned,league_name,year,season";

fn write_raw(dir: &Path, name: &str, rows: &[&str]) {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(dir.join(name), content).unwrap();
}

fn raw_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_raw(
        dir.path(),
        "1-bundesliga.csv",
        &[
            "FC Bayern Munich,Jan Novak,,Centre-Back,Hertha BSC,Loan (6 months),transfer out,Summer,,1 Bundesliga,2020,2020/2021",
            "FC Bayern Munich,Leon Kaiser,24,Central Midfield,Ajax,€25.00m,in,Summer,25.0,1 Bundesliga,2020,2020/2021",
            "Borussia Dortmund,Old Timer,120,Goalkeeper,Retired,free transfer,out,Winter,0.0,1 Bundesliga,2019,2019/2020",
        ],
    );
    write_raw(
        dir.path(),
        "serie-a.csv",
        &[
            "Inter,Marco Rossi,0,Left Winger,Roma,€3.50m,in,Summer,3.5,Serie A,2019,2019/2020",
            "Inter,Luca Bianchi,29,Centre-Forward,Lazio,End of loan,in,Summer,0.0,Serie A,2020,2020/2021",
            "Roma,Pietro Giovane,1,Goalkeeper,Youth,-,in,Summer,,Serie A,2021,2021/2022",
            "Roma,Aldo Vecchio,99,Goalkeeper,Retired,free transfer,out,Summer,0.0,Serie A,2021,2021/2022",
        ],
    );
    dir
}

fn run(input: &Path, output: &Path, options: PipelineOptions) -> Result<usize, IngestError> {
    IngestPipeline::new(input, output, options)
        .run()
        .map(|report| report.output_rows)
}

#[test]
fn scenario_row_is_normalized() {
    let input = raw_dir();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    run(input.path(), &output, PipelineOptions::default()).unwrap();

    let dataset = Dataset::load(&output).unwrap();
    let row = dataset
        .records()
        .iter()
        .find(|r| r.player_name == "Jan Novak")
        .unwrap();
    assert_eq!(row.season_start, 2020);
    assert_eq!(row.season_end, 2021);
    assert_eq!(row.age, -1);
    assert_eq!(row.fee, "loan transfer");
    assert_eq!(row.transfer_movement, TransferMovement::Outbound);
    assert_eq!(row.league_name, "Bundesliga");
    assert_eq!(row.fee_cleaned, None);

    assert!(dataset
        .records()
        .iter()
        .all(|r| r.season_start < r.season_end));
}

#[test]
fn row_counts_with_and_without_age_filter() {
    let input = raw_dir();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    let all = run(input.path(), &output, PipelineOptions::default()).unwrap();
    assert_eq!(all, 7);

    let report = IngestPipeline::new(
        input.path(),
        &output,
        PipelineOptions {
            drop_invalid_age: true,
            ..Default::default()
        },
    )
    .run()
    .unwrap();
    // Ages 120 and 0 are dropped; the missing age is kept as -1.
    assert_eq!(report.input_rows, 7);
    assert_eq!(report.output_rows, 5);
    assert_eq!(report.dropped_rows, 2);

    let dataset = Dataset::load(&output).unwrap();
    assert!(dataset.records().iter().any(|r| r.age == -1));
    assert!(dataset.records().iter().all(|r| r.age < 100 && r.age != 0));
    let mut kept_ages: Vec<i32> = dataset.records().iter().map(|r| r.age).collect();
    kept_ages.sort();
    assert_eq!(kept_ages, vec![-1, 1, 24, 29, 99]);
}

#[test]
fn rerun_is_byte_identical() {
    let input = raw_dir();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    run(input.path(), &output, PipelineOptions::default()).unwrap();
    let first = fs::read(&output).unwrap();
    run(input.path(), &output, PipelineOptions::default()).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn empty_input_dir_is_an_error() {
    let input = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    let err = run(input.path(), &output, PipelineOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::NoInputFiles(_)));
    assert!(!output.exists());
}

#[test]
fn header_is_column_union_plus_season_bounds() {
    let input = raw_dir();
    fs::write(
        input.path().join("ligue-1.csv"),
        format!(
            "{HEADER},market_value\nPSG,Hugo Martin,22,Right-Back,Lyon,€8.00m,in,Summer,8.0,Ligue 1,2021,2021/2022,12.0\n"
        ),
    )
    .unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    run(input.path(), &output, PipelineOptions::default()).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(
        header,
        format!("{HEADER},market_value,season_start,season_end")
    );
    assert_eq!(content.lines().count(), 9);
}

#[test]
fn season_bounds_as_dates() {
    let input = raw_dir();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    run(
        input.path(),
        &output,
        PipelineOptions {
            coerce_season_to_date: true,
            ..Default::default()
        },
    )
    .unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("2020-01-01,2021-01-01"));

    let dataset = Dataset::load(&output).unwrap();
    assert!(dataset.records().iter().any(|r| r.season_start == 2019));
}

#[test]
fn raw_files_without_club_name_are_rejected() {
    let input = tempfile::tempdir().unwrap();
    let header = HEADER.replace("club_name,", "");
    fs::write(
        input.path().join("eredivisie.csv"),
        format!("{header}\nDaan de Vries,22,Left-Back,PSV,€2.00m,in,Summer,2.0,Eredivisie,2020,2020/2021\n"),
    )
    .unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("dataset.csv");

    let err = run(input.path(), &output, PipelineOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "club_name"));
    assert!(!output.exists());
}
