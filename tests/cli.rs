mod common;

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{TestWorkspace, fixture_path};

fn co2_stats() -> Command {
    Command::cargo_bin("co2-stats").expect("binary exists")
}

#[test]
fn count_without_filters_reports_all_rows() {
    let input = fixture_path("sample_file.csv");
    co2_stats()
        .args(["count", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn count_applies_every_filter() {
    let input = fixture_path("world_sample.csv");
    co2_stats()
        .args([
            "count",
            "-i",
            input.to_str().unwrap(),
            "--filter",
            "year = 2020",
            "--filter",
            "total_co2_emissions_excluding_lucf_per_capita > 13",
        ])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn count_rejects_invalid_predicates() {
    let input = fixture_path("sample_file.csv");
    co2_stats()
        .args([
            "count",
            "-i",
            input.to_str().unwrap(),
            "--filter",
            "country < 'X'",
        ])
        .assert()
        .failure()
        .stderr(contains("name only supports the equal comparator"));

    co2_stats()
        .args([
            "count",
            "-i",
            input.to_str().unwrap(),
            "--filter",
            "year = '1990'",
        ])
        .assert()
        .failure()
        .stderr(contains("year expects an integer value"));
}

#[test]
fn filter_writes_csv_that_loads_back() {
    let workspace = TestWorkspace::new();
    let output = workspace.path().join("mexico.csv");
    let input = fixture_path("world_sample.csv");
    co2_stats()
        .args([
            "filter",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--filter",
            "country = Mexico",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&output).expect("read output");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("country,year,electricity_and_heat_co2_emissions,"));
    assert!(lines[1].starts_with("Mexico,2020,"));
    assert_eq!(lines[2], "Mexico,2014,,,440.9,3.6,466.4,3.8");

    co2_stats()
        .args(["count", "-i", output.to_str().unwrap(), "--order", "file"])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn filter_with_no_matches_still_writes_header() {
    let input = fixture_path("world_sample.csv");
    co2_stats()
        .args([
            "filter",
            "-i",
            input.to_str().unwrap(),
            "--filter",
            "country = Atlantis",
        ])
        .assert()
        .success()
        .stdout(contains("country,year"))
        .stdout(contains("Atlantis").not());
}

#[test]
fn filter_renders_table_with_limit() {
    let input = fixture_path("sample_file.csv");
    let assert = co2_stats()
        .args([
            "filter",
            "-i",
            input.to_str().unwrap(),
            "--filter",
            "electricity_and_heat_co2_emissions_per_capita greater_than 1.8",
            "--table",
            "--limit",
            "2",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("Lithuania  1998"));
    assert!(lines[3].starts_with("Lithuania  1996"));
}

#[test]
fn filter_table_refuses_output_file() {
    let workspace = TestWorkspace::new();
    let output = workspace.path().join("out.csv");
    let input = fixture_path("sample_file.csv");
    co2_stats()
        .args([
            "filter",
            "-i",
            input.to_str().unwrap(),
            "--filter",
            "year = 1999",
            "--table",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
    assert!(!output.exists());
}

#[test]
fn answer_prints_all_questions() {
    let input = fixture_path("world_sample.csv");
    co2_stats()
        .args(["answer", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("How many countries are in the dataset?"))
        .stdout(contains("Mexico 2020, Mexico 2014, Mexico 2000, Mexico 1990"))
        .stdout(contains("Qatar, Luxembourg"))
        .stdout(contains("Australia, Qatar"))
        .stdout(contains("0.5500"));
}

#[test]
fn answer_emits_json_for_a_single_query() {
    let input = fixture_path("world_sample.csv");
    let assert = co2_stats()
        .args(["answer", "-i", input.to_str().unwrap(), "--query", "6", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    let answers = parsed.as_array().expect("array");
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["query"], 6);
    assert_eq!(answers[0]["answer"], 9.0);
}

#[test]
fn answer_json_lists_matched_rows() {
    let input = fixture_path("world_sample.csv");
    let assert = co2_stats()
        .args(["answer", "-i", input.to_str().unwrap(), "--query", "2", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    let rows = parsed[0]["answer"].as_array().expect("row list");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["country"], "Mexico");
    assert_eq!(rows[0]["year"], 2020);
    assert_eq!(rows[3]["year"], 1990);
}

#[test]
fn answer_reports_no_result_as_null() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("tiny.csv", &["Chad,2000,1,1,1,1,1,1"]);
    let assert = co2_stats()
        .args(["answer", "-i", input.to_str().unwrap(), "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed[0]["answer"], 1);
    assert!(parsed[1]["answer"].is_null());
    assert!(parsed[6]["answer"].is_null());
}

#[test]
fn answer_rejects_unknown_query_number() {
    let input = fixture_path("world_sample.csv");
    co2_stats()
        .args(["answer", "-i", input.to_str().unwrap(), "--query", "8"])
        .assert()
        .failure();
}

#[test]
fn stdin_input_is_supported() {
    let contents = fs::read_to_string(fixture_path("sample_file.csv")).expect("read fixture");
    co2_stats()
        .args(["count", "-i", "-", "--filter", "year > 2000"])
        .write_stdin(contents)
        .assert()
        .success()
        .stdout("3\n");
}
