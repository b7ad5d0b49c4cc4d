#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use co2_stats::{
    LoadOrder,
    collection::RecordList,
    loader::{self, LoadOptions},
};
use tempfile::{TempDir, tempdir};

pub const HEADER: &str = "country,year,electricity_and_heat_co2_emissions,electricity_and_heat_co2_emissions_per_capita,energy_co2_emissions,energy_co2_emissions_per_capita,total_co2_emissions_excluding_lucf,total_co2_emissions_excluding_lucf_per_capita";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Loads a fixture in the default (reversed) order.
pub fn load_fixture(name: &str) -> RecordList {
    load_fixture_in(name, LoadOrder::Reversed)
}

pub fn load_fixture_in(name: &str, order: LoadOrder) -> RecordList {
    let options = LoadOptions {
        order,
        ..LoadOptions::default()
    };
    loader::load_records(&fixture_path(name), &options).expect("load fixture")
}

pub fn years(rows: &RecordList) -> Vec<i64> {
    rows.iter().map(|r| r.year).collect()
}

pub fn names(rows: &RecordList) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a dataset file with the standard header followed by `rows`.
    pub fn write_dataset(&self, name: &str, rows: &[&str]) -> PathBuf {
        let mut contents = String::from(HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        self.write(name, &contents)
    }
}
