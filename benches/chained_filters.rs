use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use co2_stats::{
    Comparator, Field,
    collection::RecordList,
    filter,
    loader::{self, LoadOptions},
    queries,
};
use criterion::{Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

const COUNTRIES: [&str; 8] = [
    "Australia",
    "China",
    "Lithuania",
    "Luxembourg",
    "Mexico",
    "Qatar",
    "United States",
    "Zambia",
];

fn generate_dataset(countries: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("co2.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(
        file,
        "country,year,electricity_and_heat_co2_emissions,electricity_and_heat_co2_emissions_per_capita,energy_co2_emissions,energy_co2_emissions_per_capita,total_co2_emissions_excluding_lucf,total_co2_emissions_excluding_lucf_per_capita"
    )
    .expect("header");
    for i in 0..countries {
        let name = match COUNTRIES.get(i) {
            Some(name) => name.to_string(),
            None => format!("Country {i}"),
        };
        for year in 1990..=2020 {
            let scale = (i % 17 + 1) as f64 * (1.0 + (year - 1990) as f64 / 30.0);
            let per_capita = if i % 11 == 0 && year % 7 == 0 {
                String::new()
            } else {
                format!("{:.3}", scale / 4.0)
            };
            writeln!(
                file,
                "{name},{year},{:.2},{per_capita},{:.2},{per_capita},{:.2},{per_capita}",
                scale * 10.0,
                scale * 20.0,
                scale * 25.0,
            )
            .expect("row");
        }
    }
    (temp_dir, csv_path)
}

fn bench_chained_filters(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_dataset(200);
    let rows: RecordList =
        loader::load_records(&csv_path, &LoadOptions::default()).expect("load dataset");

    let mut group = c.benchmark_group("filters");

    group.bench_function("year_then_per_capita", |b| {
        b.iter(|| {
            let year = filter(&rows, Field::Year, Comparator::Equal, 2020).expect("year");
            filter(
                &year,
                Field::TotalExcludingLucfPerCapita,
                Comparator::GreaterThan,
                2.5,
            )
            .expect("per capita")
        });
    });

    group.bench_function("projection_query", |b| {
        b.iter(|| queries::china_electricity_projection(&rows).expect("projection"));
    });

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_chained_filters);
criterion_main!(benches);
