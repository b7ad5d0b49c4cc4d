fn main() {
    if let Err(err) = co2_stats::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
