use std::env;
use std::path::PathBuf;

use columnar_profiler::{CsvSource, ProfileConfig, profile_source};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _profiler = dhat::Profiler::new_heap();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/data_10m.csv"));

    let source = CsvSource::open(&path)?;
    let lines = source.lines()?;
    let report = profile_source(&lines, &ProfileConfig::default())?;

    println!(
        "Profiled {} rows. See dhat-heap.json for details",
        report.rows_processed()
    );
    Ok(())
}
