use rand::Rng;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Writes a synthetic CSV with a mix of numbers, nulls, text and quoted
/// fields for benchmarking.
fn main() -> std::io::Result<()> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data/data_10m.csv".to_string());
    let rows: usize = args
        .next()
        .and_then(|r| r.parse().ok())
        .unwrap_or(10_000_000);

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "id,value,price,category,comment")?;

    let mut rng = rand::rng();
    for i in 0..rows {
        let value: u32 = rng.random_range(1..1000);
        let price: f64 = rng.random_range(0.0..500.0);
        let category = ["A", "B", "C", "D"][rng.random_range(0..4)];

        let value_cell = messy_cell(rng.random_range(0..100), value.to_string());
        let price_cell = messy_cell(rng.random_range(0..100), format!("{price:.2}"));
        let comment = if rng.random_bool(0.1) {
            "\"said \"\"ok\"\", then left\""
        } else {
            ""
        };

        writeln!(writer, "{i},{value_cell},{price_cell},{category},{comment}")?;
    }
    writer.flush()?;

    println!("Sample CSV generated: {} ({} rows)", path, rows);
    Ok(())
}

/// ~5% nulls, ~2% junk, the rest `clean`; `roll` is uniform in `0..100`
fn messy_cell(roll: u32, clean: String) -> String {
    match roll {
        0..5 => String::new(),
        5..7 => "n/a".to_string(),
        _ => clean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use columnar_profiler::{Cell, classify};

    #[test]
    fn test_messy_cell_mix() {
        let cells: Vec<Cell> = (0..100)
            .map(|roll| classify(&messy_cell(roll, "42".to_string())))
            .collect();

        assert_eq!(cells.iter().filter(|c| **c == Cell::Null).count(), 5);
        assert_eq!(cells.iter().filter(|c| **c == Cell::Text).count(), 2);
        assert_eq!(
            cells.iter().filter(|c| **c == Cell::Numeric(42.0)).count(),
            93
        );
    }
}
