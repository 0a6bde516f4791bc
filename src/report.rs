use std::fmt;

use crate::processor::chunk::PartialResult;

/// Final per-column profile with the header names it was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    pub headers: Vec<String>,
    pub result: PartialResult,
}

impl ProfileReport {
    pub fn new(headers: Vec<String>, result: PartialResult) -> Self {
        ProfileReport { headers, result }
    }

    pub fn rows_processed(&self) -> u64 {
        self.result.rows_processed
    }
}

/// Renders the console summary. Floats use six decimals, and the numeric
/// line is omitted for columns without numeric cells.
impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Aggregated rows: {}", self.result.rows_processed)?;
        writeln!(f, "Column summaries:")?;

        for (idx, (name, stats)) in self.headers.iter().zip(&self.result.columns).enumerate() {
            writeln!(f, "  [{idx}] {name} :")?;
            writeln!(
                f,
                "     numeric_count={}, nulls={}, non_numeric={}",
                stats.count, stats.null_count, stats.non_numeric_count
            )?;
            if stats.has_numeric() {
                writeln!(
                    f,
                    "     sum={:.6}, min={:.6}, max={:.6}, mean={:.6}, std={:.6}",
                    stats.sum(),
                    stats.min_raw(),
                    stats.max_raw(),
                    stats.mean(),
                    stats.stddev()
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::chunk::process_chunk;

    #[test]
    fn test_render() {
        let rows = ["1,2,x", ",5,y", "3,,z"];
        let report = ProfileReport::new(
            vec!["a".into(), "b".into(), "c".into()],
            process_chunk(&rows, 3, "w"),
        );

        let expected = "\
Aggregated rows: 3
Column summaries:
  [0] a :
     numeric_count=2, nulls=1, non_numeric=0
     sum=4.000000, min=1.000000, max=3.000000, mean=2.000000, std=1.414214
  [1] b :
     numeric_count=2, nulls=1, non_numeric=0
     sum=7.000000, min=2.000000, max=5.000000, mean=3.500000, std=2.121320
  [2] c :
     numeric_count=0, nulls=0, non_numeric=3
";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_all_null_column_has_no_numeric_line() {
        let rows = [",1", ",2"];
        let report = ProfileReport::new(
            vec!["empty".into(), "n".into()],
            process_chunk(&rows, 2, "w"),
        );
        let text = report.to_string();
        assert!(text.contains("  [0] empty :\n     numeric_count=0, nulls=2, non_numeric=0\n  [1] n :"));
        assert_eq!(text.matches("sum=").count(), 1);
    }
}
