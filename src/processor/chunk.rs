use std::borrow::Cow;

use tracing::debug;

use crate::processor::{
    classifier::classify,
    column_stats::ColumnStatistics,
    tokenizer::tokenize_into,
};

/// Statistics accumulated by one worker over its partition
#[derive(Debug, Clone, PartialEq)]
pub struct PartialResult {
    pub columns: Vec<ColumnStatistics>,
    pub rows_processed: u64,
    /// Diagnostic label, never consulted when merging
    pub worker_id: String,
}

impl PartialResult {
    /// Zero-valued result with `column_count` empty columns
    pub fn empty(column_count: usize, worker_id: impl Into<String>) -> Self {
        PartialResult {
            columns: vec![ColumnStatistics::new(); column_count],
            rows_processed: 0,
            worker_id: worker_id.into(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Merges `other` column by column and adds up row counts.
    pub fn merge(&mut self, other: &PartialResult) {
        debug_assert_eq!(
            self.columns.len(),
            other.columns.len(),
            "partials disagree on column count"
        );
        for (mine, theirs) in self.columns.iter_mut().zip(&other.columns) {
            mine.merge(theirs);
        }
        self.rows_processed += other.rows_processed;
    }
}

/// Profiles one partition of rows.
///
/// Every row contributes exactly one cell to each of the `column_count`
/// columns: missing trailing fields count as null and surplus fields are
/// ignored. The result does not depend on row order.
///
/// # Example
/// ```rust
/// # use columnar_profiler::processor::chunk::process_chunk;
/// let rows = ["1,x", ",2"];
/// let partial = process_chunk(&rows, 2, "worker-0");
/// assert_eq!(partial.rows_processed, 2);
/// assert_eq!(partial.columns[0].count, 1);
/// assert_eq!(partial.columns[0].null_count, 1);
/// ```
pub fn process_chunk<S: AsRef<str>>(
    rows: &[S],
    column_count: usize,
    worker_id: &str,
) -> PartialResult {
    let mut partial = PartialResult::empty(column_count, worker_id);
    let mut fields: Vec<Cow<'_, str>> = Vec::with_capacity(column_count);

    for row in rows {
        tokenize_into(row.as_ref(), &mut fields);
        for (col_idx, stats) in partial.columns.iter_mut().enumerate() {
            let field = fields.get(col_idx).map(|f| f.as_ref()).unwrap_or("");
            stats.record(classify(field));
        }
        partial.rows_processed += 1;
    }

    debug!(
        worker = worker_id,
        rows = partial.rows_processed,
        columns = column_count,
        "chunk processed"
    );

    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_column() {
        let rows = ["1,2,x", ",5,y", "3,,z"];
        let partial = process_chunk(&rows, 3, "worker-0");

        assert_eq!(partial.rows_processed, 3);
        assert_eq!(partial.worker_id, "worker-0");

        let a = &partial.columns[0];
        assert_eq!((a.count, a.null_count, a.non_numeric_count), (2, 1, 0));
        assert_eq!(a.sum(), 4.0);

        let c = &partial.columns[2];
        assert_eq!((c.count, c.null_count, c.non_numeric_count), (0, 0, 3));
    }

    #[test]
    fn test_short_rows_are_null_padded() {
        let rows = ["1", "2,3"];
        let partial = process_chunk(&rows, 3, "w");

        assert_eq!(partial.columns[1].null_count, 1);
        assert_eq!(partial.columns[1].count, 1);
        assert_eq!(partial.columns[2].null_count, 2);
        for col in &partial.columns {
            assert_eq!(col.observed(), 2);
        }
    }

    #[test]
    fn test_long_rows_drop_extra_fields() {
        let rows = ["1,2,3,4,5"];
        let partial = process_chunk(&rows, 2, "w");
        assert_eq!(partial.column_count(), 2);
        assert_eq!(partial.columns[1].sum(), 2.0);
    }

    #[test]
    fn test_blank_row_is_all_null() {
        let rows = [""];
        let partial = process_chunk(&rows, 2, "w");
        assert_eq!(partial.rows_processed, 1);
        assert!(partial.columns.iter().all(|c| c.null_count == 1));
    }

    #[test]
    fn test_quoted_number_with_comma_is_text() {
        let rows = [r#""1,000",5"#];
        let partial = process_chunk(&rows, 2, "w");
        assert_eq!(partial.columns[0].non_numeric_count, 1);
        assert_eq!(partial.columns[1].count, 1);
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let forward = ["4,a", "1,", "9,b", "x,2"];
        let mut backward = forward;
        backward.reverse();

        let f = process_chunk(&forward, 2, "f");
        let b = process_chunk(&backward, 2, "b");
        for (x, y) in f.columns.iter().zip(&b.columns) {
            assert_eq!(x.count, y.count);
            assert_eq!(x.null_count, y.null_count);
            assert_eq!(x.non_numeric_count, y.non_numeric_count);
            assert_eq!(x.min(), y.min());
            assert_eq!(x.max(), y.max());
            assert!((x.mean() - y.mean()).abs() < 1e-12);
            assert!((x.variance() - y.variance()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_chunk() {
        let rows: [&str; 0] = [];
        let partial = process_chunk(&rows, 4, "idle");
        assert_eq!(partial, PartialResult::empty(4, "idle"));
    }
}
