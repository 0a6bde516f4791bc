use tracing::debug;

use crate::processor::chunk::PartialResult;

/// Worker label carried by merged results
pub const REDUCED_ID: &str = "reduced";

/// Merges partial results into one.
///
/// Inputs are left untouched. An empty slice yields a zero-valued result
/// with no columns; use [`reduce_with_columns`] when the column count is
/// known up front.
pub fn reduce(partials: &[PartialResult]) -> PartialResult {
    let column_count = partials.first().map_or(0, PartialResult::column_count);
    reduce_with_columns(partials, column_count)
}

/// Merges partial results into a result of `column_count` columns.
///
/// The fold starts from an empty accumulator, so which partial comes first
/// only affects floating-point rounding.
pub fn reduce_with_columns(partials: &[PartialResult], column_count: usize) -> PartialResult {
    let merged = partials.iter().fold(
        PartialResult::empty(column_count, REDUCED_ID),
        |mut acc, partial| {
            acc.merge(partial);
            acc
        },
    );

    debug!(
        partials = partials.len(),
        rows = merged.rows_processed,
        "partials reduced"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::chunk::process_chunk;

    #[test]
    fn test_empty_input() {
        let merged = reduce(&[]);
        assert_eq!(merged.rows_processed, 0);
        assert!(merged.columns.is_empty());

        let merged = reduce_with_columns(&[], 3);
        assert_eq!(merged.rows_processed, 0);
        assert_eq!(merged.column_count(), 3);
        assert!(merged.columns.iter().all(|c| c.count == 0 && c.observed() == 0));
    }

    #[test]
    fn test_sums_rows_and_counts() {
        let a = process_chunk(&["1,x", "2,y"], 2, "worker-0");
        let b = process_chunk(&[",z"], 2, "worker-1");

        let merged = reduce(&[a.clone(), b.clone()]);
        assert_eq!(merged.rows_processed, 3);
        assert_eq!(merged.worker_id, REDUCED_ID);
        assert_eq!(merged.columns[0].count, 2);
        assert_eq!(merged.columns[0].null_count, 1);
        assert_eq!(merged.columns[1].non_numeric_count, 3);

        // inputs untouched
        assert_eq!(a.rows_processed, 2);
        assert_eq!(b.rows_processed, 1);
    }

    #[test]
    fn test_fold_order_is_irrelevant() {
        let a = process_chunk(&["1.5", "2.5", "-4"], 1, "a");
        let b = process_chunk(&["10", ""], 1, "b");
        let c = process_chunk(&["7", "q", "0.25"], 1, "c");

        let abc = reduce(&[a.clone(), b.clone(), c.clone()]);
        let cba = reduce(&[c, b, a]);

        let (x, y) = (&abc.columns[0], &cba.columns[0]);
        assert_eq!(abc.rows_processed, cba.rows_processed);
        assert_eq!(x.count, y.count);
        assert_eq!(x.min(), y.min());
        assert_eq!(x.max(), y.max());
        assert!((x.sum() - y.sum()).abs() < 1e-12);
        assert!((x.mean() - y.mean()).abs() < 1e-12);
        assert!((x.stddev() - y.stddev()).abs() < 1e-9);
    }
}
