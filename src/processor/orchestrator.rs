use rayon::{
    ThreadPoolBuilder,
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
};
use tracing::info;

use crate::{
    config::ProfileConfig,
    processor::{
        ProcessorError,
        chunk::{PartialResult, process_chunk},
        reducer::reduce_with_columns,
        tokenizer::tokenize,
    },
    report::ProfileReport,
    source::SourceLines,
};

/// Deals rows out round-robin: row `i` goes to partition `i % workers`.
///
/// Always returns `max(workers, 1)` partitions, some possibly empty. Each
/// partition keeps the relative order of its rows. Empty partitions do not
/// allocate.
pub fn partition_rows<S>(rows: &[S], workers: usize) -> Vec<Vec<&S>> {
    let workers = workers.max(1);
    let (base, extra) = (rows.len() / workers, rows.len() % workers);
    let mut partitions: Vec<Vec<&S>> = (0..workers)
        .map(|idx| Vec::with_capacity(base + usize::from(idx < extra)))
        .collect();

    for (i, row) in rows.iter().enumerate() {
        partitions[i % workers].push(row);
    }

    partitions
}

/// Profiles `rows` with `workers` parallel workers and reduces the result.
///
/// Each partition runs on its own task of a dedicated rayon pool and hands
/// back its [`PartialResult`] through the collected vector, so nothing is
/// shared while rows are processed. A panicking worker aborts the whole run.
///
/// At most one partition per row is dispatched: the surplus partitions of a
/// larger `workers` would be empty and contribute nothing to the merge.
///
/// # Errors
/// Returns [`ProcessorError::ThreadPool`] if the pool cannot be built.
///
/// # Example
/// ```rust
/// # use columnar_profiler::processor::orchestrator::profile_rows;
/// let rows = ["1,2,x", ",5,y", "3,,z"];
/// let result = profile_rows(&rows, 3, 2).unwrap();
/// assert_eq!(result.rows_processed, 3);
/// assert_eq!(result.columns[0].sum(), 4.0);
/// ```
pub fn profile_rows<S>(
    rows: &[S],
    column_count: usize,
    workers: usize,
) -> Result<PartialResult, ProcessorError>
where
    S: AsRef<str> + Sync,
{
    let partition_count = workers.clamp(1, rows.len().max(1));
    let partitions = partition_rows(rows, partition_count);

    let pool = ThreadPoolBuilder::new()
        .num_threads(partition_count)
        .thread_name(|idx| format!("profiler-worker-{idx}"))
        .build()?;

    let partials: Vec<PartialResult> = pool.install(|| {
        partitions
            .par_iter()
            .enumerate()
            .map(|(idx, partition)| {
                process_chunk(partition, column_count, &format!("worker-{idx}"))
            })
            .collect()
    });

    Ok(reduce_with_columns(&partials, column_count))
}

/// Profiles a loaded file: the header fixes the column names and count,
/// every other line is a data row.
pub fn profile_source(
    source: &SourceLines<'_>,
    config: &ProfileConfig,
) -> Result<ProfileReport, ProcessorError> {
    let headers: Vec<String> = tokenize(&source.header)
        .into_iter()
        .map(|h| h.into_owned())
        .collect();

    let result = profile_rows(&source.rows, headers.len(), config.workers)?;

    info!(
        rows = result.rows_processed,
        columns = headers.len(),
        workers = config.workers,
        "profile complete"
    );

    Ok(ProfileReport::new(headers, result))
}
