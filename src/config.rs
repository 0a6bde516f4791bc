use crate::processor::ProcessorError;

/// Runtime settings for a profiling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileConfig {
    /// Number of partitions and parallel workers, always at least 1
    pub workers: usize,
}

impl ProfileConfig {
    pub fn new(workers: usize) -> Self {
        ProfileConfig {
            workers: workers.max(1),
        }
    }

    /// Builds a config from a signed worker count; zero or negative means 1.
    pub fn from_raw_workers(raw: i64) -> Self {
        Self::new(usize::try_from(raw).unwrap_or(1))
    }

    /// Parses the worker count as given on the command line.
    ///
    /// # Errors
    /// Returns [`ProcessorError::Config`] if `arg` is not an integer.
    pub fn from_worker_arg(arg: &str) -> Result<Self, ProcessorError> {
        let raw: i64 = arg
            .trim()
            .parse()
            .map_err(|e| ProcessorError::Config(format!("invalid worker count {arg:?}: {e}")))?;
        Ok(Self::from_raw_workers(raw))
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::new(rayon::current_num_threads())
    }
}
