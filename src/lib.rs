//! # columnar_profiler
//!
//! `columnar_profiler` computes per-column descriptive statistics over a
//! delimited text file without any schema. It supports:
//!
//! - Memory-mapped CSV loading (zero-copy line splitting)
//! - Quote-aware, never-failing field tokenization
//! - Numeric vs. text vs. null classification of every cell
//! - Single-pass, numerically stable statistics (Welford)
//! - Parallel computation with Rayon over round-robin row partitions
//!
//! # Features
//!
//! - **Per column**: numeric count, nulls, non-numeric cells, sum, min, max,
//!   mean, sample standard deviation
//! - **Partition independent**: partial results merge associatively, so the
//!   worker count only affects the last floating-point digits
//! - **Lenient input**: short rows are null-padded, long rows truncated,
//!   unterminated quotes tolerated
//!
//! # Example
//!
//! ```rust,no_run
//! use columnar_profiler::{CsvSource, ProfileConfig, profile_source};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CsvSource::open(Path::new("data.csv"))?;
//!     let lines = source.lines()?;
//!
//!     let report = profile_source(&lines, &ProfileConfig::new(4))?;
//!     print!("{report}");
//!
//!     for (name, stats) in report.headers.iter().zip(&report.result.columns) {
//!         if let Some(max) = stats.max() {
//!             println!("{name}: max {max}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod processor;
pub mod report;
pub mod source;

pub use config::ProfileConfig;
pub use processor::{
    ProcessorError,
    chunk::{PartialResult, process_chunk},
    classifier::{Cell, classify, parse_number},
    column_stats::{ColumnStatistics, Welford},
    orchestrator::{partition_rows, profile_rows, profile_source},
    reducer::reduce,
    tokenizer::{quote_field, tokenize},
};
pub use report::ProfileReport;
pub use source::{CsvSource, SourceLines};
