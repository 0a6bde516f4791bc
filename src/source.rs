use memchr::memchr_iter;
use memmap2::Mmap;
use std::{
    borrow::Cow,
    fs::File,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::processor::ProcessorError;

/// A CSV file mapped into memory
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
    mmap: Mmap,
}

/// Header line and data rows of a source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLines<'a> {
    pub header: Cow<'a, str>,
    pub rows: Vec<Cow<'a, str>>,
}

impl CsvSource {
    /// Opens and maps the file at `path`.
    ///
    /// # Errors
    /// Returns a [`ProcessorError`] if:
    /// - the file cannot be opened or mapped
    /// - the file is empty (no header line)
    pub fn open(path: &Path) -> Result<Self, ProcessorError> {
        let file = File::open(path).map_err(|source| ProcessorError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        if file.metadata()?.len() == 0 {
            return Err(ProcessorError::EmptyFile(path.to_path_buf()));
        }

        // The mapping is read-only and lives as long as `self`
        let mmap = unsafe { Mmap::map(&file)? };

        info!(path = %path.display(), bytes = mmap.len(), "source mapped");

        Ok(CsvSource {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap[..]
    }

    /// Splits the mapped bytes into header and rows.
    pub fn lines(&self) -> Result<SourceLines<'_>, ProcessorError> {
        split_lines(self.bytes()).ok_or_else(|| ProcessorError::EmptyFile(self.path.clone()))
    }
}

/// Splits a buffer into a header line and data rows.
///
/// Lines end at `\n` and a trailing `\r` is dropped. The empty tail after a
/// final newline is not a row. Invalid UTF-8 is replaced, never rejected.
/// Returns `None` for an empty buffer.
pub fn split_lines(buf: &[u8]) -> Option<SourceLines<'_>> {
    if buf.is_empty() {
        return None;
    }

    let mut lines = Vec::new();
    let mut start = 0;
    for newline_pos in memchr_iter(b'\n', buf) {
        lines.push(decode_line(&buf[start..newline_pos]));
        start = newline_pos + 1;
    }
    if start < buf.len() {
        lines.push(decode_line(&buf[start..]));
    }

    let mut lines = lines.into_iter();
    let header = lines.next()?;
    Some(SourceLines {
        header,
        rows: lines.collect(),
    })
}

fn decode_line(line: &[u8]) -> Cow<'_, str> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let lines = split_lines(b"a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(lines.header, "a,b");
        assert_eq!(lines.rows, vec!["1,2", "3,4"]);
    }

    #[test]
    fn test_missing_final_newline() {
        let lines = split_lines(b"a\n1\n2").unwrap();
        assert_eq!(lines.rows, vec!["1", "2"]);
    }

    #[test]
    fn test_blank_lines_are_rows() {
        let lines = split_lines(b"a\n1\n\n2\n").unwrap();
        assert_eq!(lines.rows, vec!["1", "", "2"]);
    }

    #[test]
    fn test_crlf() {
        let lines = split_lines(b"a,b\r\n1,2\r\n").unwrap();
        assert_eq!(lines.header, "a,b");
        assert_eq!(lines.rows, vec!["1,2"]);
    }

    #[test]
    fn test_header_only() {
        let lines = split_lines(b"a,b").unwrap();
        assert_eq!(lines.header, "a,b");
        assert!(lines.rows.is_empty());

        let lines = split_lines(b"\n").unwrap();
        assert_eq!(lines.header, "");
        assert!(lines.rows.is_empty());
    }

    #[test]
    fn test_empty_buffer() {
        assert!(split_lines(b"").is_none());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = split_lines(b"a\n\xff1\n").unwrap();
        assert_eq!(lines.rows[0], "\u{FFFD}1");
    }
}
