//! Quote-aware splitting of a single CSV line into fields.
//!
//! The tokenizer never fails. A quote anywhere in a field switches to quoted
//! mode, `""` inside quotes is a literal quote, and an unterminated quote
//! swallows the rest of the line as field content.

use memchr::{memchr, memchr2};
use std::borrow::Cow;

const QUOTE: u8 = b'"';
const DELIMITER: u8 = b',';

/// Splits `line` into its fields.
///
/// Always returns at least one field.
///
/// # Example
/// ```rust
/// # use columnar_profiler::processor::tokenizer::tokenize;
/// let fields = tokenize(r#""1,000",5"#);
/// assert_eq!(fields, vec!["1,000", "5"]);
/// ```
pub fn tokenize(line: &str) -> Vec<Cow<'_, str>> {
    let mut fields = Vec::new();
    tokenize_into(line, &mut fields);
    fields
}

/// Same as [`tokenize`] but reuses the caller's buffer.
///
/// Fields without any quote character borrow from `line`; quoted fields are
/// unescaped into owned strings.
pub fn tokenize_into<'a>(line: &'a str, fields: &mut Vec<Cow<'a, str>>) {
    fields.clear();

    let bytes = line.as_bytes();
    let mut pos = 0;
    let mut field_start = 0;
    // Set once the current field has seen a quote
    let mut unescaped: Option<String> = None;
    let mut in_quotes = false;

    loop {
        if in_quotes {
            let buf = unescaped.get_or_insert_with(String::new);
            match memchr(QUOTE, &bytes[pos..]) {
                Some(offset) => {
                    let quote_pos = pos + offset;
                    buf.push_str(&line[pos..quote_pos]);
                    if bytes.get(quote_pos + 1) == Some(&QUOTE) {
                        buf.push('"');
                        pos = quote_pos + 2;
                    } else {
                        in_quotes = false;
                        pos = quote_pos + 1;
                    }
                }
                None => {
                    // Unterminated quote
                    buf.push_str(&line[pos..]);
                    fields.push(Cow::Owned(std::mem::take(buf)));
                    return;
                }
            }
        } else {
            match memchr2(DELIMITER, QUOTE, &bytes[pos..]) {
                Some(offset) => {
                    let hit = pos + offset;
                    if bytes[hit] == DELIMITER {
                        fields.push(finish_field(line, field_start, pos, hit, &mut unescaped));
                        pos = hit + 1;
                        field_start = pos;
                    } else {
                        unescaped
                            .get_or_insert_with(String::new)
                            .push_str(&line[pos..hit]);
                        in_quotes = true;
                        pos = hit + 1;
                    }
                }
                None => {
                    fields.push(finish_field(
                        line,
                        field_start,
                        pos,
                        line.len(),
                        &mut unescaped,
                    ));
                    return;
                }
            }
        }
    }
}

fn finish_field<'a>(
    line: &'a str,
    field_start: usize,
    segment_start: usize,
    end: usize,
    unescaped: &mut Option<String>,
) -> Cow<'a, str> {
    match unescaped.take() {
        Some(mut buf) => {
            buf.push_str(&line[segment_start..end]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(&line[field_start..end]),
    }
}

/// Renders `field` so that [`tokenize`] reads it back unchanged.
///
/// Fields containing a delimiter or a quote are wrapped in quotes with inner
/// quotes doubled.
pub fn quote_field(field: &str) -> Cow<'_, str> {
    if memchr2(DELIMITER, QUOTE, field.as_bytes()).is_none() {
        return Cow::Borrowed(field);
    }

    let mut out = String::with_capacity(field.len() + 2);
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    Cow::Owned(out)
}
