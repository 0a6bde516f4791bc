/// Classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Empty or whitespace-only
    Null,
    /// Fully parsed as a float
    Numeric(f64),
    /// Anything else
    Text,
}

/// Classifies a raw field.
///
/// Leading and trailing whitespace (the C `isspace` set, so including `\v`)
/// is ignored. A value is numeric only if the whole trimmed text parses as a
/// float, see [`parse_number`]; a numeric prefix followed by anything else
/// (`12abc`, `1,000`) is text.
///
/// # Example
/// ```rust
/// # use columnar_profiler::processor::classifier::{classify, Cell};
/// assert_eq!(classify(" 4.5 "), Cell::Numeric(4.5));
/// assert_eq!(classify("   "), Cell::Null);
/// assert_eq!(classify("12abc"), Cell::Text);
/// ```
pub fn classify(field: &str) -> Cell {
    let trimmed = field.trim_matches(is_c_space);
    if trimmed.is_empty() {
        return Cell::Null;
    }

    match parse_number(trimmed) {
        Some(value) => Cell::Numeric(value),
        None => Cell::Text,
    }
}

fn is_c_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Parses the whole of `text` with the C `strtod` grammar.
///
/// Accepts decimal floats, hexadecimal floats (`0x1A`, `-0x1.8p3`), `inf`,
/// `infinity`, `nan` and `nan(chars)`, each with one optional sign. Values
/// outside the `f64` range are rejected the way C reports `ERANGE`: a
/// finite literal that overflows to infinity, or one with nonzero digits
/// that underflows to zero, is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if unsigned.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = if let Some(body) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        parse_hex(body)?
    } else if is_nan_with_payload(unsigned) {
        f64::NAN
    } else {
        let value: f64 = fast_float::parse(unsigned).ok()?;
        let is_inf_literal = unsigned.starts_with(['i', 'I']);
        let mantissa = unsigned.split(['e', 'E']).next().unwrap_or(unsigned);
        if (value.is_infinite() && !is_inf_literal)
            || (value == 0.0 && has_nonzero_digit(mantissa, 10))
        {
            return None;
        }
        value
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// `nan(n-char-sequence)`, where the sequence is alphanumerics and `_`
fn is_nan_with_payload(text: &str) -> bool {
    let Some(prefix) = text.get(..4) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case("nan(") {
        return false;
    }
    match text[4..].strip_suffix(')') {
        Some(payload) => payload
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_'),
        None => false,
    }
}

/// Hex float body after the `0x` prefix: `digits[.digits][p[sign]digits]`
fn parse_hex(body: &str) -> Option<f64> {
    let (mantissa, exponent) = match body.split_once(['p', 'P']) {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().ok()?),
        None => (body, 0),
    };
    let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut value = 0.0f64;
    for c in int_digits.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in frac_digits.chars() {
        value += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }

    let value = value * 2f64.powi(exponent);
    if value.is_infinite() || (value == 0.0 && has_nonzero_digit(mantissa, 16)) {
        return None;
    }
    Some(value)
}

fn has_nonzero_digit(digits: &str, radix: u32) -> bool {
    digits
        .chars()
        .any(|c| c.to_digit(radix).is_some_and(|d| d != 0))
}
