// Utility helpers for numeric coercion and console input and formatting.
//
// Cells arrive as trimmed strings; everything numeric downstream goes through
// `coerce_number` so the rest of the crate can assume finite values.
use num_format::{Locale, ToFormattedString};
use std::io::BufRead;

/// Parse a cell into `f64`, forgiving about surrounding whitespace.
///
/// Returns `None` for missing, empty, unparseable and non-finite input
/// (`NaN`, `inf`), so callers never see a value that would poison a sum.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric coercion used by the normalizer: anything unusable becomes `0`.
pub fn coerce_number(s: Option<&str>) -> f64 {
    parse_f64_safe(s).unwrap_or(0.0)
}

/// Smallest and largest value of a non-empty iterator.
pub fn min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234.50`).
    if !n.is_finite() {
        return format!("{:.*}", decimals, 0.0);
    }
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_val: i64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = parts.next() {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g., `1,284 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

/// One trimmed line from `reader`, or `None` once input is closed or unreadable.
pub fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = String::new();
    match reader.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case(Some("0.9"), Some(0.9))]
    #[case(Some("  12 "), Some(12.0))]
    #[case(Some("1e-3"), Some(0.001))]
    #[case(Some(""), None)]
    #[case(Some("abc"), None)]
    #[case(Some("NaN"), None)]
    #[case(Some("inf"), None)]
    #[case(None, None)]
    fn parses_cells_safely(#[case] input: Option<&str>, #[case] expected: Option<f64>) {
        assert_eq!(parse_f64_safe(input), expected);
    }

    #[test]
    fn coerces_garbage_to_zero() {
        assert_eq!(coerce_number(Some("n/a")), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn min_max_of_empty_is_none() {
        assert_eq!(min_max(Vec::<f64>::new()), None);
        assert_eq!(min_max(vec![3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
    }

    #[rstest]
    #[case(1234567.891, 2, "1,234,567.89")]
    #[case(-0.5, 3, "-0.500")]
    #[case(0.675, 0, "1")]
    #[case(42.0, 0, "42")]
    fn formats_numbers(#[case] n: f64, #[case] decimals: usize, #[case] expected: &str) {
        assert_eq!(format_number(n, decimals), expected);
    }

    #[test]
    fn closed_input_yields_no_line() {
        let mut input = Cursor::new("3\r\n  \n0");
        assert_eq!(read_trimmed_line(&mut input).as_deref(), Some("3"));
        assert_eq!(read_trimmed_line(&mut input).as_deref(), Some(""));
        assert_eq!(read_trimmed_line(&mut input).as_deref(), Some("0"));
        assert_eq!(read_trimmed_line(&mut input), None);
        assert_eq!(read_trimmed_line(&mut input), None);
    }
}
