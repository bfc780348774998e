//! Line-oriented text → numeric sequence conversion.
//!
//! Input is free-form: one value per line, with headers, units, blank
//! lines and stray text tolerated. Each line contributes its leading
//! numeric prefix, so `"12.5 mm"` reads as `12.5` and `"1.5,2.0"` as `1.5`.
//! Lines without a finite leading number are dropped.

use tracing::trace;

/// Outcome of parsing a text blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSequence {
    /// Finite values in line order.
    pub values: Vec<f64>,
    /// Non-blank lines that produced no value.
    pub skipped: usize,
}

/// Parses `text` into a sequence of finite values, silently dropping lines
/// that do not start with a number.
///
/// Both `\n` and `\r\n` line endings are accepted, and a leading UTF-8
/// byte order mark is ignored.
///
/// # Examples
/// ```
/// use hydro_gof::parse::parse_sequence;
/// assert_eq!(parse_sequence("1.0\n\nabc\n2.5\n  3.0 "), vec![1.0, 2.5, 3.0]);
/// assert_eq!(parse_sequence("4\r\n5\r\n"), vec![4.0, 5.0]);
/// ```
pub fn parse_sequence(text: &str) -> Vec<f64> {
    parse_sequence_with_stats(text).values
}

/// Like [`parse_sequence`], but also counts the non-blank lines that were
/// discarded.
///
/// # Examples
/// ```
/// use hydro_gof::parse::parse_sequence_with_stats;
/// let parsed = parse_sequence_with_stats("flow\n1\n\n2\nn/a\n");
/// assert_eq!(parsed.values, vec![1.0, 2.0]);
/// assert_eq!(parsed.skipped, 2);
/// ```
pub fn parse_sequence_with_stats(text: &str) -> ParsedSequence {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut parsed = ParsedSequence::default();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_value(line) {
            Some(v) => parsed.values.push(v),
            None => {
                trace!(line = line_no + 1, content = line, "skipping non-numeric line");
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

/// Parses the leading numeric prefix of an already-trimmed line.
///
/// Returns `None` when there is no prefix or it does not denote a finite
/// value (e.g. `1e999`).
pub fn parse_value(line: &str) -> Option<f64> {
    let len = numeric_prefix_len(line.as_bytes());
    if len == 0 {
        return None;
    }
    line[..len].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length in bytes of the longest prefix matching
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut has_digits = int_end > i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        if frac_end > i + 1 || has_digits {
            has_digits |= frac_end > i + 1;
            i = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn display_text_round_trips(
            values in proptest::collection::vec(-1e12_f64..1e12, 0..100)
        ) {
            let text: String = values.iter().map(|v| format!("{v}\n")).collect();
            prop_assert_eq!(parse_sequence(&text), values);
        }

        #[test]
        fn debug_text_round_trips(
            values in proptest::collection::vec(prop::num::f64::NORMAL, 0..100)
        ) {
            let text = values
                .iter()
                .map(|v| format!("{v:?}"))
                .collect::<Vec<_>>()
                .join("\r\n");
            prop_assert_eq!(parse_sequence(&text), values);
        }

        #[test]
        fn never_yields_non_finite(text in "\\PC*") {
            prop_assert!(parse_sequence(&text).iter().all(|v| v.is_finite()));
        }
    }
}
