//! Number-to-text rendering used by reports.
//!
//! Report values follow the conventions of the JSON/JavaScript tooling the
//! reports are usually consumed by: fixed-point output rounds ties away
//! from zero on the exact binary value, and shortest output switches to
//! exponent notation outside `[1e-7, 1e21)`.

/// Digits needed to print any finite `f64` fraction exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Formats `value` with exactly `decimals` fractional digits, rounding
/// half away from zero.
///
/// A negative sign is kept for negative values that round to zero
/// (`-0.0001` → `"-0.00"`) but not for negative zero itself.
///
/// # Examples
/// ```
/// use hydro_gof::render::fixed;
/// assert_eq!(fixed(0.0625, 3), "0.063");
/// assert_eq!(fixed(-0.0625, 3), "-0.063");
/// assert_eq!(fixed(-0.0, 2), "0.00");
/// ```
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return shortest(value);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|&d| d >= b'5');
    if round_up {
        increment_decimal(&mut digits);
    }

    let int_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| d as char));
    }
    out
}

/// Adds one unit in the last place of an ASCII digit string.
fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Shortest round-trip rendering.
///
/// Plain decimal for magnitudes in `[1e-7, 1e21)`, exponent notation with
/// an explicit exponent sign otherwise. Negative zero renders as `"0"`.
///
/// # Examples
/// ```
/// use hydro_gof::render::shortest;
/// assert_eq!(shortest(3.0), "3");
/// assert_eq!(shortest(2.5), "2.5");
/// assert_eq!(shortest(1e21), "1e+21");
/// assert_eq!(shortest(1.5e-7), "1.5e-7");
/// assert_eq!(shortest(-0.0), "0");
/// ```
pub fn shortest(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits as `d[.ddd]e<exp>`
    let sci = format!("{:e}", value.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if n - 1 < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{sign}{}", (n - 1).abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", (n - 1).abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}
