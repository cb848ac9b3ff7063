//! Numeric parsing and formatting helpers
//!
//! Pattern values arrive as loosely typed text (form fields, `.lin` tokens)
//! and leave as the shortest decimal that reads back to the same value.

/// Parse the longest numeric prefix of `input`.
///
/// Leading whitespace is skipped, then an optional sign, digits, an optional
/// fraction and an optional exponent are consumed. Anything after that is
/// ignored, so `"1.5mm"` reads as `1.5`. Returns `None` when no digit was
/// found.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a value typed into a live field.
///
/// Returns `None` while the input is still incomplete (`""`, `"-"`, `"."`,
/// `"-."`) or has no numeric prefix, so the caller can defer the update
/// instead of coercing a half-typed number.
pub fn parse_live_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    match trimmed {
        "" | "-" | "+" | "." | "-." | "+." => None,
        _ => parse_leading_float(trimmed),
    }
}

/// Parse a value on commit, coercing anything unreadable to `0`.
pub fn parse_commit_number(input: &str) -> f64 {
    parse_leading_float(input).unwrap_or(0.0)
}

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a number in its shortest round-trippable decimal form.
///
/// Zero (including negative zero) and non-finite values print as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    format!("{}", value)
}
