//! Text-to-number conversion for stored values.
//!
//! The lenient functions read the longest numeric prefix the way C's `atoi`
//! and `atof` do: leading whitespace is skipped, conversion stops at the first
//! character that cannot continue the number, and a string with no numeric
//! prefix reads as zero. Callers rely on that zero; it is not an error path.

use crate::error::{Error, ValueKind};
use crate::Result;

// C `isspace` in the "C" locale.
fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

fn skip_c_space(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&byte| is_c_space(byte)).count()
}

fn count_digits(bytes: &[u8], radix: u32) -> usize {
    bytes
        .iter()
        .take_while(|&&byte| (byte as char).is_digit(radix))
        .count()
}

/// Returns `(negative, sign_len)`.
fn read_sign(bytes: &[u8]) -> (bool, usize) {
    match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    }
}

/// Leading-run integer conversion. Saturates at the `i64` bounds.
pub fn leading_int(input: &str) -> i64 {
    let bytes = input.as_bytes();
    let mut idx = skip_c_space(bytes);
    let (negative, sign_len) = read_sign(&bytes[idx..]);
    idx += sign_len;

    let mut value: i64 = 0;
    for &byte in &bytes[idx..] {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

/// Leading-run float conversion.
pub fn leading_float(input: &str) -> f64 {
    let start = skip_c_space(input.as_bytes());
    float_prefix(&input[start..]).map_or(0.0, |(value, _)| value)
}

/// Parses the longest float prefix of `input`, returning the value and the
/// number of bytes it spans.
fn float_prefix(input: &str) -> Option<(f64, usize)> {
    let bytes = input.as_bytes();
    let (negative, mut idx) = read_sign(bytes);
    let apply_sign = |value: f64| if negative { -value } else { value };

    if let Some((value, len)) = special_prefix(&bytes[idx..]) {
        return Some((apply_sign(value), idx + len));
    }

    if bytes.len() > idx + 1 && bytes[idx] == b'0' && matches!(bytes[idx + 1], b'x' | b'X') {
        return match hex_prefix(&bytes[idx + 2..]) {
            Some((value, len)) => Some((apply_sign(value), idx + 2 + len)),
            // "0x" with nothing after it still converts the leading zero.
            None => Some((apply_sign(0.0), idx + 1)),
        };
    }

    let body_start = idx;
    let int_digits = count_digits(&bytes[idx..], 10);
    idx += int_digits;
    if bytes.get(idx) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[idx + 1..], 10);
        if int_digits + frac_digits > 0 {
            idx += 1 + frac_digits;
        }
    }
    if idx == body_start {
        return None;
    }

    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        let mut exp = idx + 1;
        exp += read_sign(&bytes[exp..]).1;
        let exp_digits = count_digits(&bytes[exp..], 10);
        if exp_digits > 0 {
            idx = exp + exp_digits;
        }
    }

    let value: f64 = input[body_start..idx].parse().ok()?;
    Some((apply_sign(value), idx))
}

fn special_prefix(bytes: &[u8]) -> Option<(f64, usize)> {
    let starts_with = |word: &[u8]| {
        bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
    };
    if starts_with(b"infinity") {
        Some((f64::INFINITY, 8))
    } else if starts_with(b"inf") {
        Some((f64::INFINITY, 3))
    } else if starts_with(b"nan") {
        Some((f64::NAN, 3))
    } else {
        None
    }
}

/// Hexadecimal float body after the `0x` prefix: `h*[.h*][p[+-]d+]`.
///
/// Digits beyond 60 bits of mantissa only shift the binary exponent, and the
/// exponent is applied in steps, so huge or tiny results round to infinity,
/// zero or a subnormal instead of overflowing an intermediate.
fn hex_prefix(bytes: &[u8]) -> Option<(f64, usize)> {
    const MANTISSA_LIMIT: u64 = 1 << 60;

    let hex_digit = |idx: usize| bytes.get(idx).and_then(|&byte| (byte as char).to_digit(16));
    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let mut digits = 0;
    let mut idx = 0;

    while let Some(digit) = hex_digit(idx) {
        if mantissa < MANTISSA_LIMIT {
            mantissa = mantissa * 16 + u64::from(digit);
        } else {
            exponent = exponent.saturating_add(4);
        }
        digits += 1;
        idx += 1;
    }
    if bytes.get(idx) == Some(&b'.') {
        let mut frac = idx + 1;
        let mut frac_digits = 0;
        while let Some(digit) = hex_digit(frac) {
            if mantissa < MANTISSA_LIMIT {
                mantissa = mantissa * 16 + u64::from(digit);
                exponent = exponent.saturating_sub(4);
            }
            frac_digits += 1;
            frac += 1;
        }
        if digits + frac_digits > 0 {
            digits += frac_digits;
            idx = frac;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(idx), Some(b'p' | b'P')) {
        let mut exp = idx + 1;
        let (negative, sign_len) = read_sign(&bytes[exp..]);
        exp += sign_len;
        let exp_digits = count_digits(&bytes[exp..], 10);
        if exp_digits > 0 {
            let mut value: i64 = 0;
            for &byte in &bytes[exp..exp + exp_digits] {
                value = value
                    .saturating_mul(10)
                    .saturating_add(i64::from(byte - b'0'));
            }
            exponent = if negative {
                exponent.saturating_sub(value)
            } else {
                exponent.saturating_add(value)
            };
            idx = exp + exp_digits;
        }
    }

    Some((scale_by_pow2(mantissa as f64, exponent), idx))
}

/// `value * 2^exponent` without intermediate overflow or underflow.
fn scale_by_pow2(mut value: f64, mut exponent: i64) -> f64 {
    const MAX_STEP: i64 = 1023;
    const MIN_STEP: i64 = -1022;

    while exponent > MAX_STEP && value.is_finite() && value != 0.0 {
        value *= 2.0_f64.powi(MAX_STEP as i32);
        exponent -= MAX_STEP;
    }
    // A nonzero mantissa is at least 1, so the first step down stays normal
    // and only the last multiply rounds into the subnormal range.
    while exponent < MIN_STEP && value != 0.0 {
        value *= 2.0_f64.powi(MIN_STEP as i32);
        exponent -= MIN_STEP;
    }
    if value == 0.0 || value.is_infinite() {
        return value;
    }
    value * 2.0_f64.powi(exponent as i32)
}

/// Whole-string integer conversion.
pub fn strict_int(input: &str) -> Result<i64> {
    input
        .parse()
        .map_err(|_| Error::conversion(ValueKind::Int, input))
}

/// Whole-string float conversion.
pub fn strict_float(input: &str) -> Result<f64> {
    input
        .parse()
        .map_err(|_| Error::conversion(ValueKind::Float, input))
}
