//! Time expressions to millisecond offsets.
//!
//! Accepted forms are `SS[.fff]`, `MM:SS[.fff]` and `HH:MM:SS[.fff]`.
//! Hours and minutes are whole numbers; the seconds token may carry a
//! fraction, which is truncated (not rounded) to whole milliseconds.
//!
//! A single token without a colon means different things to different
//! callers, so there is no catch-all parser: segment workflows use
//! [`parse_as_ms_or_seconds`], block edits use [`parse_as_seconds`].

use crate::error::TimeFormatError;

/// How a single bare number (no colon) is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BareNumber {
    /// `1500` is 1500 ms, `1.5` is 1.5 s.
    MillisOrSeconds,
    /// `90` and `90.0` are both seconds.
    Seconds,
}

/// Parse a time expression where a bare integer is milliseconds and a bare
/// decimal is seconds.
pub fn parse_as_ms_or_seconds(text: &str) -> Result<u64, TimeFormatError> {
    parse(text, BareNumber::MillisOrSeconds)
}

/// Parse a time expression where a bare number is always seconds.
pub fn parse_as_seconds(text: &str) -> Result<u64, TimeFormatError> {
    parse(text, BareNumber::Seconds)
}

pub fn parse(text: &str, bare: BareNumber) -> Result<u64, TimeFormatError> {
    let input = text.trim();
    if input.is_empty() {
        return Err(TimeFormatError::Empty);
    }

    let tokens: Vec<&str> = input.split(':').collect();
    match tokens.as_slice() {
        [hours, minutes, seconds] => {
            let hours = whole(input, hours)?;
            let minutes = whole(input, minutes)?;
            let seconds_ms = seconds_to_ms(input, seconds)?;
            combine(input, hours, minutes, seconds_ms)
        }
        [minutes, seconds] => {
            let minutes = whole(input, minutes)?;
            let seconds_ms = seconds_to_ms(input, seconds)?;
            combine(input, 0, minutes, seconds_ms)
        }
        [single] => match bare {
            BareNumber::MillisOrSeconds if !single.contains('.') => whole(input, single),
            _ => seconds_to_ms(input, single),
        },
        _ => Err(TimeFormatError::TokenCount {
            input: input.to_string(),
        }),
    }
}

/// Render milliseconds as `MM:SS.mmm` (minutes are not wrapped into hours).
pub fn format_ms(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

fn combine(input: &str, hours: u64, minutes: u64, seconds_ms: u64) -> Result<u64, TimeFormatError> {
    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(seconds_ms))
        .ok_or_else(|| TimeFormatError::Overflow {
            input: input.to_string(),
        })
}

fn check_sign<'a>(input: &str, token: &'a str) -> Result<&'a str, TimeFormatError> {
    let token = token.trim();
    if let Some(rest) = token.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(TimeFormatError::Negative {
                input: input.to_string(),
            });
        }
    }
    Ok(token)
}

fn not_numeric(input: &str, token: &str) -> TimeFormatError {
    TimeFormatError::NotNumeric {
        input: input.to_string(),
        token: token.to_string(),
    }
}

fn whole(input: &str, token: &str) -> Result<u64, TimeFormatError> {
    let token = check_sign(input, token)?;
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(not_numeric(input, token));
    }
    token.parse::<u64>().map_err(|_| TimeFormatError::Overflow {
        input: input.to_string(),
    })
}

/// Decimal seconds to milliseconds, computed on the digits so `1.001`
/// yields exactly 1001.
fn seconds_to_ms(input: &str, token: &str) -> Result<u64, TimeFormatError> {
    let token = check_sign(input, token)?;
    let (int_part, frac_part) = token.split_once('.').unwrap_or((token, ""));

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !digits_only(int_part) || !digits_only(frac_part)
    {
        return Err(not_numeric(input, token));
    }

    let whole_seconds = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<u64>().map_err(|_| TimeFormatError::Overflow {
            input: input.to_string(),
        })?
    };

    let mut millis = 0u64;
    for (i, digit) in frac_part.chars().chain("000".chars()).take(3).enumerate() {
        let d = u64::from(digit.to_digit(10).unwrap_or(0));
        millis += d * 10u64.pow(2 - i as u32);
    }

    whole_seconds
        .checked_mul(1000)
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(|| TimeFormatError::Overflow {
            input: input.to_string(),
        })
}
