//! Signed durations written as `1h30m`, `-45s` or `1.5h`.
//!
//! Used for `organise --shift` and for printing `timediff` results. The
//! notation is Go's `time.Duration`: units `h`, `m`, `s`, `ms`, `us` (or
//! `µs`) and `ns`. Spans under a second print in the largest sub-second unit
//! that keeps a whole part, e.g. `250ms` or `1.5µs`.

use crate::error::ShiftError;
use chrono::TimeDelta;
use regex::Regex;
use std::sync::OnceLock;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

fn component_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]*\.?[0-9]*)(ns|us|µs|μs|ms|h|m|s)").expect("valid duration regex")
    })
}

/// Parse a duration such as `2h`, `-1h30m`, `90s`, `1.5h` or `0`
pub fn parse_shift(input: &str) -> Result<TimeDelta, ShiftError> {
    let invalid = || ShiftError::Invalid {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if body == "0" {
        return Ok(TimeDelta::zero());
    }
    if body.is_empty() {
        return Err(invalid());
    }

    let mut nanos = 0f64;
    let mut consumed = 0;
    for caps in component_pattern().captures_iter(body) {
        let whole = caps.get(0).ok_or_else(invalid)?;
        if whole.start() != consumed {
            return Err(invalid());
        }
        consumed = whole.end();

        let number = &caps[1];
        if number.is_empty() || number == "." {
            return Err(invalid());
        }
        let value: f64 = number.parse().map_err(|_| invalid())?;

        let unit_nanos: f64 = match &caps[2] {
            "h" => 3_600_000_000_000.0,
            "m" => 60_000_000_000.0,
            "s" => 1_000_000_000.0,
            "ms" => 1_000_000.0,
            "us" | "µs" | "μs" => 1_000.0,
            "ns" => 1.0,
            _ => return Err(invalid()),
        };
        nanos += value * unit_nanos;
    }

    if consumed != body.len() {
        return Err(invalid());
    }

    if !nanos.is_finite() || nanos >= i64::MAX as f64 {
        return Err(ShiftError::OutOfRange {
            input: input.to_string(),
        });
    }

    let delta = TimeDelta::nanoseconds(nanos.round() as i64);
    Ok(if negative { -delta } else { delta })
}

/// Print a duration in the notation [`parse_shift`] accepts
pub fn format_shift(delta: TimeDelta) -> String {
    if delta.is_zero() {
        return "0s".to_string();
    }

    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();

    let total_seconds = delta.num_seconds() as u64;
    let subsec_nanos = delta.subsec_nanos().unsigned_abs() as u64;

    if total_seconds == 0 {
        let (scale, unit) = match subsec_nanos {
            0..=999 => (1, "ns"),
            1_000..=999_999 => (1_000, "µs"),
            _ => (1_000_000, "ms"),
        };
        return format!("{}{}{}", sign, decimal(subsec_nanos, scale), unit);
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = decimal(
        (total_seconds % 60) * NANOS_PER_SECOND + subsec_nanos,
        NANOS_PER_SECOND,
    );

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

/// `value / scale` as a decimal without trailing zeros
fn decimal(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }

    let digits = scale.ilog10() as usize;
    let fraction = format!("{:0width$}", fraction, width = digits);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}
