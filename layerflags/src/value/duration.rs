//! Text form of [`Duration`] values: `300ms`, `1.5h`, `1h2m3s`.

use std::time::Duration;

use crate::ValueError;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Digits of a fractional part that are kept; the rest are truncated.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn out_of_range() -> ValueError {
    ValueError::new("duration out of range")
}

/// Parses a sequence of `<number><unit>` terms.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "nanosecond totals are split into whole units"
)]
pub(super) fn parse(raw: &str) -> Result<Duration, ValueError> {
    let trimmed = raw.trim();
    let text = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if text.starts_with('-') {
        return Err(ValueError::new("durations cannot be negative"));
    }
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(ValueError::new("empty duration"));
    }

    let mut rest = text;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(ValueError::new(format!("missing unit in duration {raw:?}")));
        }
        let scale = unit_scale(unit)
            .ok_or_else(|| ValueError::new(format!("unknown unit {unit:?} in duration")))?;
        total = total
            .checked_add(term_nanos(number, scale, raw)?)
            .ok_or_else(out_of_range)?;
        rest = next;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| out_of_range())?;
    let nanos = u32::try_from(total % NANOS_PER_SEC).map_err(|_| out_of_range())?;
    Ok(Duration::new(secs, nanos))
}

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "nanosecond totals are split into whole units"
)]
fn term_nanos(number: &str, scale: u128, raw: &str) -> Result<u128, ValueError> {
    let invalid = || ValueError::new(format!("invalid duration {raw:?}"));
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid());
    }
    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let mut nanos = whole_value.checked_mul(scale).ok_or_else(out_of_range)?;

    let kept: String = fraction.chars().take(MAX_FRACTION_DIGITS).collect();
    if !kept.is_empty() {
        let numerator: u128 = kept.parse().map_err(|_| invalid())?;
        let digits = u32::try_from(kept.len()).map_err(|_| invalid())?;
        let denominator = 10_u128.pow(digits);
        let part = numerator.checked_mul(scale).ok_or_else(out_of_range)? / denominator;
        nanos = nanos.checked_add(part).ok_or_else(out_of_range)?;
    }
    Ok(nanos)
}

/// Renders `value` in the shortest unit-qualified form.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "nanosecond totals are split into whole units"
)]
pub(super) fn format(value: Duration) -> String {
    let nanos = value.as_nanos();
    if nanos == 0 {
        return String::from("0s");
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return with_fraction(nanos, 1_000, "µs");
    }
    if nanos < NANOS_PER_SEC {
        return with_fraction(nanos, 1_000_000, "ms");
    }

    let secs = nanos / NANOS_PER_SEC;
    let (hours, minutes, seconds) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&with_fraction(
        seconds * NANOS_PER_SEC + nanos % NANOS_PER_SEC,
        NANOS_PER_SEC,
        "s",
    ));
    out
}

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "nanosecond totals are split into whole units"
)]
fn with_fraction(value: u128, unit: u128, suffix: &str) -> String {
    let whole = value / unit;
    let remainder = value % unit;
    if remainder == 0 {
        return format!("{whole}{suffix}");
    }
    let width = usize::try_from(unit.ilog10()).unwrap_or(9);
    let digits = format!("{remainder:0width$}");
    format!("{whole}.{}{suffix}", digits.trim_end_matches('0'))
}
