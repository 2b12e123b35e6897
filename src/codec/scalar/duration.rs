//! ISO-8601 duration grammar: `[±]P[nY][nM][nW][nD][T[nH][nM][n[.f]S]]`.

use std::fmt::Write;

use crate::codec::Sigil;
use crate::model::IsoDuration;
use crate::Result;
use super::payload_error;

const DATE_UNITS: [char; 4] = ['Y', 'M', 'W', 'D'];
const TIME_UNITS: [char; 3] = ['H', 'M', 'S'];

/// Canonical text of a duration, e.g. `P1Y2M3DT4H5M6.5S`.
pub fn format_duration(d: &IsoDuration) -> String {
    // Public fields can break the shared sign of seconds and nanoseconds.
    let d = IsoDuration::new(d.months, d.days, d.seconds, d.nanoseconds.into());
    if d.is_zero() {
        return "PT0S".into();
    }
    let mut out = String::from("P");
    let (years, months) = (d.months / 12, d.months % 12);
    push_component(&mut out, years, 'Y');
    push_component(&mut out, months, 'M');
    push_component(&mut out, d.days, 'D');

    let (hours, minutes, seconds) = (d.seconds / 3600, d.seconds % 3600 / 60, d.seconds % 60);
    if hours != 0 || minutes != 0 || seconds != 0 || d.nanoseconds != 0 {
        out.push('T');
        push_component(&mut out, hours, 'H');
        push_component(&mut out, minutes, 'M');
        if seconds != 0 || d.nanoseconds != 0 {
            if seconds < 0 || d.nanoseconds < 0 {
                out.push('-');
            }
            let _ = write!(out, "{}", seconds.unsigned_abs());
            if d.nanoseconds != 0 {
                let fraction = format!("{:09}", d.nanoseconds.unsigned_abs());
                out.push('.');
                out.push_str(fraction.trim_end_matches('0'));
            }
            out.push('S');
        }
    }
    out
}

fn push_component(out: &mut String, value: i64, unit: char) {
    if value != 0 {
        let _ = write!(out, "{value}{unit}");
    }
}

pub fn parse_duration(raw: &str) -> Result<IsoDuration> {
    let invalid = |message: &str| payload_error(Sigil::TemporalAmount, raw, message);

    let (negated, body) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let body = body.strip_prefix('P').ok_or_else(|| invalid("duration must start with 'P'"))?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((_, "")) => return Err(invalid("'T' must be followed by a time component")),
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };
    if date_part.is_empty() && time_part.is_none() {
        return Err(invalid("duration has no components"));
    }

    let overflow = || invalid("duration component out of range");
    let mut months: i64 = 0;
    let mut days: i64 = 0;
    let mut seconds: i64 = 0;
    let mut nanos: i64 = 0;

    for (amount, unit) in components(date_part, &DATE_UNITS).map_err(|m| invalid(m))? {
        if amount.contains('.') {
            return Err(invalid("only seconds may have a fraction"));
        }
        let n: i64 = amount.parse().map_err(|_| invalid("not a number"))?;
        let (target, factor) = match unit {
            'Y' => (&mut months, 12),
            'M' => (&mut months, 1),
            'W' => (&mut days, 7),
            _ => (&mut days, 1),
        };
        let current = *target;
        *target = n.checked_mul(factor)
            .and_then(|v| current.checked_add(v))
            .ok_or_else(overflow)?;
    }

    if let Some(time_part) = time_part {
        for (amount, unit) in components(time_part, &TIME_UNITS).map_err(|m| invalid(m))? {
            let (whole, fraction) = match (unit, amount.split_once(['.', ','])) {
                ('S', Some((whole, fraction))) => (whole, Some(fraction)),
                (_, Some(_)) => return Err(invalid("only seconds may have a fraction")),
                (_, None) => (amount, None),
            };
            let n: i64 = whole.parse().map_err(|_| invalid("not a number"))?;
            let factor = match unit {
                'H' => 3600,
                'M' => 60,
                _ => 1,
            };
            let current = seconds;
            seconds = n.checked_mul(factor)
                .and_then(|v| current.checked_add(v))
                .ok_or_else(overflow)?;
            if let Some(fraction) = fraction {
                let parsed = parse_fraction(fraction).ok_or_else(|| invalid("bad fraction of a second"))?;
                nanos = if whole.starts_with('-') { -parsed } else { parsed };
            }
        }
    }

    if negated {
        months = months.checked_neg().ok_or_else(overflow)?;
        days = days.checked_neg().ok_or_else(overflow)?;
        seconds = seconds.checked_neg().ok_or_else(overflow)?;
        nanos = -nanos;
    }
    Ok(IsoDuration::new(months, days, seconds, nanos))
}

/// Split `part` into `(amount, unit)` pairs, units in the given order, each at most once.
fn components<'a>(part: &'a str, units: &[char]) -> std::result::Result<Vec<(&'a str, char)>, &'static str> {
    let mut out = Vec::new();
    let mut next_unit = 0;
    let mut rest = part;
    while !rest.is_empty() {
        let end = rest.find(|c: char| c.is_ascii_alphabetic()).ok_or("number without a unit")?;
        let (amount, tail) = rest.split_at(end);
        let unit = tail.chars().next().ok_or("number without a unit")?;
        let position = units[next_unit..]
            .iter()
            .position(|u| *u == unit)
            .ok_or("unexpected or out-of-order unit")?;
        if amount.is_empty() {
            return Err("unit without a number");
        }
        out.push((amount, unit));
        next_unit += position + 1;
        rest = &tail[unit.len_utf8()..];
    }
    Ok(out)
}

/// Up to nine digits of a fraction of a second, as nanoseconds.
fn parse_fraction(fraction: &str) -> Option<i64> {
    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{fraction:0<9}");
    padded.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_days_and_hours() {
        assert_eq!(parse_duration("P42D").unwrap(), IsoDuration::of_days(42));
        assert_eq!(parse_duration("PT23H21M").unwrap(), IsoDuration::of_seconds(23 * 3600 + 21 * 60));
    }

    #[test]
    fn test_parse_every_unit() {
        let d = parse_duration("P1Y2M1W3DT4H5M6.25S").unwrap();
        assert_eq!(d, IsoDuration::new(14, 10, 4 * 3600 + 5 * 60 + 6, 250_000_000));
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_duration(&IsoDuration::of_days(42)), "P42D");
        assert_eq!(format_duration(&IsoDuration::of_seconds(23 * 3600 + 21 * 60)), "PT23H21M");
        assert_eq!(format_duration(&IsoDuration::new(14, 3, 3723, 5)), "P1Y2M3DT1H2M3.000000005S");
        assert_eq!(format_duration(&IsoDuration::default()), "PT0S");
        assert_eq!(format_duration(&IsoDuration::new(0, 0, 0, -500_000_000)), "PT-0.5S");
    }

    #[test]
    fn test_negative_components_round_trip() {
        for d in [
            IsoDuration::new(1, -1, 0, 0),
            IsoDuration::new(0, 0, -3723, -1),
            IsoDuration::new(-25, 0, 59, 999_999_999),
        ] {
            assert_eq!(parse_duration(&format_duration(&d)).unwrap(), d);
        }
    }

    #[test]
    fn test_leading_sign_negates_everything() {
        assert_eq!(parse_duration("-P1DT1S").unwrap(), IsoDuration::new(0, -1, -1, 0));
    }

    #[test]
    fn test_negating_the_minimum_is_out_of_range() {
        for raw in ["-PT-9223372036854775808S", "-P-9223372036854775808D", "-P-9223372036854775808M"] {
            match parse_duration(raw) {
                Err(crate::Error::PayloadFormatError { message, .. }) => {
                    assert_eq!(message, "duration component out of range")
                }
                other => panic!("{raw}: expected out of range, got {other:?}"),
            }
        }
        assert_eq!(parse_duration("PT-9223372036854775808S").unwrap().seconds, i64::MIN);
    }

    #[test]
    fn test_format_repairs_mixed_signs() {
        let d = IsoDuration { months: 0, days: 0, seconds: 5, nanoseconds: -1 };
        let formatted = format_duration(&d);
        assert_eq!(formatted, "PT4.999999999S");
        assert_eq!(parse_duration(&formatted).unwrap(), IsoDuration::new(0, 0, 5, -1));
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["", "P", "PT", "42D", "P1S", "PT1D", "P1.5D", "PT1.5M", "PD", "P1D2Y", "PT1.1234567891S"] {
            assert!(parse_duration(raw).is_err(), "{raw} should not parse");
        }
    }
}
