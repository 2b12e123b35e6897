//! ISO-8601 profiles of the five instant variants.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::model::{OffsetTime, Value, ZonedDateTime};
use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIME_FORMAT_NO_SECONDS: &str = "%H:%M";

/// One of the textual shapes an instant can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalProfile {
    /// `2020-12-14`
    Date,
    /// `21:21:00+04:00`
    OffsetTime,
    /// `21:21:00`
    LocalTime,
    /// `2020-12-14T17:14:00+01:00[Europe/Berlin]`
    ZonedDateTime,
    /// `2020-12-14T17:14:00`
    LocalDateTime,
}

impl TemporalProfile {
    /// Order in which decode tries the profiles.
    pub const PRIORITY: [TemporalProfile; 5] = [
        TemporalProfile::Date,
        TemporalProfile::OffsetTime,
        TemporalProfile::LocalTime,
        TemporalProfile::ZonedDateTime,
        TemporalProfile::LocalDateTime,
    ];

    /// Parse `raw` strictly under this profile.
    pub fn parse(self, raw: &str) -> Option<Value> {
        match self {
            TemporalProfile::Date => parse_date(raw).map(Value::Date),
            TemporalProfile::OffsetTime => parse_offset_time(raw).map(Value::Time),
            TemporalProfile::LocalTime => parse_local_time(raw).map(Value::LocalTime),
            TemporalProfile::ZonedDateTime => parse_zoned(raw).map(Value::DateTime),
            TemporalProfile::LocalDateTime => parse_local_datetime(raw).map(Value::LocalDateTime),
        }
    }
}

/// Format an instant, or `None` for any other value.
pub fn format_instant(value: &Value) -> Option<String> {
    let formatted = match value {
        Value::Date(d) => d.format(DATE_FORMAT).to_string(),
        Value::Time(t) => format!("{}{}", t.time.format(TIME_FORMAT), format_offset(&t.offset)),
        Value::LocalTime(t) => t.format(TIME_FORMAT).to_string(),
        Value::DateTime(z) => {
            let mut out = format!(
                "{}T{}{}",
                z.datetime.date_naive().format(DATE_FORMAT),
                z.datetime.time().format(TIME_FORMAT),
                format_offset(z.datetime.offset()),
            );
            if let Some(zone) = &z.zone {
                out.push('[');
                out.push_str(zone);
                out.push(']');
            }
            out
        }
        Value::LocalDateTime(dt) => {
            format!("{}T{}", dt.date().format(DATE_FORMAT), dt.time().format(TIME_FORMAT))
        }
        _ => return None,
    };
    Some(formatted)
}

/// Try every profile in [`TemporalProfile::PRIORITY`] order.
pub fn parse_instant(raw: &str) -> Result<Value> {
    TemporalProfile::PRIORITY
        .iter()
        .find_map(|profile| profile.parse(raw))
        .ok_or_else(|| Error::NoTemporalProfileMatched { payload: raw.to_owned() })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_local_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, TIME_FORMAT_NO_SECONDS))
        .ok()
}

fn parse_offset_time(raw: &str) -> Option<OffsetTime> {
    let split = raw.rfind(['+', '-', 'Z'])?;
    let (time, offset) = raw.split_at(split);
    Some(OffsetTime::new(parse_local_time(time)?, parse_offset(offset)?))
}

fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let (date, time) = raw.split_once('T')?;
    Some(NaiveDateTime::new(parse_date(date)?, parse_local_time(time)?))
}

fn parse_zoned(raw: &str) -> Option<ZonedDateTime> {
    let (rest, zone) = match raw.strip_suffix(']') {
        Some(body) => {
            let (rest, zone) = body.rsplit_once('[')?;
            if zone.is_empty() {
                return None;
            }
            (rest, Some(zone.to_owned()))
        }
        None => (raw, None),
    };
    let (date, time) = rest.split_once('T')?;
    let date = parse_date(date)?;
    let time = parse_offset_time(time)?;
    let datetime = time.offset
        .from_local_datetime(&NaiveDateTime::new(date, time.time))
        .single()?;
    Some(ZonedDateTime { datetime, zone })
}

/// `Z` for UTC, `±HH:MM` otherwise (`±HH:MM:SS` when seconds are set).
fn format_offset(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".into();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    let (h, m, s) = (abs / 3600, abs % 3600 / 60, abs % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = match raw.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let mut parts = raw[1..].split(':');
    let h = two_digits(parts.next()?)?;
    let m = two_digits(parts.next()?)?;
    let s = match parts.next() {
        Some(s) => two_digits(s)?,
        None => 0,
    };
    if parts.next().is_some() || h > 18 || m > 59 || s > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (h * 3600 + m * 60 + s))
}

fn two_digits(s: &str) -> Option<i32> {
    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
