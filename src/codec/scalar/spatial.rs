//! WKT-like point literals: `SRID=<code>;POINT(<x> <y>)` and
//! `SRID=<code>;POINT Z (<x> <y> <z>)`.

use crate::model::Value;
use crate::{Error, Result};

/// Format a point, or `None` for any other value.
pub fn format_point(value: &Value) -> Option<String> {
    match value {
        Value::Point2D { srid, x, y } => Some(format!("SRID={srid};POINT({x:?} {y:?})")),
        Value::Point3D { srid, x, y, z } => Some(format!("SRID={srid};POINT Z ({x:?} {y:?} {z:?})")),
        _ => None,
    }
}

pub fn parse_point(raw: &str) -> Result<Value> {
    let malformed = || Error::MalformedSpatialLiteral { payload: raw.to_owned() };

    let rest = raw.trim().strip_prefix("SRID=").ok_or_else(malformed)?;
    let (srid, geometry) = rest.split_once(';').ok_or_else(malformed)?;
    if srid.is_empty() || !srid.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let srid: u32 = srid.parse().map_err(|_| malformed())?;

    let geometry = geometry.trim_start().strip_prefix("POINT").ok_or_else(malformed)?.trim_start();
    let (has_z, geometry) = match geometry.strip_prefix('Z') {
        Some(after) => (true, after.trim_start()),
        None => (false, geometry),
    };
    let coordinates = geometry
        .strip_prefix('(')
        .and_then(|g| g.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let coordinates = coordinates
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| malformed())?;

    match (has_z, coordinates.as_slice()) {
        (false, [x, y]) => Ok(Value::Point2D { srid, x: *x, y: *y }),
        (true, [x, y, z]) => Ok(Value::Point3D { srid, x: *x, y: *y, z: *z }),
        _ => Err(malformed()),
    }
}
