//! Record normalization
//!
//! Converts the raw strings of a [`FieldMap`] into a typed [`WellRecord`].
//! Every conversion is total: absent or malformed input resolves to the
//! field's default (`""`, `0.0` or [`min_date`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use wells_domain::record::min_date;
use wells_domain::{ApiNumber, FieldKey, FieldMap, WellRecord};

/// Components of the surface location, in output order
pub const SURFACE_LOCATION_PARTS: [FieldKey; 4] = [
    FieldKey::Location,
    FieldKey::Lot,
    FieldKey::FootageNsh,
    FieldKey::FootageEw,
];

/// Separator between surface location components
pub const SURFACE_LOCATION_SEPARATOR: &str = ", ";

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"];

/// Build a record for `api_number` from extracted fields
///
/// Never fails; see the module docs for the defaults applied.
pub fn normalize(api_number: &ApiNumber, fields: &FieldMap) -> WellRecord {
    let text = |key: FieldKey| fields.get(key).unwrap_or_default().to_string();
    let number = |key: FieldKey| fields.get(key).map(parse_number).unwrap_or(0.0);
    let date = |key: FieldKey| fields.get(key).map(parse_date).unwrap_or_else(min_date);

    let (latitude, longitude, crs) = fields
        .get(FieldKey::Coordinates)
        .map(parse_coordinates)
        .unwrap_or((0.0, 0.0, String::new()));

    WellRecord {
        api_number: api_number.clone(),
        operator: text(FieldKey::Operator),
        status: text(FieldKey::Status),
        well_type: text(FieldKey::WellType),
        work_type: text(FieldKey::WorkType),
        directional_status: text(FieldKey::DirectionalStatus),
        multi_lateral: text(FieldKey::MultiLateral),
        mineral_owner: text(FieldKey::MineralOwner),
        surface_owner: text(FieldKey::SurfaceOwner),
        surface_location: surface_location(fields),
        gl_elevation: number(FieldKey::GlElevation),
        kb_elevation: number(FieldKey::KbElevation),
        df_elevation: number(FieldKey::DfElevation),
        single_multiple_completion: text(FieldKey::Completions),
        potash_waiver: text(FieldKey::PotashWaiver),
        spud_date: date(FieldKey::SpudDate),
        last_inspection: date(FieldKey::LastInspectionDate),
        tvd: number(FieldKey::TrueVerticalDepth),
        latitude,
        longitude,
        crs,
    }
}

/// Parse a number, ignoring thousands separators; `0.0` on failure
///
/// ```
/// use wells_extractor::normalizer::parse_number;
///
/// assert_eq!(parse_number(" 3,456.5 "), 3456.5);
/// assert_eq!(parse_number("N/A"), 0.0);
/// ```
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a date as UTC; [`min_date`] on failure
pub fn parse_date(raw: &str) -> DateTime<Utc> {
    let raw = raw.trim();
    if raw.is_empty() {
        return min_date();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return dt.and_utc();
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return dt.and_utc();
            }
        }
    }

    min_date()
}

/// Split a combined coordinates string into latitude, longitude and CRS
///
/// Tokens are separated by commas and/or whitespace. The first two tokens are
/// latitude and longitude (each `0.0` if missing or unparsable); the rest,
/// joined by single spaces, is the CRS label.
///
/// ```
/// use wells_extractor::normalizer::parse_coordinates;
///
/// let (lat, lon, crs) = parse_coordinates("32.3214, -103.7456 NAD83");
/// assert_eq!((lat, lon, crs.as_str()), (32.3214, -103.7456, "NAD83"));
/// ```
pub fn parse_coordinates(raw: &str) -> (f64, f64, String) {
    let tokens: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let latitude = tokens.first().map(|t| parse_number(t)).unwrap_or(0.0);
    let longitude = tokens.get(1).map(|t| parse_number(t)).unwrap_or(0.0);
    let crs = tokens.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();

    (latitude, longitude, crs)
}

/// Join the surface location components, skipping absent or empty ones
pub fn surface_location(fields: &FieldMap) -> String {
    SURFACE_LOCATION_PARTS
        .iter()
        .filter_map(|key| fields.non_empty(*key))
        .collect::<Vec<_>>()
        .join(SURFACE_LOCATION_SEPARATOR)
}
