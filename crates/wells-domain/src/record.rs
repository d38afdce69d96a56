//! Well record - the persisted entity

use crate::{ApiNumber, Coordinate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds from the Unix epoch back to 0001-01-01T00:00:00Z
const MIN_DATE_TIMESTAMP: i64 = -62_135_596_800;

/// The date used when a source date is absent or unparsable
///
/// ```
/// use wells_domain::record::min_date;
///
/// assert_eq!(min_date().to_rfc3339(), "0001-01-01T00:00:00+00:00");
/// ```
pub fn min_date() -> DateTime<Utc> {
    DateTime::from_timestamp(MIN_DATE_TIMESTAMP, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A normalized well record
///
/// Created once by ingestion and never mutated afterwards. Text fields are
/// empty when the source omitted them; numbers default to `0.0` and dates to
/// [`min_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// API number (natural key)
    pub api_number: ApiNumber,

    /// Operating company
    pub operator: String,

    /// Regulatory status (e.g. "Active")
    pub status: String,

    /// Well type (e.g. "Oil")
    pub well_type: String,

    /// Work type (e.g. "New")
    pub work_type: String,

    /// Directional status (e.g. "Horizontal")
    pub directional_status: String,

    /// Multi-lateral flag as rendered upstream
    pub multi_lateral: String,

    /// Mineral owner
    pub mineral_owner: String,

    /// Surface owner
    pub surface_owner: String,

    /// Composite location, footage and lot description
    pub surface_location: String,

    /// Ground level elevation
    pub gl_elevation: f64,

    /// Kelly bushing elevation
    pub kb_elevation: f64,

    /// Derrick floor elevation
    pub df_elevation: f64,

    /// Single or multiple completion
    pub single_multiple_completion: String,

    /// Potash waiver flag as rendered upstream
    pub potash_waiver: String,

    /// Spud date
    pub spud_date: DateTime<Utc>,

    /// Date of the last inspection
    pub last_inspection: DateTime<Utc>,

    /// True vertical depth
    pub tvd: f64,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Coordinate reference system label (e.g. "NAD83")
    pub crs: String,
}

impl WellRecord {
    /// Create a record with every attribute at its default value
    pub fn new(api_number: ApiNumber) -> Self {
        Self {
            api_number,
            operator: String::new(),
            status: String::new(),
            well_type: String::new(),
            work_type: String::new(),
            directional_status: String::new(),
            multi_lateral: String::new(),
            mineral_owner: String::new(),
            surface_owner: String::new(),
            surface_location: String::new(),
            gl_elevation: 0.0,
            kb_elevation: 0.0,
            df_elevation: 0.0,
            single_multiple_completion: String::new(),
            potash_waiver: String::new(),
            spud_date: min_date(),
            last_inspection: min_date(),
            tvd: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            crs: String::new(),
        }
    }

    /// The record's position
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// False when both coordinates fell back to zero
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}
