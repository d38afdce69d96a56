//! Field keys - the fixed set of values scraped from a well details page
//!
//! Each key maps to the stable element id the upstream page renders the value
//! into. Only a subset feeds [`WellRecord`](crate::WellRecord); the rest are
//! extracted for completeness.

use std::collections::HashMap;

const GENERAL: &str = "ctl00_ctl00__main_main_ucGeneralWellInformation_";
const LOCATION: &str = "ctl00_ctl00__main_main_ucGeneralWellInformation_Location_";

macro_rules! field_keys {
    ($( $variant:ident => ($name:literal, $prefix:ident, $suffix:literal) ),+ $(,)?) => {
        /// A recognised field of the well details page
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(missing_docs)]
        pub enum FieldKey {
            $( $variant, )+
        }

        impl FieldKey {
            /// Every recognised key, in page order
            pub const ALL: &'static [FieldKey] = &[ $( FieldKey::$variant, )+ ];

            /// Stable field name (e.g. `"GLElevation"`)
            pub fn name(&self) -> &'static str {
                match self {
                    $( FieldKey::$variant => $name, )+
                }
            }

            /// Element id the value is rendered into on the upstream page
            pub fn element_id(&self) -> String {
                match self {
                    $( FieldKey::$variant => format!("{}{}", $prefix, $suffix), )+
                }
            }
        }
    };
}

field_keys! {
    // General well information
    Operator => ("Operator", GENERAL, "lblOperator"),
    Status => ("Status", GENERAL, "lblStatus"),
    WellType => ("WellType", GENERAL, "lblWellType"),
    WorkType => ("WorkType", GENERAL, "lblWorkType"),
    DirectionalStatus => ("DirectionalStatus", GENERAL, "lblDirectionalStatus"),
    MultiLateral => ("MultiLateral", GENERAL, "lblMultiLateral"),
    MineralOwner => ("MineralOwner", GENERAL, "lblMineralOwner"),
    SurfaceOwner => ("SurfaceOwner", GENERAL, "lblSurfaceOwner"),

    // Location
    Location => ("Location", LOCATION, "lblLocation"),
    LocationText => ("LocationText", LOCATION, "lblText"),
    Lot => ("Lot", LOCATION, "lblLot"),
    FootageNsh => ("FootageNSH", LOCATION, "lblFootageNSH"),
    FootageEw => ("FootageEW", LOCATION, "lblFootageEW"),
    Coordinates => ("Coordinates", LOCATION, "lblCoordinates"),

    // Elevations
    GlElevation => ("GLElevation", GENERAL, "lblGLElevation"),
    KbElevation => ("KBElevation", GENERAL, "lblKBElevation"),
    DfElevation => ("DFElevation", GENERAL, "lblDFElevation"),

    // Well details
    Completions => ("Completions", GENERAL, "lblCompletions"),
    PotashWaiver => ("PotashWaiver", GENERAL, "lblPotashWaiver"),
    ProposedFormation => ("ProposedFormation", GENERAL, "lblProposedFormation"),
    ProposedDepth => ("ProposedDepth", GENERAL, "lblProposedDepth"),
    MeasuredVerticalDepth => ("MeasuredVerticalDepth", GENERAL, "lblMeasuredVerticalDepth"),
    TrueVerticalDepth => ("TrueVerticalDepth", GENERAL, "lblTrueVerticalDepth"),
    // upstream id really is spelled "Dpth"
    PlugbackMeasuredDepth => ("PlugbackMeasuredDepth", GENERAL, "lblPlugbackMeasuredDpth"),

    // Dates
    ApdInitialApprovalDate => ("ApdInitialApprovalDate", GENERAL, "lblApdInitialApprovalDate"),
    ApdEffectiveDate => ("ApdEffectiveDate", GENERAL, "lblApdEffectiveDate"),
    ApdCancellationDate => ("ApdCancellationDate", GENERAL, "lblApdCancellationDate"),
    ApdExtensionApprovalEffectiveDate => ("ApdExtensionApprovalEffectiveDate", GENERAL, "lblApdExtensionApprovalEffectiveDate"),
    SpudDate => ("SpudDate", GENERAL, "lblSpudDate"),
    TaDate => ("TADate", GENERAL, "lblTADate"),
    ShutInWaitingForPipelineDate => ("ShutInWaitingForPipelineDate", GENERAL, "lblShutInWaitingForPipelineDate"),
    PluggedAbandonedDateIntent => ("PluggedAbandonedDateIntent", GENERAL, "lblPluggedAbandonedDateIntent"),
    PluggedDate => ("PluggedDate", GENERAL, "lblPluggedDate"),
    SiteReleaseDate => ("SiteReleaseDate", GENERAL, "lblSiteReleaseDate"),
    LastInspectionDate => ("LastInspectionDate", GENERAL, "lblLastInspectionDate"),
    LastInspectionDateLabel => ("LastInspectionDateLabel", GENERAL, "lblLastInspectionDateLable"),
    ApdExpirationDate => ("ApdExpirationDate", GENERAL, "lblApdExpirationDate"),
    GasCapturePlanDate => ("GasCapturePlanDate", GENERAL, "lblGasCapturePlanDate"),
    TaExpirationDate => ("TAExpirationDate", GENERAL, "lblTAExpirationDate"),
    PluggedNotReleasedExpirationDate => ("PluggedNotReleasedExpirationDate", GENERAL, "lblPluggedNotReleasedExpirationDate"),
    LastMitDate => ("LastMitDate", GENERAL, "lblLastMitDate"),
}

/// Extracted field values for one document
///
/// A key that is missing from the map was absent from the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    values: HashMap<FieldKey, String>,
}

impl FieldMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a key
    pub fn insert(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Raw value for a key, if it was present in the document
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Value for a key, treating an empty string as absent
    pub fn non_empty(&self, key: FieldKey) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Number of keys with a value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no key has a value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FieldKey, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_keys_enumerated() {
        assert_eq!(FieldKey::ALL.len(), 41);
        assert_eq!(FieldKey::ALL[0], FieldKey::Operator);
        assert_eq!(*FieldKey::ALL.last().unwrap(), FieldKey::LastMitDate);
    }

    #[test]
    fn test_element_ids_are_unique() {
        let ids: HashSet<String> = FieldKey::ALL.iter().map(|k| k.element_id()).collect();
        assert_eq!(ids.len(), FieldKey::ALL.len());
    }

    #[test]
    fn test_element_id_prefixes() {
        assert_eq!(
            FieldKey::GlElevation.element_id(),
            "ctl00_ctl00__main_main_ucGeneralWellInformation_lblGLElevation"
        );
        assert_eq!(
            FieldKey::Coordinates.element_id(),
            "ctl00_ctl00__main_main_ucGeneralWellInformation_Location_lblCoordinates"
        );
    }

    #[test]
    fn test_names_are_unique() {
        let names: std::collections::HashSet<_> = FieldKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), FieldKey::ALL.len());
    }

    #[test]
    fn test_field_map_non_empty() {
        let mut map = FieldMap::new();
        map.insert(FieldKey::Lot, "");
        map.insert(FieldKey::Location, "L");

        assert_eq!(map.get(FieldKey::Lot), Some(""));
        assert_eq!(map.non_empty(FieldKey::Lot), None);
        assert_eq!(map.non_empty(FieldKey::Location), Some("L"));
        assert_eq!(map.get(FieldKey::Operator), None);
        assert_eq!(map.len(), 2);
    }
}
