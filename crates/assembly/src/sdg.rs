//! Static SDG label table

use serde::Serialize;

/// UN labels for SDG 1 through 17, indexed by `sdg_id - 1`
const SDG_LABELS: [&str; 17] = [
    "No Poverty",
    "Zero Hunger",
    "Good Health and Well-being",
    "Quality Education",
    "Gender Equality",
    "Clean Water and Sanitation",
    "Affordable and Clean Energy",
    "Decent Work and Economic Growth",
    "Industry, Innovation and Infrastructure",
    "Reduced Inequalities",
    "Sustainable Cities and Communities",
    "Responsible Consumption and Production",
    "Climate Action",
    "Life Below Water",
    "Life on Land",
    "Peace, Justice and Strong Institutions",
    "Partnerships for the Goals",
];

pub const UNKNOWN_SDG: &str = "Unknown SDG";

/// Label for a known SDG id
pub fn sdg_label(sdg_id: i32) -> Option<&'static str> {
    usize::try_from(sdg_id)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| SDG_LABELS.get(i).copied())
}

/// `"SDG <n> - <label>"`, with a placeholder label for ids outside 1..=17
pub fn sdg_display_name(sdg_id: i32) -> String {
    format!("SDG {} - {}", sdg_id, sdg_label(sdg_id).unwrap_or(UNKNOWN_SDG))
}

/// One entry of the public SDG reference listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdgReference {
    pub sdg_id: i32,
    pub name: &'static str,
}

pub fn sdg_reference() -> Vec<SdgReference> {
    (1..)
        .zip(SDG_LABELS.iter())
        .map(|(sdg_id, &name)| SdgReference { sdg_id, name })
        .collect()
}

/// Reference entry for a single goal, `None` outside 1..=17
pub fn sdg_reference_entry(sdg_id: i32) -> Option<SdgReference> {
    sdg_label(sdg_id).map(|name| SdgReference { sdg_id, name })
}
