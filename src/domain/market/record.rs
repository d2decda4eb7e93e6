use serde::{Deserialize, Serialize};

/// One open-interest snapshot row as delivered by the daily JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OiRecord {
    pub symbol: String,
    pub underlying: String,
    pub underlying_value: f64,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub expiry_date: String,
    // Missing totals count as zero
    #[serde(rename = "ceCOITotal", default)]
    pub ce_coi_total: f64,
    #[serde(rename = "peCOITotal", default)]
    pub pe_coi_total: f64,
}
