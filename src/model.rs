/// Shared data types for the Hydromet flood status service.
///
/// Defines the domain records assembled from the LCRA Hydromet API
/// (lake levels, river conditions, floodgate operations, the full flood
/// operations report) and the crate error type. Raw API field extraction
/// and normalization live in `ingest::lcra` and `normalize`; everything
/// downstream of assembly works with these types only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

// ---------------------------------------------------------------------------
// Data provenance
// ---------------------------------------------------------------------------

/// Origin of a record. Currently everything comes from the LCRA Hydromet
/// API; NWS river forecasts may join later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "LCRA")]
    Lcra,
}

// ---------------------------------------------------------------------------
// Domain records
// ---------------------------------------------------------------------------

/// Current level reading at one dam/lake pair.
///
/// Optional fields reflect the upstream feed, which routinely leaves
/// measurements blank or sentinel-valued for lakes without active gauges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LakeLevel {
    /// Formatted `"{dam}/{lake}"`, e.g. `"Mansfield/Travis"`.
    pub dam_lake_name: String,
    pub measurement_time: Option<NaiveDateTime>,
    /// Headwater elevation in feet above mean sea level.
    pub head_elevation: Option<f64>,
    /// Tailwater elevation in feet above mean sea level.
    pub tail_elevation: Option<f64>,
    /// Freeform gate operations text, passed through verbatim.
    pub gate_operations: Option<String>,
}

/// Current stage and flow at one river gauge, with its reference stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverCondition {
    pub location: String,
    /// Stage in feet.
    pub current_stage: Option<f64>,
    /// Flow in cubic feet per second.
    pub current_flow: Option<f64>,
    pub bankfull_stage: Option<f64>,
    pub flood_stage: Option<f64>,
    pub action_stage: Option<f64>,
    pub measurement_time: Option<NaiveDateTime>,
    pub data_source: DataSource,
}

/// Gate operations status for one dam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodgateOperation {
    pub dam_name: String,
    pub last_update: Option<NaiveDateTime>,
    /// Inflows in cubic feet per second.
    pub inflows: Option<f64>,
    pub gate_operations: Option<String>,
    /// Freeform lake level forecast text, passed through verbatim.
    pub lake_level_forecast: Option<String>,
    /// Current headwater elevation in feet.
    pub current_elevation: Option<f64>,
}

/// Forecast stage for one river gauge. The upstream feed publishes no
/// forecast records at present; reports carry an empty list so the schema
/// stays stable if the feed starts publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverForecast {
    pub location: String,
    pub forecast_stage: Option<f64>,
    pub forecast_time: Option<NaiveDateTime>,
    pub data_source: DataSource,
}

/// Complete flood operations report: everything the Hydromet flood status
/// endpoints publish, assembled in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodOperationsReport {
    /// When this report was assembled (local time).
    pub report_time: NaiveDateTime,
    /// When the agency last updated its operations narrative.
    pub last_update: Option<NaiveDateTime>,
    pub narrative_summary: Option<String>,
    pub lake_levels: Vec<LakeLevel>,
    pub river_conditions: Vec<RiverCondition>,
    pub river_forecasts: Vec<RiverForecast>,
    pub floodgate_operations: Vec<FloodgateOperation>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the fetch and parse layers. Field-level normalization never
/// produces these: an unparseable field is `None`, not an error.
#[derive(Debug)]
pub enum HydrometError {
    /// Transport-level failure talking to the Hydromet API.
    RequestError(String),
    /// Malformed or structurally unexpected API payload.
    ParseError(String),
}

impl fmt::Display for HydrometError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HydrometError::RequestError(msg) => write!(f, "Hydromet API request failed: {}", msg),
            HydrometError::ParseError(msg) => write!(f, "Hydromet API parse failed: {}", msg),
        }
    }
}

impl Error for HydrometError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_serializes_as_agency_code() {
        let json = serde_json::to_string(&DataSource::Lcra).unwrap();
        assert_eq!(json, r#""LCRA""#);
    }

    #[test]
    fn test_error_display_includes_detail() {
        let err = HydrometError::ParseError("unexpected token".to_string());
        assert!(
            err.to_string().contains("unexpected token"),
            "display should carry the detail, got: {}",
            err
        );
    }

    #[test]
    fn test_lake_level_json_round_trip() {
        let level = LakeLevel {
            dam_lake_name: "Mansfield/Travis".to_string(),
            measurement_time: chrono::NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(13, 45, 0),
            head_elevation: Some(681.3),
            tail_elevation: None,
            gate_operations: Some("No floodgates open".to_string()),
        };

        let json = serde_json::to_string(&level).unwrap();
        let back: LakeLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }
}
