/// LCRA Hydromet API client.
///
/// Retrieves flood status data from the Lower Colorado River Authority
/// Hydromet API and assembles it into domain records:
///
///   FloodStatus/GetLakeLevelsGateOps — lake levels + floodgate operations
///   GetForecastReferences            — river conditions at forecast gauges
///   FloodStatus/GetNarrativeSummary  — operations narrative + last update
///
/// Base URL: https://hydromet.lcra.org/api/
///
/// The API has no published schema and its field formatting drifts between
/// endpoints and over time, so every measurement field deserializes as a
/// raw `serde_json::Value` and goes through `normalize` on the way into a
/// record. Parsing is split from fetching so the fixtures can exercise the
/// full assembly path offline.

use crate::config::ServiceConfig;
use crate::model::{
    DataSource, FloodgateOperation, HydrometError, LakeLevel, RiverCondition,
};
use crate::normalize::{normalize_number, normalize_timestamp};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const LAKE_LEVELS_GATE_OPS_ENDPOINT: &str = "FloodStatus/GetLakeLevelsGateOps";
pub const FORECAST_REFERENCES_ENDPOINT: &str = "GetForecastReferences";
pub const NARRATIVE_SUMMARY_ENDPOINT: &str = "FloodStatus/GetNarrativeSummary";

// ---------------------------------------------------------------------------
// Serde structures for Hydromet JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LakeLevelsGateOpsResponse {
    #[serde(default)]
    records: Vec<LakeGateRecord>,
}

/// One row of the combined lake levels / gate operations table. Every
/// measurement arrives as string, number, or null interchangeably.
#[derive(Deserialize, Default)]
#[serde(default)]
struct LakeGateRecord {
    dam: Option<String>,
    lake: Option<String>,
    #[serde(rename = "lastDataUpdate")]
    last_data_update: Option<String>,
    head: Option<Value>,
    tail: Option<Value>,
    #[serde(rename = "gateOps")]
    gate_ops: Option<String>,
    #[serde(rename = "lastUpdate")]
    last_update: Option<String>,
    inflows: Option<Value>,
    forecast: Option<String>,
}

#[derive(Deserialize)]
struct ForecastReferencesResponse {
    #[serde(default)]
    sites: Vec<ForecastSite>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ForecastSite {
    location: Option<String>,
    stage: Option<Value>,
    flow: Option<Value>,
    bankfull: Option<Value>,
    #[serde(rename = "floodStage")]
    flood_stage: Option<Value>,
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct NarrativeRecord {
    #[serde(rename = "lastUpdate")]
    last_update: Option<String>,
    // "narrive_sum" is the upstream API's field name, typo and all.
    #[serde(rename = "narrive_sum")]
    narrative_summary: Option<String>,
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a GetLakeLevelsGateOps JSON body into one `LakeLevel` per record.
///
/// # Errors
/// `HydrometError::ParseError` — malformed or structurally unexpected JSON.
/// Field-level oddities (sentinels, blank timestamps, unit suffixes) are
/// not errors; they normalize to `None` on the affected field.
pub fn parse_lake_levels_response(json: &str) -> Result<Vec<LakeLevel>, HydrometError> {
    let response: LakeLevelsGateOpsResponse = serde_json::from_str(json)
        .map_err(|e| HydrometError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let mut levels = Vec::new();
    for record in response.records {
        levels.push(LakeLevel {
            dam_lake_name: format!(
                "{}/{}",
                record.dam.as_deref().unwrap_or(""),
                record.lake.as_deref().unwrap_or("")
            ),
            measurement_time: normalize_timestamp(record.last_data_update.as_deref()),
            head_elevation: normalize_number(record.head.as_ref()),
            tail_elevation: normalize_number(record.tail.as_ref()),
            gate_operations: record.gate_ops,
        });
    }

    Ok(levels)
}

/// Parses the same GetLakeLevelsGateOps body into one `FloodgateOperation`
/// per record. The endpoint serves both views; only the field selection
/// differs.
pub fn parse_floodgate_operations_response(
    json: &str,
) -> Result<Vec<FloodgateOperation>, HydrometError> {
    let response: LakeLevelsGateOpsResponse = serde_json::from_str(json)
        .map_err(|e| HydrometError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let mut operations = Vec::new();
    for record in response.records {
        operations.push(FloodgateOperation {
            dam_name: record
                .dam
                .clone()
                .unwrap_or_else(|| "Unknown Dam".to_string()),
            last_update: normalize_timestamp(record.last_update.as_deref()),
            inflows: normalize_number(record.inflows.as_ref()),
            gate_operations: record.gate_ops,
            lake_level_forecast: record.forecast,
            current_elevation: normalize_number(record.head.as_ref()),
        });
    }

    Ok(operations)
}

/// Parses a GetForecastReferences JSON body into one `RiverCondition` per
/// site.
pub fn parse_river_conditions_response(
    json: &str,
) -> Result<Vec<RiverCondition>, HydrometError> {
    let response: ForecastReferencesResponse = serde_json::from_str(json)
        .map_err(|e| HydrometError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let mut conditions = Vec::new();
    for site in response.sites {
        conditions.push(RiverCondition {
            location: site.location.unwrap_or_default(),
            current_stage: normalize_number(site.stage.as_ref()),
            current_flow: normalize_number(site.flow.as_ref()),
            bankfull_stage: normalize_number(site.bankfull.as_ref()),
            flood_stage: normalize_number(site.flood_stage.as_ref()),
            // The feed exposes no separate action stage; the bankfull figure
            // is reused for both fields.
            // TODO: check whether GetForecastReferences ever grows a distinct
            // action stage field and split these if it does.
            action_stage: normalize_number(site.bankfull.as_ref()),
            measurement_time: normalize_timestamp(site.date_time.as_deref()),
            data_source: DataSource::Lcra,
        });
    }

    Ok(conditions)
}

/// Parses a GetNarrativeSummary JSON body (an array; only the first element
/// carries data) into the narrative text and its last-update time. An empty
/// array yields `(None, None)`.
pub fn parse_narrative_response(
    json: &str,
) -> Result<(Option<NaiveDateTime>, Option<String>), HydrometError> {
    let records: Vec<NarrativeRecord> = serde_json::from_str(json)
        .map_err(|e| HydrometError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let Some(record) = records.into_iter().next() else {
        return Ok((None, None));
    };

    Ok((
        normalize_timestamp(record.last_update.as_deref()),
        record.narrative_summary,
    ))
}

// ---------------------------------------------------------------------------
// HTTP fetching
// ---------------------------------------------------------------------------

/// Builds the shared blocking HTTP client with the configured timeout.
pub fn build_client(config: &ServiceConfig) -> Result<reqwest::blocking::Client, HydrometError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| HydrometError::RequestError(format!("Failed to build HTTP client: {}", e)))
}

fn fetch_endpoint(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
    endpoint: &str,
) -> Result<String, HydrometError> {
    let url = format!("{}/api/{}", config.base_url, endpoint);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| HydrometError::RequestError(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(HydrometError::RequestError(format!(
            "Hydromet API error for {}: {}",
            endpoint,
            response.status()
        )));
    }

    response
        .text()
        .map_err(|e| HydrometError::RequestError(format!("Failed to read {}: {}", url, e)))
}

/// Fetches and assembles current lake levels.
pub fn fetch_lake_levels(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<Vec<LakeLevel>, HydrometError> {
    let body = fetch_endpoint(client, config, LAKE_LEVELS_GATE_OPS_ENDPOINT)?;
    parse_lake_levels_response(&body)
}

/// Fetches and assembles current river conditions.
pub fn fetch_river_conditions(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<Vec<RiverCondition>, HydrometError> {
    let body = fetch_endpoint(client, config, FORECAST_REFERENCES_ENDPOINT)?;
    parse_river_conditions_response(&body)
}

/// Fetches and assembles current floodgate operations.
pub fn fetch_floodgate_operations(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<Vec<FloodgateOperation>, HydrometError> {
    let body = fetch_endpoint(client, config, LAKE_LEVELS_GATE_OPS_ENDPOINT)?;
    parse_floodgate_operations_response(&body)
}

/// Fetches the operations narrative and its last-update time.
pub fn fetch_narrative_summary(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Result<(Option<NaiveDateTime>, Option<String>), HydrometError> {
    let body = fetch_endpoint(client, config, NARRATIVE_SUMMARY_ENDPOINT)?;
    parse_narrative_response(&body)
}

// ---------------------------------------------------------------------------
// Degrading entry points
// ---------------------------------------------------------------------------
//
// Report assembly must survive any single endpoint being down or returning
// garbage: these wrappers log the failure and contribute an empty section
// instead of failing the caller.

pub fn scrape_lake_levels(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Vec<LakeLevel> {
    match fetch_lake_levels(client, config) {
        Ok(levels) => levels,
        Err(e) => {
            eprintln!("Error fetching lake levels: {}", e);
            Vec::new()
        }
    }
}

pub fn scrape_river_conditions(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Vec<RiverCondition> {
    match fetch_river_conditions(client, config) {
        Ok(conditions) => conditions,
        Err(e) => {
            eprintln!("Error fetching river conditions: {}", e);
            Vec::new()
        }
    }
}

pub fn scrape_floodgate_operations(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> Vec<FloodgateOperation> {
    match fetch_floodgate_operations(client, config) {
        Ok(operations) => operations,
        Err(e) => {
            eprintln!("Error fetching floodgate operations: {}", e);
            Vec::new()
        }
    }
}

pub fn scrape_narrative_summary(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> (Option<NaiveDateTime>, Option<String>) {
    match fetch_narrative_summary(client, config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error fetching narrative summary: {}", e);
            (None, None)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
