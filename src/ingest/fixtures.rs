/// Test fixtures: representative JSON payloads from the LCRA Hydromet API.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers. They reflect the real envelopes returned
/// by the flood status endpoints:
///
///   FloodStatus/GetLakeLevelsGateOps
///     .records[] — one row per dam/lake pair; feeds lake levels AND
///                  floodgate operations
///   GetForecastReferences
///     .sites[]   — one row per forecast reference gauge
///   FloodStatus/GetNarrativeSummary
///     top-level array; first element carries "lastUpdate" and
///     "narrive_sum" (the field name typo is the API's)
///
/// Note: measurement fields arrive as strings, numbers, or null with no
/// consistency between rows. The same column can be `681.3` in one row,
/// `"681.30"` in the next, and `"/"` in a third. Fixtures deliberately mix
/// these shapes. Timestamps likewise mix ISO-with-offset, slash dates with
/// meridiem, and sentinel values.

/// Three dam/lake rows: clean ISO data (Mansfield), sentinel-laden row
/// (Starcke), and string-typed values with comma grouping and unit
/// suffixes (Buchanan).
#[cfg(test)]
pub(crate) fn fixture_lake_levels_gate_ops_json() -> &'static str {
    r#"{
      "records": [
        {
          "dam": "Mansfield",
          "lake": "Travis",
          "lastDataUpdate": "2024-01-05T13:45:00-06:00",
          "head": "681.30",
          "tail": 492.81,
          "gateOps": "No floodgates open",
          "lastUpdate": "1/5/2024 2:00 PM",
          "inflows": 1250,
          "forecast": "Expected to remain near 681 ft"
        },
        {
          "dam": "Starcke",
          "lake": "Marble Falls",
          "lastDataUpdate": "/",
          "head": "N/A",
          "tail": "/",
          "gateOps": null,
          "lastUpdate": "",
          "inflows": "--",
          "forecast": "/"
        },
        {
          "dam": "Buchanan",
          "lake": "Buchanan",
          "lastDataUpdate": "1/5/2024 1:30 PM",
          "head": "1,018.22 ft",
          "tail": "889.10",
          "gateOps": "2 gates open 1 ft",
          "lastUpdate": "1/5/2024 1:30:00 PM",
          "inflows": "12,450",
          "forecast": null
        }
      ]
    }"#
}

/// A row with no "dam" field at all; the gate ops view substitutes a
/// placeholder name.
#[cfg(test)]
pub(crate) fn fixture_nameless_dam_json() -> &'static str {
    r#"{
      "records": [
        {
          "lake": "LBJ",
          "lastUpdate": "1/5/2024 1:45 PM",
          "inflows": "540",
          "gateOps": "No floodgates open"
        }
      ]
    }"#
}

/// GetLakeLevelsGateOps with an empty records array (quiet day, no rows).
#[cfg(test)]
pub(crate) fn fixture_empty_records_json() -> &'static str {
    r#"{ "records": [] }"#
}

/// Forecast reference gauges: Austin with mixed string/number values,
/// Bastrop with sentinels and nulls, Wharton fully numeric.
#[cfg(test)]
pub(crate) fn fixture_forecast_references_json() -> &'static str {
    r#"{
      "sites": [
        {
          "location": "Colorado River at Austin",
          "stage": "4.2",
          "flow": "1,150",
          "bankfull": 12.0,
          "floodStage": "21.0 ft",
          "dateTime": "2024-01-05 13:45"
        },
        {
          "location": "Colorado River at Bastrop",
          "stage": "--",
          "flow": null,
          "bankfull": "15",
          "floodStage": 24,
          "dateTime": ""
        },
        {
          "location": "Colorado River at Wharton",
          "stage": 8.6,
          "flow": 2300,
          "bankfull": 30.1,
          "floodStage": 39.0,
          "dateTime": "1/5/2024 1:45:00 PM"
        }
      ]
    }"#
}

/// Narrative summary payload: a top-level array whose first element holds
/// the operations text under the API's misspelled "narrive_sum" key.
#[cfg(test)]
pub(crate) fn fixture_narrative_summary_json() -> &'static str {
    r#"[
      {
        "lastUpdate": "1/5/2024 1:45 PM",
        "narrive_sum": "LCRA is conducting flood operations at Mansfield Dam. Floodgate releases are expected to continue through the weekend as inflows from the Llano River recede."
      }
    ]"#
}
