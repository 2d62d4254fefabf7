/// Full flood operations report assembly.
///
/// Collects every flood status endpoint (narrative summary, lake levels,
/// river conditions, floodgate operations) on a small thread pool and
/// assembles the results into one `FloodOperationsReport`. The endpoints
/// are independent, so the slowest one bounds wall-clock time instead of
/// their sum.
///
/// A failed endpoint contributes its empty section (the degrading
/// `scrape_*` entry points log and swallow); the report always
/// materializes.

use crate::config::ServiceConfig;
use crate::ingest::lcra;
use crate::model::{
    FloodOperationsReport, FloodgateOperation, LakeLevel, RiverCondition,
};
use chrono::{Local, NaiveDateTime};
use std::sync::mpsc;
use threadpool::ThreadPool;

/// One worker per endpoint.
const COLLECTOR_THREADS: usize = 4;

/// Result of one endpoint collection job.
enum Section {
    Narrative(Option<NaiveDateTime>, Option<String>),
    LakeLevels(Vec<LakeLevel>),
    RiverConditions(Vec<RiverCondition>),
    FloodgateOperations(Vec<FloodgateOperation>),
}

/// Fetches all flood status endpoints concurrently and assembles the
/// complete report. Never fails: endpoint errors have already degraded to
/// empty sections by the time assembly runs.
pub fn build_report(
    client: &reqwest::blocking::Client,
    config: &ServiceConfig,
) -> FloodOperationsReport {
    let pool = ThreadPool::new(COLLECTOR_THREADS);
    let (tx, rx) = mpsc::channel();

    {
        let tx = tx.clone();
        let client = client.clone();
        let config = config.clone();
        pool.execute(move || {
            let (last_update, narrative) = lcra::scrape_narrative_summary(&client, &config);
            let _ = tx.send(Section::Narrative(last_update, narrative));
        });
    }
    {
        let tx = tx.clone();
        let client = client.clone();
        let config = config.clone();
        pool.execute(move || {
            let _ = tx.send(Section::LakeLevels(lcra::scrape_lake_levels(&client, &config)));
        });
    }
    {
        let tx = tx.clone();
        let client = client.clone();
        let config = config.clone();
        pool.execute(move || {
            let _ = tx.send(Section::RiverConditions(lcra::scrape_river_conditions(
                &client, &config,
            )));
        });
    }
    {
        let client = client.clone();
        let config = config.clone();
        pool.execute(move || {
            let _ = tx.send(Section::FloodgateOperations(
                lcra::scrape_floodgate_operations(&client, &config),
            ));
        });
    }

    // All senders moved into the jobs above; the receiver drains until the
    // last job hangs up.
    let mut report = empty_report();
    for section in rx {
        apply_section(&mut report, section);
    }
    pool.join();

    report
}

fn empty_report() -> FloodOperationsReport {
    FloodOperationsReport {
        report_time: Local::now().naive_local(),
        last_update: None,
        narrative_summary: None,
        lake_levels: Vec::new(),
        river_conditions: Vec::new(),
        river_forecasts: Vec::new(),
        floodgate_operations: Vec::new(),
    }
}

fn apply_section(report: &mut FloodOperationsReport, section: Section) {
    match section {
        Section::Narrative(last_update, narrative) => {
            report.last_update = last_update;
            report.narrative_summary = narrative;
        }
        Section::LakeLevels(levels) => report.lake_levels = levels,
        Section::RiverConditions(conditions) => report.river_conditions = conditions,
        Section::FloodgateOperations(operations) => report.floodgate_operations = operations,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
