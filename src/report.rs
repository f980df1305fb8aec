use std::io::Write;

use junit_report::{Duration, ReportBuilder, TestCaseBuilder, TestSuiteBuilder};
use log::info;
use num_format::{Locale, ToFormattedString};
use prettytable::{Cell, Row, Table};

use crate::config::OracleConfig;
use crate::env::Environment;
use crate::error::OracleError;
use crate::transaction::Side;
use crate::OracleResult;

/// One finished run, as it goes into the JUnit report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub name: String,
    pub result: OracleResult,
    pub time_secs: f64,
}

fn fmt_count<T: ToFormattedString>(n: T) -> String {
    n.to_formatted_string(&Locale::en)
}

pub fn summary_table(env: &Environment) -> Table {
    let policy = env.residue_policy();
    let mut table = Table::new();
    table.set_titles(Row::new(
        ["scoreboard", "expected", "received", "matched", "errors", "residue", "result"]
            .iter()
            .map(|h| Cell::new(h))
            .collect(),
    ));
    for side in [Side::Write, Side::Read] {
        let sb = env.scoreboard(side);
        let stats = sb.stats();
        let result = match sb.passed(policy) {
            true => "passed",
            false => "failed",
        };
        table.add_row(Row::new(vec![
            Cell::new(&sb.name()),
            Cell::new(&fmt_count(stats.expected)),
            Cell::new(&fmt_count(stats.received)),
            Cell::new(&fmt_count(stats.matched)),
            Cell::new(&fmt_count(stats.errors)),
            Cell::new(&fmt_count(stats.residue())),
            Cell::new(result),
        ]));
    }

    let prd = env.predictor();
    let stats = prd.stats();
    table.add_row(Row::new(vec![
        Cell::new(prd.name()),
        Cell::new(&format!("accepted={}", fmt_count(stats.accepted))),
        Cell::new(&format!("dropped={}", fmt_count(stats.dropped))),
        Cell::new(&format!("served={}", fmt_count(stats.served))),
        Cell::new(&format!("empty_reads={}", fmt_count(stats.empty_reads))),
        Cell::new(&format!("pending={}", fmt_count(prd.occupancy()))),
        Cell::new(&format!("depth={}", fmt_count(prd.depth()))),
    ]));
    table
}

pub fn log_summary(env: &Environment) {
    info!("run summary:\n{}", summary_table(env));
}

pub fn write_junit<W: Write>(
    records: &[RunRecord],
    suite: &str,
    sink: W,
) -> Result<(), OracleError> {
    let mut test_cases = Vec::new();
    for r in records {
        let tc = match &r.result {
            Ok(_) => TestCaseBuilder::success(&r.name, Duration::seconds_f64(r.time_secs)),
            Err(e) => TestCaseBuilder::failure(
                &r.name,
                Duration::seconds_f64(r.time_secs),
                "failure",
                e,
            ),
        }
        .build();
        test_cases.push(tc);
    }

    let test_suite = TestSuiteBuilder::new(suite)
        .add_testcases(test_cases)
        .build();
    let report = ReportBuilder::new().add_testsuite(test_suite).build();
    report
        .write_xml(sink)
        .map_err(|e| OracleError::Report(e.to_string()))
}

/// Writes `cfg.junit_path` if one is configured. Returns whether a file was written.
pub fn write_junit_file(records: &[RunRecord], cfg: &OracleConfig) -> Result<bool, OracleError> {
    match &cfg.junit_path {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_junit(records, &cfg.suite_name, file)?;
            info!("junit report written to {}", path.display());
            Ok(true)
        }
        None => Ok(false),
    }
}
