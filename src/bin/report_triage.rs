use std::env;
use std::fs;
use std::process;

use loctree::triage::{TestReport, TriageReport};

/// Rule-based triage for HTTP test reports
///
/// Reads a JSON test report (`{summary, results[]}`) and prints the failed
/// results sorted into actionable buckets, plus the number of additional
/// passing tests needed to reach an 80% success rate.
fn main() {
    let args: Vec<String> = env::args().collect();
    let report_path = args
        .get(1)
        .map(|arg| arg.as_str())
        .unwrap_or("test-report.json");

    let content = match fs::read_to_string(report_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Cannot read report file '{}': {}", report_path, e);
            process::exit(1);
        }
    };

    let report: TestReport = match serde_json::from_str(&content) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Cannot parse report file '{}': {}", report_path, e);
            process::exit(1);
        }
    };

    print!("{}", TriageReport::from_report(&report).render());
}
