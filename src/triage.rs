/*!
 * Failure triage for HTTP test reports.
 *
 * Small diagnostic companion to the translator: loads a JSON test report
 * (`{summary, results[]}`) and sorts the failed results into actionable
 * buckets with a simple first-match substring rule table. No state, no
 * concurrency; the output is a human-readable breakdown.
 */

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Overall counters of a test report
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSummary {
    /// Total executed tests
    #[serde(rename = "totalTests")]
    pub total_tests: u64,
    /// Tests that passed
    #[serde(rename = "successfulTests")]
    pub successful_tests: u64,
    /// Tests that failed
    #[serde(rename = "failedTests")]
    pub failed_tests: u64,
    /// Success percentage
    #[serde(rename = "successRate")]
    pub success_rate: f64,
}

/// One test result entry
#[derive(Debug, Clone, Deserialize)]
pub struct TestResult {
    /// Endpoint path
    pub endpoint: String,
    /// HTTP method
    pub method: String,
    /// "success" or "failed"
    pub status: String,
    /// HTTP status code when the request completed
    #[serde(rename = "statusCode")]
    pub status_code: Option<u64>,
    /// Error message, when present at the top level
    #[serde(default)]
    pub error: Option<String>,
    /// Response payload; some reports nest the error under `data.error`
    #[serde(default)]
    pub data: Option<Value>,
}

impl TestResult {
    /// The error text for classification, wherever the report put it
    pub fn error_text(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        self.data
            .as_ref()
            .and_then(|data| data.get("error"))
            .and_then(|error| error.as_str())
            .map(|error| error.to_string())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// A whole test report
#[derive(Debug, Clone, Deserialize)]
pub struct TestReport {
    /// Aggregate counters
    pub summary: ReportSummary,
    /// Individual results
    pub results: Vec<TestResult>,
}

/// Actionable failure categories, in rule-matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FailureBucket {
    /// Route not registered (404)
    NotFound,
    /// Token or credential problems
    Authentication,
    /// Request validation rejected the payload
    Validation,
    /// The request never completed
    Timeout,
    /// The server crashed handling the request
    ServerError,
    /// Domain-level lookup failures
    BusinessLogic,
    /// Everything else
    Other,
}

impl FailureBucket {
    /// Classify an error message; first matching rule wins
    pub fn classify(error: &str) -> Self {
        if error.contains("Not Found") {
            Self::NotFound
        } else if error.contains("Invalid refresh token") {
            Self::Authentication
        } else if error.contains("required") {
            Self::Validation
        } else if error.contains("timeout") {
            Self::Timeout
        } else if error.contains("FastifyError") {
            Self::ServerError
        } else if error.contains("not found") {
            Self::BusinessLogic
        } else {
            Self::Other
        }
    }

    /// Human-readable bucket label
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "Not Found (404)",
            Self::Authentication => "Authentication",
            Self::Validation => "Validation",
            Self::Timeout => "Timeout",
            Self::ServerError => "Server Error",
            Self::BusinessLogic => "Business Logic",
            Self::Other => "Other",
        }
    }
}

/// Triage result over one report
#[derive(Debug, Clone)]
pub struct TriageReport {
    summary: ReportSummary,
    by_bucket: BTreeMap<FailureBucket, Vec<String>>,
    by_status: BTreeMap<String, Vec<String>>,
}

impl TriageReport {
    /// Bucket every failed result of a report
    pub fn from_report(report: &TestReport) -> Self {
        let mut by_bucket: BTreeMap<FailureBucket, Vec<String>> = BTreeMap::new();
        let mut by_status: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for result in report.results.iter().filter(|r| r.status == "failed") {
            let call = format!("{} {}", result.method, result.endpoint);
            let error = result.error_text();

            by_bucket
                .entry(FailureBucket::classify(&error))
                .or_default()
                .push(call.clone());

            let status = result
                .status_code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "timeout".to_string());
            by_status.entry(status).or_default().push(call);
        }

        Self {
            summary: report.summary.clone(),
            by_bucket,
            by_status,
        }
    }

    /// Failures in a given bucket
    pub fn bucket(&self, bucket: FailureBucket) -> &[String] {
        self.by_bucket
            .get(&bucket)
            .map(|calls| calls.as_slice())
            .unwrap_or(&[])
    }

    /// How many more tests must pass to reach the given success rate
    pub fn passes_needed_for(&self, target_rate: f64) -> u64 {
        let needed = (self.summary.total_tests as f64 * target_rate).ceil() as u64;
        needed.saturating_sub(self.summary.successful_tests)
    }

    /// Render the full human-readable breakdown
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("=== TEST REPORT SUMMARY ===\n");
        out.push_str(&format!("Total Tests: {}\n", self.summary.total_tests));
        out.push_str(&format!("Successful: {}\n", self.summary.successful_tests));
        out.push_str(&format!("Failed: {}\n", self.summary.failed_tests));
        out.push_str(&format!("Success Rate: {:.2}%\n", self.summary.success_rate));

        out.push_str("\n=== FAILURES BY ERROR TYPE ===\n");
        for (bucket, calls) in &self.by_bucket {
            out.push_str(&format!("\n{} ({} failures):\n", bucket.label(), calls.len()));
            let mut unique: Vec<&String> = calls.iter().collect();
            unique.sort();
            unique.dedup();
            for call in unique {
                out.push_str(&format!("  - {}\n", call));
            }
        }

        out.push_str("\n=== FAILURES BY STATUS CODE ===\n");
        for (status, calls) in &self.by_status {
            out.push_str(&format!("\nStatus {} ({} failures):\n", status, calls.len()));
            let mut unique: Vec<&String> = calls.iter().collect();
            unique.sort();
            unique.dedup();
            for call in unique {
                out.push_str(&format!("  - {}\n", call));
            }
        }

        let needed = self.passes_needed_for(0.8);
        out.push_str(&format!(
            "\nNeed to fix at least {} more test(s) to reach 80%\n",
            needed
        ));

        out
    }
}
