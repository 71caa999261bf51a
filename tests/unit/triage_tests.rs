/*!
 * Tests for the HTTP test report triage tool
 */

use loctree::triage::{FailureBucket, TestReport, TriageReport};

fn sample_report() -> TestReport {
    serde_json::from_str(
        r#"{
            "summary": {"totalTests": 20, "successfulTests": 13, "failedTests": 7, "successRate": 65.0},
            "results": [
                {"endpoint": "/api/analytics", "method": "GET", "status": "failed", "statusCode": 404, "error": "Not Found"},
                {"endpoint": "/api/payments", "method": "POST", "status": "failed", "statusCode": 404, "error": "Not Found"},
                {"endpoint": "/api/auth/refresh", "method": "POST", "status": "failed", "statusCode": 401, "error": "Invalid refresh token"},
                {"endpoint": "/api/images", "method": "POST", "status": "failed", "statusCode": 400, "error": "Image and filename are required"},
                {"endpoint": "/api/conversations", "method": "POST", "status": "failed", "statusCode": null, "error": "timeout of 10000ms exceeded"},
                {"endpoint": "/api/search", "method": "GET", "status": "failed", "statusCode": 500, "data": {"error": "FastifyError: boom"}},
                {"endpoint": "/api/properties/1", "method": "GET", "status": "failed", "statusCode": 404, "error": "Property not found"},
                {"endpoint": "/api/ok", "method": "GET", "status": "success", "statusCode": 200}
            ]
        }"#,
    )
    .unwrap()
}

/// Each failure lands in exactly one bucket; successes are ignored
#[test]
fn test_fromReport_shouldBucketEveryFailureOnce() {
    let triage = TriageReport::from_report(&sample_report());

    assert_eq!(
        triage.bucket(FailureBucket::NotFound),
        ["GET /api/analytics", "POST /api/payments"]
    );
    assert_eq!(
        triage.bucket(FailureBucket::Authentication),
        ["POST /api/auth/refresh"]
    );
    assert_eq!(triage.bucket(FailureBucket::Validation), ["POST /api/images"]);
    assert_eq!(triage.bucket(FailureBucket::Timeout), ["POST /api/conversations"]);
    assert_eq!(triage.bucket(FailureBucket::ServerError), ["GET /api/search"]);
    assert_eq!(
        triage.bucket(FailureBucket::BusinessLogic),
        ["GET /api/properties/1"]
    );
    assert!(triage.bucket(FailureBucket::Other).is_empty());
}

/// "Property not found" must not be swallowed by the 404 rule
#[test]
fn test_classify_shouldDistinguishRouteAndEntityNotFound() {
    assert_eq!(FailureBucket::classify("Not Found"), FailureBucket::NotFound);
    assert_eq!(
        FailureBucket::classify("Property not found"),
        FailureBucket::BusinessLogic
    );
}

/// The 80% computation counts missing passes, saturating at zero
#[test]
fn test_passesNeededFor_shouldCountMissingPasses() {
    let triage = TriageReport::from_report(&sample_report());
    // 80% of 20 = 16, 13 passing
    assert_eq!(triage.passes_needed_for(0.8), 3);
    assert_eq!(triage.passes_needed_for(0.5), 0);
}

/// Rendering groups by bucket and by status code
#[test]
fn test_render_shouldGroupByBucketAndStatus() {
    let rendered = TriageReport::from_report(&sample_report()).render();

    assert!(rendered.contains("Success Rate: 65.00%"));
    assert!(rendered.contains("Not Found (404) (2 failures):"));
    assert!(rendered.contains("Status 401 (1 failures):"));
    assert!(rendered.contains("Status timeout (1 failures):"));
    assert!(rendered.contains("Need to fix at least 3 more test(s) to reach 80%"));
}
