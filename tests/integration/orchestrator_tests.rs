/*!
 * End-to-end orchestrator runs against mock backends
 */

use std::sync::Arc;

use loctree::orchestrator::{LanguageOutcome, Orchestrator, UnitOutcome};
use loctree::providers::TranslationBackend;
use loctree::providers::mock::MockBackend;
use serde_json::Value;

use crate::common::{TempCatalogs, test_config};

const COMMON: &str = r#"{
  "title": "Dashboard",
  "greeting": "Hello {name}",
  "menu": {
    "home": "Home",
    "logout": "Log out"
  },
  "retries": 3
}"#;

fn parsed(content: &str) -> Value {
    serde_json::from_str(content).unwrap()
}

/// Happy path: every target language gets a structurally identical file
#[tokio::test]
async fn test_run_withWorkingBackend_shouldWriteAllTargets() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", COMMON);

    let config = test_config(&catalogs.root_path(), "en", &["de", "es"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();

    let report = orchestrator.run().await.unwrap();
    assert_eq!(report.files_written(), 2);
    assert_eq!(report.files_failed(), 0);

    for lang in ["de", "es"] {
        let content = catalogs.read_catalog(lang, "common.json");
        let tree = parsed(&content);

        // Shape mirrors the source; strings were rewritten by the mock
        assert_eq!(tree["title"], format!("[{}] Dashboard", lang));
        assert_eq!(tree["menu"]["home"], format!("[{}] Home", lang));
        assert_eq!(tree["retries"], 3);

        // Placeholders survive, markers do not leak
        let greeting = tree["greeting"].as_str().unwrap();
        assert!(greeting.contains("{name}"));
        assert!(!greeting.contains('⟦'));
    }
}

/// Idempotent re-run: the second run performs zero writes
#[tokio::test]
async fn test_run_twice_shouldNotRewriteExistingFiles() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", COMMON);

    let config = test_config(&catalogs.root_path(), "en", &["de"]);
    let orchestrator =
        Orchestrator::with_backend(config.clone(), Arc::new(MockBackend::working())).unwrap();

    let first = orchestrator.run().await.unwrap();
    assert_eq!(first.files_written(), 1);

    let content_before = catalogs.read_catalog("de", "common.json");
    let mtime_before = catalogs.catalog_mtime("de", "common.json");

    // Second run on a fresh orchestrator: nothing is modified
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();
    let second = orchestrator.run().await.unwrap();

    assert_eq!(second.files_written(), 0);
    assert_eq!(second.files_skipped_existing(), 1);
    assert_eq!(catalogs.read_catalog("de", "common.json"), content_before);
    assert_eq!(catalogs.catalog_mtime("de", "common.json"), mtime_before);
}

/// RTL tagging: exactly the configured RTL languages carry the marker
#[tokio::test]
async fn test_run_withRtlTargets_shouldTagOnlyRtlOutputs() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", COMMON);

    let config = test_config(&catalogs.root_path(), "en", &["de", "ar", "he"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();
    orchestrator.run().await.unwrap();

    for lang in ["ar", "he"] {
        let tree = parsed(&catalogs.read_catalog(lang, "common.json"));
        assert_eq!(tree["_rtl"], Value::Bool(true), "missing _rtl for {}", lang);
    }

    let tree = parsed(&catalogs.read_catalog("de", "common.json"));
    assert!(tree.get("_rtl").is_none());
}

/// Failure isolation: a language whose session cannot be opened is skipped,
/// the languages around it still produce output, and the run succeeds
#[tokio::test]
async fn test_run_withUnsupportedMiddleLanguage_shouldIsolateFailure() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", COMMON);

    let backend = Arc::new(MockBackend::working().rejecting_pairs(&["xx"]));
    let config = test_config(&catalogs.root_path(), "en", &["de", "xx", "es"]);
    let orchestrator = Orchestrator::with_backend(config, backend).unwrap();

    let report = orchestrator.run().await.unwrap();

    assert!(catalogs.catalog_exists("de", "common.json"));
    assert!(catalogs.catalog_exists("es", "common.json"));
    assert!(!catalogs.catalog_exists("xx", "common.json"));

    assert_eq!(report.files_written(), 2);
    assert_eq!(report.languages_skipped(), 1);
    assert!(matches!(
        report.languages[1].outcome,
        LanguageOutcome::Skipped(_)
    ));
}

/// Leaf fallback: with a failing backend the file is still written and every
/// string keeps its source text, placeholders intact
#[tokio::test]
async fn test_run_withFailingBackend_shouldWriteSourceTextVerbatim() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", r#"{"greeting": "Hello {name}"}"#);

    let config = test_config(&catalogs.root_path(), "en", &["de"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::failing())).unwrap();

    let report = orchestrator.run().await.unwrap();
    assert_eq!(report.files_written(), 1);
    assert_eq!(report.leaf_fallbacks(), 1);

    let tree = parsed(&catalogs.read_catalog("de", "common.json"));
    assert_eq!(tree["greeting"], "Hello {name}");
}

/// Skip-if-exists: a pre-populated destination is never clobbered
#[tokio::test]
async fn test_run_withPrepopulatedDestination_shouldLeaveItUntouched() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", COMMON);
    catalogs.write_catalog("de", "common.json", r#"{"title": "Handgemacht"}"#);

    let config = test_config(&catalogs.root_path(), "en", &["de"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();

    let report = orchestrator.run().await.unwrap();
    assert_eq!(report.files_written(), 0);
    assert_eq!(report.files_skipped_existing(), 1);
    assert_eq!(
        catalogs.read_catalog("de", "common.json"),
        r#"{"title": "Handgemacht"}"#
    );
}

/// Fatal precondition: a missing source language directory aborts the run
#[tokio::test]
async fn test_run_withMissingSourceDirectory_shouldFail() {
    let catalogs = TempCatalogs::new();

    let config = test_config(&catalogs.root_path(), "en", &["de"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();

    assert!(orchestrator.run().await.is_err());
}

/// A configured file that is absent from the source directory is skipped
/// with a warning; other files in the same language still translate
#[tokio::test]
async fn test_run_withMissingSourceFile_shouldSkipThatUnitOnly() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", COMMON);

    let mut config = test_config(&catalogs.root_path(), "en", &["de"]);
    config.catalog_files = vec!["missing.json".to_string(), "common.json".to_string()];

    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();
    let report = orchestrator.run().await.unwrap();

    match &report.languages[0].outcome {
        LanguageOutcome::Processed(files) => {
            assert_eq!(files[0].outcome, UnitOutcome::MissingSource);
            assert!(matches!(files[1].outcome, UnitOutcome::Written { .. }));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    assert!(catalogs.catalog_exists("de", "common.json"));
    assert!(!catalogs.catalog_exists("de", "missing.json"));
}

/// A source file that fails to parse is skipped; the rest of the language
/// continues
#[tokio::test]
async fn test_run_withUnparsableSourceFile_shouldContinueWithNextFile() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "broken.json", "{not valid json");
    catalogs.write_catalog("en", "common.json", COMMON);

    let config = test_config(&catalogs.root_path(), "en", &["de"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();

    let report = orchestrator.run().await.unwrap();
    assert_eq!(report.files_failed(), 1);
    assert_eq!(report.files_written(), 1);
    assert!(catalogs.catalog_exists("de", "common.json"));
    assert!(!catalogs.catalog_exists("de", "broken.json"));
}

/// With no configured file list, *.json catalogs are discovered in the
/// source directory
#[tokio::test]
async fn test_run_withEmptyFileList_shouldDiscoverCatalogs() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "admin.json", r#"{"save": "Save"}"#);
    catalogs.write_catalog("en", "common.json", r#"{"ok": "OK"}"#);

    let config = test_config(&catalogs.root_path(), "en", &["de"]);
    assert!(config.catalog_files.is_empty());

    let orchestrator =
        Orchestrator::with_backend(config, Arc::new(MockBackend::working())).unwrap();
    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.files_written(), 2);
    assert!(catalogs.catalog_exists("de", "admin.json"));
    assert!(catalogs.catalog_exists("de", "common.json"));
}

/// The backend never sees catalog-internal codes for divergent languages
#[tokio::test]
async fn test_run_withDivergentLanguage_shouldSendMappedCodeToBackend() {
    let catalogs = TempCatalogs::new();
    catalogs.write_catalog("en", "common.json", r#"{"ok": "OK"}"#);

    let backend = Arc::new(MockBackend::working());
    let config = test_config(&catalogs.root_path(), "en", &["he"]);
    let orchestrator =
        Orchestrator::with_backend(config, Arc::clone(&backend) as Arc<dyn TranslationBackend>)
            .unwrap();
    orchestrator.run().await.unwrap();

    // The mock tags output with the backend-side target code
    let tree = parsed(&catalogs.read_catalog("he", "common.json"));
    assert_eq!(tree["ok"], "[iw] OK");
    // And the RTL default set tags Hebrew output
    assert_eq!(tree["_rtl"], Value::Bool(true));
}
