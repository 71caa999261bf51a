/*!
 * Tests for the shape-preserving tree translator
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use loctree::catalog::CatalogNode;
use loctree::placeholder::PlaceholderGuard;
use loctree::providers::TranslationBackend;
use loctree::providers::mock::MockBackend;
use loctree::tree::TreeTranslator;

use crate::common::test_session;

/// Shape preservation: keys, order, sequence lengths and scalars all mirror
/// the source tree; only string leaves change
#[tokio::test]
async fn test_translate_withNestedTree_shouldPreserveShape() {
    let backend = Arc::new(MockBackend::working());
    let session = test_session(backend, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source = CatalogNode::from_json(
        r#"{"b": "text", "a": {"z": "inner", "y": [true, "listed", 7]}, "n": 42}"#,
    )
    .unwrap();

    let (translated, stats) = TreeTranslator::new(&session, &guard).translate(&source).await;

    let value = translated.to_value();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["b", "a", "n"]);

    assert_eq!(value["b"], "[de] text");
    assert_eq!(value["a"]["z"], "[de] inner");
    assert_eq!(value["a"]["y"][0], true);
    assert_eq!(value["a"]["y"][1], "[de] listed");
    assert_eq!(value["a"]["y"][2], 7);
    assert_eq!(value["n"], 42);

    assert_eq!(stats.text_leaves, 3);
    assert_eq!(stats.translated, 3);
    assert_eq!(stats.fallbacks, 0);
}

/// Scalars are never sent to the backend
#[tokio::test]
async fn test_translate_withScalarOnlyTree_shouldNotCallBackend() {
    let backend = Arc::new(MockBackend::working());
    let session = test_session(Arc::clone(&backend) as Arc<dyn TranslationBackend>, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source = CatalogNode::from_json(r#"{"a": 1, "b": [2, false], "c": null}"#).unwrap();
    let (translated, stats) = TreeTranslator::new(&session, &guard).translate(&source).await;

    assert_eq!(translated, source);
    assert_eq!(backend.calls(), 0);
    assert_eq!(stats.text_leaves, 0);
}

/// Degenerate strings skip the backend and come back unchanged
#[tokio::test]
async fn test_translate_withDegenerateStrings_shouldSkipBackend() {
    let backend = Arc::new(MockBackend::working());
    let session = test_session(Arc::clone(&backend) as Arc<dyn TranslationBackend>, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source = CatalogNode::from_json(r#"{"empty": "", "braces": "{}", "blank": "  "}"#).unwrap();
    let (translated, _) = TreeTranslator::new(&session, &guard).translate(&source).await;

    assert_eq!(translated, source);
    assert_eq!(backend.calls(), 0);
}

/// A failing backend leaves the original string, never a masked one
#[tokio::test]
async fn test_translate_withFailingBackend_shouldFallBackToSourceText() {
    let backend = Arc::new(MockBackend::failing());
    let session = test_session(backend, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source = CatalogNode::from_json(r#"{"greeting": "Hello {name}"}"#).unwrap();
    let (translated, stats) = TreeTranslator::new(&session, &guard).translate(&source).await;

    assert_eq!(translated.to_value()["greeting"], "Hello {name}");
    assert_eq!(stats.fallbacks, 1);
    assert_eq!(stats.translated, 0);
}

/// Placeholders survive translation in order
#[tokio::test]
async fn test_translate_withPlaceholders_shouldRestoreTokensInOrder() {
    let backend = Arc::new(MockBackend::working());
    let session = test_session(backend, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source =
        CatalogNode::from_json(r#"{"msg": "Hi {first} {last}, order {id} is ready"}"#).unwrap();
    let (translated, _) = TreeTranslator::new(&session, &guard).translate(&source).await;

    let msg = translated.to_value()["msg"].as_str().unwrap().to_string();
    let first = msg.find("{first}").unwrap();
    let last = msg.find("{last}").unwrap();
    let id = msg.find("{id}").unwrap();
    assert!(first < last && last < id);
    assert!(!msg.contains('⟦'));
}

/// An intermittent backend fails some leaves and keeps the rest: the file
/// is still complete, with failed leaves falling back
#[tokio::test]
async fn test_translate_withIntermittentBackend_shouldIsolateLeafFailures() {
    let backend = Arc::new(MockBackend::intermittent(2));
    let session = test_session(backend, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source =
        CatalogNode::from_json(r#"{"a": "one", "b": "two", "c": "three", "d": "four"}"#).unwrap();
    let (translated, stats) = TreeTranslator::new(&session, &guard).translate(&source).await;

    assert_eq!(stats.text_leaves, 4);
    assert_eq!(stats.translated, 2);
    assert_eq!(stats.fallbacks, 2);

    // Every second call fails: a and c translate, b and d fall back
    let value = translated.to_value();
    assert_eq!(value["a"], "[de] one");
    assert_eq!(value["b"], "two");
    assert_eq!(value["c"], "[de] three");
    assert_eq!(value["d"], "four");
}

/// The leaf callback fires once per string leaf, in traversal order
#[tokio::test]
async fn test_leafCallback_shouldFireOncePerStringLeaf() {
    let backend = Arc::new(MockBackend::working());
    let session = test_session(backend, "en", "de").await;
    let guard = PlaceholderGuard::default();

    let source =
        CatalogNode::from_json(r#"{"a": "x", "b": {"c": "y"}, "d": ["z", 1]}"#).unwrap();

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let translator = TreeTranslator::new(&session, &guard)
        .with_leaf_callback(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    let (_, stats) = translator.translate(&source).await;
    assert_eq!(fired.load(Ordering::SeqCst), 3);
    assert_eq!(stats.text_leaves, 3);
}
