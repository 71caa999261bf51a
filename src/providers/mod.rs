/*!
 * Backend implementations for machine translation.
 *
 * This module contains the client side of the external translation service:
 * - LibreTranslate: HTTP client for a LibreTranslate-compatible REST API
 * - Mock: scriptable in-process backend for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation backends.
///
/// A backend is a black box that turns text in one language into text in
/// another. Implementations own their transport, retries and error mapping;
/// callers only see `ProviderError`.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate one string from `source` to `target` (backend language codes)
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;

    /// Check that the backend is reachable and serves the language pair.
    ///
    /// Called once per language session at construction time; a failure here
    /// skips the whole target language rather than individual strings.
    async fn verify_pair(&self, source: &str, target: &str) -> Result<(), ProviderError>;
}

pub mod libretranslate;
pub mod mock;
