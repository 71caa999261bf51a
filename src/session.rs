/*!
 * Per-language translation sessions.
 *
 * A session wraps one backend connection configured for a single
 * source -> target pair. The backend-specific language code mapping is
 * applied once at construction; the tree translator and placeholder guard
 * never see it. Each call goes through the injected pacing gate.
 */

use std::sync::Arc;

use crate::errors::ProviderError;
use crate::language::LanguageDescriptor;
use crate::pacing::PacingGate;
use crate::providers::TranslationBackend;

/// One open source -> target translation channel
pub struct LanguageSession {
    backend: Arc<dyn TranslationBackend>,
    gate: Arc<PacingGate>,
    source_code: String,
    descriptor: LanguageDescriptor,
}

impl LanguageSession {
    /// Open a session for one language pair.
    ///
    /// Verifies the pair with the backend; an error here means the whole
    /// target language is skipped for this run, which is a different failure
    /// mode than a single string failing mid-file.
    pub async fn open(
        backend: Arc<dyn TranslationBackend>,
        source_backend_code: &str,
        descriptor: LanguageDescriptor,
        gate: Arc<PacingGate>,
    ) -> Result<Self, ProviderError> {
        backend
            .verify_pair(source_backend_code, &descriptor.backend_code)
            .await?;

        Ok(Self {
            backend,
            gate,
            source_code: source_backend_code.to_string(),
            descriptor,
        })
    }

    /// Translate one string on this session's language pair
    pub async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        self.gate.pause().await;
        self.backend
            .translate(text, &self.source_code, &self.descriptor.backend_code)
            .await
    }

    /// The descriptor of this session's target language
    pub fn descriptor(&self) -> &LanguageDescriptor {
        &self.descriptor
    }
}
