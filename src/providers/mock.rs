/*!
 * Mock backend implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockBackend::working()` - always succeeds with tagged text
 * - `MockBackend::failing()` - every translation call fails
 * - `MockBackend::intermittent(n)` - every nth call fails
 * - `MockBackend::rejecting_pairs(...)` - session setup fails for given targets
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, tagging the text with the target language
    Working,
    /// Every translation call fails with an API error
    Failing,
    /// Fails intermittently (every nth request)
    Intermittent {
        /// Every nth call fails
        fail_every: usize,
    },
    /// Echoes the input text unchanged
    Echo,
}

/// Scriptable in-process translation backend
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Target codes rejected at pair verification
    unsupported_targets: Vec<String>,
    /// Translation call counter
    call_count: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            unsupported_targets: Vec::new(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock backend where every translation call errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock backend
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock backend that returns its input unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Reject the given target codes at `verify_pair` time
    pub fn rejecting_pairs(mut self, targets: &[&str]) -> Self {
        self.unsupported_targets = targets.iter().map(|code| code.to_string()).collect();
        self
    }

    /// Number of translation calls received so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            unsupported_targets: self.unsupported_targets.clone(),
            call_count: Arc::clone(&self.call_count),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(format!("[{}] {}", target, text)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated backend failure".to_string(),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(format!("[{}] {}", target, text))
                }
            }

            MockBehavior::Echo => Ok(text.to_string()),
        }
    }

    async fn verify_pair(&self, source: &str, target: &str) -> Result<(), ProviderError> {
        if self.unsupported_targets.iter().any(|code| code == target) {
            return Err(ProviderError::UnsupportedLanguagePair {
                src_lang: source.to_string(),
                target: target.to_string(),
            });
        }
        Ok(())
    }
}
