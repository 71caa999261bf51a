/*!
 * Placeholder protection for translated strings.
 *
 * Catalog strings embed template tokens such as `{name}` or `{date}` that
 * must survive translation byte-for-byte. Before a string is sent to the
 * backend each token is swapped for an indexed marker the backend has no
 * reason to touch; after translation the markers are swapped back in the
 * same order.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CatalogError;

/// Default token pattern: brace-delimited, non-empty, no nested braces
static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]+\}").unwrap());

/// Default delimiter characters, used by the degenerate-input check
const DEFAULT_DELIMITERS: &str = "{}";

/// Delimiter syntax for placeholder tokens.
///
/// The contract of the guard is order/multiset preservation, not one fixed
/// grammar, so the token pattern is configurable.
#[derive(Debug, Clone)]
pub struct PlaceholderStyle {
    pattern: Regex,
    delimiters: String,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
            delimiters: DEFAULT_DELIMITERS.to_string(),
        }
    }
}

impl PlaceholderStyle {
    /// Build a style from a custom token pattern, keeping brace delimiters
    pub fn from_pattern(pattern: &str) -> Result<Self, CatalogError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| CatalogError::Parse(format!("invalid placeholder pattern: {}", e)))?;
        Ok(Self {
            pattern,
            delimiters: DEFAULT_DELIMITERS.to_string(),
        })
    }

    /// Build a style with an explicit delimiter character set
    pub fn with_delimiters(pattern: &str, delimiters: &str) -> Result<Self, CatalogError> {
        let mut style = Self::from_pattern(pattern)?;
        style.delimiters = delimiters.to_string();
        Ok(style)
    }
}

/// Guard that masks placeholder tokens around one backend call.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGuard {
    style: PlaceholderStyle,
}

impl PlaceholderGuard {
    /// Create a guard for the given delimiter style
    pub fn new(style: PlaceholderStyle) -> Self {
        Self { style }
    }

    /// Marker for the token at `index`.
    ///
    /// The brackets are outside every natural-language alphabet, so the
    /// marker neither reads as text to the backend nor collides with
    /// anything it could plausibly produce.
    fn marker(index: usize) -> String {
        format!("⟦{}⟧", index)
    }

    /// Check for input that must not be sent to the backend at all:
    /// empty, whitespace-only, or consisting solely of delimiter characters.
    pub fn is_degenerate(&self, text: &str) -> bool {
        text.trim().is_empty() || text.chars().all(|c| self.style.delimiters.contains(c))
    }

    /// Replace each placeholder token with its indexed marker.
    ///
    /// Tokens are recorded in left-to-right encounter order; repeated tokens
    /// get distinct markers so `restore` puts every occurrence back where it
    /// was found.
    pub fn protect(&self, text: &str) -> (String, Vec<String>) {
        let mut masked = String::with_capacity(text.len());
        let mut tokens = Vec::new();
        let mut last = 0;

        for found in self.style.pattern.find_iter(text) {
            masked.push_str(&text[last..found.start()]);
            masked.push_str(&Self::marker(tokens.len()));
            tokens.push(found.as_str().to_string());
            last = found.end();
        }
        masked.push_str(&text[last..]);

        (masked, tokens)
    }

    /// Replace each marker with its original token, in recorded order
    pub fn restore(&self, translated: &str, tokens: &[String]) -> String {
        let mut restored = translated.to_string();
        for (index, token) in tokens.iter().enumerate() {
            restored = restored.replace(&Self::marker(index), token);
        }
        restored
    }
}
