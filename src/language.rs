/*!
 * Language descriptors and backend code mapping.
 *
 * Catalog directories are named with ISO 639-1 codes, but the translation
 * backend expects its own identifiers for a handful of languages. The static
 * table below covers the known divergences; a per-run remapping table from
 * the configuration takes precedence, and everything else maps to itself.
 */

use std::collections::HashMap;

use isolang::Language;
use once_cell::sync::Lazy;

/// Built-in catalog-code to backend-code divergences
static BACKEND_CODE_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Simplified Chinese needs the region-qualified code
        ("zh", "zh-CN"),
        // The backend still expects the legacy Hebrew identifier
        ("he", "iw"),
        ("pt", "pt"),
    ])
});

/// Languages written right-to-left, tagged with `_rtl` in output catalogs
pub const DEFAULT_RTL_LANGUAGES: [&str; 2] = ["ar", "he"];

/// Resolved identity of one target language: the catalog code it is stored
/// under, the code the backend expects, and whether it is right-to-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDescriptor {
    /// Catalog-internal code (directory name)
    pub code: String,

    /// Backend-specific code, resolved once here
    pub backend_code: String,

    /// Right-to-left script flag
    pub rtl: bool,
}

impl LanguageDescriptor {
    /// Resolve the descriptor for a catalog language code.
    ///
    /// Backend code resolution order: configured remapping table, built-in
    /// table, identity. The RTL flag comes from the configured set.
    pub fn resolve(code: &str, remapping: &HashMap<String, String>, rtl_languages: &[String]) -> Self {
        let backend_code = remapping
            .get(code)
            .cloned()
            .or_else(|| BACKEND_CODE_TABLE.get(code).map(|mapped| mapped.to_string()))
            .unwrap_or_else(|| code.to_string());

        Self {
            code: code.to_string(),
            backend_code,
            rtl: rtl_languages.iter().any(|lang| lang == code),
        }
    }
}

/// Human-readable language name for progress output, falling back to the
/// bare code when it is not a known ISO 639-1 identifier
pub fn display_name(code: &str) -> String {
    Language::from_639_1(code)
        .map(|lang| lang.to_name().to_string())
        .unwrap_or_else(|| code.to_string())
}
