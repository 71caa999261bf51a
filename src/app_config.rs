use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::default::Default;
use std::path::PathBuf;
use url::Url;

use crate::language::DEFAULT_RTL_LANGUAGES;
use crate::placeholder::{PlaceholderGuard, PlaceholderStyle};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory holding one subdirectory per language code
    #[serde(default = "default_locales_root")]
    pub locales_root: PathBuf,

    /// Source language code (directory read as input)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes, produced in this order
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Catalog file names processed per language; empty means discover
    /// every *.json file in the source language directory
    #[serde(default)]
    pub catalog_files: Vec<String>,

    /// Backend language-code overrides per catalog code
    #[serde(default)]
    pub language_mapping: HashMap<String, String>,

    /// Languages whose output receives the `_rtl` root marker
    #[serde(default = "default_rtl_languages")]
    pub rtl_languages: Vec<String>,

    /// Override of the placeholder token pattern (regex)
    #[serde(default)]
    pub placeholder_pattern: Option<String>,

    /// Translation backend config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Backend endpoint URL (LibreTranslate-compatible)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key, empty for open instances
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts for transient backend failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in milliseconds between retries
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Minimum delay in milliseconds between leaf-level backend calls
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Log level for application logging
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_root: default_locales_root(),
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            catalog_files: Vec::new(),
            language_mapping: HashMap::new(),
            rtl_languages: default_rtl_languages(),
            placeholder_pattern: None,
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language must not be empty"));
        }

        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        if self
            .target_languages
            .iter()
            .any(|lang| lang == &self.source_language)
        {
            return Err(anyhow!(
                "Target language list must not contain the source language '{}'",
                self.source_language
            ));
        }

        Url::parse(&self.translation.endpoint).map_err(|e| {
            anyhow!(
                "Invalid backend endpoint '{}': {}",
                self.translation.endpoint,
                e
            )
        })?;

        // Fail early on a bad pattern instead of mid-run
        self.placeholder_guard()?;

        Ok(())
    }

    /// Build the placeholder guard from the configured pattern
    pub fn placeholder_guard(&self) -> Result<PlaceholderGuard> {
        let style = match &self.placeholder_pattern {
            Some(pattern) => PlaceholderStyle::from_pattern(pattern)?,
            None => PlaceholderStyle::default(),
        };
        Ok(PlaceholderGuard::new(style))
    }

    /// Directory holding the source language catalogs
    pub fn source_dir(&self) -> PathBuf {
        self.locales_root.join(&self.source_language)
    }

    /// Directory holding one target language's catalogs
    pub fn target_dir(&self, language: &str) -> PathBuf {
        self.locales_root.join(language)
    }
}

fn default_locales_root() -> PathBuf {
    PathBuf::from("locales")
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_languages() -> Vec<String> {
    ["ar", "de", "es", "he", "hi", "it", "ja", "nl", "pl", "pt", "ru", "tr", "zh"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_rtl_languages() -> Vec<String> {
    DEFAULT_RTL_LANGUAGES
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_delay_ms() -> u64 {
    100
}
