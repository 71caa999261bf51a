use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::catalog::CatalogNode;
use crate::file_utils::FileManager;
use crate::language::{self, LanguageDescriptor};
use crate::pacing::PacingGate;
use crate::placeholder::PlaceholderGuard;
use crate::providers::TranslationBackend;
use crate::providers::libretranslate::LibreTranslate;
use crate::session::LanguageSession;
use crate::tree::{TreeStats, TreeTranslator};

// @module: Catalog orchestration across languages and files

/// Reserved root key marking right-to-left catalogs
pub const RTL_MARKER_KEY: &str = "_rtl";

/// Outcome of one translation unit (one language, one file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Destination written; counters from the tree walk
    Written {
        /// Leaf counters for this file
        stats: TreeStats,
    },
    /// Destination already existed, left untouched
    SkippedExisting,
    /// Source file absent, unit skipped with a warning
    MissingSource,
    /// Read, parse or write failure; unit skipped
    Failed(String),
}

/// Outcome of one catalog file within a language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Catalog file name
    pub file: String,
    /// What happened to this unit
    pub outcome: UnitOutcome,
}

/// Outcome of one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageOutcome {
    /// The language could not be started (session construction or
    /// destination directory failure); no file was touched
    Skipped(String),
    /// Per-file outcomes, in processing order
    Processed(Vec<FileReport>),
}

/// Report for one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageReport {
    /// Catalog language code
    pub language: String,
    /// What happened for this language
    pub outcome: LanguageOutcome,
}

/// Aggregated outcome of a whole orchestrator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Per-language reports, in configured order
    pub languages: Vec<LanguageReport>,
}

impl RunReport {
    /// Number of destination files written in this run
    pub fn files_written(&self) -> usize {
        self.count_outcomes(|outcome| matches!(outcome, UnitOutcome::Written { .. }))
    }

    /// Number of units skipped because the destination already existed
    pub fn files_skipped_existing(&self) -> usize {
        self.count_outcomes(|outcome| matches!(outcome, UnitOutcome::SkippedExisting))
    }

    /// Number of units that failed at the file level
    pub fn files_failed(&self) -> usize {
        self.count_outcomes(|outcome| matches!(outcome, UnitOutcome::Failed(_)))
    }

    /// Number of target languages skipped entirely
    pub fn languages_skipped(&self) -> usize {
        self.languages
            .iter()
            .filter(|report| matches!(report.outcome, LanguageOutcome::Skipped(_)))
            .count()
    }

    /// Total string leaves that fell back to the source text
    pub fn leaf_fallbacks(&self) -> usize {
        self.languages
            .iter()
            .filter_map(|report| match &report.outcome {
                LanguageOutcome::Processed(files) => Some(files),
                LanguageOutcome::Skipped(_) => None,
            })
            .flatten()
            .map(|file| match &file.outcome {
                UnitOutcome::Written { stats } => stats.fallbacks,
                _ => 0,
            })
            .sum()
    }

    fn count_outcomes(&self, predicate: impl Fn(&UnitOutcome) -> bool) -> usize {
        self.languages
            .iter()
            .filter_map(|report| match &report.outcome {
                LanguageOutcome::Processed(files) => Some(files),
                LanguageOutcome::Skipped(_) => None,
            })
            .flatten()
            .filter(|file| predicate(&file.outcome))
            .count()
    }
}

/// Drives a whole translation run: languages x catalog files
pub struct Orchestrator {
    config: Config,
    backend: Arc<dyn TranslationBackend>,
    guard: PlaceholderGuard,
}

impl Orchestrator {
    /// Create an orchestrator talking to the configured HTTP backend
    pub fn new(config: Config) -> Result<Self> {
        let translation = &config.translation;
        let api_key = if translation.api_key.is_empty() {
            None
        } else {
            Some(translation.api_key.clone())
        };

        let backend = LibreTranslate::new_with_config(
            translation.endpoint.clone(),
            api_key,
            translation.timeout_secs,
            translation.retry_count,
            translation.retry_backoff_ms,
        );

        Self::with_backend(config, Arc::new(backend))
    }

    /// Create an orchestrator with an injected backend (used by tests)
    pub fn with_backend(config: Config, backend: Arc<dyn TranslationBackend>) -> Result<Self> {
        let guard = config.placeholder_guard()?;
        Ok(Self {
            config,
            backend,
            guard,
        })
    }

    /// Run the full translation pass.
    ///
    /// Returns an error only for the fatal precondition (missing source
    /// language directory); every smaller failure is contained in the report.
    pub async fn run(&self) -> Result<RunReport> {
        let source_dir = self.config.source_dir();
        if !FileManager::dir_exists(&source_dir) {
            return Err(anyhow!(
                "Source language directory does not exist: {:?}",
                source_dir
            ));
        }

        let catalog_files = self.resolve_catalog_files(&source_dir)?;
        if catalog_files.is_empty() {
            warn!("No catalog files to process in {:?}", source_dir);
            return Ok(RunReport::default());
        }

        info!(
            "Translating {} catalog file(s) from '{}' into {} language(s)",
            catalog_files.len(),
            self.config.source_language,
            self.config.target_languages.len()
        );

        let mut report = RunReport::default();

        for language in &self.config.target_languages {
            let outcome = self.process_language(language, &catalog_files).await;
            report.languages.push(LanguageReport {
                language: language.clone(),
                outcome,
            });
        }

        self.log_summary(&report);
        Ok(report)
    }

    /// Catalog file list from config, or discovery in the source directory
    fn resolve_catalog_files(&self, source_dir: &Path) -> Result<Vec<String>> {
        if !self.config.catalog_files.is_empty() {
            return Ok(self.config.catalog_files.clone());
        }

        let discovered = FileManager::discover_catalog_files(source_dir)
            .with_context(|| format!("Failed to list catalogs in {:?}", source_dir))?;
        info!(
            "Discovered {} catalog file(s) in {:?}",
            discovered.len(),
            source_dir
        );
        Ok(discovered)
    }

    /// Process every catalog file for one target language
    async fn process_language(&self, language: &str, catalog_files: &[String]) -> LanguageOutcome {
        info!(
            "--- Translating to {} ({}) ---",
            language::display_name(language),
            language
        );

        let descriptor = LanguageDescriptor::resolve(
            language,
            &self.config.language_mapping,
            &self.config.rtl_languages,
        );

        // One pacing gate per language session
        let gate = Arc::new(PacingGate::from_millis(self.config.translation.delay_ms));

        let session = match LanguageSession::open(
            Arc::clone(&self.backend),
            &self.config.source_language,
            descriptor,
            gate,
        )
        .await
        {
            Ok(session) => session,
            Err(e) => {
                error!("Cannot open session for '{}': {}", language, e);
                return LanguageOutcome::Skipped(e.to_string());
            }
        };

        let target_dir = self.config.target_dir(language);
        if let Err(e) = FileManager::ensure_dir(&target_dir) {
            error!("Cannot create directory {:?}: {}", target_dir, e);
            return LanguageOutcome::Skipped(e.to_string());
        }

        let mut files = Vec::with_capacity(catalog_files.len());
        for file in catalog_files {
            let outcome = self.process_file(&session, language, file).await;
            files.push(FileReport {
                file: file.clone(),
                outcome,
            });
        }

        LanguageOutcome::Processed(files)
    }

    /// Process one translation unit: load, translate, tag, persist
    async fn process_file(
        &self,
        session: &LanguageSession,
        language: &str,
        file: &str,
    ) -> UnitOutcome {
        let source_path = self.config.source_dir().join(file);
        let target_path = self.config.target_dir(language).join(file);

        if !FileManager::file_exists(&source_path) {
            warn!(
                "{} does not exist in '{}', skipping",
                file, self.config.source_language
            );
            return UnitOutcome::MissingSource;
        }

        // Central correctness property: a previously produced file is never
        // modified. Delete the destination to retranslate.
        if FileManager::file_exists(&target_path) {
            info!("{}/{} already exists, skipping", language, file);
            return UnitOutcome::SkippedExisting;
        }

        let tree = match self.load_tree(&source_path) {
            Ok(tree) => tree,
            Err(e) => {
                error!("Failed to load {:?}: {}", source_path, e);
                return UnitOutcome::Failed(e.to_string());
            }
        };

        let bar = self.leaf_progress_bar(&tree, language, file);
        let translator = {
            let bar = bar.clone();
            TreeTranslator::new(session, &self.guard)
                .with_leaf_callback(Box::new(move || bar.inc(1)))
        };

        let (mut translated, stats) = translator.translate(&tree).await;
        bar.finish_and_clear();

        if session.descriptor().rtl {
            translated.set_root_key(RTL_MARKER_KEY, Value::Bool(true));
        }

        match self.persist_tree(&translated, &target_path) {
            Ok(()) => {
                if stats.fallbacks > 0 {
                    warn!(
                        "{}/{} written with {} untranslated leaf string(s)",
                        language, file, stats.fallbacks
                    );
                } else {
                    info!("{}/{} translated successfully", language, file);
                }
                UnitOutcome::Written { stats }
            }
            Err(e) => {
                error!("Failed to write {:?}: {}", target_path, e);
                UnitOutcome::Failed(e.to_string())
            }
        }
    }

    fn load_tree(&self, path: &Path) -> Result<CatalogNode> {
        let content = FileManager::read_to_string(path)?;
        CatalogNode::from_json(&content)
            .with_context(|| format!("Failed to parse catalog: {:?}", path))
    }

    fn persist_tree(&self, tree: &CatalogNode, path: &Path) -> Result<()> {
        let rendered = tree.to_json()?;
        FileManager::write_atomic(path, &rendered)
    }

    fn leaf_progress_bar(&self, tree: &CatalogNode, language: &str, file: &str) -> ProgressBar {
        let bar = ProgressBar::new(tree.text_leaf_count() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message(format!("{}/{}", language, file));
        bar
    }

    fn log_summary(&self, report: &RunReport) {
        info!(
            "Run complete: {} written, {} skipped (existing), {} failed, {} language(s) skipped, {} leaf fallback(s)",
            report.files_written(),
            report.files_skipped_existing(),
            report.files_failed(),
            report.languages_skipped(),
            report.leaf_fallbacks()
        );
    }
}
