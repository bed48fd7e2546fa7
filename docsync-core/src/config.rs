//! Sync configuration and validation.
//!
//! [`SyncOptions`] carries everything the facade needs to assemble the fixed
//! stage order. Validation runs before any stage does; a [`ConfigError`] is
//! surfaced immediately and no partial run is attempted.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;

/// Patterns matched against source-relative paths during selection.
pub const DEFAULT_PATTERNS: [&str; 3] = ["*/README.md", "*/docs/*.md", "*/package.json"];

/// Manifest fields copied into each record during enrichment.
pub const DEFAULT_FIELDS: [&str; 3] = ["name", "description", "version"];

/// Substrings excluded from selection and from watch triggering.
pub const DEFAULT_IGNORE: [&str; 1] = ["node_modules"];

/// Diagnostic sink passed to stages.
///
/// Defaults to the `log` facade at warn level; library consumers can supply
/// their own closure to capture messages without installing a subscriber.
#[derive(Clone)]
pub struct Logger(Arc<dyn Fn(&str) + Send + Sync>);

impl Logger {
    pub fn new(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Logger(Arc::new(sink))
    }

    /// A sink that discards every message.
    pub fn silent() -> Self {
        Logger::new(|_| {})
    }

    pub fn log(&self, message: &str) {
        (self.0)(message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(|message| tracing::warn!("{message}"))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger(..)")
    }
}

/// Options for the metadata read/write stages.
#[derive(Debug, Clone)]
pub struct MetaOptions {
    /// Key under which per-file metadata is stored and read.
    pub namespace: String,
    /// Logger for the metadata stages; falls back to the main sink.
    pub log: Option<Logger>,
}

impl Default for MetaOptions {
    fn default() -> Self {
        MetaOptions {
            namespace: "data".to_string(),
            log: None,
        }
    }
}

/// Repository provenance recorded by the source-annotation stage.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// `owner/name` of the repository the source tree lives in.
    pub repo: String,
    pub branch: String,
}

/// The generated ignore-list artifact.
#[derive(Debug, Clone)]
pub struct IgnoreFileOptions {
    /// File name inside the destination root.
    pub file: String,
    /// Header line prepended to the generated entries.
    pub header: String,
}

impl Default for IgnoreFileOptions {
    fn default() -> Self {
        IgnoreFileOptions {
            file: ".gitignore".to_string(),
            header: "# DO NOT EDIT: automatically generated by docsync".to_string(),
        }
    }
}

/// Watch-mode tuning.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Per-path window inside which repeated change events are ignored.
    pub debounce: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        WatchOptions {
            debounce: Duration::from_millis(500),
        }
    }
}

/// Full configuration for one sync facade call.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Root of the module tree to document.
    pub source: PathBuf,
    /// Root of the generated site tree.
    pub destination: PathBuf,
    /// Glob-like selection patterns; `*` matches within one path segment.
    pub patterns: Vec<String>,
    /// Substring exclusions applied to source-relative paths.
    pub ignore: Vec<String>,
    pub meta: MetaOptions,
    /// Main diagnostic sink.
    pub log: Logger,
    /// Destination key of the aggregate package index.
    pub index_path: String,
    /// Manifest fields copied into each record.
    pub fields: Vec<String>,
    /// Enables the source-annotation stage when set.
    pub source_info: Option<SourceInfo>,
    pub ignore_file: IgnoreFileOptions,
    /// Watch for source changes after the initial build when set.
    pub watch: Option<WatchOptions>,
    /// Report writes instead of performing them.
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        SyncOptions {
            source: source.into(),
            destination: destination.into(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            meta: MetaOptions::default(),
            log: Logger::default(),
            index_path: "packages.json".to_string(),
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            source_info: None,
            ignore_file: IgnoreFileOptions::default(),
            watch: None,
            dry_run: false,
        }
    }

    /// Validate before any stage runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.is_dir() {
            return Err(ConfigError::SourceNotFound {
                path: self.source.clone(),
            });
        }
        if self.destination.starts_with(&self.source) {
            return Err(ConfigError::DestinationInsideSource {
                source_root: self.source.clone(),
                destination: self.destination.clone(),
            });
        }
        if self.meta.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        if self.index_path.is_empty() {
            return Err(ConfigError::EmptyIndexPath);
        }
        if self.ignore_file.file.is_empty() {
            return Err(ConfigError::EmptyIgnoreFile);
        }
        if let Some(watch) = &self.watch {
            if watch.debounce.is_zero() {
                return Err(ConfigError::ZeroDebounce);
            }
        }
        Ok(())
    }

    /// The metadata-stage logger, falling back to the main sink.
    pub fn meta_log(&self) -> Logger {
        self.meta.log.clone().unwrap_or_else(|| self.log.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
