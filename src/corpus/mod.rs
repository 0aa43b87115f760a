//! # Stage: Corpus
//!
//! ## Responsibility
//! Hold the ordered `(key, value)` samples each assistant falls back to when
//! the backend is unreachable, and load replacement sample sets from disk.
//!
//! ## Guarantees
//! - Order-preserving: samples keep the order they were declared or loaded in
//! - Immutable: a `Corpus` exposes no mutation after construction
//! - Built-in corpora are built once and shared as `&'static`
//!
//! ## NOT Responsible For
//! - Matching (see [`crate::matcher`])
//! - Hot reload (files are read once at startup)

pub mod builtin;

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::AssistModule;
use crate::config::CorpusConfig;
use crate::error::{AssistError, Result};

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One known input and the canned answer returned for it.
///
/// Corpus files written for the debugger use `question`/`answer`; the
/// simplifier and checker files use `input`/`output`. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(alias = "question", alias = "input")]
    pub key: String,
    #[serde(alias = "answer", alias = "output")]
    pub value: String,
}

impl Sample {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Sample { key: key.into(), value: value.into() }
    }
}

// ---------------------------------------------------------------------------
// Corpus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    samples: Vec<Sample>,
}

/// Accepted on-disk shapes: a bare array, or a table with a `samples` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    Bare(Vec<Sample>),
    Wrapped { samples: Vec<Sample> },
}

impl From<CorpusFile> for Corpus {
    fn from(file: CorpusFile) -> Self {
        match file {
            CorpusFile::Bare(samples) | CorpusFile::Wrapped { samples } => Corpus::new(samples),
        }
    }
}

impl Corpus {
    pub fn new(samples: Vec<Sample>) -> Self {
        Corpus { samples }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().map(|(k, v)| Sample::new(*k, *v)).collect()
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str::<CorpusFile>(text).map(Corpus::from)
    }

    /// Parse a TOML corpus. Only the `[[samples]]` form is valid TOML.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        #[derive(Deserialize)]
        struct TomlCorpus {
            #[serde(default)]
            samples: Vec<Sample>,
        }
        toml::from_str::<TomlCorpus>(text).map(|t| Corpus::new(t.samples))
    }

    /// Load a corpus file, choosing the format from its extension
    /// (`.toml`, anything else is read as JSON).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AssistError::CorpusLoad {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            Corpus::from_toml_str(&text).map_err(|e| e.to_string())
        } else {
            Corpus::from_json_str(&text).map_err(|e| e.to_string())
        };
        let corpus = parsed.map_err(|detail| AssistError::CorpusLoad {
            path: path.to_path_buf(),
            detail,
        })?;
        info!(path = %path.display(), samples = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

impl FromIterator<Sample> for Corpus {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}

impl AsRef<[Sample]> for Corpus {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ---------------------------------------------------------------------------
// Built-in corpora
// ---------------------------------------------------------------------------

static DEBUGGER: Lazy<Corpus> = Lazy::new(|| Corpus::from_pairs(builtin::DEBUGGER_SAMPLES));
static SIMPLIFIER: Lazy<Corpus> = Lazy::new(|| Corpus::from_pairs(builtin::SIMPLIFIER_SAMPLES));
static CHECKER: Lazy<Corpus> = Lazy::new(|| Corpus::from_pairs(builtin::CHECKER_SAMPLES));

/// The sample set shipped with the binary for `module`.
pub fn builtin(module: AssistModule) -> &'static Corpus {
    match module {
        AssistModule::Debugger => &DEBUGGER,
        AssistModule::Simplifier => &SIMPLIFIER,
        AssistModule::Checker => &CHECKER,
    }
}

// ---------------------------------------------------------------------------
// CorpusSet
// ---------------------------------------------------------------------------

/// One corpus per assistant module. Modules without an override use the
/// built-in data.
#[derive(Debug, Clone, Default)]
pub struct CorpusSet {
    overrides: HashMap<AssistModule, Corpus>,
}

impl CorpusSet {
    pub fn builtin() -> Self {
        CorpusSet::default()
    }

    pub fn with_override(mut self, module: AssistModule, corpus: Corpus) -> Self {
        self.overrides.insert(module, corpus);
        self
    }

    /// Build a set from the `[corpus]` config section, loading every file it
    /// names.
    pub fn from_config(cfg: &CorpusConfig) -> Result<Self> {
        let mut set = CorpusSet::builtin();
        for module in AssistModule::ALL {
            if let Some(path) = cfg.path_for(module) {
                set = set.with_override(module, Corpus::load(path)?);
            }
        }
        Ok(set)
    }

    pub fn get(&self, module: AssistModule) -> &Corpus {
        self.overrides.get(&module).unwrap_or_else(|| builtin(module))
    }

    pub fn is_overridden(&self, module: AssistModule) -> bool {
        self.overrides.contains_key(&module)
    }
}
