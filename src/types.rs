use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{
    BACKEND_STANZA_CUSTOM, DEFAULT_MODEL_DIR, DEPPARSE_MODEL_FILE, FUNCTION_WORD_TAGS,
    LEMMA_MODEL_FILE, PIPELINE_LANG, PIPELINE_PACKAGE, POS_MODEL_FILE, STOPWORD_TAGS,
};
use crate::discovery::discover_default_model_dir;
use crate::error::{KotokError, Result};

/// One lemma/tag pair produced by the pipeline.
///
/// Immutable once returned; the filtering operations copy pairs instead of
/// mutating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Base/dictionary form of the token.
    pub lemma: String,
    /// Part-of-speech tag attached to the token.
    pub tag: String,
}

impl TaggedToken {
    /// Creates a pair from any string-likes.
    pub fn new(lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }
}

/// Identifier selecting which external pipeline implementation to use.
///
/// Only one backend exists today. Resolution from a name fails fast for
/// anything else, for every entry point, before any native call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Custom pretrained tagger/lemmatizer/parser triple loaded from local
    /// model files.
    StanzaCustom,
}

impl Backend {
    /// Resolves a backend from its wire name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            BACKEND_STANZA_CUSTOM => Ok(Backend::StanzaCustom),
            other => Err(KotokError::Configuration(format!(
                "unsupported backend {other:?} (expected {BACKEND_STANZA_CUSTOM:?})"
            ))),
        }
    }

    /// Returns the backend's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::StanzaCustom => BACKEND_STANZA_CUSTOM,
        }
    }
}

/// Resolved on-disk locations of the pretrained model triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    /// POS tagging model.
    pub pos: PathBuf,
    /// Lemmatization model.
    pub lemma: PathBuf,
    /// Dependency parsing model.
    pub depparse: PathBuf,
}

/// Configuration for constructing a [`crate::Pipeline`].
///
/// Defaults read `STANZA_LIBRARY_PATH` for the runtime library and probe the
/// usual model locations; when nothing is found, model paths resolve under
/// the fixed relative directory so that a missing model surfaces as a
/// runtime error rather than a config failure.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Explicit runtime library path, if any.
    pub library_path: Option<PathBuf>,
    /// Directory the model triple is resolved under.
    pub model_dir: Option<PathBuf>,
    /// Explicit POS model path; wins over `model_dir`.
    pub pos_model_path: Option<PathBuf>,
    /// Explicit lemmatization model path; wins over `model_dir`.
    pub lemma_model_path: Option<PathBuf>,
    /// Explicit dependency-parsing model path; wins over `model_dir`.
    pub depparse_model_path: Option<PathBuf>,
    /// Language code handed to the pipeline.
    pub lang: String,
    /// Model package handed to the pipeline.
    pub package: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            library_path: env::var_os("STANZA_LIBRARY_PATH").map(PathBuf::from),
            model_dir: discover_default_model_dir(),
            pos_model_path: None,
            lemma_model_path: None,
            depparse_model_path: None,
            lang: PIPELINE_LANG.to_string(),
            package: PIPELINE_PACKAGE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Sets an explicit runtime library path.
    pub fn with_library_path(mut self, library_path: impl AsRef<Path>) -> Self {
        self.library_path = Some(library_path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory the model triple is resolved under.
    pub fn with_model_dir(mut self, model_dir: impl AsRef<Path>) -> Self {
        self.model_dir = Some(model_dir.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit POS model path.
    pub fn with_pos_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.pos_model_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit lemmatization model path.
    pub fn with_lemma_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.lemma_model_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit dependency-parsing model path.
    pub fn with_depparse_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.depparse_model_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the language code.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Sets the model package.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Resolves the three model paths this configuration points at.
    ///
    /// Missing files are not checked here; the runtime reports them when the
    /// pipeline is constructed.
    pub fn model_paths(&self) -> ModelPaths {
        let base = self
            .model_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));
        ModelPaths {
            pos: self
                .pos_model_path
                .clone()
                .unwrap_or_else(|| base.join(POS_MODEL_FILE)),
            lemma: self
                .lemma_model_path
                .clone()
                .unwrap_or_else(|| base.join(LEMMA_MODEL_FILE)),
            depparse: self
                .depparse_model_path
                .clone()
                .unwrap_or_else(|| base.join(DEPPARSE_MODEL_FILE)),
        }
    }
}

/// Mapping from tag category to tag set, used by the filtering operations.
///
/// The defaults mirror [`STOPWORD_TAGS`] and [`FUNCTION_WORD_TAGS`]; tests
/// and embedders swap in their own vocabularies instead of patching globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCategories {
    stopwords: Vec<String>,
    function_words: Vec<String>,
}

impl Default for TagCategories {
    fn default() -> Self {
        Self {
            stopwords: STOPWORD_TAGS.iter().map(|tag| tag.to_string()).collect(),
            function_words: FUNCTION_WORD_TAGS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        }
    }
}

impl TagCategories {
    /// Creates a configuration with both categories empty.
    pub fn empty() -> Self {
        Self {
            stopwords: Vec::new(),
            function_words: Vec::new(),
        }
    }

    /// Replaces the stopword tag set.
    pub fn with_stopwords<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the function-word tag set.
    pub fn with_function_words<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.function_words = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one stopword tag.
    pub fn add_stopword(mut self, tag: impl Into<String>) -> Self {
        self.stopwords.push(tag.into());
        self
    }

    /// Adds one function-word tag.
    pub fn add_function_word(mut self, tag: impl Into<String>) -> Self {
        self.function_words.push(tag.into());
        self
    }

    /// Returns the stopword tag set.
    pub fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    /// Returns the function-word tag set.
    pub fn function_words(&self) -> &[String] {
        &self.function_words
    }
}
