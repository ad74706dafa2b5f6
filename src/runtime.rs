use std::env;
use std::ffi::{CStr, CString};
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use regex::Regex;

use crate::config::{StanzaDocHandle, StanzaPipelineHandle, StanzaPipelineSpec};
use crate::constants::COMPOUND_SEPARATOR;
use crate::discovery::{default_library_candidates, discover_default_library_path};
use crate::error::{KotokError, Result};
use crate::filter;
use crate::model::{Availability, Tokenization};
use crate::native::{
    api_error, clear_stanza_error, cstr_to_string, DynamicLibrary, LoadedRuntime, StanzaApi,
};
use crate::types::{Backend, PipelineConfig, TagCategories, TaggedToken};

// Pipeline construction touches global state in the native runtime and is
// serialized process-wide.
static STANZA_INIT_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone)]
struct ReTagRule {
    pattern: Regex,
    tag: String,
}

/// Handle to a loaded pipeline runtime library plus resolved function table.
///
/// Useful when you want explicit control over which shared library is loaded
/// before constructing pipelines.
#[derive(Clone)]
pub struct TaggerLibrary {
    inner: Arc<LoadedRuntime>,
}

impl TaggerLibrary {
    /// Loads the runtime from an explicit path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let library = DynamicLibrary::open(path)?;
        Self::from_library(library)
    }

    /// Loads the runtime from common platform-specific locations and caches
    /// it for the rest of the process.
    pub fn load_default() -> Result<Self> {
        static DEFAULT_RUNTIME: Mutex<Option<Arc<LoadedRuntime>>> = Mutex::new(None);

        let mut guard = DEFAULT_RUNTIME.lock().map_err(|_| {
            KotokError::LibraryLoad("failed to lock default runtime cache".to_string())
        })?;

        if let Some(inner) = guard.as_ref() {
            return Ok(Self {
                inner: inner.clone(),
            });
        }

        let loaded = Self::load_default_internal()?;
        let inner = loaded.inner;
        *guard = Some(inner.clone());
        Ok(Self { inner })
    }

    fn load_default_internal() -> Result<Self> {
        let mut errors = Vec::new();

        if let Some(path) = discover_default_library_path() {
            match Self::load(&path) {
                Ok(loaded) => return Ok(loaded),
                Err(error) => errors.push(format!("{}: {}", path.display(), error)),
            }
        }

        for candidate in default_library_candidates() {
            let library = match DynamicLibrary::open(candidate) {
                Ok(library) => library,
                Err(error) => {
                    errors.push(format!("{candidate}: {error}"));
                    continue;
                }
            };

            match Self::from_library(library) {
                Ok(loaded) => return Ok(loaded),
                Err(error) => errors.push(format!("{candidate}: {error}")),
            }
        }

        Err(KotokError::LibraryLoad(format!(
            "set STANZA_LIBRARY_PATH to the dynamic library path. tried: {}",
            errors.join(" | ")
        )))
    }

    /// Loads from `STANZA_LIBRARY_PATH` if set, otherwise falls back to
    /// [`Self::load_default`].
    pub fn load_from_env_or_default() -> Result<Self> {
        if let Some(path) = env::var_os("STANZA_LIBRARY_PATH") {
            return Self::load(PathBuf::from(path));
        }
        Self::load_default()
    }

    /// Probes whether the runtime can be used from this process.
    ///
    /// Never fails: a missing or broken runtime is reported as
    /// [`Availability::Unavailable`] so callers can branch before invoking
    /// the tokenizer.
    pub fn availability() -> Availability {
        match Self::load_from_env_or_default() {
            Ok(library) => match library.version() {
                Ok(version) => Availability::Available { version },
                Err(error) => Availability::Unavailable {
                    reason: error.to_string(),
                },
            },
            Err(error) => Availability::Unavailable {
                reason: error.to_string(),
            },
        }
    }

    /// Returns whether the loaded runtime exposes universal POS tags.
    pub fn supports_universal_tags(&self) -> bool {
        self.inner.api.stanza_doc_word_upos.is_some()
    }

    /// Returns the loaded runtime version string.
    pub fn version(&self) -> Result<String> {
        let pointer = unsafe { (self.inner.api.stanza_version)() };
        if pointer.is_null() {
            return Err(api_error(
                &self.inner.api,
                "stanza_version returned a null pointer",
            ));
        }
        Ok(unsafe { CStr::from_ptr(pointer) }
            .to_string_lossy()
            .to_string())
    }

    /// Returns the runtime's build description, when the loaded library
    /// exposes one.
    pub fn build_info(&self) -> Result<String> {
        let build_info =
            require_optional_api(self.inner.api.stanza_build_info, "stanza_build_info")?;
        let pointer = unsafe { build_info() };
        if pointer.is_null() {
            return Err(api_error(
                &self.inner.api,
                "stanza_build_info returned a null pointer",
            ));
        }
        Ok(unsafe { CStr::from_ptr(pointer) }
            .to_string_lossy()
            .to_string())
    }

    /// Constructs a [`Pipeline`] on this library with the given
    /// configuration. `config.library_path` is ignored here; the receiver is
    /// the library.
    pub fn pipeline(&self, config: &PipelineConfig) -> Result<Pipeline> {
        Pipeline::on_library(self.inner.clone(), config)
    }

    fn from_library(library: DynamicLibrary) -> Result<Self> {
        let api = unsafe { StanzaApi::load(&library)? };
        Ok(Self {
            inner: Arc::new(LoadedRuntime {
                _library: library,
                api,
            }),
        })
    }
}

fn require_optional_api<T>(api: Option<T>, name: &str) -> Result<T> {
    api.ok_or_else(|| {
        KotokError::SymbolLoad(format!("{name} is not available in the loaded runtime"))
    })
}

/// A constructed analysis pipeline: tagger, lemmatizer and dependency parser
/// over one model triple.
///
/// Construction loads the models and is expensive; hold the value to
/// amortize it across texts. The module-level [`tokenize`] entry point
/// deliberately does not do this and rebuilds the pipeline per call.
pub struct Pipeline {
    inner: Arc<LoadedRuntime>,
    handle: StanzaPipelineHandle,
    re_tag_rules: Vec<ReTagRule>,
}

impl Pipeline {
    /// Constructs a pipeline from a full [`PipelineConfig`].
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let library = match config.library_path.as_ref() {
            Some(path) => TaggerLibrary::load(path)?,
            None => TaggerLibrary::load_from_env_or_default()?,
        };
        Self::on_library(library.inner, config)
    }

    /// Constructs the default pipeline for a resolved backend.
    pub fn for_backend(backend: Backend) -> Result<Self> {
        match backend {
            Backend::StanzaCustom => Self::from_config(&PipelineConfig::default()),
        }
    }

    fn on_library(inner: Arc<LoadedRuntime>, config: &PipelineConfig) -> Result<Self> {
        let models = config.model_paths();
        let lang_c = CString::new(config.lang.clone())?;
        let package_c = CString::new(config.package.clone())?;
        let pos_c = CString::new(models.pos.to_string_lossy().to_string())?;
        let lemma_c = CString::new(models.lemma.to_string_lossy().to_string())?;
        let depparse_c = CString::new(models.depparse.to_string_lossy().to_string())?;

        let spec = StanzaPipelineSpec {
            lang: lang_c.as_ptr(),
            package: package_c.as_ptr(),
            pos_model_path: pos_c.as_ptr(),
            lemma_model_path: lemma_c.as_ptr(),
            depparse_model_path: depparse_c.as_ptr(),
        };

        clear_stanza_error(&inner.api);
        let handle = {
            let _guard = STANZA_INIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            unsafe { (inner.api.stanza_pipeline_init)(spec) }
        };
        if handle.is_null() {
            return Err(api_error(
                &inner.api,
                "stanza_pipeline_init returned a null handle",
            ));
        }

        Ok(Self {
            inner,
            handle,
            re_tag_rules: Vec::new(),
        })
    }

    /// Installs a lemma-pattern tag override.
    ///
    /// After analysis, pairs whose lemma matches `pattern` get `tag` instead
    /// of the model's tag; the first matching rule wins. Patterns match
    /// anywhere in the lemma; anchor with `^`/`$` for exact matches. Rules
    /// never reorder or drop pairs.
    pub fn add_re_tag(&mut self, pattern: &str, tag: impl Into<String>) -> Result<()> {
        let pattern = Regex::new(pattern).map_err(|error| {
            KotokError::Configuration(format!("invalid tag rule pattern: {error}"))
        })?;
        self.re_tag_rules.push(ReTagRule {
            pattern,
            tag: tag.into(),
        });
        Ok(())
    }

    /// Runs the pipeline over `text` and returns lemma/XPOS pairs for every
    /// word of every sentence, flattened in document order.
    ///
    /// Compound morphemes reported as `+`-joined lemma/tag groups are split
    /// into individual pairs.
    pub fn annotate(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let doc = self.annotate_doc(text)?;
        let mut pairs = Vec::new();
        for sent_index in 0..doc.num_sents()? {
            for word_index in 0..doc.num_words(sent_index)? {
                let lemma = doc.lemma(sent_index, word_index)?;
                let xpos = doc.xpos(sent_index, word_index)?;
                split_compound(&lemma, &xpos, &mut pairs);
            }
        }
        apply_re_tag_rules(&self.re_tag_rules, &mut pairs);
        Ok(pairs)
    }

    /// Like [`Self::annotate`] but returns universal POS tags.
    ///
    /// Requires the optional `stanza_doc_word_upos` symbol. Universal tags
    /// are not compound-joined, so lemmas are returned whole.
    pub fn annotate_universal(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let get_upos = require_optional_api(
            self.inner.api.stanza_doc_word_upos,
            "stanza_doc_word_upos",
        )?;

        let doc = self.annotate_doc(text)?;
        let mut pairs = Vec::new();
        for sent_index in 0..doc.num_sents()? {
            for word_index in 0..doc.num_words(sent_index)? {
                let lemma = doc.lemma(sent_index, word_index)?;
                let upos_ptr = unsafe { get_upos(doc.handle, sent_index, word_index) };
                if upos_ptr.is_null() {
                    return Err(api_error(
                        &self.inner.api,
                        "stanza_doc_word_upos returned a null pointer",
                    ));
                }
                pairs.push(TaggedToken::new(lemma, cstr_to_string(upos_ptr)));
            }
        }
        apply_re_tag_rules(&self.re_tag_rules, &mut pairs);
        Ok(pairs)
    }

    /// Runs the pipeline over `text` and returns the three output views:
    /// all pairs, content pairs (stopword tags removed) and content lemmas.
    pub fn tokenize(&self, text: &str, categories: &TagCategories) -> Result<Tokenization> {
        let all = self.annotate(text)?;
        let content = filter::remove_tags(&all, categories.stopwords());
        let lemmas = filter::lemmas(&content);
        Ok(Tokenization {
            all,
            content,
            lemmas,
        })
    }

    fn annotate_doc(&self, text: &str) -> Result<StanzaDoc<'_>> {
        let text_c = CString::new(text)?;
        clear_stanza_error(&self.inner.api);
        let handle = unsafe { (self.inner.api.stanza_annotate)(self.handle, text_c.as_ptr()) };
        if handle.is_null() {
            return Err(api_error(
                &self.inner.api,
                "stanza_annotate returned a null handle",
            ));
        }
        Ok(StanzaDoc {
            api: &self.inner.api,
            handle,
        })
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        unsafe {
            (self.inner.api.stanza_pipeline_close)(self.handle);
        }
        self.handle = std::ptr::null_mut();
    }
}

struct StanzaDoc<'a> {
    api: &'a StanzaApi,
    handle: StanzaDocHandle,
}

impl StanzaDoc<'_> {
    fn num_sents(&self) -> Result<c_int> {
        let count = unsafe { (self.api.stanza_doc_num_sents)(self.handle) };
        if count < 0 {
            return Err(api_error(self.api, "stanza_doc_num_sents returned an error"));
        }
        Ok(count)
    }

    fn num_words(&self, sent_index: c_int) -> Result<c_int> {
        let count = unsafe { (self.api.stanza_doc_num_words)(self.handle, sent_index) };
        if count < 0 {
            return Err(api_error(self.api, "stanza_doc_num_words returned an error"));
        }
        Ok(count)
    }

    fn lemma(&self, sent_index: c_int, word_index: c_int) -> Result<String> {
        let pointer =
            unsafe { (self.api.stanza_doc_word_lemma)(self.handle, sent_index, word_index) };
        if pointer.is_null() {
            return Err(api_error(
                self.api,
                "stanza_doc_word_lemma returned a null pointer",
            ));
        }
        Ok(cstr_to_string(pointer))
    }

    fn xpos(&self, sent_index: c_int, word_index: c_int) -> Result<String> {
        let pointer =
            unsafe { (self.api.stanza_doc_word_xpos)(self.handle, sent_index, word_index) };
        if pointer.is_null() {
            return Err(api_error(
                self.api,
                "stanza_doc_word_xpos returned a null pointer",
            ));
        }
        Ok(cstr_to_string(pointer))
    }
}

impl Drop for StanzaDoc<'_> {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        unsafe {
            (self.api.stanza_doc_close)(self.handle);
        }
        self.handle = std::ptr::null_mut();
    }
}

// A word like 먹었다 comes back as lemma "먹+었+다" tagged "VV+EP+EF". Split
// both sides and zip; on a group-size mismatch keep the word as one pair
// instead of guessing an alignment.
fn split_compound(lemma: &str, tag: &str, out: &mut Vec<TaggedToken>) {
    let lemma_parts: Vec<&str> = lemma.split(COMPOUND_SEPARATOR).collect();
    let tag_parts: Vec<&str> = tag.split(COMPOUND_SEPARATOR).collect();
    if lemma_parts.len() != tag_parts.len() {
        out.push(TaggedToken::new(lemma, tag));
        return;
    }
    for (lemma_part, tag_part) in lemma_parts.into_iter().zip(tag_parts) {
        out.push(TaggedToken::new(lemma_part, tag_part));
    }
}

fn apply_re_tag_rules(rules: &[ReTagRule], pairs: &mut [TaggedToken]) {
    if rules.is_empty() {
        return;
    }
    for pair in pairs {
        if let Some(rule) = rules.iter().find(|rule| rule.pattern.is_match(&pair.lemma)) {
            pair.tag = rule.tag.clone();
        }
    }
}

/// Tokenizes `text` with the pipeline selected by `backend` and the default
/// tag categories.
///
/// This is the primary entry point. It resolves the backend, constructs a
/// fresh pipeline (models are reloaded on every call) and returns the three
/// output views. Unsupported backend names fail with
/// [`KotokError::Configuration`] before any native call.
pub fn tokenize(backend: &str, text: &str) -> Result<Tokenization> {
    tokenize_with_categories(backend, text, &TagCategories::default())
}

/// Like [`tokenize`] but with caller-provided tag categories.
pub fn tokenize_with_categories(
    backend: &str,
    text: &str,
    categories: &TagCategories,
) -> Result<Tokenization> {
    let backend = Backend::from_name(backend)?;
    let pipeline = Pipeline::for_backend(backend)?;
    pipeline.tokenize(text, categories)
}

/// Removes function-word-tagged pairs from an already-produced sequence.
///
/// Returns the surviving pairs and their bare lemmas. The backend name is
/// validated the same way [`tokenize`] validates it; unsupported names fail
/// instead of silently filtering nothing.
pub fn remove_function_words(
    pairs: &[TaggedToken],
    backend: &str,
) -> Result<(Vec<TaggedToken>, Vec<String>)> {
    remove_function_words_with_categories(pairs, backend, &TagCategories::default())
}

/// Like [`remove_function_words`] but with caller-provided tag categories.
pub fn remove_function_words_with_categories(
    pairs: &[TaggedToken],
    backend: &str,
    categories: &TagCategories,
) -> Result<(Vec<TaggedToken>, Vec<String>)> {
    Backend::from_name(backend)?;
    let cleaned = filter::remove_tags(pairs, categories.function_words());
    let lemmas = filter::lemmas(&cleaned);
    Ok((cleaned, lemmas))
}
