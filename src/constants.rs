//! Tag-category defaults and pipeline identifiers.
//!
//! Tags follow the Sejong tagset as emitted by the Korean GSD models.
//! The two category slices below are defaults only; callers override them
//! through [`crate::TagCategories`].

/// Backend name of the only supported pipeline: a custom pretrained
/// tagger/lemmatizer/parser triple loaded from local files.
pub const BACKEND_STANZA_CUSTOM: &str = "stanza-custom";

/// Language code the pipeline is initialized with.
pub const PIPELINE_LANG: &str = "ko";
/// Model package the pipeline is initialized with.
pub const PIPELINE_PACKAGE: &str = "gsd";

/// Relative directory the pretrained model triple is loaded from when no
/// explicit model directory is configured.
pub const DEFAULT_MODEL_DIR: &str = "custom-model";
/// POS tagging model file, relative to the model directory.
pub const POS_MODEL_FILE: &str = "pos/ko_gsd_tagger.pt";
/// Lemmatization model file, relative to the model directory.
pub const LEMMA_MODEL_FILE: &str = "lemma/ko_gsd_lemmatizer.pt";
/// Dependency parsing model file, relative to the model directory.
pub const DEPPARSE_MODEL_FILE: &str = "depparse/ko_gsd_parser.pt";

/// Separator the pipeline uses to join compound morpheme lemmas and tags
/// inside a single word (for example `먹+었` tagged `VV+EP`).
pub const COMPOUND_SEPARATOR: char = '+';

/// Default stopword tags: punctuation, symbols, foreign/numeric material and
/// unanalyzable chunks. Filtered out of the content views by default.
pub const STOPWORD_TAGS: &[&str] = &[
    "SF", "SE", "SS", "SP", "SO", "SW", "SH", "SL", "SN", "NF", "NV", "NA",
];

/// Default function-word tags: case markers, conjunctive/auxiliary particles,
/// verbal endings and affixes. Removed only by the function-word remover.
pub const FUNCTION_WORD_TAGS: &[&str] = &[
    "JKS", "JKC", "JKG", "JKO", "JKB", "JKV", "JKQ", "JC", "JX", "EP", "EF", "EC", "ETN", "ETM",
    "XPN", "XSN", "XSV", "XSA",
];
