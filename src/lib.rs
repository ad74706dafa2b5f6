#![deny(missing_docs)]

//! Korean morphological tokenization with POS-category filtering.
//!
//! This crate runs Korean text through an external analysis pipeline (a
//! pretrained tagger/lemmatizer/dependency-parser triple loaded from disk)
//! and filters the resulting lemma/tag pairs against two configurable tag
//! categories: stopword tags (punctuation, symbols, numerals and other
//! non-content material) and function-word tags (particles, endings and
//! affixes).
//!
//! ## Quick Start
//! ```no_run
//! use kotok::tokenize;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = tokenize("stanza-custom", "나는 학교에 간다.")?;
//!     for pair in &result.content {
//!         println!("{}/{}", pair.lemma, pair.tag);
//!     }
//!     println!("{:?}", result.lemmas);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline Reuse
//! [`tokenize`] reloads the model triple on every call. Hold a [`Pipeline`]
//! to pay the load cost once:
//!
//! ```no_run
//! use kotok::{Pipeline, PipelineConfig, TagCategories};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::default().with_model_dir("custom-model");
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let categories = TagCategories::default();
//!     for text in ["첫 문장.", "둘째 문장."] {
//!         let _ = pipeline.tokenize(text, &categories)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Availability
//! The native runtime is an optional dependency of the host system. Query it
//! before use instead of handling a load failure mid-call:
//!
//! ```no_run
//! use kotok::TaggerLibrary;
//!
//! if TaggerLibrary::availability().is_available() {
//!     // safe to call kotok::tokenize
//! }
//! ```
//!
//! ## Environment Variables
//! - `STANZA_LIBRARY_PATH`: explicit dynamic library path.
//! - `STANZA_MODEL_PATH`: explicit model directory path.

mod config;
mod constants;
mod discovery;
mod error;
mod filter;
mod model;
mod native;
mod runtime;
mod types;

pub use constants::*;
pub use error::{KotokError, Result};
pub use filter::{lemmas, remove_tags};
pub use model::{Availability, Tokenization};
pub use runtime::{
    remove_function_words, remove_function_words_with_categories, tokenize,
    tokenize_with_categories, Pipeline, TaggerLibrary,
};
pub use types::{Backend, ModelPaths, PipelineConfig, TagCategories, TaggedToken};

#[cfg(test)]
mod test_support;
