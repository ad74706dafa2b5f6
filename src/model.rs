use crate::types::TaggedToken;

/// Result of the primary tokenization entry point: three views over one
/// analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenization {
    /// Every lemma/tag pair the pipeline produced, in document order,
    /// stopwords included.
    pub all: Vec<TaggedToken>,
    /// `all` with stopword-tagged pairs removed; order preserved.
    pub content: Vec<TaggedToken>,
    /// Bare lemmas of `content`, in the same order.
    pub lemmas: Vec<String>,
}

/// Whether the native pipeline runtime can be used from this process.
///
/// Resolved by probing the runtime library, so callers can branch before
/// invoking the tokenizer instead of discovering a missing dependency
/// mid-call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Runtime loaded; `version` is its reported version string.
    Available {
        /// Version string reported by the runtime.
        version: String,
    },
    /// Runtime could not be loaded; `reason` explains why.
    Unavailable {
        /// Human-readable load failure.
        reason: String,
    },
}

impl Availability {
    /// Returns `true` when the runtime loaded successfully.
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available { .. })
    }
}
