//! Pure tag-filtering operations.
//!
//! Exclusion is by membership only: a pair survives unless its tag appears
//! in the excluded set. Unknown tags are never rejected, and input order is
//! preserved.

use crate::types::TaggedToken;

/// Returns the subsequence of `pairs` whose tag is not in `excluded`.
///
/// An empty input yields an empty output regardless of the exclusion set,
/// and filtering an already-filtered sequence with the same set is a no-op.
pub fn remove_tags<S: AsRef<str>>(pairs: &[TaggedToken], excluded: &[S]) -> Vec<TaggedToken> {
    pairs
        .iter()
        .filter(|pair| !excluded.iter().any(|tag| tag.as_ref() == pair.tag))
        .cloned()
        .collect()
}

/// Projects `pairs` onto their lemmas, preserving order.
pub fn lemmas(pairs: &[TaggedToken]) -> Vec<String> {
    pairs.iter().map(|pair| pair.lemma.clone()).collect()
}

#[cfg(test)]
mod filter_tests {
    use super::{lemmas, remove_tags};
    use crate::constants::STOPWORD_TAGS;
    use crate::types::TaggedToken;

    fn sample() -> Vec<TaggedToken> {
        vec![
            TaggedToken::new("나", "NP"),
            TaggedToken::new(".", "SF"),
            TaggedToken::new("간다", "VV"),
        ]
    }

    #[test]
    fn removes_excluded_tags_and_preserves_order() {
        let cleaned = remove_tags(&sample(), STOPWORD_TAGS);
        assert_eq!(
            cleaned,
            vec![TaggedToken::new("나", "NP"), TaggedToken::new("간다", "VV")]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let cleaned = remove_tags(&[], STOPWORD_TAGS);
        assert!(cleaned.is_empty());

        let none_excluded: &[&str] = &[];
        assert!(remove_tags(&[], none_excluded).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = remove_tags(&sample(), STOPWORD_TAGS);
        let twice = remove_tags(&once, STOPWORD_TAGS);
        assert_eq!(once, twice);
    }

    #[test]
    fn output_is_subsequence_of_input() {
        let input = sample();
        let cleaned = remove_tags(&input, &["NP"]);
        let mut cursor = input.iter();
        for pair in &cleaned {
            assert!(cursor.any(|candidate| candidate == pair));
        }
    }

    #[test]
    fn unknown_tags_are_kept() {
        let input = vec![TaggedToken::new("???", "ZZZ")];
        let cleaned = remove_tags(&input, STOPWORD_TAGS);
        assert_eq!(cleaned, input);
    }

    #[test]
    fn excluded_set_is_not_validated() {
        let cleaned = remove_tags(&sample(), &["NOT-A-TAG", "SF"]);
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn lemmas_projects_in_order() {
        assert_eq!(lemmas(&sample()), vec!["나", ".", "간다"]);
    }
}
