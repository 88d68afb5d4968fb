//! Keyword matching shared by the classifier, the searcher and the website resolver.

use serde::{Deserialize, Serialize};

/// How a keyword is located inside lowercased text.
///
/// `Substring` is the historical behaviour: "exam" also matches inside "examine".
/// `WholeWord` requires the term to be bounded by non-alphanumeric characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Substring,
    WholeWord,
}

impl MatchMode {
    pub fn from_whole_word(whole_word: bool) -> Self {
        if whole_word {
            Self::WholeWord
        } else {
            Self::Substring
        }
    }
}

/// Returns whether `term` occurs in `haystack` under `mode`. Both are expected lowercased.
pub fn contains_term(haystack: &str, term: &str, mode: MatchMode) -> bool {
    if term.is_empty() {
        return false;
    }
    match mode {
        MatchMode::Substring => haystack.contains(term),
        MatchMode::WholeWord => haystack.match_indices(term).any(|(start, _)| {
            let end = start + term.len();
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        }),
    }
}

/// True if any of `terms` occurs in `haystack`.
pub(crate) fn contains_any(haystack: &str, terms: &[&str], mode: MatchMode) -> bool {
    terms.iter().any(|t| contains_term(haystack, t, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matches_inside_words() {
        assert!(contains_term("please examine this", "exam", MatchMode::Substring));
        assert!(!contains_term("please examine this", "exam", MatchMode::WholeWord));
    }

    #[test]
    fn test_whole_word_allows_punctuation_boundaries() {
        assert!(contains_term("when is the exam?", "exam", MatchMode::WholeWord));
        assert!(contains_term("need more info, please", "more info", MatchMode::WholeWord));
        assert!(contains_term("b.tech fees", "b.tech", MatchMode::WholeWord));
    }

    #[test]
    fn test_whole_word_checks_every_occurrence() {
        assert!(contains_term("examine the exam", "exam", MatchMode::WholeWord));
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!contains_term("anything", "", MatchMode::Substring));
    }
}
