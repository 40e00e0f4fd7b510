//! Keyword extraction from part-of-speech tagged tokens.
//!
//! Keeps noun and adjective tokens in first-appearance order. Tagging is the
//! lexicon tag where one exists; untagged tokens count as noun candidates
//! unless a filter (stop word, common verb, modifier, adverb suffix, too
//! short, numeric) rules them out.

use deskpulse_core::model::sentiment::MAX_KEYWORDS;

use crate::lexicon::{self, WordTag};

const MIN_KEYWORD_CHARS: usize = 3;

/// Extract up to [`MAX_KEYWORDS`] keywords from already-normalized text.
#[must_use]
pub fn extract_keywords(normalized: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in normalized.split_whitespace() {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if is_keyword(token) && !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

fn is_keyword(token: &str) -> bool {
    if let Some(entry) = lexicon::lookup(token) {
        return matches!(entry.tag, WordTag::Adjective | WordTag::Noun);
    }

    if token.chars().count() < MIN_KEYWORD_CHARS {
        return false;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if lexicon::is_stop_word(token)
        || lexicon::is_common_verb(token)
        || lexicon::is_negator(token)
        || lexicon::intensifier(token).is_some()
    {
        return false;
    }
    // Untagged "-ly" tokens are treated as adverbs.
    if token.ends_with("ly") {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::extract_keywords;
    use crate::normalize::normalize;

    #[test]
    fn keeps_nouns_and_adjectives_in_order() {
        let keywords =
            extract_keywords(&normalize("The service is absolutely terrible and keeps failing"));
        assert_eq!(keywords, vec!["service", "terrible", "failing"]);
    }

    #[test]
    fn drops_verbs_adverbs_and_numbers() {
        let keywords = extract_keywords(&normalize("it fails constantly, error 500 happens"));
        // "fails" is a lexicon verb, "constantly" an adverb, "500" numeric.
        assert_eq!(keywords, vec!["error"]);
    }

    #[test]
    fn deduplicates_by_first_appearance() {
        let keywords = extract_keywords("printer broken printer broken printer");
        assert_eq!(keywords, vec!["printer", "broken"]);
    }

    #[test]
    fn truncates_to_five() {
        let keywords =
            extract_keywords("printer laptop monitor keyboard mouse webcam headset dock");
        assert_eq!(
            keywords,
            vec!["printer", "laptop", "monitor", "keyboard", "mouse"]
        );
    }

    #[test]
    fn empty_text_yields_no_keywords() {
        assert!(extract_keywords("").is_empty());
    }
}
