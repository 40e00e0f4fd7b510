//! Compiled-in lexical sentiment model.
//!
//! Each entry carries a polarity in `[-1, 1]`, a subjectivity in `[0, 1]`,
//! and a coarse part-of-speech tag. The word list is biased toward support
//! ticket vocabulary; the scorer averages matched entries, so coverage gaps
//! pull toward neutral rather than failing.

/// Coarse part-of-speech tag; keyword extraction keeps nouns and adjectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordTag {
    Adjective,
    Noun,
    Verb,
}

/// One sentiment lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    pub tag: WordTag,
}

const A: WordTag = WordTag::Adjective;
const N: WordTag = WordTag::Noun;
const V: WordTag = WordTag::Verb;

/// (word, polarity, subjectivity, tag). Alphabetized for maintainability.
const ENTRIES: &[(&str, f64, f64, WordTag)] = &[
    ("amazing", 0.6, 0.9, A),
    ("angry", -0.7, 0.9, A),
    ("annoyed", -0.5, 0.7, A),
    ("annoying", -0.6, 0.8, A),
    ("appreciate", 0.5, 0.5, V),
    ("awesome", 1.0, 1.0, A),
    ("awful", -1.0, 1.0, A),
    ("bad", -0.7, 0.65, A),
    ("best", 1.0, 0.3, A),
    ("better", 0.5, 0.5, A),
    ("broken", -0.6, 0.6, A),
    ("bug", -0.3, 0.3, N),
    ("bugs", -0.3, 0.3, N),
    ("confusing", -0.4, 0.7, A),
    ("crash", -0.6, 0.5, N),
    ("crashed", -0.6, 0.5, V),
    ("crashes", -0.6, 0.5, V),
    ("dead", -0.6, 0.5, A),
    ("delayed", -0.3, 0.4, A),
    ("difficult", -0.4, 0.6, A),
    ("disappointed", -0.6, 0.8, A),
    ("disappointing", -0.6, 0.8, A),
    ("easy", 0.4, 0.6, A),
    ("error", -0.3, 0.3, N),
    ("errors", -0.3, 0.3, N),
    ("excellent", 1.0, 1.0, A),
    ("fail", -0.5, 0.5, V),
    ("failed", -0.5, 0.5, V),
    ("failing", -0.5, 0.6, A),
    ("fails", -0.5, 0.5, V),
    ("failure", -0.6, 0.6, N),
    ("fantastic", 0.9, 0.9, A),
    ("fast", 0.2, 0.3, A),
    ("fine", 0.4, 0.4, A),
    ("fixed", 0.4, 0.4, A),
    ("frustrated", -0.6, 0.8, A),
    ("frustrating", -0.6, 0.8, A),
    ("garbage", -0.8, 0.9, N),
    ("good", 0.7, 0.6, A),
    ("great", 0.8, 0.75, A),
    ("happy", 0.8, 1.0, A),
    ("hard", -0.3, 0.5, A),
    ("hate", -0.8, 0.9, V),
    ("helpful", 0.6, 0.5, A),
    ("horrible", -1.0, 1.0, A),
    ("impossible", -0.7, 0.8, A),
    ("issue", -0.2, 0.2, N),
    ("issues", -0.2, 0.2, N),
    ("late", -0.3, 0.5, A),
    ("lost", -0.4, 0.5, A),
    ("love", 0.5, 0.6, V),
    ("missing", -0.3, 0.4, A),
    ("nice", 0.6, 1.0, A),
    ("ok", 0.2, 0.5, A),
    ("okay", 0.2, 0.5, A),
    ("outage", -0.5, 0.4, N),
    ("pathetic", -0.9, 1.0, A),
    ("perfect", 1.0, 1.0, A),
    ("pleased", 0.6, 0.8, A),
    ("poor", -0.6, 0.7, A),
    ("problem", -0.3, 0.3, N),
    ("problems", -0.3, 0.3, N),
    ("quick", 0.3, 0.4, A),
    ("reliable", 0.6, 0.5, A),
    ("resolved", 0.3, 0.3, A),
    ("ridiculous", -0.7, 1.0, A),
    ("satisfied", 0.6, 0.8, A),
    ("slow", -0.4, 0.5, A),
    ("smooth", 0.5, 0.5, A),
    ("stable", 0.4, 0.4, A),
    ("stuck", -0.4, 0.5, A),
    ("terrible", -1.0, 1.0, A),
    ("thank", 0.4, 0.4, V),
    ("thanks", 0.4, 0.4, N),
    ("unacceptable", -0.9, 0.8, A),
    ("unusable", -0.8, 0.8, A),
    ("useless", -0.8, 0.9, A),
    ("wonderful", 1.0, 1.0, A),
    ("working", 0.3, 0.4, A),
    ("worse", -0.6, 0.7, A),
    ("worst", -1.0, 1.0, A),
    ("wrong", -0.5, 0.5, A),
];

/// Degree modifiers applied to the next lexicon hit within the window.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("barely", 0.5),
    ("completely", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("pretty", 1.2),
    ("quite", 1.1),
    ("really", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("super", 1.4),
    ("totally", 1.4),
    ("very", 1.3),
];

/// Negation markers; contraction apostrophes are already stripped by
/// normalization ("doesn't" arrives as "doesnt").
const NEGATORS: &[&str] = &[
    "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hasnt", "havent", "isnt",
    "neither", "never", "no", "none", "nor", "not", "shouldnt", "wasnt", "werent", "wont",
    "wouldnt",
];

/// Function words excluded from keyword candidates.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "as", "at", "because", "before", "below", "between", "both", "but", "by", "during", "each",
    "else", "few", "for", "from", "further", "he", "her", "here", "him", "his", "how", "i", "if",
    "in", "into", "it", "its", "just", "me", "more", "most", "my", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "out", "over", "own", "same", "she", "so", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "we", "what", "when", "where",
    "which", "while", "who", "whom", "why", "with", "you", "your",
];

/// High-frequency verbs excluded from keyword candidates. Sentiment-bearing
/// verbs live in the main lexicon with a `Verb` tag instead.
const COMMON_VERBS: &[&str] = &[
    "are", "ask", "asked", "asks", "be", "been", "being", "call", "called", "calls", "came", "can",
    "come", "comes", "coming", "could", "did", "do", "does", "doing", "get", "gets", "getting",
    "go", "goes", "going", "got", "had", "happen", "happened", "happens", "has", "have", "having",
    "is", "keep", "keeps", "kept", "knew", "know", "knows", "look", "looked", "looks", "made",
    "make", "makes", "making", "may", "might", "must", "need", "needed", "needs", "said", "saw",
    "say", "says", "see", "seem", "seemed", "seems", "sees", "shall", "should", "start", "started",
    "starts", "stop", "stopped", "stops", "take", "takes", "tell", "tells", "think", "thinks",
    "thought", "told", "took", "tried", "tries", "try", "trying", "use", "used", "uses", "using",
    "want", "wanted", "wants", "was", "went", "were", "will", "work", "worked", "works", "would",
];

/// Look up a normalized token in the sentiment lexicon.
#[must_use]
pub fn lookup(word: &str) -> Option<LexiconEntry> {
    ENTRIES
        .iter()
        .find(|(w, ..)| *w == word)
        .map(|&(_, polarity, subjectivity, tag)| LexiconEntry {
            polarity,
            subjectivity,
            tag,
        })
}

/// Intensity multiplier for a degree modifier, if the token is one.
#[must_use]
pub fn intensifier(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, factor)| factor)
}

/// True when the token flips the polarity of a following sentiment word.
#[must_use]
pub fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word)
}

/// True for function words that never qualify as keywords.
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// True for high-frequency verbs that never qualify as keywords.
#[must_use]
pub fn is_common_verb(word: &str) -> bool {
    COMMON_VERBS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::{COMMON_VERBS, ENTRIES, INTENSIFIERS, NEGATORS, STOP_WORDS, WordTag, lookup};
    use std::collections::HashSet;

    #[test]
    fn entries_have_no_duplicates() {
        let mut seen = HashSet::new();
        for (word, ..) in ENTRIES {
            assert!(seen.insert(*word), "duplicate lexicon entry: {word}");
        }
    }

    #[test]
    fn entries_stay_in_model_ranges() {
        for (word, polarity, subjectivity, _) in ENTRIES {
            assert!(
                (-1.0..=1.0).contains(polarity),
                "polarity out of range for {word}"
            );
            assert!(
                (0.0..=1.0).contains(subjectivity),
                "subjectivity out of range for {word}"
            );
        }
    }

    #[test]
    fn word_classes_do_not_overlap() {
        let lexicon: HashSet<&str> = ENTRIES.iter().map(|(w, ..)| *w).collect();
        for word in STOP_WORDS {
            assert!(!lexicon.contains(word), "{word} is both stop word and entry");
        }
        for word in COMMON_VERBS {
            assert!(!lexicon.contains(word), "{word} is both verb and entry");
        }
        for word in NEGATORS {
            assert!(!lexicon.contains(word), "{word} is both negator and entry");
        }
        for (word, _) in INTENSIFIERS {
            assert!(
                !lexicon.contains(word),
                "{word} is both intensifier and entry"
            );
        }
    }

    #[test]
    fn support_vocabulary_is_covered() {
        let terrible = lookup("terrible").expect("terrible in lexicon");
        assert!(terrible.polarity <= -0.6);
        assert_eq!(terrible.tag, WordTag::Adjective);

        let failing = lookup("failing").expect("failing in lexicon");
        assert!(failing.polarity < 0.0);
        assert_eq!(failing.tag, WordTag::Adjective);

        assert!(lookup("excellent").expect("excellent").polarity > 0.6);
        assert!(lookup("service").is_none());
    }
}
