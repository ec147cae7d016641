//! Text normalization ahead of comparison.
//!
//! The pipeline runs in a fixed order:
//! 1. lower-case (typographic apostrophes fold to `'`)
//! 2. split on whitespace and strip each word's punctuation, keeping apostrophes
//! 3. expand informal contractions and short forms, word by word
//! 4. join the remaining words with single spaces
//!
//! Contractions are matched against whole words once each word has lost its
//! punctuation, so `"Don't!"` expands while `"cost"` is left alone. The
//! expansions themselves contain no table entries, which makes the pipeline
//! idempotent.

/// Informal English forms and their expansions.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("i'm", "i am"),
    ("you're", "you are"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("it's", "it is"),
    ("we're", "we are"),
    ("they're", "they are"),
    ("i've", "i have"),
    ("you've", "you have"),
    ("we've", "we have"),
    ("they've", "they have"),
    ("i'll", "i will"),
    ("you'll", "you will"),
    ("he'll", "he will"),
    ("she'll", "she will"),
    ("we'll", "we will"),
    ("they'll", "they will"),
    ("i'd", "i would"),
    ("you'd", "you would"),
    ("he'd", "he would"),
    ("she'd", "she would"),
    ("we'd", "we would"),
    ("they'd", "they would"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("shouldn't", "should not"),
    ("mightn't", "might not"),
    ("mustn't", "must not"),
    ("let's", "let us"),
    ("that's", "that is"),
    ("who's", "who is"),
    ("what's", "what is"),
    ("here's", "here is"),
    ("there's", "there is"),
    ("where's", "where is"),
    ("wanna", "want to"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("kinda", "kind of"),
    ("sorta", "sort of"),
    ("outta", "out of"),
    ("lotsa", "lots of"),
    ("coulda", "could have"),
    ("woulda", "would have"),
    ("shoulda", "should have"),
    ("musta", "must have"),
    ("'cause", "because"),
    ("cuz", "because"),
    ("cos", "because"),
];

/// Canonicalize text for word-level comparison.
///
/// Empty input, or input made only of punctuation, yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = fold_apostrophes(&text.to_lowercase());
    let mut out = String::with_capacity(lowered.len());

    for raw in lowered.split_whitespace() {
        let word = strip_punctuation(raw);
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(expansion(&word).unwrap_or(&word));
    }

    out
}

/// Lower-case `text` and expand contractions, leaving punctuation in place.
pub fn expand_contractions(text: &str) -> String {
    let lowered = fold_apostrophes(&text.to_lowercase());
    lowered
        .split_whitespace()
        .map(|word| expansion(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove every character that is not alphanumeric, whitespace or `'`.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect()
}

fn expansion(word: &str) -> Option<&'static str> {
    CONTRACTIONS
        .iter()
        .find(|(short, _)| *short == word)
        .map(|(_, long)| *long)
}

fn fold_apostrophes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("Hello, how are you today?"), "hello how are you today");
        assert_eq!(normalize("  Wait...   what?!  "), "wait what");
    }

    #[test]
    fn test_contractions_expand() {
        assert_eq!(normalize("I'm gonna go"), "i am going to go");
        assert_eq!(normalize("Don't stop 'cause I can't"), "do not stop because i cannot");
        assert_eq!(normalize("She's here"), "she is here");
    }

    #[test]
    fn test_contraction_with_trailing_punctuation() {
        assert_eq!(normalize("No, I won't!"), "no i will not");
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(normalize("It\u{2019}s fine"), "it is fine");
    }

    #[test]
    fn test_words_containing_short_forms_untouched() {
        assert_eq!(normalize("The cost of cosmic dust"), "the cost of cosmic dust");
    }

    #[test]
    fn test_apostrophe_kept() {
        assert_eq!(normalize("The dog's bone."), "the dog's bone");
    }

    #[test]
    fn test_accented_letters_survive() {
        assert_eq!(normalize("Você está bem?"), "você está bem");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!... --"), "");
    }

    #[test]
    fn test_expand_contractions_keeps_punctuation() {
        assert_eq!(expand_contractions("I'm   OK."), "i am ok.");
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("it's-a me, Mario!"), "it'sa me Mario");
    }

    fn phrase() -> impl Strategy<Value = String> {
        let words: Vec<&'static str> = CONTRACTIONS
            .iter()
            .map(|(short, _)| *short)
            .chain(["Hello", "world", "co-s", "gon.na", "'", "WON'T!", "\u{2019}cause"])
            .collect();
        prop::collection::vec(prop::sample::select(words), 0..8).prop_map(|w| w.join(" "))
    }

    proptest! {
        #[test]
        fn test_idempotent_on_any_text(text in "\\PC{0,40}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn test_idempotent_on_contraction_heavy_text(text in phrase()) {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn test_output_is_trimmed_and_single_spaced(text in "[a-zA-Z',.!? \t]{0,40}") {
            let out = normalize(&text);
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(!out.contains("  "));
        }
    }
}
