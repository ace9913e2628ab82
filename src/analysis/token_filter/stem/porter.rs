//! Porter stemming algorithm implementation.
//!
//! This module implements the Porter (1980) suffix-stripping algorithm with
//! the rule set of the reference implementation (`bli` -> `ble`,
//! `logi` -> `log` in step 2).
//!
//! # Algorithm
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, terminal y -> i
//! 2. -ational -> -ate, -tional -> -tion, etc.
//! 3. -icate -> -ic, -ative -> "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and reduce -ll
//!
//! Words are processed as sequences of characters, so non-ASCII input is
//! safe: any character other than a vowel counts as a consonant.
//!
//! # Examples
//!
//! ```
//! use bugprep::analysis::token_filter::stem::Stemmer;
//! use bugprep::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm implementation.
///
/// Stateless; one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

/// Check if the character at `pos` is a consonant.
///
/// `y` is a consonant at the start of a word or after a vowel.
fn is_consonant(word: &[char], pos: usize) -> bool {
    match word[pos] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => pos == 0 || !is_consonant(word, pos - 1),
        _ => true,
    }
}

/// Calculate the measure of a word (number of VC sequences).
fn measure(word: &[char]) -> usize {
    (1..word.len())
        .filter(|&i| is_consonant(word, i) && !is_consonant(word, i - 1))
        .count()
}

fn contains_vowel(word: &[char]) -> bool {
    (0..word.len()).any(|i| !is_consonant(word, i))
}

fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

fn ends_with_double_consonant(word: &[char]) -> bool {
    let len = word.len();
    len >= 2 && word[len - 1] == word[len - 2] && is_consonant(word, len - 1)
}

/// Consonant-vowel-consonant ending, where the last consonant is not w, x or y.
fn ends_cvc(word: &[char]) -> bool {
    let len = word.len();
    len >= 3
        && is_consonant(word, len - 3)
        && !is_consonant(word, len - 2)
        && is_consonant(word, len - 1)
        && !matches!(word[len - 1], 'w' | 'x' | 'y')
}

fn replace_suffix(word: &mut Vec<char>, suffix_len: usize, replacement: &str) {
    word.truncate(word.len() - suffix_len);
    word.extend(replacement.chars());
}

fn step1a(word: &mut Vec<char>) {
    if ends_with(word, "sses") {
        replace_suffix(word, 4, "ss");
    } else if ends_with(word, "ies") {
        replace_suffix(word, 3, "i");
    } else if ends_with(word, "ss") {
        // unchanged
    } else if ends_with(word, "s") {
        word.pop();
    }
}

fn step1b(word: &mut Vec<char>) {
    if ends_with(word, "eed") {
        if measure(&word[..word.len() - 3]) > 0 {
            word.pop();
        }
        return;
    }

    let suffix_len = if ends_with(word, "ed") {
        2
    } else if ends_with(word, "ing") {
        3
    } else {
        return;
    };

    let stem_len = word.len() - suffix_len;
    if !contains_vowel(&word[..stem_len]) {
        return;
    }
    word.truncate(stem_len);

    if ends_with(word, "at") || ends_with(word, "bl") || ends_with(word, "iz") {
        word.push('e');
    } else if ends_with_double_consonant(word) {
        if !matches!(word.last(), Some('l' | 's' | 'z')) {
            word.pop();
        }
    } else if measure(word) == 1 && ends_cvc(word) {
        word.push('e');
    }
}

fn step1c(word: &mut [char]) {
    let len = word.len();
    if ends_with(word, "y") && contains_vowel(&word[..len - 1]) {
        word[len - 1] = 'i';
    }
}

/// Apply the first rule whose suffix matches, if its stem has measure > 0.
fn apply_rules(word: &mut Vec<char>, rules: &[(&str, &str)]) {
    for (suffix, replacement) in rules {
        if ends_with(word, suffix) {
            if measure(&word[..word.len() - suffix.len()]) > 0 {
                replace_suffix(word, suffix.len(), replacement);
            }
            return;
        }
    }
}

fn step4(word: &mut Vec<char>) {
    for suffix in STEP4_SUFFIXES {
        if ends_with(word, suffix) {
            let stem_len = word.len() - suffix.len();
            // -ion is only removed after s or t
            if *suffix == "ion" && !matches!(word[..stem_len].last(), Some('s' | 't')) {
                return;
            }
            if measure(&word[..stem_len]) > 1 {
                word.truncate(stem_len);
            }
            return;
        }
    }
}

fn step5(word: &mut Vec<char>) {
    if ends_with(word, "e") {
        let stem = &word[..word.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            word.pop();
        }
    }

    if ends_with(word, "ll") && measure(word) > 1 {
        word.pop();
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        let mut chars: Vec<char> = lower.chars().collect();
        if chars.len() <= 2 {
            return lower;
        }

        step1a(&mut chars);
        step1b(&mut chars);
        step1c(&mut chars);
        apply_rules(&mut chars, STEP2_RULES);
        apply_rules(&mut chars, STEP3_RULES);
        step4(&mut chars);
        step5(&mut chars);

        chars.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
