//! The fixed regex correction table used by `deckproof fix`.

use regex::Regex;

/// Known misspellings: word-boundary pattern → replacement,
/// case-insensitive.
const SPELLING_CORRECTIONS: &[(&str, &str)] = &[
    (r"(?i)\biss\b", "is"),
    (r"(?i)\bhavings\b", "has"),
    (r"(?i)\bhaveing\b", "having"),
    (r"(?i)\bissuess\b", "issues"),
    (r"(?i)\btestssss\b", "tests"),
    (r"(?i)\btestsss\b", "tests"),
    (r"(?i)\btestss\b", "tests"),
    (r"(?i)\bteh\b", "the"),
    (r"(?i)\brecieve\b", "receive"),
    (r"(?i)\boccured\b", "occurred"),
    (r"(?i)\bseperately\b", "separately"),
    (r"(?i)\bdefinate\b", "definite"),
    (r"(?i)\boccassion\b", "occasion"),
    (r"(?i)\buntill\b", "until"),
    (r"(?i)\bwich\b", "which"),
    (r"(?i)\bwih\b", "with"),
    (r"(?i)\bwiht\b", "with"),
    (r"(?i)\bthat\s+that\b", "that"),
    (r"(?i)\bthe\s+the\b", "the"),
];

/// Endings tried when collapsing a trailing character repeat; doubled forms
/// come first so "wellll" lands on "well", not "wel".
const REPEAT_ENDINGS: &[&str] = &["ss", "s", "tt", "t", "ee", "e", "ll", "l"];

pub struct SpellChecker {
    rules: Vec<(Regex, &'static str)>,
}

impl SpellChecker {
    pub fn new() -> Self {
        let rules = SPELLING_CORRECTIONS
            .iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("static correction pattern"),
                    *replacement,
                )
            })
            .collect();
        Self { rules }
    }

    /// Correct `text`, returning the fixed string and a log of what
    /// changed. The first log entry is the overall before/after when
    /// anything changed at all.
    pub fn correct(&self, text: &str) -> (String, Vec<String>) {
        let original = text;
        let mut corrections = Vec::new();
        let mut text = text.to_string();

        for (pattern, replacement) in &self.rules {
            let new_text = pattern.replace_all(&text, *replacement).into_owned();
            if new_text != text {
                corrections.push(format!("'{}' -> '{}'", pattern.as_str(), replacement));
                text = new_text;
            }
        }

        let collapsed = collapse_repeats(&text);
        if collapsed != text {
            corrections.push("Fixed repeated characters".into());
            text = collapsed;
        }

        if text != original {
            corrections.insert(0, format!("'{original}' -> '{text}'"));
        }

        (text, corrections)
    }
}

impl Default for SpellChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse words ending in three or more repeats of the same letter
/// ("runnnn" → "run", "wellll" → "well").
fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            word.push(ch);
        } else {
            out.push_str(&fix_word(&word));
            word.clear();
            out.push(ch);
        }
    }
    out.push_str(&fix_word(&word));
    out
}

fn fix_word(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let Some(&last) = chars.last() else {
        return word.to_string();
    };
    if !last.is_ascii_alphabetic() {
        return word.to_string();
    }

    let run = chars.iter().rev().take_while(|&&c| c == last).count();
    if run < 3 {
        return word.to_string();
    }

    let prefix: String = chars[..chars.len() - run].iter().collect();
    for ending in REPEAT_ENDINGS {
        if ending.chars().next() == Some(last) {
            return format!("{prefix}{ending}");
        }
    }
    format!("{prefix}{last}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_corrections_apply() {
        let checker = SpellChecker::new();
        let (fixed, log) = checker.correct("teh report");
        assert_eq!(fixed, "the report");
        assert!(!log.is_empty());
        // Overall before/after is logged first
        assert_eq!(log[0], "'teh report' -> 'the report'");
    }

    #[test]
    fn corrections_are_case_insensitive() {
        let checker = SpellChecker::new();
        let (fixed, _) = checker.correct("Teh cat will recieve mail");
        assert_eq!(fixed, "the cat will receive mail");
    }

    #[test]
    fn doubled_words_collapse() {
        let checker = SpellChecker::new();
        let (fixed, _) = checker.correct("the  the report");
        assert_eq!(fixed, "the report");
    }

    #[test]
    fn clean_text_is_untouched() {
        let checker = SpellChecker::new();
        let (fixed, log) = checker.correct("Quarterly results look strong");
        assert_eq!(fixed, "Quarterly results look strong");
        assert!(log.is_empty());
    }

    #[test]
    fn trailing_repeats_collapse() {
        assert_eq!(collapse_repeats("runnnn"), "run");
        assert_eq!(collapse_repeats("wellll"), "well");
        assert_eq!(collapse_repeats("freeee"), "free");
        // Two repeats are legitimate spelling
        assert_eq!(collapse_repeats("tree"), "tree");
        assert_eq!(collapse_repeats("run"), "run");
    }

    #[test]
    fn repeats_collapse_inside_sentences() {
        let checker = SpellChecker::new();
        let (fixed, log) = checker.correct("we runnnn fast");
        assert_eq!(fixed, "we run fast");
        assert!(log.iter().any(|entry| entry == "Fixed repeated characters"));
    }
}
