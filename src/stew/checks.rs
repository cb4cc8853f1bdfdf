//! Content checks over the values of a parsed document.
//!
//! The checks never fail: problems are recorded as [`Warning`]s for a
//! human to review.

use regex::Regex;
use std::sync::OnceLock;

use super::Stew;
use crate::error::Warning;

fn space_punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s[.,?!:;]").expect("well-formed regex"))
}

fn placeholders_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%\(\d*\w+\)[ds]").expect("well-formed regex"))
}

/// The sorted `%(name)s` placeholders found in `text`.
fn placeholders(text: &str) -> Vec<&str> {
    let mut found = placeholders_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<Vec<_>>();
    found.sort_unstable();
    found
}

/// French typography puts a space before `:`, `;`, `?` and `!`.
fn has_space_before_punctuation(lang: &str, text: &str) -> bool {
    lang != "fr" && space_punctuation_re().is_match(text)
}

impl Stew {
    /// Run every content check and return the warnings found.
    pub fn check_content(&self) -> Vec<Warning> {
        let mut warnings = self.find_spaces_before_punctuation();
        warnings.extend(self.find_wrong_placeholders());
        warnings
    }

    /// Values with whitespace in front of a punctuation mark.
    pub fn find_spaces_before_punctuation(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        for key in self.keys_in_order() {
            for (lang, translation) in self.translations(key).into_iter().flatten() {
                for text in translation.texts() {
                    if has_space_before_punctuation(lang, text) {
                        warnings.push(Warning::SpaceBeforePunctuation {
                            path: self.path().to_path_buf(),
                            key: key.clone(),
                            lang: lang.clone(),
                            text: String::from(text),
                        });
                    }
                }
            }
        }
        warnings
    }

    /// Values whose placeholders differ from the placeholders in the
    /// key.
    pub fn find_wrong_placeholders(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        for key in self.keys_in_order() {
            let expected = placeholders(key);
            for (lang, translation) in self.translations(key).into_iter().flatten() {
                for text in translation.texts() {
                    if placeholders(text) != expected {
                        warnings.push(Warning::WrongPlaceholders {
                            path: self.path().to_path_buf(),
                            key: key.clone(),
                            lang: lang.clone(),
                            text: String::from(text),
                        });
                    }
                }
            }
        }
        warnings
    }
}
