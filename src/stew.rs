// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing of `.stew` string files.
//!
//! A `.stew` file holds every translation of a product in one place:
//!
//! ```text
//! [[Main Menu]]
//!
//! [open_file]
//!     comment = Shown in the File menu
//!     en = Open...
//!     de = Öffnen...
//!
//! [%(count)d files]
//!     en[0] = %(count)d file
//!     en[1] = %(count)d files
//! ```
//!
//! Lines starting with `[[` are sections, lines starting with `[` are
//! keys and every other non-blank line is `<left> = <right>`, where
//! `<left>` is `comment`, `tags`, a language or a language with a
//! plural form index.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{ParseError, Warning};

pub mod checks;
pub mod line;

pub use line::MetadataKind;
use line::{Line, Target, TargetError};

/// The translation of one key into one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// A term without plural forms.
    Singular(String),
    /// Plural forms by their index, starting at 0.
    Plural(BTreeMap<usize, String>),
}

impl Translation {
    /// All texts of the translation in index order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let (singular, plural) = match self {
            Translation::Singular(text) => (Some(text.as_str()), None),
            Translation::Plural(forms) => (None, Some(forms.values().map(String::as_str))),
        };
        singular.into_iter().chain(plural.into_iter().flatten())
    }
}

/// Translations of a single key, by language.
pub type TranslationSet = BTreeMap<String, Translation>;

/// Returns true if `key` is a `[[section]]` marker.
pub fn is_section(key: &str) -> bool {
    key.starts_with("[[")
}

/// The `msgid` for a key: the key without its brackets.
pub fn catalog_id(key: &str) -> &str {
    key.trim_matches(|c| c == '[' || c == ']')
}

/// State carried from one line to the next while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    /// Before the first key, or right after a section.
    NoKey,
    /// Translation lines belong to this key.
    InKey(String),
}

/// A parsed `.stew` file.
///
/// The document is built once by [`Stew::parse`] or
/// [`Stew::from_source`] and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct Stew {
    path: PathBuf,
    keys_in_order: Vec<String>,
    terms: HashMap<String, TranslationSet>,
    metadata: HashMap<String, BTreeMap<MetadataKind, String>>,
    languages: BTreeSet<String>,
    warnings: Vec<Warning>,
}

impl Stew {
    /// Read and parse the file at `path`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Stew, ParseError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Stew::from_source(path, &source)
    }

    /// Parse `source`, using `path` as the origin of the document.
    pub fn from_source(path: impl Into<PathBuf>, source: &str) -> Result<Stew, ParseError> {
        let mut stew = Stew {
            path: path.into(),
            keys_in_order: Vec::new(),
            terms: HashMap::new(),
            metadata: HashMap::new(),
            languages: BTreeSet::new(),
            warnings: Vec::new(),
        };

        let mut state = ParserState::NoKey;
        for (idx, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            state = stew.process_line(state, idx + 1, line)?;
        }
        stew.check_plural_forms()?;
        stew.languages = stew
            .terms
            .values()
            .flat_map(|translations| translations.keys().cloned())
            .collect();

        log::debug!(
            "Parsed {}: {} keys, languages {:?}",
            stew.path.display(),
            stew.terms.len(),
            stew.languages
        );
        Ok(stew)
    }

    fn process_line(
        &mut self,
        state: ParserState,
        lineno: usize,
        line: &str,
    ) -> Result<ParserState, ParseError> {
        let (left, right) = match Line::classify(line) {
            Line::Section(section) => {
                self.keys_in_order.push(String::from(section));
                return Ok(ParserState::NoKey);
            }
            Line::Key(key) => {
                if self.add_new_key(key) && catalog_id(key).is_empty() {
                    self.record_warning(Warning::EmptyMessageId {
                        path: self.path.clone(),
                        lineno,
                        key: String::from(key),
                    });
                }
                return Ok(ParserState::InKey(String::from(key)));
            }
            Line::Malformed(_) => {
                return Err(ParseError::MissingSeparator {
                    path: self.path.clone(),
                    lineno,
                    line: String::from(line),
                })
            }
            Line::Translation { left, right } => (left, right),
        };

        let ParserState::InKey(key) = &state else {
            return Err(ParseError::OrphanTranslation {
                path: self.path.clone(),
                lineno,
                line: String::from(line),
            });
        };

        let target = line::parse_target(left).map_err(|err| {
            let path = self.path.clone();
            let line = String::from(line);
            match err {
                TargetError::Empty => ParseError::EmptyLanguage { path, lineno, line },
                TargetError::BadIndex => ParseError::InvalidPluralIndex { path, lineno, line },
            }
        })?;

        if line::has_many_dots(right) {
            self.record_warning(Warning::ManyDots {
                path: self.path.clone(),
                lineno,
                line: String::from(line),
            });
        }
        let value = line::normalize_value(right).into_owned();

        match target {
            Target::Metadata(kind) => {
                self.metadata
                    .entry(key.clone())
                    .or_default()
                    .insert(kind, value);
            }
            Target::Singular(lang) => {
                let translations = self.terms.entry(key.clone()).or_default();
                if let Some(Translation::Plural(_)) = translations.get(lang) {
                    return Err(mixed_forms(&self.path, lineno, line));
                }
                translations.insert(String::from(lang), Translation::Singular(value));
            }
            Target::Plural(lang, index) => {
                let translations = self.terms.entry(key.clone()).or_default();
                let forms = translations
                    .entry(String::from(lang))
                    .or_insert_with(|| Translation::Plural(BTreeMap::new()));
                let Translation::Plural(forms) = forms else {
                    return Err(mixed_forms(&self.path, lineno, line));
                };
                forms.insert(index, value);
            }
        }

        Ok(state)
    }

    /// Start a new, empty translation set for `key`.
    ///
    /// A key keeps the position of its first declaration. Returns true
    /// for the first declaration.
    fn add_new_key(&mut self, key: &str) -> bool {
        self.terms.insert(String::from(key), TranslationSet::new());
        if self.keys_in_order.iter().any(|k| k == key) {
            return false;
        }
        self.keys_in_order.push(String::from(key));
        true
    }

    /// Warnings are reported by the caller at the end of a run.
    fn record_warning(&mut self, warning: Warning) {
        log::debug!("{warning}");
        self.warnings.push(warning);
    }

    /// Plural forms must be numbered 0, 1, ..., n-1.
    fn check_plural_forms(&self) -> Result<(), ParseError> {
        for key in &self.keys_in_order {
            let Some(translations) = self.terms.get(key) else {
                continue;
            };
            for (lang, translation) in translations {
                let Translation::Plural(forms) = translation else {
                    continue;
                };
                if let Some(missing) = (0..forms.len()).find(|idx| !forms.contains_key(idx)) {
                    return Err(ParseError::PluralGap {
                        path: self.path.clone(),
                        key: key.clone(),
                        lang: lang.clone(),
                        missing,
                    });
                }
            }
        }
        Ok(())
    }

    /// The file this document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys and sections in the order they first appear.
    pub fn keys_in_order(&self) -> &[String] {
        &self.keys_in_order
    }

    /// The translations of `key`, if it was declared.
    pub fn translations(&self, key: &str) -> Option<&TranslationSet> {
        self.terms.get(key)
    }

    /// The `comment` and `tags` of `key`, in that order.
    pub fn metadata(&self, key: &str) -> impl Iterator<Item = (MetadataKind, &str)> {
        self.metadata
            .get(key)
            .into_iter()
            .flatten()
            .map(|(kind, text)| (*kind, text.as_str()))
    }

    /// Every language with at least one translation.
    pub fn languages(&self) -> &BTreeSet<String> {
        &self.languages
    }

    /// Warnings recorded while parsing or checking.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// All translations into `lang`, by key, in key order.
    pub fn translations_for<'a>(
        &'a self,
        lang: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Translation)> + 'a {
        self.keys_in_order.iter().filter_map(move |key| {
            let translation = self.terms.get(key)?.get(lang)?;
            Some((key.as_str(), translation))
        })
    }
}

fn mixed_forms(path: &Path, lineno: usize, line: &str) -> ParseError {
    ParseError::MixedForms {
        path: path.to_path_buf(),
        lineno,
        line: String::from(line),
    }
}
