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

//! Errors and warnings produced while reading `.stew` files and
//! generating catalogs.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A structural problem with a `.stew` file.
///
/// These are fatal for the document: no catalog is generated from a
/// document which failed to parse.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{}: could not read file: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{lineno}: expected `<language> = <text>`, found {line:?}", .path.display())]
    MissingSeparator {
        path: PathBuf,
        lineno: usize,
        line: String,
    },
    #[error("{}:{lineno}: translation outside of a [key] block: {line:?}", .path.display())]
    OrphanTranslation {
        path: PathBuf,
        lineno: usize,
        line: String,
    },
    #[error("{}:{lineno}: missing language before `=`: {line:?}", .path.display())]
    EmptyLanguage {
        path: PathBuf,
        lineno: usize,
        line: String,
    },
    #[error("{}:{lineno}: invalid plural form index: {line:?}", .path.display())]
    InvalidPluralIndex {
        path: PathBuf,
        lineno: usize,
        line: String,
    },
    #[error(
        "{}:{lineno}: singular and indexed plural forms mixed for one language: {line:?}",
        .path.display()
    )]
    MixedForms {
        path: PathBuf,
        lineno: usize,
        line: String,
    },
    #[error("{}: {key} has no plural form {missing} for {lang}", .path.display())]
    PluralGap {
        path: PathBuf,
        key: String,
        lang: String,
        missing: usize,
    },
}

/// A non-fatal condition collected during a run and reported at the
/// end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A `.stew` file queued for processing does not exist.
    MissingFile { path: PathBuf },
    /// There is no `<lang>/LC_MESSAGES` directory for a language, so
    /// no catalog is written for it.
    MissingLocaleDir { lang: String, path: PathBuf },
    /// A value contains four or more consecutive dots.
    ManyDots {
        path: PathBuf,
        lineno: usize,
        line: String,
    },
    /// A key is empty once its brackets are removed. It would clash
    /// with the catalog header, so it is left out of the catalogs.
    EmptyMessageId {
        path: PathBuf,
        lineno: usize,
        key: String,
    },
    /// A key gives the same `msgid` as an earlier key. Only the first
    /// one is written to the catalog.
    DuplicateMessage {
        path: PathBuf,
        key: String,
        lang: String,
    },
    /// A value has whitespace in front of a punctuation mark.
    SpaceBeforePunctuation {
        path: PathBuf,
        key: String,
        lang: String,
        text: String,
    },
    /// The `%(name)s` placeholders of a value differ from the key.
    WrongPlaceholders {
        path: PathBuf,
        key: String,
        lang: String,
        text: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::MissingFile { path } => write!(f, "File not found: {}", path.display()),
            Warning::MissingLocaleDir { lang, path } => write!(
                f,
                "No localization directory exists for language {lang}, looked in {}. \
                 Create it (for example with `mkdir -p {}`) to generate a catalog. \
                 For now the language {lang} is ignored.",
                path.display(),
                path.display(),
            ),
            Warning::ManyDots { path, lineno, line } => write!(
                f,
                "{}:{lineno}: 4 or more dots in the string: {line}",
                path.display()
            ),
            Warning::EmptyMessageId { path, lineno, key } => write!(
                f,
                "{}:{lineno}: {key} gives an empty msgid and is not written to the catalogs",
                path.display()
            ),
            Warning::DuplicateMessage { path, key, lang } => write!(
                f,
                "{}: {key} duplicates an earlier msgid and is left out of the {lang} catalog",
                path.display()
            ),
            Warning::SpaceBeforePunctuation {
                path,
                key,
                lang,
                text,
            } => write!(
                f,
                "{}: {key}: space before a punctuation mark in {lang}: {text}",
                path.display()
            ),
            Warning::WrongPlaceholders {
                path,
                key,
                lang,
                text,
            } => write!(
                f,
                "{}: {key}: placeholders in {lang} do not match the key: {text}",
                path.display()
            ),
        }
    }
}
