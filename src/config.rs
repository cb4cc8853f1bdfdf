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

//! Configuration for catalog generation.
//!
//! The configuration is read from a TOML file, usually `stew.toml`:
//!
//! ```toml
//! priority-languages = ["en", "en-GB", "ru"]
//! domain = "django"
//! project-id-version = "My Product 1.0"
//!
//! [plural-forms]
//! uk = "nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);"
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Name of the configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "stew.toml";

/// Plural rule used for languages without an entry in the table.
pub const DEFAULT_PLURAL_RULE: &str = "nplurals=2; plural=(n != 1);";

const BUILTIN_PLURAL_RULES: &[(&str, &str)] = &[
    (
        "ru",
        "nplurals=4; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && \
         (n%100<12 || n%100>14) ? 1 : n%10==0 || (n%10>=5 && n%10<=9) || \
         (n%100>=11 && n%100<=14)? 2 : 3);",
    ),
    (
        "pl",
        "nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);",
    ),
    ("es", DEFAULT_PLURAL_RULE),
    ("de", DEFAULT_PLURAL_RULE),
    ("it", DEFAULT_PLURAL_RULE),
    ("nl", DEFAULT_PLURAL_RULE),
    ("fr", "nplurals=2; plural=(n > 1);"),
    ("tr", "nplurals=2; plural=(n > 1);"),
];

const DEFAULT_PRIORITY_LANGUAGES: &[&str] = &["en", "en-GB", "ru"];

/// Parameters for generating catalogs and rewriting `.stew` files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Languages written first, in this order, when rewriting a
    /// `.stew` file. All other languages follow alphabetically.
    pub priority_languages: Vec<String>,
    /// Catalogs are written to `<lang>/LC_MESSAGES/<domain>.po`.
    pub domain: String,
    /// Value of the `Project-Id-Version` header.
    pub project_id_version: String,
    /// Start the entries of every `.stew` file with a `### from` comment.
    pub source_banners: bool,
    /// Rewrite the `.stew` files in normalized form after generation.
    pub rewrite_sources: bool,
    /// Check placeholders and punctuation and report the findings.
    pub content_checks: bool,
    /// Extra or replacement `Plural-Forms` rules by language.
    pub plural_forms: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            priority_languages: DEFAULT_PRIORITY_LANGUAGES
                .iter()
                .map(|lang| String::from(*lang))
                .collect(),
            domain: String::from("django"),
            project_id_version: String::from("PACKAGE VERSION"),
            source_banners: true,
            rewrite_sources: true,
            content_checks: true,
            plural_forms: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Config> {
        toml::from_str(text).context("Could not parse configuration")
    }

    /// Read the configuration file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Config::from_toml(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Read `path` if given, otherwise `stew.toml` if it exists,
    /// otherwise use the defaults.
    pub fn discover(path: Option<&Path>) -> anyhow::Result<Config> {
        match path {
            Some(path) => Config::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                log::debug!("Using {DEFAULT_CONFIG_FILE}");
                Config::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Config::default()),
        }
    }

    /// The language ordering for rewritten `.stew` files.
    pub fn language_order(&self) -> LanguageOrder {
        LanguageOrder::new(self.priority_languages.iter().cloned())
    }

    /// The `Plural-Forms` rules: built-in rules with the configured
    /// rules on top.
    pub fn plural_rules(&self) -> PluralRules {
        let mut rules = PluralRules::default();
        for (lang, rule) in &self.plural_forms {
            rules.insert(lang.clone(), rule.clone());
        }
        rules
    }
}

/// Two-tier language order: priority languages first, then the rest
/// alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOrder {
    priority: Vec<String>,
}

impl LanguageOrder {
    pub fn new(priority: impl IntoIterator<Item = String>) -> Self {
        Self {
            priority: priority.into_iter().collect(),
        }
    }

    /// Sort `languages` in two tiers.
    ///
    /// Priority languages which are not among `languages` are left out.
    pub fn sort<'a>(&'a self, languages: &'a BTreeSet<String>) -> Vec<&'a str> {
        let priority = self
            .priority
            .iter()
            .filter(|lang| languages.contains(*lang))
            .map(String::as_str);
        let rest = languages
            .iter()
            .filter(|lang| !self.priority.contains(lang))
            .map(String::as_str);
        priority.chain(rest).collect()
    }
}

impl Default for LanguageOrder {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_LANGUAGES.iter().map(|lang| String::from(*lang)))
    }
}

/// `Plural-Forms` header values by language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRules {
    rules: BTreeMap<String, String>,
}

impl PluralRules {
    /// A table without any rules: every language gets the default.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, lang: String, rule: String) {
        self.rules.insert(lang, rule);
    }

    /// The rule for `lang`, falling back to [`DEFAULT_PLURAL_RULE`].
    pub fn get(&self, lang: &str) -> &str {
        self.rules
            .get(lang)
            .map(String::as_str)
            .unwrap_or(DEFAULT_PLURAL_RULE)
    }
}

impl Default for PluralRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        for (lang, rule) in BUILTIN_PLURAL_RULES {
            rules.insert(String::from(*lang), String::from(*rule));
        }
        rules
    }
}
