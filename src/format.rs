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

//! Write a parsed `.stew` file back in normalized form.
//!
//! The normalized form indents keys by two spaces and their lines by
//! four spaces, separates blocks with one blank line and sorts the
//! translations of each key with a [`LanguageOrder`]. Parsing the
//! normalized form gives back the same document.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;

use crate::config::LanguageOrder;
use crate::stew::{is_section, Stew, Translation};

/// Render `stew` in normalized form.
///
/// If `only_languages` is given, translations into other languages are
/// left out.
pub fn normalized(stew: &Stew, order: &LanguageOrder, only_languages: Option<&[String]>) -> String {
    let languages = order
        .sort(stew.languages())
        .into_iter()
        .filter(|lang| only_languages.map_or(true, |only| only.iter().any(|l| l == lang)))
        .collect::<Vec<_>>();

    let mut output = String::new();
    let mut before_block = "";
    for key in stew.keys_in_order() {
        if is_section(key) {
            let _ = writeln!(output, "{before_block}{key}");
            before_block = "\n";
            continue;
        }
        let Some(translations) = stew.translations(key) else {
            continue;
        };

        let _ = writeln!(output, "{before_block}  {key}");
        before_block = "\n";

        for (kind, text) in stew.metadata(key) {
            let _ = writeln!(output, "    {} = {text}", kind.as_str());
        }
        for lang in &languages {
            match translations.get(*lang) {
                None => {}
                Some(Translation::Singular(text)) => {
                    let _ = writeln!(output, "    {lang} = {text}");
                }
                Some(Translation::Plural(forms)) => {
                    for (idx, text) in forms {
                        let _ = writeln!(output, "    {lang}[{idx}] = {text}");
                    }
                }
            }
        }
    }
    output
}

/// Rewrite `stew` in normalized form to `target`, or to the file it
/// was read from.
pub fn write_formatted(
    stew: &Stew,
    order: &LanguageOrder,
    target: Option<&Path>,
    only_languages: Option<&[String]>,
) -> anyhow::Result<()> {
    let target = target.unwrap_or_else(|| stew.path());
    let output = normalized(stew, order, only_languages);
    std::fs::write(target, output)
        .with_context(|| format!("Could not write {}", target.display()))?;
    log::debug!("Rewrote {}", target.display());
    Ok(())
}
