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

//! Look up translations directly from parsed `.stew` files.

use std::collections::HashMap;

use crate::stew::{catalog_id, is_section, Stew, Translation};

/// Translations by language and catalog identifier.
#[derive(Debug, Default)]
pub struct Lookup<'a> {
    languages: HashMap<&'a str, HashMap<&'a str, &'a Translation>>,
}

impl<'a> Lookup<'a> {
    /// Index `documents`. When several keys give the same identifier,
    /// the first one wins, as in the generated catalogs.
    pub fn new(documents: &'a [Stew]) -> Self {
        let mut languages: HashMap<&str, HashMap<&str, &Translation>> = HashMap::new();
        for stew in documents {
            for key in stew.keys_in_order() {
                let msgid = catalog_id(key);
                if is_section(key) || msgid.is_empty() {
                    continue;
                }
                for (lang, translation) in stew.translations(key).into_iter().flatten() {
                    languages
                        .entry(lang.as_str())
                        .or_default()
                        .entry(msgid)
                        .or_insert(translation);
                }
            }
        }
        Self { languages }
    }

    fn translation(&self, lang: &str, msgid: &str) -> Option<&'a Translation> {
        self.languages.get(lang)?.get(msgid).copied()
    }

    /// The translation of `msgid` into `lang`, or `msgid` itself.
    ///
    /// Plural terms give their first form.
    pub fn get<'s>(&self, lang: &str, msgid: &'s str) -> &'s str
    where
        'a: 's,
    {
        self.translation(lang, msgid)
            .and_then(|translation| translation.texts().next())
            .unwrap_or(msgid)
    }

    /// Plural form `index` of `msgid` in `lang`.
    ///
    /// Falls back to the singular translation, then to `msgid`.
    pub fn get_form<'s>(&self, lang: &str, msgid: &'s str, index: usize) -> &'s str
    where
        'a: 's,
    {
        match self.translation(lang, msgid) {
            Some(Translation::Plural(forms)) => forms.get(&index).map_or(msgid, String::as_str),
            Some(Translation::Singular(text)) => text.as_str(),
            None => msgid,
        }
    }
}

/// Fill in the replacement fields of `template`.
///
/// `{name}` takes the value paired with `name`, `{0}` the first
/// positional argument and `{}` the next positional argument. `{{` and
/// `}}` give literal braces. Substituted values are not scanned again
/// and fields without a value are kept as they are.
pub fn interpolate(template: &str, positional: &[&str], named: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut next_positional = 0;
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        output.push_str(&rest[..start]);
        let brace = &rest[start..start + 1];
        let after = &rest[start + 1..];
        if after.starts_with(brace) {
            output.push_str(brace);
            rest = &after[1..];
            continue;
        }
        if brace == "}" {
            output.push('}');
            rest = after;
            continue;
        }

        let field = after.find('}').and_then(|end| {
            let name = &after[..end];
            let value = if name.is_empty() {
                next_positional += 1;
                positional.get(next_positional - 1).copied()
            } else if name.bytes().all(|b| b.is_ascii_digit()) {
                name.parse::<usize>()
                    .ok()
                    .and_then(|idx| positional.get(idx).copied())
            } else {
                named
                    .iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| *value)
            };
            value.map(|value| (value, end))
        });
        match field {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}
