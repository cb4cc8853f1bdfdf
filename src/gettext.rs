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

//! Generate Gettext catalogs from parsed `.stew` files.
//!
//! This file contains main logic used by `stew-gettext generate`.

use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::Config;
use crate::error::{ParseError, Warning};
use crate::format;
use crate::stew::{catalog_id, is_section, MetadataKind, Stew, Translation};

const STEW_EXTENSION: &str = "stew";

/// Escape `\` and `"` for use inside a quoted catalog string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The header of the catalog for `lang`.
///
/// The header does not depend on the messages. It is written once
/// before the body.
pub fn catalog_header(lang: &str, project_id_version: &str, plural_rule: &str) -> String {
    format!(
        "# Automatically generated from .stew files.\n\
         # Do not modify this file manually! Edit the .stew files instead and\n\
         # regenerate the catalogs with `stew-gettext generate`. Commit changes\n\
         # to the .stew files separately from the regenerated catalogs.\n\
         msgid \"\"\n\
         msgstr \"\"\n\
         \"Project-Id-Version: {project_id_version}\\n\"\n\
         \"Report-Msgid-Bugs-To: \\n\"\n\
         \"POT-Creation-Date: \\n\"\n\
         \"PO-Revision-Date: \\n\"\n\
         \"Last-Translator: \\n\"\n\
         \"Language-Team: \\n\"\n\
         \"Language: {lang}\\n\"\n\
         \"MIME-Version: 1.0\\n\"\n\
         \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
         \"Content-Transfer-Encoding: 8bit\\n\"\n\
         \"Plural-Forms: {plural_rule}\\n\"\n\
         \n"
    )
}

fn metadata_line(kind: MetadataKind, text: &str) -> String {
    match kind {
        MetadataKind::Comment => format!("# {text}\n"),
        MetadataKind::Tags => format!("# tags: {text}\n"),
    }
}

/// One step of a catalog body.
enum BodyItem<'a> {
    /// The start of a document.
    Banner(&'a Stew),
    /// A key without a translation set, kept as a comment.
    Passthrough(&'a str),
    Entry {
        stew: &'a Stew,
        key: &'a str,
        translation: &'a Translation,
    },
    /// A key whose `msgid` was already used by an earlier key.
    Duplicate { stew: &'a Stew, key: &'a str },
}

/// The catalog fragments for one translated key of `stew`.
fn entry_fragments(stew: &Stew, key: &str, translation: &Translation) -> Vec<String> {
    let mut fragments = stew
        .metadata(key)
        .map(|(kind, text)| metadata_line(kind, text))
        .collect::<Vec<_>>();
    let msgid = escape(catalog_id(key));
    fragments.push(format!("msgid \"{msgid}\"\n"));
    match translation {
        Translation::Plural(forms) if forms.len() > 1 => {
            fragments.push(format!("msgid_plural \"{msgid}\"\n"));
            for (idx, form) in forms {
                fragments.push(format!("msgstr[{idx}] \"{}\"\n", escape(form)));
            }
        }
        _ => {
            let text = translation.texts().next().unwrap_or_default();
            fragments.push(format!("msgstr \"{}\"\n", escape(text)));
        }
    }
    fragments.push(String::from("\n"));
    fragments
}

/// Produces catalog bodies from a set of parsed `.stew` files.
///
/// The generator only reads the documents. Every call to
/// [`CatalogGenerator::body`] starts a fresh sequence.
#[derive(Debug, Clone, Copy)]
pub struct CatalogGenerator<'a> {
    documents: &'a [Stew],
    source_banners: bool,
    banner_root: Option<&'a Path>,
}

impl<'a> CatalogGenerator<'a> {
    pub fn new(documents: &'a [Stew]) -> Self {
        Self {
            documents,
            source_banners: false,
            banner_root: None,
        }
    }

    /// Start the entries of every document with a `### from <path>`
    /// comment. Paths are shown relative to `root` when possible.
    pub fn with_source_banners(mut self, root: Option<&'a Path>) -> Self {
        self.source_banners = true;
        self.banner_root = root;
        self
    }

    /// The union of the languages of all documents.
    pub fn languages(&self) -> BTreeSet<&'a str> {
        self.documents
            .iter()
            .flat_map(|stew| stew.languages().iter().map(String::as_str))
            .collect()
    }

    /// Walk the documents and keys for `lang`.
    ///
    /// Sections, keys without a translation into `lang` and keys with
    /// an empty `msgid` are skipped. The first key wins when several
    /// give the same `msgid`.
    fn items<'b>(&'b self, lang: &'b str) -> impl Iterator<Item = BodyItem<'b>> + 'b {
        let documents: &'b [Stew] = self.documents;
        let mut seen = HashSet::new();
        documents
            .iter()
            .flat_map(move |stew| {
                let keys = stew.keys_in_order().iter().filter_map(move |key| {
                    let key = key.as_str();
                    if is_section(key) || catalog_id(key).is_empty() {
                        return None;
                    }
                    let Some(translations) = stew.translations(key) else {
                        return Some(BodyItem::Passthrough(key));
                    };
                    let translation = translations.get(lang)?;
                    Some(BodyItem::Entry {
                        stew,
                        key,
                        translation,
                    })
                });
                std::iter::once(BodyItem::Banner(stew)).chain(keys)
            })
            .map(move |item| match item {
                BodyItem::Entry { stew, key, .. } if !seen.insert(catalog_id(key)) => {
                    BodyItem::Duplicate { stew, key }
                }
                item => item,
            })
    }

    /// The body of the catalog for `lang`, one fragment at a time.
    pub fn body<'b>(&'b self, lang: &'b str) -> impl Iterator<Item = String> + 'b {
        let banner_root: Option<&'b Path> = self.banner_root;
        let source_banners = self.source_banners;
        self.items(lang).flat_map(move |item| match item {
            BodyItem::Banner(stew) if source_banners => {
                let path = banner_root
                    .and_then(|root| stew.path().strip_prefix(root).ok())
                    .unwrap_or_else(|| stew.path());
                vec![format!("\n### from {}\n\n", path.display())]
            }
            BodyItem::Passthrough(key) => vec![format!("# {key}\n")],
            BodyItem::Entry {
                stew,
                key,
                translation,
            } => entry_fragments(stew, key, translation),
            BodyItem::Banner(_) | BodyItem::Duplicate { .. } => Vec::new(),
        })
    }

    /// Keys left out of the catalog for `lang` because an earlier key
    /// has the same `msgid`.
    pub fn duplicates(&self, lang: &str) -> Vec<Warning> {
        self.items(lang)
            .filter_map(|item| match item {
                BodyItem::Duplicate { stew, key } => Some(Warning::DuplicateMessage {
                    path: stew.path().to_path_buf(),
                    key: String::from(key),
                    lang: String::from(lang),
                }),
                _ => None,
            })
            .collect()
    }

    /// Write `header` followed by the body for `lang`.
    pub fn write_catalog<W: Write>(&self, mut writer: W, lang: &str, header: &str) -> io::Result<()> {
        writer.write_all(header.as_bytes())?;
        for fragment in self.body(lang) {
            writer.write_all(fragment.as_bytes())?;
        }
        writer.flush()
    }
}

/// The outcome of processing a locale directory.
#[derive(Debug, Default)]
pub struct Report {
    /// Catalogs written, in language order.
    pub written: Vec<PathBuf>,
    /// Everything a human should look at.
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn extend(&mut self, other: Report) {
        self.written.extend(other.written);
        self.warnings.extend(other.warnings);
    }
}

/// Find all `.stew` files below `dir`, sorted by path.
///
/// Symbolic links to directories are not followed.
fn discover_stew_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Could not list {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            files.extend(discover_stew_files(&path)?);
        } else if path.is_file() && path.extension() == Some(STEW_EXTENSION.as_ref()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// A locale directory with its `.stew` files.
///
/// Catalogs are written to `<root>/<lang>/LC_MESSAGES/<domain>.po`.
#[derive(Debug)]
pub struct LocaleDir {
    root: PathBuf,
    config: Config,
    documents: Vec<Stew>,
    warnings: Vec<Warning>,
}

impl LocaleDir {
    /// Parse every `.stew` file below `root`.
    ///
    /// Fails if any of the files cannot be parsed. A missing `root` is
    /// only a warning.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> anyhow::Result<LocaleDir> {
        let mut locale_dir = LocaleDir {
            root: root.into(),
            config,
            documents: Vec::new(),
            warnings: Vec::new(),
        };
        if !locale_dir.root.is_dir() {
            locale_dir.warnings.push(Warning::MissingFile {
                path: locale_dir.root.clone(),
            });
            return Ok(locale_dir);
        }
        for path in discover_stew_files(&locale_dir.root)? {
            locale_dir.add_to_process_queue(&path)?;
        }
        Ok(locale_dir)
    }

    /// Parse the `.stew` file at `path` and add it to the documents.
    pub fn add_to_process_queue(&mut self, path: &Path) -> Result<(), ParseError> {
        if !path.exists() {
            self.warnings.push(Warning::MissingFile {
                path: path.to_path_buf(),
            });
            return Ok(());
        }
        log::info!("Reading {}", path.display());
        self.documents.push(Stew::parse(path)?);
        Ok(())
    }

    pub fn documents(&self) -> &[Stew] {
        &self.documents
    }

    /// The directory holding the catalog for `lang`.
    pub fn catalog_dir(&self, lang: &str) -> PathBuf {
        self.root.join(lang).join("LC_MESSAGES")
    }

    fn generator(&self) -> CatalogGenerator<'_> {
        let generator = CatalogGenerator::new(&self.documents);
        if self.config.source_banners {
            generator.with_source_banners(Some(&self.root))
        } else {
            generator
        }
    }

    /// Write one catalog per language, then rewrite the `.stew` files
    /// in normalized form.
    pub fn process(self) -> anyhow::Result<Report> {
        let mut report = Report {
            written: Vec::new(),
            warnings: self.warnings.clone(),
        };
        for stew in &self.documents {
            report.warnings.extend_from_slice(stew.warnings());
        }

        let generator = self.generator();
        let plural_rules = self.config.plural_rules();
        for lang in generator.languages() {
            let dir = self.catalog_dir(lang);
            if !dir.is_dir() {
                report.warnings.push(Warning::MissingLocaleDir {
                    lang: String::from(lang),
                    path: dir,
                });
                continue;
            }

            let path = dir.join(format!("{}.po", self.config.domain));
            let header =
                catalog_header(lang, &self.config.project_id_version, plural_rules.get(lang));
            let file = File::create(&path)
                .with_context(|| format!("Could not create {}", path.display()))?;
            generator
                .write_catalog(BufWriter::new(file), lang, &header)
                .with_context(|| format!("Could not write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            report.written.push(path);
            report.warnings.extend(generator.duplicates(lang));
        }

        if self.config.rewrite_sources {
            let order = self.config.language_order();
            for stew in &self.documents {
                format::write_formatted(stew, &order, None, None)?;
            }
        }

        if self.config.content_checks {
            for stew in &self.documents {
                report.warnings.extend(stew.check_content());
            }
        }

        for warning in &report.warnings {
            log::warn!("{warning}");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polib::message::MessageView;
    use pretty_assertions::assert_eq;

    const STRING_ONE: &str = "\
[string_one]
    en = String one
    ru[0] = %s машина стол
    ru[1] = %s машины стола
    ru[2] = %s машин столов
    ru[3] = %s машины столам
";

    fn parse(source: &str) -> Stew {
        Stew::from_source("locale/strings.stew", source).unwrap()
    }

    fn body(documents: &[Stew], lang: &str) -> Vec<String> {
        CatalogGenerator::new(documents).body(lang).collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape(r"C:\"), r"C:\\");
        assert_eq!(escape(r#"say \"hi\""#), r#"say \\\"hi\\\""#);
    }

    #[test]
    fn test_body_singular() {
        let documents = [parse(STRING_ONE)];
        assert_eq!(
            body(&documents, "en"),
            &["msgid \"string_one\"\n", "msgstr \"String one\"\n", "\n"]
        );
    }

    #[test]
    fn test_body_plural() {
        let documents = [parse(STRING_ONE)];
        assert_eq!(
            body(&documents, "ru"),
            &[
                "msgid \"string_one\"\n",
                "msgid_plural \"string_one\"\n",
                "msgstr[0] \"%s машина стол\"\n",
                "msgstr[1] \"%s машины стола\"\n",
                "msgstr[2] \"%s машин столов\"\n",
                "msgstr[3] \"%s машины столам\"\n",
                "\n",
            ]
        );
    }

    #[test]
    fn test_body_plural_sorted_by_index() {
        let documents = [parse("[cars]\nru[1] = one\nru[0] = zero\n")];
        let fragments = body(&documents, "ru");
        assert_eq!(fragments[2], "msgstr[0] \"zero\"\n");
        assert_eq!(fragments[3], "msgstr[1] \"one\"\n");
    }

    #[test]
    fn test_body_single_plural_form_is_singular() {
        let documents = [parse("[cars]\nja[0] = 車\n")];
        assert_eq!(
            body(&documents, "ja"),
            &["msgid \"cars\"\n", "msgstr \"車\"\n", "\n"]
        );
    }

    #[test]
    fn test_body_missing_language() {
        let documents = [parse(STRING_ONE)];
        assert!(body(&documents, "de").is_empty());
    }

    #[test]
    fn test_body_metadata_and_sections() {
        let documents = [parse(
            "[[Menu]]\n\
             [open]\n\
             comment = File menu\n\
             tags = menu\n\
             en = Open...\n\
             [close]\n\
             comment = Only in German\n\
             de = Schließen\n",
        )];
        assert_eq!(
            body(&documents, "en"),
            &[
                "# File menu\n",
                "# tags: menu\n",
                "msgid \"open\"\n",
                "msgstr \"Open…\"\n",
                "\n",
            ]
        );
    }

    #[test]
    fn test_body_escapes_quotes() {
        let documents = [parse("[say \"hi\"]\nen = Say \"hi\"\n")];
        assert_eq!(
            body(&documents, "en"),
            &[
                "msgid \"say \\\"hi\\\"\"\n",
                "msgstr \"Say \\\"hi\\\"\"\n",
                "\n"
            ]
        );
    }

    #[test]
    fn test_body_escapes_backslashes() {
        let documents = [parse(concat!(
            "[path]\n",
            r"en = C:\",
            "\n[quoted]\n",
            r#"en = say \"hi\""#,
            "\n"
        ))];
        assert_eq!(
            body(&documents, "en"),
            &[
                "msgid \"path\"\n",
                concat!(r#"msgstr "C:\\""#, "\n"),
                "\n",
                "msgid \"quoted\"\n",
                concat!(r#"msgstr "say \\\"hi\\\"""#, "\n"),
                "\n",
            ]
        );
    }

    #[test]
    fn test_body_skips_duplicate_message_ids() {
        let documents = [
            Stew::from_source("a.stew", "[a]\nen = One\n[a]]\nen = Two\n[]\nen = Empty\n")
                .unwrap(),
            Stew::from_source("b.stew", "[a]\nen = Three\nde = Drei\n").unwrap(),
        ];
        let generator = CatalogGenerator::new(&documents);
        assert_eq!(
            generator.body("en").collect::<Vec<_>>(),
            &["msgid \"a\"\n", "msgstr \"One\"\n", "\n"]
        );
        assert_eq!(
            generator.duplicates("en"),
            &[
                Warning::DuplicateMessage {
                    path: PathBuf::from("a.stew"),
                    key: String::from("[a]]"),
                    lang: String::from("en"),
                },
                Warning::DuplicateMessage {
                    path: PathBuf::from("b.stew"),
                    key: String::from("[a]"),
                    lang: String::from("en"),
                },
            ]
        );
        // The German entry comes from the first key translated into German.
        assert_eq!(
            generator.body("de").collect::<Vec<_>>(),
            &["msgid \"a\"\n", "msgstr \"Drei\"\n", "\n"]
        );
        assert!(generator.duplicates("de").is_empty());
    }

    #[test]
    fn test_body_placeholder_key() {
        let documents = [parse("[placeholder]\n")];
        assert!(body(&documents, "en").is_empty());
    }

    #[test]
    fn test_body_multiple_documents_with_banners() {
        let documents = [
            Stew::from_source("locale/a.stew", "[a]\nen = A\n").unwrap(),
            Stew::from_source("locale/sub/b.stew", "[b]\nen = B\n").unwrap(),
        ];
        let generator =
            CatalogGenerator::new(&documents).with_source_banners(Some(Path::new("locale")));
        assert_eq!(
            generator.body("en").collect::<Vec<_>>(),
            &[
                "\n### from a.stew\n\n",
                "msgid \"a\"\n",
                "msgstr \"A\"\n",
                "\n",
                "\n### from sub/b.stew\n\n",
                "msgid \"b\"\n",
                "msgstr \"B\"\n",
                "\n",
            ]
        );
        assert_eq!(
            generator.languages().into_iter().collect::<Vec<_>>(),
            &["en"]
        );
    }

    #[test]
    fn test_body_is_restartable() {
        let documents = [parse(STRING_ONE)];
        let generator = CatalogGenerator::new(&documents);
        let first = generator.body("ru").collect::<Vec<_>>();
        let second = generator.body("ru").collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_catalog_header() {
        let header = catalog_header("ru", "PACKAGE VERSION", "nplurals=4; plural=0;");
        assert!(header.contains("msgid \"\"\nmsgstr \"\"\n"));
        assert!(header.contains("\"Project-Id-Version: PACKAGE VERSION\\n\"\n"));
        assert!(header.contains("\"Language: ru\\n\"\n"));
        assert!(header.contains("\"Plural-Forms: nplurals=4; plural=0;\\n\"\n"));
        assert!(header.ends_with("\\n\"\n\n"));
    }

    #[test]
    fn test_write_catalog() -> anyhow::Result<()> {
        let documents = [parse(STRING_ONE)];
        let mut output = Vec::new();
        CatalogGenerator::new(&documents).write_catalog(&mut output, "en", "HEADER\n\n")?;
        assert_eq!(
            String::from_utf8(output)?,
            "HEADER\n\nmsgid \"string_one\"\nmsgstr \"String one\"\n\n"
        );
        Ok(())
    }

    /// Create a locale directory with the given files and empty
    /// `LC_MESSAGES` directories for `languages`.
    fn create_locale_dir(
        files: &[(&str, &str)],
        languages: &[&str],
    ) -> anyhow::Result<tempfile::TempDir> {
        let tmpdir = tempfile::tempdir().context("Could not create temporary directory")?;
        for (path, contents) in files {
            let file_path = tmpdir.path().join(path);
            let directory_path = file_path
                .parent()
                .context("File path unexpectedly ended in a root or prefix")?;
            fs::create_dir_all(directory_path)?;
            fs::write(&file_path, contents)
                .with_context(|| format!("Could not write {}", file_path.display()))?;
        }
        for lang in languages {
            fs::create_dir_all(tmpdir.path().join(lang).join("LC_MESSAGES"))?;
        }
        Ok(tmpdir)
    }

    #[test]
    fn test_process() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(
            &[
                ("app.stew", "[b]\nde = B\nen = B\n"),
                ("nested/more.stew", STRING_ONE),
            ],
            &["en", "ru"],
        )?;

        let locale_dir = LocaleDir::new(tmpdir.path(), Config::default())?;
        assert_eq!(locale_dir.documents().len(), 2);
        let report = locale_dir.process()?;

        let en_po = tmpdir.path().join("en/LC_MESSAGES/django.po");
        let ru_po = tmpdir.path().join("ru/LC_MESSAGES/django.po");
        assert_eq!(report.written, &[en_po.clone(), ru_po.clone()]);
        assert_eq!(
            report.warnings,
            &[Warning::MissingLocaleDir {
                lang: String::from("de"),
                path: tmpdir.path().join("de/LC_MESSAGES"),
            }]
        );

        let en = fs::read_to_string(&en_po)?;
        assert!(en.contains("\"Language: en\\n\"\n"));
        assert!(en.ends_with(
            "\n### from app.stew\n\n\
             msgid \"b\"\n\
             msgstr \"B\"\n\
             \n\
             \n### from nested/more.stew\n\n\
             msgid \"string_one\"\n\
             msgstr \"String one\"\n\
             \n"
        ));

        let ru = fs::read_to_string(&ru_po)?;
        assert!(ru.contains("\"Plural-Forms: nplurals=4;"));
        assert!(ru.contains("msgstr[3] \"%s машины столам\"\n"));
        assert!(!ru.contains("msgid \"b\""));

        // The sources were rewritten in normalized form.
        assert_eq!(
            fs::read_to_string(tmpdir.path().join("app.stew"))?,
            "  [b]\n    en = B\n    de = B\n"
        );
        Ok(())
    }

    #[test]
    fn test_process_without_rewrite() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(&[("app.stew", "[b]\nde = B\nen = B\n")], &["en"])?;
        let config = Config {
            rewrite_sources: false,
            ..Config::default()
        };
        LocaleDir::new(tmpdir.path(), config)?.process()?;
        assert_eq!(
            fs::read_to_string(tmpdir.path().join("app.stew"))?,
            "[b]\nde = B\nen = B\n"
        );
        Ok(())
    }

    #[test]
    fn test_process_collects_content_warnings() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(
            &[("app.stew", "[%(n)d apples]\nen = %(n)d apples ....\n")],
            &["en"],
        )?;
        let report = LocaleDir::new(tmpdir.path(), Config::default())?.process()?;
        let kinds = report
            .warnings
            .iter()
            .map(|warning| match warning {
                Warning::ManyDots { .. } => "dots",
                Warning::SpaceBeforePunctuation { .. } => "space",
                Warning::WrongPlaceholders { .. } => "placeholders",
                Warning::EmptyMessageId { .. } | Warning::DuplicateMessage { .. } => "msgid",
                Warning::MissingFile { .. } | Warning::MissingLocaleDir { .. } => "missing",
            })
            .collect::<Vec<_>>();
        assert_eq!(kinds, &["dots", "space"]);
        Ok(())
    }

    #[test]
    fn test_process_parse_error_writes_nothing() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(
            &[
                ("a.stew", "[a]\nen = A\n"),
                ("b.stew", "[b]\nen = B\nfoo bar\n"),
            ],
            &["en"],
        )?;
        let err = LocaleDir::new(tmpdir.path(), Config::default()).unwrap_err();
        assert!(err.to_string().contains("foo bar"));
        assert!(!tmpdir.path().join("en/LC_MESSAGES/django.po").exists());
        assert_eq!(fs::read_to_string(tmpdir.path().join("a.stew"))?, "[a]\nen = A\n");
        Ok(())
    }

    #[test]
    fn test_process_reports_duplicates() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(
            &[("a.stew", "[a]\nen = One\n"), ("b.stew", "[a]\nen = Two\n")],
            &["en"],
        )?;
        let config = Config {
            source_banners: false,
            ..Config::default()
        };
        let report = LocaleDir::new(tmpdir.path(), config)?.process()?;
        assert_eq!(
            report.warnings,
            &[Warning::DuplicateMessage {
                path: tmpdir.path().join("b.stew"),
                key: String::from("[a]"),
                lang: String::from("en"),
            }]
        );
        let en = fs::read_to_string(tmpdir.path().join("en/LC_MESSAGES/django.po"))?;
        assert!(en.ends_with("\n\nmsgid \"a\"\nmsgstr \"One\"\n\n"));
        assert_eq!(en.matches("msgid \"a\"").count(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_skips_directory_symlinks() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(&[("nested/app.stew", "[a]\nen = A\n")], &[])?;
        std::os::unix::fs::symlink(tmpdir.path(), tmpdir.path().join("nested/loop"))?;
        assert_eq!(
            discover_stew_files(tmpdir.path())?,
            &[tmpdir.path().join("nested/app.stew")]
        );
        Ok(())
    }

    #[test]
    fn test_missing_locale_root() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let root = tmpdir.path().join("missing");
        let report = LocaleDir::new(&root, Config::default())?.process()?;
        assert!(report.written.is_empty());
        assert_eq!(report.warnings, &[Warning::MissingFile { path: root }]);
        Ok(())
    }

    #[test]
    fn test_add_missing_file_to_queue() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(&[], &[])?;
        let mut locale_dir = LocaleDir::new(tmpdir.path(), Config::default())?;
        let missing = tmpdir.path().join("missing.stew");
        locale_dir.add_to_process_queue(&missing)?;
        assert!(locale_dir.documents().is_empty());
        let report = locale_dir.process()?;
        assert_eq!(report.warnings, &[Warning::MissingFile { path: missing }]);
        Ok(())
    }

    #[test]
    fn test_generated_catalog_parses_as_po() -> anyhow::Result<()> {
        let tmpdir = create_locale_dir(&[("app.stew", STRING_ONE)], &["ru"])?;
        let config = Config {
            source_banners: false,
            ..Config::default()
        };
        LocaleDir::new(tmpdir.path(), config)?.process()?;

        let catalog = polib::po_file::parse(&tmpdir.path().join("ru/LC_MESSAGES/django.po"))
            .map_err(|err| anyhow::anyhow!("{err}"))?;
        assert_eq!(catalog.metadata.language, "ru");
        let messages = catalog.messages().collect::<Vec<_>>();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].msgid(), "string_one");
        assert!(messages[0].is_plural());
        assert_eq!(messages[0].msgid_plural().ok(), Some("string_one"));
        assert_eq!(messages[0].msgstr_plural().map(|forms| forms.len()).ok(), Some(4));
        Ok(())
    }
}
