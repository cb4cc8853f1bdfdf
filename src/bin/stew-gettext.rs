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

//! Generate Gettext catalogs from `.stew` files.
//!
//! `stew-gettext generate locale` finds every `.stew` file below
//! `locale/` and writes `locale/<lang>/LC_MESSAGES/django.po` for
//! every language found in them. The `.stew` files are rewritten in
//! normalized form afterwards.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::{info, warn};
use stew_gettext::gettext::{catalog_header, CatalogGenerator, LocaleDir, Report};
use stew_gettext::{format, Config, Stew};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file. Defaults to `stew.toml` if it exists.
    #[arg(long, global = true, value_name = "stew.toml")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write one catalog per language for every locale directory.
    Generate {
        #[arg(required = true)]
        locale_dirs: Vec<PathBuf>,
        /// Leave the `.stew` files untouched.
        #[arg(long)]
        no_rewrite: bool,
    },
    /// Rewrite a `.stew` file in normalized form.
    Format {
        #[arg(id = "file.stew")]
        file: PathBuf,
        /// Write the result here instead of rewriting the file.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only keep these languages.
        #[arg(short, long = "language", value_name = "LANG")]
        languages: Vec<String>,
    },
    /// Parse `.stew` files and report problems with their contents.
    Check {
        #[arg(id = "file.stew", required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the catalog for one language to stdout.
    Catalog {
        language: String,
        #[arg(id = "file.stew", required = true)]
        files: Vec<PathBuf>,
    },
}

fn generate(config: &Config, locale_dirs: &[PathBuf], no_rewrite: bool) -> anyhow::Result<()> {
    let config = Config {
        rewrite_sources: config.rewrite_sources && !no_rewrite,
        ..config.clone()
    };
    let mut report = Report::default();
    for locale_dir in locale_dirs {
        info!("Processing {}", locale_dir.display());
        let locale_dir = LocaleDir::new(locale_dir, config.clone())
            .with_context(|| format!("Could not read {}", locale_dir.display()))?;
        report.extend(locale_dir.process()?);
    }
    info!(
        "Wrote {} catalogs with {} warnings",
        report.written.len(),
        report.warnings.len()
    );
    Ok(())
}

fn format_file(
    config: &Config,
    file: &Path,
    output: Option<&Path>,
    languages: &[String],
) -> anyhow::Result<()> {
    let stew = Stew::parse(file)?;
    let only_languages = (!languages.is_empty()).then_some(languages);
    format::write_formatted(&stew, &config.language_order(), output, only_languages)
}

fn check(files: &[PathBuf]) -> anyhow::Result<()> {
    let mut count = 0;
    for file in files {
        let stew = Stew::parse(file)?;
        for warning in stew.warnings().iter().cloned().chain(stew.check_content()) {
            warn!("{warning}");
            count += 1;
        }
    }
    if count > 0 {
        bail!("Found {count} problems");
    }
    info!("No problems found");
    Ok(())
}

fn print_catalog(config: &Config, language: &str, files: &[PathBuf]) -> anyhow::Result<()> {
    let documents = files
        .iter()
        .map(Stew::parse)
        .collect::<Result<Vec<_>, _>>()?;
    let mut generator = CatalogGenerator::new(&documents);
    if config.source_banners {
        generator = generator.with_source_banners(None);
    }
    let header = catalog_header(
        language,
        &config.project_id_version,
        config.plural_rules().get(language),
    );
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    generator
        .write_catalog(&mut stdout, language, &header)
        .context("Could not write catalog")?;
    stdout.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let cli = Cli::parse();
    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            locale_dirs,
            no_rewrite,
        } => generate(&config, &locale_dirs, no_rewrite),
        Command::Format {
            file,
            output,
            languages,
        } => format_file(&config, &file, output.as_deref(), &languages),
        Command::Check { files } => check(&files),
        Command::Catalog { language, files } => print_catalog(&config, &language, &files),
    }
}
