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

//! Helpers for keeping translations in `.stew` string files.
//!
//! A `.stew` file lists every user-visible string of a product
//! together with all of its translations. The functions here parse
//! such files, write them back in normalized form and generate one
//! Gettext catalog per language from them. The catalogs can then be
//! compiled and used by any Gettext runtime.
//!
//! # Examples
//!
//! ```
//! use stew_gettext::gettext::CatalogGenerator;
//! use stew_gettext::stew::Stew;
//!
//! let stew = Stew::from_source("app.stew", "[hello]\nen = Hello\nde = Hallo\n").unwrap();
//! let documents = [stew];
//! let body = CatalogGenerator::new(&documents).body("de").collect::<String>();
//! assert_eq!(body, "msgid \"hello\"\nmsgstr \"Hallo\"\n\n");
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod gettext;
pub mod lookup;
pub mod stew;

pub use config::Config;
pub use error::{ParseError, Warning};
pub use stew::{Stew, Translation};
