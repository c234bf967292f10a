// SPDX-License-Identifier: PMPL-1.0-or-later

//! langdb: language metadata for language pickers.
//!
//! A static catalog of languages (script, regions, autonym), redirect
//! aliases, script groups, region groups and territories, with the lookups
//! and groupings a picker needs to render a categorized list.
//!
//! MODULES:
//! 1. **Dataset**: the serde model of the generated data, YAML or JSON.
//! 2. **Catalog**: redirect-resolving lookups, grouped queries and the
//!    add/delete mutation API.
//! 3. **Integrity**: data-quality audit (orphan autonyms, double redirects,
//!    orphan scripts).
//! 4. **Shared**: copy-on-write catalog for multi-threaded readers.
//!
//! ```
//! use langdb::LanguageCatalog;
//!
//! let catalog = LanguageCatalog::bundled().unwrap();
//! assert_eq!(catalog.script("ii").unwrap(), "Yiii");
//! assert_eq!(catalog.group_of_script("Beng"), "SouthAsian");
//! assert!(!catalog.languages_in_region("EU").contains(&"sr-ec"));
//! ```

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod integrity;
pub mod shared;

pub use catalog::{Direction, LanguageCatalog, Regions};
pub use dataset::{Dataset, DatasetFormat, Language, LanguageRecord};
pub use error::CatalogError;
pub use shared::SharedCatalog;
