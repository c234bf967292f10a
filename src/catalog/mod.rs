// SPDX-License-Identifier: PMPL-1.0-or-later

//! The language catalog: lookups, grouped queries and mutation over a
//! [`Dataset`].
//!
//! ## Redirects
//!
//! A redirect is an alias code whose metadata lives under its target. Every
//! accessor resolves redirects before answering (one hop; chains are refused
//! when the catalog is built and when a redirect is added), so
//! `script("sr-ec")` answers for `sr-cyrl`. Set queries iterate canonical
//! records only, so an alias never shows up next to its target.
//!
//! ## Ordering
//!
//! Languages, script groups and region groups keep the order in which the
//! dataset declares them. Grouped queries iterate in that order; nothing is
//! sorted unless the caller asks via [`LanguageCatalog::sort_by_autonym`].
//!
//! ## Soft failures
//!
//! Unknown codes are routine while filtering a picker list, so the common
//! accessors answer with sentinels instead of errors: [`Regions::Unknown`]
//! (printed as `UNKNOWN`), [`OTHER_SCRIPT_GROUP`], and the bare code as its
//! own autonym.

mod index;
mod mutation;
mod query;

pub use query::{RegionBuckets, RegionTree, ScriptBuckets, ScriptGroupBuckets};

use crate::dataset::{Dataset, Language, LanguageRecord};
use crate::error::{CatalogError, Result};
use index::CatalogIndex;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Group reported for scripts that no script group lists.
pub const OTHER_SCRIPT_GROUP: &str = "Other";

/// Printed form of [`Regions::Unknown`].
pub const UNKNOWN_REGIONS: &str = "UNKNOWN";

/// Region code for languages used worldwide.
pub const WORLDWIDE: &str = "WW";

/// Regions of a language, or the `UNKNOWN` sentinel for codes not in the
/// catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regions<'a> {
    Known(&'a [String]),
    Unknown,
}

impl<'a> Regions<'a> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The region list; empty for an unknown language.
    pub fn as_slice(&self) -> &'a [String] {
        match self {
            Self::Known(regions) => regions,
            Self::Unknown => &[],
        }
    }

    pub fn contains(&self, region: &str) -> bool {
        self.as_slice().iter().any(|r| r == region)
    }
}

impl fmt::Display for Regions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(regions) => write!(f, "{}", regions.join(", ")),
            Self::Unknown => f.write_str(UNKNOWN_REGIONS),
        }
    }
}

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: IndexMap<String, LanguageRecord>,
    script_groups: IndexMap<String, Vec<String>>,
    rtl_scripts: Vec<String>,
    region_groups: IndexMap<String, u32>,
    territories: IndexMap<String, Vec<String>>,
    index: OnceLock<CatalogIndex>,
}

impl LanguageCatalog {
    /// Build a catalog, refusing redirects that dangle or chain and scripts
    /// claimed by two groups.
    ///
    /// Missing autonyms and scripts outside every group are data-quality
    /// issues, not load failures; [`crate::integrity::audit`] reports them.
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let Dataset {
            languages,
            scriptgroups,
            rtlscripts,
            regiongroups,
            territories,
        } = dataset;

        for (alias, record) in &languages {
            if let Some(target) = record.redirect_target() {
                check_redirect_target(&languages, alias, target)?;
            }
        }

        let mut owner: HashMap<&str, &str> = HashMap::new();
        for (group, scripts) in &scriptgroups {
            for script in scripts {
                if let Some(first) = owner.insert(script, group) {
                    if first != group.as_str() {
                        return Err(CatalogError::DuplicateScript {
                            script: script.clone(),
                            first: first.to_string(),
                            second: group.clone(),
                        });
                    }
                }
            }
        }

        let catalog = Self {
            languages,
            script_groups: scriptgroups,
            rtl_scripts: rtlscripts,
            region_groups: regiongroups,
            territories,
            index: OnceLock::new(),
        };
        info!(
            languages = catalog.languages.len(),
            redirects = catalog.redirects().count(),
            script_groups = catalog.script_groups.len(),
            regions = catalog.region_groups.len(),
            territories = catalog.territories.len(),
            "language catalog loaded"
        );
        Ok(catalog)
    }

    /// Catalog over the dataset compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_dataset(Dataset::bundled()?)
    }

    /// Snapshot the current contents, mutations included.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            languages: self.languages.clone(),
            scriptgroups: self.script_groups.clone(),
            rtlscripts: self.rtl_scripts.clone(),
            regiongroups: self.region_groups.clone(),
            territories: self.territories.clone(),
        }
    }

    /// Number of records, redirects included.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Canonical languages in declaration order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &Language)> + '_ {
        self.languages
            .iter()
            .filter_map(|(code, record)| record.as_language().map(|l| (code.as_str(), l)))
    }

    /// `(alias, target)` pairs in declaration order.
    pub fn redirects(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.languages
            .iter()
            .filter_map(|(code, record)| record.redirect_target().map(|t| (code.as_str(), t)))
    }

    pub fn script_groups(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.script_groups
            .iter()
            .map(|(group, scripts)| (group.as_str(), scripts.as_slice()))
    }

    pub fn region_groups(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.region_groups
            .iter()
            .map(|(region, group)| (region.as_str(), *group))
    }

    pub fn rtl_scripts(&self) -> &[String] {
        &self.rtl_scripts
    }

    pub fn territories(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.territories
            .iter()
            .map(|(territory, codes)| (territory.as_str(), codes.as_slice()))
    }

    // ─── Resolution primitives ──────────────────────────────────────────

    /// The redirect target of `code`, or `None` for canonical and unknown
    /// codes.
    pub fn is_redirect(&self, code: &str) -> Option<&str> {
        self.languages.get(code)?.redirect_target()
    }

    /// The canonical code for `code`: its redirect target, or itself.
    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        self.is_redirect(code).unwrap_or(code)
    }

    /// Metadata for `code`, following a redirect.
    pub fn language(&self, code: &str) -> Option<&Language> {
        let code = self.resolve(code);
        self.languages.get(code)?.as_language()
    }

    pub fn script(&self, code: &str) -> Result<&str> {
        self.language(code)
            .map(|language| language.script.as_str())
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))
    }

    pub fn regions(&self, code: &str) -> Regions<'_> {
        match self.language(code) {
            Some(language) => Regions::Known(&language.regions),
            None => Regions::Unknown,
        }
    }

    /// The autonym of `code`, or `code` itself when the language is unknown
    /// or has an empty autonym.
    pub fn autonym<'a>(&'a self, code: &'a str) -> &'a str {
        self.language(code)
            .map(|language| language.autonym.as_str())
            .filter(|autonym| !autonym.is_empty())
            .unwrap_or(code)
    }

    pub fn is_rtl(&self, code: &str) -> bool {
        self.script(code)
            .map(|script| self.rtl_scripts.iter().any(|rtl| rtl == script))
            .unwrap_or(false)
    }

    /// Writing direction; unknown codes are left-to-right.
    pub fn dir(&self, code: &str) -> Direction {
        if self.is_rtl(code) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    fn index(&self) -> &CatalogIndex {
        self.index.get_or_init(|| {
            debug!(records = self.languages.len(), "building catalog index");
            CatalogIndex::build(&self.languages, &self.script_groups)
        })
    }

    fn invalidate_index(&mut self) {
        self.index.take();
    }

    fn code_at(&self, position: usize) -> Option<&str> {
        self.languages
            .get_index(position)
            .map(|(code, _)| code.as_str())
    }
}

fn check_redirect_target(
    languages: &IndexMap<String, LanguageRecord>,
    alias: &str,
    target: &str,
) -> Result<()> {
    match languages.get(target) {
        None => Err(CatalogError::DanglingRedirect {
            alias: alias.to_string(),
            target: target.to_string(),
        }),
        Some(LanguageRecord::Redirect(next)) => Err(CatalogError::RedirectChain {
            alias: alias.to_string(),
            target: target.to_string(),
            next: next.clone(),
        }),
        Some(LanguageRecord::Full(_)) => Ok(()),
    }
}
