// SPDX-License-Identifier: PMPL-1.0-or-later

//! Set and grouping queries used to build the picker's browse views.

use super::{LanguageCatalog, OTHER_SCRIPT_GROUP, WORLDWIDE};
use crate::error::Result;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Script → language codes.
pub type ScriptBuckets<'a> = IndexMap<&'a str, Vec<&'a str>>;
/// Script group → script → language codes.
pub type ScriptGroupBuckets<'a> = IndexMap<&'a str, ScriptBuckets<'a>>;
/// Region → script group → script → language codes.
pub type RegionBuckets<'a> = IndexMap<&'a str, ScriptGroupBuckets<'a>>;
/// Region group number → region → script group → script → language codes.
pub type RegionTree<'a> = IndexMap<u32, RegionBuckets<'a>>;

impl LanguageCatalog {
    /// Code → autonym for every canonical language. Redirect codes are not
    /// keys; their identity is the target's.
    pub fn autonyms(&self) -> IndexMap<&str, &str> {
        self.languages()
            .map(|(code, _)| (code, self.autonym(code)))
            .collect()
    }

    pub fn all_regions(&self) -> Vec<&str> {
        self.region_groups.keys().map(String::as_str).collect()
    }

    /// Regions of a region group, in declaration order.
    pub fn regions_in_group(&self, group: u32) -> Vec<&str> {
        self.region_groups
            .iter()
            .filter(|(_, g)| **g == group)
            .map(|(region, _)| region.as_str())
            .collect()
    }

    pub fn languages_in_script(&self, script: &str) -> Vec<&str> {
        self.languages_in_scripts(&[script])
    }

    /// Canonical languages written in any of `scripts`, in declaration order.
    pub fn languages_in_scripts(&self, scripts: &[&str]) -> Vec<&str> {
        let positions = self.index().positions_for_scripts(scripts);
        self.codes_at(&positions)
    }

    pub fn languages_in_region(&self, region: &str) -> Vec<&str> {
        self.languages_in_regions(&[region])
    }

    /// Canonical languages spoken in any of `regions`, each once, in
    /// declaration order.
    pub fn languages_in_regions(&self, regions: &[&str]) -> Vec<&str> {
        let positions = self.index().positions_for_regions(regions);
        self.codes_at(&positions)
    }

    pub fn languages_in_region_group(&self, group: u32) -> Vec<&str> {
        self.languages_in_regions(&self.regions_in_group(group))
    }

    pub fn languages_by_script_in_region(&self, region: &str) -> ScriptBuckets<'_> {
        let mut buckets = ScriptBuckets::new();
        for code in self.languages_in_region(region) {
            if let Some(language) = self.language(code) {
                buckets
                    .entry(language.script.as_str())
                    .or_default()
                    .push(code);
            }
        }
        buckets
    }

    /// The script group listing `script`, or [`OTHER_SCRIPT_GROUP`].
    pub fn group_of_script(&self, script: &str) -> &str {
        self.index()
            .group_of_script(script)
            .unwrap_or(OTHER_SCRIPT_GROUP)
    }

    pub fn script_group_of_language(&self, code: &str) -> Result<&str> {
        let script = self.script(code)?;
        Ok(self.group_of_script(script))
    }

    /// Group a caller-chosen list of codes (a quick-pick list, say) by script
    /// group.
    ///
    /// Groups come out in declaration order with [`OTHER_SCRIPT_GROUP`] last;
    /// within a group the input order is kept. Codes unknown to the catalog
    /// are dropped, and so is any code naming a language already listed
    /// (directly or through a redirect).
    pub fn languages_by_script_group<'c, I>(&self, languages: I) -> IndexMap<&str, Vec<&'c str>>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut grouped: Vec<(&str, &'c str)> = Vec::new();
        for code in languages {
            if !seen.insert(self.resolve(code)) {
                debug!(code, "skipping repeated language in script group listing");
                continue;
            }
            match self.script_group_of_language(code) {
                Ok(group) => grouped.push((group, code)),
                Err(_) => debug!(code, "skipping unknown language in script group listing"),
            }
        }
        self.bucket_by_script_group(grouped)
    }

    pub fn languages_by_script_group_in_region(&self, region: &str) -> IndexMap<&str, Vec<&str>> {
        self.languages_by_script_group_in_regions(&[region])
    }

    /// Languages of any of `regions` by script group, each language once.
    pub fn languages_by_script_group_in_regions(
        &self,
        regions: &[&str],
    ) -> IndexMap<&str, Vec<&str>> {
        let grouped = self
            .languages_in_regions(regions)
            .into_iter()
            .filter_map(|code| {
                let script = self.language(code)?.script.as_str();
                Some((self.group_of_script(script), code))
            })
            .collect();
        self.bucket_by_script_group(grouped)
    }

    pub fn all_languages_by_script_group(&self) -> IndexMap<&str, Vec<&str>> {
        self.languages_by_script_group_in_regions(&self.all_regions())
    }

    /// The full browse tree: region group → region → script group → script →
    /// languages.
    ///
    /// Every declared region is present, empty or not. A language appears
    /// under each of its regions, except that a language tagged
    /// [`WORLDWIDE`] appears under `WW` only when `WW` is a declared region.
    pub fn all_languages_by_region_and_script(&self) -> RegionTree<'_> {
        let mut tree = RegionTree::new();
        for (region, group) in self.region_groups() {
            tree.entry(group).or_default().insert(region, ScriptGroupBuckets::new());
        }

        let worldwide = [WORLDWIDE.to_string()];
        let worldwide_declared = self.region_groups.contains_key(WORLDWIDE);
        for (code, language) in self.languages() {
            let regions: &[String] = if worldwide_declared
                && language.regions.iter().any(|r| r == WORLDWIDE)
            {
                &worldwide
            } else {
                &language.regions
            };
            let script = language.script.as_str();
            let script_group = self.group_of_script(script);

            for region in regions {
                let Some((region, group)) = self.region_groups.get_key_value(region.as_str())
                else {
                    debug!(code, region = region.as_str(), "language lists an undeclared region");
                    continue;
                };
                let scripts = tree
                    .entry(*group)
                    .or_default()
                    .entry(region.as_str())
                    .or_default()
                    .entry(script_group)
                    .or_default();
                let codes = scripts.entry(script).or_default();
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
        }

        for regions in tree.values_mut() {
            for groups in regions.values_mut() {
                groups.sort_by(|a, _, b, _| {
                    self.script_group_rank(a).cmp(&self.script_group_rank(b))
                });
            }
        }
        tree
    }

    /// Compare two codes by autonym, case-insensitively, falling back to the
    /// code for languages without one. Ties are broken by code so the result
    /// is a total order.
    pub fn sort_by_autonym(&self, a: &str, b: &str) -> Ordering {
        let autonym_a = self.autonym(a).to_lowercase();
        let autonym_b = self.autonym(b).to_lowercase();
        autonym_a.cmp(&autonym_b).then_with(|| a.cmp(b))
    }

    pub fn sort_codes_by_autonym<S: AsRef<str>>(&self, codes: &mut [S]) {
        codes.sort_by(|a, b| self.sort_by_autonym(a.as_ref(), b.as_ref()));
    }

    /// Languages recorded for a territory; `None` if the territory is absent.
    pub fn languages_in_territory(&self, territory: &str) -> Option<&[String]> {
        self.territories.get(territory).map(Vec::as_slice)
    }

    fn codes_at(&self, positions: &[usize]) -> Vec<&str> {
        positions
            .iter()
            .filter_map(|&position| self.code_at(position))
            .collect()
    }

    fn script_group_rank(&self, group: &str) -> usize {
        self.script_groups
            .get_index_of(group)
            .unwrap_or(self.script_groups.len())
    }

    fn bucket_by_script_group<'c>(
        &self,
        grouped: Vec<(&str, &'c str)>,
    ) -> IndexMap<&str, Vec<&'c str>> {
        let mut buckets: IndexMap<&str, Vec<&'c str>> = IndexMap::new();
        let declared = self
            .script_groups
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(OTHER_SCRIPT_GROUP));
        for group in declared {
            let members: Vec<&'c str> = grouped
                .iter()
                .filter(|(g, _)| *g == group)
                .map(|(_, code)| *code)
                .collect();
            if !members.is_empty() {
                buckets.insert(group, members);
            }
        }
        buckets
    }
}
