// SPDX-License-Identifier: PMPL-1.0-or-later

//! Derived lookup tables, built lazily and dropped on every mutation.
//!
//! Languages are stored as positions into the catalog's ordered record map,
//! so a union over several scripts or regions can be put back into
//! declaration order by sorting positions.

use crate::dataset::LanguageRecord;
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct CatalogIndex {
    by_script: HashMap<String, Vec<usize>>,
    by_region: HashMap<String, Vec<usize>>,
    group_of_script: HashMap<String, String>,
}

impl CatalogIndex {
    pub(crate) fn build(
        languages: &IndexMap<String, LanguageRecord>,
        script_groups: &IndexMap<String, Vec<String>>,
    ) -> Self {
        let mut index = Self::default();

        for (position, (_, record)) in languages.iter().enumerate() {
            let Some(language) = record.as_language() else {
                continue;
            };
            index
                .by_script
                .entry(language.script.clone())
                .or_default()
                .push(position);
            for region in &language.regions {
                let positions = index.by_region.entry(region.clone()).or_default();
                // a region listed twice on one language still yields one hit
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }

        for (group, scripts) in script_groups {
            for script in scripts {
                index
                    .group_of_script
                    .entry(script.clone())
                    .or_insert_with(|| group.clone());
            }
        }

        index
    }

    pub(crate) fn positions_for_scripts(&self, scripts: &[&str]) -> Vec<usize> {
        merge(scripts.iter().filter_map(|script| self.by_script.get(*script)))
    }

    pub(crate) fn positions_for_regions(&self, regions: &[&str]) -> Vec<usize> {
        merge(regions.iter().filter_map(|region| self.by_region.get(*region)))
    }

    pub(crate) fn group_of_script(&self, script: &str) -> Option<&str> {
        self.group_of_script.get(script).map(String::as_str)
    }
}

fn merge<'a>(lists: impl Iterator<Item = &'a Vec<usize>>) -> Vec<usize> {
    let mut merged: Vec<usize> = lists.flatten().copied().collect();
    merged.sort_unstable();
    merged.dedup();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Language;

    fn records() -> IndexMap<String, LanguageRecord> {
        let mut languages = IndexMap::new();
        languages.insert(
            "de".to_string(),
            LanguageRecord::Full(Language::new("Latn", ["EU"], "Deutsch")),
        );
        languages.insert(
            "ru".to_string(),
            LanguageRecord::Full(Language::new("Cyrl", ["EU", "AS"], "русский")),
        );
        languages.insert("de-at".to_string(), LanguageRecord::Redirect("de".to_string()));
        languages.insert(
            "tr".to_string(),
            LanguageRecord::Full(Language::new("Latn", ["EU", "ME", "EU"], "Türkçe")),
        );
        languages
    }

    #[test]
    fn union_is_in_declaration_order() {
        let index = CatalogIndex::build(&records(), &IndexMap::new());
        assert_eq!(index.positions_for_scripts(&["Cyrl", "Latn"]), [0, 1, 3]);
        assert_eq!(index.positions_for_regions(&["ME", "AS"]), [1, 3]);
    }

    #[test]
    fn duplicate_region_counts_once() {
        let index = CatalogIndex::build(&records(), &IndexMap::new());
        assert_eq!(index.positions_for_regions(&["EU"]), [0, 1, 3]);
    }

    #[test]
    fn redirects_are_not_indexed() {
        let index = CatalogIndex::build(&records(), &IndexMap::new());
        assert!(!index.positions_for_scripts(&["Latn"]).contains(&2));
    }

    #[test]
    fn script_group_lookup() {
        let mut groups = IndexMap::new();
        groups.insert("Latin".to_string(), vec!["Latn".to_string()]);
        let index = CatalogIndex::build(&records(), &groups);
        assert_eq!(index.group_of_script("Latn"), Some("Latin"));
        assert_eq!(index.group_of_script("Cyrl"), None);
    }
}
