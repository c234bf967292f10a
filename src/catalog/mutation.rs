// SPDX-License-Identifier: PMPL-1.0-or-later

//! Runtime changes to the catalog.
//!
//! Every mutation drops the derived index, so the next query sees it.

use super::{check_redirect_target, LanguageCatalog};
use crate::dataset::{Language, LanguageRecord};
use crate::error::{CatalogError, Result};
use tracing::debug;

impl LanguageCatalog {
    /// Insert a language, or overwrite whatever record `code` had. An
    /// overwritten code keeps its position; a new one goes last.
    pub fn add_language(&mut self, code: impl Into<String>, language: Language) {
        let code = code.into();
        debug!(code = code.as_str(), script = language.script.as_str(), "adding language");
        self.languages.insert(code, LanguageRecord::Full(language));
        self.invalidate_index();
    }

    /// Register `alias` as a redirect to `target`.
    ///
    /// Refused when the target is unknown or a redirect itself, and when
    /// other redirects already point at `alias` (they would become a chain).
    pub fn add_redirect(&mut self, alias: impl Into<String>, target: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        let target = target.into();
        if alias == target {
            return Err(CatalogError::InvalidRecord {
                code: alias,
                reason: "a language cannot redirect to itself".to_string(),
            });
        }
        check_redirect_target(&self.languages, &alias, &target)?;
        if let Some((pointing, _)) = self.redirects().find(|(_, t)| *t == alias) {
            return Err(CatalogError::RedirectChain {
                alias: pointing.to_string(),
                target: alias,
                next: target,
            });
        }

        debug!(alias = alias.as_str(), target = target.as_str(), "adding redirect");
        self.languages.insert(alias, LanguageRecord::Redirect(target));
        self.invalidate_index();
        Ok(())
    }

    /// Remove `code`. Redirects pointing at it go with it. Returns whether
    /// anything was removed.
    pub fn delete_language(&mut self, code: &str) -> bool {
        let Some(removed) = self.languages.shift_remove(code) else {
            return false;
        };
        if let LanguageRecord::Full(_) = removed {
            let before = self.languages.len();
            self.languages
                .retain(|_, record| record.redirect_target() != Some(code));
            let dropped = before - self.languages.len();
            if dropped > 0 {
                debug!(code, dropped, "removed redirects to deleted language");
            }
        }
        self.invalidate_index();
        true
    }

    /// Append languages to a territory, creating it if needed.
    pub fn add_languages_to_territory<I>(&mut self, territory: &str, codes: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.territories
            .entry(territory.to_string())
            .or_default()
            .extend(codes.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn catalog() -> LanguageCatalog {
        let dataset = Dataset::from_yaml_str(
            "languages:\n  de: [Latn, [EU], Deutsch]\n  sr-cyrl: [Cyrl, [EU], српски]\n  sr-ec: [sr-cyrl]\n",
        )
        .unwrap();
        LanguageCatalog::from_dataset(dataset).unwrap()
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut catalog = catalog();
        catalog.add_language("de", Language::new("Latn", ["EU", "AM"], "deutsch"));
        let codes: Vec<&str> = catalog.languages().map(|(code, _)| code).collect();
        assert_eq!(codes, ["de", "sr-cyrl"]);
        assert_eq!(catalog.regions("de").as_slice(), ["EU", "AM"]);
    }

    #[test]
    fn delete_cascades_to_redirects() {
        let mut catalog = catalog();
        assert!(catalog.delete_language("sr-cyrl"));
        assert!(!catalog.contains("sr-ec"));
        assert_eq!(catalog.redirects().count(), 0);
    }

    #[test]
    fn deleting_a_redirect_keeps_target() {
        let mut catalog = catalog();
        assert!(catalog.delete_language("sr-ec"));
        assert!(catalog.contains("sr-cyrl"));
    }

    #[test]
    fn redirect_validation() {
        let mut catalog = catalog();
        assert!(matches!(
            catalog.add_redirect("de", "de"),
            Err(CatalogError::InvalidRecord { .. })
        ));
        assert!(matches!(
            catalog.add_redirect("xx", "nope"),
            Err(CatalogError::DanglingRedirect { .. })
        ));
        assert!(matches!(
            catalog.add_redirect("sr", "sr-ec"),
            Err(CatalogError::RedirectChain { .. })
        ));
        // sr-ec already points at sr-cyrl, so sr-cyrl cannot become an alias
        assert!(matches!(
            catalog.add_redirect("sr-cyrl", "de"),
            Err(CatalogError::RedirectChain { .. })
        ));

        catalog.add_redirect("sr", "sr-cyrl").unwrap();
        assert_eq!(catalog.script("sr").unwrap(), "Cyrl");
        assert_eq!(catalog.languages_in_script("Cyrl"), ["sr-cyrl"]);
    }

    #[test]
    fn territory_is_created_on_demand() {
        let mut catalog = catalog();
        assert_eq!(catalog.languages_in_territory("RS"), None);
        catalog.add_languages_to_territory("RS", ["sr-cyrl"]);
        catalog.add_languages_to_territory("RS", vec!["de".to_string()]);
        assert_eq!(
            catalog.languages_in_territory("RS").unwrap(),
            ["sr-cyrl", "de"]
        );
    }
}
