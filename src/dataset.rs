// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serde model of the generated language dataset.
//!
//! The dataset is produced offline from `langdb.yaml` and handed to the
//! catalog fully materialized. Its shape is fixed:
//!
//! ```yaml
//! languages:
//!   pa-guru: [Guru, [AS], ਪੰਜਾਬੀ]   # script, regions, autonym
//!   pa: [pa-guru]                  # redirect to another code
//! scriptgroups:
//!   SouthAsian: [Beng, Deva, Guru]
//! rtlscripts: [Arab, Hebr]
//! regiongroups:
//!   WW: 1
//!   AS: 4
//! territories:
//!   IN: [hi, bn, pa-guru]
//! ```
//!
//! Every map is an [`IndexMap`] so declaration order is kept; the catalog's
//! grouped queries iterate in that order.

use crate::error::{CatalogError, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const BUNDLED_YAML: &str = include_str!("../data/langdb.yaml");

/// Metadata of a canonical (non-redirect) language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub script: String,
    pub regions: Vec<String>,
    pub autonym: String,
}

impl Language {
    pub fn new<R>(script: impl Into<String>, regions: R, autonym: impl Into<String>) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            script: script.into(),
            regions: regions.into_iter().map(Into::into).collect(),
            autonym: autonym.into(),
        }
    }
}

/// One entry of the `languages` table.
///
/// On the wire a redirect is a one-element array holding the target code and
/// a full entry is `[script, [regions...], autonym]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageRecord {
    Full(Language),
    Redirect(String),
}

impl LanguageRecord {
    pub fn as_language(&self) -> Option<&Language> {
        match self {
            Self::Full(language) => Some(language),
            Self::Redirect(_) => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Full(_) => None,
            Self::Redirect(target) => Some(target),
        }
    }
}

impl Serialize for LanguageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Full(language) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(&language.script)?;
                seq.serialize_element(&language.regions)?;
                seq.serialize_element(&language.autonym)?;
                seq.end()
            }
            Self::Redirect(target) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(target)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for LanguageRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_seq(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = LanguageRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redirect-target] or [script, [regions...], autonym]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let first: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let Some(regions) = seq.next_element::<Vec<String>>()? else {
            return Ok(LanguageRecord::Redirect(first));
        };
        let autonym: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }
        Ok(LanguageRecord::Full(Language {
            script: first,
            regions,
            autonym,
        }))
    }
}

/// Source formats a dataset can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Yaml,
    Json,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub languages: IndexMap<String, LanguageRecord>,
    #[serde(default)]
    pub scriptgroups: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub rtlscripts: Vec<String>,
    #[serde(default)]
    pub regiongroups: IndexMap<String, u32>,
    #[serde(default)]
    pub territories: IndexMap<String, Vec<String>>,
}

impl Dataset {
    /// The dataset compiled into the crate from `data/langdb.yaml`.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_YAML)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn parse(source: &str, format: DatasetFormat) -> Result<Self> {
        match format {
            DatasetFormat::Yaml => Self::from_yaml_str(source),
            DatasetFormat::Json => Self::from_json_str(source),
        }
    }

    /// Read a dataset file, picking the parser from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = DatasetFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
        let source = fs::read_to_string(path)?;
        Self::parse(&source, format)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_redirect_records() {
        let dataset = Dataset::from_yaml_str(
            "languages:\n  sr-cyrl: [Cyrl, [EU], српски]\n  sr-ec: [sr-cyrl]\n",
        )
        .expect("dataset should parse");

        assert_eq!(
            dataset.languages["sr-cyrl"],
            LanguageRecord::Full(Language::new("Cyrl", ["EU"], "српски"))
        );
        assert_eq!(
            dataset.languages["sr-ec"],
            LanguageRecord::Redirect("sr-cyrl".to_string())
        );
    }

    #[test]
    fn rejects_two_element_records() {
        let err = Dataset::from_json_str(r#"{"languages": {"xx": ["Latn", ["EU"]]}}"#)
            .expect_err("two elements is neither shape");
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn rejects_extra_elements() {
        let err = Dataset::from_json_str(
            r#"{"languages": {"xx": ["Latn", ["EU"], "X", "extra"]}}"#,
        )
        .expect_err("four elements is neither shape");
        assert!(err.to_string().contains("invalid length"));
    }

    #[test]
    fn json_keeps_array_shape() {
        let mut dataset = Dataset::default();
        dataset.languages.insert(
            "de".to_string(),
            LanguageRecord::Full(Language::new("Latn", ["EU"], "Deutsch")),
        );
        dataset
            .languages
            .insert("de-formal".to_string(), LanguageRecord::Redirect("de".to_string()));

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["languages"]["de"], serde_json::json!(["Latn", ["EU"], "Deutsch"]));
        assert_eq!(json["languages"]["de-formal"], serde_json::json!(["de"]));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/langdb.yaml")),
            Some(DatasetFormat::Yaml)
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("langdb.YML")),
            Some(DatasetFormat::Yaml)
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("language-data.json")),
            Some(DatasetFormat::Json)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("langdb.toml")), None);
        assert_eq!(DatasetFormat::from_path(Path::new("langdb")), None);
    }

    #[test]
    fn bundled_dataset_keeps_declaration_order() {
        let dataset = Dataset::bundled().expect("bundled data parses");
        let groups: Vec<&str> = dataset.scriptgroups.keys().map(String::as_str).collect();
        assert_eq!(groups.first(), Some(&"Latin"));
        let regions: Vec<&str> = dataset.regiongroups.keys().map(String::as_str).collect();
        assert_eq!(regions, ["WW", "SP", "AM", "EU", "ME", "AF", "AS", "PA"]);
    }
}
