// SPDX-License-Identifier: PMPL-1.0-or-later

//! Loading datasets from files, conversion and auditing

use langdb::config::DataSource;
use langdb::integrity;
use langdb::{CatalogError, Dataset, LanguageCatalog};
use std::fs;
use tempfile::TempDir;

const SMALL: &str = r#"
languages:
  sr-cyrl: [Cyrl, [EU], српски (ћирилица)]
  sr-ec: [sr-cyrl]
  gn: [Latn, [AM], "Avañe'ẽ"]
scriptgroups:
  Latin: [Latn]
  Cyrillic: [Cyrl]
rtlscripts: [Arab]
regiongroups:
  AM: 2
  EU: 3
territories:
  PY: [gn]
"#;

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("langdb.yaml");
    fs::write(&path, SMALL).unwrap();

    let catalog = DataSource::File(path).load().expect("yaml dataset loads");
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.languages_in_region("EU"), ["sr-cyrl"]);
    assert_eq!(catalog.languages_in_territory("PY").unwrap(), ["gn"]);
}

#[test]
fn test_yaml_to_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let yaml = Dataset::from_yaml_str(SMALL).unwrap();
    let json_path = dir.path().join("language-data.json");
    fs::write(&json_path, yaml.to_json_string().unwrap()).unwrap();

    let json = Dataset::from_path(&json_path).expect("json dataset loads");
    assert_eq!(json, yaml);
    let keys: Vec<&str> = json.languages.keys().map(String::as_str).collect();
    assert_eq!(keys, ["sr-cyrl", "sr-ec", "gn"]);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("langdb.toml");
    fs::write(&path, SMALL).unwrap();
    assert!(matches!(
        Dataset::from_path(&path),
        Err(CatalogError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Dataset::from_path(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[test]
fn test_dangling_redirect_fails_to_load_but_audits() {
    let dataset = Dataset::from_yaml_str("languages:\n  sr-ec: [sr-cyrl]\n").unwrap();
    let report = integrity::audit(&dataset);
    assert!(report.has_errors());
    assert_eq!(
        report.findings[0].to_string(),
        "sr-ec redirects to unknown language sr-cyrl"
    );
    assert!(matches!(
        LanguageCatalog::from_dataset(dataset),
        Err(CatalogError::DanglingRedirect { .. })
    ));
}

#[test]
fn test_bundled_dataset_is_clean() {
    let dataset = Dataset::bundled().unwrap();
    let report = integrity::audit(&dataset);
    assert!(report.is_clean(), "bundled data defects: {:?}", report.findings);
    assert_eq!(report.redirects, 5);
    assert_eq!(report.languages + report.redirects, dataset.languages.len());
}
