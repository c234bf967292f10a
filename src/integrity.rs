// SPDX-License-Identifier: PMPL-1.0-or-later

//! Data-quality audit of a language dataset.
//!
//! Runs on the raw [`Dataset`] rather than on a built catalog, so it can
//! describe defects that [`LanguageCatalog::from_dataset`] refuses to load
//! (dangling and chained redirects) alongside ones it tolerates (missing
//! autonyms, scripts outside every group, undeclared regions).

use crate::catalog::LanguageCatalog;
use crate::dataset::{Dataset, LanguageRecord};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// A canonical language with an empty autonym.
    OrphanAutonym { code: String },
    DanglingRedirect { alias: String, target: String },
    DoubleRedirect {
        alias: String,
        target: String,
        next: String,
    },
    DuplicateScript {
        script: String,
        first: String,
        second: String,
    },
    /// A script used by languages but listed in no script group.
    OrphanScript { script: String, languages: Vec<String> },
    /// A region used by languages but missing from the region groups.
    UnknownRegion { region: String, languages: Vec<String> },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::OrphanScript { .. } | Self::UnknownRegion { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanAutonym { code } => write!(f, "{code} has no autonym"),
            Self::DanglingRedirect { alias, target } => {
                write!(f, "{alias} redirects to unknown language {target}")
            }
            Self::DoubleRedirect {
                alias,
                target,
                next,
            } => write!(f, "{alias} redirects to {target}, which redirects to {next}"),
            Self::DuplicateScript {
                script,
                first,
                second,
            } => write!(f, "script {script} is listed in {first} and {second}"),
            Self::OrphanScript { script, languages } => write!(
                f,
                "script {script} belongs to no script group (used by {})",
                languages.join(", ")
            ),
            Self::UnknownRegion { region, languages } => write!(
                f,
                "region {region} has no region group (used by {})",
                languages.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub languages: usize,
    pub redirects: usize,
    pub findings: Vec<Finding>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

pub fn audit(dataset: &Dataset) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    let mut group_of_script: HashMap<&str, &str> = HashMap::new();

    for (group, scripts) in &dataset.scriptgroups {
        for script in scripts {
            match group_of_script.get(script.as_str()) {
                Some(first) if *first != group.as_str() => {
                    report.findings.push(Finding::DuplicateScript {
                        script: script.clone(),
                        first: first.to_string(),
                        second: group.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    group_of_script.insert(script, group);
                }
            }
        }
    }

    let mut orphan_scripts: IndexMap<&str, Vec<String>> = IndexMap::new();
    let mut unknown_regions: IndexMap<&str, Vec<String>> = IndexMap::new();

    for (code, record) in &dataset.languages {
        match record {
            LanguageRecord::Redirect(target) => {
                report.redirects += 1;
                match dataset.languages.get(target) {
                    None => report.findings.push(Finding::DanglingRedirect {
                        alias: code.clone(),
                        target: target.clone(),
                    }),
                    Some(LanguageRecord::Redirect(next)) => {
                        report.findings.push(Finding::DoubleRedirect {
                            alias: code.clone(),
                            target: target.clone(),
                            next: next.clone(),
                        })
                    }
                    Some(LanguageRecord::Full(_)) => {}
                }
            }
            LanguageRecord::Full(language) => {
                report.languages += 1;
                if language.autonym.trim().is_empty() {
                    report
                        .findings
                        .push(Finding::OrphanAutonym { code: code.clone() });
                }
                if !group_of_script.contains_key(language.script.as_str()) {
                    orphan_scripts
                        .entry(&language.script)
                        .or_default()
                        .push(code.clone());
                }
                for region in &language.regions {
                    if !dataset.regiongroups.contains_key(region) {
                        unknown_regions.entry(region).or_default().push(code.clone());
                    }
                }
            }
        }
    }

    report.findings.extend(
        orphan_scripts
            .into_iter()
            .map(|(script, languages)| Finding::OrphanScript {
                script: script.to_string(),
                languages,
            }),
    );
    report.findings.extend(
        unknown_regions
            .into_iter()
            .map(|(region, languages)| Finding::UnknownRegion {
                region: region.to_string(),
                languages,
            }),
    );
    report
}

/// Audit the current contents of a catalog, mutations included.
pub fn audit_catalog(catalog: &LanguageCatalog) -> IntegrityReport {
    audit(&catalog.to_dataset())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audit_yaml(yaml: &str) -> IntegrityReport {
        audit(&Dataset::from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn clean_dataset_has_no_findings() {
        let report = audit_yaml(
            "languages:\n  de: [Latn, [EU], Deutsch]\n  de-x: [de]\nscriptgroups:\n  Latin: [Latn]\nregiongroups:\n  EU: 3\n",
        );
        assert!(report.is_clean(), "{:?}", report.findings);
        assert_eq!(report.languages, 1);
        assert_eq!(report.redirects, 1);
    }

    #[test]
    fn redirect_defects() {
        let report = audit_yaml(
            "languages:\n  a: [Latn, [EU], A]\n  b: [a]\n  c: [b]\n  d: [zz]\nscriptgroups:\n  Latin: [Latn]\nregiongroups:\n  EU: 3\n",
        );
        assert_eq!(
            report.findings,
            vec![
                Finding::DoubleRedirect {
                    alias: "c".into(),
                    target: "b".into(),
                    next: "a".into(),
                },
                Finding::DanglingRedirect {
                    alias: "d".into(),
                    target: "zz".into(),
                },
            ]
        );
        assert!(report.has_errors());
    }

    #[test]
    fn orphan_autonym_is_an_error() {
        let report = audit_yaml(
            "languages:\n  zz: [Latn, [EU], \" \"]\nscriptgroups:\n  Latin: [Latn]\nregiongroups:\n  EU: 3\n",
        );
        assert_eq!(
            report.findings,
            vec![Finding::OrphanAutonym { code: "zz".into() }]
        );
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn taxonomy_gaps_are_warnings() {
        let report = audit_yaml(
            "languages:\n  x1: [Xsux, [EU, MARS], X]\n  x2: [Xsux, [EU], Y]\nregiongroups:\n  EU: 3\n",
        );
        assert!(!report.has_errors());
        let warnings: Vec<String> = report.warnings().map(ToString::to_string).collect();
        assert_eq!(
            warnings,
            [
                "script Xsux belongs to no script group (used by x1, x2)",
                "region MARS has no region group (used by x1)",
            ]
        );
    }

    #[test]
    fn duplicate_script_is_reported() {
        let report = audit_yaml("scriptgroups:\n  Latin: [Latn]\n  Misc: [Latn]\n");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity(), Severity::Error);
    }
}
