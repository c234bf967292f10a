// SPDX-License-Identifier: PMPL-1.0-or-later

//! Where the dataset comes from.
//!
//! Resolution order: an explicit path (the `--data` flag), then the
//! `LANGDB_DATA` environment variable, then the dataset compiled into the
//! crate.

use crate::catalog::LanguageCatalog;
use crate::dataset::Dataset;
use crate::error::Result;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

pub const DATA_ENV: &str = "LANGDB_DATA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::resolve_with(explicit, env::var_os(DATA_ENV))
    }

    fn resolve_with(explicit: Option<PathBuf>, from_env: Option<OsString>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path);
        }
        match from_env {
            Some(value) if !value.is_empty() => Self::File(PathBuf::from(value)),
            _ => Self::Bundled,
        }
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        match self {
            Self::Bundled => Dataset::bundled(),
            Self::File(path) => Dataset::from_path(path),
        }
    }

    pub fn load(&self) -> Result<LanguageCatalog> {
        LanguageCatalog::from_dataset(self.load_dataset()?)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled dataset"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
