// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error type for dataset loading and catalog lookups.
//!
//! Only genuinely invalid input reaches this type. Routine "unknown code"
//! lookups answer with sentinels instead (see [`crate::catalog::Regions`]
//! and [`crate::catalog::OTHER_SCRIPT_GROUP`]).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown language code: {0}")]
    NotFound(String),

    #[error("redirect {alias} points at unknown language {target}")]
    DanglingRedirect { alias: String, target: String },

    #[error("redirect {alias} points at {target}, which is itself a redirect to {next}")]
    RedirectChain {
        alias: String,
        target: String,
        next: String,
    },

    #[error("script {script} is listed in both {first} and {second}")]
    DuplicateScript {
        script: String,
        first: String,
        second: String,
    },

    #[error("invalid language record for {code}: {reason}")]
    InvalidRecord { code: String, reason: String },

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
