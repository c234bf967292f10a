// SPDX-License-Identifier: PMPL-1.0-or-later

//! A catalog shared between threads.
//!
//! Readers take an [`Arc`] snapshot and query it without locking. Writers
//! clone the current catalog, mutate the clone and swap it in whole, so a
//! reader never sees a half-applied change. Writers are serialized by a
//! mutex; readers never touch it.

use crate::catalog::LanguageCatalog;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};

pub struct SharedCatalog {
    current: ArcSwap<LanguageCatalog>,
    writer: Mutex<()>,
}

impl SharedCatalog {
    pub fn new(catalog: LanguageCatalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
            writer: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<LanguageCatalog> {
        self.current.load_full()
    }

    /// Apply `change` to a copy of the current catalog and publish it.
    pub fn update<R>(&self, change: impl FnOnce(&mut LanguageCatalog) -> R) -> R {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = LanguageCatalog::clone(&self.current.load());
        let result = change(&mut next);
        self.current.store(Arc::new(next));
        result
    }

    pub fn replace(&self, catalog: LanguageCatalog) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.current.store(Arc::new(catalog));
    }
}

impl From<LanguageCatalog> for SharedCatalog {
    fn from(catalog: LanguageCatalog) -> Self {
        Self::new(catalog)
    }
}
