//! Catalog handle that can be swapped while readers keep querying.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::catalog::{ScoringTarget, TargetCatalog};
use super::resolver::TargetResolver;
use crate::error::Result;
use crate::field::FieldConfig;
use crate::geometry::FieldPoint;

/// Publishes whole catalogs; entries are never edited in place.
///
/// Readers take an `Arc` snapshot and query it without holding the lock, so a
/// reload in the middle of a query cannot mix old and new entries.
#[derive(Debug)]
pub struct SharedCatalog {
    field: FieldConfig,
    current: RwLock<Arc<TargetCatalog>>,
}

impl SharedCatalog {
    pub fn new(field: FieldConfig, catalog: TargetCatalog) -> Self {
        Self { field, current: RwLock::new(Arc::new(catalog)) }
    }

    /// Current catalog. Stays valid after a later publish.
    pub fn snapshot(&self) -> Arc<TargetCatalog> {
        // The guarded value is a plain Arc, so a poisoned lock still holds a whole catalog.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the catalog. Returns the one it replaced.
    pub fn publish(&self, catalog: TargetCatalog) -> Arc<TargetCatalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        info!(
            previous = previous.len(),
            current = guard.len(),
            "published scoring target catalog"
        );
        previous
    }

    /// Resolver bound to the current snapshot.
    pub fn resolver(&self) -> TargetResolver {
        TargetResolver::new(self.field.clone(), self.snapshot())
    }

    /// Nearest target from one consistent snapshot.
    pub fn resolve_nearest(
        &self,
        query: FieldPoint,
        on_mirrored_side: bool,
    ) -> Result<ScoringTarget> {
        self.resolver().resolve_nearest(query, on_mirrored_side).cloned()
    }
}
