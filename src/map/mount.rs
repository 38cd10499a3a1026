// SPDX-License-Identifier: MPL-2.0
//! Binding of map instances to view regions.
//!
//! A view region can host at most one map instance. Binding hands out a
//! [`MountHandle`]; the region is released when the handle is dropped, so
//! tearing an instance down can never leave a stale binding behind.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Default region identifier for the main map view.
pub const DEFAULT_VIEW_REGION: &str = "map";

/// Stable identifier of a view region in the component tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewRegionId(String);

impl ViewRegionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ViewRegionId {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_REGION)
    }
}

impl fmt::Display for ViewRegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("view region \"{0}\" already hosts a map instance")]
    AlreadyBound(String),
}

type Bound = Arc<Mutex<HashSet<ViewRegionId>>>;

/// Tracks which view regions currently host a map instance.
///
/// Clones share the same set of bindings.
#[derive(Debug, Clone, Default)]
pub struct MountRegistry {
    bound: Bound,
}

impl MountRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `region`, failing if another instance already holds it.
    pub fn bind(&self, region: ViewRegionId) -> Result<MountHandle, MountError> {
        let mut bound = lock(&self.bound);
        if !bound.insert(region.clone()) {
            return Err(MountError::AlreadyBound(region.0));
        }
        Ok(MountHandle {
            region,
            bound: Arc::clone(&self.bound),
        })
    }

    #[must_use]
    pub fn is_bound(&self, region: &ViewRegionId) -> bool {
        lock(&self.bound).contains(region)
    }

    #[must_use]
    pub fn bound_count(&self) -> usize {
        lock(&self.bound).len()
    }
}

/// Proof that a region is bound; releases it on drop.
#[derive(Debug)]
pub struct MountHandle {
    region: ViewRegionId,
    bound: Bound,
}

impl MountHandle {
    #[must_use]
    pub fn region(&self) -> &ViewRegionId {
        &self.region
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        lock(&self.bound).remove(&self.region);
    }
}

// The set is always left consistent, so a poisoned lock is still usable.
fn lock(bound: &Bound) -> MutexGuard<'_, HashSet<ViewRegionId>> {
    bound.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_bind_of_same_region_fails() {
        let registry = MountRegistry::new();
        let _first = registry.bind(ViewRegionId::default()).expect("first bind");
        let second = registry.bind(ViewRegionId::default());
        assert_eq!(second.unwrap_err(), MountError::AlreadyBound("map".into()));
        assert_eq!(registry.bound_count(), 1);
    }

    #[test]
    fn dropping_handle_releases_region() {
        let registry = MountRegistry::new();
        let handle = registry.bind(ViewRegionId::new("map")).expect("bind");
        assert!(registry.is_bound(handle.region()));
        drop(handle);
        assert!(!registry.is_bound(&ViewRegionId::new("map")));
        assert!(registry.bind(ViewRegionId::new("map")).is_ok());
    }

    #[test]
    fn distinct_regions_coexist() {
        let registry = MountRegistry::new();
        let _a = registry.bind(ViewRegionId::new("map")).expect("bind map");
        let _b = registry.bind(ViewRegionId::new("inset")).expect("bind inset");
        assert_eq!(registry.bound_count(), 2);
    }

    #[test]
    fn clones_share_bindings() {
        let registry = MountRegistry::new();
        let clone = registry.clone();
        let _handle = registry.bind(ViewRegionId::default()).expect("bind");
        assert!(clone.is_bound(&ViewRegionId::default()));
    }
}
