// SPDX-License-Identifier: MPL-2.0
//! Named, ordered collections of features that are shown or hidden together.

use super::feature::Feature;

/// Identifies a layer group inside one map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) u32);

/// Identifies a feature inside one map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub(crate) u32);

#[derive(Debug, Clone)]
pub struct LayerGroup {
    id: GroupId,
    name: String,
    features: Vec<(FeatureId, Feature)>,
}

impl LayerGroup {
    pub(crate) fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            features: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub(crate) fn insert(&mut self, id: FeatureId, feature: Feature) {
        self.features.push((id, feature));
    }

    /// Removes a feature, returning it if it belonged to this group.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let pos = self.features.iter().position(|(fid, _)| *fid == id)?;
        Some(self.features.remove(pos).1)
    }

    #[must_use]
    pub fn contains(&self, id: FeatureId) -> bool {
        self.features.iter().any(|(fid, _)| *fid == id)
    }

    #[must_use]
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features
            .iter()
            .find(|(fid, _)| *fid == id)
            .map(|(_, feature)| feature)
    }

    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.features
            .iter_mut()
            .find(|(fid, _)| *fid == id)
            .map(|(_, feature)| feature)
    }

    /// Features in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (FeatureId, &Feature)> {
        self.features.iter().map(|(id, feature)| (*id, feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::geo::LatLng;

    #[test]
    fn keeps_insertion_order() {
        let mut group = LayerGroup::new(GroupId(0), "markers");
        group.insert(FeatureId(3), Feature::marker(LatLng::new(1.0, 1.0)));
        group.insert(FeatureId(1), Feature::marker(LatLng::new(2.0, 2.0)));

        let ids: Vec<FeatureId> = group.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![FeatureId(3), FeatureId(1)]);
        assert_eq!(group.name(), "markers");
    }

    #[test]
    fn remove_returns_owned_feature() {
        let mut group = LayerGroup::new(GroupId(0), "markers");
        group.insert(FeatureId(7), Feature::marker(LatLng::new(1.0, 1.0)));

        assert!(group.remove(FeatureId(8)).is_none());
        assert!(group.remove(FeatureId(7)).is_some());
        assert!(group.is_empty());
    }
}
