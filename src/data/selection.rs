//! Single-feature highlight state.

use crate::data::features::{FeatureId, FeatureSet};

/// Tracks the one highlighted feature of a [`FeatureSet`].
///
/// Selecting a feature clears the previous one first, so at most one feature
/// carries the flag at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSelection {
    current: Option<FeatureId>,
}

impl HighlightSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<FeatureId> {
        self.current
    }

    /// Highlight `id`. Returns false, leaving nothing highlighted, when the
    /// id is not in `features`.
    pub fn select(&mut self, features: &mut FeatureSet, id: FeatureId) -> bool {
        self.clear(features);

        match features.get_mut(id) {
            Some(feature) => {
                feature.set_highlighted(true);
                self.current = Some(id);
                true
            }
            None => false,
        }
    }

    /// Highlight the first feature named `name`.
    pub fn select_by_name(&mut self, features: &mut FeatureSet, name: &str) -> Option<FeatureId> {
        let id = features.find_by_name(name)?.id;
        self.select(features, id).then_some(id)
    }

    pub fn clear(&mut self, features: &mut FeatureSet) {
        if let Some(previous) = self.current.take() {
            if let Some(feature) = features.get_mut(previous) {
                feature.set_highlighted(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::features::MapFeature;

    fn features() -> FeatureSet {
        let mut set = FeatureSet::new();
        set.push(MapFeature::settlement(0, "Altdorf", 6));
        set.push(MapFeature::settlement(0, "Nuln", 6));
        set
    }

    #[test]
    fn test_selecting_moves_the_highlight() {
        let mut set = features();
        let mut selection = HighlightSelection::new();

        let altdorf = selection.select_by_name(&mut set, "Altdorf").unwrap();
        let nuln = selection.select_by_name(&mut set, "Nuln").unwrap();

        assert_eq!(selection.current(), Some(nuln));
        assert!(!set.get(altdorf).unwrap().is_highlighted());
        assert!(set.get(nuln).unwrap().is_highlighted());
        assert_eq!(set.iter().filter(|f| f.is_highlighted()).count(), 1);
    }

    #[test]
    fn test_clear_and_unknown_ids() {
        let mut set = features();
        let mut selection = HighlightSelection::new();

        selection.select(&mut set, FeatureId(0));
        assert!(!selection.select(&mut set, FeatureId(42)));
        assert_eq!(selection.current(), None);
        assert!(set.iter().all(|f| !f.is_highlighted()));

        selection.select(&mut set, FeatureId(1));
        selection.clear(&mut set);
        assert!(set.iter().all(|f| !f.is_highlighted()));
    }
}
