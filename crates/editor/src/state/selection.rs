use shared::ObjectId;

/// Object selection state (at most one object).
///
/// The id is not validated against the registry; selecting an id that is
/// not registered simply makes the selected-object lookup come back empty.
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<ObjectId>,
    /// Version counter for selection changes (for cache invalidation)
    pub version: u64,
}

impl Selection {
    /// Selected object id
    pub fn primary(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select a single object (replaces previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.set(Some(id));
    }

    /// Replace the selection; `None` deselects
    pub fn set(&mut self, id: Option<ObjectId>) {
        if self.selected != id {
            self.selected = id;
            self.version += 1;
        }
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Deselect `id` if it is the selected object
    pub fn clear_if(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.clear();
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = Selection::default();
        assert!(s.primary().is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn test_select_single() {
        let mut s = Selection::default();
        s.select("a".to_string());
        assert_eq!(s.primary(), Some(&"a".to_string()));
        assert!(s.is_selected("a"));
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut s = Selection::default();
        s.select("a".to_string());
        s.select("b".to_string());
        assert!(!s.is_selected("a"));
        assert!(s.is_selected("b"));
    }

    #[test]
    fn test_clear_if_only_matches_selected() {
        let mut s = Selection::default();
        s.select("a".to_string());
        assert!(!s.clear_if("b"));
        assert!(s.is_selected("a"));
        assert!(s.clear_if("a"));
        assert!(s.is_empty());
    }

    #[test]
    fn test_version_bumps_on_change_only() {
        let mut s = Selection::default();
        s.select("a".to_string());
        s.select("a".to_string());
        assert_eq!(s.version, 1);
        s.clear();
        s.clear();
        assert_eq!(s.version, 2);
    }
}
