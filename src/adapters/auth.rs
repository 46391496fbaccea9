//! Privileged-set adapter backed by static configuration.

use std::collections::HashSet;

use crate::domain::foundation::OriginatorId;
use crate::ports::PrivilegedSet;

/// Privileged ids loaded once from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticPrivilegedSet {
    ids: HashSet<OriginatorId>,
}

impl StaticPrivilegedSet {
    pub fn new(ids: impl IntoIterator<Item = OriginatorId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Builds the set from raw configuration values.
    pub fn from_raw_ids(ids: &[i64]) -> Self {
        Self::new(ids.iter().copied().map(OriginatorId::new))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl PrivilegedSet for StaticPrivilegedSet {
    fn contains(&self, originator: OriginatorId) -> bool {
        self.ids.contains(&originator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_only_configured_ids() {
        let set = StaticPrivilegedSet::from_raw_ids(&[10, 20]);
        assert!(set.contains(OriginatorId::new(10)));
        assert!(set.contains(OriginatorId::new(20)));
        assert!(!set.contains(OriginatorId::new(30)));
    }

    #[test]
    fn empty_set_rejects_everyone() {
        let set = StaticPrivilegedSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(OriginatorId::new(1)));
    }
}
