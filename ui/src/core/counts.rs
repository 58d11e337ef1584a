//! Ordered count tables keyed by a closed category set.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::model::Category;

/// One slot per category, seeded at zero in declared order.
///
/// Every category is present from construction, so a missing bucket is not a
/// state this type can represent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryCounts<C: Category> {
    slots: Vec<(C, u64)>,
}

impl<C: Category> CategoryCounts<C> {
    pub fn seeded() -> Self {
        Self {
            slots: C::ALL.iter().map(|category| (*category, 0)).collect(),
        }
    }

    pub fn from_fn(mut value_of: impl FnMut(C) -> u64) -> Self {
        Self {
            slots: C::ALL
                .iter()
                .map(|category| (*category, value_of(*category)))
                .collect(),
        }
    }

    pub fn increment(&mut self, category: C) {
        let slot = &mut self.slots[category.position()].1;
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, category: C) -> u64 {
        self.slots[category.position()].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, u64)> + '_ {
        self.slots.iter().copied()
    }

    pub fn values(&self) -> Vec<u64> {
        self.slots.iter().map(|(_, value)| *value).collect()
    }

    pub fn total(&self) -> u64 {
        self.slots
            .iter()
            .fold(0u64, |acc, (_, value)| acc.saturating_add(*value))
    }

    /// Largest count in the group; `0` when every slot is empty.
    pub fn max(&self) -> u64 {
        self.slots.iter().map(|(_, value)| *value).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<C: Category> Default for CategoryCounts<C> {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Serialized as a label → count map preserving declared order.
impl<C: Category> Serialize for CategoryCounts<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (category, value) in &self.slots {
            map.serialize_entry(category.label(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{RiskLevel, WorkletStatus};

    #[test]
    fn seeded_tables_contain_every_category() {
        let counts = CategoryCounts::<WorkletStatus>::seeded();
        assert_eq!(counts.len(), WorkletStatus::ALL.len());
        assert!(counts.iter().all(|(_, value)| value == 0));
        assert_eq!(counts.max(), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn increments_land_in_their_own_slot() {
        let mut counts = CategoryCounts::<WorkletStatus>::seeded();
        counts.increment(WorkletStatus::Dropped);
        counts.increment(WorkletStatus::Dropped);
        counts.increment(WorkletStatus::Completed);
        assert_eq!(counts.get(WorkletStatus::Dropped), 2);
        assert_eq!(counts.get(WorkletStatus::Completed), 1);
        assert_eq!(counts.get(WorkletStatus::Ongoing), 0);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.max(), 2);
    }

    #[test]
    fn serializes_in_declared_order() {
        let counts = CategoryCounts::<RiskLevel>::from_fn(|level| match level {
            RiskLevel::High => 3,
            RiskLevel::Medium => 5,
            RiskLevel::Low => 11,
        });
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"High Risk":3,"Medium Risk":5,"Low Risk":11}"#);
    }
}
