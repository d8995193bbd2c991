//! Per-category node id allocation.
//!
//! Ids are unique within one diagram instance even when the same
//! dependency name appears in two categories, because each category
//! has its own monotonically increasing counter.

use std::collections::HashMap;

use crate::category::DependencyCategory;

#[derive(Debug, Default)]
pub struct IdCounters(HashMap<DependencyCategory, usize>);

impl IdCounters {
    /// Allocate the next id for a category (`skill-0`, `skill-1`, ...).
    pub fn next_id(&mut self, category: DependencyCategory) -> String {
        let counter = self.0.entry(category).or_insert(0);
        let id = format!("{}-{}", category.id_prefix(), counter);
        *counter += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_per_category() {
        let mut counters = IdCounters::default();
        assert_eq!(counters.next_id(DependencyCategory::Skill), "skill-0");
        assert_eq!(counters.next_id(DependencyCategory::Command), "command-0");
        assert_eq!(counters.next_id(DependencyCategory::Skill), "skill-1");
    }
}
