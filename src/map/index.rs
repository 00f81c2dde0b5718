use crate::types::RuleId;

/// Rule ids kept in non-decreasing key order. Equal keys keep their
/// insertion order.
#[derive(Debug, Clone)]
pub struct OrderedIndex<K> {
    entries: Vec<(K, RuleId)>,
}

impl<K: Ord> OrderedIndex<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: K, id: RuleId) {
        let pos = self.entries.partition_point(|(existing, _)| existing <= &key);
        self.entries.insert(pos, (key, id));
    }

    pub fn iter(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.entries.iter().map(|(_, id)| *id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_keys_keep_insertion_order() {
        let mut index = OrderedIndex::new();
        index.insert(2, RuleId(0));
        index.insert(1, RuleId(1));
        index.insert(2, RuleId(2));
        index.insert(1, RuleId(3));

        let ids: Vec<RuleId> = index.iter().collect();
        assert_eq!(ids, vec![RuleId(1), RuleId(3), RuleId(0), RuleId(2)]);
        assert_eq!(index.keys().copied().collect::<Vec<_>>(), vec![1, 1, 2, 2]);
    }
}
