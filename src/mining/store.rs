use std::collections::BTreeMap;

use super::model::MinedBlock;

/// In-memory block store keyed by height.
/// Heights are unique; iteration is ascending.
#[derive(Debug, Default)]
pub struct BlockStore {
    map: BTreeMap<u64, MinedBlock>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Insert a block. Returns the block previously stored at that height.
    pub fn insert(&mut self, block: MinedBlock) -> Option<MinedBlock> {
        self.map.insert(block.height, block)
    }

    /// Insert many blocks; returns how many heights were new.
    pub fn extend(&mut self, blocks: impl IntoIterator<Item = MinedBlock>) -> usize {
        let mut added = 0;
        for block in blocks {
            if self.insert(block).is_none() {
                added += 1;
            }
        }
        added
    }

    /// The `n` highest blocks, ascending by height.
    pub fn recent(&self, n: usize) -> Vec<MinedBlock> {
        let mut out: Vec<MinedBlock> = self.map.values().rev().take(n).cloned().collect();
        out.reverse();
        out
    }

    pub fn tip(&self) -> Option<&MinedBlock> {
        self.map.values().next_back()
    }

    /// Number of distinct heights held.
    pub fn count(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::BlockStore;
    use crate::mining::MinedBlock;

    #[test]
    fn recent_is_ascending_tail() {
        let mut store = BlockStore::new();
        for h in [5, 1, 3, 4, 2] {
            store.insert(MinedBlock::new(h, "antpool", h as i64 * 600));
        }
        let heights: Vec<u64> = store.recent(3).iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![3, 4, 5]);
        assert_eq!(store.recent(100).len(), 5);
        assert_eq!(store.tip().map(|b| b.height), Some(5));
    }

    #[test]
    fn same_height_replaces() {
        let mut store = BlockStore::new();
        assert_eq!(
            store.extend(vec![
                MinedBlock::new(7, "antpool", 1),
                MinedBlock::new(8, "f2pool", 2),
            ]),
            2
        );
        let old = store.insert(MinedBlock::new(7, "viabtc", 1));
        assert_eq!(old.and_then(|b| b.pool_slug).as_deref(), Some("antpool"));
        assert_eq!(store.count(), 2);
        let pools: Vec<Option<String>> = store.recent(2).into_iter().map(|b| b.pool_slug).collect();
        assert_eq!(pools, vec![Some("viabtc".into()), Some("f2pool".into())]);
    }

    #[test]
    fn empty_store() {
        let store = BlockStore::default();
        assert_eq!(store.count(), 0);
        assert!(store.tip().is_none());
        assert!(store.recent(10).is_empty());
    }
}
