//! Record store: the dataset and its per-record bookkeeping.

use nuidom::NodeId;

use super::item::ListRecord;
use crate::components::selection::Selectable;

/// Per-record bookkeeping.
///
/// `original_index` is the record's position in the dataset and equals the
/// item's index in [`RecordStore::items`].
#[derive(Debug, Clone)]
pub struct ViewItem<R> {
    pub original_index: usize,
    /// Cached node, created the first time the item becomes visible.
    pub node: Option<NodeId>,
    pub record: R,
    pub selected: bool,
}

impl<R> Selectable for ViewItem<R> {
    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// The full dataset, one [`ViewItem`] per record in original order.
#[derive(Debug)]
pub struct RecordStore<R> {
    items: Vec<ViewItem<R>>,
}

impl<R: ListRecord> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ListRecord> RecordStore<R> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ViewItem<R>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [ViewItem<R>] {
        &mut self.items
    }

    pub fn get(&self, index: usize) -> Option<&ViewItem<R>> {
        self.items.get(index)
    }

    /// Replace the dataset.
    ///
    /// Returns the cached nodes of the dropped items so the caller can
    /// release them.
    pub fn load(&mut self, records: Vec<R>) -> Vec<NodeId> {
        let dropped = self.clear();
        self.items = records
            .into_iter()
            .enumerate()
            .map(|(original_index, record)| ViewItem {
                original_index,
                node: None,
                record,
                selected: false,
            })
            .collect();
        dropped
    }

    /// Take the tail of an updated dataset.
    ///
    /// `records` is the whole dataset; only the entries past the current
    /// length are new. Returns how many items were appended (0 when the
    /// dataset did not grow).
    pub fn append(&mut self, records: Vec<R>) -> usize {
        let start = self.items.len();
        if records.len() <= start {
            return 0;
        }
        let added = records.len() - start;
        self.items.extend(
            records
                .into_iter()
                .enumerate()
                .skip(start)
                .map(|(original_index, record)| ViewItem {
                    original_index,
                    node: None,
                    record,
                    selected: false,
                }),
        );
        added
    }

    /// Refresh one item in place, dropping its cached node and selection.
    ///
    /// Returns `None` when the index is out of range, otherwise the node
    /// that was cached (if any).
    pub fn update(&mut self, index: usize, record: Option<R>) -> Option<Option<NodeId>> {
        let item = self.items.get_mut(index)?;
        if let Some(record) = record {
            item.record = record;
        }
        item.selected = false;
        Some(item.node.take())
    }

    /// Drop everything, returning the cached nodes.
    pub fn clear(&mut self) -> Vec<NodeId> {
        self.items.drain(..).filter_map(|item| item.node).collect()
    }
}
