//! Stable node indices for tab order.
//!
//! A [`NodeIndexGenerator`] hands out increasing indices to node ids in the
//! order they are first seen. One generator is owned by whoever builds a tab
//! order and passed by `&mut` for the duration of a render pass.

use indexmap::IndexMap;
use serde::Serialize;

/// One entry of a tab order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeItem {
    id: String,
    index: usize,
}

impl NodeItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Assigns each id a stable index the first time it is seen.
#[derive(Debug, Clone, Default)]
pub struct NodeIndexGenerator {
    // Insertion order matches index order.
    indices: IndexMap<String, usize>,
    initial: usize,
    next: usize,
}

impl NodeIndexGenerator {
    /// Creates a generator whose first index is `initial`.
    pub fn with_start(initial: usize) -> Self {
        Self {
            indices: IndexMap::new(),
            initial,
            next: initial,
        }
    }

    /// Returns the index of `id`, assigning the next free one on first sight.
    pub fn get_node_index(&mut self, id: &str) -> usize {
        if let Some(&index) = self.indices.get(id) {
            return index;
        }

        let index = self.next;
        self.next += 1;
        self.indices.insert(id.to_string(), index);
        index
    }

    /// Every id seen so far, ordered by index.
    pub fn item_list(&self) -> Vec<NodeItem> {
        self.indices
            .iter()
            .map(|(id, &index)| NodeItem {
                id: id.clone(),
                index,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Forgets every id and restarts counting from the initial index.
    pub fn reset(&mut self) {
        self.indices.clear();
        self.next = self.initial;
    }
}
