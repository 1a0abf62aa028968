//! Retained element tree.
//!
//! A [`Document`] is an arena of [`Element`]s addressed by generational
//! [`NodeId`]s. A node is *connected* when following its parents reaches the
//! document root; fragments and freshly created nodes are disconnected until
//! appended somewhere under the root.

use std::fmt;

use crate::element::Element;
use crate::error::DomError;

/// Handle to a node in a [`Document`].
///
/// Ids are generational: once a node is removed its id never resolves again,
/// even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

#[derive(Debug)]
pub struct Document {
    entries: Vec<Entry>,
    free: Vec<u32>,
    root: NodeId,
    live: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            entries: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            live: 0,
        };
        doc.root = doc.create(Element::tag("#document").id("document"));
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // -------------------------------------------------------------------------
    // Creation and lookup
    // -------------------------------------------------------------------------

    /// Create a detached node.
    pub fn create(&mut self, element: Element) -> NodeId {
        let slot = Slot {
            element,
            parent: None,
            children: Vec::new(),
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.slot = Some(slot);
            return NodeId {
                index,
                generation: entry.generation,
            };
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            slot: Some(slot),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.create(Element::fragment())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.slot(id).map(|s| &s.element)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.slot_mut(id).map(|s| &mut s.element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|s| s.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Find a descendant of `from` (inclusive) by element id.
    pub fn find_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        let slot = self.slot(from)?;
        if slot.element.id == id {
            return Some(from);
        }
        slot.children
            .iter()
            .find_map(|&child| self.find_by_id(child, id))
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(slot) = self.slot(id) {
            if let Some(text) = &slot.element.text {
                out.push_str(text);
            }
            for &child in &slot.children {
                self.collect_text(child, out);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, moving it out of any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.require(parent)?;
        self.require(child)?;
        if child == self.root {
            return Err(DomError::RootImmutable);
        }
        if self.is_ancestor(child, parent) {
            log::debug!("[document] refusing to append {child} under its descendant {parent}");
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.detach(child)?;
        if let Some(slot) = self.slot_mut(child) {
            slot.parent = Some(parent);
        }
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(child);
        }
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.require(parent)?;
        self.require(child)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child)
    }

    /// Remove the node from its parent, if it has one. The node stays alive.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::RootImmutable);
        }
        let parent = self.require(id)?.parent;
        if let Some(parent) = parent {
            if let Some(slot) = self.slot_mut(parent) {
                slot.children.retain(|&c| c != id);
            }
            if let Some(slot) = self.slot_mut(id) {
                slot.parent = None;
            }
        }
        Ok(())
    }

    /// Detach every child of `id`, last first, one at a time.
    ///
    /// Returns the number of children removed.
    pub fn clear_children(&mut self, id: NodeId) -> Result<usize, DomError> {
        self.require(id)?;
        let mut removed = 0;
        while let Some(&last) = self.children(id).last() {
            if let Some(slot) = self.slot_mut(id) {
                slot.children.pop();
            }
            if let Some(slot) = self.slot_mut(last) {
                slot.parent = None;
            }
            removed += 1;
        }
        Ok(removed)
    }

    /// Detach the node and free it together with its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.detach(id)?;
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(node) = stack.pop() {
            let index = node.index as usize;
            if let Some(slot) = self.entries[index].slot.take() {
                stack.extend(slot.children);
                self.entries[index].generation = self.entries[index].generation.wrapping_add(1);
                self.free.push(node.index);
                self.live -= 1;
                freed += 1;
            }
        }
        log::trace!("[document] removed {id} ({freed} nodes)");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Element mutation
    // -------------------------------------------------------------------------

    pub fn set_top(&mut self, id: NodeId, top: f32) -> Result<(), DomError> {
        self.element_mut(id)?.top = Some(top);
        Ok(())
    }

    pub fn set_height(&mut self, id: NodeId, height: Option<f32>) -> Result<(), DomError> {
        self.element_mut(id)?.height = height;
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(id)?.text = Some(text.into());
        Ok(())
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<(), DomError> {
        self.element_mut(id)?.hidden = hidden;
        Ok(())
    }

    /// Add or remove a class. Returns true if the class list changed.
    pub fn set_class(&mut self, id: NodeId, class: &str, on: bool) -> Result<bool, DomError> {
        Ok(self.element_mut(id)?.set_class(class, on))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn set_data(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?.data.insert(key.into(), value.into());
        Ok(())
    }

    /// Height of the node's box plus its vertical margins.
    pub fn outer_height(&self, id: NodeId) -> Option<f32> {
        self.get(id).and_then(Element::outer_height)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.entries
            .get(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.slot.as_ref())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.entries
            .get_mut(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.slot.as_mut())
    }

    fn require(&self, id: NodeId) -> Result<&Slot, DomError> {
        self.slot(id).ok_or(DomError::StaleNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        self.slot_mut(id)
            .map(|s| &mut s.element)
            .ok_or(DomError::StaleNode(id))
    }
}
