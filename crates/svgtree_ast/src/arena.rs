//! The arena used to allocate nodes
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::{
    element::Element,
    node::{Node, NodeData, TextRun},
};

/// An arena for [`Node`] values
pub struct Arena<'arena>(typed_arena::Arena<Node<'arena>>);

/// The allocator for adding new nodes that live as long as the document
pub struct Allocator<'arena> {
    /// The arena for new nodes
    arena: &'arena typed_arena::Arena<Node<'arena>>,
    /// Incrementally counts the number of allocated nodes to assign as the id of allocated nodes
    current_node_id: Cell<usize>,
}

impl<'arena> Allocator<'arena> {
    /// Returns an arena that cannot be publicly accessed
    pub fn new_arena() -> Arena<'arena> {
        Arena(typed_arena::Arena::new())
    }

    /// Returns an arena that cannot be publicly accessed
    pub fn new_arena_with_capacity(n: usize) -> Arena<'arena> {
        Arena(typed_arena::Arena::with_capacity(n))
    }

    /// Creates a new allocator to assign nodes that live as long as the document requires.
    pub fn new(
        // NOTE: Arena is `mut` to prevent sharing, otherwise the invariant of a unique `current_node_id`
        // may be broken.
        arena: &'arena mut Arena<'arena>,
    ) -> Self {
        Self {
            current_node_id: Cell::new(arena.0.len()),
            arena: &arena.0,
        }
    }

    /// Allocates a node with the given [`NodeData`]
    pub fn alloc(&self, node_data: NodeData) -> &'arena Node<'arena> {
        let id = self.current_node_id.get() + 1;
        self.current_node_id.set(id);
        self.arena.alloc(Node::new(node_data, id))
    }

    /// Allocates a detached element with the given qualified name and no attributes
    pub fn create_element(&self, name: impl Into<String>) -> Element<'arena> {
        let node = self.alloc(NodeData::Element {
            name: name.into(),
            attrs: RefCell::new(BTreeMap::new()),
            primary_text: RefCell::new(None),
        });
        Element { node }
    }

    /// Allocates a detached text run holding already-trimmed text
    pub fn create_text(&self, text: impl Into<String>) -> TextRun<'arena> {
        let node = self.alloc(NodeData::Text(text.into()));
        TextRun { node }
    }

    /// Returns the number of nodes allocated so far
    pub fn node_count(&self) -> usize {
        self.current_node_id.get()
    }
}
