//! Arena-allocated node storage shared by elements and text runs.
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use crate::element::Element;

/// A reference to a node
pub type Ref<'arena> = &'arena Node<'arena>;
/// A settable reference to a node
pub type Link<'arena> = Cell<Option<Ref<'arena>>>;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
/// An enum which specifies the type of node.
pub enum Type {
    /// An [Element] node like `<svg>` or `<tspan>`
    Element,
    /// A run of trimmed text between or around child elements
    Text,
}

#[derive(Debug)]
/// The data of a node in a document.
pub enum NodeData {
    /// An element. (e.g. `<a href="#">hello</a>`)
    Element {
        /// The qualified name of the element's tag.
        name: String,
        /// The attributes of the element, iterated in sorted key order.
        attrs: RefCell<BTreeMap<String, String>>,
        /// The first non-empty text flushed while the element was open.
        primary_text: RefCell<Option<String>>,
    },
    /// A text run. (e.g. `hello` of `<a>hello</a>`)
    Text(String),
}

#[derive(derive_more::Debug)]
/// A node of the document tree.
///
/// Children are owned by the parent's child list. The parent link and position index are
/// lookups into that list and never a second path of ownership.
pub struct Node<'arena> {
    /// The node's parent.
    #[debug(skip)]
    pub(crate) parent: Link<'arena>,
    /// The position of this node in its parent's children
    pub(crate) index: Cell<usize>,
    /// The ordered children of the node
    pub(crate) children: RefCell<Vec<Ref<'arena>>>,
    /// A unique id for the node within its arena
    pub(crate) id: usize,
    /// The node's type and associated data.
    pub node_data: NodeData,
}

impl<'arena> Node<'arena> {
    pub(crate) fn new(node_data: NodeData, id: usize) -> Self {
        Self {
            parent: Cell::new(None),
            index: Cell::new(0),
            children: RefCell::new(Vec::new()),
            id,
            node_data,
        }
    }

    /// Returns an enum that identifies what the node is.
    pub fn node_type(&self) -> Type {
        match self.node_data {
            NodeData::Element { .. } => Type::Element,
            NodeData::Text(_) => Type::Text,
        }
    }

    /// The id assigned to the node by its allocator
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether the other node is the same allocation as this one
    pub fn ptr_eq(&self, other: &Node<'arena>) -> bool {
        std::ptr::eq(self, other)
    }

    /// Returns the element this node is a child of, or [None] for a detached node or the root
    pub fn parent_element(&self) -> Option<Element<'arena>> {
        self.parent.get().and_then(Node::element)
    }

    /// Returns the position of this node within its parent's children
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Returns a snapshot of the node's children, elements and text runs alike
    pub fn child_nodes(&self) -> Vec<Ref<'arena>> {
        self.children.borrow().clone()
    }

    /// Returns the number of children of the node
    pub fn child_node_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Returns whether the node's list of children is empty or not
    pub fn has_child_nodes(&self) -> bool {
        !self.children.borrow().is_empty()
    }

    /// Upcasts self as an element
    pub fn element(&'arena self) -> Option<Element<'arena>> {
        Element::new(self)
    }

    /// Upcasts self as a text run
    pub fn text_run(&'arena self) -> Option<TextRun<'arena>> {
        TextRun::new(self)
    }

    /// Adds a node to the end of the list of children of this node, pointing the child's parent
    /// and index at its new location.
    pub(crate) fn append_child(&'arena self, child: Ref<'arena>) {
        let mut children = self.children.borrow_mut();
        child.parent.set(Some(self));
        child.index.set(children.len());
        children.push(child);
    }
}

#[derive(Clone, Copy)]
/// An immutable leaf holding trimmed text between or around an element's children.
pub struct TextRun<'arena> {
    pub(crate) node: Ref<'arena>,
}

impl<'arena> TextRun<'arena> {
    /// Converts the provided node into a text run, if the node is a text node
    pub fn new(node: Ref<'arena>) -> Option<Self> {
        match node.node_data {
            NodeData::Text(_) => Some(Self { node }),
            NodeData::Element { .. } => None,
        }
    }

    /// Returns the trimmed text of the run
    pub fn text(&self) -> &'arena str {
        let node: Ref<'arena> = self.node;
        match &node.node_data {
            NodeData::Text(text) => text,
            NodeData::Element { .. } => unreachable!("text run wraps a text node"),
        }
    }

    /// Returns the element this text run belongs to
    pub fn parent_element(&self) -> Option<Element<'arena>> {
        self.node.parent_element()
    }

    /// Returns the position of this run within its parent's children
    pub fn index(&self) -> usize {
        self.node.index()
    }

    /// Returns the underlying node
    pub fn node(&self) -> Ref<'arena> {
        self.node
    }
}

impl std::fmt::Debug for TextRun<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TextRun").field(&self.text()).finish()
    }
}

impl<'arena> From<TextRun<'arena>> for Ref<'arena> {
    fn from(value: TextRun<'arena>) -> Self {
        value.node
    }
}

impl<'arena> From<Element<'arena>> for Ref<'arena> {
    fn from(value: Element<'arena>) -> Self {
        value.node
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Allocator;

    use super::Type;

    #[test]
    fn append_child_sets_parent_and_index() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let parent = allocator.create_element("g");
        let text = allocator.create_text("a");
        let rect = allocator.create_element("rect");

        parent.append_child(text);
        parent.append_child(rect);

        assert_eq!(parent.node().child_node_count(), 2);
        assert_eq!(text.index(), 0);
        assert_eq!(rect.index(), 1);
        assert_eq!(text.parent_element(), Some(parent));
        assert_eq!(rect.parent_element(), Some(parent));
        assert_eq!(parent.parent_element(), None);

        let kinds: Vec<_> = parent
            .node()
            .child_nodes()
            .into_iter()
            .map(|node| node.node_type())
            .collect();
        assert_eq!(kinds, vec![Type::Text, Type::Element]);
    }

    #[test]
    fn ids_are_unique_per_allocator() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let a = allocator.create_element("a");
        let b = allocator.create_text("b");

        assert_ne!(a.node().id(), b.node().id());
        assert_eq!(allocator.node_count(), 2);
        assert!(!a.node().ptr_eq(b.node()));
    }
}
