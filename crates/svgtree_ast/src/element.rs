//! Elements of a document tree.
use std::{cell::RefCell, collections::BTreeMap, fmt::Debug, hash::Hash};

use crate::{
    arena::Allocator,
    attribute::{coerce, Attributes, FromAttribute},
    name,
    node::{NodeData, Ref, TextRun, Type},
};

#[derive(Clone, Copy)]
/// An element of the document tree.
///
/// Generic equality and hashing are node identity. For comparing by content use
/// [`Element::content_eq`], and for comparing by location in the tree use
/// [`Element::same_position`].
pub struct Element<'arena> {
    pub(crate) node: Ref<'arena>,
}

/// Borrowed parts of an element's data
struct ElementData<'a> {
    name: &'a str,
    attrs: &'a RefCell<BTreeMap<String, String>>,
    primary_text: &'a RefCell<Option<String>>,
}

impl<'arena> Element<'arena> {
    /// Converts the provided node into an element, if the node is an element
    pub fn new(node: Ref<'arena>) -> Option<Self> {
        match node.node_data {
            NodeData::Element { .. } => Some(Self { node }),
            NodeData::Text(_) => None,
        }
    }

    fn data(&self) -> ElementData<'arena> {
        let node: Ref<'arena> = self.node;
        match &node.node_data {
            NodeData::Element {
                name,
                attrs,
                primary_text,
            } => ElementData {
                name,
                attrs,
                primary_text,
            },
            NodeData::Text(_) => unreachable!("element wraps an element node"),
        }
    }

    /// Returns the underlying node
    pub fn node(&self) -> Ref<'arena> {
        self.node
    }

    /// Returns the qualified name of the element, e.g. `xlink:a`
    ///
    /// [MDN | tagName](https://developer.mozilla.org/en-US/docs/Web/API/Element/tagName)
    pub fn name(&self) -> &'arena str {
        self.data().name
    }

    /// Returns the prefix of the element's qualified name
    ///
    /// [MDN | prefix](https://developer.mozilla.org/en-US/docs/Web/API/Element/prefix)
    pub fn prefix(&self) -> Option<&'arena str> {
        name::prefix(self.name())
    }

    /// Returns the local part of the element's qualified name
    ///
    /// [MDN | localName](https://developer.mozilla.org/en-US/docs/Web/API/Element/localName)
    pub fn local_name(&self) -> &'arena str {
        name::local_name(self.name())
    }

    /// Returns a collection of the attributes assigned to the element.
    ///
    /// [MDN | attributes](https://developer.mozilla.org/en-US/docs/Web/API/Element/attributes)
    pub fn attributes(&self) -> Attributes<'arena> {
        Attributes(self.data().attrs)
    }

    /// Returns the value of the named attribute
    ///
    /// [MDN | getAttribute](https://developer.mozilla.org/en-US/docs/Web/API/Element/getAttribute)
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes().get_named_item(name)
    }

    /// Returns whether the element has the named attribute
    ///
    /// [MDN | hasAttribute](https://developer.mozilla.org/en-US/docs/Web/API/Element/hasAttribute)
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().contains(name)
    }

    /// Sets the value of an attribute, returning the previous value
    ///
    /// [MDN | setAttribute](https://developer.mozilla.org/en-US/docs/Web/API/Element/setAttribute)
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes().set_named_item(name, value)
    }

    /// Removes an attribute, returning its value
    ///
    /// [MDN | removeAttribute](https://developer.mozilla.org/en-US/docs/Web/API/Element/removeAttribute)
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes().remove_named_item(name)
    }

    /// Reads an attribute as `T`, or `T::DEFAULT` when missing or unparsable
    pub fn get_attribute_as<T: FromAttribute>(&self, name: &str) -> T {
        self.get_attribute_as_or(name, T::DEFAULT)
    }

    /// Reads an attribute as `T`, or `default` when missing or unparsable
    pub fn get_attribute_as_or<T: FromAttribute>(&self, name: &str, default: T) -> T {
        let attrs = self.data().attrs.borrow();
        coerce(attrs.get(name).map(String::as_str), default)
    }

    /// Reads an attribute as a boolean, defaulting to `false`
    pub fn get_attribute_bool(&self, name: &str) -> bool {
        self.get_attribute_as(name)
    }

    /// Reads an attribute as a boolean, defaulting to `default`
    pub fn get_attribute_bool_or(&self, name: &str, default: bool) -> bool {
        self.get_attribute_as_or(name, default)
    }

    /// Reads an attribute as an integer, defaulting to `0`
    pub fn get_attribute_int(&self, name: &str) -> i32 {
        self.get_attribute_as(name)
    }

    /// Reads an attribute as an integer, defaulting to `default`
    pub fn get_attribute_int_or(&self, name: &str, default: i32) -> i32 {
        self.get_attribute_as_or(name, default)
    }

    /// Reads an attribute as a float, defaulting to `0.0`
    pub fn get_attribute_float(&self, name: &str) -> f32 {
        self.get_attribute_as(name)
    }

    /// Reads an attribute as a float, defaulting to `default`
    pub fn get_attribute_float_or(&self, name: &str, default: f32) -> f32 {
        self.get_attribute_as_or(name, default)
    }

    /// Returns the first non-empty text flushed while this element was the innermost open
    /// element
    pub fn primary_text(&self) -> Option<String> {
        self.data().primary_text.borrow().clone()
    }

    /// Returns whether the element carries a primary text
    pub fn has_primary_text(&self) -> bool {
        self.data().primary_text.borrow().is_some()
    }

    /// Replaces the primary text
    pub fn set_primary_text(&self, text: Option<String>) {
        self.data().primary_text.replace(text);
    }

    /// Sets the primary text only when none is set yet, returning whether it was written
    pub(crate) fn init_primary_text(&self, text: &str) -> bool {
        let mut primary_text = self.data().primary_text.borrow_mut();
        if primary_text.is_some() {
            return false;
        }
        *primary_text = Some(text.to_string());
        true
    }

    /// Returns the element this element is a child of
    ///
    /// [MDN | parentElement](https://developer.mozilla.org/en-US/docs/Web/API/Node/parentElement)
    pub fn parent_element(&self) -> Option<Self> {
        self.node.parent_element()
    }

    /// Returns the position of this element within its parent's children
    pub fn index(&self) -> usize {
        self.node.index()
    }

    /// Adds a node to the end of the element's children, setting the child's parent to this
    /// element and its index to the previous number of children.
    ///
    /// The child is expected to be detached, such as a newly allocated node or the result of
    /// [`Element::clone_node`].
    ///
    /// [MDN | appendChild](https://developer.mozilla.org/en-US/docs/Web/API/Node/appendChild)
    pub fn append_child(&self, child: impl Into<Ref<'arena>>) {
        self.node.append_child(child.into());
    }

    /// Returns a snapshot of all children, elements and text runs alike
    ///
    /// [MDN | childNodes](https://developer.mozilla.org/en-US/docs/Web/API/Node/childNodes)
    pub fn child_nodes(&self) -> Vec<Ref<'arena>> {
        self.node.child_nodes()
    }

    /// Returns the element children of this element.
    ///
    /// [MDN | children](https://developer.mozilla.org/en-US/docs/Web/API/Element/children)
    pub fn children(&self) -> Vec<Self> {
        self.node
            .children
            .borrow()
            .iter()
            .filter_map(|node| Self::new(node))
            .collect()
    }

    /// Returns the text run children of this element.
    pub fn text_runs(&self) -> Vec<TextRun<'arena>> {
        self.node
            .children
            .borrow()
            .iter()
            .filter_map(|node| TextRun::new(node))
            .collect()
    }

    /// Returns the number of element children of this element.
    ///
    /// [MDN | childElementCount](https://developer.mozilla.org/en-US/docs/Web/API/Element/childElementCount)
    pub fn child_element_count(&self) -> usize {
        self.node
            .children
            .borrow()
            .iter()
            .filter(|node| node.node_type() == Type::Element)
            .count()
    }

    /// Returns every descendant element with the given qualified name, in depth-first pre-order.
    ///
    /// The element itself is not included.
    ///
    /// [MDN | getElementsByTagName](https://developer.mozilla.org/en-US/docs/Web/API/Element/getElementsByTagName)
    pub fn elements_by_name(&self, name: &str) -> Vec<Self> {
        let mut result = Vec::new();
        self.collect_elements_by_name(name, &mut result);
        result
    }

    fn collect_elements_by_name(&self, name: &str, result: &mut Vec<Self>) {
        for child in self.children() {
            if child.name() == name {
                result.push(child);
            }
            child.collect_elements_by_name(name, result);
        }
    }

    /// Returns a deep copy of the element in the given allocator's arena.
    ///
    /// Attributes, primary text, and children are duplicated. Every copied child points to its
    /// copied parent; the returned element itself is detached.
    ///
    /// [MDN | cloneNode](https://developer.mozilla.org/en-US/docs/Web/API/Node/cloneNode)
    pub fn clone_node(&self, allocator: &Allocator<'arena>) -> Self {
        let data = self.data();
        let clone = allocator.create_element(data.name);
        clone
            .data()
            .attrs
            .replace(data.attrs.borrow().clone());
        clone
            .data()
            .primary_text
            .replace(data.primary_text.borrow().clone());

        for child in self.child_nodes() {
            match &child.node_data {
                NodeData::Element { .. } => {
                    clone.append_child(Self { node: child }.clone_node(allocator));
                }
                NodeData::Text(text) => clone.append_child(allocator.create_text(text.as_str())),
            }
        }
        clone
    }

    /// Compares the name, attributes, primary text, and children of two elements.
    pub fn content_eq(&self, other: &Self) -> bool {
        let (a, b) = (self.data(), other.data());
        if a.name != b.name
            || *a.attrs.borrow() != *b.attrs.borrow()
            || *a.primary_text.borrow() != *b.primary_text.borrow()
        {
            return false;
        }

        let (a, b) = (self.child_nodes(), other.child_nodes());
        a.len() == b.len()
            && a.iter().zip(b.iter()).all(|(a, b)| match (&a.node_data, &b.node_data) {
                (NodeData::Text(a), NodeData::Text(b)) => a == b,
                (NodeData::Element { .. }, NodeData::Element { .. }) => {
                    Self { node: a }.content_eq(&Self { node: b })
                }
                _ => false,
            })
    }

    /// Whether both elements have the same name, the same parent by identity, and the same
    /// index within that parent.
    ///
    /// Differently positioned copies never compare as the same position, even with identical
    /// content.
    pub fn same_position(&self, other: &Self) -> bool {
        let same_parent = match (self.node.parent.get(), other.node.parent.get()) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        };
        same_parent && self.name() == other.name() && self.index() == other.index()
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.ptr_eq(other.node)
    }
}

impl Eq for Element<'_> {}

impl Hash for Element<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.node, state);
    }
}

impl Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("id", &self.node.id())
            .field("attributes", &self.attributes())
            .field("primary_text", &self.primary_text())
            .finish()
    }
}
