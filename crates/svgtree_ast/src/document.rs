//! The document root.
use crate::{arena::Allocator, element::Element};

#[derive(Debug, Clone)]
/// A built document: the root element and the encoding it should be written with.
pub struct Document<'arena> {
    root: Element<'arena>,
    encoding: Option<String>,
}

impl<'arena> Document<'arena> {
    /// Creates a document around an existing root element
    pub fn new(root: Element<'arena>) -> Self {
        Self {
            root,
            encoding: None,
        }
    }

    /// The document element is the root element of the document
    ///
    /// [MDN | documentElement](https://developer.mozilla.org/en-US/docs/Web/API/Document/documentElement)
    pub fn document_element(&self) -> Element<'arena> {
        self.root
    }

    /// The character encoding the document declares when serialized, if any
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Sets the character encoding the document declares when serialized
    pub fn set_encoding(&mut self, encoding: Option<String>) {
        self.encoding = encoding;
    }

    /// Returns a deep copy of the document in the given allocator's arena
    pub fn clone_node(&self, allocator: &Allocator<'arena>) -> Self {
        Self {
            root: self.root.clone_node(allocator),
            encoding: self.encoding.clone(),
        }
    }
}
