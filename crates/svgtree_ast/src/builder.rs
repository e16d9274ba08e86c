//! Builds a document tree from a stream of parse events.
//!
//! The events are expected to be well-formed and properly nested; unbalanced sequences are the
//! tokenizer's responsibility to avoid, and are only logged here.
use smallvec::SmallVec;

use crate::{arena::Allocator, document::Document, element::Element, style::StyleHook};

/// A receiver of tokenizer events
pub trait EventSink {
    /// Called with the encoding named by the XML declaration, before any element
    fn declaration(&mut self, _encoding: Option<&str>) {}

    /// Called when an element's start tag is read, with its qualified name and attributes in
    /// source order
    fn element_start(&mut self, name: &str, attributes: &[(&str, &str)]);

    /// Called with character data; consecutive calls concatenate
    fn text(&mut self, chars: &str);

    /// Called when an element's end tag is read, or after the start tag of an empty element
    fn element_end(&mut self, name: &str);
}

/// Builds a [`Document`] from the events it is given.
///
/// A builder holds the parse state of a single document and is consumed by
/// [`TreeBuilder::finish`].
pub struct TreeBuilder<'a, 'arena, H: StyleHook> {
    allocator: &'a Allocator<'arena>,
    hook: H,
    root: Option<Element<'arena>>,
    encoding: Option<String>,
    stack: SmallVec<[Element<'arena>; 16]>,
    text: Option<String>,
}

impl<'a, 'arena, H: StyleHook> TreeBuilder<'a, 'arena, H> {
    /// Creates a builder allocating into `allocator`, with `hook` applied to every non-root
    /// element
    pub fn new(allocator: &'a Allocator<'arena>, hook: H) -> Self {
        Self {
            allocator,
            hook,
            root: None,
            encoding: None,
            stack: SmallVec::new(),
            text: None,
        }
    }

    /// The innermost open element, if any
    pub fn current(&self) -> Option<Element<'arena>> {
        self.stack.last().copied()
    }

    /// The document root, once the first element has started
    pub fn root(&self) -> Option<Element<'arena>> {
        self.root
    }

    /// Returns the built document, or [None] if no element was ever started.
    ///
    /// Text outside of the root element is discarded.
    pub fn finish(self) -> Option<Document<'arena>> {
        if !self.stack.is_empty() {
            log::warn!("finished with {} unclosed elements", self.stack.len());
        }
        let mut document = Document::new(self.root?);
        document.set_encoding(self.encoding);
        Some(document)
    }

    /// Converts the pending text into a text run of `target`, setting its primary text if unset.
    fn flush(&mut self, target: Option<Element<'arena>>) {
        let Some(raw) = self.text.take() else {
            return;
        };
        let Some(text) = trim_text(&raw) else {
            return;
        };
        let Some(target) = target else {
            log::debug!("discarding top-level text {text:?}");
            return;
        };
        log::debug!("flushing {text:?} into <{}>", target.name());
        target.init_primary_text(&text);
        target.append_child(self.allocator.create_text(text));
    }
}

impl<'arena, H: StyleHook> EventSink for TreeBuilder<'_, 'arena, H> {
    fn declaration(&mut self, encoding: Option<&str>) {
        self.encoding = encoding.map(String::from);
    }

    fn element_start(&mut self, name: &str, attributes: &[(&str, &str)]) {
        let parent = self.current();
        self.flush(parent);

        let element = self.allocator.create_element(name);
        match parent {
            Some(parent) => parent.append_child(element),
            None if self.root.is_none() => self.root = Some(element),
            None => log::warn!("ignoring second top-level element <{name}>"),
        }
        for (name, value) in attributes {
            element.set_attribute(*name, *value);
        }
        if let Some(parent) = parent {
            self.hook.propagate(&parent, &element);
        }

        log::debug!("opened <{name}>");
        self.stack.push(element);
    }

    fn text(&mut self, chars: &str) {
        self.text.get_or_insert_with(String::new).push_str(chars);
    }

    fn element_end(&mut self, name: &str) {
        let Some(element) = self.stack.pop() else {
            log::warn!("ignoring </{name}> without an open element");
            return;
        };
        if element.name() != name {
            log::warn!("closing <{}> with </{name}>", element.name());
        }
        self.flush(Some(element));
        log::debug!("closed <{name}>");
    }
}

/// Trims flushed text.
///
/// Leading whitespace is dropped and trailing whitespace collapses to a single space, so text
/// running into an inline element keeps its separating space. Whitespace-only text is [None].
pub fn trim_text(raw: &str) -> Option<String> {
    let core = raw.trim();
    if core.is_empty() {
        return None;
    }
    let mut text = String::with_capacity(core.len() + 1);
    text.push_str(core);
    if raw.ends_with(char::is_whitespace) {
        text.push(' ');
    }
    Some(text)
}
