//! Hooks for propagating style attributes from a parent element to a new child.
use std::collections::BTreeSet;

use crate::element::Element;

/// The keyword a child can use to explicitly take its parent's value
pub const INHERIT: &str = "inherit";

/// Policy invoked by the tree builder once for every non-root element, after its attributes are
/// set and before it becomes the innermost open element.
///
/// The hook may read and write the child's attributes. It is called with the parent after the
/// parent's own propagation, so inherited values flow down the whole tree.
pub trait StyleHook {
    /// Propagates attributes from `parent` onto `child`
    fn propagate<'arena>(&self, parent: &Element<'arena>, child: &Element<'arena>);
}

impl<F> StyleHook for F
where
    F: for<'arena> Fn(&Element<'arena>, &Element<'arena>),
{
    fn propagate<'arena>(&self, parent: &Element<'arena>, child: &Element<'arena>) {
        self(parent, child);
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// A hook that leaves every element's attributes as parsed
pub struct NoInheritance;

impl StyleHook for NoInheritance {
    fn propagate<'arena>(&self, _parent: &Element<'arena>, _child: &Element<'arena>) {}
}

#[derive(Debug, Default, Clone)]
/// A hook that copies a chosen set of attributes from parent to child.
///
/// A child takes its parent's value when it doesn't declare the attribute or declares it as
/// `inherit`. Attributes the parent doesn't have are left untouched.
pub struct InheritAttributes {
    names: BTreeSet<String>,
}

impl InheritAttributes {
    /// Creates a hook inheriting the given attribute names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The attribute names this hook propagates
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl StyleHook for InheritAttributes {
    fn propagate<'arena>(&self, parent: &Element<'arena>, child: &Element<'arena>) {
        for name in &self.names {
            let Some(value) = parent.get_attribute(name) else {
                continue;
            };
            let inherits = child
                .get_attribute(name)
                .is_none_or(|current| current == INHERIT);
            if inherits {
                log::debug!("inheriting {name}={value:?} onto <{}>", child.name());
                child.set_attribute(name.as_str(), value);
            }
        }
    }
}
