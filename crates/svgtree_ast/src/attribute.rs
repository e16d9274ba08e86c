//! Element attributes and typed attribute values.
use std::{
    cell::{Ref, RefCell},
    collections::BTreeMap,
};

#[derive(Clone, Copy)]
/// The list of attributes of an element.
///
/// Keys are unique and always iterated in sorted order, which is also the order they are
/// serialized in.
pub struct Attributes<'arena>(pub(crate) &'arena RefCell<BTreeMap<String, String>>);

impl Attributes<'_> {
    /// Returns the number of attributes
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns the value of the attribute with the given name
    ///
    /// [MDN | getNamedItem](https://developer.mozilla.org/en-US/docs/Web/API/NamedNodeMap/getNamedItem)
    pub fn get_named_item(&self, name: &str) -> Option<String> {
        self.0.borrow().get(name).cloned()
    }

    /// Returns whether an attribute with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains_key(name)
    }

    /// Sets the value of an attribute, returning the value it replaced
    ///
    /// [MDN | setNamedItem](https://developer.mozilla.org/en-US/docs/Web/API/NamedNodeMap/setNamedItem)
    pub fn set_named_item(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.borrow_mut().insert(name.into(), value.into())
    }

    /// Removes an attribute, returning its value
    ///
    /// [MDN | removeNamedItem](https://developer.mozilla.org/en-US/docs/Web/API/NamedNodeMap/removeNamedItem)
    pub fn remove_named_item(&self, name: &str) -> Option<String> {
        self.0.borrow_mut().remove(name)
    }

    /// Borrows the underlying map for iteration in sorted key order
    ///
    /// # Panics
    /// If the attributes are being mutated at the same time
    pub fn borrow(&self) -> Ref<'_, BTreeMap<String, String>> {
        self.0.borrow()
    }

    /// Returns the attribute names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Returns a copy of the attributes
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0.borrow().clone()
    }
}

impl std::fmt::Debug for Attributes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

/// A type that an attribute value can be read as.
///
/// Reading never fails: a missing or unparsable value resolves to a default.
pub trait FromAttribute: Sized + Copy {
    /// The value used when no default is given
    const DEFAULT: Self;

    /// Parses the raw attribute value, returning [None] when it isn't valid for the type
    fn from_attribute(value: &str) -> Option<Self>;
}

impl FromAttribute for bool {
    const DEFAULT: Self = false;

    fn from_attribute(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl FromAttribute for i32 {
    const DEFAULT: Self = 0;

    fn from_attribute(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl FromAttribute for f32 {
    const DEFAULT: Self = 0.0;

    fn from_attribute(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// Reads `value` as `T`, falling back to `default` when absent or unparsable
pub fn coerce<T: FromAttribute>(value: Option<&str>, default: T) -> T {
    value.and_then(T::from_attribute).unwrap_or(default)
}

#[test]
fn coerce_values() {
    assert!(coerce(Some("TRUE"), false));
    assert!(!coerce(Some("false"), true));
    assert!(coerce(Some("yes"), true));
    assert_eq!(coerce(Some("-12"), 5), -12);
    assert_eq!(coerce(Some("+7"), 0), 7);
    assert_eq!(coerce(Some("1.5"), 0), 0);
    assert_eq!(coerce(Some(" 1.5 "), 0.0_f32), 1.5);
    assert_eq!(coerce(Some("abc"), 0.0_f32), 0.0);
    assert_eq!(coerce::<i32>(None, 5), 5);
    assert_eq!(coerce::<i32>(None, i32::DEFAULT), 0);
}
