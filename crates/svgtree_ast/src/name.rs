//! Helpers for qualified names.
//!
//! Names are opaque strings to the tree; these helpers only split on the first `:`.

/// Returns the prefix (e.g. `xlink` of `xlink:href`) of a qualified name.
pub fn prefix(name: &str) -> Option<&str> {
    name.split_once(':').map(|(prefix, _)| prefix)
}

/// Returns the local part (e.g. the `href` of `xlink:href`) of a qualified name.
pub fn local_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}

/// Joins a prefix and local part with a `:`
pub fn qualify(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

#[test]
fn split_names() {
    assert_eq!(prefix("xlink:href"), Some("xlink"));
    assert_eq!(local_name("xlink:href"), "href");
    assert_eq!(prefix("svg"), None);
    assert_eq!(local_name("svg"), "svg");
    assert_eq!(qualify(Some("xml"), "space"), "xml:space");
    assert_eq!(qualify(None, "rect"), "rect");
}
