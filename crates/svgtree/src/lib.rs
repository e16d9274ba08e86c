/*!
Formats SVG documents by building them into a [`svgtree_ast`] tree and serializing them back
out with a deterministic layout.

```
use svgtree::{config::FormatConfig, format_source};

let output = format_source(
    r#"<svg fill="red"><g>  <rect/></g></svg>"#,
    &FormatConfig {
        indent: Some(2),
        inherit: vec![String::from("fill")],
        ..FormatConfig::default()
    },
)
.unwrap();
assert_eq!(
    output,
    "<svg fill=\"red\">\n  <g fill=\"red\">\n    <rect fill=\"red\"/>\n  </g>\n</svg>"
);
```
*/
use svgtree_ast::{
    arena::Allocator,
    parse::roxmltree::parse_with_hook,
    serialize::Serialize as _,
    style::InheritAttributes,
};

use crate::config::FormatConfig;

pub mod args;
pub mod commands;
pub mod config;
pub mod fs;

/// Parses `source` and serializes it with the layout described by `config`.
///
/// # Errors
/// If the source cannot be parsed, or the output cannot be serialized
pub fn format_source(source: &str, config: &FormatConfig) -> anyhow::Result<String> {
    let mut arena = Allocator::new_arena();
    let allocator = Allocator::new(&mut arena);
    let hook = InheritAttributes::new(config.inherit.iter().map(String::as_str));
    let document = parse_with_hook(source, &allocator, hook)?;
    log::debug!("built document with {} nodes", allocator.node_count());

    Ok(document.serialize_with_options(&config.options())?)
}
