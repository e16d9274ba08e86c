/*!
Toolkit-independent document tree for SVG.

The crate turns a stream of element/text events into an arena-allocated tree of
[`element::Element`] and [`node::TextRun`] nodes, and writes such a tree back out as
deterministically formatted XML.

# Example

```
use svgtree_ast::{
    arena::Allocator,
    builder::{EventSink as _, TreeBuilder},
    serialize::{Options, Serialize as _},
    style::NoInheritance,
};

let mut arena = Allocator::new_arena();
let allocator = Allocator::new(&mut arena);
let mut builder = TreeBuilder::new(&allocator, NoInheritance);
builder.element_start("svg", &[("width", "10")]);
builder.element_start("text", &[]);
builder.text("hello");
builder.element_end("text");
builder.element_end("svg");

let document = builder.finish().expect("document has a root");
assert_eq!(
    document.serialize_with_options(&Options { indent: 2, encoding: None }).unwrap(),
    "<svg width=\"10\">\n  <text>hello</text>\n</svg>"
);
```
*/

pub mod arena;
pub mod attribute;
pub mod builder;
pub mod document;
pub mod element;
pub mod error;
pub mod name;
pub mod node;
pub mod parse;
pub mod serialize;
pub mod style;
pub mod xmlwriter;

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
