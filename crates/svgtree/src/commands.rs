//! Various commands that can be executed by svgtree
mod format;

pub use format::Format;
