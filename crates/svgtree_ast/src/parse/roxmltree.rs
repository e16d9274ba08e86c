//! Parsing methods using roxmltree
//!
//! # Quirks
//!
//! Roxmltree has some notable quirks
//!
//! - Comments and processing instructions are skipped
//! - Entities are expanded, and CDATA sections become plain text. Text and attribute values
//!   are escaped again before they reach the sink, so the tree can be serialized verbatim
//! - Duplicate namespace uris are merged, so an element is named with whichever prefix roxmltree
//!   resolves its uri to
use std::{borrow::Cow, fmt::Display, path::Path};

use crate::{
    arena::Allocator,
    builder::{EventSink, TreeBuilder},
    document::Document,
    name,
    style::{NoInheritance, StyleHook},
    xmlwriter::{escape_attribute, escape_text},
};

const XML_PREFIX: &str = "xml";
const MAX_DEPTH: usize = 1024;

#[derive(Debug)]
/// The errors which may occur while parsing a document with roxmltree.
pub enum ParseError {
    /// The document parsed had a depth greater than 1024 elements
    NodesLimitReached,
    /// The document parsed had no root element
    NoElementInDocument,
    /// The document couldn't be parsed by roxmltree
    ROXML(roxmltree::Error),
    /// The document couldn't be parsed due to an IO issue
    IO(std::io::Error),
}

/// Parses a document without any style propagation.
///
/// # Errors
///
/// If the source is malformed or too deep
pub fn parse<'arena>(
    source: &str,
    allocator: &Allocator<'arena>,
) -> Result<Document<'arena>, ParseError> {
    parse_with_hook(source, allocator, NoInheritance)
}

/// Parses a document, calling `hook` for every non-root element as it's built.
///
/// # Errors
///
/// If the source is malformed or too deep
pub fn parse_with_hook<'arena, H: StyleHook>(
    source: &str,
    allocator: &Allocator<'arena>,
    hook: H,
) -> Result<Document<'arena>, ParseError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(source, options).map_err(ParseError::ROXML)?;

    let mut builder = TreeBuilder::new(allocator, hook);
    drive(&xml, &mut builder)?;
    builder.finish().ok_or(ParseError::NoElementInDocument)
}

/// Reads and parses the file at `path`.
///
/// # Errors
///
/// If the file can't be read, or if parsing fails
pub fn parse_file<'arena>(
    path: &Path,
    allocator: &Allocator<'arena>,
) -> Result<Document<'arena>, ParseError> {
    let source = std::fs::read_to_string(path).map_err(ParseError::IO)?;
    parse(&source, allocator)
}

/// Replays a document already in roxmltree representation as events to `sink`.
///
/// The declared encoding is reported first, followed by the events of the root element.
///
/// # Errors
///
/// If the depth of the tree is too deep
pub fn drive(xml: &roxmltree::Document, sink: &mut impl EventSink) -> Result<(), ParseError> {
    sink.declaration(declared_encoding(xml.input_text()));
    drive_element(xml.root_element(), 0, sink)
}

fn drive_element(
    node: roxmltree::Node,
    depth: usize,
    sink: &mut impl EventSink,
) -> Result<(), ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::NodesLimitReached);
    }

    let tag_name = node.tag_name();
    let qual_name = qualified_name(&node, tag_name.namespace(), tag_name.name());

    let mut attributes: Vec<(Cow<str>, Cow<str>)> = new_xmlns(&node)
        .map(|ns| {
            let attr_name = match ns.name() {
                Some(prefix) => Cow::Owned(name::qualify(Some("xmlns"), prefix)),
                None => Cow::Borrowed("xmlns"),
            };
            (attr_name, escape_attribute(ns.uri()))
        })
        .collect();
    attributes.extend(
        node.attributes().map(|attr| {
            (
                qualified_name(&node, attr.namespace(), attr.name()),
                escape_attribute(attr.value()),
            )
        }),
    );
    let attributes: Vec<(&str, &str)> = attributes
        .iter()
        .map(|(name, value)| (name.as_ref(), value.as_ref()))
        .collect();

    sink.element_start(&qual_name, &attributes);
    for child in node.children() {
        match child.node_type() {
            roxmltree::NodeType::Element => drive_element(child, depth + 1, sink)?,
            roxmltree::NodeType::Text => sink.text(&escape_text(child.text().unwrap_or_default())),
            _ => {}
        }
    }
    sink.element_end(&qual_name);
    Ok(())
}

/// Names `local` with the prefix bound to `uri` in the scope of `node`
fn qualified_name<'a>(node: &roxmltree::Node, uri: Option<&str>, local: &'a str) -> Cow<'a, str> {
    let prefix = uri.and_then(|uri| {
        if uri == roxmltree::NS_XML_URI {
            Some(XML_PREFIX)
        } else {
            node.lookup_prefix(uri)
        }
    });
    match prefix {
        Some(prefix) => Cow::Owned(name::qualify(Some(prefix), local)),
        None => Cow::Borrowed(local),
    }
}

/// Returns the namespaces declared on `node` that aren't already in scope from its parent
fn new_xmlns<'a, 'input>(
    node: &roxmltree::Node<'a, 'input>,
) -> impl Iterator<Item = &'a roxmltree::Namespace<'input>> {
    let parent = node.parent_element();
    node.namespaces().filter(move |ns| {
        if ns.name() == Some(XML_PREFIX) || ns.uri().is_empty() {
            return false;
        }
        !parent.is_some_and(|parent| {
            parent
                .namespaces()
                .any(|existing| existing.name() == ns.name() && existing.uri() == ns.uri())
        })
    })
}

/// Reads the encoding named by the XML declaration at the start of `source`, if any
pub fn declared_encoding(source: &str) -> Option<&str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let declaration = source
        .strip_prefix("<?xml")
        .filter(|rest| rest.starts_with(char::is_whitespace))?;
    let declaration = &declaration[..declaration.find("?>")?];
    let (_, rest) = declaration.split_once("encoding")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[quote.len_utf8()..];
    let encoding = &rest[..rest.find(quote)?];
    (!encoding.is_empty()).then_some(encoding)
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodesLimitReached => f.write_str("The depth of the document parsed was too deep"),
            Self::NoElementInDocument => f.write_str("No element in document"),
            Self::ROXML(err) => err.fmt(f),
            Self::IO(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        arena::Allocator, builder::EventSink, serialize::Serialize as _,
        style::InheritAttributes,
    };

    use super::{declared_encoding, drive, parse, parse_with_hook, ParseError};

    /// Records events as strings
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl EventSink for Recorder {
        fn declaration(&mut self, encoding: Option<&str>) {
            self.0.push(format!("declaration {encoding:?}"));
        }

        fn element_start(&mut self, name: &str, attributes: &[(&str, &str)]) {
            let attributes: Vec<_> = attributes.iter().map(|(k, v)| format!(" {k}={v}")).collect();
            self.0.push(format!("<{name}{}>", attributes.concat()));
        }

        fn text(&mut self, chars: &str) {
            self.0.push(format!("{chars:?}"));
        }

        fn element_end(&mut self, name: &str) {
            self.0.push(format!("</{name}>"));
        }
    }

    #[test]
    fn events() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- comment -->
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><?pi?><use xlink:href="&#x23;a" xml:space="preserve"/><text>a &amp; <![CDATA[b]]></text></svg>"#;
        let xml = roxmltree::Document::parse(source).unwrap();
        let mut recorder = Recorder::default();
        drive(&xml, &mut recorder).unwrap();

        assert_eq!(
            recorder.0,
            vec![
                r#"declaration Some("UTF-8")"#,
                "<svg xmlns=http://www.w3.org/2000/svg xmlns:xlink=http://www.w3.org/1999/xlink>",
                "<use xlink:href=#a xml:space=preserve>",
                "</use>",
                "<text>",
                r#""a &amp; b""#,
                "</text>",
                "</svg>",
            ]
        );
    }

    #[test]
    fn nested_namespaces_are_declared_once() {
        let source = r#"<svg xmlns="http://www.w3.org/2000/svg"><g xmlns:x="urn:x"><x:a/></g><rect/></svg>"#;
        let xml = roxmltree::Document::parse(source).unwrap();
        let mut recorder = Recorder::default();
        drive(&xml, &mut recorder).unwrap();

        assert_eq!(
            recorder.0,
            vec![
                "declaration None",
                "<svg xmlns=http://www.w3.org/2000/svg>",
                "<g xmlns:x=urn:x>",
                "<x:a>",
                "</x:a>",
                "</g>",
                "<rect>",
                "</rect>",
                "</svg>",
            ]
        );
    }

    #[test]
    fn builds_document() {
        let source = r#"<svg fill="red">
    <text>I Love <tspan>SVG</tspan></text>
</svg>"#;
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let document =
            parse_with_hook(source, &allocator, InheritAttributes::new(["fill"])).unwrap();

        let svg = document.document_element();
        assert_eq!(document.encoding(), None);
        assert_eq!(svg.name(), "svg");
        assert!(!svg.has_primary_text());
        let text = svg.children()[0];
        assert_eq!(text.primary_text().as_deref(), Some("I Love "));
        assert_eq!(text.get_attribute("fill").as_deref(), Some("red"));
        let tspan = text.children()[0];
        assert_eq!(tspan.primary_text().as_deref(), Some("SVG"));
        assert_eq!(tspan.get_attribute("fill").as_deref(), Some("red"));
        assert_eq!(tspan.index(), 1);
    }

    #[test]
    fn decoded_values_are_escaped_again() {
        let source = r#"<svg><text>a &lt; b &amp; c &gt; d</text><desc title="x &quot;y&quot; &lt; &amp;z"/></svg>"#;
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let document = parse(source, &allocator).unwrap();
        let svg = document.document_element();
        assert_eq!(
            svg.children()[0].primary_text().as_deref(),
            Some("a &lt; b &amp; c &gt; d")
        );
        assert_eq!(
            svg.children()[1].get_attribute("title").as_deref(),
            Some("x &quot;y&quot; &lt; &amp;z")
        );

        let output = document.serialize().unwrap();
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let reparsed = parse(&output, &allocator).unwrap();
        assert_eq!(
            reparsed.document_element().children()[0].primary_text().as_deref(),
            Some("a &lt; b &amp; c &gt; d")
        );
        assert_eq!(reparsed.serialize().unwrap(), output);
    }

    #[test]
    fn depth_limit() {
        let source = format!("{}{}", "<g>".repeat(1100), "</g>".repeat(1100));
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        assert!(matches!(
            parse(&source, &allocator),
            Err(ParseError::NodesLimitReached)
        ));
    }

    #[test]
    fn malformed() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        assert!(matches!(
            parse("<svg><g></svg>", &allocator),
            Err(ParseError::ROXML(_))
        ));
    }

    #[test]
    fn encoding_declaration() {
        assert_eq!(
            declared_encoding(r#"<?xml version="1.0" encoding="UTF-8"?><svg/>"#),
            Some("UTF-8")
        );
        assert_eq!(
            declared_encoding("\u{feff}<?xml version='1.0' encoding = 'ISO-8859-1' ?>"),
            Some("ISO-8859-1")
        );
        assert_eq!(declared_encoding(r#"<?xml version="1.0"?><svg/>"#), None);
        assert_eq!(declared_encoding(r#"<svg encoding="x"/>"#), None);
        assert_eq!(declared_encoding(r#"<?xml encoding=""?>"#), None);
        assert_eq!(
            declared_encoding(r#"<?xml-stylesheet href="a.css" encoding="UTF-16"?><svg/>"#),
            None
        );
    }
}
