//! Functions for serializing document trees
//!
//! The output format is deterministic: attributes are written in sorted order, every element
//! goes on its own line unless it continues the primary text of its parent, and text and
//! attribute values are written verbatim without escaping.
use std::io::Write;

use crate::{document::Document, element::Element, error::SerializeError, xmlwriter::XmlWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options for the format of serialized output
pub struct Options {
    /// The number of spaces each level of nesting is indented by
    pub indent: usize,
    /// The encoding to declare. When serializing a [`Document`] this falls back to the
    /// document's own encoding, and no declaration is written when neither is set.
    pub encoding: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: 4,
            encoding: None,
        }
    }
}

/// A tree serializer
pub trait Serialize {
    /// Serializes to a string with the default options.
    ///
    /// # Errors
    /// If the underlying serialization fails
    fn serialize(&self) -> Result<String, SerializeError> {
        self.serialize_with_options(&Options::default())
    }

    /// Serializes to a string.
    ///
    /// # Errors
    /// If the underlying serialization fails
    fn serialize_with_options(&self, options: &Options) -> Result<String, SerializeError> {
        let mut buffer = Vec::new();
        self.serialize_into(&mut buffer, options)?;
        String::from_utf8(buffer).map_err(SerializeError::UTF8)
    }

    /// Serializes into the given sink.
    ///
    /// Writing stops at the first failure of the sink, which may leave partial output behind.
    ///
    /// # Errors
    /// If writing to the sink fails
    fn serialize_into<W: Write>(&self, sink: W, options: &Options) -> Result<(), SerializeError>;
}

impl Serialize for Element<'_> {
    fn serialize_into<W: Write>(&self, sink: W, options: &Options) -> Result<(), SerializeError> {
        serialize_root(self, options.encoding.as_deref(), options.indent, sink)
    }
}

impl Serialize for Document<'_> {
    fn serialize_into<W: Write>(&self, sink: W, options: &Options) -> Result<(), SerializeError> {
        let encoding = options.encoding.as_deref().or(self.encoding());
        serialize_root(&self.document_element(), encoding, options.indent, sink)
    }
}

fn serialize_root<W: Write>(
    root: &Element,
    encoding: Option<&str>,
    indent: usize,
    sink: W,
) -> Result<(), SerializeError> {
    let mut xml = XmlWriter::new(sink, indent);
    if let Some(encoding) = encoding {
        xml.write_declaration(encoding)?;
    }
    serialize_element(root, 0, false, true, &mut xml)?;
    xml.finish()?;
    Ok(())
}

/// Writes an element and its descendants.
///
/// `inline` is set for every child after the first of an element with primary text. Those
/// children are written without indentation, while the first child keeps its indentation on the
/// same line as the text.
fn serialize_element<W: Write>(
    element: &Element,
    depth: usize,
    inline: bool,
    is_root: bool,
    xml: &mut XmlWriter<W>,
) -> Result<(), SerializeError> {
    log::debug!("serializing <{}> at depth {depth}", element.name());
    if !inline {
        xml.write_indent(depth)?;
    }

    let name = element.name();
    xml.start_element(name)?;
    for (name, value) in element.attributes().borrow().iter() {
        xml.write_attribute(name, value)?;
    }

    let children = element.children();
    let primary_text = element.primary_text();
    match (children.is_empty(), &primary_text) {
        (true, None) => xml.self_close()?,
        (true, Some(text)) => {
            xml.close_start_tag()?;
            xml.write_text(text)?;
            xml.end_element(name)?;
        }
        (false, _) => {
            xml.close_start_tag()?;
            match &primary_text {
                Some(text) => xml.write_text(text)?,
                None => xml.write_new_line()?,
            }
            for (index, child) in children.iter().enumerate() {
                let inline = primary_text.is_some() && index != 0;
                serialize_element(child, depth + 1, inline, false, xml)?;
            }
            if primary_text.is_none() || children.len() > 1 {
                xml.write_indent(depth)?;
            }
            xml.end_element(name)?;
        }
    }

    if !is_root {
        xml.write_new_line()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use crate::{
        arena::Allocator,
        builder::{EventSink as _, TreeBuilder},
        document::Document,
        error::SerializeError,
        style::NoInheritance,
    };

    use super::{Options, Serialize as _};

    /// A sink that fails once it has accepted `remaining` bytes
    struct FailingWriter {
        written: Vec<u8>,
        remaining: usize,
    }

    impl io::Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("sink is full"));
            }
            let len = buf.len().min(self.remaining);
            self.remaining -= len;
            self.written.extend_from_slice(&buf[..len]);
            Ok(len)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn self_close() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let rect = allocator.create_element("rect");
        rect.set_attribute("id", "a");

        assert_eq!(rect.serialize().unwrap(), r#"<rect id="a"/>"#);
    }

    #[test]
    fn attributes_are_sorted_and_verbatim() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let path = allocator.create_element("path");
        path.set_attribute("d", "M0 0 &amp; <L>");
        path.set_attribute("class", "a");
        path.set_attribute("xlink:href", "#b");

        assert_eq!(
            path.serialize().unwrap(),
            r##"<path class="a" d="M0 0 &amp; <L>" xlink:href="#b"/>"##
        );
    }

    #[test]
    fn declaration() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let svg = allocator.create_element("svg");
        let mut document = Document::new(svg);
        assert_eq!(document.serialize().unwrap(), "<svg/>");

        document.set_encoding(Some("UTF-8".to_string()));
        assert_eq!(
            document.serialize().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg/>"
        );

        let options = Options {
            encoding: Some("ISO-8859-1".to_string()),
            ..Options::default()
        };
        assert_eq!(
            document.serialize_with_options(&options).unwrap(),
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<svg/>"
        );
        // an element on its own doesn't know the document's encoding
        assert_eq!(svg.serialize().unwrap(), "<svg/>");
    }

    #[test]
    fn inline_primary_text() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let mut builder = TreeBuilder::new(&allocator, NoInheritance);
        builder.element_start("text", &[]);
        builder.text("I Love ");
        builder.element_start("tspan", &[]);
        builder.text("x");
        builder.element_end("tspan");
        builder.text("!");
        builder.element_end("text");
        let document = builder.finish().unwrap();

        assert_eq!(
            document.serialize().unwrap(),
            "<text>I Love     <tspan>x</tspan>\n</text>"
        );
    }

    #[test]
    fn nested_document() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let mut builder = TreeBuilder::new(&allocator, NoInheritance);
        builder.declaration(Some("UTF-8"));
        builder.element_start("svg", &[("xmlns", "http://www.w3.org/2000/svg"), ("width", "100")]);
        builder.element_start("g", &[("fill", "red")]);
        builder.element_start("rect", &[("y", "2"), ("x", "1")]);
        builder.element_end("rect");
        builder.element_start("title", &[]);
        builder.text("A box");
        builder.element_end("title");
        builder.element_end("g");
        builder.element_start("text", &[]);
        builder.text("Hello ");
        builder.element_start("tspan", &[]);
        builder.text("big");
        builder.element_end("tspan");
        builder.element_start("tspan", &[]);
        builder.text("world");
        builder.element_end("tspan");
        builder.element_end("text");
        builder.element_end("svg");
        let document = builder.finish().unwrap();

        insta::assert_snapshot!(document.serialize().unwrap(), @r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <svg width="100" xmlns="http://www.w3.org/2000/svg">
            <g fill="red">
                <rect x="1" y="2"/>
                <title>A box</title>
            </g>
            <text>Hello         <tspan>big</tspan>
        <tspan>world</tspan>
            </text>
        </svg>
        "#);

        let options = Options {
            indent: 0,
            encoding: None,
        };
        insta::assert_snapshot!(document.document_element().serialize_with_options(&options).unwrap(), @r#"
        <svg width="100" xmlns="http://www.w3.org/2000/svg">
        <g fill="red">
        <rect x="1" y="2"/>
        <title>A box</title>
        </g>
        <text>Hello <tspan>big</tspan>
        <tspan>world</tspan>
        </text>
        </svg>
        "#);
    }

    #[test]
    fn serializing_a_subtree() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let svg = allocator.create_element("svg");
        let g = allocator.create_element("g");
        let rect = allocator.create_element("rect");
        svg.append_child(g);
        g.append_child(rect);

        let options = Options {
            indent: 2,
            encoding: None,
        };
        assert_eq!(
            g.serialize_with_options(&options).unwrap(),
            "<g>\n  <rect/>\n</g>"
        );
    }

    #[test]
    fn later_children_of_primary_text_are_not_indented() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let mut builder = TreeBuilder::new(&allocator, NoInheritance);
        builder.element_start("svg", &[]);
        builder.element_start("text", &[]);
        builder.text("Hello ");
        builder.element_start("tspan", &[]);
        builder.text("big");
        builder.element_end("tspan");
        builder.element_start("tspan", &[]);
        builder.text("world");
        builder.element_end("tspan");
        builder.element_end("text");
        builder.element_end("svg");
        let document = builder.finish().unwrap();

        let options = Options {
            indent: 2,
            encoding: None,
        };
        assert_eq!(
            document.serialize_with_options(&options).unwrap(),
            "<svg>\n  <text>Hello     <tspan>big</tspan>\n<tspan>world</tspan>\n  </text>\n</svg>"
        );
    }

    #[test]
    fn sink_failure_aborts() {
        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let svg = allocator.create_element("svg");
        for _ in 0..3 {
            svg.append_child(allocator.create_element("rect"));
        }

        let mut sink = FailingWriter {
            written: Vec::new(),
            remaining: 12,
        };
        let result = svg.serialize_into(&mut sink, &Options::default());
        assert!(matches!(result, Err(SerializeError::IO(_))));
        assert_eq!(sink.written, b"<svg>\n    <r");
    }

    #[test]
    #[cfg(feature = "roxmltree")]
    fn round_trip() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
  <g stroke="blue" fill="red">
    <text x="1">I Love <tspan font-weight="bold">SVG</tspan> a lot</text>
    <rect width="5" height="5"/>
  </g>
  <desc>
    some description
  </desc>
</svg>"#;

        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let document = crate::parse::roxmltree::parse(source, &allocator).unwrap();
        let output = document.serialize().unwrap();

        let mut arena = Allocator::new_arena();
        let allocator = Allocator::new(&mut arena);
        let reparsed = crate::parse::roxmltree::parse(&output, &allocator).unwrap();

        let (a, b) = (document.document_element(), reparsed.document_element());
        assert_eq!(reparsed.encoding(), Some("UTF-8"));
        assert_eq!(a.attributes().to_map(), b.attributes().to_map());
        let (a_all, b_all) = (a.elements_by_name("tspan"), b.elements_by_name("tspan"));
        assert_eq!(a_all.len(), b_all.len());
        for name in ["g", "text", "tspan", "rect", "desc"] {
            let (a, b) = (a.elements_by_name(name), b.elements_by_name(name));
            assert_eq!(a.len(), b.len());
            for (a, b) in a.iter().zip(b.iter()) {
                assert_eq!(a.attributes().to_map(), b.attributes().to_map());
                assert_eq!(a.primary_text(), b.primary_text());
                assert_eq!(a.index(), b.index());
            }
        }
        assert_eq!(reparsed.serialize().unwrap(), output);
    }
}
