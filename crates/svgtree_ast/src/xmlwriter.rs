/*!
A streaming XML writer used by [`crate::serialize`].

Names, attribute values, and text are written verbatim. Values are expected to already be
escaped, such as with [`escape_text`] and [`escape_attribute`]; the writer only places the
markup around them.

```
use svgtree_ast::xmlwriter::XmlWriter;

let mut w = XmlWriter::new(Vec::<u8>::new(), 2);
w.write_declaration("UTF-8").unwrap();
w.start_element("svg").unwrap();
w.write_attribute("width", "10").unwrap();
w.close_start_tag().unwrap();
w.write_new_line().unwrap();
w.write_indent(1).unwrap();
w.start_element("rect").unwrap();
w.self_close().unwrap();
w.write_new_line().unwrap();
w.end_element("svg").unwrap();
assert_eq!(
    String::from_utf8(w.into_inner()).unwrap(),
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"10\">\n  <rect/>\n</svg>"
);
```
*/

use std::{
    borrow::Cow,
    io::{self, Write},
};

/// A result from writing part of a document.
pub type Result = std::result::Result<(), io::Error>;

/// An XML writer.
#[derive(Clone, Debug)]
pub struct XmlWriter<W: Write> {
    writer: W,
    indent: usize,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new `XmlWriter`, writing data in the writer with `indent` spaces per level.
    #[inline]
    pub fn new(writer: W, indent: usize) -> Self {
        XmlWriter { writer, indent }
    }

    /// Writes an XML declaration followed by a line break.
    ///
    /// `<?xml version="1.0" encoding="UTF-8"?>`
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_declaration(&mut self, encoding: &str) -> Result {
        self.writer.write_fmt(format_args!(
            "<?xml version=\"1.0\" encoding=\"{encoding}\"?>\n"
        ))
    }

    /// Writes the indentation for the given nesting depth.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_indent(&mut self, depth: usize) -> Result {
        for _ in 0..depth * self.indent {
            self.writer.write_all(b" ")?;
        }
        Ok(())
    }

    /// Starts writing a new element.
    ///
    /// This method writes only the `<tag-name` part.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn start_element(&mut self, name: &str) -> Result {
        self.writer.write_all(b"<")?;
        self.writer.write_all(name.as_bytes())
    }

    /// Writes an attribute as ` name="value"`, without escaping the value.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> Result {
        self.writer.write_all(b" ")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b"=\"")?;
        self.writer.write_all(value.as_bytes())?;
        self.writer.write_all(b"\"")
    }

    /// Ends the start tag of an element that has content, so `>`.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn close_start_tag(&mut self) -> Result {
        self.writer.write_all(b">")
    }

    /// Ends the start tag of an element without content, so `/>`.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn self_close(&mut self) -> Result {
        self.writer.write_all(b"/>")
    }

    /// Writes text as is.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_text(&mut self, text: &str) -> Result {
        self.writer.write_all(text.as_bytes())
    }

    /// Writes the end tag of an element, so `</tag-name>`.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn end_element(&mut self, name: &str) -> Result {
        self.writer.write_all(b"</")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b">")
    }

    /// Writes a line break.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_new_line(&mut self) -> Result {
        self.writer.write_all(b"\n")
    }

    /// Flushes and returns back the writer.
    ///
    /// # Errors
    ///
    /// When flushing fails.
    pub fn finish(mut self) -> std::result::Result<W, io::Error> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Returns back the writer without flushing.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escapes `&`, `<`, and `>` so decoded character data can be written as text
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escapes `&`, `<`, and `"` so a decoded value can be written in a double-quoted attribute
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '"' => Some("&quot;"),
        _ => None,
    })
}

fn escape(source: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(start) = source.find(|c| replacement(c).is_some()) else {
        return Cow::Borrowed(source);
    };
    let mut escaped = String::with_capacity(source.len() + 8);
    escaped.push_str(&source[..start]);
    for c in source[start..].chars() {
        match replacement(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[test]
fn escaping() {
    assert!(matches!(escape_text("plain"), Cow::Borrowed("plain")));
    assert_eq!(escape_text("a < b & c > d \"e\""), "a &lt; b &amp; c &gt; d \"e\"");
    assert_eq!(escape_attribute("x \"y\" & <z> 'w'"), "x &quot;y&quot; &amp; &lt;z> 'w'");
}
