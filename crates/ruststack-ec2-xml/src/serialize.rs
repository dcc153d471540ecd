//! EC2 XML serialization: rendering [`ResponseNode`] trees.
//!
//! A success document looks like:
//!
//! ```xml
//! <DeleteSubnetResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
//!     <requestId>req-1</requestId>
//!     <return>true</return>
//! </DeleteSubnetResponse>
//! ```
//!
//! - `Null` fields are omitted entirely
//! - Booleans render as lowercase `true`/`false`
//! - Lists render either inline (`<key><item>..</item></key>`) or as a wrapped
//!   set (`<keySet><item>..</item></keySet>`), chosen per field by the caller

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesText;
use ruststack_ec2_model::error::{Ec2Error, ErrorEnvelope};
use ruststack_ec2_model::node::ResponseNode;

use crate::error::error_to_xml;

/// The EC2 XML namespace.
pub const EC2_NAMESPACE: &str = "http://ec2.amazonaws.com/doc/2016-11-15/";

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT: usize = 4;

/// How a list-valued field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// `<key><item>..</item><item>..</item></key>`
    #[default]
    Inline,
    /// `<keySet><item>..</item><item>..</item></keySet>`
    WrappedSet,
}

/// Rendering settings for one action.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    indent: usize,
    default_list_style: ListStyle,
    field_styles: HashMap<String, ListStyle>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            default_list_style: ListStyle::Inline,
            field_styles: HashMap::new(),
        }
    }
}

impl RenderOptions {
    /// Four-space indentation, inline lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per indentation level; `0` renders a compact document.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Style used for list fields without an explicit style.
    #[must_use]
    pub fn with_default_list_style(mut self, style: ListStyle) -> Self {
        self.default_list_style = style;
        self
    }

    /// Set the style of one list field.
    #[must_use]
    pub fn with_list_style(mut self, field: impl Into<String>, style: ListStyle) -> Self {
        self.field_styles.insert(field.into(), style);
        self
    }

    /// Render `field` as `<fieldSet>`.
    #[must_use]
    pub fn wrapped_set(self, field: impl Into<String>) -> Self {
        self.with_list_style(field, ListStyle::WrappedSet)
    }

    /// Render `field` inline.
    #[must_use]
    pub fn inline(self, field: impl Into<String>) -> Self {
        self.with_list_style(field, ListStyle::Inline)
    }

    /// The style that applies to `field`.
    #[must_use]
    pub fn list_style_for(&self, field: &str) -> ListStyle {
        self.field_styles
            .get(field)
            .copied()
            .unwrap_or(self.default_list_style)
    }

    /// Spaces per indentation level.
    #[must_use]
    pub fn indent(&self) -> usize {
        self.indent
    }
}

/// Escape `&`, `<`, `>`, `"`, and `'` as XML entities.
///
/// Ampersands are replaced in the same pass as the other characters, so an
/// already-produced entity is never escaped twice.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Render a response with default options.
///
/// If `node` has the `{"Error": {"Code", "Message"}}` shape the EC2 error
/// document is produced instead and `root_tag` is ignored.
#[must_use]
pub fn render(node: &ResponseNode, root_tag: &str, request_id: &str) -> String {
    render_with(node, root_tag, request_id, &RenderOptions::default())
}

/// Render a response with explicit options.
#[must_use]
pub fn render_with(
    node: &ResponseNode,
    root_tag: &str,
    request_id: &str,
    options: &RenderOptions,
) -> String {
    if let Some(envelope) = node.as_error_envelope() {
        return error_to_xml(&envelope, request_id, options);
    }

    let mut buf = Vec::with_capacity(512);
    // Writing to Vec<u8> is infallible; if this fails it means a logic error.
    if let Err(e) = write_document(&mut buf, node, root_tag, request_id, options) {
        tracing::error!(error = %e, root_tag, "failed to serialize EC2 response XML");
        buf.clear();
    }
    into_string(buf)
}

/// Render either a success tree or an error.
#[must_use]
pub fn render_result(
    result: &Result<ResponseNode, Ec2Error>,
    root_tag: &str,
    request_id: &str,
    options: &RenderOptions,
) -> String {
    match result {
        Ok(node) => render_with(node, root_tag, request_id, options),
        Err(err) => error_to_xml(&ErrorEnvelope::from(err), request_id, options),
    }
}

pub(crate) fn new_writer(buf: &mut Vec<u8>, indent: usize) -> Writer<&mut Vec<u8>> {
    if indent == 0 {
        Writer::new(buf)
    } else {
        Writer::new_with_indent(buf, b' ', indent)
    }
}

pub(crate) fn into_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn write_document(
    buf: &mut Vec<u8>,
    node: &ResponseNode,
    root_tag: &str,
    request_id: &str,
    options: &RenderOptions,
) -> io::Result<()> {
    let mut writer = new_writer(buf, options.indent);

    writer
        .create_element(root_tag)
        .with_attribute(("xmlns", EC2_NAMESPACE))
        .write_inner_content(|w| {
            write_text_element(w, "requestId", request_id)?;
            match node {
                ResponseNode::Object(fields) => {
                    for (key, value) in fields {
                        write_field(w, key, value, options)?;
                    }
                }
                ResponseNode::Null => {}
                _ => tracing::warn!(root_tag, "response root is not an object; body omitted"),
            }
            Ok(())
        })?;

    Ok(())
}

/// Write a simple `<tag>text</tag>` element.
pub(crate) fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Write one field of an object.
fn write_field<W: Write>(
    writer: &mut Writer<W>,
    key: &str,
    value: &ResponseNode,
    options: &RenderOptions,
) -> io::Result<()> {
    match value {
        ResponseNode::Null => Ok(()),
        ResponseNode::Scalar(scalar) => write_text_element(writer, key, &scalar.to_text()),
        ResponseNode::Object(_) => write_container(writer, key, value, options),
        ResponseNode::List(_) => {
            let tag: Cow<'_, str> = match options.list_style_for(key) {
                ListStyle::Inline => Cow::Borrowed(key),
                ListStyle::WrappedSet => Cow::Owned(format!("{key}Set")),
            };
            write_container(writer, &tag, value, options)
        }
    }
}

/// Write `<tag>` holding the fields of an object or the items of a list.
fn write_container<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &ResponseNode,
    options: &RenderOptions,
) -> io::Result<()> {
    if !has_content(value) {
        writer.create_element(tag).write_empty()?;
        return Ok(());
    }

    writer.create_element(tag).write_inner_content(|w| {
        match value {
            ResponseNode::Object(fields) => {
                for (key, field) in fields {
                    write_field(w, key, field, options)?;
                }
            }
            ResponseNode::List(items) => {
                for item in items {
                    write_item(w, item, options)?;
                }
            }
            ResponseNode::Null | ResponseNode::Scalar(_) => {}
        }
        Ok(())
    })?;
    Ok(())
}

/// Write one list entry as `<item>`.
fn write_item<W: Write>(
    writer: &mut Writer<W>,
    item: &ResponseNode,
    options: &RenderOptions,
) -> io::Result<()> {
    match item {
        ResponseNode::Null => Ok(()),
        ResponseNode::Scalar(scalar) => write_text_element(writer, "item", &scalar.to_text()),
        ResponseNode::Object(_) | ResponseNode::List(_) => {
            write_container(writer, "item", item, options)
        }
    }
}

/// Whether a container would produce at least one child element.
fn has_content(value: &ResponseNode) -> bool {
    match value {
        ResponseNode::Object(fields) => fields.values().any(|v| !v.is_null()),
        ResponseNode::List(items) => items.iter().any(|v| !v.is_null()),
        ResponseNode::Null => false,
        ResponseNode::Scalar(_) => true,
    }
}
