//! XML event model.
//!
//! Parsers consume an [`EventCursor`] and writers produce into an
//! [`EventSink`]. Both traits are small enough to be implemented over any
//! streaming XML library; [`XmlEventReader`] and [`XmlEventWriter`] provide
//! `quick-xml` backed implementations and [`BufferedEvents`] keeps events in
//! memory.

mod buffer;
mod reader;
mod writer;

use std::fmt;

pub use buffer::BufferedEvents;
pub use reader::XmlEventReader;
pub use writer::XmlEventWriter;

use crate::error::SamlResult;

/// A namespace-resolved element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Resolved namespace URI, if the name is bound.
    pub namespace: Option<String>,
    /// Prefix as written, if any.
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local_name: String,
}

impl QualifiedName {
    /// Creates a namespaced name without a prefix.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            prefix: None,
            local_name: local_name.into(),
        }
    }

    /// Creates a name in no namespace.
    #[must_use]
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_name: local_name.into(),
        }
    }

    /// Sets the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Returns true if this name is bound to `namespace`.
    #[must_use]
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }

    /// Returns true if this name is `{namespace}local_name`.
    #[must_use]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.in_namespace(namespace)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// An attribute on a start element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Attribute name.
    pub name: QualifiedName,
    /// Unescaped value.
    pub value: String,
}

impl XmlAttribute {
    /// Creates an attribute in no namespace.
    #[must_use]
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: QualifiedName::local(local_name),
            value: value.into(),
        }
    }
}

/// A single XML event.
///
/// Empty elements are always reported as a start/end pair. Namespace
/// declarations are resolved into names and never appear as attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element start tag.
    StartElement {
        /// Element name.
        name: QualifiedName,
        /// Attributes in document order.
        attributes: Vec<XmlAttribute>,
    },
    /// An element end tag.
    EndElement(QualifiedName),
    /// Text or CDATA content, unescaped.
    Characters(String),
    /// A comment.
    Comment(String),
}

impl XmlEvent {
    /// Returns the element name for start and end events.
    #[must_use]
    pub fn name(&self) -> Option<&QualifiedName> {
        match self {
            Self::StartElement { name, .. } | Self::EndElement(name) => Some(name),
            Self::Characters(_) | Self::Comment(_) => None,
        }
    }
}

/// A peekable, forward-only source of XML events.
pub trait EventCursor {
    /// Returns the next event without consuming it.
    fn peek(&mut self) -> SamlResult<Option<&XmlEvent>>;

    /// Consumes and returns the next event.
    fn next_event(&mut self) -> SamlResult<Option<XmlEvent>>;

    /// Returns true if another event is available.
    fn has_next(&mut self) -> SamlResult<bool> {
        Ok(self.peek()?.is_some())
    }
}

/// A streaming XML sink.
///
/// Attributes and namespace declarations apply to the most recently started
/// element and must be written before any of its content.
pub trait EventSink {
    /// Starts an element. `namespace` is the URI the prefix is bound to.
    fn write_start_element(&mut self, prefix: &str, local_name: &str, namespace: &str)
        -> SamlResult<()>;

    /// Declares `xmlns:prefix` on the current element.
    fn write_namespace(&mut self, prefix: &str, namespace: &str) -> SamlResult<()>;

    /// Declares the default namespace on the current element.
    fn write_default_namespace(&mut self, namespace: &str) -> SamlResult<()>;

    /// Writes an unqualified attribute on the current element.
    fn write_attribute(&mut self, local_name: &str, value: &str) -> SamlResult<()>;

    /// Writes a namespace-qualified attribute on the current element.
    fn write_prefixed_attribute(
        &mut self,
        prefix: &str,
        namespace: &str,
        local_name: &str,
        value: &str,
    ) -> SamlResult<()>;

    /// Writes text content.
    fn write_characters(&mut self, text: &str) -> SamlResult<()>;

    /// Ends the current element.
    fn write_end_element(&mut self) -> SamlResult<()>;

    /// Flushes buffered output.
    fn flush(&mut self) -> SamlResult<()>;
}
