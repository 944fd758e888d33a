//! `quick-xml` backed event cursor.

use std::collections::VecDeque;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::NsReader;

use super::{EventCursor, QualifiedName, XmlAttribute, XmlEvent};
use crate::error::{SamlError, SamlResult};

/// Reads namespace-resolved [`XmlEvent`]s from a string.
///
/// XML declarations, processing instructions and doctypes are dropped.
pub struct XmlEventReader<'a> {
    reader: NsReader<&'a [u8]>,
    pending: VecDeque<XmlEvent>,
    finished: bool,
}

impl<'a> XmlEventReader<'a> {
    /// Creates a reader that trims whitespace-only text.
    #[must_use]
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml, true)
    }

    /// Creates a reader with explicit text trimming.
    #[must_use]
    pub fn new(xml: &'a str, trim_text: bool) -> Self {
        let mut reader = NsReader::from_str(xml);
        let config = reader.config_mut();
        config.trim_text(trim_text);
        config.expand_empty_elements = true;
        Self {
            reader,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Reads until at least one event is queued or input ends.
    fn fill(&mut self) -> SamlResult<()> {
        while self.pending.is_empty() && !self.finished {
            let (namespace, event) = {
                let (resolved, event) = self.reader.read_resolved_event()?;
                (namespace_uri(resolved)?, event)
            };
            match event {
                Event::Start(start) => {
                    let name = qualified_name(namespace, start.name());
                    let attributes = self.attributes(&start)?;
                    self.pending
                        .push_back(XmlEvent::StartElement { name, attributes });
                }
                Event::Empty(start) => {
                    let name = qualified_name(namespace, start.name());
                    let attributes = self.attributes(&start)?;
                    self.pending.push_back(XmlEvent::StartElement {
                        name: name.clone(),
                        attributes,
                    });
                    self.pending.push_back(XmlEvent::EndElement(name));
                }
                Event::End(end) => {
                    self.pending
                        .push_back(XmlEvent::EndElement(qualified_name(namespace, end.name())));
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if !text.is_empty() {
                        self.pending
                            .push_back(XmlEvent::Characters(text.into_owned()));
                    }
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    self.pending
                        .push_back(XmlEvent::Characters(String::from_utf8_lossy(&data).into_owned()));
                }
                Event::Comment(comment) => {
                    self.pending
                        .push_back(XmlEvent::Comment(String::from_utf8_lossy(&comment).into_owned()));
                }
                Event::Eof => self.finished = true,
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }
        Ok(())
    }

    fn attributes(&self, start: &BytesStart<'_>) -> SamlResult<Vec<XmlAttribute>> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let (resolved, local) = self.reader.resolve_attribute(attr.key);
            let name = QualifiedName {
                namespace: namespace_uri(resolved)?,
                prefix: attr.key.prefix().map(|p| lossy(p.as_ref())),
                local_name: lossy(local.as_ref()),
            };
            attributes.push(XmlAttribute {
                name,
                value: attr.unescape_value()?.into_owned(),
            });
        }
        Ok(attributes)
    }
}

impl EventCursor for XmlEventReader<'_> {
    fn peek(&mut self) -> SamlResult<Option<&XmlEvent>> {
        self.fill()?;
        Ok(self.pending.front())
    }

    fn next_event(&mut self) -> SamlResult<Option<XmlEvent>> {
        self.fill()?;
        Ok(self.pending.pop_front())
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn namespace_uri(resolved: ResolveResult<'_>) -> SamlResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(lossy(ns.as_ref()))),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(SamlError::XmlParse(format!(
            "undeclared namespace prefix '{}'",
            lossy(&prefix)
        ))),
    }
}

fn qualified_name(namespace: Option<String>, name: QName<'_>) -> QualifiedName {
    QualifiedName {
        namespace,
        prefix: name.prefix().map(|p| lossy(p.as_ref())),
        local_name: lossy(name.local_name().as_ref()),
    }
}
