//! In-memory event buffer.

use std::collections::VecDeque;

use super::{EventCursor, EventSink, QualifiedName, XmlAttribute, XmlEvent};
use crate::error::{SamlError, SamlResult};

/// A queue of events usable both as a cursor and as a sink.
///
/// Events written through [`EventSink`] can be read back through
/// [`EventCursor`] without going through text.
#[derive(Debug, Clone, Default)]
pub struct BufferedEvents {
    events: VecDeque<XmlEvent>,
    open: Vec<QualifiedName>,
    in_start_tag: bool,
}

impl BufferedEvents {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every remaining event from `cursor` into a buffer.
    pub fn drain_from(cursor: &mut dyn EventCursor) -> SamlResult<Self> {
        let mut events = Vec::new();
        while let Some(event) = cursor.next_event()? {
            events.push(event);
        }
        Ok(Self::from(events))
    }

    /// Number of unread events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the buffered events.
    #[must_use]
    pub fn into_events(self) -> Vec<XmlEvent> {
        self.events.into()
    }

    fn current_attributes(&mut self) -> SamlResult<&mut Vec<XmlAttribute>> {
        if !self.in_start_tag {
            return Err(SamlError::Processing(
                "attribute written outside a start tag".to_string(),
            ));
        }
        match self.events.back_mut() {
            Some(XmlEvent::StartElement { attributes, .. }) => Ok(attributes),
            _ => Err(SamlError::Processing(
                "attribute written outside a start tag".to_string(),
            )),
        }
    }
}

impl From<Vec<XmlEvent>> for BufferedEvents {
    fn from(events: Vec<XmlEvent>) -> Self {
        Self {
            events: events.into(),
            open: Vec::new(),
            in_start_tag: false,
        }
    }
}

impl EventCursor for BufferedEvents {
    fn peek(&mut self) -> SamlResult<Option<&XmlEvent>> {
        Ok(self.events.front())
    }

    fn next_event(&mut self) -> SamlResult<Option<XmlEvent>> {
        Ok(self.events.pop_front())
    }
}

impl EventSink for BufferedEvents {
    fn write_start_element(
        &mut self,
        prefix: &str,
        local_name: &str,
        namespace: &str,
    ) -> SamlResult<()> {
        let mut name = QualifiedName::new(namespace, local_name);
        if !prefix.is_empty() {
            name = name.with_prefix(prefix);
        }
        self.open.push(name.clone());
        self.events.push_back(XmlEvent::StartElement {
            name,
            attributes: Vec::new(),
        });
        self.in_start_tag = true;
        Ok(())
    }

    fn write_namespace(&mut self, _prefix: &str, _namespace: &str) -> SamlResult<()> {
        self.current_attributes().map(|_| ())
    }

    fn write_default_namespace(&mut self, _namespace: &str) -> SamlResult<()> {
        self.current_attributes().map(|_| ())
    }

    fn write_attribute(&mut self, local_name: &str, value: &str) -> SamlResult<()> {
        self.current_attributes()?
            .push(XmlAttribute::new(local_name, value));
        Ok(())
    }

    fn write_prefixed_attribute(
        &mut self,
        prefix: &str,
        namespace: &str,
        local_name: &str,
        value: &str,
    ) -> SamlResult<()> {
        self.current_attributes()?.push(XmlAttribute {
            name: QualifiedName::new(namespace, local_name).with_prefix(prefix),
            value: value.to_string(),
        });
        Ok(())
    }

    fn write_characters(&mut self, text: &str) -> SamlResult<()> {
        self.in_start_tag = false;
        if !text.is_empty() {
            self.events.push_back(XmlEvent::Characters(text.to_string()));
        }
        Ok(())
    }

    fn write_end_element(&mut self) -> SamlResult<()> {
        let name = self.open.pop().ok_or_else(|| {
            SamlError::Processing("end element without a matching start".to_string())
        })?;
        self.in_start_tag = false;
        self.events.push_back(XmlEvent::EndElement(name));
        Ok(())
    }

    fn flush(&mut self) -> SamlResult<()> {
        Ok(())
    }
}
