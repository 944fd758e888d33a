//! `quick-xml` backed event sink.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::EventSink;
use crate::error::{SamlError, SamlResult};

/// Writes XML text to any [`Write`] implementation.
///
/// The current start tag is held back until its first child or its end, so
/// attributes and namespace declarations may follow `write_start_element`.
/// Elements without content are written as empty tags.
pub struct XmlEventWriter<W: Write> {
    writer: Writer<W>,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
}

impl<W: Write> XmlEventWriter<W> {
    /// Creates a compact writer.
    pub fn new(inner: W) -> Self {
        Self::from_writer(Writer::new(inner))
    }

    /// Creates a writer indenting nested elements by `indent` spaces.
    pub fn with_indent(inner: W, indent: usize) -> Self {
        Self::from_writer(Writer::new_with_indent(inner, b' ', indent))
    }

    fn from_writer(writer: Writer<W>) -> Self {
        Self {
            writer,
            pending: None,
            open: Vec::new(),
        }
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn emit(&mut self, event: Event<'_>) -> SamlResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| SamlError::Processing(e.to_string()))
    }

    fn flush_pending(&mut self) -> SamlResult<()> {
        match self.pending.take() {
            Some(start) => self.emit(Event::Start(start)),
            None => Ok(()),
        }
    }

    fn pending_start(&mut self) -> SamlResult<&mut BytesStart<'static>> {
        self.pending.as_mut().ok_or_else(|| {
            SamlError::Processing("attribute written outside a start tag".to_string())
        })
    }
}

impl<W: Write> EventSink for XmlEventWriter<W> {
    fn write_start_element(
        &mut self,
        prefix: &str,
        local_name: &str,
        _namespace: &str,
    ) -> SamlResult<()> {
        self.flush_pending()?;
        let qname = if prefix.is_empty() {
            local_name.to_string()
        } else {
            format!("{prefix}:{local_name}")
        };
        self.pending = Some(BytesStart::new(qname.clone()));
        self.open.push(qname);
        Ok(())
    }

    fn write_namespace(&mut self, prefix: &str, namespace: &str) -> SamlResult<()> {
        let key = format!("xmlns:{prefix}");
        self.pending_start()?
            .push_attribute((key.as_str(), namespace));
        Ok(())
    }

    fn write_default_namespace(&mut self, namespace: &str) -> SamlResult<()> {
        self.pending_start()?.push_attribute(("xmlns", namespace));
        Ok(())
    }

    fn write_attribute(&mut self, local_name: &str, value: &str) -> SamlResult<()> {
        self.pending_start()?.push_attribute((local_name, value));
        Ok(())
    }

    fn write_prefixed_attribute(
        &mut self,
        prefix: &str,
        _namespace: &str,
        local_name: &str,
        value: &str,
    ) -> SamlResult<()> {
        let key = format!("{prefix}:{local_name}");
        self.pending_start()?.push_attribute((key.as_str(), value));
        Ok(())
    }

    fn write_characters(&mut self, text: &str) -> SamlResult<()> {
        self.flush_pending()?;
        self.emit(Event::Text(BytesText::new(text)))
    }

    fn write_end_element(&mut self) -> SamlResult<()> {
        let qname = self.open.pop().ok_or_else(|| {
            SamlError::Processing("end element without a matching start".to_string())
        })?;
        match self.pending.take() {
            Some(start) => self.emit(Event::Empty(start)),
            None => self.emit(Event::End(BytesEnd::new(qname))),
        }
    }

    fn flush(&mut self) -> SamlResult<()> {
        self.flush_pending()?;
        self.writer.get_mut().flush()?;
        Ok(())
    }
}
