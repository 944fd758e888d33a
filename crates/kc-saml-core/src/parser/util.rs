//! Cursor helpers shared by the element parsers.

use chrono::{DateTime, Utc};

use crate::error::{SamlError, SamlResult};
use crate::xml::{EventCursor, QualifiedName, XmlAttribute, XmlEvent};

/// An owned start tag, consumed from the cursor.
#[derive(Debug, Clone)]
pub(crate) struct StartTag {
    pub name: QualifiedName,
    pub attributes: Vec<XmlAttribute>,
}

impl StartTag {
    pub fn local_name(&self) -> &str {
        &self.name.local_name
    }

    /// Unqualified attribute value.
    pub fn attr(&self, local: &str) -> Option<&str> {
        find_attribute(&self.attributes, None, local)
    }

    /// Namespace-qualified attribute value.
    pub fn attr_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        find_attribute(&self.attributes, Some(namespace), local)
    }

    pub fn optional(&self, local: &str) -> Option<String> {
        self.attr(local).map(str::to_string)
    }

    pub fn required(&self, local: &str) -> SamlResult<String> {
        self.attr(local)
            .map(str::to_string)
            .ok_or_else(|| SamlError::missing_attribute(self.local_name(), local))
    }

    pub fn required_instant(&self, local: &str) -> SamlResult<DateTime<Utc>> {
        parse_instant(local, &self.required(local)?)
    }

    pub fn optional_instant(&self, local: &str) -> SamlResult<Option<DateTime<Utc>>> {
        self.attr(local).map(|v| parse_instant(local, v)).transpose()
    }

    pub fn optional_bool(&self, local: &str) -> SamlResult<Option<bool>> {
        self.attr(local).map(|v| parse_bool(local, v)).transpose()
    }

    pub fn optional_u32(&self, local: &str) -> SamlResult<Option<u32>> {
        self.attr(local)
            .map(|v| {
                v.trim()
                    .parse::<u32>()
                    .map_err(|_| SamlError::invalid_value(local, v))
            })
            .transpose()
    }
}

pub(crate) fn find_attribute<'a>(
    attributes: &'a [XmlAttribute],
    namespace: Option<&str>,
    local: &str,
) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name.local_name == local && a.name.namespace.as_deref() == namespace)
        .map(|a| a.value.as_str())
}

/// Parses an `xs:dateTime` instant.
pub(crate) fn parse_instant(field: &str, value: &str) -> SamlResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SamlError::invalid_value(field, value))
}

/// Parses an `xs:boolean`.
pub(crate) fn parse_bool(field: &str, value: &str) -> SamlResult<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SamlError::invalid_value(field, value)),
    }
}

/// Strips the prefix from a QName-valued attribute such as `xsi:type`.
pub(crate) fn local_part(value: &str) -> &str {
    value.rsplit_once(':').map_or(value, |(_, local)| local)
}

pub(crate) fn unexpected(parent: &str, child: &QualifiedName) -> SamlError {
    SamlError::UnknownTag(format!("{child} inside <{parent}>"))
}

/// Fills a single-occurrence child slot, rejecting a repeated child.
pub(crate) fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    parent: &str,
    child: &str,
) -> SamlResult<()> {
    if slot.is_some() {
        return Err(SamlError::UnknownTag(format!(
            "duplicate {child} inside <{parent}>"
        )));
    }
    *slot = Some(value);
    Ok(())
}

fn exhausted(context: &str) -> SamlError {
    SamlError::ParsingExhausted(format!("stream ended inside <{context}>"))
}

enum Peeked {
    Start(QualifiedName),
    End,
    Other,
    Eof,
}

fn peek_kind(cursor: &mut dyn EventCursor) -> SamlResult<Peeked> {
    Ok(match cursor.peek()? {
        Some(XmlEvent::StartElement { name, .. }) => Peeked::Start(name.clone()),
        Some(XmlEvent::EndElement(_)) => Peeked::End,
        Some(XmlEvent::Characters(_) | XmlEvent::Comment(_)) => Peeked::Other,
        None => Peeked::Eof,
    })
}

/// Returns the name of the next child element of `parent` without consuming
/// it, or `None` when the parent's end tag is next. Text and comments in
/// between are discarded.
pub(crate) fn next_child(
    cursor: &mut dyn EventCursor,
    parent: &str,
) -> SamlResult<Option<QualifiedName>> {
    loop {
        match peek_kind(cursor)? {
            Peeked::Start(name) => return Ok(Some(name)),
            Peeked::End => return Ok(None),
            Peeked::Other => {
                cursor.next_event()?;
            }
            Peeked::Eof => return Err(exhausted(parent)),
        }
    }
}

/// Consumes the start tag of an element named `local`.
pub(crate) fn expect_start(cursor: &mut dyn EventCursor, local: &str) -> SamlResult<StartTag> {
    expect_start_any(cursor, &[local])
}

/// Consumes the start tag of an element whose local name is one of `locals`.
pub(crate) fn expect_start_any(
    cursor: &mut dyn EventCursor,
    locals: &[&str],
) -> SamlResult<StartTag> {
    let start = next_start(cursor)?;
    if locals.contains(&start.local_name()) {
        Ok(start)
    } else {
        Err(SamlError::UnknownTag(format!(
            "expected <{}>, found {}",
            locals.join("|"),
            start.name
        )))
    }
}

/// Consumes the next start tag, whatever its name.
pub(crate) fn next_start(cursor: &mut dyn EventCursor) -> SamlResult<StartTag> {
    loop {
        match cursor.next_event()? {
            Some(XmlEvent::StartElement { name, attributes }) => {
                return Ok(StartTag { name, attributes });
            }
            Some(XmlEvent::Characters(_) | XmlEvent::Comment(_)) => {}
            Some(XmlEvent::EndElement(name)) => {
                return Err(SamlError::UnknownTag(format!(
                    "expected a start element, found end of {name}"
                )));
            }
            None => return Err(exhausted("document")),
        }
    }
}

/// Consumes the end tag of `local`, discarding text before it.
pub(crate) fn expect_end(cursor: &mut dyn EventCursor, local: &str) -> SamlResult<()> {
    loop {
        match cursor.next_event()? {
            Some(XmlEvent::EndElement(name)) if name.local_name == local => return Ok(()),
            Some(XmlEvent::EndElement(name)) => {
                return Err(SamlError::UnknownTag(format!(
                    "expected end of <{local}>, found end of {name}"
                )));
            }
            Some(XmlEvent::StartElement { name, .. }) => return Err(unexpected(local, &name)),
            Some(XmlEvent::Characters(_) | XmlEvent::Comment(_)) => {}
            None => return Err(exhausted(local)),
        }
    }
}

/// Reads a text-only element. Child elements are an error.
pub(crate) fn element_text(cursor: &mut dyn EventCursor, local: &str) -> SamlResult<String> {
    expect_start(cursor, local)?;
    read_text(cursor, local, false)
}

/// Reads the text of an element whose start tag was already consumed,
/// skipping nested elements.
pub(crate) fn lenient_text(cursor: &mut dyn EventCursor, local: &str) -> SamlResult<String> {
    read_text(cursor, local, true)
}

fn read_text(cursor: &mut dyn EventCursor, local: &str, skip_children: bool) -> SamlResult<String> {
    let mut text = String::new();
    loop {
        match peek_kind(cursor)? {
            Peeked::Start(name) if skip_children => {
                tracing::trace!("skipping {} inside <{}>", name, local);
                skip_element(cursor)?;
            }
            Peeked::Start(name) => return Err(unexpected(local, &name)),
            Peeked::End => {
                expect_end(cursor, local)?;
                return Ok(text);
            }
            Peeked::Other => {
                if let Some(XmlEvent::Characters(chunk)) = cursor.next_event()? {
                    text.push_str(&chunk);
                }
            }
            Peeked::Eof => return Err(exhausted(local)),
        }
    }
}

/// Consumes the next element and its whole subtree.
pub(crate) fn skip_element(cursor: &mut dyn EventCursor) -> SamlResult<()> {
    let name = match cursor.next_event()? {
        Some(XmlEvent::StartElement { name, .. }) => name,
        Some(other) => {
            return Err(SamlError::XmlParse(format!(
                "expected a start element to skip, found {other:?}"
            )))
        }
        None => return Err(exhausted("document")),
    };
    let mut depth = 1usize;
    while depth > 0 {
        match cursor.next_event()? {
            Some(XmlEvent::StartElement { .. }) => depth += 1,
            Some(XmlEvent::EndElement(_)) => depth -= 1,
            Some(_) => {}
            None => return Err(exhausted(&name.local_name)),
        }
    }
    tracing::trace!("skipped {}", name);
    Ok(())
}

/// Skips every remaining child of `local` and consumes its end tag.
pub(crate) fn skip_content(cursor: &mut dyn EventCursor, local: &str) -> SamlResult<()> {
    while next_child(cursor, local)?.is_some() {
        skip_element(cursor)?;
    }
    expect_end(cursor, local)
}
