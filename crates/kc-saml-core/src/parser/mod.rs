//! SAML message parsing.
//!
//! [`SamlParser`] inspects the first start element of a document and routes
//! it to exactly one element grammar. Each grammar is an [`ElementParser`]
//! that consumes its element, descendants included, and nothing more.
//!
//! Routing precedence, first match wins:
//!
//! 1. local name `Assertion`, in any namespace;
//! 2. `samlp:AuthnRequest`, `samlp:LogoutRequest`, `samlp:LogoutResponse`,
//!    `samlp:Response`;
//! 3. `samlp:RequestAbstractType` (or `samlp:RequestAbstract`), by `xsi:type`;
//! 4. local name `XACMLAuthzDecisionQuery`, in any namespace;
//! 5. local name `EntityDescriptor` or `EntitiesDescriptor`;
//! 6. anything else in the assertion namespace.

mod assertion;
mod metadata;
mod request;
mod response;
mod util;
mod xacml;

pub use assertion::AssertionParser;
pub use metadata::{EntitiesDescriptorParser, EntityDescriptorParser, MAX_NESTING_DEPTH};
pub use request::{AuthnRequestParser, LogoutRequestParser, NameIdPolicyParser};
pub use response::{LogoutResponseParser, ResponseParser};
pub use xacml::XacmlQueryParser;

use crate::error::{SamlError, SamlResult};
use crate::types::{names, SamlMessage, SAMLP_NS, SAML_NS, XSI_NS};
use crate::xml::{EventCursor, QualifiedName, XmlAttribute, XmlEvent};

use util::{find_attribute, local_part};

/// A grammar for one SAML element.
pub trait ElementParser {
    /// The typed value produced by this grammar.
    type Output;

    /// Consumes the element at the cursor, including its end tag.
    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<Self::Output>;

    /// Whether this grammar handles elements with the given name.
    fn supports(&self, name: &QualifiedName) -> bool;
}

/// The grammar chosen for a top-level element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grammar {
    Assertion,
    AuthnRequest,
    LogoutRequest,
    LogoutResponse,
    Response,
    XacmlQuery,
    EntityDescriptor,
    EntitiesDescriptor,
}

/// Top-level SAML message parser.
///
/// Stateless; one instance can serve any number of documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamlParser;

impl SamlParser {
    /// Creates a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses the first recognized top-level element at the cursor.
    ///
    /// Text and comments before the element are discarded. The cursor is
    /// left positioned after the element's end tag.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::UnknownTag`] when the element matches no
    /// grammar, [`SamlError::UnknownXsiType`] for an abstract request of an
    /// unsupported type, [`SamlError::ParsingExhausted`] when the stream
    /// holds no element, and any error raised by the chosen grammar.
    pub fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<SamlMessage> {
        loop {
            let grammar = match cursor.peek()? {
                Some(XmlEvent::StartElement { name, attributes }) => route(name, attributes)?,
                Some(_) => {
                    cursor.next_event()?;
                    continue;
                }
                None => {
                    return Err(SamlError::ParsingExhausted(
                        "no SAML element found".to_string(),
                    ));
                }
            };
            tracing::debug!("dispatching to {:?} grammar", grammar);
            return parse_with(grammar, cursor);
        }
    }
}

fn route(name: &QualifiedName, attributes: &[XmlAttribute]) -> SamlResult<Grammar> {
    let local = name.local_name.as_str();
    let namespace = name.namespace.as_deref();

    if local == names::ASSERTION {
        return Ok(Grammar::Assertion);
    }

    if namespace == Some(SAMLP_NS) {
        match local {
            names::AUTHN_REQUEST => return Ok(Grammar::AuthnRequest),
            names::LOGOUT_REQUEST => return Ok(Grammar::LogoutRequest),
            names::LOGOUT_RESPONSE => return Ok(Grammar::LogoutResponse),
            names::RESPONSE => return Ok(Grammar::Response),
            names::REQUEST_ABSTRACT_TYPE | names::REQUEST_ABSTRACT => {
                return route_abstract_request(local, attributes);
            }
            _ => {}
        }
    }

    match local {
        names::XACML_AUTHZ_DECISION_QUERY => return Ok(Grammar::XacmlQuery),
        names::ENTITY_DESCRIPTOR => return Ok(Grammar::EntityDescriptor),
        names::ENTITIES_DESCRIPTOR => return Ok(Grammar::EntitiesDescriptor),
        _ => {}
    }

    if namespace == Some(SAML_NS) {
        return Ok(Grammar::Assertion);
    }

    Err(SamlError::UnknownTag(name.to_string()))
}

fn route_abstract_request(local: &str, attributes: &[XmlAttribute]) -> SamlResult<Grammar> {
    let xsi_type = find_attribute(attributes, Some(XSI_NS), "type")
        .ok_or_else(|| SamlError::missing_attribute(local, "xsi:type"))?;

    if local_part(xsi_type) == names::XACML_AUTHZ_DECISION_QUERY_TYPE {
        Ok(Grammar::XacmlQuery)
    } else {
        tracing::warn!("rejecting {} with xsi:type={}", local, xsi_type);
        Err(SamlError::UnknownXsiType(xsi_type.to_string()))
    }
}

fn parse_with(grammar: Grammar, cursor: &mut dyn EventCursor) -> SamlResult<SamlMessage> {
    Ok(match grammar {
        Grammar::Assertion => AssertionParser.parse(cursor)?.into(),
        Grammar::AuthnRequest => AuthnRequestParser.parse(cursor)?.into(),
        Grammar::LogoutRequest => LogoutRequestParser.parse(cursor)?.into(),
        Grammar::LogoutResponse => LogoutResponseParser.parse(cursor)?.into(),
        Grammar::Response => ResponseParser.parse(cursor)?.into(),
        Grammar::XacmlQuery => XacmlQueryParser.parse(cursor)?.into(),
        Grammar::EntityDescriptor => EntityDescriptorParser.parse(cursor)?.into(),
        Grammar::EntitiesDescriptor => EntitiesDescriptorParser.parse(cursor)?.into(),
    })
}
