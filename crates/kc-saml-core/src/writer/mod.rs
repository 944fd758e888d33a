//! SAML message writers.
//!
//! Writers stream a typed message into an [`EventSink`]. Namespace prefixes
//! are declared once on the top-level element; nested elements only use
//! them. Every top-level write ends with a flush of the sink.

mod assertion;
mod request;
mod response;

pub use assertion::SamlAssertionWriter;
pub use request::SamlRequestWriter;
pub use response::SamlResponseWriter;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{SamlError, SamlResult};
use crate::types::{names, NameId, SamlMessage, Status, SAMLP_NS, SAML_NS, X500_NS, XMLENC_NS};
use crate::xml::EventSink;

pub(crate) const SAMLP: &str = "samlp";
pub(crate) const SAML: &str = "saml";
pub(crate) const X500: &str = "x500";
pub(crate) const XENC: &str = "xenc";

/// Writes any writable message.
///
/// # Errors
///
/// Returns [`SamlError::Processing`] for messages that have no writer
/// (metadata and XACML queries) and for any failure of the sink.
pub fn write_message(sink: &mut dyn EventSink, message: &SamlMessage) -> SamlResult<()> {
    match message {
        SamlMessage::AuthnRequest(request) => {
            SamlRequestWriter::new(sink).write_authn_request(request)
        }
        SamlMessage::LogoutRequest(request) => {
            SamlRequestWriter::new(sink).write_logout_request(request)
        }
        SamlMessage::Response(response) => SamlResponseWriter::new(sink).write_response(response),
        SamlMessage::LogoutResponse(response) => {
            SamlResponseWriter::new(sink).write_logout_response(response)
        }
        SamlMessage::Assertion(assertion) => {
            SamlAssertionWriter::new(sink).write_assertion(assertion)
        }
        other => Err(SamlError::Processing(format!(
            "no writer for <{}>",
            other.element_name()
        ))),
    }
}

fn namespace_of(prefix: &str) -> &'static str {
    match prefix {
        SAMLP => SAMLP_NS,
        X500 => X500_NS,
        XENC => XMLENC_NS,
        _ => SAML_NS,
    }
}

pub(crate) fn start(sink: &mut dyn EventSink, prefix: &str, local: &str) -> SamlResult<()> {
    sink.write_start_element(prefix, local, namespace_of(prefix))
}

/// Declares `samlp` and `saml` on the current element.
pub(crate) fn declare_protocol(sink: &mut dyn EventSink) -> SamlResult<()> {
    sink.write_namespace(SAMLP, SAMLP_NS)?;
    sink.write_namespace(SAML, SAML_NS)
}

pub(crate) fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn instant_attribute(
    sink: &mut dyn EventSink,
    local: &str,
    instant: &DateTime<Utc>,
) -> SamlResult<()> {
    sink.write_attribute(local, &format_instant(instant))
}

pub(crate) fn optional_attribute(
    sink: &mut dyn EventSink,
    local: &str,
    value: Option<&str>,
) -> SamlResult<()> {
    match value {
        Some(value) => sink.write_attribute(local, value),
        None => Ok(()),
    }
}

pub(crate) fn optional_instant(
    sink: &mut dyn EventSink,
    local: &str,
    instant: Option<&DateTime<Utc>>,
) -> SamlResult<()> {
    match instant {
        Some(instant) => instant_attribute(sink, local, instant),
        None => Ok(()),
    }
}

pub(crate) fn text_element(
    sink: &mut dyn EventSink,
    prefix: &str,
    local: &str,
    text: &str,
) -> SamlResult<()> {
    start(sink, prefix, local)?;
    sink.write_characters(text)?;
    sink.write_end_element()
}

/// Writes a `NameIDType` element such as `saml:Issuer` or `saml:NameID`.
pub(crate) fn name_id(sink: &mut dyn EventSink, local: &str, name_id: &NameId) -> SamlResult<()> {
    start(sink, SAML, local)?;
    optional_attribute(sink, names::NAME_QUALIFIER, name_id.name_qualifier.as_deref())?;
    optional_attribute(sink, names::SP_NAME_QUALIFIER, name_id.sp_name_qualifier.as_deref())?;
    optional_attribute(sink, names::FORMAT, name_id.format.as_deref())?;
    optional_attribute(sink, names::SP_PROVIDED_ID, name_id.sp_provided_id.as_deref())?;
    sink.write_characters(&name_id.value)?;
    sink.write_end_element()
}

pub(crate) fn status(sink: &mut dyn EventSink, status: &Status) -> SamlResult<()> {
    start(sink, SAMLP, names::STATUS)?;
    start(sink, SAMLP, names::STATUS_CODE)?;
    sink.write_attribute(names::VALUE, &status.status_code.value)?;
    sink.write_end_element()?;
    if let Some(message) = &status.status_message {
        text_element(sink, SAMLP, names::STATUS_MESSAGE, message)?;
    }
    sink.write_end_element()
}
