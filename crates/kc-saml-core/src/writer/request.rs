//! Request writers: `AuthnRequest`, `LogoutRequest` and `NameIDPolicy`.

use super::{
    declare_protocol, instant_attribute, name_id, optional_attribute, optional_instant, start,
    text_element, SAML, SAMLP,
};
use crate::error::SamlResult;
use crate::types::{names, AuthnRequest, LogoutRequest, NameIdPolicy, RequestedAuthnContext};
use crate::xml::EventSink;

/// Writes SAML protocol requests.
pub struct SamlRequestWriter<'w> {
    sink: &'w mut dyn EventSink,
}

impl<'w> SamlRequestWriter<'w> {
    /// Creates a writer over `sink`.
    pub fn new(sink: &'w mut dyn EventSink) -> Self {
        Self { sink }
    }

    /// Writes a `samlp:AuthnRequest`.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`](crate::SamlError::Processing) when
    /// the sink fails.
    pub fn write_authn_request(&mut self, request: &AuthnRequest) -> SamlResult<()> {
        tracing::debug!("writing AuthnRequest {}", request.id);
        let sink = &mut *self.sink;

        start(sink, SAMLP, names::AUTHN_REQUEST)?;
        declare_protocol(sink)?;
        sink.write_attribute(names::ID, &request.id)?;
        sink.write_attribute(names::VERSION, &request.version)?;
        instant_attribute(sink, names::ISSUE_INSTANT, &request.issue_instant)?;
        optional_attribute(sink, names::DESTINATION, request.destination.as_deref())?;
        optional_attribute(sink, names::CONSENT, request.consent.as_deref())?;
        if let Some(force) = request.force_authn {
            sink.write_attribute(names::FORCE_AUTHN, bool_value(force))?;
        }
        if let Some(passive) = request.is_passive {
            sink.write_attribute(names::IS_PASSIVE, bool_value(passive))?;
        }
        optional_attribute(sink, names::PROTOCOL_BINDING, request.protocol_binding.as_deref())?;
        optional_attribute(
            sink,
            names::ASSERTION_CONSUMER_SERVICE_URL,
            request.assertion_consumer_service_url.as_deref(),
        )?;
        if let Some(index) = request.assertion_consumer_service_index {
            sink.write_attribute(names::ASSERTION_CONSUMER_SERVICE_INDEX, &index.to_string())?;
        }
        if let Some(index) = request.attribute_consuming_service_index {
            sink.write_attribute(names::ATTRIBUTE_CONSUMING_SERVICE_INDEX, &index.to_string())?;
        }
        optional_attribute(sink, names::PROVIDER_NAME, request.provider_name.as_deref())?;

        if let Some(issuer) = &request.issuer {
            name_id(sink, names::ISSUER, issuer)?;
        }
        if let Some(policy) = &request.name_id_policy {
            write_policy(sink, policy)?;
        }
        if let Some(context) = &request.requested_authn_context {
            write_requested_authn_context(sink, context)?;
        }
        sink.write_end_element()?;
        sink.flush()
    }

    /// Writes a `samlp:LogoutRequest`.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`](crate::SamlError::Processing) when
    /// the sink fails.
    pub fn write_logout_request(&mut self, request: &LogoutRequest) -> SamlResult<()> {
        tracing::debug!("writing LogoutRequest {}", request.id);
        let sink = &mut *self.sink;

        start(sink, SAMLP, names::LOGOUT_REQUEST)?;
        declare_protocol(sink)?;
        sink.write_attribute(names::ID, &request.id)?;
        sink.write_attribute(names::VERSION, &request.version)?;
        instant_attribute(sink, names::ISSUE_INSTANT, &request.issue_instant)?;
        optional_attribute(sink, names::DESTINATION, request.destination.as_deref())?;
        optional_attribute(sink, names::CONSENT, request.consent.as_deref())?;
        optional_instant(sink, names::NOT_ON_OR_AFTER, request.not_on_or_after.as_ref())?;
        optional_attribute(sink, names::REASON, request.reason.as_deref())?;

        if let Some(issuer) = &request.issuer {
            name_id(sink, names::ISSUER, issuer)?;
        }
        name_id(sink, names::NAME_ID, &request.name_id)?;
        for index in &request.session_indexes {
            text_element(sink, SAMLP, names::SESSION_INDEX, index)?;
        }
        sink.write_end_element()?;
        sink.flush()
    }

    /// Writes a standalone `samlp:NameIDPolicy`.
    ///
    /// The element is meant to be embedded in a surrounding request, so no
    /// namespace is declared. Unset fields are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`](crate::SamlError::Processing) when
    /// the sink fails.
    pub fn write_name_id_policy(&mut self, policy: &NameIdPolicy) -> SamlResult<()> {
        write_policy(self.sink, policy)?;
        self.sink.flush()
    }
}

const fn bool_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn write_policy(sink: &mut dyn EventSink, policy: &NameIdPolicy) -> SamlResult<()> {
    start(sink, SAMLP, names::NAME_ID_POLICY)?;
    optional_attribute(sink, names::FORMAT, policy.format.as_deref())?;
    optional_attribute(sink, names::SP_NAME_QUALIFIER, policy.sp_name_qualifier.as_deref())?;
    if let Some(allow) = policy.allow_create {
        sink.write_attribute(names::ALLOW_CREATE, bool_value(allow))?;
    }
    sink.write_end_element()
}

fn write_requested_authn_context(
    sink: &mut dyn EventSink,
    context: &RequestedAuthnContext,
) -> SamlResult<()> {
    start(sink, SAMLP, names::REQUESTED_AUTHN_CONTEXT)?;
    if let Some(comparison) = context.comparison {
        sink.write_attribute(names::COMPARISON, comparison.as_str())?;
    }
    for class_ref in &context.authn_context_class_refs {
        text_element(sink, SAML, names::AUTHN_CONTEXT_CLASS_REF, class_ref)?;
    }
    for decl_ref in &context.authn_context_decl_refs {
        text_element(sink, SAML, names::AUTHN_CONTEXT_DECL_REF, decl_ref)?;
    }
    sink.write_end_element()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::parser::{AuthnRequestParser, ElementParser, LogoutRequestParser};
    use crate::types::{AuthnContextClass, NameId, NameIdFormat, SamlBinding};
    use crate::xml::{XmlEventReader, XmlEventWriter};

    fn instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-02-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn render(f: impl FnOnce(&mut SamlRequestWriter<'_>) -> SamlResult<()>) -> String {
        let mut out = XmlEventWriter::new(Vec::new());
        f(&mut SamlRequestWriter::new(&mut out)).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn name_id_policy_with_format_only() {
        let policy = NameIdPolicy::with_format(NameIdFormat::Persistent);
        let xml = render(|w| w.write_name_id_policy(&policy));
        assert_eq!(
            xml,
            r#"<samlp:NameIDPolicy Format="urn:oasis:names:tc:SAML:2.0:nameid-format:persistent"/>"#
        );
    }

    #[test]
    fn name_id_policy_with_every_field() {
        let policy = NameIdPolicy::with_format(NameIdFormat::Email)
            .with_sp_name_qualifier("https://sp.example.com")
            .allow_create(false);
        let xml = render(|w| w.write_name_id_policy(&policy));
        assert!(xml.contains(r#"SPNameQualifier="https://sp.example.com""#));
        assert!(xml.contains(r#"AllowCreate="false""#));
        assert!(!xml.contains("xmlns"));
    }

    #[test]
    fn authn_request_round_trip() {
        let request = AuthnRequest::new("ID_r1", instant())
            .with_issuer(NameId::new("https://sp.example.com"))
            .with_destination("https://idp.example.com/sso")
            .with_acs_url("https://sp.example.com/acs")
            .with_binding(SamlBinding::HttpPost)
            .with_name_id_policy(NameIdPolicy::with_format(NameIdFormat::Email).allow_create(true))
            .with_authn_context(RequestedAuthnContext::exact(
                AuthnContextClass::PasswordProtectedTransport,
            ))
            .force_authn(true);

        let xml = render(|w| w.write_authn_request(&request));
        assert!(xml.starts_with(
            r#"<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion""#
        ));
        assert_eq!(xml.matches("xmlns:").count(), 2);

        let parsed = AuthnRequestParser
            .parse(&mut XmlEventReader::from_str(&xml))
            .unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn logout_request_round_trip() {
        let request = LogoutRequest::new(
            "ID_l1",
            instant(),
            NameId::new("alice").with_format(NameIdFormat::Persistent),
        )
        .with_issuer(NameId::new("https://sp.example.com"))
        .with_session_index("_s1")
        .with_session_index("_s2")
        .with_reason(LogoutRequest::REASON_USER);

        let xml = render(|w| w.write_logout_request(&request));
        assert!(xml.contains("<samlp:SessionIndex>_s2</samlp:SessionIndex>"));

        let parsed = LogoutRequestParser
            .parse(&mut XmlEventReader::from_str(&xml))
            .unwrap();
        assert_eq!(parsed, request);
    }
}
