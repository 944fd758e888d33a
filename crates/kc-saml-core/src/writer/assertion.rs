//! Assertion writer.

use super::{
    instant_attribute, name_id, optional_attribute, optional_instant, start, text_element, SAML,
    X500,
};
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, Assertion, Attribute, AttributeStatement, AuthnStatement, Conditions, Subject,
    SubjectConfirmation, SAML_NS, X500_NS,
};
use crate::xml::EventSink;

/// Writes `saml:Assertion` elements.
pub struct SamlAssertionWriter<'w> {
    sink: &'w mut dyn EventSink,
}

impl<'w> SamlAssertionWriter<'w> {
    /// Creates a writer over `sink`.
    pub fn new(sink: &'w mut dyn EventSink) -> Self {
        Self { sink }
    }

    /// Writes a standalone assertion, declaring the namespaces it uses.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`] when the assertion has no issue
    /// instant, when an attribute has no name, or when the sink fails.
    pub fn write_assertion(&mut self, assertion: &Assertion) -> SamlResult<()> {
        tracing::debug!("writing Assertion {}", assertion.id);
        write_assertion_element(self.sink, assertion, true)?;
        self.sink.flush()
    }
}

/// Writes an assertion. With `top_level` set the element carries its own
/// namespace declarations.
pub(crate) fn write_assertion_element(
    sink: &mut dyn EventSink,
    assertion: &Assertion,
    top_level: bool,
) -> SamlResult<()> {
    let issue_instant = assertion.issue_instant.as_ref().ok_or_else(|| {
        SamlError::Processing(format!("assertion {} has no IssueInstant", assertion.id))
    })?;

    start(sink, SAML, names::ASSERTION)?;
    if top_level {
        sink.write_namespace(SAML, SAML_NS)?;
        if assertion.uses_x500_encoding() {
            sink.write_namespace(X500, X500_NS)?;
        }
    }
    sink.write_attribute(names::ID, &assertion.id)?;
    sink.write_attribute(names::VERSION, &assertion.version)?;
    instant_attribute(sink, names::ISSUE_INSTANT, issue_instant)?;

    name_id(sink, names::ISSUER, &assertion.issuer)?;
    if let Some(subject) = &assertion.subject {
        write_subject(sink, subject)?;
    }
    if let Some(conditions) = &assertion.conditions {
        write_conditions(sink, conditions)?;
    }
    for statement in &assertion.authn_statements {
        write_authn_statement(sink, statement)?;
    }
    for statement in &assertion.attribute_statements {
        write_attribute_statement(sink, statement)?;
    }
    sink.write_end_element()
}

fn write_subject(sink: &mut dyn EventSink, subject: &Subject) -> SamlResult<()> {
    start(sink, SAML, names::SUBJECT)?;
    if let Some(id) = &subject.name_id {
        name_id(sink, names::NAME_ID, id)?;
    }
    for confirmation in &subject.subject_confirmations {
        write_subject_confirmation(sink, confirmation)?;
    }
    sink.write_end_element()
}

fn write_subject_confirmation(
    sink: &mut dyn EventSink,
    confirmation: &SubjectConfirmation,
) -> SamlResult<()> {
    start(sink, SAML, names::SUBJECT_CONFIRMATION)?;
    sink.write_attribute(names::METHOD, &confirmation.method)?;
    if let Some(data) = &confirmation.subject_confirmation_data {
        start(sink, SAML, names::SUBJECT_CONFIRMATION_DATA)?;
        optional_instant(sink, names::NOT_BEFORE, data.not_before.as_ref())?;
        optional_instant(sink, names::NOT_ON_OR_AFTER, data.not_on_or_after.as_ref())?;
        optional_attribute(sink, names::RECIPIENT, data.recipient.as_deref())?;
        optional_attribute(sink, names::IN_RESPONSE_TO, data.in_response_to.as_deref())?;
        optional_attribute(sink, names::ADDRESS, data.address.as_deref())?;
        sink.write_end_element()?;
    }
    sink.write_end_element()
}

fn write_conditions(sink: &mut dyn EventSink, conditions: &Conditions) -> SamlResult<()> {
    start(sink, SAML, names::CONDITIONS)?;
    optional_instant(sink, names::NOT_BEFORE, conditions.not_before.as_ref())?;
    optional_instant(sink, names::NOT_ON_OR_AFTER, conditions.not_on_or_after.as_ref())?;

    for restriction in &conditions.audience_restrictions {
        start(sink, SAML, names::AUDIENCE_RESTRICTION)?;
        write_audiences(sink, &restriction.audiences)?;
        sink.write_end_element()?;
    }
    if conditions.one_time_use {
        start(sink, SAML, names::ONE_TIME_USE)?;
        sink.write_end_element()?;
    }
    if let Some(proxy) = &conditions.proxy_restriction {
        start(sink, SAML, names::PROXY_RESTRICTION)?;
        if let Some(count) = proxy.count {
            sink.write_attribute(names::COUNT, &count.to_string())?;
        }
        write_audiences(sink, &proxy.audiences)?;
        sink.write_end_element()?;
    }
    sink.write_end_element()
}

fn write_audiences(sink: &mut dyn EventSink, audiences: &[String]) -> SamlResult<()> {
    for audience in audiences {
        text_element(sink, SAML, names::AUDIENCE, audience)?;
    }
    Ok(())
}

fn write_authn_statement(sink: &mut dyn EventSink, statement: &AuthnStatement) -> SamlResult<()> {
    start(sink, SAML, names::AUTHN_STATEMENT)?;
    instant_attribute(sink, names::AUTHN_INSTANT, &statement.authn_instant)?;
    optional_attribute(sink, names::SESSION_INDEX, statement.session_index.as_deref())?;
    optional_instant(
        sink,
        names::SESSION_NOT_ON_OR_AFTER,
        statement.session_not_on_or_after.as_ref(),
    )?;

    if let Some(locality) = &statement.subject_locality {
        start(sink, SAML, names::SUBJECT_LOCALITY)?;
        optional_attribute(sink, names::ADDRESS, locality.address.as_deref())?;
        optional_attribute(sink, names::DNS_NAME, locality.dns_name.as_deref())?;
        sink.write_end_element()?;
    }

    let context = &statement.authn_context;
    start(sink, SAML, names::AUTHN_CONTEXT)?;
    if let Some(class_ref) = &context.authn_context_class_ref {
        text_element(sink, SAML, names::AUTHN_CONTEXT_CLASS_REF, class_ref)?;
    }
    if let Some(decl_ref) = &context.authn_context_decl_ref {
        text_element(sink, SAML, names::AUTHN_CONTEXT_DECL_REF, decl_ref)?;
    }
    for authority in &context.authenticating_authorities {
        text_element(sink, SAML, names::AUTHENTICATING_AUTHORITY, authority)?;
    }
    sink.write_end_element()?;

    sink.write_end_element()
}

fn write_attribute_statement(
    sink: &mut dyn EventSink,
    statement: &AttributeStatement,
) -> SamlResult<()> {
    start(sink, SAML, names::ATTRIBUTE_STATEMENT)?;
    for attribute in &statement.attributes {
        write_attribute(sink, attribute)?;
    }
    sink.write_end_element()
}

fn write_attribute(sink: &mut dyn EventSink, attribute: &Attribute) -> SamlResult<()> {
    let name = attribute
        .name
        .as_deref()
        .ok_or_else(|| SamlError::Processing("attribute without a Name".to_string()))?;

    start(sink, SAML, names::ATTRIBUTE)?;
    sink.write_attribute(names::NAME, name)?;
    optional_attribute(sink, names::NAME_FORMAT, attribute.name_format.as_deref())?;
    optional_attribute(sink, names::FRIENDLY_NAME, attribute.friendly_name.as_deref())?;
    if let Some(encoding) = &attribute.x500_encoding {
        sink.write_prefixed_attribute(X500, X500_NS, names::ENCODING, encoding)?;
    }
    for value in &attribute.values {
        text_element(sink, SAML, names::ATTRIBUTE_VALUE, value)?;
    }
    sink.write_end_element()
}
