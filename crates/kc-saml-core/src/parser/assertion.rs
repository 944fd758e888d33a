//! Assertion grammar.

use super::util::{
    element_text, expect_end, expect_start, lenient_text, next_child, set_once, skip_content,
    skip_element, unexpected, StartTag,
};
use super::ElementParser;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, Assertion, Attribute, AttributeStatement, AudienceRestriction, AuthnContext,
    AuthnStatement, Conditions, NameId, ProxyRestriction, Subject, SubjectConfirmation,
    SubjectConfirmationData, SubjectLocality, SAML_NS, X500_NS,
};
use crate::xml::{EventCursor, QualifiedName};

/// Parses `saml:Assertion`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertionParser;

impl ElementParser for AssertionParser {
    type Output = Assertion;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<Assertion> {
        let start = expect_start(cursor, names::ASSERTION)?;
        let id = start.required(names::ID)?;
        let version = start.required(names::VERSION)?;
        let issue_instant = start.required_instant(names::ISSUE_INSTANT)?;

        let mut issuer = None;
        let mut subject = None;
        let mut conditions = None;
        let mut authn_statements = Vec::new();
        let mut attribute_statements = Vec::new();

        while let Some(child) = next_child(cursor, names::ASSERTION)? {
            match child.local_name.as_str() {
                names::ISSUER => {
                    let value = parse_name_id(cursor, names::ISSUER)?;
                    set_once(&mut issuer, value, names::ASSERTION, names::ISSUER)?;
                }
                names::SUBJECT => {
                    let value = parse_subject(cursor)?;
                    set_once(&mut subject, value, names::ASSERTION, names::SUBJECT)?;
                }
                names::CONDITIONS => {
                    let value = parse_conditions(cursor)?;
                    set_once(&mut conditions, value, names::ASSERTION, names::CONDITIONS)?;
                }
                names::AUTHN_STATEMENT => authn_statements.push(parse_authn_statement(cursor)?),
                names::ATTRIBUTE_STATEMENT => {
                    attribute_statements.push(parse_attribute_statement(cursor)?);
                }
                names::SIGNATURE
                | names::ADVICE
                | names::STATEMENT
                | names::AUTHZ_DECISION_STATEMENT => skip_element(cursor)?,
                _ => return Err(unexpected(names::ASSERTION, &child)),
            }
        }
        expect_end(cursor, names::ASSERTION)?;

        let issuer = issuer.ok_or_else(|| {
            SamlError::MissingElement(format!("{} in <{}>", names::ISSUER, names::ASSERTION))
        })?;

        Ok(Assertion {
            id,
            version,
            issue_instant: Some(issue_instant),
            issuer,
            subject,
            conditions,
            authn_statements,
            attribute_statements,
        })
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.in_namespace(SAML_NS)
    }
}

/// Parses any element of `NameIDType` (`Issuer`, `NameID`).
pub(crate) fn parse_name_id(cursor: &mut dyn EventCursor, local: &str) -> SamlResult<NameId> {
    let start = expect_start(cursor, local)?;
    let mut name_id = name_id_attributes(&start);
    name_id.value = lenient_text(cursor, local)?.trim().to_string();
    Ok(name_id)
}

fn name_id_attributes(start: &StartTag) -> NameId {
    NameId {
        value: String::new(),
        format: start.optional(names::FORMAT),
        name_qualifier: start.optional(names::NAME_QUALIFIER),
        sp_name_qualifier: start.optional(names::SP_NAME_QUALIFIER),
        sp_provided_id: start.optional(names::SP_PROVIDED_ID),
    }
}

pub(crate) fn parse_subject(cursor: &mut dyn EventCursor) -> SamlResult<Subject> {
    expect_start(cursor, names::SUBJECT)?;
    let mut subject = Subject::default();
    while let Some(child) = next_child(cursor, names::SUBJECT)? {
        match child.local_name.as_str() {
            names::NAME_ID => {
                let value = parse_name_id(cursor, names::NAME_ID)?;
                set_once(&mut subject.name_id, value, names::SUBJECT, names::NAME_ID)?;
            }
            names::SUBJECT_CONFIRMATION => subject
                .subject_confirmations
                .push(parse_subject_confirmation(cursor)?),
            _ => return Err(unexpected(names::SUBJECT, &child)),
        }
    }
    expect_end(cursor, names::SUBJECT)?;
    Ok(subject)
}

fn parse_subject_confirmation(cursor: &mut dyn EventCursor) -> SamlResult<SubjectConfirmation> {
    let start = expect_start(cursor, names::SUBJECT_CONFIRMATION)?;
    let mut confirmation = SubjectConfirmation::new(start.required(names::METHOD)?);
    while let Some(child) = next_child(cursor, names::SUBJECT_CONFIRMATION)? {
        match child.local_name.as_str() {
            names::SUBJECT_CONFIRMATION_DATA => {
                confirmation.subject_confirmation_data =
                    Some(parse_subject_confirmation_data(cursor)?);
            }
            _ => return Err(unexpected(names::SUBJECT_CONFIRMATION, &child)),
        }
    }
    expect_end(cursor, names::SUBJECT_CONFIRMATION)?;
    Ok(confirmation)
}

fn parse_subject_confirmation_data(
    cursor: &mut dyn EventCursor,
) -> SamlResult<SubjectConfirmationData> {
    let start = expect_start(cursor, names::SUBJECT_CONFIRMATION_DATA)?;
    let data = SubjectConfirmationData {
        in_response_to: start.optional(names::IN_RESPONSE_TO),
        not_on_or_after: start.optional_instant(names::NOT_ON_OR_AFTER)?,
        not_before: start.optional_instant(names::NOT_BEFORE)?,
        recipient: start.optional(names::RECIPIENT),
        address: start.optional(names::ADDRESS),
    };
    // KeyInfo and other content is not modeled
    skip_content(cursor, names::SUBJECT_CONFIRMATION_DATA)?;
    Ok(data)
}

fn parse_conditions(cursor: &mut dyn EventCursor) -> SamlResult<Conditions> {
    let start = expect_start(cursor, names::CONDITIONS)?;
    let mut conditions = Conditions {
        not_before: start.optional_instant(names::NOT_BEFORE)?,
        not_on_or_after: start.optional_instant(names::NOT_ON_OR_AFTER)?,
        ..Conditions::default()
    };
    while let Some(child) = next_child(cursor, names::CONDITIONS)? {
        match child.local_name.as_str() {
            names::AUDIENCE_RESTRICTION => {
                expect_start(cursor, names::AUDIENCE_RESTRICTION)?;
                let audiences = parse_audiences(cursor, names::AUDIENCE_RESTRICTION)?;
                conditions
                    .audience_restrictions
                    .push(AudienceRestriction { audiences });
            }
            names::ONE_TIME_USE => {
                skip_element(cursor)?;
                conditions.one_time_use = true;
            }
            names::PROXY_RESTRICTION => {
                let start = expect_start(cursor, names::PROXY_RESTRICTION)?;
                let count = start.optional_u32(names::COUNT)?;
                let audiences = parse_audiences(cursor, names::PROXY_RESTRICTION)?;
                conditions.proxy_restriction = Some(ProxyRestriction { count, audiences });
            }
            _ => skip_element(cursor)?,
        }
    }
    expect_end(cursor, names::CONDITIONS)?;
    Ok(conditions)
}

/// Reads `Audience` children up to and including the end of `parent`.
fn parse_audiences(cursor: &mut dyn EventCursor, parent: &str) -> SamlResult<Vec<String>> {
    let mut audiences = Vec::new();
    while let Some(child) = next_child(cursor, parent)? {
        if child.local_name != names::AUDIENCE {
            return Err(unexpected(parent, &child));
        }
        audiences.push(element_text(cursor, names::AUDIENCE)?.trim().to_string());
    }
    expect_end(cursor, parent)?;
    Ok(audiences)
}

fn parse_authn_statement(cursor: &mut dyn EventCursor) -> SamlResult<AuthnStatement> {
    let start = expect_start(cursor, names::AUTHN_STATEMENT)?;
    let authn_instant = start.required_instant(names::AUTHN_INSTANT)?;
    let session_index = start.optional(names::SESSION_INDEX);
    let session_not_on_or_after = start.optional_instant(names::SESSION_NOT_ON_OR_AFTER)?;

    let mut subject_locality = None;
    let mut authn_context = None;
    while let Some(child) = next_child(cursor, names::AUTHN_STATEMENT)? {
        match child.local_name.as_str() {
            names::SUBJECT_LOCALITY => {
                let start = expect_start(cursor, names::SUBJECT_LOCALITY)?;
                subject_locality = Some(SubjectLocality {
                    address: start.optional(names::ADDRESS),
                    dns_name: start.optional(names::DNS_NAME),
                });
                expect_end(cursor, names::SUBJECT_LOCALITY)?;
            }
            names::AUTHN_CONTEXT => {
                let value = parse_authn_context(cursor)?;
                set_once(&mut authn_context, value, names::AUTHN_STATEMENT, names::AUTHN_CONTEXT)?;
            }
            _ => return Err(unexpected(names::AUTHN_STATEMENT, &child)),
        }
    }
    expect_end(cursor, names::AUTHN_STATEMENT)?;

    let authn_context = authn_context.ok_or_else(|| {
        SamlError::MissingElement(format!(
            "{} in <{}>",
            names::AUTHN_CONTEXT,
            names::AUTHN_STATEMENT
        ))
    })?;

    Ok(AuthnStatement {
        authn_instant,
        session_index,
        session_not_on_or_after,
        subject_locality,
        authn_context,
    })
}

fn parse_authn_context(cursor: &mut dyn EventCursor) -> SamlResult<AuthnContext> {
    expect_start(cursor, names::AUTHN_CONTEXT)?;
    let mut context = AuthnContext::default();
    while let Some(child) = next_child(cursor, names::AUTHN_CONTEXT)? {
        let local = child.local_name.as_str();
        match local {
            names::AUTHN_CONTEXT_CLASS_REF => {
                context.authn_context_class_ref =
                    Some(element_text(cursor, local)?.trim().to_string());
            }
            names::AUTHN_CONTEXT_DECL_REF => {
                context.authn_context_decl_ref =
                    Some(element_text(cursor, local)?.trim().to_string());
            }
            names::AUTHENTICATING_AUTHORITY => context
                .authenticating_authorities
                .push(element_text(cursor, local)?.trim().to_string()),
            _ => return Err(unexpected(names::AUTHN_CONTEXT, &child)),
        }
    }
    expect_end(cursor, names::AUTHN_CONTEXT)?;
    Ok(context)
}

fn parse_attribute_statement(cursor: &mut dyn EventCursor) -> SamlResult<AttributeStatement> {
    expect_start(cursor, names::ATTRIBUTE_STATEMENT)?;
    let mut statement = AttributeStatement::new();
    while let Some(child) = next_child(cursor, names::ATTRIBUTE_STATEMENT)? {
        if child.local_name != names::ATTRIBUTE {
            return Err(unexpected(names::ATTRIBUTE_STATEMENT, &child));
        }
        statement.attributes.push(parse_attribute(cursor)?);
    }
    expect_end(cursor, names::ATTRIBUTE_STATEMENT)?;
    Ok(statement)
}

fn parse_attribute(cursor: &mut dyn EventCursor) -> SamlResult<Attribute> {
    let start = expect_start(cursor, names::ATTRIBUTE)?;
    let mut attribute = Attribute {
        name: Some(start.required(names::NAME)?),
        name_format: start.optional(names::NAME_FORMAT),
        friendly_name: start.optional(names::FRIENDLY_NAME),
        x500_encoding: start
            .attr_ns(X500_NS, names::ENCODING)
            .map(str::to_string),
        values: Vec::new(),
    };
    while let Some(child) = next_child(cursor, names::ATTRIBUTE)? {
        if child.local_name == names::ATTRIBUTE_VALUE {
            expect_start(cursor, names::ATTRIBUTE_VALUE)?;
            attribute
                .values
                .push(lenient_text(cursor, names::ATTRIBUTE_VALUE)?);
        } else {
            skip_element(cursor)?;
        }
    }
    expect_end(cursor, names::ATTRIBUTE)?;
    Ok(attribute)
}
