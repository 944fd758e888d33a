//! Request grammars: `AuthnRequest`, `LogoutRequest` and `NameIDPolicy`.

use chrono::{DateTime, Utc};

use super::assertion::parse_name_id;
use super::util::{
    element_text, expect_end, expect_start, next_child, set_once, skip_element, unexpected,
    StartTag,
};
use super::ElementParser;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, AuthnContextComparison, AuthnRequest, LogoutRequest, NameIdPolicy,
    RequestedAuthnContext, SAMLP_NS,
};
use crate::xml::{EventCursor, QualifiedName};

/// Attributes shared by every `RequestAbstractType` element.
pub(crate) struct RequestHeader {
    pub id: String,
    pub version: String,
    pub issue_instant: DateTime<Utc>,
    pub destination: Option<String>,
    pub consent: Option<String>,
}

impl RequestHeader {
    pub fn from_start(start: &StartTag) -> SamlResult<Self> {
        Ok(Self {
            id: start.required(names::ID)?,
            version: start.required(names::VERSION)?,
            issue_instant: start.required_instant(names::ISSUE_INSTANT)?,
            destination: start.optional(names::DESTINATION),
            consent: start.optional(names::CONSENT),
        })
    }
}

/// Parses `samlp:AuthnRequest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthnRequestParser;

impl ElementParser for AuthnRequestParser {
    type Output = AuthnRequest;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<AuthnRequest> {
        let start = expect_start(cursor, names::AUTHN_REQUEST)?;
        let header = RequestHeader::from_start(&start)?;

        let mut request = AuthnRequest::new(header.id, header.issue_instant);
        request.version = header.version;
        request.destination = header.destination;
        request.consent = header.consent;
        request.assertion_consumer_service_url =
            start.optional(names::ASSERTION_CONSUMER_SERVICE_URL);
        request.assertion_consumer_service_index =
            start.optional_u32(names::ASSERTION_CONSUMER_SERVICE_INDEX)?;
        request.attribute_consuming_service_index =
            start.optional_u32(names::ATTRIBUTE_CONSUMING_SERVICE_INDEX)?;
        request.protocol_binding = start.optional(names::PROTOCOL_BINDING);
        request.provider_name = start.optional(names::PROVIDER_NAME);
        request.force_authn = start.optional_bool(names::FORCE_AUTHN)?;
        request.is_passive = start.optional_bool(names::IS_PASSIVE)?;

        while let Some(child) = next_child(cursor, names::AUTHN_REQUEST)? {
            match child.local_name.as_str() {
                names::ISSUER => {
                    let value = parse_name_id(cursor, names::ISSUER)?;
                    set_once(&mut request.issuer, value, names::AUTHN_REQUEST, names::ISSUER)?;
                }
                names::NAME_ID_POLICY => {
                    let value = NameIdPolicyParser.parse(cursor)?;
                    set_once(
                        &mut request.name_id_policy,
                        value,
                        names::AUTHN_REQUEST,
                        names::NAME_ID_POLICY,
                    )?;
                }
                names::REQUESTED_AUTHN_CONTEXT => {
                    let value = parse_requested_authn_context(cursor)?;
                    set_once(
                        &mut request.requested_authn_context,
                        value,
                        names::AUTHN_REQUEST,
                        names::REQUESTED_AUTHN_CONTEXT,
                    )?;
                }
                names::SIGNATURE | names::EXTENSIONS | names::SCOPING => skip_element(cursor)?,
                _ => return Err(unexpected(names::AUTHN_REQUEST, &child)),
            }
        }
        expect_end(cursor, names::AUTHN_REQUEST)?;
        Ok(request)
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(SAMLP_NS, names::AUTHN_REQUEST)
    }
}

/// Parses `samlp:LogoutRequest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutRequestParser;

impl ElementParser for LogoutRequestParser {
    type Output = LogoutRequest;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<LogoutRequest> {
        let start = expect_start(cursor, names::LOGOUT_REQUEST)?;
        let header = RequestHeader::from_start(&start)?;
        let reason = start.optional(names::REASON);
        let not_on_or_after = start.optional_instant(names::NOT_ON_OR_AFTER)?;

        let mut issuer = None;
        let mut name_id = None;
        let mut session_indexes = Vec::new();
        while let Some(child) = next_child(cursor, names::LOGOUT_REQUEST)? {
            match child.local_name.as_str() {
                names::ISSUER => {
                    let value = parse_name_id(cursor, names::ISSUER)?;
                    set_once(&mut issuer, value, names::LOGOUT_REQUEST, names::ISSUER)?;
                }
                names::NAME_ID => {
                    let value = parse_name_id(cursor, names::NAME_ID)?;
                    set_once(&mut name_id, value, names::LOGOUT_REQUEST, names::NAME_ID)?;
                }
                names::SESSION_INDEX => session_indexes
                    .push(element_text(cursor, names::SESSION_INDEX)?.trim().to_string()),
                names::SIGNATURE | names::EXTENSIONS => skip_element(cursor)?,
                _ => return Err(unexpected(names::LOGOUT_REQUEST, &child)),
            }
        }
        expect_end(cursor, names::LOGOUT_REQUEST)?;

        let name_id = name_id.ok_or_else(|| {
            SamlError::MissingElement(format!("{} in <{}>", names::NAME_ID, names::LOGOUT_REQUEST))
        })?;

        Ok(LogoutRequest {
            id: header.id,
            version: header.version,
            issue_instant: header.issue_instant,
            issuer,
            destination: header.destination,
            consent: header.consent,
            reason,
            not_on_or_after,
            name_id,
            session_indexes,
        })
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(SAMLP_NS, names::LOGOUT_REQUEST)
    }
}

/// Parses `samlp:NameIDPolicy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameIdPolicyParser;

impl ElementParser for NameIdPolicyParser {
    type Output = NameIdPolicy;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<NameIdPolicy> {
        let start = expect_start(cursor, names::NAME_ID_POLICY)?;
        let policy = NameIdPolicy {
            format: start.optional(names::FORMAT),
            sp_name_qualifier: start.optional(names::SP_NAME_QUALIFIER),
            allow_create: start.optional_bool(names::ALLOW_CREATE)?,
        };
        expect_end(cursor, names::NAME_ID_POLICY)?;
        Ok(policy)
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(SAMLP_NS, names::NAME_ID_POLICY)
    }
}

fn parse_requested_authn_context(
    cursor: &mut dyn EventCursor,
) -> SamlResult<RequestedAuthnContext> {
    let start = expect_start(cursor, names::REQUESTED_AUTHN_CONTEXT)?;
    let comparison = start
        .attr(names::COMPARISON)
        .map(|v| {
            AuthnContextComparison::from_str_value(v)
                .ok_or_else(|| SamlError::invalid_value(names::COMPARISON, v))
        })
        .transpose()?;

    let mut context = RequestedAuthnContext {
        comparison,
        ..RequestedAuthnContext::default()
    };
    while let Some(child) = next_child(cursor, names::REQUESTED_AUTHN_CONTEXT)? {
        let local = child.local_name.as_str();
        match local {
            names::AUTHN_CONTEXT_CLASS_REF => context
                .authn_context_class_refs
                .push(element_text(cursor, local)?.trim().to_string()),
            names::AUTHN_CONTEXT_DECL_REF => context
                .authn_context_decl_refs
                .push(element_text(cursor, local)?.trim().to_string()),
            _ => return Err(unexpected(names::REQUESTED_AUTHN_CONTEXT, &child)),
        }
    }
    expect_end(cursor, names::REQUESTED_AUTHN_CONTEXT)?;
    Ok(context)
}
