//! Response and assertion construction.
//!
//! [`ResponseFactory`] builds identity provider responses from three small
//! holders: what the service provider asked for ([`SpInfo`]), who the
//! subject is ([`IdpInfo`]) and who is answering ([`IssuerInfo`]).

mod statement;

pub use statement::{attribute_statement_from_map, attribute_statement_from_roles};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SamlConfig;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    confirmation_methods, Assertion, NameId, Response, Status, Subject, SubjectConfirmation,
    SubjectConfirmationData,
};

/// The service provider side of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpInfo {
    /// ID of the request being answered.
    pub request_id: String,
    /// Where the response will be delivered.
    pub destination_uri: String,
}

impl SpInfo {
    /// Creates service provider information.
    pub fn new(request_id: impl Into<String>, destination_uri: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            destination_uri: destination_uri.into(),
        }
    }
}

/// The authenticated subject, as the identity provider names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpInfo {
    /// Name ID format URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_id_format: Option<String>,
    /// Name ID value.
    pub name_id_value: String,
    /// Subject confirmation method; bearer when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_confirmation_method: Option<String>,
}

impl IdpInfo {
    /// Creates subject information with the given name ID format and value.
    pub fn new(name_id_format: impl Into<String>, name_id_value: impl Into<String>) -> Self {
        Self {
            name_id_format: Some(name_id_format.into()),
            name_id_value: name_id_value.into(),
            subject_confirmation_method: None,
        }
    }

    /// Sets the subject confirmation method.
    #[must_use]
    pub fn with_confirmation_method(mut self, method: impl Into<String>) -> Self {
        self.subject_confirmation_method = Some(method.into());
        self
    }
}

/// The responding party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerInfo {
    /// Issuer of the response and of minted assertions.
    pub issuer: NameId,
    /// Top-level status code URI. Required to build a response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    /// SAML version written on responses and minted assertions.
    pub saml_version: String,
}

impl IssuerInfo {
    /// Creates issuer information for SAML 2.0 with no status code.
    pub fn new(issuer: NameId) -> Self {
        Self {
            issuer,
            status_code: None,
            saml_version: "2.0".to_string(),
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status_code(mut self, code: impl Into<String>) -> Self {
        self.status_code = Some(code.into());
        self
    }
}

/// Builds responses and assertions.
#[derive(Debug, Clone)]
pub struct ResponseFactory {
    confirmation_validity: Duration,
}

impl Default for ResponseFactory {
    fn default() -> Self {
        Self::new(&SamlConfig::default())
    }
}

impl ResponseFactory {
    /// Creates a factory using the validity window from `config`.
    #[must_use]
    pub fn new(config: &SamlConfig) -> Self {
        Self {
            confirmation_validity: config.subject_confirmation_validity(),
        }
    }

    /// Mints a fresh identifier, `ID_` followed by a random UUID.
    #[must_use]
    pub fn generate_id() -> String {
        format!("ID_{}", Uuid::new_v4())
    }

    /// Builds a status from a code URI.
    #[must_use]
    pub fn create_status(code: impl Into<String>) -> Status {
        Status::new(code)
    }

    /// Builds a response carrying a newly minted assertion about the subject
    /// described by `idp`, addressed to the request described by `sp`.
    ///
    /// The response, the assertion and the confirmation data share one
    /// issue instant.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Configuration`] when `issuer` has no status code.
    pub fn create_response(
        &self,
        id: impl Into<String>,
        sp: &SpInfo,
        idp: &IdpInfo,
        issuer: &IssuerInfo,
    ) -> SamlResult<Response> {
        let now = Utc::now();

        let mut assertion = Assertion::new(Self::generate_id(), issuer.issuer.clone())
            .with_issue_instant(now)
            .with_subject(self.subject(sp, idp, now));
        assertion.version.clone_from(&issuer.saml_version);

        let response = build_response(id.into(), issuer, assertion, now)?
            .in_response_to(sp.request_id.clone())
            .with_destination(sp.destination_uri.clone());
        tracing::debug!(
            "created Response {} in response to {}",
            response.id,
            sp.request_id
        );
        Ok(response)
    }

    /// Wraps an existing assertion in a response.
    ///
    /// The assertion's issue instant is set to the response's only when it
    /// has none.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Configuration`] when `issuer` has no status code.
    pub fn create_response_with_assertion(
        &self,
        id: impl Into<String>,
        issuer: &IssuerInfo,
        assertion: Assertion,
    ) -> SamlResult<Response> {
        build_response(id.into(), issuer, assertion, Utc::now())
    }

    fn subject(&self, sp: &SpInfo, idp: &IdpInfo, now: DateTime<Utc>) -> Subject {
        let mut name_id = NameId::new(idp.name_id_value.clone());
        name_id.format.clone_from(&idp.name_id_format);

        let method = idp
            .subject_confirmation_method
            .clone()
            .unwrap_or_else(|| confirmation_methods::BEARER.to_string());
        let data = SubjectConfirmationData::for_request(
            sp.request_id.clone(),
            sp.destination_uri.clone(),
            now,
            self.confirmation_validity,
        );
        Subject::new(name_id).with_confirmation(SubjectConfirmation::new(method).with_data(data))
    }
}

fn build_response(
    id: String,
    issuer: &IssuerInfo,
    mut assertion: Assertion,
    now: DateTime<Utc>,
) -> SamlResult<Response> {
    let code = issuer
        .status_code
        .as_deref()
        .ok_or_else(|| SamlError::Configuration("issuer info missing status code".to_string()))?;

    if assertion.issue_instant.is_none() {
        assertion.issue_instant = Some(now);
    }

    let mut response = Response::new(id, now, ResponseFactory::create_status(code))
        .with_issuer(issuer.issuer.clone())
        .with_assertion(assertion);
    response.version.clone_from(&issuer.saml_version);
    Ok(response)
}
