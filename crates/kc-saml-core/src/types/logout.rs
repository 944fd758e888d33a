//! SAML Logout types.
//!
//! Single Logout (SLO) request and response messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NameId, Status};

/// SAML Logout Request.
///
/// A request to terminate an existing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Unique identifier for this request.
    pub id: String,

    /// Version of the SAML protocol.
    pub version: String,

    /// Timestamp when this request was issued.
    pub issue_instant: DateTime<Utc>,

    /// The requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<NameId>,

    /// The URL where this request was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// The consent obtained for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<String>,

    /// Reason for the logout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Time after which the request is no longer valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_or_after: Option<DateTime<Utc>>,

    /// The name identifier of the principal to log out.
    pub name_id: NameId,

    /// Session indexes to terminate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub session_indexes: Vec<String>,
}

impl LogoutRequest {
    /// User logout reason.
    pub const REASON_USER: &'static str = "urn:oasis:names:tc:SAML:2.0:logout:user";

    /// Admin logout reason.
    pub const REASON_ADMIN: &'static str = "urn:oasis:names:tc:SAML:2.0:logout:admin";

    /// Creates a new logout request.
    #[must_use]
    pub fn new(id: impl Into<String>, issue_instant: DateTime<Utc>, name_id: NameId) -> Self {
        Self {
            id: id.into(),
            version: "2.0".to_string(),
            issue_instant,
            issuer: None,
            destination: None,
            consent: None,
            reason: None,
            not_on_or_after: None,
            name_id,
            session_indexes: Vec::new(),
        }
    }

    /// Sets the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: NameId) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Sets the destination URL.
    #[must_use]
    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.destination = Some(url.into());
        self
    }

    /// Adds a session index to terminate.
    #[must_use]
    pub fn with_session_index(mut self, index: impl Into<String>) -> Self {
        self.session_indexes.push(index.into());
        self
    }

    /// Sets the logout reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// SAML Logout Response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Unique identifier for this response.
    pub id: String,

    /// Version of the SAML protocol.
    pub version: String,

    /// Timestamp when this response was issued.
    pub issue_instant: DateTime<Utc>,

    /// The responder. Optional on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<NameId>,

    /// The ID of the request this response is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<String>,

    /// The URL where this response was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// The consent obtained for this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<String>,

    /// The status of the response.
    pub status: Status,
}

impl LogoutResponse {
    /// Creates a new logout response.
    #[must_use]
    pub fn new(id: impl Into<String>, issue_instant: DateTime<Utc>, status: Status) -> Self {
        Self {
            id: id.into(),
            version: "2.0".to_string(),
            issue_instant,
            issuer: None,
            in_response_to: None,
            destination: None,
            consent: None,
            status,
        }
    }

    /// Sets the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: NameId) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Sets the request ID this response is for.
    #[must_use]
    pub fn in_response_to(mut self, request_id: impl Into<String>) -> Self {
        self.in_response_to = Some(request_id.into());
        self
    }

    /// Sets the destination URL.
    #[must_use]
    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.destination = Some(url.into());
        self
    }

    /// Returns true if this response indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logout_request_creation() {
        let request = LogoutRequest::new("_lr1", Utc::now(), NameId::email("user@example.com"))
            .with_issuer(NameId::new("https://sp.example.com"))
            .with_destination("https://idp.example.com/slo")
            .with_session_index("_session123")
            .with_reason(LogoutRequest::REASON_USER);

        assert_eq!(request.name_id.value, "user@example.com");
        assert_eq!(request.session_indexes, vec!["_session123".to_string()]);
        assert_eq!(request.reason.as_deref(), Some(LogoutRequest::REASON_USER));
    }

    #[test]
    fn logout_response_success() {
        let response = LogoutResponse::new("_lresp1", Utc::now(), Status::success())
            .in_response_to("_req123")
            .with_destination("https://sp.example.com/slo");

        assert!(response.is_success());
        assert!(response.issuer.is_none());
        assert_eq!(response.in_response_to.as_deref(), Some("_req123"));
    }
}
