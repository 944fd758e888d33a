//! The closed set of top-level messages the parser can produce.

use serde::{Deserialize, Serialize};

use super::{
    Assertion, AuthnRequest, EntitiesDescriptor, EntityDescriptor, LogoutRequest, LogoutResponse,
    Response, XacmlAuthzDecisionQuery,
};

/// A parsed top-level SAML message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SamlMessage {
    /// `samlp:AuthnRequest`.
    AuthnRequest(AuthnRequest),
    /// `samlp:Response`.
    Response(Response),
    /// `samlp:LogoutRequest`.
    LogoutRequest(LogoutRequest),
    /// `samlp:LogoutResponse`.
    LogoutResponse(LogoutResponse),
    /// `saml:Assertion`.
    Assertion(Assertion),
    /// `md:EntityDescriptor`.
    EntityDescriptor(EntityDescriptor),
    /// `md:EntitiesDescriptor`.
    EntitiesDescriptor(EntitiesDescriptor),
    /// `xacml-samlp:XACMLAuthzDecisionQuery`.
    XacmlAuthzDecisionQuery(XacmlAuthzDecisionQuery),
}

impl SamlMessage {
    /// Returns the local element name of this message.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        use super::names;
        match self {
            Self::AuthnRequest(_) => names::AUTHN_REQUEST,
            Self::Response(_) => names::RESPONSE,
            Self::LogoutRequest(_) => names::LOGOUT_REQUEST,
            Self::LogoutResponse(_) => names::LOGOUT_RESPONSE,
            Self::Assertion(_) => names::ASSERTION,
            Self::EntityDescriptor(_) => names::ENTITY_DESCRIPTOR,
            Self::EntitiesDescriptor(_) => names::ENTITIES_DESCRIPTOR,
            Self::XacmlAuthzDecisionQuery(_) => names::XACML_AUTHZ_DECISION_QUERY,
        }
    }

    /// Returns the message ID, for messages that carry one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::AuthnRequest(m) => Some(&m.id),
            Self::Response(m) => Some(&m.id),
            Self::LogoutRequest(m) => Some(&m.id),
            Self::LogoutResponse(m) => Some(&m.id),
            Self::Assertion(m) => Some(&m.id),
            Self::XacmlAuthzDecisionQuery(m) => Some(&m.id),
            Self::EntityDescriptor(m) => m.id.as_deref(),
            Self::EntitiesDescriptor(m) => m.id.as_deref(),
        }
    }

    /// Returns true if the codec can write this message back out.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(
            self,
            Self::AuthnRequest(_)
                | Self::Response(_)
                | Self::LogoutRequest(_)
                | Self::LogoutResponse(_)
                | Self::Assertion(_)
        )
    }
}

macro_rules! impl_from_message {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SamlMessage {
                fn from(message: $variant) -> Self {
                    Self::$variant(message)
                }
            }
        )*
    };
}

impl_from_message!(
    AuthnRequest,
    Response,
    LogoutRequest,
    LogoutResponse,
    Assertion,
    EntityDescriptor,
    EntitiesDescriptor,
    XacmlAuthzDecisionQuery,
);
