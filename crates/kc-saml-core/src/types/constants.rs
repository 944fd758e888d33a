//! SAML 2.0 constants and URIs.
//!
//! Contains namespace URIs, element names, binding URIs, name ID formats,
//! status codes and attribute profile names defined by SAML 2.0 and the
//! SAML profile of XACML.

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 protocol namespace URI.
pub const SAMLP_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// SAML 2.0 metadata namespace URI.
pub const MD_NS: &str = "urn:oasis:names:tc:SAML:2.0:metadata";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XML Encryption namespace URI.
pub const XMLENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";

/// XSI namespace URI.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// X.500/LDAP attribute profile namespace URI.
pub const X500_NS: &str = "urn:oasis:names:tc:SAML:2.0:profiles:attribute:X500";

/// SAML profile of XACML 2.0, protocol extension namespace URI.
pub const XACML_SAMLP_NS: &str = "urn:oasis:xacml:2.0:saml:protocol:schema:os";

/// XACML 2.0 request context namespace URI.
pub const XACML_CONTEXT_NS: &str = "urn:oasis:names:tc:xacml:2.0:context:schema:os";

/// Prefix bound to [`SAMLP_NS`] by the writers.
pub const SAMLP_PREFIX: &str = "samlp";

/// Prefix bound to [`SAML_NS`] by the writers.
pub const SAML_PREFIX: &str = "saml";

/// Prefix bound to [`X500_NS`] by the writers.
pub const X500_PREFIX: &str = "x500";

/// Prefix bound to [`XMLENC_NS`] by the writers.
pub const XENC_PREFIX: &str = "xenc";

/// Local names of the SAML elements and attributes the codec understands.
pub mod names {
    /// `<Assertion>`.
    pub const ASSERTION: &str = "Assertion";
    /// `<AuthnRequest>`.
    pub const AUTHN_REQUEST: &str = "AuthnRequest";
    /// `<Response>`.
    pub const RESPONSE: &str = "Response";
    /// `<LogoutRequest>`.
    pub const LOGOUT_REQUEST: &str = "LogoutRequest";
    /// `<LogoutResponse>`.
    pub const LOGOUT_RESPONSE: &str = "LogoutResponse";
    /// Abstract request element, as named by the XACML profile schema type.
    pub const REQUEST_ABSTRACT_TYPE: &str = "RequestAbstractType";
    /// Abstract request element, as it appears on the wire.
    pub const REQUEST_ABSTRACT: &str = "RequestAbstract";
    /// `<XACMLAuthzDecisionQuery>`.
    pub const XACML_AUTHZ_DECISION_QUERY: &str = "XACMLAuthzDecisionQuery";
    /// `xsi:type` local part of the XACML decision query.
    pub const XACML_AUTHZ_DECISION_QUERY_TYPE: &str = "XACMLAuthzDecisionQueryType";
    /// `<EntityDescriptor>`.
    pub const ENTITY_DESCRIPTOR: &str = "EntityDescriptor";
    /// `<EntitiesDescriptor>`.
    pub const ENTITIES_DESCRIPTOR: &str = "EntitiesDescriptor";
    /// `<Issuer>`.
    pub const ISSUER: &str = "Issuer";
    /// `<NameID>`.
    pub const NAME_ID: &str = "NameID";
    /// `<NameIDPolicy>`.
    pub const NAME_ID_POLICY: &str = "NameIDPolicy";
    /// `<Signature>`.
    pub const SIGNATURE: &str = "Signature";
    /// `<Extensions>`.
    pub const EXTENSIONS: &str = "Extensions";
    /// `<Status>`.
    pub const STATUS: &str = "Status";
    /// `<StatusCode>`.
    pub const STATUS_CODE: &str = "StatusCode";
    /// `<StatusMessage>`.
    pub const STATUS_MESSAGE: &str = "StatusMessage";
    /// `<StatusDetail>`.
    pub const STATUS_DETAIL: &str = "StatusDetail";
    /// `<EncryptedAssertion>`.
    pub const ENCRYPTED_ASSERTION: &str = "EncryptedAssertion";
    /// `<Subject>`.
    pub const SUBJECT: &str = "Subject";
    /// `<SubjectConfirmation>`.
    pub const SUBJECT_CONFIRMATION: &str = "SubjectConfirmation";
    /// `<SubjectConfirmationData>`.
    pub const SUBJECT_CONFIRMATION_DATA: &str = "SubjectConfirmationData";
    /// `<Conditions>`.
    pub const CONDITIONS: &str = "Conditions";
    /// `<AudienceRestriction>`.
    pub const AUDIENCE_RESTRICTION: &str = "AudienceRestriction";
    /// `<Audience>`.
    pub const AUDIENCE: &str = "Audience";
    /// `<OneTimeUse>`.
    pub const ONE_TIME_USE: &str = "OneTimeUse";
    /// `<ProxyRestriction>`.
    pub const PROXY_RESTRICTION: &str = "ProxyRestriction";
    /// `<AuthnStatement>`.
    pub const AUTHN_STATEMENT: &str = "AuthnStatement";
    /// `<AuthnContext>`.
    pub const AUTHN_CONTEXT: &str = "AuthnContext";
    /// `<AuthnContextClassRef>`.
    pub const AUTHN_CONTEXT_CLASS_REF: &str = "AuthnContextClassRef";
    /// `<AuthnContextDeclRef>`.
    pub const AUTHN_CONTEXT_DECL_REF: &str = "AuthnContextDeclRef";
    /// `<AuthenticatingAuthority>`.
    pub const AUTHENTICATING_AUTHORITY: &str = "AuthenticatingAuthority";
    /// `<SubjectLocality>`.
    pub const SUBJECT_LOCALITY: &str = "SubjectLocality";
    /// `<AttributeStatement>`.
    pub const ATTRIBUTE_STATEMENT: &str = "AttributeStatement";
    /// Advice element.
    pub const ADVICE: &str = "Advice";
    /// Generic Statement element.
    pub const STATEMENT: &str = "Statement";
    /// AuthzDecisionStatement element.
    pub const AUTHZ_DECISION_STATEMENT: &str = "AuthzDecisionStatement";
    /// Scoping element.
    pub const SCOPING: &str = "Scoping";
    /// `<Attribute>`.
    pub const ATTRIBUTE: &str = "Attribute";
    /// `<AttributeValue>`.
    pub const ATTRIBUTE_VALUE: &str = "AttributeValue";
    /// `<RequestedAuthnContext>`.
    pub const REQUESTED_AUTHN_CONTEXT: &str = "RequestedAuthnContext";
    /// `<SessionIndex>`.
    pub const SESSION_INDEX: &str = "SessionIndex";
    /// `<EncryptedData>`.
    pub const ENCRYPTED_DATA: &str = "EncryptedData";
    /// `<EncryptedKey>`.
    pub const ENCRYPTED_KEY: &str = "EncryptedKey";
    /// `<EncryptionMethod>`.
    pub const ENCRYPTION_METHOD: &str = "EncryptionMethod";
    /// `<CipherData>`.
    pub const CIPHER_DATA: &str = "CipherData";
    /// `<CipherValue>`.
    pub const CIPHER_VALUE: &str = "CipherValue";
    /// `<KeyInfo>`.
    pub const KEY_INFO: &str = "KeyInfo";

    /// `ID` attribute.
    pub const ID: &str = "ID";
    /// `Version` attribute.
    pub const VERSION: &str = "Version";
    /// `IssueInstant` attribute.
    pub const ISSUE_INSTANT: &str = "IssueInstant";
    /// `Destination` attribute.
    pub const DESTINATION: &str = "Destination";
    /// `Consent` attribute.
    pub const CONSENT: &str = "Consent";
    /// `InResponseTo` attribute.
    pub const IN_RESPONSE_TO: &str = "InResponseTo";
    /// `Format` attribute.
    pub const FORMAT: &str = "Format";
    /// `SPNameQualifier` attribute.
    pub const SP_NAME_QUALIFIER: &str = "SPNameQualifier";
    /// `NameQualifier` attribute.
    pub const NAME_QUALIFIER: &str = "NameQualifier";
    /// `SPProvidedID` attribute.
    pub const SP_PROVIDED_ID: &str = "SPProvidedID";
    /// `AllowCreate` attribute.
    pub const ALLOW_CREATE: &str = "AllowCreate";
    /// `Value` attribute.
    pub const VALUE: &str = "Value";
    /// `Method` attribute.
    pub const METHOD: &str = "Method";
    /// `NotBefore` attribute.
    pub const NOT_BEFORE: &str = "NotBefore";
    /// `NotOnOrAfter` attribute.
    pub const NOT_ON_OR_AFTER: &str = "NotOnOrAfter";
    /// `Recipient` attribute.
    pub const RECIPIENT: &str = "Recipient";
    /// `Address` attribute.
    pub const ADDRESS: &str = "Address";
    /// `Count` attribute.
    pub const COUNT: &str = "Count";
    /// `AuthnInstant` attribute.
    pub const AUTHN_INSTANT: &str = "AuthnInstant";
    /// `SessionNotOnOrAfter` attribute.
    pub const SESSION_NOT_ON_OR_AFTER: &str = "SessionNotOnOrAfter";
    /// `DNSName` attribute.
    pub const DNS_NAME: &str = "DNSName";
    /// `Name` attribute.
    pub const NAME: &str = "Name";
    /// `NameFormat` attribute.
    pub const NAME_FORMAT: &str = "NameFormat";
    /// `FriendlyName` attribute.
    pub const FRIENDLY_NAME: &str = "FriendlyName";
    /// `Encoding` attribute of the X.500 attribute profile.
    pub const ENCODING: &str = "Encoding";
    /// `AssertionConsumerServiceURL` attribute.
    pub const ASSERTION_CONSUMER_SERVICE_URL: &str = "AssertionConsumerServiceURL";
    /// `AssertionConsumerServiceIndex` attribute.
    pub const ASSERTION_CONSUMER_SERVICE_INDEX: &str = "AssertionConsumerServiceIndex";
    /// `AttributeConsumingServiceIndex` attribute.
    pub const ATTRIBUTE_CONSUMING_SERVICE_INDEX: &str = "AttributeConsumingServiceIndex";
    /// `ProtocolBinding` attribute.
    pub const PROTOCOL_BINDING: &str = "ProtocolBinding";
    /// `ProviderName` attribute.
    pub const PROVIDER_NAME: &str = "ProviderName";
    /// `ForceAuthn` attribute.
    pub const FORCE_AUTHN: &str = "ForceAuthn";
    /// `IsPassive` attribute.
    pub const IS_PASSIVE: &str = "IsPassive";
    /// `Comparison` attribute.
    pub const COMPARISON: &str = "Comparison";
    /// `Reason` attribute.
    pub const REASON: &str = "Reason";
    /// `Algorithm` attribute.
    pub const ALGORITHM: &str = "Algorithm";
    /// `type` attribute in the XSI namespace.
    pub const XSI_TYPE: &str = "type";

    // Metadata
    /// IDPSSODescriptor element.
    pub const IDP_SSO_DESCRIPTOR: &str = "IDPSSODescriptor";
    /// SPSSODescriptor element.
    pub const SP_SSO_DESCRIPTOR: &str = "SPSSODescriptor";
    /// AffiliationDescriptor element (not a role).
    pub const AFFILIATION_DESCRIPTOR: &str = "AffiliationDescriptor";
    /// KeyDescriptor element.
    pub const KEY_DESCRIPTOR: &str = "KeyDescriptor";
    /// X509Data element.
    pub const X509_DATA: &str = "X509Data";
    /// X509Certificate element.
    pub const X509_CERTIFICATE: &str = "X509Certificate";
    /// NameIDFormat element.
    pub const NAME_ID_FORMAT: &str = "NameIDFormat";
    /// SingleSignOnService element.
    pub const SINGLE_SIGN_ON_SERVICE: &str = "SingleSignOnService";
    /// SingleLogoutService element.
    pub const SINGLE_LOGOUT_SERVICE: &str = "SingleLogoutService";
    /// AssertionConsumerService element.
    pub const ASSERTION_CONSUMER_SERVICE: &str = "AssertionConsumerService";
    /// entityID attribute.
    pub const ENTITY_ID: &str = "entityID";
    /// validUntil attribute.
    pub const VALID_UNTIL: &str = "validUntil";
    /// cacheDuration attribute.
    pub const CACHE_DURATION: &str = "cacheDuration";
    /// protocolSupportEnumeration attribute.
    pub const PROTOCOL_SUPPORT_ENUMERATION: &str = "protocolSupportEnumeration";
    /// WantAuthnRequestsSigned attribute.
    pub const WANT_AUTHN_REQUESTS_SIGNED: &str = "WantAuthnRequestsSigned";
    /// AuthnRequestsSigned attribute.
    pub const AUTHN_REQUESTS_SIGNED: &str = "AuthnRequestsSigned";
    /// WantAssertionsSigned attribute.
    pub const WANT_ASSERTIONS_SIGNED: &str = "WantAssertionsSigned";
    /// Binding attribute.
    pub const BINDING: &str = "Binding";
    /// Location attribute.
    pub const LOCATION: &str = "Location";
    /// ResponseLocation attribute.
    pub const RESPONSE_LOCATION: &str = "ResponseLocation";
    /// index attribute.
    pub const INDEX: &str = "index";
    /// isDefault attribute.
    pub const IS_DEFAULT: &str = "isDefault";
    /// use attribute.
    pub const USE: &str = "use";

    // XACML
    /// XACML context Request element.
    pub const REQUEST: &str = "Request";
    /// XACML Resource element.
    pub const RESOURCE: &str = "Resource";
    /// XACML ResourceContent element.
    pub const RESOURCE_CONTENT: &str = "ResourceContent";
    /// XACML Action element.
    pub const ACTION: &str = "Action";
    /// XACML Environment element.
    pub const ENVIRONMENT: &str = "Environment";
    /// XACML AttributeId attribute.
    pub const ATTRIBUTE_ID: &str = "AttributeId";
    /// XACML DataType attribute.
    pub const DATA_TYPE: &str = "DataType";
    /// XACML SubjectCategory attribute.
    pub const SUBJECT_CATEGORY: &str = "SubjectCategory";
    /// InputContextOnly attribute.
    pub const INPUT_CONTEXT_ONLY: &str = "InputContextOnly";
    /// ReturnContext attribute.
    pub const RETURN_CONTEXT: &str = "ReturnContext";
}

// ============================================================================
// Binding URIs
// ============================================================================

/// SAML binding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamlBinding {
    /// HTTP POST binding.
    HttpPost,
    /// HTTP Redirect binding.
    HttpRedirect,
    /// HTTP Artifact binding.
    HttpArtifact,
    /// SOAP binding.
    Soap,
}

impl SamlBinding {
    /// Returns the URI for this binding.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::HttpPost => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST",
            Self::HttpRedirect => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect",
            Self::HttpArtifact => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact",
            Self::Soap => "urn:oasis:names:tc:SAML:2.0:bindings:SOAP",
        }
    }

    /// Parses a binding from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" => Some(Self::HttpPost),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" => Some(Self::HttpRedirect),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact" => Some(Self::HttpArtifact),
            "urn:oasis:names:tc:SAML:2.0:bindings:SOAP" => Some(Self::Soap),
            _ => None,
        }
    }
}

// ============================================================================
// Name ID Formats
// ============================================================================

/// SAML Name ID formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameIdFormat {
    /// Unspecified name ID format.
    #[default]
    Unspecified,
    /// Email address format.
    Email,
    /// X.509 subject name format.
    X509SubjectName,
    /// Windows domain qualified name format.
    WindowsDomainQualifiedName,
    /// Kerberos principal name format.
    Kerberos,
    /// Entity identifier format.
    Entity,
    /// Persistent identifier format.
    Persistent,
    /// Transient identifier format.
    Transient,
}

impl NameIdFormat {
    /// Returns the URI for this name ID format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified",
            Self::Email => "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            Self::X509SubjectName => "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName",
            Self::WindowsDomainQualifiedName => {
                "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName"
            }
            Self::Kerberos => "urn:oasis:names:tc:SAML:2.0:nameid-format:kerberos",
            Self::Entity => "urn:oasis:names:tc:SAML:2.0:nameid-format:entity",
            Self::Persistent => "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
            Self::Transient => "urn:oasis:names:tc:SAML:2.0:nameid-format:transient",
        }
    }

    /// Parses a name ID format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress" => Some(Self::Email),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName" => {
                Some(Self::X509SubjectName)
            }
            "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName" => {
                Some(Self::WindowsDomainQualifiedName)
            }
            "urn:oasis:names:tc:SAML:2.0:nameid-format:kerberos" => Some(Self::Kerberos),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:entity" => Some(Self::Entity),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent" => Some(Self::Persistent),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:transient" => Some(Self::Transient),
            _ => None,
        }
    }
}

// ============================================================================
// Authentication Context Classes
// ============================================================================

/// SAML authentication context class references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthnContextClass {
    /// Unspecified authentication context.
    #[default]
    Unspecified,
    /// Password-based authentication.
    Password,
    /// Password protected transport (TLS + password).
    PasswordProtectedTransport,
    /// X.509 certificate authentication.
    X509,
    /// Kerberos authentication.
    Kerberos,
    /// Previous session (SSO).
    PreviousSession,
}

impl AuthnContextClass {
    /// Returns the URI for this authentication context class.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:2.0:ac:classes:unspecified",
            Self::Password => "urn:oasis:names:tc:SAML:2.0:ac:classes:Password",
            Self::PasswordProtectedTransport => {
                "urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport"
            }
            Self::X509 => "urn:oasis:names:tc:SAML:2.0:ac:classes:X509",
            Self::Kerberos => "urn:oasis:names:tc:SAML:2.0:ac:classes:Kerberos",
            Self::PreviousSession => "urn:oasis:names:tc:SAML:2.0:ac:classes:PreviousSession",
        }
    }

    /// Parses an authentication context class from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:ac:classes:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:2.0:ac:classes:Password" => Some(Self::Password),
            "urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport" => {
                Some(Self::PasswordProtectedTransport)
            }
            "urn:oasis:names:tc:SAML:2.0:ac:classes:X509" => Some(Self::X509),
            "urn:oasis:names:tc:SAML:2.0:ac:classes:Kerberos" => Some(Self::Kerberos),
            "urn:oasis:names:tc:SAML:2.0:ac:classes:PreviousSession" => Some(Self::PreviousSession),
            _ => None,
        }
    }
}

// ============================================================================
// Status Codes
// ============================================================================

/// Top-level SAML status codes.
pub mod status_codes {
    /// Success status code.
    pub const SUCCESS: &str = "urn:oasis:names:tc:SAML:2.0:status:Success";

    /// Requester error status code.
    pub const REQUESTER: &str = "urn:oasis:names:tc:SAML:2.0:status:Requester";

    /// Responder error status code.
    pub const RESPONDER: &str = "urn:oasis:names:tc:SAML:2.0:status:Responder";

    /// Version mismatch status code.
    pub const VERSION_MISMATCH: &str = "urn:oasis:names:tc:SAML:2.0:status:VersionMismatch";
}

/// Subject confirmation methods.
pub mod confirmation_methods {
    /// Bearer confirmation method URI.
    pub const BEARER: &str = "urn:oasis:names:tc:SAML:2.0:cm:bearer";

    /// Holder of key confirmation method URI.
    pub const HOLDER_OF_KEY: &str = "urn:oasis:names:tc:SAML:2.0:cm:holder-of-key";

    /// Sender vouches confirmation method URI.
    pub const SENDER_VOUCHES: &str = "urn:oasis:names:tc:SAML:2.0:cm:sender-vouches";
}

/// Attribute name formats.
pub mod attribute_name_formats {
    /// URI name format.
    pub const URI: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:uri";

    /// Basic name format.
    pub const BASIC: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:basic";

    /// Unspecified name format.
    pub const UNSPECIFIED: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified";
}

// ============================================================================
// X.500 Attribute Profile
// ============================================================================

/// Attributes of the SAML X.500/LDAP attribute profile understood by the
/// statement builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum X500Attribute {
    /// `mail`.
    EmailAddress,
    /// `employeeNumber`.
    EmployeeNumber,
    /// `givenName`.
    GivenName,
    /// `telephoneNumber`.
    Telephone,
}

impl X500Attribute {
    /// Returns the formal (OID) attribute name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EmailAddress => "urn:oid:0.9.2342.19200300.100.1.3",
            Self::EmployeeNumber => "urn:oid:2.16.840.1.113730.3.1.3",
            Self::GivenName => "urn:oid:2.5.4.42",
            Self::Telephone => "urn:oid:2.5.4.20",
        }
    }

    /// Returns the LDAP friendly name.
    #[must_use]
    pub const fn friendly_name(&self) -> &'static str {
        match self {
            Self::EmailAddress => "mail",
            Self::EmployeeNumber => "employeeNumber",
            Self::GivenName => "givenName",
            Self::Telephone => "telephoneNumber",
        }
    }

    /// Maps an attribute map key to its profile attribute.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            attribute_keys::EMAIL_ADDRESS => Some(Self::EmailAddress),
            attribute_keys::EMPLOYEE_NUMBER => Some(Self::EmployeeNumber),
            attribute_keys::GIVEN_NAME => Some(Self::GivenName),
            attribute_keys::TELEPHONE => Some(Self::Telephone),
            _ => None,
        }
    }
}

/// Keys recognized by [`crate::factory::attribute_statement_from_map`].
pub mod attribute_keys {
    /// Email address.
    pub const EMAIL_ADDRESS: &str = "email";
    /// Employee number.
    pub const EMPLOYEE_NUMBER: &str = "employeeNumber";
    /// Given name.
    pub const GIVEN_NAME: &str = "givenName";
    /// Telephone number.
    pub const TELEPHONE: &str = "telephone";
    /// Role list; matched case-insensitively.
    pub const ROLES: &str = "roles";
    /// Name of the attribute carrying a single role.
    pub const ROLE_ATTRIBUTE_NAME: &str = "role";
    /// Value of `x500:Encoding` on profile attributes.
    pub const X500_ENCODING_LDAP: &str = "LDAP";
}
