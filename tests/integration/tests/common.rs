//! Common test utilities and fixtures.

use kc_saml_core::{SamlCodec, SamlConfig};

/// Installs a test subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kc_saml_core=debug")
        .with_test_writer()
        .try_init();
}

/// A codec with default configuration.
pub fn codec() -> anyhow::Result<SamlCodec> {
    init_tracing();
    Ok(SamlCodec::new(SamlConfig::default())?)
}

/// An SP-initiated login request.
pub const AUTHN_REQUEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
    xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
    ID="_req1" Version="2.0" IssueInstant="2024-01-15T10:30:00Z"
    Destination="https://idp.example.com/sso"
    AssertionConsumerServiceURL="https://sp.example.com/acs"
    ProtocolBinding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"
    IsPassive="false">
    <saml:Issuer>https://sp.example.com</saml:Issuer>
    <ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#">
        <ds:SignedInfo/>
    </ds:Signature>
    <samlp:NameIDPolicy Format="urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress"
        AllowCreate="true"/>
    <samlp:RequestedAuthnContext Comparison="minimum">
        <saml:AuthnContextClassRef>urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport</saml:AuthnContextClassRef>
    </samlp:RequestedAuthnContext>
</samlp:AuthnRequest>"#;

/// A successful response carrying one assertion.
pub const RESPONSE: &str = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
    xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
    ID="_resp1" Version="2.0" IssueInstant="2024-01-15T10:30:05Z"
    InResponseTo="_req1" Destination="https://sp.example.com/acs">
    <saml:Issuer>https://idp.example.com</saml:Issuer>
    <samlp:Status>
        <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Success"/>
    </samlp:Status>
    <saml:Assertion ID="_a1" Version="2.0" IssueInstant="2024-01-15T10:30:05Z">
        <saml:Issuer>https://idp.example.com</saml:Issuer>
        <saml:Subject>
            <saml:NameID Format="urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress">alice@example.com</saml:NameID>
            <saml:SubjectConfirmation Method="urn:oasis:names:tc:SAML:2.0:cm:bearer">
                <saml:SubjectConfirmationData InResponseTo="_req1"
                    Recipient="https://sp.example.com/acs"
                    NotOnOrAfter="2024-01-15T10:35:05Z"/>
            </saml:SubjectConfirmation>
        </saml:Subject>
        <saml:AuthnStatement AuthnInstant="2024-01-15T10:30:00Z" SessionIndex="_s1">
            <saml:AuthnContext>
                <saml:AuthnContextClassRef>urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport</saml:AuthnContextClassRef>
            </saml:AuthnContext>
        </saml:AuthnStatement>
    </saml:Assertion>
</samlp:Response>"#;

/// A user-initiated logout.
pub const LOGOUT_REQUEST: &str = r#"<samlp:LogoutRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
    xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
    ID="_lo1" Version="2.0" IssueInstant="2024-01-15T11:00:00Z"
    Reason="urn:oasis:names:tc:SAML:2.0:logout:user">
    <saml:Issuer>https://sp.example.com</saml:Issuer>
    <saml:NameID>alice@example.com</saml:NameID>
    <samlp:SessionIndex>_s1</samlp:SessionIndex>
</samlp:LogoutRequest>"#;

/// A federation with one IdP and one SP.
pub const METADATA: &str = r#"<md:EntitiesDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
    xmlns:ds="http://www.w3.org/2000/09/xmldsig#" Name="urn:example:federation">
    <md:EntityDescriptor entityID="https://idp.example.com">
        <md:IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
            <md:KeyDescriptor use="signing">
                <ds:KeyInfo><ds:X509Data><ds:X509Certificate>MIIBsigning</ds:X509Certificate></ds:X509Data></ds:KeyInfo>
            </md:KeyDescriptor>
            <md:NameIDFormat>urn:oasis:names:tc:SAML:2.0:nameid-format:persistent</md:NameIDFormat>
            <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect"
                Location="https://idp.example.com/sso"/>
        </md:IDPSSODescriptor>
        <md:Organization><md:OrganizationName>Example</md:OrganizationName></md:Organization>
    </md:EntityDescriptor>
    <md:EntityDescriptor entityID="https://sp.example.com">
        <md:SPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol"
            WantAssertionsSigned="true">
            <md:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"
                Location="https://sp.example.com/acs" index="0" isDefault="true"/>
        </md:SPSSODescriptor>
    </md:EntityDescriptor>
</md:EntitiesDescriptor>"#;

/// An XACML decision query wrapped as a typed abstract request.
pub const XACML_QUERY: &str = r#"<samlp:RequestAbstractType
    xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:xacml-samlp="urn:oasis:xacml:2.0:saml:protocol:schema:os"
    xmlns:xacml-context="urn:oasis:names:tc:xacml:2.0:context:schema:os"
    xsi:type="xacml-samlp:XACMLAuthzDecisionQueryType"
    ID="_x1" Version="2.0" IssueInstant="2024-01-15T12:00:00Z">
    <xacml-context:Request>
        <xacml-context:Subject>
            <xacml-context:Attribute AttributeId="urn:oasis:names:tc:xacml:1.0:subject:subject-id"
                DataType="http://www.w3.org/2001/XMLSchema#string">
                <xacml-context:AttributeValue>alice</xacml-context:AttributeValue>
            </xacml-context:Attribute>
        </xacml-context:Subject>
        <xacml-context:Action>
            <xacml-context:Attribute AttributeId="urn:oasis:names:tc:xacml:1.0:action:action-id"
                DataType="http://www.w3.org/2001/XMLSchema#string">
                <xacml-context:AttributeValue>read</xacml-context:AttributeValue>
            </xacml-context:Attribute>
        </xacml-context:Action>
    </xacml-context:Request>
</samlp:RequestAbstractType>"#;
