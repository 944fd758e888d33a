//! Dispatch tests: one document in, the right message kind out.

use kc_saml_core::xml::XmlEventReader;
use kc_saml_core::{ErrorKind, LogoutRequest, NameIdFormat, SamlError, SamlMessage};

use crate::common::{codec, AUTHN_REQUEST, LOGOUT_REQUEST, RESPONSE, XACML_QUERY};

#[test]
fn test_authn_request_is_dispatched() -> anyhow::Result<()> {
    let message = codec()?.parse_str(AUTHN_REQUEST)?;
    let SamlMessage::AuthnRequest(request) = message else {
        anyhow::bail!("expected AuthnRequest, got <{}>", message.element_name());
    };

    assert_eq!(request.id, "_req1");
    assert_eq!(
        request.issuer.as_ref().map(|i| i.value.as_str()),
        Some("https://sp.example.com")
    );
    assert_eq!(request.is_passive, Some(false));
    let policy = request.name_id_policy.as_ref().expect("NameIDPolicy");
    assert_eq!(policy.parsed_format(), Some(NameIdFormat::Email));
    assert_eq!(policy.allow_create, Some(true));
    Ok(())
}

#[test]
fn test_response_is_dispatched() -> anyhow::Result<()> {
    let message = codec()?.parse_str(RESPONSE)?;
    let SamlMessage::Response(response) = message else {
        anyhow::bail!("expected Response, got <{}>", message.element_name());
    };

    assert!(response.is_success());
    assert_eq!(response.in_response_to.as_deref(), Some("_req1"));
    let assertion = response.first_assertion().expect("assertion");
    assert_eq!(
        assertion.subject_name_id().map(|n| n.value.as_str()),
        Some("alice@example.com")
    );
    Ok(())
}

#[test]
fn test_logout_request_is_dispatched() -> anyhow::Result<()> {
    let message = codec()?.parse_str(LOGOUT_REQUEST)?;
    let SamlMessage::LogoutRequest(request) = message else {
        anyhow::bail!("expected LogoutRequest, got <{}>", message.element_name());
    };
    assert_eq!(request.reason.as_deref(), Some(LogoutRequest::REASON_USER));
    assert_eq!(request.session_indexes, vec!["_s1"]);
    Ok(())
}

#[test]
fn test_xacml_query_via_xsi_type() -> anyhow::Result<()> {
    let message = codec()?.parse_str(XACML_QUERY)?;
    let SamlMessage::XacmlAuthzDecisionQuery(query) = message else {
        anyhow::bail!("expected XACML query, got <{}>", message.element_name());
    };
    assert_eq!(query.id, "_x1");
    assert_eq!(
        query
            .request
            .subject_attribute("urn:oasis:names:tc:xacml:1.0:subject:subject-id"),
        Some("alice")
    );
    assert_eq!(
        query
            .request
            .action_attribute("urn:oasis:names:tc:xacml:1.0:action:action-id"),
        Some("read")
    );
    Ok(())
}

#[test]
fn test_assertion_in_foreign_namespace_goes_to_assertion_grammar() -> anyhow::Result<()> {
    let xml = r#"<ex:Assertion xmlns:ex="urn:example:not-saml"
        ID="_a9" Version="2.0" IssueInstant="2024-01-15T10:30:00Z">
        <ex:Issuer>https://idp.example.com</ex:Issuer>
    </ex:Assertion>"#;
    let message = codec()?.parse_str(xml)?;
    assert!(matches!(message, SamlMessage::Assertion(_)));
    assert_eq!(message.id(), Some("_a9"));
    Ok(())
}

#[test]
fn test_unknown_xsi_type_names_the_value() -> anyhow::Result<()> {
    let xml = r#"<samlp:RequestAbstractType
        xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xsi:type="ex:AttributeQueryType"
        ID="_q" Version="2.0" IssueInstant="2024-01-15T10:30:00Z"/>"#;
    let err = codec()?.parse_str(xml).unwrap_err();
    assert!(matches!(err, SamlError::UnknownXsiType(_)));
    assert!(err.to_string().contains("ex:AttributeQueryType"));
    assert_eq!(err.kind(), ErrorKind::Parsing);
    Ok(())
}

#[test]
fn test_unknown_top_level_element() -> anyhow::Result<()> {
    let err = codec()?
        .parse_str(r#"<html xmlns="http://www.w3.org/1999/xhtml"><body/></html>"#)
        .unwrap_err();
    assert!(matches!(err, SamlError::UnknownTag(_)));
    Ok(())
}

#[test]
fn test_empty_document_is_exhausted() -> anyhow::Result<()> {
    let err = codec()?.parse_str("<!-- nothing -->").unwrap_err();
    assert!(matches!(err, SamlError::ParsingExhausted(_)));
    Ok(())
}

#[test]
fn test_missing_required_attribute_names_attribute_and_element() -> anyhow::Result<()> {
    let xml = r#"<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
        ID="_r" Version="2.0"/>"#;
    let err = codec()?.parse_str(xml).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("IssueInstant"), "{message}");
    assert!(message.contains("AuthnRequest"), "{message}");
    Ok(())
}

#[test]
fn test_strict_grammar_rejects_unknown_child() -> anyhow::Result<()> {
    let xml = r#"<samlp:LogoutResponse xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
        ID="_lr" Version="2.0" IssueInstant="2024-01-15T10:30:00Z">
        <samlp:Status><samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Success"/></samlp:Status>
        <samlp:Surprise/>
    </samlp:LogoutResponse>"#;
    let err = codec()?.parse_str(xml).unwrap_err();
    assert!(matches!(err, SamlError::UnknownTag(_)));
    Ok(())
}

#[test]
fn test_parse_leaves_following_content_unread() -> anyhow::Result<()> {
    let codec = codec()?;
    let document = format!("{LOGOUT_REQUEST}{LOGOUT_REQUEST}");
    let mut reader = XmlEventReader::from_str(&document);

    let first = codec.parse(&mut reader)?;
    assert_eq!(first.id(), Some("_lo1"));
    let second = codec.parse(&mut reader)?;
    assert_eq!(second.id(), Some("_lo1"));
    assert!(matches!(
        codec.parse(&mut reader),
        Err(SamlError::ParsingExhausted(_))
    ));
    Ok(())
}

const ERROR_RESPONSE: &str = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
    ID="_err1" Version="2.0" IssueInstant="2024-01-15T10:30:05Z">
    <samlp:Status>
        <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Requester"/>
    </samlp:Status>
</samlp:Response>"#;

#[test]
fn test_response_without_assertion_is_rejected_whatever_the_status() -> anyhow::Result<()> {
    let err = codec()?.parse_str(ERROR_RESPONSE).unwrap_err();
    assert!(matches!(err, SamlError::MissingElement(_)));
    assert_eq!(err.kind(), ErrorKind::Parsing);
    Ok(())
}

#[test]
fn test_repeated_status_is_rejected() -> anyhow::Result<()> {
    let requester = r#"<samlp:Status><samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Requester"/></samlp:Status>
    <saml:Assertion"#;
    let tampered = RESPONSE.replacen("<saml:Assertion", requester, 1);
    let err = codec()?.parse_str(&tampered).unwrap_err();
    assert!(matches!(err, SamlError::UnknownTag(ref m) if m.contains("duplicate Status")));
    Ok(())
}
