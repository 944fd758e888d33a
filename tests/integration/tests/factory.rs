//! Factory scenarios, checked on the wire.

use kc_saml_core::factory::{attribute_statement_from_map, attribute_statement_from_roles};
use kc_saml_core::{
    status_codes, Assertion, IdpInfo, IssuerInfo, NameId, NameIdFormat, SamlError, SamlMessage,
    SpInfo, X500Attribute,
};

use crate::common::codec;

fn issuer(code: &str) -> IssuerInfo {
    IssuerInfo::new(NameId::new("https://idp.example.com")).with_status_code(code)
}

#[test]
fn test_create_response_scenario() -> anyhow::Result<()> {
    let codec = codec()?;
    let response = codec.factory().create_response(
        "_resp1",
        &SpInfo::new("_req1", "https://sp/acs"),
        &IdpInfo::new(NameIdFormat::Persistent.uri(), "alice"),
        &issuer(status_codes::SUCCESS),
    )?;

    assert_eq!(response.in_response_to.as_deref(), Some("_req1"));
    assert_eq!(response.destination.as_deref(), Some("https://sp/acs"));
    assert_eq!(response.assertions.len(), 1);
    assert_eq!(
        response.assertions[0].subject_name_id().map(|n| n.value.as_str()),
        Some("alice")
    );

    // The built response is a valid wire message.
    let xml = codec.to_xml(&SamlMessage::Response(response.clone()))?;
    let SamlMessage::Response(parsed) = codec.parse_str(&xml)? else {
        anyhow::bail!("expected Response");
    };
    assert_eq!(parsed, response);
    Ok(())
}

#[test]
fn test_create_response_with_every_status() -> anyhow::Result<()> {
    let codec = codec()?;
    for code in [
        status_codes::SUCCESS,
        status_codes::REQUESTER,
        status_codes::RESPONDER,
        status_codes::VERSION_MISMATCH,
    ] {
        let assertion = Assertion::new("ID_fixed", NameId::new("https://idp.example.com"));
        let response =
            codec
                .factory()
                .create_response_with_assertion("_r", &issuer(code), assertion.clone())?;
        assert_eq!(response.status.status_code.value, code);
        assert_eq!(response.assertions.len(), 1);
        assert_eq!(response.assertions[0].id, assertion.id);
    }
    Ok(())
}

#[test]
fn test_missing_status_code_never_builds_a_response() -> anyhow::Result<()> {
    let codec = codec()?;
    let assertion = Assertion::new("ID_fixed", NameId::new("https://idp.example.com"));
    let err = codec
        .factory()
        .create_response_with_assertion(
            "_r",
            &IssuerInfo::new(NameId::new("https://idp.example.com")),
            assertion,
        )
        .unwrap_err();
    assert!(matches!(err, SamlError::Configuration(_)));
    Ok(())
}

#[test]
fn test_attribute_statement_scenario_on_the_wire() -> anyhow::Result<()> {
    let codec = codec()?;
    let statement = attribute_statement_from_map(vec![
        ("email".to_string(), vec!["a@b.com".to_string()]),
        (
            "roles".to_string(),
            vec!["admin".to_string(), "user".to_string()],
        ),
    ]);
    assert_eq!(statement.attributes.len(), 3);

    let mut response = codec.factory().create_response(
        "_resp2",
        &SpInfo::new("_req2", "https://sp/acs"),
        &IdpInfo::new(NameIdFormat::Email.uri(), "a@b.com"),
        &issuer(status_codes::SUCCESS),
    )?;
    response.assertions[0].attribute_statements.push(statement);

    let xml = codec.to_xml(&SamlMessage::Response(response))?;
    assert!(xml.contains(r#"xmlns:x500="urn:oasis:names:tc:SAML:2.0:profiles:attribute:X500""#));
    assert!(xml.contains(r#"x500:Encoding="LDAP""#));

    let SamlMessage::Response(parsed) = codec.parse_str(&xml)? else {
        anyhow::bail!("expected Response");
    };
    let attributes = &parsed.assertions[0].attribute_statements[0].attributes;
    let names: Vec<_> = attributes.iter().filter_map(|a| a.name.as_deref()).collect();
    assert_eq!(names, [X500Attribute::EmailAddress.name(), "role", "role"]);
    Ok(())
}

#[test]
fn test_unknown_attribute_key_cannot_be_written() -> anyhow::Result<()> {
    let codec = codec()?;
    let assertion = Assertion::new("ID_u", NameId::new("https://idp.example.com"))
        .with_attribute_statement(attribute_statement_from_map(vec![(
            "zipcode".to_string(),
            vec!["12345".to_string()],
        )]));
    let response = codec.factory().create_response_with_assertion(
        "_r",
        &issuer(status_codes::SUCCESS),
        assertion,
    )?;
    let err = codec.to_xml(&SamlMessage::Response(response)).unwrap_err();
    assert!(matches!(err, SamlError::Processing(_)));
    Ok(())
}

#[test]
fn test_roles_statement_on_the_wire() -> anyhow::Result<()> {
    let codec = codec()?;
    let assertion = Assertion::new("ID_roles", NameId::new("https://idp.example.com"))
        .with_attribute_statement(attribute_statement_from_roles(["viewer"]));
    let response = codec.factory().create_response_with_assertion(
        "_r",
        &issuer(status_codes::SUCCESS),
        assertion,
    )?;
    let xml = codec.to_xml(&SamlMessage::Response(response))?;
    assert!(xml.contains(r#"<saml:Attribute Name="role"><saml:AttributeValue>viewer</saml:AttributeValue></saml:Attribute>"#));
    Ok(())
}
