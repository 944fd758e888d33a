//! Parse, write, parse again: modeled fields must survive.

use kc_saml_core::xml::{BufferedEvents, XmlEventReader};
use kc_saml_core::{SamlCodec, SamlConfig, SamlMessage};

use crate::common::{codec, init_tracing, AUTHN_REQUEST, LOGOUT_REQUEST, RESPONSE};

fn assert_round_trip(codec: &SamlCodec, xml: &str) -> anyhow::Result<String> {
    let original = codec.parse_str(xml)?;
    let written = codec.to_xml(&original)?;
    let reparsed = codec.parse_str(&written)?;
    assert_eq!(reparsed, original, "written form:\n{written}");
    Ok(written)
}

#[test]
fn test_authn_request_round_trip() -> anyhow::Result<()> {
    let written = assert_round_trip(&codec()?, AUTHN_REQUEST)?;
    // The signature is not part of the model.
    assert!(!written.contains("Signature"));
    Ok(())
}

#[test]
fn test_response_round_trip() -> anyhow::Result<()> {
    let written = assert_round_trip(&codec()?, RESPONSE)?;
    assert_eq!(written.matches("xmlns:saml=").count(), 1);
    Ok(())
}

#[test]
fn test_logout_request_round_trip() -> anyhow::Result<()> {
    assert_round_trip(&codec()?, LOGOUT_REQUEST)?;
    Ok(())
}

#[test]
fn test_logout_response_round_trip() -> anyhow::Result<()> {
    let xml = r#"<samlp:LogoutResponse xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
        xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
        ID="_lr1" Version="2.0" IssueInstant="2024-01-15T11:00:01Z" InResponseTo="_lo1">
        <saml:Issuer>https://idp.example.com</saml:Issuer>
        <samlp:Status>
            <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Responder">
                <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:PartialLogout"/>
            </samlp:StatusCode>
            <samlp:StatusMessage>session already gone</samlp:StatusMessage>
        </samlp:Status>
    </samlp:LogoutResponse>"#;
    let written = assert_round_trip(&codec()?, xml)?;
    // Nested status codes are not modeled.
    assert!(!written.contains("PartialLogout"));
    Ok(())
}

#[test]
fn test_standalone_assertion_round_trip() -> anyhow::Result<()> {
    let codec = codec()?;
    let SamlMessage::Response(response) = codec.parse_str(RESPONSE)? else {
        anyhow::bail!("expected Response");
    };
    let assertion = response.first_assertion().expect("assertion").clone();

    let written = codec.to_xml(&SamlMessage::Assertion(assertion.clone()))?;
    assert!(written.starts_with(
        r#"<saml:Assertion xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion""#
    ));
    assert_eq!(codec.parse_str(&written)?, SamlMessage::Assertion(assertion));
    Ok(())
}

#[test]
fn test_indented_output_parses_back() -> anyhow::Result<()> {
    init_tracing();
    let codec = SamlCodec::new(SamlConfig {
        indent: Some(4),
        ..SamlConfig::default()
    })?;
    let written = assert_round_trip(&codec, AUTHN_REQUEST)?;
    assert!(written.contains("\n    <saml:Issuer>"));
    Ok(())
}

#[test]
fn test_buffered_events_round_trip() -> anyhow::Result<()> {
    let codec = codec()?;
    let original = codec.parse_str(LOGOUT_REQUEST)?;

    let mut buffer = BufferedEvents::new();
    codec.write(&original, &mut buffer)?;
    assert!(!buffer.is_empty());
    assert_eq!(codec.parse(&mut buffer)?, original);

    // The same events can be captured from a reader and replayed.
    let mut replay = BufferedEvents::drain_from(&mut XmlEventReader::from_str(LOGOUT_REQUEST))?;
    assert_eq!(codec.parse(&mut replay)?, original);
    Ok(())
}
