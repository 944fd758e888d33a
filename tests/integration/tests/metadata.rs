//! Metadata documents through the dispatcher.

use kc_saml_core::{RoleKind, SamlBinding, SamlError, SamlMessage};

use crate::common::{codec, METADATA};

#[test]
fn test_federation_metadata() -> anyhow::Result<()> {
    let SamlMessage::EntitiesDescriptor(federation) = codec()?.parse_str(METADATA)? else {
        anyhow::bail!("expected EntitiesDescriptor");
    };
    assert_eq!(federation.name.as_deref(), Some("urn:example:federation"));
    assert_eq!(federation.entities().len(), 2);

    let idp = federation
        .find_entity("https://idp.example.com")
        .and_then(|e| e.idp_sso_descriptor())
        .expect("IdP role");
    assert_eq!(idp.kind, RoleKind::IdpSso);
    assert_eq!(
        idp.sso_endpoint(SamlBinding::HttpRedirect).map(|e| e.location.as_str()),
        Some("https://idp.example.com/sso")
    );
    assert_eq!(idp.signing_certificates().collect::<Vec<_>>(), ["MIIBsigning"]);

    let sp = federation
        .find_entity("https://sp.example.com")
        .and_then(|e| e.sp_sso_descriptor())
        .expect("SP role");
    assert_eq!(sp.want_assertions_signed, Some(true));
    assert_eq!(
        sp.default_acs().map(|e| e.location.as_str()),
        Some("https://sp.example.com/acs")
    );
    Ok(())
}

#[test]
fn test_metadata_is_read_only() -> anyhow::Result<()> {
    let codec = codec()?;
    let message = codec.parse_str(METADATA)?;
    assert!(!message.is_writable());
    assert!(matches!(
        codec.to_xml(&message),
        Err(SamlError::Processing(_))
    ));
    Ok(())
}

#[test]
fn test_entity_requires_entity_id() -> anyhow::Result<()> {
    let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"/>"#;
    let err = codec()?.parse_str(xml).unwrap_err();
    assert!(matches!(err, SamlError::MissingAttribute { .. }));
    Ok(())
}
