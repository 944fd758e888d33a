//! Metadata grammars: `EntityDescriptor` and `EntitiesDescriptor`.

use super::util::{element_text, expect_end, expect_start, next_child, next_start, skip_element};
use super::ElementParser;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, EntitiesDescriptor, EntityDescriptor, Endpoint, KeyDescriptor, MetadataEntry,
    RoleDescriptor, RoleKind, MD_NS,
};
use crate::xml::{EventCursor, QualifiedName};

/// Deepest nesting accepted for `EntitiesDescriptor` groups and for the
/// `KeyInfo`/`X509Data` wrappers around certificates.
pub const MAX_NESTING_DEPTH: usize = 32;

fn too_deep(local: &str) -> SamlError {
    SamlError::XmlParse(format!(
        "<{local}> nested deeper than {MAX_NESTING_DEPTH} levels"
    ))
}

/// Parses `md:EntityDescriptor`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityDescriptorParser;

impl ElementParser for EntityDescriptorParser {
    type Output = EntityDescriptor;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<EntityDescriptor> {
        let start = expect_start(cursor, names::ENTITY_DESCRIPTOR)?;
        let mut entity = EntityDescriptor::new(start.required(names::ENTITY_ID)?);
        entity.id = start.optional(names::ID);
        entity.valid_until = start.optional_instant(names::VALID_UNTIL)?;
        entity.cache_duration = start.optional(names::CACHE_DURATION);

        while let Some(child) = next_child(cursor, names::ENTITY_DESCRIPTOR)? {
            if is_role_descriptor(&child) {
                entity.role_descriptors.push(parse_role_descriptor(cursor)?);
            } else {
                // Signature, Extensions, Organization, ContactPerson, ...
                skip_element(cursor)?;
            }
        }
        expect_end(cursor, names::ENTITY_DESCRIPTOR)?;
        Ok(entity)
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(MD_NS, names::ENTITY_DESCRIPTOR)
    }
}

/// Parses `md:EntitiesDescriptor`, including nested groups up to
/// [`MAX_NESTING_DEPTH`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitiesDescriptorParser;

impl ElementParser for EntitiesDescriptorParser {
    type Output = EntitiesDescriptor;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<EntitiesDescriptor> {
        parse_group(cursor, 1)
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(MD_NS, names::ENTITIES_DESCRIPTOR)
    }
}

fn parse_group(cursor: &mut dyn EventCursor, depth: usize) -> SamlResult<EntitiesDescriptor> {
    if depth > MAX_NESTING_DEPTH {
        return Err(too_deep(names::ENTITIES_DESCRIPTOR));
    }
    let start = expect_start(cursor, names::ENTITIES_DESCRIPTOR)?;
    let mut group = EntitiesDescriptor {
        name: start.optional(names::NAME),
        id: start.optional(names::ID),
        valid_until: start.optional_instant(names::VALID_UNTIL)?,
        cache_duration: start.optional(names::CACHE_DURATION),
        entries: Vec::new(),
    };

    while let Some(child) = next_child(cursor, names::ENTITIES_DESCRIPTOR)? {
        match child.local_name.as_str() {
            names::ENTITY_DESCRIPTOR => group
                .entries
                .push(MetadataEntry::Entity(EntityDescriptorParser.parse(cursor)?)),
            names::ENTITIES_DESCRIPTOR => group
                .entries
                .push(MetadataEntry::Entities(parse_group(cursor, depth + 1)?)),
            _ => skip_element(cursor)?,
        }
    }
    expect_end(cursor, names::ENTITIES_DESCRIPTOR)?;
    Ok(group)
}

fn is_role_descriptor(name: &QualifiedName) -> bool {
    name.local_name.ends_with("Descriptor") && name.local_name != names::AFFILIATION_DESCRIPTOR
}

fn parse_role_descriptor(cursor: &mut dyn EventCursor) -> SamlResult<RoleDescriptor> {
    let start = next_start(cursor)?;
    let local = start.local_name().to_string();
    let protocols = start
        .required(names::PROTOCOL_SUPPORT_ENUMERATION)?
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut role = RoleDescriptor::new(RoleKind::from_local_name(&local), protocols);
    role.want_authn_requests_signed = start.optional_bool(names::WANT_AUTHN_REQUESTS_SIGNED)?;
    role.authn_requests_signed = start.optional_bool(names::AUTHN_REQUESTS_SIGNED)?;
    role.want_assertions_signed = start.optional_bool(names::WANT_ASSERTIONS_SIGNED)?;

    while let Some(child) = next_child(cursor, &local)? {
        match child.local_name.as_str() {
            names::KEY_DESCRIPTOR => role.key_descriptors.push(parse_key_descriptor(cursor)?),
            names::NAME_ID_FORMAT => role
                .name_id_formats
                .push(element_text(cursor, names::NAME_ID_FORMAT)?.trim().to_string()),
            names::SINGLE_SIGN_ON_SERVICE => {
                role.single_sign_on_services.push(parse_endpoint(cursor)?);
            }
            names::SINGLE_LOGOUT_SERVICE => {
                role.single_logout_services.push(parse_endpoint(cursor)?);
            }
            names::ASSERTION_CONSUMER_SERVICE => {
                role.assertion_consumer_services.push(parse_endpoint(cursor)?);
            }
            _ => skip_element(cursor)?,
        }
    }
    expect_end(cursor, &local)?;
    Ok(role)
}

fn parse_endpoint(cursor: &mut dyn EventCursor) -> SamlResult<Endpoint> {
    let start = next_start(cursor)?;
    let local = start.local_name().to_string();
    let endpoint = Endpoint {
        binding: start.required(names::BINDING)?,
        location: start.required(names::LOCATION)?,
        response_location: start.optional(names::RESPONSE_LOCATION),
        index: start.optional_u32(names::INDEX)?,
        is_default: start.optional_bool(names::IS_DEFAULT)?,
    };
    while next_child(cursor, &local)?.is_some() {
        skip_element(cursor)?;
    }
    expect_end(cursor, &local)?;
    Ok(endpoint)
}

fn parse_key_descriptor(cursor: &mut dyn EventCursor) -> SamlResult<KeyDescriptor> {
    let start = expect_start(cursor, names::KEY_DESCRIPTOR)?;
    let mut descriptor = KeyDescriptor {
        key_use: start.optional(names::USE),
        certificates: Vec::new(),
    };
    collect_certificates(cursor, names::KEY_DESCRIPTOR, 1, &mut descriptor.certificates)?;
    Ok(descriptor)
}

/// Collects `X509Certificate` text below `parent`, then consumes the end of
/// `parent`.
fn collect_certificates(
    cursor: &mut dyn EventCursor,
    parent: &str,
    depth: usize,
    out: &mut Vec<String>,
) -> SamlResult<()> {
    while let Some(child) = next_child(cursor, parent)? {
        match child.local_name.as_str() {
            names::X509_CERTIFICATE => {
                let text = element_text(cursor, names::X509_CERTIFICATE)?;
                out.push(text.split_whitespace().collect());
            }
            names::KEY_INFO | names::X509_DATA => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(too_deep(&child.local_name));
                }
                expect_start(cursor, &child.local_name)?;
                collect_certificates(cursor, &child.local_name, depth + 1, out)?;
            }
            _ => skip_element(cursor)?,
        }
    }
    expect_end(cursor, parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamlError;
    use crate::types::{SamlBinding, SAMLP_NS};
    use crate::xml::XmlEventReader;

    const IDP: &str = r#"
        <md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
            xmlns:ds="http://www.w3.org/2000/09/xmldsig#"
            entityID="https://idp.example.com" validUntil="2030-01-01T00:00:00Z">
            <md:IDPSSODescriptor WantAuthnRequestsSigned="true"
                protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                <md:KeyDescriptor use="signing">
                    <ds:KeyInfo><ds:X509Data><ds:X509Certificate>
                        MIIB
                        AAAA
                    </ds:X509Certificate></ds:X509Data></ds:KeyInfo>
                </md:KeyDescriptor>
                <md:SingleLogoutService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect"
                    Location="https://idp.example.com/slo"/>
                <md:NameIDFormat>urn:oasis:names:tc:SAML:2.0:nameid-format:persistent</md:NameIDFormat>
                <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"
                    Location="https://idp.example.com/sso"/>
            </md:IDPSSODescriptor>
            <md:Organization><md:OrganizationName xml:lang="en">Example</md:OrganizationName></md:Organization>
        </md:EntityDescriptor>"#;

    #[test]
    fn parses_idp_metadata() {
        let entity = EntityDescriptorParser
            .parse(&mut XmlEventReader::from_str(IDP))
            .unwrap();
        assert_eq!(entity.entity_id, "https://idp.example.com");
        assert!(entity.valid_until.is_some());

        let idp = entity.idp_sso_descriptor().unwrap();
        assert!(idp.supports_protocol(SAMLP_NS));
        assert_eq!(idp.want_authn_requests_signed, Some(true));
        assert_eq!(idp.name_id_formats.len(), 1);
        assert_eq!(
            idp.sso_endpoint(SamlBinding::HttpPost).map(|e| e.location.as_str()),
            Some("https://idp.example.com/sso")
        );
        assert_eq!(idp.single_logout_services.len(), 1);
        assert_eq!(idp.signing_certificates().collect::<Vec<_>>(), vec!["MIIBAAAA"]);
        assert!(entity.sp_sso_descriptor().is_none());
    }

    #[test]
    fn parses_nested_entities() {
        let xml = format!(
            r#"<md:EntitiesDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" Name="fed">
                {IDP}
                <md:EntitiesDescriptor Name="inner">
                    <md:EntityDescriptor entityID="https://sp.example.com">
                        <md:SPSSODescriptor AuthnRequestsSigned="1"
                            protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                            <md:AssertionConsumerService index="0" isDefault="true"
                                Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST"
                                Location="https://sp.example.com/acs"/>
                        </md:SPSSODescriptor>
                    </md:EntityDescriptor>
                </md:EntitiesDescriptor>
            </md:EntitiesDescriptor>"#
        );
        let group = EntitiesDescriptorParser
            .parse(&mut XmlEventReader::from_str(&xml))
            .unwrap();

        assert_eq!(group.name.as_deref(), Some("fed"));
        assert_eq!(group.entries.len(), 2);
        let sp = group.find_entity("https://sp.example.com").unwrap();
        let role = sp.sp_sso_descriptor().unwrap();
        assert_eq!(role.authn_requests_signed, Some(true));
        let acs = role.default_acs().unwrap();
        assert_eq!(acs.index, Some(0));
        assert_eq!(acs.location, "https://sp.example.com/acs");
    }

    #[test]
    fn endpoint_requires_location() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="e">
                <md:SPSSODescriptor protocolSupportEnumeration="p">
                    <md:AssertionConsumerService Binding="b"/>
                </md:SPSSODescriptor>
            </md:EntityDescriptor>"#;
        let err = EntityDescriptorParser
            .parse(&mut XmlEventReader::from_str(xml))
            .unwrap_err();
        assert!(matches!(err, SamlError::MissingAttribute { ref attribute, .. } if attribute == "Location"));
    }

    #[test]
    fn entity_requires_entity_id() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"/>"#;
        let err = EntityDescriptorParser
            .parse(&mut XmlEventReader::from_str(xml))
            .unwrap_err();
        assert!(matches!(err, SamlError::MissingAttribute { ref attribute, .. } if attribute == "entityID"));
    }

    #[test]
    fn other_roles_are_recorded_by_name() {
        let xml = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="e">
                <md:AttributeAuthorityDescriptor protocolSupportEnumeration="p">
                    <md:AttributeService Binding="b" Location="l"/>
                </md:AttributeAuthorityDescriptor>
                <md:AffiliationDescriptor affiliationOwnerID="o"/>
            </md:EntityDescriptor>"#;
        let entity = EntityDescriptorParser
            .parse(&mut XmlEventReader::from_str(xml))
            .unwrap();
        assert_eq!(entity.role_descriptors.len(), 1);
        assert_eq!(
            entity.role_descriptors[0].kind,
            RoleKind::Other("AttributeAuthorityDescriptor".to_string())
        );
    }

    fn nested_groups(levels: usize) -> String {
        let open = r#"<md:EntitiesDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata">"#;
        let mut xml = open.repeat(levels);
        xml.push_str(r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="leaf"/>"#);
        xml.push_str(&"</md:EntitiesDescriptor>".repeat(levels));
        xml
    }

    #[test]
    fn nested_groups_up_to_the_limit_parse() {
        let group = EntitiesDescriptorParser
            .parse(&mut XmlEventReader::from_str(&nested_groups(MAX_NESTING_DEPTH)))
            .unwrap();
        assert!(group.find_entity("leaf").is_some());
    }

    #[test]
    fn nesting_past_the_limit_is_rejected() {
        let err = EntitiesDescriptorParser
            .parse(&mut XmlEventReader::from_str(&nested_groups(MAX_NESTING_DEPTH + 1)))
            .unwrap_err();
        assert!(err.is_parsing());
        assert!(matches!(err, SamlError::XmlParse(ref m) if m.contains("nested deeper")));

        let hostile = nested_groups(10_000);
        let err = EntitiesDescriptorParser
            .parse(&mut XmlEventReader::from_str(&hostile))
            .unwrap_err();
        assert!(err.is_parsing());
    }

    #[test]
    fn deeply_wrapped_certificates_are_rejected() {
        let depth = MAX_NESTING_DEPTH + 1;
        let xml = format!(
            r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata"
                xmlns:ds="http://www.w3.org/2000/09/xmldsig#" entityID="e">
                <md:SPSSODescriptor protocolSupportEnumeration="p">
                    <md:KeyDescriptor>{}<ds:X509Certificate>MIIB</ds:X509Certificate>{}</md:KeyDescriptor>
                </md:SPSSODescriptor>
            </md:EntityDescriptor>"#,
            "<ds:KeyInfo>".repeat(depth),
            "</ds:KeyInfo>".repeat(depth)
        );
        let err = EntityDescriptorParser
            .parse(&mut XmlEventReader::from_str(&xml))
            .unwrap_err();
        assert!(matches!(err, SamlError::XmlParse(ref m) if m.contains("KeyInfo")));
    }
}
