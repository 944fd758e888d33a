//! SAML metadata types.
//!
//! Entity and role descriptors as published by identity and service
//! providers. Only the parts needed to locate endpoints and signing
//! certificates are modeled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{names, SamlBinding};

/// A single entity's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// The entity ID.
    pub entity_id: String,

    /// Optional document ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Expiry of this metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Cache duration as an `xs:duration` literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_duration: Option<String>,

    /// Role descriptors in document order.
    #[serde(default)]
    pub role_descriptors: Vec<RoleDescriptor>,
}

impl EntityDescriptor {
    /// Creates an entity descriptor with no roles.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            id: None,
            valid_until: None,
            cache_duration: None,
            role_descriptors: Vec::new(),
        }
    }

    /// Returns the first IdP SSO descriptor.
    #[must_use]
    pub fn idp_sso_descriptor(&self) -> Option<&RoleDescriptor> {
        self.role_descriptors
            .iter()
            .find(|r| r.kind == RoleKind::IdpSso)
    }

    /// Returns the first SP SSO descriptor.
    #[must_use]
    pub fn sp_sso_descriptor(&self) -> Option<&RoleDescriptor> {
        self.role_descriptors
            .iter()
            .find(|r| r.kind == RoleKind::SpSso)
    }
}

/// A group of entity descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitiesDescriptor {
    /// Group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional document ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Expiry of this metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Cache duration as an `xs:duration` literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_duration: Option<String>,

    /// Nested descriptors in document order.
    #[serde(default)]
    pub entries: Vec<MetadataEntry>,
}

impl EntitiesDescriptor {
    /// Finds an entity by ID, descending into nested groups.
    #[must_use]
    pub fn find_entity(&self, entity_id: &str) -> Option<&EntityDescriptor> {
        self.entries.iter().find_map(|entry| match entry {
            MetadataEntry::Entity(e) if e.entity_id == entity_id => Some(e),
            MetadataEntry::Entity(_) => None,
            MetadataEntry::Entities(group) => group.find_entity(entity_id),
        })
    }

    /// Returns every entity in this group and its nested groups, depth first.
    #[must_use]
    pub fn entities(&self) -> Vec<&EntityDescriptor> {
        let mut out = Vec::new();
        self.collect_entities(&mut out);
        out
    }

    fn collect_entities<'a>(&'a self, out: &mut Vec<&'a EntityDescriptor>) {
        for entry in &self.entries {
            match entry {
                MetadataEntry::Entity(e) => out.push(e),
                MetadataEntry::Entities(group) => group.collect_entities(out),
            }
        }
    }
}

/// A child of an [`EntitiesDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataEntry {
    /// A single entity.
    Entity(EntityDescriptor),
    /// A nested group.
    Entities(EntitiesDescriptor),
}

/// Which role a descriptor describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleKind {
    /// `IDPSSODescriptor`.
    IdpSso,
    /// `SPSSODescriptor`.
    SpSso,
    /// Any other role, by element local name.
    Other(String),
}

impl RoleKind {
    /// Maps an element local name to a role kind.
    #[must_use]
    pub fn from_local_name(local: &str) -> Self {
        match local {
            names::IDP_SSO_DESCRIPTOR => Self::IdpSso,
            names::SP_SSO_DESCRIPTOR => Self::SpSso,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A role descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    /// The role.
    pub kind: RoleKind,

    /// Supported protocol URIs.
    pub protocol_support_enumeration: Vec<String>,

    /// IdP: whether authentication requests must be signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want_authn_requests_signed: Option<bool>,

    /// SP: whether this SP signs its requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authn_requests_signed: Option<bool>,

    /// SP: whether assertions must be signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want_assertions_signed: Option<bool>,

    /// Key descriptors.
    #[serde(default)]
    pub key_descriptors: Vec<KeyDescriptor>,

    /// Supported name ID formats.
    #[serde(default)]
    pub name_id_formats: Vec<String>,

    /// Single sign-on endpoints.
    #[serde(default)]
    pub single_sign_on_services: Vec<Endpoint>,

    /// Single logout endpoints.
    #[serde(default)]
    pub single_logout_services: Vec<Endpoint>,

    /// Assertion consumer endpoints.
    #[serde(default)]
    pub assertion_consumer_services: Vec<Endpoint>,
}

impl RoleDescriptor {
    /// Creates an empty descriptor for a role.
    #[must_use]
    pub fn new(kind: RoleKind, protocol_support_enumeration: Vec<String>) -> Self {
        Self {
            kind,
            protocol_support_enumeration,
            want_authn_requests_signed: None,
            authn_requests_signed: None,
            want_assertions_signed: None,
            key_descriptors: Vec::new(),
            name_id_formats: Vec::new(),
            single_sign_on_services: Vec::new(),
            single_logout_services: Vec::new(),
            assertion_consumer_services: Vec::new(),
        }
    }

    /// Returns true if the role advertises the given protocol URI.
    #[must_use]
    pub fn supports_protocol(&self, protocol: &str) -> bool {
        self.protocol_support_enumeration.iter().any(|p| p == protocol)
    }

    /// Returns the first SSO endpoint using the given binding.
    #[must_use]
    pub fn sso_endpoint(&self, binding: SamlBinding) -> Option<&Endpoint> {
        self.single_sign_on_services
            .iter()
            .find(|e| e.binding == binding.uri())
    }

    /// Returns the default assertion consumer service.
    ///
    /// That is the one marked `isDefault="true"`, else the first one not
    /// marked `false`, else the first one.
    #[must_use]
    pub fn default_acs(&self) -> Option<&Endpoint> {
        let acs = &self.assertion_consumer_services;
        acs.iter()
            .find(|e| e.is_default == Some(true))
            .or_else(|| acs.iter().find(|e| e.is_default.is_none()))
            .or_else(|| acs.first())
    }

    /// Returns the certificates usable for signing.
    pub fn signing_certificates(&self) -> impl Iterator<Item = &str> {
        self.key_descriptors
            .iter()
            .filter(|k| k.key_use.as_deref() != Some("encryption"))
            .flat_map(|k| k.certificates.iter().map(String::as_str))
    }
}

/// A metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Binding URI.
    pub binding: String,

    /// Endpoint URL.
    pub location: String,

    /// Response URL, if different.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_location: Option<String>,

    /// Index, for indexed endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Default flag, for indexed endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// A key descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// `signing` or `encryption`; absent means both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,

    /// Base64 DER certificates with whitespace removed.
    #[serde(default)]
    pub certificates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(location: &str, is_default: Option<bool>) -> Endpoint {
        Endpoint {
            binding: SamlBinding::HttpPost.uri().to_string(),
            location: location.to_string(),
            response_location: None,
            index: None,
            is_default,
        }
    }

    #[test]
    fn default_acs_selection() {
        let mut role = RoleDescriptor::new(RoleKind::SpSso, Vec::new());
        role.assertion_consumer_services = vec![
            endpoint("https://a", Some(false)),
            endpoint("https://b", None),
            endpoint("https://c", Some(true)),
        ];
        assert_eq!(role.default_acs().map(|e| e.location.as_str()), Some("https://c"));

        role.assertion_consumer_services.pop();
        assert_eq!(role.default_acs().map(|e| e.location.as_str()), Some("https://b"));

        role.assertion_consumer_services.pop();
        assert_eq!(role.default_acs().map(|e| e.location.as_str()), Some("https://a"));
    }

    #[test]
    fn find_nested_entity() {
        let inner = EntitiesDescriptor {
            entries: vec![MetadataEntry::Entity(EntityDescriptor::new("https://idp"))],
            ..EntitiesDescriptor::default()
        };
        let outer = EntitiesDescriptor {
            name: Some("federation".to_string()),
            entries: vec![
                MetadataEntry::Entity(EntityDescriptor::new("https://sp")),
                MetadataEntry::Entities(inner),
            ],
            ..EntitiesDescriptor::default()
        };

        assert!(outer.find_entity("https://idp").is_some());
        assert!(outer.find_entity("https://other").is_none());
        assert_eq!(outer.entities().len(), 2);
    }

    #[test]
    fn signing_certificates_skip_encryption_keys() {
        let mut role = RoleDescriptor::new(RoleKind::IdpSso, Vec::new());
        role.key_descriptors = vec![
            KeyDescriptor {
                key_use: Some("encryption".to_string()),
                certificates: vec!["ENC".to_string()],
            },
            KeyDescriptor {
                key_use: None,
                certificates: vec!["BOTH".to_string()],
            },
        ];
        assert_eq!(role.signing_certificates().collect::<Vec<_>>(), vec!["BOTH"]);
    }
}
