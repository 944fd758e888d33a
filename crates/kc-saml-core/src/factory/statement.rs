//! Attribute statement builders.

use crate::types::{
    attribute_keys, attribute_name_formats, Attribute, AttributeStatement, X500Attribute,
};

/// Builds an attribute statement from user attributes, in iteration order.
///
/// A `roles` key (any case) contributes one `role` attribute per value.
/// Every other key contributes one X.500 profile attribute carrying all of
/// its values; keys outside the profile get no name or friendly name.
pub fn attribute_statement_from_map<I>(attributes: I) -> AttributeStatement
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut statement = AttributeStatement::new();
    for (key, values) in attributes {
        if key.eq_ignore_ascii_case(attribute_keys::ROLES) {
            statement
                .attributes
                .extend(values.into_iter().map(role_attribute));
            continue;
        }

        let mut attribute = x500_attribute(values);
        match X500Attribute::from_key(&key) {
            Some(profile) => {
                attribute.name = Some(profile.name().to_string());
                attribute.friendly_name = Some(profile.friendly_name().to_string());
            }
            None => tracing::trace!("attribute key {} is outside the X.500 profile", key),
        }
        statement.attributes.push(attribute);
    }
    statement
}

/// Builds an attribute statement with one `role` attribute per role.
pub fn attribute_statement_from_roles<I, S>(roles: I) -> AttributeStatement
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AttributeStatement {
        attributes: roles.into_iter().map(role_attribute).collect(),
    }
}

fn role_attribute(role: impl Into<String>) -> Attribute {
    Attribute::single(attribute_keys::ROLE_ATTRIBUTE_NAME, role)
}

fn x500_attribute(values: Vec<String>) -> Attribute {
    Attribute {
        name_format: Some(attribute_name_formats::URI.to_string()),
        x500_encoding: Some(attribute_keys::X500_ENCODING_LDAP.to_string()),
        values,
        ..Attribute::default()
    }
}
