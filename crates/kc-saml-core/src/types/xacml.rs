//! XACML authorization decision query types.
//!
//! The SAML profile of XACML 2.0 wraps a XACML context `Request` in a
//! SAML request envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NameId;

/// `xacml-samlp:XACMLAuthzDecisionQuery`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XacmlAuthzDecisionQuery {
    /// Unique identifier for this query.
    pub id: String,

    /// Version of the SAML protocol.
    pub version: String,

    /// Timestamp when this query was issued.
    pub issue_instant: DateTime<Utc>,

    /// The requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<NameId>,

    /// The URL where this query was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// The consent obtained for this query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<String>,

    /// Whether the PDP must use only the supplied context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_context_only: Option<bool>,

    /// Whether the request context should be echoed in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_context: Option<bool>,

    /// The XACML request context.
    pub request: XacmlRequest,
}

/// XACML context request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XacmlRequest {
    /// Subjects, one group per `Subject` element.
    #[serde(default)]
    pub subjects: Vec<XacmlAttributeGroup>,

    /// Resources, one group per `Resource` element.
    #[serde(default)]
    pub resources: Vec<XacmlAttributeGroup>,

    /// The action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<XacmlAttributeGroup>,

    /// The environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<XacmlAttributeGroup>,
}

impl XacmlRequest {
    /// Finds the first value of an attribute in any subject.
    #[must_use]
    pub fn subject_attribute(&self, attribute_id: &str) -> Option<&str> {
        self.subjects
            .iter()
            .find_map(|group| group.first_value(attribute_id))
    }

    /// Finds the first value of an attribute in the action.
    #[must_use]
    pub fn action_attribute(&self, attribute_id: &str) -> Option<&str> {
        self.action
            .as_ref()
            .and_then(|group| group.first_value(attribute_id))
    }
}

/// A `Subject`, `Resource`, `Action` or `Environment` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XacmlAttributeGroup {
    /// `SubjectCategory`, on subjects only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Attributes in document order.
    #[serde(default)]
    pub attributes: Vec<XacmlAttribute>,
}

impl XacmlAttributeGroup {
    /// Returns the first value of the attribute with the given ID.
    #[must_use]
    pub fn first_value(&self, attribute_id: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.attribute_id == attribute_id)
            .and_then(|a| a.values.first())
            .map(String::as_str)
    }
}

/// A XACML context attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XacmlAttribute {
    /// Attribute identifier URI.
    pub attribute_id: String,

    /// Data type URI.
    pub data_type: String,

    /// Issuer of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Text values.
    #[serde(default)]
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup() {
        let request = XacmlRequest {
            subjects: vec![XacmlAttributeGroup {
                category: None,
                attributes: vec![XacmlAttribute {
                    attribute_id: "urn:oasis:names:tc:xacml:1.0:subject:subject-id".to_string(),
                    data_type: "http://www.w3.org/2001/XMLSchema#string".to_string(),
                    issuer: None,
                    values: vec!["alice".to_string()],
                }],
            }],
            ..XacmlRequest::default()
        };

        assert_eq!(
            request.subject_attribute("urn:oasis:names:tc:xacml:1.0:subject:subject-id"),
            Some("alice")
        );
        assert_eq!(request.action_attribute("anything"), None);
    }
}
