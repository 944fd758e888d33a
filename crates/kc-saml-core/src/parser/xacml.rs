//! XACML authorization decision query grammar.

use super::assertion::parse_name_id;
use super::request::RequestHeader;
use super::util::{
    expect_end, expect_start, expect_start_any, lenient_text, next_child, set_once,
    skip_element, unexpected, StartTag,
};
use super::ElementParser;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, XacmlAttribute, XacmlAttributeGroup, XacmlAuthzDecisionQuery, XacmlRequest,
    SAMLP_NS, XACML_SAMLP_NS,
};
use crate::xml::{EventCursor, QualifiedName};

const START_NAMES: [&str; 3] = [
    names::XACML_AUTHZ_DECISION_QUERY,
    names::REQUEST_ABSTRACT_TYPE,
    names::REQUEST_ABSTRACT,
];

/// Parses an `XACMLAuthzDecisionQuery`, either under its own name or as a
/// typed `RequestAbstract` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct XacmlQueryParser;

impl ElementParser for XacmlQueryParser {
    type Output = XacmlAuthzDecisionQuery;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<XacmlAuthzDecisionQuery> {
        let start = expect_start_any(cursor, &START_NAMES)?;
        let local = start.local_name().to_string();
        let header = RequestHeader::from_start(&start)?;

        let mut issuer = None;
        let mut request = None;
        while let Some(child) = next_child(cursor, &local)? {
            match child.local_name.as_str() {
                names::ISSUER => {
                    let value = parse_name_id(cursor, names::ISSUER)?;
                    set_once(&mut issuer, value, &local, names::ISSUER)?;
                }
                names::REQUEST => {
                    let value = parse_request(cursor)?;
                    set_once(&mut request, value, &local, names::REQUEST)?;
                }
                names::SIGNATURE | names::EXTENSIONS => skip_element(cursor)?,
                _ => return Err(unexpected(&local, &child)),
            }
        }
        expect_end(cursor, &local)?;

        let request = request.ok_or_else(|| {
            SamlError::MissingElement(format!("{} inside <{}>", names::REQUEST, local))
        })?;
        Ok(XacmlAuthzDecisionQuery {
            id: header.id,
            version: header.version,
            issue_instant: header.issue_instant,
            issuer,
            destination: header.destination,
            consent: header.consent,
            input_context_only: start.optional_bool(names::INPUT_CONTEXT_ONLY)?,
            return_context: start.optional_bool(names::RETURN_CONTEXT)?,
            request,
        })
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        match name.local_name.as_str() {
            names::XACML_AUTHZ_DECISION_QUERY => {
                name.namespace.as_deref() == Some(XACML_SAMLP_NS)
            }
            names::REQUEST_ABSTRACT_TYPE | names::REQUEST_ABSTRACT => matches!(
                name.namespace.as_deref(),
                Some(SAMLP_NS) | Some(XACML_SAMLP_NS)
            ),
            _ => false,
        }
    }
}

fn parse_request(cursor: &mut dyn EventCursor) -> SamlResult<XacmlRequest> {
    expect_start(cursor, names::REQUEST)?;
    let mut request = XacmlRequest::default();
    while let Some(child) = next_child(cursor, names::REQUEST)? {
        match child.local_name.as_str() {
            names::SUBJECT => {
                let start = expect_start(cursor, names::SUBJECT)?;
                let category = start.optional(names::SUBJECT_CATEGORY);
                request.subjects.push(parse_group(cursor, &start, category)?);
            }
            names::RESOURCE => {
                let start = expect_start(cursor, names::RESOURCE)?;
                request.resources.push(parse_group(cursor, &start, None)?);
            }
            names::ACTION => {
                let start = expect_start(cursor, names::ACTION)?;
                request.action = Some(parse_group(cursor, &start, None)?);
            }
            names::ENVIRONMENT => {
                let start = expect_start(cursor, names::ENVIRONMENT)?;
                request.environment = Some(parse_group(cursor, &start, None)?);
            }
            _ => return Err(unexpected(names::REQUEST, &child)),
        }
    }
    expect_end(cursor, names::REQUEST)?;
    Ok(request)
}

/// Reads the `Attribute` children of a group whose start tag is consumed.
fn parse_group(
    cursor: &mut dyn EventCursor,
    start: &StartTag,
    category: Option<String>,
) -> SamlResult<XacmlAttributeGroup> {
    let local = start.local_name();
    let mut group = XacmlAttributeGroup {
        category,
        attributes: Vec::new(),
    };
    while let Some(child) = next_child(cursor, local)? {
        match child.local_name.as_str() {
            names::ATTRIBUTE => group.attributes.push(parse_attribute(cursor)?),
            // Resource content is opaque to the query.
            names::RESOURCE_CONTENT => skip_element(cursor)?,
            _ => return Err(unexpected(local, &child)),
        }
    }
    expect_end(cursor, local)?;
    Ok(group)
}

fn parse_attribute(cursor: &mut dyn EventCursor) -> SamlResult<XacmlAttribute> {
    let start = expect_start(cursor, names::ATTRIBUTE)?;
    let mut attribute = XacmlAttribute {
        attribute_id: start.required(names::ATTRIBUTE_ID)?,
        data_type: start.required(names::DATA_TYPE)?,
        issuer: start.optional(names::ISSUER),
        values: Vec::new(),
    };
    while let Some(child) = next_child(cursor, names::ATTRIBUTE)? {
        if child.local_name == names::ATTRIBUTE_VALUE {
            expect_start(cursor, names::ATTRIBUTE_VALUE)?;
            attribute
                .values
                .push(lenient_text(cursor, names::ATTRIBUTE_VALUE)?.trim().to_string());
        } else {
            return Err(unexpected(names::ATTRIBUTE, &child));
        }
    }
    expect_end(cursor, names::ATTRIBUTE)?;
    Ok(attribute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlEventReader;

    const QUERY: &str = r#"
        <xacml-samlp:XACMLAuthzDecisionQuery
            xmlns:xacml-samlp="urn:oasis:xacml:2.0:saml:protocol:schema:os"
            xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
            xmlns:xacml-context="urn:oasis:names:tc:xacml:2.0:context:schema:os"
            ID="ID_q1" Version="2.0" IssueInstant="2024-05-01T10:00:00Z"
            InputContextOnly="true" ReturnContext="false">
            <saml:Issuer>https://pep.example.com</saml:Issuer>
            <xacml-context:Request>
                <xacml-context:Subject
                    SubjectCategory="urn:oasis:names:tc:xacml:1.0:subject-category:access-subject">
                    <xacml-context:Attribute
                        AttributeId="urn:oasis:names:tc:xacml:1.0:subject:subject-id"
                        DataType="http://www.w3.org/2001/XMLSchema#string">
                        <xacml-context:AttributeValue>alice</xacml-context:AttributeValue>
                    </xacml-context:Attribute>
                </xacml-context:Subject>
                <xacml-context:Resource>
                    <xacml-context:ResourceContent><doc>ignored</doc></xacml-context:ResourceContent>
                    <xacml-context:Attribute
                        AttributeId="urn:oasis:names:tc:xacml:1.0:resource:resource-id"
                        DataType="http://www.w3.org/2001/XMLSchema#string">
                        <xacml-context:AttributeValue>reports</xacml-context:AttributeValue>
                    </xacml-context:Attribute>
                </xacml-context:Resource>
                <xacml-context:Action>
                    <xacml-context:Attribute
                        AttributeId="urn:oasis:names:tc:xacml:1.0:action:action-id"
                        DataType="http://www.w3.org/2001/XMLSchema#string">
                        <xacml-context:AttributeValue>read</xacml-context:AttributeValue>
                    </xacml-context:Attribute>
                </xacml-context:Action>
                <xacml-context:Environment/>
            </xacml-context:Request>
        </xacml-samlp:XACMLAuthzDecisionQuery>"#;

    #[test]
    fn parses_decision_query() {
        let mut reader = XmlEventReader::from_str(QUERY);
        let query = XacmlQueryParser.parse(&mut reader).unwrap();

        assert_eq!(query.id, "ID_q1");
        assert_eq!(query.input_context_only, Some(true));
        assert_eq!(query.return_context, Some(false));
        assert_eq!(
            query.issuer.as_ref().map(|i| i.value.as_str()),
            Some("https://pep.example.com")
        );
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
        assert_eq!(query.request.resources.len(), 1);
        assert_eq!(
            query.request.subjects[0].category.as_deref(),
            Some("urn:oasis:names:tc:xacml:1.0:subject-category:access-subject")
        );
        assert!(query.request.environment.is_some());
        assert!(!reader.has_next().unwrap());
    }

    #[test]
    fn accepts_typed_request_abstract() {
        let xml = r#"
            <samlp:RequestAbstract xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
                xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                xmlns:xacml-samlp="urn:oasis:xacml:2.0:saml:protocol:schema:os"
                xsi:type="xacml-samlp:XACMLAuthzDecisionQueryType"
                ID="ID_q2" Version="2.0" IssueInstant="2024-05-01T10:00:00Z">
                <Request xmlns="urn:oasis:names:tc:xacml:2.0:context:schema:os"/>
            </samlp:RequestAbstract>"#;
        let mut reader = XmlEventReader::from_str(xml);
        let query = XacmlQueryParser.parse(&mut reader).unwrap();
        assert_eq!(query.id, "ID_q2");
        assert!(query.request.subjects.is_empty());
        assert!(query.issuer.is_none());
    }

    #[test]
    fn request_is_required() {
        let xml = r#"
            <xacml-samlp:XACMLAuthzDecisionQuery
                xmlns:xacml-samlp="urn:oasis:xacml:2.0:saml:protocol:schema:os"
                ID="ID_q3" Version="2.0" IssueInstant="2024-05-01T10:00:00Z"/>"#;
        let mut reader = XmlEventReader::from_str(xml);
        let err = XacmlQueryParser.parse(&mut reader).unwrap_err();
        assert!(matches!(err, SamlError::MissingElement(_)));
    }

    #[test]
    fn attribute_requires_data_type() {
        let xml = r#"
            <xacml-samlp:XACMLAuthzDecisionQuery
                xmlns:xacml-samlp="urn:oasis:xacml:2.0:saml:protocol:schema:os"
                ID="ID_q4" Version="2.0" IssueInstant="2024-05-01T10:00:00Z">
                <Request><Action><Attribute AttributeId="a"/></Action></Request>
            </xacml-samlp:XACMLAuthzDecisionQuery>"#;
        let mut reader = XmlEventReader::from_str(xml);
        let err = XacmlQueryParser.parse(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            SamlError::MissingAttribute { ref attribute, .. } if attribute == "DataType"
        ));
    }

    #[test]
    fn supports_query_names() {
        let parser = XacmlQueryParser;
        assert!(parser.supports(&QualifiedName::new(
            XACML_SAMLP_NS,
            names::XACML_AUTHZ_DECISION_QUERY
        )));
        assert!(parser.supports(&QualifiedName::new(SAMLP_NS, names::REQUEST_ABSTRACT)));
        assert!(!parser.supports(&QualifiedName::new(SAMLP_NS, names::AUTHN_REQUEST)));
    }
}
