//! Status response grammars: `Response` and `LogoutResponse`.

use chrono::{DateTime, Utc};

use super::assertion::{parse_name_id, AssertionParser};
use super::util::{
    element_text, expect_end, expect_start, next_child, set_once, skip_content, skip_element,
    unexpected, StartTag,
};
use super::ElementParser;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, CipherData, EncryptedAssertion, EncryptedData, EncryptedKey, LogoutResponse, NameId,
    Response, Status, StatusCode, SAMLP_NS,
};
use crate::xml::{EventCursor, QualifiedName};

/// Fields shared by every `StatusResponseType` element.
struct ResponseEnvelope {
    id: String,
    version: String,
    issue_instant: DateTime<Utc>,
    in_response_to: Option<String>,
    destination: Option<String>,
    consent: Option<String>,
    issuer: Option<NameId>,
    status: Option<Status>,
}

impl ResponseEnvelope {
    fn from_start(start: &StartTag) -> SamlResult<Self> {
        Ok(Self {
            id: start.required(names::ID)?,
            version: start.required(names::VERSION)?,
            issue_instant: start.required_instant(names::ISSUE_INSTANT)?,
            in_response_to: start.optional(names::IN_RESPONSE_TO),
            destination: start.optional(names::DESTINATION),
            consent: start.optional(names::CONSENT),
            issuer: None,
            status: None,
        })
    }

    /// Consumes a child common to all status responses. Returns false if the
    /// child is not one of them.
    fn accept_child(
        &mut self,
        cursor: &mut dyn EventCursor,
        parent: &str,
        child: &QualifiedName,
    ) -> SamlResult<bool> {
        match child.local_name.as_str() {
            names::ISSUER => {
                let issuer = parse_name_id(cursor, names::ISSUER)?;
                set_once(&mut self.issuer, issuer, parent, names::ISSUER)?;
            }
            names::STATUS => {
                let status = parse_status(cursor)?;
                set_once(&mut self.status, status, parent, names::STATUS)?;
            }
            names::SIGNATURE | names::EXTENSIONS => skip_element(cursor)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn require_status(&mut self, element: &str) -> SamlResult<Status> {
        self.status.take().ok_or_else(|| {
            SamlError::MissingElement(format!("{} in <{element}>", names::STATUS))
        })
    }
}

/// Parses `samlp:Response`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ElementParser for ResponseParser {
    type Output = Response;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<Response> {
        let start = expect_start(cursor, names::RESPONSE)?;
        let mut envelope = ResponseEnvelope::from_start(&start)?;
        let mut assertions = Vec::new();
        let mut encrypted_assertions = Vec::new();

        while let Some(child) = next_child(cursor, names::RESPONSE)? {
            if envelope.accept_child(cursor, names::RESPONSE, &child)? {
                continue;
            }
            match child.local_name.as_str() {
                names::ASSERTION => assertions.push(AssertionParser.parse(cursor)?),
                names::ENCRYPTED_ASSERTION => {
                    encrypted_assertions.push(parse_encrypted_assertion(cursor)?);
                }
                _ => return Err(unexpected(names::RESPONSE, &child)),
            }
        }
        expect_end(cursor, names::RESPONSE)?;

        let status = envelope.require_status(names::RESPONSE)?;
        if assertions.is_empty() && encrypted_assertions.is_empty() {
            return Err(SamlError::MissingElement(format!(
                "{} or {} in <{}>",
                names::ASSERTION,
                names::ENCRYPTED_ASSERTION,
                names::RESPONSE
            )));
        }

        Ok(Response {
            id: envelope.id,
            version: envelope.version,
            issue_instant: envelope.issue_instant,
            issuer: envelope.issuer,
            in_response_to: envelope.in_response_to,
            destination: envelope.destination,
            consent: envelope.consent,
            status,
            assertions,
            encrypted_assertions,
        })
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(SAMLP_NS, names::RESPONSE)
    }
}

/// Parses `samlp:LogoutResponse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutResponseParser;

impl ElementParser for LogoutResponseParser {
    type Output = LogoutResponse;

    fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<LogoutResponse> {
        let start = expect_start(cursor, names::LOGOUT_RESPONSE)?;
        let mut envelope = ResponseEnvelope::from_start(&start)?;

        while let Some(child) = next_child(cursor, names::LOGOUT_RESPONSE)? {
            if !envelope.accept_child(cursor, names::LOGOUT_RESPONSE, &child)? {
                return Err(unexpected(names::LOGOUT_RESPONSE, &child));
            }
        }
        expect_end(cursor, names::LOGOUT_RESPONSE)?;

        let status = envelope.require_status(names::LOGOUT_RESPONSE)?;
        Ok(LogoutResponse {
            id: envelope.id,
            version: envelope.version,
            issue_instant: envelope.issue_instant,
            issuer: envelope.issuer,
            in_response_to: envelope.in_response_to,
            destination: envelope.destination,
            consent: envelope.consent,
            status,
        })
    }

    fn supports(&self, name: &QualifiedName) -> bool {
        name.is(SAMLP_NS, names::LOGOUT_RESPONSE)
    }
}

/// Parses `samlp:Status`. Nested status codes and details are skipped.
pub(crate) fn parse_status(cursor: &mut dyn EventCursor) -> SamlResult<Status> {
    expect_start(cursor, names::STATUS)?;
    let mut code = None;
    let mut message = None;
    while let Some(child) = next_child(cursor, names::STATUS)? {
        match child.local_name.as_str() {
            names::STATUS_CODE => {
                let start = expect_start(cursor, names::STATUS_CODE)?;
                code = Some(StatusCode::new(start.required(names::VALUE)?));
                skip_content(cursor, names::STATUS_CODE)?;
            }
            names::STATUS_MESSAGE => {
                message = Some(element_text(cursor, names::STATUS_MESSAGE)?);
            }
            names::STATUS_DETAIL => skip_element(cursor)?,
            _ => return Err(unexpected(names::STATUS, &child)),
        }
    }
    expect_end(cursor, names::STATUS)?;

    let status_code = code.ok_or_else(|| {
        SamlError::MissingElement(format!("{} in <{}>", names::STATUS_CODE, names::STATUS))
    })?;
    Ok(Status {
        status_code,
        status_message: message,
    })
}

fn parse_encrypted_assertion(cursor: &mut dyn EventCursor) -> SamlResult<EncryptedAssertion> {
    expect_start(cursor, names::ENCRYPTED_ASSERTION)?;
    let mut encrypted_data = None;
    let mut encrypted_keys = Vec::new();
    while let Some(child) = next_child(cursor, names::ENCRYPTED_ASSERTION)? {
        match child.local_name.as_str() {
            names::ENCRYPTED_DATA => {
                let value = parse_encrypted_data(cursor, &mut encrypted_keys)?;
                set_once(
                    &mut encrypted_data,
                    value,
                    names::ENCRYPTED_ASSERTION,
                    names::ENCRYPTED_DATA,
                )?;
            }
            names::ENCRYPTED_KEY => encrypted_keys.push(parse_encrypted_key(cursor)?),
            _ => return Err(unexpected(names::ENCRYPTED_ASSERTION, &child)),
        }
    }
    expect_end(cursor, names::ENCRYPTED_ASSERTION)?;

    let encrypted_data = encrypted_data.ok_or_else(|| {
        SamlError::MissingElement(format!(
            "{} in <{}>",
            names::ENCRYPTED_DATA,
            names::ENCRYPTED_ASSERTION
        ))
    })?;
    Ok(EncryptedAssertion {
        encrypted_data,
        encrypted_keys,
    })
}

/// Parses `xenc:EncryptedData`. Keys found in its `KeyInfo` are appended to
/// `keys`.
fn parse_encrypted_data(
    cursor: &mut dyn EventCursor,
    keys: &mut Vec<EncryptedKey>,
) -> SamlResult<EncryptedData> {
    expect_start(cursor, names::ENCRYPTED_DATA)?;
    let mut encryption_method = None;
    let mut cipher_data = None;
    while let Some(child) = next_child(cursor, names::ENCRYPTED_DATA)? {
        match child.local_name.as_str() {
            names::ENCRYPTION_METHOD => encryption_method = parse_encryption_method(cursor)?,
            names::CIPHER_DATA => {
                let value = parse_cipher_data(cursor)?;
                set_once(&mut cipher_data, value, names::ENCRYPTED_DATA, names::CIPHER_DATA)?;
            }
            names::KEY_INFO => {
                expect_start(cursor, names::KEY_INFO)?;
                while let Some(info) = next_child(cursor, names::KEY_INFO)? {
                    if info.local_name == names::ENCRYPTED_KEY {
                        keys.push(parse_encrypted_key(cursor)?);
                    } else {
                        skip_element(cursor)?;
                    }
                }
                expect_end(cursor, names::KEY_INFO)?;
            }
            _ => skip_element(cursor)?,
        }
    }
    expect_end(cursor, names::ENCRYPTED_DATA)?;
    Ok(EncryptedData {
        encryption_method,
        cipher_data: require_cipher_data(cipher_data, names::ENCRYPTED_DATA)?,
    })
}

fn parse_encrypted_key(cursor: &mut dyn EventCursor) -> SamlResult<EncryptedKey> {
    expect_start(cursor, names::ENCRYPTED_KEY)?;
    let mut encryption_method = None;
    let mut cipher_data = None;
    while let Some(child) = next_child(cursor, names::ENCRYPTED_KEY)? {
        match child.local_name.as_str() {
            names::ENCRYPTION_METHOD => encryption_method = parse_encryption_method(cursor)?,
            names::CIPHER_DATA => {
                let value = parse_cipher_data(cursor)?;
                set_once(&mut cipher_data, value, names::ENCRYPTED_KEY, names::CIPHER_DATA)?;
            }
            _ => skip_element(cursor)?,
        }
    }
    expect_end(cursor, names::ENCRYPTED_KEY)?;
    Ok(EncryptedKey {
        encryption_method,
        cipher_data: require_cipher_data(cipher_data, names::ENCRYPTED_KEY)?,
    })
}

fn parse_encryption_method(cursor: &mut dyn EventCursor) -> SamlResult<Option<String>> {
    let start = expect_start(cursor, names::ENCRYPTION_METHOD)?;
    skip_content(cursor, names::ENCRYPTION_METHOD)?;
    Ok(start.optional(names::ALGORITHM))
}

fn parse_cipher_data(cursor: &mut dyn EventCursor) -> SamlResult<CipherData> {
    expect_start(cursor, names::CIPHER_DATA)?;
    let mut cipher_value = None;
    while let Some(child) = next_child(cursor, names::CIPHER_DATA)? {
        if child.local_name != names::CIPHER_VALUE {
            return Err(unexpected(names::CIPHER_DATA, &child));
        }
        let text = element_text(cursor, names::CIPHER_VALUE)?;
        cipher_value = Some(text.split_whitespace().collect::<String>());
    }
    expect_end(cursor, names::CIPHER_DATA)?;
    cipher_value
        .map(|cipher_value| CipherData { cipher_value })
        .ok_or_else(|| {
            SamlError::MissingElement(format!("{} in <{}>", names::CIPHER_VALUE, names::CIPHER_DATA))
        })
}

fn require_cipher_data(data: Option<CipherData>, parent: &str) -> SamlResult<CipherData> {
    data.ok_or_else(|| SamlError::MissingElement(format!("{} in <{parent}>", names::CIPHER_DATA)))
}
