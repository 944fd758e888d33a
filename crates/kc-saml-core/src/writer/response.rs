//! Response writers: `Response` and `LogoutResponse`.

use super::assertion::write_assertion_element;
use super::{
    declare_protocol, instant_attribute, name_id, optional_attribute, start, status, text_element,
    SAML, SAMLP, X500, XENC,
};
use crate::error::{SamlError, SamlResult};
use crate::types::{
    names, CipherData, EncryptedAssertion, LogoutResponse, Response, X500_NS, XMLENC_NS,
};
use crate::xml::EventSink;

/// Writes SAML protocol responses.
pub struct SamlResponseWriter<'w> {
    sink: &'w mut dyn EventSink,
}

impl<'w> SamlResponseWriter<'w> {
    /// Creates a writer over `sink`.
    pub fn new(sink: &'w mut dyn EventSink) -> Self {
        Self { sink }
    }

    /// Writes a `samlp:Response` with its assertions.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`] when the response carries no
    /// assertion, an assertion cannot be written, or the sink fails.
    pub fn write_response(&mut self, response: &Response) -> SamlResult<()> {
        if !response.has_assertions() {
            return Err(SamlError::Processing(format!(
                "Response {} has no Assertion or EncryptedAssertion",
                response.id
            )));
        }
        tracing::debug!(
            "writing Response {} with {} assertion(s)",
            response.id,
            response.assertions.len() + response.encrypted_assertions.len()
        );
        let sink = &mut *self.sink;

        start(sink, SAMLP, names::RESPONSE)?;
        declare_protocol(sink)?;
        if response.assertions.iter().any(|a| a.uses_x500_encoding()) {
            sink.write_namespace(X500, X500_NS)?;
        }
        if !response.encrypted_assertions.is_empty() {
            sink.write_namespace(XENC, XMLENC_NS)?;
        }
        sink.write_attribute(names::ID, &response.id)?;
        sink.write_attribute(names::VERSION, &response.version)?;
        instant_attribute(sink, names::ISSUE_INSTANT, &response.issue_instant)?;
        optional_attribute(sink, names::DESTINATION, response.destination.as_deref())?;
        optional_attribute(sink, names::CONSENT, response.consent.as_deref())?;
        optional_attribute(sink, names::IN_RESPONSE_TO, response.in_response_to.as_deref())?;

        if let Some(issuer) = &response.issuer {
            name_id(sink, names::ISSUER, issuer)?;
        }
        status(sink, &response.status)?;
        for assertion in &response.assertions {
            write_assertion_element(sink, assertion, false)?;
        }
        for encrypted in &response.encrypted_assertions {
            write_encrypted_assertion(sink, encrypted)?;
        }
        sink.write_end_element()?;
        sink.flush()
    }

    /// Writes a `samlp:LogoutResponse`.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`](crate::SamlError::Processing) when
    /// the sink fails.
    pub fn write_logout_response(&mut self, response: &LogoutResponse) -> SamlResult<()> {
        tracing::debug!("writing LogoutResponse {}", response.id);
        let sink = &mut *self.sink;

        start(sink, SAMLP, names::LOGOUT_RESPONSE)?;
        declare_protocol(sink)?;
        sink.write_attribute(names::ID, &response.id)?;
        sink.write_attribute(names::VERSION, &response.version)?;
        instant_attribute(sink, names::ISSUE_INSTANT, &response.issue_instant)?;
        optional_attribute(sink, names::DESTINATION, response.destination.as_deref())?;
        optional_attribute(sink, names::CONSENT, response.consent.as_deref())?;
        optional_attribute(sink, names::IN_RESPONSE_TO, response.in_response_to.as_deref())?;

        if let Some(issuer) = &response.issuer {
            name_id(sink, names::ISSUER, issuer)?;
        }
        status(sink, &response.status)?;
        sink.write_end_element()?;
        sink.flush()
    }
}

fn write_encrypted_assertion(
    sink: &mut dyn EventSink,
    encrypted: &EncryptedAssertion,
) -> SamlResult<()> {
    start(sink, SAML, names::ENCRYPTED_ASSERTION)?;

    let data = &encrypted.encrypted_data;
    start(sink, XENC, names::ENCRYPTED_DATA)?;
    write_encryption_method(sink, data.encryption_method.as_deref())?;
    write_cipher_data(sink, &data.cipher_data)?;
    sink.write_end_element()?;

    for key in &encrypted.encrypted_keys {
        start(sink, XENC, names::ENCRYPTED_KEY)?;
        write_encryption_method(sink, key.encryption_method.as_deref())?;
        write_cipher_data(sink, &key.cipher_data)?;
        sink.write_end_element()?;
    }
    sink.write_end_element()
}

fn write_encryption_method(sink: &mut dyn EventSink, algorithm: Option<&str>) -> SamlResult<()> {
    if let Some(algorithm) = algorithm {
        start(sink, XENC, names::ENCRYPTION_METHOD)?;
        sink.write_attribute(names::ALGORITHM, algorithm)?;
        sink.write_end_element()?;
    }
    Ok(())
}

fn write_cipher_data(sink: &mut dyn EventSink, data: &CipherData) -> SamlResult<()> {
    start(sink, XENC, names::CIPHER_DATA)?;
    text_element(sink, XENC, names::CIPHER_VALUE, &data.cipher_value)?;
    sink.write_end_element()
}
