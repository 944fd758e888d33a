//! SAML error types.
//!
//! Every failure surfaced by the codec falls into one of three kinds:
//! parsing (malformed or unrecognized input), configuration (incomplete
//! construction intent) and processing (failures while writing).

use thiserror::Error;

use crate::types::status_codes;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// Broad classification of a [`SamlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unrecognized input.
    Parsing,
    /// Caller supplied incomplete construction intent.
    Configuration,
    /// Failure while writing a message.
    Processing,
}

/// SAML codec errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// XML could not be tokenized.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// A required attribute is missing from a start element.
    #[error("missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Local name of the element.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// A required child element is missing.
    #[error("missing required element: {0}")]
    MissingElement(String),

    /// An element appeared where the grammar does not allow it.
    #[error("unknown tag: {0}")]
    UnknownTag(String),

    /// An abstract request element carried an unsupported `xsi:type`.
    #[error("unknown xsi:type={0}")]
    UnknownXsiType(String),

    /// The event stream ended before a complete message was read.
    #[error("SAML parsing exhausted: {0}")]
    ParsingExhausted(String),

    /// An attribute or text value could not be interpreted.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// The field being parsed.
        field: String,
        /// The offending raw value.
        value: String,
    },

    /// Incomplete or contradictory construction intent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Writing to the XML sink failed.
    #[error("processing error: {0}")]
    Processing(String),
}

impl SamlError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::XmlParse(_)
            | Self::MissingAttribute { .. }
            | Self::MissingElement(_)
            | Self::UnknownTag(_)
            | Self::UnknownXsiType(_)
            | Self::ParsingExhausted(_)
            | Self::InvalidValue { .. } => ErrorKind::Parsing,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Processing(_) => ErrorKind::Processing,
        }
    }

    /// Returns true for malformed or unrecognized input.
    #[must_use]
    pub const fn is_parsing(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parsing)
    }

    /// Returns the SAML status code a responder would report for this error.
    ///
    /// Input problems are the requester's fault; everything else is ours.
    #[must_use]
    pub const fn status_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Parsing => status_codes::REQUESTER,
            ErrorKind::Configuration | ErrorKind::Processing => status_codes::RESPONDER,
        }
    }

    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub(crate) fn invalid_value(field: &str, value: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SamlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<std::io::Error> for SamlError {
    fn from(err: std::io::Error) -> Self {
        Self::Processing(err.to_string())
    }
}
