//! The codec facade: configuration, parsing, writing and construction in
//! one explicitly built value.

use std::fmt;

use crate::config::SamlConfig;
use crate::error::{SamlError, SamlResult};
use crate::factory::ResponseFactory;
use crate::parser::SamlParser;
use crate::types::SamlMessage;
use crate::writer::write_message;
use crate::xml::{EventCursor, EventSink, XmlEventReader, XmlEventWriter};

/// Validates a document against the SAML schemas before it is parsed.
///
/// Schema validation is not built in; register an implementation with
/// [`SamlCodec::with_schema_validator`].
pub trait SchemaValidator: Send + Sync {
    /// Checks `xml`, failing with a parsing error when it is invalid.
    fn validate(&self, xml: &str) -> SamlResult<()>;
}

/// Parses and writes SAML messages according to a [`SamlConfig`].
///
/// A codec holds no per-document state and can be shared across threads.
pub struct SamlCodec {
    config: SamlConfig,
    parser: SamlParser,
    factory: ResponseFactory,
    validator: Option<Box<dyn SchemaValidator>>,
}

impl fmt::Debug for SamlCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamlCodec")
            .field("config", &self.config)
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl SamlCodec {
    /// Builds a codec.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Configuration`] when `config` is unusable.
    pub fn new(config: SamlConfig) -> SamlResult<Self> {
        config.validate()?;
        Ok(Self {
            factory: ResponseFactory::new(&config),
            parser: SamlParser::new(),
            validator: None,
            config,
        })
    }

    /// Registers the validator run by [`parse_str`](Self::parse_str) when
    /// schema validation is enabled.
    #[must_use]
    pub fn with_schema_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SamlConfig {
        &self.config
    }

    /// Returns the response factory.
    #[must_use]
    pub const fn factory(&self) -> &ResponseFactory {
        &self.factory
    }

    /// Parses the first SAML element available from `cursor`.
    ///
    /// # Errors
    ///
    /// Returns a parsing error when no grammar accepts the input.
    pub fn parse(&self, cursor: &mut dyn EventCursor) -> SamlResult<SamlMessage> {
        self.parser.parse(cursor)
    }

    /// Parses a SAML document held in a string.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Configuration`] when schema validation is enabled
    /// but no validator is registered, the validator's error when it rejects
    /// the document, and otherwise any parsing error.
    pub fn parse_str(&self, xml: &str) -> SamlResult<SamlMessage> {
        if self.config.schema_validation {
            let validator = self.validator.as_ref().ok_or_else(|| {
                SamlError::Configuration(
                    "schema validation enabled without a schema validator".to_string(),
                )
            })?;
            validator.validate(xml)?;
        }
        let mut reader = XmlEventReader::new(xml, self.config.trim_text);
        self.parse(&mut reader)
    }

    /// Writes `message` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Processing`] for message kinds without a writer
    /// and for sink failures.
    pub fn write(&self, message: &SamlMessage, sink: &mut dyn EventSink) -> SamlResult<()> {
        write_message(sink, message)
    }

    /// Renders `message` as an XML string, indented when configured.
    ///
    /// # Errors
    ///
    /// Same as [`write`](Self::write).
    pub fn to_xml(&self, message: &SamlMessage) -> SamlResult<String> {
        let bytes = match self.config.indent {
            Some(indent) => {
                let mut writer = XmlEventWriter::with_indent(Vec::new(), indent);
                self.write(message, &mut writer)?;
                writer.into_inner()
            }
            None => {
                let mut writer = XmlEventWriter::new(Vec::new());
                self.write(message, &mut writer)?;
                writer.into_inner()
            }
        };
        String::from_utf8(bytes).map_err(|e| SamlError::Processing(e.to_string()))
    }
}
