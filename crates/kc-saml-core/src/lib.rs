//! SAML 2.0 message codec.
//!
//! This crate reads SAML 2.0 federation messages from an XML event stream
//! into typed values and writes them back out:
//!
//! - **Dispatch** - pick the grammar for a document from its first element
//! - **Element parsers** - requests, responses, assertions, metadata and the
//!   XACML authorization decision query
//! - **Writers** - wire-ready XML for requests, responses and assertions
//! - **Factory** - identity provider responses and attribute statements
//!
//! # Architecture
//!
//! - [`types`] - Core SAML types and data structures
//! - [`xml`] - Event cursor and sink abstractions over `quick-xml`
//! - [`parser`] - Dispatcher and element grammars
//! - [`writer`] - Message writers
//! - [`factory`] - Response and attribute statement construction
//! - [`codec`] - Configured facade over all of the above
//! - [`error`] - Error types for SAML operations
//!
//! # Example
//!
//! ```rust,ignore
//! use kc_saml_core::{SamlCodec, SamlConfig, SamlMessage};
//!
//! let codec = SamlCodec::new(SamlConfig::default())?;
//! match codec.parse_str(xml)? {
//!     SamlMessage::AuthnRequest(request) => println!("login from {:?}", request.issuer),
//!     other => println!("got <{}>", other.element_name()),
//! }
//! ```
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)
//! - [SAML 2.0 Metadata](https://docs.oasis-open.org/security/saml/v2.0/saml-metadata-2.0-os.pdf)
//! - [SAML 2.0 Profile of XACML v2.0](https://docs.oasis-open.org/xacml/2.0/access_control-xacml-2.0-saml-profile-spec-os.pdf)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod factory;
pub mod parser;
pub mod types;
pub mod writer;
pub mod xml;

pub use codec::{SamlCodec, SchemaValidator};
pub use config::SamlConfig;
pub use error::{ErrorKind, SamlError, SamlResult};
pub use factory::{IdpInfo, IssuerInfo, ResponseFactory, SpInfo};
pub use parser::{ElementParser, SamlParser};
pub use types::*;
