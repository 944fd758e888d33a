//! SAML 2.0 types and data structures.
//!
//! This module contains the typed representations produced by the parsers
//! and consumed by the writers: protocol messages, assertions, metadata and
//! the XACML query extension.

mod assertion;
mod authn_request;
mod constants;
mod logout;
mod message;
mod metadata;
mod name_id;
mod response;
mod status;
mod xacml;

pub use assertion::*;
pub use authn_request::*;
pub use constants::*;
pub use logout::*;
pub use message::*;
pub use metadata::*;
pub use name_id::*;
pub use response::*;
pub use status::*;
pub use xacml::*;
