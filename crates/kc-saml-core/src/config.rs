//! Codec configuration.
//!
//! Replaces process-wide marshaller state: every [`crate::SamlCodec`] is
//! built from an explicit `SamlConfig`, which can be deserialized from any
//! serde format.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};

/// Configuration for parsing, writing and building SAML messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamlConfig {
    /// Run the registered schema validator before parsing.
    pub schema_validation: bool,
    /// Lifetime of factory-built `SubjectConfirmationData`, in seconds.
    pub subject_confirmation_validity_secs: i64,
    /// Drop whitespace-only text between elements when reading.
    pub trim_text: bool,
    /// Indent written XML by this many spaces; compact when unset.
    pub indent: Option<usize>,
}

impl SamlConfig {
    /// Returns the subject confirmation validity window.
    #[must_use]
    pub fn subject_confirmation_validity(&self) -> Duration {
        Duration::seconds(self.subject_confirmation_validity_secs)
    }

    /// Checks the configuration for values that can never work.
    pub fn validate(&self) -> SamlResult<()> {
        if self.subject_confirmation_validity_secs <= 0 {
            return Err(SamlError::Configuration(format!(
                "subject_confirmation_validity_secs must be positive, got {}",
                self.subject_confirmation_validity_secs
            )));
        }
        Ok(())
    }
}

impl Default for SamlConfig {
    fn default() -> Self {
        Self {
            schema_validation: false,
            subject_confirmation_validity_secs: 300,
            trim_text: true,
            indent: None,
        }
    }
}
