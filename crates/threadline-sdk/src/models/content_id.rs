use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content id returned by the pinning service
///
/// Values read back from the chain are kept verbatim; [`ContentId::parse`]
/// validates and normalizes ids that come fresh from the content store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn parse(value: &str) -> Result<Self> {
        threadline_client::pinning::parse_cid(value)
            .map(Self)
            .map_err(|e| SdkError::ContentStore(e.to_string()))
    }

    /// Wrap a value without validation
    pub fn unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
