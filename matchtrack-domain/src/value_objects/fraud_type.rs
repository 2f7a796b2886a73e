// Fraud type value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FraudType(String);

impl FraudType {
    pub const CLICKER: &'static str = "clicker";
    pub const WOMAN_CLICKER_360: &'static str = "woman_clicker_360";

    /// Returns `None` for a blank label; detectors use that to mean "no fraud".
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn clicker() -> Self {
        Self(Self::CLICKER.to_string())
    }

    pub fn woman_clicker_360() -> Self {
        Self(Self::WOMAN_CLICKER_360.to_string())
    }
}

impl fmt::Display for FraudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
