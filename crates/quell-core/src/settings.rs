//! Setting identifiers and values mirrored from the background process

use crate::error::{QuellError, QuellResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of settings the UI may read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingName {
    /// Whether the onboarding wizard is shown in the popup
    PopupV3WizardEnabled,
    /// Global protection switch
    ProtectionEnabled,
    /// Absolute timestamp (ms) at which a protection pause ends, 0 when not paused
    ProtectionPauseExpires,
    /// Whether the popup notice has been dismissed
    NoticeHidden,
    /// Marker bumped by the background when filter lists change
    FiltersChanged,
}

impl SettingName {
    pub const ALL: [SettingName; 5] = [
        SettingName::PopupV3WizardEnabled,
        SettingName::ProtectionEnabled,
        SettingName::ProtectionPauseExpires,
        SettingName::NoticeHidden,
        SettingName::FiltersChanged,
    ];

    /// Wire identifier used by the background process
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingName::PopupV3WizardEnabled => "popup-v3-wizard-enabled",
            SettingName::ProtectionEnabled => "protection-enabled",
            SettingName::ProtectionPauseExpires => "protection-pause-expires",
            SettingName::NoticeHidden => "notice-hidden",
            SettingName::FiltersChanged => "filters-changed",
        }
    }

    /// Value kind the background stores for this setting
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingName::PopupV3WizardEnabled
            | SettingName::ProtectionEnabled
            | SettingName::NoticeHidden => SettingKind::Bool,
            SettingName::ProtectionPauseExpires => SettingKind::Number,
            SettingName::FiltersChanged => SettingKind::String,
        }
    }

    /// Value used before the background snapshot arrives
    pub fn default_value(&self) -> SettingValue {
        match self {
            SettingName::PopupV3WizardEnabled | SettingName::ProtectionEnabled => {
                SettingValue::Bool(true)
            }
            SettingName::NoticeHidden => SettingValue::Bool(false),
            SettingName::ProtectionPauseExpires => SettingValue::Number(0.0),
            SettingName::FiltersChanged => SettingValue::String(String::new()),
        }
    }

    /// Check that `value` has the kind this setting requires
    ///
    /// Timestamps must also be whole, non-negative milliseconds.
    pub fn check(&self, value: &SettingValue) -> QuellResult<()> {
        if value.kind() != self.kind() {
            return Err(QuellError::SettingType {
                name: self.as_str().to_string(),
                expected: self.kind().as_str(),
            });
        }

        match (self, value) {
            (SettingName::ProtectionPauseExpires, SettingValue::Number(n))
                if !(n.is_finite() && *n >= 0.0 && n.fract() == 0.0) =>
            {
                Err(QuellError::SettingType {
                    name: self.as_str().to_string(),
                    expected: "non-negative integer",
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingName {
    type Err = QuellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| QuellError::invalid_setting(s))
    }
}

/// Primitive type of a setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Number,
    String,
}

impl SettingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Bool => "boolean",
            SettingKind::Number => "number",
            SettingKind::String => "string",
        }
    }
}

/// Primitive setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Number(_) => SettingKind::Number,
            SettingValue::String(_) => SettingKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<u64> for SettingValue {
    fn from(value: u64) -> Self {
        SettingValue::Number(value as f64)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}
