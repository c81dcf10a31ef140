use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wizard::{BackendKind, PrimaryAction};
use crate::error::{Result, StowageError};

/// A single entry in a [`SettingsStore`](super::SettingsStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValue {
    Text(String),
    Integer(i64),
    Flag(bool),
    Time(DateTime<Utc>),
    Action(PrimaryAction),
    Backend(BackendKind),
}

/// The variant a property is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Flag,
    Time,
    Action,
    Backend,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Flag => "flag",
            ValueKind::Time => "time",
            ValueKind::Action => "action",
            ValueKind::Backend => "backend",
        }
    }
}

impl SettingValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Text(_) => ValueKind::Text,
            SettingValue::Integer(_) => ValueKind::Integer,
            SettingValue::Flag(_) => ValueKind::Flag,
            SettingValue::Time(_) => ValueKind::Time,
            SettingValue::Action(_) => ValueKind::Action,
            SettingValue::Backend(_) => ValueKind::Backend,
        }
    }

    /// Parse user-entered text into a value of the given kind.
    ///
    /// Times are RFC 3339; flags accept `true`/`false` in any case.
    pub fn parse_as(kind: ValueKind, key: &str, raw: &str) -> Result<Self> {
        let invalid = |reason: String| StowageError::InvalidSettingValue {
            key: key.to_string(),
            raw: raw.to_string(),
            reason,
        };
        let trimmed = raw.trim();

        match kind {
            ValueKind::Text => Ok(SettingValue::Text(raw.to_string())),
            ValueKind::Integer => trimmed
                .parse()
                .map(SettingValue::Integer)
                .map_err(|e| invalid(format!("{e}"))),
            ValueKind::Flag => trimmed
                .to_lowercase()
                .parse()
                .map(SettingValue::Flag)
                .map_err(|e| invalid(format!("{e}"))),
            ValueKind::Time => DateTime::parse_from_rfc3339(trimmed)
                .map(|t| SettingValue::Time(t.with_timezone(&Utc)))
                .map_err(|e| invalid(format!("{e}"))),
            ValueKind::Action => trimmed
                .parse()
                .map(SettingValue::Action)
                .map_err(invalid),
            ValueKind::Backend => trimmed
                .parse()
                .map(SettingValue::Backend)
                .map_err(invalid),
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Text(s) => f.write_str(s),
            SettingValue::Integer(n) => write!(f, "{n}"),
            SettingValue::Flag(b) => write!(f, "{b}"),
            SettingValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
            SettingValue::Action(a) => write!(f, "{a}"),
            SettingValue::Backend(b) => write!(f, "{b}"),
        }
    }
}

/// Typed extraction from a stored [`SettingValue`].
///
/// `None` means the stored variant cannot represent `Self`; the facade turns
/// that into [`StowageError::TypeMismatch`].
pub trait FromSetting: Sized {
    const KIND: ValueKind;

    fn from_setting(value: &SettingValue) -> Option<Self>;
}

impl FromSetting for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromSetting for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromSetting for u32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Integer(n) => u32::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl FromSetting for u16 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Integer(n) => u16::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl FromSetting for bool {
    const KIND: ValueKind = ValueKind::Flag;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromSetting for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Time;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl FromSetting for PrimaryAction {
    const KIND: ValueKind = ValueKind::Action;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Action(a) => Some(*a),
            _ => None,
        }
    }
}

impl FromSetting for BackendKind {
    const KIND: ValueKind = ValueKind::Backend;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Backend(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Integer(i64::from(value))
    }
}

impl From<u16> for SettingValue {
    fn from(value: u16) -> Self {
        SettingValue::Integer(i64::from(value))
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

impl From<DateTime<Utc>> for SettingValue {
    fn from(value: DateTime<Utc>) -> Self {
        SettingValue::Time(value)
    }
}

impl From<PrimaryAction> for SettingValue {
    fn from(value: PrimaryAction) -> Self {
        SettingValue::Action(value)
    }
}

impl From<BackendKind> for SettingValue {
    fn from(value: BackendKind) -> Self {
        SettingValue::Backend(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_conversions_reject_out_of_range() {
        assert_eq!(u16::from_setting(&SettingValue::Integer(22)), Some(22));
        assert_eq!(u16::from_setting(&SettingValue::Integer(70_000)), None);
        assert_eq!(u32::from_setting(&SettingValue::Integer(-1)), None);
    }

    #[test]
    fn test_parse_as_each_kind() {
        assert_eq!(
            SettingValue::parse_as(ValueKind::Integer, "k", " 42 ").unwrap(),
            SettingValue::Integer(42)
        );
        assert_eq!(
            SettingValue::parse_as(ValueKind::Flag, "k", "TRUE").unwrap(),
            SettingValue::Flag(true)
        );
        assert_eq!(
            SettingValue::parse_as(ValueKind::Backend, "k", "ssh").unwrap(),
            SettingValue::Backend(BackendKind::Ssh)
        );
        assert_eq!(
            SettingValue::parse_as(ValueKind::Action, "k", "runnow").unwrap(),
            SettingValue::Action(PrimaryAction::RunNow)
        );
        let time = SettingValue::parse_as(ValueKind::Time, "k", "2024-03-01T10:00:00Z").unwrap();
        assert_eq!(time.to_string(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_as_reports_key_and_raw() {
        match SettingValue::parse_as(ValueKind::Integer, "MaxFullBackups", "many") {
            Err(StowageError::InvalidSettingValue { key, raw, .. }) => {
                assert_eq!(key, "MaxFullBackups");
                assert_eq!(raw, "many");
            }
            other => panic!("expected InvalidSettingValue, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_tagged_representation() {
        let value = SettingValue::Backend(BackendKind::S3);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"backend":"s3"}"#);
        let back: SettingValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
