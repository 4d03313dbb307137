//! Rule settings and scalar value types used by profiles
//!
//! Declarations mix numeric and named severities (`"no-var": 2`,
//! `"no-shadow": "off"`, `"indent": [2, 2]`), so the types here accept
//! every spelling on input and serialize to the named form.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RawSeverity")]
pub enum Severity {
    /// Disable the rule (`0`)
    Off,
    /// Warning (`1`)
    Warn,
    /// Error (`2`)
    Error,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeverity {
    Code(u64),
    Float(f64),
    Name(String),
}

impl TryFrom<RawSeverity> for Severity {
    type Error = String;

    fn try_from(raw: RawSeverity) -> Result<Self, String> {
        match raw {
            RawSeverity::Code(code) => Severity::from_code(code),
            RawSeverity::Float(f) if f.fract() == 0.0 && f >= 0.0 => Severity::from_code(f as u64),
            RawSeverity::Float(f) => Err(format!("invalid severity {f}, expected 0, 1 or 2")),
            RawSeverity::Name(name) => name.parse(),
        }
    }
}

impl Severity {
    /// Map the numeric form (`0`, `1`, `2`)
    pub fn from_code(code: u64) -> Result<Self, String> {
        match code {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Error),
            other => Err(format!("invalid severity {other}, expected 0, 1 or 2")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "0" => Ok(Severity::Off),
            "warn" | "1" => Ok(Severity::Warn),
            "error" | "2" => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity '{other}', expected 'off', 'warn' or 'error'"
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Setting for a single rule: a severity alone, or a severity plus options
///
/// A one-element array (`["error"]`) is read as a bare severity.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSetting {
    Severity(Severity),
    WithOptions {
        severity: Severity,
        options: Vec<Value>,
    },
}

impl RuleSetting {
    /// Build a setting with options; empty options collapse to a bare severity
    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        if options.is_empty() {
            RuleSetting::Severity(severity)
        } else {
            RuleSetting::WithOptions { severity, options }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RuleSetting::Severity(severity) | RuleSetting::WithOptions { severity, .. } => {
                *severity
            }
        }
    }

    pub fn options(&self) -> &[Value] {
        match self {
            RuleSetting::Severity(_) => &[],
            RuleSetting::WithOptions { options, .. } => options,
        }
    }

    /// Whether the rule reports anything at all
    pub fn is_enabled(&self) -> bool {
        self.severity() != Severity::Off
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        RuleSetting::Severity(severity)
    }
}

impl fmt::Display for RuleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetting::Severity(severity) => write!(f, "{severity}"),
            RuleSetting::WithOptions { severity, options } => {
                write!(f, "{severity}")?;
                for option in options {
                    write!(f, " {option}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleSetting::Severity(severity) => severity.serialize(serializer),
            RuleSetting::WithOptions { severity, options } => {
                let mut seq = serializer.serialize_seq(Some(options.len() + 1))?;
                seq.serialize_element(severity)?;
                for option in options {
                    seq.serialize_element(option)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Level(Severity),
            List(Vec<Value>),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Level(severity)) => Ok(RuleSetting::Severity(severity)),
            Ok(Raw::List(items)) => {
                let mut items = items.into_iter();
                let first = items.next().ok_or_else(|| {
                    de::Error::custom("rule setting array must start with a severity")
                })?;
                let severity: Severity = serde_json::from_value(first).map_err(de::Error::custom)?;
                Ok(RuleSetting::with_options(severity, items.collect()))
            }
            Err(_) => Err(de::Error::custom(
                "expected a severity (0-2, 'off', 'warn', 'error') or [severity, ...options]",
            )),
        }
    }
}

/// Access level of a declared global variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RawGlobal")]
pub enum GlobalAccess {
    Readonly,
    Writable,
    Off,
}

impl GlobalAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalAccess::Readonly => "readonly",
            GlobalAccess::Writable => "writable",
            GlobalAccess::Off => "off",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGlobal {
    Flag(bool),
    Name(String),
}

impl TryFrom<RawGlobal> for GlobalAccess {
    type Error = String;

    fn try_from(raw: RawGlobal) -> Result<Self, Self::Error> {
        match raw {
            RawGlobal::Flag(true) => Ok(GlobalAccess::Writable),
            RawGlobal::Flag(false) => Ok(GlobalAccess::Readonly),
            RawGlobal::Name(name) => match name.as_str() {
                "writable" | "writeable" | "true" => Ok(GlobalAccess::Writable),
                "readonly" | "readable" | "false" => Ok(GlobalAccess::Readonly),
                "off" => Ok(GlobalAccess::Off),
                other => Err(format!(
                    "invalid global access '{other}', expected 'readonly', 'writable' or 'off'"
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_accepts_codes_and_names() {
        let parsed: Vec<Severity> = serde_json::from_value(json!([0, 1, 2, "off", "warn", "error"])).unwrap();
        assert_eq!(
            parsed,
            vec![
                Severity::Off,
                Severity::Warn,
                Severity::Error,
                Severity::Off,
                Severity::Warn,
                Severity::Error
            ]
        );
        assert!(serde_json::from_value::<Severity>(json!(3)).is_err());
        assert!(serde_json::from_value::<Severity>(json!("fatal")).is_err());
    }

    #[test]
    fn test_severity_from_raw_forms() {
        assert_eq!(Severity::try_from(RawSeverity::Code(2)), Ok(Severity::Error));
        assert_eq!(Severity::try_from(RawSeverity::Float(1.0)), Ok(Severity::Warn));
        assert_eq!(
            Severity::try_from(RawSeverity::Name("off".to_string())),
            Ok(Severity::Off)
        );
        assert!(Severity::try_from(RawSeverity::Float(1.5)).is_err());
        assert!(Severity::try_from(RawSeverity::Code(3)).is_err());
    }

    #[test]
    fn test_severity_serializes_named() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), r#""warn""#);
    }

    #[test]
    fn test_rule_setting_forms() {
        let bare: RuleSetting = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(bare, RuleSetting::Severity(Severity::Error));

        let single: RuleSetting = serde_json::from_value(json!(["error"])).unwrap();
        assert_eq!(single, RuleSetting::Severity(Severity::Error));

        let indent: RuleSetting = serde_json::from_value(json!([2, 2])).unwrap();
        assert_eq!(indent.severity(), Severity::Error);
        assert_eq!(indent.options(), &[json!(2)]);

        let emotion: RuleSetting = serde_json::from_value(json!(["error", "object"])).unwrap();
        assert_eq!(serde_json::to_value(&emotion).unwrap(), json!(["error", "object"]));
    }

    #[test]
    fn test_rule_setting_rejects_garbage() {
        assert!(serde_json::from_value::<RuleSetting>(json!([])).is_err());
        assert!(serde_json::from_value::<RuleSetting>(json!({"level": 2})).is_err());
        assert!(serde_json::from_value::<RuleSetting>(json!(["loud", 1])).is_err());
    }

    #[test]
    fn test_global_access_spellings() {
        let parsed: Vec<GlobalAccess> =
            serde_json::from_value(json!([true, false, "writeable", "readable", "off"])).unwrap();
        assert_eq!(
            parsed,
            vec![
                GlobalAccess::Writable,
                GlobalAccess::Readonly,
                GlobalAccess::Writable,
                GlobalAccess::Readonly,
                GlobalAccess::Off
            ]
        );
    }
}
