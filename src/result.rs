use std::{fmt, str::FromStr};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Pre,
    Post,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown phase {0:?}, expected \"pre\" or \"post\"")]
pub struct ParsePhaseError(String);

impl FromStr for Phase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Phase::Pre),
            "post" => Ok(Phase::Post),
            other => Err(ParsePhaseError(other.to_string())),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Pre => "pre",
            Phase::Post => "post",
        })
    }
}

/// Analysis backend answer. Only presence and shape are checked here, cells
/// stay raw JSON until rendered.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub pre_patient: Option<Value>,
    #[serde(default)]
    pub post_patient: Option<Value>,
    #[serde(default)]
    pub temporal: Option<Value>,
    #[serde(default)]
    pub kinematic: Option<Value>,
}

impl AnalysisResult {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Message to show when the backend flagged the upload. Falsy values
    /// (`null`, `false`, `0`, `""`) do not count as an error.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Patient mapping for a phase, `None` when absent or not an object.
    pub fn patient(&self, phase: Phase) -> Option<&Map<String, Value>> {
        let patient = match phase {
            Phase::Pre => self.pre_patient.as_ref(),
            Phase::Post => self.post_patient.as_ref(),
        };

        patient?.as_object()
    }
}
