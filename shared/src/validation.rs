use std::fmt;
use std::str::FromStr;
use crate::models::{Entry, SubmitRequest};

pub const REQUIRED_CHOICES: usize = 3;
pub const MIN_CHOICES: usize = 1;

/// How many choices a submission has to carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChoicePolicy {
    #[default]
    ExactlyThree,
    AtLeastOne,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Name is missing or empty")]
    MissingName,
    #[error("Choices are missing")]
    MissingChoices,
    #[error("Got {found} choices, policy {policy} does not allow it")]
    WrongChoiceCount { policy: ChoicePolicy, found: usize },
    #[error("Malformed submission: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("Unknown choice policy '{0}' (expected exactly-three or at-least-one)")]
pub struct UnknownPolicy(pub String);

impl ChoicePolicy {
    pub fn allows(self, count: usize) -> bool {
        match self {
            ChoicePolicy::ExactlyThree => count == REQUIRED_CHOICES,
            ChoicePolicy::AtLeastOne => count >= MIN_CHOICES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChoicePolicy::ExactlyThree => "exactly-three",
            ChoicePolicy::AtLeastOne => "at-least-one",
        }
    }
}

impl fmt::Display for ChoicePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoicePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exactly-three" | "exactly-3" | "exact" => Ok(ChoicePolicy::ExactlyThree),
            "at-least-one" | "at-least-1" | "min-one" => Ok(ChoicePolicy::AtLeastOne),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

impl SubmitRequest {
    /// Reads a submission out of an arbitrary JSON document. Anything that
    /// is not an object with a string `name` and a string array `choices`
    /// is rejected as malformed.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::Malformed("expected a JSON object".into()));
        }
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }
}

pub fn validate_submission(request: SubmitRequest, policy: ChoicePolicy) -> Result<Entry, ValidationError> {
    let name = match request.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ValidationError::MissingName),
    };

    let Some(choices) = request.choices else {
        return Err(ValidationError::MissingChoices);
    };

    if !policy.allows(choices.len()) {
        return Err(ValidationError::WrongChoiceCount { policy, found: choices.len() });
    }

    Ok(Entry::new(name, choices))
}
