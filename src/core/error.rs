use thiserror::Error;

use crate::checksum::ChecksumError;
#[cfg(feature = "template")]
use crate::template::ConfigError;

/// Errors that can occur during invoice construction, reference
/// computation or template processing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactureError {
    /// One or more validation rules failed. Carries every violation found.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// A checksum was asked for an input outside its contract.
    #[error("checksum error: {0}")]
    Checksum(#[from] ChecksumError),

    /// A template or configuration file is missing or malformed.
    #[cfg(feature = "template")]
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FactureError {
    /// The individual validation errors, empty for any other kind.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "patient.email", "services[1].code").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Name of the violated rule if applicable (e.g. "tariff-code").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule name.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error tagged with the rule it violates.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
