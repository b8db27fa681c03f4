use std::fmt;

use thiserror::Error;

/// A single validation problem: the field path that failed and the
/// validator's message for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted path of the failing field (a bare key for top-level fields).
    pub path: String,
    /// Human-readable reason, e.g. `Required` or `Invalid url`.
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn required(path: &str) -> Self {
        Self::new(path, "Required")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum EnvfigError {
    /// The raw source failed schema validation. Carries the full ordered
    /// issue list so the caller can fix every problem in one pass.
    #[error("{}", read_config_message(prefix.as_deref(), issues))]
    ReadConfig {
        /// The prefix in effect during the failed load, if any.
        prefix: Option<String>,
        issues: Vec<Issue>,
    },

    #[error("Name is required — call .name() on the builder")]
    NameRequired,

    #[error("Failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
}

impl EnvfigError {
    /// The per-field issues behind a validation failure; empty for other
    /// error kinds.
    pub fn issues(&self) -> &[Issue] {
        match self {
            EnvfigError::ReadConfig { issues, .. } => issues,
            _ => &[],
        }
    }
}

fn read_config_message(prefix: Option<&str>, issues: &[Issue]) -> String {
    let mut msg = String::from("Could not read config");
    if let Some(prefix) = prefix
        && !prefix.is_empty()
    {
        msg.push_str(&format!(" (prefix '{prefix}')"));
    }
    msg.push_str(" -- ");
    let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
    msg.push_str(&details.join(", "));
    msg
}
