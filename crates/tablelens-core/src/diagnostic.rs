//! Host diagnostics
//!
//! Never produced by tablelens itself; modelled so that the proxy can forward
//! the host's diagnostics operation with its exact payload.

use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

/// Diagnostic category as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    /// Informational message
    Message,

    /// Editor suggestion, usually rendered as a hint
    Suggestion,

    /// Warning - should be reviewed but not blocking
    Warning,

    /// Error - the program does not type-check
    Error,
}

impl std::fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Suggestion => write!(f, "suggestion"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic with its location in the program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,

    /// Numeric host diagnostic code
    pub code: u32,

    pub message_text: String,

    /// File the diagnostic belongs to (global diagnostics have none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<TextSpan>,
}

impl Diagnostic {
    /// Create a global diagnostic
    pub fn new(category: DiagnosticCategory, code: u32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message_text: message.into(),
            file_name: None,
            span: None,
        }
    }

    /// Attach a file location
    pub fn with_location(mut self, file_name: impl Into<String>, span: TextSpan) -> Self {
        self.file_name = Some(file_name.into());
        self.span = Some(span);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}
