//! Core error types for org chart layout
//!
//! Only conditions that prevent a layout from being produced at all are errors.
//! Problems with individual records are reported as [`LayoutWarning`]s instead.

use thiserror::Error;

use super::LayoutWarning;

/// Core error types for the layout pipeline
#[derive(Error, Debug)]
pub enum OrgChartError {
    #[error("Empty input: no valid entities to lay out ({} rejected)", .warnings.len())]
    EmptyInput { warnings: Vec<LayoutWarning> },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl OrgChartError {
    /// Create a new empty-input error carrying the diagnostics that emptied it
    pub fn empty_input(warnings: Vec<LayoutWarning>) -> Self {
        Self::EmptyInput { warnings }
    }

    /// Create a new config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
            column,
        }
    }

    /// Warnings attached to the error, if any
    pub fn warnings(&self) -> &[LayoutWarning] {
        match self {
            Self::EmptyInput { warnings } => warnings,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for OrgChartError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string(), err.line(), err.column())
    }
}
