/*!
 * Error types for the assedit library.
 *
 * This module contains custom error types for the different parts of the editor,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::document::LineId;

/// Errors that can occur while editing subtitle lines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// A text operation was requested while no line is active
    #[error("No active line to edit")]
    NoActiveLine,

    /// A line identifier does not belong to the document
    #[error("Unknown line: {0}")]
    UnknownLine(LineId),

    /// A color literal could not be parsed
    #[error("Invalid color literal: {0}")]
    InvalidColor(String),

    /// A toggle flag name was not recognized
    #[error("Unknown formatting flag: {0}")]
    UnknownFlag(String),

    /// A color slot name was not recognized
    #[error("Unknown color slot: {0}")]
    UnknownColorSlot(String),
}

/// Errors raised by configuration handling
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an edit operation
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
