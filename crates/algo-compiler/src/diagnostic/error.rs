//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during compilation.
///
/// Translation errors carry the 1-based source line they were raised on; a
/// single error aborts the whole translation and no partial output is kept.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read file '{}': {message}", path.display())]
    #[diagnostic(code(algo::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid configuration file '{}': {message}", path.display())]
    #[diagnostic(
        code(algo::config::invalid),
        help("The configuration is JSON, e.g. {{ \"target\": \"cpp\", \"tab\": \"    \" }}")
    )]
    InvalidConfig {
        path: PathBuf,
        message: String,
    },

    #[error("Unsupported target: {target}")]
    #[diagnostic(
        code(algo::config::unsupported_target),
        help("Supported targets are 'pseudo' (French pseudocode) and 'cpp' (C++)")
    )]
    UnsupportedTarget {
        target: String,
    },

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("'{keyword}' statement outside of a 'switch'")]
    #[diagnostic(
        code(algo::structure::outside_switch),
        help("Open a block with 'switch <expression>' before its 'case' and 'default' lines")
    )]
    OutsideSwitch {
        keyword: String,
        line: usize,
    },

    #[error("'return' statement in a procedure")]
    #[diagnostic(
        code(algo::structure::return_in_procedure),
        help("Procedures ('fx void ...') cannot return a value. Give the function a return type instead.")
    )]
    ReturnInProcedure {
        line: usize,
    },

    #[error("'return' statement outside of a function")]
    #[diagnostic(code(algo::structure::return_outside_function))]
    ReturnOutsideFunction {
        line: usize,
    },

    #[error("'end' statement without an open block")]
    #[diagnostic(
        code(algo::structure::unmatched_end),
        help("Every 'end' closes the most recent 'for', 'while', 'if', 'switch', 'case', 'default' or 'fx'")
    )]
    UnmatchedEnd {
        line: usize,
    },

    // =========================================================================
    // Parameter Errors
    // =========================================================================
    #[error("'{keyword}' statement does not have all its parameters set")]
    #[diagnostic(code(algo::params::missing))]
    MissingParameters {
        keyword: String,
        line: usize,
    },

    #[error("{type_name} is not a recognized variable type")]
    #[diagnostic(
        code(algo::types::unknown),
        help("Known types are: int, float, string, bool, char (and void as a return type)")
    )]
    UnknownType {
        type_name: String,
        line: usize,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The 1-based source line the error was raised on, if it came from a
    /// translation rather than from IO or configuration.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::OutsideSwitch { line, .. }
            | Self::ReturnInProcedure { line }
            | Self::ReturnOutsideFunction { line }
            | Self::UnmatchedEnd { line }
            | Self::MissingParameters { line, .. }
            | Self::UnknownType { line, .. } => Some(*line),
            Self::IoError { .. } | Self::InvalidConfig { .. } | Self::UnsupportedTarget { .. } => None,
        }
    }

    /// Formats the error the way it is shown to the user: `Error on line N : message.`
    pub fn report(&self) -> String {
        match self.line() {
            Some(line) => format!("Error on line {} : {}.", line, self),
            None => format!("Error : {}.", self),
        }
    }
}
