//! Error types for the ladder reducer.
//!
//! This module provides a unified error type [`LadderError`] that covers
//! every failure that can occur while describing a ladder, reducing it, or
//! analyzing it against an operating point. Each failure aborts only the
//! call that raised it.

use thiserror::Error;

use crate::components::ElementKind;

/// Result type alias using [`LadderError`].
pub type Result<T> = std::result::Result<T, LadderError>;

/// Unified error type for all ladder operations.
#[derive(Error, Debug)]
pub enum LadderError {
    // ============ Description Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    // ============ Component Errors ============
    /// Unit symbol not recognized for the component kind
    #[error("Unit '{unit}' is not valid for component kind '{kind}'")]
    InvalidUnit { unit: String, kind: ElementKind },

    /// Magnitude that is zero, negative or not finite
    #[error("Component magnitude must be positive and finite (got {value})")]
    InvalidMagnitude { value: f64 },

    /// Component id not present in the ladder
    #[error("Component #{id} not found in ladder")]
    ComponentNotFound { id: usize },

    // ============ Chain Errors ============
    /// The link sequence breaks the FIRST-leads invariant
    #[error("Malformed chain at position {position}: {message}")]
    MalformedChain { position: usize, message: String },

    /// Reduction requested on a ladder with no components
    #[error("Ladder has no components")]
    EmptyChain,

    // ============ Operating Point Errors ============
    /// Frequency that is negative or not finite
    #[error("Frequency must be finite and non-negative (got {value} Hz)")]
    InvalidFrequency { value: f64 },

    /// Source voltage magnitude that is negative or not finite
    #[error("Source voltage magnitude must be finite and non-negative (got {value} V)")]
    InvalidVoltage { value: f64 },

    /// Current requested through a (near) zero total impedance
    #[error("Total impedance {impedance} is a short circuit; current is undefined")]
    OpenCircuitCurrent { impedance: String },

    /// Total impedance came out as NaN
    #[error("Numerical error in total impedance ({impedance})")]
    NumericalError { impedance: String },

    // ============ I/O Errors ============
    /// Error reading a ladder description file
    #[error("Failed to read ladder file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error rendering results
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl LadderError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a malformed chain error
    pub fn malformed(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedChain {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid unit error
    pub fn invalid_unit(unit: impl Into<String>, kind: ElementKind) -> Self {
        Self::InvalidUnit {
            unit: unit.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LadderError::invalid_unit("mH", ElementKind::Capacitor);
        assert_eq!(err.to_string(), "Unit 'mH' is not valid for component kind 'capacitor'");

        let err = LadderError::malformed(0, "parallel link with no preceding block");
        assert!(err.to_string().contains("position 0"));
    }
}
