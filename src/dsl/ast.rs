//! Abstract Syntax Tree types for the ladder description language.

use crate::circuit::Link;
use crate::components::ElementKind;
use crate::error::Result;
use crate::solver::{OperatingPoint, ReducerConfig, ZeroBranchPolicy};

/// Complete AST representation of a parsed ladder description.
#[derive(Debug, Clone, Default)]
pub struct LadderAst {
    /// Element lines in ladder order
    pub components: Vec<ElementDef>,
    /// Source frequency from `.frequency`
    pub frequency: Option<f64>,
    /// Source voltage from `.source`
    pub source: Option<SourceDef>,
    /// Zero-branch policy from `.policy`
    pub policy: Option<ZeroBranchPolicy>,
}

/// One element line: `<name> <link> <value> [unit]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    /// Kind inferred from the name prefix
    pub kind: ElementKind,
    /// Unique element name
    pub name: String,
    pub link: Link,
    /// Magnitude as written
    pub value: f64,
    /// Unit symbol as written, if any
    pub unit: Option<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Source voltage directive: `.source <magnitude> [phase_deg]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceDef {
    /// RMS magnitude in volts
    pub magnitude: f64,
    /// Phase in degrees
    pub phase_deg: f64,
}

impl LadderAst {
    /// Create a new empty AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operating point from the directives, falling back to the given defaults.
    pub fn operating_point(&self, default_frequency_hz: f64, default_voltage: f64) -> Result<OperatingPoint> {
        let frequency_hz = self.frequency.unwrap_or(default_frequency_hz);
        match self.source {
            Some(source) => OperatingPoint::with_phase_degrees(frequency_hz, source.magnitude, source.phase_deg),
            None => OperatingPoint::new(frequency_hz, default_voltage),
        }
    }

    /// Reducer configuration with the `.policy` directive applied.
    pub fn reducer_config(&self) -> ReducerConfig {
        let config = ReducerConfig::new();
        match self.policy {
            Some(policy) => config.with_zero_branch(policy),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_operating_point_defaults() {
        let op = LadderAst::new().operating_point(60.0, 120.0).unwrap();
        assert_eq!(op.frequency_hz, 60.0);
        assert_relative_eq!(op.voltage_magnitude(), 120.0);
        assert_eq!(LadderAst::new().reducer_config().zero_branch, ZeroBranchPolicy::Exclude);
    }

    #[test]
    fn test_operating_point_from_directives() {
        let ast = LadderAst {
            frequency: Some(50.0),
            source: Some(SourceDef {
                magnitude: 10.0,
                phase_deg: 90.0,
            }),
            policy: Some(ZeroBranchPolicy::ShortDominates),
            ..LadderAst::default()
        };
        let op = ast.operating_point(60.0, 120.0).unwrap();
        assert_eq!(op.frequency_hz, 50.0);
        assert_relative_eq!(op.voltage.im, 10.0, epsilon = 1e-12);
        assert_relative_eq!(op.voltage.re, 0.0, epsilon = 1e-12);
        assert_eq!(ast.reducer_config().zero_branch, ZeroBranchPolicy::ShortDominates);
    }

    #[test]
    fn test_operating_point_rejects_bad_frequency() {
        let ast = LadderAst {
            frequency: Some(-1.0),
            ..LadderAst::default()
        };
        assert!(ast.operating_point(60.0, 120.0).is_err());
    }
}
