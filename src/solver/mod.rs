//! Ladder reduction and circuit analysis.
//!
//! This module provides the numerical core.
//!
//! ## Ladder reduction
//!
//! The component list is folded left to right into a sequence of blocks:
//!
//! ```text
//! R1(first) L1(series) C1(parallel) C2(parallel) R2(series)
//!
//! [R1] [L1 ‖ C1 ‖ C2] [R2]     Z_total = Z_R1 + Z_group + Z_R2
//! ```
//!
//! A SERIES or FIRST component opens a block of its own. A run of PARALLEL
//! components pops the block right before it and merges with it by summing
//! admittances. All remaining blocks sit in series at the top level.
//!
//! ## Analysis
//!
//! Given a source phasor V the analyzer derives `I = V / Z_total`, walks the
//! same blocks to attribute voltage and current to every component, and
//! computes the complex power `S = V·conj(I)`.

mod analyze;
mod reduce;
pub mod sweep;

pub use analyze::{analyze, analyze_with, Analysis, BranchState, ComponentReport, OperatingPoint};
pub use reduce::{combine_parallel, reduce, reduce_blocks, reduce_with, Block, Branch};
pub use sweep::{sweep, SweepPoint};

use crate::error::{LadderError, Result};

/// Threshold below which a total impedance counts as a short circuit.
pub const DEFAULT_SHORT_THRESHOLD: f64 = 1e-9;

/// What a parallel merge does with a branch whose impedance is exactly zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroBranchPolicy {
    /// Leave the branch's admittance out of the sum and merge the rest.
    #[default]
    Exclude,
    /// A zero-ohm branch shorts the whole group to 0 Ω.
    ShortDominates,
}

impl ZeroBranchPolicy {
    /// Parse a policy keyword (`exclude` or `dominate`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "exclude" | "skip" => Some(Self::Exclude),
            "dominate" | "dominates" | "short" => Some(Self::ShortDominates),
            _ => None,
        }
    }
}

/// Configuration for reduction and analysis.
#[derive(Debug, Clone)]
pub struct ReducerConfig {
    /// Handling of exactly-zero branches inside a parallel group.
    pub zero_branch: ZeroBranchPolicy,
    /// |Z_total| at or below this is a short circuit (ohms).
    pub short_threshold: f64,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            zero_branch: ZeroBranchPolicy::default(),
            short_threshold: DEFAULT_SHORT_THRESHOLD,
        }
    }
}

impl ReducerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zero-branch policy.
    pub fn with_zero_branch(mut self, policy: ZeroBranchPolicy) -> Self {
        self.zero_branch = policy;
        self
    }

    /// Set the short-circuit threshold (in ohms).
    ///
    /// The same value bounds |S| when the power factor is computed.
    pub fn with_short_threshold(mut self, threshold: f64) -> Self {
        self.short_threshold = threshold;
        self
    }
}

/// Reject negative, NaN and infinite frequencies. DC (0 Hz) is valid.
pub(crate) fn check_frequency(frequency_hz: f64) -> Result<()> {
    if !frequency_hz.is_finite() || frequency_hz < 0.0 {
        return Err(LadderError::InvalidFrequency {
            value: frequency_hz,
        });
    }
    Ok(())
}
