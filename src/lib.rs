//! # acladder
//!
//! Equivalent impedance and steady-state analysis of series/parallel AC
//! ladders.
//!
//! A ladder is an ordered list of passive components (resistors, inductors,
//! capacitors, or fixed reactances). Every component after the first is
//! linked to the ladder built so far either in SERIES (a new block) or in
//! PARALLEL (merged with the block right before it).
//!
//! This library provides:
//! - Unit-aware component values and complex impedance at a given frequency
//! - Left-to-right reduction of the ladder to a single impedance
//! - Source current, per-component voltage and current, and power figures
//! - A small text format for describing ladders
//!
//! ## Architecture
//!
//! - [`dsl`] - Parser for the ladder description format
//! - [`circuit`] - The editable [`Ladder`] and chain validation
//! - [`components`] - Elements, units and impedance models
//! - [`solver`] - Reduction, analysis and frequency sweeps
//! - [`format`] - Rectangular and polar rendering of phasors
//!
//! ## Usage
//!
//! ```
//! use acladder::{analyze, dsl, Ladder};
//!
//! let ast = dsl::parse("R1 first 30\nXC1 series 40\n").unwrap();
//! let ladder = Ladder::from_ast(&ast).unwrap();
//! let analysis = analyze(ladder.components(), 60.0, 100.0).unwrap();
//!
//! assert!((analysis.impedance.norm() - 50.0).abs() < 1e-9);
//! assert!((analysis.current.norm() - 2.0).abs() < 1e-9);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! acladder filter.lad --frequency 1000 --voltage 10
//! acladder filter.lad --sweep 10 100000 50 --log
//! ```

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod format;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{ComponentId, Ladder, Link};
pub use components::{Component, Element, ElementKind, Unit};
pub use error::{LadderError, Result};
pub use solver::{analyze, analyze_with, reduce, reduce_with, Analysis, OperatingPoint, ReducerConfig, ZeroBranchPolicy};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLadder;

/// Default source frequency in Hz
pub const DEFAULT_FREQUENCY_HZ: f64 = 60.0;

/// Default source voltage (RMS magnitude, phase 0)
pub const DEFAULT_VOLTAGE: f64 = 120.0;
