//! Unit prefixes for component magnitudes.
//!
//! Every [`ElementKind`] measures one physical quantity and owns a fixed table
//! of unit symbols, each with a multiplicative factor relative to the base
//! unit of that quantity (Ω, H or F). Conversion never rounds.

use std::fmt;

use super::ElementKind;
use crate::error::{LadderError, Result};

/// The physical quantity a component magnitude is expressed in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Ohms (resistance or a fixed reactance)
    Resistance,
    /// Henries
    Inductance,
    /// Farads
    Capacitance,
}

impl Quantity {
    /// Units recognized for this quantity, base unit first.
    pub fn units(&self) -> &'static [Unit] {
        match self {
            Quantity::Resistance => &[Unit::Ohm, Unit::KiloOhm, Unit::MegaOhm],
            Quantity::Inductance => &[Unit::Henry, Unit::MilliHenry, Unit::MicroHenry],
            Quantity::Capacitance => &[
                Unit::Farad,
                Unit::MilliFarad,
                Unit::MicroFarad,
                Unit::NanoFarad,
                Unit::PicoFarad,
            ],
        }
    }

    /// The base unit (factor 1.0).
    pub fn base_unit(&self) -> Unit {
        self.units()[0]
    }
}

/// A unit symbol together with its scale factor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Ohm,
    KiloOhm,
    MegaOhm,
    Henry,
    MilliHenry,
    MicroHenry,
    Farad,
    MilliFarad,
    MicroFarad,
    NanoFarad,
    PicoFarad,
}

impl Unit {
    /// Canonical symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Ohm => "Ω",
            Unit::KiloOhm => "kΩ",
            Unit::MegaOhm => "MΩ",
            Unit::Henry => "H",
            Unit::MilliHenry => "mH",
            Unit::MicroHenry => "µH",
            Unit::Farad => "F",
            Unit::MilliFarad => "mF",
            Unit::MicroFarad => "µF",
            Unit::NanoFarad => "nF",
            Unit::PicoFarad => "pF",
        }
    }

    /// Multiplicative factor relative to the base unit of the quantity.
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Ohm | Unit::Henry | Unit::Farad => 1.0,
            Unit::KiloOhm => 1e3,
            Unit::MegaOhm => 1e6,
            Unit::MilliHenry | Unit::MilliFarad => 1e-3,
            Unit::MicroHenry | Unit::MicroFarad => 1e-6,
            Unit::NanoFarad => 1e-9,
            Unit::PicoFarad => 1e-12,
        }
    }

    /// The quantity this unit measures.
    pub fn quantity(&self) -> Quantity {
        match self {
            Unit::Ohm | Unit::KiloOhm | Unit::MegaOhm => Quantity::Resistance,
            Unit::Henry | Unit::MilliHenry | Unit::MicroHenry => Quantity::Inductance,
            Unit::Farad
            | Unit::MilliFarad
            | Unit::MicroFarad
            | Unit::NanoFarad
            | Unit::PicoFarad => Quantity::Capacitance,
        }
    }

    /// Look up a unit symbol in the table owned by `kind`.
    ///
    /// Accepts the canonical symbols plus ASCII spellings (`ohm`, `kohm`,
    /// `uH`, `uF`, ...). Both the micro sign and the Greek mu are accepted, as are both omegas.
    /// Prefixes are case-sensitive (`mF` and `MΩ` differ).
    pub fn parse(symbol: &str, kind: ElementKind) -> Result<Unit> {
        let candidate = Self::from_symbol(symbol.trim())
            .ok_or_else(|| LadderError::invalid_unit(symbol, kind))?;
        if candidate.quantity() != kind.quantity() {
            return Err(LadderError::invalid_unit(symbol, kind));
        }
        Ok(candidate)
    }

    fn from_symbol(symbol: &str) -> Option<Unit> {
        // Greek mu and the ohm sign are folded onto the canonical code points
        let normalized = symbol
            .replace('\u{03bc}', "\u{00b5}")
            .replace('\u{2126}', "\u{03a9}");
        let unit = match normalized.as_str() {
            "Ω" | "Ohm" | "ohm" | "OHM" | "ohms" => Unit::Ohm,
            "kΩ" | "kohm" | "kOhm" => Unit::KiloOhm,
            "MΩ" | "Mohm" | "MOhm" | "meg" => Unit::MegaOhm,
            "H" => Unit::Henry,
            "mH" => Unit::MilliHenry,
            "µH" | "uH" => Unit::MicroHenry,
            "F" => Unit::Farad,
            "mF" => Unit::MilliFarad,
            "µF" | "uF" => Unit::MicroFarad,
            "nF" => Unit::NanoFarad,
            "pF" => Unit::PicoFarad,
            _ => return None,
        };
        Some(unit)
    }

    /// Express `value` (given in `self`) in the base unit.
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

/// Convert `value` from `from_unit` to `to_unit`, both looked up in the unit
/// table of `kind`.
///
/// Fails with [`LadderError::InvalidUnit`] when either symbol is not
/// recognized for the kind.
pub fn convert(value: f64, from_unit: &str, to_unit: &str, kind: ElementKind) -> Result<f64> {
    let from = Unit::parse(from_unit, kind)?;
    let to = Unit::parse(to_unit, kind)?;
    Ok(value * from.factor() / to.factor())
}
