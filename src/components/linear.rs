//! Linear passive elements and their frequency-domain impedance.

use std::f64::consts::PI;

use num_complex::Complex64;

use super::{ElementKind, Unit};
use crate::error::{LadderError, Result};

/// A single passive element: what it is and how large it is.
///
/// The magnitude is kept in the unit the user declared it in; conversion to
/// the base unit happens when the impedance is evaluated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    kind: ElementKind,
    magnitude: f64,
    unit: Unit,
}

impl Element {
    /// Create an element, validating the magnitude and the unit against the kind.
    pub fn new(kind: ElementKind, magnitude: f64, unit: Unit) -> Result<Self> {
        if !magnitude.is_finite() || magnitude <= 0.0 {
            return Err(LadderError::InvalidMagnitude { value: magnitude });
        }
        if unit.quantity() != kind.quantity() {
            return Err(LadderError::invalid_unit(unit.symbol(), kind));
        }
        Ok(Self {
            kind,
            magnitude,
            unit,
        })
    }

    /// Create an element from a unit symbol such as `"kΩ"` or `"uF"`.
    pub fn parse(kind: ElementKind, magnitude: f64, unit: &str) -> Result<Self> {
        let unit = Unit::parse(unit, kind)?;
        Self::new(kind, magnitude, unit)
    }

    /// Create an element expressed in the base unit of its kind.
    pub fn base(kind: ElementKind, magnitude: f64) -> Result<Self> {
        Self::new(kind, magnitude, kind.quantity().base_unit())
    }

    /// Resistor in ohms.
    pub fn resistor(ohms: f64) -> Result<Self> {
        Self::base(ElementKind::Resistor, ohms)
    }

    /// Inductor in henries.
    pub fn inductor(henries: f64) -> Result<Self> {
        Self::base(ElementKind::Inductor, henries)
    }

    /// Capacitor in farads.
    pub fn capacitor(farads: f64) -> Result<Self> {
        Self::base(ElementKind::Capacitor, farads)
    }

    /// Inductive reactance XL in ohms, independent of frequency.
    pub fn inductive_reactance(ohms: f64) -> Result<Self> {
        Self::base(ElementKind::InductiveReactance, ohms)
    }

    /// Capacitive reactance XC in ohms, independent of frequency.
    pub fn capacitive_reactance(ohms: f64) -> Result<Self> {
        Self::base(ElementKind::CapacitiveReactance, ohms)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Magnitude in the declared unit.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Magnitude converted to the base unit (Ω, H or F).
    pub fn base_magnitude(&self) -> f64 {
        self.unit.to_base(self.magnitude)
    }

    /// Re-express the element in another unit of the same quantity.
    pub fn with_unit(&self, unit: Unit) -> Result<Self> {
        if unit.quantity() != self.kind.quantity() {
            return Err(LadderError::invalid_unit(unit.symbol(), self.kind));
        }
        let magnitude = self.magnitude * self.unit.factor() / unit.factor();
        Self::new(self.kind, magnitude, unit)
    }

    /// Complex impedance at `frequency_hz`.
    ///
    /// - Resistor: `R + j0`
    /// - Inductor: `j·2πfL`, exactly `0` at DC
    /// - Capacitor: `-j/(2πfC)`, `+j∞` (open) at DC or for a zero capacitance
    /// - Fixed reactances: `±jX` at any frequency
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        let value = self.base_magnitude();
        match self.kind {
            ElementKind::Resistor => Complex64::new(value, 0.0),
            ElementKind::Inductor => {
                // 2π·0·L is already 0; the branch keeps DC explicit
                if frequency_hz == 0.0 {
                    Complex64::new(0.0, 0.0)
                } else {
                    Complex64::new(0.0, 2.0 * PI * frequency_hz * value)
                }
            }
            ElementKind::Capacitor => {
                if value == 0.0 || frequency_hz == 0.0 {
                    Complex64::new(0.0, f64::INFINITY)
                } else {
                    Complex64::new(0.0, -1.0 / (2.0 * PI * frequency_hz * value))
                }
            }
            ElementKind::InductiveReactance => Complex64::new(0.0, value),
            ElementKind::CapacitiveReactance => Complex64::new(0.0, -value),
        }
    }
}
