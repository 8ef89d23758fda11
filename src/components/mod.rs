//! Component models for ladder reduction.
//!
//! This module provides the leaf-level pieces of the reducer:
//! - Units: per-quantity unit tables and conversion
//! - Linear: resistor, inductor and capacitor impedance, plus fixed reactances
//!
//! A [`Component`] is one entry of the ordered ladder: an [`Element`], the
//! [`Link`] that ties it to what came before, and a stable identity.

mod linear;
pub mod units;

pub use linear::Element;
pub use units::{convert, Quantity, Unit};

use std::fmt;

use num_complex::Complex64;

use crate::circuit::{ComponentId, Link};

/// The kinds of element a ladder can hold.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Resistor (Ω)
    Resistor,
    /// Inductor (H)
    Inductor,
    /// Capacitor (F)
    Capacitor,
    /// Inductive reactance XL given directly in ohms
    InductiveReactance,
    /// Capacitive reactance XC given directly in ohms
    CapacitiveReactance,
}

impl ElementKind {
    /// The quantity the element's magnitude is expressed in.
    pub fn quantity(&self) -> Quantity {
        match self {
            Self::Resistor | Self::InductiveReactance | Self::CapacitiveReactance => {
                Quantity::Resistance
            }
            Self::Inductor => Quantity::Inductance,
            Self::Capacitor => Quantity::Capacitance,
        }
    }

    /// Parse a kind from a component name prefix (`R1`, `L2`, `XC1`, ...).
    ///
    /// The two-letter reactance prefixes are checked before the single letters.
    pub fn from_prefix(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        if upper.starts_with("XL") {
            return Some(Self::InductiveReactance);
        }
        if upper.starts_with("XC") {
            return Some(Self::CapacitiveReactance);
        }
        match upper.chars().next()? {
            'R' => Some(Self::Resistor),
            'L' => Some(Self::Inductor),
            'C' => Some(Self::Capacitor),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resistor => "resistor",
            Self::Inductor => "inductor",
            Self::Capacitor => "capacitor",
            Self::InductiveReactance => "inductive reactance",
            Self::CapacitiveReactance => "capacitive reactance",
        };
        f.write_str(name)
    }
}

/// One entry of the ordered ladder.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Stable identity, preserved across edits
    pub id: ComponentId,
    /// Display name, e.g. `R1`
    pub name: String,
    /// Relationship to the preceding block
    pub link: Link,
    /// The physical element
    pub element: Element,
}

impl Component {
    pub fn new(id: ComponentId, name: impl Into<String>, element: Element, link: Link) -> Self {
        Self {
            id,
            name: name.into(),
            link,
            element,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    /// Complex impedance of this component at `frequency_hz`.
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        self.element.impedance(frequency_hz)
    }
}

/// Complex impedance of `component` at `frequency_hz`.
pub fn impedance(component: &Component, frequency_hz: f64) -> Complex64 {
    component.impedance(frequency_hz)
}
