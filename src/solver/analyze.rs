//! Operating-point analysis of a reduced ladder.

use std::fmt;

use log::{debug, warn};
use num_complex::Complex64;

use super::reduce::{reduce_blocks, Block};
use super::{check_frequency, ReducerConfig, ZeroBranchPolicy};
use crate::circuit::{ComponentId, Link};
use crate::components::Component;
use crate::error::{LadderError, Result};
use crate::format;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Source voltage phasor and frequency the ladder is driven at.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Source frequency in Hz (0 for DC)
    pub frequency_hz: f64,
    /// Source voltage phasor in volts
    pub voltage: Complex64,
}

impl OperatingPoint {
    /// Source with the given magnitude at phase 0.
    pub fn new(frequency_hz: f64, voltage: f64) -> Result<Self> {
        Self::with_phase_degrees(frequency_hz, voltage, 0.0)
    }

    /// Source with magnitude (V) and phase (degrees).
    pub fn with_phase_degrees(frequency_hz: f64, magnitude: f64, phase_deg: f64) -> Result<Self> {
        check_frequency(frequency_hz)?;
        if !magnitude.is_finite() || magnitude < 0.0 || !phase_deg.is_finite() {
            return Err(LadderError::InvalidVoltage { value: magnitude });
        }
        let voltage = if phase_deg == 0.0 {
            Complex64::new(magnitude, 0.0)
        } else {
            Complex64::from_polar(magnitude, phase_deg.to_radians())
        };
        Ok(Self {
            frequency_hz,
            voltage,
        })
    }

    /// Magnitude of the source phasor.
    pub fn voltage_magnitude(&self) -> f64 {
        self.voltage.norm()
    }

    /// Phase of the source phasor in degrees.
    pub fn phase_degrees(&self) -> f64 {
        self.voltage.arg().to_degrees()
    }
}

/// How a component carries current in the solved ladder.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// Finite current given by Ohm's law
    Conducting,
    /// Infinite impedance, no current
    Open,
    /// Zero-ohm branch carrying the group current (short dominates)
    Shorting,
    /// Zero-ohm branch left out of its parallel group; current not attributed
    Excluded,
}

impl fmt::Display for BranchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Conducting => "conducting",
            Self::Open => "open",
            Self::Shorting => "shorting",
            Self::Excluded => "excluded",
        };
        write!(f, "{}", s)
    }
}

/// Voltage and current of one component.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentReport {
    pub id: ComponentId,
    pub name: String,
    pub position: usize,
    pub link: Link,
    pub impedance: Complex64,
    /// Voltage across the component
    pub voltage: Complex64,
    /// Current through the component
    pub current: Complex64,
    pub state: BranchState,
}

/// Full analysis result.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub frequency_hz: f64,
    /// Source voltage phasor
    pub voltage: Complex64,
    /// Equivalent impedance of the ladder
    pub impedance: Complex64,
    /// Current drawn from the source
    pub current: Complex64,
    /// Per-component breakdown in ladder order
    pub components: Vec<ComponentReport>,
    /// S = V·conj(I) (VA)
    pub complex_power: Complex64,
    /// P = Re(S) (W)
    pub active_power: f64,
    /// Q = Im(S) (var)
    pub reactive_power: f64,
    /// |S| (VA)
    pub apparent_power: f64,
    /// P/|S|, or 1.0 when |S| is negligible
    pub power_factor: f64,
}

impl Analysis {
    /// Breakdown entry for a component.
    pub fn report(&self, id: ComponentId) -> Option<&ComponentReport> {
        self.components.iter().find(|r| r.id == id)
    }

    /// Whether the ladder is an open circuit at this operating point.
    pub fn is_open_circuit(&self) -> bool {
        !self.impedance.is_finite()
    }
}

/// Analyze the ladder at `frequency_hz` driven by `source_voltage`, with the
/// default configuration.
pub fn analyze(
    components: &[Component],
    frequency_hz: f64,
    source_voltage: impl Into<Complex64>,
) -> Result<Analysis> {
    let source_voltage = source_voltage.into();
    if !source_voltage.is_finite() {
        return Err(LadderError::InvalidVoltage {
            value: source_voltage.norm(),
        });
    }
    check_frequency(frequency_hz)?;
    let op = OperatingPoint {
        frequency_hz,
        voltage: source_voltage,
    };
    analyze_with(components, &op, &ReducerConfig::default())
}

/// Analyze the ladder at an operating point.
///
/// Fails with [`LadderError::OpenCircuitCurrent`] when |Z_total| is at or
/// below the configured short threshold, and with
/// [`LadderError::NumericalError`] when Z_total is NaN.
///
/// An open ladder (infinite Z_total) draws zero current. How the source
/// voltage divides across open blocks is undetermined, so as a display
/// convention it is split evenly between them and closed blocks show 0 V.
/// Two series capacitors at DC therefore report V/2 each.
pub fn analyze_with(
    components: &[Component],
    op: &OperatingPoint,
    config: &ReducerConfig,
) -> Result<Analysis> {
    let blocks = reduce_blocks(components, op.frequency_hz, config)?;
    let impedance = blocks.iter().map(Block::impedance).sum::<Complex64>();
    if impedance.is_nan() {
        return Err(LadderError::NumericalError {
            impedance: format!("{}", impedance),
        });
    }
    let open = !impedance.is_finite();

    if !open && impedance.norm() <= config.short_threshold {
        warn!("Total impedance {} is a short circuit", impedance);
        return Err(LadderError::OpenCircuitCurrent {
            impedance: format::rectangular(impedance),
        });
    }

    let current = if open {
        warn!("Ladder is open at {} Hz; no current flows", op.frequency_hz);
        ZERO
    } else {
        op.voltage / impedance
    };

    let open_blocks = blocks.iter().filter(|b| b.is_open()).count();
    let mut reports = Vec::with_capacity(components.len());

    for block in &blocks {
        let block_voltage = if open {
            if block.is_open() {
                op.voltage / open_blocks as f64
            } else {
                ZERO
            }
        } else {
            current * block.impedance()
        };

        match block {
            Block::Series(branch) => {
                let (branch_current, state) = if branch.is_open() {
                    (ZERO, BranchState::Open)
                } else {
                    (current, BranchState::Conducting)
                };
                reports.push(report(
                    &components[branch.position],
                    branch.position,
                    branch.impedance,
                    block_voltage,
                    branch_current,
                    state,
                ));
            }
            Block::Parallel { branches, .. } => {
                let shorts = branches.iter().filter(|b| b.is_short()).count();
                let shorted = config.zero_branch == ZeroBranchPolicy::ShortDominates && shorts > 0;

                for branch in branches {
                    let (branch_current, state) = if branch.is_open() {
                        (ZERO, BranchState::Open)
                    } else if branch.is_short() {
                        if shorted {
                            (current / shorts as f64, BranchState::Shorting)
                        } else {
                            (ZERO, BranchState::Excluded)
                        }
                    } else {
                        (block_voltage / branch.impedance, BranchState::Conducting)
                    };
                    reports.push(report(
                        &components[branch.position],
                        branch.position,
                        branch.impedance,
                        block_voltage,
                        branch_current,
                        state,
                    ));
                }
            }
        }
    }

    let complex_power = op.voltage * current.conj();
    let apparent_power = complex_power.norm();
    let power_factor = if apparent_power > config.short_threshold {
        complex_power.re / apparent_power
    } else {
        1.0
    };

    debug!(
        "Analysis at {} Hz: Z = {}, I = {}, S = {}, pf = {:.4}",
        op.frequency_hz, impedance, current, complex_power, power_factor
    );

    Ok(Analysis {
        frequency_hz: op.frequency_hz,
        voltage: op.voltage,
        impedance,
        current,
        components: reports,
        complex_power,
        active_power: complex_power.re,
        reactive_power: complex_power.im,
        apparent_power,
        power_factor,
    })
}

fn report(
    component: &Component,
    position: usize,
    impedance: Complex64,
    voltage: Complex64,
    current: Complex64,
    state: BranchState,
) -> ComponentReport {
    ComponentReport {
        id: component.id,
        name: component.name.clone(),
        position,
        link: component.link,
        impedance,
        voltage,
        current,
        state,
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::components::Element;

    fn chain(parts: &[(Element, Link)]) -> Vec<Component> {
        parts
            .iter()
            .enumerate()
            .map(|(i, (element, link))| {
                Component::new(ComponentId(i), format!("E{}", i + 1), *element, *link)
            })
            .collect()
    }

    fn r(ohms: f64) -> Element {
        Element::resistor(ohms).unwrap()
    }

    #[test]
    fn test_resistive_load_at_120v() {
        let ladder = chain(&[(r(100.0), Link::First)]);
        let a = analyze(&ladder, 60.0, 120.0).unwrap();

        assert_relative_eq!(a.current.re, 1.2, max_relative = 1e-12);
        assert_abs_diff_eq!(a.current.im, 0.0);
        assert_relative_eq!(a.active_power, 144.0, max_relative = 1e-12);
        assert_abs_diff_eq!(a.reactive_power, 0.0);
        assert_relative_eq!(a.apparent_power, 144.0, max_relative = 1e-12);
        assert_relative_eq!(a.power_factor, 1.0);
    }

    #[test]
    fn test_series_voltages_sum_to_source() {
        let xl = Element::inductive_reactance(100.0).unwrap();
        let ladder = chain(&[(r(100.0), Link::First), (xl, Link::Series)]);
        let a = analyze(&ladder, 60.0, 100.0).unwrap();

        let total: Complex64 = a.components.iter().map(|c| c.voltage).sum();
        assert_relative_eq!(total.re, 100.0, max_relative = 1e-12);
        assert_abs_diff_eq!(total.im, 0.0, epsilon = 1e-12);

        // Lagging load: Q > 0, pf = cos 45°
        assert!(a.reactive_power > 0.0);
        assert_relative_eq!(a.power_factor, std::f64::consts::FRAC_1_SQRT_2, max_relative = 1e-12);
        for c in &a.components {
            assert_eq!(c.current, a.current);
            assert_eq!(c.state, BranchState::Conducting);
        }
    }

    #[test]
    fn test_parallel_branch_currents_sum_to_total() {
        // 10 Ω + (100 Ω ‖ 25 Ω)
        let ladder = chain(&[
            (r(10.0), Link::First),
            (r(100.0), Link::Series),
            (r(25.0), Link::Parallel),
        ]);
        let a = analyze(&ladder, 60.0, 30.0).unwrap();
        assert_relative_eq!(a.impedance.re, 30.0, max_relative = 1e-12);
        assert_relative_eq!(a.current.re, 1.0, max_relative = 1e-12);

        let group = &a.components[1..];
        assert_eq!(group[0].voltage, group[1].voltage);
        assert_relative_eq!(group[0].voltage.re, 20.0, max_relative = 1e-12);
        assert_relative_eq!(group[0].current.re, 0.2, max_relative = 1e-12);
        assert_relative_eq!(group[1].current.re, 0.8, max_relative = 1e-12);

        let branch_sum: Complex64 = group.iter().map(|c| c.current).sum();
        assert_relative_eq!(branch_sum.re, a.current.re, max_relative = 1e-12);
    }

    #[test]
    fn test_source_phase() {
        let ladder = chain(&[(r(10.0), Link::First)]);
        let op = OperatingPoint::with_phase_degrees(50.0, 10.0, 90.0).unwrap();
        let a = analyze_with(&ladder, &op, &ReducerConfig::default()).unwrap();
        assert_abs_diff_eq!(a.current.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(a.current.im, 1.0, max_relative = 1e-12);
        assert_relative_eq!(op.phase_degrees(), 90.0, max_relative = 1e-12);
        assert_relative_eq!(a.power_factor, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_short_circuit_current_is_an_error() {
        let l = Element::inductor(1.0).unwrap();
        let ladder = chain(&[(l, Link::First)]);
        assert!(matches!(
            analyze(&ladder, 0.0, 12.0),
            Err(LadderError::OpenCircuitCurrent { .. })
        ));
    }

    #[test]
    fn test_open_ladder_draws_no_current() {
        let c = Element::capacitor(1e-6).unwrap();
        let ladder = chain(&[(r(100.0), Link::First), (c, Link::Series)]);
        let a = analyze(&ladder, 0.0, 12.0).unwrap();

        assert!(a.is_open_circuit());
        assert_eq!(a.current, ZERO);
        assert_eq!(a.components[0].voltage, ZERO);
        assert_eq!(a.components[1].voltage, Complex64::new(12.0, 0.0));
        assert_eq!(a.components[1].state, BranchState::Open);
        assert_eq!(a.power_factor, 1.0);
    }

    #[test]
    fn test_open_branch_in_parallel_group() {
        let c = Element::capacitor(1e-6).unwrap();
        let ladder = chain(&[(r(100.0), Link::First), (c, Link::Parallel)]);
        let a = analyze(&ladder, 0.0, 10.0).unwrap();
        assert_relative_eq!(a.components[0].current.re, 0.1, max_relative = 1e-12);
        assert_eq!(a.components[1].current, ZERO);
        assert_eq!(a.components[1].state, BranchState::Open);
    }

    #[test]
    fn test_zero_branch_states() {
        let l = Element::inductor(1.0).unwrap();
        let ladder = chain(&[
            (r(10.0), Link::First),
            (r(100.0), Link::Series),
            (l, Link::Parallel),
        ]);

        let excluded = analyze(&ladder, 0.0, 11.0).unwrap();
        assert_eq!(excluded.components[2].state, BranchState::Excluded);
        assert_relative_eq!(excluded.impedance.re, 110.0, max_relative = 1e-12);

        let config = ReducerConfig::new().with_zero_branch(ZeroBranchPolicy::ShortDominates);
        let op = OperatingPoint::new(0.0, 11.0).unwrap();
        let shorted = analyze_with(&ladder, &op, &config).unwrap();
        assert_relative_eq!(shorted.impedance.re, 10.0);
        assert_eq!(shorted.components[1].current, ZERO);
        assert_eq!(shorted.components[2].state, BranchState::Shorting);
        assert_relative_eq!(shorted.components[2].current.re, 1.1, max_relative = 1e-12);
    }

    #[test]
    fn test_tiny_parallel_branch_is_a_short_not_an_open() {
        let ladder = chain(&[(r(1e-170), Link::First), (r(1.0), Link::Parallel)]);
        assert!(matches!(
            analyze(&ladder, 60.0, 120.0),
            Err(LadderError::OpenCircuitCurrent { .. })
        ));
    }

    #[test]
    fn test_nan_total_impedance_is_an_error() {
        // +j∞ from the inductor meets -j∞ from the capacitor
        let l = Element::inductor(1e308).unwrap();
        let c = Element::capacitor(1e-320).unwrap();
        let ladder = chain(&[(l, Link::First), (c, Link::Series)]);
        assert!(matches!(
            analyze(&ladder, 1e5, 1.0),
            Err(LadderError::NumericalError { .. })
        ));
    }

    #[test]
    fn test_report_by_id() {
        let ladder = chain(&[(r(10.0), Link::First), (r(30.0), Link::Series)]);
        let a = analyze(&ladder, 60.0, 8.0).unwrap();

        let second = a.report(ComponentId(1)).unwrap();
        assert_eq!(second.name, "E2");
        assert_eq!(second.position, 1);
        assert_relative_eq!(second.voltage.re, 6.0, max_relative = 1e-12);
        assert!(a.report(ComponentId(7)).is_none());
    }

    #[test]
    fn test_invalid_operating_point() {
        assert!(matches!(
            OperatingPoint::new(60.0, -1.0),
            Err(LadderError::InvalidVoltage { .. })
        ));
        assert!(matches!(
            OperatingPoint::new(-60.0, 1.0),
            Err(LadderError::InvalidFrequency { .. })
        ));
    }
}
