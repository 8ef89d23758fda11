//! Frequency sweeps of the equivalent impedance.

use num_complex::Complex64;

use super::reduce::reduce_with;
use super::ReducerConfig;
use crate::components::Component;
use crate::error::{LadderError, Result};

/// Equivalent impedance at one frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub frequency_hz: f64,
    pub impedance: Complex64,
}

impl SweepPoint {
    pub fn magnitude(&self) -> f64 {
        self.impedance.norm()
    }

    pub fn phase_degrees(&self) -> f64 {
        self.impedance.arg().to_degrees()
    }
}

/// Generates `n` linearly spaced samples in [start, stop].
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Generates `n` logarithmically spaced frequencies between `start_hz` and
/// `stop_hz`. Both ends must be positive.
pub fn logspace_hz(start_hz: f64, stop_hz: f64, n: usize) -> Result<Vec<f64>> {
    for value in [start_hz, stop_hz] {
        if !(value.is_finite() && value > 0.0) {
            return Err(LadderError::InvalidFrequency { value });
        }
    }
    Ok(linspace(start_hz.log10(), stop_hz.log10(), n)
        .into_iter()
        .map(|exponent| 10f64.powf(exponent))
        .collect())
}

/// Reduce the ladder at every frequency.
pub fn sweep<I>(components: &[Component], frequencies: I, config: &ReducerConfig) -> Result<Vec<SweepPoint>>
where
    I: IntoIterator<Item = f64>,
{
    frequencies
        .into_iter()
        .map(|frequency_hz| {
            Ok(SweepPoint {
                frequency_hz,
                impedance: reduce_with(components, frequency_hz, config)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuit::{ComponentId, Link};
    use crate::components::Element;

    #[test]
    fn test_linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_logspace_decades() {
        let v = logspace_hz(10.0, 10_000.0, 4).unwrap();
        assert_eq!(v.len(), 4);
        assert_relative_eq!(v[0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(v[1], 100.0, max_relative = 1e-12);
        assert_relative_eq!(v[3], 10_000.0, max_relative = 1e-12);
        assert!(logspace_hz(0.0, 10.0, 3).is_err());
    }

    #[test]
    fn test_rc_sweep_magnitude_falls() {
        let ladder = vec![
            Component::new(ComponentId(0), "R1", Element::resistor(1e3).unwrap(), Link::First),
            Component::new(ComponentId(1), "C1", Element::capacitor(1e-6).unwrap(), Link::Parallel),
        ];
        let points = sweep(&ladder, logspace_hz(10.0, 1e5, 5).unwrap(), &ReducerConfig::default()).unwrap();
        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert!(pair[1].magnitude() < pair[0].magnitude());
        }
        // Capacitive parallel RC: phase between -90° and 0°
        assert!(points.iter().all(|p| p.phase_degrees() < 0.0 && p.phase_degrees() > -90.0));
    }
}
