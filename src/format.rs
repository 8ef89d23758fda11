//! Human-readable rendering of complex values.
//!
//! Rectangular form prints four decimals (`"30.0000 - j40.0000"`), polar form
//! prints the magnitude with four decimals and the phase in degrees with two
//! (`"50.0000 ∠ -53.13°"`). Parts smaller than [`DISPLAY_EPSILON`] print as
//! zero. Infinite values (open circuits) print as `∞`.

use std::fmt;

use num_complex::Complex64;

/// Parts with an absolute value below this are shown as zero.
pub const DISPLAY_EPSILON: f64 = 1e-9;

/// Rectangular form.
pub fn rectangular(z: Complex64) -> String {
    if !z.is_finite() {
        return "∞".to_string();
    }

    let re_zero = z.re.abs() < DISPLAY_EPSILON;
    let im_zero = z.im.abs() < DISPLAY_EPSILON;
    let sign = if z.im >= 0.0 { '+' } else { '-' };

    match (re_zero, im_zero) {
        (true, true) => "0.0000".to_string(),
        (false, true) => format!("{:.4}", z.re),
        (true, false) => {
            let prefix = if z.im >= 0.0 { "" } else { "-" };
            format!("{}j{:.4}", prefix, z.im.abs())
        }
        (false, false) => format!("{:.4} {} j{:.4}", z.re, sign, z.im.abs()),
    }
}

/// Polar form. Phase is in (-180°, 180°] and is 0 for a negligible magnitude.
pub fn polar(z: Complex64) -> String {
    if !z.is_finite() {
        return "∞".to_string();
    }
    let (magnitude, phase) = magnitude_phase_degrees(z);
    format!("{:.4} ∠ {:.2}°", magnitude, phase)
}

/// Both forms at once, rectangular first.
pub fn format_complex(z: Complex64) -> (String, String) {
    (rectangular(z), polar(z))
}

/// Magnitude and phase in degrees.
pub fn magnitude_phase_degrees(z: Complex64) -> (f64, f64) {
    let (magnitude, radians) = z.to_polar();
    if magnitude.abs() < DISPLAY_EPSILON {
        return (magnitude, 0.0);
    }
    let mut degrees = radians.to_degrees();
    // atan2 gives -180° for a negative real with a -0.0 imaginary part
    if degrees <= -180.0 {
        degrees += 360.0;
    }
    (magnitude, degrees)
}

/// Display adapter printing `"<rectangular> | <polar>"`.
#[derive(Debug, Clone, Copy)]
pub struct Phasor(pub Complex64);

impl fmt::Display for Phasor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", rectangular(self.0), polar(self.0))
    }
}
