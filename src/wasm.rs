//! WASM bindings for acladder.
//!
//! JavaScript-friendly wrapper around an editable [`Ladder`] and its
//! operating point, for interactive calculators in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLadder } from 'acladder';
//!
//! await init();
//!
//! const ladder = new WasmLadder(`
//!   .frequency 60
//!   .source 120
//!   R1 first 100
//!   L1 series 10 mH
//! `);
//!
//! const id = ladder.add_component("C", 4.7, "uF", "parallel");
//! console.log(ladder.impedance_polar());   // "... ∠ ...°"
//! ladder.remove_component(id);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{ComponentId, Ladder, Link};
use crate::components::{Element, ElementKind};
use crate::dsl;
use crate::error::LadderError;
use crate::format;
use crate::solver::{analyze_with, reduce_with, Analysis, OperatingPoint, ReducerConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: LadderError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible ladder calculator.
#[wasm_bindgen]
pub struct WasmLadder {
    ladder: Ladder,
    op: OperatingPoint,
    config: ReducerConfig,
}

#[wasm_bindgen]
impl WasmLadder {
    /// Create a calculator from a ladder description string.
    ///
    /// The description may be empty; components can be added afterwards.
    #[wasm_bindgen(constructor)]
    pub fn new(description: &str) -> Result<WasmLadder, JsValue> {
        let ast = dsl::parse(description).map_err(js_err)?;
        let ladder = Ladder::from_ast(&ast).map_err(js_err)?;
        let op = ast
            .operating_point(crate::DEFAULT_FREQUENCY_HZ, crate::DEFAULT_VOLTAGE)
            .map_err(js_err)?;

        Ok(WasmLadder {
            ladder,
            op,
            config: ast.reducer_config(),
        })
    }

    /// Append a component and return its id.
    ///
    /// # Arguments
    /// * `kind` - `"R"`, `"L"`, `"C"`, `"XL"` or `"XC"`
    /// * `value` - Magnitude in `unit`
    /// * `unit` - Unit symbol; empty for the base unit
    /// * `link` - `"first"`, `"series"` or `"parallel"`
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str, value: f64, unit: &str, link: &str) -> Result<usize, JsValue> {
        let element_kind = ElementKind::from_prefix(kind).ok_or_else(|| {
            js_err(LadderError::WasmError {
                message: format!("unknown component kind '{}'", kind),
            })
        })?;
        let link = Link::from_keyword(link).ok_or_else(|| {
            js_err(LadderError::WasmError {
                message: format!("unknown link '{}'", link),
            })
        })?;

        let element = if unit.is_empty() {
            Element::base(element_kind, value)
        } else {
            Element::parse(element_kind, value, unit)
        }
        .map_err(js_err)?;

        let name = format!("{}{}", kind.to_ascii_uppercase(), self.ladder.len() + 1);
        let id = self.ladder.push(name, element, link).map_err(js_err)?;
        Ok(id.0)
    }

    /// Remove a component by id.
    #[wasm_bindgen]
    pub fn remove_component(&mut self, id: usize) -> Result<(), JsValue> {
        self.ladder.remove(ComponentId(id)).map(|_| ()).map_err(js_err)
    }

    /// Remove every component.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.ladder.clear();
    }

    /// Number of components in the ladder.
    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.ladder.len()
    }

    /// Set the source frequency in Hz.
    #[wasm_bindgen]
    pub fn set_frequency(&mut self, frequency_hz: f64) -> Result<(), JsValue> {
        self.op = OperatingPoint::with_phase_degrees(
            frequency_hz,
            self.op.voltage_magnitude(),
            self.op.phase_degrees(),
        )
        .map_err(js_err)?;
        Ok(())
    }

    /// Set the source voltage magnitude (V) and phase (degrees).
    #[wasm_bindgen]
    pub fn set_voltage(&mut self, magnitude: f64, phase_deg: f64) -> Result<(), JsValue> {
        self.op = OperatingPoint::with_phase_degrees(self.op.frequency_hz, magnitude, phase_deg).map_err(js_err)?;
        Ok(())
    }

    /// Source frequency in Hz.
    #[wasm_bindgen(getter)]
    pub fn frequency(&self) -> f64 {
        self.op.frequency_hz
    }

    /// Equivalent impedance in rectangular form.
    #[wasm_bindgen]
    pub fn impedance_rectangular(&self) -> Result<String, JsValue> {
        let z = reduce_with(self.ladder.components(), self.op.frequency_hz, &self.config).map_err(js_err)?;
        Ok(format::rectangular(z))
    }

    /// Equivalent impedance in polar form.
    #[wasm_bindgen]
    pub fn impedance_polar(&self) -> Result<String, JsValue> {
        let z = reduce_with(self.ladder.components(), self.op.frequency_hz, &self.config).map_err(js_err)?;
        Ok(format::polar(z))
    }

    /// Source current in rectangular form.
    #[wasm_bindgen]
    pub fn current_rectangular(&self) -> Result<String, JsValue> {
        Ok(format::rectangular(self.analysis()?.current))
    }

    /// Source current in polar form.
    #[wasm_bindgen]
    pub fn current_polar(&self) -> Result<String, JsValue> {
        Ok(format::polar(self.analysis()?.current))
    }

    /// Power factor of the source.
    #[wasm_bindgen]
    pub fn power_factor(&self) -> Result<f64, JsValue> {
        Ok(self.analysis()?.power_factor)
    }

    /// One line per component: name, link, value and unit.
    #[wasm_bindgen]
    pub fn describe(&self) -> Vec<String> {
        self.ladder
            .components()
            .iter()
            .map(|c| {
                format!(
                    "{} ({}) {} {}",
                    c.name,
                    c.link,
                    c.element.magnitude(),
                    c.element.unit()
                )
            })
            .collect()
    }
}

impl WasmLadder {
    fn analysis(&self) -> Result<Analysis, JsValue> {
        analyze_with(self.ladder.components(), &self.op, &self.config).map_err(js_err)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default source frequency.
#[wasm_bindgen]
pub fn default_frequency() -> f64 {
    crate::DEFAULT_FREQUENCY_HZ
}
