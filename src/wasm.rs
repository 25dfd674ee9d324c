use wasm_bindgen::prelude::*;

use crate::MagicSquare;

/// Convert a MagicSquare to a JsValue (2D array of numbers).
fn magic_square_to_js(sq: &MagicSquare) -> Result<JsValue, JsError> {
    let rows: Vec<Vec<f64>> = sq.rows().map(|row| row.to_vec()).collect();
    serde_wasm_bindgen::to_value(&rows).map_err(|e| JsError::new(&e.to_string()))
}

/// Generate the Siamese magic square of order n (bumped to odd).
/// Returns a 2D array directly usable in JavaScript.
#[wasm_bindgen]
pub fn generate(n: u32) -> Result<JsValue, JsError> {
    let sq =
        MagicSquare::siamese("siamese", n as usize).map_err(|e| JsError::new(&e.to_string()))?;
    magic_square_to_js(&sq)
}

/// Reshape a flat list of k² numbers and report whether it is magic.
#[wasm_bindgen]
pub fn check(cells: Vec<f64>) -> Result<bool, JsError> {
    let mut sq = MagicSquare::new("input");
    sq.list_square(&cells).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(sq.check_ms())
}

/// A square that can be rolled and re-checked from JavaScript.
#[wasm_bindgen]
pub struct WasmMagicSquare {
    square: MagicSquare,
}

#[wasm_bindgen]
impl WasmMagicSquare {
    /// Create a square from a flat list of k² numbers.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, cells: Vec<f64>) -> Result<WasmMagicSquare, JsError> {
        let mut square = MagicSquare::new(name);
        square
            .list_square(&cells)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmMagicSquare { square })
    }

    pub fn name(&self) -> String {
        self.square.name().to_string()
    }

    /// Roll every row `k` columns to the right.
    pub fn roll_right(&mut self, k: i32) {
        self.square = &self.square >> k;
    }

    /// Roll every column `k` rows down.
    pub fn roll_down(&mut self, k: i32) {
        self.square = &self.square << k;
    }

    pub fn is_magic(&mut self) -> bool {
        self.square.check_ms()
    }

    /// Returns the grid as a 2D array of numbers.
    pub fn cells(&self) -> Result<JsValue, JsError> {
        magic_square_to_js(&self.square)
    }
}
