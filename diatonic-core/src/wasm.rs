//! WASM bindings for diatonic-core
//!
//! JavaScript-facing wrappers around generation, analysis and chord spelling.
//! Every function returns a plain object (or `null` if serialization fails).

#[cfg(feature = "wasm")]
use crate::analysis::{analyze_numerals, DegreeAnalysis};
#[cfg(feature = "wasm")]
use crate::error::TheoryError;
#[cfg(feature = "wasm")]
use crate::generator::{generate_batch, ProgressionBatch};
#[cfg(feature = "wasm")]
use crate::random::{RandomSource, StdRandom};
#[cfg(feature = "wasm")]
use crate::request::GenerationRequest;
#[cfg(feature = "wasm")]
use crate::types::chord::Chord;
#[cfg(feature = "wasm")]
use crate::types::roman_numeral::Numeral;
#[cfg(feature = "wasm")]
use crate::types::scale::{build_diatonic_scale, Key, Mode};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// Random source backed by `Math.random()`
#[cfg(feature = "wasm")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsRandom;

#[cfg(feature = "wasm")]
impl RandomSource for JsRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Result envelope returned to JavaScript
#[cfg(feature = "wasm")]
#[derive(serde::Serialize)]
struct WasmResult<T: serde::Serialize> {
    ok: bool,
    value: Option<T>,
    error: Option<String>,
}

#[cfg(feature = "wasm")]
impl<T: serde::Serialize> WasmResult<T> {
    fn from_result(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => WasmResult {
                ok: true,
                value: Some(value),
                error: None,
            },
            Err(e) => WasmResult {
                ok: false,
                value: None,
                error: Some(e.to_string()),
            },
        }
    }

    fn to_js(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self).unwrap_or(JsValue::NULL)
    }
}

#[cfg(feature = "wasm")]
fn run_request(request: &GenerationRequest) -> crate::error::Result<ProgressionBatch> {
    match request.seed {
        Some(seed) => generate_batch(request, &mut StdRandom::seeded(seed)),
        None => generate_batch(request, &mut JsRandom),
    }
}

#[cfg(feature = "wasm")]
fn parse_key(root: &str, mode: &str) -> crate::error::Result<Key> {
    let mode: Mode = mode.parse()?;
    Key::parse(root, mode)
}

/// Generate a batch from a request object. Missing fields take their defaults.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn generate_progressions(request: JsValue) -> JsValue {
    let result = serde_wasm_bindgen::from_value::<GenerationRequest>(request)
        .map_err(|e| TheoryError::InvalidRequest(e.to_string()))
        .and_then(|r| run_request(&r));
    WasmResult::from_result(result).to_js()
}

/// JSON-in, JSON-out variant of [`generate_progressions`]
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn generate_progressions_json(request_json: &str) -> String {
    let result = serde_json::from_str::<GenerationRequest>(request_json)
        .map_err(|e| TheoryError::InvalidRequest(e.to_string()))
        .and_then(|r| run_request(&r));
    serde_json::to_string(&WasmResult::from_result(result)).unwrap_or_else(|e| error_json(&e.to_string()))
}

#[cfg(feature = "wasm")]
fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "value": null, "error": message }).to_string()
}

/// Analysis of the given scale degrees in a key
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn analyze_degrees(root: &str, mode: &str, numerals: Vec<u8>) -> JsValue {
    let result: crate::error::Result<Vec<DegreeAnalysis>> = parse_key(root, mode).and_then(|key| {
        let numerals = numerals
            .into_iter()
            .map(Numeral::new)
            .collect::<crate::error::Result<Vec<_>>>()?;
        Ok(analyze_numerals(&build_diatonic_scale(key), &numerals))
    });
    WasmResult::from_result(result).to_js()
}

/// The seven display names of a key's scale
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn scale_notes(root: &str, mode: &str) -> JsValue {
    let result = parse_key(root, mode).map(|key| {
        build_diatonic_scale(key)
            .notes()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
    });
    WasmResult::from_result(result).to_js()
}

/// Spell one chord type on a scale degree
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn chord_notes(root: &str, mode: &str, numeral: u8, type_name: &str) -> JsValue {
    let result = parse_key(root, mode).and_then(|key| {
        let scale = build_diatonic_scale(key);
        Chord::build_named(&scale, Numeral::new(numeral)?, type_name)
    });
    WasmResult::from_result(result).to_js()
}

/// Roots offered for key selection
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn common_keys() -> JsValue {
    serde_wasm_bindgen::to_value(Key::common_roots()).unwrap_or(JsValue::NULL)
}
