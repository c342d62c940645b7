use chordshift::{Key, SheetHeader, TransposeError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize, Debug, PartialEq)]
struct TransposeFailure {
    kind: &'static str,
    message: String,
}

fn error_to_failure(e: TransposeError) -> TransposeFailure {
    let kind = match &e {
        TransposeError::InvalidKey(_) => "invalid-key",
        TransposeError::UnparseableToken(_) => "unparseable-token",
        TransposeError::MalformedInput(_) => "malformed-input",
        TransposeError::Config(_) => "config",
        TransposeError::Io(_) => "io",
    };
    TransposeFailure {
        kind,
        message: e.to_string(),
    }
}

fn to_js_error(e: TransposeError) -> JsValue {
    let failure = error_to_failure(e);
    let json = serde_json::to_string(&failure).unwrap_or_else(|_| failure.message.clone());
    JsValue::from_str(&json)
}

/// Transpose every chord in a sheet. Anything that is not a string comes back untouched.
#[wasm_bindgen]
pub fn transpose_chord_sheet(sheet: JsValue, source_key: &str, target_key: &str, capo: i32) -> JsValue {
    match sheet.as_string() {
        Some(text) => JsValue::from_str(&chordshift::transpose_chord_sheet(
            &text, source_key, target_key, capo,
        )),
        None => sheet,
    }
}

/// Transpose a single chord symbol
#[wasm_bindgen]
pub fn transpose_chord(token: &str, offset: i32) -> Result<String, JsValue> {
    chordshift::transpose_chord(token, offset).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn is_valid_key(value: &str) -> bool {
    chordshift::is_valid_key(value)
}

/// Semitone offset between two keys with a capo, in 0..=11
#[wasm_bindgen]
pub fn calculate_offset(source_key: &str, target_key: &str, capo: i32) -> Result<u8, JsValue> {
    chordshift::calculate_offset(source_key, target_key, capo)
        .map(|offset| offset.semitones())
        .map_err(to_js_error)
}

/// Read `Key:`, `(AG:)` and `Capo:` from the header as `{ key, shapeKey, capo }`
#[wasm_bindgen]
pub fn parse_header(sheet: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&SheetHeader::parse(sheet)).map_err(JsValue::from)
}

/// Update header fields and chords for a new key/capo in one step
#[wasm_bindgen]
pub fn retune_sheet(sheet: &str, original_key: &str, target_key: &str, capo: u32) -> String {
    chordshift::retune_sheet(sheet, original_key, target_key, capo)
}

/// The 12 selectable keys, for building key pickers
#[wasm_bindgen]
pub fn keys() -> Result<JsValue, JsValue> {
    let keys: Vec<String> = Key::all().map(|key| key.to_string()).collect();
    serde_wasm_bindgen::to_value(&keys).map_err(JsValue::from)
}
