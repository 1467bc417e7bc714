/// Path length estimation, used to pace stroke animations.

use std::fmt;

use log::{error, warn};

use super::interpreter::interpret_subpaths;
use super::policy::ParsePolicy;

/// Scale applied to the length of the path data when no measurement is possible.
pub const FALLBACK_LENGTH_PER_CHAR: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub enum LengthError {
    NonFinite,
    Native(String),
}

impl fmt::Display for LengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthError::NonFinite => write!(f, "path length is not a finite number"),
            LengthError::Native(msg) => write!(f, "native path measurement failed: {}", msg),
        }
    }
}

impl std::error::Error for LengthError {}

pub trait PathLengthProvider {
    fn length(&self, data: &str) -> Result<f64, LengthError>;
}

/// Sums the straight segments of the flattened path. Jumps between subpaths
/// are not drawn and do not count.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeometricLength;

impl PathLengthProvider for GeometricLength {
    fn length(&self, data: &str) -> Result<f64, LengthError> {
        // Lenient interpretation never fails.
        let subpaths = interpret_subpaths(data, ParsePolicy::Lenient).unwrap_or_default();
        let total: f64 = subpaths
            .iter()
            .flat_map(|points| points.windows(2))
            .map(|pair| pair[0].distance(&pair[1]))
            .sum();
        if total.is_finite() {
            Ok(total)
        } else {
            Err(LengthError::NonFinite)
        }
    }
}

/// Measures with the browser's own `SVGGeometryElement.getTotalLength()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLength;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

impl PathLengthProvider for NativeLength {
    fn length(&self, data: &str) -> Result<f64, LengthError> {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| LengthError::Native(format!("{:?}", e));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| LengthError::Native("no document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| LengthError::Native("no document body".to_string()))?;

        let svg = document.create_element_ns(Some(SVG_NS), "svg").map_err(js_err)?;
        svg.set_attribute("style", "position:absolute;visibility:hidden;width:0;height:0")
            .map_err(js_err)?;
        let path = document.create_element_ns(Some(SVG_NS), "path").map_err(js_err)?;
        path.set_attribute("d", data).map_err(js_err)?;
        svg.append_child(&path).map_err(js_err)?;
        body.append_child(&svg).map_err(js_err)?;

        let measured = path
            .dyn_into::<web_sys::SvgGeometryElement>()
            .map(|geometry| geometry.get_total_length() as f64)
            .map_err(|_| LengthError::Native("path is not an SVG geometry element".to_string()));

        if let Err(e) = body.remove_child(&svg) {
            warn!("Failed to remove measuring element: {:?}", e);
        }

        let length = measured?;
        if length.is_finite() {
            Ok(length)
        } else {
            Err(LengthError::NonFinite)
        }
    }
}

fn fallback_length(data: &str) -> f64 {
    data.encode_utf16().count() as f64 * FALLBACK_LENGTH_PER_CHAR
}

/// Best-effort length of a path. Never fails: absent or empty data measures
/// zero, and a provider failure falls back to a length proportional to the
/// size of the path data.
pub fn estimate_length(data: Option<&str>, provider: &dyn PathLengthProvider) -> f64 {
    let data = match data {
        Some(data) if !data.is_empty() => data,
        _ => return 0.0,
    };

    match provider.length(data) {
        Ok(length) if length >= 0.0 => length,
        Ok(length) => {
            warn!("Path length {} is negative, using approximation", length);
            fallback_length(data)
        }
        Err(e) => {
            error!("Error calculating path length: {}", e);
            fallback_length(data)
        }
    }
}
