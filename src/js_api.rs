use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::glyph::types::Point;

pub trait ToJsValue {
    fn to_js_value(&self) -> JsValue;
}

impl ToJsValue for f64 {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_f64(*self)
    }
}

impl ToJsValue for String {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_str(self)
    }
}

impl ToJsValue for Point {
    fn to_js_value(&self) -> JsValue {
        let point = Object::new();
        // Setting a property on a fresh plain object cannot fail.
        let _ = Reflect::set(&point, &"x".into(), &self.x.to_js_value());
        let _ = Reflect::set(&point, &"y".into(), &self.y.to_js_value());
        point.into()
    }
}

impl<T: ToJsValue> ToJsValue for Vec<T> {
    fn to_js_value(&self) -> JsValue {
        self.iter()
            .map(|item| item.to_js_value())
            .collect::<Array>()
            .into()
    }
}

impl<T: ToJsValue> ToJsValue for Option<T> {
    fn to_js_value(&self) -> JsValue {
        match self {
            Some(value) => value.to_js_value(),
            None => JsValue::NULL,
        }
    }
}
