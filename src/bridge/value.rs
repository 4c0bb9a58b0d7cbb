//! Host-independent script values.
//!
//! Host adapters convert their engine's values into [`ScriptValue`] before a
//! call and back afterwards. Coercions follow the ECMAScript abstract
//! operations (ToNumber, ToInt32, ToUint32, ToBoolean).

use super::handle::{HandleId, TypeTag};
use std::collections::HashMap;

/// Reference to a handle cell as carried by a script value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleRef {
    pub id: HandleId,
    pub tag: TypeTag,
}

/// Script value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<ScriptValue>),
    Object(HashMap<String, ScriptValue>),
    Handle(HandleRef),
}

impl ScriptValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Undefined => "undefined",
            ScriptValue::Null => "null",
            ScriptValue::Bool(_) => "boolean",
            ScriptValue::Int(_) | ScriptValue::Float(_) => "number",
            ScriptValue::String(_) => "string",
            ScriptValue::Array(_) => "array",
            ScriptValue::Object(_) => "object",
            ScriptValue::Handle(_) => "handle",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, ScriptValue::Undefined | ScriptValue::Null)
    }

    /// ToBoolean
    pub fn truthy(&self) -> bool {
        match self {
            ScriptValue::Undefined | ScriptValue::Null => false,
            ScriptValue::Bool(b) => *b,
            ScriptValue::Int(i) => *i != 0,
            ScriptValue::Float(f) => *f != 0.0 && !f.is_nan(),
            ScriptValue::String(s) => !s.is_empty(),
            ScriptValue::Array(_) | ScriptValue::Object(_) | ScriptValue::Handle(_) => true,
        }
    }

    /// ToNumber, restricted to values with a meaningful numeric reading.
    ///
    /// `undefined`, non-numeric strings, arrays, objects and handles yield
    /// `None` instead of NaN.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            ScriptValue::Null => Some(0.0),
            ScriptValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ScriptValue::Int(i) => Some(*i as f64),
            ScriptValue::Float(f) => Some(*f),
            ScriptValue::String(s) => parse_number(s),
            _ => None,
        }
    }

    pub fn to_int32(&self) -> Option<i32> {
        match self {
            ScriptValue::Int(i) => Some(*i as i32),
            other => other.to_number().map(to_int32),
        }
    }

    pub fn to_uint32(&self) -> Option<u32> {
        match self {
            ScriptValue::Int(i) => Some(*i as u32),
            other => other.to_number().map(to_uint32),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ScriptValue]> {
        match self {
            ScriptValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<HandleRef> {
        match self {
            ScriptValue::Handle(handle) => Some(*handle),
            _ => None,
        }
    }

    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptValue::Array(items.into_iter().map(|s| ScriptValue::String(s.into())).collect())
    }
}

/// StringToNumber without the NaN result.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Rust's float grammar also accepts "inf" and "nan"
    if !s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) {
        return None;
    }
    s.parse().ok()
}

/// ToInt32
pub fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

/// ToUint32
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32
}

impl From<()> for ScriptValue {
    fn from(_: ()) -> Self {
        ScriptValue::Undefined
    }
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Bool(b)
    }
}

impl From<i32> for ScriptValue {
    fn from(i: i32) -> Self {
        ScriptValue::Int(i as i64)
    }
}

impl From<u32> for ScriptValue {
    fn from(i: u32) -> Self {
        ScriptValue::Int(i as i64)
    }
}

impl From<i64> for ScriptValue {
    fn from(i: i64) -> Self {
        ScriptValue::Int(i)
    }
}

impl From<f32> for ScriptValue {
    fn from(f: f32) -> Self {
        ScriptValue::Float(f as f64)
    }
}

impl From<f64> for ScriptValue {
    fn from(f: f64) -> Self {
        ScriptValue::Float(f)
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::String(s)
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(s.to_string())
    }
}

impl From<HandleRef> for ScriptValue {
    fn from(handle: HandleRef) -> Self {
        ScriptValue::Handle(handle)
    }
}

impl<T: Into<ScriptValue>> From<Vec<T>> for ScriptValue {
    fn from(items: Vec<T>) -> Self {
        ScriptValue::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(ScriptValue::Null.to_number(), Some(0.0));
        assert_eq!(ScriptValue::Bool(true).to_number(), Some(1.0));
        assert_eq!(ScriptValue::from(" 42 ").to_number(), Some(42.0));
        assert_eq!(ScriptValue::from("0x1F").to_number(), Some(31.0));
        assert_eq!(ScriptValue::from("").to_number(), Some(0.0));
        assert_eq!(ScriptValue::from("-2.5e1").to_number(), Some(-25.0));
        assert_eq!(ScriptValue::from("-Infinity").to_number(), Some(f64::NEG_INFINITY));
        assert_eq!(ScriptValue::from("abc").to_number(), None);
        assert_eq!(ScriptValue::from("inf").to_number(), None);
        assert_eq!(ScriptValue::from("nan").to_number(), None);
        assert_eq!(ScriptValue::Undefined.to_number(), None);
        assert_eq!(ScriptValue::Array(vec![]).to_number(), None);
    }

    #[test]
    fn test_to_int32() {
        assert_eq!(to_int32(3.9), 3);
        assert_eq!(to_int32(-3.9), -3);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(4_294_967_296.0 + 5.0), 5);
        assert_eq!(to_uint32(-1.0), u32::MAX);
        assert_eq!(ScriptValue::Int(0xFFFF_FFFF).to_int32(), Some(-1));
        assert_eq!(ScriptValue::Int(0xFF00_00FF).to_uint32(), Some(0xFF00_00FF));
    }

    #[test]
    fn test_truthy() {
        assert!(!ScriptValue::Undefined.truthy());
        assert!(!ScriptValue::Float(f64::NAN).truthy());
        assert!(!ScriptValue::from("").truthy());
        assert!(ScriptValue::from("0").truthy());
        assert!(ScriptValue::Array(vec![]).truthy());
    }

    #[test]
    fn test_conversions() {
        let v: ScriptValue = vec![1, 2].into();
        assert_eq!(v, ScriptValue::Array(vec![ScriptValue::Int(1), ScriptValue::Int(2)]));
        assert_eq!(ScriptValue::from(()), ScriptValue::Undefined);
        assert_eq!(ScriptValue::strings(["a"]).type_name(), "array");
    }
}
