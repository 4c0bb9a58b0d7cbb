use proptest::prelude::*;
use rayscript::bridge::value::{to_int32, to_uint32};
use rayscript::bridge::{Bridge, ScriptValue};
use rayscript::config::HostConfig;
use rayscript::raylib::HeadlessRaylib;

const TWO_32: f64 = 4_294_967_296.0;

proptest! {
    #[test]
    fn int32_values_are_unchanged(n in any::<i32>()) {
        prop_assert_eq!(to_int32(n as f64), n);
        prop_assert_eq!(ScriptValue::Float(n as f64).to_int32(), Some(n));
    }

    #[test]
    fn int32_wraps_modulo_two_pow_32(n in -1_000_000_000_000i64..1_000_000_000_000) {
        let n = n as f64;
        prop_assert_eq!(to_int32(n), to_int32(n + TWO_32));
        prop_assert_eq!(to_uint32(n) as i32, to_int32(n));
    }

    #[test]
    fn fractions_truncate_toward_zero(n in -1.0e6f64..1.0e6) {
        prop_assert_eq!(to_int32(n), n.trunc() as i32);
    }

    #[test]
    fn numeric_strings_decode(n in any::<i32>(), pad in "[ \t]{0,3}") {
        let decimal = ScriptValue::String(format!("{}{}{}", pad, n, pad));
        prop_assert_eq!(decimal.to_int32(), Some(n));

        let hex = ScriptValue::String(format!("0x{:x}", n as u32));
        prop_assert_eq!(hex.to_uint32(), Some(n as u32));
    }

    #[test]
    fn non_numeric_strings_are_rejected(s in "[a-df-z][a-z]{0,8}") {
        prop_assert_eq!(ScriptValue::String(s).to_number(), None);
    }

    #[test]
    fn init_window_receives_coerced_values(width in any::<i32>(), height in -4096i32..4096) {
        let mut bridge = Bridge::new(HeadlessRaylib::new(), &HostConfig::default());
        let args = [
            ScriptValue::Float(width as f64 + 0.75_f64.copysign(width as f64)),
            ScriptValue::String(height.to_string()),
            ScriptValue::from("coerced"),
        ];
        bridge.call("initWindow", &args).unwrap();
        let call = bridge.backend().last_call().unwrap();
        prop_assert_eq!(&call.args, &format!("{}, {}, \"coerced\"", width, height));
    }
}

#[test]
fn non_finite_numbers_become_zero() {
    for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(to_int32(n), 0);
        assert_eq!(to_uint32(n), 0);
    }
}

#[test]
fn values_without_numeric_reading_are_rejected() {
    assert_eq!(ScriptValue::Undefined.to_int32(), None);
    assert_eq!(ScriptValue::Array(vec![]).to_number(), None);
    assert_eq!(ScriptValue::Null.to_int32(), Some(0));
    assert_eq!(ScriptValue::Bool(true).to_int32(), Some(1));
}
