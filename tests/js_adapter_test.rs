use anyhow::Result;
use rayscript::bindings::{BindingAdapter, JsBindingAdapter};
use rayscript::bridge::{Bridge, ScriptValue, TypeTag};
use rayscript::config::BridgeConfig;
use rayscript::core::ScriptError;
use rayscript::raylib::{HeadlessRaylib, Vector2};

fn adapter(config: &BridgeConfig) -> Result<JsBindingAdapter<HeadlessRaylib>> {
    let bridge = Bridge::new(HeadlessRaylib::from_config(config), &config.host);
    let mut js = JsBindingAdapter::new(bridge, &config.host)?;
    js.init()?;
    Ok(js)
}

#[test]
fn test_frame_loop_stops_at_frame_limit() -> Result<()> {
    let mut config = BridgeConfig::default();
    config.host.max_frames = 3;
    let js = adapter(&config)?;

    let frames = js.evaluate(
        r#"
        rl.initWindow(320, 240, "loop");
        rl.setTargetFps(60);
        let frames = 0;
        while (!rl.windowShouldClose()) {
            rl.beginDrawing();
            rl.clearBackground(rl.RAYWHITE);
            rl.drawText("frame " + frames, 10, 10, 20, 0xFF0000FF);
            rl.endDrawing();
            frames++;
        }
        rl.closeWindow();
        frames
        "#,
    )?;

    assert_eq!(frames, ScriptValue::Int(3));
    js.with_bridge(|bridge| {
        let rl = bridge.backend();
        assert_eq!(rl.frame_count(), 3);
        assert_eq!(rl.calls_to("DrawText"), 3);
        assert_eq!(rl.window_title(), "loop");
    });
    Ok(())
}

#[test]
fn test_handles_round_trip_through_script() -> Result<()> {
    let js = adapter(&BridgeConfig::default())?;

    let sum = js.evaluate(r#"const v = rl.Vector2(1.5, 2); rl.getField(v, "x") + rl.getField(v, "y")"#)?;
    assert_eq!(sum, ScriptValue::Float(3.5));
    assert_eq!(js.evaluate("rl.typeOf(v)")?, ScriptValue::from("Vector2"));

    let handle = js.evaluate(r#"rl.setField(v, "y", 8); v"#)?;
    let handle = handle.as_handle().expect("handle result");
    assert_eq!(handle.tag, TypeTag::Vector2);
    let value = js.with_bridge(|bridge| bridge.get::<Vector2>(handle))?;
    assert_eq!(value, Vector2::new(1.5, 8.0));
    Ok(())
}

#[test]
fn test_sequences_from_script_arrays() -> Result<()> {
    let js = adapter(&BridgeConfig::default())?;
    js.evaluate(
        r#"
        const points = [rl.Vector2(0, 0), rl.Vector2(10, 0), rl.Vector2(10, 10)];
        rl.drawLineStrip(points, rl.BLACK);
        "#,
    )?;
    js.with_bridge(|bridge| {
        let call = bridge.backend().last_call().expect("native call recorded");
        assert_eq!(call.name, "DrawLineStrip");
        assert_eq!(call.args.matches("Vec2(").count(), 3);
    });

    let message = js.evaluate(
        r#"
        try {
            rl.drawLineStrip([rl.Vector2(0, 0), 4], rl.BLACK);
            "drawn"
        } catch (e) {
            e.message
        }
        "#,
    )?;
    let message = message.as_str().expect("string result").to_string();
    assert!(message.contains("element 1"), "{}", message);
    js.with_bridge(|bridge| assert_eq!(bridge.backend().calls_to("DrawLineStrip"), 1));
    Ok(())
}

#[test]
fn test_stale_handle_raises_in_script() -> Result<()> {
    let js = adapter(&BridgeConfig::default())?;
    let message = js.evaluate(
        r#"
        const p = rl.Vector2(1, 1);
        rl.releaseHandle(p);
        try { rl.drawPixelV(p, rl.RED); "drawn" } catch (e) { e.message }
        "#,
    )?;
    let message = message.as_str().expect("string result").to_string();
    assert!(message.contains("stale"), "{}", message);
    Ok(())
}

#[test]
fn test_uncaught_bridge_error_fails_script() -> Result<()> {
    let mut js = adapter(&BridgeConfig::default())?;
    let err = js.execute_script("rl.drawPixelV(1)").unwrap_err();
    match err {
        ScriptError::Exception(message) => assert!(message.contains("drawPixelV"), "{}", message),
        other => panic!("unexpected error: {}", other),
    }
    js.shutdown();
    Ok(())
}

#[test]
fn test_custom_global_name() -> Result<()> {
    let mut config = BridgeConfig::default();
    config.host.global_name = "raylib".to_string();
    let mut js = adapter(&config)?;

    assert_eq!(js.global_name(), "raylib");
    js.execute_script("raylib.initWindow(100, 100, 'named'); console.log('ready', raylib.KEY_A)")?;
    assert_eq!(js.evaluate("typeof rl")?, ScriptValue::from("undefined"));
    Ok(())
}

#[test]
fn test_unreleased_handles_do_not_exhaust_table() -> Result<()> {
    let mut config = BridgeConfig::default();
    config.host.max_handles = 200;
    let js = adapter(&config)?;

    let moved = js.evaluate(
        r#"
        let sum = 0;
        for (let i = 0; i < 1000; i++) {
            const p = rl.getMousePosition();
            sum += rl.getField(p, "x");
        }
        sum
        "#,
    )?;
    assert_eq!(moved.to_number(), Some(0.0));

    js.collect_garbage();
    js.with_bridge(|bridge| {
        assert!(bridge.handles().len() < 200, "{} live handles", bridge.handles().len());
        assert_eq!(bridge.backend().calls_to("GetMousePosition"), 1000);
    });
    Ok(())
}
