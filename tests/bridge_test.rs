use anyhow::Result;
use rayscript::bridge::{Bridge, ScriptValue, TypeTag};
use rayscript::config::{BridgeConfig, HostConfig};
use rayscript::core::{ArgError, BridgeError, ErrorKind, HandleError};
use rayscript::raylib::{Color, HeadlessRaylib, Matrix, Vector2};

fn bridge_with(host: HostConfig) -> Bridge<HeadlessRaylib> {
    let config = BridgeConfig {
        host,
        ..Default::default()
    };
    Bridge::new(HeadlessRaylib::from_config(&config), &config.host)
}

fn bridge() -> Bridge<HeadlessRaylib> {
    bridge_with(HostConfig::default())
}

fn tag_of(value: &ScriptValue) -> TypeTag {
    value.as_handle().expect("expected a handle").tag
}

fn int(n: i64) -> ScriptValue {
    ScriptValue::Int(n)
}

fn write_png(dir: &std::path::Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255])).save(&path)?;
    Ok(path.display().to_string())
}

#[test]
fn test_results_carry_documented_tag() -> Result<()> {
    let mut bridge = bridge();
    bridge.call("initWindow", &[int(800), int(450), "tags".into()])?;

    let position = bridge.call("Vector3", &[int(10), int(10), int(10)])?;
    let target = bridge.call("Vector3", &[int(0), int(0), int(0)])?;
    let up = bridge.call("Vector3", &[int(0), int(1), int(0)])?;
    let camera = bridge.call("Camera3D", &[position.clone(), target, up, int(45), int(0)])?;
    let color = bridge.call("getColor", &[int(0xFF0000FF)])?;
    let rec = bridge.call("Rectangle", &[int(0), int(0), int(10), int(10)])?;
    let mouse = bridge.call("getMousePosition", &[])?;
    let font = bridge.call("getFontDefault", &[])?;

    let cases: Vec<(&str, Vec<ScriptValue>, TypeTag)> = vec![
        ("getMousePosition", vec![], TypeTag::Vector2),
        ("getColor", vec![int(0x00FF00FF)], TypeTag::Color),
        ("fade", vec![color.clone(), ScriptValue::Float(0.5)], TypeTag::Color),
        ("colorNormalize", vec![color.clone()], TypeTag::Vector4),
        ("colorToHSV", vec![color.clone()], TypeTag::Vector3),
        ("getMouseRay", vec![mouse, camera.clone()], TypeTag::Ray),
        ("getWorldToScreen", vec![position, camera.clone()], TypeTag::Vector2),
        ("getCameraMatrix", vec![camera], TypeTag::Matrix),
        ("getCollisionRec", vec![rec.clone(), rec], TypeTag::Rectangle),
        ("getFontDefault", vec![], TypeTag::Font),
        ("measureTextEx", vec![font, "hi".into(), int(10), int(1)], TypeTag::Vector2),
        ("loadRenderTexture", vec![int(4), int(4)], TypeTag::RenderTexture2D),
        ("getScreenData", vec![], TypeTag::Image),
    ];

    for (name, args, expected) in cases {
        let result = bridge.call(name, &args)?;
        assert_eq!(tag_of(&result), expected, "{}", name);
    }
    Ok(())
}

#[test]
fn test_init_window_passes_arguments_through() -> Result<()> {
    let mut bridge = bridge();

    let err = bridge
        .call("initWindow", &["wide".into(), int(600), "Title".into()])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(bridge.backend().calls_to("InitWindow"), 0);

    let result = bridge.call("initWindow", &[int(800), int(600), "Title".into()])?;
    assert_eq!(result, ScriptValue::Undefined);

    let call = bridge.backend().last_call().expect("native call recorded");
    assert_eq!(call.name, "InitWindow");
    assert_eq!(call.args, "800, 600, \"Title\"");
    assert_eq!(bridge.backend().window_title(), "Title");
    Ok(())
}

#[test]
fn test_wrong_tag_rejected_before_native_call() -> Result<()> {
    let mut bridge = bridge();
    let color = bridge.wrap(Color::new(230, 41, 55, 255))?;

    let err = bridge.call("drawPixelV", &[color.clone(), color.clone()]).unwrap_err();
    match err {
        BridgeError::Argument { index, source, .. } => {
            assert_eq!(index, 0);
            assert_eq!(
                source,
                ArgError::Handle(HandleError::TypeMismatch {
                    expected: TypeTag::Vector2,
                    found: TypeTag::Color,
                })
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = bridge.call("drawPixelV", &[ScriptValue::Null, color]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Handle);
    assert_eq!(bridge.backend().calls_to("DrawPixelV"), 0);
    Ok(())
}

#[test]
fn test_matrix_rejected_by_every_typed_function() -> Result<()> {
    let mut bridge = bridge();
    let entries: Vec<(&'static str, usize)> = bridge
        .functions()
        .iter()
        .filter(|entry| entry.arity > 0)
        .map(|entry| (entry.name, entry.arity))
        .collect();
    assert!(entries.len() > 100, "{} functions take arguments", entries.len());

    for (name, arity) in entries {
        let matrix = bridge.wrap(Matrix::IDENTITY)?;
        let args = vec![matrix.clone(); arity];
        let before = bridge.backend().total_calls();
        let result = bridge.call(name, &args);

        match name {
            "typeOf" => assert_eq!(result?, ScriptValue::from("Matrix")),
            "releaseHandle" => assert_eq!(result?, ScriptValue::Undefined),
            _ => {
                let err = result.expect_err(name);
                assert!(
                    matches!(err.kind(), ErrorKind::Decode | ErrorKind::Handle | ErrorKind::NotImplemented),
                    "{}: unexpected error {:?}",
                    name,
                    err
                );
                assert_eq!(bridge.backend().total_calls(), before, "{} reached native code", name);
                bridge.call("releaseHandle", &[matrix])?;
            }
        }
    }
    Ok(())
}

#[test]
fn test_mouse_position_round_trip() -> Result<()> {
    let mut bridge = bridge();
    bridge.call("initWindow", &[int(800), int(450), "mouse".into()])?;
    bridge.backend_mut().move_mouse(12.0, 34.0);

    let position = bridge.call("getMousePosition", &[])?;
    let color = bridge.wrap(Color::new(0, 0, 0, 255))?;
    bridge.call("drawPixelV", &[position.clone(), color.clone()])?;
    bridge.call("drawCircleV", &[position, int(5), color])?;

    assert_eq!(bridge.backend().calls_to("DrawPixelV"), 1);
    let call = bridge.backend().last_call().expect("native call recorded");
    assert_eq!(call.name, "DrawCircleV");
    assert!(call.args.starts_with("Vec2(12.0, 34.0)"), "{}", call.args);
    Ok(())
}

#[test]
fn test_sequence_length_and_bad_elements() -> Result<()> {
    let mut bridge = bridge();
    let color = bridge.wrap(Color::new(0, 0, 255, 255))?;
    let points = (0..4)
        .map(|i| bridge.wrap(Vector2::new(i as f32, 0.0)))
        .collect::<Result<Vec<_>, _>>()?;

    bridge.call("drawTriangleFan", &[ScriptValue::Array(points.clone()), color.clone()])?;
    let call = bridge.backend().last_call().expect("native call recorded");
    assert_eq!(call.args.matches("Vec2(").count(), 4);

    for bad in 0..points.len() {
        let mut broken = points.clone();
        broken[bad] = int(1);
        let err = bridge
            .call("drawTriangleFan", &[ScriptValue::Array(broken), color.clone()])
            .unwrap_err();
        assert!(
            matches!(
                err,
                BridgeError::Argument { index: 0, source: ArgError::Element { index, .. }, .. } if index == bad
            ),
            "{:?}",
            err
        );
    }
    assert_eq!(bridge.backend().calls_to("DrawTriangleFan"), 1);
    Ok(())
}

#[test]
fn test_unload_reaches_native_twice_then_rejects_use() -> Result<()> {
    let mut bridge = bridge();
    let target = bridge.call("loadRenderTexture", &[int(8), int(8)])?;

    bridge.call("unloadRenderTexture", &[target.clone()])?;
    bridge.call("unloadRenderTexture", &[target.clone()])?;
    assert_eq!(bridge.backend().calls_to("UnloadRenderTexture"), 2);

    let err = bridge.call("beginTextureMode", &[target]).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Argument {
            source: ArgError::Handle(HandleError::Closed(TypeTag::RenderTexture2D)),
            ..
        }
    ));
    assert_eq!(bridge.backend().calls_to("BeginTextureMode"), 0);
    Ok(())
}

#[test]
fn test_allocation_failure_unloads_texture() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_png(dir.path(), "red.png")?;
    let mut bridge = bridge_with(HostConfig {
        max_handles: 1,
        ..Default::default()
    });
    bridge.call("initWindow", &[int(64), int(64), "alloc".into()])?;
    bridge.call("Vector2", &[int(1), int(2)])?;

    let err = bridge.call("loadTexture", &[path.as_str().into()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Allocation);
    assert_eq!(bridge.backend().calls_to("LoadTexture"), 1);
    assert_eq!(bridge.backend().calls_to("UnloadTexture"), 1);
    assert_eq!(bridge.backend().texture_count(), 0);
    assert_eq!(bridge.handles().len(), 1);
    Ok(())
}

#[test]
fn test_allocation_failure_discards_partial_array() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_png(dir.path(), "pixels.png")?;
    let mut bridge = bridge_with(HostConfig {
        max_handles: 3,
        ..Default::default()
    });

    let image = bridge.call("loadImage", &[path.as_str().into()])?;
    let err = bridge.call("getImageData", &[image]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Allocation);
    assert_eq!(bridge.handles().len(), 1);
    Ok(())
}

#[test]
fn test_released_handle_is_stale() -> Result<()> {
    let mut bridge = bridge();
    let color = bridge.wrap(Color::new(0, 0, 0, 255))?;
    let point = bridge.call("Vector2", &[int(3), int(4)])?;

    bridge.call("releaseHandle", &[point.clone()])?;
    let err = bridge.call("drawPixelV", &[point.clone(), color]).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Argument {
            source: ArgError::Handle(HandleError::Stale(_)),
            ..
        }
    ));

    let reused = bridge.call("Vector2", &[int(5), int(6)])?;
    let old = point.as_handle().expect("handle");
    let new = reused.as_handle().expect("handle");
    assert_eq!(old.id.index(), new.id.index());
    assert_ne!(old.id.generation(), new.id.generation());
    Ok(())
}

#[test]
fn test_lookup_and_arity_errors() {
    let mut bridge = bridge();

    let err = bridge.call("drawTeapot", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);

    let err = bridge.call("drawPixel", &[int(1), int(2)]).unwrap_err();
    assert_eq!(
        err,
        BridgeError::Arity {
            function: "drawPixel",
            expected: 3,
            found: 2,
        }
    );

    let total = bridge.backend().total_calls();
    let err = bridge
        .call("loadImagePro", &[ScriptValue::Array(vec![]), int(1), int(1), int(7)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert_eq!(bridge.backend().total_calls(), total);
}

#[test]
fn test_storage_values_persist_in_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let host = HostConfig {
        storage_file: dir.path().join("storage.data"),
        ..Default::default()
    };

    let mut bridge = bridge_with(host.clone());
    bridge.call("storageSaveValue", &[int(3), int(42)])?;
    drop(bridge);

    let mut bridge = bridge_with(host);
    assert_eq!(bridge.call("storageLoadValue", &[int(3)])?, ScriptValue::Int(42));
    Ok(())
}

#[test]
fn test_config_from_toml_and_json() -> Result<()> {
    let config = BridgeConfig::from_toml_str(
        r#"
        [host]
        max_handles = 16
        global_name = "raylib"

        [window]
        default_title = "demo"
        "#,
    )?;
    assert_eq!(config.host.max_handles, 16);
    assert_eq!(config.host.global_name, "raylib");
    assert_eq!(config.window.default_title, "demo");
    assert_eq!(config.window.default_width, 800);
    config.validate()?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rayscript.json");
    std::fs::write(&path, r#"{ "host": { "max_frames": 3 } }"#)?;
    let config = BridgeConfig::from_file(&path)?;
    assert_eq!(config.host.max_frames, 3);
    assert_eq!(config.host.global_name, "rl");

    let mut custom = BridgeConfig::default();
    custom.host.max_handles = 64;
    custom.host.global_name = "ray".to_string();
    custom.window.default_title = "saved".to_string();
    for name in ["saved.toml", "saved.json"] {
        let path = dir.path().join(name);
        custom.save(&path)?;
        let loaded = BridgeConfig::from_file(&path)?;
        assert_eq!(loaded.host.max_handles, 64, "{}", name);
        assert_eq!(loaded.host.global_name, "ray", "{}", name);
        assert_eq!(loaded.window.default_title, "saved", "{}", name);
        assert_eq!(loaded.window.monitors, custom.window.monitors, "{}", name);
        loaded.validate()?;
    }
    let toml_text = std::fs::read_to_string(dir.path().join("saved.toml"))?;
    assert!(toml_text.contains("max_handles = 64"), "{}", toml_text);

    let bad = BridgeConfig::from_toml_str("[host]\nmax_handles = 0\n")?;
    assert!(bad.validate().is_err());
    let bad = BridgeConfig::from_toml_str("[host]\nglobal_name = \"1rl\"\n")?;
    assert!(bad.validate().is_err());
    Ok(())
}
