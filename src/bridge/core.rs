//! Shims for raylib's core module: window, cursor, drawing, timing, color,
//! files, storage, input, gestures and the camera system.

use super::registry::{FunctionTable, Module};
use super::value::ScriptValue;
use crate::raylib::{Camera2D, Camera3D, Color, Image, Raylib, RenderTexture2D, Vector2, Vector3};

const UNDEFINED: ScriptValue = ScriptValue::Undefined;

pub(super) fn register<R: Raylib>(table: &mut FunctionTable<R>) {
    window(table);
    drawing(table);
    misc(table);
    files(table);
    input(table);
    camera(table);
}

fn window<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Core;

    table.register(m, "initWindow", 3, |cx| {
        let width = cx.int(0)?;
        let height = cx.int(1)?;
        let title = cx.string(2)?;
        cx.rl().init_window(width, height, title);
        Ok(UNDEFINED)
    });
    table.register(m, "windowShouldClose", 0, |cx| Ok(cx.rl().window_should_close().into()));
    table.register(m, "closeWindow", 0, |cx| {
        cx.rl().close_window();
        Ok(UNDEFINED)
    });
    table.register(m, "isWindowReady", 0, |cx| Ok(cx.rl().is_window_ready().into()));
    table.register(m, "isWindowMinimized", 0, |cx| Ok(cx.rl().is_window_minimized().into()));
    table.register(m, "isWindowResized", 0, |cx| Ok(cx.rl().is_window_resized().into()));
    table.register(m, "isWindowHidden", 0, |cx| Ok(cx.rl().is_window_hidden().into()));
    table.register(m, "toggleFullscreen", 0, |cx| {
        cx.rl().toggle_fullscreen();
        Ok(UNDEFINED)
    });
    table.register(m, "unhideWindow", 0, |cx| {
        cx.rl().unhide_window();
        Ok(UNDEFINED)
    });
    table.register(m, "hideWindow", 0, |cx| {
        cx.rl().hide_window();
        Ok(UNDEFINED)
    });
    table.register(m, "setWindowIcon", 1, |cx| {
        let image = cx.arg::<Image>(0)?;
        cx.rl().set_window_icon(image);
        Ok(UNDEFINED)
    });
    table.register(m, "setWindowTitle", 1, |cx| {
        let title = cx.string(0)?;
        cx.rl().set_window_title(title);
        Ok(UNDEFINED)
    });
    table.register(m, "setWindowPosition", 2, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        cx.rl().set_window_position(x, y);
        Ok(UNDEFINED)
    });
    table.register(m, "setWindowMonitor", 1, |cx| {
        let monitor = cx.int(0)?;
        cx.rl().set_window_monitor(monitor);
        Ok(UNDEFINED)
    });
    table.register(m, "setWindowMinSize", 2, |cx| {
        let width = cx.int(0)?;
        let height = cx.int(1)?;
        cx.rl().set_window_min_size(width, height);
        Ok(UNDEFINED)
    });
    table.register(m, "setWindowSize", 2, |cx| {
        let width = cx.int(0)?;
        let height = cx.int(1)?;
        cx.rl().set_window_size(width, height);
        Ok(UNDEFINED)
    });
    table.register(m, "getScreenWidth", 0, |cx| Ok(cx.rl().get_screen_width().into()));
    table.register(m, "getScreenHeight", 0, |cx| Ok(cx.rl().get_screen_height().into()));
    table.register(m, "getMonitorCount", 0, |cx| Ok(cx.rl().get_monitor_count().into()));
    table.register(m, "getMonitorWidth", 1, |cx| {
        let monitor = cx.int(0)?;
        Ok(cx.rl().get_monitor_width(monitor).into())
    });
    table.register(m, "getMonitorHeight", 1, |cx| {
        let monitor = cx.int(0)?;
        Ok(cx.rl().get_monitor_height(monitor).into())
    });
    table.register(m, "getMonitorPhysicalWidth", 1, |cx| {
        let monitor = cx.int(0)?;
        Ok(cx.rl().get_monitor_physical_width(monitor).into())
    });
    table.register(m, "getMonitorPhysicalHeight", 1, |cx| {
        let monitor = cx.int(0)?;
        Ok(cx.rl().get_monitor_physical_height(monitor).into())
    });
    table.register(m, "getMonitorName", 1, |cx| {
        let monitor = cx.int(0)?;
        Ok(cx.rl().get_monitor_name(monitor).into())
    });
    table.register(m, "getClipboardText", 0, |cx| Ok(cx.rl().get_clipboard_text().into()));
    table.register(m, "setClipboardText", 1, |cx| {
        let text = cx.string(0)?;
        cx.rl().set_clipboard_text(text);
        Ok(UNDEFINED)
    });

    // cursor
    table.register(m, "showCursor", 0, |cx| {
        cx.rl().show_cursor();
        Ok(UNDEFINED)
    });
    table.register(m, "hideCursor", 0, |cx| {
        cx.rl().hide_cursor();
        Ok(UNDEFINED)
    });
    table.register(m, "isCursorHidden", 0, |cx| Ok(cx.rl().is_cursor_hidden().into()));
    table.register(m, "enableCursor", 0, |cx| {
        cx.rl().enable_cursor();
        Ok(UNDEFINED)
    });
    table.register(m, "disableCursor", 0, |cx| {
        cx.rl().disable_cursor();
        Ok(UNDEFINED)
    });
}

fn drawing<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Core;

    table.register(m, "clearBackground", 1, |cx| {
        let color = cx.color(0)?;
        cx.rl().clear_background(color);
        Ok(UNDEFINED)
    });
    table.register(m, "beginDrawing", 0, |cx| {
        cx.rl().begin_drawing();
        Ok(UNDEFINED)
    });
    table.register(m, "endDrawing", 0, |cx| {
        cx.rl().end_drawing();
        Ok(UNDEFINED)
    });
    table.register(m, "beginMode2D", 1, |cx| {
        let camera = cx.arg::<Camera2D>(0)?;
        cx.rl().begin_mode_2d(camera);
        Ok(UNDEFINED)
    });
    table.register(m, "endMode2D", 0, |cx| {
        cx.rl().end_mode_2d();
        Ok(UNDEFINED)
    });
    table.register(m, "beginMode3D", 1, |cx| {
        let camera = cx.arg::<Camera3D>(0)?;
        cx.rl().begin_mode_3d(camera);
        Ok(UNDEFINED)
    });
    table.register(m, "endMode3D", 0, |cx| {
        cx.rl().end_mode_3d();
        Ok(UNDEFINED)
    });
    table.register(m, "beginTextureMode", 1, |cx| {
        let target = cx.arg::<RenderTexture2D>(0)?;
        cx.rl().begin_texture_mode(target);
        Ok(UNDEFINED)
    });
    table.register(m, "endTextureMode", 0, |cx| {
        cx.rl().end_texture_mode();
        Ok(UNDEFINED)
    });

    // screen-space
    table.register(m, "getMouseRay", 2, |cx| {
        let mouse = cx.arg::<Vector2>(0)?;
        let camera = cx.arg::<Camera3D>(1)?;
        let ray = cx.rl().get_mouse_ray(mouse, camera);
        cx.wrap(ray)
    });
    table.register(m, "getWorldToScreen", 2, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let camera = cx.arg::<Camera3D>(1)?;
        let screen = cx.rl().get_world_to_screen(position, camera);
        cx.wrap(screen)
    });
    table.register(m, "getCameraMatrix", 1, |cx| {
        let camera = cx.arg::<Camera3D>(0)?;
        let matrix = cx.rl().get_camera_matrix(camera);
        cx.wrap(matrix)
    });

    // timing
    table.register(m, "setTargetFps", 1, |cx| {
        let fps = cx.int(0)?;
        cx.rl().set_target_fps(fps);
        Ok(UNDEFINED)
    });
    table.register(m, "getFps", 0, |cx| Ok(cx.rl().get_fps().into()));
    table.register(m, "getFrameTime", 0, |cx| Ok(cx.rl().get_frame_time().into()));
    table.register(m, "getTime", 0, |cx| Ok(cx.rl().get_time().into()));

    // color
    table.register(m, "colorToInt", 1, |cx| {
        let color = cx.arg::<Color>(0)?;
        Ok(cx.rl().color_to_int(color).into())
    });
    table.register(m, "colorNormalize", 1, |cx| {
        let color = cx.arg::<Color>(0)?;
        let normalized = cx.rl().color_normalize(color);
        cx.wrap(normalized)
    });
    table.register(m, "colorToHSV", 1, |cx| {
        let color = cx.arg::<Color>(0)?;
        let hsv = cx.rl().color_to_hsv(color);
        cx.wrap(hsv)
    });
    table.register(m, "colorFromHSV", 1, |cx| {
        let hsv = cx.arg::<Vector3>(0)?;
        let color = cx.rl().color_from_hsv(hsv);
        cx.wrap(color)
    });
    table.register(m, "getColor", 1, |cx| {
        let hex = cx.int(0)?;
        let color = cx.rl().get_color(hex);
        cx.wrap(color)
    });
    table.register(m, "fade", 2, |cx| {
        let color = cx.arg::<Color>(0)?;
        let alpha = cx.f32(1)?;
        let faded = cx.rl().fade(color, alpha);
        cx.wrap(faded)
    });
}

fn misc<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Core;

    table.register(m, "setConfigFlags", 1, |cx| {
        let flags = cx.uint(0)?;
        cx.rl().set_config_flags(flags);
        Ok(UNDEFINED)
    });
    table.register(m, "setTraceLogLevel", 1, |cx| {
        let level = cx.int(0)?;
        cx.rl().set_trace_log_level(level);
        Ok(UNDEFINED)
    });
    table.register(m, "setTraceLogExit", 1, |cx| {
        let level = cx.int(0)?;
        cx.rl().set_trace_log_exit(level);
        Ok(UNDEFINED)
    });
    table.register(m, "takeScreenshot", 1, |cx| {
        let file_name = cx.string(0)?;
        cx.rl().take_screenshot(file_name);
        Ok(UNDEFINED)
    });
    table.register(m, "getRandomValue", 2, |cx| {
        let min = cx.int(0)?;
        let max = cx.int(1)?;
        Ok(cx.rl().get_random_value(min, max).into())
    });
    table.register(m, "openURL", 1, |cx| {
        let url = cx.string(0)?;
        cx.rl().open_url(url);
        Ok(UNDEFINED)
    });
}

fn files<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Core;

    table.register(m, "fileExists", 1, |cx| {
        let file_name = cx.string(0)?;
        Ok(cx.rl().file_exists(file_name).into())
    });
    table.register(m, "isFileExtension", 2, |cx| {
        let file_name = cx.string(0)?;
        let ext = cx.string(1)?;
        Ok(cx.rl().is_file_extension(file_name, ext).into())
    });
    table.register(m, "getExtension", 1, |cx| {
        let file_name = cx.string(0)?;
        Ok(cx.rl().get_extension(file_name).into())
    });
    table.register(m, "getFileName", 1, |cx| {
        let path = cx.string(0)?;
        Ok(cx.rl().get_file_name(path).into())
    });
    table.register(m, "getFileNameWithoutExt", 1, |cx| {
        let path = cx.string(0)?;
        Ok(cx.rl().get_file_name_without_ext(path).into())
    });
    table.register(m, "getDirectoryPath", 1, |cx| {
        let file_name = cx.string(0)?;
        Ok(cx.rl().get_directory_path(file_name).into())
    });
    table.register(m, "getWorkingDirectory", 0, |cx| Ok(cx.rl().get_working_directory().into()));
    table.register(m, "getDirectoryFiles", 1, |cx| {
        let dir = cx.string(0)?;
        Ok(ScriptValue::strings(cx.rl().get_directory_files(dir)))
    });
    table.register(m, "changeDirectory", 1, |cx| {
        let dir = cx.string(0)?;
        Ok(cx.rl().change_directory(dir).into())
    });
    table.register(m, "isFileDropped", 0, |cx| Ok(cx.rl().is_file_dropped().into()));
    table.register(m, "getDroppedFiles", 0, |cx| Ok(ScriptValue::strings(cx.rl().get_dropped_files())));
    table.register(m, "getFileModTime", 1, |cx| {
        let file_name = cx.string(0)?;
        Ok(cx.rl().get_file_mod_time(file_name).into())
    });

    // storage
    table.register(m, "storageSaveValue", 2, |cx| {
        let position = cx.int(0)?;
        let value = cx.int(1)?;
        cx.rl().storage_save_value(position, value);
        Ok(UNDEFINED)
    });
    table.register(m, "storageLoadValue", 1, |cx| {
        let position = cx.int(0)?;
        Ok(cx.rl().storage_load_value(position).into())
    });
}

fn input<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Core;

    // keyboard
    table.register(m, "isKeyPressed", 1, |cx| {
        let key = cx.int(0)?;
        Ok(cx.rl().is_key_pressed(key).into())
    });
    table.register(m, "isKeyDown", 1, |cx| {
        let key = cx.int(0)?;
        Ok(cx.rl().is_key_down(key).into())
    });
    table.register(m, "isKeyReleased", 1, |cx| {
        let key = cx.int(0)?;
        Ok(cx.rl().is_key_released(key).into())
    });
    table.register(m, "isKeyUp", 1, |cx| {
        let key = cx.int(0)?;
        Ok(cx.rl().is_key_up(key).into())
    });
    table.register(m, "getKeyPressed", 0, |cx| Ok(cx.rl().get_key_pressed().into()));
    table.register(m, "setExitKey", 1, |cx| {
        let key = cx.int(0)?;
        cx.rl().set_exit_key(key);
        Ok(UNDEFINED)
    });

    // gamepad
    table.register(m, "isGamepadAvailable", 1, |cx| {
        let gamepad = cx.int(0)?;
        Ok(cx.rl().is_gamepad_available(gamepad).into())
    });
    table.register(m, "isGamepadName", 2, |cx| {
        let gamepad = cx.int(0)?;
        let name = cx.string(1)?;
        Ok(cx.rl().is_gamepad_name(gamepad, name).into())
    });
    table.register(m, "getGamepadName", 1, |cx| {
        let gamepad = cx.int(0)?;
        Ok(cx.rl().get_gamepad_name(gamepad).into())
    });
    table.register(m, "isGamepadButtonPressed", 2, |cx| {
        let gamepad = cx.int(0)?;
        let button = cx.int(1)?;
        Ok(cx.rl().is_gamepad_button_pressed(gamepad, button).into())
    });
    table.register(m, "isGamepadButtonDown", 2, |cx| {
        let gamepad = cx.int(0)?;
        let button = cx.int(1)?;
        Ok(cx.rl().is_gamepad_button_down(gamepad, button).into())
    });
    table.register(m, "isGamepadButtonReleased", 2, |cx| {
        let gamepad = cx.int(0)?;
        let button = cx.int(1)?;
        Ok(cx.rl().is_gamepad_button_released(gamepad, button).into())
    });
    table.register(m, "isGamepadButtonUp", 2, |cx| {
        let gamepad = cx.int(0)?;
        let button = cx.int(1)?;
        Ok(cx.rl().is_gamepad_button_up(gamepad, button).into())
    });
    table.register(m, "getGamepadButtonPressed", 0, |cx| Ok(cx.rl().get_gamepad_button_pressed().into()));
    table.register(m, "getGamepadAxisCount", 1, |cx| {
        let gamepad = cx.int(0)?;
        Ok(cx.rl().get_gamepad_axis_count(gamepad).into())
    });
    table.register(m, "getGamepadAxisMovement", 2, |cx| {
        let gamepad = cx.int(0)?;
        let axis = cx.int(1)?;
        Ok(cx.rl().get_gamepad_axis_movement(gamepad, axis).into())
    });

    // mouse
    table.register(m, "isMouseButtonPressed", 1, |cx| {
        let button = cx.int(0)?;
        Ok(cx.rl().is_mouse_button_pressed(button).into())
    });
    table.register(m, "isMouseButtonDown", 1, |cx| {
        let button = cx.int(0)?;
        Ok(cx.rl().is_mouse_button_down(button).into())
    });
    table.register(m, "isMouseButtonReleased", 1, |cx| {
        let button = cx.int(0)?;
        Ok(cx.rl().is_mouse_button_released(button).into())
    });
    table.register(m, "isMouseButtonUp", 1, |cx| {
        let button = cx.int(0)?;
        Ok(cx.rl().is_mouse_button_up(button).into())
    });
    table.register(m, "getMouseX", 0, |cx| Ok(cx.rl().get_mouse_x().into()));
    table.register(m, "getMouseY", 0, |cx| Ok(cx.rl().get_mouse_y().into()));
    table.register(m, "getMousePosition", 0, |cx| {
        let position = cx.rl().get_mouse_position();
        cx.wrap(position)
    });
    table.register(m, "setMousePosition", 2, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        cx.rl().set_mouse_position(x, y);
        Ok(UNDEFINED)
    });
    table.register(m, "setMouseOffset", 2, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        cx.rl().set_mouse_offset(x, y);
        Ok(UNDEFINED)
    });
    table.register(m, "setMouseScale", 2, |cx| {
        let x = cx.f32(0)?;
        let y = cx.f32(1)?;
        cx.rl().set_mouse_scale(x, y);
        Ok(UNDEFINED)
    });
    table.register(m, "getMouseWheelMove", 0, |cx| Ok(cx.rl().get_mouse_wheel_move().into()));

    // touch
    table.register(m, "getTouchX", 0, |cx| Ok(cx.rl().get_touch_x().into()));
    table.register(m, "getTouchY", 0, |cx| Ok(cx.rl().get_touch_y().into()));
    table.register(m, "getTouchPosition", 1, |cx| {
        let index = cx.int(0)?;
        let position = cx.rl().get_touch_position(index);
        cx.wrap(position)
    });

    // gestures
    table.register(m, "setGesturesEnabled", 1, |cx| {
        let flags = cx.uint(0)?;
        cx.rl().set_gestures_enabled(flags);
        Ok(UNDEFINED)
    });
    table.register(m, "isGestureDetected", 1, |cx| {
        let gesture = cx.int(0)?;
        Ok(cx.rl().is_gesture_detected(gesture).into())
    });
    table.register(m, "getGestureDetected", 0, |cx| Ok(cx.rl().get_gesture_detected().into()));
    table.register(m, "getTouchPointsCount", 0, |cx| Ok(cx.rl().get_touch_points_count().into()));
    table.register(m, "getGestureHoldDuration", 0, |cx| Ok(cx.rl().get_gesture_hold_duration().into()));
    table.register(m, "getGestureDragVector", 0, |cx| {
        let vector = cx.rl().get_gesture_drag_vector();
        cx.wrap(vector)
    });
    table.register(m, "getGestureDragAngle", 0, |cx| Ok(cx.rl().get_gesture_drag_angle().into()));
    table.register(m, "getGesturePinchVector", 0, |cx| {
        let vector = cx.rl().get_gesture_pinch_vector();
        cx.wrap(vector)
    });
    table.register(m, "getGesturePinchAngle", 0, |cx| Ok(cx.rl().get_gesture_pinch_angle().into()));
}

fn camera<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Core;

    table.register(m, "setCameraMode", 2, |cx| {
        let camera = cx.arg::<Camera3D>(0)?;
        let mode = cx.int(1)?;
        cx.rl().set_camera_mode(camera, mode);
        Ok(UNDEFINED)
    });
    // the camera handle is updated in place
    table.register(m, "updateCamera", 1, |cx| {
        cx.with_arg_mut::<Camera3D>(0, |rl, camera| rl.update_camera(camera))?;
        Ok(UNDEFINED)
    });
    table.register(m, "setCameraPanControl", 1, |cx| {
        let key = cx.int(0)?;
        cx.rl().set_camera_pan_control(key);
        Ok(UNDEFINED)
    });
    table.register(m, "setCameraAltControl", 1, |cx| {
        let key = cx.int(0)?;
        cx.rl().set_camera_alt_control(key);
        Ok(UNDEFINED)
    });
    table.register(m, "setCameraSmoothZoomControl", 1, |cx| {
        let key = cx.int(0)?;
        cx.rl().set_camera_smooth_zoom_control(key);
        Ok(UNDEFINED)
    });
    table.register(m, "setCameraMoveControls", 6, |cx| {
        let front = cx.int(0)?;
        let back = cx.int(1)?;
        let right = cx.int(2)?;
        let left = cx.int(3)?;
        let up = cx.int(4)?;
        let down = cx.int(5)?;
        cx.rl().set_camera_move_controls(front, back, right, left, up, down);
        Ok(UNDEFINED)
    });
}

#[cfg(test)]
mod tests {
    use crate::bridge::{Bridge, ScriptValue};
    use crate::config::HostConfig;
    use crate::raylib::consts::*;
    use crate::raylib::{HeadlessRaylib, Raylib, Vector2};

    fn bridge() -> Bridge<HeadlessRaylib> {
        Bridge::new(HeadlessRaylib::new(), &HostConfig::default())
    }

    #[test]
    fn test_init_window_passes_values() {
        let mut bridge = bridge();
        let result = bridge
            .call(
                "initWindow",
                &[ScriptValue::Int(800), ScriptValue::Int(600), ScriptValue::from("Title")],
            )
            .unwrap();
        assert_eq!(result, ScriptValue::Undefined);
        let rl = bridge.backend_mut();
        assert_eq!(rl.calls_to("InitWindow"), 1);
        assert_eq!(rl.window_title(), "Title");
        assert_eq!(rl.get_screen_width(), 800);
        assert_eq!(rl.get_screen_height(), 600);
    }

    #[test]
    fn test_mouse_position_round_trip() {
        let mut bridge = bridge();
        bridge.backend_mut().move_mouse(12.0, 34.0);
        let position = bridge.call("getMousePosition", &[]).unwrap();
        let red = bridge.wrap(RED).unwrap();
        bridge.call("drawPixelV", &[position.clone(), red]).unwrap();
        assert_eq!(bridge.backend().calls_to("DrawPixelV"), 1);
        assert_eq!(
            bridge.get::<Vector2>(position.as_handle().unwrap()).unwrap(),
            Vector2::new(12.0, 34.0)
        );
    }

    #[test]
    fn test_update_camera_writes_back() {
        let mut bridge = bridge();
        let v = |bridge: &mut Bridge<HeadlessRaylib>, x, y, z| {
            bridge
                .call("Vector3", &[ScriptValue::Float(x), ScriptValue::Float(y), ScriptValue::Float(z)])
                .unwrap()
        };
        let position = v(&mut bridge, 10.0, 2.0, 10.0);
        let target = v(&mut bridge, 0.0, 0.0, 0.0);
        let up = v(&mut bridge, 0.0, 1.0, 0.0);
        let camera = bridge
            .call(
                "Camera3D",
                &[position, target, up, ScriptValue::Float(45.0), ScriptValue::Int(CAMERA_PERSPECTIVE.into())],
            )
            .unwrap();
        bridge
            .call("setCameraMode", &[camera.clone(), ScriptValue::Int(CAMERA_ORBITAL.into())])
            .unwrap();
        bridge.call("updateCamera", &[camera.clone()]).unwrap();

        let updated = bridge
            .get::<crate::raylib::Camera3D>(camera.as_handle().unwrap())
            .unwrap();
        assert_ne!(updated.position, crate::raylib::Vector3::new(10.0, 2.0, 10.0));
    }

    #[test]
    fn test_directory_listing_is_string_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        let mut bridge = bridge();
        let files = bridge
            .call("getDirectoryFiles", &[ScriptValue::from(dir.path().to_str().unwrap())])
            .unwrap();
        assert_eq!(files, ScriptValue::strings([".", "..", "a.txt"]));
    }

    #[test]
    fn test_non_numeric_key_raises_before_native_call() {
        let mut bridge = bridge();
        assert!(bridge.call("isKeyDown", &[ScriptValue::from("space")]).is_err());
        assert_eq!(bridge.backend().calls_to("IsKeyDown"), 0);
    }
}
