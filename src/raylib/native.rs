//! 链接系统 raylib 的后端
//!
//! 每个方法直接转发到 `ffi` 中对应的 C 函数。字符串参数在调用前复制为
//! `CString`，内部 NUL 之后的内容会被截断；返回的 C 字符串立即复制为
//! `String`，因为 raylib 会在下一次调用时复用其静态缓冲区。

use super::ffi::{self, RlVector4};
use super::types::*;
use super::Raylib;
use crate::config::BridgeConfig;
use std::ffi::{c_char, c_int, c_void, CStr, CString};

/// raylib 2.6 的 `LoadFontData` 在 `charsCount` 为 0 时生成的字符数
const DEFAULT_FONT_CHARS: usize = 95;

fn c_string(s: &str) -> CString {
    let bytes: Vec<u8> = s.bytes().take_while(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

/// # Safety
/// `ptr` 为空或指向以 NUL 结尾的字符串
unsafe fn owned(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

/// # Safety
/// `list` 为空或包含 `count` 个有效的 C 字符串指针
unsafe fn owned_list(list: *mut *mut c_char, count: c_int) -> Vec<String> {
    if list.is_null() || count <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(list, count as usize)
        .iter()
        .map(|&p| owned(p))
        .collect()
}

/// 复制并释放 raylib 用 malloc 分配的数组
///
/// # Safety
/// `ptr` 为空或指向至少 `len` 个元素的 malloc 分配
unsafe fn take_array<T: Copy>(ptr: *mut T, len: usize) -> Vec<T> {
    if ptr.is_null() {
        return Vec::new();
    }
    let values = std::slice::from_raw_parts(ptr, len).to_vec();
    ffi::free(ptr.cast::<c_void>());
    values
}

fn pixel_count(image: &Image) -> usize {
    (image.width.max(0) as usize).saturating_mul(image.height.max(0) as usize)
}

fn len_i32(len: usize) -> c_int {
    c_int::try_from(len).unwrap_or(c_int::MAX)
}

/// 无需转换的直接转发
macro_rules! forward {
    ($($name:ident($($arg:ident: $ty:ty),*) $(-> $ret:ty)? => $c:ident;)*) => {
        $(
            fn $name(&mut self, $($arg: $ty),*) $(-> $ret)? {
                unsafe { ffi::$c($($arg),*) }
            }
        )*
    };
}

/// 字符串参数先转换为 `CString` 的转发
macro_rules! forward_str {
    ($($name:ident($($arg:ident: $ty:tt),*) $(-> $ret:ty)? => $c:ident;)*) => {
        $(
            fn $name(&mut self, $($arg: forward_str!(@ty $ty)),*) $(-> $ret)? {
                $(let $arg = forward_str!(@arg $ty $arg);)*
                unsafe { ffi::$c($(forward_str!(@pass $ty $arg)),*) }
            }
        )*
    };
    (@ty str) => { &str };
    (@ty $ty:ty) => { $ty };
    (@arg str $arg:ident) => { c_string($arg) };
    (@arg $ty:tt $arg:ident) => { $arg };
    (@pass str $arg:ident) => { $arg.as_ptr() };
    (@pass $ty:tt $arg:ident) => { $arg };
}

/// 返回 C 字符串的转发
macro_rules! forward_string {
    ($($name:ident($($arg:ident: $ty:tt),*) => $c:ident;)*) => {
        $(
            fn $name(&mut self, $($arg: forward_str!(@ty $ty)),*) -> String {
                $(let $arg = forward_str!(@arg $ty $arg);)*
                unsafe { owned(ffi::$c($(forward_str!(@pass $ty $arg)),*)) }
            }
        )*
    };
}

/// 系统 raylib 后端
pub struct NativeRaylib {
    allow_open_url: bool,
    max_frames: u64,
    frame: u64,
}

impl NativeRaylib {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            allow_open_url: config.host.allow_open_url,
            max_frames: config.host.max_frames,
            frame: 0,
        }
    }
}

impl Raylib for NativeRaylib {
    forward_str! {
        init_window(width: i32, height: i32, title: str) => InitWindow;
        set_window_title(title: str) => SetWindowTitle;
        set_clipboard_text(text: str) => SetClipboardText;
        take_screenshot(file_name: str) => TakeScreenshot;
        file_exists(file_name: str) -> bool => FileExists;
        is_file_extension(file_name: str, ext: str) -> bool => IsFileExtension;
        change_directory(dir: str) -> bool => ChangeDirectory;
        is_gamepad_name(gamepad: i32, name: str) -> bool => IsGamepadName;
        load_image(file_name: str) -> Image => LoadImage;
        load_image_raw(file_name: str, width: i32, height: i32, format: i32, header_size: i32) -> Image => LoadImageRaw;
        export_image(image: Image, file_name: str) => ExportImage;
        export_image_as_code(image: Image, file_name: str) => ExportImageAsCode;
        load_texture(file_name: str) -> Texture2D => LoadTexture;
        load_font(file_name: str) -> Font => LoadFont;
        draw_text(text: str, pos_x: i32, pos_y: i32, font_size: i32, color: Color) => DrawText;
        draw_text_ex(font: Font, text: str, position: Vector2, font_size: f32, spacing: f32, tint: Color) => DrawTextEx;
        draw_text_rec(font: Font, text: str, rec: Rectangle, font_size: f32, spacing: f32, word_wrap: bool, tint: Color) => DrawTextRec;
        measure_text(text: str, font_size: i32) -> i32 => MeasureText;
        measure_text_ex(font: Font, text: str, font_size: f32, spacing: f32) -> Vector2 => MeasureTextEx;
    }

    forward_string! {
        get_monitor_name(monitor: i32) => GetMonitorName;
        get_clipboard_text() => GetClipboardText;
        get_extension(file_name: str) => GetExtension;
        get_file_name(file_path: str) => GetFileName;
        get_file_name_without_ext(file_path: str) => GetFileNameWithoutExt;
        get_directory_path(file_name: str) => GetDirectoryPath;
        get_working_directory() => GetWorkingDirectory;
        get_gamepad_name(gamepad: i32) => GetGamepadName;
    }

    forward! {
        close_window() => CloseWindow;
        is_window_ready() -> bool => IsWindowReady;
        is_window_minimized() -> bool => IsWindowMinimized;
        is_window_resized() -> bool => IsWindowResized;
        is_window_hidden() -> bool => IsWindowHidden;
        toggle_fullscreen() => ToggleFullscreen;
        unhide_window() => UnhideWindow;
        hide_window() => HideWindow;
        set_window_icon(image: Image) => SetWindowIcon;
        set_window_position(x: i32, y: i32) => SetWindowPosition;
        set_window_monitor(monitor: i32) => SetWindowMonitor;
        set_window_min_size(width: i32, height: i32) => SetWindowMinSize;
        set_window_size(width: i32, height: i32) => SetWindowSize;
        get_screen_width() -> i32 => GetScreenWidth;
        get_screen_height() -> i32 => GetScreenHeight;
        get_monitor_count() -> i32 => GetMonitorCount;
        get_monitor_width(monitor: i32) -> i32 => GetMonitorWidth;
        get_monitor_height(monitor: i32) -> i32 => GetMonitorHeight;
        get_monitor_physical_width(monitor: i32) -> i32 => GetMonitorPhysicalWidth;
        get_monitor_physical_height(monitor: i32) -> i32 => GetMonitorPhysicalHeight;

        show_cursor() => ShowCursor;
        hide_cursor() => HideCursor;
        is_cursor_hidden() -> bool => IsCursorHidden;
        enable_cursor() => EnableCursor;
        disable_cursor() => DisableCursor;

        clear_background(color: Color) => ClearBackground;
        begin_drawing() => BeginDrawing;
        begin_mode_2d(camera: Camera2D) => BeginMode2D;
        end_mode_2d() => EndMode2D;
        begin_mode_3d(camera: Camera3D) => BeginMode3D;
        end_mode_3d() => EndMode3D;
        begin_texture_mode(target: RenderTexture2D) => BeginTextureMode;
        end_texture_mode() => EndTextureMode;

        get_mouse_ray(mouse_position: Vector2, camera: Camera3D) -> Ray => GetMouseRay;
        get_world_to_screen(position: Vector3, camera: Camera3D) -> Vector2 => GetWorldToScreen;

        set_target_fps(fps: i32) => SetTargetFPS;
        get_fps() -> i32 => GetFPS;
        get_frame_time() -> f32 => GetFrameTime;
        get_time() -> f64 => GetTime;

        color_to_int(color: Color) -> i32 => ColorToInt;
        color_to_hsv(color: Color) -> Vector3 => ColorToHSV;
        color_from_hsv(hsv: Vector3) -> Color => ColorFromHSV;
        get_color(hex_value: i32) -> Color => GetColor;
        fade(color: Color, alpha: f32) -> Color => Fade;

        set_config_flags(flags: u32) => SetConfigFlags;
        set_trace_log_level(level: i32) => SetTraceLogLevel;
        set_trace_log_exit(level: i32) => SetTraceLogExit;
        get_random_value(min: i32, max: i32) -> i32 => GetRandomValue;

        is_file_dropped() -> bool => IsFileDropped;

        storage_save_value(position: i32, value: i32) => StorageSaveValue;
        storage_load_value(position: i32) -> i32 => StorageLoadValue;

        is_key_pressed(key: i32) -> bool => IsKeyPressed;
        is_key_down(key: i32) -> bool => IsKeyDown;
        is_key_released(key: i32) -> bool => IsKeyReleased;
        is_key_up(key: i32) -> bool => IsKeyUp;
        get_key_pressed() -> i32 => GetKeyPressed;
        set_exit_key(key: i32) => SetExitKey;

        is_gamepad_available(gamepad: i32) -> bool => IsGamepadAvailable;
        is_gamepad_button_pressed(gamepad: i32, button: i32) -> bool => IsGamepadButtonPressed;
        is_gamepad_button_down(gamepad: i32, button: i32) -> bool => IsGamepadButtonDown;
        is_gamepad_button_released(gamepad: i32, button: i32) -> bool => IsGamepadButtonReleased;
        is_gamepad_button_up(gamepad: i32, button: i32) -> bool => IsGamepadButtonUp;
        get_gamepad_button_pressed() -> i32 => GetGamepadButtonPressed;
        get_gamepad_axis_count(gamepad: i32) -> i32 => GetGamepadAxisCount;
        get_gamepad_axis_movement(gamepad: i32, axis: i32) -> f32 => GetGamepadAxisMovement;

        is_mouse_button_pressed(button: i32) -> bool => IsMouseButtonPressed;
        is_mouse_button_down(button: i32) -> bool => IsMouseButtonDown;
        is_mouse_button_released(button: i32) -> bool => IsMouseButtonReleased;
        is_mouse_button_up(button: i32) -> bool => IsMouseButtonUp;
        get_mouse_x() -> i32 => GetMouseX;
        get_mouse_y() -> i32 => GetMouseY;
        get_mouse_position() -> Vector2 => GetMousePosition;
        set_mouse_position(x: i32, y: i32) => SetMousePosition;
        set_mouse_offset(offset_x: i32, offset_y: i32) => SetMouseOffset;
        set_mouse_scale(scale_x: f32, scale_y: f32) => SetMouseScale;
        get_mouse_wheel_move() -> i32 => GetMouseWheelMove;

        get_touch_x() -> i32 => GetTouchX;
        get_touch_y() -> i32 => GetTouchY;
        get_touch_position(index: i32) -> Vector2 => GetTouchPosition;

        set_gestures_enabled(gesture_flags: u32) => SetGesturesEnabled;
        is_gesture_detected(gesture: i32) -> bool => IsGestureDetected;
        get_gesture_detected() -> i32 => GetGestureDetected;
        get_touch_points_count() -> i32 => GetTouchPointsCount;
        get_gesture_hold_duration() -> f32 => GetGestureHoldDuration;
        get_gesture_drag_vector() -> Vector2 => GetGestureDragVector;
        get_gesture_drag_angle() -> f32 => GetGestureDragAngle;
        get_gesture_pinch_vector() -> Vector2 => GetGesturePinchVector;
        get_gesture_pinch_angle() -> f32 => GetGesturePinchAngle;

        set_camera_mode(camera: Camera3D, mode: i32) => SetCameraMode;
        set_camera_pan_control(pan_key: i32) => SetCameraPanControl;
        set_camera_alt_control(alt_key: i32) => SetCameraAltControl;
        set_camera_smooth_zoom_control(sz_key: i32) => SetCameraSmoothZoomControl;
        set_camera_move_controls(
            front_key: i32,
            back_key: i32,
            right_key: i32,
            left_key: i32,
            up_key: i32,
            down_key: i32
        ) => SetCameraMoveControls;

        draw_pixel(pos_x: i32, pos_y: i32, color: Color) => DrawPixel;
        draw_pixel_v(position: Vector2, color: Color) => DrawPixelV;
        draw_line(start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color) => DrawLine;
        draw_line_v(start: Vector2, end: Vector2, color: Color) => DrawLineV;
        draw_line_ex(start: Vector2, end: Vector2, thick: f32, color: Color) => DrawLineEx;
        draw_line_bezier(start: Vector2, end: Vector2, thick: f32, color: Color) => DrawLineBezier;
        draw_circle(center_x: i32, center_y: i32, radius: f32, color: Color) => DrawCircle;
        draw_circle_sector(
            center: Vector2,
            radius: f32,
            start_angle: i32,
            end_angle: i32,
            segments: i32,
            color: Color
        ) => DrawCircleSector;
        draw_circle_sector_lines(
            center: Vector2,
            radius: f32,
            start_angle: i32,
            end_angle: i32,
            segments: i32,
            color: Color
        ) => DrawCircleSectorLines;
        draw_circle_gradient(center_x: i32, center_y: i32, radius: f32, color1: Color, color2: Color) => DrawCircleGradient;
        draw_circle_v(center: Vector2, radius: f32, color: Color) => DrawCircleV;
        draw_circle_lines(center_x: i32, center_y: i32, radius: f32, color: Color) => DrawCircleLines;
        draw_ring(
            center: Vector2,
            inner_radius: f32,
            outer_radius: f32,
            start_angle: i32,
            end_angle: i32,
            segments: i32,
            color: Color
        ) => DrawRing;
        draw_ring_lines(
            center: Vector2,
            inner_radius: f32,
            outer_radius: f32,
            start_angle: i32,
            end_angle: i32,
            segments: i32,
            color: Color
        ) => DrawRingLines;
        draw_rectangle(pos_x: i32, pos_y: i32, width: i32, height: i32, color: Color) => DrawRectangle;
        draw_rectangle_v(position: Vector2, size: Vector2, color: Color) => DrawRectangleV;
        draw_rectangle_rec(rec: Rectangle, color: Color) => DrawRectangleRec;
        draw_rectangle_pro(rec: Rectangle, origin: Vector2, rotation: f32, color: Color) => DrawRectanglePro;
        draw_rectangle_gradient_v(
            pos_x: i32,
            pos_y: i32,
            width: i32,
            height: i32,
            color1: Color,
            color2: Color
        ) => DrawRectangleGradientV;
        draw_rectangle_gradient_h(
            pos_x: i32,
            pos_y: i32,
            width: i32,
            height: i32,
            color1: Color,
            color2: Color
        ) => DrawRectangleGradientH;
        draw_rectangle_gradient_ex(rec: Rectangle, col1: Color, col2: Color, col3: Color, col4: Color) => DrawRectangleGradientEx;
        draw_rectangle_lines(pos_x: i32, pos_y: i32, width: i32, height: i32, color: Color) => DrawRectangleLines;
        draw_rectangle_lines_ex(rec: Rectangle, line_thick: i32, color: Color) => DrawRectangleLinesEx;
        draw_rectangle_rounded(rec: Rectangle, roundness: f32, segments: i32, color: Color) => DrawRectangleRounded;
        draw_rectangle_rounded_lines(
            rec: Rectangle,
            roundness: f32,
            segments: i32,
            line_thick: i32,
            color: Color
        ) => DrawRectangleRoundedLines;
        draw_triangle(v1: Vector2, v2: Vector2, v3: Vector2, color: Color) => DrawTriangle;
        draw_triangle_lines(v1: Vector2, v2: Vector2, v3: Vector2, color: Color) => DrawTriangleLines;
        draw_poly(center: Vector2, sides: i32, radius: f32, rotation: f32, color: Color) => DrawPoly;
        set_shapes_texture(texture: Texture2D, source: Rectangle) => SetShapesTexture;

        check_collision_recs(rec1: Rectangle, rec2: Rectangle) -> bool => CheckCollisionRecs;
        check_collision_circles(center1: Vector2, radius1: f32, center2: Vector2, radius2: f32) -> bool => CheckCollisionCircles;
        check_collision_circle_rec(center: Vector2, radius: f32, rec: Rectangle) -> bool => CheckCollisionCircleRec;
        get_collision_rec(rec1: Rectangle, rec2: Rectangle) -> Rectangle => GetCollisionRec;
        check_collision_point_rec(point: Vector2, rec: Rectangle) -> bool => CheckCollisionPointRec;
        check_collision_point_circle(point: Vector2, center: Vector2, radius: f32) -> bool => CheckCollisionPointCircle;
        check_collision_point_triangle(point: Vector2, p1: Vector2, p2: Vector2, p3: Vector2) -> bool => CheckCollisionPointTriangle;

        load_texture_from_image(image: Image) -> Texture2D => LoadTextureFromImage;
        load_texture_cubemap(image: Image, layout_type: i32) -> TextureCubemap => LoadTextureCubemap;
        load_render_texture(width: i32, height: i32) -> RenderTexture2D => LoadRenderTexture;
        unload_image(image: Image) => UnloadImage;
        unload_texture(texture: Texture2D) => UnloadTexture;
        unload_render_texture(target: RenderTexture2D) => UnloadRenderTexture;
        get_pixel_data_size(width: i32, height: i32, format: i32) -> i32 => GetPixelDataSize;
        get_texture_data(texture: Texture2D) -> Image => GetTextureData;
        get_screen_data() -> Image => GetScreenData;

        get_font_default() -> Font => GetFontDefault;
        load_font_from_image(image: Image, key: Color, first_char: i32) -> Font => LoadFontFromImage;
        unload_font(font: Font) => UnloadFont;
        draw_fps(pos_x: i32, pos_y: i32) => DrawFPS;
        get_glyph_index(font: Font, character: i32) -> i32 => GetGlyphIndex;

        draw_line_3d(start: Vector3, end: Vector3, color: Color) => DrawLine3D;
        draw_point_3d(position: Vector3, color: Color) => DrawPoint3D;
        draw_circle_3d(center: Vector3, radius: f32, rotation_axis: Vector3, rotation_angle: f32, color: Color) => DrawCircle3D;
        draw_cube(position: Vector3, width: f32, height: f32, length: f32, color: Color) => DrawCube;
        draw_cube_v(position: Vector3, size: Vector3, color: Color) => DrawCubeV;
        draw_cube_wires(position: Vector3, width: f32, height: f32, length: f32, color: Color) => DrawCubeWires;
        draw_cube_wires_v(position: Vector3, size: Vector3, color: Color) => DrawCubeWiresV;
        draw_cube_texture(
            texture: Texture2D,
            position: Vector3,
            width: f32,
            height: f32,
            length: f32,
            color: Color
        ) => DrawCubeTexture;
        draw_sphere(center: Vector3, radius: f32, color: Color) => DrawSphere;
        draw_sphere_ex(center: Vector3, radius: f32, rings: i32, slices: i32, color: Color) => DrawSphereEx;
        draw_sphere_wires(center: Vector3, radius: f32, rings: i32, slices: i32, color: Color) => DrawSphereWires;
        draw_cylinder(
            position: Vector3,
            radius_top: f32,
            radius_bottom: f32,
            height: f32,
            slices: i32,
            color: Color
        ) => DrawCylinder;
        draw_cylinder_wires(
            position: Vector3,
            radius_top: f32,
            radius_bottom: f32,
            height: f32,
            slices: i32,
            color: Color
        ) => DrawCylinderWires;
        draw_plane(center: Vector3, size: Vector2, color: Color) => DrawPlane;
        draw_ray(ray: Ray, color: Color) => DrawRay;
        draw_grid(slices: i32, spacing: f32) => DrawGrid;
        draw_gizmo(position: Vector3) => DrawGizmo;
    }

    fn window_should_close(&mut self) -> bool {
        let limit_reached = self.max_frames > 0 && self.frame >= self.max_frames;
        limit_reached || unsafe { ffi::WindowShouldClose() }
    }

    fn end_drawing(&mut self) {
        unsafe { ffi::EndDrawing() }
        self.frame += 1;
    }

    fn get_camera_matrix(&mut self, camera: Camera3D) -> Matrix {
        unsafe { ffi::GetCameraMatrix(camera) }.into()
    }

    fn color_normalize(&mut self, color: Color) -> Vector4 {
        unsafe { ffi::ColorNormalize(color) }.into()
    }

    fn open_url(&mut self, url: &str) {
        if !self.allow_open_url {
            tracing::warn!(target: "raylib", url, "openURL disabled by configuration");
            return;
        }
        let url = c_string(url);
        unsafe { ffi::OpenURL(url.as_ptr()) }
    }

    fn get_directory_files(&mut self, dir_path: &str) -> Vec<String> {
        let dir_path = c_string(dir_path);
        let mut count: c_int = 0;
        unsafe {
            let list = ffi::GetDirectoryFiles(dir_path.as_ptr(), &mut count);
            let files = owned_list(list, count);
            ffi::ClearDirectoryFiles();
            files
        }
    }

    fn get_dropped_files(&mut self) -> Vec<String> {
        let mut count: c_int = 0;
        unsafe {
            let list = ffi::GetDroppedFiles(&mut count);
            let files = owned_list(list, count);
            ffi::ClearDroppedFiles();
            files
        }
    }

    fn get_file_mod_time(&mut self, file_name: &str) -> i64 {
        let file_name = c_string(file_name);
        i64::from(unsafe { ffi::GetFileModTime(file_name.as_ptr()) })
    }

    fn update_camera(&mut self, camera: &mut Camera3D) {
        unsafe { ffi::UpdateCamera(camera) }
    }

    fn draw_line_strip(&mut self, points: &[Vector2], color: Color) {
        unsafe { ffi::DrawLineStrip(points.as_ptr(), len_i32(points.len()), color) }
    }

    fn draw_triangle_fan(&mut self, points: &[Vector2], color: Color) {
        unsafe { ffi::DrawTriangleFan(points.as_ptr(), len_i32(points.len()), color) }
    }

    fn load_image_ex(&mut self, pixels: &[Color], width: i32, height: i32) -> Image {
        unsafe { ffi::LoadImageEx(pixels.as_ptr(), width, height) }
    }

    fn get_image_data(&mut self, image: Image) -> Vec<Color> {
        unsafe { take_array(ffi::GetImageData(image), pixel_count(&image)) }
    }

    fn get_image_data_normalized(&mut self, image: Image) -> Vec<Vector4> {
        let values: Vec<RlVector4> = unsafe { take_array(ffi::GetImageDataNormalized(image), pixel_count(&image)) };
        values.into_iter().map(Vector4::from).collect()
    }

    fn update_texture(&mut self, texture: Texture2D, pixels: &[u8]) {
        unsafe { ffi::UpdateTexture(texture, pixels.as_ptr().cast::<c_void>()) }
    }

    fn load_font_ex(&mut self, file_name: &str, font_size: i32, font_chars: &[i32]) -> Font {
        let file_name = c_string(file_name);
        let chars = if font_chars.is_empty() { std::ptr::null() } else { font_chars.as_ptr() };
        unsafe { ffi::LoadFontEx(file_name.as_ptr(), font_size, chars, len_i32(font_chars.len())) }
    }

    fn load_font_data(&mut self, file_name: &str, font_size: i32, font_chars: &[i32], font_type: i32) -> Vec<CharInfo> {
        let file_name = c_string(file_name);
        let (chars, count) = if font_chars.is_empty() {
            (std::ptr::null(), DEFAULT_FONT_CHARS)
        } else {
            (font_chars.as_ptr(), font_chars.len())
        };
        unsafe {
            let data = ffi::LoadFontData(file_name.as_ptr(), font_size, chars, len_i32(font_chars.len()), font_type);
            take_array(data, count)
        }
    }

    fn gen_image_font_atlas(&mut self, chars: &[CharInfo], font_size: i32, padding: i32, pack_method: i32) -> Image {
        let mut recs: *mut Rectangle = std::ptr::null_mut();
        unsafe {
            let atlas = ffi::GenImageFontAtlas(
                chars.as_ptr(),
                &mut recs,
                len_i32(chars.len()),
                font_size,
                padding,
                pack_method,
            );
            if !recs.is_null() {
                ffi::free(recs.cast::<c_void>());
            }
            atlas
        }
    }

    fn draw_text_rec_ex(
        &mut self,
        font: Font,
        text: &str,
        rec: Rectangle,
        font_size: f32,
        spacing: f32,
        word_wrap: bool,
        tint: Color,
        select_start: i32,
        select_length: i32,
        select_text: Color,
        select_back: Color,
    ) {
        let text = c_string(text);
        unsafe {
            ffi::DrawTextRecEx(
                font,
                text.as_ptr(),
                rec,
                font_size,
                spacing,
                word_wrap,
                tint,
                select_start,
                select_length,
                select_text,
                select_back,
            )
        }
    }
}
