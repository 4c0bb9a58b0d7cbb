//! raylib 2.6 C 接口声明
//!
//! 结构体按值传递，布局见 `types` 模块。`Vector4` 与 `Matrix` 在 glam 中按
//! SIMD 对齐，这里使用单独的 C 布局结构体并在边界上转换。

use super::types::*;
use std::ffi::{c_char, c_int, c_long, c_uint, c_void};

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RlVector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<RlVector4> for Vector4 {
    fn from(v: RlVector4) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

/// raylib 的矩阵字段按行声明，`mN` 是列主序下标
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RlMatrix {
    pub m0: f32,
    pub m4: f32,
    pub m8: f32,
    pub m12: f32,
    pub m1: f32,
    pub m5: f32,
    pub m9: f32,
    pub m13: f32,
    pub m2: f32,
    pub m6: f32,
    pub m10: f32,
    pub m14: f32,
    pub m3: f32,
    pub m7: f32,
    pub m11: f32,
    pub m15: f32,
}

impl From<RlMatrix> for Matrix {
    fn from(m: RlMatrix) -> Self {
        Matrix::from_cols_array(&[
            m.m0, m.m1, m.m2, m.m3, m.m4, m.m5, m.m6, m.m7, m.m8, m.m9, m.m10, m.m11, m.m12, m.m13, m.m14,
            m.m15,
        ])
    }
}

#[link(name = "raylib")]
extern "C" {
    // Window
    pub fn InitWindow(width: c_int, height: c_int, title: *const c_char);
    pub fn WindowShouldClose() -> bool;
    pub fn CloseWindow();
    pub fn IsWindowReady() -> bool;
    pub fn IsWindowMinimized() -> bool;
    pub fn IsWindowResized() -> bool;
    pub fn IsWindowHidden() -> bool;
    pub fn ToggleFullscreen();
    pub fn UnhideWindow();
    pub fn HideWindow();
    pub fn SetWindowIcon(image: Image);
    pub fn SetWindowTitle(title: *const c_char);
    pub fn SetWindowPosition(x: c_int, y: c_int);
    pub fn SetWindowMonitor(monitor: c_int);
    pub fn SetWindowMinSize(width: c_int, height: c_int);
    pub fn SetWindowSize(width: c_int, height: c_int);
    pub fn GetScreenWidth() -> c_int;
    pub fn GetScreenHeight() -> c_int;
    pub fn GetMonitorCount() -> c_int;
    pub fn GetMonitorWidth(monitor: c_int) -> c_int;
    pub fn GetMonitorHeight(monitor: c_int) -> c_int;
    pub fn GetMonitorPhysicalWidth(monitor: c_int) -> c_int;
    pub fn GetMonitorPhysicalHeight(monitor: c_int) -> c_int;
    pub fn GetMonitorName(monitor: c_int) -> *const c_char;
    pub fn GetClipboardText() -> *const c_char;
    pub fn SetClipboardText(text: *const c_char);

    // Cursor
    pub fn ShowCursor();
    pub fn HideCursor();
    pub fn IsCursorHidden() -> bool;
    pub fn EnableCursor();
    pub fn DisableCursor();

    // Drawing
    pub fn ClearBackground(color: Color);
    pub fn BeginDrawing();
    pub fn EndDrawing();
    pub fn BeginMode2D(camera: Camera2D);
    pub fn EndMode2D();
    pub fn BeginMode3D(camera: Camera3D);
    pub fn EndMode3D();
    pub fn BeginTextureMode(target: RenderTexture2D);
    pub fn EndTextureMode();

    // Screen-space
    pub fn GetMouseRay(mouse_position: Vector2, camera: Camera3D) -> Ray;
    pub fn GetWorldToScreen(position: Vector3, camera: Camera3D) -> Vector2;
    pub fn GetCameraMatrix(camera: Camera3D) -> RlMatrix;

    // Timing
    pub fn SetTargetFPS(fps: c_int);
    pub fn GetFPS() -> c_int;
    pub fn GetFrameTime() -> f32;
    pub fn GetTime() -> f64;

    // Color
    pub fn ColorToInt(color: Color) -> c_int;
    pub fn ColorNormalize(color: Color) -> RlVector4;
    pub fn ColorToHSV(color: Color) -> Vector3;
    pub fn ColorFromHSV(hsv: Vector3) -> Color;
    pub fn GetColor(hex_value: c_int) -> Color;
    pub fn Fade(color: Color, alpha: f32) -> Color;

    // Misc
    pub fn SetConfigFlags(flags: c_uint);
    pub fn SetTraceLogLevel(log_type: c_int);
    pub fn SetTraceLogExit(log_type: c_int);
    pub fn TakeScreenshot(file_name: *const c_char);
    pub fn GetRandomValue(min: c_int, max: c_int) -> c_int;
    pub fn OpenURL(url: *const c_char);

    // Files
    pub fn FileExists(file_name: *const c_char) -> bool;
    pub fn IsFileExtension(file_name: *const c_char, ext: *const c_char) -> bool;
    pub fn GetExtension(file_name: *const c_char) -> *const c_char;
    pub fn GetFileName(file_path: *const c_char) -> *const c_char;
    pub fn GetFileNameWithoutExt(file_path: *const c_char) -> *const c_char;
    pub fn GetDirectoryPath(file_name: *const c_char) -> *const c_char;
    pub fn GetWorkingDirectory() -> *const c_char;
    pub fn GetDirectoryFiles(dir_path: *const c_char, count: *mut c_int) -> *mut *mut c_char;
    pub fn ClearDirectoryFiles();
    pub fn ChangeDirectory(dir: *const c_char) -> bool;
    pub fn IsFileDropped() -> bool;
    pub fn GetDroppedFiles(count: *mut c_int) -> *mut *mut c_char;
    pub fn ClearDroppedFiles();
    pub fn GetFileModTime(file_name: *const c_char) -> c_long;

    // Storage
    pub fn StorageSaveValue(position: c_int, value: c_int);
    pub fn StorageLoadValue(position: c_int) -> c_int;

    // Keyboard
    pub fn IsKeyPressed(key: c_int) -> bool;
    pub fn IsKeyDown(key: c_int) -> bool;
    pub fn IsKeyReleased(key: c_int) -> bool;
    pub fn IsKeyUp(key: c_int) -> bool;
    pub fn GetKeyPressed() -> c_int;
    pub fn SetExitKey(key: c_int);

    // Gamepad
    pub fn IsGamepadAvailable(gamepad: c_int) -> bool;
    pub fn IsGamepadName(gamepad: c_int, name: *const c_char) -> bool;
    pub fn GetGamepadName(gamepad: c_int) -> *const c_char;
    pub fn IsGamepadButtonPressed(gamepad: c_int, button: c_int) -> bool;
    pub fn IsGamepadButtonDown(gamepad: c_int, button: c_int) -> bool;
    pub fn IsGamepadButtonReleased(gamepad: c_int, button: c_int) -> bool;
    pub fn IsGamepadButtonUp(gamepad: c_int, button: c_int) -> bool;
    pub fn GetGamepadButtonPressed() -> c_int;
    pub fn GetGamepadAxisCount(gamepad: c_int) -> c_int;
    pub fn GetGamepadAxisMovement(gamepad: c_int, axis: c_int) -> f32;

    // Mouse
    pub fn IsMouseButtonPressed(button: c_int) -> bool;
    pub fn IsMouseButtonDown(button: c_int) -> bool;
    pub fn IsMouseButtonReleased(button: c_int) -> bool;
    pub fn IsMouseButtonUp(button: c_int) -> bool;
    pub fn GetMouseX() -> c_int;
    pub fn GetMouseY() -> c_int;
    pub fn GetMousePosition() -> Vector2;
    pub fn SetMousePosition(x: c_int, y: c_int);
    pub fn SetMouseOffset(offset_x: c_int, offset_y: c_int);
    pub fn SetMouseScale(scale_x: f32, scale_y: f32);
    pub fn GetMouseWheelMove() -> c_int;

    // Touch
    pub fn GetTouchX() -> c_int;
    pub fn GetTouchY() -> c_int;
    pub fn GetTouchPosition(index: c_int) -> Vector2;

    // Gestures
    pub fn SetGesturesEnabled(gesture_flags: c_uint);
    pub fn IsGestureDetected(gesture: c_int) -> bool;
    pub fn GetGestureDetected() -> c_int;
    pub fn GetTouchPointsCount() -> c_int;
    pub fn GetGestureHoldDuration() -> f32;
    pub fn GetGestureDragVector() -> Vector2;
    pub fn GetGestureDragAngle() -> f32;
    pub fn GetGesturePinchVector() -> Vector2;
    pub fn GetGesturePinchAngle() -> f32;

    // Camera
    pub fn SetCameraMode(camera: Camera3D, mode: c_int);
    pub fn UpdateCamera(camera: *mut Camera3D);
    pub fn SetCameraPanControl(pan_key: c_int);
    pub fn SetCameraAltControl(alt_key: c_int);
    pub fn SetCameraSmoothZoomControl(sz_key: c_int);
    pub fn SetCameraMoveControls(
        front_key: c_int,
        back_key: c_int,
        right_key: c_int,
        left_key: c_int,
        up_key: c_int,
        down_key: c_int,
    );

    // Shapes
    pub fn DrawPixel(pos_x: c_int, pos_y: c_int, color: Color);
    pub fn DrawPixelV(position: Vector2, color: Color);
    pub fn DrawLine(start_x: c_int, start_y: c_int, end_x: c_int, end_y: c_int, color: Color);
    pub fn DrawLineV(start: Vector2, end: Vector2, color: Color);
    pub fn DrawLineEx(start: Vector2, end: Vector2, thick: f32, color: Color);
    pub fn DrawLineBezier(start: Vector2, end: Vector2, thick: f32, color: Color);
    pub fn DrawLineStrip(points: *const Vector2, num_points: c_int, color: Color);
    pub fn DrawCircle(center_x: c_int, center_y: c_int, radius: f32, color: Color);
    pub fn DrawCircleSector(
        center: Vector2,
        radius: f32,
        start_angle: c_int,
        end_angle: c_int,
        segments: c_int,
        color: Color,
    );
    pub fn DrawCircleSectorLines(
        center: Vector2,
        radius: f32,
        start_angle: c_int,
        end_angle: c_int,
        segments: c_int,
        color: Color,
    );
    pub fn DrawCircleGradient(center_x: c_int, center_y: c_int, radius: f32, color1: Color, color2: Color);
    pub fn DrawCircleV(center: Vector2, radius: f32, color: Color);
    pub fn DrawCircleLines(center_x: c_int, center_y: c_int, radius: f32, color: Color);
    pub fn DrawRing(
        center: Vector2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: c_int,
        end_angle: c_int,
        segments: c_int,
        color: Color,
    );
    pub fn DrawRingLines(
        center: Vector2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: c_int,
        end_angle: c_int,
        segments: c_int,
        color: Color,
    );
    pub fn DrawRectangle(pos_x: c_int, pos_y: c_int, width: c_int, height: c_int, color: Color);
    pub fn DrawRectangleV(position: Vector2, size: Vector2, color: Color);
    pub fn DrawRectangleRec(rec: Rectangle, color: Color);
    pub fn DrawRectanglePro(rec: Rectangle, origin: Vector2, rotation: f32, color: Color);
    pub fn DrawRectangleGradientV(
        pos_x: c_int,
        pos_y: c_int,
        width: c_int,
        height: c_int,
        color1: Color,
        color2: Color,
    );
    pub fn DrawRectangleGradientH(
        pos_x: c_int,
        pos_y: c_int,
        width: c_int,
        height: c_int,
        color1: Color,
        color2: Color,
    );
    pub fn DrawRectangleGradientEx(rec: Rectangle, col1: Color, col2: Color, col3: Color, col4: Color);
    pub fn DrawRectangleLines(pos_x: c_int, pos_y: c_int, width: c_int, height: c_int, color: Color);
    pub fn DrawRectangleLinesEx(rec: Rectangle, line_thick: c_int, color: Color);
    pub fn DrawRectangleRounded(rec: Rectangle, roundness: f32, segments: c_int, color: Color);
    pub fn DrawRectangleRoundedLines(rec: Rectangle, roundness: f32, segments: c_int, line_thick: c_int, color: Color);
    pub fn DrawTriangle(v1: Vector2, v2: Vector2, v3: Vector2, color: Color);
    pub fn DrawTriangleLines(v1: Vector2, v2: Vector2, v3: Vector2, color: Color);
    pub fn DrawTriangleFan(points: *const Vector2, num_points: c_int, color: Color);
    pub fn DrawPoly(center: Vector2, sides: c_int, radius: f32, rotation: f32, color: Color);
    pub fn SetShapesTexture(texture: Texture2D, source: Rectangle);

    // Collision
    pub fn CheckCollisionRecs(rec1: Rectangle, rec2: Rectangle) -> bool;
    pub fn CheckCollisionCircles(center1: Vector2, radius1: f32, center2: Vector2, radius2: f32) -> bool;
    pub fn CheckCollisionCircleRec(center: Vector2, radius: f32, rec: Rectangle) -> bool;
    pub fn GetCollisionRec(rec1: Rectangle, rec2: Rectangle) -> Rectangle;
    pub fn CheckCollisionPointRec(point: Vector2, rec: Rectangle) -> bool;
    pub fn CheckCollisionPointCircle(point: Vector2, center: Vector2, radius: f32) -> bool;
    pub fn CheckCollisionPointTriangle(point: Vector2, p1: Vector2, p2: Vector2, p3: Vector2) -> bool;

    // Textures
    pub fn LoadImage(file_name: *const c_char) -> Image;
    pub fn LoadImageEx(pixels: *const Color, width: c_int, height: c_int) -> Image;
    pub fn LoadImageRaw(
        file_name: *const c_char,
        width: c_int,
        height: c_int,
        format: c_int,
        header_size: c_int,
    ) -> Image;
    pub fn ExportImage(image: Image, file_name: *const c_char);
    pub fn ExportImageAsCode(image: Image, file_name: *const c_char);
    pub fn LoadTexture(file_name: *const c_char) -> Texture2D;
    pub fn LoadTextureFromImage(image: Image) -> Texture2D;
    pub fn LoadTextureCubemap(image: Image, layout_type: c_int) -> TextureCubemap;
    pub fn LoadRenderTexture(width: c_int, height: c_int) -> RenderTexture2D;
    pub fn UnloadImage(image: Image);
    pub fn UnloadTexture(texture: Texture2D);
    pub fn UnloadRenderTexture(target: RenderTexture2D);
    pub fn GetImageData(image: Image) -> *mut Color;
    pub fn GetImageDataNormalized(image: Image) -> *mut RlVector4;
    pub fn GetPixelDataSize(width: c_int, height: c_int, format: c_int) -> c_int;
    pub fn GetTextureData(texture: Texture2D) -> Image;
    pub fn GetScreenData() -> Image;
    pub fn UpdateTexture(texture: Texture2D, pixels: *const c_void);

    // Text
    pub fn GetFontDefault() -> Font;
    pub fn LoadFont(file_name: *const c_char) -> Font;
    pub fn LoadFontEx(file_name: *const c_char, font_size: c_int, font_chars: *const c_int, chars_count: c_int) -> Font;
    pub fn LoadFontFromImage(image: Image, key: Color, first_char: c_int) -> Font;
    pub fn LoadFontData(
        file_name: *const c_char,
        font_size: c_int,
        font_chars: *const c_int,
        chars_count: c_int,
        font_type: c_int,
    ) -> *mut CharInfo;
    pub fn GenImageFontAtlas(
        chars: *const CharInfo,
        recs: *mut *mut Rectangle,
        chars_count: c_int,
        font_size: c_int,
        padding: c_int,
        pack_method: c_int,
    ) -> Image;
    pub fn UnloadFont(font: Font);
    pub fn DrawFPS(pos_x: c_int, pos_y: c_int);
    pub fn DrawText(text: *const c_char, pos_x: c_int, pos_y: c_int, font_size: c_int, color: Color);
    pub fn DrawTextEx(font: Font, text: *const c_char, position: Vector2, font_size: f32, spacing: f32, tint: Color);
    pub fn DrawTextRec(
        font: Font,
        text: *const c_char,
        rec: Rectangle,
        font_size: f32,
        spacing: f32,
        word_wrap: bool,
        tint: Color,
    );
    pub fn DrawTextRecEx(
        font: Font,
        text: *const c_char,
        rec: Rectangle,
        font_size: f32,
        spacing: f32,
        word_wrap: bool,
        tint: Color,
        select_start: c_int,
        select_length: c_int,
        select_text: Color,
        select_back: Color,
    );
    pub fn MeasureText(text: *const c_char, font_size: c_int) -> c_int;
    pub fn MeasureTextEx(font: Font, text: *const c_char, font_size: f32, spacing: f32) -> Vector2;
    pub fn GetGlyphIndex(font: Font, character: c_int) -> c_int;

    // Basic 3D shapes
    pub fn DrawLine3D(start: Vector3, end: Vector3, color: Color);
    pub fn DrawPoint3D(position: Vector3, color: Color);
    pub fn DrawCircle3D(center: Vector3, radius: f32, rotation_axis: Vector3, rotation_angle: f32, color: Color);
    pub fn DrawCube(position: Vector3, width: f32, height: f32, length: f32, color: Color);
    pub fn DrawCubeV(position: Vector3, size: Vector3, color: Color);
    pub fn DrawCubeWires(position: Vector3, width: f32, height: f32, length: f32, color: Color);
    pub fn DrawCubeWiresV(position: Vector3, size: Vector3, color: Color);
    pub fn DrawCubeTexture(texture: Texture2D, position: Vector3, width: f32, height: f32, length: f32, color: Color);
    pub fn DrawSphere(center: Vector3, radius: f32, color: Color);
    pub fn DrawSphereEx(center: Vector3, radius: f32, rings: c_int, slices: c_int, color: Color);
    pub fn DrawSphereWires(center: Vector3, radius: f32, rings: c_int, slices: c_int, color: Color);
    pub fn DrawCylinder(
        position: Vector3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: c_int,
        color: Color,
    );
    pub fn DrawCylinderWires(
        position: Vector3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: c_int,
        color: Color,
    );
    pub fn DrawPlane(center: Vector3, size: Vector2, color: Color);
    pub fn DrawRay(ray: Ray, color: Color);
    pub fn DrawGrid(slices: c_int, spacing: f32);
    pub fn DrawGizmo(position: Vector3);
}

// raylib 用 C 运行时的 malloc 分配返回的数组
extern "C" {
    pub fn free(ptr: *mut c_void);
}
