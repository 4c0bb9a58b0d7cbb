//! raylib 原生库接口
//!
//! `Raylib` trait 一一对应脚本可调用的原生函数（raylib 2.6 API）。
//! 桥接层只通过这个 trait 访问原生库，因此可以在 headless 后端与真实
//! 动态库之间切换：
//!
//! - [`headless::HeadlessRaylib`]: 进程内实现，记录每次原生调用
//! - `native::NativeRaylib`: 链接系统 raylib（`native` feature）

pub mod consts;
pub mod headless;
pub mod math;
pub mod types;

#[cfg(feature = "native")]
mod ffi;
#[cfg(feature = "native")]
pub mod native;

pub use headless::HeadlessRaylib;
#[cfg(feature = "native")]
pub use native::NativeRaylib;
pub use types::*;

/// raylib 原生函数集合
///
/// 所有参数按值传递（与 C ABI 一致），唯一例外是 `update_camera`，
/// 它就地修改相机。
pub trait Raylib {
    // ---- Window ----
    fn init_window(&mut self, width: i32, height: i32, title: &str);
    fn window_should_close(&mut self) -> bool;
    fn close_window(&mut self);
    fn is_window_ready(&mut self) -> bool;
    fn is_window_minimized(&mut self) -> bool;
    fn is_window_resized(&mut self) -> bool;
    fn is_window_hidden(&mut self) -> bool;
    fn toggle_fullscreen(&mut self);
    fn unhide_window(&mut self);
    fn hide_window(&mut self);
    fn set_window_icon(&mut self, image: Image);
    fn set_window_title(&mut self, title: &str);
    fn set_window_position(&mut self, x: i32, y: i32);
    fn set_window_monitor(&mut self, monitor: i32);
    fn set_window_min_size(&mut self, width: i32, height: i32);
    fn set_window_size(&mut self, width: i32, height: i32);
    fn get_screen_width(&mut self) -> i32;
    fn get_screen_height(&mut self) -> i32;
    fn get_monitor_count(&mut self) -> i32;
    fn get_monitor_width(&mut self, monitor: i32) -> i32;
    fn get_monitor_height(&mut self, monitor: i32) -> i32;
    fn get_monitor_physical_width(&mut self, monitor: i32) -> i32;
    fn get_monitor_physical_height(&mut self, monitor: i32) -> i32;
    fn get_monitor_name(&mut self, monitor: i32) -> String;
    fn get_clipboard_text(&mut self) -> String;
    fn set_clipboard_text(&mut self, text: &str);

    // ---- Cursor ----
    fn show_cursor(&mut self);
    fn hide_cursor(&mut self);
    fn is_cursor_hidden(&mut self) -> bool;
    fn enable_cursor(&mut self);
    fn disable_cursor(&mut self);

    // ---- Drawing ----
    fn clear_background(&mut self, color: Color);
    fn begin_drawing(&mut self);
    fn end_drawing(&mut self);
    fn begin_mode_2d(&mut self, camera: Camera2D);
    fn end_mode_2d(&mut self);
    fn begin_mode_3d(&mut self, camera: Camera3D);
    fn end_mode_3d(&mut self);
    fn begin_texture_mode(&mut self, target: RenderTexture2D);
    fn end_texture_mode(&mut self);

    // ---- Screen space ----
    fn get_mouse_ray(&mut self, mouse_position: Vector2, camera: Camera3D) -> Ray;
    fn get_world_to_screen(&mut self, position: Vector3, camera: Camera3D) -> Vector2;
    fn get_camera_matrix(&mut self, camera: Camera3D) -> Matrix;

    // ---- Timing ----
    fn set_target_fps(&mut self, fps: i32);
    fn get_fps(&mut self) -> i32;
    fn get_frame_time(&mut self) -> f32;
    fn get_time(&mut self) -> f64;

    // ---- Color ----
    fn color_to_int(&mut self, color: Color) -> i32;
    fn color_normalize(&mut self, color: Color) -> Vector4;
    fn color_to_hsv(&mut self, color: Color) -> Vector3;
    fn color_from_hsv(&mut self, hsv: Vector3) -> Color;
    fn get_color(&mut self, hex_value: i32) -> Color;
    fn fade(&mut self, color: Color, alpha: f32) -> Color;

    // ---- Misc ----
    fn set_config_flags(&mut self, flags: u32);
    fn set_trace_log_level(&mut self, level: i32);
    fn set_trace_log_exit(&mut self, level: i32);
    fn take_screenshot(&mut self, file_name: &str);
    fn get_random_value(&mut self, min: i32, max: i32) -> i32;
    fn open_url(&mut self, url: &str);

    // ---- Files ----
    fn file_exists(&mut self, file_name: &str) -> bool;
    fn is_file_extension(&mut self, file_name: &str, ext: &str) -> bool;
    fn get_extension(&mut self, file_name: &str) -> String;
    fn get_file_name(&mut self, file_path: &str) -> String;
    fn get_file_name_without_ext(&mut self, file_path: &str) -> String;
    fn get_directory_path(&mut self, file_name: &str) -> String;
    fn get_working_directory(&mut self) -> String;
    /// 列出目录内容（raylib 的 GetDirectoryFiles + ClearDirectoryFiles）
    fn get_directory_files(&mut self, dir_path: &str) -> Vec<String>;
    fn change_directory(&mut self, dir: &str) -> bool;
    fn is_file_dropped(&mut self) -> bool;
    /// 取出并清空拖放文件列表
    fn get_dropped_files(&mut self) -> Vec<String>;
    fn get_file_mod_time(&mut self, file_name: &str) -> i64;

    // ---- Persistent storage ----
    fn storage_save_value(&mut self, position: i32, value: i32);
    fn storage_load_value(&mut self, position: i32) -> i32;

    // ---- Keyboard ----
    fn is_key_pressed(&mut self, key: i32) -> bool;
    fn is_key_down(&mut self, key: i32) -> bool;
    fn is_key_released(&mut self, key: i32) -> bool;
    fn is_key_up(&mut self, key: i32) -> bool;
    fn get_key_pressed(&mut self) -> i32;
    fn set_exit_key(&mut self, key: i32);

    // ---- Gamepad ----
    fn is_gamepad_available(&mut self, gamepad: i32) -> bool;
    fn is_gamepad_name(&mut self, gamepad: i32, name: &str) -> bool;
    fn get_gamepad_name(&mut self, gamepad: i32) -> String;
    fn is_gamepad_button_pressed(&mut self, gamepad: i32, button: i32) -> bool;
    fn is_gamepad_button_down(&mut self, gamepad: i32, button: i32) -> bool;
    fn is_gamepad_button_released(&mut self, gamepad: i32, button: i32) -> bool;
    fn is_gamepad_button_up(&mut self, gamepad: i32, button: i32) -> bool;
    fn get_gamepad_button_pressed(&mut self) -> i32;
    fn get_gamepad_axis_count(&mut self, gamepad: i32) -> i32;
    fn get_gamepad_axis_movement(&mut self, gamepad: i32, axis: i32) -> f32;

    // ---- Mouse ----
    fn is_mouse_button_pressed(&mut self, button: i32) -> bool;
    fn is_mouse_button_down(&mut self, button: i32) -> bool;
    fn is_mouse_button_released(&mut self, button: i32) -> bool;
    fn is_mouse_button_up(&mut self, button: i32) -> bool;
    fn get_mouse_x(&mut self) -> i32;
    fn get_mouse_y(&mut self) -> i32;
    fn get_mouse_position(&mut self) -> Vector2;
    fn set_mouse_position(&mut self, x: i32, y: i32);
    fn set_mouse_offset(&mut self, offset_x: i32, offset_y: i32);
    fn set_mouse_scale(&mut self, scale_x: f32, scale_y: f32);
    fn get_mouse_wheel_move(&mut self) -> i32;

    // ---- Touch ----
    fn get_touch_x(&mut self) -> i32;
    fn get_touch_y(&mut self) -> i32;
    fn get_touch_position(&mut self, index: i32) -> Vector2;

    // ---- Gestures ----
    fn set_gestures_enabled(&mut self, gesture_flags: u32);
    fn is_gesture_detected(&mut self, gesture: i32) -> bool;
    fn get_gesture_detected(&mut self) -> i32;
    fn get_touch_points_count(&mut self) -> i32;
    fn get_gesture_hold_duration(&mut self) -> f32;
    fn get_gesture_drag_vector(&mut self) -> Vector2;
    fn get_gesture_drag_angle(&mut self) -> f32;
    fn get_gesture_pinch_vector(&mut self) -> Vector2;
    fn get_gesture_pinch_angle(&mut self) -> f32;

    // ---- Camera system ----
    fn set_camera_mode(&mut self, camera: Camera3D, mode: i32);
    fn update_camera(&mut self, camera: &mut Camera3D);
    fn set_camera_pan_control(&mut self, pan_key: i32);
    fn set_camera_alt_control(&mut self, alt_key: i32);
    fn set_camera_smooth_zoom_control(&mut self, sz_key: i32);
    fn set_camera_move_controls(
        &mut self,
        front_key: i32,
        back_key: i32,
        right_key: i32,
        left_key: i32,
        up_key: i32,
        down_key: i32,
    );

    // ---- Shapes ----
    fn draw_pixel(&mut self, pos_x: i32, pos_y: i32, color: Color);
    fn draw_pixel_v(&mut self, position: Vector2, color: Color);
    fn draw_line(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color);
    fn draw_line_v(&mut self, start: Vector2, end: Vector2, color: Color);
    fn draw_line_ex(&mut self, start: Vector2, end: Vector2, thick: f32, color: Color);
    fn draw_line_bezier(&mut self, start: Vector2, end: Vector2, thick: f32, color: Color);
    fn draw_line_strip(&mut self, points: &[Vector2], color: Color);
    fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color);
    fn draw_circle_sector(
        &mut self,
        center: Vector2,
        radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    );
    fn draw_circle_sector_lines(
        &mut self,
        center: Vector2,
        radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    );
    fn draw_circle_gradient(&mut self, center_x: i32, center_y: i32, radius: f32, color1: Color, color2: Color);
    fn draw_circle_v(&mut self, center: Vector2, radius: f32, color: Color);
    fn draw_circle_lines(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color);
    #[allow(clippy::too_many_arguments)]
    fn draw_ring(
        &mut self,
        center: Vector2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    );
    #[allow(clippy::too_many_arguments)]
    fn draw_ring_lines(
        &mut self,
        center: Vector2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    );
    fn draw_rectangle(&mut self, pos_x: i32, pos_y: i32, width: i32, height: i32, color: Color);
    fn draw_rectangle_v(&mut self, position: Vector2, size: Vector2, color: Color);
    fn draw_rectangle_rec(&mut self, rec: Rectangle, color: Color);
    fn draw_rectangle_pro(&mut self, rec: Rectangle, origin: Vector2, rotation: f32, color: Color);
    fn draw_rectangle_gradient_v(
        &mut self,
        pos_x: i32,
        pos_y: i32,
        width: i32,
        height: i32,
        color1: Color,
        color2: Color,
    );
    fn draw_rectangle_gradient_h(
        &mut self,
        pos_x: i32,
        pos_y: i32,
        width: i32,
        height: i32,
        color1: Color,
        color2: Color,
    );
    fn draw_rectangle_gradient_ex(&mut self, rec: Rectangle, col1: Color, col2: Color, col3: Color, col4: Color);
    fn draw_rectangle_lines(&mut self, pos_x: i32, pos_y: i32, width: i32, height: i32, color: Color);
    fn draw_rectangle_lines_ex(&mut self, rec: Rectangle, line_thick: i32, color: Color);
    fn draw_rectangle_rounded(&mut self, rec: Rectangle, roundness: f32, segments: i32, color: Color);
    fn draw_rectangle_rounded_lines(
        &mut self,
        rec: Rectangle,
        roundness: f32,
        segments: i32,
        line_thick: i32,
        color: Color,
    );
    fn draw_triangle(&mut self, v1: Vector2, v2: Vector2, v3: Vector2, color: Color);
    fn draw_triangle_lines(&mut self, v1: Vector2, v2: Vector2, v3: Vector2, color: Color);
    fn draw_triangle_fan(&mut self, points: &[Vector2], color: Color);
    fn draw_poly(&mut self, center: Vector2, sides: i32, radius: f32, rotation: f32, color: Color);
    fn set_shapes_texture(&mut self, texture: Texture2D, source: Rectangle);

    // ---- Collision ----
    fn check_collision_recs(&mut self, rec1: Rectangle, rec2: Rectangle) -> bool;
    fn check_collision_circles(&mut self, center1: Vector2, radius1: f32, center2: Vector2, radius2: f32) -> bool;
    fn check_collision_circle_rec(&mut self, center: Vector2, radius: f32, rec: Rectangle) -> bool;
    fn get_collision_rec(&mut self, rec1: Rectangle, rec2: Rectangle) -> Rectangle;
    fn check_collision_point_rec(&mut self, point: Vector2, rec: Rectangle) -> bool;
    fn check_collision_point_circle(&mut self, point: Vector2, center: Vector2, radius: f32) -> bool;
    fn check_collision_point_triangle(&mut self, point: Vector2, p1: Vector2, p2: Vector2, p3: Vector2) -> bool;

    // ---- Textures ----
    fn load_image(&mut self, file_name: &str) -> Image;
    fn load_image_ex(&mut self, pixels: &[Color], width: i32, height: i32) -> Image;
    fn load_image_raw(&mut self, file_name: &str, width: i32, height: i32, format: i32, header_size: i32) -> Image;
    fn export_image(&mut self, image: Image, file_name: &str);
    fn export_image_as_code(&mut self, image: Image, file_name: &str);
    fn load_texture(&mut self, file_name: &str) -> Texture2D;
    fn load_texture_from_image(&mut self, image: Image) -> Texture2D;
    fn load_texture_cubemap(&mut self, image: Image, layout_type: i32) -> TextureCubemap;
    fn load_render_texture(&mut self, width: i32, height: i32) -> RenderTexture2D;
    fn unload_image(&mut self, image: Image);
    fn unload_texture(&mut self, texture: Texture2D);
    fn unload_render_texture(&mut self, target: RenderTexture2D);
    fn get_image_data(&mut self, image: Image) -> Vec<Color>;
    fn get_image_data_normalized(&mut self, image: Image) -> Vec<Vector4>;
    fn get_pixel_data_size(&mut self, width: i32, height: i32, format: i32) -> i32;
    fn get_texture_data(&mut self, texture: Texture2D) -> Image;
    fn get_screen_data(&mut self) -> Image;
    fn update_texture(&mut self, texture: Texture2D, pixels: &[u8]);

    // ---- Text ----
    fn get_font_default(&mut self) -> Font;
    fn load_font(&mut self, file_name: &str) -> Font;
    fn load_font_ex(&mut self, file_name: &str, font_size: i32, font_chars: &[i32]) -> Font;
    fn load_font_from_image(&mut self, image: Image, key: Color, first_char: i32) -> Font;
    fn load_font_data(&mut self, file_name: &str, font_size: i32, font_chars: &[i32], font_type: i32) -> Vec<CharInfo>;
    fn gen_image_font_atlas(&mut self, chars: &[CharInfo], font_size: i32, padding: i32, pack_method: i32) -> Image;
    fn unload_font(&mut self, font: Font);
    fn draw_fps(&mut self, pos_x: i32, pos_y: i32);
    fn draw_text(&mut self, text: &str, pos_x: i32, pos_y: i32, font_size: i32, color: Color);
    fn draw_text_ex(&mut self, font: Font, text: &str, position: Vector2, font_size: f32, spacing: f32, tint: Color);
    #[allow(clippy::too_many_arguments)]
    fn draw_text_rec(
        &mut self,
        font: Font,
        text: &str,
        rec: Rectangle,
        font_size: f32,
        spacing: f32,
        word_wrap: bool,
        tint: Color,
    );
    #[allow(clippy::too_many_arguments)]
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
    );
    fn measure_text(&mut self, text: &str, font_size: i32) -> i32;
    fn measure_text_ex(&mut self, font: Font, text: &str, font_size: f32, spacing: f32) -> Vector2;
    fn get_glyph_index(&mut self, font: Font, character: i32) -> i32;

    // ---- Basic 3D shapes ----
    fn draw_line_3d(&mut self, start: Vector3, end: Vector3, color: Color);
    fn draw_point_3d(&mut self, position: Vector3, color: Color);
    fn draw_circle_3d(&mut self, center: Vector3, radius: f32, rotation_axis: Vector3, rotation_angle: f32, color: Color);
    fn draw_cube(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color);
    fn draw_cube_v(&mut self, position: Vector3, size: Vector3, color: Color);
    fn draw_cube_wires(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color);
    fn draw_cube_wires_v(&mut self, position: Vector3, size: Vector3, color: Color);
    fn draw_cube_texture(
        &mut self,
        texture: Texture2D,
        position: Vector3,
        width: f32,
        height: f32,
        length: f32,
        color: Color,
    );
    fn draw_sphere(&mut self, center: Vector3, radius: f32, color: Color);
    fn draw_sphere_ex(&mut self, center: Vector3, radius: f32, rings: i32, slices: i32, color: Color);
    fn draw_sphere_wires(&mut self, center: Vector3, radius: f32, rings: i32, slices: i32, color: Color);
    fn draw_cylinder(
        &mut self,
        position: Vector3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Color,
    );
    fn draw_cylinder_wires(
        &mut self,
        position: Vector3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Color,
    );
    fn draw_plane(&mut self, center: Vector3, size: Vector2, color: Color);
    fn draw_ray(&mut self, ray: Ray, color: Color);
    fn draw_grid(&mut self, slices: i32, spacing: f32);
    fn draw_gizmo(&mut self, position: Vector3);
}
