//! headless raylib 后端
//!
//! 不打开窗口也不访问 GPU：窗口、输入、计时与资源都在进程内模拟，
//! 绘制调用只记录到调用日志。测试通过调用日志和模拟输入钩子验证桥接层，
//! 脚本也可以在没有显示器的环境中运行（配合 `max_frames`）。
//!
//! 资源行为与 raylib 一致：加载失败时写警告日志并返回空值（id 为 0 的纹理、
//! 空数据指针的图像），而不是报错。

pub mod assets;
pub mod camera;
pub mod files;
pub mod font;
pub mod input;

pub use assets::{AssetError, AssetResult, AssetStore};
pub use camera::CameraSystem;
pub use font::FontStore;
pub use input::{Gamepad, InputState};

use super::consts::*;
use super::math;
use super::types::*;
use super::Raylib;
use crate::config::{BridgeConfig, HostConfig, WindowConfig};
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::time::{Duration, Instant};

/// 一次原生调用
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    /// raylib C 函数名
    pub name: &'static str,
    /// 参数的调试表示
    pub args: String,
}

/// 原生调用记录：保留最近 `limit` 条，计数不受限制
#[derive(Debug, Default)]
pub struct CallLog {
    limit: usize,
    entries: VecDeque<NativeCall>,
    counts: HashMap<&'static str, usize>,
    total: usize,
}

impl CallLog {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    fn record(&mut self, name: &'static str, args: impl FnOnce() -> String) {
        self.total += 1;
        *self.counts.entry(name).or_default() += 1;
        tracing::trace!(target: "raylib", name, "native call");
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(NativeCall { name, args: args() });
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn entries(&self) -> impl Iterator<Item = &NativeCall> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&NativeCall> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.counts.clear();
        self.total = 0;
    }
}

macro_rules! record {
    ($self:ident, $name:literal) => {
        $self.calls.record($name, String::new)
    };
    ($self:ident, $name:literal, $($arg:expr),+) => {
        $self.calls.record($name, || {
            let parts: Vec<String> = vec![$(format!("{:?}", $arg)),+];
            parts.join(", ")
        })
    };
}

/// 帧计时
#[derive(Debug)]
struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    frame_time: f32,
    target_fps: i32,
    pace: bool,
}

impl FrameTimer {
    fn new(pace: bool) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            frame_time: 0.0,
            target_fps: 0,
            pace,
        }
    }

    fn end_frame(&mut self) {
        let mut elapsed = self.last_frame.elapsed();
        if self.pace && self.target_fps > 0 {
            let target = Duration::from_secs_f64(1.0 / self.target_fps as f64);
            if elapsed < target {
                std::thread::sleep(target - elapsed);
                elapsed = self.last_frame.elapsed();
            }
        }
        self.frame_time = elapsed.as_secs_f32();
        self.last_frame = Instant::now();
    }
}

/// 当前绘制状态
#[derive(Debug, Default, Clone, Copy)]
struct DrawState {
    drawing: bool,
    clear_color: Color,
    mode_2d: Option<Camera2D>,
    mode_3d: Option<Camera3D>,
    render_target: Option<u32>,
    shapes_texture: Option<(Texture2D, Rectangle)>,
}

/// 进程内 raylib 实现
pub struct HeadlessRaylib {
    window_config: WindowConfig,
    host: HostConfig,
    calls: CallLog,

    ready: bool,
    title: String,
    width: i32,
    height: i32,
    position: (i32, i32),
    min_size: (i32, i32),
    monitor: i32,
    fullscreen: bool,
    hidden: bool,
    resized: bool,
    close_requested: bool,
    exit_requested: bool,
    clipboard: String,
    config_flags: u32,

    log_level: i32,
    log_exit_level: i32,

    timer: FrameTimer,
    frames: u64,
    draw: DrawState,

    input: InputState,
    camera: CameraSystem,
    assets: AssetStore,
    fonts: FontStore,
}

impl Default for HeadlessRaylib {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRaylib {
    pub fn new() -> Self {
        Self::from_config(&BridgeConfig::default())
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            window_config: config.window.clone(),
            host: config.host.clone(),
            calls: CallLog::new(config.host.call_log_limit),
            ready: false,
            title: String::new(),
            width: 0,
            height: 0,
            position: (0, 0),
            min_size: (0, 0),
            monitor: 0,
            fullscreen: false,
            hidden: false,
            resized: false,
            close_requested: false,
            exit_requested: false,
            clipboard: String::new(),
            config_flags: 0,
            log_level: LOG_INFO,
            log_exit_level: LOG_ERROR,
            timer: FrameTimer::new(config.host.pace_frames),
            frames: 0,
            draw: DrawState::default(),
            input: InputState::default(),
            camera: CameraSystem::new(),
            assets: AssetStore::new(),
            fonts: FontStore::new(),
        }
    }

    /// raylib TraceLog：低于当前级别的消息被丢弃，达到退出级别时请求关闭
    fn trace(&mut self, level: i32, message: &str) {
        if level < self.log_level {
            return;
        }
        match level {
            LOG_TRACE => tracing::trace!(target: "raylib", "{}", message),
            LOG_DEBUG => tracing::debug!(target: "raylib", "{}", message),
            LOG_INFO => tracing::info!(target: "raylib", "{}", message),
            LOG_WARNING => tracing::warn!(target: "raylib", "{}", message),
            LOG_ERROR | LOG_FATAL => tracing::error!(target: "raylib", "{}", message),
            _ => {}
        }
        if level >= self.log_exit_level && level < LOG_NONE {
            self.exit_requested = true;
        }
    }

    fn monitor_config(&self, monitor: i32) -> Option<&crate::config::MonitorConfig> {
        usize::try_from(monitor)
            .ok()
            .and_then(|m| self.window_config.monitors.get(m))
    }

    fn load_image_or_warn(&mut self, file_name: &str) -> Option<Image> {
        match self.assets.load_image(Path::new(file_name)) {
            Ok(image) => {
                let message = format!(
                    "IMAGE: [{}] Data loaded successfully ({}x{})",
                    file_name, image.width, image.height
                );
                self.trace(LOG_INFO, &message);
                Some(image)
            }
            Err(e) => {
                self.trace(LOG_WARNING, &format!("IMAGE: [{}] Failed to load data: {}", file_name, e));
                None
            }
        }
    }

    fn load_font_file(&mut self, file_name: &str, font_chars: &[i32]) -> AssetResult<Font> {
        if files::is_file_extension(file_name, ".json;.fnt") {
            let mut metrics = font::FontMetrics::load(Path::new(file_name))?;
            metrics.retain_chars(font_chars);
            let atlas = metrics.atlas();
            return Ok(self.fonts.build(&mut self.assets, metrics.base_size, atlas, &metrics.glyphs));
        }
        if files::is_file_extension(file_name, ".png;.bmp;.tga;.gif;.jpg;.jpeg") {
            let mut pixels = image::open(file_name)?.to_rgba8();
            return self.font_from_pixels(&mut pixels, MAGENTA, 32);
        }
        Err(AssetError::Format(format!(
            "[{}] outline fonts need a rasterizer, which this backend does not provide",
            file_name
        )))
    }

    fn font_from_pixels(&mut self, pixels: &mut image::RgbaImage, key: Color, first_char: i32) -> AssetResult<Font> {
        let glyphs = font::scan_glyph_grid(pixels, key, first_char);
        let base_size = glyphs
            .first()
            .map(|g| g.rec.height as i32)
            .ok_or_else(|| AssetError::Format("no glyphs found in font image".to_string()))?;
        font::clear_key_color(pixels, key);
        Ok(self.fonts.build(&mut self.assets, base_size, pixels.clone(), &glyphs))
    }

    fn font_or_default(&mut self, file_name: &str, result: AssetResult<Font>) -> Font {
        match result {
            Ok(font) => {
                let message = format!("FONT: [{}] Font loaded successfully ({} glyphs)", file_name, font.chars_count);
                self.trace(LOG_INFO, &message);
                font
            }
            Err(e) => {
                self.trace(LOG_WARNING, &format!("FONT: [{}] Failed to load font: {}", file_name, e));
                self.trace(LOG_WARNING, "FONT: Using default font");
                self.fonts.default_font(&mut self.assets)
            }
        }
    }

    // ---- 测试钩子 ----

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    /// 按 raylib C 函数名统计调用次数
    pub fn calls_to(&self, name: &str) -> usize {
        self.calls.count(name)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.total()
    }

    pub fn last_call(&self) -> Option<&NativeCall> {
        self.calls.last()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn press_key(&mut self, key: i32) {
        if self.input.set_key(key, true) {
            self.close_requested = true;
        }
    }

    pub fn release_key(&mut self, key: i32) {
        self.input.set_key(key, false);
    }

    pub fn set_mouse_button(&mut self, button: i32, down: bool) {
        self.input.set_mouse_button(button, down);
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) {
        self.input.mouse_position = Vector2::new(x, y);
    }

    pub fn scroll(&mut self, amount: i32) {
        self.input.wheel_move += amount;
    }

    pub fn connect_gamepad(&mut self, gamepad: i32, name: &str, axis_count: usize) {
        self.input.connect_gamepad(gamepad, Gamepad::new(name, axis_count));
    }

    pub fn disconnect_gamepad(&mut self, gamepad: i32) {
        self.input.disconnect_gamepad(gamepad);
    }

    pub fn set_gamepad_button(&mut self, gamepad: i32, button: i32, down: bool) {
        self.input.set_gamepad_button(gamepad, button, down);
    }

    pub fn set_gamepad_axis(&mut self, gamepad: i32, axis: usize, value: f32) {
        if let Some(slot) = self.input.gamepad_mut(gamepad).and_then(|pad| pad.axes.get_mut(axis)) {
            *slot = value;
        }
    }

    pub fn touch(&mut self, points: &[Vector2]) {
        self.input.set_touches(points);
    }

    /// 模拟识别出的手势，未启用的手势被忽略
    pub fn set_gesture(&mut self, gesture: i32) {
        if gesture == GESTURE_NONE || self.input.gestures.enabled as i32 & gesture != 0 {
            self.input.gestures.current = gesture;
        }
    }

    pub fn set_gesture_drag(&mut self, vector: Vector2, angle: f32) {
        self.input.gestures.drag_vector = vector;
        self.input.gestures.drag_angle = angle;
    }

    pub fn drop_files<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input.dropped_files.extend(paths.into_iter().map(Into::into));
    }

    /// 模拟用户点击关闭按钮
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn image_count(&self) -> usize {
        self.assets.image_count()
    }

    pub fn texture_count(&self) -> usize {
        self.assets.texture_count()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn clear_color(&self) -> Color {
        self.draw.clear_color
    }

    pub fn window_title(&self) -> &str {
        &self.title
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.drawing
    }

    pub fn mode_2d(&self) -> Option<Camera2D> {
        self.draw.mode_2d
    }

    pub fn mode_3d(&self) -> Option<Camera3D> {
        self.draw.mode_3d
    }

    /// 当前 BeginTextureMode 的帧缓冲 id
    pub fn render_target(&self) -> Option<u32> {
        self.draw.render_target
    }

    pub fn shapes_texture(&self) -> Option<(Texture2D, Rectangle)> {
        self.draw.shapes_texture
    }

    pub fn window_position(&self) -> (i32, i32) {
        self.position
    }

    pub fn current_monitor(&self) -> i32 {
        self.monitor
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn config_flags(&self) -> u32 {
        self.config_flags
    }

    pub fn is_cursor_disabled(&self) -> bool {
        self.input.cursor_disabled
    }

    pub fn camera_system(&self) -> &CameraSystem {
        &self.camera
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }
}

impl Raylib for HeadlessRaylib {
    // ---- Window ----

    fn init_window(&mut self, width: i32, height: i32, title: &str) {
        record!(self, "InitWindow", width, height, title);
        self.width = if width > 0 { width } else { self.window_config.default_width };
        self.height = if height > 0 { height } else { self.window_config.default_height };
        self.title = if title.is_empty() {
            self.window_config.default_title.clone()
        } else {
            title.to_string()
        };
        self.ready = true;
        self.close_requested = false;
        self.timer = FrameTimer::new(self.host.pace_frames);

        let message = format!("DISPLAY: Device initialized successfully ({}x{})", self.width, self.height);
        self.trace(LOG_INFO, &message);
        self.fonts.default_font(&mut self.assets);
    }

    fn window_should_close(&mut self) -> bool {
        record!(self, "WindowShouldClose");
        if !self.ready {
            return true;
        }
        let close = std::mem::take(&mut self.close_requested);
        let out_of_frames = self.host.max_frames > 0 && self.frames >= self.host.max_frames;
        close || out_of_frames || self.exit_requested
    }

    fn close_window(&mut self) {
        record!(self, "CloseWindow");
        if self.ready {
            self.ready = false;
            self.trace(LOG_INFO, "Window closed successfully");
        }
    }

    fn is_window_ready(&mut self) -> bool {
        record!(self, "IsWindowReady");
        self.ready
    }

    fn is_window_minimized(&mut self) -> bool {
        record!(self, "IsWindowMinimized");
        false
    }

    fn is_window_resized(&mut self) -> bool {
        record!(self, "IsWindowResized");
        self.resized
    }

    fn is_window_hidden(&mut self) -> bool {
        record!(self, "IsWindowHidden");
        self.hidden
    }

    fn toggle_fullscreen(&mut self) {
        record!(self, "ToggleFullscreen");
        self.fullscreen = !self.fullscreen;
    }

    fn unhide_window(&mut self) {
        record!(self, "UnhideWindow");
        self.hidden = false;
    }

    fn hide_window(&mut self) {
        record!(self, "HideWindow");
        self.hidden = true;
    }

    fn set_window_icon(&mut self, image: Image) {
        record!(self, "SetWindowIcon", image);
    }

    fn set_window_title(&mut self, title: &str) {
        record!(self, "SetWindowTitle", title);
        self.title = title.to_string();
    }

    fn set_window_position(&mut self, x: i32, y: i32) {
        record!(self, "SetWindowPosition", x, y);
        self.position = (x, y);
    }

    fn set_window_monitor(&mut self, monitor: i32) {
        record!(self, "SetWindowMonitor", monitor);
        if self.monitor_config(monitor).is_some() {
            self.monitor = monitor;
        } else {
            self.trace(LOG_WARNING, "Selected monitor not found");
        }
    }

    fn set_window_min_size(&mut self, width: i32, height: i32) {
        record!(self, "SetWindowMinSize", width, height);
        self.min_size = (width, height);
    }

    fn set_window_size(&mut self, width: i32, height: i32) {
        record!(self, "SetWindowSize", width, height);
        self.width = width.max(self.min_size.0);
        self.height = height.max(self.min_size.1);
        self.resized = true;
    }

    fn get_screen_width(&mut self) -> i32 {
        record!(self, "GetScreenWidth");
        self.width
    }

    fn get_screen_height(&mut self) -> i32 {
        record!(self, "GetScreenHeight");
        self.height
    }

    fn get_monitor_count(&mut self) -> i32 {
        record!(self, "GetMonitorCount");
        self.window_config.monitors.len() as i32
    }

    fn get_monitor_width(&mut self, monitor: i32) -> i32 {
        record!(self, "GetMonitorWidth", monitor);
        self.monitor_config(monitor).map_or(0, |m| m.width)
    }

    fn get_monitor_height(&mut self, monitor: i32) -> i32 {
        record!(self, "GetMonitorHeight", monitor);
        self.monitor_config(monitor).map_or(0, |m| m.height)
    }

    fn get_monitor_physical_width(&mut self, monitor: i32) -> i32 {
        record!(self, "GetMonitorPhysicalWidth", monitor);
        self.monitor_config(monitor).map_or(0, |m| m.physical_width)
    }

    fn get_monitor_physical_height(&mut self, monitor: i32) -> i32 {
        record!(self, "GetMonitorPhysicalHeight", monitor);
        self.monitor_config(monitor).map_or(0, |m| m.physical_height)
    }

    fn get_monitor_name(&mut self, monitor: i32) -> String {
        record!(self, "GetMonitorName", monitor);
        self.monitor_config(monitor).map(|m| m.name.clone()).unwrap_or_default()
    }

    fn get_clipboard_text(&mut self) -> String {
        record!(self, "GetClipboardText");
        self.clipboard.clone()
    }

    fn set_clipboard_text(&mut self, text: &str) {
        record!(self, "SetClipboardText", text);
        self.clipboard = text.to_string();
    }

    // ---- Cursor ----

    fn show_cursor(&mut self) {
        record!(self, "ShowCursor");
        self.input.cursor_hidden = false;
    }

    fn hide_cursor(&mut self) {
        record!(self, "HideCursor");
        self.input.cursor_hidden = true;
    }

    fn is_cursor_hidden(&mut self) -> bool {
        record!(self, "IsCursorHidden");
        self.input.cursor_hidden
    }

    fn enable_cursor(&mut self) {
        record!(self, "EnableCursor");
        self.input.cursor_disabled = false;
        self.input.cursor_hidden = false;
    }

    fn disable_cursor(&mut self) {
        record!(self, "DisableCursor");
        self.input.cursor_disabled = true;
        self.input.cursor_hidden = true;
    }

    // ---- Drawing ----

    fn clear_background(&mut self, color: Color) {
        record!(self, "ClearBackground", color);
        self.draw.clear_color = color;
    }

    fn begin_drawing(&mut self) {
        record!(self, "BeginDrawing");
        self.draw.drawing = true;
    }

    fn end_drawing(&mut self) {
        record!(self, "EndDrawing");
        self.draw.drawing = false;
        self.frames += 1;
        self.resized = false;
        self.input.advance();
        self.timer.end_frame();
    }

    fn begin_mode_2d(&mut self, camera: Camera2D) {
        record!(self, "BeginMode2D", camera);
        self.draw.mode_2d = Some(camera);
    }

    fn end_mode_2d(&mut self) {
        record!(self, "EndMode2D");
        self.draw.mode_2d = None;
    }

    fn begin_mode_3d(&mut self, camera: Camera3D) {
        record!(self, "BeginMode3D", camera);
        self.draw.mode_3d = Some(camera);
    }

    fn end_mode_3d(&mut self) {
        record!(self, "EndMode3D");
        self.draw.mode_3d = None;
    }

    fn begin_texture_mode(&mut self, target: RenderTexture2D) {
        record!(self, "BeginTextureMode", target.id);
        self.draw.render_target = Some(target.id);
    }

    fn end_texture_mode(&mut self) {
        record!(self, "EndTextureMode");
        self.draw.render_target = None;
    }

    // ---- Screen space ----

    fn get_mouse_ray(&mut self, mouse_position: Vector2, camera: Camera3D) -> Ray {
        record!(self, "GetMouseRay", mouse_position, camera);
        math::get_mouse_ray(mouse_position, &camera, self.width, self.height)
    }

    fn get_world_to_screen(&mut self, position: Vector3, camera: Camera3D) -> Vector2 {
        record!(self, "GetWorldToScreen", position, camera);
        math::get_world_to_screen(position, &camera, self.width, self.height)
    }

    fn get_camera_matrix(&mut self, camera: Camera3D) -> Matrix {
        record!(self, "GetCameraMatrix", camera);
        math::camera_view(&camera)
    }

    // ---- Timing ----

    fn set_target_fps(&mut self, fps: i32) {
        record!(self, "SetTargetFPS", fps);
        self.timer.target_fps = fps.max(0);
        if fps > 0 {
            let message = format!("TIMER: Target time per frame: {:.3} milliseconds", 1000.0 / fps as f32);
            self.trace(LOG_INFO, &message);
        }
    }

    fn get_fps(&mut self) -> i32 {
        record!(self, "GetFPS");
        if self.timer.frame_time <= 0.0 {
            0
        } else {
            (1.0 / self.timer.frame_time).round() as i32
        }
    }

    fn get_frame_time(&mut self) -> f32 {
        record!(self, "GetFrameTime");
        self.timer.frame_time
    }

    fn get_time(&mut self) -> f64 {
        record!(self, "GetTime");
        self.timer.start.elapsed().as_secs_f64()
    }

    // ---- Color ----

    fn color_to_int(&mut self, color: Color) -> i32 {
        record!(self, "ColorToInt", color);
        math::color_to_int(color)
    }

    fn color_normalize(&mut self, color: Color) -> Vector4 {
        record!(self, "ColorNormalize", color);
        math::color_normalize(color)
    }

    fn color_to_hsv(&mut self, color: Color) -> Vector3 {
        record!(self, "ColorToHSV", color);
        math::color_to_hsv(color)
    }

    fn color_from_hsv(&mut self, hsv: Vector3) -> Color {
        record!(self, "ColorFromHSV", hsv);
        math::color_from_hsv(hsv)
    }

    fn get_color(&mut self, hex_value: i32) -> Color {
        record!(self, "GetColor", hex_value);
        math::get_color(hex_value)
    }

    fn fade(&mut self, color: Color, alpha: f32) -> Color {
        record!(self, "Fade", color, alpha);
        math::fade(color, alpha)
    }

    // ---- Misc ----

    fn set_config_flags(&mut self, flags: u32) {
        record!(self, "SetConfigFlags", flags);
        self.config_flags = flags;
        if flags & FLAG_WINDOW_HIDDEN as u32 != 0 {
            self.hidden = true;
        }
        if flags & FLAG_FULLSCREEN_MODE as u32 != 0 {
            self.fullscreen = true;
        }
    }

    fn set_trace_log_level(&mut self, level: i32) {
        record!(self, "SetTraceLogLevel", level);
        self.log_level = level;
    }

    fn set_trace_log_exit(&mut self, level: i32) {
        record!(self, "SetTraceLogExit", level);
        self.log_exit_level = level;
    }

    fn take_screenshot(&mut self, file_name: &str) {
        record!(self, "TakeScreenshot", file_name);
        let result = self
            .assets
            .solid_image(self.width, self.height, self.draw.clear_color)
            .and_then(|image| {
                let exported = self.assets.export_image(&image, Path::new(file_name));
                self.assets.remove_image(&image);
                exported
            });
        match result {
            Ok(()) => self.trace(LOG_INFO, &format!("SYSTEM: [{}] Screenshot taken successfully", file_name)),
            Err(e) => self.trace(LOG_WARNING, &format!("SYSTEM: [{}] Failed to take screenshot: {}", file_name, e)),
        }
    }

    fn get_random_value(&mut self, min: i32, max: i32) -> i32 {
        record!(self, "GetRandomValue", min, max);
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        rand::thread_rng().gen_range(lo..=hi)
    }

    fn open_url(&mut self, url: &str) {
        record!(self, "OpenURL", url);
        if url.contains('\'') {
            self.trace(LOG_WARNING, "SYSTEM: Provided URL is not valid");
            return;
        }
        if !self.host.allow_open_url {
            self.trace(LOG_INFO, &format!("SYSTEM: Opening URLs is disabled, ignoring [{}]", url));
            return;
        }
        if let Err(e) = webbrowser::open(url) {
            self.trace(LOG_WARNING, &format!("SYSTEM: Failed to open [{}]: {}", url, e));
        }
    }

    // ---- Files ----

    fn file_exists(&mut self, file_name: &str) -> bool {
        record!(self, "FileExists", file_name);
        Path::new(file_name).exists()
    }

    fn is_file_extension(&mut self, file_name: &str, ext: &str) -> bool {
        record!(self, "IsFileExtension", file_name, ext);
        files::is_file_extension(file_name, ext)
    }

    fn get_extension(&mut self, file_name: &str) -> String {
        record!(self, "GetExtension", file_name);
        files::get_extension(file_name).to_string()
    }

    fn get_file_name(&mut self, file_path: &str) -> String {
        record!(self, "GetFileName", file_path);
        files::get_file_name(file_path).to_string()
    }

    fn get_file_name_without_ext(&mut self, file_path: &str) -> String {
        record!(self, "GetFileNameWithoutExt", file_path);
        files::get_file_name_without_ext(file_path).to_string()
    }

    fn get_directory_path(&mut self, file_name: &str) -> String {
        record!(self, "GetDirectoryPath", file_name);
        files::get_directory_path(file_name).to_string()
    }

    fn get_working_directory(&mut self) -> String {
        record!(self, "GetWorkingDirectory");
        std::env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn get_directory_files(&mut self, dir_path: &str) -> Vec<String> {
        record!(self, "GetDirectoryFiles", dir_path);
        match files::directory_files(dir_path) {
            Ok(list) => list,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("FILEIO: [{}] Failed to read directory: {}", dir_path, e));
                Vec::new()
            }
        }
    }

    fn change_directory(&mut self, dir: &str) -> bool {
        record!(self, "ChangeDirectory", dir);
        match std::env::set_current_dir(dir) {
            Ok(()) => true,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("SYSTEM: [{}] Failed to change directory: {}", dir, e));
                false
            }
        }
    }

    fn is_file_dropped(&mut self) -> bool {
        record!(self, "IsFileDropped");
        !self.input.dropped_files.is_empty()
    }

    fn get_dropped_files(&mut self) -> Vec<String> {
        record!(self, "GetDroppedFiles");
        std::mem::take(&mut self.input.dropped_files)
    }

    fn get_file_mod_time(&mut self, file_name: &str) -> i64 {
        record!(self, "GetFileModTime", file_name);
        files::file_mod_time(file_name)
    }

    // ---- Persistent storage ----

    fn storage_save_value(&mut self, position: i32, value: i32) {
        record!(self, "StorageSaveValue", position, value);
        if let Err(e) = files::storage_save(&self.host.storage_file, position, value) {
            self.trace(LOG_WARNING, &format!("FILEIO: Failed to save storage position {}: {}", position, e));
        }
    }

    fn storage_load_value(&mut self, position: i32) -> i32 {
        record!(self, "StorageLoadValue", position);
        match files::storage_load(&self.host.storage_file, position) {
            Ok(Some(value)) => value,
            Ok(None) => {
                self.trace(LOG_WARNING, &format!("FILEIO: Failed to find storage position {}", position));
                0
            }
            Err(e) => {
                self.trace(LOG_WARNING, &format!("FILEIO: Failed to load storage position {}: {}", position, e));
                0
            }
        }
    }

    // ---- Keyboard ----

    fn is_key_pressed(&mut self, key: i32) -> bool {
        record!(self, "IsKeyPressed", key);
        self.input.key_pressed(key)
    }

    fn is_key_down(&mut self, key: i32) -> bool {
        record!(self, "IsKeyDown", key);
        self.input.key_down(key)
    }

    fn is_key_released(&mut self, key: i32) -> bool {
        record!(self, "IsKeyReleased", key);
        self.input.key_released(key)
    }

    fn is_key_up(&mut self, key: i32) -> bool {
        record!(self, "IsKeyUp", key);
        !self.input.key_down(key)
    }

    fn get_key_pressed(&mut self) -> i32 {
        record!(self, "GetKeyPressed");
        self.input.pop_key_pressed()
    }

    fn set_exit_key(&mut self, key: i32) {
        record!(self, "SetExitKey", key);
        self.input.exit_key = key;
    }

    // ---- Gamepad ----

    fn is_gamepad_available(&mut self, gamepad: i32) -> bool {
        record!(self, "IsGamepadAvailable", gamepad);
        self.input.gamepad(gamepad).is_some()
    }

    fn is_gamepad_name(&mut self, gamepad: i32, name: &str) -> bool {
        record!(self, "IsGamepadName", gamepad, name);
        self.input.gamepad(gamepad).is_some_and(|pad| pad.name == name)
    }

    fn get_gamepad_name(&mut self, gamepad: i32) -> String {
        record!(self, "GetGamepadName", gamepad);
        self.input.gamepad(gamepad).map(|pad| pad.name.clone()).unwrap_or_default()
    }

    fn is_gamepad_button_pressed(&mut self, gamepad: i32, button: i32) -> bool {
        record!(self, "IsGamepadButtonPressed", gamepad, button);
        self.input.gamepad_pressed(gamepad, button)
    }

    fn is_gamepad_button_down(&mut self, gamepad: i32, button: i32) -> bool {
        record!(self, "IsGamepadButtonDown", gamepad, button);
        self.input.gamepad_down(gamepad, button)
    }

    fn is_gamepad_button_released(&mut self, gamepad: i32, button: i32) -> bool {
        record!(self, "IsGamepadButtonReleased", gamepad, button);
        self.input.gamepad_released(gamepad, button)
    }

    fn is_gamepad_button_up(&mut self, gamepad: i32, button: i32) -> bool {
        record!(self, "IsGamepadButtonUp", gamepad, button);
        self.input.gamepad_up(gamepad, button)
    }

    fn get_gamepad_button_pressed(&mut self) -> i32 {
        record!(self, "GetGamepadButtonPressed");
        self.input.last_gamepad_button
    }

    fn get_gamepad_axis_count(&mut self, gamepad: i32) -> i32 {
        record!(self, "GetGamepadAxisCount", gamepad);
        self.input.gamepad(gamepad).map_or(0, |pad| pad.axes.len() as i32)
    }

    fn get_gamepad_axis_movement(&mut self, gamepad: i32, axis: i32) -> f32 {
        record!(self, "GetGamepadAxisMovement", gamepad, axis);
        self.input.gamepad_axis(gamepad, axis)
    }

    // ---- Mouse ----

    fn is_mouse_button_pressed(&mut self, button: i32) -> bool {
        record!(self, "IsMouseButtonPressed", button);
        self.input.mouse_pressed(button)
    }

    fn is_mouse_button_down(&mut self, button: i32) -> bool {
        record!(self, "IsMouseButtonDown", button);
        self.input.mouse_down(button)
    }

    fn is_mouse_button_released(&mut self, button: i32) -> bool {
        record!(self, "IsMouseButtonReleased", button);
        self.input.mouse_released(button)
    }

    fn is_mouse_button_up(&mut self, button: i32) -> bool {
        record!(self, "IsMouseButtonUp", button);
        !self.input.mouse_down(button)
    }

    fn get_mouse_x(&mut self) -> i32 {
        record!(self, "GetMouseX");
        self.input.scaled_mouse_position().x as i32
    }

    fn get_mouse_y(&mut self) -> i32 {
        record!(self, "GetMouseY");
        self.input.scaled_mouse_position().y as i32
    }

    fn get_mouse_position(&mut self) -> Vector2 {
        record!(self, "GetMousePosition");
        self.input.scaled_mouse_position()
    }

    fn set_mouse_position(&mut self, x: i32, y: i32) {
        record!(self, "SetMousePosition", x, y);
        self.input.mouse_position = Vector2::new(x as f32, y as f32);
    }

    fn set_mouse_offset(&mut self, offset_x: i32, offset_y: i32) {
        record!(self, "SetMouseOffset", offset_x, offset_y);
        self.input.mouse_offset = Vector2::new(offset_x as f32, offset_y as f32);
    }

    fn set_mouse_scale(&mut self, scale_x: f32, scale_y: f32) {
        record!(self, "SetMouseScale", scale_x, scale_y);
        self.input.mouse_scale = Vector2::new(scale_x, scale_y);
    }

    fn get_mouse_wheel_move(&mut self) -> i32 {
        record!(self, "GetMouseWheelMove");
        self.input.wheel_move
    }

    // ---- Touch ----

    fn get_touch_x(&mut self) -> i32 {
        record!(self, "GetTouchX");
        self.input.touch_position(0).x as i32
    }

    fn get_touch_y(&mut self) -> i32 {
        record!(self, "GetTouchY");
        self.input.touch_position(0).y as i32
    }

    fn get_touch_position(&mut self, index: i32) -> Vector2 {
        record!(self, "GetTouchPosition", index);
        self.input.touch_position(index)
    }

    // ---- Gestures ----

    fn set_gestures_enabled(&mut self, gesture_flags: u32) {
        record!(self, "SetGesturesEnabled", gesture_flags);
        self.input.gestures.enabled = gesture_flags;
    }

    fn is_gesture_detected(&mut self, gesture: i32) -> bool {
        record!(self, "IsGestureDetected", gesture);
        self.input.is_gesture_detected(gesture)
    }

    fn get_gesture_detected(&mut self) -> i32 {
        record!(self, "GetGestureDetected");
        self.input.gesture_detected()
    }

    fn get_touch_points_count(&mut self) -> i32 {
        record!(self, "GetTouchPointsCount");
        self.input.touches.len() as i32
    }

    fn get_gesture_hold_duration(&mut self) -> f32 {
        record!(self, "GetGestureHoldDuration");
        self.input.gestures.hold_duration
    }

    fn get_gesture_drag_vector(&mut self) -> Vector2 {
        record!(self, "GetGestureDragVector");
        self.input.gestures.drag_vector
    }

    fn get_gesture_drag_angle(&mut self) -> f32 {
        record!(self, "GetGestureDragAngle");
        self.input.gestures.drag_angle
    }

    fn get_gesture_pinch_vector(&mut self) -> Vector2 {
        record!(self, "GetGesturePinchVector");
        self.input.gestures.pinch_vector
    }

    fn get_gesture_pinch_angle(&mut self) -> f32 {
        record!(self, "GetGesturePinchAngle");
        self.input.gestures.pinch_angle
    }

    // ---- Camera system ----

    fn set_camera_mode(&mut self, camera: Camera3D, mode: i32) {
        record!(self, "SetCameraMode", camera, mode);
        if self.camera.set_mode(&camera, mode, &self.input) {
            self.input.cursor_disabled = true;
            self.input.cursor_hidden = true;
        } else {
            self.input.cursor_disabled = false;
            self.input.cursor_hidden = false;
        }
    }

    fn update_camera(&mut self, camera: &mut Camera3D) {
        record!(self, "UpdateCamera", *camera);
        self.camera.update(camera, &self.input);
    }

    fn set_camera_pan_control(&mut self, pan_key: i32) {
        record!(self, "SetCameraPanControl", pan_key);
        self.camera.pan_key = pan_key;
    }

    fn set_camera_alt_control(&mut self, alt_key: i32) {
        record!(self, "SetCameraAltControl", alt_key);
        self.camera.alt_key = alt_key;
    }

    fn set_camera_smooth_zoom_control(&mut self, sz_key: i32) {
        record!(self, "SetCameraSmoothZoomControl", sz_key);
        self.camera.smooth_zoom_key = sz_key;
    }

    fn set_camera_move_controls(
        &mut self,
        front_key: i32,
        back_key: i32,
        right_key: i32,
        left_key: i32,
        up_key: i32,
        down_key: i32,
    ) {
        record!(self, "SetCameraMoveControls", front_key, back_key, right_key, left_key, up_key, down_key);
        self.camera.move_keys = camera::MoveKeys {
            front: front_key,
            back: back_key,
            right: right_key,
            left: left_key,
            up: up_key,
            down: down_key,
        };
    }

    // ---- Shapes ----

    fn draw_pixel(&mut self, pos_x: i32, pos_y: i32, color: Color) {
        record!(self, "DrawPixel", pos_x, pos_y, color);
    }

    fn draw_pixel_v(&mut self, position: Vector2, color: Color) {
        record!(self, "DrawPixelV", position, color);
    }

    fn draw_line(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color) {
        record!(self, "DrawLine", start_x, start_y, end_x, end_y, color);
    }

    fn draw_line_v(&mut self, start: Vector2, end: Vector2, color: Color) {
        record!(self, "DrawLineV", start, end, color);
    }

    fn draw_line_ex(&mut self, start: Vector2, end: Vector2, thick: f32, color: Color) {
        record!(self, "DrawLineEx", start, end, thick, color);
    }

    fn draw_line_bezier(&mut self, start: Vector2, end: Vector2, thick: f32, color: Color) {
        record!(self, "DrawLineBezier", start, end, thick, color);
    }

    fn draw_line_strip(&mut self, points: &[Vector2], color: Color) {
        record!(self, "DrawLineStrip", points, color);
    }

    fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color) {
        record!(self, "DrawCircle", center_x, center_y, radius, color);
    }

    fn draw_circle_sector(
        &mut self,
        center: Vector2,
        radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    ) {
        record!(self, "DrawCircleSector", center, radius, start_angle, end_angle, segments, color);
    }

    fn draw_circle_sector_lines(
        &mut self,
        center: Vector2,
        radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    ) {
        record!(self, "DrawCircleSectorLines", center, radius, start_angle, end_angle, segments, color);
    }

    fn draw_circle_gradient(&mut self, center_x: i32, center_y: i32, radius: f32, color1: Color, color2: Color) {
        record!(self, "DrawCircleGradient", center_x, center_y, radius, color1, color2);
    }

    fn draw_circle_v(&mut self, center: Vector2, radius: f32, color: Color) {
        record!(self, "DrawCircleV", center, radius, color);
    }

    fn draw_circle_lines(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color) {
        record!(self, "DrawCircleLines", center_x, center_y, radius, color);
    }

    fn draw_ring(
        &mut self,
        center: Vector2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    ) {
        record!(self, "DrawRing", center, inner_radius, outer_radius, start_angle, end_angle, segments, color);
    }

    fn draw_ring_lines(
        &mut self,
        center: Vector2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: i32,
        end_angle: i32,
        segments: i32,
        color: Color,
    ) {
        record!(self, "DrawRingLines", center, inner_radius, outer_radius, start_angle, end_angle, segments, color);
    }

    fn draw_rectangle(&mut self, pos_x: i32, pos_y: i32, width: i32, height: i32, color: Color) {
        record!(self, "DrawRectangle", pos_x, pos_y, width, height, color);
    }

    fn draw_rectangle_v(&mut self, position: Vector2, size: Vector2, color: Color) {
        record!(self, "DrawRectangleV", position, size, color);
    }

    fn draw_rectangle_rec(&mut self, rec: Rectangle, color: Color) {
        record!(self, "DrawRectangleRec", rec, color);
    }

    fn draw_rectangle_pro(&mut self, rec: Rectangle, origin: Vector2, rotation: f32, color: Color) {
        record!(self, "DrawRectanglePro", rec, origin, rotation, color);
    }

    fn draw_rectangle_gradient_v(
        &mut self,
        pos_x: i32,
        pos_y: i32,
        width: i32,
        height: i32,
        color1: Color,
        color2: Color,
    ) {
        record!(self, "DrawRectangleGradientV", pos_x, pos_y, width, height, color1, color2);
    }

    fn draw_rectangle_gradient_h(
        &mut self,
        pos_x: i32,
        pos_y: i32,
        width: i32,
        height: i32,
        color1: Color,
        color2: Color,
    ) {
        record!(self, "DrawRectangleGradientH", pos_x, pos_y, width, height, color1, color2);
    }

    fn draw_rectangle_gradient_ex(&mut self, rec: Rectangle, col1: Color, col2: Color, col3: Color, col4: Color) {
        record!(self, "DrawRectangleGradientEx", rec, col1, col2, col3, col4);
    }

    fn draw_rectangle_lines(&mut self, pos_x: i32, pos_y: i32, width: i32, height: i32, color: Color) {
        record!(self, "DrawRectangleLines", pos_x, pos_y, width, height, color);
    }

    fn draw_rectangle_lines_ex(&mut self, rec: Rectangle, line_thick: i32, color: Color) {
        record!(self, "DrawRectangleLinesEx", rec, line_thick, color);
    }

    fn draw_rectangle_rounded(&mut self, rec: Rectangle, roundness: f32, segments: i32, color: Color) {
        record!(self, "DrawRectangleRounded", rec, roundness, segments, color);
    }

    fn draw_rectangle_rounded_lines(
        &mut self,
        rec: Rectangle,
        roundness: f32,
        segments: i32,
        line_thick: i32,
        color: Color,
    ) {
        record!(self, "DrawRectangleRoundedLines", rec, roundness, segments, line_thick, color);
    }

    fn draw_triangle(&mut self, v1: Vector2, v2: Vector2, v3: Vector2, color: Color) {
        record!(self, "DrawTriangle", v1, v2, v3, color);
    }

    fn draw_triangle_lines(&mut self, v1: Vector2, v2: Vector2, v3: Vector2, color: Color) {
        record!(self, "DrawTriangleLines", v1, v2, v3, color);
    }

    fn draw_triangle_fan(&mut self, points: &[Vector2], color: Color) {
        record!(self, "DrawTriangleFan", points, color);
    }

    fn draw_poly(&mut self, center: Vector2, sides: i32, radius: f32, rotation: f32, color: Color) {
        record!(self, "DrawPoly", center, sides, radius, rotation, color);
    }

    fn set_shapes_texture(&mut self, texture: Texture2D, source: Rectangle) {
        record!(self, "SetShapesTexture", texture.id, source);
        self.draw.shapes_texture = Some((texture, source));
    }

    // ---- Collision ----

    fn check_collision_recs(&mut self, rec1: Rectangle, rec2: Rectangle) -> bool {
        record!(self, "CheckCollisionRecs", rec1, rec2);
        math::check_collision_recs(rec1, rec2)
    }

    fn check_collision_circles(&mut self, center1: Vector2, radius1: f32, center2: Vector2, radius2: f32) -> bool {
        record!(self, "CheckCollisionCircles", center1, radius1, center2, radius2);
        math::check_collision_circles(center1, radius1, center2, radius2)
    }

    fn check_collision_circle_rec(&mut self, center: Vector2, radius: f32, rec: Rectangle) -> bool {
        record!(self, "CheckCollisionCircleRec", center, radius, rec);
        math::check_collision_circle_rec(center, radius, rec)
    }

    fn get_collision_rec(&mut self, rec1: Rectangle, rec2: Rectangle) -> Rectangle {
        record!(self, "GetCollisionRec", rec1, rec2);
        math::get_collision_rec(rec1, rec2)
    }

    fn check_collision_point_rec(&mut self, point: Vector2, rec: Rectangle) -> bool {
        record!(self, "CheckCollisionPointRec", point, rec);
        math::check_collision_point_rec(point, rec)
    }

    fn check_collision_point_circle(&mut self, point: Vector2, center: Vector2, radius: f32) -> bool {
        record!(self, "CheckCollisionPointCircle", point, center, radius);
        math::check_collision_point_circle(point, center, radius)
    }

    fn check_collision_point_triangle(&mut self, point: Vector2, p1: Vector2, p2: Vector2, p3: Vector2) -> bool {
        record!(self, "CheckCollisionPointTriangle", point, p1, p2, p3);
        math::check_collision_point_triangle(point, p1, p2, p3)
    }

    // ---- Textures ----

    fn load_image(&mut self, file_name: &str) -> Image {
        record!(self, "LoadImage", file_name);
        self.load_image_or_warn(file_name).unwrap_or_default()
    }

    fn load_image_ex(&mut self, pixels: &[Color], width: i32, height: i32) -> Image {
        record!(self, "LoadImageEx", pixels.len(), width, height);
        match self.assets.load_image_ex(pixels, width, height) {
            Ok(image) => image,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("IMAGE: Failed to load pixel data: {}", e));
                Image::default()
            }
        }
    }

    fn load_image_raw(&mut self, file_name: &str, width: i32, height: i32, format: i32, header_size: i32) -> Image {
        record!(self, "LoadImageRaw", file_name, width, height, format, header_size);
        match self
            .assets
            .load_image_raw(Path::new(file_name), width, height, format, header_size)
        {
            Ok(image) => image,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("IMAGE: [{}] Failed to load raw data: {}", file_name, e));
                Image::default()
            }
        }
    }

    fn export_image(&mut self, image: Image, file_name: &str) {
        record!(self, "ExportImage", image, file_name);
        match self.assets.export_image(&image, Path::new(file_name)) {
            Ok(()) => self.trace(LOG_INFO, &format!("IMAGE: [{}] Image exported successfully", file_name)),
            Err(e) => self.trace(LOG_WARNING, &format!("IMAGE: [{}] Failed to export image: {}", file_name, e)),
        }
    }

    fn export_image_as_code(&mut self, image: Image, file_name: &str) {
        record!(self, "ExportImageAsCode", image, file_name);
        if let Err(e) = self.assets.export_image_as_code(&image, Path::new(file_name)) {
            self.trace(LOG_WARNING, &format!("IMAGE: [{}] Failed to export image as code: {}", file_name, e));
        }
    }

    fn load_texture(&mut self, file_name: &str) -> Texture2D {
        record!(self, "LoadTexture", file_name);
        let Some(image) = self.load_image_or_warn(file_name) else {
            self.trace(LOG_WARNING, "TEXTURE: Failed to load texture");
            return Texture2D::default();
        };
        let texture = self.assets.texture_from_image(&image).unwrap_or_default();
        self.assets.remove_image(&image);
        texture
    }

    fn load_texture_from_image(&mut self, image: Image) -> Texture2D {
        record!(self, "LoadTextureFromImage", image);
        match self.assets.texture_from_image(&image) {
            Ok(texture) => {
                let message = format!("TEXTURE: [ID {}] Texture created successfully", texture.id);
                self.trace(LOG_INFO, &message);
                texture
            }
            Err(e) => {
                self.trace(LOG_WARNING, &format!("TEXTURE: Failed to load texture: {}", e));
                Texture2D::default()
            }
        }
    }

    fn load_texture_cubemap(&mut self, image: Image, layout_type: i32) -> TextureCubemap {
        record!(self, "LoadTextureCubemap", image, layout_type);
        match self.assets.texture_cubemap(&image, layout_type) {
            Ok(texture) => texture,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("TEXTURE: {}", e));
                TextureCubemap::default()
            }
        }
    }

    fn load_render_texture(&mut self, width: i32, height: i32) -> RenderTexture2D {
        record!(self, "LoadRenderTexture", width, height);
        match self.assets.render_texture(width, height) {
            Ok(target) => target,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("FBO: Framebuffer object can not be created: {}", e));
                RenderTexture2D::default()
            }
        }
    }

    fn unload_image(&mut self, image: Image) {
        record!(self, "UnloadImage", image);
        self.assets.remove_image(&image);
    }

    fn unload_texture(&mut self, texture: Texture2D) {
        record!(self, "UnloadTexture", texture.id);
        if self.assets.unload_texture(texture.id) {
            let message = format!("TEXTURE: [ID {}] Unloaded texture data from VRAM (GPU)", texture.id);
            self.trace(LOG_INFO, &message);
        }
    }

    fn unload_render_texture(&mut self, target: RenderTexture2D) {
        record!(self, "UnloadRenderTexture", target.id);
        self.assets.unload_render_texture(&target);
    }

    fn get_image_data(&mut self, image: Image) -> Vec<Color> {
        record!(self, "GetImageData", image);
        self.assets.image_colors(&image).unwrap_or_default()
    }

    fn get_image_data_normalized(&mut self, image: Image) -> Vec<Vector4> {
        record!(self, "GetImageDataNormalized", image);
        self.assets
            .image_colors(&image)
            .unwrap_or_default()
            .into_iter()
            .map(math::color_normalize)
            .collect()
    }

    fn get_pixel_data_size(&mut self, width: i32, height: i32, format: i32) -> i32 {
        record!(self, "GetPixelDataSize", width, height, format);
        math::get_pixel_data_size(width, height, format)
    }

    fn get_texture_data(&mut self, texture: Texture2D) -> Image {
        record!(self, "GetTextureData", texture.id);
        match self.assets.texture_to_image(&texture) {
            Ok(image) => image,
            Err(e) => {
                self.trace(LOG_WARNING, &format!("TEXTURE: Failed to retrieve texture data: {}", e));
                Image::default()
            }
        }
    }

    fn get_screen_data(&mut self) -> Image {
        record!(self, "GetScreenData");
        self.assets
            .solid_image(self.width, self.height, self.draw.clear_color)
            .unwrap_or_default()
    }

    fn update_texture(&mut self, texture: Texture2D, pixels: &[u8]) {
        record!(self, "UpdateTexture", texture.id, pixels.len());
        if let Err(e) = self.assets.update_texture(&texture, pixels) {
            self.trace(LOG_WARNING, &format!("TEXTURE: [ID {}] Failed to update texture: {}", texture.id, e));
        }
    }

    // ---- Text ----

    fn get_font_default(&mut self) -> Font {
        record!(self, "GetFontDefault");
        self.fonts.default_font(&mut self.assets)
    }

    fn load_font(&mut self, file_name: &str) -> Font {
        record!(self, "LoadFont", file_name);
        let result = self.load_font_file(file_name, &[]);
        self.font_or_default(file_name, result)
    }

    fn load_font_ex(&mut self, file_name: &str, font_size: i32, font_chars: &[i32]) -> Font {
        record!(self, "LoadFontEx", file_name, font_size, font_chars);
        let result = self.load_font_file(file_name, font_chars);
        self.font_or_default(file_name, result)
    }

    fn load_font_from_image(&mut self, image: Image, key: Color, first_char: i32) -> Font {
        record!(self, "LoadFontFromImage", image, key, first_char);
        let result = self
            .assets
            .image(&image)
            .map(|pixels| pixels.clone())
            .and_then(|mut pixels| self.font_from_pixels(&mut pixels, key, first_char));
        self.font_or_default("image", result)
    }

    fn load_font_data(&mut self, file_name: &str, font_size: i32, font_chars: &[i32], font_type: i32) -> Vec<CharInfo> {
        record!(self, "LoadFontData", file_name, font_size, font_chars, font_type);
        if !files::is_file_extension(file_name, ".json;.fnt") {
            self.trace(
                LOG_WARNING,
                &format!("FONT: [{}] Glyph data needs a rasterizer for this font type", file_name),
            );
            return Vec::new();
        }
        let metrics = font::FontMetrics::load(Path::new(file_name)).map(|mut m| {
            m.retain_chars(font_chars);
            m
        });
        match metrics {
            Ok(metrics) => {
                let atlas = metrics.atlas();
                metrics
                    .glyphs
                    .iter()
                    .map(|g| CharInfo {
                        value: g.value,
                        offset_x: g.offset_x,
                        offset_y: g.offset_y,
                        advance_x: g.advance_x,
                        image: self.assets.crop(&atlas, g.rec),
                    })
                    .collect()
            }
            Err(e) => {
                self.trace(LOG_WARNING, &format!("FONT: [{}] Failed to load glyph data: {}", file_name, e));
                Vec::new()
            }
        }
    }

    fn gen_image_font_atlas(&mut self, chars: &[CharInfo], font_size: i32, padding: i32, pack_method: i32) -> Image {
        record!(self, "GenImageFontAtlas", chars.len(), font_size, padding, pack_method);
        if pack_method == 1 {
            tracing::debug!(target: "raylib", "Skyline packing not available, using row packing");
        }
        let glyphs: Vec<image::RgbaImage> = chars
            .iter()
            .map(|c| self.assets.image(&c.image).cloned().unwrap_or_else(|_| image::RgbaImage::new(0, 0)))
            .collect();
        if glyphs.is_empty() {
            self.trace(LOG_WARNING, "FONT: No glyphs to pack into atlas");
            return Image::default();
        }
        let refs: Vec<&image::RgbaImage> = glyphs.iter().collect();
        let (atlas, _recs) = font::pack_atlas(&refs, font_size, padding);
        self.assets.insert_image(atlas, UNCOMPRESSED_R8G8B8A8)
    }

    fn unload_font(&mut self, font: Font) {
        record!(self, "UnloadFont", font.texture.id);
        if self.fonts.unload(&mut self.assets, &font) {
            self.trace(LOG_DEBUG, "FONT: Unloaded font data");
        }
    }

    fn draw_fps(&mut self, pos_x: i32, pos_y: i32) {
        record!(self, "DrawFPS", pos_x, pos_y);
    }

    fn draw_text(&mut self, text: &str, pos_x: i32, pos_y: i32, font_size: i32, color: Color) {
        record!(self, "DrawText", text, pos_x, pos_y, font_size, color);
    }

    fn draw_text_ex(&mut self, font: Font, text: &str, position: Vector2, font_size: f32, spacing: f32, tint: Color) {
        record!(self, "DrawTextEx", font.texture.id, text, position, font_size, spacing, tint);
    }

    fn draw_text_rec(
        &mut self,
        font: Font,
        text: &str,
        rec: Rectangle,
        font_size: f32,
        spacing: f32,
        word_wrap: bool,
        tint: Color,
    ) {
        record!(self, "DrawTextRec", font.texture.id, text, rec, font_size, spacing, word_wrap, tint);
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
        record!(
            self,
            "DrawTextRecEx",
            font.texture.id,
            text,
            rec,
            font_size,
            spacing,
            word_wrap,
            tint,
            select_start,
            select_length,
            select_text,
            select_back
        );
    }

    fn measure_text(&mut self, text: &str, font_size: i32) -> i32 {
        record!(self, "MeasureText", text, font_size);
        let default = self.fonts.default_font(&mut self.assets);
        let size = font_size.max(font::DEFAULT_FONT_SIZE);
        let spacing = size / font::DEFAULT_FONT_SIZE;
        self.fonts
            .glyphs(&default)
            .map_or(0, |glyphs| font::measure(glyphs, default.base_size, text, size as f32, spacing as f32).x as i32)
    }

    fn measure_text_ex(&mut self, font: Font, text: &str, font_size: f32, spacing: f32) -> Vector2 {
        record!(self, "MeasureTextEx", font.texture.id, text, font_size, spacing);
        self.fonts
            .glyphs(&font)
            .map_or(Vector2::ZERO, |glyphs| font::measure(glyphs, font.base_size, text, font_size, spacing))
    }

    fn get_glyph_index(&mut self, font: Font, character: i32) -> i32 {
        record!(self, "GetGlyphIndex", font.texture.id, character);
        self.fonts
            .glyphs(&font)
            .map_or(0, |glyphs| font::glyph_index(glyphs, character) as i32)
    }

    // ---- Basic 3D shapes ----

    fn draw_line_3d(&mut self, start: Vector3, end: Vector3, color: Color) {
        record!(self, "DrawLine3D", start, end, color);
    }

    fn draw_point_3d(&mut self, position: Vector3, color: Color) {
        record!(self, "DrawPoint3D", position, color);
    }

    fn draw_circle_3d(&mut self, center: Vector3, radius: f32, rotation_axis: Vector3, rotation_angle: f32, color: Color) {
        record!(self, "DrawCircle3D", center, radius, rotation_axis, rotation_angle, color);
    }

    fn draw_cube(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color) {
        record!(self, "DrawCube", position, width, height, length, color);
    }

    fn draw_cube_v(&mut self, position: Vector3, size: Vector3, color: Color) {
        record!(self, "DrawCubeV", position, size, color);
    }

    fn draw_cube_wires(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color) {
        record!(self, "DrawCubeWires", position, width, height, length, color);
    }

    fn draw_cube_wires_v(&mut self, position: Vector3, size: Vector3, color: Color) {
        record!(self, "DrawCubeWiresV", position, size, color);
    }

    fn draw_cube_texture(
        &mut self,
        texture: Texture2D,
        position: Vector3,
        width: f32,
        height: f32,
        length: f32,
        color: Color,
    ) {
        record!(self, "DrawCubeTexture", texture.id, position, width, height, length, color);
    }

    fn draw_sphere(&mut self, center: Vector3, radius: f32, color: Color) {
        record!(self, "DrawSphere", center, radius, color);
    }

    fn draw_sphere_ex(&mut self, center: Vector3, radius: f32, rings: i32, slices: i32, color: Color) {
        record!(self, "DrawSphereEx", center, radius, rings, slices, color);
    }

    fn draw_sphere_wires(&mut self, center: Vector3, radius: f32, rings: i32, slices: i32, color: Color) {
        record!(self, "DrawSphereWires", center, radius, rings, slices, color);
    }

    fn draw_cylinder(
        &mut self,
        position: Vector3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Color,
    ) {
        record!(self, "DrawCylinder", position, radius_top, radius_bottom, height, slices, color);
    }

    fn draw_cylinder_wires(
        &mut self,
        position: Vector3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Color,
    ) {
        record!(self, "DrawCylinderWires", position, radius_top, radius_bottom, height, slices, color);
    }

    fn draw_plane(&mut self, center: Vector3, size: Vector2, color: Color) {
        record!(self, "DrawPlane", center, size, color);
    }

    fn draw_ray(&mut self, ray: Ray, color: Color) {
        record!(self, "DrawRay", ray, color);
    }

    fn draw_grid(&mut self, slices: i32, spacing: f32) {
        record!(self, "DrawGrid", slices, spacing);
    }

    fn draw_gizmo(&mut self, position: Vector3) {
        record!(self, "DrawGizmo", position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn window() -> HeadlessRaylib {
        let mut rl = HeadlessRaylib::new();
        rl.init_window(640, 480, "test");
        rl
    }

    #[test]
    fn test_window_lifecycle() {
        let mut rl = HeadlessRaylib::new();
        assert!(rl.window_should_close());

        rl.init_window(0, -1, "");
        assert_eq!(rl.get_screen_width(), 800);
        assert_eq!(rl.get_screen_height(), 450);
        assert_eq!(rl.window_title(), "rayscript");
        assert!(!rl.window_should_close());

        rl.request_close();
        assert!(rl.window_should_close());
        assert!(!rl.window_should_close());

        rl.close_window();
        assert!(rl.window_should_close());
        assert_eq!(rl.calls_to("WindowShouldClose"), 5);
    }

    #[test]
    fn test_exit_key_closes_window() {
        let mut rl = window();
        rl.press_key(KEY_ESCAPE);
        assert!(rl.window_should_close());

        rl.set_exit_key(KEY_Q);
        rl.press_key(KEY_ESCAPE);
        assert!(!rl.window_should_close());
    }

    #[test]
    fn test_max_frames() {
        let mut config = BridgeConfig::default();
        config.host.max_frames = 2;
        let mut rl = HeadlessRaylib::from_config(&config);
        rl.init_window(10, 10, "frames");
        let mut frames = 0;
        while !rl.window_should_close() {
            rl.begin_drawing();
            rl.end_drawing();
            frames += 1;
        }
        assert_eq!(frames, 2);
        assert_eq!(rl.frame_count(), 2);
    }

    #[test]
    fn test_trace_log_exit_requests_close() {
        let mut rl = window();
        rl.set_trace_log_exit(LOG_WARNING);
        rl.set_window_monitor(42);
        assert!(rl.window_should_close());
    }

    #[test]
    fn test_call_log_limit() {
        let mut config = BridgeConfig::default();
        config.host.call_log_limit = 2;
        let mut rl = HeadlessRaylib::from_config(&config);
        rl.draw_pixel(1, 2, WHITE);
        rl.draw_pixel(3, 4, WHITE);
        rl.draw_grid(10, 1.0);
        assert_eq!(rl.calls().entries().count(), 2);
        assert_eq!(rl.calls_to("DrawPixel"), 2);
        assert_eq!(rl.total_calls(), 3);
        assert_eq!(rl.last_call().unwrap().args, "10, 1.0");
    }

    #[test]
    fn test_key_pressed_for_one_frame() {
        let mut rl = window();
        rl.press_key(KEY_A);
        assert!(rl.is_key_pressed(KEY_A));
        assert_eq!(rl.get_key_pressed(), KEY_A);
        assert_eq!(rl.get_key_pressed(), 0);
        rl.begin_drawing();
        rl.end_drawing();
        assert!(!rl.is_key_pressed(KEY_A));
        assert!(rl.is_key_down(KEY_A));
        rl.release_key(KEY_A);
        assert!(rl.is_key_released(KEY_A));
        assert!(rl.is_key_up(KEY_A));
    }

    #[test]
    fn test_random_value_bounds_are_swapped() {
        let mut rl = HeadlessRaylib::new();
        for _ in 0..50 {
            let v = rl.get_random_value(10, 5);
            assert!((5..=10).contains(&v));
        }
    }

    #[test]
    fn test_texture_lifecycle() {
        let mut rl = window();
        let image = rl.load_image_ex(&[RED; 4], 2, 2);
        let texture = rl.load_texture_from_image(image);
        assert_ne!(texture.id, 0);
        assert_eq!((texture.width, texture.height), (2, 2));

        let copy = rl.get_texture_data(texture);
        assert_eq!(rl.get_image_data(copy), vec![RED; 4]);

        rl.unload_texture(texture);
        rl.unload_image(image);
        rl.unload_image(copy);
        assert_eq!(rl.texture_count(), 1);
        assert_eq!(rl.image_count(), DEFAULT_GLYPH_IMAGES);
    }

    const DEFAULT_GLYPH_IMAGES: usize = font::DEFAULT_FONT_CHARS as usize;

    #[test]
    fn test_missing_files_return_empty_values() {
        let mut rl = window();
        assert!(rl.load_image("/no/such/file.png").is_empty());
        assert_eq!(rl.load_texture("/no/such/file.png").id, 0);
        let font = rl.load_font("/no/such/font.ttf");
        assert_eq!(font, rl.get_font_default());
    }

    #[test]
    fn test_measure_text() {
        let mut rl = window();
        // size 20 -> spacing 2; "ab" = (5 + 5) * 2 + 2
        assert_eq!(rl.measure_text("ab", 20), 22);
        // sizes below 10 are raised to 10
        assert_eq!(rl.measure_text("ab", 4), 11);
        assert_eq!(rl.measure_text("", 20), 0);
    }

    #[test]
    fn test_storage_values() {
        let dir = tempdir().unwrap();
        let mut config = BridgeConfig::default();
        config.host.storage_file = dir.path().join("storage.data");
        let mut rl = HeadlessRaylib::from_config(&config);

        assert_eq!(rl.storage_load_value(1), 0);
        rl.storage_save_value(1, 1234);
        assert_eq!(rl.storage_load_value(1), 1234);
    }

    #[test]
    fn test_screenshot_uses_clear_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let mut rl = window();
        rl.clear_background(BLUE);
        rl.take_screenshot(path.to_str().unwrap());
        let shot = image::open(&path).unwrap().to_rgba8();
        assert_eq!(shot.dimensions(), (640, 480));
        assert_eq!(shot.get_pixel(0, 0).0, [BLUE.r, BLUE.g, BLUE.b, BLUE.a]);
    }

    #[test]
    fn test_camera_mode_locks_cursor() {
        let mut rl = window();
        rl.set_camera_mode(Camera3D::default(), CAMERA_FIRST_PERSON);
        assert!(rl.is_cursor_disabled());
        rl.set_camera_mode(Camera3D::default(), CAMERA_FREE);
        assert!(!rl.is_cursor_disabled());
    }

    #[test]
    fn test_gestures_respect_enabled_mask() {
        let mut rl = window();
        rl.set_gestures_enabled(GESTURE_TAP as u32);
        rl.set_gesture(GESTURE_DRAG);
        assert_eq!(rl.get_gesture_detected(), GESTURE_NONE);
        rl.set_gesture(GESTURE_TAP);
        assert!(rl.is_gesture_detected(GESTURE_TAP));
    }
}
