//! 模拟输入状态
//!
//! 键盘、鼠标、手柄、触摸与手势都按帧双缓冲：测试钩子修改当前帧状态，
//! `advance` 在 EndDrawing 时把当前帧拷贝为上一帧。

use crate::raylib::types::Vector2;
use std::collections::VecDeque;

pub const MAX_KEYBOARD_KEYS: usize = 512;
pub const MAX_MOUSE_BUTTONS: usize = 3;
pub const MAX_GAMEPADS: usize = 4;
pub const MAX_GAMEPAD_BUTTONS: usize = 32;
pub const MAX_TOUCH_POINTS: usize = 10;

#[derive(Debug, Clone)]
pub struct Gamepad {
    pub name: String,
    pub axes: Vec<f32>,
    current: [bool; MAX_GAMEPAD_BUTTONS],
    previous: [bool; MAX_GAMEPAD_BUTTONS],
}

impl Gamepad {
    pub fn new(name: &str, axis_count: usize) -> Self {
        Self {
            name: name.to_string(),
            axes: vec![0.0; axis_count],
            current: [false; MAX_GAMEPAD_BUTTONS],
            previous: [false; MAX_GAMEPAD_BUTTONS],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pub enabled: u32,
    pub current: i32,
    pub hold_duration: f32,
    pub drag_vector: Vector2,
    pub drag_angle: f32,
    pub pinch_vector: Vector2,
    pub pinch_angle: f32,
}

#[derive(Debug, Clone)]
pub struct InputState {
    keys_current: Vec<bool>,
    keys_previous: Vec<bool>,
    key_queue: VecDeque<i32>,
    pub exit_key: i32,

    mouse_current: [bool; MAX_MOUSE_BUTTONS],
    mouse_previous: [bool; MAX_MOUSE_BUTTONS],
    pub mouse_position: Vector2,
    pub mouse_offset: Vector2,
    pub mouse_scale: Vector2,
    pub wheel_move: i32,
    pub cursor_hidden: bool,
    pub cursor_disabled: bool,

    gamepads: [Option<Gamepad>; MAX_GAMEPADS],
    pub last_gamepad_button: i32,

    pub touches: Vec<Vector2>,
    pub gestures: GestureState,
    pub dropped_files: Vec<String>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys_current: vec![false; MAX_KEYBOARD_KEYS],
            keys_previous: vec![false; MAX_KEYBOARD_KEYS],
            key_queue: VecDeque::new(),
            exit_key: crate::raylib::consts::KEY_ESCAPE,
            mouse_current: [false; MAX_MOUSE_BUTTONS],
            mouse_previous: [false; MAX_MOUSE_BUTTONS],
            mouse_position: Vector2::ZERO,
            mouse_offset: Vector2::ZERO,
            mouse_scale: Vector2::ONE,
            wheel_move: 0,
            cursor_hidden: false,
            cursor_disabled: false,
            gamepads: Default::default(),
            last_gamepad_button: -1,
            touches: Vec::new(),
            gestures: GestureState {
                enabled: 0b0000_0011_1111_1111,
                ..Default::default()
            },
            dropped_files: Vec::new(),
        }
    }
}

fn slot(key: i32, len: usize) -> Option<usize> {
    usize::try_from(key).ok().filter(|&k| k < len)
}

impl InputState {
    /// 帧结束：当前状态成为上一帧状态
    pub fn advance(&mut self) {
        self.keys_previous.copy_from_slice(&self.keys_current);
        self.key_queue.clear();
        self.mouse_previous = self.mouse_current;
        self.wheel_move = 0;
        for pad in self.gamepads.iter_mut().flatten() {
            pad.previous = pad.current;
        }
        self.gestures.current = 0;
    }

    // ---- keyboard ----

    /// 返回 true 表示按下的是退出键
    pub fn set_key(&mut self, key: i32, down: bool) -> bool {
        let Some(k) = slot(key, MAX_KEYBOARD_KEYS) else {
            return false;
        };
        if down && !self.keys_current[k] {
            self.key_queue.push_back(key);
        }
        self.keys_current[k] = down;
        down && key == self.exit_key
    }

    pub fn key_down(&self, key: i32) -> bool {
        slot(key, MAX_KEYBOARD_KEYS).is_some_and(|k| self.keys_current[k])
    }

    pub fn key_pressed(&self, key: i32) -> bool {
        slot(key, MAX_KEYBOARD_KEYS).is_some_and(|k| self.keys_current[k] && !self.keys_previous[k])
    }

    pub fn key_released(&self, key: i32) -> bool {
        slot(key, MAX_KEYBOARD_KEYS).is_some_and(|k| !self.keys_current[k] && self.keys_previous[k])
    }

    pub fn pop_key_pressed(&mut self) -> i32 {
        self.key_queue.pop_front().unwrap_or(0)
    }

    // ---- mouse ----

    pub fn set_mouse_button(&mut self, button: i32, down: bool) {
        if let Some(b) = slot(button, MAX_MOUSE_BUTTONS) {
            self.mouse_current[b] = down;
        }
    }

    pub fn mouse_down(&self, button: i32) -> bool {
        slot(button, MAX_MOUSE_BUTTONS).is_some_and(|b| self.mouse_current[b])
    }

    pub fn mouse_pressed(&self, button: i32) -> bool {
        slot(button, MAX_MOUSE_BUTTONS).is_some_and(|b| self.mouse_current[b] && !self.mouse_previous[b])
    }

    pub fn mouse_released(&self, button: i32) -> bool {
        slot(button, MAX_MOUSE_BUTTONS).is_some_and(|b| !self.mouse_current[b] && self.mouse_previous[b])
    }

    /// 应用偏移与缩放后的鼠标位置
    pub fn scaled_mouse_position(&self) -> Vector2 {
        (self.mouse_position + self.mouse_offset) * self.mouse_scale
    }

    // ---- gamepad ----

    pub fn connect_gamepad(&mut self, gamepad: i32, pad: Gamepad) {
        if let Some(g) = slot(gamepad, MAX_GAMEPADS) {
            self.gamepads[g] = Some(pad);
        }
    }

    pub fn disconnect_gamepad(&mut self, gamepad: i32) {
        if let Some(g) = slot(gamepad, MAX_GAMEPADS) {
            self.gamepads[g] = None;
        }
    }

    pub fn gamepad(&self, gamepad: i32) -> Option<&Gamepad> {
        slot(gamepad, MAX_GAMEPADS).and_then(|g| self.gamepads[g].as_ref())
    }

    pub fn gamepad_mut(&mut self, gamepad: i32) -> Option<&mut Gamepad> {
        slot(gamepad, MAX_GAMEPADS).and_then(|g| self.gamepads[g].as_mut())
    }

    pub fn set_gamepad_button(&mut self, gamepad: i32, button: i32, down: bool) {
        let Some(b) = slot(button, MAX_GAMEPAD_BUTTONS) else {
            return;
        };
        if let Some(pad) = self.gamepad_mut(gamepad) {
            pad.current[b] = down;
            if down {
                self.last_gamepad_button = button;
            }
        }
    }

    fn gamepad_buttons(&self, gamepad: i32, button: i32) -> Option<(bool, bool)> {
        let b = slot(button, MAX_GAMEPAD_BUTTONS)?;
        self.gamepad(gamepad).map(|pad| (pad.current[b], pad.previous[b]))
    }

    pub fn gamepad_down(&self, gamepad: i32, button: i32) -> bool {
        self.gamepad_buttons(gamepad, button).is_some_and(|(cur, _)| cur)
    }

    pub fn gamepad_pressed(&self, gamepad: i32, button: i32) -> bool {
        self.gamepad_buttons(gamepad, button).is_some_and(|(cur, prev)| cur && !prev)
    }

    pub fn gamepad_released(&self, gamepad: i32, button: i32) -> bool {
        self.gamepad_buttons(gamepad, button).is_some_and(|(cur, prev)| !cur && prev)
    }

    /// 未连接的手柄视为所有按键抬起
    pub fn gamepad_up(&self, gamepad: i32, button: i32) -> bool {
        !self.gamepad_down(gamepad, button)
    }

    pub fn gamepad_axis(&self, gamepad: i32, axis: i32) -> f32 {
        self.gamepad(gamepad)
            .and_then(|pad| usize::try_from(axis).ok().and_then(|a| pad.axes.get(a).copied()))
            .unwrap_or(0.0)
    }

    // ---- touch ----

    /// 无触摸点时，0 号触摸点映射到鼠标（桌面平台行为）
    pub fn touch_position(&self, index: i32) -> Vector2 {
        match usize::try_from(index) {
            Ok(i) if i < self.touches.len() => self.touches[i],
            Ok(0) if self.touches.is_empty() => self.scaled_mouse_position(),
            _ => Vector2::ZERO,
        }
    }

    pub fn set_touches(&mut self, points: &[Vector2]) {
        self.touches = points.iter().take(MAX_TOUCH_POINTS).copied().collect();
    }

    // ---- gestures ----

    pub fn gesture_detected(&self) -> i32 {
        self.gestures.enabled as i32 & self.gestures.current
    }

    pub fn is_gesture_detected(&self, gesture: i32) -> bool {
        self.gesture_detected() == gesture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raylib::consts::*;

    #[test]
    fn test_key_edges() {
        let mut input = InputState::default();
        input.set_key(KEY_A, true);
        assert!(input.key_pressed(KEY_A));
        assert!(input.key_down(KEY_A));
        assert_eq!(input.pop_key_pressed(), KEY_A);
        assert_eq!(input.pop_key_pressed(), 0);

        input.advance();
        assert!(!input.key_pressed(KEY_A));
        assert!(input.key_down(KEY_A));

        input.set_key(KEY_A, false);
        assert!(input.key_released(KEY_A));
        input.advance();
        assert!(!input.key_released(KEY_A));
    }

    #[test]
    fn test_exit_key_and_out_of_range() {
        let mut input = InputState::default();
        assert!(input.set_key(KEY_ESCAPE, true));
        assert!(!input.set_key(-3, true));
        assert!(!input.key_down(4096));
    }

    #[test]
    fn test_mouse_scaling() {
        let mut input = InputState::default();
        input.mouse_position = Vector2::new(10.0, 20.0);
        input.mouse_offset = Vector2::new(5.0, 5.0);
        input.mouse_scale = Vector2::new(2.0, 0.5);
        assert_eq!(input.scaled_mouse_position(), Vector2::new(30.0, 12.5));
        assert_eq!(input.touch_position(0), Vector2::new(30.0, 12.5));
        assert_eq!(input.touch_position(1), Vector2::ZERO);
    }

    #[test]
    fn test_gamepad_buttons() {
        let mut input = InputState::default();
        assert!(input.gamepad_up(0, 1));
        input.connect_gamepad(0, Gamepad::new("Pad", 2));
        input.set_gamepad_button(0, GAMEPAD_BUTTON_RIGHT_FACE_DOWN, true);
        assert!(input.gamepad_pressed(0, GAMEPAD_BUTTON_RIGHT_FACE_DOWN));
        assert_eq!(input.last_gamepad_button, GAMEPAD_BUTTON_RIGHT_FACE_DOWN);
        input.advance();
        assert!(!input.gamepad_pressed(0, GAMEPAD_BUTTON_RIGHT_FACE_DOWN));
        assert!(input.gamepad_down(0, GAMEPAD_BUTTON_RIGHT_FACE_DOWN));
        assert_eq!(input.gamepad_axis(0, 5), 0.0);
    }

    #[test]
    fn test_gesture_mask() {
        let mut input = InputState::default();
        input.gestures.current = GESTURE_TAP;
        assert!(input.is_gesture_detected(GESTURE_TAP));
        input.gestures.enabled = GESTURE_DRAG as u32;
        assert_eq!(input.gesture_detected(), 0);
    }
}
