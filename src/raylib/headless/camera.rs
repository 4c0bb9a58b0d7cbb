//! 相机系统（SetCameraMode / UpdateCamera）
//!
//! 角度按相机相对目标的偏移计算：`angle.x` 为水平方位角，`angle.y` 为仰角。
//! 自由、环绕与第三人称模式根据角度与距离重新放置相机；第一人称模式移动相机
//! 并根据角度重新计算目标。

use super::input::InputState;
use crate::raylib::consts::*;
use crate::raylib::types::{Camera3D, Vector2, Vector3};

const MOUSE_SCROLL_SENSITIVITY: f32 = 1.5;
const MOUSE_MOVE_SENSITIVITY: f32 = 0.003;
const FREE_MOUSE_SENSITIVITY: f32 = 0.01;
const FREE_DISTANCE_MIN: f32 = 0.3;
const FREE_DISTANCE_MAX: f32 = 120.0;
const FREE_PANNING_DIVIDER: f32 = 5.1;
const FREE_SMOOTH_ZOOM_SENSITIVITY: f32 = 0.05;
const ORBITAL_SPEED: f32 = 0.01;
const PLAYER_MOVEMENT_SENSITIVITY: f32 = 20.0;
const FREE_ANGLE_LIMIT: f32 = 85.0 * std::f32::consts::PI / 180.0;
const FIRST_PERSON_ANGLE_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// 移动键顺序：前、后、右、左、上、下
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveKeys {
    pub front: i32,
    pub back: i32,
    pub right: i32,
    pub left: i32,
    pub up: i32,
    pub down: i32,
}

impl Default for MoveKeys {
    fn default() -> Self {
        Self {
            front: KEY_W,
            back: KEY_S,
            right: KEY_D,
            left: KEY_A,
            up: KEY_E,
            down: KEY_Q,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraSystem {
    pub mode: i32,
    pub angle: Vector2,
    pub target_distance: f32,
    previous_mouse: Vector2,
    pub pan_key: i32,
    pub alt_key: i32,
    pub smooth_zoom_key: i32,
    pub move_keys: MoveKeys,
}

impl Default for CameraSystem {
    fn default() -> Self {
        Self {
            mode: CAMERA_CUSTOM,
            angle: Vector2::ZERO,
            target_distance: 0.0,
            previous_mouse: Vector2::ZERO,
            pan_key: MOUSE_MIDDLE_BUTTON,
            alt_key: KEY_LEFT_ALT,
            smooth_zoom_key: KEY_LEFT_CONTROL,
            move_keys: MoveKeys::default(),
        }
    }
}

impl CameraSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置模式并从相机当前位置推导角度与距离
    ///
    /// 返回是否需要锁定光标（第一/第三人称）。
    pub fn set_mode(&mut self, camera: &Camera3D, mode: i32, input: &InputState) -> bool {
        let offset = camera.position - camera.target;
        let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();

        self.target_distance = offset.length();
        self.angle = if self.target_distance > f32::EPSILON {
            Vector2::new(offset.x.atan2(offset.z), offset.y.atan2(horizontal))
        } else {
            Vector2::ZERO
        };
        self.previous_mouse = input.scaled_mouse_position();
        self.mode = mode;

        matches!(mode, CAMERA_FIRST_PERSON | CAMERA_THIRD_PERSON)
    }

    pub fn update(&mut self, camera: &mut Camera3D, input: &InputState) {
        let mouse = input.scaled_mouse_position();
        let delta = mouse - self.previous_mouse;
        self.previous_mouse = mouse;
        let wheel = input.wheel_move as f32;

        match self.mode {
            CAMERA_FREE => {
                self.target_distance = (self.target_distance - wheel * MOUSE_SCROLL_SENSITIVITY)
                    .clamp(FREE_DISTANCE_MIN, FREE_DISTANCE_MAX);

                if input.mouse_down(self.pan_key) {
                    if input.key_down(self.alt_key) {
                        if input.key_down(self.smooth_zoom_key) {
                            self.target_distance = (self.target_distance
                                + delta.y * FREE_SMOOTH_ZOOM_SENSITIVITY)
                                .clamp(FREE_DISTANCE_MIN, FREE_DISTANCE_MAX);
                        } else {
                            self.angle.x -= delta.x * FREE_MOUSE_SENSITIVITY;
                            self.angle.y = (self.angle.y + delta.y * FREE_MOUSE_SENSITIVITY)
                                .clamp(-FREE_ANGLE_LIMIT, FREE_ANGLE_LIMIT);
                        }
                    } else {
                        self.pan(camera, delta);
                    }
                }
                self.place_on_sphere(camera);
            }
            CAMERA_ORBITAL => {
                self.angle.x += ORBITAL_SPEED;
                self.target_distance =
                    (self.target_distance - wheel * MOUSE_SCROLL_SENSITIVITY).max(FREE_DISTANCE_MIN);
                self.place_on_sphere(camera);
            }
            CAMERA_FIRST_PERSON => {
                camera.position += self.walk(input);
                self.look(delta);

                let (sx, cx) = self.angle.x.sin_cos();
                let (sy, cy) = self.angle.y.sin_cos();
                // 视线方向与相机相对目标的偏移方向相反
                let forward = Vector3::new(-sx * cy, -sy, -cx * cy);
                let reach = self.target_distance.max(FREE_DISTANCE_MIN);
                camera.target = camera.position + forward * reach;
            }
            CAMERA_THIRD_PERSON => {
                camera.target += self.walk(input);
                self.look(delta);
                self.target_distance =
                    (self.target_distance - wheel * MOUSE_SCROLL_SENSITIVITY).max(FREE_DISTANCE_MIN);
                self.place_on_sphere(camera);
            }
            _ => {}
        }
    }

    /// 按移动键计算本帧位移（水平方向跟随方位角）
    fn walk(&self, input: &InputState) -> Vector3 {
        let axis = |positive: i32, negative: i32| {
            input.key_down(positive) as i32 as f32 - input.key_down(negative) as i32 as f32
        };
        let keys = self.move_keys;
        let forward = axis(keys.front, keys.back);
        let right = axis(keys.right, keys.left);
        let up = axis(keys.up, keys.down);

        let (sx, cx) = self.angle.x.sin_cos();
        Vector3::new(
            -sx * forward + cx * right,
            up,
            -cx * forward - sx * right,
        ) / PLAYER_MOVEMENT_SENSITIVITY
    }

    fn look(&mut self, delta: Vector2) {
        self.angle.x -= delta.x * MOUSE_MOVE_SENSITIVITY;
        self.angle.y = (self.angle.y + delta.y * MOUSE_MOVE_SENSITIVITY)
            .clamp(-FIRST_PERSON_ANGLE_LIMIT, FIRST_PERSON_ANGLE_LIMIT);
    }

    fn pan(&self, camera: &mut Camera3D, delta: Vector2) {
        let (sx, cx) = self.angle.x.sin_cos();
        let (sy, cy) = self.angle.y.sin_cos();
        let scale = self.target_distance / FREE_PANNING_DIVIDER;
        let dx = delta.x * FREE_MOUSE_SENSITIVITY;
        let dy = delta.y * FREE_MOUSE_SENSITIVITY;
        camera.target += Vector3::new(
            -dx * cx + dy * sx * sy,
            dy * cy,
            dx * sx + dy * cx * sy,
        ) * scale;
    }

    fn place_on_sphere(&self, camera: &mut Camera3D) {
        let (sx, cx) = self.angle.x.sin_cos();
        let (sy, cy) = self.angle.y.sin_cos();
        camera.position = camera.target + Vector3::new(sx * cy, sy, cx * cy) * self.target_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(position: Vector3) -> Camera3D {
        Camera3D {
            position,
            ..Default::default()
        }
    }

    #[test]
    fn test_orbital_keeps_radius() {
        let input = InputState::default();
        let mut cam = camera(Vector3::new(10.0, 2.0, 10.0));
        let mut system = CameraSystem::new();
        assert!(!system.set_mode(&cam, CAMERA_ORBITAL, &input));

        let radius = |c: &Camera3D| (c.position.x.powi(2) + c.position.z.powi(2)).sqrt();
        let before = radius(&cam);
        for _ in 0..10 {
            system.update(&mut cam, &input);
        }
        assert!((radius(&cam) - before).abs() < 1e-3);
        assert!((cam.position.y - 2.0).abs() < 1e-3);
        assert_eq!(cam.target, Vector3::ZERO);
        assert_ne!(cam.position, Vector3::new(10.0, 2.0, 10.0));
    }

    #[test]
    fn test_first_person_walks_forward() {
        let mut input = InputState::default();
        let mut cam = camera(Vector3::new(0.0, 2.0, 4.0));
        let mut system = CameraSystem::new();
        assert!(system.set_mode(&cam, CAMERA_FIRST_PERSON, &input));

        input.set_key(KEY_W, true);
        system.update(&mut cam, &input);
        assert!(cam.position.z < 4.0);
        assert!(cam.target.z < cam.position.z);
    }

    #[test]
    fn test_free_zoom_is_clamped() {
        let mut input = InputState::default();
        let mut cam = camera(Vector3::new(0.0, 0.0, 1.0));
        let mut system = CameraSystem::new();
        system.set_mode(&cam, CAMERA_FREE, &input);

        input.wheel_move = 10;
        system.update(&mut cam, &input);
        assert!((system.target_distance - FREE_DISTANCE_MIN).abs() < 1e-6);
        assert!((cam.position.length() - FREE_DISTANCE_MIN).abs() < 1e-4);
    }

    #[test]
    fn test_custom_mode_is_inert() {
        let input = InputState::default();
        let mut cam = camera(Vector3::new(3.0, 3.0, 3.0));
        let mut system = CameraSystem::new();
        system.update(&mut cam, &input);
        assert_eq!(cam.position, Vector3::new(3.0, 3.0, 3.0));
    }
}
