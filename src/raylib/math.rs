//! raylib 纯数学函数
//!
//! 颜色转换、2D 碰撞检测、相机投影与像素数据大小。这些函数不依赖原生
//! 上下文，headless 后端直接使用，真实后端的结果应与之一致。

use super::consts::*;
use super::types::{Camera3D, Color, Matrix, Ray, Rectangle, Vector2, Vector3, Vector4};
use glam::Vec4Swizzles;

/// 透视投影的近裁剪面
pub const CULL_DISTANCE_NEAR: f32 = 0.01;
/// 透视投影的远裁剪面
pub const CULL_DISTANCE_FAR: f32 = 1000.0;

/// 颜色转为 `0xRRGGBBAA` 整数
pub fn color_to_int(color: Color) -> i32 {
    color.to_hex() as i32
}

/// 颜色归一化到 [0, 1]
pub fn color_normalize(color: Color) -> Vector4 {
    Vector4::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a as f32 / 255.0,
    )
}

/// RGB 转 HSV，色相范围 [0, 360)
pub fn color_to_hsv(color: Color) -> Vector3 {
    let rgb = color_normalize(color).xyz();
    let min = rgb.min_element();
    let max = rgb.max_element();
    let delta = max - min;

    let mut hsv = Vector3::new(0.0, 0.0, max);
    if delta < 0.00001 {
        return hsv;
    }
    if max > 0.0 {
        hsv.y = delta / max;
    } else {
        hsv.x = f32::NAN;
        return hsv;
    }

    hsv.x = if rgb.x >= max {
        (rgb.y - rgb.z) / delta
    } else if rgb.y >= max {
        2.0 + (rgb.z - rgb.x) / delta
    } else {
        4.0 + (rgb.x - rgb.y) / delta
    };
    hsv.x *= 60.0;
    if hsv.x < 0.0 {
        hsv.x += 360.0;
    }
    hsv
}

/// HSV 转 RGB，alpha 固定为 255
pub fn color_from_hsv(hsv: Vector3) -> Color {
    let (h, s, v) = (hsv.x, hsv.y, hsv.z);
    let channel = |n: f32| -> u8 {
        let k = (n + h / 60.0).rem_euclid(6.0);
        let k = k.min(4.0 - k).clamp(0.0, 1.0);
        ((v - v * s * k) * 255.0) as u8
    };
    Color::new(channel(5.0), channel(3.0), channel(1.0), 255)
}

/// 从十六进制整数取颜色
pub fn get_color(hex: i32) -> Color {
    Color::from_hex(hex as u32)
}

/// 改变颜色透明度，`alpha` 取 [0, 1]
pub fn fade(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    Color {
        a: (255.0 * alpha) as u8,
        ..color
    }
}

pub fn check_collision_recs(rec1: Rectangle, rec2: Rectangle) -> bool {
    rec1.x < rec2.x + rec2.width
        && rec1.x + rec1.width > rec2.x
        && rec1.y < rec2.y + rec2.height
        && rec1.y + rec1.height > rec2.y
}

pub fn check_collision_circles(center1: Vector2, radius1: f32, center2: Vector2, radius2: f32) -> bool {
    center1.distance(center2) <= radius1 + radius2
}

pub fn check_collision_circle_rec(center: Vector2, radius: f32, rec: Rectangle) -> bool {
    let rec_center_x = (rec.x + rec.width / 2.0) as i32 as f32;
    let rec_center_y = (rec.y + rec.height / 2.0) as i32 as f32;
    let half_w = rec.width / 2.0;
    let half_h = rec.height / 2.0;

    let dx = (center.x - rec_center_x).abs();
    let dy = (center.y - rec_center_y).abs();

    if dx > half_w + radius || dy > half_h + radius {
        return false;
    }
    if dx <= half_w || dy <= half_h {
        return true;
    }

    let corner_distance_sq = (dx - half_w).powi(2) + (dy - half_h).powi(2);
    corner_distance_sq <= radius * radius
}

/// 两矩形的重叠区域，不相交时返回空矩形
pub fn get_collision_rec(rec1: Rectangle, rec2: Rectangle) -> Rectangle {
    if !check_collision_recs(rec1, rec2) {
        return Rectangle::default();
    }
    let left = rec1.x.max(rec2.x);
    let top = rec1.y.max(rec2.y);
    let right = (rec1.x + rec1.width).min(rec2.x + rec2.width);
    let bottom = (rec1.y + rec1.height).min(rec2.y + rec2.height);
    Rectangle::new(left, top, right - left, bottom - top)
}

pub fn check_collision_point_rec(point: Vector2, rec: Rectangle) -> bool {
    point.x >= rec.x
        && point.x <= rec.x + rec.width
        && point.y >= rec.y
        && point.y <= rec.y + rec.height
}

pub fn check_collision_point_circle(point: Vector2, center: Vector2, radius: f32) -> bool {
    check_collision_circles(point, 0.0, center, radius)
}

/// 重心坐标判定，边界上的点不算在内
pub fn check_collision_point_triangle(point: Vector2, p1: Vector2, p2: Vector2, p3: Vector2) -> bool {
    let denom = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    let alpha = ((p2.y - p3.y) * (point.x - p3.x) + (p3.x - p2.x) * (point.y - p3.y)) / denom;
    let beta = ((p3.y - p1.y) * (point.x - p3.x) + (p1.x - p3.x) * (point.y - p3.y)) / denom;
    let gamma = 1.0 - alpha - beta;
    alpha > 0.0 && beta > 0.0 && gamma > 0.0
}

/// 每像素位数，未知格式返回 0
pub fn bits_per_pixel(format: i32) -> i32 {
    match format {
        UNCOMPRESSED_GRAYSCALE => 8,
        UNCOMPRESSED_GRAY_ALPHA
        | UNCOMPRESSED_R5G6B5
        | UNCOMPRESSED_R5G5B5A1
        | UNCOMPRESSED_R4G4B4A4 => 16,
        UNCOMPRESSED_R8G8B8A8 | UNCOMPRESSED_R32 => 32,
        UNCOMPRESSED_R8G8B8 => 24,
        UNCOMPRESSED_R32G32B32 => 96,
        UNCOMPRESSED_R32G32B32A32 => 128,
        COMPRESSED_DXT1_RGB
        | COMPRESSED_DXT1_RGBA
        | COMPRESSED_ETC1_RGB
        | COMPRESSED_ETC2_RGB
        | COMPRESSED_PVRT_RGB
        | COMPRESSED_PVRT_RGBA => 4,
        COMPRESSED_DXT3_RGBA
        | COMPRESSED_DXT5_RGBA
        | COMPRESSED_ETC2_EAC_RGBA
        | COMPRESSED_ASTC_4X4_RGBA => 8,
        COMPRESSED_ASTC_8X8_RGBA => 2,
        _ => 0,
    }
}

/// 指定尺寸与格式的像素数据字节数
pub fn get_pixel_data_size(width: i32, height: i32, format: i32) -> i32 {
    width.saturating_mul(height).saturating_mul(bits_per_pixel(format)) / 8
}

/// 相机视图矩阵
pub fn camera_view(camera: &Camera3D) -> Matrix {
    Matrix::look_at_rh(camera.position, camera.target, camera.up)
}

/// 相机投影矩阵
pub fn camera_projection(camera: &Camera3D, aspect: f32) -> Matrix {
    if camera.projection == CAMERA_ORTHOGRAPHIC {
        let top = camera.fovy / 2.0;
        let right = top * aspect;
        Matrix::orthographic_rh_gl(-right, right, -top, top, CULL_DISTANCE_NEAR, CULL_DISTANCE_FAR)
    } else {
        Matrix::perspective_rh_gl(
            camera.fovy.to_radians(),
            aspect,
            CULL_DISTANCE_NEAR,
            CULL_DISTANCE_FAR,
        )
    }
}

fn unproject(source: Vector3, inverse_view_proj: &Matrix) -> Vector3 {
    let p = *inverse_view_proj * source.extend(1.0);
    p.xyz() / p.w
}

/// 从屏幕坐标发出的拾取射线
pub fn get_mouse_ray(mouse: Vector2, camera: &Camera3D, width: i32, height: i32) -> Ray {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let x = 2.0 * mouse.x / w - 1.0;
    let y = 1.0 - 2.0 * mouse.y / h;

    let view = camera_view(camera);
    let proj = camera_projection(camera, w / h);
    let inverse = (proj * view).inverse();

    let near_point = unproject(Vector3::new(x, y, 0.0), &inverse);
    let far_point = unproject(Vector3::new(x, y, 1.0), &inverse);
    let direction = (far_point - near_point).normalize_or_zero();

    let position = if camera.projection == CAMERA_ORTHOGRAPHIC {
        unproject(Vector3::new(x, y, -1.0), &inverse)
    } else {
        camera.position
    };
    Ray { position, direction }
}

/// 世界坐标投影到屏幕坐标
pub fn get_world_to_screen(position: Vector3, camera: &Camera3D, width: i32, height: i32) -> Vector2 {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let clip = camera_projection(camera, w / h) * camera_view(camera) * position.extend(1.0);
    let ndc = clip.xyz() / clip.w;
    Vector2::new((ndc.x + 1.0) / 2.0 * w, (-ndc.y + 1.0) / 2.0 * h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_int_and_back() {
        let c = Color::new(255, 0, 128, 64);
        assert_eq!(get_color(color_to_int(c)), c);
        assert_eq!(color_to_int(Color::new(255, 255, 255, 255)), -1);
    }

    #[test]
    fn test_hsv_primary_colors() {
        let red = color_to_hsv(Color::new(255, 0, 0, 255));
        assert_eq!(red, Vector3::new(0.0, 1.0, 1.0));

        let blue = color_to_hsv(Color::new(0, 0, 255, 255));
        assert!((blue.x - 240.0).abs() < 1e-4);

        assert_eq!(color_from_hsv(Vector3::new(120.0, 1.0, 1.0)), Color::new(0, 255, 0, 255));
        assert_eq!(color_from_hsv(Vector3::new(0.0, 0.0, 1.0)), Color::new(255, 255, 255, 255));
    }

    #[test]
    fn test_gray_has_no_hue() {
        let hsv = color_to_hsv(Color::new(128, 128, 128, 255));
        assert_eq!(hsv.x, 0.0);
        assert_eq!(hsv.y, 0.0);
    }

    #[test]
    fn test_fade_clamps() {
        let c = Color::new(10, 20, 30, 255);
        assert_eq!(fade(c, 0.5).a, 127);
        assert_eq!(fade(c, 2.0).a, 255);
        assert_eq!(fade(c, -1.0).a, 0);
    }

    #[test]
    fn test_rec_collisions() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 5.0, 10.0, 10.0);
        let c = Rectangle::new(20.0, 20.0, 1.0, 1.0);
        assert!(check_collision_recs(a, b));
        assert!(!check_collision_recs(a, c));
        assert_eq!(get_collision_rec(a, b), Rectangle::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(get_collision_rec(a, c), Rectangle::default());
    }

    #[test]
    fn test_point_collisions() {
        let rec = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(check_collision_point_rec(Vector2::new(10.0, 10.0), rec));
        assert!(!check_collision_point_rec(Vector2::new(10.1, 5.0), rec));

        assert!(check_collision_point_circle(Vector2::new(3.0, 4.0), Vector2::ZERO, 5.0));
        assert!(!check_collision_point_circle(Vector2::new(3.0, 4.1), Vector2::ZERO, 5.0));

        let (p1, p2, p3) = (Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), Vector2::new(0.0, 10.0));
        assert!(check_collision_point_triangle(Vector2::new(2.0, 2.0), p1, p2, p3));
        assert!(!check_collision_point_triangle(Vector2::new(8.0, 8.0), p1, p2, p3));
    }

    #[test]
    fn test_circle_rec() {
        let rec = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(check_collision_circle_rec(Vector2::new(12.0, 5.0), 3.0, rec));
        assert!(!check_collision_circle_rec(Vector2::new(14.0, 14.0), 3.0, rec));
    }

    #[test]
    fn test_pixel_data_size() {
        assert_eq!(get_pixel_data_size(4, 4, UNCOMPRESSED_R8G8B8A8), 64);
        assert_eq!(get_pixel_data_size(4, 4, UNCOMPRESSED_GRAYSCALE), 16);
        assert_eq!(get_pixel_data_size(4, 4, COMPRESSED_DXT1_RGB), 8);
        assert_eq!(get_pixel_data_size(4, 4, 99), 0);
    }

    #[test]
    fn test_world_to_screen_center() {
        let camera = Camera3D {
            position: Vector3::new(0.0, 0.0, 10.0),
            target: Vector3::ZERO,
            ..Camera3D::default()
        };
        let screen = get_world_to_screen(Vector3::ZERO, &camera, 800, 600);
        assert!((screen.x - 400.0).abs() < 1e-3);
        assert!((screen.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_mouse_ray_through_center() {
        let camera = Camera3D {
            position: Vector3::new(0.0, 0.0, 10.0),
            target: Vector3::ZERO,
            ..Camera3D::default()
        };
        let ray = get_mouse_ray(Vector2::new(400.0, 300.0), &camera, 800, 600);
        assert_eq!(ray.position, camera.position);
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).length() < 1e-3);
    }
}
