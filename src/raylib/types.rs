//! raylib 原生结构体
//!
//! 向量与矩阵直接使用 glam 类型（内存布局与 raylib 一致，矩阵除外，
//! 见 `ffi` 模块中的转置）。其余结构体按 raylib 2.6 的字段顺序定义。

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

pub type Vector2 = glam::Vec2;
pub type Vector3 = glam::Vec3;
pub type Vector4 = glam::Vec4;
/// 列主序 4x4 矩阵
pub type Matrix = glam::Mat4;

/// RGBA 颜色，每通道 8 位
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从 `0xRRGGBBAA` 构造
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 24) as u8,
            g: (hex >> 16) as u8,
            b: (hex >> 8) as u8,
            a: hex as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }
}

/// 轴对齐矩形
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// 2D 相机
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Camera2D {
    /// 相机偏移（屏幕空间原点）
    pub offset: Vector2,
    /// 相机目标（旋转与缩放的中心）
    pub target: Vector2,
    /// 旋转角度（度）
    pub rotation: f32,
    /// 缩放，默认 1.0
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            offset: Vector2::ZERO,
            target: Vector2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

/// 3D 相机
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Camera3D {
    pub position: Vector3,
    pub target: Vector3,
    pub up: Vector3,
    /// 透视投影时为垂直视角（度），正交投影时为视口高度
    pub fovy: f32,
    /// `CAMERA_PERSPECTIVE` 或 `CAMERA_ORTHOGRAPHIC`
    pub projection: i32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 10.0, 10.0),
            target: Vector3::ZERO,
            up: Vector3::Y,
            fovy: 45.0,
            projection: 0,
        }
    }
}

/// 射线
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Ray {
    pub position: Vector3,
    pub direction: Vector3,
}

/// 原生库持有的数据指针
///
/// 真实后端中是 C 指针的地址，headless 后端中是内部存储的键。
/// 值为 0 表示空。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct DataPtr(pub usize);

impl DataPtr {
    pub const NULL: DataPtr = DataPtr(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// CPU 侧图像
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Image {
    pub data: DataPtr,
    pub width: i32,
    pub height: i32,
    pub mipmaps: i32,
    /// 像素格式（`PixelFormat` 常量）
    pub format: i32,
}

impl Image {
    pub fn is_empty(&self) -> bool {
        self.data.is_null() || self.width <= 0 || self.height <= 0
    }
}

/// GPU 纹理
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture2D {
    /// OpenGL 纹理 id，0 表示加载失败
    pub id: u32,
    pub width: i32,
    pub height: i32,
    pub mipmaps: i32,
    pub format: i32,
}

pub type TextureCubemap = Texture2D;

/// 渲染目标
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderTexture2D {
    /// 帧缓冲 id
    pub id: u32,
    pub texture: Texture2D,
    pub depth: Texture2D,
    pub depth_texture: bool,
}

/// 字形信息
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharInfo {
    /// Unicode 码位
    pub value: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub advance_x: i32,
    /// 字形位图
    pub image: Image,
}

/// 字体：图集纹理 + 字形表
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Font {
    pub base_size: i32,
    pub chars_count: i32,
    pub texture: Texture2D,
    /// 图集中每个字形的矩形
    pub recs: DataPtr,
    /// 字形信息数组
    pub chars: DataPtr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let c = Color::from_hex(0x11223344);
        assert_eq!(c, Color::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(c.to_hex(), 0x11223344);
    }

    #[test]
    fn test_pod_layouts() {
        assert_eq!(std::mem::size_of::<Color>(), 4);
        assert_eq!(std::mem::size_of::<Camera2D>(), 24);
        assert_eq!(std::mem::size_of::<Camera3D>(), 44);
        assert_eq!(std::mem::size_of::<Ray>(), 24);
    }
}
