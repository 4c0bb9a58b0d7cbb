//! CPU 侧图像与纹理存储
//!
//! 图像像素统一保存为 RGBA8（`image::RgbaImage`），`Image.data` 是存储键；
//! 纹理 id 从 1 开始分配，0 保留为加载失败。

use crate::raylib::consts::*;
use crate::raylib::math::get_pixel_data_size;
use crate::raylib::types::{Color, DataPtr, Image, Rectangle, RenderTexture2D, Texture2D};
use image::RgbaImage;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 资源错误（headless 后端内部使用，对脚本只表现为日志 + 空值）
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Format(String),

    #[error("{0} not found")]
    Missing(String),
}

pub type AssetResult<T> = Result<T, AssetError>;

#[derive(Debug, Default)]
pub struct AssetStore {
    images: HashMap<usize, RgbaImage>,
    next_image: usize,
    textures: HashMap<u32, RgbaImage>,
    render_targets: HashMap<u32, RenderTexture2D>,
    next_id: u32,
}

impl AssetStore {
    pub fn new() -> Self {
        Self {
            next_image: 1,
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---- images ----

    pub fn insert_image(&mut self, pixels: RgbaImage, format: i32) -> Image {
        let key = self.next_image;
        self.next_image += 1;
        let image = Image {
            data: DataPtr(key),
            width: pixels.width() as i32,
            height: pixels.height() as i32,
            mipmaps: 1,
            format,
        };
        self.images.insert(key, pixels);
        image
    }

    pub fn image(&self, image: &Image) -> AssetResult<&RgbaImage> {
        self.images
            .get(&image.data.0)
            .ok_or_else(|| AssetError::Missing(format!("image data {:#x}", image.data.0)))
    }

    pub fn remove_image(&mut self, image: &Image) -> bool {
        self.images.remove(&image.data.0).is_some()
    }

    pub fn load_image(&mut self, path: &Path) -> AssetResult<Image> {
        let pixels = image::open(path)?.to_rgba8();
        Ok(self.insert_image(pixels, UNCOMPRESSED_R8G8B8A8))
    }

    pub fn load_image_ex(&mut self, pixels: &[Color], width: i32, height: i32) -> AssetResult<Image> {
        let (w, h) = dimensions(width, height)?;
        let count = (w * h) as usize;
        if pixels.len() < count {
            return Err(AssetError::Format(format!(
                "{} pixels given for a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        let bytes = bytemuck::cast_slice::<Color, u8>(&pixels[..count]).to_vec();
        let rgba = RgbaImage::from_raw(w, h, bytes)
            .ok_or_else(|| AssetError::Format("pixel buffer size mismatch".to_string()))?;
        Ok(self.insert_image(rgba, UNCOMPRESSED_R8G8B8A8))
    }

    pub fn load_image_raw(
        &mut self,
        path: &Path,
        width: i32,
        height: i32,
        format: i32,
        header_size: i32,
    ) -> AssetResult<Image> {
        let bytes = fs::read(path)?;
        let header = usize::try_from(header_size).unwrap_or(0);
        let body = bytes.get(header..).unwrap_or(&[]);
        let rgba = decode_raw(body, width, height, format)?;
        Ok(self.insert_image(rgba, format))
    }

    pub fn solid_image(&mut self, width: i32, height: i32, color: Color) -> AssetResult<Image> {
        let (w, h) = dimensions(width, height)?;
        let rgba = RgbaImage::from_pixel(w, h, image::Rgba([color.r, color.g, color.b, color.a]));
        Ok(self.insert_image(rgba, UNCOMPRESSED_R8G8B8A8))
    }

    /// 从图像中裁剪一块作为新图像（raylib ImageFromImage）
    pub fn crop(&mut self, source: &RgbaImage, rec: Rectangle) -> Image {
        let x = rec.x.max(0.0) as u32;
        let y = rec.y.max(0.0) as u32;
        let w = (rec.width.max(0.0) as u32).min(source.width().saturating_sub(x));
        let h = (rec.height.max(0.0) as u32).min(source.height().saturating_sub(y));
        let view = image::imageops::crop_imm(source, x, y, w, h).to_image();
        self.insert_image(view, UNCOMPRESSED_R8G8B8A8)
    }

    pub fn image_colors(&self, image: &Image) -> AssetResult<Vec<Color>> {
        let rgba = self.image(image)?;
        Ok(bytemuck::cast_slice::<u8, Color>(rgba.as_raw()).to_vec())
    }

    pub fn export_image(&self, image: &Image, path: &Path) -> AssetResult<()> {
        let rgba = self.image(image)?;
        let is_raw = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("raw"));
        if is_raw {
            fs::write(path, rgba.as_raw())?;
        } else {
            rgba.save(path)?;
        }
        Ok(())
    }

    /// 导出为 C 头文件，像素以字节数组形式写出
    pub fn export_image_as_code(&self, image: &Image, path: &Path) -> AssetResult<()> {
        let rgba = self.image(image)?;
        let name: String = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        let data = rgba.as_raw();

        let mut out = String::new();
        let rule = "/".repeat(88);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "//{:84}//", "");
        let _ = writeln!(out, "// {:82} //", "ImageAsCode exporter v1.0 - Image pixel data exported as an array of bytes");
        let _ = writeln!(out, "//{:84}//", "");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "// Image data information");
        let _ = writeln!(out, "#define {name}_WIDTH    {}", rgba.width());
        let _ = writeln!(out, "#define {name}_HEIGHT   {}", rgba.height());
        let _ = writeln!(out, "#define {name}_FORMAT   {}          // raylib internal pixel format", UNCOMPRESSED_R8G8B8A8);
        let _ = writeln!(out);
        let _ = write!(out, "static unsigned char {name}_DATA[{}] = {{ ", data.len());
        for (i, byte) in data.iter().enumerate() {
            if i + 1 == data.len() {
                let _ = write!(out, "0x{byte:x}");
            } else if (i + 1) % 20 == 0 {
                let _ = writeln!(out, "0x{byte:x},");
            } else {
                let _ = write!(out, "0x{byte:x}, ");
            }
        }
        let _ = writeln!(out, " }};");

        fs::write(path, out)?;
        Ok(())
    }

    // ---- textures ----

    pub fn texture_from_image(&mut self, image: &Image) -> AssetResult<Texture2D> {
        let pixels = self.image(image)?.clone();
        let mut texture = self.texture_from_pixels(pixels);
        texture.mipmaps = image.mipmaps.max(1);
        Ok(texture)
    }

    pub fn texture_from_pixels(&mut self, pixels: RgbaImage) -> Texture2D {
        let id = self.alloc_id();
        let texture = Texture2D {
            id,
            width: pixels.width() as i32,
            height: pixels.height() as i32,
            mipmaps: 1,
            format: UNCOMPRESSED_R8G8B8A8,
        };
        self.textures.insert(id, pixels);
        texture
    }

    pub fn texture_cubemap(&mut self, image: &Image, layout: i32) -> AssetResult<Texture2D> {
        let pixels = self.image(image)?.clone();
        let (w, h) = (pixels.width() as i32, pixels.height() as i32);
        let size = cubemap_face_size(w, h, layout)
            .ok_or_else(|| AssetError::Format("failed to detect cubemap image layout".to_string()))?;
        let id = self.alloc_id();
        self.textures.insert(id, pixels);
        Ok(Texture2D {
            id,
            width: size,
            height: size,
            mipmaps: 1,
            format: UNCOMPRESSED_R8G8B8A8,
        })
    }

    pub fn render_texture(&mut self, width: i32, height: i32) -> AssetResult<RenderTexture2D> {
        let (w, h) = dimensions(width, height)?;
        let color_id = self.alloc_id();
        self.textures.insert(color_id, RgbaImage::new(w, h));
        let depth_id = self.alloc_id();
        let fbo = self.alloc_id();
        let target = RenderTexture2D {
            id: fbo,
            texture: Texture2D {
                id: color_id,
                width,
                height,
                mipmaps: 1,
                format: UNCOMPRESSED_R8G8B8A8,
            },
            depth: Texture2D {
                id: depth_id,
                width,
                height,
                mipmaps: 1,
                format: 19,
            },
            depth_texture: false,
        };
        self.render_targets.insert(fbo, target);
        Ok(target)
    }

    pub fn has_texture(&self, id: u32) -> bool {
        self.textures.contains_key(&id)
    }

    pub fn unload_texture(&mut self, id: u32) -> bool {
        self.textures.remove(&id).is_some()
    }

    pub fn unload_render_texture(&mut self, target: &RenderTexture2D) -> bool {
        let found = self.render_targets.remove(&target.id).is_some();
        self.textures.remove(&target.texture.id);
        found
    }

    pub fn texture_to_image(&mut self, texture: &Texture2D) -> AssetResult<Image> {
        let pixels = self
            .textures
            .get(&texture.id)
            .ok_or_else(|| AssetError::Missing(format!("texture {}", texture.id)))?
            .clone();
        Ok(self.insert_image(pixels, UNCOMPRESSED_R8G8B8A8))
    }

    pub fn update_texture(&mut self, texture: &Texture2D, bytes: &[u8]) -> AssetResult<()> {
        let rgba = decode_raw(bytes, texture.width, texture.height, texture.format)?;
        let slot = self
            .textures
            .get_mut(&texture.id)
            .ok_or_else(|| AssetError::Missing(format!("texture {}", texture.id)))?;
        *slot = rgba;
        Ok(())
    }
}

/// 单张 RGBA8 图像允许的最大字节数
pub const MAX_IMAGE_BYTES: u64 = 1 << 30;

fn dimensions(width: i32, height: i32) -> AssetResult<(u32, u32)> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(AssetError::Format(format!("invalid image size {}x{}", width, height))),
    };
    match (w as u64).checked_mul(h as u64).and_then(|n| n.checked_mul(4)) {
        Some(bytes) if bytes <= MAX_IMAGE_BYTES => Ok((w, h)),
        _ => Err(AssetError::Format(format!(
            "image size {}x{} exceeds {} bytes",
            width, height, MAX_IMAGE_BYTES
        ))),
    }
}

/// 立方体贴图单面尺寸；自动检测时按宽高比推断布局
pub fn cubemap_face_size(width: i32, height: i32, layout: i32) -> Option<i32> {
    let layout = if layout == CUBEMAP_AUTO_DETECT {
        if width > height {
            if width / 6 == height {
                CUBEMAP_LINE_HORIZONTAL
            } else if width / 4 == height / 3 {
                CUBEMAP_CROSS_FOUR_BY_THREE
            } else if width >= height * 2 {
                CUBEMAP_PANORAMA
            } else {
                return None;
            }
        } else if height > width {
            if height / 6 == width {
                CUBEMAP_LINE_VERTICAL
            } else if width / 3 == height / 4 {
                CUBEMAP_CROSS_THREE_BY_FOUR
            } else {
                return None;
            }
        } else {
            return None;
        }
    } else {
        layout
    };

    let size = match layout {
        CUBEMAP_LINE_VERTICAL => width,
        CUBEMAP_LINE_HORIZONTAL => height,
        CUBEMAP_CROSS_THREE_BY_FOUR => width / 3,
        CUBEMAP_CROSS_FOUR_BY_THREE | CUBEMAP_PANORAMA => width / 4,
        _ => return None,
    };
    (size > 0).then_some(size)
}

/// 把 raylib 未压缩像素格式转换为 RGBA8
pub fn decode_raw(bytes: &[u8], width: i32, height: i32, format: i32) -> AssetResult<RgbaImage> {
    let (w, h) = dimensions(width, height)?;
    let needed = usize::try_from(get_pixel_data_size(width, height, format)).unwrap_or(0);
    if needed == 0 {
        return Err(AssetError::Format(format!("unsupported pixel format {}", format)));
    }
    if bytes.len() < needed {
        return Err(AssetError::Format(format!(
            "expected {} bytes of pixel data, found {}",
            needed,
            bytes.len()
        )));
    }
    let bytes = &bytes[..needed];

    let expand5 = |v: u16| ((v as u32 * 255 + 15) / 31) as u8;
    let expand6 = |v: u16| ((v as u32 * 255 + 31) / 63) as u8;
    let unit = |f: f32| (f.clamp(0.0, 1.0) * 255.0) as u8;
    let words = || bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]]));
    let floats = || bytes.chunks_exact(4).map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]));

    let rgba: Vec<u8> = match format {
        UNCOMPRESSED_GRAYSCALE => bytes.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        UNCOMPRESSED_GRAY_ALPHA => bytes.chunks_exact(2).flat_map(|c| [c[0], c[0], c[0], c[1]]).collect(),
        UNCOMPRESSED_R5G6B5 => words()
            .flat_map(|p| [expand5(p >> 11), expand6((p >> 5) & 0x3F), expand5(p & 0x1F), 255])
            .collect(),
        UNCOMPRESSED_R8G8B8 => bytes.chunks_exact(3).flat_map(|c| [c[0], c[1], c[2], 255]).collect(),
        UNCOMPRESSED_R5G5B5A1 => words()
            .flat_map(|p| {
                [
                    expand5(p >> 11),
                    expand5((p >> 6) & 0x1F),
                    expand5((p >> 1) & 0x1F),
                    if p & 1 == 1 { 255 } else { 0 },
                ]
            })
            .collect(),
        UNCOMPRESSED_R4G4B4A4 => words()
            .flat_map(|p| {
                [
                    ((p >> 12) & 0xF) as u8 * 17,
                    ((p >> 8) & 0xF) as u8 * 17,
                    ((p >> 4) & 0xF) as u8 * 17,
                    (p & 0xF) as u8 * 17,
                ]
            })
            .collect(),
        UNCOMPRESSED_R8G8B8A8 => bytes.to_vec(),
        UNCOMPRESSED_R32 => floats().flat_map(|f| [unit(f), unit(f), unit(f), 255]).collect(),
        UNCOMPRESSED_R32G32B32 => floats()
            .collect::<Vec<_>>()
            .chunks_exact(3)
            .flat_map(|c| [unit(c[0]), unit(c[1]), unit(c[2]), 255])
            .collect(),
        UNCOMPRESSED_R32G32B32A32 => floats()
            .collect::<Vec<_>>()
            .chunks_exact(4)
            .flat_map(|c| [unit(c[0]), unit(c[1]), unit(c[2]), unit(c[3])])
            .collect(),
        _ => {
            return Err(AssetError::Format(format!(
                "compressed pixel format {} is not supported",
                format
            )))
        }
    };

    RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| AssetError::Format("pixel buffer size mismatch".to_string()))
}
