//! 位图字体
//!
//! headless 后端不做 TTF 光栅化，支持以下来源：
//! - BMFont JSON（`.json`，与 msdf-bmfont 输出格式相同）
//! - BMFont 文本（`.fnt`）
//! - 按关键色分隔字形的图像（raylib 的 LoadFontFromImage 规则）
//!
//! 默认字体按 raylib 的 224 个字符、10 像素字号合成。

use super::assets::{AssetError, AssetResult, AssetStore};
use crate::raylib::types::{CharInfo, Color, DataPtr, Font, Rectangle, Vector2};
use image::RgbaImage;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Common {
    #[serde(rename = "lineHeight", default)]
    pub line_height: Option<u32>,
    #[serde(rename = "scaleW")]
    pub scale_w: u32,
    #[serde(rename = "scaleH")]
    pub scale_h: u32,
}

#[derive(Debug, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub face: Option<String>,
    #[serde(default)]
    pub size: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CharEntry {
    pub id: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub xoffset: f32,
    pub yoffset: f32,
    pub xadvance: f32,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FontDoc {
    pub common: Common,
    pub info: Option<Info>,
    #[serde(default)]
    pub pages: Vec<String>,
    pub chars: Vec<CharEntry>,
}

/// 单个字形的度量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub value: i32,
    pub rec: Rectangle,
    pub offset_x: i32,
    pub offset_y: i32,
    pub advance_x: i32,
}

impl From<&CharEntry> for GlyphMetrics {
    fn from(ch: &CharEntry) -> Self {
        Self {
            value: ch.id as i32,
            rec: Rectangle::new(ch.x as f32, ch.y as f32, ch.width as f32, ch.height as f32),
            offset_x: ch.xoffset as i32,
            offset_y: ch.yoffset as i32,
            advance_x: ch.xadvance as i32,
        }
    }
}

/// 字体文件解析结果
#[derive(Debug, Clone)]
pub struct FontMetrics {
    pub base_size: i32,
    pub atlas_size: (u32, u32),
    /// 图集图像（相对字体文件所在目录解析）
    pub page: Option<PathBuf>,
    pub glyphs: Vec<GlyphMetrics>,
}

impl FontMetrics {
    /// 按扩展名选择解析器
    pub fn load(path: &Path) -> AssetResult<Self> {
        let text = fs::read_to_string(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::from_json(&text, dir),
            Some("fnt") => Self::from_bmfont(&text, dir),
            _ => Err(AssetError::Format(
                "only BMFont (.fnt/.json) and image fonts are available without a rasterizer".to_string(),
            )),
        }
    }

    pub fn from_json(data: &str, dir: &Path) -> AssetResult<Self> {
        let doc: FontDoc = serde_json::from_str(data)?;
        let glyphs: Vec<GlyphMetrics> = doc.chars.iter().map(GlyphMetrics::from).collect();
        let base_size = doc
            .common
            .line_height
            .map(|h| h as i32)
            .or_else(|| doc.info.as_ref().and_then(|i| i.size))
            .unwrap_or_else(|| tallest(&glyphs));
        Ok(Self {
            base_size,
            atlas_size: (doc.common.scale_w, doc.common.scale_h),
            page: doc.pages.first().map(|p| dir.join(p)),
            glyphs,
        })
    }

    /// AngelCode BMFont 文本格式
    pub fn from_bmfont(text: &str, dir: &Path) -> AssetResult<Self> {
        let mut base_size = 0;
        let mut atlas_size = (0, 0);
        let mut page = None;
        let mut glyphs = Vec::new();

        for line in text.lines() {
            let (tag, rest) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
            let fields = bmfont_fields(rest);
            let int = |key: &str| fields.get(key).and_then(|v| v.parse::<i32>().ok()).unwrap_or(0);
            match tag {
                "common" => {
                    base_size = int("lineHeight");
                    atlas_size = (int("scaleW").max(0) as u32, int("scaleH").max(0) as u32);
                }
                "page" if page.is_none() => {
                    page = fields.get("file").map(|f| dir.join(f));
                }
                "char" => glyphs.push(GlyphMetrics {
                    value: int("id"),
                    rec: Rectangle::new(
                        int("x") as f32,
                        int("y") as f32,
                        int("width") as f32,
                        int("height") as f32,
                    ),
                    offset_x: int("xoffset"),
                    offset_y: int("yoffset"),
                    advance_x: int("xadvance"),
                }),
                _ => {}
            }
        }

        if glyphs.is_empty() {
            return Err(AssetError::Format("no char entries in BMFont file".to_string()));
        }
        if base_size <= 0 {
            base_size = tallest(&glyphs);
        }
        Ok(Self {
            base_size,
            atlas_size,
            page,
            glyphs,
        })
    }

    /// 只保留请求的字符；空列表表示全部保留
    pub fn retain_chars(&mut self, chars: &[i32]) {
        if !chars.is_empty() {
            self.glyphs.retain(|g| chars.contains(&g.value));
        }
    }

    /// 读取图集；缺失时用透明图像代替
    pub fn atlas(&self) -> RgbaImage {
        if let Some(page) = &self.page {
            match image::open(page) {
                Ok(img) => return img.to_rgba8(),
                Err(e) => {
                    tracing::warn!(target: "raylib", page = %page.display(), "Font atlas unavailable: {}", e)
                }
            }
        }
        let (w, h) = self.atlas_size;
        let right = self.glyphs.iter().map(|g| (g.rec.x + g.rec.width) as u32).max().unwrap_or(1);
        let bottom = self.glyphs.iter().map(|g| (g.rec.y + g.rec.height) as u32).max().unwrap_or(1);
        RgbaImage::new(w.max(right).max(1), h.max(bottom).max(1))
    }
}

fn tallest(glyphs: &[GlyphMetrics]) -> i32 {
    glyphs.iter().map(|g| g.rec.height as i32).max().unwrap_or(0)
}

/// `key=value` 对，值可以带引号
fn bmfont_fields(rest: &str) -> HashMap<&str, &str> {
    let mut fields = HashMap::new();
    let mut s = rest.trim_start();
    while let Some(eq) = s.find('=') {
        let key = s[..eq].trim();
        let after = &s[eq + 1..];
        let (value, next) = if let Some(quoted) = after.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => (&quoted[..end], &quoted[end + 1..]),
                None => (quoted, ""),
            }
        } else {
            match after.find(char::is_whitespace) {
                Some(end) => (&after[..end], &after[end..]),
                None => (after, ""),
            }
        };
        fields.insert(key, value);
        s = next.trim_start();
    }
    fields
}

/// 按关键色扫描字形网格
///
/// 图像左上角的关键色区域决定字间距与行间距；每行字形之间用关键色分隔。
pub fn scan_glyph_grid(pixels: &RgbaImage, key: Color, first_char: i32) -> Vec<GlyphMetrics> {
    const MAX_GLYPHS: usize = 256;
    let (width, height) = (pixels.width() as usize, pixels.height() as usize);
    let key = [key.r, key.g, key.b, key.a];
    // 越界按关键色处理
    let is_key = |x: usize, y: usize| x >= width || y >= height || pixels.get_pixel(x as u32, y as u32).0 == key;

    let mut char_spacing = 0;
    let mut line_spacing = 0;
    'outer: for y in 0..height {
        for x in 0..width {
            if !is_key(x, y) {
                char_spacing = x;
                line_spacing = y;
                break 'outer;
            }
        }
    }

    let mut char_height = 0;
    while !is_key(char_spacing, line_spacing + char_height) {
        char_height += 1;
    }
    if char_height == 0 {
        return Vec::new();
    }

    let mut glyphs = Vec::new();
    let mut line = 0;
    while line_spacing + line * (char_height + line_spacing) < height {
        let y = line_spacing + line * (char_height + line_spacing);
        let mut x = char_spacing;
        while x < width && !is_key(x, y) && glyphs.len() < MAX_GLYPHS {
            let mut char_width = 0;
            while !is_key(x + char_width, y) {
                char_width += 1;
            }
            glyphs.push(GlyphMetrics {
                value: first_char + glyphs.len() as i32,
                rec: Rectangle::new(x as f32, y as f32, char_width as f32, char_height as f32),
                offset_x: 0,
                offset_y: 0,
                advance_x: 0,
            });
            x += char_width + char_spacing.max(1);
        }
        line += 1;
    }
    glyphs
}

/// 把关键色像素替换为透明
pub fn clear_key_color(pixels: &mut RgbaImage, key: Color) {
    let key = [key.r, key.g, key.b, key.a];
    for pixel in pixels.pixels_mut() {
        if pixel.0 == key {
            pixel.0 = [0, 0, 0, 0];
        }
    }
}

pub const DEFAULT_FONT_SIZE: i32 = 10;
pub const DEFAULT_FONT_CHARS: i32 = 224;
const DEFAULT_ATLAS_SIZE: u32 = 128;
/// 生成图集的边长上限，超出的字形不再排布
const MAX_ATLAS_SIZE: i64 = 8192;

fn default_glyph_width(c: char) -> i32 {
    match c {
        'i' | 'l' | '!' | '\'' | '.' | ',' | ':' | ';' | '|' => 2,
        'I' | 'j' | 't' | '(' | ')' | '[' | ']' | '`' => 3,
        ' ' => 4,
        'm' | 'w' | 'M' | 'W' | '@' => 7,
        _ => 5,
    }
}

/// 默认字体的字形布局（32 起的 224 个字符）
pub fn default_glyphs() -> Vec<GlyphMetrics> {
    let mut glyphs = Vec::with_capacity(DEFAULT_FONT_CHARS as usize);
    let (mut x, mut y) = (1, 1);
    for value in 32..32 + DEFAULT_FONT_CHARS {
        let width = char::from_u32(value as u32).map(default_glyph_width).unwrap_or(5);
        if x + width + 1 > DEFAULT_ATLAS_SIZE as i32 {
            x = 1;
            y += DEFAULT_FONT_SIZE + 1;
        }
        glyphs.push(GlyphMetrics {
            value,
            rec: Rectangle::new(x as f32, y as f32, width as f32, DEFAULT_FONT_SIZE as f32),
            offset_x: 0,
            offset_y: 0,
            advance_x: 0,
        });
        x += width + 1;
    }
    glyphs
}

pub fn default_atlas() -> RgbaImage {
    let mut atlas = RgbaImage::new(DEFAULT_ATLAS_SIZE, DEFAULT_ATLAS_SIZE);
    for glyph in default_glyphs() {
        let rec = glyph.rec;
        for y in rec.y as u32..(rec.y + rec.height) as u32 {
            for x in rec.x as u32..(rec.x + rec.width) as u32 {
                atlas.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
            }
        }
    }
    atlas
}

/// 已加载字体的字形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub info: CharInfo,
    pub rec: Rectangle,
}

/// 找不到码位时返回 0
pub fn glyph_index(glyphs: &[Glyph], codepoint: i32) -> usize {
    glyphs
        .iter()
        .position(|g| g.info.value == codepoint)
        .unwrap_or(0)
}

/// 文本尺寸，多行文本按 1.5 倍行高累加
pub fn measure(glyphs: &[Glyph], base_size: i32, text: &str, font_size: f32, spacing: f32) -> Vector2 {
    if glyphs.is_empty() {
        return Vector2::ZERO;
    }
    let base = base_size.max(1) as f32;
    let scale = font_size / base;

    let (mut width, mut max_width, mut height) = (0.0f32, 0.0f32, base);
    let (mut line_len, mut max_len) = (0usize, 0usize);
    for ch in text.chars() {
        line_len += 1;
        if ch == '\n' {
            max_width = max_width.max(width);
            width = 0.0;
            line_len = 0;
            height += base * 1.5;
        } else {
            let glyph = &glyphs[glyph_index(glyphs, ch as i32)];
            width += if glyph.info.advance_x != 0 {
                glyph.info.advance_x as f32
            } else {
                glyph.rec.width + glyph.info.offset_x as f32
            };
        }
        max_len = max_len.max(line_len);
    }
    max_width = max_width.max(width);

    Vector2::new(
        max_width * scale + max_len.saturating_sub(1) as f32 * spacing,
        height * scale,
    )
}

/// 按行排布字形生成图集，返回图集与每个字形的矩形
pub fn pack_atlas(glyphs: &[&RgbaImage], font_size: i32, padding: i32) -> (RgbaImage, Vec<Rectangle>) {
    let font_size = font_size.max(1) as i64;
    let padding = padding.max(0) as i64;

    let area: f64 = glyphs
        .iter()
        .map(|g| ((g.width() as i64 + 2 * padding) * (font_size + 2 * padding)) as f64)
        .sum();
    let guess = (area.sqrt() * 1.3).max(1.0);
    let size = (2f64.powf(guess.log2().ceil()) as i64).min(MAX_ATLAS_SIZE);

    let mut atlas = RgbaImage::new(size as u32, size as u32);
    let mut recs = Vec::with_capacity(glyphs.len());
    let (mut x, mut y) = (padding, padding);
    for glyph in glyphs {
        let w = glyph.width() as i64;
        image::imageops::replace(&mut atlas, *glyph, x, y);
        recs.push(Rectangle::new(x as f32, y as f32, w as f32, glyph.height() as f32));

        x += w + 2 * padding;
        if x >= size - w - padding {
            x = padding;
            y += font_size + padding;
            if y > size - font_size - padding {
                break;
            }
        }
    }
    if recs.len() < glyphs.len() {
        tracing::warn!(target: "raylib", placed = recs.len(), total = glyphs.len(), "Font atlas too small");
        recs.resize(glyphs.len(), Rectangle::default());
    }
    (atlas, recs)
}

/// 字体字形表，`Font.chars` / `Font.recs` 是存储键
#[derive(Debug, Default)]
pub struct FontStore {
    fonts: HashMap<usize, Vec<Glyph>>,
    next: usize,
    default: Option<Font>,
}

impl FontStore {
    pub fn new() -> Self {
        Self {
            next: 1,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn glyphs(&self, font: &Font) -> Option<&[Glyph]> {
        self.fonts.get(&font.chars.0).map(Vec::as_slice)
    }

    pub fn is_default(&self, font: &Font) -> bool {
        self.default.is_some_and(|d| d.texture.id == font.texture.id)
    }

    /// 由图集与字形度量建立字体：上传纹理并为每个字形裁剪位图
    pub fn build(
        &mut self,
        assets: &mut AssetStore,
        base_size: i32,
        atlas: RgbaImage,
        metrics: &[GlyphMetrics],
    ) -> Font {
        let glyphs: Vec<Glyph> = metrics
            .iter()
            .map(|m| Glyph {
                info: CharInfo {
                    value: m.value,
                    offset_x: m.offset_x,
                    offset_y: m.offset_y,
                    advance_x: m.advance_x,
                    image: assets.crop(&atlas, m.rec),
                },
                rec: m.rec,
            })
            .collect();
        let texture = assets.texture_from_pixels(atlas);

        let key = self.next;
        self.next += 1;
        let count = glyphs.len() as i32;
        self.fonts.insert(key, glyphs);
        Font {
            base_size,
            chars_count: count,
            texture,
            recs: DataPtr(key),
            chars: DataPtr(key),
        }
    }

    pub fn default_font(&mut self, assets: &mut AssetStore) -> Font {
        if let Some(font) = self.default {
            return font;
        }
        let font = self.build(assets, DEFAULT_FONT_SIZE, default_atlas(), &default_glyphs());
        tracing::info!(target: "raylib", "FONT: Default font loaded successfully");
        self.default = Some(font);
        font
    }

    /// 卸载字体；默认字体不会被卸载
    pub fn unload(&mut self, assets: &mut AssetStore, font: &Font) -> bool {
        if self.is_default(font) {
            return false;
        }
        let Some(glyphs) = self.fonts.remove(&font.chars.0) else {
            return false;
        };
        for glyph in &glyphs {
            assets.remove_image(&glyph.info.image);
        }
        assets.unload_texture(font.texture.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raylib::consts::MAGENTA;

    const FNT: &str = r#"info face="Open Sans" size=32 bold=0
common lineHeight=36 base=29 scaleW=256 scaleH=256 pages=1
page id=0 file="atlas.png"
chars count=2
char id=65 x=0 y=0 width=20 height=24 xoffset=1 yoffset=5 xadvance=21 page=0 chnl=15
char id=66 x=21 y=0 width=18 height=24 xoffset=2 yoffset=5 xadvance=19 page=0 chnl=15
"#;

    #[test]
    fn test_parse_bmfont_text() {
        let metrics = FontMetrics::from_bmfont(FNT, Path::new("fonts")).unwrap();
        assert_eq!(metrics.base_size, 36);
        assert_eq!(metrics.atlas_size, (256, 256));
        assert_eq!(metrics.page, Some(PathBuf::from("fonts/atlas.png")));
        assert_eq!(metrics.glyphs.len(), 2);
        assert_eq!(metrics.glyphs[1].value, 66);
        assert_eq!(metrics.glyphs[1].advance_x, 19);
    }

    #[test]
    fn test_parse_json_font() {
        let json = r#"{
            "pages": ["atlas.png"],
            "common": { "lineHeight": 20, "scaleW": 64, "scaleH": 64 },
            "info": { "face": "mono", "size": 16 },
            "chars": [
                { "id": 97, "x": 0, "y": 0, "width": 8, "height": 12,
                  "xoffset": 0, "yoffset": 2, "xadvance": 9 }
            ]
        }"#;
        let mut metrics = FontMetrics::from_json(json, Path::new("")).unwrap();
        assert_eq!(metrics.base_size, 20);
        assert_eq!(metrics.glyphs[0].value, 'a' as i32);
        metrics.retain_chars(&['b' as i32]);
        assert!(metrics.glyphs.is_empty());
    }

    #[test]
    fn test_scan_glyph_grid() {
        // 1px magenta border, two glyphs of widths 2 and 3, height 2
        let mut img = RgbaImage::from_pixel(8, 4, image::Rgba([255, 0, 255, 255]));
        for (x0, w) in [(1u32, 2u32), (4, 3)] {
            for x in x0..x0 + w {
                for y in 1..3 {
                    img.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
                }
            }
        }
        let glyphs = scan_glyph_grid(&img, MAGENTA, 32);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].rec, Rectangle::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(glyphs[1].rec, Rectangle::new(4.0, 1.0, 3.0, 2.0));
        assert_eq!(glyphs[1].value, 33);

        clear_key_color(&mut img, MAGENTA);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_measure_default_font() {
        let mut assets = AssetStore::new();
        let mut store = FontStore::new();
        let font = store.default_font(&mut assets);
        assert_eq!(font.chars_count, DEFAULT_FONT_CHARS);
        assert_eq!(store.default_font(&mut assets), font);

        let glyphs = store.glyphs(&font).unwrap();
        // "ab": 5 + 5 at size 10, spacing 1 between the two glyphs
        let size = measure(glyphs, font.base_size, "ab", 10.0, 1.0);
        assert_eq!(size, Vector2::new(11.0, 10.0));
        let size = measure(glyphs, font.base_size, "ab\na", 20.0, 2.0);
        assert_eq!(size.y, 50.0);
        assert_eq!(measure(glyphs, font.base_size, "", 10.0, 1.0).x, 0.0);

        assert!(!store.unload(&mut assets, &font));
    }

    #[test]
    fn test_pack_atlas() {
        let a = RgbaImage::from_pixel(4, 8, image::Rgba([1, 2, 3, 4]));
        let b = RgbaImage::from_pixel(6, 8, image::Rgba([5, 6, 7, 8]));
        let (atlas, recs) = pack_atlas(&[&a, &b], 8, 1);
        assert!(atlas.width().is_power_of_two());
        assert_eq!(recs[0], Rectangle::new(1.0, 1.0, 4.0, 8.0));
        assert_eq!(atlas.get_pixel(1, 1).0, [1, 2, 3, 4]);
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_pack_atlas_size_is_capped() {
        let a = RgbaImage::from_pixel(4, 8, image::Rgba([1, 2, 3, 4]));
        let (atlas, recs) = pack_atlas(&[&a, &a, &a], i32::MAX, 1);
        assert_eq!(atlas.width() as i64, MAX_ATLAS_SIZE);
        assert_eq!(recs.len(), 3);
    }
}
