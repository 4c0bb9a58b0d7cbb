//! Shims for raylib's text module: font loading, glyph data, text drawing and
//! measurement.

use super::decode::CallContext;
use super::registry::{FunctionTable, Module};
use super::value::ScriptValue;
use crate::core::error::BridgeResult;
use crate::raylib::{CharInfo, Color, Font, Image, Raylib, Rectangle, Vector2};

const UNDEFINED: ScriptValue = ScriptValue::Undefined;

/// `chars, count` pair; a zero count or missing array selects the default set.
fn char_list<R: Raylib>(cx: &CallContext<'_, R>, chars: usize, count: usize) -> BridgeResult<Vec<i32>> {
    let n = cx.count(count)?;
    if n == 0 || cx.is_nullish(chars) {
        return Ok(Vec::new());
    }
    cx.int_list(chars, Some(n))
}

pub(super) fn register<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Text;

    // loading
    table.register(m, "getFontDefault", 0, |cx| {
        let font = cx.rl().get_font_default();
        cx.wrap(font)
    });
    table.register(m, "loadFont", 1, |cx| {
        let file_name = cx.string(0)?;
        let font = cx.rl().load_font(file_name);
        cx.wrap(font)
    });
    table.register(m, "loadFontEx", 4, |cx| {
        let file_name = cx.string(0)?;
        let font_size = cx.int(1)?;
        let chars = char_list(cx, 2, 3)?;
        let font = cx.rl().load_font_ex(file_name, font_size, &chars);
        cx.wrap(font)
    });
    table.register(m, "loadFontFromImage", 3, |cx| {
        let image = cx.arg::<Image>(0)?;
        let key = cx.arg::<Color>(1)?;
        let first_char = cx.int(2)?;
        let font = cx.rl().load_font_from_image(image, key, first_char);
        cx.wrap(font)
    });
    table.register(m, "loadFontData", 5, |cx| {
        let file_name = cx.string(0)?;
        let font_size = cx.int(1)?;
        let chars = char_list(cx, 2, 3)?;
        let font_type = cx.int(4)?;
        let glyphs = cx
            .rl()
            .load_font_data(file_name, font_size, &chars, font_type);
        cx.wrap_all(glyphs)
    });
    table.register(m, "genImageFontAtlas", 5, |cx| {
        let count = cx.count(1)?;
        let chars = cx.list_n::<CharInfo>(0, count)?;
        let font_size = cx.int(2)?;
        let padding = cx.int(3)?;
        let pack_method = cx.int(4)?;
        let atlas = cx
            .rl()
            .gen_image_font_atlas(&chars, font_size, padding, pack_method);
        cx.wrap(atlas)
    });
    table.register(m, "unloadFont", 1, |cx| {
        cx.unload::<Font>(0, |rl, font| rl.unload_font(font))
    });

    // drawing
    table.register(m, "drawFps", 2, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        cx.rl().draw_fps(x, y);
        Ok(UNDEFINED)
    });
    table.register(m, "drawText", 5, |cx| {
        let text = cx.string(0)?;
        let x = cx.int(1)?;
        let y = cx.int(2)?;
        let font_size = cx.int(3)?;
        let color = cx.color(4)?;
        cx.rl().draw_text(text, x, y, font_size, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawTextEx", 6, |cx| {
        let font = cx.arg::<Font>(0)?;
        let text = cx.string(1)?;
        let position = cx.arg::<Vector2>(2)?;
        let font_size = cx.f32(3)?;
        let spacing = cx.f32(4)?;
        let tint = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_text_ex(font, text, position, font_size, spacing, tint);
        Ok(UNDEFINED)
    });
    table.register(m, "drawTextRec", 7, |cx| {
        let font = cx.arg::<Font>(0)?;
        let text = cx.string(1)?;
        let rec = cx.arg::<Rectangle>(2)?;
        let font_size = cx.f32(3)?;
        let spacing = cx.f32(4)?;
        let word_wrap = cx.truthy(5);
        let tint = cx.arg::<Color>(6)?;
        cx.rl()
            .draw_text_rec(font, text, rec, font_size, spacing, word_wrap, tint);
        Ok(UNDEFINED)
    });
    table.register(m, "drawTextRecEx", 11, |cx| {
        let font = cx.arg::<Font>(0)?;
        let text = cx.string(1)?;
        let rec = cx.arg::<Rectangle>(2)?;
        let font_size = cx.f32(3)?;
        let spacing = cx.f32(4)?;
        let word_wrap = cx.truthy(5);
        let tint = cx.arg::<Color>(6)?;
        let select_start = cx.int(7)?;
        let select_length = cx.int(8)?;
        let select_text = cx.arg::<Color>(9)?;
        let select_back = cx.arg::<Color>(10)?;
        cx.rl().draw_text_rec_ex(
            font,
            text,
            rec,
            font_size,
            spacing,
            word_wrap,
            tint,
            select_start,
            select_length,
            select_text,
            select_back,
        );
        Ok(UNDEFINED)
    });

    // measurement
    table.register(m, "measureText", 2, |cx| {
        let text = cx.string(0)?;
        let font_size = cx.int(1)?;
        Ok(cx.rl().measure_text(text, font_size).into())
    });
    table.register(m, "measureTextEx", 4, |cx| {
        let font = cx.arg::<Font>(0)?;
        let text = cx.string(1)?;
        let font_size = cx.f32(2)?;
        let spacing = cx.f32(3)?;
        let size = cx.rl().measure_text_ex(font, text, font_size, spacing);
        cx.wrap(size)
    });
    table.register(m, "getGlyphIndex", 2, |cx| {
        let font = cx.arg::<Font>(0)?;
        let character = cx.int(1)?;
        Ok(cx.rl().get_glyph_index(font, character).into())
    });
}

#[cfg(test)]
mod tests {
    use crate::bridge::{Bridge, ScriptValue};
    use crate::config::HostConfig;
    use crate::core::error::ErrorKind;
    use crate::raylib::{Font, HeadlessRaylib, Vector2};

    fn bridge() -> Bridge<HeadlessRaylib> {
        let mut bridge = Bridge::new(HeadlessRaylib::new(), &HostConfig::default());
        bridge
            .call(
                "initWindow",
                &[ScriptValue::Int(320), ScriptValue::Int(240), ScriptValue::from("text")],
            )
            .unwrap();
        bridge
    }

    #[test]
    fn test_draw_text_accepts_packed_color() {
        let mut bridge = bridge();
        let args = [
            ScriptValue::from("hi"),
            ScriptValue::Int(1),
            ScriptValue::Int(2),
            ScriptValue::Int(20),
            ScriptValue::Int(0xFF00_00FF),
        ];
        bridge.call("drawText", &args).unwrap();
        let call = bridge.backend().last_call().unwrap();
        assert_eq!(call.name, "DrawText");
        assert!(call.args.contains("r: 255, g: 0, b: 0, a: 255"), "{}", call.args);
    }

    #[test]
    fn test_default_font_measures() {
        let mut bridge = bridge();
        let font = bridge.call("getFontDefault", &[]).unwrap();
        let base = bridge.get::<Font>(font.as_handle().unwrap()).unwrap().base_size;
        let size = bridge
            .call(
                "measureTextEx",
                &[font, ScriptValue::from("ab"), ScriptValue::Int(base.into()), ScriptValue::Int(1)],
            )
            .unwrap();
        let size = bridge.get::<Vector2>(size.as_handle().unwrap()).unwrap();
        assert!(size.x > 0.0);
        assert_eq!(size.y, base as f32);
        assert_eq!(
            bridge
                .call("measureText", &[ScriptValue::from("ab"), ScriptValue::Int(20)])
                .unwrap(),
            ScriptValue::Int(22)
        );
    }

    #[test]
    fn test_load_font_ex_count_larger_than_array() {
        let mut bridge = bridge();
        let args = [
            ScriptValue::from("missing.fnt"),
            ScriptValue::Int(20),
            ScriptValue::from(vec![65i32, 66]),
            ScriptValue::Int(3),
        ];
        let err = bridge.call("loadFontEx", &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(bridge.backend().calls_to("LoadFontEx"), 0);

        let args = [
            ScriptValue::from("missing.fnt"),
            ScriptValue::Int(20),
            ScriptValue::Null,
            ScriptValue::Int(0),
        ];
        let font = bridge.call("loadFontEx", &args).unwrap();
        assert!(font.as_handle().is_some());
    }

    #[test]
    fn test_word_wrap_is_truthiness() {
        let mut bridge = bridge();
        let font = bridge.call("getFontDefault", &[]).unwrap();
        let rec = bridge
            .call(
                "Rectangle",
                &[ScriptValue::Int(0), ScriptValue::Int(0), ScriptValue::Int(50), ScriptValue::Int(50)],
            )
            .unwrap();
        let tint = bridge.wrap(crate::raylib::consts::BLACK).unwrap();
        let args = [
            font,
            ScriptValue::from("wrap me"),
            rec,
            ScriptValue::Int(10),
            ScriptValue::Int(1),
            ScriptValue::from("yes"),
            tint,
        ];
        bridge.call("drawTextRec", &args).unwrap();
        assert!(bridge.backend().last_call().unwrap().args.contains("true"));
    }
}
