//! Shims for raylib's textures module: image and texture loading, unloading,
//! export and pixel access.

use super::registry::{FunctionTable, Module};
use super::value::ScriptValue;
use crate::core::error::{ArgError, BridgeError};
use crate::raylib::{math, Color, Image, Raylib, RenderTexture2D, Texture2D};

pub(super) fn register<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Textures;

    // loading
    table.register(m, "loadImage", 1, |cx| {
        let file_name = cx.string(0)?;
        let image = cx.rl().load_image(file_name);
        cx.wrap(image)
    });
    table.register(m, "loadImageEx", 3, |cx| {
        let width = cx.int(1)?;
        let height = cx.int(2)?;
        let count = cx.count(1)?.saturating_mul(cx.count(2)?);
        let pixels = cx.list_n::<Color>(0, count)?;
        let image = cx.rl().load_image_ex(&pixels, width, height);
        cx.wrap(image)
    });
    table.register(m, "loadImagePro", 4, |_| Err(BridgeError::NotImplemented("loadImagePro")));
    table.register(m, "loadImageRaw", 5, |cx| {
        let file_name = cx.string(0)?;
        let width = cx.int(1)?;
        let height = cx.int(2)?;
        let format = cx.int(3)?;
        let header_size = cx.int(4)?;
        let image = cx
            .rl()
            .load_image_raw(file_name, width, height, format, header_size);
        cx.wrap(image)
    });
    table.register(m, "exportImage", 2, |cx| {
        let image = cx.arg::<Image>(0)?;
        let file_name = cx.string(1)?;
        cx.rl().export_image(image, file_name);
        Ok(ScriptValue::Undefined)
    });
    table.register(m, "exportImageAsCode", 2, |cx| {
        let image = cx.arg::<Image>(0)?;
        let file_name = cx.string(1)?;
        cx.rl().export_image_as_code(image, file_name);
        Ok(ScriptValue::Undefined)
    });
    table.register(m, "loadTexture", 1, |cx| {
        let file_name = cx.string(0)?;
        let texture = cx.rl().load_texture(file_name);
        cx.wrap(texture)
    });
    table.register(m, "loadTextureFromImage", 1, |cx| {
        let image = cx.arg::<Image>(0)?;
        let texture = cx.rl().load_texture_from_image(image);
        cx.wrap(texture)
    });
    table.register(m, "loadTextureCubemap", 2, |cx| {
        let image = cx.arg::<Image>(0)?;
        let layout = cx.int(1)?;
        let cubemap = cx.rl().load_texture_cubemap(image, layout);
        cx.wrap(cubemap)
    });
    table.register(m, "loadRenderTexture", 2, |cx| {
        let width = cx.int(0)?;
        let height = cx.int(1)?;
        let target = cx.rl().load_render_texture(width, height);
        cx.wrap(target)
    });

    // unloading
    table.register(m, "unloadImage", 1, |cx| {
        cx.unload::<Image>(0, |rl, image| rl.unload_image(image))
    });
    table.register(m, "unloadTexture", 1, |cx| {
        cx.unload::<Texture2D>(0, |rl, texture| rl.unload_texture(texture))
    });
    table.register(m, "unloadRenderTexture", 1, |cx| {
        cx.unload::<RenderTexture2D>(0, |rl, target| rl.unload_render_texture(target))
    });

    // pixel data
    table.register(m, "getImageData", 1, |cx| {
        let image = cx.arg::<Image>(0)?;
        let pixels = cx.rl().get_image_data(image);
        cx.wrap_all(pixels)
    });
    table.register(m, "getImageDataNormalized", 1, |cx| {
        let image = cx.arg::<Image>(0)?;
        let pixels = cx.rl().get_image_data_normalized(image);
        cx.wrap_all(pixels)
    });
    table.register(m, "getPixelDataSize", 3, |cx| {
        let width = cx.int(0)?;
        let height = cx.int(1)?;
        let format = cx.int(2)?;
        Ok(cx.rl().get_pixel_data_size(width, height, format).into())
    });
    table.register(m, "getTextureData", 1, |cx| {
        let texture = cx.arg::<Texture2D>(0)?;
        let image = cx.rl().get_texture_data(texture);
        cx.wrap(image)
    });
    table.register(m, "getScreenData", 0, |cx| {
        let image = cx.rl().get_screen_data();
        cx.wrap(image)
    });
    // native code reads width * height pixels of the texture's format
    table.register(m, "updateTexture", 2, |cx| {
        let texture = cx.arg::<Texture2D>(0)?;
        let pixels = cx.byte_list(1)?;
        let needed = math::get_pixel_data_size(texture.width, texture.height, texture.format);
        let needed = usize::try_from(needed).unwrap_or(0);
        if pixels.len() < needed {
            return Err(cx.fail(
                1,
                ArgError::TooShort {
                    expected: needed,
                    found: pixels.len(),
                },
            ));
        }
        cx.rl().update_texture(texture, &pixels);
        Ok(ScriptValue::Undefined)
    });
}

#[cfg(test)]
mod tests {
    use crate::bridge::{Bridge, ScriptValue};
    use crate::config::HostConfig;
    use crate::core::error::{BridgeError, ErrorKind};
    use crate::raylib::consts::*;
    use crate::raylib::{Color, HeadlessRaylib, Image, Texture2D, Vector4};

    fn bridge() -> Bridge<HeadlessRaylib> {
        Bridge::new(HeadlessRaylib::new(), &HostConfig::default())
    }

    fn pixels(bridge: &mut Bridge<HeadlessRaylib>, count: usize) -> ScriptValue {
        ScriptValue::Array(
            (0..count)
                .map(|i| bridge.wrap(Color::new(i as u8, 0, 0, 255)).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_load_image_ex_reads_width_times_height() {
        let mut bridge = bridge();
        let data = pixels(&mut bridge, 6);
        let image = bridge
            .call("loadImageEx", &[data.clone(), ScriptValue::Int(2), ScriptValue::Int(3)])
            .unwrap();
        let image = bridge.get::<Image>(image.as_handle().unwrap()).unwrap();
        assert_eq!((image.width, image.height), (2, 3));

        let err = bridge
            .call("loadImageEx", &[data, ScriptValue::Int(4), ScriptValue::Int(4)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(bridge.backend().calls_to("LoadImageEx"), 1);
    }

    #[test]
    fn test_image_data_is_array_of_handles() {
        let mut bridge = bridge();
        let data = pixels(&mut bridge, 4);
        let image = bridge
            .call("loadImageEx", &[data, ScriptValue::Int(2), ScriptValue::Int(2)])
            .unwrap();
        let colors = bridge.call("getImageData", &[image.clone()]).unwrap();
        let colors = colors.as_array().unwrap();
        assert_eq!(colors.len(), 4);
        assert_eq!(
            bridge.get::<Color>(colors[3].as_handle().unwrap()).unwrap(),
            Color::new(3, 0, 0, 255)
        );

        let normalized = bridge.call("getImageDataNormalized", &[image]).unwrap();
        let first = normalized.as_array().unwrap()[0].as_handle().unwrap();
        assert_eq!(bridge.get::<Vector4>(first).unwrap(), Vector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_load_image_pro_not_implemented() {
        let mut bridge = bridge();
        let data = pixels(&mut bridge, 1);
        let args = [data, ScriptValue::Int(1), ScriptValue::Int(1), ScriptValue::Int(UNCOMPRESSED_R8G8B8A8.into())];
        let err = bridge.call("loadImagePro", &args).unwrap_err();
        assert_eq!(err, BridgeError::NotImplemented("loadImagePro"));
        assert_eq!(bridge.backend().total_calls(), 0);
    }

    #[test]
    fn test_update_texture_checks_length() {
        let mut bridge = bridge();
        let data = pixels(&mut bridge, 4);
        let image = bridge
            .call("loadImageEx", &[data, ScriptValue::Int(2), ScriptValue::Int(2)])
            .unwrap();
        let texture = bridge.call("loadTextureFromImage", &[image]).unwrap();
        assert_eq!(bridge.get::<Texture2D>(texture.as_handle().unwrap()).unwrap().width, 2);

        let short = ScriptValue::from(vec![255i32; 15]);
        assert!(bridge.call("updateTexture", &[texture.clone(), short]).is_err());
        assert_eq!(bridge.backend().calls_to("UpdateTexture"), 0);

        let full = ScriptValue::from(vec![255i32; 16]);
        bridge.call("updateTexture", &[texture, full]).unwrap();
        assert_eq!(bridge.backend().calls_to("UpdateTexture"), 1);
    }

    #[test]
    fn test_unload_twice_then_closed() {
        let mut bridge = bridge();
        let target = bridge
            .call("loadRenderTexture", &[ScriptValue::Int(8), ScriptValue::Int(8)])
            .unwrap();
        bridge.call("unloadRenderTexture", &[target.clone()]).unwrap();
        bridge.call("unloadRenderTexture", &[target.clone()]).unwrap();
        assert_eq!(bridge.backend().calls_to("UnloadRenderTexture"), 2);

        let err = bridge.call("beginTextureMode", &[target]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Handle);
        assert_eq!(bridge.backend().calls_to("BeginTextureMode"), 0);
    }
}
