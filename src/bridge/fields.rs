//! Struct constructors, field access and handle release.
//!
//! Field names follow the raylib C structs in camelCase. Nested structs read
//! through [`getField`] come back as new handles holding a copy; resource
//! handles and matrices cannot be written.

use super::decode::CallContext;
use super::handle::{NativeValue, TypeTag};
use super::registry::{FunctionTable, Module};
use super::value::ScriptValue;
use crate::core::error::{BridgeError, BridgeResult};
use crate::raylib::{
    Camera2D, Camera3D, Color, Image, Ray, Raylib, Rectangle, Texture2D, Vector2, Vector3, Vector4,
};

/// A single field value, typed by how it is encoded for scripts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Int(i64),
    Bool(bool),
    Vector2(Vector2),
    Vector3(Vector3),
    Texture(Texture2D),
    Image(Image),
}

const MATRIX_FIELDS: [&str; 16] = [
    "m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9", "m10", "m11", "m12", "m13", "m14", "m15",
];

/// Read `field` of a cell value. `None` when the type has no such field.
pub fn read(value: &NativeValue, field: &str) -> Option<FieldValue> {
    use FieldValue::*;

    let number = |f: f32| Some(Number(f as f64));
    match (value, field) {
        (NativeValue::Vector2(v), "x") => number(v.x),
        (NativeValue::Vector2(v), "y") => number(v.y),

        (NativeValue::Vector3(v), "x") => number(v.x),
        (NativeValue::Vector3(v), "y") => number(v.y),
        (NativeValue::Vector3(v), "z") => number(v.z),

        (NativeValue::Vector4(v), "x") => number(v.x),
        (NativeValue::Vector4(v), "y") => number(v.y),
        (NativeValue::Vector4(v), "z") => number(v.z),
        (NativeValue::Vector4(v), "w") => number(v.w),

        (NativeValue::Color(c), "r") => Some(Int(c.r as i64)),
        (NativeValue::Color(c), "g") => Some(Int(c.g as i64)),
        (NativeValue::Color(c), "b") => Some(Int(c.b as i64)),
        (NativeValue::Color(c), "a") => Some(Int(c.a as i64)),

        (NativeValue::Rectangle(r), "x") => number(r.x),
        (NativeValue::Rectangle(r), "y") => number(r.y),
        (NativeValue::Rectangle(r), "width") => number(r.width),
        (NativeValue::Rectangle(r), "height") => number(r.height),

        (NativeValue::Camera2D(c), "offset") => Some(Vector2(c.offset)),
        (NativeValue::Camera2D(c), "target") => Some(Vector2(c.target)),
        (NativeValue::Camera2D(c), "rotation") => number(c.rotation),
        (NativeValue::Camera2D(c), "zoom") => number(c.zoom),

        (NativeValue::Camera3D(c), "position") => Some(Vector3(c.position)),
        (NativeValue::Camera3D(c), "target") => Some(Vector3(c.target)),
        (NativeValue::Camera3D(c), "up") => Some(Vector3(c.up)),
        (NativeValue::Camera3D(c), "fovy") => number(c.fovy),
        (NativeValue::Camera3D(c), "type") => Some(Int(c.projection as i64)),

        (NativeValue::Ray(r), "position") => Some(Vector3(r.position)),
        (NativeValue::Ray(r), "direction") => Some(Vector3(r.direction)),

        (NativeValue::Matrix(m), name) => MATRIX_FIELDS
            .iter()
            .position(|f| *f == name)
            .and_then(|i| number(m.to_cols_array()[i])),

        (NativeValue::Image(i), "width") => Some(Int(i.width as i64)),
        (NativeValue::Image(i), "height") => Some(Int(i.height as i64)),
        (NativeValue::Image(i), "mipmaps") => Some(Int(i.mipmaps as i64)),
        (NativeValue::Image(i), "format") => Some(Int(i.format as i64)),

        (NativeValue::Texture2D(t), name) => texture_field(t, name),

        (NativeValue::RenderTexture2D(r), "id") => Some(Int(r.id as i64)),
        (NativeValue::RenderTexture2D(r), "texture") => Some(Texture(r.texture)),
        (NativeValue::RenderTexture2D(r), "depth") => Some(Texture(r.depth)),
        (NativeValue::RenderTexture2D(r), "depthTexture") => Some(Bool(r.depth_texture)),

        (NativeValue::Font(f), "baseSize") => Some(Int(f.base_size as i64)),
        (NativeValue::Font(f), "charsCount") => Some(Int(f.chars_count as i64)),
        (NativeValue::Font(f), "texture") => Some(Texture(f.texture)),

        (NativeValue::CharInfo(c), "value") => Some(Int(c.value as i64)),
        (NativeValue::CharInfo(c), "offsetX") => Some(Int(c.offset_x as i64)),
        (NativeValue::CharInfo(c), "offsetY") => Some(Int(c.offset_y as i64)),
        (NativeValue::CharInfo(c), "advanceX") => Some(Int(c.advance_x as i64)),
        (NativeValue::CharInfo(c), "image") => Some(Image(c.image)),

        _ => None,
    }
}

fn texture_field(texture: &Texture2D, field: &str) -> Option<FieldValue> {
    let value = match field {
        "id" => texture.id as i64,
        "width" => texture.width as i64,
        "height" => texture.height as i64,
        "mipmaps" => texture.mipmaps as i64,
        "format" => texture.format as i64,
        _ => return None,
    };
    Some(FieldValue::Int(value))
}

/// Whether fields of this type can be written from scripts.
pub fn is_writable(tag: TypeTag) -> bool {
    !tag.owns_resource() && tag != TypeTag::Matrix
}

/// Write `field` of a value-type cell. The field must exist and `new` must
/// carry the same variant [`read`] returns for it.
pub fn write(value: &mut NativeValue, field: &str, new: FieldValue) -> bool {
    use FieldValue::*;

    match (value, field, new) {
        (NativeValue::Vector2(v), "x", Number(n)) => v.x = n as f32,
        (NativeValue::Vector2(v), "y", Number(n)) => v.y = n as f32,

        (NativeValue::Vector3(v), "x", Number(n)) => v.x = n as f32,
        (NativeValue::Vector3(v), "y", Number(n)) => v.y = n as f32,
        (NativeValue::Vector3(v), "z", Number(n)) => v.z = n as f32,

        (NativeValue::Vector4(v), "x", Number(n)) => v.x = n as f32,
        (NativeValue::Vector4(v), "y", Number(n)) => v.y = n as f32,
        (NativeValue::Vector4(v), "z", Number(n)) => v.z = n as f32,
        (NativeValue::Vector4(v), "w", Number(n)) => v.w = n as f32,

        (NativeValue::Color(c), "r", Int(n)) => c.r = n as u8,
        (NativeValue::Color(c), "g", Int(n)) => c.g = n as u8,
        (NativeValue::Color(c), "b", Int(n)) => c.b = n as u8,
        (NativeValue::Color(c), "a", Int(n)) => c.a = n as u8,

        (NativeValue::Rectangle(r), "x", Number(n)) => r.x = n as f32,
        (NativeValue::Rectangle(r), "y", Number(n)) => r.y = n as f32,
        (NativeValue::Rectangle(r), "width", Number(n)) => r.width = n as f32,
        (NativeValue::Rectangle(r), "height", Number(n)) => r.height = n as f32,

        (NativeValue::Camera2D(c), "offset", Vector2(v)) => c.offset = v,
        (NativeValue::Camera2D(c), "target", Vector2(v)) => c.target = v,
        (NativeValue::Camera2D(c), "rotation", Number(n)) => c.rotation = n as f32,
        (NativeValue::Camera2D(c), "zoom", Number(n)) => c.zoom = n as f32,

        (NativeValue::Camera3D(c), "position", Vector3(v)) => c.position = v,
        (NativeValue::Camera3D(c), "target", Vector3(v)) => c.target = v,
        (NativeValue::Camera3D(c), "up", Vector3(v)) => c.up = v,
        (NativeValue::Camera3D(c), "fovy", Number(n)) => c.fovy = n as f32,
        (NativeValue::Camera3D(c), "type", Int(n)) => c.projection = n as i32,

        (NativeValue::Ray(r), "position", Vector3(v)) => r.position = v,
        (NativeValue::Ray(r), "direction", Vector3(v)) => r.direction = v,

        _ => return false,
    }
    true
}

/// Decode the new value of a field, shaped like its current value.
fn decode_like<R: Raylib>(cx: &CallContext<'_, R>, index: usize, current: FieldValue) -> BridgeResult<FieldValue> {
    Ok(match current {
        FieldValue::Number(_) => FieldValue::Number(cx.float(index)?),
        FieldValue::Int(_) => FieldValue::Int(cx.int(index)? as i64),
        FieldValue::Bool(_) => FieldValue::Bool(cx.truthy(index)),
        FieldValue::Vector2(_) => FieldValue::Vector2(cx.arg::<Vector2>(index)?),
        FieldValue::Vector3(_) => FieldValue::Vector3(cx.arg::<Vector3>(index)?),
        FieldValue::Texture(_) => FieldValue::Texture(cx.arg::<Texture2D>(index)?),
        FieldValue::Image(_) => FieldValue::Image(cx.arg::<Image>(index)?),
    })
}

pub(super) fn register<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Handles;

    // constructors
    table.register(m, "Vector2", 2, |cx| {
        let v = Vector2::new(cx.f32(0)?, cx.f32(1)?);
        cx.wrap(v)
    });
    table.register(m, "Vector3", 3, |cx| {
        let v = Vector3::new(cx.f32(0)?, cx.f32(1)?, cx.f32(2)?);
        cx.wrap(v)
    });
    table.register(m, "Vector4", 4, |cx| {
        let v = Vector4::new(cx.f32(0)?, cx.f32(1)?, cx.f32(2)?, cx.f32(3)?);
        cx.wrap(v)
    });
    table.register(m, "Color", 4, |cx| {
        let color = Color::new(
            cx.int(0)? as u8,
            cx.int(1)? as u8,
            cx.int(2)? as u8,
            cx.int(3)? as u8,
        );
        cx.wrap(color)
    });
    table.register(m, "Rectangle", 4, |cx| {
        let rec = Rectangle::new(cx.f32(0)?, cx.f32(1)?, cx.f32(2)?, cx.f32(3)?);
        cx.wrap(rec)
    });
    table.register(m, "Camera2D", 4, |cx| {
        let camera = Camera2D {
            offset: cx.arg::<Vector2>(0)?,
            target: cx.arg::<Vector2>(1)?,
            rotation: cx.f32(2)?,
            zoom: cx.f32(3)?,
        };
        cx.wrap(camera)
    });
    table.register(m, "Camera3D", 5, |cx| {
        let camera = Camera3D {
            position: cx.arg::<Vector3>(0)?,
            target: cx.arg::<Vector3>(1)?,
            up: cx.arg::<Vector3>(2)?,
            fovy: cx.f32(3)?,
            projection: cx.int(4)?,
        };
        cx.wrap(camera)
    });
    table.register(m, "Ray", 2, |cx| {
        let ray = Ray {
            position: cx.arg::<Vector3>(0)?,
            direction: cx.arg::<Vector3>(1)?,
        };
        cx.wrap(ray)
    });

    // fields
    table.register(m, "getField", 2, |cx| {
        let (_, value) = cx.native(0)?;
        let field = cx.string(1)?;
        let unknown = || BridgeError::UnknownField {
            tag: value.tag(),
            field: field.to_string(),
        };
        match read(&value, field).ok_or_else(unknown)? {
            FieldValue::Number(n) => Ok(ScriptValue::Float(n)),
            FieldValue::Int(i) => Ok(ScriptValue::Int(i)),
            FieldValue::Bool(b) => Ok(ScriptValue::Bool(b)),
            FieldValue::Vector2(v) => cx.wrap(v),
            FieldValue::Vector3(v) => cx.wrap(v),
            FieldValue::Texture(t) => cx.wrap_view(t),
            FieldValue::Image(i) => cx.wrap_view(i),
        }
    });
    table.register(m, "setField", 3, |cx| {
        let (id, value) = cx.native(0)?;
        let field = cx.string(1)?;
        let current = read(&value, field).ok_or_else(|| BridgeError::UnknownField {
            tag: value.tag(),
            field: field.to_string(),
        })?;
        if !is_writable(value.tag()) {
            return Err(BridgeError::ReadOnlyField {
                tag: value.tag(),
                field: field.to_string(),
            });
        }
        let new = decode_like(cx, 2, current)?;
        let cell = cx.native_mut(0, id)?;
        if !write(cell, field, new) {
            return Err(BridgeError::ReadOnlyField {
                tag: value.tag(),
                field: field.to_string(),
            });
        }
        Ok(ScriptValue::Undefined)
    });
    table.register(m, "typeOf", 1, |cx| {
        let id = cx.handle_id(0)?;
        let tag = cx.handles().tag(id).map_err(|e| cx.fail(0, e.into()))?;
        Ok(tag.name().into())
    });
    table.register(m, "releaseHandle", 1, |cx| {
        let id = cx.handle_id(0)?;
        let closed = cx.handles().is_closed(id).unwrap_or(true);
        let value = cx.release(0, id)?;
        if !closed && value.tag().owns_resource() {
            tracing::warn!(
                target: "bridge",
                handle = %id,
                tag = %value.tag(),
                "Released a resource handle that was never unloaded"
            );
        }
        Ok(ScriptValue::Undefined)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Bridge;
    use crate::config::HostConfig;
    use crate::core::error::ErrorKind;
    use crate::raylib::HeadlessRaylib;

    fn bridge() -> Bridge<HeadlessRaylib> {
        Bridge::new(HeadlessRaylib::new(), &HostConfig::default())
    }

    fn call(bridge: &mut Bridge<HeadlessRaylib>, name: &str, args: &[ScriptValue]) -> ScriptValue {
        bridge.call(name, args).unwrap()
    }

    #[test]
    fn test_read_matrix_is_column_major() {
        let matrix = glam::Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let value = NativeValue::Matrix(matrix);
        assert_eq!(read(&value, "m12"), Some(FieldValue::Number(1.0)));
        assert_eq!(read(&value, "m14"), Some(FieldValue::Number(3.0)));
        assert_eq!(read(&value, "m16"), None);
    }

    #[test]
    fn test_get_and_set_vector_field() {
        let mut bridge = bridge();
        let v = call(&mut bridge, "Vector2", &[ScriptValue::Float(1.5), ScriptValue::Int(2)]);
        assert_eq!(
            call(&mut bridge, "getField", &[v.clone(), ScriptValue::from("x")]),
            ScriptValue::Float(1.5)
        );
        call(&mut bridge, "setField", &[v.clone(), ScriptValue::from("y"), ScriptValue::from("7")]);
        assert_eq!(
            bridge.get::<Vector2>(v.as_handle().unwrap()).unwrap(),
            Vector2::new(1.5, 7.0)
        );
    }

    #[test]
    fn test_nested_field_is_a_copy() {
        let mut bridge = bridge();
        let offset = call(&mut bridge, "Vector2", &[ScriptValue::Int(1), ScriptValue::Int(2)]);
        let target = call(&mut bridge, "Vector2", &[ScriptValue::Int(0), ScriptValue::Int(0)]);
        let camera = call(
            &mut bridge,
            "Camera2D",
            &[offset, target, ScriptValue::Int(0), ScriptValue::Int(1)],
        );
        let nested = call(&mut bridge, "getField", &[camera.clone(), ScriptValue::from("offset")]);
        call(&mut bridge, "setField", &[nested, ScriptValue::from("x"), ScriptValue::Int(99)]);
        let camera = bridge.get::<Camera2D>(camera.as_handle().unwrap()).unwrap();
        assert_eq!(camera.offset, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn test_color_constructor_narrows() {
        let mut bridge = bridge();
        let args = [ScriptValue::Int(256 + 10), ScriptValue::Int(-1), ScriptValue::Int(3), ScriptValue::Int(255)];
        let color = call(&mut bridge, "Color", &args);
        assert_eq!(
            bridge.get::<Color>(color.as_handle().unwrap()).unwrap(),
            Color::new(10, 255, 3, 255)
        );
    }

    #[test]
    fn test_field_errors() {
        let mut bridge = bridge();
        let v = call(&mut bridge, "Vector2", &[ScriptValue::Int(0), ScriptValue::Int(0)]);
        let err = bridge.call("getField", &[v.clone(), ScriptValue::from("z")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let image = bridge.wrap(Image::default()).unwrap();
        let err = bridge
            .call("setField", &[image.clone(), ScriptValue::from("width"), ScriptValue::Int(4)])
            .unwrap_err();
        assert!(matches!(err, BridgeError::ReadOnlyField { tag: TypeTag::Image, .. }));
        assert_eq!(
            call(&mut bridge, "getField", &[image, ScriptValue::from("width")]),
            ScriptValue::Int(0)
        );

        let err = bridge
            .call("setField", &[v, ScriptValue::from("x"), ScriptValue::from("nope")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_type_of_and_release() {
        let mut bridge = bridge();
        let ray = {
            let p = call(&mut bridge, "Vector3", &[ScriptValue::Int(0), ScriptValue::Int(0), ScriptValue::Int(0)]);
            call(&mut bridge, "Ray", &[p.clone(), p])
        };
        assert_eq!(call(&mut bridge, "typeOf", &[ray.clone()]), ScriptValue::from("Ray"));

        call(&mut bridge, "releaseHandle", &[ray.clone()]);
        let err = bridge.call("typeOf", &[ray.clone()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Handle);
        assert!(bridge.call("releaseHandle", &[ray]).is_err());
    }
}
