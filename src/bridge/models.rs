//! Shims for raylib's models module. Only the basic 3D shape functions are
//! exposed; meshes, materials and model files stay out of the script surface.

use super::registry::{FunctionTable, Module};
use super::value::ScriptValue;
use crate::raylib::{Color, Ray, Raylib, Texture2D, Vector2, Vector3};

const UNDEFINED: ScriptValue = ScriptValue::Undefined;

pub(super) fn register<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Models;

    table.register(m, "drawLine3d", 3, |cx| {
        let start = cx.arg::<Vector3>(0)?;
        let end = cx.arg::<Vector3>(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_line_3d(start, end, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawPoint3d", 2, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let color = cx.arg::<Color>(1)?;
        cx.rl().draw_point_3d(position, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCircle3d", 5, |cx| {
        let center = cx.arg::<Vector3>(0)?;
        let radius = cx.f32(1)?;
        let rotation_axis = cx.arg::<Vector3>(2)?;
        let rotation_angle = cx.f32(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl()
            .draw_circle_3d(center, radius, rotation_axis, rotation_angle, color);
        Ok(UNDEFINED)
    });

    // cubes
    table.register(m, "drawCube", 5, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let width = cx.f32(1)?;
        let height = cx.f32(2)?;
        let length = cx.f32(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl().draw_cube(position, width, height, length, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCubeWires", 5, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let width = cx.f32(1)?;
        let height = cx.f32(2)?;
        let length = cx.f32(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl()
            .draw_cube_wires(position, width, height, length, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCubeV", 3, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let size = cx.arg::<Vector3>(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_cube_v(position, size, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCubeWiresV", 3, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let size = cx.arg::<Vector3>(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_cube_wires_v(position, size, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCubeTexture", 6, |cx| {
        let texture = cx.arg::<Texture2D>(0)?;
        let position = cx.arg::<Vector3>(1)?;
        let width = cx.f32(2)?;
        let height = cx.f32(3)?;
        let length = cx.f32(4)?;
        let color = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_cube_texture(texture, position, width, height, length, color);
        Ok(UNDEFINED)
    });

    // spheres and cylinders
    table.register(m, "drawSphere", 3, |cx| {
        let center = cx.arg::<Vector3>(0)?;
        let radius = cx.f32(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_sphere(center, radius, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawSphereEx", 5, |cx| {
        let center = cx.arg::<Vector3>(0)?;
        let radius = cx.f32(1)?;
        let rings = cx.int(2)?;
        let slices = cx.int(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl().draw_sphere_ex(center, radius, rings, slices, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawSphereWires", 5, |cx| {
        let center = cx.arg::<Vector3>(0)?;
        let radius = cx.f32(1)?;
        let rings = cx.int(2)?;
        let slices = cx.int(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl()
            .draw_sphere_wires(center, radius, rings, slices, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCylinder", 6, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let radius_top = cx.f32(1)?;
        let radius_bottom = cx.f32(2)?;
        let height = cx.f32(3)?;
        let slices = cx.int(4)?;
        let color = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_cylinder(position, radius_top, radius_bottom, height, slices, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCylinderWires", 6, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        let radius_top = cx.f32(1)?;
        let radius_bottom = cx.f32(2)?;
        let height = cx.f32(3)?;
        let slices = cx.int(4)?;
        let color = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_cylinder_wires(position, radius_top, radius_bottom, height, slices, color);
        Ok(UNDEFINED)
    });

    // helpers
    table.register(m, "drawPlane", 3, |cx| {
        let center = cx.arg::<Vector3>(0)?;
        let size = cx.arg::<Vector2>(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_plane(center, size, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRay", 2, |cx| {
        let ray = cx.arg::<Ray>(0)?;
        let color = cx.arg::<Color>(1)?;
        cx.rl().draw_ray(ray, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawGrid", 2, |cx| {
        let slices = cx.int(0)?;
        let spacing = cx.f32(1)?;
        cx.rl().draw_grid(slices, spacing);
        Ok(UNDEFINED)
    });
    table.register(m, "drawGizmo", 1, |cx| {
        let position = cx.arg::<Vector3>(0)?;
        cx.rl().draw_gizmo(position);
        Ok(UNDEFINED)
    });
}

#[cfg(test)]
mod tests {
    use crate::bridge::{Bridge, ScriptValue};
    use crate::config::HostConfig;
    use crate::raylib::consts::*;
    use crate::raylib::{HeadlessRaylib, Vector3};

    #[test]
    fn test_draw_cube_in_3d_mode() {
        let mut bridge = Bridge::new(HeadlessRaylib::new(), &HostConfig::default());
        let camera = bridge.wrap(crate::raylib::Camera3D::default()).unwrap();
        let position = bridge.wrap(Vector3::ZERO).unwrap();
        let red = bridge.wrap(RED).unwrap();

        bridge.call("beginMode3D", &[camera]).unwrap();
        bridge
            .call(
                "drawCube",
                &[position.clone(), ScriptValue::Float(2.0), ScriptValue::Int(2), ScriptValue::from("2"), red],
            )
            .unwrap();
        bridge.call("drawGrid", &[ScriptValue::Int(10), ScriptValue::Float(1.0)]).unwrap();
        bridge.call("endMode3D", &[]).unwrap();

        let rl = bridge.backend();
        assert_eq!(rl.calls_to("DrawCube"), 1);
        assert_eq!(rl.calls_to("DrawGrid"), 1);
        assert!(rl.mode_3d().is_none());
    }

    #[test]
    fn test_draw_sphere_rejects_color_number() {
        let mut bridge = Bridge::new(HeadlessRaylib::new(), &HostConfig::default());
        let center = bridge.wrap(Vector3::ONE).unwrap();
        let args = [center, ScriptValue::Float(1.0), ScriptValue::Int(0xFF00_00FF)];
        assert!(bridge.call("drawSphere", &args).is_err());
        assert_eq!(bridge.backend().calls_to("DrawSphere"), 0);
    }
}
