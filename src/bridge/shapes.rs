//! Shims for raylib's shapes module: 2D primitives and collision checks.

use super::registry::{FunctionTable, Module};
use super::value::ScriptValue;
use crate::raylib::{Color, Raylib, Rectangle, Texture2D, Vector2};

const UNDEFINED: ScriptValue = ScriptValue::Undefined;

pub(super) fn register<R: Raylib>(table: &mut FunctionTable<R>) {
    lines(table);
    circles(table);
    rectangles(table);
    polygons(table);
    collision(table);
}

fn lines<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Shapes;

    table.register(m, "drawPixel", 3, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_pixel(x, y, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawPixelV", 2, |cx| {
        let position = cx.arg::<Vector2>(0)?;
        let color = cx.arg::<Color>(1)?;
        cx.rl().draw_pixel_v(position, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawLine", 5, |cx| {
        let start_x = cx.int(0)?;
        let start_y = cx.int(1)?;
        let end_x = cx.int(2)?;
        let end_y = cx.int(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl().draw_line(start_x, start_y, end_x, end_y, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawLineV", 3, |cx| {
        let start = cx.arg::<Vector2>(0)?;
        let end = cx.arg::<Vector2>(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_line_v(start, end, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawLineEx", 4, |cx| {
        let start = cx.arg::<Vector2>(0)?;
        let end = cx.arg::<Vector2>(1)?;
        let thick = cx.f32(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_line_ex(start, end, thick, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawLineBezier", 4, |cx| {
        let start = cx.arg::<Vector2>(0)?;
        let end = cx.arg::<Vector2>(1)?;
        let thick = cx.f32(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_line_bezier(start, end, thick, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawLineStrip", 2, |cx| {
        let points = cx.list::<Vector2>(0)?;
        let color = cx.arg::<Color>(1)?;
        cx.rl().draw_line_strip(&points, color);
        Ok(UNDEFINED)
    });
}

fn circles<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Shapes;

    table.register(m, "drawCircle", 4, |cx| {
        let center_x = cx.int(0)?;
        let center_y = cx.int(1)?;
        let radius = cx.f32(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_circle(center_x, center_y, radius, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCircleLines", 4, |cx| {
        let center_x = cx.int(0)?;
        let center_y = cx.int(1)?;
        let radius = cx.f32(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_circle_lines(center_x, center_y, radius, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCircleSector", 6, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let radius = cx.f32(1)?;
        let start_angle = cx.int(2)?;
        let end_angle = cx.int(3)?;
        let segments = cx.int(4)?;
        let color = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_circle_sector(center, radius, start_angle, end_angle, segments, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCircleSectorLines", 6, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let radius = cx.f32(1)?;
        let start_angle = cx.int(2)?;
        let end_angle = cx.int(3)?;
        let segments = cx.int(4)?;
        let color = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_circle_sector_lines(center, radius, start_angle, end_angle, segments, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCircleGradient", 5, |cx| {
        let center_x = cx.int(0)?;
        let center_y = cx.int(1)?;
        let radius = cx.f32(2)?;
        let inner = cx.arg::<Color>(3)?;
        let outer = cx.arg::<Color>(4)?;
        cx.rl()
            .draw_circle_gradient(center_x, center_y, radius, inner, outer);
        Ok(UNDEFINED)
    });
    table.register(m, "drawCircleV", 3, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let radius = cx.f32(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_circle_v(center, radius, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRing", 7, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let inner_radius = cx.f32(1)?;
        let outer_radius = cx.f32(2)?;
        let start_angle = cx.int(3)?;
        let end_angle = cx.int(4)?;
        let segments = cx.int(5)?;
        let color = cx.arg::<Color>(6)?;
        cx.rl().draw_ring(
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            segments,
            color,
        );
        Ok(UNDEFINED)
    });
    table.register(m, "drawRingLines", 7, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let inner_radius = cx.f32(1)?;
        let outer_radius = cx.f32(2)?;
        let start_angle = cx.int(3)?;
        let end_angle = cx.int(4)?;
        let segments = cx.int(5)?;
        let color = cx.arg::<Color>(6)?;
        cx.rl().draw_ring_lines(
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            segments,
            color,
        );
        Ok(UNDEFINED)
    });
}

fn rectangles<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Shapes;

    table.register(m, "drawRectangle", 5, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        let width = cx.int(2)?;
        let height = cx.int(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl().draw_rectangle(x, y, width, height, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleV", 3, |cx| {
        let position = cx.arg::<Vector2>(0)?;
        let size = cx.arg::<Vector2>(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_rectangle_v(position, size, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleRec", 2, |cx| {
        let rec = cx.arg::<Rectangle>(0)?;
        let color = cx.arg::<Color>(1)?;
        cx.rl().draw_rectangle_rec(rec, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectanglePro", 4, |cx| {
        let rec = cx.arg::<Rectangle>(0)?;
        let origin = cx.arg::<Vector2>(1)?;
        let rotation = cx.f32(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_rectangle_pro(rec, origin, rotation, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleGradientV", 6, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        let width = cx.int(2)?;
        let height = cx.int(3)?;
        let top = cx.arg::<Color>(4)?;
        let bottom = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_rectangle_gradient_v(x, y, width, height, top, bottom);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleGradientH", 6, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        let width = cx.int(2)?;
        let height = cx.int(3)?;
        let left = cx.arg::<Color>(4)?;
        let right = cx.arg::<Color>(5)?;
        cx.rl()
            .draw_rectangle_gradient_h(x, y, width, height, left, right);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleGradientEx", 5, |cx| {
        let rec = cx.arg::<Rectangle>(0)?;
        let col1 = cx.arg::<Color>(1)?;
        let col2 = cx.arg::<Color>(2)?;
        let col3 = cx.arg::<Color>(3)?;
        let col4 = cx.arg::<Color>(4)?;
        cx.rl().draw_rectangle_gradient_ex(rec, col1, col2, col3, col4);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleLines", 5, |cx| {
        let x = cx.int(0)?;
        let y = cx.int(1)?;
        let width = cx.int(2)?;
        let height = cx.int(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl().draw_rectangle_lines(x, y, width, height, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleLinesEx", 3, |cx| {
        let rec = cx.arg::<Rectangle>(0)?;
        let line_thick = cx.int(1)?;
        let color = cx.arg::<Color>(2)?;
        cx.rl().draw_rectangle_lines_ex(rec, line_thick, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleRounded", 4, |cx| {
        let rec = cx.arg::<Rectangle>(0)?;
        let roundness = cx.f32(1)?;
        let segments = cx.int(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl()
            .draw_rectangle_rounded(rec, roundness, segments, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawRectangleRoundedLines", 5, |cx| {
        let rec = cx.arg::<Rectangle>(0)?;
        let roundness = cx.f32(1)?;
        let segments = cx.int(2)?;
        let line_thick = cx.int(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl()
            .draw_rectangle_rounded_lines(rec, roundness, segments, line_thick, color);
        Ok(UNDEFINED)
    });
}

fn polygons<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Shapes;

    table.register(m, "drawTriangle", 4, |cx| {
        let v1 = cx.arg::<Vector2>(0)?;
        let v2 = cx.arg::<Vector2>(1)?;
        let v3 = cx.arg::<Vector2>(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_triangle(v1, v2, v3, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawTriangleLines", 4, |cx| {
        let v1 = cx.arg::<Vector2>(0)?;
        let v2 = cx.arg::<Vector2>(1)?;
        let v3 = cx.arg::<Vector2>(2)?;
        let color = cx.arg::<Color>(3)?;
        cx.rl().draw_triangle_lines(v1, v2, v3, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawTriangleFan", 2, |cx| {
        let points = cx.list::<Vector2>(0)?;
        let color = cx.arg::<Color>(1)?;
        cx.rl().draw_triangle_fan(&points, color);
        Ok(UNDEFINED)
    });
    table.register(m, "drawPoly", 5, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let sides = cx.int(1)?;
        let radius = cx.f32(2)?;
        let rotation = cx.f32(3)?;
        let color = cx.arg::<Color>(4)?;
        cx.rl().draw_poly(center, sides, radius, rotation, color);
        Ok(UNDEFINED)
    });
    table.register(m, "setShapesTexture", 2, |cx| {
        let texture = cx.arg::<Texture2D>(0)?;
        let source = cx.arg::<Rectangle>(1)?;
        cx.rl().set_shapes_texture(texture, source);
        Ok(UNDEFINED)
    });
}

fn collision<R: Raylib>(table: &mut FunctionTable<R>) {
    let m = Module::Shapes;

    table.register(m, "checkCollisionRecs", 2, |cx| {
        let rec1 = cx.arg::<Rectangle>(0)?;
        let rec2 = cx.arg::<Rectangle>(1)?;
        Ok(cx.rl().check_collision_recs(rec1, rec2).into())
    });
    table.register(m, "checkCollisionCircles", 4, |cx| {
        let center1 = cx.arg::<Vector2>(0)?;
        let radius1 = cx.f32(1)?;
        let center2 = cx.arg::<Vector2>(2)?;
        let radius2 = cx.f32(3)?;
        Ok(cx
            .rl()
            .check_collision_circles(center1, radius1, center2, radius2)
            .into())
    });
    table.register(m, "checkCollisionCircleRec", 3, |cx| {
        let center = cx.arg::<Vector2>(0)?;
        let radius = cx.f32(1)?;
        let rec = cx.arg::<Rectangle>(2)?;
        Ok(cx.rl().check_collision_circle_rec(center, radius, rec).into())
    });
    table.register(m, "getCollisionRec", 2, |cx| {
        let rec1 = cx.arg::<Rectangle>(0)?;
        let rec2 = cx.arg::<Rectangle>(1)?;
        let overlap = cx.rl().get_collision_rec(rec1, rec2);
        cx.wrap(overlap)
    });
    table.register(m, "checkCollisionPointRec", 2, |cx| {
        let point = cx.arg::<Vector2>(0)?;
        let rec = cx.arg::<Rectangle>(1)?;
        Ok(cx.rl().check_collision_point_rec(point, rec).into())
    });
    table.register(m, "checkCollisionPointCircle", 3, |cx| {
        let point = cx.arg::<Vector2>(0)?;
        let center = cx.arg::<Vector2>(1)?;
        let radius = cx.f32(2)?;
        Ok(cx
            .rl()
            .check_collision_point_circle(point, center, radius)
            .into())
    });
    table.register(m, "checkCollisionPointTriangle", 4, |cx| {
        let point = cx.arg::<Vector2>(0)?;
        let p1 = cx.arg::<Vector2>(1)?;
        let p2 = cx.arg::<Vector2>(2)?;
        let p3 = cx.arg::<Vector2>(3)?;
        Ok(cx
            .rl()
            .check_collision_point_triangle(point, p1, p2, p3)
            .into())
    });
}
