//! 桥接层调度性能基准测试
//!
//! 测试按名称调度、参数解码与句柄包装的开销

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rayscript::bridge::{Bridge, HandleTable, NativeValue, ScriptValue};
use rayscript::config::{BridgeConfig, HostConfig};
use rayscript::raylib::{Color, HeadlessRaylib, Vector2};
use std::hint::black_box;

fn quiet_bridge() -> Bridge<HeadlessRaylib> {
    let mut config = BridgeConfig::default();
    // 只计数，不保存调用记录
    config.host.call_log_limit = 0;
    Bridge::new(HeadlessRaylib::from_config(&config), &config.host)
}

fn bench_primitive_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_calls");
    let mut bridge = quiet_bridge();
    let color = ScriptValue::Int(0xFF0000FF);

    group.bench_function("draw_rectangle", |b| {
        let args = [
            ScriptValue::Int(10),
            ScriptValue::Int(20),
            ScriptValue::Float(30.5),
            ScriptValue::String("40".to_string()),
            color.clone(),
        ];
        b.iter(|| black_box(bridge.call("drawRectangle", &args)));
    });

    group.bench_function("measure_text", |b| {
        let args = [ScriptValue::from("hello world"), ScriptValue::Int(20)];
        b.iter(|| black_box(bridge.call("measureText", &args)));
    });

    group.finish();
}

fn bench_handle_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("handle_calls");
    let mut bridge = quiet_bridge();
    let point = bridge.wrap(Vector2::new(1.0, 2.0)).unwrap_or_default();
    let color = bridge.wrap(Color::new(0, 0, 0, 255)).unwrap_or_default();

    group.bench_function("draw_pixel_v", |b| {
        let args = [point.clone(), color.clone()];
        b.iter(|| black_box(bridge.call("drawPixelV", &args)));
    });

    group.bench_function("wrap_and_release", |b| {
        b.iter(|| {
            let handle = bridge.call("getMousePosition", &[]).unwrap_or_default();
            black_box(bridge.call("releaseHandle", &[handle]))
        });
    });

    group.finish();
}

fn bench_line_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_strip");
    let mut bridge = quiet_bridge();
    let color = bridge.wrap(Color::new(255, 255, 255, 255)).unwrap_or_default();

    for len in [8usize, 64, 512] {
        let points: Vec<ScriptValue> = (0..len)
            .map(|i| bridge.wrap(Vector2::new(i as f32, 0.0)).unwrap_or_default())
            .collect();
        let args = [ScriptValue::Array(points), color.clone()];

        group.bench_with_input(BenchmarkId::from_parameter(len), &args, |b, args| {
            b.iter(|| black_box(bridge.call("drawLineStrip", args)));
        });
    }

    group.finish();
}

fn bench_handle_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("handle_table");
    let host = HostConfig::default();

    group.bench_function("insert_get_release", |b| {
        let mut table = HandleTable::new(host.max_handles);
        b.iter(|| {
            if let Ok(id) = table.insert(NativeValue::Vector2(Vector2::new(1.0, 2.0))) {
                black_box(table.get::<Vector2>(id).ok());
                black_box(table.release(id).ok());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_primitive_calls,
    bench_handle_calls,
    bench_line_strip,
    bench_handle_table
);
criterion_main!(benches);
