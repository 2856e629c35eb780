//! Dispatch cost benchmarks.
//!
//! Measures the per-call overhead of the bridge: overload resolution,
//! argument conversion, receiver lookup, and handle allocation for returned
//! objects.
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::Vec3;
use scriptbridge::engine::{self, Camera, Color, DebugRenderer, IndexBuffer};
use scriptbridge::{Context, Dynamic, ScriptState, SharedPtr, VectorBuffer, register_renderer_api};

#[cfg(feature = "profile-with-puffin")]
use std::collections::HashMap;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print average time per top-level scope.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;

    let Some(frame_view) = FRAME_VIEW.get() else {
        println!("Profiler not initialized");
        return;
    };

    let view = frame_view.lock();
    let scope_collection = view.scope_collection();
    let mut scope_timings: HashMap<String, i64> = HashMap::new();
    let mut frame_count = 0i64;

    for frame in view.recent_frames() {
        frame_count += 1;
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread_info, stream_info) in unpacked.thread_streams.iter() {
            let Ok(scopes) = Reader::from_start(&stream_info.stream).read_top_scopes() else {
                continue;
            };
            for scope in scopes {
                if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                    *scope_timings.entry(details.name().to_string()).or_insert(0) +=
                        scope.record.duration_ns;
                }
            }
        }
    }

    println!("\n=== Dispatch profile ({} frames) ===", frame_count);
    let mut entries: Vec<_> = scope_timings.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    for (name, ns) in entries {
        let avg = ns / frame_count.max(1);
        println!(
            "  {:40} {:>10.2?} avg",
            name,
            std::time::Duration::from_nanos(avg as u64)
        );
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

fn state() -> (ScriptState, Rc<Context>) {
    let context = Context::new();
    engine::initialize(&context);
    let mut state = ScriptState::new();
    register_renderer_api(&mut state, &context).unwrap();
    (state, context)
}

/// Method calls that differ only in how much overload resolution they need.
fn method_dispatch(c: &mut Criterion) {
    setup_profiler();
    let (mut state, _context) = state();
    let camera = state.push(SharedPtr::new(Camera::new()));
    let debug = state.push(SharedPtr::new(DebugRenderer::new()));

    let mut group = c.benchmark_group("dispatch/method");

    group.bench_function("single_overload", |b| {
        b.iter(|| {
            let ret = state
                .call_method(black_box(&camera), "GetHalfViewSize", vec![])
                .unwrap();
            end_profiling_frame();
            black_box(ret)
        });
    });

    group.bench_function("two_overloads_by_type", |b| {
        b.iter(|| {
            let ret = state
                .call_method(black_box(&camera), "SetOrthoSize", vec![Dynamic::Float(10.0)])
                .unwrap();
            end_profiling_frame();
            black_box(ret)
        });
    });

    group.bench_function("four_overloads_by_type", |b| {
        b.iter(|| {
            let args = vec![
                Dynamic::Native(Box::new(Vec3::ZERO)),
                Dynamic::Native(Box::new(Vec3::X)),
                Dynamic::Native(Box::new(Color::RED)),
                Dynamic::Bool(false),
            ];
            let ret = state.call_method(black_box(&debug), "AddLine", args).unwrap();
            end_profiling_frame();
            black_box(ret)
        });
    });

    group.bench_function("inherited_method", |b| {
        b.iter(|| {
            let ret = state
                .call_method(black_box(&camera), "GetTypeName", vec![])
                .unwrap();
            end_profiling_frame();
            black_box(ret)
        });
    });

    group.bench_function("property_read", |b| {
        b.iter(|| {
            let ret = state.get_property(black_box(&camera), "fov").unwrap();
            end_profiling_frame();
            black_box(ret)
        });
    });

    group.finish();
    print_profiling_stats();
}

/// Calls that allocate and collect a handle per iteration.
fn object_lifecycle(c: &mut Criterion) {
    setup_profiler();
    let (mut state, _context) = state();

    let mut group = c.benchmark_group("dispatch/lifecycle");

    group.bench_function("factory_and_release", |b| {
        b.iter(|| {
            let camera = state.call_static("Camera", "new", vec![]).unwrap();
            state.release(black_box(camera));
            end_profiling_frame();
        });
    });

    group.bench_function("create_object_by_name", |b| {
        b.iter(|| {
            let object = state
                .call_function("CreateObject", vec![Dynamic::String(String::from("Material"))])
                .unwrap();
            state.release(black_box(object));
            end_profiling_frame();
        });
    });

    group.finish();
    print_profiling_stats();
}

/// Bulk data through the lock/unlock guard.
fn bulk_data(c: &mut Criterion) {
    let (mut state, _context) = state();
    let buffer = SharedPtr::new(IndexBuffer::new());
    buffer.set_size(1024, false, false);
    let handle = state.push(buffer);
    let bytes = vec![0x5A; 2048];

    let mut group = c.benchmark_group("dispatch/bulk_data");

    group.bench_function("set_data_2k", |b| {
        b.iter(|| {
            let source = Dynamic::Native(Box::new(VectorBuffer::from_bytes(bytes.clone())));
            black_box(state.call_method(&handle, "SetData", vec![source]).unwrap())
        });
    });

    group.bench_function("get_data_2k", |b| {
        b.iter(|| black_box(state.call_method(&handle, "GetData", vec![]).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, method_dispatch, object_lifecycle, bulk_data);
criterion_main!(benches);
