//! End-to-end tests of the graphics API as seen from script values.

use std::rc::Rc;

use glam::{Vec2, Vec3};
use scriptbridge::engine::{
    self, Camera, Color, DebugRenderer, ElementMask, ElementSemantic, Graphics, IndexBuffer,
    IntRect, LockableBuffer, Renderer, Scene, VertexBuffer, VertexElement, Viewport,
};
use scriptbridge::prelude::*;
use scriptbridge::{ConstPtr, GlobalsConfig, VectorBuffer};

fn setup() -> (ScriptState, Rc<Context>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let context = Context::new();
    engine::initialize(&context);
    let mut state = ScriptState::new();
    register_renderer_api(&mut state, &context).unwrap();
    (state, context)
}

fn string(value: &str) -> Dynamic {
    Dynamic::String(value.to_owned())
}

// =============================================================================
// Factories and inheritance
// =============================================================================

#[test]
fn create_object_resolves_the_concrete_type() {
    let (mut state, _context) = setup();

    let camera = state.call_function("CreateObject", vec![string("Camera")]).unwrap();
    assert_eq!(state.type_name_of(&camera), Some("Camera"));

    let name = state.call_method(&camera, "GetTypeName", vec![]).unwrap();
    assert_eq!(state.get::<String>(&name).unwrap(), "Camera");

    // Methods of the derived class are reachable through the base-typed result.
    state
        .call_method(&camera, "SetOrthoSize", vec![Dynamic::Float(8.0)])
        .unwrap();
    let size = state.get_property(&camera, "orthoSize").unwrap();
    assert_eq!(state.get::<f32>(&size).unwrap(), 8.0);
    state.release(camera);

    let missing = state.call_function("CreateObject", vec![string("Octree")]).unwrap();
    assert!(missing.is_null());
}

#[test]
fn type_hash_matches_get_type() {
    let (mut state, _context) = setup();
    let material = state.call_static("Material", "new", vec![]).unwrap();
    let by_method = state.call_method(&material, "GetType", vec![]).unwrap();
    let by_function = state
        .call_function("GetTypeHash", vec![string("Material")])
        .unwrap();
    assert_eq!(
        state.get::<u64>(&by_method).unwrap(),
        state.get::<u64>(&by_function).unwrap()
    );
    state.release(material);
}

#[test]
fn factories_use_the_supplied_context() {
    let (mut state, context) = setup();
    let renderer = context.subsystem::<Renderer>().unwrap();

    let viewport = state.call_static("Viewport", "new", vec![]).unwrap();
    let native: SharedPtr<Viewport> = state.get(&viewport).unwrap();
    assert!(SharedPtr::ptr_eq(
        &native.render_path().unwrap(),
        &renderer.default_render_path()
    ));
    state.release(viewport);
}

// =============================================================================
// Overloads
// =============================================================================

#[test]
fn ortho_size_accepts_number_or_vector() {
    let (mut state, _context) = setup();
    let camera = SharedPtr::new(Camera::new());
    let handle = state.push(camera.clone());

    state
        .call_method(&handle, "SetOrthoSize", vec![Dynamic::Int(12)])
        .unwrap();
    assert_eq!(camera.ortho_size(), 12.0);
    assert_eq!(camera.aspect_ratio(), 1.0);

    let size = state.push(Vec2::new(16.0, 8.0));
    state.call_method(&handle, "SetOrthoSize", vec![size]).unwrap();
    assert_eq!(camera.ortho_size(), 8.0);
    assert_eq!(camera.aspect_ratio(), 2.0);
    state.release(handle);
}

#[test]
fn viewport_constructors_pick_by_arity_then_type() {
    let (mut state, context) = setup();
    let renderer = context.subsystem::<Renderer>().unwrap();
    let scene = state.call_static("Scene", "new", vec![]).unwrap();
    let camera = state.call_static("Camera", "new", vec![]).unwrap();

    // Arguments are borrowed, so plain handle copies are enough.
    let args = |extra: Option<Dynamic>| {
        let mut args = vec![
            Dynamic::Object(scene.as_object().unwrap()),
            Dynamic::Object(camera.as_object().unwrap()),
        ];
        args.extend(extra);
        args
    };

    let plain = args(None);
    let viewport = state.call_static("Viewport", "new", plain).unwrap();
    let native: SharedPtr<Viewport> = state.get(&viewport).unwrap();
    assert_eq!(native.rect(), IntRect::ZERO);
    assert!(native.camera().is_some());
    state.release(viewport);

    let rect = state.push(IntRect::new(0, 0, 320, 240));
    let with_rect = args(Some(rect));
    let viewport = state.call_static("Viewport", "new", with_rect).unwrap();
    let native: SharedPtr<Viewport> = state.get(&viewport).unwrap();
    assert_eq!(native.rect().width(), 320);
    assert!(SharedPtr::ptr_eq(
        &native.render_path().unwrap(),
        &renderer.default_render_path()
    ));
    state.release(viewport);

    let path = state.push(renderer.default_render_path().clone_path());
    let with_path = args(Some(Dynamic::Object(path.as_object().unwrap())));
    let viewport = state.call_static("Viewport", "new", with_path).unwrap();
    let native: SharedPtr<Viewport> = state.get(&viewport).unwrap();
    assert!(!SharedPtr::ptr_eq(
        &native.render_path().unwrap(),
        &renderer.default_render_path()
    ));
    state.release(viewport);

    state.release(path);
    state.release(scene);
    state.release(camera);
    assert_eq!(state.live_handles(), 2);
}

#[test]
fn debug_lines_accept_color_or_packed_color() {
    let (mut state, _context) = setup();
    let debug = SharedPtr::new(DebugRenderer::new());
    let handle = state.push(debug.clone());

    let line = |state: &mut ScriptState, color: Dynamic, depth: Option<bool>| {
        let mut args = vec![state.push(Vec3::ZERO), state.push(Vec3::X), color];
        args.extend(depth.map(Dynamic::Bool));
        args
    };

    let args = line(&mut state, Dynamic::Native(Box::new(Color::RED)), None);
    state.call_method(&handle, "AddLine", args).unwrap();
    let args = line(&mut state, Dynamic::Int(0xff00ff00), Some(false));
    state.call_method(&handle, "AddLine", args).unwrap();

    assert_eq!(debug.num_lines(true), 1);
    assert_eq!(debug.num_lines(false), 1);

    let center = state.push(Vec3::ZERO);
    let normal = state.push(Vec3::Y);
    state
        .call_method(
            &handle,
            "AddCircle",
            vec![
                center,
                normal,
                Dynamic::Float(1.0),
                Dynamic::Native(Box::new(Color::WHITE)),
                Dynamic::Int(8),
            ],
        )
        .unwrap();
    assert_eq!(debug.num_lines(true), 1 + 9);

    let rendered = state.call_method(&handle, "Render", vec![]).unwrap();
    assert_eq!(state.get::<usize>(&rendered).unwrap(), 11);
    state.release(handle);
}

#[test]
fn default_arguments_fill_trailing_parameters() {
    let (mut state, _context) = setup();
    // The global keeps its alias; the copy below borrows it for the calls.
    let renderer = Dynamic::Object(state.global("renderer").unwrap().as_object().unwrap());

    let none = state.call_method(&renderer, "GetNumGeometries", vec![]).unwrap();
    let all = state
        .call_method(&renderer, "GetNumGeometries", vec![Dynamic::Bool(true)])
        .unwrap();
    assert_eq!(state.get::<u32>(&none).unwrap(), 0);
    assert_eq!(state.get::<u32>(&all).unwrap(), 0);
}

#[test]
fn view_statistics_pick_first_or_all_views_by_arity() {
    let (mut state, context) = setup();
    let renderer = context.subsystem::<Renderer>().unwrap();
    for (index, lights, occluders) in [(0, 2, 1), (1, 3, 4)] {
        let scene = SharedPtr::new(Scene::new());
        scene.set_num_drawables(10);
        scene.set_num_lights(lights);
        scene.set_num_occluders(occluders);
        let camera = SharedPtr::new(Camera::new());
        let viewport = Viewport::with_scene(Some(scene), Some(camera), None);
        renderer.set_viewport(index, Some(SharedPtr::new(viewport)));
    }
    renderer.update();

    let handle = Dynamic::Object(state.global("renderer").unwrap().as_object().unwrap());
    let mut count = |name: &str, all_views: Option<bool>| {
        let args = all_views.map(Dynamic::Bool).into_iter().collect();
        let value = state.call_method(&handle, name, args).unwrap();
        state.get::<u32>(&value).unwrap()
    };

    assert_eq!(count("GetNumLights", None), 2);
    assert_eq!(count("GetNumLights", Some(false)), 2);
    assert_eq!(count("GetNumLights", Some(true)), 5);
    assert_eq!(count("GetNumShadowMaps", None), 2);
    assert_eq!(count("GetNumShadowMaps", Some(true)), 5);
    assert_eq!(count("GetNumOccluders", None), 1);
    assert_eq!(count("GetNumOccluders", Some(true)), 5);

    renderer.set_draw_shadows(false);
    renderer.update();
    assert_eq!(count("GetNumShadowMaps", Some(true)), 0);
}

#[test]
fn set_mode_accepts_resolution_or_full_mode() {
    let (mut state, context) = setup();
    let graphics = context.subsystem::<Graphics>().unwrap();
    let handle = Dynamic::Object(state.global("graphics").unwrap().as_object().unwrap());

    let ok = state
        .call_method(&handle, "SetMode", vec![Dynamic::Int(800), Dynamic::Int(600)])
        .unwrap();
    assert!(state.get::<bool>(&ok).unwrap());
    assert_eq!((graphics.width(), graphics.height()), (800, 600));

    let full = vec![
        Dynamic::Int(1280),
        Dynamic::Int(720),
        Dynamic::Bool(false),
        Dynamic::Bool(true),
        Dynamic::Bool(true),
        Dynamic::Bool(true),
        Dynamic::Bool(true),
        Dynamic::Bool(true),
        Dynamic::Int(4),
    ];
    let ok = state.call_method(&handle, "SetMode", full).unwrap();
    assert!(state.get::<bool>(&ok).unwrap());
    assert_eq!(graphics.width(), 1280);
    assert!(graphics.borderless() && graphics.resizable() && graphics.high_dpi());
    assert!(graphics.vsync() && graphics.triple_buffer());
    assert_eq!(graphics.multi_sample(), 4);

    let high_dpi = state.get_property(&handle, "highDPI").unwrap();
    assert!(state.get::<bool>(&high_dpi).unwrap());

    let err = state
        .call_method(&handle, "SetMode", (0..7).map(|_| Dynamic::Int(1280)).collect())
        .unwrap_err();
    assert!(matches!(err, ScriptError::Overload(_)));
}

#[test]
fn vertex_elements_are_readable_through_a_const_handle() {
    let (mut state, _context) = setup();
    let buffer = SharedPtr::new(VertexBuffer::new());
    let mask = ElementMask::POSITION | ElementMask::NORMAL | ElementMask::TEXCOORD1;
    assert!(buffer.set_size(4, mask | ElementMask::TEXCOORD2, false));
    let handle = state.push(ConstPtr::new(buffer.clone()));

    let semantic = |name: &str| {
        let value = state.constant(name).unwrap();
        Dynamic::Int(state.get::<u32>(&value).unwrap() as i64)
    };
    let (texcoord, normal, color) = (
        semantic("SEM_TEXCOORD"),
        semantic("SEM_NORMAL"),
        semantic("SEM_COLOR"),
    );
    assert!(matches!(texcoord, Dynamic::Int(4)));
    let texcoord_again = semantic("SEM_TEXCOORD");

    let first = state
        .call_method(&handle, "GetElement", vec![texcoord_again])
        .unwrap();
    let first: VertexElement = state.get(&first).unwrap();
    assert_eq!(first.semantic, ElementSemantic::TexCoord);
    assert_eq!((first.index, first.offset), (0, 24));

    let second = state
        .call_method(&handle, "GetElement", vec![texcoord, Dynamic::Int(1)])
        .unwrap();
    let second: VertexElement = state.get(&second).unwrap();
    assert_eq!((second.index, second.offset), (1, 32));

    let normal = state.call_method(&handle, "GetElement", vec![normal]).unwrap();
    let normal: VertexElement = state.get(&normal).unwrap();
    assert_eq!(normal.offset, 12);

    let missing = state.call_method(&handle, "GetElement", vec![color]).unwrap();
    assert!(missing.is_null());
    let unknown = state
        .call_method(&handle, "GetElement", vec![Dynamic::Int(99), Dynamic::Int(0)])
        .unwrap();
    assert!(unknown.is_null());
    state.release(handle);
}

// =============================================================================
// Bulk data
// =============================================================================

#[test]
fn short_buffers_are_rejected_before_touching_storage() {
    let (mut state, _context) = setup();
    let buffer = SharedPtr::new(IndexBuffer::new());
    assert!(buffer.set_size(4, false, false));
    let handle = state.push(buffer.clone());

    // 4 indices of 2 bytes need 8 bytes.
    let short = state.push(VectorBuffer::from_bytes(vec![0xAB; 7]));
    let ok = state.call_method(&handle, "SetData", vec![short]).unwrap();
    assert!(!state.get::<bool>(&ok).unwrap());
    assert_eq!(buffer.storage().snapshot(), vec![0; 8]);
    state.release(handle);
}

#[test]
fn exact_buffers_round_trip() {
    let (mut state, _context) = setup();
    let handle = state.call_static("IndexBuffer", "new", vec![]).unwrap();
    state
        .call_method(&handle, "SetSize", vec![Dynamic::Int(3), Dynamic::Bool(true)])
        .unwrap();
    let count = state.get_property(&handle, "indexCount").unwrap();
    assert_eq!(state.get::<u32>(&count).unwrap(), 3);

    let bytes: Vec<u8> = (0..12).collect();
    let source = state.push(VectorBuffer::from_bytes(bytes.clone()));
    let ok = state.call_method(&handle, "SetData", vec![source]).unwrap();
    assert!(state.get::<bool>(&ok).unwrap());

    let data = state.call_method(&handle, "GetData", vec![]).unwrap();
    let data: VectorBuffer = state.get(&data).unwrap();
    assert_eq!(data.data(), bytes.as_slice());
    assert_eq!(data.position(), 0);

    let native: SharedPtr<IndexBuffer> = state.get(&handle).unwrap();
    assert_eq!(native.storage().lock_count(), 1);
    assert_eq!(native.storage().unlock_count(), 1);
    state.release(handle);
}

#[test]
fn failed_lock_yields_an_empty_buffer_without_unlock() {
    let (mut state, _context) = setup();
    let buffer = SharedPtr::new(IndexBuffer::new());
    let handle = state.push(buffer.clone());

    let data = state.call_method(&handle, "GetData", vec![]).unwrap();
    let data: VectorBuffer = state.get(&data).unwrap();
    assert_eq!(data.size(), 0);
    assert_eq!(buffer.storage().lock_count(), 0);
    assert_eq!(buffer.storage().unlock_count(), 0);

    let source = state.push(VectorBuffer::from_bytes(vec![1, 2]));
    let ok = state.call_method(&handle, "SetData", vec![source]).unwrap();
    assert!(!state.get::<bool>(&ok).unwrap());
    state.release(handle);
}

#[test]
fn range_set_data_needs_count_elements() {
    let (mut state, _context) = setup();
    let buffer = SharedPtr::new(IndexBuffer::new());
    buffer.set_size(4, false, false);
    let handle = state.push(buffer.clone());

    let args = |state: &mut ScriptState, len: usize| {
        vec![
            state.push(VectorBuffer::from_bytes(vec![0xFF; len])),
            Dynamic::Int(1),
            Dynamic::Int(2),
            Dynamic::Bool(false),
        ]
    };

    let short = args(&mut state, 3);
    let ok = state.call_method(&handle, "SetData", short).unwrap();
    assert!(!state.get::<bool>(&ok).unwrap());

    let exact = args(&mut state, 4);
    let ok = state.call_method(&handle, "SetData", exact).unwrap();
    assert!(state.get::<bool>(&ok).unwrap());
    assert_eq!(buffer.storage().snapshot(), vec![0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0]);
    state.release(handle);
}

// =============================================================================
// Globals and constants
// =============================================================================

#[test]
fn subsystems_are_exposed_as_globals() {
    let (mut state, context) = setup();
    let graphics = context.subsystem::<Graphics>().unwrap();

    let global = state.global("graphics").unwrap();
    let from_global: SharedPtr<Graphics> = state.get(global).unwrap();
    assert!(SharedPtr::ptr_eq(&from_global, &graphics));

    let from_function = state.call_function("GetGraphics", vec![]).unwrap();
    let from_function: SharedPtr<Graphics> = state.get(&from_function).unwrap();
    assert!(SharedPtr::ptr_eq(&from_function, &graphics));

    let renderer = state.call_function("GetRenderer", vec![]).unwrap();
    assert_eq!(state.type_name_of(&renderer), Some("Renderer"));
    state.release(renderer);
}

#[test]
fn global_names_follow_configuration() {
    let context = Context::new();
    engine::initialize(&context);
    let config = BridgeConfig {
        globals: GlobalsConfig {
            renderer: String::from("rend"),
            ..GlobalsConfig::default()
        },
        ..BridgeConfig::default()
    };
    let mut state = ScriptState::with_config(config);
    register_renderer_api(&mut state, &context).unwrap();
    assert!(state.global("rend").is_ok());
    assert!(state.global("renderer").is_err());

    let config = BridgeConfig {
        globals: GlobalsConfig {
            expose_subsystems: false,
            ..GlobalsConfig::default()
        },
        ..BridgeConfig::default()
    };
    let mut state = ScriptState::with_config(config);
    register_renderer_api(&mut state, &context).unwrap();
    assert!(state.global("graphics").is_err());
    assert!(state.call_function("GetGraphics", vec![]).is_ok());
}

#[test]
fn missing_subsystem_is_a_null_global() {
    let context = Context::new();
    engine::initialize(&context);
    context.remove_subsystem::<Graphics>();
    let mut state = ScriptState::new();
    register_renderer_api(&mut state, &context).unwrap();
    assert!(state.global("graphics").unwrap().is_null());
}

#[test]
fn constants_are_exported() {
    let (state, _context) = setup();
    let fov = state.constant("DEFAULT_CAMERA_FOV").unwrap();
    assert_eq!(state.get::<f32>(&fov).unwrap(), engine::DEFAULT_CAMERA_FOV);

    let mask = state.constant("MASK_POSITION").unwrap();
    assert_eq!(state.get::<u32>(&mask).unwrap(), 1);
    assert!(state.constant("VO_DISABLE_SHADOWS").is_some());
    assert!(state.constant("TEXTURE_RENDERTARGET").is_some());
    assert!(state.constant("NOT_A_CONSTANT").is_none());
}

#[test]
fn state_teardown_drops_subsystem_references() {
    let (state, context) = setup();
    let renderer = context.subsystem::<Renderer>().unwrap();
    let with_global = SharedPtr::refs(&renderer);
    drop(state);
    assert_eq!(SharedPtr::refs(&renderer), with_global - 1);
}
