//! Ownership bridge and dispatch tests against a bare [`ScriptState`].

use scriptbridge::engine::{self, Camera, Object, RenderPath};
use scriptbridge::prelude::*;
use scriptbridge::registry::{ClassBuilder, OverloadError};
use scriptbridge::{ConstPtr, Module, TieBreak};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn camera_module() -> Module {
    Module::new("camera_only").class(
        ClassBuilder::<Camera>::new()
            .method("SetFov", Camera::set_fov)
            .const_method("GetFov", Camera::fov)
            .property("fov", Camera::fov, Camera::set_fov)
            .readonly_property("zoom", Camera::zoom),
    )
}

fn scale_module() -> Module {
    Module::new("scale")
        .function("Scale", |x: f64| x * 2.0)
        .function("Scale", |x: f64, negate: bool| if negate { -x } else { x })
}

// =============================================================================
// Reference counting
// =============================================================================

#[test]
fn handles_raise_the_native_count_by_exactly_n() {
    init_logger();
    let mut state = ScriptState::new();
    let camera = SharedPtr::new(Camera::new());
    let before = SharedPtr::refs(&camera);

    let handles: Vec<Dynamic> = (0..4).map(|_| state.push(camera.clone())).collect();
    assert_eq!(SharedPtr::refs(&camera), before + 4);
    assert_eq!(state.live_handles(), 4);

    // Collect out of push order.
    let mut handles = handles;
    let third = handles.remove(2);
    state.release(third);
    assert_eq!(SharedPtr::refs(&camera), before + 3);
    for handle in handles.into_iter().rev() {
        state.release(handle);
    }
    assert_eq!(SharedPtr::refs(&camera), before);
    assert_eq!(state.live_handles(), 0);
}

#[test]
fn aliases_share_one_native_reference() {
    let mut state = ScriptState::new();
    let camera = SharedPtr::new(Camera::new());
    let handle = state.push(camera.clone());
    let alias = state.alias(&handle).unwrap();
    assert_eq!(SharedPtr::refs(&camera), 2);

    state.release(handle);
    assert_eq!(SharedPtr::refs(&camera), 2);
    state.release(alias);
    assert_eq!(SharedPtr::refs(&camera), 1);
}

#[test]
fn dropping_the_state_releases_every_handle() {
    let camera = SharedPtr::new(Camera::new());
    {
        let mut state = ScriptState::new();
        let handle = state.push(camera.clone());
        state.set_global("cam", handle);
        let _leaked = state.push(camera.clone());
        assert_eq!(SharedPtr::refs(&camera), 3);
    }
    assert_eq!(SharedPtr::refs(&camera), 1);
}

#[test]
fn null_objects_push_as_null_without_a_slot() {
    let mut state = ScriptState::new();
    let value = state.push(None::<SharedPtr<Camera>>);
    assert!(value.is_null());
    assert_eq!(state.live_handles(), 0);

    let back: Option<SharedPtr<Camera>> = state.get(&value).unwrap();
    assert!(back.is_none());
}

// =============================================================================
// Type resolution
// =============================================================================

#[test]
fn base_typed_push_resolves_to_derived_type() {
    let mut state = ScriptState::new();
    let object: SharedPtr<dyn Object> = engine::into_object(SharedPtr::new(Camera::new()));
    let handle = state.push(object);
    assert_eq!(state.type_name_of(&handle), Some("Camera"));

    let camera: SharedPtr<Camera> = state.get(&handle).unwrap();
    assert_eq!(camera.fov(), engine::DEFAULT_CAMERA_FOV);
    state.release(handle);
}

#[test]
fn non_object_types_fall_back_to_static_type() {
    let mut state = ScriptState::new();
    let handle = state.push(SharedPtr::new(RenderPath::new()));
    assert_eq!(state.type_name_of(&handle), Some("RenderPath"));
    state.release(handle);
}

// =============================================================================
// Read-only handles
// =============================================================================

#[test]
fn read_only_handles_deny_mutable_access() {
    let mut state = ScriptState::new();
    state.install(camera_module()).unwrap();
    let camera = SharedPtr::new(Camera::new());
    let handle = state.push(ConstPtr::new(camera.clone()));

    let wrapper = state.heap().get(handle.as_object().unwrap()).unwrap();
    assert!(wrapper.is_read_only());
    assert!(wrapper.get().is_none());
    assert!(wrapper.cget().downcast_ref::<Camera>().is_some());

    let fov = state.call_method(&handle, "GetFov", vec![]).unwrap();
    assert_eq!(state.get::<f32>(&fov).unwrap(), engine::DEFAULT_CAMERA_FOV);

    let err = state
        .call_method(&handle, "SetFov", vec![Dynamic::Float(60.0)])
        .unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Overload(OverloadError::ReadOnlyReceiver { .. })
    ));
    assert!(state.set_property(&handle, "fov", Dynamic::Float(60.0)).is_err());
    assert_eq!(camera.fov(), engine::DEFAULT_CAMERA_FOV);
    state.release(handle);
}

#[test]
fn read_only_handle_is_refused_for_mutable_parameters() {
    let mut state = ScriptState::new();
    let handle = state.push(ConstPtr::new(SharedPtr::new(Camera::new())));
    assert!(state.get::<SharedPtr<Camera>>(&handle).is_err());
    assert!(state.get::<ConstPtr<Camera>>(&handle).is_ok());
    state.release(handle);
}

// =============================================================================
// Overload dispatch
// =============================================================================

#[test]
fn argument_count_selects_the_variant() {
    let mut state = ScriptState::new();
    state.install(scale_module()).unwrap();

    let one = state.call_function("Scale", vec![Dynamic::Int(3)]).unwrap();
    assert_eq!(state.get::<f64>(&one).unwrap(), 6.0);

    let two = state
        .call_function("Scale", vec![Dynamic::Float(3.0), Dynamic::Bool(true)])
        .unwrap();
    assert_eq!(state.get::<f64>(&two).unwrap(), -3.0);

    let err = state
        .call_function("Scale", vec![Dynamic::String("3".into())])
        .unwrap_err();
    assert!(matches!(err, ScriptError::Overload(OverloadError::NoMatch { .. })));
    let err = state.call_function("Scale", vec![]).unwrap_err();
    assert!(matches!(err, ScriptError::Overload(OverloadError::NoArity { .. })));
}

#[test]
fn ties_go_to_the_first_registered_variant() {
    let module = Module::new("tie")
        .function("Pick", |_: i32| "int")
        .function("Pick", |_: f64| "number");

    let mut state = ScriptState::new();
    state.install(module).unwrap();
    let picked = state.call_function("Pick", vec![Dynamic::Int(1)]).unwrap();
    assert_eq!(state.get::<String>(&picked).unwrap(), "int");
    let picked = state.call_function("Pick", vec![Dynamic::Float(1.5)]).unwrap();
    assert_eq!(state.get::<String>(&picked).unwrap(), "number");
}

#[test]
fn reject_policy_reports_ambiguous_calls() {
    let module = Module::new("tie")
        .function("Pick", |_: i32| "int")
        .function("Pick", |_: f64| "number");

    let config = BridgeConfig {
        tie_break: TieBreak::Reject,
        ..BridgeConfig::default()
    };
    let mut state = ScriptState::with_config(config);
    state.install(module).unwrap();

    let err = state.call_function("Pick", vec![Dynamic::Int(1)]).unwrap_err();
    assert!(matches!(err, ScriptError::Overload(OverloadError::Ambiguous { .. })));
    assert!(state.call_function("Pick", vec![Dynamic::Float(1.5)]).is_ok());
}

// =============================================================================
// Properties, globals and errors
// =============================================================================

#[test]
fn properties_read_and_write_through_the_handle() {
    let mut state = ScriptState::new();
    state.install(camera_module()).unwrap();
    let camera = SharedPtr::new(Camera::new());
    let handle = state.push(camera.clone());

    state.set_property(&handle, "fov", Dynamic::Int(70)).unwrap();
    assert_eq!(camera.fov(), 70.0);
    let fov = state.get_property(&handle, "fov").unwrap();
    assert_eq!(state.get::<f32>(&fov).unwrap(), 70.0);

    let err = state
        .set_property(&handle, "zoom", Dynamic::Float(2.0))
        .unwrap_err();
    assert!(matches!(err, ScriptError::ReadOnlyProperty { .. }));
    let err = state.get_property(&handle, "missing").unwrap_err();
    assert!(matches!(err, ScriptError::UnknownProperty { .. }));
    state.release(handle);
}

#[test]
fn replacing_a_global_releases_the_old_value() {
    let mut state = ScriptState::new();
    let first = SharedPtr::new(Camera::new());
    let second = SharedPtr::new(Camera::new());

    let value = state.push(first.clone());
    state.set_global("camera", value);
    assert_eq!(SharedPtr::refs(&first), 2);

    let value = state.push(second.clone());
    state.set_global("camera", value);
    assert_eq!(SharedPtr::refs(&first), 1);
    assert_eq!(SharedPtr::refs(&second), 2);

    assert!(state.global("camera").is_ok());
    assert!(state.remove_global("camera"));
    assert_eq!(SharedPtr::refs(&second), 1);
    assert!(matches!(
        state.global("camera"),
        Err(ScriptError::UnknownGlobal(_))
    ));
}

#[test]
fn dispatch_errors_are_typed() {
    let mut state = ScriptState::new();
    state.install(camera_module()).unwrap();

    let err = state.call_function("Nope", vec![]).unwrap_err();
    assert!(matches!(err, ScriptError::UnknownFunction(_)));

    let err = state
        .call_method(&Dynamic::Int(1), "GetFov", vec![])
        .unwrap_err();
    assert!(matches!(err, ScriptError::NotAnObject { actual: "int" }));

    let handle = state.push(SharedPtr::new(Camera::new()));
    let err = state.call_method(&handle, "Explode", vec![]).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::UnknownMethod { type_name: "Camera", .. }
    ));

    let stale = Dynamic::Object(handle.as_object().unwrap());
    state.release(handle);
    let err = state.call_method(&stale, "GetFov", vec![]).unwrap_err();
    assert!(matches!(err, ScriptError::StaleHandle { .. }));
}

#[test]
fn strings_cross_byte_exact() {
    let module = Module::new("strings").function("Len", |s: String| s.len() as u32);
    let mut state = ScriptState::new();
    state.install(module).unwrap();

    let text = String::from("a\0b\u{e9}");
    let value = state.push(text.clone());
    assert_eq!(state.get::<String>(&value).unwrap(), text);

    let len = state.call_function("Len", vec![value]).unwrap();
    assert_eq!(state.get::<u32>(&len).unwrap(), 5);
}

#[test]
fn state_debug_output_names_its_parts() {
    let state = ScriptState::new();
    let debug = format!("{state:?}");
    assert!(debug.contains("ScriptState"));
    assert!(debug.contains("tie_break"));
}
