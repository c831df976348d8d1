mod common;

use common::{adapter, doc, empty_doc, Call, HostLog, ScriptedEngine, StyledRuntime};
use docbridge_adapter::{
    AdapterError, AdapterState, ClickTarget, EditorAdapter, EditorChange, HostAnchor,
    InputBatch, RenderStrategy, DEFAULT_LENGTH,
};
use docbridge_types::{PluginDescriptor, StyleRecord};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// ── Construction ────────────────────────────────────────────────

#[test]
fn nothing_mounts_before_first_render() {
    let adapter = adapter(ScriptedEngine::patching());

    assert_eq!(adapter.state(), AdapterState::Unmounted);
    assert_eq!(adapter.render_count(), 0);
    assert_eq!(adapter.anchor().as_str(), "editor");
    assert!(adapter.engine().calls.is_empty());
}

#[test]
fn snapshot_defaults() {
    let adapter = adapter(ScriptedEngine::patching());
    let props = adapter.snapshot();

    assert_eq!(props.data(), None);
    assert_eq!(props.width, DEFAULT_LENGTH);
    assert_eq!(props.height, DEFAULT_LENGTH);
    assert!(props.embedded);
    assert!(!props.read_only);
    assert!(!props.disabled);
    assert_eq!(props.doc_id, 0);
    assert!(props.placeholder.is_none());
}

// ── Value and disabled ──────────────────────────────────────────

#[test]
fn set_value_mounts_then_patches() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.set_value(Some(doc("b"))).unwrap();

    assert_eq!(
        adapter.engine().calls,
        vec![Call::Mount(Some(doc("a"))), Call::Patch(Some(doc("b")))]
    );
    assert_eq!(adapter.state(), AdapterState::Mounted);
    assert_eq!(adapter.instance().unwrap().strategy(), RenderStrategy::Patch);
}

#[test]
fn set_value_none_renders_null_document() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.set_value(None).unwrap();

    assert_eq!(adapter.snapshot().data(), None);
    assert_eq!(adapter.engine().calls.last(), Some(&Call::Patch(None)));
}

#[test]
fn json_null_value_is_no_document() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(Some(serde_json::Value::Null)).unwrap();

    assert_eq!(adapter.engine().calls, vec![Call::Mount(None)]);
}

#[test]
fn value_and_disabled_render_twice_outside_batch() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.set_disabled(true).unwrap();

    assert_eq!(adapter.render_count(), 2);
    assert!(adapter.engine().last_props.as_ref().unwrap().disabled);
}

#[test]
fn value_and_disabled_render_once_in_batch() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter
        .batch(|a| {
            a.set_value(Some(doc("a")))?;
            a.set_disabled(true)
        })
        .unwrap();

    assert_eq!(adapter.render_count(), 1);
    assert_eq!(adapter.engine().calls, vec![Call::Mount(Some(doc("a")))]);
    let props = adapter.engine().last_props.clone().unwrap();
    assert!(props.disabled);
}

#[test]
fn nested_batches_render_once_at_outermost_close() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter
        .batch(|a| {
            a.batch(|inner| inner.set_value(Some(doc("a"))))?;
            assert_eq!(a.render_count(), 0);
            a.set_disabled(true)
        })
        .unwrap();

    assert_eq!(adapter.render_count(), 1);
}

#[test]
fn batch_without_render_requests_does_not_render() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter
        .batch(|a| {
            a.set_width("50%");
            Ok(())
        })
        .unwrap();

    assert_eq!(adapter.render_count(), 0);
    assert_eq!(adapter.snapshot().width, "50%");
}

// ── Configuration inputs ────────────────────────────────────────

#[test]
fn setters_do_not_render_until_inputs_changed() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter.set_width("640px");
    adapter.set_height("");
    adapter.set_read_only(true);
    adapter.set_plugins(vec![PluginDescriptor::new("table"), PluginDescriptor::new("math")]);
    assert_eq!(adapter.render_count(), 0);

    adapter.inputs_changed().unwrap();

    assert_eq!(adapter.render_count(), 1);
    let props = adapter.engine().last_props.clone().unwrap();
    assert_eq!(props.width, "640px");
    assert_eq!(props.height, DEFAULT_LENGTH);
    assert!(props.read_only);
    let names: Vec<_> = props.plugins.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["table", "math"]);
}

#[test]
fn apply_inputs_renders_once() {
    let mut adapter = adapter(ScriptedEngine::patching());

    adapter
        .apply_inputs(InputBatch {
            embedded: Some(false),
            doc_id: Some(7),
            fit_to_content: Some(true),
            placeholder: Some("Start typing".to_string()),
            debug: Some(true),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(adapter.render_count(), 1);
    let props = adapter.snapshot();
    assert!(!props.embedded);
    assert_eq!(props.doc_id, 7);
    assert!(props.fit_to_content);
    assert!(props.debug);
    assert_eq!(props.placeholder.as_deref(), Some("Start typing"));
}

#[test]
fn empty_placeholder_is_none() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_placeholder(Some("hint".to_string()));
    adapter.set_placeholder(Some(String::new()));
    assert!(adapter.snapshot().placeholder.is_none());
}

#[test]
fn snapshot_serializes_without_runtime() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.set_doc_id(3);

    let json = adapter.snapshot().to_json();
    assert_eq!(json["data"], doc("a"));
    assert_eq!(json["docID"], 3);
    assert_eq!(json["width"], "100%");
    assert!(json.get("runtime").is_none());
}

// ── Change notification ─────────────────────────────────────────

#[test]
fn engine_change_reaches_host_then_touched() {
    let mut adapter = adapter(ScriptedEngine::patching());
    let log = HostLog::default();
    log.attach(&mut adapter);
    adapter.set_value(None).unwrap();

    adapter.engine().sink().emit(EditorChange {
        data: Some(doc("hi")),
        is_empty: false,
    });

    assert_eq!(
        log.events(),
        vec![format!("change:{}", doc("hi")), "touched".to_string()]
    );
    assert_eq!(adapter.snapshot().data(), Some(doc("hi")));
}

#[test]
fn empty_document_reaches_host_as_none() {
    let mut adapter = adapter(ScriptedEngine::patching());
    let log = HostLog::default();
    log.attach(&mut adapter);
    adapter.set_value(Some(doc("a"))).unwrap();

    adapter.engine().sink().emit(EditorChange {
        data: Some(empty_doc()),
        is_empty: true,
    });

    assert_eq!(log.events(), vec!["change:null".to_string(), "touched".to_string()]);
    assert_eq!(adapter.snapshot().data(), Some(empty_doc()));
}

#[test]
fn callbacks_default_to_no_ops() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(None).unwrap();

    adapter.engine().sink().emit(EditorChange {
        data: Some(doc("x")),
        is_empty: false,
    });

    assert_eq!(adapter.snapshot().data(), Some(doc("x")));
}

#[test]
fn retained_snapshot_keeps_rendered_document() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(Some(doc("first"))).unwrap();
    let rendered = adapter.engine().last_props.clone().unwrap();

    adapter.engine().sink().emit(EditorChange {
        data: Some(doc("edited")),
        is_empty: false,
    });

    assert_eq!(adapter.render_count(), 1);
    assert_eq!(rendered.data(), Some(doc("first")));
    assert_eq!(adapter.snapshot().data(), Some(doc("edited")));
}

#[test]
fn host_writes_do_not_notify_host() {
    let mut adapter = adapter(ScriptedEngine::patching());
    let log = HostLog::default();
    log.attach(&mut adapter);

    adapter.set_value(Some(doc("a"))).unwrap();

    assert!(log.events().is_empty());
}

// ── Runtime ─────────────────────────────────────────────────────

#[tokio::test]
async fn engine_reaches_styles_through_mounted_runtime() {
    let mut adapter = EditorAdapter::new(
        HostAnchor::new("editor"),
        ScriptedEngine::patching(),
        Arc::new(StyledRuntime::default()),
    );
    adapter.set_value(None).unwrap();

    let runtime = adapter.engine().runtime.clone().unwrap();
    let styles = runtime.styles().expect("runtime serves styles");
    styles.save_style(StyleRecord::named("Normal")).await.unwrap();
    styles.rename_style("normal", "Body").await.unwrap();

    let names: Vec<_> = styles
        .get_styles()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.style_name)
        .collect();
    assert_eq!(names, vec!["Body"]);
}

#[test]
fn stub_runtime_has_no_styles() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(None).unwrap();

    assert!(adapter.engine().runtime.as_ref().unwrap().styles().is_none());
}

// ── Failure handling ────────────────────────────────────────────

#[test]
fn mount_failure_leaves_adapter_unmounted_and_retries() {
    let mut engine = ScriptedEngine::patching();
    engine.failing_mounts = 1;
    let mut adapter = adapter(engine);

    let err = adapter.set_value(Some(doc("a"))).unwrap_err();
    assert!(matches!(err, AdapterError::MountFailed(_)));
    assert_eq!(adapter.state(), AdapterState::Unmounted);

    adapter.set_value(Some(doc("b"))).unwrap();
    assert_eq!(adapter.state(), AdapterState::Mounted);
    assert_eq!(adapter.engine().mounts(), 2);
}

#[test]
fn mount_failure_in_batch_is_reported_at_close() {
    let mut engine = ScriptedEngine::patching();
    engine.failing_mounts = 1;
    let mut adapter = adapter(engine);

    let result = adapter.batch(|a| a.set_value(Some(doc("a"))));

    assert!(matches!(result, Err(AdapterError::MountFailed(_))));
    assert_eq!(adapter.state(), AdapterState::Unmounted);
}

#[test]
fn patch_failure_falls_back_to_remount() {
    let mut engine = ScriptedEngine::patching();
    engine.failing_patches = 1;
    let mut adapter = adapter(engine);

    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.set_value(Some(doc("b"))).unwrap();

    assert_eq!(
        adapter.engine().calls,
        vec![
            Call::Mount(Some(doc("a"))),
            Call::Patch(Some(doc("b"))),
            Call::Unmount(1),
            Call::Mount(Some(doc("b"))),
        ]
    );
    assert_eq!(adapter.state(), AdapterState::Mounted);
}

// ── Remount strategy ────────────────────────────────────────────

#[test]
fn remount_engine_is_torn_down_every_render() {
    let mut adapter = adapter(ScriptedEngine::remounting());

    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.set_disabled(true).unwrap();

    assert_eq!(adapter.instance().unwrap().strategy(), RenderStrategy::Remount);
    assert_eq!(
        adapter.engine().calls,
        vec![
            Call::Mount(Some(doc("a"))),
            Call::Unmount(1),
            Call::Mount(Some(doc("a"))),
        ]
    );
}

// ── Lifecycle ───────────────────────────────────────────────────

#[test]
fn detach_is_idempotent() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(None).unwrap();

    adapter.detach();
    adapter.detach();

    assert_eq!(adapter.engine().unmounts(), 1);
    assert_eq!(adapter.state(), AdapterState::Unmounted);
}

#[test]
fn detach_without_mount_is_a_no_op() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.detach();
    assert!(adapter.engine().calls.is_empty());
}

#[test]
fn render_after_detach_mounts_again() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(Some(doc("a"))).unwrap();
    adapter.detach();

    adapter.set_disabled(false).unwrap();

    assert_eq!(adapter.engine().mounts(), 2);
    assert_eq!(adapter.state(), AdapterState::Mounted);
}

// ── Clicks ──────────────────────────────────────────────────────

#[test]
fn frame_click_focuses_end() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(Some(doc("a"))).unwrap();

    assert!(adapter.handle_click(ClickTarget::Frame));
    assert_eq!(adapter.engine().calls.last(), Some(&Call::FocusEnd(1)));
}

#[test]
fn other_clicks_are_ignored() {
    let mut adapter = adapter(ScriptedEngine::patching());
    adapter.set_value(Some(doc("a"))).unwrap();

    assert!(!adapter.handle_click(ClickTarget::EditingSurface));
    assert!(!adapter.handle_click(ClickTarget::Outside));
    assert_eq!(adapter.engine().calls.len(), 1);
}

#[test]
fn frame_click_before_mount_does_nothing() {
    let mut adapter = adapter(ScriptedEngine::patching());
    assert!(!adapter.handle_click(ClickTarget::Frame));
}
