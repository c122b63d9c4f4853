use super::*;
use crate::config::ExtensionConfig;
use crate::node::HostNode;
use crate::ui::state::FileOperationResult;
use eframe::egui;
use std::path::PathBuf;

/// Run a single headless egui frame of the app.
fn run_frame(app: &mut PreviewApp) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));

    let ctx = egui::Context::default();
    ctx.run(raw, |ctx| {
        app.draw_ui(ctx);
    })
}

fn resolution(app: &PreviewApp) -> String {
    app.node
        .widget(RESOLUTION_WIDGET)
        .map(|w| w.value.as_text())
        .unwrap_or_default()
}

#[test]
fn new_node_is_resized_on_first_frame() {
    let mut app = PreviewApp::default();
    // First built-in entry that is not a header.
    assert_eq!(resolution(&app), "512x512: square");
    assert_eq!(app.node.size(), (NODE_WIDTH, MIN_HEIGHT));

    run_frame(&mut app);

    assert_eq!(app.node.size(), (322.0, 420.0));
    let scene = app.preview().and_then(|p| p.last_scene()).expect("preview drawn");
    assert_eq!(scene.label, "512×512");
}

#[test]
fn sample_image_is_uploaded_and_reported() {
    let mut app = PreviewApp::default();
    assert!(!app.preview().unwrap().image().is_loaded());

    run_frame(&mut app);

    assert!(app.sample_texture.is_some());
    assert_eq!(
        app.preview().unwrap().image().dimensions(),
        Some((SAMPLE_IMAGE_SIZE as u32, SAMPLE_IMAGE_SIZE as u32))
    );
}

#[test]
fn switching_to_custom_shows_fields_and_grows_node() {
    let mut app = PreviewApp::default();
    run_frame(&mut app);

    assert!(app.set_widget_value(RESOLUTION_WIDGET, "Custom".into()));
    assert!(!app.node.widget(CUSTOM_WIDTH_WIDGET).unwrap().hidden);
    run_frame(&mut app);
    assert_eq!(app.node.size(), (322.0, 492.0));

    assert!(app.set_widget_value(CUSTOM_WIDTH_WIDGET, WidgetValue::Number(1000.0)));
    run_frame(&mut app);
    let scene = app.preview().and_then(|p| p.last_scene()).unwrap();
    assert_eq!(scene.label, "1024×512");
}

#[test]
fn setting_the_same_value_does_nothing() {
    let mut app = PreviewApp::default();
    let current = resolution(&app);
    assert!(!app.set_widget_value(RESOLUTION_WIDGET, current.into()));
    assert!(!app.set_widget_value("missing", WidgetValue::Bool(true)));
}

#[test]
fn collapsed_node_draws_no_preview() {
    let mut app = PreviewApp::default();
    app.toggle_collapsed();
    run_frame(&mut app);
    assert!(app.preview().unwrap().last_scene().is_none());
    // The resize waits until the node is expanded again.
    assert_eq!(app.node.size(), (NODE_WIDTH, MIN_HEIGHT));

    app.toggle_collapsed();
    run_frame(&mut app);
    assert_eq!(app.node.size(), (322.0, 420.0));
}

#[test]
fn persisted_state_restores_custom_layout() {
    let mut app = PreviewApp::default();
    app.set_widget_value(RESOLUTION_WIDGET, "Custom".into());
    app.set_widget_value(SNAP_WIDGET, "16".into());
    run_frame(&mut app);

    let json = app.persisted_state().to_json().unwrap();
    let mut restored = PreviewApp::restore(PersistedState::from_json(&json).unwrap());
    assert_eq!(restored.node.id, app.node.id);
    assert_eq!(restored.node.visible_widget_count(), 8);
    assert!(restored.preview().unwrap().widgets().snap.is_some());

    run_frame(&mut restored);
    assert_eq!(restored.node.size(), (322.0, 492.0));
    assert_eq!(
        restored.node.widget(SNAP_WIDGET).map(|w| w.value.as_text()),
        Some("16".to_string())
    );
}

#[test]
fn restored_preset_node_hides_custom_fields() {
    let app = PreviewApp::default();
    let mut state = app.persisted_state();
    // Simulate state saved before visibility was applied.
    for widget in &mut state.node.widgets {
        widget.hidden = false;
    }
    let restored = PreviewApp::restore(state);
    assert!(restored.node.widget(CUSTOM_HEIGHT_WIDGET).unwrap().hidden);
    assert_eq!(restored.node.visible_widget_count(), 5);
}

#[test]
fn from_storage_without_storage_creates_fresh_node() {
    let app = PreviewApp::from_storage(None);
    assert_eq!(app.config, ExtensionConfig::default());
    assert!(app.hooks.is_some());
}

#[test]
fn other_node_type_gets_no_preview() {
    let config = ExtensionConfig {
        node_type: "SomethingElse".to_string(),
        ..ExtensionConfig::default()
    };
    let mut app = PreviewApp::new(config);
    assert!(app.hooks.is_none());

    run_frame(&mut app);
    assert!(app.sample_texture.is_none());
    assert_eq!(app.node.size(), (NODE_WIDTH, MIN_HEIGHT));
}

#[test]
fn loaded_presets_replace_list_and_selection() {
    let mut app = PreviewApp::default();
    let path = PathBuf::from("portrait.txt");
    app.file
        .file_operation_sender
        .send(FileOperationResult::PresetsLoaded(
            path.clone(),
            vec![
                "-- Portrait --".to_string(),
                "832x1216".to_string(),
                "Custom".to_string(),
            ],
        ))
        .unwrap();

    run_frame(&mut app);

    assert_eq!(app.presets.len(), 3);
    assert_eq!(app.config.presets_path, Some(path));
    assert_eq!(resolution(&app), "832x1216");
    let scene = app.preview().and_then(|p| p.last_scene()).unwrap();
    assert_eq!(scene.label, "832×1216");
}

#[test]
fn presets_keep_selection_when_still_offered() {
    let mut app = PreviewApp::default();
    let current = resolution(&app);
    app.apply_presets(vec![current.clone(), "Custom".to_string()], None);
    assert_eq!(resolution(&app), current);
    assert_eq!(app.config.presets_path, None);
}

#[test]
fn failed_file_operation_is_reported() {
    let mut app = PreviewApp::default();
    app.file
        .file_operation_sender
        .send(FileOperationResult::OperationFailed("no such file".to_string()))
        .unwrap();

    run_frame(&mut app);

    assert_eq!(app.file.last_error.as_deref(), Some("no such file"));
    assert_eq!(resolution(&app), "512x512: square");
}

#[test]
fn zoom_scales_node_rect() {
    let mut app = PreviewApp::default();
    run_frame(&mut app);
    let before = app.node_screen_rect();
    app.canvas.zoom_factor = 2.0;
    let after = app.node_screen_rect();
    assert!((after.width() - before.width() * 2.0).abs() < 1e-3);
    assert!(app.title_bar_rect().max.y <= after.min.y + 1e-3);
}
