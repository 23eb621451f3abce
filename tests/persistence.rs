use egui::pos2;
use visual_editor::{
    Block, CanvasModel, ComponentDefinition, ComponentRegistry, Container, EditorConfig,
    EditorError, VisualEditor,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn components() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry
        .register(
            ComponentDefinition::new("input", "Input").with_model_slot("default", "Bound field"),
        )
        .unwrap();
    registry.register(ComponentDefinition::new("text", "Text")).unwrap();
    registry
}

fn create_test_editor(model: CanvasModel) -> VisualEditor {
    init_logger();
    VisualEditor::new(EditorConfig::default(), components(), model).unwrap()
}

#[test]
fn test_export_then_import_keeps_the_page() {
    let block = Block::new(&ComponentDefinition::new("input", "Input"), pos2(30.0, 40.0))
        .with_prop("placeholder", serde_json::json!("Name"))
        .with_binding("default", "username");
    let model = CanvasModel::with_blocks(Container::new(640.0, 480.0), vec![block]);
    let editor = create_test_editor(model);
    let json = editor.export_json().unwrap();
    assert!(json.contains("\"componentKey\": \"input\""));
    assert!(json.contains("\"adjustPosition\": true"));

    let mut other = create_test_editor(CanvasModel::default());
    other.import_json(&json).unwrap();
    assert_eq!(other.model(), editor.model());

    // The import itself is undoable
    other.undo().unwrap();
    assert_eq!(other.model(), &CanvasModel::default());
}

#[test]
fn test_import_fills_missing_fields() {
    let mut editor = create_test_editor(CanvasModel::default());
    editor
        .import_json(
            r#"{
                "container": { "width": 500, "height": 700 },
                "blocks": [
                    { "componentKey": "text", "top": 10, "left": 20, "zIndex": 3 },
                    { "componentKey": "text", "top": 50, "left": 20 }
                ]
            }"#,
        )
        .unwrap();

    let model = editor.model();
    assert_eq!(model.container, Container::new(500.0, 700.0));
    assert_eq!(model.blocks()[0].z_index, 3);
    assert!(!model.blocks()[1].focus);
    // Every block gets its own id
    assert_ne!(model.blocks()[0].id, model.blocks()[1].id);
}

#[test]
fn test_import_rejects_unknown_components() {
    let mut editor = create_test_editor(CanvasModel::default());
    let err = editor
        .import_json(
            r#"{
                "container": { "width": 1, "height": 1 },
                "blocks": [ { "componentKey": "video", "top": 0, "left": 0 } ]
            }"#,
        )
        .unwrap_err();
    assert!(matches!(err, EditorError::UnknownComponent(key) if key == "video"));
    assert_eq!(editor.model(), &CanvasModel::default());
    assert!(editor.history().is_empty());
}

#[test]
fn test_import_rejects_malformed_json() {
    let mut editor = create_test_editor(CanvasModel::default());
    let err = editor.import_json("{ \"blocks\": [").unwrap_err();
    assert!(matches!(err, EditorError::Json(_)));
    assert!(editor.history().is_empty());
}

#[test]
fn test_blank_page_uses_configured_container() {
    init_logger();
    let config =
        EditorConfig::from_json(r#"{ "container": { "width": 375, "height": 667 } }"#).unwrap();
    let editor = VisualEditor::blank(config, components()).unwrap();
    assert_eq!(editor.model().container, Container::new(375.0, 667.0));
    assert!(editor.model().blocks().is_empty());
    assert_eq!(editor.config().snap_tolerance, 5.0);
}
