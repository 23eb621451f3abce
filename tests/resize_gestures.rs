use egui::{Modifiers, pos2, vec2};
use visual_editor::{
    Block, BlockId, CanvasModel, ComponentDefinition, ComponentRegistry, Container, EditorConfig,
    EditorError, InputEvent, PointerTarget, ResizeCapability, ResizeHandle, VisualEditor,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn components() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register(ComponentDefinition::new("text", "Text")).unwrap();
    registry
        .register(
            ComponentDefinition::new("button", "Button")
                .with_resize(ResizeCapability { width: true, height: false }),
        )
        .unwrap();
    registry
        .register(ComponentDefinition::new("input", "Input").with_resize(ResizeCapability::BOTH))
        .unwrap();
    registry
}

fn create_test_editor(key: &str) -> (VisualEditor, BlockId) {
    init_logger();
    let mut block = Block::new(&ComponentDefinition::new(key, key), pos2(100.0, 100.0));
    block.width = 50.0;
    block.height = 40.0;
    block.adjust_position = false;
    let id = block.id;
    let model = CanvasModel::with_blocks(Container::default(), vec![block]);
    let editor = VisualEditor::new(EditorConfig::default(), components(), model).unwrap();
    (editor, id)
}

#[test]
fn test_top_left_handle_keeps_bottom_right_pinned() {
    let (mut editor, id) = create_test_editor("input");

    editor.resize_pointer_down(id, ResizeHandle::TOP_LEFT, pos2(100.0, 100.0)).unwrap();
    editor.pointer_move(pos2(105.0, 105.0), false).unwrap();
    editor.pointer_move(pos2(110.0, 110.0), false).unwrap();
    editor.pointer_up().unwrap();

    let block = editor.model().block(id).unwrap();
    assert_eq!(block.position(), pos2(110.0, 110.0));
    assert_eq!(block.size(), vec2(40.0, 30.0));
    assert_eq!(block.rect().max, pos2(150.0, 140.0));
    assert!(block.has_resize);
    assert_eq!(editor.history().len(), 1);

    editor.undo().unwrap();
    let block = editor.model().block(id).unwrap();
    assert_eq!(block.rect(), egui::Rect::from_min_size(pos2(100.0, 100.0), vec2(50.0, 40.0)));
    assert!(!block.has_resize);
}

#[test]
fn test_edge_handle_ignores_other_axis() {
    let (mut editor, id) = create_test_editor("button");

    editor.resize_pointer_down(id, ResizeHandle::RIGHT, pos2(150.0, 120.0)).unwrap();
    editor.pointer_move(pos2(170.0, 200.0), false).unwrap();
    editor.pointer_up().unwrap();

    let block = editor.model().block(id).unwrap();
    assert_eq!(block.position(), pos2(100.0, 100.0));
    assert_eq!(block.size(), vec2(70.0, 40.0));
}

#[test]
fn test_handles_follow_component_capability() {
    let (mut editor, id) = create_test_editor("button");
    let err = editor
        .resize_pointer_down(id, ResizeHandle::TOP, pos2(125.0, 100.0))
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::ResizeNotAllowed { ref component, handle: "top" } if component == "button"
    ));
    assert!(!editor.is_gesture_active());

    let (mut editor, id) = create_test_editor("text");
    let result = editor.resize_pointer_down(id, ResizeHandle::BOTTOM_RIGHT, pos2(150.0, 140.0));
    assert!(matches!(result, Err(EditorError::ResizeNotAllowed { .. })));
}

#[test]
fn test_press_without_move_is_not_recorded() {
    let (mut editor, id) = create_test_editor("input");
    editor
        .handle_input(InputEvent::PointerDown {
            target: PointerTarget::ResizeHandle { block: id, handle: ResizeHandle::BOTTOM },
            position: pos2(125.0, 140.0),
            modifiers: Modifiers::NONE,
        })
        .unwrap();
    editor
        .handle_input(InputEvent::PointerUp { position: pos2(125.0, 140.0) })
        .unwrap();

    assert!(editor.history().is_empty());
    assert!(!editor.model().block(id).unwrap().has_resize);
}
