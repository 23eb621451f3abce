use egui::{Key, Modifiers, Pos2, Vec2};

use crate::block::{Block, BlockId};
use crate::command::{
    Command, CommandArgs, CommandContext, CommandHistory, CommandKind, Commander,
};
use crate::component::ComponentRegistry;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::event::DragEvents;
use crate::guideline::GuideMarks;
use crate::input::{InputEvent, PointerTarget};
use crate::model::CanvasModel;
use crate::tools::{BlockDragger, BlockResizer, MenuDragger, ResizeHandle};

/// One editing session: owns the model, its command history, the drag
/// start/end signals and the pointer gestures.
///
/// A renderer draws [`VisualEditor::model`] and [`VisualEditor::marks`] each
/// frame and forwards pointer and key input through
/// [`VisualEditor::handle_input`] (or the individual handlers).
#[derive(Debug)]
pub struct VisualEditor {
    config: EditorConfig,
    components: ComponentRegistry,
    events: DragEvents<CommandContext>,
    ctx: CommandContext,
    dragger: BlockDragger,
    resizer: BlockResizer,
    menu: MenuDragger,
    /// Block that received the last pointer-down
    selected: Option<BlockId>,
    marks: GuideMarks,
}

impl VisualEditor {
    /// Creates a session with every built-in command registered and active
    pub fn new(
        config: EditorConfig,
        components: ComponentRegistry,
        model: CanvasModel,
    ) -> EditorResult<Self> {
        let commands = CommandKind::ALL
            .into_iter()
            .filter(|kind| !matches!(kind, CommandKind::Undo | CommandKind::Redo))
            .map(Command::new);
        Self::with_commands(config, components, model, commands)
    }

    /// Empty page sized by `config.container`
    pub fn blank(config: EditorConfig, components: ComponentRegistry) -> EditorResult<Self> {
        let model = CanvasModel::new(config.container);
        Self::new(config, components, model)
    }

    /// Creates a session with `undo`, `redo` and the given commands. All
    /// registration happens before the commander is initialized.
    pub fn with_commands(
        config: EditorConfig,
        components: ComponentRegistry,
        model: CanvasModel,
        commands: impl IntoIterator<Item = Command>,
    ) -> EditorResult<Self> {
        let mut commander = Commander::new(CommandHistory::with_limit(config.history_limit));
        for command in commands {
            commander.registry(command)?;
        }

        let events = DragEvents::new();
        commander.init(&events);

        Ok(Self {
            config,
            components,
            events,
            ctx: CommandContext::new(model, commander),
            dragger: BlockDragger::new(),
            resizer: BlockResizer::new(),
            menu: MenuDragger::new(),
            selected: None,
            marks: GuideMarks::default(),
        })
    }

    pub fn model(&self) -> &CanvasModel {
        &self.ctx.model
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Model, commander and pending gesture snapshot, as handlers see them
    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    pub fn commander(&self) -> &Commander {
        &self.ctx.commander
    }

    pub fn history(&self) -> &CommandHistory {
        self.ctx.commander.history()
    }

    /// The drag start/end signals, for extra subscribers
    pub fn events(&self) -> &DragEvents<CommandContext> {
        &self.events
    }

    /// Guides to draw for the move in progress
    pub fn marks(&self) -> GuideMarks {
        self.marks
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn is_gesture_active(&self) -> bool {
        self.dragger.is_active() || self.resizer.is_active()
    }

    /// Routes one input event. Returns true when the event was consumed.
    pub fn handle_input(&mut self, event: InputEvent) -> EditorResult<bool> {
        match event {
            InputEvent::PointerDown { target, position, modifiers } => {
                match target {
                    PointerTarget::Container => self.container_pointer_down()?,
                    PointerTarget::Block(id) => {
                        self.block_pointer_down(id, position, modifiers.shift)?
                    }
                    PointerTarget::ResizeHandle { block, handle } => {
                        self.resize_pointer_down(block, handle, position)?
                    }
                }
                Ok(true)
            }
            InputEvent::PointerMove { position, modifiers } => {
                self.pointer_move(position, modifiers.shift)
            }
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::KeyDown { key, modifiers, focus_elsewhere } => {
                self.key_down(key, modifiers, focus_elsewhere)
            }
        }
    }

    /// Pointer-down on the empty container clears the focus
    pub fn container_pointer_down(&mut self) -> EditorResult<()> {
        self.pointer_up()?;
        self.selected = None;
        if self.ctx.model.blocks().iter().any(|b| b.focus) {
            let blocks = self.ctx.model.map_blocks(|b| b.focus = false);
            self.ctx.model.update_blocks(blocks);
        }
        Ok(())
    }

    /// Pointer-down on a block: update the focus, then start moving the
    /// focused blocks with the pressed block as the snap anchor.
    ///
    /// With `shift`, the block joins the focus while at most one block is
    /// focused and toggles otherwise. Without it, an unfocused block becomes
    /// the only focused one; pressing a focused block keeps the focus as is.
    /// A shift-click that unfocuses the pressed block still moves the rest.
    pub fn block_pointer_down(
        &mut self,
        id: BlockId,
        pointer: Pos2,
        shift: bool,
    ) -> EditorResult<()> {
        self.pointer_up()?;
        let model = &self.ctx.model;
        let block = model.require_block(id)?;

        let blocks = if shift {
            if model.focus_data().focus.len() <= 1 {
                Some(model.map_blocks(|b| {
                    if b.id == id {
                        b.focus = true;
                    }
                }))
            } else {
                Some(model.map_blocks(|b| {
                    if b.id == id {
                        b.focus = !b.focus;
                    }
                }))
            }
        } else if !block.focus {
            Some(model.focusing_only(id))
        } else {
            None
        };
        if let Some(blocks) = blocks {
            self.ctx.model.update_blocks(blocks);
        }
        self.selected = Some(id);

        if self.ctx.model.blocks().iter().any(|b| b.focus) {
            self.dragger.pointer_down(&self.ctx.model, id, pointer)?;
        }
        Ok(())
    }

    /// Pointer-down on one of a block's resize handles
    pub fn resize_pointer_down(
        &mut self,
        id: BlockId,
        handle: ResizeHandle,
        pointer: Pos2,
    ) -> EditorResult<()> {
        self.pointer_up()?;
        let block = self.ctx.model.require_block(id)?;
        let component = self.components.require(&block.component_key)?;
        if !component.resize.allows(handle) {
            return Err(EditorError::ResizeNotAllowed {
                component: component.key.clone(),
                handle: handle.as_str(),
            });
        }
        self.resizer.pointer_down(&self.ctx.model, id, handle, pointer)
    }

    /// Pointer moved with the button held. `shift` locks a move gesture to
    /// its dominant axis. Returns false when no gesture is in progress.
    pub fn pointer_move(&mut self, pointer: Pos2, shift: bool) -> EditorResult<bool> {
        if self.dragger.is_active() {
            let tolerance = self.config.snap_tolerance;
            let step = self
                .dragger
                .pointer_move(&self.ctx.model, pointer, shift, tolerance);
            let Some(step) = step else {
                return Ok(false);
            };
            if step.started {
                self.events.dragstart.emit(&mut self.ctx)?;
            }
            self.ctx.model.update_blocks(step.blocks);
            self.marks = step.marks;
            Ok(true)
        } else if self.resizer.is_active() {
            let Some(step) = self.resizer.pointer_move(&self.ctx.model, pointer) else {
                return Ok(false);
            };
            if step.started {
                self.events.dragstart.emit(&mut self.ctx)?;
            }
            self.ctx.model.update_blocks(step.blocks);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Ends the gesture in progress, firing `dragend` if anything moved.
    /// Returns false when no gesture was in progress.
    pub fn pointer_up(&mut self) -> EditorResult<bool> {
        self.marks = GuideMarks::default();
        let moved = if self.dragger.is_active() {
            self.dragger.pointer_up()
        } else if self.resizer.is_active() {
            self.resizer.pointer_up()
        } else {
            return Ok(false);
        };
        if moved {
            self.events.dragend.emit(&mut self.ctx)?;
        }
        Ok(true)
    }

    /// Keyboard shortcut dispatch. Returns true when a command consumed the
    /// press; the caller should then stop it from reaching anything else.
    pub fn key_down(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        focus_elsewhere: bool,
    ) -> EditorResult<bool> {
        let ctx = &mut self.ctx;
        ctx.commander.handle_key(&mut ctx.model, key, modifiers, focus_elsewhere)
    }

    /// A component started being dragged out of the palette
    pub fn begin_menu_drag(&mut self, component_key: &str) -> EditorResult<()> {
        self.menu.drag_start(&self.components, component_key)?;
        self.events.dragstart.emit(&mut self.ctx)
    }

    /// The palette drag was released over the container at `position`
    /// (container coordinates). Returns the new block.
    pub fn drop_on_container(&mut self, position: Pos2) -> EditorResult<Option<BlockId>> {
        let Some(blocks) = self.menu.drop(&self.components, &self.ctx.model, position)? else {
            return Ok(None);
        };
        let id = blocks.last().map(|block| block.id);
        self.ctx.model.update_blocks(blocks);
        self.events.dragend.emit(&mut self.ctx)?;
        Ok(id)
    }

    /// The palette drag ended, dropped or not. A drag that was never
    /// dropped forgets the snapshot its `dragstart` captured.
    pub fn end_menu_drag(&mut self) {
        if let Some(key) = self.menu.current() {
            log::debug!("Palette drag of `{key}` cancelled");
            self.ctx.take_drag_snapshot();
        }
        self.menu.drag_end();
    }

    /// First layout of a dropped block with its measured natural size.
    /// Returns false when the block was already laid out.
    pub fn layout_block(&mut self, id: BlockId, measured: Vec2) -> EditorResult<bool> {
        let mut block = self.ctx.model.require_block(id)?.clone();
        if !block.adjust_to_measured(measured) {
            return Ok(false);
        }
        let blocks = self.ctx.model.replacing_block(block)?;
        self.ctx.model.update_blocks(blocks);
        Ok(true)
    }

    /// Runs a registered command by name
    pub fn execute(&mut self, name: &str, args: CommandArgs) -> EditorResult<()> {
        self.ctx.execute(name, args)
    }

    pub fn undo(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::Undo.name(), CommandArgs::None)
    }

    pub fn redo(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::Redo.name(), CommandArgs::None)
    }

    /// Removes the focused blocks
    pub fn delete(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::Delete.name(), CommandArgs::None)
    }

    pub fn clear(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::Clear.name(), CommandArgs::None)
    }

    pub fn place_top(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::PlaceTop.name(), CommandArgs::None)
    }

    pub fn place_bottom(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::PlaceBottom.name(), CommandArgs::None)
    }

    pub fn select_all(&mut self) -> EditorResult<()> {
        self.execute(CommandKind::SelectAll.name(), CommandArgs::None)
    }

    /// Replaces the block with the same id, e.g. after a property edit
    pub fn update_block(&mut self, block: Block) -> EditorResult<()> {
        self.execute(CommandKind::UpdateBlock.name(), CommandArgs::UpdateBlock { block })
    }

    pub fn update_model_value(&mut self, model: CanvasModel) -> EditorResult<()> {
        self.execute(CommandKind::UpdateModelValue.name(), CommandArgs::UpdateModelValue { model })
    }

    /// Replaces the page with `json`, as an undoable edit
    pub fn import_json(&mut self, json: &str) -> EditorResult<()> {
        let model = CanvasModel::from_json(json)?;
        for block in model.blocks() {
            self.components.require(&block.component_key)?;
        }
        log::info!("Importing page with {} blocks", model.blocks().len());
        self.selected = None;
        self.update_model_value(model)
    }

    pub fn export_json(&self) -> EditorResult<String> {
        self.ctx.model.to_json()
    }

    /// Releases the commander's subscriptions and stops keyboard dispatch
    pub fn destroy(&mut self) {
        self.ctx.commander.destroy(&self.events);
    }
}

impl Drop for VisualEditor {
    fn drop(&mut self) {
        self.destroy();
    }
}
