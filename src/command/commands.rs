use crate::block::Block;
use crate::error::{EditorError, EditorResult};
use crate::input::normalize_binding;
use crate::model::CanvasModel;

/// Whole-collection replacement applied by an undo or a redo
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Replace the block list, keeping the container
    Blocks(Vec<Block>),
    /// Replace the entire model
    Model(CanvasModel),
}

impl Change {
    pub fn apply(&self, model: &mut CanvasModel) {
        match self {
            Change::Blocks(blocks) => model.update_blocks(blocks.clone()),
            Change::Model(replacement) => *model = replacement.clone(),
        }
    }
}

/// An undo/redo pair. Redo is what executing the command does; undo may be
/// absent for commands that can't be reversed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub undo: Option<Change>,
    pub redo: Change,
}

/// What executing a command asks the commander to do
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Apply(Transition),
    Undo,
    Redo,
}

/// Arguments passed along with a command invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CommandArgs {
    #[default]
    None,
    /// Blocks captured when the gesture started
    Drag { before: Vec<Block> },
    /// Replacement for the block with the same id
    UpdateBlock { block: Block },
    UpdateModelValue { model: CanvasModel },
}

/// Every command the editor knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Undo,
    Redo,
    Drag,
    Delete,
    Clear,
    PlaceTop,
    PlaceBottom,
    UpdateBlock,
    UpdateModelValue,
    SelectAll,
}

impl CommandKind {
    pub const ALL: [CommandKind; 10] = [
        CommandKind::Undo,
        CommandKind::Redo,
        CommandKind::Drag,
        CommandKind::Delete,
        CommandKind::Clear,
        CommandKind::PlaceTop,
        CommandKind::PlaceBottom,
        CommandKind::UpdateBlock,
        CommandKind::UpdateModelValue,
        CommandKind::SelectAll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Undo => "undo",
            CommandKind::Redo => "redo",
            CommandKind::Drag => "drag",
            CommandKind::Delete => "delete",
            CommandKind::Clear => "clear",
            CommandKind::PlaceTop => "placeTop",
            CommandKind::PlaceBottom => "placeBottom",
            CommandKind::UpdateBlock => "updateBlock",
            CommandKind::UpdateModelValue => "updateModelValue",
            CommandKind::SelectAll => "selectAll",
        }
    }

    pub fn default_keyboard(&self) -> &'static [&'static str] {
        match self {
            CommandKind::Undo => &["ctrl+z"],
            CommandKind::Redo => &["ctrl+y", "ctrl+shift+z"],
            CommandKind::Delete => &["backspace", "delete", "ctrl+d"],
            CommandKind::PlaceTop => &["ctrl+up"],
            CommandKind::PlaceBottom => &["ctrl+down"],
            CommandKind::SelectAll => &["ctrl+a"],
            CommandKind::Drag
            | CommandKind::Clear
            | CommandKind::UpdateBlock
            | CommandKind::UpdateModelValue => &[],
        }
    }

    /// Whether executions are recorded in the history stack
    pub fn follow_queue(&self) -> bool {
        !matches!(
            self,
            CommandKind::Undo | CommandKind::Redo | CommandKind::SelectAll
        )
    }

    /// Whether the command subscribes to the drag start/end pair on init
    pub fn has_init(&self) -> bool {
        matches!(self, CommandKind::Drag)
    }

    /// Computes the command's effect against the current model. Nothing is
    /// applied here; the commander applies the redo right away.
    pub fn execute(&self, model: &CanvasModel, args: CommandArgs) -> EditorResult<Outcome> {
        let current = || Some(Change::Blocks(model.blocks().to_vec()));
        let transition = match (self, args) {
            (CommandKind::Undo, _) => return Ok(Outcome::Undo),
            (CommandKind::Redo, _) => return Ok(Outcome::Redo),

            (CommandKind::Drag, CommandArgs::Drag { before }) => Transition {
                undo: Some(Change::Blocks(before)),
                redo: Change::Blocks(model.blocks().to_vec()),
            },

            (CommandKind::Delete, CommandArgs::None) => Transition {
                undo: current(),
                redo: Change::Blocks(
                    model.focus_data().unfocus.into_iter().cloned().collect(),
                ),
            },

            (CommandKind::Clear, CommandArgs::None) => Transition {
                undo: current(),
                redo: Change::Blocks(Vec::new()),
            },

            (CommandKind::PlaceTop, CommandArgs::None) => Transition {
                undo: current(),
                redo: Change::Blocks(place_top(model)),
            },

            (CommandKind::PlaceBottom, CommandArgs::None) => Transition {
                undo: current(),
                redo: Change::Blocks(place_bottom(model)),
            },

            (CommandKind::UpdateBlock, CommandArgs::UpdateBlock { block }) => Transition {
                undo: current(),
                redo: Change::Blocks(model.replacing_block(block)?),
            },

            (
                CommandKind::UpdateModelValue,
                CommandArgs::UpdateModelValue { model: replacement },
            ) => Transition {
                undo: Some(Change::Model(model.clone())),
                redo: Change::Model(replacement),
            },

            (CommandKind::SelectAll, CommandArgs::None) => Transition {
                undo: None,
                redo: Change::Blocks(model.map_blocks(|b| b.focus = true)),
            },

            (kind, _) => {
                return Err(EditorError::InvalidArguments {
                    command: kind.name(),
                    expected: kind.expected_args(),
                });
            }
        };
        Ok(Outcome::Apply(transition))
    }

    fn expected_args(&self) -> &'static str {
        match self {
            CommandKind::Drag => "the blocks captured at drag start",
            CommandKind::UpdateBlock => "a replacement block",
            CommandKind::UpdateModelValue => "a replacement model",
            _ => "no arguments",
        }
    }
}

/// A registered command: its kind plus the key chords that trigger it
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    pub keyboard: Vec<String>,
}

impl Command {
    /// Command with its default key bindings
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            keyboard: kind.default_keyboard().iter().map(|k| (*k).to_owned()).collect(),
        }
    }

    /// Replaces the key bindings
    pub fn with_keyboard<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keyboard = bindings
            .into_iter()
            .map(|b| normalize_binding(b.as_ref()))
            .collect();
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn matches_chord(&self, chord: &str) -> bool {
        self.keyboard.iter().any(|binding| binding == chord)
    }
}

/// Focused blocks go one above the highest unfocused block
fn place_top(model: &CanvasModel) -> Vec<Block> {
    let Some(max) = model.focus_data().unfocus.iter().map(|b| b.z_index).max() else {
        return model.blocks().to_vec();
    };
    model.map_blocks(|b| {
        if b.focus {
            b.z_index = max + 1;
        }
    })
}

/// Focused blocks go one below the lowest unfocused block. zIndex stays
/// non-negative: when the target would be negative the unfocused blocks are
/// lifted instead and the focused ones land on 0.
fn place_bottom(model: &CanvasModel) -> Vec<Block> {
    let Some(min) = model.focus_data().unfocus.iter().map(|b| b.z_index).min() else {
        return model.blocks().to_vec();
    };
    let mut target = min - 1;
    let mut lift = 0;
    if target < 0 {
        lift = -target;
        target = 0;
    }
    model.map_blocks(|b| {
        if b.focus {
            b.z_index = target;
        } else {
            b.z_index += lift;
        }
    })
}
