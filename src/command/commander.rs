use super::{Command, CommandArgs, CommandContext, CommandHistory, CommandKind, Outcome};
use crate::error::{EditorError, EditorResult};
use crate::event::{DragEvents, SubscriptionId};
use crate::input::key_chord;
use crate::model::CanvasModel;

/// Subscriptions made by a command's init hook, released on destroy
#[derive(Debug, Default)]
pub struct Teardown {
    dragstart: Vec<SubscriptionId>,
    dragend: Vec<SubscriptionId>,
}

impl Teardown {
    pub fn dispose(self, events: &DragEvents<CommandContext>) {
        for id in self.dragstart {
            events.dragstart.off(id);
        }
        for id in self.dragend {
            events.dragend.off(id);
        }
    }
}

/// Registry of named commands plus the history they feed
#[derive(Debug)]
pub struct Commander {
    commands: Vec<Command>,
    history: CommandHistory,
    listening: bool,
    teardowns: Vec<Teardown>,
}

impl Default for Commander {
    fn default() -> Self {
        Self::new(CommandHistory::new())
    }
}

impl Commander {
    /// Creates a commander with `undo` and `redo` already registered
    pub fn new(history: CommandHistory) -> Self {
        Self {
            commands: vec![Command::new(CommandKind::Undo), Command::new(CommandKind::Redo)],
            history,
            listening: false,
            teardowns: Vec::new(),
        }
    }

    /// Adds a command. Its init hook only runs on [`Commander::init`].
    pub fn registry(&mut self, command: Command) -> EditorResult<()> {
        if self.get(command.name()).is_some() {
            return Err(EditorError::DuplicateCommand(command.name().to_owned()));
        }
        log::debug!("Registered command `{}` {:?}", command.name(), command.keyboard);
        self.commands.push(command);
        Ok(())
    }

    /// Starts keyboard dispatch and runs every init hook
    pub fn init(&mut self, events: &DragEvents<CommandContext>) {
        if self.listening {
            log::warn!("Commander already initialized");
            return;
        }
        self.listening = true;
        for command in &self.commands {
            if let Some(teardown) = init_hook(command.kind, events) {
                self.teardowns.push(teardown);
            }
        }
        log::info!(
            "Commander initialized with {} commands ({} init hooks)",
            self.commands.len(),
            self.teardowns.len()
        );
    }

    /// Stops keyboard dispatch and releases everything init hooks acquired
    pub fn destroy(&mut self, events: &DragEvents<CommandContext>) {
        for teardown in self.teardowns.drain(..) {
            teardown.dispose(events);
        }
        if self.listening {
            log::info!("Commander destroyed");
        }
        self.listening = false;
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name() == name)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Runs the command registered as `name`. The redo is applied at once;
    /// commands that follow the queue are then recorded, dropping any
    /// undone entries.
    pub fn execute(
        &mut self,
        model: &mut CanvasModel,
        name: &str,
        args: CommandArgs,
    ) -> EditorResult<()> {
        let kind = self
            .get(name)
            .map(|command| command.kind)
            .ok_or_else(|| EditorError::UnknownCommand(name.to_owned()))?;

        match kind.execute(model, args)? {
            Outcome::Undo => {
                if !self.history.undo(model) {
                    log::debug!("Nothing to undo");
                }
            }
            Outcome::Redo => {
                if !self.history.redo(model) {
                    log::debug!("Nothing to redo");
                }
            }
            Outcome::Apply(transition) => {
                transition.redo.apply(model);
                if kind.follow_queue() {
                    self.history.push(transition);
                    log::debug!("`{name}` recorded at {:?}", self.history.current());
                }
            }
        }
        Ok(())
    }

    /// Dispatches a key press to every command bound to its chord.
    /// Returns true when the press was consumed and should go no further.
    pub fn handle_key(
        &mut self,
        model: &mut CanvasModel,
        key: egui::Key,
        modifiers: egui::Modifiers,
        focus_elsewhere: bool,
    ) -> EditorResult<bool> {
        if !self.listening || focus_elsewhere {
            return Ok(false);
        }
        let chord = key_chord(key, modifiers);
        let matched: Vec<&'static str> = self
            .commands
            .iter()
            .filter(|command| command.matches_chord(&chord))
            .map(Command::name)
            .collect();
        if matched.is_empty() {
            return Ok(false);
        }
        for name in matched {
            log::debug!("`{chord}` -> `{name}`");
            self.execute(model, name, CommandArgs::None)?;
        }
        Ok(true)
    }
}

/// Lifecycle hooks of commands that need them
fn init_hook(kind: CommandKind, events: &DragEvents<CommandContext>) -> Option<Teardown> {
    if !kind.has_init() {
        return None;
    }
    // Only `drag` has a hook: record one entry per start/end pair.
    let start = events.dragstart.on(|ctx: &mut CommandContext| {
        ctx.capture_drag_snapshot();
        Ok(())
    });
    let end = events.dragend.on(move |ctx: &mut CommandContext| match ctx.take_drag_snapshot() {
        Some(before) => ctx.execute(kind.name(), CommandArgs::Drag { before }),
        None => {
            log::warn!("dragend without a matching dragstart, nothing recorded");
            Ok(())
        }
    });
    Some(Teardown {
        dragstart: vec![start],
        dragend: vec![end],
    })
}
