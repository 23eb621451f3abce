use super::Transition;
use crate::model::CanvasModel;

/// Undo/redo stack with a cursor on the last applied entry
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<Transition>,
    /// Number of entries currently applied; the cursor is `applied - 1`
    applied: usize,
    /// Oldest entries are dropped beyond this many
    limit: Option<usize>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record an already applied transition. Anything that was undone is
    /// discarded first.
    pub fn push(&mut self, transition: Transition) {
        self.entries.truncate(self.applied);
        self.entries.push(transition);
        self.applied += 1;

        if let Some(limit) = self.limit {
            while self.entries.len() > limit.max(1) {
                self.entries.remove(0);
                self.applied -= 1;
            }
        }
    }

    /// Step the cursor back, applying the entry's undo if it has one.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self, model: &mut CanvasModel) -> bool {
        let Some(index) = self.applied.checked_sub(1) else {
            return false;
        };
        match &self.entries[index].undo {
            Some(undo) => undo.apply(model),
            None => log::debug!("history entry {index} is irreversible, skipping its undo"),
        }
        self.applied = index;
        true
    }

    /// Re-apply the entry after the cursor. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, model: &mut CanvasModel) -> bool {
        let Some(entry) = self.entries.get(self.applied) else {
            return false;
        };
        entry.redo.apply(model);
        self.applied += 1;
        true
    }

    /// Index of the last applied entry
    pub fn current(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Change;
    use crate::model::Container;

    fn resize_to(width: f32) -> Transition {
        Transition {
            undo: None,
            redo: Change::Model(CanvasModel::new(Container::new(width, 100.0))),
        }
    }

    #[test]
    fn cursor_tracks_last_applied_entry() {
        let mut history = CommandHistory::new();
        let mut model = CanvasModel::default();
        assert_eq!(history.current(), None);

        history.push(resize_to(1.0));
        history.push(resize_to(2.0));
        assert_eq!(history.current(), Some(1));

        assert!(history.undo(&mut model));
        assert!(history.undo(&mut model));
        assert!(!history.undo(&mut model));
        assert_eq!(history.current(), None);

        assert!(history.redo(&mut model));
        assert_eq!(model.container.width, 1.0);
        assert_eq!(history.current(), Some(0));
    }

    #[test]
    fn push_after_undo_truncates_redo_tail() {
        let mut history = CommandHistory::new();
        let mut model = CanvasModel::default();
        history.push(resize_to(1.0));
        history.push(resize_to(2.0));
        history.undo(&mut model);

        history.push(resize_to(3.0));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = CommandHistory::with_limit(Some(2));
        for width in [1.0, 2.0, 3.0] {
            history.push(resize_to(width));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(1));
        assert_eq!(history.entries()[0], resize_to(2.0));
    }
}
