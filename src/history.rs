use egui::Pos2;

use crate::event::ChangeBus;
use crate::mark::{Mark, MarkId, StampMark, StrokeMark};
use crate::tool::{ToolMode, ToolState};

/// Handle to the mark of an open drag, returned by [`MarkHistory::begin_action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkHandle {
    id: MarkId,
}

impl MarkHandle {
    pub fn id(&self) -> MarkId {
        self.id
    }
}

/// Ordered visible marks plus the marks removed by undo.
///
/// `active` is in insertion order, which is also z-order. `redo` holds the
/// most recently undone mark last. Marks move between the two only as whole
/// units, and any new forward action empties `redo`.
#[derive(Debug, Default)]
pub struct MarkHistory {
    active: Vec<(MarkId, Mark)>,
    redo: Vec<(MarkId, Mark)>,
    open: Option<MarkId>,
    next_id: u64,
    changes: ChangeBus,
}

impl MarkHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the "state changed" signal
    pub fn subscribe(&self, handler: impl FnMut() + 'static) {
        self.changes.subscribe(handler);
    }

    pub(crate) fn notify_changed(&self) {
        self.changes.emit();
    }

    /// Start a new mark at `point` from the current tool settings.
    ///
    /// Any action still open is committed first.
    pub fn begin_action(&mut self, point: Pos2, tools: &ToolState) -> MarkHandle {
        if let Some(open) = self.open.take() {
            log::debug!("Committing mark {:?} before starting a new one", open);
        }

        let mark = match tools.mode() {
            ToolMode::Stroke => Mark::Stroke(StrokeMark::new(point, tools.stroke_width(), tools.color())),
            ToolMode::Stamp { glyph } => Mark::Stamp(StampMark::new(glyph.as_str(), point, tools.stamp_size())),
        };

        let id = MarkId(self.next_id);
        self.next_id += 1;

        if !self.redo.is_empty() {
            log::debug!("Discarding {} redoable marks", self.redo.len());
            self.redo.clear();
        }

        log::debug!("Begin {} {:?} at {:?}", mark.kind(), id, point);
        self.active.push((id, mark));
        self.open = Some(id);
        self.changes.emit();

        MarkHandle { id }
    }

    /// Feed the next drag point to the open mark.
    ///
    /// `handle` must still be open. Extending a committed mark is a
    /// contract violation: it panics in debug builds and is ignored in
    /// release builds.
    pub fn extend_action(&mut self, handle: MarkHandle, point: Pos2) {
        debug_assert!(
            self.open == Some(handle.id),
            "extend of closed mark {:?}",
            handle.id
        );
        if self.open != Some(handle.id) {
            log::warn!("Ignoring extend of closed mark {:?}", handle.id);
            return;
        }

        let Some((_, mark)) = self.active.iter_mut().rev().find(|(id, _)| *id == handle.id) else {
            debug_assert!(false, "open mark {:?} missing from active list", handle.id);
            self.open = None;
            return;
        };

        mark.extend(point);
        self.changes.emit();
    }

    /// Close the drag; the mark is immutable from here on.
    ///
    /// Same contract as [`Self::extend_action`]: a closed handle panics in
    /// debug builds and is ignored in release builds.
    pub fn commit_action(&mut self, handle: MarkHandle) {
        debug_assert!(
            self.open == Some(handle.id),
            "commit of closed mark {:?}",
            handle.id
        );
        if self.open != Some(handle.id) {
            log::warn!("Ignoring commit of closed mark {:?}", handle.id);
            return;
        }

        self.open = None;
        log::debug!("Committed {:?}", handle.id);
        self.changes.emit();
    }

    /// Move the newest visible mark onto the redo stack. No-op when empty.
    pub fn undo(&mut self) {
        self.open = None;
        if let Some(entry) = self.active.pop() {
            log::info!("Undo {} {:?}", entry.1.kind(), entry.0);
            self.redo.push(entry);
        }
        self.changes.emit();
    }

    /// Restore the most recently undone mark. No-op when empty.
    pub fn redo(&mut self) {
        self.open = None;
        if let Some(entry) = self.redo.pop() {
            log::info!("Redo {} {:?}", entry.1.kind(), entry.0);
            self.active.push(entry);
        }
        self.changes.emit();
    }

    /// Remove every mark.
    ///
    /// Clearing is a forward action: the redo stack is emptied as well and
    /// the cleared marks cannot be brought back.
    pub fn clear_all(&mut self) {
        self.open = None;
        log::info!("Clear {} marks ({} redoable dropped)", self.active.len(), self.redo.len());
        self.active.clear();
        self.redo.clear();
        self.changes.emit();
    }

    /// Visible marks, oldest first
    pub fn snapshot(&self) -> impl ExactSizeIterator<Item = &Mark> + DoubleEndedIterator + Clone {
        self.active.iter().map(|(_, mark)| mark)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SketchConfig;

    #[test]
    fn test_ids_are_unique() {
        let tools = ToolState::new(&SketchConfig::default());
        let mut history = MarkHistory::new();
        let a = history.begin_action(Pos2::ZERO, &tools);
        history.commit_action(a);
        let b = history.begin_action(Pos2::ZERO, &tools);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_begin_commits_previous_action() {
        let tools = ToolState::new(&SketchConfig::default());
        let mut history = MarkHistory::new();
        let a = history.begin_action(Pos2::ZERO, &tools);
        let b = history.begin_action(Pos2::new(1.0, 1.0), &tools);
        assert_ne!(history.open, Some(a.id()));
        assert_eq!(history.open, Some(b.id()));
        assert_eq!(history.active_len(), 2);
    }
}
