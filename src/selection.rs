//! Keyboard-driven selection over the displayed result list.

/// Wrapping cursor over the currently displayed results.
///
/// `None` means nothing is selected. Movement wraps at both ends; from the
/// unselected state, moving forward lands on the first item and moving
/// backward on the last. On an empty list every movement is a no-op.
#[derive(Debug, Default)]
pub struct SelectionController {
    index: Option<usize>,
    len: usize,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected index, if any.
    pub fn current(&self) -> Option<usize> {
        self.index
    }

    /// Re-targets the controller at a freshly displayed list of `len` items.
    ///
    /// Selection never survives a result change, even when the same record
    /// reappears in the new list.
    pub fn set_count(&mut self, len: usize) {
        self.len = len;
        self.index = None;
    }

    /// Moves the selection by `delta`, wrapping in both directions.
    ///
    /// From the unselected state the whole delta counts from that same
    /// origin: `move_by(2)` lands on the second item and `move_by(-2)` on
    /// the second-to-last, not one past where a single step would land.
    pub fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let current = match self.index {
            Some(i) => i as isize,
            // Unselected: forward starts before the list, backward after it.
            None if delta < 0 => 0,
            None => -1,
        };
        let len = self.len as isize;
        self.index = Some((current + delta).rem_euclid(len) as usize);
    }

    /// Selects an explicit index; out of range is a no-op.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = Some(index);
        }
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.index = None;
    }
}
