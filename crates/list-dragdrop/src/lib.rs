//! List DragDrop Utilities
//!
//! Framework-agnostic drag-and-drop tracking for reorderable lists.
//! Feed it pointer events; it reports where the dragged row was dropped.
//! Uses a movement threshold to distinguish click from drag.

use serde::{Deserialize, Serialize};

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// Pointer is over the row at this index (take its place)
    Item(usize),
    /// Pointer is over the gap before the row at this index
    /// (`Zone(len)` is the gap after the last row)
    Zone(usize),
}

impl DropTarget {
    /// Array index the dragged row ends up at once it is removed from
    /// `source` and reinserted
    pub fn destination_for(self, source: usize) -> usize {
        match self {
            DropTarget::Item(index) => index,
            DropTarget::Zone(gap) if gap > source => gap - 1,
            DropTarget::Zone(gap) => gap,
        }
    }
}

/// Outcome of a finished drag gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResult {
    /// Index the row was picked up from
    pub source: usize,
    /// Index it should land at; `None` when released outside every target
    pub destination: Option<usize>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: u32 = 5;

/// Drag state of one list
#[derive(Clone, Debug)]
pub struct DragTracker {
    threshold: u32,
    /// Pending row index (pressed but not yet dragging)
    pending: Option<usize>,
    dragging: Option<usize>,
    target: Option<DropTarget>,
    start_x: i32,
    start_y: i32,
    drag_just_ended: bool,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self::with_threshold(DRAG_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold,
            pending: None,
            dragging: None,
            target: None,
            start_x: 0,
            start_y: 0,
            drag_just_ended: false,
        }
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn target(&self) -> Option<DropTarget> {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Primary button pressed on a row: record pending drag with start position
    pub fn pointer_down(&mut self, index: usize, x: i32, y: i32) {
        self.pending = Some(index);
        self.dragging = None;
        self.target = None;
        self.start_x = x;
        self.start_y = y;
        self.drag_just_ended = false;
    }

    /// Pointer moved; starts the drag once it moved beyond the threshold.
    /// Returns true on the move that started the drag.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        if self.dragging.is_some() {
            return false;
        }
        let Some(pending) = self.pending else {
            return false;
        };
        let dx = x.abs_diff(self.start_x);
        let dy = y.abs_diff(self.start_y);
        if dx > self.threshold || dy > self.threshold {
            self.dragging = Some(pending);
            return true;
        }
        false
    }

    /// Pointer entered a drop target
    pub fn enter(&mut self, target: DropTarget) {
        let Some(dragging) = self.dragging else {
            return;
        };
        // Don't allow dropping on self
        if target == DropTarget::Item(dragging) {
            return;
        }
        self.target = Some(target);
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        if self.dragging.is_some() {
            self.target = None;
        }
    }

    /// Button released. `None` when the press never became a drag (a click).
    pub fn pointer_up(&mut self) -> Option<DropResult> {
        let dragging = self.dragging;
        let target = self.target;
        self.end_drag();

        let source = dragging?;
        self.drag_just_ended = true;
        Some(DropResult {
            source,
            destination: target.map(|t| t.destination_for(source)),
        })
    }

    /// Abort without a drop (e.g. Escape)
    pub fn cancel(&mut self) {
        self.end_drag();
    }

    /// True once right after a drag ended, so the click that follows the
    /// release can be swallowed
    pub fn take_drag_just_ended(&mut self) -> bool {
        std::mem::take(&mut self.drag_just_ended)
    }

    fn end_drag(&mut self) {
        self.pending = None;
        self.dragging = None;
        self.target = None;
    }
}
