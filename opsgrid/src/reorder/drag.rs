//! Transient drag state shared by column and row reordering.

/// Which side of the target the dragged item lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPosition {
    #[default]
    Before,
    After,
}

impl DropPosition {
    /// Drop side from the pointer position over a target.
    ///
    /// `start` and `extent` describe the target along the drag axis; the
    /// first half means "before".
    pub fn from_pointer(pointer: f32, start: f32, extent: f32) -> Self {
        if pointer < start + extent / 2.0 {
            Self::Before
        } else {
            Self::After
        }
    }
}

/// Drag state machine: idle until a drag starts, back to idle on drop or
/// cancel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        dragged_id: String,
        drag_over_id: Option<String>,
        drop_position: DropPosition,
    },
}

/// A committed drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub source_id: String,
    pub target_id: String,
    pub position: DropPosition,
}

/// Props for a row's drag handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragHandleProps {
    /// Row the handle belongs to.
    pub row_id: String,
    /// Whether the handle may start a drag.
    pub draggable: bool,
    /// Whether this row is the one being dragged.
    pub dragging: bool,
    /// Drop indicator to draw on this row while something hovers it.
    pub drop_indicator: Option<DropPosition>,
}

/// Drives one [`DragState`].
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a drag is in flight.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// ID being dragged.
    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { dragged_id, .. } => Some(dragged_id),
            DragState::Idle => None,
        }
    }

    /// Current hover target and side.
    pub fn drag_over(&self) -> Option<(&str, DropPosition)> {
        match &self.state {
            DragState::Dragging {
                drag_over_id: Some(id),
                drop_position,
                ..
            } => Some((id, *drop_position)),
            _ => None,
        }
    }

    /// Start dragging `id`. Ignored while another drag is in flight.
    pub fn start(&mut self, id: &str) -> bool {
        if self.is_dragging() {
            log::debug!("[drag] start '{}' ignored: drag in flight", id);
            return false;
        }
        log::trace!("[drag] start '{}'", id);
        self.state = DragState::Dragging {
            dragged_id: id.to_string(),
            drag_over_id: None,
            drop_position: DropPosition::Before,
        };
        true
    }

    /// Update the hover target. Hovering the dragged item clears the target.
    pub fn hover(&mut self, target_id: &str, position: DropPosition) {
        if let DragState::Dragging {
            dragged_id,
            drag_over_id,
            drop_position,
        } = &mut self.state
        {
            if dragged_id == target_id {
                *drag_over_id = None;
            } else {
                *drag_over_id = Some(target_id.to_string());
                *drop_position = position;
            }
        }
    }

    /// Pointer left every target.
    pub fn leave(&mut self) {
        if let DragState::Dragging { drag_over_id, .. } = &mut self.state {
            *drag_over_id = None;
        }
    }

    /// Finish the drag. Returns the drop when there is a valid target.
    pub fn drop(&mut self) -> Option<DropTarget> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                dragged_id,
                drag_over_id: Some(target_id),
                drop_position,
            } => Some(DropTarget {
                source_id: dragged_id,
                target_id,
                position: drop_position,
            }),
            DragState::Dragging { dragged_id, .. } => {
                log::trace!("[drag] '{}' dropped without a target", dragged_id);
                None
            }
            DragState::Idle => None,
        }
    }

    /// Abandon the drag (Escape, pointer left the document).
    pub fn cancel(&mut self) {
        if let DragState::Dragging { dragged_id, .. } = &self.state {
            log::trace!("[drag] '{}' cancelled", dragged_id);
        }
        self.state = DragState::Idle;
    }

    /// Drag handle props for `row_id`.
    pub fn handle_props(&self, row_id: &str, draggable: bool) -> DragHandleProps {
        DragHandleProps {
            row_id: row_id.to_string(),
            draggable,
            dragging: self.dragged_id() == Some(row_id),
            drop_indicator: self
                .drag_over()
                .filter(|(id, _)| *id == row_id)
                .map(|(_, position)| position),
        }
    }
}
