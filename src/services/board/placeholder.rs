// Visual state of an empty grid cell

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderVisual {
    Idle,
    /// A compatible drag is in progress somewhere
    CanDrop,
    /// A compatible drag is over this cell
    Hovered,
    /// An assignment into this cell is waiting for the server
    InProgress,
}

/// Pure function of the drag state and the cell's own pending request.
pub fn placeholder_visual(
    drag_active: bool,
    accepts_payload: bool,
    is_over: bool,
    in_progress: bool,
) -> PlaceholderVisual {
    if in_progress {
        return PlaceholderVisual::InProgress;
    }

    match (drag_active && accepts_payload, is_over) {
        (true, true) => PlaceholderVisual::Hovered,
        (true, false) => PlaceholderVisual::CanDrop,
        (false, _) => PlaceholderVisual::Idle,
    }
}
