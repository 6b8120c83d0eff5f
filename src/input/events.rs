use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Input events handed to the engine by the windowing layer.
///
/// Positions are view pixels relative to the viewport's top-left corner;
/// the engine converts to scene coordinates itself where needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Mouse button pressed
    PointerPressed { position: Point, button: MouseButton },
    /// Pointer motion
    PointerMoved { position: Point },
    /// Mouse button released
    PointerReleased { position: Point, button: MouseButton },
    /// Scroll wheel; positive delta zooms in
    Scroll { delta: f64, position: Point },
    /// Viewport/window resize
    Resize { size: Point },
}

impl InputEvent {
    /// Gets the view position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerPressed { position, .. } => Some(*position),
            InputEvent::PointerMoved { position } => Some(*position),
            InputEvent::PointerReleased { position, .. } => Some(*position),
            InputEvent::Scroll { position, .. } => Some(*position),
            InputEvent::Resize { .. } => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerPressed { .. }
                | InputEvent::PointerMoved { .. }
                | InputEvent::PointerReleased { .. }
        )
    }
}
