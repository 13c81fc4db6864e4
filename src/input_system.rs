//! Input events and the per-frame input snapshot
//!
//! The host pushes raw [`InputEvent`]s as they arrive. Once per frame the
//! engine calls [`InputSystem::snapshot`], which folds the queued events into
//! an [`InputSnapshot`] that stays read-only for the whole frame.
//!
//! - `click`, `wheel` and `space` are edges: they only describe this frame.
//! - `mouse` is held state: it persists until the pointer leaves the surface
//!   (or, for the Go grid, moves outside the 19x19 board).
//!
//! Pointer positions are mapped through a [`PointerMapping`]; the Go board
//! wants grid cells, the runner wants raw pixels.

/// Position on the surface, either pixels or grid cells depending on mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Integer cell coordinates, for grid-mapped points.
    pub fn cell(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
}

/// Raw event from the host, in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click { x: f64, y: f64 },
    MouseMove { x: f64, y: f64 },
    MouseLeave,
    Wheel(WheelEvent),
    KeyDown(Key),
    KeyUp(Key),
}

/// Pixel offset of the first Go cell from the surface's top-left corner.
pub const GO_GRID_OFFSET: f64 = 23.5;
/// Pixel size of one Go cell.
pub const GO_CELL_SIZE: f64 = 39.55;
/// Highest valid Go cell index on either axis.
pub const GO_MAX_CELL: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMapping {
    /// Positions pass through unchanged.
    #[default]
    Pixel,
    /// Positions become 19x19 board cells; anything outside is absent.
    GoGrid,
}

impl PointerMapping {
    pub fn map(self, x: f64, y: f64) -> Option<Point> {
        match self {
            PointerMapping::Pixel => Some(Point::new(x, y)),
            PointerMapping::GoGrid => {
                let cx = ((x - GO_GRID_OFFSET) / GO_CELL_SIZE).floor();
                let cy = ((y - GO_GRID_OFFSET) / GO_CELL_SIZE).floor();
                if cx < 0.0 || cx > GO_MAX_CELL || cy < 0.0 || cy > GO_MAX_CELL {
                    None
                } else {
                    Some(Point::new(cx, cy))
                }
            }
        }
    }
}

/// What the entities see for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub click: Option<Point>,
    pub mouse: Option<Point>,
    pub wheel: Option<WheelEvent>,
    pub space: bool,
}

impl InputSnapshot {
    /// Forget this frame's edges, keep the held pointer position.
    pub fn clear_transient(&mut self) {
        self.click = None;
        self.wheel = None;
        self.space = false;
    }
}

/// Collects host events between frames.
#[derive(Debug, Default)]
pub struct InputSystem {
    mapping: PointerMapping,
    pending: Vec<InputEvent>,
    mouse: Option<Point>,
}

impl InputSystem {
    pub fn new(mapping: PointerMapping) -> Self {
        InputSystem {
            mapping,
            pending: Vec::new(),
            mouse: None,
        }
    }

    pub fn mapping(&self) -> PointerMapping {
        self.mapping
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Drain queued events into this frame's snapshot.
    ///
    /// When several events of one kind arrived, the last one wins, matching
    /// handlers that simply overwrite a field. A click outside the grid
    /// therefore cancels an earlier in-grid click from the same frame.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();

        for event in self.pending.drain(..) {
            match event {
                InputEvent::Click { x, y } => snapshot.click = self.mapping.map(x, y),
                InputEvent::MouseMove { x, y } => self.mouse = self.mapping.map(x, y),
                InputEvent::MouseLeave => self.mouse = None,
                InputEvent::Wheel(wheel) => snapshot.wheel = Some(wheel),
                InputEvent::KeyDown(Key::Space) => snapshot.space = true,
                InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => {}
            }
        }

        snapshot.mouse = self.mouse;
        snapshot
    }
}
