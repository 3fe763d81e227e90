//! Pointer event and modifier types.
//!
//! Modifiers are threaded explicitly through every handler; the core never
//! reads ambient keyboard state.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state, as reported with each pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether the wheel-zoom modifier is held.
    pub fn zoom_key(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer input, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        modifiers: Modifiers,
    },
    /// Wheel scroll; zooms only while the zoom modifier is held.
    Wheel {
        position: Point,
        delta: f64,
        modifiers: Modifiers,
    },
    /// Two-contact gesture update carrying the current inter-contact
    /// distance.
    Pinch {
        distance: f64,
    },
    /// The gesture dropped below two contacts.
    PinchEnd,
}
