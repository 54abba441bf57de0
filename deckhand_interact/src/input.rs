// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame pointer input snapshot.

use kurbo::Point;

/// Pointer state polled once per frame, in layout-plane coordinates.
///
/// `pressed` and `released` are edge flags (true only on the frame the edge
/// occurred); `held` is level-triggered and is expected to be true on the
/// press frame and false on the release frame's successor. `draw_pressed`
/// carries the edge-detected keyboard "draw" trigger.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerFrame {
    /// Pointer position in the layout plane.
    pub position: Point,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button is down.
    pub held: bool,
    /// Primary button went up this frame.
    pub released: bool,
    /// The draw key went down this frame.
    pub draw_pressed: bool,
}

impl PointerFrame {
    /// A frame with the pointer at `position` and no button activity.
    #[must_use]
    pub const fn idle(position: Point) -> Self {
        Self {
            position,
            pressed: false,
            held: false,
            released: false,
            draw_pressed: false,
        }
    }

    /// The frame the primary button goes down at `position`.
    #[must_use]
    pub const fn press(position: Point) -> Self {
        Self {
            pressed: true,
            held: true,
            ..Self::idle(position)
        }
    }

    /// A frame with the primary button held at `position`.
    #[must_use]
    pub const fn hold(position: Point) -> Self {
        Self {
            held: true,
            ..Self::idle(position)
        }
    }

    /// The frame the primary button goes up at `position`.
    #[must_use]
    pub const fn release(position: Point) -> Self {
        Self {
            released: true,
            ..Self::idle(position)
        }
    }

    /// Mark the draw key as pressed this frame.
    #[must_use]
    pub const fn with_draw(mut self) -> Self {
        self.draw_pressed = true;
        self
    }
}
