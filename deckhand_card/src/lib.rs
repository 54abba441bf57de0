// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deckhand Card: shared vocabulary for the Deckhand interaction crates.
//!
//! This crate defines the small, copyable handles and value types that every
//! other Deckhand crate speaks in:
//!
//! - [`CardId`] / [`ZoneId`]: opaque handles for cards and drop zones.
//! - [`CardData`]: the read-only content behind a card (name, art reference,
//!   cost, power, and the other printed fields). The interaction layer never
//!   mutates it.
//! - [`Phase`]: the card lifecycle — exactly one of `InHand`, `Dragging`,
//!   `PlacedInZone`, or `Discarded` holds at any time.
//! - [`Pose`]: a 2D transform (position, rotation angle, uniform scale) in the
//!   layout plane.
//! - [`stacking`]: the reserved visual stacking bands. Stacking orders control
//!   draw order (higher draws on top) and must be unique among simultaneously
//!   visible cards so that topmost-card resolution is unambiguous.
//!
//! Geometry is expressed with [`kurbo`] types, which matches the rest of the
//! Deckhand crates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use kurbo::{Point, Rect, Size, Vec2};

/// Opaque handle identifying a card instance.
///
/// Identity only; all card state lives in whichever component currently owns
/// the card (the hand while `InHand`, the drop zone once placed or discarded).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

/// Opaque handle identifying a drop zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u32);

/// Lifecycle phase of a card.
///
/// Exactly one phase holds at a time; transitions are driven by the
/// interaction controller once per frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// In the ordered hand sequence, laid out along the hand curve.
    InHand,
    /// Following the pointer; at most one card is in this phase at a time.
    Dragging,
    /// Accepted by a drop zone; only click interaction remains.
    PlacedInZone,
    /// In the discard pile; all interaction is suppressed.
    Discarded,
}

/// Read-only card content, supplied by the (external) content layer.
///
/// The interaction core consumes this for display and effect-hook context and
/// never writes to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardData {
    /// Display name.
    pub name: String,
    /// Reference to the card's artwork (resolved by the renderer).
    pub art: String,
    /// Play cost.
    pub cost: i32,
    /// Printed power.
    pub power: i32,
    /// Printed attribute.
    pub attribute: i32,
    /// Counter value.
    pub counter: i32,
    /// Color identity.
    pub color: i32,
    /// Card type line.
    pub kind: String,
    /// Free-text effect description.
    pub effect: String,
}

/// A 2D transform in the layout plane: position, rotation, uniform scale.
///
/// The rotation angle is in degrees, counterclockwise, with 0° meaning the
/// card's up axis points along +y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    /// Position of the card's center.
    pub position: Point,
    /// Rotation angle in degrees, counterclockwise.
    pub angle: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Pose {
    /// An upright, unscaled pose at `position`.
    #[must_use]
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            angle: 0.0,
            scale: 1.0,
        }
    }

    /// The card's up axis as a unit vector.
    #[must_use]
    pub fn up(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians() + core::f64::consts::FRAC_PI_2)
    }

    /// Axis-aligned hit region for a card of `size` centered on this pose.
    ///
    /// Hit regions stay axis-aligned; rotation and scale are visual and do not
    /// grow the region.
    #[must_use]
    pub fn bounds(&self, size: Size) -> Rect {
        Rect::from_center_size(self.position, size)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Point::ZERO)
    }
}

/// Visual stacking order; higher draws on top.
pub type StackingOrder = i32;

/// Reserved stacking bands.
///
/// Each zone type reserves a distinct numeric band so its contents never
/// visually collide with hand contents or with another zone's contents.
pub mod stacking {
    use super::StackingOrder;

    /// Gap between adjacent hand cards, leaving room for transient layers.
    pub const HAND_STEP: StackingOrder = 2;
    /// Boost applied to the hovered, popped-out hand card.
    pub const HOVER_BOOST: StackingOrder = 100;
    /// Band for a card placed in the leader slot.
    pub const LEADER_BAND: StackingOrder = 200;
    /// Band for a card placed in a character slot.
    pub const CHARACTER_BAND: StackingOrder = 300;
    /// Base band for the discard pile; arrivals stack upward from here.
    pub const DISCARD_BAND: StackingOrder = 500;
    /// The layer a dragged card is boosted to, above everything else.
    pub const DRAG_LAYER: StackingOrder = 1000;

    /// Stacking order implied by a card's position in the hand sequence.
    #[must_use]
    pub fn hand_order(position: usize) -> StackingOrder {
        position as StackingOrder * HAND_STEP
    }
}
