// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone capability trait and the two concrete zone shapes.

use alloc::vec::Vec;
use deckhand_card::{CardId, Phase, StackingOrder, stacking};
use kurbo::{Point, Rect};

/// Where and how an accepted card ends up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Position the card is placed at (the zone's anchor, or its center).
    pub position: Point,
    /// Stacking order in the zone's reserved band.
    pub order: StackingOrder,
    /// Lifecycle phase the card enters on placement.
    pub phase: Phase,
}

/// Capability exposed by every placement target.
///
/// All decisions are boolean queries; a zone never signals failure. Callers
/// must check [`DropZone::can_accept`] before [`DropZone::on_drop`].
pub trait DropZone {
    /// Spatial bounds used for release-time overlap probing.
    fn bounds(&self) -> Rect;

    /// Placement anchor: the configured anchor point, or the zone's center.
    fn anchor(&self) -> Point;

    /// Whether the zone can accept `card` right now.
    fn can_accept(&self, card: CardId) -> bool;

    /// Record `card` as held by this zone and return its placement.
    fn on_drop(&mut self, card: CardId) -> Placement;

    /// Whether cards held by this zone may be discarded by click.
    fn is_discardable(&self) -> bool;

    /// Vacate `card` from this zone, if it holds it.
    ///
    /// Returns `true` when occupancy changed. Every zone variant implements
    /// this uniformly so the discard flow never inspects concrete types.
    fn remove_card(&mut self, card: CardId) -> bool;
}

/// Which single-occupancy slot a [`SlotZone`] is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// A character slot.
    Character,
    /// The leader slot.
    Leader,
}

impl SlotKind {
    /// The stacking band reserved for this slot kind.
    #[must_use]
    pub const fn band(self) -> StackingOrder {
        match self {
            Self::Character => stacking::CHARACTER_BAND,
            Self::Leader => stacking::LEADER_BAND,
        }
    }
}

/// An exclusive single-card drop zone (character or leader slot).
///
/// Invariant: `occupied ⇔ occupant.is_some()`; the occupancy record here is
/// the source of truth for which card the slot holds.
#[derive(Clone, Debug)]
pub struct SlotZone {
    kind: SlotKind,
    bounds: Rect,
    anchor: Option<Point>,
    band_offset: StackingOrder,
    occupant: Option<CardId>,
}

impl SlotZone {
    /// Create an empty slot with the given bounds and no explicit anchor.
    #[must_use]
    pub const fn new(kind: SlotKind, bounds: Rect) -> Self {
        Self {
            kind,
            bounds,
            anchor: None,
            band_offset: 0,
            occupant: None,
        }
    }

    /// Set an explicit placement anchor.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Offset this slot's placements within its kind's band.
    ///
    /// Slots of one kind share a band; distinct offsets keep placed cards'
    /// stacking orders globally unique. A [`crate::ZoneSet`] assigns these
    /// automatically on insertion.
    #[must_use]
    pub const fn with_band_offset(mut self, offset: StackingOrder) -> Self {
        self.band_offset = offset;
        self
    }

    /// The slot kind.
    #[must_use]
    pub const fn kind(&self) -> SlotKind {
        self.kind
    }

    /// The card currently occupying the slot, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<CardId> {
        self.occupant
    }
}

impl DropZone for SlotZone {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn anchor(&self) -> Point {
        self.anchor.unwrap_or_else(|| self.bounds.center())
    }

    fn can_accept(&self, _card: CardId) -> bool {
        self.occupant.is_none()
    }

    fn on_drop(&mut self, card: CardId) -> Placement {
        debug_assert!(
            self.occupant.is_none(),
            "on_drop on an occupied slot; caller skipped can_accept"
        );
        self.occupant = Some(card);
        Placement {
            position: self.anchor(),
            order: self.kind.band() + self.band_offset,
            phase: Phase::PlacedInZone,
        }
    }

    fn is_discardable(&self) -> bool {
        true
    }

    fn remove_card(&mut self, card: CardId) -> bool {
        if self.occupant == Some(card) {
            self.occupant = None;
            true
        } else {
            false
        }
    }
}

/// The discard pile: an unbounded ordered stack of discarded cards.
#[derive(Clone, Debug)]
pub struct DiscardPile {
    bounds: Rect,
    anchor: Option<Point>,
    cards: Vec<CardId>,
}

impl DiscardPile {
    /// Create an empty pile with the given bounds and no explicit anchor.
    #[must_use]
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            anchor: None,
            cards: Vec::new(),
        }
    }

    /// Set an explicit pile anchor (where arrivals stack up).
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Cards in the pile, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Append `card` to the pile and return its stacking order.
    ///
    /// Idempotent: appending a card already in the pile keeps the pile
    /// unchanged and returns the order it already holds.
    pub fn append(&mut self, card: CardId) -> StackingOrder {
        if let Some(i) = self.cards.iter().position(|&c| c == card) {
            return stacking::DISCARD_BAND + i as StackingOrder + 1;
        }
        self.cards.push(card);
        stacking::DISCARD_BAND + self.cards.len() as StackingOrder
    }
}

impl DropZone for DiscardPile {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn anchor(&self) -> Point {
        self.anchor.unwrap_or_else(|| self.bounds.center())
    }

    fn can_accept(&self, _card: CardId) -> bool {
        true
    }

    fn on_drop(&mut self, card: CardId) -> Placement {
        let order = self.append(card);
        Placement {
            position: self.anchor(),
            order,
            phase: Phase::Discarded,
        }
    }

    fn is_discardable(&self) -> bool {
        // Prevents discarding an already-discarded card.
        false
    }

    fn remove_card(&mut self, _card: CardId) -> bool {
        // Cards never leave the pile.
        false
    }
}
