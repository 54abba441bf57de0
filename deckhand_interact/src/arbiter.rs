// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-drag-at-a-time arbitration.

use deckhand_card::CardId;

/// Single-slot arbitration service for drag exclusivity.
///
/// Holds the identity of the currently dragging card, if any. Drag start must
/// go through [`DragArbiter::try_acquire`]; the slot is freed with
/// [`DragArbiter::release`] on drop resolution. The slot is occupied iff some
/// card is in the `Dragging` phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragArbiter {
    active: Option<CardId>,
}

impl DragArbiter {
    /// A free arbiter.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Whether any card is currently dragging.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The currently dragging card, if any.
    #[must_use]
    pub const fn active(&self) -> Option<CardId> {
        self.active
    }

    /// Try to claim the drag slot for `card`.
    ///
    /// Returns `false` if any card (including `card` itself) already holds
    /// the slot.
    pub fn try_acquire(&mut self, card: CardId) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(card);
        true
    }

    /// Release the drag slot held by `card`.
    ///
    /// Returns `false` if `card` does not hold the slot; releasing on behalf
    /// of another card is a programming error.
    pub fn release(&mut self, card: CardId) -> bool {
        if self.active != Some(card) {
            debug_assert!(
                self.active.is_none(),
                "drag slot released by a card that does not hold it"
            );
            return false;
        }
        self.active = None;
        true
    }
}
