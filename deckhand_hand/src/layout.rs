// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand sequence, fan-out math, and hover pop-out state.

use alloc::vec::Vec;
use deckhand_card::{CardId, Pose, StackingOrder, stacking};
use deckhand_curve::HandCurve;
use hashbrown::HashMap;
use log::warn;
use smallvec::SmallVec;

/// Tunables for the hand layout engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandConfig {
    /// Maximum number of cards the hand holds; draws beyond this are rejected.
    pub max_size: usize,
    /// Lower bound on curve-parameter spacing between adjacent cards.
    pub min_spacing: f64,
    /// Upper bound on curve-parameter spacing between adjacent cards.
    pub max_spacing: f64,
    /// Fraction of the curve's parameter domain the hand may spread across.
    pub spread: f64,
    /// Seconds a card takes to animate to a new layout pose.
    pub layout_duration: f64,
    /// Distance a hovered card pops outward along its own up axis.
    pub pop_distance: f64,
    /// Uniform scale applied to a popped card.
    pub pop_scale: f64,
    /// Seconds of the pop-out (and un-pop) animation.
    pub pop_duration: f64,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            max_size: 45,
            min_spacing: 0.05,
            max_spacing: 0.15,
            spread: 0.8,
            layout_duration: 0.25,
            pop_distance: 0.5,
            pop_scale: 1.1,
            pop_duration: 0.2,
        }
    }
}

/// One card's recomputed layout destination.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutTarget {
    /// The card this target is for.
    pub card: CardId,
    /// Pose on the hand curve.
    pub pose: Pose,
    /// Stacking order implied by the card's position in the sequence
    /// (boosted while the card is popped).
    pub order: StackingOrder,
    /// `false` for the currently popped card: its target is recorded for
    /// later restoration but must not be animated while popped.
    pub animate: bool,
}

/// A hover pop-out transition to hand to the tween scheduler.
///
/// Any in-flight motion on the card must be canceled before starting the
/// transition so effects do not stack.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PopTransition {
    /// Animate the card outward/up: boost order, offset along its up axis,
    /// scale up.
    Pop {
        /// The card popping out.
        card: CardId,
        /// Pop destination (offset and scaled layout pose).
        target: Pose,
        /// Boosted stacking order while popped.
        order: StackingOrder,
    },
    /// Animate the card back to its recorded layout pose and restore the
    /// position-derived stacking order.
    Unpop {
        /// The card returning.
        card: CardId,
        /// The last computed layout pose.
        target: Pose,
        /// Restored stacking order (`2 × position`).
        order: StackingOrder,
    },
}

/// The ordered hand and its derived layout state.
#[derive(Clone, Debug)]
pub struct HandLayout {
    config: HandConfig,
    cards: Vec<CardId>,
    /// Last computed layout pose per card, kept even while popped.
    poses: HashMap<CardId, Pose>,
    popped: Option<CardId>,
}

impl HandLayout {
    /// An empty hand with the given configuration.
    #[must_use]
    pub fn new(config: HandConfig) -> Self {
        Self {
            config,
            cards: Vec::new(),
            poses: HashMap::new(),
            popped: None,
        }
    }

    /// The configuration this hand was built with.
    #[must_use]
    pub const fn config(&self) -> &HandConfig {
        &self.config
    }

    /// Number of cards in hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the hand is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.config.max_size
    }

    /// The hand sequence, leftmost first.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Whether `card` is in the hand sequence.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Position of `card` in the sequence, if present.
    #[must_use]
    pub fn position_of(&self, card: CardId) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    /// The currently popped (hovered) card, if any.
    #[must_use]
    pub const fn popped(&self) -> Option<CardId> {
        self.popped
    }

    /// The last computed layout pose for `card`, if one has been computed.
    #[must_use]
    pub fn pose_of(&self, card: CardId) -> Option<Pose> {
        self.poses.get(&card).copied()
    }

    /// Append a drawn card at the tail of the sequence.
    ///
    /// Returns `false` (and leaves the hand untouched) when the hand is at
    /// capacity; the caller discards the rejected card. Appending at the tail
    /// means the new card's position-derived stacking order is above every
    /// current hand card.
    pub fn draw(&mut self, card: CardId) -> bool {
        if self.is_full() {
            warn!(
                "hand is full ({} cards); rejecting drawn card {card:?}",
                self.cards.len()
            );
            return false;
        }
        debug_assert!(
            !self.cards.contains(&card),
            "card drawn into a hand that already holds it"
        );
        self.cards.push(card);
        true
    }

    /// Remove `card` from the sequence.
    ///
    /// Forgets its cached pose and clears the pop-out reference if it was the
    /// popped card. Returns `false` if the card was not in hand. The caller
    /// relayouts the remainder.
    pub fn remove(&mut self, card: CardId) -> bool {
        let Some(i) = self.position_of(card) else {
            return false;
        };
        self.cards.remove(i);
        self.poses.remove(&card);
        if self.popped == Some(card) {
            self.popped = None;
        }
        true
    }

    /// Curve-parameter spacing between adjacent cards for the current size.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        let n = self.cards.len();
        if n <= 1 {
            return 0.0;
        }
        (self.config.spread / (n - 1) as f64)
            .clamp(self.config.min_spacing, self.config.max_spacing)
    }

    /// Curve parameters for every card, centered on the domain midpoint and
    /// clamped to `[0, 1]`.
    #[must_use]
    pub fn params(&self) -> Vec<f64> {
        let n = self.cards.len();
        let spacing = self.spacing();
        let start = 0.5 - (n.saturating_sub(1)) as f64 * spacing / 2.0;
        (0..n).map(|i| (start + i as f64 * spacing).clamp(0.0, 1.0)).collect()
    }

    /// Recompute layout targets for every card in hand.
    ///
    /// Poses are cached (popped card included, for later restoration); the
    /// popped card's target comes back with `animate == false`.
    pub fn relayout(&mut self, curve: &impl HandCurve) -> Vec<LayoutTarget> {
        let params = self.params();
        let mut out = Vec::with_capacity(self.cards.len());
        for (i, (&card, &t)) in self.cards.iter().zip(params.iter()).enumerate() {
            let pose = curve.sample(t).pose();
            self.poses.insert(card, pose);
            let popped = self.popped == Some(card);
            let order = if popped {
                stacking::hand_order(i) + stacking::HOVER_BOOST
            } else {
                stacking::hand_order(i)
            };
            out.push(LayoutTarget {
                card,
                pose,
                order,
                animate: !popped,
            });
        }
        out
    }

    /// Pop `card` out on hover-enter.
    ///
    /// If a different card is currently popped it is un-popped first, so the
    /// returned transitions are applied in order. Entering the already-popped
    /// card, or a card not in hand, is a no-op.
    pub fn hover_enter(&mut self, card: CardId) -> SmallVec<[PopTransition; 2]> {
        let mut out = SmallVec::new();
        if self.popped == Some(card) || !self.contains(card) {
            return out;
        }
        if let Some(prev) = self.popped
            && let Some(unpop) = self.unpop_transition(prev)
        {
            out.push(unpop);
        }
        // Pop target: outward along the card's own up axis, scaled up.
        let Some(pose) = self.pose_of(card) else {
            // No layout has run yet for this card; nothing to pop from, and
            // the previous pop was just undone above.
            self.popped = None;
            return out;
        };
        let i = self.position_of(card).expect("contains() checked above");
        self.popped = Some(card);
        out.push(PopTransition::Pop {
            card,
            target: Pose {
                position: pose.position + pose.up() * self.config.pop_distance,
                angle: pose.angle,
                scale: self.config.pop_scale,
            },
            order: stacking::hand_order(i) + stacking::HOVER_BOOST,
        });
        out
    }

    /// Un-pop `card` on hover-exit.
    ///
    /// Only the currently popped card reacts; exit for any other card is a
    /// no-op and returns `None`.
    pub fn hover_exit(&mut self, card: CardId) -> Option<PopTransition> {
        if self.popped != Some(card) {
            return None;
        }
        let t = self.unpop_transition(card);
        self.popped = None;
        t
    }

    /// Drop the pop-out reference without emitting a return animation.
    ///
    /// Used when the popped card leaves the hand's control some other way
    /// (drag start takes over its transform and stacking order).
    pub fn forget_pop(&mut self, card: CardId) -> bool {
        if self.popped == Some(card) {
            self.popped = None;
            true
        } else {
            false
        }
    }

    fn unpop_transition(&self, card: CardId) -> Option<PopTransition> {
        let i = self.position_of(card)?;
        let target = self.pose_of(card)?;
        Some(PopTransition::Unpop {
            card,
            target,
            order: stacking::hand_order(i),
        })
    }
}
