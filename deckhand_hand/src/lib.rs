// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deckhand Hand: the hand layout engine.
//!
//! [`HandLayout`] owns the ordered sequence of cards currently in hand and
//! derives every card's target transform from it. Order is the sole source of
//! truth: it drives both the fan-out parameterization along a
//! [`HandCurve`](deckhand_curve::HandCurve) and the hand's stacking orders
//! (`2 × position`, leaving gaps for transient layers).
//!
//! ## Layout
//!
//! Spacing adapts to the hand size:
//! `spacing = clamp(spread / max(n − 1, 1), min_spacing, max_spacing)`, with
//! parameters centered on the curve's midpoint and clamped to `[0, 1]`. A
//! single card collapses to the center. [`HandLayout::relayout`] returns one
//! [`LayoutTarget`] per card; every mutation (draw, removal) is followed by a
//! relayout of the remainder.
//!
//! ## Hover pop-out
//!
//! One card at most is popped at a time. [`HandLayout::hover_enter`] un-pops
//! any previously popped card, then pops the entering one: a stacking boost
//! so it renders above its neighbors, an outward offset along its own up
//! axis, and a uniform scale-up. [`HandLayout::hover_exit`] restores the
//! position-derived stacking order and the last computed layout pose. The
//! popped card's layout target keeps being recorded on relayout but is
//! flagged not to animate, so layout motion never fights the pop-out motion.
//!
//! What this crate does *not* do: run animations (it emits targets; the host
//! tween scheduler moves things), hit-test, or arbitrate drags — those live
//! in `deckhand_interact`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layout;

pub use layout::{HandConfig, HandLayout, LayoutTarget, PopTransition};
