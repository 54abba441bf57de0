// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deckhand Interact: the card interaction controller.
//!
//! This crate ties the Deckhand layers together behind [`CardTable`], a
//! frame-driven facade over the per-card state machine:
//!
//! ```text
//! Idle ⇄ Hovered → Dragging → PlacedInZone → Discarded
//! ```
//!
//! ## Frame loop
//!
//! The host polls pointer input once per frame into a [`PointerFrame`] and
//! calls [`CardTable::frame`]. All logical state — hand membership, zone
//! occupancy, lifecycle phase, stacking order — changes synchronously inside
//! that call. Visual motion is delegated: the table emits
//! [`TableEvent::Motion`] / [`TableEvent::CancelMotion`] requests for the
//! host's tween scheduler and [`TableEvent::Effect`] firings for the host's
//! effect hook, drained via [`CardTable::take_events`]. The one place logic
//! waits for a visual is the click-to-discard flow: the card must visually
//! arrive on the pile before it contributes to pile stacking order, so the
//! host reports the flight's end via [`CardTable::motion_complete`], which
//! registers the card and completes the `PlacedInZone → Discarded`
//! transition inside the same single-threaded loop.
//!
//! ## Arbitration
//!
//! At most one card drags at a time: [`DragArbiter`] holds the currently
//! dragging card as a single nullable slot with try-acquire/release
//! semantics. Presses resolve to the visually topmost card among *all* cards
//! whose hit regions contain the press point — fanned-out cards overlap, and
//! the comparison key is the globally unique stacking order.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arbiter;
mod input;
mod table;

pub use arbiter::DragArbiter;
pub use input::PointerFrame;
pub use table::{CardTable, MotionRequest, MotionTag, TableConfig, TableEvent};
