// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deckhand Zones: the drop-zone protocol.
//!
//! Every area a card can be released onto exposes the [`DropZone`] capability:
//! it decides acceptance ([`DropZone::can_accept`]), places accepted cards
//! ([`DropZone::on_drop`]), reports whether its contents may be discarded by
//! click ([`DropZone::is_discardable`]), and supports a uniform
//! [`DropZone::remove_card`] so callers never need to know the concrete zone
//! type to vacate it.
//!
//! Two zone shapes exist:
//!
//! - [`SlotZone`]: exclusive single-card occupancy (character and leader
//!   slots). The occupancy record is the source of truth for the card↔zone
//!   relation; a card's own zone reference is a cache invalidated on removal.
//! - [`DiscardPile`]: an unbounded ordered stack that always accepts, is not
//!   itself discardable, and assigns each arrival the next stacking order in
//!   the discard band.
//!
//! [`ZoneSet`] owns the zones of a table, hands out [`ZoneId`]s, and answers
//! area-overlap probes in insertion order — release-time drop resolution is
//! an area test between the card's bounds and zone bounds, not a point test,
//! because cards are sized regions.
//!
//! Acceptance decisions are boolean queries, never failure signals.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod set;
mod zone;

pub use set::{AnyZone, ZoneSet};
pub use zone::{DiscardPile, DropZone, Placement, SlotKind, SlotZone};

// Re-exported so downstream crates name zone handles from one place.
pub use deckhand_card::ZoneId;
