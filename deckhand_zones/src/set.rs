// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zone registry a table owns.

use alloc::vec::Vec;
use deckhand_card::{CardId, StackingOrder, ZoneId};
use kurbo::{Point, Rect};

use crate::zone::{DiscardPile, DropZone, Placement, SlotZone};

/// A zone held by a [`ZoneSet`].
///
/// Tagged-variant dispatch over the two concrete zone shapes; the
/// [`DropZone`] impl delegates so callers stay on the capability interface.
#[derive(Clone, Debug)]
pub enum AnyZone {
    /// A single-occupancy slot.
    Slot(SlotZone),
    /// The discard pile.
    Discard(DiscardPile),
}

impl AnyZone {
    /// The slot view of this zone, if it is one.
    #[must_use]
    pub fn as_slot(&self) -> Option<&SlotZone> {
        match self {
            Self::Slot(slot) => Some(slot),
            Self::Discard(_) => None,
        }
    }

    /// The discard-pile view of this zone, if it is one.
    #[must_use]
    pub fn as_discard(&self) -> Option<&DiscardPile> {
        match self {
            Self::Slot(_) => None,
            Self::Discard(pile) => Some(pile),
        }
    }
}

impl DropZone for AnyZone {
    fn bounds(&self) -> Rect {
        match self {
            Self::Slot(z) => z.bounds(),
            Self::Discard(z) => z.bounds(),
        }
    }

    fn anchor(&self) -> Point {
        match self {
            Self::Slot(z) => z.anchor(),
            Self::Discard(z) => z.anchor(),
        }
    }

    fn can_accept(&self, card: CardId) -> bool {
        match self {
            Self::Slot(z) => z.can_accept(card),
            Self::Discard(z) => z.can_accept(card),
        }
    }

    fn on_drop(&mut self, card: CardId) -> Placement {
        match self {
            Self::Slot(z) => z.on_drop(card),
            Self::Discard(z) => z.on_drop(card),
        }
    }

    fn is_discardable(&self) -> bool {
        match self {
            Self::Slot(z) => z.is_discardable(),
            Self::Discard(z) => z.is_discardable(),
        }
    }

    fn remove_card(&mut self, card: CardId) -> bool {
        match self {
            Self::Slot(z) => z.remove_card(card),
            Self::Discard(z) => z.remove_card(card),
        }
    }
}

/// Registry of the drop zones on a table.
///
/// Zones are probed in insertion order, which makes drop resolution
/// deterministic when a release-time region overlaps several zones: the
/// first inserted zone that accepts wins.
#[derive(Clone, Debug, Default)]
pub struct ZoneSet {
    zones: Vec<(ZoneId, AnyZone)>,
    next_id: u32,
}

impl ZoneSet {
    /// An empty zone set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zones: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a slot zone and return its handle.
    ///
    /// The slot's band offset is assigned here: each slot of a kind gets the
    /// next offset within that kind's band, so cards placed in sibling slots
    /// keep distinct stacking orders.
    pub fn insert_slot(&mut self, slot: SlotZone) -> ZoneId {
        let siblings = self
            .zones
            .iter()
            .filter(|(_, z)| z.as_slot().is_some_and(|s| s.kind() == slot.kind()))
            .count();
        self.insert(AnyZone::Slot(
            slot.with_band_offset(siblings as StackingOrder),
        ))
    }

    /// Add the discard pile and return its handle.
    pub fn insert_discard(&mut self, pile: DiscardPile) -> ZoneId {
        self.insert(AnyZone::Discard(pile))
    }

    fn insert(&mut self, zone: AnyZone) -> ZoneId {
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        self.zones.push((id, zone));
        id
    }

    /// Number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Borrow a zone.
    #[must_use]
    pub fn get(&self, id: ZoneId) -> Option<&AnyZone> {
        self.zones.iter().find(|(zid, _)| *zid == id).map(|(_, z)| z)
    }

    /// Mutably borrow a zone.
    pub fn get_mut(&mut self, id: ZoneId) -> Option<&mut AnyZone> {
        self.zones
            .iter_mut()
            .find(|(zid, _)| *zid == id)
            .map(|(_, z)| z)
    }

    /// Zones whose bounds overlap `region`, in insertion order.
    ///
    /// Shared edges count as overlap, matching the release-time area test.
    pub fn overlapping(&self, region: Rect) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones
            .iter()
            .filter(move |(_, z)| rects_overlap(z.bounds(), region))
            .map(|(id, _)| *id)
    }

    /// The discard pile's handle, if one has been registered.
    #[must_use]
    pub fn discard_pile(&self) -> Option<ZoneId> {
        self.zones
            .iter()
            .find(|(_, z)| matches!(z, AnyZone::Discard(_)))
            .map(|(id, _)| *id)
    }
}

/// Edge-inclusive AABB overlap.
fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::SlotKind;
    use deckhand_card::stacking;

    fn set() -> ZoneSet {
        let mut zones = ZoneSet::new();
        zones.insert_slot(SlotZone::new(
            SlotKind::Leader,
            Rect::new(0.0, 0.0, 2.0, 2.0),
        ));
        zones.insert_slot(SlotZone::new(
            SlotKind::Character,
            Rect::new(3.0, 0.0, 5.0, 2.0),
        ));
        zones.insert_discard(DiscardPile::new(Rect::new(6.0, 0.0, 8.0, 2.0)));
        zones
    }

    #[test]
    fn ids_are_distinct_and_resolvable() {
        let zones = set();
        assert_eq!(zones.len(), 3);
        assert!(zones.get(ZoneId(0)).is_some(), "first id resolves");
        assert!(zones.get(ZoneId(2)).is_some(), "last id resolves");
        assert!(zones.get(ZoneId(3)).is_none(), "unknown id does not");
    }

    #[test]
    fn overlap_probe_is_area_based_and_ordered() {
        let zones = set();
        // A card-sized region straddling the leader and character slots.
        let region = Rect::new(1.5, 0.5, 3.5, 1.5);
        let hits: alloc::vec::Vec<_> = zones.overlapping(region).collect();
        assert_eq!(hits, alloc::vec![ZoneId(0), ZoneId(1)]);

        // A region touching only an edge still counts.
        let touching = Rect::new(8.0, 0.0, 9.0, 1.0);
        let hits: alloc::vec::Vec<_> = zones.overlapping(touching).collect();
        assert_eq!(hits, alloc::vec![ZoneId(2)]);

        // A region far away hits nothing.
        assert_eq!(zones.overlapping(Rect::new(20.0, 20.0, 21.0, 21.0)).count(), 0);
    }

    #[test]
    fn discard_pile_lookup_finds_the_pile() {
        let zones = set();
        let pile = zones.discard_pile().expect("pile registered");
        assert!(
            zones.get(pile).and_then(AnyZone::as_discard).is_some(),
            "handle resolves to the pile"
        );
        assert!(ZoneSet::new().discard_pile().is_none(), "empty set has none");
    }

    #[test]
    fn sibling_slots_of_one_kind_place_in_distinct_orders() {
        let mut zones = ZoneSet::new();
        let a = zones.insert_slot(SlotZone::new(
            SlotKind::Character,
            Rect::new(0.0, 0.0, 1.0, 1.0),
        ));
        let b = zones.insert_slot(SlotZone::new(
            SlotKind::Character,
            Rect::new(2.0, 0.0, 3.0, 1.0),
        ));
        let first = zones.get_mut(a).expect("slot a exists").on_drop(CardId(1)).order;
        let second = zones.get_mut(b).expect("slot b exists").on_drop(CardId(2)).order;
        assert_eq!(first, stacking::CHARACTER_BAND, "first slot keeps the band base");
        assert_eq!(
            second,
            stacking::CHARACTER_BAND + 1,
            "sibling slots must not collide in stacking order"
        );
    }

    #[test]
    fn drop_through_the_set_updates_occupancy() {
        let mut zones = set();
        let id = ZoneId(1);
        let zone = zones.get_mut(id).expect("zone exists");
        assert!(zone.can_accept(CardId(7)));
        zone.on_drop(CardId(7));
        assert_eq!(
            zones.get(id).and_then(AnyZone::as_slot).and_then(SlotZone::occupant),
            Some(CardId(7))
        );
    }
}
