// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-driven interaction controller.

use alloc::vec::Vec;
use core::mem;

use deckhand_card::{CardData, CardId, Phase, Pose, StackingOrder, ZoneId, stacking};
use deckhand_curve::HandCurve;
use deckhand_hand::{HandConfig, HandLayout, PopTransition};
use deckhand_zones::{DiscardPile, DropZone, SlotZone, ZoneSet};
use hashbrown::HashMap;
use kurbo::{Point, Size, Vec2};
use log::{error, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::{DragArbiter, PointerFrame};

/// Tunables for a [`CardTable`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    /// Card extent in the layout plane; hit regions are this size, centered
    /// on the card's pose.
    pub card_size: Size,
    /// Easing rate of the dragged card's tilt toward its target angle, in
    /// inverse seconds.
    pub rotation_speed: f64,
    /// Clamp on the dragged card's tilt, in degrees either side of upright.
    pub max_rotation_angle: f64,
    /// Per-frame pointer travel below this distance counts as jitter; the
    /// rotation update is skipped and the dragged card keeps its tilt.
    pub jitter_threshold: f64,
    /// Seconds a discarded card takes to fly to the pile.
    pub discard_duration: f64,
    /// Half-width of the random landing offset around the pile anchor.
    pub discard_jitter: f64,
    /// Where drawn cards appear before their first layout animation.
    pub spawn_point: Point,
    /// Hand layout tunables.
    pub hand: HandConfig,
    /// Seed for the discard-landing jitter.
    pub rng_seed: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            card_size: Size::new(1.0, 1.4),
            rotation_speed: 5.0,
            max_rotation_angle: 40.0,
            jitter_threshold: 0.01,
            discard_duration: 0.5,
            discard_jitter: 0.05,
            spawn_point: Point::new(0.0, -2.0),
            hand: HandConfig::default(),
            rng_seed: 0,
        }
    }
}

/// What kind of motion a [`MotionRequest`] asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionTag {
    /// Fan-out to a recomputed hand pose.
    Layout,
    /// Hover pop-out.
    Pop,
    /// Hover pop-out return.
    Unpop,
    /// Flight to the discard pile.
    Discard,
}

/// A tween the host scheduler should run for a card.
///
/// The table has already committed the logical state; the request only
/// describes how the card should visually travel there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionRequest {
    /// The card to move.
    pub card: CardId,
    /// Destination pose.
    pub target: Pose,
    /// Seconds the motion should take.
    pub duration: f64,
    /// What the motion is for.
    pub tag: MotionTag,
}

/// Something the host must react to, drained via [`CardTable::take_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum TableEvent {
    /// Run this tween.
    Motion(MotionRequest),
    /// Stop any in-flight tween on this card before applying later requests.
    CancelMotion(CardId),
    /// Fire the card's effect hook.
    Effect(CardId),
    /// The draw input was pressed; the host decides what card to feed to
    /// [`CardTable::draw`].
    DrawRequested,
    /// A drawn card entered the hand.
    Drawn(CardId),
    /// A draw was refused because the hand is at capacity.
    DrawRejected,
    /// A card started dragging.
    DragStarted(CardId),
    /// A released card was accepted by a zone.
    Placed {
        /// The accepted card.
        card: CardId,
        /// The accepting zone.
        zone: ZoneId,
    },
    /// A released card found no accepting zone and returned to the hand.
    ReturnedToHand(CardId),
    /// A placed card was clicked off its slot and is flying to the pile.
    /// [`TableEvent::Discarded`] follows once the host reports the flight's
    /// end via [`CardTable::motion_complete`].
    DiscardStarted(CardId),
    /// A card is in the discard pile.
    Discarded(CardId),
}

/// Per-card mutable state.
#[derive(Clone, Debug)]
struct CardEntry {
    data: CardData,
    pose: Pose,
    order: StackingOrder,
    phase: Phase,
    /// Cache of the owning zone; zone occupancy is the source of truth.
    zone: Option<ZoneId>,
}

#[derive(Copy, Clone, Debug)]
struct DragSession {
    last_pointer: Point,
}

/// The interaction controller: hand, zones, drag arbitration, and the
/// per-card state machine, stepped once per frame.
///
/// Logical state (phases, hand membership, zone occupancy, stacking orders,
/// poses) changes synchronously inside [`CardTable::frame`]; visual motion is
/// described by drained [`TableEvent`]s. See the crate docs for the loop
/// contract.
#[derive(Clone, Debug)]
pub struct CardTable<C: HandCurve> {
    config: TableConfig,
    curve: C,
    cards: HashMap<CardId, CardEntry>,
    hand: HandLayout,
    zones: ZoneSet,
    arbiter: DragArbiter,
    drag: Option<DragSession>,
    /// Cards flying to the discard pile, awaiting
    /// [`CardTable::motion_complete`].
    in_flight: SmallVec<[CardId; 2]>,
    rng: SmallRng,
    next_card: u32,
    events: Vec<TableEvent>,
}

impl<C: HandCurve> CardTable<C> {
    /// A table with no cards and no zones, fanning its hand along `curve`.
    #[must_use]
    pub fn new(config: TableConfig, curve: C) -> Self {
        Self {
            curve,
            cards: HashMap::new(),
            hand: HandLayout::new(config.hand),
            zones: ZoneSet::new(),
            arbiter: DragArbiter::new(),
            drag: None,
            in_flight: SmallVec::new(),
            rng: SmallRng::seed_from_u64(config.rng_seed),
            next_card: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Register a single-occupancy slot.
    pub fn insert_slot(&mut self, slot: SlotZone) -> ZoneId {
        self.zones.insert_slot(slot)
    }

    /// Register the discard pile.
    pub fn insert_discard(&mut self, pile: DiscardPile) -> ZoneId {
        self.zones.insert_discard(pile)
    }

    /// The table's configuration.
    #[must_use]
    pub const fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The hand layout state.
    #[must_use]
    pub const fn hand(&self) -> &HandLayout {
        &self.hand
    }

    /// The registered zones.
    #[must_use]
    pub const fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    /// The currently dragging card, if any.
    #[must_use]
    pub const fn dragging(&self) -> Option<CardId> {
        self.arbiter.active()
    }

    /// A card's lifecycle phase.
    #[must_use]
    pub fn phase(&self, card: CardId) -> Option<Phase> {
        self.cards.get(&card).map(|e| e.phase)
    }

    /// A card's current pose.
    #[must_use]
    pub fn pose(&self, card: CardId) -> Option<Pose> {
        self.cards.get(&card).map(|e| e.pose)
    }

    /// A card's current stacking order.
    #[must_use]
    pub fn order(&self, card: CardId) -> Option<StackingOrder> {
        self.cards.get(&card).map(|e| e.order)
    }

    /// The zone currently holding a card, if any.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<ZoneId> {
        self.cards.get(&card).and_then(|e| e.zone)
    }

    /// A card's read-only content.
    #[must_use]
    pub fn data(&self, card: CardId) -> Option<&CardData> {
        self.cards.get(&card).map(|e| &e.data)
    }

    /// Drain the events produced since the last drain, in order.
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        mem::take(&mut self.events)
    }

    /// Draw a card into the hand.
    ///
    /// Allocates an id, spawns the card at the configured spawn point, and
    /// relayouts the hand. Returns `None` (and emits
    /// [`TableEvent::DrawRejected`]) when the hand is at capacity; no id is
    /// consumed.
    pub fn draw(&mut self, data: CardData) -> Option<CardId> {
        if self.hand.is_full() {
            warn!("draw rejected: hand is at capacity ({})", self.hand.len());
            self.events.push(TableEvent::DrawRejected);
            return None;
        }
        let card = CardId(self.next_card);
        self.next_card += 1;
        self.cards.insert(
            card,
            CardEntry {
                data,
                pose: Pose::at(self.config.spawn_point),
                order: stacking::hand_order(self.hand.len()),
                phase: Phase::InHand,
                zone: None,
            },
        );
        let drawn = self.hand.draw(card);
        debug_assert!(drawn, "capacity was checked above");
        self.relayout_hand();
        self.events.push(TableEvent::Drawn(card));
        Some(card)
    }

    /// Step the interaction state machine with this frame's pointer input.
    ///
    /// `dt` is the frame's duration in seconds.
    pub fn frame(&mut self, input: &PointerFrame, dt: f64) {
        if input.draw_pressed {
            self.events.push(TableEvent::DrawRequested);
        }
        if let Some(card) = self.arbiter.active() {
            if input.released {
                self.end_drag(card);
            } else if input.held {
                self.track_drag(card, input.position, dt);
            }
            // Hover and press are suppressed for the drag's whole duration.
            return;
        }
        self.update_hover(input.position);
        if input.pressed {
            self.press(input.position);
        }
    }

    /// Report that the host finished the discard flight for `card`.
    ///
    /// Registers the card with the pile, which assigns its stacking order
    /// and completes the `PlacedInZone → Discarded` transition. A report for
    /// a card not in flight is ignored.
    pub fn motion_complete(&mut self, card: CardId) {
        let Some(i) = self.in_flight.iter().position(|&c| c == card) else {
            return;
        };
        self.in_flight.remove(i);
        let Some(pile) = self.zones.discard_pile() else {
            // The pile was checked when the flight started.
            debug_assert!(false, "discard flight completed with no pile registered");
            return;
        };
        let placement = match self.zones.get_mut(pile) {
            Some(zone) => zone.on_drop(card),
            None => return,
        };
        if let Some(entry) = self.cards.get_mut(&card) {
            // The jittered landing pose stays; only order and phase come from
            // the pile.
            entry.order = placement.order;
            entry.phase = placement.phase;
            entry.zone = Some(pile);
        }
        self.events.push(TableEvent::Discarded(card));
    }

    fn update_hover(&mut self, pointer: Point) {
        let target = topmost(self.hand.cards().iter().filter_map(|&card| {
            let entry = self.cards.get(&card)?;
            entry
                .pose
                .bounds(self.config.card_size)
                .contains(pointer)
                .then_some((card, entry.order))
        }));
        if target == self.hand.popped() {
            return;
        }
        let mut transitions: SmallVec<[PopTransition; 2]> = SmallVec::new();
        if let Some(prev) = self.hand.popped()
            && let Some(t) = self.hand.hover_exit(prev)
        {
            transitions.push(t);
        }
        if let Some(card) = target {
            transitions.extend(self.hand.hover_enter(card));
        }
        for t in transitions {
            self.apply_pop(t);
        }
    }

    fn apply_pop(&mut self, transition: PopTransition) {
        let (card, target, order, tag) = match transition {
            PopTransition::Pop {
                card,
                target,
                order,
            } => (card, target, order, MotionTag::Pop),
            PopTransition::Unpop {
                card,
                target,
                order,
            } => (card, target, order, MotionTag::Unpop),
        };
        let Some(entry) = self.cards.get_mut(&card) else {
            return;
        };
        entry.pose = target;
        entry.order = order;
        self.events.push(TableEvent::CancelMotion(card));
        self.events.push(TableEvent::Motion(MotionRequest {
            card,
            target,
            duration: self.config.hand.pop_duration,
            tag,
        }));
    }

    fn press(&mut self, pointer: Point) {
        let Some(card) = topmost(self.cards.iter().filter_map(|(&card, entry)| {
            (entry.phase != Phase::Discarded
                && !self.in_flight.contains(&card)
                && entry.pose.bounds(self.config.card_size).contains(pointer))
            .then_some((card, entry.order))
        })) else {
            return;
        };
        match self.phase(card) {
            Some(Phase::InHand) => self.start_drag(card, pointer),
            Some(Phase::PlacedInZone) => self.click_placed(card),
            _ => {}
        }
    }

    fn start_drag(&mut self, card: CardId, pointer: Point) {
        if !self.arbiter.try_acquire(card) {
            return;
        }
        self.hand.forget_pop(card);
        self.drag = Some(DragSession {
            last_pointer: pointer,
        });
        if let Some(entry) = self.cards.get_mut(&card) {
            entry.phase = Phase::Dragging;
            entry.order = stacking::DRAG_LAYER;
            entry.pose = Pose::at(pointer);
        }
        self.events.push(TableEvent::CancelMotion(card));
        self.events.push(TableEvent::DragStarted(card));
    }

    fn track_drag(&mut self, card: CardId, pointer: Point, dt: f64) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let delta = pointer - session.last_pointer;
        session.last_pointer = pointer;
        let Some(entry) = self.cards.get_mut(&card) else {
            return;
        };
        entry.pose.position = pointer;
        // Sub-threshold travel is jitter: the position still tracks the
        // pointer, but the tilt holds.
        if delta.hypot() <= self.config.jitter_threshold {
            return;
        }
        let target = (delta.atan2().to_degrees() - 90.0)
            .clamp(-self.config.max_rotation_angle, self.config.max_rotation_angle);
        let blend = (dt * self.config.rotation_speed).min(1.0);
        entry.pose.angle += (target - entry.pose.angle) * blend;
    }

    fn end_drag(&mut self, card: CardId) {
        self.drag = None;
        self.arbiter.release(card);
        let Some(entry) = self.cards.get_mut(&card) else {
            return;
        };
        entry.pose.angle = 0.0;
        let region = entry.pose.bounds(self.config.card_size);
        let accepting = self
            .zones
            .overlapping(region)
            .find(|&id| self.zones.get(id).is_some_and(|z| z.can_accept(card)));
        let Some(zone) = accepting else {
            entry.phase = Phase::InHand;
            self.events.push(TableEvent::ReturnedToHand(card));
            self.relayout_hand();
            return;
        };
        let placement = match self.zones.get_mut(zone) {
            Some(z) => z.on_drop(card),
            None => return,
        };
        if let Some(entry) = self.cards.get_mut(&card) {
            entry.pose = Pose::at(placement.position);
            entry.order = placement.order;
            entry.phase = placement.phase;
            entry.zone = Some(zone);
        }
        self.hand.remove(card);
        self.relayout_hand();
        // Dropping straight onto the pile is a discard, not a placement.
        self.events.push(if placement.phase == Phase::Discarded {
            TableEvent::Discarded(card)
        } else {
            TableEvent::Placed { card, zone }
        });
    }

    fn click_placed(&mut self, card: CardId) {
        self.events.push(TableEvent::Effect(card));
        let Some(zone) = self.zone_of(card) else {
            return;
        };
        if !self.zones.get(zone).is_some_and(DropZone::is_discardable) {
            return;
        }
        let Some(pile) = self.zones.discard_pile() else {
            warn!("cannot discard {card:?}: no discard pile is registered");
            return;
        };
        if let Some(z) = self.zones.get_mut(zone) {
            let removed = z.remove_card(card);
            debug_assert!(removed, "zone cache said {zone:?} holds {card:?}");
        }
        let anchor = self
            .zones
            .get(pile)
            .map_or(Point::ZERO, |z| z.anchor());
        let j = self.config.discard_jitter;
        let landing = anchor
            + Vec2::new(
                self.rng.gen_range(-j..=j),
                self.rng.gen_range(-j..=j),
            );
        let target = Pose::at(landing);
        if let Some(entry) = self.cards.get_mut(&card) {
            entry.zone = None;
            entry.pose = target;
        }
        self.in_flight.push(card);
        self.events.push(TableEvent::CancelMotion(card));
        self.events.push(TableEvent::Motion(MotionRequest {
            card,
            target,
            duration: self.config.discard_duration,
            tag: MotionTag::Discard,
        }));
        self.events.push(TableEvent::DiscardStarted(card));
    }

    /// Recompute the hand fan-out and commit it.
    ///
    /// The dragged card keeps its pointer-driven transform and drag layer;
    /// the popped card keeps its pop-out pose but gets its order refreshed.
    fn relayout_hand(&mut self) {
        for target in self.hand.relayout(&self.curve) {
            let Some(entry) = self.cards.get_mut(&target.card) else {
                continue;
            };
            if entry.phase == Phase::Dragging {
                continue;
            }
            entry.order = target.order;
            if target.animate {
                entry.pose = target.pose;
                self.events.push(TableEvent::Motion(MotionRequest {
                    card: target.card,
                    target: target.pose,
                    duration: self.config.hand.layout_duration,
                    tag: MotionTag::Layout,
                }));
            }
        }
    }
}

/// The candidate with the strictly highest stacking order.
///
/// Orders are unique among simultaneously visible cards, so ties indicate an
/// upstream bookkeeping bug; the earliest candidate wins and the tie is
/// logged.
fn topmost(candidates: impl Iterator<Item = (CardId, StackingOrder)>) -> Option<CardId> {
    let mut best: Option<(CardId, StackingOrder)> = None;
    for (card, order) in candidates {
        match best {
            None => best = Some((card, order)),
            Some((_, top)) if order > top => best = Some((card, order)),
            Some((held, top)) if order == top => {
                debug_assert!(false, "stacking order {order} shared by two cards");
                error!("stacking order {order} shared by {held:?} and {card:?}");
            }
            Some(_) => {}
        }
    }
    best.map(|(card, _)| card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckhand_zones::SlotKind;
    use kurbo::{Line, Rect};

    fn flat_curve() -> Line {
        Line::new(Point::new(-2.0, 0.0), Point::new(2.0, 0.0))
    }

    fn table() -> CardTable<Line> {
        CardTable::new(TableConfig::default(), flat_curve())
    }

    /// A table with a character slot around (6, 6), a leader slot around
    /// (6, 9), and a discard pile around (9, 6).
    fn furnished() -> (CardTable<Line>, ZoneId, ZoneId, ZoneId) {
        let mut t = table();
        let character = t.insert_slot(SlotZone::new(
            SlotKind::Character,
            Rect::new(5.0, 5.0, 7.0, 7.0),
        ));
        let leader = t.insert_slot(SlotZone::new(
            SlotKind::Leader,
            Rect::new(5.0, 8.0, 7.0, 10.0),
        ));
        let pile = t.insert_discard(DiscardPile::new(Rect::new(8.0, 5.0, 10.0, 7.0)));
        (t, character, leader, pile)
    }

    fn drag_to(t: &mut CardTable<Line>, from: Point, to: Point) {
        t.frame(&PointerFrame::press(from), 0.016);
        t.frame(&PointerFrame::hold(to), 0.016);
        t.frame(&PointerFrame::release(to), 0.016);
    }

    /// Place the single hand card `card` into the slot centered at `at`.
    fn place(t: &mut CardTable<Line>, card: CardId, at: Point) {
        let from = t.pose(card).expect("card exists").position;
        drag_to(t, from, at);
        assert_eq!(t.phase(card), Some(Phase::PlacedInZone), "placement worked");
    }

    #[test]
    fn topmost_picks_the_strictly_highest_order() {
        let cards = [
            (CardId(0), 5),
            (CardId(1), 12),
            (CardId(2), 7),
        ];
        assert_eq!(topmost(cards.into_iter()), Some(CardId(1)));
        assert_eq!(topmost(core::iter::empty()), None);
    }

    #[test]
    fn draw_lands_in_hand_with_a_layout_motion() {
        let mut t = table();
        let card = t.draw(CardData::default()).expect("hand has room");
        assert_eq!(t.phase(card), Some(Phase::InHand));
        assert_eq!(t.order(card), Some(0));
        // A single card sits at the curve's midpoint.
        let pose = t.pose(card).expect("card exists");
        assert!((pose.position - Point::ZERO).hypot() < 1e-9, "centered");
        let events = t.take_events();
        assert!(events.contains(&TableEvent::Drawn(card)));
        assert!(
            events.iter().any(|e| matches!(
                e,
                TableEvent::Motion(MotionRequest {
                    tag: MotionTag::Layout,
                    ..
                })
            )),
            "drawing animates the fan-out"
        );
    }

    #[test]
    fn draws_beyond_capacity_are_rejected_without_consuming_ids() {
        let mut t = CardTable::new(
            TableConfig {
                hand: HandConfig {
                    max_size: 2,
                    ..HandConfig::default()
                },
                ..TableConfig::default()
            },
            flat_curve(),
        );
        let a = t.draw(CardData::default()).expect("room for the first");
        let b = t.draw(CardData::default()).expect("room for the second");
        assert!(t.draw(CardData::default()).is_none(), "third draw refused");
        assert!(t.take_events().contains(&TableEvent::DrawRejected));
        let c = t.hand().cards().to_vec();
        assert_eq!(c, [a, b], "hand is untouched by the rejection");
        // The refused draw must not burn an id.
        let mut roomy = table();
        roomy.draw(CardData::default());
        assert_eq!(t.next_card, 2);
        assert_eq!(roomy.next_card, 1);
    }

    #[test]
    fn draw_key_emits_a_request() {
        let mut t = table();
        t.frame(&PointerFrame::idle(Point::new(9.0, 9.0)).with_draw(), 0.016);
        assert!(t.take_events().contains(&TableEvent::DrawRequested));
    }

    #[test]
    fn hovering_pops_the_card_and_leaving_restores_it() {
        let mut t = table();
        let a = t.draw(CardData::default()).expect("room");
        let b = t.draw(CardData::default()).expect("room");
        t.take_events();
        // Two cards fan to x = ∓0.3 on the flat curve.
        let home = t.pose(a).expect("a exists");
        t.frame(&PointerFrame::idle(Point::new(-0.3, 0.0)), 0.016);
        assert_eq!(t.hand().popped(), Some(a));
        let popped = t.pose(a).expect("a exists");
        assert!(
            (popped.position.y - 0.5).abs() < 1e-9,
            "popped half a unit along the up axis"
        );
        assert!((popped.scale - 1.1).abs() < 1e-9, "popped cards scale up");
        assert_eq!(t.order(a), Some(stacking::HOVER_BOOST));
        assert!(t.order(a) > t.order(b), "popped card renders above the hand");
        let events = t.take_events();
        assert!(events.contains(&TableEvent::CancelMotion(a)));
        assert!(events.iter().any(|e| matches!(
            e,
            TableEvent::Motion(MotionRequest {
                tag: MotionTag::Pop,
                ..
            })
        )));

        // Pointer leaves: pose and position-derived order come back.
        t.frame(&PointerFrame::idle(Point::new(9.0, 9.0)), 0.016);
        assert_eq!(t.hand().popped(), None);
        assert_eq!(t.pose(a), Some(home));
        assert_eq!(t.order(a), Some(0));
        assert!(t.take_events().iter().any(|e| matches!(
            e,
            TableEvent::Motion(MotionRequest {
                tag: MotionTag::Unpop,
                ..
            })
        )));
    }

    #[test]
    fn hover_in_the_overlap_goes_to_the_topmost_card() {
        let mut t = table();
        let a = t.draw(CardData::default()).expect("room");
        let b = t.draw(CardData::default()).expect("room");
        // Both cards' regions contain the midpoint; `b` sits later in the
        // sequence and therefore higher.
        t.frame(&PointerFrame::idle(Point::ZERO), 0.016);
        assert_eq!(t.hand().popped(), Some(b));
        assert_ne!(t.hand().popped(), Some(a));
    }

    #[test]
    fn hovering_a_neighbor_swaps_the_popped_card() {
        let mut t = table();
        let a = t.draw(CardData::default()).expect("room");
        let b = t.draw(CardData::default()).expect("room");
        t.frame(&PointerFrame::idle(Point::new(-0.3, 0.0)), 0.016);
        assert_eq!(t.hand().popped(), Some(a));
        t.take_events();
        // The popped card's region follows its pop-out pose, so probe the
        // neighbor away from the overlap.
        t.frame(&PointerFrame::idle(Point::new(0.7, 0.0)), 0.016);
        assert_eq!(t.hand().popped(), Some(b));
        let events = t.take_events();
        let unpop = events.iter().position(|e| {
            matches!(
                e,
                TableEvent::Motion(MotionRequest {
                    tag: MotionTag::Unpop,
                    ..
                })
            )
        });
        let pop = events.iter().position(|e| {
            matches!(
                e,
                TableEvent::Motion(MotionRequest {
                    tag: MotionTag::Pop,
                    ..
                })
            )
        });
        assert!(
            unpop.expect("unpop emitted") < pop.expect("pop emitted"),
            "the previous card returns before the next one pops"
        );
    }

    #[test]
    fn pressing_a_hand_card_starts_a_drag_on_the_drag_layer() {
        let mut t = table();
        let card = t.draw(CardData::default()).expect("room");
        t.take_events();
        t.frame(&PointerFrame::press(Point::ZERO), 0.016);
        assert_eq!(t.dragging(), Some(card));
        assert_eq!(t.phase(card), Some(Phase::Dragging));
        assert_eq!(t.order(card), Some(stacking::DRAG_LAYER));
        assert_eq!(t.hand().popped(), None, "drag start clears the pop-out");
        let events = t.take_events();
        assert!(events.contains(&TableEvent::CancelMotion(card)));
        assert!(events.contains(&TableEvent::DragStarted(card)));
    }

    #[test]
    fn at_most_one_card_drags_and_hover_is_suppressed_meanwhile() {
        let mut t = table();
        let a = t.draw(CardData::default()).expect("room");
        let _b = t.draw(CardData::default()).expect("room");
        t.frame(&PointerFrame::press(Point::new(-0.3, 0.0)), 0.016);
        assert_eq!(t.dragging(), Some(a));
        // Holding over the other card neither pops it nor starts a second
        // drag.
        t.frame(&PointerFrame::hold(Point::new(0.3, 0.0)), 0.016);
        assert_eq!(t.dragging(), Some(a));
        assert_eq!(t.hand().popped(), None);
    }

    #[test]
    fn the_dragged_card_follows_the_pointer_and_tilts_into_travel() {
        let mut t = table();
        let card = t.draw(CardData::default()).expect("room");
        t.frame(&PointerFrame::press(Point::ZERO), 0.016);
        // dt of 0.1 at rotation speed 5 blends half-way per frame. Moving
        // +x targets −90°, clamped to −40°.
        t.frame(&PointerFrame::hold(Point::new(1.0, 0.0)), 0.1);
        let pose = t.pose(card).expect("card exists");
        assert_eq!(pose.position, Point::new(1.0, 0.0), "pointer-locked");
        assert!((pose.angle + 20.0).abs() < 1e-9, "half-way to the clamp");
        // A still pointer is jitter: the tilt holds instead of easing back.
        t.frame(&PointerFrame::hold(Point::new(1.0, 0.0)), 0.1);
        let pose = t.pose(card).expect("card exists");
        assert!((pose.angle + 20.0).abs() < 1e-9, "still frames keep the tilt");
        // Sub-threshold travel still tracks the pointer.
        t.frame(&PointerFrame::hold(Point::new(1.005, 0.0)), 0.1);
        let pose = t.pose(card).expect("card exists");
        assert_eq!(pose.position, Point::new(1.005, 0.0), "position always follows");
        assert!((pose.angle + 20.0).abs() < 1e-9, "tiny travel keeps the tilt too");
    }

    #[test]
    fn dropping_on_a_free_slot_places_the_card() {
        let (mut t, character, _leader, _pile) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        t.take_events();
        drag_to(&mut t, Point::ZERO, Point::new(6.0, 6.0));
        assert_eq!(t.phase(card), Some(Phase::PlacedInZone));
        assert_eq!(t.zone_of(card), Some(character));
        assert_eq!(t.order(card), Some(stacking::CHARACTER_BAND));
        let pose = t.pose(card).expect("card exists");
        assert_eq!(pose.position, Point::new(6.0, 6.0), "snapped to the anchor");
        assert_eq!(pose.angle, 0.0, "placed cards stand upright");
        assert!(!t.hand().contains(card), "placement leaves the hand");
        assert_eq!(
            t.zones().get(character).and_then(|z| z.as_slot()).and_then(SlotZone::occupant),
            Some(card)
        );
        assert!(t.take_events().contains(&TableEvent::Placed {
            card,
            zone: character
        }));
    }

    #[test]
    fn an_occupied_slot_rejects_the_drop_and_the_card_returns() {
        let (mut t, character, _leader, _pile) = furnished();
        let first = t.draw(CardData::default()).expect("room");
        place(&mut t, first, Point::new(6.0, 6.0));
        let second = t.draw(CardData::default()).expect("room");
        t.take_events();
        drag_to(&mut t, Point::ZERO, Point::new(6.0, 6.0));
        assert_eq!(t.phase(second), Some(Phase::InHand), "drop was refused");
        assert_eq!(t.zone_of(second), None);
        assert!(t.hand().contains(second));
        assert_eq!(
            t.zone_of(first),
            Some(character),
            "the occupant is undisturbed"
        );
        let events = t.take_events();
        assert!(events.contains(&TableEvent::ReturnedToHand(second)));
        assert!(
            events.iter().any(|e| matches!(
                e,
                TableEvent::Motion(MotionRequest {
                    tag: MotionTag::Layout,
                    ..
                })
            )),
            "the refused card animates back into the fan"
        );
    }

    #[test]
    fn releasing_over_nothing_returns_the_card_to_hand() {
        let (mut t, ..) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        t.take_events();
        drag_to(&mut t, Point::ZERO, Point::new(-6.0, -6.0));
        assert_eq!(t.phase(card), Some(Phase::InHand));
        assert_eq!(t.dragging(), None, "the drag slot is free again");
        assert!(t.take_events().contains(&TableEvent::ReturnedToHand(card)));
    }

    #[test]
    fn clicking_a_placed_card_fires_its_effect_and_discards_it() {
        let (mut t, character, _leader, pile) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        place(&mut t, card, Point::new(6.0, 6.0));
        t.take_events();

        t.frame(&PointerFrame::press(Point::new(6.0, 6.0)), 0.016);
        let events = t.take_events();
        assert_eq!(events.first(), Some(&TableEvent::Effect(card)));
        assert!(events.contains(&TableEvent::DiscardStarted(card)));
        // The slot is vacated the moment the flight starts.
        assert_eq!(
            t.zones().get(character).and_then(|z| z.as_slot()).and_then(SlotZone::occupant),
            None
        );
        assert_eq!(t.zone_of(card), None);
        assert_eq!(t.phase(card), Some(Phase::PlacedInZone), "still in flight");
        let landing = t.pose(card).expect("card exists").position;
        let offset = landing - Point::new(9.0, 6.0);
        assert!(
            offset.x.abs() <= 0.05 + 1e-9 && offset.y.abs() <= 0.05 + 1e-9,
            "lands within the jitter of the pile anchor"
        );

        // The flight ends; the pile registers the card.
        t.motion_complete(card);
        assert_eq!(t.phase(card), Some(Phase::Discarded));
        assert_eq!(t.zone_of(card), Some(pile));
        assert_eq!(t.order(card), Some(stacking::DISCARD_BAND + 1));
        assert_eq!(
            t.zones().get(pile).and_then(|z| z.as_discard()).map(|p| p.cards().to_vec()),
            Some(alloc::vec![card])
        );
        assert!(t.take_events().contains(&TableEvent::Discarded(card)));

        // The vacated slot accepts again.
        let next = t.draw(CardData::default()).expect("room");
        place(&mut t, next, Point::new(6.0, 6.0));
        assert_eq!(t.zone_of(next), Some(character));
    }

    #[test]
    fn a_card_in_flight_ignores_presses() {
        let (mut t, ..) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        place(&mut t, card, Point::new(6.0, 6.0));
        t.frame(&PointerFrame::press(Point::new(6.0, 6.0)), 0.016);
        t.take_events();
        // Press where it is flying to.
        let landing = t.pose(card).expect("card exists").position;
        t.frame(&PointerFrame::press(landing), 0.016);
        assert!(t.take_events().is_empty(), "in-flight cards are inert");
        assert_eq!(t.dragging(), None);
    }

    #[test]
    fn discarded_cards_are_inert() {
        let (mut t, ..) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        place(&mut t, card, Point::new(6.0, 6.0));
        t.frame(&PointerFrame::press(Point::new(6.0, 6.0)), 0.016);
        t.motion_complete(card);
        t.take_events();
        let resting = t.pose(card).expect("card exists").position;
        t.frame(&PointerFrame::press(resting), 0.016);
        assert_eq!(t.phase(card), Some(Phase::Discarded), "no further transitions");
        assert!(t.take_events().is_empty());
    }

    #[test]
    fn without_a_pile_the_effect_fires_but_the_card_stays_put() {
        let mut t = table();
        let character = t.insert_slot(SlotZone::new(
            SlotKind::Character,
            Rect::new(5.0, 5.0, 7.0, 7.0),
        ));
        let card = t.draw(CardData::default()).expect("room");
        place(&mut t, card, Point::new(6.0, 6.0));
        t.take_events();
        t.frame(&PointerFrame::press(Point::new(6.0, 6.0)), 0.016);
        let events = t.take_events();
        assert!(events.contains(&TableEvent::Effect(card)));
        assert!(!events.contains(&TableEvent::DiscardStarted(card)));
        assert_eq!(t.zone_of(card), Some(character), "the slot keeps the card");
        assert_eq!(t.phase(card), Some(Phase::PlacedInZone));
    }

    #[test]
    fn dropping_straight_onto_the_pile_discards_immediately() {
        let (mut t, _character, _leader, pile) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        t.take_events();
        drag_to(&mut t, Point::ZERO, Point::new(9.0, 6.0));
        assert_eq!(t.phase(card), Some(Phase::Discarded));
        assert_eq!(t.zone_of(card), Some(pile));
        assert_eq!(t.order(card), Some(stacking::DISCARD_BAND + 1));
        assert!(!t.hand().contains(card));
        let events = t.take_events();
        assert!(events.contains(&TableEvent::Discarded(card)));
        assert!(
            !events.iter().any(|e| matches!(e, TableEvent::Placed { .. })),
            "a pile drop is a discard, not a placement"
        );
    }

    #[test]
    fn the_leader_slot_holds_one_card_in_its_own_band() {
        let (mut t, _character, leader, _pile) = furnished();
        let card = t.draw(CardData::default()).expect("room");
        place(&mut t, card, Point::new(6.0, 9.0));
        assert_eq!(t.zone_of(card), Some(leader));
        assert_eq!(t.order(card), Some(stacking::LEADER_BAND));
    }

    #[test]
    fn the_remaining_hand_closes_ranks_after_a_placement() {
        let (mut t, ..) = furnished();
        let a = t.draw(CardData::default()).expect("room");
        let b = t.draw(CardData::default()).expect("room");
        let c = t.draw(CardData::default()).expect("room");
        let before = t.pose(a).expect("a exists").position;
        // Drag out the middle card.
        let mid = t.pose(b).expect("b exists").position;
        t.take_events();
        drag_to(&mut t, mid, Point::new(6.0, 6.0));
        assert_eq!(t.hand().cards(), [a, c]);
        assert_eq!(t.order(a), Some(0));
        assert_eq!(t.order(c), Some(2));
        assert_ne!(
            t.pose(a).expect("a exists").position,
            before,
            "survivors re-fan across the narrower spread"
        );
    }

    #[test]
    fn motion_complete_for_unknown_cards_is_ignored() {
        let mut t = table();
        let card = t.draw(CardData::default()).expect("room");
        t.take_events();
        t.motion_complete(card);
        t.motion_complete(CardId(99));
        assert_eq!(t.phase(card), Some(Phase::InHand), "nothing changed");
        assert!(t.take_events().is_empty());
    }
}
