// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted pass over the whole interaction surface.
//!
//! This example stands in for a real host: it builds a table with a bowed
//! hand curve, a character slot, a leader slot, and a discard pile, then
//! feeds the table a scripted pointer sequence — draw, hover, drag, drop,
//! click-to-discard — and plays the emitted events the way a renderer and
//! tween scheduler would.
//!
//! Run:
//! - `cargo run -p deckhand_examples --example card_table`

use deckhand_card::CardData;
use deckhand_interact::{CardTable, PointerFrame, TableConfig, TableEvent};
use deckhand_zones::{DiscardPile, SlotKind, SlotZone};
use kurbo::{CubicBez, Point, Rect};

const DT: f64 = 1.0 / 60.0;

fn card(name: &str, cost: i32, power: i32) -> CardData {
    CardData {
        name: name.into(),
        cost,
        power,
        ..CardData::default()
    }
}

/// Drain the table's events and print them the way a host would consume
/// them. Discard flights are "played" instantly by reporting completion.
fn pump(table: &mut CardTable<CubicBez>) {
    let mut flights = Vec::new();
    for event in table.take_events() {
        match &event {
            TableEvent::Motion(req) => {
                println!(
                    "  tween {:?} -> ({:.2}, {:.2}) over {:.2}s [{:?}]",
                    req.card, req.target.position.x, req.target.position.y, req.duration, req.tag
                );
                if req.tag == deckhand_interact::MotionTag::Discard {
                    flights.push(req.card);
                }
            }
            TableEvent::CancelMotion(card) => println!("  cancel tweens on {card:?}"),
            TableEvent::Effect(card) => {
                let name = table.data(*card).map_or("?", |d| d.name.as_str());
                println!("  effect fires for {card:?} ({name})");
            }
            other => println!("  {other:?}"),
        }
    }
    for card in flights {
        table.motion_complete(card);
        for event in table.take_events() {
            println!("  {event:?}");
        }
    }
}

fn main() {
    // Surface the libraries' warn paths (capacity overflow, missing pile).
    env_logger::init();

    let fan = CubicBez::new(
        Point::new(-4.0, 0.0),
        Point::new(-1.5, 1.2),
        Point::new(1.5, 1.2),
        Point::new(4.0, 0.0),
    );
    let mut table = CardTable::new(TableConfig::default(), fan);
    let character = table.insert_slot(SlotZone::new(
        SlotKind::Character,
        Rect::new(4.0, 3.0, 6.0, 6.0),
    ));
    let _leader = table.insert_slot(SlotZone::new(
        SlotKind::Leader,
        Rect::new(1.0, 3.0, 3.0, 6.0),
    ));
    let pile = table.insert_discard(DiscardPile::new(Rect::new(7.0, 3.0, 9.0, 6.0)));

    println!("drawing five cards:");
    let names = ["Luffy", "Zoro", "Nami", "Usopp", "Sanji"];
    for (i, name) in names.iter().enumerate() {
        table.draw(card(name, i as i32 + 1, 1000 * (i as i32 + 1)));
    }
    pump(&mut table);

    let hand = table.hand().cards().to_vec();
    let target = hand[2];
    let at = table.pose(target).expect("card is in hand").position;

    println!("\nhovering the middle card:");
    table.frame(&PointerFrame::idle(at), DT);
    pump(&mut table);

    println!("\ndragging it onto the character slot:");
    let popped = table.pose(target).expect("card is popped").position;
    table.frame(&PointerFrame::press(popped), DT);
    table.frame(&PointerFrame::hold(Point::new(3.0, 2.0)), DT);
    table.frame(&PointerFrame::hold(Point::new(5.0, 4.5)), DT);
    table.frame(&PointerFrame::release(Point::new(5.0, 4.5)), DT);
    pump(&mut table);
    println!(
        "  slot {:?} now holds {:?}",
        character,
        table
            .zones()
            .get(character)
            .and_then(|z| z.as_slot())
            .and_then(SlotZone::occupant)
    );

    println!("\nclicking the placed card (effect, then discard):");
    table.frame(&PointerFrame::press(Point::new(5.0, 4.5)), DT);
    pump(&mut table);

    let discards = table
        .zones()
        .get(pile)
        .and_then(|z| z.as_discard())
        .map_or(0, |p| p.cards().len());
    println!(
        "\nfinal state: {} in hand, {} in the pile, drag slot free: {}",
        table.hand().len(),
        discards,
        table.dragging().is_none()
    );
}
