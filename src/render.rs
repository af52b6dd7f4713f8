//! Plain-text rendering of the planner
//!
//! The grid mirrors the paper-doll layout: four columns, jewelry and armor
//! down the sides, rings and weapons along the bottom.

use std::fmt::Write;

use loadout_items::{Item, Slot};
use loadout_rules::{CharacterStats, EquippedSet, Planner, StatSection};

const CELL_WIDTH: usize = 18;

/// Socket grid, row by row. `None` is an empty cell.
const GRID: [[Option<Slot>; 4]; 8] = [
    [Some(Slot::Ear1), Some(Slot::Head), Some(Slot::Face), Some(Slot::Ear2)],
    [Some(Slot::Chest), None, None, Some(Slot::Neck)],
    [Some(Slot::Arms), None, None, Some(Slot::Back)],
    [Some(Slot::Waist), None, None, Some(Slot::Shoulders)],
    [Some(Slot::Bracer1), None, None, Some(Slot::Bracer2)],
    [Some(Slot::Legs), Some(Slot::Hands), Some(Slot::Charm), Some(Slot::Feet)],
    [None, Some(Slot::Ring1), Some(Slot::Ring2), Some(Slot::PowerSource)],
    [Some(Slot::Primary), Some(Slot::Secondary), Some(Slot::Range), Some(Slot::Ammo)],
];

fn cell(text: &str) -> String {
    let mut text: String = text.chars().take(CELL_WIDTH - 2).collect();
    if text.chars().count() < CELL_WIDTH - 2 {
        text = format!("{text:<width$}", width = CELL_WIDTH - 2);
    }
    format!("[{text}]")
}

/// Render the equipment grid
pub fn grid(equipped: &EquippedSet) -> String {
    let mut out = String::new();
    for row in GRID {
        let line: Vec<String> = row
            .iter()
            .map(|slot| match slot {
                Some(slot) => match equipped.get(*slot) {
                    Some(item) => cell(&item.name),
                    None => cell(slot.name()),
                },
                None => " ".repeat(CELL_WIDTH),
            })
            .collect();
        let _ = writeln!(out, "{}", line.join(" ").trim_end());
    }
    out
}

/// Render the character sheet: total value with the heroic bonus in brackets
pub fn stats(stats: &CharacterStats) -> String {
    let mut out = String::new();
    for section in StatSection::all() {
        let _ = writeln!(out, "{}", section.name());
        for stat in section.stats() {
            let heroic = stats.heroic(stat);
            if heroic != 0 {
                let _ = writeln!(out, "  {:<8}{:>6} [{:+}]", stat.to_string(), stats.total(stat), heroic);
            } else {
                let _ = writeln!(out, "  {:<8}{:>6}", stat.to_string(), stats.total(stat));
            }
        }
    }
    out
}

/// Render the class selection, selected classes marked
pub fn classes(planner: &Planner) -> String {
    let mut out = String::new();
    for class in loadout_items::Class::picker_order() {
        let mark = if planner.classes().contains(*class) { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {class}");
    }
    out
}

/// One line per item for search results
pub fn item_line(item: &Item, eligible: bool) -> String {
    let slots: Vec<&str> = Slot::all()
        .iter()
        .filter(|slot| item.slots.contains(slot.bit()))
        .map(|slot| slot.name())
        .collect();
    let flag = if eligible { "" } else { "  (not usable)" };
    format!(
        "{:>8}  {:<32} {:<10} {}{}",
        item.id.0,
        item.name,
        item.rarity.name(),
        slots.join(", "),
        flag
    )
}

/// Full item card
pub fn item_card(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", item.name, item.id);
    let _ = writeln!(out, "  Rarity: {}", item.rarity);

    let slots: Vec<&str> = Slot::all()
        .iter()
        .filter(|slot| item.slots.contains(slot.bit()))
        .map(|slot| slot.name())
        .collect();
    let _ = writeln!(out, "  Slots: {}", slots.join(", "));

    if item.is_universal() {
        let _ = writeln!(out, "  Classes: ALL");
    } else {
        let names: Vec<&str> = item.classes.classes().iter().map(|c| c.name()).collect();
        let _ = writeln!(out, "  Classes: {}", names.join(", "));
    }

    if item.defense != 0 {
        let _ = writeln!(out, "  AC: {}", item.defense);
    }
    for (stat, value) in item.stats.populated().filter(|(_, v)| *v != 0) {
        let _ = writeln!(out, "  {}: {:+}", stat.key(), value);
    }
    if let Some(heroic) = &item.heroic_stats {
        for (stat, value) in heroic.populated().filter(|(_, v)| *v != 0) {
            let _ = writeln!(out, "  heroic {}: {:+}", stat.key(), value);
        }
    }
    if item.cast_time > 0 {
        let _ = writeln!(out, "  Cast time: {:.1}s", f64::from(item.cast_time) / 1000.0);
    }
    out
}

pub const HELP: &str = "\
Commands:
  grid                         show equipped sockets
  stats                        show the character sheet
  classes                      list classes
  class <name>                 toggle a class (1 to 3 selected)
  search [text] [slot=<slot>] [rarity=<r>] [stat=<field>] [all]
  show <id>                    item details
  equip <id> [slot]            equip into a socket, or the first free one
  unequip <slot>               empty a socket
  clear                        empty every socket
  base <stat> <value>          edit a baseline stat
  save-settings                persist baseline and preferences
  quit
";
