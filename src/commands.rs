//! Command line parsing for the interactive session

use loadout_items::{Class, ItemId, ItemStat, Rarity, Slot};
use loadout_rules::{ItemFilter, Stat};

/// One user action, parsed from an input line
#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Quit,
    Grid,
    Stats,
    Classes,
    ToggleClass(Class),
    Search { filter: ItemFilter, show_all: bool },
    Show(ItemId),
    Equip { id: ItemId, slot: Option<Slot> },
    Unequip(Slot),
    Clear,
    SetBase { stat: Stat, input: String },
    SaveSettings,
}

/// Parse one line. `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "grid" => Command::Grid,
        "stats" => Command::Stats,
        "classes" => Command::Classes,
        "class" => {
            let name = rest.join(" ");
            if name.is_empty() {
                return Err("usage: class <name>".to_string());
            }
            Command::ToggleClass(name.parse().map_err(|e| format!("{e}"))?)
        }
        "search" => parse_search(&rest)?,
        "show" => Command::Show(parse_id(rest.first().copied())?),
        "equip" => {
            let id = parse_id(rest.first().copied())?;
            let slot = if rest.len() > 1 {
                Some(rest[1..].join(" ").parse().map_err(|e| format!("{e}"))?)
            } else {
                None
            };
            Command::Equip { id, slot }
        }
        "unequip" => {
            let name = rest.join(" ");
            if name.is_empty() {
                return Err("usage: unequip <slot>".to_string());
            }
            Command::Unequip(name.parse().map_err(|e| format!("{e}"))?)
        }
        "clear" => Command::Clear,
        "base" => {
            let (Some(stat), Some(_)) = (rest.first(), rest.get(1)) else {
                return Err("usage: base <stat> <value>".to_string());
            };
            Command::SetBase {
                stat: stat.parse().map_err(|e| format!("{e}"))?,
                input: rest[1..].join(" "),
            }
        }
        "save-settings" => Command::SaveSettings,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(command))
}

fn parse_id(word: Option<&str>) -> Result<ItemId, String> {
    let word = word.ok_or_else(|| "missing item id".to_string())?;
    word.parse::<u32>()
        .map(ItemId)
        .map_err(|_| format!("'{word}' is not an item id"))
}

/// `search [text...] [slot=<slot>] [rarity=<r>] [stat=<field>] [all]`
fn parse_search(words: &[&str]) -> Result<Command, String> {
    let mut filter = ItemFilter::new();
    let mut text = Vec::new();
    let mut show_all = false;

    for word in words {
        match word.split_once('=') {
            Some((key, value)) if key.eq_ignore_ascii_case("slot") => {
                filter.slot = Some(value.parse::<Slot>().map_err(|e| format!("{e}"))?);
            }
            Some((key, value)) if key.eq_ignore_ascii_case("rarity") => {
                filter.rarity = Some(value.parse::<Rarity>().map_err(|e| format!("{e}"))?);
            }
            Some((key, value)) if key.eq_ignore_ascii_case("stat") => {
                filter.stat = Some(value.parse::<ItemStat>().map_err(|e| format!("{e}"))?);
            }
            _ if word.eq_ignore_ascii_case("all") => show_all = true,
            _ => text.push(*word),
        }
    }
    if !text.is_empty() {
        filter.text = Some(text.join(" "));
    }
    Ok(Command::Search { filter, show_all })
}
