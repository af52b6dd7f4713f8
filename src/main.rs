//! Loadout - an equipment planner for building a character's gear set
//!
//! Reads one command per line from stdin and prints the result.

mod commands;
mod render;
mod settings;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use loadout_items::Catalog;
use loadout_rules::{EmptyFilter, EquipOutcome, ItemFilter, Planner};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::Command;
use settings::Settings;

/// Interactive session state
struct App {
    catalog: Catalog,
    planner: Planner,
    empty_filter: EmptyFilter,
}

impl App {
    fn new(catalog: Catalog, settings: &Settings) -> Self {
        Self {
            catalog,
            planner: settings.planner(),
            empty_filter: settings.planner.empty_filter,
        }
    }

    /// Run one command. Returns false when the session should end.
    fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        match command {
            Command::Help => write!(out, "{}", render::HELP)?,
            Command::Quit => return Ok(false),
            Command::Grid => write!(out, "{}", render::grid(self.planner.equipped()))?,
            Command::Stats => write!(out, "{}", render::stats(&self.planner.stats()))?,
            Command::Classes => write!(out, "{}", render::classes(&self.planner))?,
            Command::ToggleClass(class) => {
                if self.planner.toggle_class(class) {
                    write!(out, "{}", render::classes(&self.planner))?;
                } else if self.planner.classes().contains(class) {
                    writeln!(out, "At least one class must stay selected")?;
                } else {
                    writeln!(out, "At most three classes can be selected")?;
                }
            }
            Command::Search { filter, show_all } => self.search(filter, show_all, out)?,
            Command::Show(id) => match self.catalog.get(id) {
                Some(item) => write!(out, "{}", render::item_card(item))?,
                None => writeln!(out, "No item with id {id}")?,
            },
            Command::Equip { id, slot } => {
                let Some(item) = self.catalog.get(id) else {
                    writeln!(out, "No item with id {id}")?;
                    return Ok(true);
                };
                let outcome = match slot {
                    Some(slot) => self.planner.equip(item, slot),
                    None => self.planner.equip_auto(item),
                };
                match outcome {
                    EquipOutcome::Equipped { slot, replaced } => {
                        writeln!(out, "Equipped {} in {}", item.name, slot)?;
                        if let Some(old) = replaced {
                            writeln!(out, "Replaced {}", old.name)?;
                        }
                    }
                    EquipOutcome::Rejected(reason) => writeln!(out, "{reason}")?,
                }
            }
            Command::Unequip(slot) => match self.planner.unequip(slot) {
                Some(item) => writeln!(out, "Removed {} from {}", item.name, slot)?,
                None => writeln!(out, "{slot} is already empty")?,
            },
            Command::Clear => {
                self.planner.clear();
                writeln!(out, "All slots cleared")?;
            }
            Command::SetBase { stat, input } => {
                let value = self.planner.set_base_stat(stat, &input);
                writeln!(out, "Base {stat} set to {value}")?;
            }
            Command::SaveSettings => {
                let settings = Settings::from_session(&self.planner, self.empty_filter);
                match settings.save() {
                    Ok(path) => writeln!(out, "Settings saved to {}", path.display())?,
                    Err(e) => {
                        warn!("Failed to save settings: {:#}", e);
                        writeln!(out, "Could not save settings: {e}")?;
                    }
                }
            }
        }
        Ok(true)
    }

    fn search(&self, filter: ItemFilter, show_all: bool, out: &mut impl Write) -> Result<()> {
        let empty = if show_all { EmptyFilter::All } else { self.empty_filter };
        let results = filter.apply(&self.catalog, empty);
        if results.is_empty() {
            if filter.is_active() || empty == EmptyFilter::All {
                writeln!(out, "No items found")?;
            } else {
                writeln!(out, "Enter search text or criteria, or 'search all'")?;
            }
            return Ok(());
        }
        for item in results {
            writeln!(out, "{}", render::item_line(item, self.planner.is_eligible(item)))?;
        }
        Ok(())
    }
}

/// Read commands from `input` until `quit` or end of input. Lines that are
/// not valid UTF-8 are decoded lossily.
fn run(app: &mut App, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);

        match commands::parse(&line) {
            Ok(Some(command)) => {
                if !app.handle(command, &mut out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => writeln!(out, "{message}")?,
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    info!("Starting loadout planner...");

    let settings = Settings::load();
    let catalog = Catalog::builtin().context("Failed to load the item catalog")?;
    let mut app = App::new(catalog, &settings);

    let mut stdout = io::stdout();
    write!(stdout, "{}", render::grid(app.planner.equipped()))?;
    writeln!(stdout, "Type 'help' for commands")?;

    run(&mut app, io::stdin().lock(), stdout)?;

    info!("Goodbye");
    Ok(())
}
