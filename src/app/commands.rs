//! Commands - Parsing of Terminal Input Lines

use crate::domain::category::WasteCategory;
use crate::error::{Error, Result};

/// One user action entered at the prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Log waste of one category
    Add { category: WasteCategory, quantity: f64 },
    /// Remove the item at a zero-based index
    Remove { index: usize },
    /// Show the current items
    Items,
    /// Calculate the current items and save under this month
    Calculate,
    /// Drop all current items
    ClearItems,
    /// Latest month with its breakdown
    Dashboard,
    /// Every saved month, newest first
    History,
    /// Delete all saved months
    ClearHistory { confirmed: bool },
    /// Factor table
    Categories,
    Connect,
    Disconnect,
    /// Show the sensor gauge
    Device,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <category> <kg>       log waste, e.g. `add food waste 1.5`
  remove <n>                remove item number n
  items                     list current items
  calc                      calculate and save for this month
  clear                     clear current items
  dashboard                 latest month breakdown
  history                   all saved months
  clear-history [--yes]     delete all saved months
  categories                emission factors
  connect | disconnect      simulated sensor
  device                    sensor gauge
  help | quit";

fn invalid(message: impl Into<String>) -> Error {
    Error::Invalid {
        message: message.into(),
    }
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_lowercase().as_str() {
        "add" => parse_add(&args)?,
        "remove" | "rm" => {
            let n = args
                .first()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("usage: remove <n>"))?;
            Command::Remove { index: n - 1 }
        }
        "items" | "ls" => Command::Items,
        "calc" | "calculate" => Command::Calculate,
        "clear" => Command::ClearItems,
        "dashboard" => Command::Dashboard,
        "history" => Command::History,
        "clear-history" => Command::ClearHistory {
            confirmed: args
                .iter()
                .any(|a| matches!(*a, "--yes" | "-y" | "yes")),
        },
        "categories" | "factors" => Command::Categories,
        "connect" => Command::Connect,
        "disconnect" => Command::Disconnect,
        "device" | "gauge" => Command::Device,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(invalid(format!("unknown command `{other}`, try `help`"))),
    };
    Ok(Some(command))
}

/// `add <category words...> <kg>`
fn parse_add(args: &[&str]) -> Result<Command> {
    let Some((quantity, category)) = args.split_last() else {
        return Err(invalid("usage: add <category> <kg>"));
    };
    if category.is_empty() {
        return Err(invalid("usage: add <category> <kg>"));
    }
    let category: WasteCategory = category.join(" ").parse()?;
    let quantity = quantity
        .parse::<f64>()
        .map_err(|_| invalid("Enter a valid quantity"))?;
    Ok(Command::Add { category, quantity })
}
