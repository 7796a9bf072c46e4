//! Map validation command implementation.

use super::CliError;
use skirmish::game::{MapSettings, check_invariants, load_map};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the map cannot be read or is invalid.
pub(crate) fn execute(map: &Path) -> Result<(), CliError> {
    println!("Validating: {}", map.display());
    println!();

    let state = match load_map(map, MapSettings::default()) {
        Ok(state) => {
            print_check("Map parses", true);
            state
        }
        Err(e) => {
            print_check("Map parses", false);
            return Err(e.into());
        }
    };

    let violations = check_invariants(&state);
    print_check("Consistent initial state", violations.is_empty());
    if let Some(first) = violations.first() {
        return Err(CliError::new(first.to_string()));
    }

    let grid = &state.grid;
    let blocked = grid.tiles().iter().filter(|tile| tile.blocked).count();

    println!();
    println!("Summary:");
    println!("  Size:         {}x{}", grid.width(), grid.height());
    println!("  Blocked:      {blocked}");
    println!("  Enemies:      {}", state.enemies.len());
    println!("  Home base:    {}", state.base);
    println!("  Goal:         {}", state.goal);

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
