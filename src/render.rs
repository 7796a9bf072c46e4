//! ASCII renderer for terminal viewing with ANSI colors.
//!
//! Tiles are drawn from the authoritative grid as the player sees it: fogged
//! tiles show `*` whatever they hold.

use std::fmt::Write as _;

use crate::game::{GameState, Point, Tile, VisibilityMap};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";

/// What a tile is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Hidden from the player.
    Fog,
    /// Impassable terrain.
    Blocked,
    /// Enemy headquarters.
    EnemyHq,
    /// The player's home base.
    OwnHq,
    /// At least one of the player's units.
    Unit,
    /// An enemy.
    Enemy,
    /// Nothing of interest.
    Empty,
}

/// Which glyph to draw for a tile.
#[must_use]
pub fn glyph(tile: &Tile, visible: bool) -> Glyph {
    if !visible {
        Glyph::Fog
    } else if tile.blocked {
        Glyph::Blocked
    } else if tile.is_enemy_hq() {
        Glyph::EnemyHq
    } else if tile.is_own_hq() {
        Glyph::OwnHq
    } else if tile.has_units() {
        Glyph::Unit
    } else if tile.enemy_present {
        Glyph::Enemy
    } else {
        Glyph::Empty
    }
}

/// Which side a glyph belongs to, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    /// The player.
    Own,
    /// The enemy.
    Enemy,
    /// Terrain and fog.
    Neutral,
}

impl Glyph {
    /// The character drawn for this glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Glyph::Fog => '*',
            Glyph::Blocked => 'B',
            Glyph::EnemyHq | Glyph::OwnHq => 'H',
            Glyph::Unit => 'U',
            Glyph::Enemy => 'E',
            Glyph::Empty => ' ',
        }
    }

    /// Whose color the glyph is drawn in.
    #[must_use]
    pub const fn allegiance(self) -> Allegiance {
        match self {
            Glyph::OwnHq | Glyph::Unit => Allegiance::Own,
            Glyph::EnemyHq | Glyph::Enemy => Allegiance::Enemy,
            Glyph::Fog | Glyph::Blocked | Glyph::Empty => Allegiance::Neutral,
        }
    }

    fn ansi(self) -> &'static str {
        match self.allegiance() {
            Allegiance::Own => GREEN,
            Allegiance::Enemy => RED,
            Allegiance::Neutral if self == Glyph::Blocked => BOLD,
            Allegiance::Neutral => GRAY,
        }
    }
}

/// Glyph rows for the whole grid, as the player sees it.
#[must_use]
pub fn glyph_rows(state: &GameState) -> Vec<Vec<Glyph>> {
    let fog = VisibilityMap::compute(&state.grid);
    state
        .grid
        .rows()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, tile)| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                    let point = Point::new(x as i32, y as i32);
                    glyph(tile, fog.is_visible(point))
                })
                .collect()
        })
        .collect()
}

/// Render game state to ASCII, optionally with ANSI colors.
///
/// Output format:
/// ```text
/// Turn 3  Remaining 97  Units 5  Enemies 2
/// ┌──────┐
/// │H  ***│
/// │ U E**│
/// │B  ***│
/// └──────┘
/// ```
#[must_use]
pub fn render_ascii(state: &GameState, turn: u32, color: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Turn {turn}  Remaining {}  Units {}  Enemies {}",
        state.turns_remaining,
        state.units.len(),
        state.enemies.len()
    );

    let border = "─".repeat(usize::from(state.grid.width()));
    let _ = writeln!(output, "┌{border}┐");
    for row in glyph_rows(state) {
        output.push('│');
        for glyph in row {
            if color && glyph != Glyph::Empty {
                let _ = write!(output, "{}{}{RESET}", glyph.ansi(), glyph.symbol());
            } else {
                output.push(glyph.symbol());
            }
        }
        output.push_str("│\n");
    }
    let _ = writeln!(output, "└{border}┘");
    output
}
