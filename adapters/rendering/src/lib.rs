#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Tilestead adapters.
//!
//! Everything here turns engine values into display text; no game logic
//! lives in this crate. Adapters compose a [`SceneDecorations`] value from
//! validator output and render it over a grid view.

use std::fmt::Write as _;

use tilestead_core::{
    CellContent, CellCoord, GridView, Phase, PlacementConstraint, TileKind, TileOption,
};

/// Glyph shown for a cell's content.
#[must_use]
pub const fn glyph(content: CellContent) -> &'static str {
    match content {
        CellContent::Grass => "🟩",
        CellContent::Rock => "🪨",
        CellContent::Placed(TileKind::Mountain) => "⛰️",
        CellContent::Placed(TileKind::Tree) => "🌲",
        CellContent::Placed(TileKind::Farm) => "🌾",
        CellContent::Placed(TileKind::Castle) => "🏰",
        CellContent::Placed(TileKind::House) => "🏠",
    }
}

/// Lower-case display name for a tile kind.
#[must_use]
pub const fn kind_name(kind: TileKind) -> &'static str {
    match kind {
        TileKind::Mountain => "mountain",
        TileKind::Tree => "tree",
        TileKind::Farm => "farm",
        TileKind::Castle => "castle",
        TileKind::House => "house",
    }
}

/// Overlay state rendered on top of the grid glyphs.
///
/// Highlight rings mark the cells the active selection may occupy; the
/// ghost marks the hovered cell with the selected tile's glyph.
#[derive(Clone, Debug, Default)]
pub struct SceneDecorations {
    highlights: Vec<CellCoord>,
    ghost: Option<(CellCoord, TileKind)>,
}

impl SceneDecorations {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds highlight rings around the provided cells.
    #[must_use]
    pub fn with_highlights(mut self, cells: Vec<CellCoord>) -> Self {
        self.highlights = cells;
        self
    }

    /// Previews the provided kind at the hovered cell.
    #[must_use]
    pub fn with_ghost(mut self, cell: CellCoord, kind: TileKind) -> Self {
        self.ghost = Some((cell, kind));
        self
    }
}

/// Renders the grid with no overlay.
#[must_use]
pub fn render_grid(view: GridView<'_>) -> String {
    render_scene(view, &SceneDecorations::new())
}

/// Renders the grid with highlight rings and an optional ghost preview.
///
/// Highlighted cells are wrapped in brackets, the ghost cell in parens;
/// every other cell is padded to keep the columns aligned.
#[must_use]
pub fn render_scene(view: GridView<'_>, decorations: &SceneDecorations) -> String {
    let mut output = String::new();
    for row in 0..view.side() {
        for column in 0..view.side() {
            let cell = CellCoord::new(column, row);
            let content = view.content(cell).unwrap_or(CellContent::Grass);
            match decorations.ghost {
                Some((ghost_cell, kind)) if ghost_cell == cell => {
                    let _ = write!(output, "({})", glyph(CellContent::Placed(kind)));
                }
                _ if decorations.highlights.contains(&cell) => {
                    let _ = write!(output, "[{}]", glyph(content));
                }
                _ => {
                    let _ = write!(output, " {} ", glyph(content));
                }
            }
        }
        output.push('\n');
    }
    output
}

/// Display form of a placement constraint, e.g. `row 3`.
#[must_use]
pub fn describe_constraint(constraint: PlacementConstraint) -> String {
    match constraint {
        PlacementConstraint::Row { index } => format!("row {}", index.get()),
        PlacementConstraint::Column { index } => format!("column {}", index.get()),
    }
}

/// Display form of a tile option, e.g. `🌲 tree on row 3`.
#[must_use]
pub fn describe_option(option: &TileOption) -> String {
    format!(
        "{} {} on {}",
        glyph(CellContent::Placed(option.kind())),
        kind_name(option.kind()),
        describe_constraint(option.constraint())
    )
}

/// One-line banner for the active turn's offered options.
#[must_use]
pub fn turn_banner(turn: u32, total_turns: u32, options: &[TileOption; 2]) -> String {
    format!(
        "turn {}/{}: [1] {}  [2] {}",
        turn + 1,
        total_turns,
        describe_option(&options[0]),
        describe_option(&options[1])
    )
}

/// One-line banner previewing the following turn, when there is one.
#[must_use]
pub fn preview_banner(next: Option<&[TileOption; 2]>) -> String {
    match next {
        Some(options) => format!(
            "next up: {}  /  {}",
            describe_option(&options[0]),
            describe_option(&options[1])
        ),
        None => "next up: final turn".to_owned(),
    }
}

/// One-line banner for the running or final score.
#[must_use]
pub fn score_banner(score: u32, phase: Phase) -> String {
    match phase {
        Phase::Playing => format!("score: {score}"),
        Phase::Ended => format!("final score: {score}"),
    }
}
