#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Tilestead.
//!
//! A [`Session`] owns the grid, the read-only turn plan, and the transient
//! interaction state (phase, running score, selection, hover). Adapters
//! mutate it exclusively through [`apply`], which executes one [`Command`]
//! and broadcasts the resulting [`Event`] values; everything else reads
//! through the [`query`] module.

use tilestead_core::{
    rng::UnitRng, CellContent, CellCoord, Command, Event, GridView, OptionSlot, Phase,
    PlacementError, TurnPlan, GRID_SIZE, TOTAL_TURNS,
};
use tilestead_system_scoring::Scoring;

/// The 6×6 cell matrix a game is played on.
///
/// Created once per game, mutated in place turn by turn, and discarded with
/// the session. Constructors return a fresh value on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellContent>,
}

impl Grid {
    /// Creates a grid with every cell set to grass.
    #[must_use]
    pub fn all_grass() -> Self {
        let side = GRID_SIZE as usize;
        Self {
            cells: vec![CellContent::Grass; side * side],
        }
    }

    /// Creates a grass grid seeded with one or two pre-placed rocks.
    ///
    /// The rock count consumes one coin flip; each rock then draws a row and
    /// a column, redrawing on collision with an earlier rock. The draw order
    /// is fixed so identical streams reproduce identical grids.
    #[must_use]
    pub fn with_rocks<R: UnitRng>(rng: &mut R) -> Self {
        let mut grid = Self::all_grass();
        let rock_count = if rng.next_unit() < 0.5 { 1 } else { 2 };

        let mut placed = 0;
        while placed < rock_count {
            let row = (rng.next_unit() * f64::from(GRID_SIZE)) as u32;
            let column = (rng.next_unit() * f64::from(GRID_SIZE)) as u32;
            let cell = CellCoord::new(column, row);
            if grid.content(cell) == Some(CellContent::Grass) {
                grid.set(cell, CellContent::Rock);
                placed += 1;
            }
        }
        grid
    }

    /// Returns the content of the provided cell, or `None` off-board.
    #[must_use]
    pub fn content(&self, cell: CellCoord) -> Option<CellContent> {
        self.view().content(cell)
    }

    /// Captures a read-only view suitable for the pure systems.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, GRID_SIZE)
    }

    fn set(&mut self, cell: CellCoord, content: CellContent) {
        let index = cell.row() as usize * GRID_SIZE as usize + cell.column() as usize;
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = content;
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::all_grass()
    }
}

/// Represents the authoritative state of one interactive game.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    plan: TurnPlan,
    turn: u32,
    phase: Phase,
    score: u32,
    selected: Option<OptionSlot>,
    hover: Option<CellCoord>,
    scoring: Scoring,
}

impl Session {
    /// Creates a session over the provided grid and turn plan.
    ///
    /// The initial running score is computed from the starting grid rather
    /// than assumed to be zero, so pre-placed content is always reflected.
    #[must_use]
    pub fn new(grid: Grid, plan: TurnPlan) -> Self {
        let mut scoring = Scoring::new();
        let score = scoring.compute(grid.view());
        Self {
            grid,
            plan,
            turn: 0,
            phase: Phase::Playing,
            score,
            selected: None,
            hover: None,
            scoring,
        }
    }
}

/// Applies the provided command to the session, mutating state
/// deterministically and appending the resulting events.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectOption { slot } => {
            if session.phase != Phase::Playing {
                return;
            }
            let selected = if session.selected == Some(slot) {
                None
            } else {
                Some(slot)
            };
            session.selected = selected;
            session.hover = None;
            out_events.push(Event::SelectionChanged { selected });
        }
        Command::HoverCell { cell } => {
            session.hover = cell;
        }
        Command::PlaceTile { cell } => place_tile(session, cell, out_events),
    }
}

fn place_tile(session: &mut Session, cell: CellCoord, out_events: &mut Vec<Event>) {
    if session.phase != Phase::Playing {
        out_events.push(Event::PlacementRejected {
            cell,
            reason: PlacementError::PhaseEnded,
        });
        return;
    }

    let Some(slot) = session.selected else {
        out_events.push(Event::PlacementRejected {
            cell,
            reason: PlacementError::NoSelection,
        });
        return;
    };

    let option = *session
        .plan
        .entry(session.turn)
        .expect("playing session must have a plan entry for the active turn")
        .option(slot);

    if let Err(reason) = tilestead_system_placement::validate(
        session.grid.view(),
        cell,
        option.constraint(),
    ) {
        out_events.push(Event::PlacementRejected { cell, reason });
        return;
    }

    session.grid.set(cell, CellContent::Placed(option.kind()));
    session.selected = None;
    session.hover = None;
    out_events.push(Event::TilePlaced {
        cell,
        kind: option.kind(),
    });
    out_events.push(Event::SelectionChanged { selected: None });

    let score = session.scoring.compute(session.grid.view());
    session.score = score;
    out_events.push(Event::ScoreChanged { score });

    session.turn += 1;
    if session.turn >= TOTAL_TURNS {
        session.phase = Phase::Ended;
        out_events.push(Event::GameEnded { score });
    } else {
        out_events.push(Event::TurnAdvanced { turn: session.turn });
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::Session;
    use tilestead_core::{CellCoord, GridView, OptionSlot, Phase, TileOption, TurnPlan};
    use tilestead_system_placement::{preview, valid_positions, PlacementPreview};

    /// Captures a read-only view of the session's grid.
    #[must_use]
    pub fn grid_view(session: &Session) -> GridView<'_> {
        session.grid.view()
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(session: &Session) -> Phase {
        session.phase
    }

    /// Zero-based index of the active turn.
    #[must_use]
    pub fn turn(session: &Session) -> u32 {
        session.turn
    }

    /// Running score over the current grid.
    #[must_use]
    pub fn score(session: &Session) -> u32 {
        session.score
    }

    /// Slot of the currently selected option, if any.
    #[must_use]
    pub fn selected_slot(session: &Session) -> Option<OptionSlot> {
        session.selected
    }

    /// Cell currently hovered for a ghost preview, if any.
    #[must_use]
    pub fn hover_cell(session: &Session) -> Option<CellCoord> {
        session.hover
    }

    /// The full read-only turn plan backing the session.
    #[must_use]
    pub fn turn_plan(session: &Session) -> &TurnPlan {
        &session.plan
    }

    /// The two options offered on the active turn; `None` once ended.
    #[must_use]
    pub fn current_options(session: &Session) -> Option<&[TileOption; 2]> {
        session.plan.entry(session.turn).map(|entry| entry.current())
    }

    /// Preview of the following turn's options; `None` on the final turn
    /// and once ended.
    #[must_use]
    pub fn next_options(session: &Session) -> Option<&[TileOption; 2]> {
        session.plan.entry(session.turn).and_then(|entry| entry.next())
    }

    /// The currently selected tile option, if any.
    #[must_use]
    pub fn selected_option(session: &Session) -> Option<&TileOption> {
        let slot = session.selected?;
        session
            .plan
            .entry(session.turn)
            .map(|entry| entry.option(slot))
    }

    /// Cells the active selection may legally occupy, in scan order.
    ///
    /// Empty when nothing is selected or the session ended. Safe to call on
    /// every pointer-hover event.
    #[must_use]
    pub fn selection_positions(session: &Session) -> Vec<CellCoord> {
        match selected_option(session) {
            Some(option) => valid_positions(grid_view(session), option.constraint()),
            None => Vec::new(),
        }
    }

    /// Ghost preview for the hovered cell under the active selection.
    #[must_use]
    pub fn hover_preview(session: &Session) -> Option<PlacementPreview> {
        let cell = session.hover?;
        let option = selected_option(session)?;
        Some(preview(grid_view(session), option, cell))
    }
}
