#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilestead engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the session executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values for
//! presentation layers to react to deterministically. Systems consume
//! immutable grid views and respond exclusively with new values.

use serde::{Deserialize, Serialize};

pub mod rng;

/// Side length of the square puzzle grid measured in cells.
pub const GRID_SIZE: u32 = 6;

/// Number of turns played before a session ends.
pub const TOTAL_TURNS: u32 = 10;

/// Number of current-option slots generated for a full game.
pub const OPTION_SLOT_COUNT: u32 = TOTAL_TURNS * 2;

/// Placeable tile kinds offered to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Scores per tree in the surrounding eight cells.
    Mountain,
    /// Scores per tree in the four orthogonally touching cells.
    Tree,
    /// Scores per grass cell in the four orthogonally touching cells.
    Farm,
    /// Scores by shortest grass path to the nearest house.
    Castle,
    /// Scores by the variety of surrounding cell contents.
    House,
}

/// Kinds drawn for every slot except the single castle slot.
///
/// The order is significant: uniform draws index this table directly, so
/// reordering it changes every generated plan.
pub const NON_CASTLE_KINDS: [TileKind; 4] = [
    TileKind::Mountain,
    TileKind::Tree,
    TileKind::Farm,
    TileKind::House,
];

/// Content held by a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    /// Empty, placeable terrain. The default for every cell.
    Grass,
    /// Pre-placed obstacle. Never placeable, never scored, never traversed.
    Rock,
    /// A tile placed by the player.
    Placed(TileKind),
}

impl CellContent {
    /// Reports whether the cell is open for tile placement.
    #[must_use]
    pub const fn is_grass(self) -> bool {
        matches!(self, Self::Grass)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Read-only view into a dense square cell grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellContent],
    side: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellContent], side: u32) -> Self {
        Self { cells, side }
    }

    /// Returns the content of the provided cell, or `None` off-board.
    #[must_use]
    pub fn content(&self, cell: CellCoord) -> Option<CellContent> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is inside the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.side && cell.row() < self.side
    }

    /// Side length of the viewed grid.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Returns the underlying row-major cell slice.
    #[must_use]
    pub const fn cells(&self) -> &'a [CellContent] {
        self.cells
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.side).ok()?;
        Some(row * width + column)
    }
}

/// One-based row or column index referenced by a placement constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneIndex(u32);

impl LaneIndex {
    /// Creates a new lane index wrapper. Valid values lie in `1..=GRID_SIZE`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying one-based index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the lane matches the provided zero-based axis value.
    #[must_use]
    pub const fn matches_zero_based(&self, axis: u32) -> bool {
        self.0 == axis + 1
    }

    /// Converts the lane to its zero-based axis value.
    #[must_use]
    pub const fn to_zero_based(&self) -> u32 {
        self.0 - 1
    }
}

/// Restricts a tile option to a single row or column of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementConstraint {
    /// The tile may only occupy cells in the given one-based row.
    Row {
        /// One-based row index in `1..=GRID_SIZE`.
        index: LaneIndex,
    },
    /// The tile may only occupy cells in the given one-based column.
    Column {
        /// One-based column index in `1..=GRID_SIZE`.
        index: LaneIndex,
    },
}

impl PlacementConstraint {
    /// Reports whether the constraint's lane contains the provided cell.
    ///
    /// This checks the axis only; cell content is the validator's concern.
    #[must_use]
    pub const fn permits(&self, cell: CellCoord) -> bool {
        match self {
            Self::Row { index } => index.matches_zero_based(cell.row()),
            Self::Column { index } => index.matches_zero_based(cell.column()),
        }
    }
}

/// One of the two tile choices offered on a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileOption {
    kind: TileKind,
    constraint: PlacementConstraint,
}

impl TileOption {
    /// Creates a new tile option pairing a kind with its constraint.
    #[must_use]
    pub const fn new(kind: TileKind, constraint: PlacementConstraint) -> Self {
        Self { kind, constraint }
    }

    /// Kind of tile offered by the option.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Placement constraint attached to the option.
    #[must_use]
    pub const fn constraint(&self) -> PlacementConstraint {
        self.constraint
    }
}

/// Identifies one of the two options offered on a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionSlot {
    /// The first offered option.
    First,
    /// The second offered option.
    Second,
}

impl OptionSlot {
    /// Index of the slot within a `[TileOption; 2]` pair.
    #[must_use]
    pub const fn as_index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Tile options for a single turn: the offered pair plus a preview of the
/// following turn's pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOptions {
    current: [TileOption; 2],
    next: Option<[TileOption; 2]>,
}

impl TurnOptions {
    /// Creates turn options from the offered pair and an optional preview.
    #[must_use]
    pub const fn new(current: [TileOption; 2], next: Option<[TileOption; 2]>) -> Self {
        Self { current, next }
    }

    /// The two options offered this turn.
    #[must_use]
    pub const fn current(&self) -> &[TileOption; 2] {
        &self.current
    }

    /// Preview of the following turn's pair; absent on the final turn.
    #[must_use]
    pub const fn next(&self) -> Option<&[TileOption; 2]> {
        self.next.as_ref()
    }

    /// Retrieves the option stored in the provided slot.
    #[must_use]
    pub const fn option(&self, slot: OptionSlot) -> &TileOption {
        &self.current[slot.as_index()]
    }
}

/// Precomputed, seeded sequence of tile-option pairs for every turn.
///
/// The plan is generated once per game and read-only thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPlan {
    entries: Vec<TurnOptions>,
}

impl TurnPlan {
    /// Wraps the generated entries.
    ///
    /// # Panics
    ///
    /// Panics when the entry count differs from [`TOTAL_TURNS`]. A
    /// wrong-length plan indicates a construction bug, never a runtime
    /// condition, and must surface immediately.
    #[must_use]
    pub fn from_entries(entries: Vec<TurnOptions>) -> Self {
        assert_eq!(
            entries.len(),
            TOTAL_TURNS as usize,
            "turn plan must hold exactly {TOTAL_TURNS} entries"
        );
        Self { entries }
    }

    /// All entries in turn order.
    #[must_use]
    pub fn entries(&self) -> &[TurnOptions] {
        &self.entries
    }

    /// Entry for the provided zero-based turn, or `None` past the last turn.
    #[must_use]
    pub fn entry(&self, turn: u32) -> Option<&TurnOptions> {
        self.entries.get(usize::try_from(turn).ok()?)
    }
}

/// Lifecycle phase of an interactive session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Turns remain and commands mutate the grid.
    Playing,
    /// All turns are spent; the grid and score are final.
    Ended,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Selects one of the two current options, or clears the selection when
    /// the slot is already active.
    SelectOption {
        /// Slot the player interacted with.
        slot: OptionSlot,
    },
    /// Updates the hovered cell used for ghost previews.
    HoverCell {
        /// Hovered cell, or `None` when the cursor left the grid.
        cell: Option<CellCoord>,
    },
    /// Requests placement of the selected option's tile at the given cell.
    PlaceTile {
        /// Cell targeted for placement.
        cell: CellCoord,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the active selection changed.
    SelectionChanged {
        /// Slot that became active, or `None` after a toggle-off.
        selected: Option<OptionSlot>,
    },
    /// Confirms that a tile was written into the grid.
    TilePlaced {
        /// Cell that received the tile.
        cell: CellCoord,
        /// Kind of tile placed.
        kind: TileKind,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports the freshly recomputed running score.
    ScoreChanged {
        /// Total score over the current grid.
        score: u32,
    },
    /// Announces that the session advanced to a new turn.
    TurnAdvanced {
        /// Zero-based index of the turn that became active.
        turn: u32,
    },
    /// Announces that the final tile was placed and the session ended.
    GameEnded {
        /// Final score over the completed grid.
        score: u32,
    },
}

/// Reasons a placement request may be rejected by the session.
///
/// Rejection is ordinary gameplay input handling; none of these conditions
/// raise an error or panic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The session already ended; no further placements are accepted.
    PhaseEnded,
    /// No option is selected, so there is no tile to place.
    NoSelection,
    /// The requested cell lies outside the grid bounds.
    OutOfBounds,
    /// The requested cell is not grass.
    Occupied,
    /// The requested cell is outside the selected option's lane.
    OffConstraint,
}

#[cfg(test)]
mod tests {
    use super::{
        CellContent, CellCoord, GridView, LaneIndex, PlacementConstraint, PlacementError,
        TileKind, TileOption, TurnOptions, TurnPlan, GRID_SIZE, TOTAL_TURNS,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    fn sample_option() -> TileOption {
        TileOption::new(
            TileKind::Farm,
            PlacementConstraint::Row {
                index: LaneIndex::new(3),
            },
        )
    }

    #[test]
    fn cell_content_round_trips_through_bincode() {
        assert_round_trip(&CellContent::Placed(TileKind::Castle));
        assert_round_trip(&CellContent::Rock);
    }

    #[test]
    fn tile_option_round_trips_through_bincode() {
        assert_round_trip(&sample_option());
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::OffConstraint);
    }

    #[test]
    fn turn_options_round_trip_through_bincode() {
        let pair = [sample_option(), sample_option()];
        assert_round_trip(&TurnOptions::new(pair, Some(pair)));
        assert_round_trip(&TurnOptions::new(pair, None));
    }

    #[test]
    fn lane_index_matches_zero_based_axis() {
        let lane = LaneIndex::new(4);
        assert!(lane.matches_zero_based(3));
        assert!(!lane.matches_zero_based(4));
        assert_eq!(lane.to_zero_based(), 3);
    }

    #[test]
    fn constraint_permits_matching_lane_only() {
        let row = PlacementConstraint::Row {
            index: LaneIndex::new(2),
        };
        assert!(row.permits(CellCoord::new(5, 1)));
        assert!(!row.permits(CellCoord::new(1, 2)));

        let column = PlacementConstraint::Column {
            index: LaneIndex::new(6),
        };
        assert!(column.permits(CellCoord::new(5, 0)));
        assert!(!column.permits(CellCoord::new(4, 5)));
    }

    #[test]
    fn grid_view_reads_row_major_cells() {
        let side = GRID_SIZE as usize;
        let mut cells = vec![CellContent::Grass; side * side];
        cells[side + 2] = CellContent::Rock;
        let view = GridView::new(&cells, GRID_SIZE);

        assert_eq!(view.content(CellCoord::new(2, 1)), Some(CellContent::Rock));
        assert_eq!(view.content(CellCoord::new(0, 0)), Some(CellContent::Grass));
        assert_eq!(view.content(CellCoord::new(GRID_SIZE, 0)), None);
    }

    #[test]
    fn turn_plan_exposes_entries_by_turn() {
        let pair = [sample_option(), sample_option()];
        let entries = vec![TurnOptions::new(pair, None); TOTAL_TURNS as usize];
        let plan = TurnPlan::from_entries(entries);

        assert!(plan.entry(0).is_some());
        assert!(plan.entry(TOTAL_TURNS - 1).is_some());
        assert!(plan.entry(TOTAL_TURNS).is_none());
    }

    #[test]
    #[should_panic(expected = "turn plan must hold exactly")]
    fn short_turn_plan_fails_construction() {
        let pair = [sample_option(), sample_option()];
        let _ = TurnPlan::from_entries(vec![TurnOptions::new(pair, None); 3]);
    }
}
