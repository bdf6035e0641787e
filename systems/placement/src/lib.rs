#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement validation for constrained tile options.
//!
//! Every operation here is a function of a grid view and a constraint, with
//! no mutable state, so adapters may call them on every pointer-hover event
//! to drive highlight rings and ghost previews.

use tilestead_core::{
    CellCoord, GridView, PlacementConstraint, PlacementError, TileKind, TileOption,
};

/// Declarative preview describing a potential tile placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Kind of tile proposed for placement.
    pub kind: TileKind,
    /// Cell the preview is anchored to.
    pub cell: CellCoord,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(kind: TileKind, cell: CellCoord, placeable: bool) -> Self {
        Self {
            kind,
            cell,
            placeable,
        }
    }
}

/// Reports whether the constraint allows placing a tile at the cell.
///
/// True iff the cell is in bounds, currently grass, and lies on the
/// constraint's row or column. Invalid input simply yields `false`.
#[must_use]
pub fn is_valid_placement(
    view: GridView<'_>,
    cell: CellCoord,
    constraint: PlacementConstraint,
) -> bool {
    validate(view, cell, constraint).is_ok()
}

/// Classifies a placement request, naming the first failed check.
///
/// Session-level conditions (ended phase, missing selection) are the
/// caller's concern; this only judges the grid and the constraint.
pub fn validate(
    view: GridView<'_>,
    cell: CellCoord,
    constraint: PlacementConstraint,
) -> Result<(), PlacementError> {
    if !view.in_bounds(cell) {
        return Err(PlacementError::OutOfBounds);
    }
    if !constraint.permits(cell) {
        return Err(PlacementError::OffConstraint);
    }
    match view.content(cell) {
        Some(content) if content.is_grass() => Ok(()),
        _ => Err(PlacementError::Occupied),
    }
}

/// Enumerates every cell the constraint currently allows, in scan order.
///
/// The result walks the constrained lane from its low end upward and holds
/// at most one grid side's worth of cells.
#[must_use]
pub fn valid_positions(view: GridView<'_>, constraint: PlacementConstraint) -> Vec<CellCoord> {
    let mut positions = Vec::new();
    match constraint {
        PlacementConstraint::Row { index } => {
            let row = index.to_zero_based();
            for column in 0..view.side() {
                push_if_grass(view, CellCoord::new(column, row), &mut positions);
            }
        }
        PlacementConstraint::Column { index } => {
            let column = index.to_zero_based();
            for row in 0..view.side() {
                push_if_grass(view, CellCoord::new(column, row), &mut positions);
            }
        }
    }
    positions
}

/// Builds the hover preview for an option at the provided cell.
#[must_use]
pub fn preview(view: GridView<'_>, option: &TileOption, cell: CellCoord) -> PlacementPreview {
    PlacementPreview::new(
        option.kind(),
        cell,
        is_valid_placement(view, cell, option.constraint()),
    )
}

fn push_if_grass(view: GridView<'_>, cell: CellCoord, out: &mut Vec<CellCoord>) {
    if view.content(cell).is_some_and(|content| content.is_grass()) {
        out.push(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_placement, preview, valid_positions, validate};
    use tilestead_core::{
        CellContent, CellCoord, GridView, LaneIndex, PlacementConstraint, PlacementError,
        TileKind, TileOption, GRID_SIZE,
    };

    fn grid_with(contents: &[(CellCoord, CellContent)]) -> Vec<CellContent> {
        let side = GRID_SIZE as usize;
        let mut cells = vec![CellContent::Grass; side * side];
        for (cell, content) in contents {
            let index = cell.row() as usize * side + cell.column() as usize;
            cells[index] = *content;
        }
        cells
    }

    fn row(index: u32) -> PlacementConstraint {
        PlacementConstraint::Row {
            index: LaneIndex::new(index),
        }
    }

    fn column(index: u32) -> PlacementConstraint {
        PlacementConstraint::Column {
            index: LaneIndex::new(index),
        }
    }

    #[test]
    fn enumeration_agrees_with_the_predicate_everywhere() {
        let cells = grid_with(&[
            (CellCoord::new(2, 1), CellContent::Rock),
            (CellCoord::new(4, 1), CellContent::Placed(TileKind::Tree)),
            (CellCoord::new(3, 3), CellContent::Placed(TileKind::Farm)),
        ]);
        let view = GridView::new(&cells, GRID_SIZE);

        for constraint in [row(2), row(4), column(4), column(6)] {
            let enumerated = valid_positions(view, constraint);
            for cell_row in 0..GRID_SIZE {
                for cell_column in 0..GRID_SIZE {
                    let cell = CellCoord::new(cell_column, cell_row);
                    assert_eq!(
                        enumerated.contains(&cell),
                        is_valid_placement(view, cell, constraint),
                        "mismatch at {cell:?} under {constraint:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn occupied_cells_are_excluded_from_their_lane() {
        let cells = grid_with(&[(CellCoord::new(2, 1), CellContent::Rock)]);
        let view = GridView::new(&cells, GRID_SIZE);

        let positions = valid_positions(view, row(2));
        assert_eq!(positions.len(), GRID_SIZE as usize - 1);
        assert!(!positions.contains(&CellCoord::new(2, 1)));
    }

    #[test]
    fn positions_walk_the_lane_in_ascending_order() {
        let cells = grid_with(&[]);
        let view = GridView::new(&cells, GRID_SIZE);

        let by_row = valid_positions(view, row(3));
        let columns: Vec<u32> = by_row.iter().map(CellCoord::column).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 4, 5]);
        assert!(by_row.iter().all(|cell| cell.row() == 2));

        let by_column = valid_positions(view, column(1));
        let rows: Vec<u32> = by_column.iter().map(CellCoord::row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5]);
        assert!(by_column.iter().all(|cell| cell.column() == 0));
    }

    #[test]
    fn validate_names_the_first_failed_check() {
        let cells = grid_with(&[(CellCoord::new(0, 2), CellContent::Rock)]);
        let view = GridView::new(&cells, GRID_SIZE);

        assert_eq!(
            validate(view, CellCoord::new(GRID_SIZE, 0), row(1)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            validate(view, CellCoord::new(0, 0), row(3)),
            Err(PlacementError::OffConstraint)
        );
        assert_eq!(
            validate(view, CellCoord::new(0, 2), row(3)),
            Err(PlacementError::Occupied)
        );
        assert_eq!(validate(view, CellCoord::new(1, 2), row(3)), Ok(()));
    }

    #[test]
    fn preview_reflects_placeability() {
        let cells = grid_with(&[(CellCoord::new(5, 0), CellContent::Rock)]);
        let view = GridView::new(&cells, GRID_SIZE);
        let option = TileOption::new(TileKind::House, row(1));

        let open = preview(view, &option, CellCoord::new(4, 0));
        assert!(open.placeable);
        assert_eq!(open.kind, TileKind::House);

        let blocked = preview(view, &option, CellCoord::new(5, 0));
        assert!(!blocked.placeable);
    }
}
