#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure scoring over a grid snapshot.
//!
//! The total is recomputed from scratch on every call: each placed tile
//! contributes under exactly one kind-specific rule and grass and rock
//! cells contribute nothing. The castle rule runs a breadth-first search
//! through grass, so the system keeps reusable scratch buffers to avoid
//! allocating on every recomputation.

use std::collections::VecDeque;

use tilestead_core::{CellContent, CellCoord, GridView, TileKind};

/// Orthogonal neighborhood: the up-to-4 touching cells.
const TOUCHING_DELTAS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Chebyshev-distance-1 neighborhood: the up-to-8 nearby cells.
const NEARBY_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Scoring system holding reusable breadth-first-search scratch buffers.
#[derive(Debug, Default)]
pub struct Scoring {
    frontier: VecDeque<(CellCoord, u32)>,
    visited: Vec<bool>,
}

impl Scoring {
    /// Creates a new scoring system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the total score over the provided grid snapshot.
    ///
    /// Pure with respect to the grid: the same snapshot always yields the
    /// same total, and the grid is never mutated.
    pub fn compute(&mut self, view: GridView<'_>) -> u32 {
        let mut total = 0;
        for row in 0..view.side() {
            for column in 0..view.side() {
                let cell = CellCoord::new(column, row);
                let Some(CellContent::Placed(kind)) = view.content(cell) else {
                    continue;
                };
                total += match kind {
                    TileKind::Mountain => count_nearby_trees(view, cell),
                    TileKind::Tree => count_touching_trees(view, cell),
                    TileKind::Farm => count_touching_grass(view, cell),
                    TileKind::House => count_distinct_nearby_contents(view, cell),
                    TileKind::Castle => self.castle_path_score(view, cell),
                };
            }
        }
        total
    }

    /// Shortest grass path from the castle to the nearest house, in steps.
    ///
    /// The search expands four-connected through grass only; rocks, placed
    /// tiles and the board edge are impassable. The returned count includes
    /// the completing step onto the house, so a castle directly beside a
    /// house scores 1. No reachable house scores 0.
    fn castle_path_score(&mut self, view: GridView<'_>, castle: CellCoord) -> u32 {
        let side = view.side();
        let cell_count = (side as usize) * (side as usize);
        self.visited.clear();
        self.visited.resize(cell_count, false);
        self.frontier.clear();

        mark_visited(&mut self.visited, castle, side);
        self.frontier.push_back((castle, 0));

        while let Some((cell, depth)) = self.frontier.pop_front() {
            if touches_house(view, cell) {
                self.frontier.clear();
                return depth + 1;
            }
            for (delta_column, delta_row) in TOUCHING_DELTAS {
                let Some(neighbor) = offset(cell, delta_column, delta_row, side) else {
                    continue;
                };
                if !view
                    .content(neighbor)
                    .is_some_and(CellContent::is_grass)
                {
                    continue;
                }
                if is_visited(&self.visited, neighbor, side) {
                    continue;
                }
                mark_visited(&mut self.visited, neighbor, side);
                self.frontier.push_back((neighbor, depth + 1));
            }
        }

        0
    }
}

/// Computes a one-shot total without retaining scratch buffers.
#[must_use]
pub fn compute_score(view: GridView<'_>) -> u32 {
    Scoring::new().compute(view)
}

fn count_nearby_trees(view: GridView<'_>, cell: CellCoord) -> u32 {
    count_neighbors(view, cell, &NEARBY_DELTAS, |content| {
        content == CellContent::Placed(TileKind::Tree)
    })
}

fn count_touching_trees(view: GridView<'_>, cell: CellCoord) -> u32 {
    count_neighbors(view, cell, &TOUCHING_DELTAS, |content| {
        content == CellContent::Placed(TileKind::Tree)
    })
}

fn count_touching_grass(view: GridView<'_>, cell: CellCoord) -> u32 {
    count_neighbors(view, cell, &TOUCHING_DELTAS, CellContent::is_grass)
}

/// Distinct cell contents among the nearby cells, duplicates collapsed.
///
/// Grass and rock count as contents of their own; two trees count once.
fn count_distinct_nearby_contents(view: GridView<'_>, cell: CellCoord) -> u32 {
    let mut seen: Vec<CellContent> = Vec::with_capacity(NEARBY_DELTAS.len());
    for (delta_column, delta_row) in NEARBY_DELTAS {
        let Some(neighbor) = offset(cell, delta_column, delta_row, view.side()) else {
            continue;
        };
        let Some(content) = view.content(neighbor) else {
            continue;
        };
        if !seen.contains(&content) {
            seen.push(content);
        }
    }
    seen.len() as u32
}

fn count_neighbors<F>(
    view: GridView<'_>,
    cell: CellCoord,
    deltas: &[(i32, i32)],
    matches: F,
) -> u32
where
    F: Fn(CellContent) -> bool,
{
    let mut count = 0;
    for &(delta_column, delta_row) in deltas {
        let Some(neighbor) = offset(cell, delta_column, delta_row, view.side()) else {
            continue;
        };
        if view.content(neighbor).is_some_and(&matches) {
            count += 1;
        }
    }
    count
}

fn touches_house(view: GridView<'_>, cell: CellCoord) -> bool {
    TOUCHING_DELTAS.iter().any(|&(delta_column, delta_row)| {
        offset(cell, delta_column, delta_row, view.side()).is_some_and(|neighbor| {
            view.content(neighbor) == Some(CellContent::Placed(TileKind::House))
        })
    })
}

fn offset(cell: CellCoord, delta_column: i32, delta_row: i32, side: u32) -> Option<CellCoord> {
    let column = signed_offset(cell.column(), delta_column)?;
    let row = signed_offset(cell.row(), delta_row)?;
    (column < side && row < side).then(|| CellCoord::new(column, row))
}

fn signed_offset(value: u32, delta: i32) -> Option<u32> {
    if delta < 0 {
        value.checked_sub(delta.unsigned_abs())
    } else {
        value.checked_add(delta.unsigned_abs())
    }
}

fn mark_visited(visited: &mut [bool], cell: CellCoord, side: u32) {
    if let Some(slot) = visited.get_mut(cell_index(cell, side)) {
        *slot = true;
    }
}

fn is_visited(visited: &[bool], cell: CellCoord, side: u32) -> bool {
    visited
        .get(cell_index(cell, side))
        .copied()
        .unwrap_or(false)
}

fn cell_index(cell: CellCoord, side: u32) -> usize {
    cell.row() as usize * side as usize + cell.column() as usize
}

#[cfg(test)]
mod tests {
    use super::{compute_score, offset, Scoring};
    use tilestead_core::{CellContent, CellCoord, GridView, TileKind, GRID_SIZE};

    fn grid_with(contents: &[(CellCoord, CellContent)]) -> Vec<CellContent> {
        let side = GRID_SIZE as usize;
        let mut cells = vec![CellContent::Grass; side * side];
        for (cell, content) in contents {
            let index = cell.row() as usize * side + cell.column() as usize;
            cells[index] = *content;
        }
        cells
    }

    #[test]
    fn offsets_respect_grid_edges() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(offset(origin, -1, 0, GRID_SIZE), None);
        assert_eq!(offset(origin, 0, -1, GRID_SIZE), None);
        assert_eq!(offset(origin, 1, 0, GRID_SIZE), Some(CellCoord::new(1, 0)));

        let corner = CellCoord::new(GRID_SIZE - 1, GRID_SIZE - 1);
        assert_eq!(offset(corner, 1, 0, GRID_SIZE), None);
        assert_eq!(offset(corner, 0, 1, GRID_SIZE), None);
    }

    #[test]
    fn mountain_counts_diagonal_trees() {
        let cells = grid_with(&[
            (CellCoord::new(2, 2), CellContent::Placed(TileKind::Mountain)),
            (CellCoord::new(1, 1), CellContent::Placed(TileKind::Tree)),
            (CellCoord::new(3, 1), CellContent::Placed(TileKind::Tree)),
            (CellCoord::new(3, 3), CellContent::Placed(TileKind::Tree)),
        ]);
        // Each isolated tree also scores 0, so only the mountain counts.
        assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 3);
    }

    #[test]
    fn farm_counts_touching_grass_only() {
        let cells = grid_with(&[
            (CellCoord::new(0, 0), CellContent::Placed(TileKind::Farm)),
            (CellCoord::new(1, 0), CellContent::Rock),
        ]);
        // Corner farm touches two cells; one is rock.
        assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 1);
    }

    #[test]
    fn scoring_reuses_scratch_across_calls() {
        let cells = grid_with(&[
            (CellCoord::new(0, 0), CellContent::Placed(TileKind::Castle)),
            (CellCoord::new(3, 0), CellContent::Placed(TileKind::House)),
        ]);
        let view = GridView::new(&cells, GRID_SIZE);
        let mut scoring = Scoring::new();
        let first = scoring.compute(view);
        let second = scoring.compute(view);
        assert_eq!(first, second);
    }

    #[test]
    fn rock_dispatches_no_rule() {
        let cells = grid_with(&[
            (CellCoord::new(2, 2), CellContent::Rock),
            (CellCoord::new(2, 3), CellContent::Rock),
        ]);
        assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 0);
    }
}
