use tilestead_core::{CellContent, CellCoord, GridView, TileKind, GRID_SIZE};
use tilestead_system_scoring::{compute_score, Scoring};

fn grid_with(contents: &[(CellCoord, CellContent)]) -> Vec<CellContent> {
    let side = GRID_SIZE as usize;
    let mut cells = vec![CellContent::Grass; side * side];
    for (cell, content) in contents {
        let index = cell.row() as usize * side + cell.column() as usize;
        cells[index] = *content;
    }
    cells
}

fn placed(kind: TileKind) -> CellContent {
    CellContent::Placed(kind)
}

#[test]
fn all_grass_grid_scores_zero() {
    let cells = grid_with(&[]);
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 0);
}

#[test]
fn touching_tree_pair_scores_one_each() {
    let cells = grid_with(&[
        (CellCoord::new(0, 0), placed(TileKind::Tree)),
        (CellCoord::new(1, 0), placed(TileKind::Tree)),
    ]);
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 2);
}

#[test]
fn house_counts_distinct_nearby_contents_once() {
    // House at row 2, column 2. Nearby contents: two trees, one farm, five
    // grass cells. Distinct kinds = {tree, farm, grass} = 3 for the house.
    // The trees touch no other tree (0 each); the farm touches one grass
    // cell (1). Total 3 + 1 = 4.
    let cells = grid_with(&[
        (CellCoord::new(2, 2), placed(TileKind::House)),
        (CellCoord::new(1, 1), placed(TileKind::Tree)),
        (CellCoord::new(3, 1), placed(TileKind::Tree)),
        (CellCoord::new(2, 1), placed(TileKind::Farm)),
    ]);
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 4);
}

#[test]
fn castle_scores_hops_to_the_nearest_house() {
    // A lone house among grass scores 1 (grass is its only nearby content).
    let house_only = grid_with(&[(CellCoord::new(3, 0), placed(TileKind::House))]);
    assert_eq!(compute_score(GridView::new(&house_only, GRID_SIZE)), 1);

    // Adding a castle three hops away along a straight grass row raises the
    // total by exactly the path length.
    let cells = grid_with(&[
        (CellCoord::new(0, 0), placed(TileKind::Castle)),
        (CellCoord::new(3, 0), placed(TileKind::House)),
    ]);
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 4);
}

#[test]
fn castle_beside_a_house_scores_one() {
    let cells = grid_with(&[
        (CellCoord::new(0, 0), placed(TileKind::Castle)),
        (CellCoord::new(1, 0), placed(TileKind::House)),
    ]);
    // Castle contributes 1; the house sees {castle, grass} nearby for 2.
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 3);
}

#[test]
fn rocks_force_the_path_around() {
    // The direct row is blocked at column 1, so the shortest route drops to
    // the next row and back up: five hops instead of three.
    let cells = grid_with(&[
        (CellCoord::new(0, 0), placed(TileKind::Castle)),
        (CellCoord::new(1, 0), CellContent::Rock),
        (CellCoord::new(3, 0), placed(TileKind::House)),
    ]);
    // Castle 5, house 1 (the rock sits outside its nearby cells).
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 6);
}

#[test]
fn walled_off_castle_contributes_nothing() {
    // A full rock column separates the castle from the only house.
    let mut contents = vec![
        (CellCoord::new(0, 0), placed(TileKind::Castle)),
        (CellCoord::new(5, 0), placed(TileKind::House)),
    ];
    for row in 0..GRID_SIZE {
        contents.push((CellCoord::new(2, row), CellContent::Rock));
    }
    let cells = grid_with(&contents);
    // Only the house scores: its nearby cells are all grass.
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 1);
}

#[test]
fn castle_takes_the_minimum_over_multiple_houses() {
    let cells = grid_with(&[
        (CellCoord::new(0, 0), placed(TileKind::Castle)),
        (CellCoord::new(3, 0), placed(TileKind::House)),
        (CellCoord::new(0, 2), placed(TileKind::House)),
    ]);
    // Nearest house is two hops down the first column; each house adds 1.
    assert_eq!(compute_score(GridView::new(&cells, GRID_SIZE)), 4);
}

#[test]
fn recomputation_is_idempotent() {
    let cells = grid_with(&[
        (CellCoord::new(0, 0), placed(TileKind::Castle)),
        (CellCoord::new(3, 0), placed(TileKind::House)),
        (CellCoord::new(4, 4), placed(TileKind::Mountain)),
        (CellCoord::new(4, 3), placed(TileKind::Tree)),
        (CellCoord::new(1, 5), placed(TileKind::Farm)),
    ]);
    let view = GridView::new(&cells, GRID_SIZE);
    let mut scoring = Scoring::new();
    let first = scoring.compute(view);
    assert_eq!(scoring.compute(view), first);
    assert_eq!(compute_score(view), first);
}
