#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic turn-plan generation.
//!
//! The entire game's tile options are drawn up front from a seeded stream:
//! one castle-slot draw, then per turn the two kind draws followed by the
//! constraint draws. The draw count and order are fixed so that identical
//! seeds reproduce identical plans; a slot that carries the castle consumes
//! no kind draw.

use tilestead_core::{
    rng::UnitRng, LaneIndex, PlacementConstraint, TileKind, TileOption, TurnOptions, TurnPlan,
    GRID_SIZE, NON_CASTLE_KINDS, OPTION_SLOT_COUNT, TOTAL_TURNS,
};

/// Strategy used to draw the placement constraints for a turn's two options.
///
/// The two variants consume different numbers of stream values and are not
/// interchangeable mid-game; a session must pick one at construction and
/// hold it fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConstraintStrategy {
    /// Draw one row index and one column index per turn, then split the pair
    /// across the two options by a single coin flip. Exactly one option ends
    /// up row-constrained and one column-constrained.
    #[default]
    SharedSplit,
    /// Draw a fresh axis coin flip and lane index for each option
    /// independently. Both options may land on the same axis.
    Independent,
}

/// Configuration fixed at the generator's construction boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanConfig {
    /// Constraint-generation strategy applied to every turn.
    pub constraint_strategy: ConstraintStrategy,
}

impl PlanConfig {
    /// Creates a configuration with the provided constraint strategy.
    #[must_use]
    pub const fn new(constraint_strategy: ConstraintStrategy) -> Self {
        Self {
            constraint_strategy,
        }
    }
}

/// Generates the full turn plan for a game from the provided stream.
///
/// Exactly one of the `2 * TOTAL_TURNS` current-option slots receives the
/// castle; every other slot draws uniformly from the four remaining kinds.
/// Each entry's `next` pair previews the following entry's `current`; the
/// final entry carries no preview.
#[must_use]
pub fn generate_all_turn_options<R: UnitRng>(rng: &mut R, config: PlanConfig) -> TurnPlan {
    let castle_slot = uniform_index(rng, OPTION_SLOT_COUNT);

    let mut pairs: Vec<[TileOption; 2]> = Vec::with_capacity(TOTAL_TURNS as usize);
    for turn in 0..TOTAL_TURNS {
        let first_kind = draw_kind(rng, turn * 2 == castle_slot);
        let second_kind = draw_kind(rng, turn * 2 + 1 == castle_slot);
        let (first_constraint, second_constraint) =
            draw_constraints(rng, config.constraint_strategy);
        pairs.push([
            TileOption::new(first_kind, first_constraint),
            TileOption::new(second_kind, second_constraint),
        ]);
    }

    let mut entries = Vec::with_capacity(pairs.len());
    for (turn, current) in pairs.iter().enumerate() {
        let next = pairs.get(turn + 1).copied();
        entries.push(TurnOptions::new(*current, next));
    }

    TurnPlan::from_entries(entries)
}

fn draw_kind<R: UnitRng>(rng: &mut R, is_castle_slot: bool) -> TileKind {
    if is_castle_slot {
        return TileKind::Castle;
    }
    let index = uniform_index(rng, NON_CASTLE_KINDS.len() as u32);
    NON_CASTLE_KINDS[index as usize]
}

fn draw_constraints<R: UnitRng>(
    rng: &mut R,
    strategy: ConstraintStrategy,
) -> (PlacementConstraint, PlacementConstraint) {
    match strategy {
        ConstraintStrategy::SharedSplit => {
            let row = PlacementConstraint::Row {
                index: draw_lane(rng),
            };
            let column = PlacementConstraint::Column {
                index: draw_lane(rng),
            };
            if rng.next_unit() < 0.5 {
                (row, column)
            } else {
                (column, row)
            }
        }
        ConstraintStrategy::Independent => {
            (draw_independent_constraint(rng), draw_independent_constraint(rng))
        }
    }
}

fn draw_independent_constraint<R: UnitRng>(rng: &mut R) -> PlacementConstraint {
    let row_axis = rng.next_unit() < 0.5;
    let index = draw_lane(rng);
    if row_axis {
        PlacementConstraint::Row { index }
    } else {
        PlacementConstraint::Column { index }
    }
}

fn draw_lane<R: UnitRng>(rng: &mut R) -> LaneIndex {
    LaneIndex::new(uniform_index(rng, GRID_SIZE) + 1)
}

fn uniform_index<R: UnitRng>(rng: &mut R, bound: u32) -> u32 {
    (rng.next_unit() * f64::from(bound)) as u32
}
