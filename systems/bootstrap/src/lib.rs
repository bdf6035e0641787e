#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Tilestead game.
//!
//! Construction is the one place the seeded stream is consumed, in the
//! canonical order: the rock draws first, then the full turn plan. Anything
//! that replays a puzzle must go through here so both halves stay aligned.

use std::collections::HashMap;

use tilestead_core::{rng::SplitMix64, TurnPlan};
use tilestead_system_plan_generation::{generate_all_turn_options, PlanConfig};
use tilestead_world::{Grid, Session};

/// Immutable per-puzzle configuration: the seeded starting grid and plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    initial_grid: Grid,
    plan: TurnPlan,
}

impl GameConfig {
    /// Derives the configuration for a puzzle identifier.
    #[must_use]
    pub fn for_puzzle(puzzle_id: &str, plan_config: PlanConfig) -> Self {
        let mut rng = SplitMix64::for_puzzle(puzzle_id);
        let initial_grid = Grid::with_rocks(&mut rng);
        let plan = generate_all_turn_options(&mut rng, plan_config);
        Self { initial_grid, plan }
    }

    /// The grid a session starts from, rocks included.
    #[must_use]
    pub fn initial_grid(&self) -> &Grid {
        &self.initial_grid
    }

    /// The read-only turn plan for the whole game.
    #[must_use]
    pub fn plan(&self) -> &TurnPlan {
        &self.plan
    }

    /// Starts a fresh session over a copy of the configuration.
    ///
    /// Every call yields an independent game; retries replay the same
    /// puzzle without re-deriving anything.
    #[must_use]
    pub fn start_session(&self) -> Session {
        Session::new(self.initial_grid.clone(), self.plan.clone())
    }
}

/// Caller-owned memoization of game configurations per puzzle identifier.
///
/// The cache is created when the hosting session starts and dropped with
/// it; there is no process-wide plan state anywhere in the engine.
#[derive(Debug, Default)]
pub struct ConfigCache {
    plan_config: PlanConfig,
    configs: HashMap<String, GameConfig>,
}

impl ConfigCache {
    /// Creates an empty cache generating plans under the provided config.
    #[must_use]
    pub fn new(plan_config: PlanConfig) -> Self {
        Self {
            plan_config,
            configs: HashMap::new(),
        }
    }

    /// Returns the configuration for the puzzle, deriving it on first use.
    pub fn config(&mut self, puzzle_id: &str) -> &GameConfig {
        if !self.configs.contains_key(puzzle_id) {
            let config = GameConfig::for_puzzle(puzzle_id, self.plan_config);
            let _ = self.configs.insert(puzzle_id.to_owned(), config);
        }
        self.configs
            .get(puzzle_id)
            .expect("configuration inserted above")
    }

    /// Starts a fresh session for the puzzle, deriving the configuration on
    /// first use and replaying the cached one thereafter.
    pub fn start_session(&mut self, puzzle_id: &str) -> Session {
        self.config(puzzle_id).start_session()
    }
}
