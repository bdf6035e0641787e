#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a seeded Tilestead puzzle.
//!
//! The binary boots a session from a puzzle identifier, auto-plays every
//! turn with a greedy policy, renders each step, records a best-effort
//! quota attempt, and prints a share code for the finished game. All game
//! logic lives in the engine crates; this file only wires them together.

mod share;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use share::{ShareCode, SharePlacement};
use tilestead_core::{
    rng::SplitMix64, CellContent, CellCoord, Command, Event, GridView, OptionSlot, Phase,
    TileKind, TOTAL_TURNS,
};
use tilestead_rendering::{
    kind_name, preview_banner, render_grid, render_scene, score_banner, turn_banner,
    SceneDecorations,
};
use tilestead_system_bootstrap::GameConfig;
use tilestead_system_placement::valid_positions;
use tilestead_system_plan_generation::{
    generate_all_turn_options, ConstraintStrategy, PlanConfig,
};
use tilestead_system_quota::{
    fetch_status, record_attempt, AttemptKey, MemoryStore, MAX_DAILY_ATTEMPTS,
};
use tilestead_system_scoring::compute_score;
use tilestead_world::{apply, query, Grid, Session};

/// Plays one seeded Tilestead puzzle from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tilestead", about = "Daily tile-placement puzzle")]
struct Cli {
    /// Puzzle identifier used to seed the grid and turn plan.
    #[arg(long, default_value = "default")]
    seed: String,

    /// Constraint-generation strategy for the turn plan.
    #[arg(long, value_enum, default_value = "shared")]
    strategy: StrategyArg,

    /// Start from a bare all-grass grid instead of the seeded rocks.
    #[arg(long)]
    flat: bool,

    /// Print the full generated plan before playing.
    #[arg(long)]
    show_plan: bool,

    /// Player identifier used for quota bookkeeping.
    #[arg(long, default_value = "local")]
    user: String,

    /// Decode a share code and print its summary instead of playing.
    #[arg(long, value_name = "CODE")]
    decode: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// One row and one column per turn, split by a coin flip.
    Shared,
    /// Fully independent axis and lane draws per option.
    Independent,
}

impl From<StrategyArg> for ConstraintStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Shared => Self::SharedSplit,
            StrategyArg::Independent => Self::Independent,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(code) = &cli.decode {
        let decoded = ShareCode::decode(code).context("failed to decode share code")?;
        println!(
            "puzzle `{}` scored {} over {} placements",
            decoded.puzzle_id,
            decoded.score,
            decoded.placements.len()
        );
        return Ok(());
    }

    let plan_config = PlanConfig::new(cli.strategy.into());
    let mut session = build_session(&cli, plan_config);

    if cli.show_plan {
        for (turn, entry) in query::turn_plan(&session).entries().iter().enumerate() {
            println!("{}", turn_banner(turn as u32, TOTAL_TURNS, entry.current()));
        }
        println!();
    }

    let placements = play(&mut session)?;
    let score = query::score(&session);

    println!("{}", render_grid(query::grid_view(&session)));
    println!("{}", score_banner(score, query::phase(&session)));

    let mut store = MemoryStore::new();
    let key = AttemptKey::new(cli.seed.clone(), cli.user.clone());
    if let Err(error) = record_attempt(&mut store, &key, score) {
        // Quota bookkeeping is best-effort and must never block gameplay.
        eprintln!("attempt not recorded: {error}");
    }
    let status = fetch_status(&store, &key);
    println!(
        "attempts used: {} of {}, best score {}",
        status.attempts_used, MAX_DAILY_ATTEMPTS, status.max_score
    );

    let code = ShareCode {
        puzzle_id: cli.seed.clone(),
        score,
        placements,
    };
    println!("share: {}", code.encode());

    Ok(())
}

fn build_session(cli: &Cli, plan_config: PlanConfig) -> Session {
    if cli.flat {
        let mut rng = SplitMix64::for_puzzle(&cli.seed);
        let plan = generate_all_turn_options(&mut rng, plan_config);
        Session::new(Grid::all_grass(), plan)
    } else {
        GameConfig::for_puzzle(&cli.seed, plan_config).start_session()
    }
}

/// Auto-plays the session to completion, returning the placements made.
fn play(session: &mut Session) -> Result<Vec<SharePlacement>> {
    let mut placements = Vec::new();
    let mut events = Vec::new();

    while query::phase(session) == Phase::Playing {
        let turn = query::turn(session);
        let Some(options) = query::current_options(session).copied() else {
            bail!("playing session lost its turn options on turn {turn}");
        };

        let Some((slot, cell)) = choose_placement(session) else {
            bail!("no legal placement remains on turn {}", turn + 1);
        };
        let option = options[slot.as_index()];

        println!("{}", turn_banner(turn, TOTAL_TURNS, &options));
        println!("{}", preview_banner(query::next_options(session)));
        let decorations = SceneDecorations::new()
            .with_highlights(valid_positions(
                query::grid_view(session),
                option.constraint(),
            ))
            .with_ghost(cell, option.kind());
        println!("{}", render_scene(query::grid_view(session), &decorations));

        events.clear();
        apply(session, Command::SelectOption { slot }, &mut events);
        apply(session, Command::PlaceTile { cell }, &mut events);

        for event in &events {
            match event {
                Event::TilePlaced { cell, kind } => {
                    placements.push(SharePlacement {
                        cell: *cell,
                        kind: *kind,
                    });
                    println!(
                        "placed {} at column {}, row {}",
                        kind_name(*kind),
                        cell.column() + 1,
                        cell.row() + 1
                    );
                }
                Event::PlacementRejected { reason, .. } => {
                    bail!("engine rejected a validated placement: {reason:?}");
                }
                _ => {}
            }
        }
        println!("{}", score_banner(query::score(session), query::phase(session)));
        println!();
    }

    Ok(placements)
}

/// Greedy policy: try every legal cell for both options and keep the
/// placement with the highest resulting score, first found winning ties.
fn choose_placement(session: &Session) -> Option<(OptionSlot, CellCoord)> {
    let view = query::grid_view(session);
    let options = query::current_options(session)?;

    let mut best: Option<(u32, OptionSlot, CellCoord)> = None;
    for slot in [OptionSlot::First, OptionSlot::Second] {
        let option = &options[slot.as_index()];
        for cell in valid_positions(view, option.constraint()) {
            let score = score_after(view, cell, option.kind());
            let replace = match best {
                None => true,
                Some((best_score, _, _)) => score > best_score,
            };
            if replace {
                best = Some((score, slot, cell));
            }
        }
    }
    best.map(|(_, slot, cell)| (slot, cell))
}

fn score_after(view: GridView<'_>, cell: CellCoord, kind: TileKind) -> u32 {
    let mut cells = view.cells().to_vec();
    let index = cell.row() as usize * view.side() as usize + cell.column() as usize;
    cells[index] = CellContent::Placed(kind);
    compute_score(GridView::new(&cells, view.side()))
}
