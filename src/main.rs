//! Renju match replayer
//!
//! Plays the cell indices given on the command line (`row * 15 + col`)
//! through a coordinator, alternating between two local players. Rejected
//! moves are reported and skipped, so the same player moves again.

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use renju::{
    CoordinatorConfig, CoordinatorError, InMemoryStore, MatchId, MatchRecord, MoveCoordinator,
    PlayerId, Pos,
};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cells = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<usize>()
                .with_context(|| format!("not a cell index: {arg}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if cells.is_empty() {
        bail!("usage: renju <cell> [<cell> ...]");
    }

    let config = CoordinatorConfig::from_env();
    tracing::info!(?config, "starting replay");
    let coordinator = MoveCoordinator::with_config(InMemoryStore::new(), config);

    let room = MatchId::new("local");
    coordinator.create_match(room.clone(), PlayerId::new("black"))?;
    let mut state = coordinator.join_match(&room, PlayerId::new("white"))?;

    for cell in cells {
        if state.is_finished() {
            tracing::warn!(cell, "match already finished, ignoring remaining moves");
            break;
        }
        let actor = state
            .seats()
            .player(state.turn())
            .cloned()
            .context("seat of the side to move is empty")?;
        match coordinator.apply_move(&room, &actor, cell) {
            Ok(next) => state = next,
            Err(CoordinatorError::Rejected(err)) => {
                let at = Pos::try_from_index(cell).map(Pos::to_coord).ok();
                println!("{actor} at {cell} {at:?} rejected: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("{}", state.board().to_grid());
    match MatchRecord::from_state(room, &state) {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("match unfinished after {} moves", state.moves().len()),
    }
    Ok(())
}
