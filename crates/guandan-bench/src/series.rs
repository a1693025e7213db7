use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use guandan_bot::{HeuristicPolicy, auto_play_turn};
use guandan_core::game::match_state::MatchState;
use guandan_core::model::deck::DECK_SIZE;
use guandan_core::model::player::Player;
use guandan_core::model::seat::{Partnership, Seat};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SeriesConfig};

/// Plays full AI-vs-AI matches and streams one JSONL row per game.
pub struct SeriesRunner {
    config: SeriesConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run and written as the JSON artifact.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub seed: u64,
    pub games_played: usize,
    pub wins: [usize; 2],
    pub capped_games: usize,
    pub total_hands: usize,
    #[serde(skip)]
    pub jsonl_path: PathBuf,
    #[serde(skip)]
    pub summary_path: PathBuf,
}

/// One finished game's row in the JSONL stream.
#[derive(Debug, Serialize)]
struct GameRow {
    game: usize,
    seed: u64,
    hands: usize,
    winner: Option<Partnership>,
    final_levels: [u8; 2],
    capped: bool,
}

#[derive(Debug, Clone, Copy)]
struct GameResult {
    hands: usize,
    winner: Option<Partnership>,
    final_levels: [u8; 2],
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to write run artifacts")]
    Io(#[from] std::io::Error),
    #[error("failed to encode run artifacts")]
    Encode(#[from] serde_json::Error),
}

impl SeriesRunner {
    pub fn new(config: SeriesConfig) -> Self {
        let outputs = config.resolved_outputs();
        Self { config, outputs }
    }

    /// Execute the series, streaming JSONL rows to disk and writing the
    /// summary artifact.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_json.parent())?;

        let master_seed = self
            .config
            .games
            .seed
            .unwrap_or_else(|| rand::random::<u64>());
        let mut seed_stream = StdRng::seed_from_u64(master_seed);

        let mut rows = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut wins = [0usize; 2];
        let mut capped_games = 0;
        let mut total_hands = 0;

        for game in 0..self.config.games.count {
            let game_seed = seed_stream.next_u64();
            let result = play_one_game(game_seed, self.config.games.max_hands);

            if let Some(winner) = result.winner {
                wins[winner.index()] += 1;
            } else {
                capped_games += 1;
            }
            total_hands += result.hands;

            let row = GameRow {
                game,
                seed: game_seed,
                hands: result.hands,
                winner: result.winner,
                final_levels: result.final_levels,
                capped: result.winner.is_none(),
            };
            serde_json::to_writer(&mut rows, &row)?;
            rows.write_all(b"\n")?;

            event!(
                target: "guandan_bench::series",
                Level::INFO,
                game,
                seed = game_seed,
                hands = result.hands,
                winner = ?result.winner,
            );
        }
        rows.flush()?;

        let summary = RunSummary {
            run_id: self.config.run_id.clone(),
            seed: master_seed,
            games_played: self.config.games.count,
            wins,
            capped_games,
            total_hands,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_json.clone(),
        };
        fs::write(
            &self.outputs.summary_json,
            serde_json::to_string_pretty(&summary)?,
        )?;
        Ok(summary)
    }
}

/// One match from fresh levels to a cleared Ace (or the hand cap). Panics
/// on a conservation failure rather than reporting rigged results.
fn play_one_game(seed: u64, max_hands: usize) -> GameResult {
    let mut state = MatchState::with_seed(Seat::North, seed);
    state.set_players([
        Player::computer("North bot"),
        Player::computer("East bot"),
        Player::computer("South bot"),
        Player::computer("West bot"),
    ]);
    let mut policy = HeuristicPolicy::new();

    let mut hands = 0;
    loop {
        while !state.is_hand_over() {
            let seat = state.round().turn();
            auto_play_turn(&mut state, seat, &mut policy);
            assert_cards_conserved(&state);
        }
        hands += 1;

        state.winner();
        let outcome = state.outcome().expect("finished hand settles");
        if outcome.cleared_top_rank() {
            return GameResult {
                hands,
                winner: Some(outcome.winning_partnership),
                final_levels: state.levels().values(),
            };
        }
        if hands >= max_hands {
            return GameResult {
                hands,
                winner: None,
                final_levels: state.levels().values(),
            };
        }
        state.start_next_hand();
    }
}

fn assert_cards_conserved(state: &MatchState) {
    let in_hands: usize = state.round().hand_sizes().iter().sum();
    let played: usize = state
        .round()
        .history()
        .iter()
        .map(|play| play.cards.len())
        .sum();
    assert_eq!(in_hands + played, DECK_SIZE, "card conservation violated");
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), std::io::Error> {
    if let Some(parent) = parent {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
