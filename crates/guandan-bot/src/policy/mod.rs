mod heuristic;

pub use heuristic::HeuristicPolicy;

use guandan_core::model::card::Card;
use guandan_core::model::round::RoundState;
use guandan_core::model::seat::Seat;

/// What a policy wants done with the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Play(Vec<Card>),
    Pass,
}

/// Everything a policy may look at for one decision: its own seat and the
/// public round state. Policies never see the other hands.
#[derive(Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub round: &'a RoundState,
}

/// A pluggable decision-maker for one seat-turn at a time.
pub trait Policy {
    fn choose_action(&mut self, ctx: &PolicyContext<'_>) -> Action;
}
