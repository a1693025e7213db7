pub mod bot;
pub mod policy;

pub use bot::{
    BotContext, ENDGAME_HAND_SIZE, LeadPlanner, ResponsePlanner, STRONG_STRAIGHT_VALUE,
    STRONG_VALUE, is_strong_play,
};
pub use policy::{Action, HeuristicPolicy, Policy, PolicyContext};

use guandan_core::game::match_state::MatchState;
use guandan_core::model::card::Card;
use guandan_core::model::seat::Seat;

/// Runs the policy for one seat and applies the result. Only the seat whose
/// turn it is can act; a play the engine rejects is downgraded to a pass,
/// so the turn always resolves. Returns a representative card of an
/// accepted play, which callers typically use to drive display.
pub fn auto_play_turn(state: &mut MatchState, seat: Seat, policy: &mut dyn Policy) -> Option<Card> {
    if state.is_hand_over() || state.round().turn() != seat {
        return None;
    }
    let action = {
        let ctx = PolicyContext {
            seat,
            round: state.round(),
        };
        policy.choose_action(&ctx)
    };

    match action {
        Action::Play(cards) => {
            let representative = cards.first().copied();
            if state.play(seat, &cards).is_ok() {
                representative
            } else {
                state.pass(seat);
                None
            }
        }
        Action::Pass => {
            state.pass(seat);
            None
        }
    }
}
