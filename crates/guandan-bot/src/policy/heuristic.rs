use super::{Action, Policy, PolicyContext};
use crate::bot::{BotContext, LeadPlanner, ResponsePlanner};
use guandan_core::model::card::Card;
use tracing::{Level, event};

/// The stock computer player: responds with the cheapest play that wins,
/// leads with combinations before singles, and never blocks its partner's
/// strong plays.
#[derive(Debug, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_action(&mut self, ctx: &PolicyContext<'_>) -> Action {
        let bot_ctx = BotContext::new(ctx.seat, ctx.round);
        let responding = ctx.round.table().is_some();
        let chosen = if responding {
            ResponsePlanner::choose(&bot_ctx)
        } else {
            LeadPlanner::choose(&bot_ctx)
        };

        match chosen {
            Some(cards) => {
                log_decision(ctx, responding, Some(&cards));
                Action::Play(cards)
            }
            None => {
                log_decision(ctx, responding, None);
                Action::Pass
            }
        }
    }
}

fn log_decision(ctx: &PolicyContext<'_>, responding: bool, cards: Option<&[Card]>) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let preview = cards
        .map(|cards| {
            cards
                .iter()
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_else(|| "pass".to_string());

    event!(
        target: "guandan_bot::decision",
        Level::DEBUG,
        seat = %ctx.seat,
        hand_size = ctx.round.hand(ctx.seat).len(),
        responding,
        standing = ?ctx.round.table().map(|t| t.shape),
        chosen = %preview,
    );
}
