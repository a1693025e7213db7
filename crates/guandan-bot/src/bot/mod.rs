mod lead;
mod respond;

pub use lead::LeadPlanner;
pub use respond::ResponsePlanner;

use guandan_core::model::card::Card;
use guandan_core::model::hand::Hand;
use guandan_core::model::rank::Rank;
use guandan_core::model::round::{RoundState, TablePlay};
use guandan_core::model::seat::Seat;
use guandan_core::model::shape::{Shape, shape_value};
use std::collections::BTreeMap;

/// A partner's play with a defining value at or above this is left standing.
/// Under the resolver this means Ace, trump or joker material.
pub const STRONG_VALUE: u8 = 14;

/// Straights are already awkward to beat; the bar for leaving a partner's
/// straight alone is lower.
pub const STRONG_STRAIGHT_VALUE: u8 = 10;

/// An opponent holding this many cards or fewer flips the bot from saving
/// resources to spending them.
pub const ENDGAME_HAND_SIZE: usize = 2;

/// Read-only view of everything the planners need for one decision.
#[derive(Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: Seat,
    pub round: &'a RoundState,
}

impl<'a> BotContext<'a> {
    pub fn new(seat: Seat, round: &'a RoundState) -> Self {
        Self { seat, round }
    }

    pub fn hand(&self) -> &'a Hand {
        self.round.hand(self.seat)
    }

    pub fn trump(&self) -> Rank {
        self.round.trump()
    }

    pub fn standing(&self) -> Option<&'a TablePlay> {
        self.round.table()
    }

    pub fn partner_owns_standing(&self) -> bool {
        self.standing()
            .map(|table| table.owner == self.seat.partner())
            .unwrap_or(false)
    }

    pub fn opponent_near_empty(&self) -> bool {
        let sizes = self.round.hand_sizes();
        Seat::LOOP
            .iter()
            .filter(|seat| seat.partnership() != self.seat.partnership())
            .any(|seat| sizes[seat.index()] <= ENDGAME_HAND_SIZE)
    }
}

/// Whether a standing play is strong enough that a partner should not waste
/// resources topping it.
pub fn is_strong_play(table: &TablePlay, trump: Rank) -> bool {
    match table.shape {
        Shape::Bomb | Shape::StraightFlush => true,
        Shape::Straight => {
            shape_value(&table.cards, Shape::Straight, trump) >= STRONG_STRAIGHT_VALUE
        }
        shape => shape_value(&table.cards, shape, trump) >= STRONG_VALUE,
    }
}

/// Non-wild cards bucketed by literal rank, cheapest effective value first,
/// with the wild cards held aside as fillers of last resort.
pub(crate) struct RankGroups {
    pub groups: Vec<(Rank, Vec<Card>)>,
    pub wilds: Vec<Card>,
}

pub(crate) fn rank_groups(hand: &Hand, trump: Rank) -> RankGroups {
    let mut map: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    let mut wilds = Vec::new();
    for &card in hand.iter() {
        if card.is_wild(trump) {
            wilds.push(card);
        } else {
            map.entry(card.rank).or_default().push(card);
        }
    }
    let mut groups: Vec<(Rank, Vec<Card>)> = map.into_iter().collect();
    groups.sort_by_key(|(rank, _)| rank.effective_value(trump));
    RankGroups { groups, wilds }
}
