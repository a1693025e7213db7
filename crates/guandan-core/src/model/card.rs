use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_joker(self) -> bool {
        self.rank.is_joker()
    }

    /// The wild card is the Heart at the hand's trump rank. Each deck
    /// contributes one copy, so up to two are in play at once.
    pub const fn is_wild(self, trump: Rank) -> bool {
        self.suit.is_heart() && self.rank as u8 == trump as u8
    }

    pub const fn effective_value(self, trump: Rank) -> u8 {
        self.rank.effective_value(trump)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{}{}", self.suit, self.rank)
        }
    }
}
