use core::fmt;
use serde::{Deserialize, Serialize};

/// Card ranks in nominal low-to-high order. `Two` sits above `Ace` in the
/// raw discriminant space because only its effective value (which depends on
/// the hand's trump rank) decides where it actually compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    SmallJoker = 16,
    BigJoker = 17,
}

impl Rank {
    /// The thirteen ranks dealt in every suit (jokers excluded).
    pub const STANDARD: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    pub const fn from_nominal(value: u8) -> Option<Self> {
        match value {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::Two),
            16 => Some(Rank::SmallJoker),
            17 => Some(Rank::BigJoker),
            _ => None,
        }
    }

    pub const fn nominal_value(self) -> u8 {
        self as u8
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// The single source of truth for ordering comparisons. The trump rank
    /// is promoted above Ace; a Two is only worth its face when it happens
    /// to be the trump.
    pub const fn effective_value(self, trump: Rank) -> u8 {
        match self {
            Rank::SmallJoker => 16,
            Rank::BigJoker => 17,
            Rank::Two => {
                if matches!(trump, Rank::Two) {
                    15
                } else {
                    2
                }
            }
            _ => {
                if self as u8 == trump as u8 {
                    15
                } else {
                    self as u8
                }
            }
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "sj",
            Rank::BigJoker => "BJ",
        };
        f.write_str(text)
    }
}
