use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spade = 0,
    Club = 1,
    Diamond = 2,
    Heart = 3,
    Joker = 4,
}

impl Suit {
    /// The four deal suits; `Joker` is reserved for the two joker ranks.
    pub const DEALT: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Diamond, Suit::Heart];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Spade),
            1 => Some(Suit::Club),
            2 => Some(Suit::Diamond),
            3 => Some(Suit::Heart),
            4 => Some(Suit::Joker),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_heart(self) -> bool {
        matches!(self, Suit::Heart)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Spade => "S",
            Suit::Club => "C",
            Suit::Diamond => "D",
            Suit::Heart => "H",
            Suit::Joker => "J",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Spade.to_string(), "S");
        assert_eq!(Suit::Heart.to_string(), "H");
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Suit::from_index(3), Some(Suit::Heart));
        assert_eq!(Suit::from_index(5), None);
    }

    #[test]
    fn spades_sort_before_hearts() {
        assert!(Suit::Spade < Suit::Heart);
    }
}
