use core::fmt;
use serde::{Deserialize, Serialize};

/// A position at the table. Turn order is always seat `i` to seat
/// `(i + 1) % 4`; North-South and East-West form the two partnerships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::North => Seat::South,
            Seat::East => Seat::West,
            Seat::South => Seat::North,
            Seat::West => Seat::East,
        }
    }

    pub const fn partnership(self) -> Partnership {
        match self {
            Seat::North | Seat::South => Partnership::NorthSouth,
            Seat::East | Seat::West => Partnership::EastWest,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Partnership {
    NorthSouth = 0,
    EastWest = 1,
}

impl Partnership {
    pub const BOTH: [Partnership; 2] = [Partnership::NorthSouth, Partnership::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Partnership::NorthSouth => [Seat::North, Seat::South],
            Partnership::EastWest => [Seat::East, Seat::West],
        }
    }

    pub const fn opponent(self) -> Partnership {
        match self {
            Partnership::NorthSouth => Partnership::EastWest,
            Partnership::EastWest => Partnership::NorthSouth,
        }
    }
}

impl fmt::Display for Partnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Partnership::NorthSouth => "North-South",
            Partnership::EastWest => "East-West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{Partnership, Seat};

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::West.next(), Seat::North);
    }

    #[test]
    fn partner_is_the_opposite_seat() {
        assert_eq!(Seat::North.partner(), Seat::South);
        assert_eq!(Seat::East.partner(), Seat::West);
    }

    #[test]
    fn partnerships_pair_alternating_seats() {
        assert_eq!(Seat::North.partnership(), Partnership::NorthSouth);
        assert_eq!(Seat::South.partnership(), Partnership::NorthSouth);
        assert_eq!(Seat::East.partnership(), Partnership::EastWest);
        assert_eq!(Partnership::NorthSouth.opponent(), Partnership::EastWest);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
