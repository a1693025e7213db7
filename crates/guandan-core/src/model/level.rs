use crate::model::rank::Rank;
use crate::model::seat::{Partnership, Seat};
use core::fmt;
use serde::{Deserialize, Serialize};

/// A partnership's persistent progress value, 2 through 14. The value names
/// the rank the partnership is "playing": 2 is Two, 14 is Ace, and reaching
/// and clearing 14 is the game's terminal objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(2);
    pub const MAX: Level = Level(14);

    pub fn new(value: u8) -> Self {
        Level(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// The trump rank this level dictates for a hand led by its holders.
    pub const fn rank(self) -> Rank {
        match self.0 {
            2 => Rank::Two,
            value => match Rank::from_nominal(value) {
                Some(rank) => rank,
                None => Rank::Two,
            },
        }
    }

    pub fn advance(self, steps: u8) -> Level {
        Level::new(self.0.saturating_add(steps))
    }

    pub const fn is_top(self) -> bool {
        self.0 == Self::MAX.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank())
    }
}

/// The two partnerships' levels, carried from hand to hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBoard {
    levels: [Level; 2],
}

impl LevelBoard {
    pub const fn new() -> Self {
        Self {
            levels: [Level::MIN, Level::MIN],
        }
    }

    pub fn with_values(values: [u8; 2]) -> Self {
        Self {
            levels: [Level::new(values[0]), Level::new(values[1])],
        }
    }

    pub fn level(&self, partnership: Partnership) -> Level {
        self.levels[partnership.index()]
    }

    pub fn set(&mut self, partnership: Partnership, level: Level) {
        self.levels[partnership.index()] = level;
    }

    pub fn values(&self) -> [u8; 2] {
        [self.levels[0].value(), self.levels[1].value()]
    }
}

impl Default for LevelBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// End-of-hand settlement: who finished where, which partnership won, and
/// how its level moved. The engine reports; replay-after-a-failed-Ace
/// policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOutcome {
    pub finish_order: [Seat; 4],
    pub winning_partnership: Partnership,
    pub partner_place: u8,
    pub level_before: Level,
    pub level_after: Level,
    pub next_leader: Seat,
}

impl HandOutcome {
    pub fn first_out(&self) -> Seat {
        self.finish_order[0]
    }

    /// The raw increment earned: 3 when the partner came 2nd, 2 for 3rd,
    /// 1 for 4th. Clamping may keep `level_after` below `before + gain`.
    pub fn level_gain(&self) -> u8 {
        match self.partner_place {
            2 => 3,
            3 => 2,
            _ => 1,
        }
    }

    /// Won at Ace but the partner came last: the top rank was not cleared
    /// and the level stays pinned at 14.
    pub fn failed_top_rank(&self) -> bool {
        self.level_before.is_top() && self.partner_place == 4
    }

    /// Won at Ace with the partner 2nd or 3rd: the game is over.
    pub fn cleared_top_rank(&self) -> bool {
        self.level_before.is_top() && self.partner_place < 4
    }
}

/// Ranks the seats by remaining cards (fewer is better, ties keep seat
/// order) and derives the winning partnership's level movement.
pub fn settle(hand_sizes: [usize; 4], levels: &LevelBoard) -> HandOutcome {
    let mut order = Seat::LOOP;
    order.sort_by_key(|seat| hand_sizes[seat.index()]);

    let first = order[0];
    let winning_partnership = first.partnership();
    let partner = first.partner();
    let partner_place = order
        .iter()
        .position(|&seat| seat == partner)
        .map(|index| index as u8 + 1)
        .expect("partner is seated");

    let level_before = levels.level(winning_partnership);
    let gain = match partner_place {
        2 => 3,
        3 => 2,
        _ => 1,
    };
    let level_after = level_before.advance(gain);

    HandOutcome {
        finish_order: order,
        winning_partnership,
        partner_place,
        level_before,
        level_after,
        next_leader: first,
    }
}

#[cfg(test)]
mod tests {
    use super::{HandOutcome, Level, LevelBoard, settle};
    use crate::model::rank::Rank;
    use crate::model::seat::{Partnership, Seat};

    #[test]
    fn level_maps_to_trump_rank() {
        assert_eq!(Level::new(2).rank(), Rank::Two);
        assert_eq!(Level::new(3).rank(), Rank::Three);
        assert_eq!(Level::new(14).rank(), Rank::Ace);
    }

    #[test]
    fn level_clamps_to_range() {
        assert_eq!(Level::new(0).value(), 2);
        assert_eq!(Level::new(20).value(), 14);
        assert_eq!(Level::new(13).advance(3).value(), 14);
    }

    #[test]
    fn partner_second_earns_three_levels() {
        // North out first, South (partner) second.
        let outcome = settle([0, 5, 1, 9], &LevelBoard::new());
        assert_eq!(outcome.winning_partnership, Partnership::NorthSouth);
        assert_eq!(outcome.finish_order, [Seat::North, Seat::South, Seat::East, Seat::West]);
        assert_eq!(outcome.partner_place, 2);
        assert_eq!(outcome.level_gain(), 3);
        assert_eq!(outcome.level_after.value(), 5);
        assert_eq!(outcome.next_leader, Seat::North);
    }

    #[test]
    fn partner_third_earns_two_levels() {
        let outcome = settle([0, 1, 5, 9], &LevelBoard::new());
        assert_eq!(outcome.partner_place, 3);
        assert_eq!(outcome.level_gain(), 2);
        assert_eq!(outcome.level_after.value(), 4);
    }

    #[test]
    fn swept_partner_earns_one_level() {
        let outcome = settle([0, 1, 5, 3], &LevelBoard::new());
        assert_eq!(outcome.partner_place, 4);
        assert_eq!(outcome.level_gain(), 1);
        assert_eq!(outcome.level_after.value(), 3);
    }

    #[test]
    fn ties_keep_seat_order() {
        let outcome = settle([2, 0, 2, 2], &LevelBoard::new());
        assert_eq!(outcome.first_out(), Seat::East);
        assert_eq!(outcome.finish_order, [Seat::East, Seat::North, Seat::South, Seat::West]);
    }

    #[test]
    fn failed_top_rank_is_flagged_and_level_stays() {
        let levels = LevelBoard::with_values([14, 2]);
        let outcome = settle([0, 1, 5, 3], &levels);
        assert_eq!(outcome.winning_partnership, Partnership::NorthSouth);
        assert!(outcome.failed_top_rank());
        assert!(!outcome.cleared_top_rank());
        assert_eq!(outcome.level_before.value(), 14);
        assert_eq!(outcome.level_after.value(), 14);
    }

    #[test]
    fn cleared_top_rank_is_flagged() {
        let levels = LevelBoard::with_values([14, 2]);
        let outcome = settle([0, 5, 1, 9], &levels);
        assert!(outcome.cleared_top_rank());
        assert!(!outcome.failed_top_rank());
    }

    #[test]
    fn outcome_serializes() {
        let outcome: HandOutcome = settle([0, 5, 1, 9], &LevelBoard::new());
        let json = serde_json::to_string(&outcome).unwrap();
        let back: HandOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
