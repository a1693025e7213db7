use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::shape::{Shape, shape_value};

/// Decides whether a candidate play tops the standing play. Ordering rules,
/// checked in sequence:
///
/// 1. a partner's standing play is never answered with a bomb;
/// 2. across shapes, only bombs and straight flushes override: a straight
///    flush beats anything except a bomb with more cards, and a bomb beats
///    anything except a straight flush of its size or larger;
/// 3. within a shape, bombs compare card count before rank, everything else
///    compares its defining value (strictly greater wins).
pub fn can_beat(
    candidate: &[Card],
    candidate_shape: Shape,
    standing: &[Card],
    standing_shape: Shape,
    trump: Rank,
    candidate_owner: Seat,
    standing_owner: Seat,
) -> bool {
    if standing_owner == candidate_owner.partner() && candidate_shape == Shape::Bomb {
        return false;
    }

    if candidate_shape != standing_shape {
        return match (candidate_shape, standing_shape) {
            (Shape::StraightFlush, Shape::Bomb) => candidate.len() >= standing.len(),
            (Shape::StraightFlush, _) => true,
            (Shape::Bomb, Shape::StraightFlush) => candidate.len() > standing.len(),
            (Shape::Bomb, _) => true,
            _ => false,
        };
    }

    if candidate_shape == Shape::Bomb && candidate.len() != standing.len() {
        return candidate.len() > standing.len();
    }

    shape_value(candidate, candidate_shape, trump) > shape_value(standing, standing_shape, trump)
}
