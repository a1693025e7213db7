use crate::model::card::Card;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of playable hand-shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Single,
    Pair,
    Triple,
    Bomb,
    ThreeWithPair,
    Straight,
    StraightFlush,
    Plank,
    SteelPlate,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shape::Single => "single",
            Shape::Pair => "pair",
            Shape::Triple => "triple",
            Shape::Bomb => "bomb",
            Shape::ThreeWithPair => "three-with-pair",
            Shape::Straight => "straight",
            Shape::StraightFlush => "straight-flush",
            Shape::Plank => "plank",
            Shape::SteelPlate => "steel-plate",
        };
        f.write_str(label)
    }
}

/// Decides what a selection of cards is, if anything. Dispatch is a decision
/// table on card count; within a count, shapes are tried in a fixed priority
/// order (three-with-pair, straight-flush, straight, bomb for five cards;
/// plank, steel-plate, bomb for six), so ambiguous selections always resolve
/// the same way.
///
/// Wild cards (the Heart at the trump rank) participate literally first —
/// a wild whose own rank fits the shape is just another card — and only
/// then as substitutes for missing ranks. A wild never stands in for a
/// joker, and a selection made of nothing but wilds is at most a Single.
pub fn classify(cards: &[Card], trump: Rank) -> Option<Shape> {
    match cards.len() {
        1 => Some(Shape::Single),
        2 => wild_group_rank(cards, trump).map(|_| Shape::Pair),
        3 => wild_group_rank(cards, trump).map(|_| Shape::Triple),
        4 => wild_group_rank(cards, trump).map(|_| Shape::Bomb),
        5 => {
            if three_with_pair_anchor(cards, trump).is_some() {
                return Some(Shape::ThreeWithPair);
            }
            let literal = literal_run(cards);
            let assisted = wild_run(cards, trump);
            if literal == Some(true) || assisted == Some(true) {
                return Some(Shape::StraightFlush);
            }
            if literal.is_some() || assisted.is_some() {
                return Some(Shape::Straight);
            }
            wild_group_rank(cards, trump).map(|_| Shape::Bomb)
        }
        6 => {
            if is_plank(cards) {
                return Some(Shape::Plank);
            }
            if is_steel_plate(cards) {
                return Some(Shape::SteelPlate);
            }
            wild_group_rank(cards, trump).map(|_| Shape::Bomb)
        }
        7..=8 => wild_group_rank(cards, trump).map(|_| Shape::Bomb),
        _ => None,
    }
}

/// The value a shape brings to a comparison: the effective value of its
/// defining rank. For run- and ladder-shapes this is the maximum effective
/// value among non-wild cards; if every defining card is wild the trump's
/// own effective value stands in. Jokers always count as themselves.
pub fn shape_value(cards: &[Card], shape: Shape, trump: Rank) -> u8 {
    match shape {
        Shape::Single | Shape::Pair | Shape::Triple | Shape::Bomb => cards
            .iter()
            .find(|c| !c.is_wild(trump))
            .map(|c| c.rank.effective_value(trump))
            .unwrap_or_else(|| trump.effective_value(trump)),
        Shape::ThreeWithPair => three_with_pair_anchor(cards, trump)
            .map(|rank| rank.effective_value(trump))
            .unwrap_or_else(|| max_effective_non_wild(cards, trump)),
        Shape::Straight | Shape::StraightFlush | Shape::Plank | Shape::SteelPlate => {
            max_effective_non_wild(cards, trump)
        }
    }
}

fn max_effective_non_wild(cards: &[Card], trump: Rank) -> u8 {
    cards
        .iter()
        .filter(|c| !c.is_wild(trump))
        .map(|c| c.rank.effective_value(trump))
        .max()
        .unwrap_or_else(|| trump.effective_value(trump))
}

fn split_wilds(cards: &[Card], trump: Rank) -> (Vec<Card>, usize) {
    let mut plain = Vec::with_capacity(cards.len());
    let mut wilds = 0usize;
    for &card in cards {
        if card.is_wild(trump) {
            wilds += 1;
        } else {
            plain.push(card);
        }
    }
    (plain, wilds)
}

/// Same-rank grouping with wild assistance: every non-wild card must share
/// one rank, wilds top the group up, and a group anchored on a joker rank
/// rejects wild help. All-wild groups have no anchor and are rejected.
fn wild_group_rank(cards: &[Card], trump: Rank) -> Option<Rank> {
    let (plain, wilds) = split_wilds(cards, trump);
    let anchor = plain.first()?.rank;
    if plain.iter().any(|c| c.rank != anchor) {
        return None;
    }
    if wilds > 0 && anchor.is_joker() {
        return None;
    }
    Some(anchor)
}

/// Finds the triple's rank of a 3+2 split, or None. When wild assignment
/// allows several readings the highest effective anchor wins, which is also
/// the reading the comparator uses.
fn three_with_pair_anchor(cards: &[Card], trump: Rank) -> Option<Rank> {
    if cards.len() != 5 {
        return None;
    }
    let (plain, wilds) = split_wilds(cards, trump);
    let mut groups: BTreeMap<Rank, usize> = BTreeMap::new();
    for card in &plain {
        *groups.entry(card.rank).or_insert(0) += 1;
    }
    if groups.len() != 2 {
        return None;
    }
    let mut best: Option<Rank> = None;
    for (&triple_rank, &triple_count) in &groups {
        for (&pair_rank, &pair_count) in &groups {
            if triple_rank == pair_rank || triple_count > 3 || pair_count > 2 {
                continue;
            }
            let triple_fill = 3 - triple_count;
            let pair_fill = 2 - pair_count;
            if triple_fill + pair_fill != wilds {
                continue;
            }
            if (triple_fill > 0 && triple_rank.is_joker())
                || (pair_fill > 0 && pair_rank.is_joker())
            {
                continue;
            }
            let better = match best {
                Some(current) => {
                    triple_rank.effective_value(trump) > current.effective_value(trump)
                }
                None => true,
            };
            if better {
                best = Some(triple_rank);
            }
        }
    }
    best
}

/// Five consecutive ranks taken at face value (a wild counts as its literal
/// trump rank here). Rank Two and the jokers never join a run. Returns
/// whether the run is also single-suited.
fn literal_run(cards: &[Card]) -> Option<bool> {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.nominal_value()).collect();
    if values.iter().any(|&v| v >= Rank::Two.nominal_value()) {
        return None;
    }
    values.sort_unstable();
    if values.windows(2).any(|w| w[1] != w[0] + 1) {
        return None;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    Some(flush)
}

/// Wild-assisted run: the plain ranks must be distinct, span exactly the
/// selection size, and the wilds fill the gaps strictly inside that span.
/// Returns whether the plain cards are single-suited (the wilds adopt it).
fn wild_run(cards: &[Card], trump: Rank) -> Option<bool> {
    let (plain, wilds) = split_wilds(cards, trump);
    if wilds == 0 || plain.is_empty() {
        return None;
    }
    if plain
        .iter()
        .any(|c| c.rank.nominal_value() >= Rank::Two.nominal_value())
    {
        return None;
    }
    let mut values: Vec<u8> = plain.iter().map(|c| c.rank.nominal_value()).collect();
    values.sort_unstable();
    values.dedup();
    if values.len() != plain.len() {
        return None;
    }
    let span = usize::from(values[values.len() - 1] - values[0]) + 1;
    if span != cards.len() {
        return None;
    }
    let flush = plain.iter().all(|c| c.suit == plain[0].suit);
    Some(flush)
}

/// Three rank-consecutive pairs. No wild substitution: every card counts at
/// its literal rank, so a Heart trump card may sit in a plank but nothing
/// fills gaps for it.
fn is_plank(cards: &[Card]) -> bool {
    consecutive_groups(cards, 3, 2)
}

/// Two rank-consecutive triples, literal ranks only.
fn is_steel_plate(cards: &[Card]) -> bool {
    consecutive_groups(cards, 2, 3)
}

fn consecutive_groups(cards: &[Card], group_count: usize, group_size: usize) -> bool {
    if cards.len() != group_count * group_size {
        return false;
    }
    if cards
        .iter()
        .any(|c| c.rank.nominal_value() >= Rank::Two.nominal_value())
    {
        return false;
    }
    let mut groups: BTreeMap<u8, usize> = BTreeMap::new();
    for card in cards {
        *groups.entry(card.rank.nominal_value()).or_insert(0) += 1;
    }
    if groups.len() != group_count || groups.values().any(|&n| n != group_size) {
        return false;
    }
    let values: Vec<u8> = groups.keys().copied().collect();
    values.windows(2).all(|w| w[1] == w[0] + 1)
}
