use super::{BotContext, is_strong_play, rank_groups};
use guandan_core::model::beat::can_beat;
use guandan_core::model::card::Card;
use guandan_core::model::rank::Rank;
use guandan_core::model::round::TablePlay;
use guandan_core::model::shape::{Shape, classify, shape_value};

/// Finds an answer to a standing play: the cheapest same-shape play that
/// wins, then the cheapest bomb, otherwise nothing (a pass). A partner's
/// strong play is always left standing.
pub struct ResponsePlanner;

impl ResponsePlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Option<Vec<Card>> {
        let table = ctx.standing()?;
        let trump = ctx.trump();

        if ctx.partner_owns_standing() && is_strong_play(table, trump) {
            return None;
        }

        let target = shape_value(&table.cards, table.shape, trump);
        let spend_big = ctx.opponent_near_empty();

        let same_shape = match table.shape {
            Shape::Single => find_single_above(ctx, target, spend_big),
            Shape::Pair => find_group_above(ctx, 2, target, spend_big, true),
            Shape::Triple => find_group_above(ctx, 3, target, false, true),
            Shape::ThreeWithPair => find_three_with_pair_above(ctx, target),
            Shape::Straight => find_straight_above(ctx, target),
            Shape::Plank => find_ladder_above(ctx, 3, 2, target),
            Shape::SteelPlate => find_ladder_above(ctx, 2, 3, target),
            // Bombs and straight flushes go straight to the bomb search.
            Shape::Bomb | Shape::StraightFlush => None,
        };

        same_shape
            .filter(|cards| beats_standing(ctx, cards, table))
            .or_else(|| find_bomb_beating(ctx, table))
    }
}

/// Final legality check on anything a finder proposes; a candidate that
/// fails here is dropped rather than played.
fn beats_standing(ctx: &BotContext<'_>, cards: &[Card], table: &TablePlay) -> bool {
    let trump = ctx.trump();
    match classify(cards, trump) {
        Some(shape) => can_beat(
            cards,
            shape,
            &table.cards,
            table.shape,
            trump,
            ctx.seat,
            table.owner,
        ),
        None => false,
    }
}

/// Cheapest winning single, or the largest one under endgame pressure.
/// Loose cards are preferred over breaking up pairs and better groups, and
/// plain cards over wilds.
pub(crate) fn find_single_above(
    ctx: &BotContext<'_>,
    target: u8,
    largest: bool,
) -> Option<Vec<Card>> {
    let trump = ctx.trump();
    let mut winners: Vec<Card> = ctx
        .hand()
        .iter()
        .copied()
        .filter(|card| card.effective_value(trump) > target)
        .collect();
    if winners.is_empty() {
        return None;
    }

    if largest {
        winners.sort_by_key(|card| (card.effective_value(trump), !card.is_wild(trump)));
        return winners.pop().map(|card| vec![card]);
    }

    let group_size = |card: &Card| {
        ctx.hand()
            .iter()
            .filter(|held| held.rank == card.rank)
            .count()
    };
    winners.sort_by_key(|card| {
        (
            group_size(card) > 1,
            card.effective_value(trump),
            card.is_wild(trump),
        )
    });
    winners.first().map(|&card| vec![card])
}

/// Cheapest winning same-rank group of the given size, wild-filled only
/// when plain copies run short. Groups sitting inside a bomb are spared
/// while the endgame is far off.
pub(crate) fn find_group_above(
    ctx: &BotContext<'_>,
    size: usize,
    target: u8,
    largest: bool,
    allow_wilds: bool,
) -> Option<Vec<Card>> {
    let trump = ctx.trump();
    let rg = rank_groups(ctx.hand(), trump);
    let mut candidates: Vec<(bool, bool, u8, Vec<Card>)> = Vec::new();

    for (rank, cards) in &rg.groups {
        let effective = rank.effective_value(trump);
        if effective <= target {
            continue;
        }
        if cards.len() >= size {
            let breaks_bomb = cards.len() >= 4 && cards.len() > size;
            candidates.push((false, breaks_bomb, effective, cards[..size].to_vec()));
        } else if allow_wilds
            && !rank.is_joker()
            && !cards.is_empty()
            && cards.len() + rg.wilds.len() >= size
        {
            let mut chosen = cards.clone();
            chosen.extend(rg.wilds.iter().copied().take(size - cards.len()));
            candidates.push((true, false, effective, chosen));
        }
    }

    if largest {
        candidates.sort_by_key(|(wild, _, effective, _)| (*effective, !*wild));
        return candidates.pop().map(|(_, _, _, cards)| cards);
    }
    candidates.sort_by_key(|(wild, breaks_bomb, effective, _)| (*wild, *breaks_bomb, *effective));
    candidates.into_iter().next().map(|(_, _, _, cards)| cards)
}

/// Cheapest winning triple plus the cheapest companion pair of another
/// rank. The triple's rank does the beating; the pair just has to exist.
pub(crate) fn find_three_with_pair_above(ctx: &BotContext<'_>, target: u8) -> Option<Vec<Card>> {
    let trump = ctx.trump();
    let rg = rank_groups(ctx.hand(), trump);

    let mut triples: Vec<(bool, u8, Rank, Vec<Card>)> = Vec::new();
    for (rank, cards) in &rg.groups {
        let effective = rank.effective_value(trump);
        if effective <= target {
            continue;
        }
        if cards.len() >= 3 {
            triples.push((false, effective, *rank, cards[..3].to_vec()));
        } else if !rank.is_joker() && !cards.is_empty() && cards.len() + rg.wilds.len() >= 3 {
            let mut chosen = cards.clone();
            chosen.extend(rg.wilds.iter().copied().take(3 - cards.len()));
            triples.push((true, effective, *rank, chosen));
        }
    }
    triples.sort_by_key(|(wild, effective, _, _)| (*wild, *effective));

    for (_, _, triple_rank, triple_cards) in triples {
        let wilds_used = triple_cards
            .iter()
            .filter(|card| card.is_wild(trump))
            .count();
        let wilds_left = rg.wilds.len() - wilds_used;
        let others = || rg.groups.iter().filter(|(rank, _)| *rank != triple_rank);
        let pair = others()
            .find(|(_, cards)| cards.len() >= 2)
            .map(|(_, cards)| cards[..2].to_vec())
            .or_else(|| {
                others()
                    .find(|(rank, cards)| {
                        !rank.is_joker() && cards.len() == 1 && wilds_left >= 1
                    })
                    .map(|(_, cards)| {
                        let mut chosen = cards.clone();
                        chosen.push(rg.wilds[wilds_used]);
                        chosen
                    })
            });
        if let Some(pair_cards) = pair {
            let mut play = triple_cards;
            play.extend(pair_cards);
            return Some(play);
        }
    }
    None
}

/// Cheapest five-card run whose top beats the target. Only plain cards of
/// plain ranks are scanned: twos, jokers, trump cards and wilds are all too
/// valuable (or outright illegal) to burn in a straight chase.
pub(crate) fn find_straight_above(ctx: &BotContext<'_>, target: u8) -> Option<Vec<Card>> {
    let trump = ctx.trump();
    let mut by_nominal: [Option<Card>; 15] = [None; 15];
    for &card in ctx.hand().iter() {
        let nominal = card.rank.nominal_value();
        if nominal >= Rank::Two.nominal_value() || card.effective_value(trump) == 15 {
            continue;
        }
        if by_nominal[nominal as usize].is_none() {
            by_nominal[nominal as usize] = Some(card);
        }
    }

    for low in 3u8..=10 {
        let window = low..low + 5;
        if window
            .clone()
            .all(|nominal| by_nominal[nominal as usize].is_some())
        {
            let top = Rank::from_nominal(low + 4).expect("run top rank");
            if top.effective_value(trump) > target {
                let run: Vec<Card> = window
                    .map(|nominal| by_nominal[nominal as usize].expect("checked above"))
                    .collect();
                return Some(run);
            }
        }
    }
    None
}

/// Cheapest winning ladder: `group_count` rank-consecutive groups of
/// `group_size` plain cards (plank and steel plate are the two instances).
pub(crate) fn find_ladder_above(
    ctx: &BotContext<'_>,
    group_count: usize,
    group_size: usize,
    target: u8,
) -> Option<Vec<Card>> {
    let trump = ctx.trump();
    let rg = rank_groups(ctx.hand(), trump);
    let mut by_nominal: [Option<&[Card]>; 15] = [None; 15];
    for (rank, cards) in &rg.groups {
        let nominal = rank.nominal_value();
        if nominal >= Rank::Two.nominal_value() || rank.effective_value(trump) == 15 {
            continue;
        }
        if cards.len() >= group_size {
            by_nominal[nominal as usize] = Some(cards.as_slice());
        }
    }

    let highest_low = 14 - group_count as u8 + 1;
    for low in 3u8..=highest_low {
        let window = low..low + group_count as u8;
        if window
            .clone()
            .all(|nominal| by_nominal[nominal as usize].is_some())
        {
            let top = Rank::from_nominal(low + group_count as u8 - 1).expect("ladder top rank");
            if top.effective_value(trump) > target {
                let play: Vec<Card> = window
                    .flat_map(|nominal| {
                        by_nominal[nominal as usize].expect("checked above")[..group_size]
                            .iter()
                            .copied()
                    })
                    .collect();
                return Some(play);
            }
        }
    }
    None
}

/// Cheapest bomb that legally beats the standing play: smallest size first,
/// plain before wild-assisted, lowest rank first. Also the same-shape path
/// for answering bombs, since `can_beat` already encodes the count-then-rank
/// rules and the straight-flush standoffs.
pub(crate) fn find_bomb_beating(ctx: &BotContext<'_>, table: &TablePlay) -> Option<Vec<Card>> {
    let trump = ctx.trump();
    let rg = rank_groups(ctx.hand(), trump);
    let mut candidates: Vec<(usize, bool, u8, Vec<Card>)> = Vec::new();

    for (rank, cards) in &rg.groups {
        if rank.is_joker() {
            continue;
        }
        let effective = rank.effective_value(trump);
        for size in 4..=cards.len().min(8) {
            candidates.push((size, false, effective, cards[..size].to_vec()));
        }
        if !cards.is_empty() {
            let ceiling = (cards.len() + rg.wilds.len()).min(8);
            for size in (cards.len() + 1).max(4)..=ceiling {
                let mut chosen = cards.clone();
                chosen.extend(rg.wilds.iter().copied().take(size - cards.len()));
                candidates.push((size, true, effective, chosen));
            }
        }
    }

    candidates.sort_by_key(|(size, wild, effective, _)| (*size, *wild, *effective));
    candidates
        .into_iter()
        .map(|(_, _, _, cards)| cards)
        .find(|cards| beats_standing(ctx, cards, table))
}
