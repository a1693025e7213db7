use super::BotContext;
use super::respond::{
    find_group_above, find_ladder_above, find_straight_above, find_three_with_pair_above,
};
use guandan_core::model::card::Card;

/// Picks an opening play for a free table. Combination shapes go first so
/// the awkward material leaves the hand early; singles are the last resort,
/// smallest by default and largest once an opponent is nearly out.
pub struct LeadPlanner;

impl LeadPlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Option<Vec<Card>> {
        find_ladder_above(ctx, 2, 3, 0)
            .or_else(|| find_ladder_above(ctx, 3, 2, 0))
            .or_else(|| find_straight_above(ctx, 0))
            .or_else(|| find_three_with_pair_above(ctx, 0))
            .or_else(|| find_group_above(ctx, 3, 0, false, false))
            .or_else(|| find_group_above(ctx, 2, 0, false, false))
            .or_else(|| Self::single(ctx))
    }

    fn single(ctx: &BotContext<'_>) -> Option<Vec<Card>> {
        let trump = ctx.trump();
        let iter = ctx.hand().iter().copied();
        let pick = if ctx.opponent_near_empty() {
            iter.max_by_key(|card| (card.effective_value(trump), !card.is_wild(trump)))
        } else {
            iter.min_by_key(|card| (card.effective_value(trump), card.is_wild(trump)))
        };
        pick.map(|card| vec![card])
    }
}

#[cfg(test)]
mod tests {
    use super::LeadPlanner;
    use crate::bot::BotContext;
    use guandan_core::model::card::Card;
    use guandan_core::model::hand::Hand;
    use guandan_core::model::rank::Rank;
    use guandan_core::model::round::RoundState;
    use guandan_core::model::seat::Seat;
    use guandan_core::model::suit::Suit;

    const TRUMP: Rank = Rank::Five;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn filler() -> Vec<Card> {
        vec![
            card(Rank::Three, Suit::Diamond),
            card(Rank::Four, Suit::Diamond),
            card(Rank::Six, Suit::Diamond),
        ]
    }

    fn lead_with(leader_cards: Vec<Card>) -> Option<Vec<Card>> {
        let hands = [
            Hand::with_cards(leader_cards),
            Hand::with_cards(filler()),
            Hand::with_cards(filler()),
            Hand::with_cards(filler()),
        ];
        let round = RoundState::from_hands(hands, Seat::North, TRUMP);
        let ctx = BotContext::new(Seat::North, &round);
        LeadPlanner::choose(&ctx)
    }

    fn ranks_of(cards: &[Card]) -> Vec<Rank> {
        cards.iter().map(|c| c.rank).collect()
    }

    #[test]
    fn steel_plate_leads_before_anything_else() {
        let play = lead_with(vec![
            card(Rank::Seven, Suit::Spade),
            card(Rank::Seven, Suit::Club),
            card(Rank::Seven, Suit::Diamond),
            card(Rank::Eight, Suit::Spade),
            card(Rank::Eight, Suit::Club),
            card(Rank::Eight, Suit::Diamond),
            card(Rank::Ace, Suit::Spade),
        ])
        .expect("a lead exists");
        assert_eq!(play.len(), 6);
        assert!(play.iter().all(|c| matches!(c.rank, Rank::Seven | Rank::Eight)));
    }

    #[test]
    fn straight_leads_before_pairs() {
        let play = lead_with(vec![
            card(Rank::Six, Suit::Spade),
            card(Rank::Seven, Suit::Club),
            card(Rank::Eight, Suit::Diamond),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Ten, Suit::Club),
            card(Rank::Ace, Suit::Spade),
            card(Rank::Ace, Suit::Club),
        ])
        .expect("a lead exists");
        assert_eq!(
            ranks_of(&play),
            vec![Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]
        );
    }

    #[test]
    fn pair_leads_before_singles() {
        let play = lead_with(vec![
            card(Rank::Nine, Suit::Spade),
            card(Rank::Nine, Suit::Club),
            card(Rank::Ace, Suit::Spade),
        ])
        .expect("a lead exists");
        assert_eq!(ranks_of(&play), vec![Rank::Nine, Rank::Nine]);
    }

    #[test]
    fn lone_cards_lead_with_the_smallest() {
        let play = lead_with(vec![
            card(Rank::King, Suit::Spade),
            card(Rank::Eight, Suit::Club),
            card(Rank::Ace, Suit::Diamond),
        ])
        .expect("a lead exists");
        assert_eq!(ranks_of(&play), vec![Rank::Eight]);
    }

    #[test]
    fn endgame_lead_falls_back_to_the_largest_single() {
        let hands = [
            Hand::with_cards(vec![
                card(Rank::King, Suit::Spade),
                card(Rank::Eight, Suit::Club),
                card(Rank::Ace, Suit::Diamond),
            ]),
            Hand::with_cards(vec![card(Rank::Three, Suit::Heart)]),
            Hand::with_cards(filler()),
            Hand::with_cards(filler()),
        ];
        let round = RoundState::from_hands(hands, Seat::North, TRUMP);
        let ctx = BotContext::new(Seat::North, &round);
        let play = LeadPlanner::choose(&ctx).expect("a lead exists");
        assert_eq!(ranks_of(&play), vec![Rank::Ace]);
    }

    #[test]
    fn a_hand_of_one_wild_leads_it() {
        let play = lead_with(vec![card(Rank::Five, Suit::Heart)]).expect("a lead exists");
        assert_eq!(play.len(), 1);
        assert!(play[0].is_wild(TRUMP));
    }
}
