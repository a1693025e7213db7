use crate::model::card::Card;
use crate::model::rank::Rank;
use std::vec::Vec;

/// One seat's cards. Two decks are in play, so the hand is a multiset:
/// identical cards may appear twice and removal takes one copy at a time.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort_nominal();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort_nominal();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    /// True when the hand holds every requested card, counting copies:
    /// asking for two Heart Fives requires both deck copies to be present.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut pool = self.cards.clone();
        for wanted in cards {
            match pool.iter().position(|c| c == wanted) {
                Some(index) => {
                    pool.remove(index);
                }
                None => return false,
            }
        }
        true
    }

    /// Removes every requested card (one copy each) or nothing at all.
    pub fn remove_all(&mut self, cards: &[Card]) -> bool {
        if !self.contains_all(cards) {
            return false;
        }
        for card in cards {
            self.remove(*card);
        }
        true
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Orders by effective value under the hand's trump, breaking ties
    /// Spade < Club < Diamond < Heart, so the trump cards and jokers land
    /// at the top end of the fan.
    pub fn sort_for_trump(&mut self, trump: Rank) {
        self.cards.sort_by(|a, b| {
            a.effective_value(trump)
                .cmp(&b.effective_value(trump))
                .then(a.suit.cmp(&b.suit))
        });
    }

    fn sort_nominal(&mut self) {
        self.cards
            .sort_by(|a, b| a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit)));
    }
}
