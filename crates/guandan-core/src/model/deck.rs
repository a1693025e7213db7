use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 108;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Two standard decks plus four jokers: two copies of every suit-rank
    /// combination and two copies of each joker, 108 cards in total.
    pub fn double_deck() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for _ in 0..2 {
            for suit in Suit::DEALT.iter().copied() {
                for rank in Rank::STANDARD.iter().copied() {
                    cards.push(Card::new(rank, suit));
                }
            }
            cards.push(Card::new(Rank::SmallJoker, Suit::Joker));
            cards.push(Card::new(Rank::BigJoker, Suit::Joker));
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::double_deck();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, Deck};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn double_deck_has_108_cards() {
        let deck = Deck::double_deck();
        assert_eq!(deck.cards().len(), DECK_SIZE);
    }

    #[test]
    fn every_card_appears_exactly_twice() {
        let deck = Deck::double_deck();
        let copies = |card: Card| deck.cards().iter().filter(|&&c| c == card).count();
        assert_eq!(copies(Card::new(Rank::Five, Suit::Heart)), 2);
        assert_eq!(copies(Card::new(Rank::Ace, Suit::Spade)), 2);
        assert_eq!(copies(Card::new(Rank::SmallJoker, Suit::Joker)), 2);
        assert_eq!(copies(Card::new(Rank::BigJoker, Suit::Joker)), 2);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }
}
