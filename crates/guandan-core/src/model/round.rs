use crate::model::beat::can_beat;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::events::GameEvent;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::shape::{Shape, classify};
use serde::{Deserialize, Serialize};
use std::{array, fmt};

pub const CARDS_PER_SEAT: usize = 27;

/// The standing play on the table: the cards, what they classified as, and
/// who put them there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePlay {
    pub cards: Vec<Card>,
    pub shape: Shape,
    pub owner: Seat,
}

/// One hand's turn-and-pass state machine. The table is either open (no
/// standing play; the current seat leads freely) or led (a standing play
/// must be beaten or passed on). The trump rank is fixed for the whole
/// hand.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    turn: Seat,
    leader: Seat,
    trump: Rank,
    table: Option<TablePlay>,
    history: Vec<TablePlay>,
    pass_count: u8,
    events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    HandOver { first_out: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    HandOver,
    OutOfTurn { expected: Seat, actual: Seat },
    EmptySelection,
    CardsNotHeld,
    Unclassifiable,
    DoesNotBeat,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::HandOver => write!(f, "the hand is already over"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to act next but got {actual}")
            }
            PlayError::EmptySelection => write!(f, "no cards were selected"),
            PlayError::CardsNotHeld => write!(f, "selection includes cards the seat does not hold"),
            PlayError::Unclassifiable => write!(f, "selection does not form a playable shape"),
            PlayError::DoesNotBeat => write!(f, "selection does not beat the standing play"),
        }
    }
}

impl std::error::Error for PlayError {}

impl RoundState {
    /// Deals 27 cards to each seat and opens the table for the leader.
    pub fn deal(deck: &Deck, leader: Seat, trump: Rank) -> Self {
        let mut hands = array::from_fn(|_| Hand::new());
        for (index, card) in deck.cards().iter().enumerate() {
            let seat = Seat::from_index(index % 4).expect("seat index in range");
            hands[seat.index()].add(*card);
        }
        for hand in &mut hands {
            hand.sort_for_trump(trump);
        }
        Self::from_hands(hands, leader, trump)
    }

    /// Builds a round from explicit hands; used by tests and by callers
    /// reconstructing a position.
    pub fn from_hands(hands: [Hand; 4], leader: Seat, trump: Rank) -> Self {
        Self {
            hands,
            turn: leader,
            leader,
            trump,
            table: None,
            history: Vec::new(),
            pass_count: 0,
            events: vec![GameEvent::HandStarted { leader, trump }],
        }
    }

    pub fn trump(&self) -> Rank {
        self.trump
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hand_sizes(&self) -> [usize; 4] {
        array::from_fn(|i| self.hands[i].len())
    }

    pub fn table(&self) -> Option<&TablePlay> {
        self.table.as_ref()
    }

    pub fn history(&self) -> &[TablePlay] {
        &self.history
    }

    pub fn pass_count(&self) -> u8 {
        self.pass_count
    }

    /// True the instant any seat's hand empties; callers poll this after
    /// every accepted play.
    pub fn is_hand_over(&self) -> bool {
        self.hands.iter().any(|hand| hand.is_empty())
    }

    pub fn first_out(&self) -> Option<Seat> {
        Seat::LOOP
            .iter()
            .copied()
            .find(|seat| self.hands[seat.index()].is_empty())
    }

    /// Validates and applies one play. Nothing mutates on failure.
    pub fn play(&mut self, seat: Seat, cards: &[Card]) -> Result<PlayOutcome, PlayError> {
        if self.is_hand_over() {
            return Err(PlayError::HandOver);
        }
        if seat != self.turn {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }
        if cards.is_empty() {
            return Err(PlayError::EmptySelection);
        }
        if !self.hands[seat.index()].contains_all(cards) {
            return Err(PlayError::CardsNotHeld);
        }
        let shape = classify(cards, self.trump).ok_or(PlayError::Unclassifiable)?;
        if let Some(table) = &self.table {
            if !can_beat(
                cards,
                shape,
                &table.cards,
                table.shape,
                self.trump,
                seat,
                table.owner,
            ) {
                return Err(PlayError::DoesNotBeat);
            }
        }

        self.hands[seat.index()].remove_all(cards);
        let play = TablePlay {
            cards: cards.to_vec(),
            shape,
            owner: seat,
        };
        self.history.push(play.clone());
        self.table = Some(play);
        self.pass_count = 0;
        self.events.push(GameEvent::PlayAccepted {
            seat,
            shape,
            count: cards.len(),
        });

        let outcome = if self.hands[seat.index()].is_empty() {
            self.events.push(GameEvent::HandEnded { first_out: seat });
            PlayOutcome::HandOver { first_out: seat }
        } else {
            PlayOutcome::Played
        };
        self.advance_turn();
        Ok(outcome)
    }

    /// Passes the current seat's turn. After three consecutive passes the
    /// standing play clears and the next seat leads freely. Passing on an
    /// already-open table is tolerated as counter bookkeeping only.
    pub fn pass(&mut self, seat: Seat) -> Result<(), PlayError> {
        if self.is_hand_over() {
            return Err(PlayError::HandOver);
        }
        if seat != self.turn {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }
        self.pass_count += 1;
        self.events.push(GameEvent::Passed { seat });
        if usize::from(self.pass_count) >= Seat::LOOP.len() - 1 {
            self.table = None;
            self.pass_count = 0;
            self.events.push(GameEvent::TableCleared {
                leader: self.turn.next(),
            });
        }
        self.advance_turn();
        Ok(())
    }

    /// Hands back the structured events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance_turn(&mut self) {
        self.turn = self.turn.next();
        self.events.push(GameEvent::TurnChanged { seat: self.turn });
    }
}
