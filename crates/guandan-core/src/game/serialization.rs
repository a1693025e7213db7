use super::match_state::MatchState;
use crate::model::level::LevelBoard;
use crate::model::player::Player;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// The persistent slice of a match: enough to re-deal the next hand
/// identically. Mid-hand table state is deliberately not captured; saves
/// happen at hand boundaries and storage layout is the caller's business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub hand_number: u32,
    pub levels: [u8; 2],
    pub next_leader: Seat,
    pub players: [Player; 4],
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            hand_number: state.hand_number(),
            levels: state.levels().values(),
            next_leader: state.next_leader(),
            players: state.players().clone(),
        }
    }

    pub fn restore(self) -> MatchState {
        let mut state = MatchState::with_seed_hand(
            self.seed,
            self.hand_number,
            self.next_leader,
            LevelBoard::with_values(self.levels),
        );
        state.set_players(self.players);
        state
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::MatchSnapshot;
    use crate::game::match_state::MatchState;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;

    #[test]
    fn snapshot_serializes_to_json() {
        let state = MatchState::with_seed(Seat::North, 99);
        let json = MatchSnapshot::to_json(&state).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"hand_number\": 1"));
    }

    #[test]
    fn snapshot_roundtrip_restores_deal_and_levels() {
        let state = MatchState::with_seed_hand(
            123,
            2,
            Seat::South,
            crate::model::level::LevelBoard::with_values([7, 4]),
        );
        let snapshot = MatchSnapshot::capture(&state);
        let restored = snapshot.clone().restore();

        assert_eq!(restored.seed(), 123);
        assert_eq!(restored.hand_number(), 2);
        assert_eq!(restored.levels().values(), [7, 4]);
        assert_eq!(restored.trump(), Rank::Seven);
        for seat in Seat::LOOP.iter().copied() {
            assert_eq!(
                restored.round().hand(seat).cards(),
                state.round().hand(seat).cards()
            );
        }
    }

    #[test]
    fn snapshot_from_json_ignores_unknown_fields() {
        let legacy = r#"{
            "seed": 7,
            "hand_number": 2,
            "levels": [5, 2],
            "next_leader": "East",
            "players": [
                {"name": "Player 1", "controller": "human"},
                {"name": "Bot East", "controller": "computer"},
                {"name": "Bot South", "controller": "computer"},
                {"name": "Bot West", "controller": "computer"}
            ],
            "tribute_state": "none"
        }"#;

        let snapshot = MatchSnapshot::from_json(legacy).unwrap();
        assert_eq!(snapshot.hand_number, 2);
        assert_eq!(snapshot.levels, [5, 2]);
        assert_eq!(snapshot.next_leader, Seat::East);
    }
}
