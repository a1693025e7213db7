use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::shape::Shape;
use serde::{Deserialize, Serialize};

/// Structured notifications accumulated by the round as it mutates. The
/// engine never logs or prints; callers drain the buffer and decide what to
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    HandStarted { leader: Seat, trump: Rank },
    PlayAccepted { seat: Seat, shape: Shape, count: usize },
    Passed { seat: Seat },
    TableCleared { leader: Seat },
    TurnChanged { seat: Seat },
    HandEnded { first_out: Seat },
}

#[cfg(test)]
mod tests {
    use super::GameEvent;
    use crate::model::seat::Seat;

    #[test]
    fn events_serialize_with_a_type_tag() {
        let event = GameEvent::Passed { seat: Seat::East };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"passed\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
