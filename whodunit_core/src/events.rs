use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, Crime, RoleCard},
    player::{Mark, SeatId},
};

/// Inbound event envelope, tagged by `kind` on the wire. Unknown kinds fail
/// deserialization at the boundary; the transport logs and drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PlayerEvent {
    SetRole {
        data: RoleCard,
    },
    SetName {
        data: String,
    },
    SetReady {
        data: bool,
    },
    SetSkin {
        data: String,
    },
    Start,
    Suggest {
        suggestion: Crime,
    },
    #[serde(rename_all = "camelCase")]
    ShareCard {
        share_with: SeatId,
        share_card: Card,
    },
    Accuse {
        data: Crime,
    },
    #[serde(rename_all = "camelCase")]
    SetNote {
        subject_seat: String,
        card: Card,
        marks: Vec<Mark>,
    },
}

/// Room-level envelope: either a lifecycle command for the room itself or a
/// game event to forward to the current game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RoomEvent {
    Restart,
    GameEvent { event: PlayerEvent },
}
