use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, Crime},
    game::ConnectionId,
    player::{Player, PlayerSecrets, ProtoPlayer, SeatId},
    skin::Skin,
};

/// Redacted view of the turn machine for one viewer. Maps are keyed by seat
/// role name; private fields are already filtered for the requesting seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum TurnSnapshot {
    #[serde(rename_all = "camelCase")]
    Suggest {
        /// The viewer's own pending suggestion, if any.
        suggestion: Option<Crime>,
        player_is_ready: BTreeMap<String, bool>,
    },
    #[serde(rename_all = "camelCase")]
    Share {
        suggestions: BTreeMap<String, Crime>,
        /// Suggester -> the seat that must disclose, or None if nobody holds
        /// a matching card.
        share_seats: BTreeMap<String, Option<SeatId>>,
        /// Only the disclosures the viewer owes; their answers so far.
        shared_cards: BTreeMap<String, Option<Card>>,
        player_is_ready: BTreeMap<String, bool>,
    },
    #[serde(rename_all = "camelCase")]
    Record {
        suggestions: BTreeMap<String, Crime>,
        share_seats: BTreeMap<String, Option<SeatId>>,
        /// Per suggester: Some only if the viewer is that guess's suggester
        /// or discloser, None for everyone else.
        shared_cards: BTreeMap<String, Option<Card>>,
        /// The viewer's own accusation this round, if any.
        accusation: Option<Crime>,
        player_is_ready: BTreeMap<String, bool>,
    },
    #[serde(rename_all = "camelCase")]
    Accused {
        failed_accusations: BTreeMap<String, Crime>,
        player_is_ready: BTreeMap<String, bool>,
    },
}

/// Per-connection snapshot of the whole game, tagged by lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum GameSnapshot {
    #[serde(rename_all = "camelCase")]
    Setup {
        skin: Skin,
        players_by_connection: BTreeMap<ConnectionId, ProtoPlayer>,
        connection_id: ConnectionId,
    },
    #[serde(rename_all = "camelCase")]
    InProgress {
        skin: Skin,
        players: Vec<Player>,
        player_secrets: Option<PlayerSecrets>,
        turn_state: TurnSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    GameOver {
        skin: Skin,
        players: Vec<Player>,
        player_secrets: Option<PlayerSecrets>,
        winners: Vec<SeatId>,
        solution: Crime,
    },
}

/// What the room hands to the transport for one connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomState {
    pub num_connections: usize,
    pub game: GameSnapshot,
}
